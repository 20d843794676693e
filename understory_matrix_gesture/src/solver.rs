// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point-pair solver: the transform that carries a few source points onto
//! their destinations.
//!
//! Kurbo provides the matrix algebra ([`Affine`] multiplication, inversion and
//! point mapping) but not the "map these points onto those points" step, so
//! [`solve`] fills that gap for the one- and two-point cases a touch gesture
//! produces:
//!
//! - One pair yields a pure translation.
//! - Two pairs yield the orientation-preserving similarity transform (uniform
//!   scale, rotation and translation) that carries both source points exactly
//!   onto their destinations.
//!
//! ```
//! use kurbo::{Affine, Point};
//! use understory_matrix_gesture::solve;
//!
//! // Rotate a quarter turn about (10, 10) by swinging the second point.
//! let src = [Point::new(10.0, 10.0), Point::new(20.0, 10.0)];
//! let dst = [Point::new(10.0, 10.0), Point::new(10.0, 20.0)];
//! let xf = solve(&src, &dst).unwrap();
//! let moved = xf * Point::new(30.0, 10.0);
//! assert!((moved - Point::new(10.0, 30.0)).hypot() < 1e-9);
//! ```

use core::fmt;

use kurbo::{Affine, Point};

/// The largest number of point pairs [`solve`] accepts.
pub const MAX_POINT_PAIRS: usize = 2;

/// Reasons [`solve`] cannot produce a transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveError {
    /// The source and destination slices have different lengths.
    LengthMismatch {
        /// Number of source points supplied.
        src: usize,
        /// Number of destination points supplied.
        dst: usize,
    },
    /// More than [`MAX_POINT_PAIRS`] pairs were supplied.
    TooManyPoints(usize),
    /// The two source points coincide, so no similarity transform is defined.
    Degenerate,
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { src, dst } => write!(
                f,
                "point count mismatch: {src} source point(s), {dst} destination point(s)"
            ),
            Self::TooManyPoints(n) => write!(
                f,
                "{n} point pairs supplied, at most {MAX_POINT_PAIRS} are supported"
            ),
            Self::Degenerate => f.write_str("source points coincide"),
        }
    }
}

impl core::error::Error for SolveError {}

/// Computes the transform mapping each `src[i]` onto `dst[i]`.
///
/// An empty input yields [`Affine::IDENTITY`].
///
/// # Errors
///
/// Returns [`SolveError::LengthMismatch`] if the slices differ in length,
/// [`SolveError::TooManyPoints`] for more than [`MAX_POINT_PAIRS`] pairs, and
/// [`SolveError::Degenerate`] when two source points coincide.
pub fn solve(src: &[Point], dst: &[Point]) -> Result<Affine, SolveError> {
    if src.len() != dst.len() {
        return Err(SolveError::LengthMismatch {
            src: src.len(),
            dst: dst.len(),
        });
    }
    match (src, dst) {
        ([], []) => Ok(Affine::IDENTITY),
        ([s0], [d0]) => Ok(Affine::translate(*d0 - *s0)),
        ([s0, s1], [d0, d1]) => similarity(*s0, *s1, *d0, *d1),
        _ => Err(SolveError::TooManyPoints(src.len())),
    }
}

/// Similarity transform taking segment `s0 → s1` onto segment `d0 → d1`.
///
/// Treating the segment vectors as complex numbers `u` and `v`, the linear
/// part is multiplication by `v / u`; the translation then pins `s0` to `d0`.
fn similarity(s0: Point, s1: Point, d0: Point, d1: Point) -> Result<Affine, SolveError> {
    let u = s1 - s0;
    let v = d1 - d0;
    let len2 = u.hypot2();
    if len2 == 0.0 {
        return Err(SolveError::Degenerate);
    }
    let re = (u.x * v.x + u.y * v.y) / len2;
    let im = (u.x * v.y - u.y * v.x) / len2;
    let tx = d0.x - (re * s0.x - im * s0.y);
    let ty = d0.y - (im * s0.x + re * s0.y);
    Ok(Affine::new([re, im, -im, re, tx, ty]))
}
