// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Vec2};

/// Human-readable decomposition of an accumulated gesture matrix.
///
/// The decomposition assumes the matrix is a similarity transform (uniform
/// scale, rotation and translation). Matrices with shear or non-uniform scale
/// still decompose, but `scale` and `angle` are then only approximations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Readout {
    /// Uniform scale factor.
    pub scale: f64,
    /// Rotation in degrees, positive turning from +x towards +y.
    pub angle: f64,
    /// Translation, taken directly from the matrix.
    pub translate: Vec2,
}

impl Readout {
    /// Decomposes `matrix` into scale, angle and translation.
    ///
    /// With Kurbo's coefficients `[a, b, c, d, e, f]`:
    ///
    /// ```text
    /// scale     = sqrt(a² + b²)
    /// angle     = -atan2(c, a), in degrees
    /// translate = (e, f)
    /// ```
    #[must_use]
    pub fn from_affine(matrix: &Affine) -> Self {
        let [a, b, c, _d, e, f] = matrix.as_coeffs();
        Self {
            scale: Vec2::new(a, b).hypot(),
            angle: -Vec2::new(a, c).atan2().to_degrees(),
            translate: Vec2::new(e, f),
        }
    }
}

impl Default for Readout {
    fn default() -> Self {
        Self::from_affine(&Affine::IDENTITY)
    }
}
