// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_matrix_gesture --heading-base-level=0

//! Understory Matrix Gesture: multi-touch pan, pinch and rotate as an affine matrix.
//!
//! This crate turns raw touch input with up to two contacts into a single
//! accumulated [`kurbo::Affine`] suitable for manipulating a displayed object
//! (an image, a canvas layer, a vector shape). It focuses on:
//! - Tracking which of the two pointer slots are down and where.
//! - Solving, on every move, for the transform that carries the previous
//!   contact positions onto the new ones ([`solve`]).
//! - Composing that increment onto a running matrix.
//! - Decomposing the matrix into scale, angle and translation ([`Readout`]).
//!
//! It does **not** own event delivery or rendering. Callers are expected to:
//! - Translate their platform's touch frames into [`TouchEvent`]s.
//! - Apply [`MatrixGestureTracker::matrix`] when drawing the object.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Affine;
//! use understory_matrix_gesture::{Contact, MatrixGestureTracker, PointerId, TouchEvent};
//!
//! let mut tracker = MatrixGestureTracker::new(Affine::IDENTITY)
//!     .with_listener(|m: &Affine| {
//!         // Schedule a repaint with `m`.
//!         let _ = m;
//!     });
//!
//! let a = Contact::new(PointerId::FIRST, (100.0, 100.0));
//! let b = Contact::new(PointerId::SECOND, (200.0, 100.0));
//!
//! tracker.handle_event(&TouchEvent::down(a));
//! tracker.handle_event(&TouchEvent::pointer_added(a, b));
//! // Spread the fingers to twice their distance: a 2x pinch about `a`.
//! tracker.handle_event(&TouchEvent::move_two(a, b.moved_to((300.0, 100.0))));
//!
//! assert!((tracker.scale() - 2.0).abs() < 1e-9);
//! assert!(tracker.angle().abs() < 1e-9);
//! ```
//!
//! ## Design notes
//!
//! - Exactly two pointer slots exist. Events reporting a third contact are
//!   dropped without touching any state.
//! - Each move composes onto the matrix in the current frame:
//!   `matrix = increment * matrix`. Deltas come from the last applied
//!   positions, not from touch-down.
//! - One contact yields translation only; two contacts yield a similarity
//!   transform, so the matrix never picks up shear from gestures.
//! - The listener is optional and runs synchronously once per applied move.
//!
//! ## Features
//!
//! - `std` (default): build Kurbo against the standard library.
//! - `libm`: build Kurbo's float math on `libm` for `no_std` targets.
//! - `tracing`: emit `trace!` events for applied increments and re-anchoring.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod event;
mod readout;
mod solver;
mod tracker;

pub use event::{Contact, InvalidPointerId, MAX_POINTERS, PointerId, TouchAction, TouchEvent};
pub use readout::Readout;
pub use solver::{MAX_POINT_PAIRS, SolveError, solve};
pub use tracker::{GestureOutcome, GesturePhase, MatrixGestureTracker, MatrixListener};
