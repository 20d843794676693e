// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture tracker: touch events in, accumulated matrix out.
//!
//! ## Usage
//!
//! 1) Create a [`MatrixGestureTracker`] seeded with the object's current
//!    transform (or the identity).
//! 2) Feed every [`TouchEvent`] for the object to
//!    [`MatrixGestureTracker::handle_event`].
//! 3) Read [`MatrixGestureTracker::matrix`] for rendering, or the decomposed
//!    [`MatrixGestureTracker::readout`] for display.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Affine, Vec2};
//! use understory_matrix_gesture::{Contact, MatrixGestureTracker, PointerId, TouchEvent};
//!
//! let mut tracker = MatrixGestureTracker::new(Affine::IDENTITY);
//! let finger = Contact::new(PointerId::FIRST, (0.0, 0.0));
//!
//! tracker.handle_event(&TouchEvent::down(finger));
//! tracker.handle_event(&TouchEvent::move_one(finger.moved_to((100.0, 50.0))));
//! tracker.handle_event(&TouchEvent::up(finger.moved_to((100.0, 50.0))));
//!
//! assert_eq!(tracker.translate(), Vec2::new(100.0, 50.0));
//! assert_eq!(tracker.scale(), 1.0);
//! ```
//!
//! ## Threading
//!
//! The tracker is single-owner and synchronous. The listener runs inside
//! [`MatrixGestureTracker::handle_event`] and cannot reach back into the
//! tracker. Hosts delivering events from several threads must serialise them
//! before they reach the tracker.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Affine, Point, Vec2};

use crate::event::{MAX_POINTERS, TouchAction, TouchEvent};
use crate::readout::Readout;
use crate::solver::solve;

/// Receives the accumulated matrix after every applied move.
///
/// Any `FnMut(&Affine)` closure is a listener.
pub trait MatrixListener {
    /// Called with the updated accumulated matrix.
    fn on_matrix_change(&mut self, matrix: &Affine);
}

impl<F: FnMut(&Affine)> MatrixListener for F {
    fn on_matrix_change(&mut self, matrix: &Affine) {
        self(matrix);
    }
}

/// What [`MatrixGestureTracker::handle_event`] did with an event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureOutcome {
    /// The event reported more than two pointers and was dropped untouched.
    Ignored,
    /// Pointer bookkeeping was updated; the matrix did not change.
    Tracked,
    /// A move was applied; carries the incremental transform composed onto
    /// the accumulated matrix.
    Transformed(Affine),
}

/// How many fingers the current gesture holds, as of the last accepted event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No contact is down.
    #[default]
    Idle,
    /// One contact drags.
    OneFinger,
    /// Two contacts pinch and rotate.
    TwoFinger,
}

impl GesturePhase {
    fn from_contacts(count: usize) -> Self {
        match count {
            0 => Self::Idle,
            1 => Self::OneFinger,
            _ => Self::TwoFinger,
        }
    }
}

/// Accumulates pan, pinch and rotate gestures into an affine matrix.
///
/// Each move composes the transform that carries the previous contact
/// positions onto the new ones. One contact contributes a translation; two
/// contacts contribute a similarity transform (uniform scale, rotation and
/// translation). Deltas are taken from the last applied positions, so the
/// matrix accumulates rather than replaying from touch-down.
pub struct MatrixGestureTracker {
    /// Last settled position per slot.
    reference: [Point; MAX_POINTERS],
    /// In-progress position per slot, written on move.
    current: [Point; MAX_POINTERS],
    matrix: Affine,
    readout: Readout,
    phase: GesturePhase,
    listener: Option<Box<dyn MatrixListener>>,
}

impl fmt::Debug for MatrixGestureTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixGestureTracker")
            .field("reference", &self.reference)
            .field("current", &self.current)
            .field("matrix", &self.matrix)
            .field("readout", &self.readout)
            .field("phase", &self.phase)
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for MatrixGestureTracker {
    fn default() -> Self {
        Self::new(Affine::IDENTITY)
    }
}

impl MatrixGestureTracker {
    /// Creates a tracker whose accumulated matrix starts at `seed`.
    #[must_use]
    pub fn new(seed: Affine) -> Self {
        Self {
            reference: [Point::ZERO; MAX_POINTERS],
            current: [Point::ZERO; MAX_POINTERS],
            matrix: seed,
            readout: Readout::from_affine(&seed),
            phase: GesturePhase::Idle,
            listener: None,
        }
    }

    /// Registers `listener` to be notified after every applied move.
    #[must_use]
    pub fn with_listener(mut self, listener: impl MatrixListener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Replaces the listener; `None` removes it.
    pub fn set_listener(&mut self, listener: Option<Box<dyn MatrixListener>>) {
        self.listener = listener;
    }

    /// Applies one touch event.
    ///
    /// Events reporting more than two pointers are ignored outright. Every
    /// other event refreshes the [`Readout`], whether or not the matrix
    /// changed. Only [`TouchAction::Move`] changes the matrix and notifies the
    /// listener.
    pub fn handle_event(&mut self, event: &TouchEvent) -> GestureOutcome {
        if event.pointer_count() > MAX_POINTERS {
            return GestureOutcome::Ignored;
        }

        let outcome = match event.action() {
            TouchAction::Down | TouchAction::PointerAdded => {
                for contact in event.contacts() {
                    self.reference[contact.id.index()] = contact.position;
                }
                self.phase = GesturePhase::from_contacts(event.pointer_count());
                GestureOutcome::Tracked
            }
            TouchAction::Move => self.apply_move(event),
            TouchAction::PointerRemoved => {
                self.reanchor(event);
                GestureOutcome::Tracked
            }
            TouchAction::Up => {
                self.phase = GesturePhase::Idle;
                GestureOutcome::Tracked
            }
        };

        self.readout = Readout::from_affine(&self.matrix);
        outcome
    }

    fn apply_move(&mut self, event: &TouchEvent) -> GestureOutcome {
        let mut src = [Point::ZERO; MAX_POINTERS];
        let mut dst = [Point::ZERO; MAX_POINTERS];
        let mut pairs = 0;
        for contact in event.contacts() {
            let slot = contact.id.index();
            self.current[slot] = contact.position;
            src[pairs] = self.reference[slot];
            dst[pairs] = contact.position;
            pairs += 1;
        }

        // Coincident contacts have no defined similarity; leave the matrix be.
        let incremental = match solve(&src[..pairs], &dst[..pairs]) {
            Ok(xf) => xf,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(error = %_err, "gesture increment skipped");
                Affine::IDENTITY
            }
        };

        self.matrix = incremental * self.matrix;
        self.reference = self.current;
        self.phase = GesturePhase::from_contacts(pairs);

        #[cfg(feature = "tracing")]
        tracing::trace!(pairs, increment = ?incremental, matrix = ?self.matrix, "gesture increment applied");

        if let Some(listener) = self.listener.as_mut() {
            listener.on_matrix_change(&self.matrix);
        }
        GestureOutcome::Transformed(incremental)
    }

    /// Re-anchors the surviving contact at its live position when the other
    /// lifts, so the following single-finger moves start from where it is.
    ///
    /// Only a two-contact removal with a known lifting pointer does anything.
    fn reanchor(&mut self, event: &TouchEvent) {
        if event.pointer_count() != MAX_POINTERS {
            return;
        }
        let Some(lifting) = event.trigger() else {
            return;
        };
        let survivor = lifting.other();
        let Some(position) = event.contact(survivor) else {
            return;
        };
        self.reference[survivor.index()] = position;
        self.phase = GesturePhase::OneFinger;

        #[cfg(feature = "tracing")]
        tracing::trace!(?lifting, ?survivor, ?position, "gesture re-anchored");
    }

    /// The accumulated matrix.
    #[must_use]
    pub fn matrix(&self) -> Affine {
        self.matrix
    }

    /// Scale, angle and translation decomposed from [`Self::matrix`].
    #[must_use]
    pub fn readout(&self) -> Readout {
        self.readout
    }

    /// Uniform scale factor of the accumulated matrix.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.readout.scale
    }

    /// Rotation of the accumulated matrix, in degrees.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.readout.angle
    }

    /// Translation of the accumulated matrix.
    #[must_use]
    pub fn translate(&self) -> Vec2 {
        self.readout.translate
    }

    /// Finger count of the gesture in progress.
    #[must_use]
    pub fn gesture_phase(&self) -> GesturePhase {
        self.phase
    }
}
