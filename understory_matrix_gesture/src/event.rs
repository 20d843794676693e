// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch events as the gesture tracker consumes them.
//!
//! A [`TouchEvent`] is a snapshot of every contact the host reports for one
//! input frame, tagged with what changed ([`TouchAction`]). The host reports
//! how many pointers are down; the event stores positions for at most two of
//! them, since the tracker rejects anything beyond that.
//!
//! The constructors mirror the sequences a touch screen produces:
//!
//! ```
//! use kurbo::Point;
//! use understory_matrix_gesture::{Contact, PointerId, TouchAction, TouchEvent};
//!
//! let a = Contact::new(PointerId::FIRST, Point::new(10.0, 10.0));
//! let b = Contact::new(PointerId::SECOND, Point::new(60.0, 10.0));
//!
//! let frames = [
//!     TouchEvent::down(a),
//!     TouchEvent::pointer_added(a, b),
//!     TouchEvent::move_two(a, b.moved_to(Point::new(60.0, 40.0))),
//!     TouchEvent::pointer_removed(a, b, PointerId::SECOND),
//!     TouchEvent::up(a),
//! ];
//! assert_eq!(frames[2].action(), TouchAction::Move);
//! assert_eq!(frames[2].pointer_count(), 2);
//! ```

use core::fmt;

use kurbo::Point;

/// Number of pointer slots the tracker keeps.
pub const MAX_POINTERS: usize = 2;

/// Stable identifier of a tracked contact: slot 0 or slot 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(u8);

impl PointerId {
    /// The first contact of a gesture.
    pub const FIRST: Self = Self(0);
    /// The second contact of a gesture.
    pub const SECOND: Self = Self(1);

    /// Returns the id for `raw`, or `None` if it names a third slot or beyond.
    #[must_use]
    pub const fn new(raw: u8) -> Option<Self> {
        if (raw as usize) < MAX_POINTERS {
            Some(Self(raw))
        } else {
            None
        }
    }

    /// The slot index this id addresses.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other of the two slots.
    #[must_use]
    pub const fn other(self) -> Self {
        Self(1 - self.0)
    }
}

impl TryFrom<u8> for PointerId {
    type Error = InvalidPointerId;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or(InvalidPointerId(raw))
    }
}

/// A raw pointer id outside the two supported slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidPointerId(pub u8);

impl fmt::Display for InvalidPointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pointer id {} is out of range, only ids below {MAX_POINTERS} are tracked",
            self.0
        )
    }
}

impl core::error::Error for InvalidPointerId {}

/// One contact point and where it currently is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Which slot this contact occupies.
    pub id: PointerId,
    /// Position in the host's coordinate space.
    pub position: Point,
}

impl Contact {
    /// Creates a contact for `id` at `position`.
    #[must_use]
    pub fn new(id: PointerId, position: impl Into<Point>) -> Self {
        Self {
            id,
            position: position.into(),
        }
    }

    /// The same contact at a new position.
    #[must_use]
    pub fn moved_to(self, position: impl Into<Point>) -> Self {
        Self::new(self.id, position)
    }
}

/// What changed in the frame a [`TouchEvent`] describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchAction {
    /// The first contact touched down.
    Down,
    /// A further contact touched down while another is held.
    PointerAdded,
    /// One or more held contacts moved.
    Move,
    /// One contact lifted while another stays down.
    PointerRemoved,
    /// The last contact lifted.
    Up,
}

/// A snapshot of the active contacts for one input frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEvent {
    action: TouchAction,
    pointer_count: usize,
    contacts: [Option<Contact>; MAX_POINTERS],
    trigger: Option<PointerId>,
}

impl TouchEvent {
    /// Creates an event from the contacts the host reports.
    ///
    /// `pointer_count` becomes `contacts.len()`; only the first
    /// [`MAX_POINTERS`] positions are kept. The trigger defaults to the last
    /// reported contact.
    #[must_use]
    pub fn new(action: TouchAction, contacts: &[Contact]) -> Self {
        let mut slots = [None; MAX_POINTERS];
        for (slot, contact) in slots.iter_mut().zip(contacts) {
            *slot = Some(*contact);
        }
        Self {
            action,
            pointer_count: contacts.len(),
            contacts: slots,
            trigger: contacts.last().map(|c| c.id),
        }
    }

    /// First contact touching down.
    #[must_use]
    pub fn down(contact: Contact) -> Self {
        Self::new(TouchAction::Down, &[contact])
    }

    /// Second contact `added` touching down while `held` stays down.
    #[must_use]
    pub fn pointer_added(held: Contact, added: Contact) -> Self {
        Self::new(TouchAction::PointerAdded, &[held, added])
    }

    /// A single held contact moving.
    #[must_use]
    pub fn move_one(contact: Contact) -> Self {
        Self::new(TouchAction::Move, &[contact]).with_trigger(None)
    }

    /// Two held contacts moving.
    #[must_use]
    pub fn move_two(a: Contact, b: Contact) -> Self {
        Self::new(TouchAction::Move, &[a, b]).with_trigger(None)
    }

    /// `lifting` leaves the screen; both contacts are still reported.
    #[must_use]
    pub fn pointer_removed(a: Contact, b: Contact, lifting: PointerId) -> Self {
        Self::new(TouchAction::PointerRemoved, &[a, b]).with_trigger(Some(lifting))
    }

    /// The last contact lifting.
    #[must_use]
    pub fn up(contact: Contact) -> Self {
        Self::new(TouchAction::Up, &[contact])
    }

    /// Overrides the pointer reported as having caused this event.
    #[must_use]
    pub fn with_trigger(mut self, trigger: Option<PointerId>) -> Self {
        self.trigger = trigger;
        self
    }

    /// Overrides the reported pointer count, e.g. when the host saw a third
    /// contact whose position is not carried.
    #[must_use]
    pub fn with_pointer_count(mut self, pointer_count: usize) -> Self {
        self.pointer_count = pointer_count;
        self
    }

    /// What changed in this frame.
    #[must_use]
    pub fn action(&self) -> TouchAction {
        self.action
    }

    /// How many pointers the host reports as down.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointer_count
    }

    /// The contacts carried by this event, in reported order.
    pub fn contacts(&self) -> impl Iterator<Item = Contact> + '_ {
        self.contacts.iter().flatten().copied()
    }

    /// The pointer whose change caused this event, if any.
    #[must_use]
    pub fn trigger(&self) -> Option<PointerId> {
        self.trigger
    }

    /// Position of the contact with `id`, if carried.
    #[must_use]
    pub fn contact(&self, id: PointerId) -> Option<Point> {
        self.contacts().find(|c| c.id == id).map(|c| c.position)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn pointer_ids_stop_at_two_slots() {
        assert_eq!(PointerId::new(0), Some(PointerId::FIRST));
        assert_eq!(PointerId::new(1), Some(PointerId::SECOND));
        assert_eq!(PointerId::new(2), None);
        assert_eq!(PointerId::try_from(7), Err(InvalidPointerId(7)));
        assert_eq!(PointerId::FIRST.other(), PointerId::SECOND);
        assert_eq!(PointerId::SECOND.other(), PointerId::FIRST);
        assert_eq!(PointerId::SECOND.index(), 1);
    }

    #[test]
    fn constructors_set_action_count_and_trigger() {
        let a = Contact::new(PointerId::FIRST, (1.0, 2.0));
        let b = Contact::new(PointerId::SECOND, (3.0, 4.0));

        let down = TouchEvent::down(a);
        assert_eq!(down.action(), TouchAction::Down);
        assert_eq!(down.pointer_count(), 1);
        assert_eq!(down.trigger(), Some(PointerId::FIRST));

        let added = TouchEvent::pointer_added(a, b);
        assert_eq!(added.pointer_count(), 2);
        assert_eq!(added.trigger(), Some(PointerId::SECOND));

        let moved = TouchEvent::move_two(a, b);
        assert_eq!(moved.trigger(), None);

        let removed = TouchEvent::pointer_removed(a, b, PointerId::FIRST);
        assert_eq!(removed.action(), TouchAction::PointerRemoved);
        assert_eq!(removed.trigger(), Some(PointerId::FIRST));
    }

    #[test]
    fn extra_contacts_are_counted_but_not_stored() {
        let a = Contact::new(PointerId::FIRST, (1.0, 1.0));
        let b = Contact::new(PointerId::SECOND, (2.0, 2.0));
        let event = TouchEvent::new(TouchAction::Move, &[a, b, a]);

        assert_eq!(event.pointer_count(), 3);
        assert_eq!(event.contacts().collect::<Vec<_>>(), [a, b]);
    }

    #[test]
    fn contact_lookup_by_id() {
        let a = Contact::new(PointerId::FIRST, (1.0, 1.0));
        let event = TouchEvent::down(a);
        assert_eq!(event.contact(PointerId::FIRST), Some(Point::new(1.0, 1.0)));
        assert_eq!(event.contact(PointerId::SECOND), None);
    }

    #[test]
    fn invalid_id_message_names_the_id() {
        use alloc::string::ToString;
        assert!(InvalidPointerId(3).to_string().contains('3'));
    }
}
