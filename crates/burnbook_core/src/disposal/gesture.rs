//! Gesture state machine.
//!
//! `Idle -> Armed -> Targeting -> (Resolving) -> Idle`. Resolving happens
//! inside `end()` and is never stored.

use crate::disposal::{DropZone, PointerPosition};
use crate::model::note::NoteId;
use crate::service::lifecycle_service::CollectionKind;
use serde::Serialize;

/// Active gesture snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisposalGesture {
    pub note_id: NoteId,
    pub origin: CollectionKind,
    pub pointer: Option<PointerPosition>,
    pub target_zone: DropZone,
}

/// Stored gesture state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    /// Picked up, no zone reported yet.
    Armed(DisposalGesture),
    /// At least one zone report received.
    Targeting(DisposalGesture),
}

/// What a release resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Save {
        note_id: NoteId,
        origin: CollectionKind,
    },
    Burn {
        note_id: NoteId,
        origin: CollectionKind,
    },
    /// Released outside every zone.
    Released { note_id: NoteId },
    /// Nothing was being dragged.
    NoGesture,
}

/// Tracks one gesture and the live burn-hover flag.
#[derive(Debug)]
pub struct GestureTracker {
    state: GestureState,
    hovering_burn: bool,
    save_enabled: bool,
}

impl GestureTracker {
    pub fn new(save_enabled: bool) -> Self {
        Self {
            state: GestureState::Idle,
            hovering_burn: false,
            save_enabled,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn current(&self) -> Option<&DisposalGesture> {
        match &self.state {
            GestureState::Idle => None,
            GestureState::Armed(gesture) | GestureState::Targeting(gesture) => Some(gesture),
        }
    }

    pub fn is_active(&self) -> bool {
        self.current().is_some()
    }

    pub fn hovering_burn(&self) -> bool {
        self.hovering_burn
    }

    /// Arms a new gesture, returning any gesture it replaced.
    pub fn start(&mut self, note_id: NoteId, origin: CollectionKind) -> Option<DisposalGesture> {
        let replaced = self.current().copied();
        self.hovering_burn = false;
        self.state = GestureState::Armed(DisposalGesture {
            note_id,
            origin,
            pointer: None,
            target_zone: DropZone::None,
        });
        replaced
    }

    /// Records the zone under the input point.
    ///
    /// Returns whether the burn-hover flag changed. Ignored while idle.
    pub fn move_to(&mut self, zone: DropZone, pointer: Option<PointerPosition>) -> bool {
        let zone = if zone == DropZone::Save && !self.save_enabled {
            DropZone::None
        } else {
            zone
        };
        let Some(mut gesture) = self.current().copied() else {
            return false;
        };
        gesture.target_zone = zone;
        if pointer.is_some() {
            gesture.pointer = pointer;
        }
        self.state = GestureState::Targeting(gesture);

        let hovering = zone == DropZone::Burn;
        let changed = hovering != self.hovering_burn;
        self.hovering_burn = hovering;
        changed
    }

    /// Releases the gesture over its current zone and returns to idle.
    pub fn end(&mut self) -> Resolution {
        let state = std::mem::take(&mut self.state);
        self.hovering_burn = false;
        let gesture = match state {
            GestureState::Idle => return Resolution::NoGesture,
            GestureState::Armed(gesture) | GestureState::Targeting(gesture) => gesture,
        };
        match gesture.target_zone {
            DropZone::Burn => Resolution::Burn {
                note_id: gesture.note_id,
                origin: gesture.origin,
            },
            DropZone::Save => Resolution::Save {
                note_id: gesture.note_id,
                origin: gesture.origin,
            },
            DropZone::None => Resolution::Released {
                note_id: gesture.note_id,
            },
        }
    }

    /// Aborts the gesture, returning it if one was active.
    pub fn cancel(&mut self) -> Option<DisposalGesture> {
        let cancelled = self.current().copied();
        self.state = GestureState::Idle;
        self.hovering_burn = false;
        cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::{GestureState, GestureTracker, Resolution};
    use crate::disposal::{DropZone, PointerPosition};
    use crate::model::note::NoteId;
    use crate::service::lifecycle_service::CollectionKind;

    #[test]
    fn hover_oscillates_without_resolution() {
        let note_id = NoteId::generate();
        let mut tracker = GestureTracker::new(true);
        tracker.start(note_id, CollectionKind::Sealed);
        assert!(matches!(tracker.state(), GestureState::Armed(_)));

        assert!(tracker.move_to(DropZone::Burn, None));
        assert!(tracker.hovering_burn());
        assert!(!tracker.move_to(DropZone::Burn, None));
        assert!(tracker.move_to(DropZone::None, None));
        assert!(tracker.move_to(DropZone::Burn, None));
        assert!(matches!(tracker.state(), GestureState::Targeting(_)));

        assert_eq!(
            tracker.end(),
            Resolution::Burn {
                note_id,
                origin: CollectionKind::Sealed
            }
        );
        assert!(!tracker.is_active());
        assert!(!tracker.hovering_burn());
    }

    #[test]
    fn release_without_zone_is_released() {
        let note_id = NoteId::generate();
        let mut tracker = GestureTracker::new(true);
        tracker.start(note_id, CollectionKind::Sealed);
        assert_eq!(tracker.end(), Resolution::Released { note_id });
        assert_eq!(tracker.end(), Resolution::NoGesture);
    }

    #[test]
    fn save_zone_is_ignored_when_disabled() {
        let note_id = NoteId::generate();
        let mut tracker = GestureTracker::new(false);
        tracker.start(note_id, CollectionKind::Sealed);
        tracker.move_to(DropZone::Save, None);
        assert_eq!(tracker.end(), Resolution::Released { note_id });
    }

    #[test]
    fn move_while_idle_is_ignored() {
        let mut tracker = GestureTracker::new(true);
        assert!(!tracker.move_to(DropZone::Burn, None));
        assert!(!tracker.hovering_burn());
        assert_eq!(tracker.cancel(), None);
    }

    #[test]
    fn pointer_position_is_kept_across_zone_only_moves() {
        let mut tracker = GestureTracker::new(true);
        tracker.start(NoteId::generate(), CollectionKind::Sealed);
        let position = PointerPosition { x: 4.0, y: 9.5 };
        tracker.move_to(DropZone::None, Some(position));
        tracker.move_to(DropZone::Burn, None);
        let gesture = tracker.current().expect("gesture active");
        assert_eq!(gesture.pointer, Some(position));
        assert_eq!(gesture.target_zone, DropZone::Burn);
    }

    #[test]
    fn start_replaces_active_gesture_and_clears_hover() {
        let first = NoteId::generate();
        let second = NoteId::generate();
        let mut tracker = GestureTracker::new(true);
        tracker.start(first, CollectionKind::Sealed);
        tracker.move_to(DropZone::Burn, None);

        let replaced = tracker
            .start(second, CollectionKind::Saved)
            .expect("first gesture replaced");
        assert_eq!(replaced.note_id, first);
        assert!(!tracker.hovering_burn());
        assert_eq!(tracker.current().map(|g| g.note_id), Some(second));
    }
}
