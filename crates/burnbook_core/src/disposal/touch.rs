//! Touch-drag adapter.
//!
//! Touch input has no native drop targets, so the zone is derived from the
//! touch point's vertical position against the burn zone's top edge.

use crate::disposal::{DisposalError, DropZone, GestureSink, PointerPosition};
use crate::model::note::NoteId;

/// Touch translator bound to the current burn-zone layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchDragAdapter {
    burn_zone_top: f64,
}

impl TouchDragAdapter {
    /// `burn_zone_top` is the burn zone's top edge in the same coordinate
    /// space as touch points (y grows downward).
    pub fn new(burn_zone_top: f64) -> Self {
        Self { burn_zone_top }
    }

    pub fn burn_zone_top(&self) -> f64 {
        self.burn_zone_top
    }

    /// Zone for a touch point at vertical position `y`.
    pub fn zone_for(&self, y: f64) -> DropZone {
        if y >= self.burn_zone_top {
            DropZone::Burn
        } else {
            DropZone::None
        }
    }

    pub fn touch_start(
        &self,
        sink: &mut impl GestureSink,
        note_id: NoteId,
    ) -> Result<(), DisposalError> {
        sink.gesture_start(note_id)
    }

    pub fn touch_move(&self, sink: &mut impl GestureSink, x: f64, y: f64) {
        sink.gesture_move(self.zone_for(y), Some(PointerPosition { x, y }));
    }

    pub fn touch_end(&self, sink: &mut impl GestureSink) {
        sink.gesture_end();
    }

    pub fn touch_cancel(&self, sink: &mut impl GestureSink) {
        sink.gesture_cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::TouchDragAdapter;
    use crate::disposal::DropZone;

    #[test]
    fn zone_boundary_is_inclusive_at_top_edge() {
        let adapter = TouchDragAdapter::new(600.0);
        assert_eq!(adapter.zone_for(599.9), DropZone::None);
        assert_eq!(adapter.zone_for(600.0), DropZone::Burn);
        assert_eq!(adapter.zone_for(900.0), DropZone::Burn);
    }
}
