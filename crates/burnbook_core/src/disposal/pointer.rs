//! Pointer-drag adapter.
//!
//! Translates native drag-and-drop callbacks (drag start, drag over, drag
//! leave, drop, drag end) into `GestureSink` calls. Native `drag end` also
//! fires after a successful drop, so it maps to a cancel that is a no-op
//! once the gesture has resolved.

use crate::disposal::{DisposalError, DropZone, GestureSink, PointerPosition};
use crate::model::note::NoteId;

/// Stateless translator for pointer drag events.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerDragAdapter;

impl PointerDragAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn drag_start(
        &self,
        sink: &mut impl GestureSink,
        note_id: NoteId,
    ) -> Result<(), DisposalError> {
        sink.gesture_start(note_id)
    }

    /// Pointer is over `zone`'s hit region.
    pub fn drag_over(
        &self,
        sink: &mut impl GestureSink,
        zone: DropZone,
        position: Option<PointerPosition>,
    ) {
        sink.gesture_move(zone, position);
    }

    /// Pointer left `zone`. Stale leaves for another zone are ignored.
    pub fn drag_leave(&self, sink: &mut impl GestureSink, zone: DropZone) {
        if sink.active_zone() == Some(zone) {
            sink.gesture_move(DropZone::None, None);
        }
    }

    /// Native drop on `zone`; the drop target wins over the last hover.
    pub fn drop_on(&self, sink: &mut impl GestureSink, zone: DropZone) {
        if sink.active_zone().is_none() {
            return;
        }
        sink.gesture_move(zone, None);
        sink.gesture_end();
    }

    /// Native drag end, fired after drop or when the drag is aborted.
    pub fn drag_end(&self, sink: &mut impl GestureSink) {
        sink.gesture_cancel();
    }
}
