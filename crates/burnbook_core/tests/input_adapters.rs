use burnbook_core::{
    BurnBook, BurnBookConfig, DisposalError, DropZone, GestureSink, ManualClock, NoteId,
    PointerDragAdapter, PointerPosition, RecordingPresenter, TouchDragAdapter,
};

fn session_with_note(content: &str) -> (BurnBook<RecordingPresenter>, NoteId) {
    let mut book =
        BurnBook::with_clock(BurnBookConfig::default(), RecordingPresenter::new(), ManualClock::new(0))
            .unwrap();
    book.on_edit_draft(content).unwrap();
    let note_id = book.on_seal_clicked().unwrap();
    (book, note_id)
}

#[derive(Debug, Clone, PartialEq)]
enum SinkCall {
    Start(NoteId),
    Move(DropZone, Option<PointerPosition>),
    End,
    Cancel,
}

#[derive(Default)]
struct RecordingSink {
    calls: Vec<SinkCall>,
    zone: Option<DropZone>,
}

impl GestureSink for RecordingSink {
    fn gesture_start(&mut self, note_id: NoteId) -> Result<(), DisposalError> {
        self.calls.push(SinkCall::Start(note_id));
        self.zone = Some(DropZone::None);
        Ok(())
    }

    fn gesture_move(&mut self, zone: DropZone, position: Option<PointerPosition>) {
        self.calls.push(SinkCall::Move(zone, position));
        if self.zone.is_some() {
            self.zone = Some(zone);
        }
    }

    fn gesture_end(&mut self) {
        self.calls.push(SinkCall::End);
        self.zone = None;
    }

    fn gesture_cancel(&mut self) {
        self.calls.push(SinkCall::Cancel);
        self.zone = None;
    }

    fn active_zone(&self) -> Option<DropZone> {
        self.zone
    }
}

#[test]
fn pointer_drop_then_native_drag_end_burns_once() {
    let (mut book, note_id) = session_with_note("pointer burn");
    let pointer = PointerDragAdapter::new();

    pointer.drag_start(&mut book, note_id).unwrap();
    pointer.drag_over(&mut book, DropZone::Burn, Some(PointerPosition { x: 10.0, y: 700.0 }));
    assert!(book.hovering_burn());
    pointer.drop_on(&mut book, DropZone::Burn);
    pointer.drag_end(&mut book);

    assert_eq!(book.sealed().len(), 1);
    assert!(book.is_dropping());
    book.advance_by(1_500);
    assert!(book.sealed().is_empty());
}

#[test]
fn pointer_drag_leave_only_clears_matching_zone() {
    let note_id = NoteId::generate();
    let mut sink = RecordingSink::default();
    let pointer = PointerDragAdapter::new();

    pointer.drag_start(&mut sink, note_id).unwrap();
    pointer.drag_over(&mut sink, DropZone::Save, None);
    pointer.drag_leave(&mut sink, DropZone::Burn);
    pointer.drag_leave(&mut sink, DropZone::Save);

    assert_eq!(
        sink.calls,
        vec![
            SinkCall::Start(note_id),
            SinkCall::Move(DropZone::Save, None),
            SinkCall::Move(DropZone::None, None),
        ]
    );
}

#[test]
fn pointer_drop_without_gesture_is_ignored() {
    let mut sink = RecordingSink::default();
    PointerDragAdapter::new().drop_on(&mut sink, DropZone::Burn);
    assert!(sink.calls.is_empty());
}

#[test]
fn pointer_drag_end_without_drop_cancels() {
    let (mut book, note_id) = session_with_note("abandoned");
    let pointer = PointerDragAdapter::new();

    pointer.drag_start(&mut book, note_id).unwrap();
    pointer.drag_over(&mut book, DropZone::Burn, None);
    pointer.drag_end(&mut book);

    assert!(book.gesture().is_none());
    assert!(!book.hovering_burn());
    book.advance_by(5_000);
    assert_eq!(book.sealed().len(), 1);
}

#[test]
fn pointer_drop_target_wins_over_last_hover() {
    let (mut book, note_id) = session_with_note("saved by drop");
    let pointer = PointerDragAdapter::new();

    pointer.drag_start(&mut book, note_id).unwrap();
    pointer.drag_over(&mut book, DropZone::Burn, None);
    pointer.drop_on(&mut book, DropZone::Save);

    assert!(book.sealed().is_empty());
    assert_eq!(book.saved().len(), 1);
    assert!(!book.is_dropping());
}

#[test]
fn touch_derives_zone_from_vertical_position() {
    let note_id = NoteId::generate();
    let mut sink = RecordingSink::default();
    let touch = TouchDragAdapter::new(500.0);

    touch.touch_start(&mut sink, note_id).unwrap();
    touch.touch_move(&mut sink, 20.0, 120.0);
    touch.touch_move(&mut sink, 20.0, 510.0);
    touch.touch_end(&mut sink);

    assert_eq!(
        sink.calls,
        vec![
            SinkCall::Start(note_id),
            SinkCall::Move(DropZone::None, Some(PointerPosition { x: 20.0, y: 120.0 })),
            SinkCall::Move(DropZone::Burn, Some(PointerPosition { x: 20.0, y: 510.0 })),
            SinkCall::End,
        ]
    );
}

#[test]
fn touch_burn_matches_pointer_burn_semantics() {
    let (mut book, note_id) = session_with_note("touch burn");
    let touch = TouchDragAdapter::new(600.0);

    touch.touch_start(&mut book, note_id).unwrap();
    touch.touch_move(&mut book, 0.0, 650.0);
    assert!(book.hovering_burn());
    assert_eq!(
        book.gesture().and_then(|gesture| gesture.pointer),
        Some(PointerPosition { x: 0.0, y: 650.0 })
    );
    touch.touch_end(&mut book);

    assert_eq!(book.sealed().len(), 1);
    assert!(book.is_dropping());
    book.advance_by(1_500);
    assert!(book.sealed().is_empty());
    assert!(!book.is_dropping());
}

#[test]
fn touch_released_above_burn_zone_keeps_note() {
    let (mut book, note_id) = session_with_note("second thoughts");
    let touch = TouchDragAdapter::new(600.0);

    touch.touch_start(&mut book, note_id).unwrap();
    touch.touch_move(&mut book, 0.0, 650.0);
    touch.touch_move(&mut book, 0.0, 300.0);
    assert!(!book.hovering_burn());
    touch.touch_end(&mut book);

    book.advance_by(5_000);
    assert_eq!(book.sealed().len(), 1);
}

#[test]
fn touch_cancel_aborts_without_mutation() {
    let (mut book, note_id) = session_with_note("interrupted touch");
    let touch = TouchDragAdapter::new(600.0);

    touch.touch_start(&mut book, note_id).unwrap();
    touch.touch_move(&mut book, 0.0, 800.0);
    touch.touch_cancel(&mut book);

    book.advance_by(5_000);
    assert_eq!(book.sealed().len(), 1);
    assert!(!book.hovering_burn());
}
