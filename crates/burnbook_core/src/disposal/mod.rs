//! Disposal protocol for sealed notes.
//!
//! # Responsibility
//! - Track one in-flight disposal gesture from pick-up to release.
//! - Normalize pointer-drag and touch-drag input into the same
//!   `{start, move, end, cancel}` calls on a `GestureSink`.
//!
//! # Invariants
//! - A gesture never mutates collections before release.
//! - Hover state is purely visual and is reset whenever a gesture ends.
//! - Burn completion resolves by note id against current membership.

pub mod gesture;
pub mod pointer;
pub mod touch;

use crate::model::note::NoteId;
use crate::service::lifecycle_service::CollectionKind;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Drop target under the pointer or touch point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropZone {
    Burn,
    Save,
    #[default]
    None,
}

impl DropZone {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Burn => "burn",
            Self::Save => "save",
            Self::None => "none",
        }
    }
}

impl Display for DropZone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DropZone {
    type Err = DisposalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "burn" => Ok(Self::Burn),
            "save" => Ok(Self::Save),
            "none" | "" => Ok(Self::None),
            other => Err(DisposalError::UnknownZone(other.to_string())),
        }
    }
}

/// Screen position reported by the input modality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

/// Pending burn of one note.
///
/// The note stays in `origin` until the animation completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BurningAnimation {
    pub note_id: NoteId,
    pub origin: CollectionKind,
    /// Scheduler time the drop happened, in logical milliseconds.
    pub started_at_ms: u64,
    pub duration_ms: u64,
}

/// Disposal protocol errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisposalError {
    /// Gesture started on a note that is in no disposable collection.
    UnknownNote(NoteId),
    /// Zone name from an adapter is not recognized.
    UnknownZone(String),
    /// Disposal resolved against a note no longer in its collection.
    InvariantViolation {
        note_id: NoteId,
        expected: CollectionKind,
    },
}

impl Display for DisposalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownNote(note_id) => write!(f, "note not found for disposal: {note_id}"),
            Self::UnknownZone(value) => {
                write!(f, "unknown drop zone `{value}`; expected burn|save|none")
            }
            Self::InvariantViolation { note_id, expected } => write!(
                f,
                "disposal resolved against note {note_id} missing from {expected}"
            ),
        }
    }
}

impl Error for DisposalError {}

/// Receiver of normalized gesture events.
///
/// Input adapters translate native events into these calls.
pub trait GestureSink {
    /// Picks up a note. Fails when the note cannot be disposed.
    fn gesture_start(&mut self, note_id: NoteId) -> Result<(), DisposalError>;
    /// Reports the zone currently under the input point.
    fn gesture_move(&mut self, zone: DropZone, position: Option<PointerPosition>);
    /// Releases the note over the last reported zone.
    fn gesture_end(&mut self);
    /// Aborts the gesture without mutation.
    fn gesture_cancel(&mut self);
    /// Zone of the active gesture, `None` when idle.
    fn active_zone(&self) -> Option<DropZone>;
}
