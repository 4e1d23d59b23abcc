//! Note domain model.
//!
//! # Responsibility
//! - Define the immutable sealed note record and its identity type.
//! - Enforce content limits shared by draft editing and note construction.
//!
//! # Invariants
//! - `id` is time-ordered, unique, and never reused for another note.
//! - `content` never exceeds `MAX_NOTE_CHARS` Unicode scalar values.
//! - A note is never mutated after construction.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Maximum note length in Unicode scalar values.
pub const MAX_NOTE_CHARS: usize = 255;

/// Stable identifier of one sealed note.
///
/// Backed by a UUIDv7 so ids sort by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Generates a fresh time-ordered id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wraps an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim()).map(Self)
    }
}

/// Validation errors for note and draft content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Content is longer than the configured limit.
    ContentTooLong { chars: usize, max: usize },
    /// Draft is mid-seal and refuses edits.
    SealInProgress,
    /// Id is the nil UUID.
    NilId,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContentTooLong { chars, max } => {
                write!(f, "note content has {chars} characters; limit is {max}")
            }
            Self::SealInProgress => write!(f, "draft is being sealed and cannot be edited"),
            Self::NilId => write!(f, "note id must not be nil"),
        }
    }
}

impl Error for NoteValidationError {}

/// Checks `content` against a character limit.
///
/// Length is counted in Unicode scalar values, not bytes.
pub fn validate_content(content: &str, max_chars: usize) -> Result<(), NoteValidationError> {
    let chars = content.chars().count();
    if chars > max_chars {
        return Err(NoteValidationError::ContentTooLong {
            chars,
            max: max_chars,
        });
    }
    Ok(())
}

/// One sealed idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    id: NoteId,
    content: String,
    /// Unix epoch milliseconds.
    created_at: i64,
}

impl Note {
    /// Creates a note with a generated id.
    pub fn new(content: impl Into<String>, created_at: i64) -> Result<Self, NoteValidationError> {
        Self::with_id(NoteId::generate(), content, created_at)
    }

    /// Creates a note with a caller-provided id.
    ///
    /// # Errors
    /// - `NilId` when `id` wraps the nil UUID.
    /// - `ContentTooLong` when `content` exceeds `MAX_NOTE_CHARS`.
    pub fn with_id(
        id: NoteId,
        content: impl Into<String>,
        created_at: i64,
    ) -> Result<Self, NoteValidationError> {
        if id.as_uuid().is_nil() {
            return Err(NoteValidationError::NilId);
        }
        let content = content.into();
        validate_content(&content, MAX_NOTE_CHARS)?;
        Ok(Self {
            id,
            content,
            created_at,
        })
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }
}
