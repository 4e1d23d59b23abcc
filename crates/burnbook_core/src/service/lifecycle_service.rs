//! Note lifecycle: draft editing, sealing, and collection moves.
//!
//! # Responsibility
//! - Own the draft, the countdown, and the sealed/saved collections.
//! - Enforce edit validation and the seal transition.
//!
//! # Invariants
//! - The countdown is armed iff the draft is non-empty and unsealed.
//! - Collections are newest first.
//! - Every move resolves by `NoteId`, never by position, so a note id is
//!   present in at most one collection.

use crate::clock::countdown::{Countdown, TickOutcome};
use crate::model::draft::Draft;
use crate::model::note::{Note, NoteId, NoteValidationError};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Collection a sealed note currently lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    Sealed,
    Saved,
}

impl CollectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sealed => "sealed",
            Self::Saved => "saved",
        }
    }
}

impl Display for CollectionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Countdown side effects of one accepted edit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DraftEdit {
    /// The edit armed a fresh countdown.
    pub countdown_armed: bool,
    /// The edit emptied the draft and disarmed the countdown.
    pub countdown_cancelled: bool,
}

/// Result of moving a note into the saved collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Moved(Note),
    AlreadySaved,
    NotFound,
}

/// Owner of draft and note collections.
#[derive(Debug)]
pub struct NoteLifecycle {
    draft: Draft,
    countdown: Countdown,
    sealed: Vec<Note>,
    saved: Vec<Note>,
    countdown_seconds: u32,
    max_note_chars: usize,
}

impl NoteLifecycle {
    pub fn new(countdown_seconds: u32, max_note_chars: usize) -> Self {
        Self {
            draft: Draft::new(),
            countdown: Countdown::new(),
            sealed: Vec::new(),
            saved: Vec::new(),
            countdown_seconds,
            max_note_chars,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn sealed(&self) -> &[Note] {
        &self.sealed
    }

    pub fn saved(&self) -> &[Note] {
        &self.saved
    }

    /// Whether a manual seal would produce a note.
    pub fn can_seal(&self) -> bool {
        !self.draft.is_empty() && !self.draft.is_sealed()
    }

    /// Replaces the draft content.
    ///
    /// # Errors
    /// - `ContentTooLong` when `text` exceeds the configured limit.
    /// - `SealInProgress` when the draft is sealed.
    ///
    /// Rejected edits leave draft and countdown untouched.
    pub fn edit_draft(&mut self, text: &str) -> Result<DraftEdit, NoteValidationError> {
        self.draft.replace(text, self.max_note_chars)?;

        let mut edit = DraftEdit::default();
        if self.draft.is_empty() {
            edit.countdown_cancelled = self.countdown.cancel();
        } else if !self.countdown.is_armed() {
            self.countdown.start(self.countdown_seconds);
            edit.countdown_armed = true;
        }
        Ok(edit)
    }

    /// Advances the countdown by one second.
    pub fn tick_countdown(&mut self) -> TickOutcome {
        self.countdown.tick()
    }

    /// Seals the draft into a new note stamped `created_at`.
    ///
    /// Returns `None` and changes nothing when the draft is empty.
    pub fn seal(&mut self, created_at: i64) -> Option<Note> {
        if !self.can_seal() {
            return None;
        }

        self.countdown.cancel();
        let content = self.draft.begin_seal();
        let note = match Note::new(content, created_at) {
            Ok(note) => note,
            Err(err) => {
                // Unreachable with a validated limit; keep the draft usable.
                warn!("event=note_seal module=lifecycle status=error error={err}");
                self.draft.reset();
                return None;
            }
        };
        self.sealed.insert(0, note.clone());
        self.draft.reset();

        debug!(
            "event=note_seal module=lifecycle status=ok note_id={} chars={}",
            note.id(),
            note.content().chars().count()
        );
        Some(note)
    }

    /// Finds which collection holds `note_id`.
    pub fn locate(&self, note_id: NoteId) -> Option<CollectionKind> {
        if self.sealed.iter().any(|note| note.id() == note_id) {
            Some(CollectionKind::Sealed)
        } else if self.saved.iter().any(|note| note.id() == note_id) {
            Some(CollectionKind::Saved)
        } else {
            None
        }
    }

    /// Moves a sealed note to the front of the saved collection.
    pub fn move_to_saved(&mut self, note_id: NoteId) -> SaveOutcome {
        match self.locate(note_id) {
            Some(CollectionKind::Saved) => SaveOutcome::AlreadySaved,
            None => SaveOutcome::NotFound,
            Some(CollectionKind::Sealed) => match self.remove_from(CollectionKind::Sealed, note_id)
            {
                Some(note) => {
                    self.saved.insert(0, note.clone());
                    SaveOutcome::Moved(note)
                }
                None => SaveOutcome::NotFound,
            },
        }
    }

    /// Removes `note_id` from `kind`; `None` when it is not there.
    pub fn remove_from(&mut self, kind: CollectionKind, note_id: NoteId) -> Option<Note> {
        let collection = match kind {
            CollectionKind::Sealed => &mut self.sealed,
            CollectionKind::Saved => &mut self.saved,
        };
        let position = collection.iter().position(|note| note.id() == note_id)?;
        Some(collection.remove(position))
    }
}
