//! Domain model for drafts and sealed notes.
//!
//! # Responsibility
//! - Define the note record, its identity, and the single in-progress draft.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - A note id lives in at most one place: draft, sealed list, or saved list.

pub mod draft;
pub mod note;
