//! Draft under composition.

use crate::model::note::{validate_content, NoteValidationError};
use serde::Serialize;

/// The single note being written.
///
/// `sealed` is set and cleared within one seal transition, so no public
/// entry point ever sees it `true`; `replace` still refuses edits while it
/// is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Draft {
    content: String,
    sealed: bool,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Replaces the draft content, rejecting the edit instead of truncating.
    pub fn replace(&mut self, text: &str, max_chars: usize) -> Result<(), NoteValidationError> {
        if self.sealed {
            return Err(NoteValidationError::SealInProgress);
        }
        validate_content(text, max_chars)?;
        self.content.clear();
        self.content.push_str(text);
        Ok(())
    }

    /// Marks the draft sealed and hands out its content.
    pub(crate) fn begin_seal(&mut self) -> String {
        self.sealed = true;
        std::mem::take(&mut self.content)
    }

    /// Returns the draft to empty and unsealed.
    pub(crate) fn reset(&mut self) {
        self.content.clear();
        self.sealed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::Draft;
    use crate::model::note::NoteValidationError;

    #[test]
    fn replace_rejects_edit_while_sealing() {
        let mut draft = Draft::new();
        draft.replace("idea", 255).expect("first edit");
        let content = draft.begin_seal();
        assert_eq!(content, "idea");

        let err = draft
            .replace("late edit", 255)
            .expect_err("edits during seal must fail");
        assert_eq!(err, NoteValidationError::SealInProgress);

        draft.reset();
        assert!(!draft.is_sealed());
        assert!(draft.is_empty());
    }

    #[test]
    fn rejected_edit_keeps_previous_content() {
        let mut draft = Draft::new();
        draft.replace("keep", 4).expect("fits");
        draft.replace("too long", 4).expect_err("over limit");
        assert_eq!(draft.content(), "keep");
    }
}
