//! Core domain logic for BurnBook.
//! This crate is the single source of truth for note lifecycle and disposal
//! invariants; UI hosts only feed events in and render what comes out.

pub mod clock;
pub mod config;
pub mod disposal;
pub mod logging;
pub mod model;
pub mod presenter;
pub mod service;

pub use clock::countdown::{remaining_label, Countdown, TickOutcome};
pub use clock::scheduler::{Scheduler, TaskKey};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{BurnBookConfig, ConfigError};
pub use disposal::gesture::{DisposalGesture, GestureState, GestureTracker, Resolution};
pub use disposal::pointer::PointerDragAdapter;
pub use disposal::touch::TouchDragAdapter;
pub use disposal::{BurningAnimation, DisposalError, DropZone, GestureSink, PointerPosition};
pub use logging::{default_log_level, init_logging, init_logging_from_env, logging_status};
pub use model::draft::Draft;
pub use model::note::{Note, NoteId, NoteValidationError, MAX_NOTE_CHARS};
pub use presenter::{
    BurnZoneVisual, NotifyKind, Presenter, PresenterEvent, RecordingPresenter, BURNED_MESSAGE,
    SAVED_MESSAGE, SEALED_MESSAGE,
};
pub use service::burn_book::{BurnBook, SealTrigger, SessionError, SessionSnapshot};
pub use service::lifecycle_service::{CollectionKind, DraftEdit, NoteLifecycle, SaveOutcome};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
