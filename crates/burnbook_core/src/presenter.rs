//! Presentation adapter contract.
//!
//! # Responsibility
//! - Define the outbound calls the core makes to whatever renders state.
//! - Provide a recording presenter for hosts that poll instead of render.
//!
//! # Invariants
//! - The core only hands out borrowed, read-only views of its state.
//! - Calls arrive in the same order as the transitions that caused them.

use crate::model::note::Note;
use serde::{Deserialize, Serialize};

/// Message shown when a draft is sealed.
pub const SEALED_MESSAGE: &str = "Your idea has been sealed!";
/// Message shown when a note is moved to the saved collection.
pub const SAVED_MESSAGE: &str = "Idea saved!";
/// Message shown when a burn completes.
pub const BURNED_MESSAGE: &str = "🔥 Page burned forever!";

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyKind {
    Info,
    Success,
    Error,
}

impl NotifyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Visual state of the burn zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurnZoneVisual {
    Idle,
    Hovering,
    Dropping,
}

impl BurnZoneVisual {
    /// Dropping takes precedence over hovering.
    pub fn from_flags(hovering: bool, dropping: bool) -> Self {
        if dropping {
            Self::Dropping
        } else if hovering {
            Self::Hovering
        } else {
            Self::Idle
        }
    }
}

/// Outbound rendering and notification calls.
pub trait Presenter {
    fn notify(&mut self, kind: NotifyKind, message: &str);
    fn render_draft(&mut self, text: &str, remaining_seconds: Option<u32>);
    fn render_sealed_list(&mut self, notes: &[Note]);
    fn render_saved_list(&mut self, notes: &[Note]);
    fn render_burn_zone_state(&mut self, hovering: bool, dropping: bool);
}

/// One recorded presenter call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PresenterEvent {
    Notify {
        kind: NotifyKind,
        message: String,
    },
    Draft {
        text: String,
        remaining_seconds: Option<u32>,
    },
    SealedList {
        notes: Vec<Note>,
    },
    SavedList {
        notes: Vec<Note>,
    },
    BurnZone {
        hovering: bool,
        dropping: bool,
    },
}

/// Presenter that buffers every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    events: Vec<PresenterEvent>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[PresenterEvent] {
        &self.events
    }

    /// Takes all buffered events.
    pub fn drain(&mut self) -> Vec<PresenterEvent> {
        std::mem::take(&mut self.events)
    }

    /// Buffered notifications, oldest first.
    pub fn notifications(&self) -> Vec<(NotifyKind, &str)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::Notify { kind, message } => Some((*kind, message.as_str())),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn notify(&mut self, kind: NotifyKind, message: &str) {
        self.events.push(PresenterEvent::Notify {
            kind,
            message: message.to_string(),
        });
    }

    fn render_draft(&mut self, text: &str, remaining_seconds: Option<u32>) {
        self.events.push(PresenterEvent::Draft {
            text: text.to_string(),
            remaining_seconds,
        });
    }

    fn render_sealed_list(&mut self, notes: &[Note]) {
        self.events.push(PresenterEvent::SealedList {
            notes: notes.to_vec(),
        });
    }

    fn render_saved_list(&mut self, notes: &[Note]) {
        self.events.push(PresenterEvent::SavedList {
            notes: notes.to_vec(),
        });
    }

    fn render_burn_zone_state(&mut self, hovering: bool, dropping: bool) {
        self.events
            .push(PresenterEvent::BurnZone { hovering, dropping });
    }
}
