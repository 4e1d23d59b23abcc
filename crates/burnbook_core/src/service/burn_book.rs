//! Session controller.
//!
//! # Responsibility
//! - Own all session state: lifecycle, gesture tracker, pending burns, and
//!   the deferred task table.
//! - Expose the inbound entry points used by UI hosts.
//! - Emit notifications and renders synchronously with each transition.
//!
//! # Invariants
//! - Every handler runs to completion before the next event is processed.
//! - A burn removes its note only when its `BurnAnimation` task fires.
//! - `dropping` is true iff at least one burn is pending.
//! - Note content is never written to logs.

use crate::clock::countdown::TickOutcome;
use crate::clock::scheduler::{Scheduler, TaskKey};
use crate::clock::{Clock, SystemClock};
use crate::config::{BurnBookConfig, ConfigError};
use crate::disposal::gesture::{DisposalGesture, GestureTracker, Resolution};
use crate::disposal::{BurningAnimation, DisposalError, DropZone, GestureSink, PointerPosition};
use crate::model::draft::Draft;
use crate::model::note::{Note, NoteId, NoteValidationError};
use crate::presenter::{NotifyKind, Presenter, BURNED_MESSAGE, SAVED_MESSAGE, SEALED_MESSAGE};
use crate::service::lifecycle_service::{CollectionKind, NoteLifecycle, SaveOutcome};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// What triggered a seal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SealTrigger {
    Manual,
    Countdown,
}

impl SealTrigger {
    fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Countdown => "countdown",
        }
    }
}

/// Any error a host can get back from a session call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    Config(ConfigError),
    Validation(NoteValidationError),
    Disposal(DisposalError),
    /// Note id supplied by a host is not a UUID.
    InvalidNoteId(uuid::Error),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Disposal(err) => write!(f, "{err}"),
            Self::InvalidNoteId(err) => write!(f, "invalid note id: {err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Disposal(err) => Some(err),
            Self::InvalidNoteId(err) => Some(err),
        }
    }
}

impl From<ConfigError> for SessionError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<NoteValidationError> for SessionError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DisposalError> for SessionError {
    fn from(value: DisposalError) -> Self {
        Self::Disposal(value)
    }
}

impl From<uuid::Error> for SessionError {
    fn from(value: uuid::Error) -> Self {
        Self::InvalidNoteId(value)
    }
}

/// Read-only view of the whole session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub draft: String,
    pub remaining_seconds: Option<u32>,
    pub can_seal: bool,
    pub sealed: Vec<Note>,
    pub saved: Vec<Note>,
    pub hovering_burn: bool,
    pub dropping: bool,
    pub burning: Vec<NoteId>,
    pub gesture: Option<DisposalGesture>,
    pub now_ms: u64,
}

/// BurnBook session: one draft, its countdown, and the disposal flow.
pub struct BurnBook<P: Presenter> {
    config: BurnBookConfig,
    lifecycle: NoteLifecycle,
    gestures: GestureTracker,
    burning: BTreeMap<NoteId, BurningAnimation>,
    scheduler: Scheduler,
    /// Set by the first host `on_tick`; the scheduler then stops ticking.
    host_ticks: bool,
    clock: Box<dyn Clock>,
    presenter: P,
}

impl<P: Presenter> BurnBook<P> {
    /// Creates a session stamped by the system clock.
    pub fn new(config: BurnBookConfig, presenter: P) -> Result<Self, ConfigError> {
        Self::with_clock(config, presenter, SystemClock)
    }

    /// Creates a session with a caller-provided wall clock.
    ///
    /// # Errors
    /// - Returns `ConfigError` when `config` fails validation.
    pub fn with_clock(
        config: BurnBookConfig,
        presenter: P,
        clock: impl Clock + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            "event=session_start module=session status=ok countdown_seconds={} burn_animation_ms={} save_enabled={}",
            config.countdown_seconds, config.burn_animation_ms, config.save_enabled
        );
        Ok(Self {
            lifecycle: NoteLifecycle::new(config.countdown_seconds, config.max_note_chars),
            gestures: GestureTracker::new(config.save_enabled),
            burning: BTreeMap::new(),
            scheduler: Scheduler::new(),
            host_ticks: false,
            clock: Box::new(clock),
            presenter,
            config,
        })
    }

    pub fn config(&self) -> &BurnBookConfig {
        &self.config
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn draft(&self) -> &Draft {
        self.lifecycle.draft()
    }

    pub fn remaining_seconds(&self) -> Option<u32> {
        self.lifecycle.countdown().remaining_seconds()
    }

    pub fn can_seal(&self) -> bool {
        self.lifecycle.can_seal()
    }

    pub fn sealed(&self) -> &[Note] {
        self.lifecycle.sealed()
    }

    pub fn saved(&self) -> &[Note] {
        self.lifecycle.saved()
    }

    pub fn gesture(&self) -> Option<&DisposalGesture> {
        self.gestures.current()
    }

    pub fn hovering_burn(&self) -> bool {
        self.gestures.hovering_burn()
    }

    pub fn is_dropping(&self) -> bool {
        !self.burning.is_empty()
    }

    pub fn is_burning(&self, note_id: NoteId) -> bool {
        self.burning.contains_key(&note_id)
    }

    /// Logical time in milliseconds, advanced by `advance_by`.
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            draft: self.lifecycle.draft().content().to_string(),
            remaining_seconds: self.remaining_seconds(),
            can_seal: self.can_seal(),
            sealed: self.lifecycle.sealed().to_vec(),
            saved: self.lifecycle.saved().to_vec(),
            hovering_burn: self.hovering_burn(),
            dropping: self.is_dropping(),
            burning: self.burning.keys().copied().collect(),
            gesture: self.gestures.current().copied(),
            now_ms: self.scheduler.now_ms(),
        }
    }

    /// Pushes the full current state to the presenter.
    pub fn render_all(&mut self) {
        self.render_draft();
        self.presenter.render_sealed_list(self.lifecycle.sealed());
        if self.config.save_enabled {
            self.presenter.render_saved_list(self.lifecycle.saved());
        }
        self.render_burn_zone();
    }

    /// Replaces the draft text.
    ///
    /// # Errors
    /// - `NoteValidationError` when the edit is rejected; nothing changes and
    ///   nothing is rendered.
    pub fn on_edit_draft(&mut self, text: &str) -> Result<(), NoteValidationError> {
        let edit = match self.lifecycle.edit_draft(text) {
            Ok(edit) => edit,
            Err(err) => {
                debug!("event=draft_edit module=session status=rejected error={err}");
                return Err(err);
            }
        };

        if edit.countdown_armed {
            self.arm_tick();
            debug!(
                "event=countdown_start module=session status=ok seconds={}",
                self.config.countdown_seconds
            );
        }
        if edit.countdown_cancelled {
            self.scheduler.cancel(TaskKey::CountdownTick);
            debug!("event=countdown_cancel module=session status=ok reason=draft_cleared");
        }
        self.render_draft();
        Ok(())
    }

    /// Manual seal. Returns the new note id, or `None` for an empty draft.
    pub fn on_seal_clicked(&mut self) -> Option<NoteId> {
        self.seal_draft(SealTrigger::Manual)
    }

    /// One-second countdown tick from the host clock.
    ///
    /// The first call hands tick ownership to the host: the scheduler stops
    /// producing countdown ticks, and `advance_by` then only fires burns.
    pub fn on_tick(&mut self) {
        if !self.host_ticks {
            self.host_ticks = true;
            self.scheduler.cancel(TaskKey::CountdownTick);
            info!("event=tick_source module=session status=ok source=host");
        }
        self.apply_tick();
    }

    /// Moves logical time forward and fires every task that falls due.
    pub fn advance_by(&mut self, elapsed_ms: u64) {
        let target = self.scheduler.now_ms().saturating_add(elapsed_ms);
        while let Some(key) = self.scheduler.pop_due(target) {
            debug!("event=task_fire module=session status=ok task={key}");
            match key {
                TaskKey::CountdownTick => self.apply_tick(),
                TaskKey::BurnAnimation(note_id) => self.complete_burn(note_id),
            }
        }
        self.scheduler.advance_to(target);
    }

    pub fn on_gesture_start(&mut self, note_id: NoteId) -> Result<(), DisposalError> {
        self.gesture_start(note_id)
    }

    pub fn on_gesture_move(&mut self, zone: DropZone) {
        self.gesture_move(zone, None);
    }

    pub fn on_gesture_end(&mut self) {
        self.gesture_end();
    }

    pub fn on_gesture_cancel(&mut self) {
        self.gesture_cancel();
    }

    fn apply_tick(&mut self) {
        match self.lifecycle.tick_countdown() {
            TickOutcome::Idle => {
                self.scheduler.cancel(TaskKey::CountdownTick);
            }
            TickOutcome::Running(_) => {
                self.arm_tick();
                self.render_draft();
            }
            TickOutcome::Expired => {
                self.scheduler.cancel(TaskKey::CountdownTick);
                if self.seal_draft(SealTrigger::Countdown).is_none() {
                    self.render_draft();
                }
            }
        }
    }

    fn arm_tick(&mut self) {
        if !self.host_ticks {
            self.scheduler
                .schedule_after(TaskKey::CountdownTick, self.config.tick_interval_ms);
        }
    }

    fn seal_draft(&mut self, trigger: SealTrigger) -> Option<NoteId> {
        let created_at = self.clock.now_epoch_ms();
        let Some(note) = self.lifecycle.seal(created_at) else {
            debug!(
                "event=note_seal module=session status=skipped trigger={} reason=empty_draft",
                trigger.as_str()
            );
            return None;
        };
        self.scheduler.cancel(TaskKey::CountdownTick);

        info!(
            "event=note_seal module=session status=ok trigger={} note_id={}",
            trigger.as_str(),
            note.id()
        );
        self.presenter.notify(NotifyKind::Info, SEALED_MESSAGE);
        self.render_draft();
        self.presenter.render_sealed_list(self.lifecycle.sealed());
        Some(note.id())
    }

    fn resolve_save(&mut self, note_id: NoteId) {
        match self.lifecycle.move_to_saved(note_id) {
            SaveOutcome::Moved(_) => {
                info!("event=note_save module=disposal status=ok note_id={note_id}");
                self.presenter.notify(NotifyKind::Success, SAVED_MESSAGE);
                self.presenter.render_sealed_list(self.lifecycle.sealed());
                self.presenter.render_saved_list(self.lifecycle.saved());
            }
            SaveOutcome::AlreadySaved => {
                debug!(
                    "event=note_save module=disposal status=skipped note_id={note_id} reason=already_saved"
                );
            }
            SaveOutcome::NotFound => {
                let err = DisposalError::InvariantViolation {
                    note_id,
                    expected: CollectionKind::Sealed,
                };
                warn!("event=note_save module=disposal status=error error={err}");
            }
        }
    }

    fn begin_burn(&mut self, note_id: NoteId, origin: CollectionKind) {
        if let Some(pending) = self.burning.get_mut(&note_id) {
            // Note was saved mid-burn and dropped on burn again: finish it there.
            if pending.origin != origin {
                info!(
                    "event=burn_retarget module=disposal status=ok note_id={note_id} from={} to={origin}",
                    pending.origin
                );
                pending.origin = origin;
            } else {
                debug!(
                    "event=burn_start module=disposal status=skipped note_id={note_id} reason=already_burning"
                );
            }
            return;
        }
        self.burning.insert(
            note_id,
            BurningAnimation {
                note_id,
                origin,
                started_at_ms: self.scheduler.now_ms(),
                duration_ms: self.config.burn_animation_ms,
            },
        );
        self.scheduler.schedule_after(
            TaskKey::BurnAnimation(note_id),
            self.config.burn_animation_ms,
        );
        info!(
            "event=burn_start module=disposal status=ok note_id={note_id} origin={origin} duration_ms={}",
            self.config.burn_animation_ms
        );
    }

    fn complete_burn(&mut self, note_id: NoteId) {
        let Some(animation) = self.burning.remove(&note_id) else {
            warn!("event=burn_complete module=disposal status=error note_id={note_id} reason=no_pending_burn");
            return;
        };

        match self.lifecycle.remove_from(animation.origin, note_id) {
            Some(_) => {
                info!("event=burn_complete module=disposal status=ok note_id={note_id}");
                self.presenter.notify(NotifyKind::Error, BURNED_MESSAGE);
                self.render_collection(animation.origin);
            }
            None => {
                let err = DisposalError::InvariantViolation {
                    note_id,
                    expected: animation.origin,
                };
                warn!("event=burn_complete module=disposal status=error error={err}");
            }
        }
        self.render_burn_zone();
    }

    fn render_collection(&mut self, kind: CollectionKind) {
        match kind {
            CollectionKind::Sealed => self.presenter.render_sealed_list(self.lifecycle.sealed()),
            CollectionKind::Saved => self.presenter.render_saved_list(self.lifecycle.saved()),
        }
    }

    fn render_draft(&mut self) {
        self.presenter.render_draft(
            self.lifecycle.draft().content(),
            self.lifecycle.countdown().remaining_seconds(),
        );
    }

    fn render_burn_zone(&mut self) {
        let hovering = self.gestures.hovering_burn();
        let dropping = self.is_dropping();
        self.presenter.render_burn_zone_state(hovering, dropping);
    }
}

impl<P: Presenter> GestureSink for BurnBook<P> {
    fn gesture_start(&mut self, note_id: NoteId) -> Result<(), DisposalError> {
        let origin = match self.lifecycle.locate(note_id) {
            Some(CollectionKind::Saved) if !self.config.save_enabled => None,
            other => other,
        };
        let Some(origin) = origin else {
            warn!("event=gesture_start module=disposal status=error note_id={note_id} reason=unknown_note");
            return Err(DisposalError::UnknownNote(note_id));
        };

        let was_hovering = self.gestures.hovering_burn();
        if let Some(replaced) = self.gestures.start(note_id, origin) {
            debug!(
                "event=gesture_replace module=disposal status=ok previous_note_id={}",
                replaced.note_id
            );
        }
        debug!("event=gesture_start module=disposal status=ok note_id={note_id} origin={origin}");
        if was_hovering {
            self.render_burn_zone();
        }
        Ok(())
    }

    fn gesture_move(&mut self, zone: DropZone, position: Option<PointerPosition>) {
        if self.gestures.move_to(zone, position) {
            self.render_burn_zone();
        }
    }

    fn gesture_end(&mut self) {
        let was_hovering = self.gestures.hovering_burn();
        match self.gestures.end() {
            Resolution::NoGesture => return,
            Resolution::Released { note_id } => {
                debug!("event=gesture_end module=disposal status=ok note_id={note_id} zone=none");
            }
            Resolution::Save { note_id, .. } => self.resolve_save(note_id),
            Resolution::Burn { note_id, origin } => {
                self.begin_burn(note_id, origin);
                self.render_burn_zone();
                return;
            }
        }
        if was_hovering {
            self.render_burn_zone();
        }
    }

    fn gesture_cancel(&mut self) {
        let was_hovering = self.gestures.hovering_burn();
        if let Some(cancelled) = self.gestures.cancel() {
            debug!(
                "event=gesture_cancel module=disposal status=ok note_id={}",
                cancelled.note_id
            );
            if was_hovering {
                self.render_burn_zone();
            }
        }
    }

    fn active_zone(&self) -> Option<DropZone> {
        self.gestures.current().map(|gesture| gesture.target_zone)
    }
}
