//! FFI session API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose one process-wide BurnBook session to Dart via FRB.
//! - Return a full state snapshot plus the notifications each call caused,
//!   so the Flutter side renders from plain data.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Calls are serialized through one session lock; each call runs one core
//!   handler to completion.
//! - Note ids cross the boundary as UUID strings.

use burnbook_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    BurnBook, BurnBookConfig, BurnZoneVisual, DropZone, Note, NoteId, PresenterEvent,
    RecordingPresenter, SessionError, TouchDragAdapter,
};
use log::{info, warn};
use std::sync::{Mutex, MutexGuard};

type Session = BurnBook<RecordingPresenter>;

// Created lazily by the first call, replaced by `session_reset`.
static SESSION: Mutex<Option<Session>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Note projection for Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    pub content: String,
    /// Unix epoch milliseconds; formatting is left to the UI.
    pub created_at: i64,
}

/// Toast emitted by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationItem {
    /// `info|success|error`.
    pub kind: String,
    pub message: String,
}

/// Full render state after a call.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub draft: String,
    /// Countdown read-out; `None` hides the timer.
    pub remaining_seconds: Option<u32>,
    pub can_seal: bool,
    pub sealed: Vec<NoteItem>,
    pub saved: Vec<NoteItem>,
    pub hovering_burn: bool,
    pub dropping: bool,
    /// `idle|hovering|dropping`.
    pub burn_zone: String,
    /// Ids whose burn animation is still running.
    pub burning: Vec<String>,
    pub dragging_note_id: Option<String>,
    /// `burn|save|none` while a gesture is active.
    pub target_zone: Option<String>,
}

/// Response envelope returned by every session call.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResponse {
    pub ok: bool,
    /// Empty on success, diagnostic message on failure.
    pub message: String,
    /// `None` only when the session could not be reached.
    pub view: Option<SessionView>,
    pub notifications: Vec<NotificationItem>,
}

/// Replaces the session with a fresh one.
///
/// `config_json` overrides fields of the environment-derived configuration;
/// missing fields keep their defaults.
#[flutter_rust_bridge::frb(sync)]
pub fn session_reset(config_json: Option<String>) -> SessionResponse {
    let config = match resolve_config(config_json.as_deref()) {
        Ok(config) => config,
        Err(err) => return SessionResponse::failure(format!("session_reset failed: {err}")),
    };
    let fresh = match Session::new(config, RecordingPresenter::new()) {
        Ok(book) => book,
        Err(err) => return SessionResponse::failure(format!("session_reset failed: {err}")),
    };

    let mut guard = match lock_session() {
        Ok(guard) => guard,
        Err(err) => return SessionResponse::failure(format!("session_reset failed: {err}")),
    };
    let book = guard.insert(fresh);
    info!("event=session_reset module=ffi status=ok");
    SessionResponse::from_session(book)
}

/// Returns the current state without changing it.
#[flutter_rust_bridge::frb(sync)]
pub fn session_snapshot() -> SessionResponse {
    with_session("session_snapshot", |_| Ok(()))
}

/// Replaces the draft text. Over-limit edits fail and leave the draft as is.
#[flutter_rust_bridge::frb(sync)]
pub fn draft_edit(text: String) -> SessionResponse {
    with_session("draft_edit", |book| {
        book.on_edit_draft(text.as_str())?;
        Ok(())
    })
}

/// Seal button handler. Sealing an empty draft succeeds without effect.
#[flutter_rust_bridge::frb(sync)]
pub fn draft_seal() -> SessionResponse {
    with_session("draft_seal", |book| {
        book.on_seal_clicked();
        Ok(())
    })
}

/// One countdown tick for hosts running their own 1 Hz timer.
#[flutter_rust_bridge::frb(sync)]
pub fn clock_tick() -> SessionResponse {
    with_session("clock_tick", |book| {
        book.on_tick();
        Ok(())
    })
}

/// Advances session time, firing countdown ticks and burn completions.
#[flutter_rust_bridge::frb(sync)]
pub fn clock_advance(elapsed_ms: u64) -> SessionResponse {
    with_session("clock_advance", |book| {
        book.advance_by(elapsed_ms);
        Ok(())
    })
}

/// Picks up the note with `note_id`.
#[flutter_rust_bridge::frb(sync)]
pub fn gesture_start(note_id: String) -> SessionResponse {
    with_session("gesture_start", |book| {
        let note_id: NoteId = note_id.parse()?;
        book.on_gesture_start(note_id)?;
        Ok(())
    })
}

/// Pointer hover over `zone` (`burn|save|none`).
#[flutter_rust_bridge::frb(sync)]
pub fn gesture_hover(zone: String) -> SessionResponse {
    with_session("gesture_hover", |book| {
        let zone: DropZone = zone.parse()?;
        book.on_gesture_move(zone);
        Ok(())
    })
}

/// Touch move at `(x, y)` against the burn zone's current top edge.
#[flutter_rust_bridge::frb(sync)]
pub fn gesture_touch_move(x: f64, y: f64, burn_zone_top: f64) -> SessionResponse {
    with_session("gesture_touch_move", |book| {
        TouchDragAdapter::new(burn_zone_top).touch_move(book, x, y);
        Ok(())
    })
}

/// Releases the dragged note over the last reported zone.
#[flutter_rust_bridge::frb(sync)]
pub fn gesture_end() -> SessionResponse {
    with_session("gesture_end", |book| {
        book.on_gesture_end();
        Ok(())
    })
}

/// Aborts the active gesture without mutation.
#[flutter_rust_bridge::frb(sync)]
pub fn gesture_cancel() -> SessionResponse {
    with_session("gesture_cancel", |book| {
        book.on_gesture_cancel();
        Ok(())
    })
}

impl SessionResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            view: None,
            notifications: Vec::new(),
        }
    }

    fn from_session(book: &mut Session) -> Self {
        let notifications = drain_notifications(book);
        Self {
            ok: true,
            message: String::new(),
            view: Some(to_session_view(book)),
            notifications,
        }
    }
}

fn with_session(
    operation: &str,
    f: impl FnOnce(&mut Session) -> Result<(), SessionError>,
) -> SessionResponse {
    let mut guard = match lock_session() {
        Ok(guard) => guard,
        Err(err) => return SessionResponse::failure(format!("{operation} failed: {err}")),
    };
    let book = match guard.as_mut() {
        Some(book) => book,
        None => {
            let created = resolve_config(None).and_then(|config| {
                Session::new(config, RecordingPresenter::new()).map_err(|err| err.to_string())
            });
            match created {
                Ok(book) => guard.insert(book),
                Err(err) => {
                    return SessionResponse::failure(format!("{operation} failed: {err}"))
                }
            }
        }
    };

    let outcome = f(book);
    let mut response = SessionResponse::from_session(book);
    if let Err(err) = outcome {
        warn!("event=ffi_call module=ffi status=error operation={operation}");
        response.ok = false;
        response.message = format!("{operation} failed: {err}");
    }
    response
}

fn lock_session() -> Result<MutexGuard<'static, Option<Session>>, String> {
    SESSION
        .lock()
        .map_err(|_| "session lock poisoned".to_string())
}

fn resolve_config(config_json: Option<&str>) -> Result<BurnBookConfig, String> {
    let base = BurnBookConfig::from_env().map_err(|err| err.to_string())?;
    let Some(raw) = config_json.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(base);
    };

    let mut merged = serde_json::to_value(&base).map_err(|err| err.to_string())?;
    let overrides: serde_json::Value =
        serde_json::from_str(raw).map_err(|err| format!("invalid config json: {err}"))?;
    let serde_json::Value::Object(fields) = overrides else {
        return Err("config json must be an object".to_string());
    };
    if let serde_json::Value::Object(target) = &mut merged {
        target.extend(fields);
    }
    let config: BurnBookConfig =
        serde_json::from_value(merged).map_err(|err| format!("invalid config json: {err}"))?;
    config.validate().map_err(|err| err.to_string())?;
    Ok(config)
}

fn drain_notifications(book: &mut Session) -> Vec<NotificationItem> {
    book.presenter_mut()
        .drain()
        .into_iter()
        .filter_map(|event| match event {
            PresenterEvent::Notify { kind, message } => Some(NotificationItem {
                kind: kind.as_str().to_string(),
                message,
            }),
            _ => None,
        })
        .collect()
}

fn to_session_view(book: &Session) -> SessionView {
    let hovering_burn = book.hovering_burn();
    let dropping = book.is_dropping();
    let snapshot = book.snapshot();
    SessionView {
        draft: snapshot.draft,
        remaining_seconds: snapshot.remaining_seconds,
        can_seal: snapshot.can_seal,
        sealed: snapshot.sealed.iter().map(to_note_item).collect(),
        saved: snapshot.saved.iter().map(to_note_item).collect(),
        hovering_burn,
        dropping,
        burn_zone: burn_zone_label(BurnZoneVisual::from_flags(hovering_burn, dropping)).to_string(),
        burning: snapshot.burning.iter().map(ToString::to_string).collect(),
        dragging_note_id: snapshot.gesture.map(|gesture| gesture.note_id.to_string()),
        target_zone: snapshot
            .gesture
            .map(|gesture| gesture.target_zone.as_str().to_string()),
    }
}

fn to_note_item(note: &Note) -> NoteItem {
    NoteItem {
        id: note.id().to_string(),
        content: note.content().to_string(),
        created_at: note.created_at(),
    }
}

fn burn_zone_label(visual: BurnZoneVisual) -> &'static str {
    match visual {
        BurnZoneVisual::Idle => "idle",
        BurnZoneVisual::Hovering => "hovering",
        BurnZoneVisual::Dropping => "dropping",
    }
}
