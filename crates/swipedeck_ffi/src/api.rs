//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose deck sessions to Dart via FRB as sync, use-case level calls.
//! - Translate core errors into response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every session call addresses one deck by its session id string.
//! - Closed or unknown sessions return `ok=false`, never a default deck.

use log::{info, warn};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};
use swipedeck_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CandidateCard, DeckConfig, DeckController, DeckEvent, DeckItem, DeckTransition, JobCard,
    RecordingListener, SwipeAction, SwipeDirection,
};
use uuid::Uuid;

static SESSIONS: OnceLock<Mutex<HashMap<Uuid, FfiDeck>>> = OnceLock::new();

type FfiDeck = DeckController<DeckCard, RecordingListener>;

/// Card payload held by an FFI session.
#[derive(Debug, Clone)]
enum DeckCard {
    Candidate(CandidateCard),
    Job(JobCard),
}

impl DeckItem for DeckCard {
    fn item_id(&self) -> &str {
        match self {
            Self::Candidate(card) => card.item_id(),
            Self::Job(card) => card.item_id(),
        }
    }

    fn match_percentage(&self) -> Option<u8> {
        match self {
            Self::Candidate(card) => card.match_percentage(),
            Self::Job(card) => card.match_percentage(),
        }
    }
}

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
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Session state after one call.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckSnapshot {
    /// Current card id; `None` once exhausted.
    pub current_id: Option<String>,
    /// Card behind the current one.
    pub next_id: Option<String>,
    /// One-based position of the current card; `0` once exhausted.
    pub position: u32,
    pub total: u32,
    pub accepted: u32,
    pub rejected: u32,
    pub skipped: u32,
    /// Decided fraction in `[0, 1]`.
    pub progress: f64,
    pub exhausted: bool,
    pub exit_pending: bool,
    /// Badge tier label of the current card, if it has a match percentage.
    pub current_match_tier: Option<String>,
}

/// Listener notification surfaced to Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckEventItem {
    /// `accepted|rejected|skipped|completed`.
    pub kind: String,
    /// Resolved card id; empty for `completed`.
    pub item_id: String,
}

/// Envelope for opening a session.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckOpenResponse {
    pub ok: bool,
    pub session_id: Option<String>,
    pub snapshot: Option<DeckSnapshot>,
    pub message: String,
}

/// Envelope for one interaction call.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckStepResponse {
    pub ok: bool,
    /// `started|ignored|snap_back|exit|updated|none`.
    pub transition: String,
    pub action: Option<String>,
    /// `left|right|up` for `exit` transitions.
    pub direction: Option<String>,
    /// Exit animation delay before calling `deck_complete_exit`.
    pub delay_ms: u64,
    pub events: Vec<DeckEventItem>,
    pub snapshot: Option<DeckSnapshot>,
    pub message: String,
}

impl DeckStepResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            transition: "none".to_string(),
            action: None,
            direction: None,
            delay_ms: 0,
            events: Vec::new(),
            snapshot: None,
            message: message.into(),
        }
    }
}

/// Opens a deck session.
///
/// Input semantics:
/// - `kind`: `candidate` (left/right only) or `job` (left/right/up).
/// - `items_json`: JSON array of cards for that kind.
/// - `config_json`: optional JSON deck config overlaid on the kind preset;
///   absent fields keep the preset values. `candidate` decks refuse
///   `skip_enabled=true`.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn deck_open(kind: String, items_json: String, config_json: Option<String>) -> DeckOpenResponse {
    match open_session(kind.trim(), &items_json, config_json.as_deref()) {
        Ok((session_id, snapshot)) => DeckOpenResponse {
            ok: true,
            session_id: Some(session_id.to_string()),
            snapshot: Some(snapshot),
            message: "Deck opened.".to_string(),
        },
        Err(message) => DeckOpenResponse {
            ok: false,
            session_id: None,
            snapshot: None,
            message: format!("deck_open failed: {message}"),
        },
    }
}

/// Starts a drag on the current card.
#[flutter_rust_bridge::frb(sync)]
pub fn deck_begin(session_id: String) -> DeckStepResponse {
    with_session("deck_begin", &session_id, |deck| {
        let transition = deck.begin_interaction();
        Ok(step(deck, transition))
    })
}

/// Records the live drag offset.
#[flutter_rust_bridge::frb(sync)]
pub fn deck_drag(session_id: String, dx: f64, dy: f64) -> DeckStepResponse {
    with_session("deck_drag", &session_id, |deck| {
        deck.update_drag(dx, dy).map_err(|err| err.to_string())?;
        let mut response = step(deck, DeckTransition::Started);
        response.transition = "updated".to_string();
        Ok(response)
    })
}

/// Releases the drag with its velocity and applies the verdict.
#[flutter_rust_bridge::frb(sync)]
pub fn deck_release(session_id: String, vx: f64, vy: f64) -> DeckStepResponse {
    with_session("deck_release", &session_id, |deck| {
        let transition = deck.end_interaction(vx, vy).map_err(|err| err.to_string())?;
        Ok(step(deck, transition))
    })
}

/// Applies a button press (`accept|reject|skip_up`).
#[flutter_rust_bridge::frb(sync)]
pub fn deck_button(session_id: String, action: String) -> DeckStepResponse {
    let Some(parsed) = SwipeAction::parse(&action) else {
        return DeckStepResponse::failure(format!(
            "deck_button failed: unsupported action `{}`",
            action.trim()
        ));
    };
    with_session("deck_button", &session_id, |deck| {
        let transition = deck.press_button(parsed).map_err(|err| err.to_string())?;
        Ok(step(deck, transition))
    })
}

/// Signals that the exit animation finished.
#[flutter_rust_bridge::frb(sync)]
pub fn deck_complete_exit(session_id: String) -> DeckStepResponse {
    with_session("deck_complete_exit", &session_id, |deck| {
        let was_pending = deck.complete_exit();
        let mut response = step(deck, DeckTransition::Ignored);
        response.transition = if was_pending { "updated" } else { "ignored" }.to_string();
        Ok(response)
    })
}

/// Restarts the deck from the first card.
#[flutter_rust_bridge::frb(sync)]
pub fn deck_reset(session_id: String) -> DeckStepResponse {
    with_session("deck_reset", &session_id, |deck| {
        deck.reset();
        let mut response = step(deck, DeckTransition::Ignored);
        response.transition = "updated".to_string();
        Ok(response)
    })
}

/// Returns the current session state without changing it.
#[flutter_rust_bridge::frb(sync)]
pub fn deck_snapshot(session_id: String) -> DeckStepResponse {
    with_session("deck_snapshot", &session_id, |deck| {
        let mut response = step(deck, DeckTransition::Ignored);
        response.transition = "none".to_string();
        Ok(response)
    })
}

/// Drops a session. Returns `false` when the id is unknown.
#[flutter_rust_bridge::frb(sync)]
pub fn deck_close(session_id: String) -> bool {
    let Ok(id) = Uuid::parse_str(session_id.trim()) else {
        return false;
    };
    let Ok(mut sessions) = sessions().lock() else {
        return false;
    };
    let closed = sessions.remove(&id).is_some();
    if closed {
        info!("event=deck_close module=ffi status=ok session={id}");
    }
    closed
}

fn sessions() -> &'static Mutex<HashMap<Uuid, FfiDeck>> {
    SESSIONS.get_or_init(|| Mutex::new(HashMap::new()))
}

fn open_session(
    kind: &str,
    items_json: &str,
    config_json: Option<&str>,
) -> Result<(Uuid, DeckSnapshot), String> {
    let (items, preset) = match kind.to_ascii_lowercase().as_str() {
        "candidate" => {
            let cards: Vec<CandidateCard> =
                serde_json::from_str(items_json).map_err(|err| format!("invalid items: {err}"))?;
            let items = cards.into_iter().map(DeckCard::Candidate).collect::<Vec<_>>();
            (items, DeckConfig::candidate_deck())
        }
        "job" => {
            let cards: Vec<JobCard> =
                serde_json::from_str(items_json).map_err(|err| format!("invalid items: {err}"))?;
            let items = cards.into_iter().map(DeckCard::Job).collect::<Vec<_>>();
            (items, DeckConfig::job_deck())
        }
        other => return Err(format!("unsupported deck kind `{other}`; expected candidate|job")),
    };

    let left_right_only = !preset.skip_enabled;
    let config = match config_json.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => preset.overlay_json(raw).map_err(|err| err.to_string())?,
        None => preset,
    };
    if left_right_only && config.skip_enabled {
        return Err(format!("deck kind `{kind}` is left/right only; skip_enabled must be false"));
    }

    let deck = DeckController::new(items, config, RecordingListener::default())
        .map_err(|err| err.to_string())?;
    let session_id = deck.session_id();
    let snapshot = snapshot_of(&deck);

    let mut sessions = sessions()
        .lock()
        .map_err(|_| "session registry is unavailable".to_string())?;
    sessions.insert(session_id, deck);
    Ok((session_id, snapshot))
}

fn with_session(
    operation: &str,
    session_id: &str,
    f: impl FnOnce(&mut FfiDeck) -> Result<DeckStepResponse, String>,
) -> DeckStepResponse {
    let Ok(id) = Uuid::parse_str(session_id.trim()) else {
        return DeckStepResponse::failure(format!(
            "{operation} failed: invalid session id `{}`",
            session_id.trim()
        ));
    };
    let Ok(mut sessions) = sessions().lock() else {
        return DeckStepResponse::failure(format!(
            "{operation} failed: session registry is unavailable"
        ));
    };
    let Some(deck) = sessions.get_mut(&id) else {
        return DeckStepResponse::failure(format!("{operation} failed: unknown session {id}"));
    };

    match f(&mut *deck) {
        Ok(response) => response,
        Err(message) => {
            warn!("event={operation} module=ffi status=error session={id} error={message}");
            // Listener events are per call; never leak them into a later response.
            deck.listener_mut().drain();
            let mut response = DeckStepResponse::failure(format!("{operation} failed: {message}"));
            response.snapshot = Some(snapshot_of(deck));
            response
        }
    }
}

fn step(deck: &mut FfiDeck, transition: DeckTransition) -> DeckStepResponse {
    let events = deck
        .listener_mut()
        .drain()
        .into_iter()
        .map(to_event_item)
        .collect();
    let (label, action, direction, delay_ms) = match transition {
        DeckTransition::Started => ("started", None, None, 0),
        DeckTransition::Ignored => ("ignored", None, None, 0),
        DeckTransition::SnapBack => ("snap_back", None, None, 0),
        DeckTransition::Exit {
            action,
            direction,
            delay,
            ..
        } => (
            "exit",
            Some(action.as_str().to_string()),
            Some(direction_label(direction).to_string()),
            u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
        ),
    };
    DeckStepResponse {
        ok: true,
        transition: label.to_string(),
        action,
        direction,
        delay_ms,
        events,
        snapshot: Some(snapshot_of(deck)),
        message: String::new(),
    }
}

fn snapshot_of(deck: &FfiDeck) -> DeckSnapshot {
    let state = deck.state();
    let tally = state.tally();
    DeckSnapshot {
        current_id: state.current().map(|card| card.item_id().to_string()),
        next_id: state.peek_next().map(|card| card.item_id().to_string()),
        position: state.position().map_or(0, |pos| to_u32(pos.current)),
        total: to_u32(state.len()),
        accepted: to_u32(tally.accepted),
        rejected: to_u32(tally.rejected),
        skipped: to_u32(tally.skipped),
        progress: state.progress(),
        exhausted: state.is_exhausted(),
        exit_pending: deck.is_exit_pending(),
        current_match_tier: state.current().map(|card| {
            let tier = match card {
                DeckCard::Candidate(card) => card.match_tier(),
                DeckCard::Job(card) => card.match_tier(),
            };
            tier.as_str().to_string()
        }),
    }
}

fn to_event_item(event: DeckEvent) -> DeckEventItem {
    let (kind, item_id) = match event {
        DeckEvent::Accepted(id) => ("accepted", id),
        DeckEvent::Rejected(id) => ("rejected", id),
        DeckEvent::Skipped(id) => ("skipped", id),
        DeckEvent::Completed(_) => ("completed", String::new()),
    };
    DeckEventItem {
        kind: kind.to_string(),
        item_id,
    }
}

fn direction_label(direction: SwipeDirection) -> &'static str {
    match direction {
        SwipeDirection::Left => "left",
        SwipeDirection::Right => "right",
        SwipeDirection::Up => "up",
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, deck_begin, deck_button, deck_close, deck_complete_exit, deck_drag,
        deck_open, deck_release, deck_reset, deck_snapshot, init_logging, ping,
    };

    const JOBS: &str = r#"[
        {"id": "1", "company": "Acme", "position": "Frontend", "match_percentage": 92},
        {"id": "2", "company": "Beta", "position": "UI/UX", "match_percentage": 85},
        {"id": "3", "company": "Gamma", "position": "PM intern", "match_percentage": 78}
    ]"#;

    const CANDIDATES: &str = r#"[
        {"id": "c1", "name": "Lin", "title": "Engineer", "match_percentage": 95},
        {"id": "c2", "name": "Wu", "title": "Designer", "match_percentage": 65}
    ]"#;

    fn open(kind: &str, items: &str) -> String {
        let response = deck_open(kind.to_string(), items.to_string(), None);
        assert!(response.ok, "{}", response.message);
        response.session_id.expect("session id")
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn open_reports_first_card_and_tier() {
        let response = deck_open("job".to_string(), JOBS.to_string(), None);
        assert!(response.ok, "{}", response.message);
        let snapshot = response.snapshot.expect("snapshot");
        assert_eq!(snapshot.current_id.as_deref(), Some("1"));
        assert_eq!(snapshot.next_id.as_deref(), Some("2"));
        assert_eq!(snapshot.position, 1);
        assert_eq!(snapshot.total, 3);
        assert_eq!(snapshot.current_match_tier.as_deref(), Some("strong"));
    }

    #[test]
    fn open_rejects_unknown_kind_and_bad_json() {
        let response = deck_open("movie".to_string(), "[]".to_string(), None);
        assert!(!response.ok);
        assert!(response.message.contains("unsupported deck kind"));

        let response = deck_open("job".to_string(), "{".to_string(), None);
        assert!(!response.ok);
        assert!(response.message.contains("invalid items"));
    }

    #[test]
    fn drag_release_accepts_and_reports_event() {
        let session = open("job", JOBS);
        assert_eq!(deck_begin(session.clone()).transition, "started");
        assert!(deck_drag(session.clone(), 150.0, 0.0).ok);

        let response = deck_release(session.clone(), 0.0, 0.0);
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.transition, "exit");
        assert_eq!(response.action.as_deref(), Some("accept"));
        assert_eq!(response.direction.as_deref(), Some("right"));
        assert_eq!(response.delay_ms, 300);
        assert_eq!(response.events.len(), 1);
        assert_eq!(response.events[0].kind, "accepted");
        assert_eq!(response.events[0].item_id, "1");

        let snapshot = response.snapshot.expect("snapshot");
        assert_eq!(snapshot.accepted, 1);
        assert!(snapshot.exit_pending);
        assert_eq!(snapshot.current_id.as_deref(), Some("2"));

        assert_eq!(deck_begin(session.clone()).transition, "ignored");
        assert_eq!(deck_complete_exit(session.clone()).transition, "updated");
        assert_eq!(deck_begin(session.clone()).transition, "started");
        assert!(deck_close(session));
    }

    #[test]
    fn buttons_exhaust_deck_and_emit_completion() {
        let session = open("job", JOBS);
        for action in ["reject", "skip_up", "accept"] {
            let response = deck_button(session.clone(), action.to_string());
            assert!(response.ok, "{}", response.message);
            assert_eq!(response.transition, "exit");
            if action == "accept" {
                let kinds = response
                    .events
                    .iter()
                    .map(|event| event.kind.as_str())
                    .collect::<Vec<_>>();
                assert_eq!(kinds, vec!["accepted", "completed"]);
            }
            deck_complete_exit(session.clone());
        }

        let snapshot = deck_snapshot(session.clone()).snapshot.expect("snapshot");
        assert!(snapshot.exhausted);
        assert_eq!(snapshot.position, 0);
        assert_eq!(snapshot.current_id, None);
        assert_eq!(snapshot.progress, 1.0);

        let reset = deck_reset(session.clone()).snapshot.expect("snapshot");
        assert_eq!(reset.current_id.as_deref(), Some("1"));
        assert_eq!(reset.accepted + reset.rejected + reset.skipped, 0);
        assert!(deck_close(session));
    }

    #[test]
    fn candidate_deck_refuses_skip_and_none() {
        let session = open("candidate", CANDIDATES);
        let response = deck_button(session.clone(), "skip_up".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("skip is disabled"));

        let response = deck_button(session.clone(), "none".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("none"));

        let response = deck_button(session.clone(), "like".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("unsupported action"));
        assert!(deck_close(session));
    }

    #[test]
    fn candidate_deck_keeps_single_axis_with_partial_config() {
        let response = deck_open(
            "candidate".to_string(),
            CANDIDATES.to_string(),
            Some(r#"{"thresholds":{"distance_threshold":80}}"#.to_string()),
        );
        assert!(response.ok, "{}", response.message);
        let session = response.session_id.expect("session id");

        assert_eq!(deck_begin(session.clone()).transition, "started");
        assert!(deck_drag(session.clone(), 0.0, -300.0).ok);
        let response = deck_release(session.clone(), 0.0, -900.0);
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.transition, "snap_back");
        assert!(response.events.is_empty());

        assert_eq!(deck_begin(session.clone()).transition, "started");
        assert!(deck_drag(session.clone(), 85.0, 0.0).ok);
        let response = deck_release(session.clone(), 0.0, 0.0);
        assert_eq!(response.action.as_deref(), Some("accept"));
        assert!(deck_close(session));
    }

    #[test]
    fn candidate_deck_refuses_skip_enabled_override() {
        let response = deck_open(
            "candidate".to_string(),
            CANDIDATES.to_string(),
            Some(r#"{"skip_enabled":true}"#.to_string()),
        );
        assert!(!response.ok);
        assert!(response.message.contains("left/right only"));
    }

    #[test]
    fn release_without_begin_fails_without_panicking() {
        let session = open("candidate", CANDIDATES);
        let response = deck_release(session.clone(), 900.0, 0.0);
        assert!(!response.ok);
        assert!(response.message.contains("no active drag"));
        assert_eq!(response.snapshot.expect("snapshot").position, 1);
        assert!(deck_close(session));
    }

    #[test]
    fn unknown_and_closed_sessions_fail() {
        let response = deck_snapshot("not-a-uuid".to_string());
        assert!(!response.ok);

        let session = open("candidate", CANDIDATES);
        assert!(deck_close(session.clone()));
        assert!(!deck_close(session.clone()));
        let response = deck_begin(session);
        assert!(!response.ok);
        assert!(response.message.contains("unknown session"));
    }
}
