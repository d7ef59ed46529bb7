//! Scripted session replay.
//!
//! A script names the deck items, an optional config and a list of steps:
//!
//! ```json
//! {
//!   "items": ["A", "B", "C"],
//!   "config": { "skip_enabled": false },
//!   "steps": [
//!     { "type": "drag", "dx": 150, "dy": 0, "vx": 0, "vy": 0 },
//!     { "type": "button", "action": "reject" },
//!     { "type": "reset" }
//!   ]
//! }
//! ```
//!
//! Exit animations are treated as finished immediately after each step.

use log::info;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use swipedeck_core::{
    DeckConfig, DeckController, DeckError, DeckEvent, DeckSetupError, DeckTransition,
    RecordingListener, SwipeAction,
};

#[derive(Debug, Deserialize)]
struct Script {
    items: Vec<String>,
    #[serde(default)]
    config: Option<DeckConfig>,
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Step {
    Drag {
        dx: f64,
        dy: f64,
        #[serde(default)]
        vx: f64,
        #[serde(default)]
        vy: f64,
    },
    Button {
        action: SwipeAction,
    },
    Reset,
}

/// Printable outcome of one replay.
#[derive(Debug)]
pub struct ReplayReport {
    pub lines: Vec<String>,
    pub tally_json: String,
}

#[derive(Debug)]
pub enum ReplayError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Setup(DeckSetupError),
    Step { index: usize, source: DeckError },
    Serialize(serde_json::Error),
}

impl Display for ReplayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read script: {err}"),
            Self::Parse(err) => write!(f, "failed to parse script: {err}"),
            Self::Setup(err) => write!(f, "failed to open deck: {err}"),
            Self::Step { index, source } => write!(f, "step {index} failed: {source}"),
            Self::Serialize(err) => write!(f, "failed to serialize tally: {err}"),
        }
    }
}

impl Error for ReplayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Setup(err) => Some(err),
            Self::Step { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

/// Reads and replays a script file.
pub fn run_file(path: &Path) -> Result<ReplayReport, ReplayError> {
    let raw = std::fs::read_to_string(path).map_err(ReplayError::Io)?;
    run_str(&raw)
}

/// Replays a script document.
pub fn run_str(raw: &str) -> Result<ReplayReport, ReplayError> {
    let script: Script = serde_json::from_str(raw).map_err(ReplayError::Parse)?;
    let config = script.config.unwrap_or_default();
    let mut deck = DeckController::new(script.items, config, RecordingListener::default())
        .map_err(ReplayError::Setup)?;
    info!(
        "event=replay_start module=cli status=ok session={} steps={}",
        deck.session_id(),
        script.steps.len()
    );

    let mut lines = Vec::new();
    for (index, step) in script.steps.into_iter().enumerate() {
        let wrap = |source| ReplayError::Step { index, source };
        let transition = match step {
            Step::Drag { dx, dy, vx, vy } => match deck.begin_interaction() {
                DeckTransition::Started => {
                    deck.update_drag(dx, dy).map_err(wrap)?;
                    deck.end_interaction(vx, vy).map_err(wrap)?
                }
                other => other,
            },
            Step::Button { action } => deck.press_button(action).map_err(wrap)?,
            Step::Reset => {
                deck.reset();
                lines.push(format!("#{index} reset"));
                continue;
            }
        };
        deck.complete_exit();
        lines.push(describe(index, transition));
        for event in deck.listener_mut().drain() {
            lines.push(format!("#{index}   {}", describe_event(&event)));
        }
    }

    let tally_json = serde_json::to_string(&deck.tally()).map_err(ReplayError::Serialize)?;
    Ok(ReplayReport { lines, tally_json })
}

fn describe(index: usize, transition: DeckTransition) -> String {
    match transition {
        DeckTransition::Exit { index: card, action, .. } => {
            format!("#{index} exit card={card} action={}", action.as_str())
        }
        DeckTransition::SnapBack => format!("#{index} snap_back"),
        DeckTransition::Ignored => format!("#{index} ignored"),
        DeckTransition::Started => format!("#{index} started"),
    }
}

fn describe_event(event: &DeckEvent) -> String {
    match event {
        DeckEvent::Accepted(id) => format!("accepted {id}"),
        DeckEvent::Rejected(id) => format!("rejected {id}"),
        DeckEvent::Skipped(id) => format!("skipped {id}"),
        DeckEvent::Completed(tally) => format!(
            "completed accepted={} rejected={} skipped={}",
            tally.accepted, tally.rejected, tally.skipped
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{run_file, run_str, ReplayError};
    use std::error::Error;
    use std::io::Write;

    #[test]
    fn replays_literal_scenario_to_exhaustion() {
        let report = run_str(
            r#"{
                "items": ["A", "B", "C"],
                "steps": [
                    {"type": "drag", "dx": 150, "dy": 0},
                    {"type": "drag", "dx": -30, "dy": 0, "vx": -600},
                    {"type": "drag", "dx": 10, "dy": 10},
                    {"type": "drag", "dx": 10, "dy": -150}
                ]
            }"#,
        )
        .expect("replay");

        assert_eq!(report.lines[0], "#0 exit card=0 action=accept");
        assert_eq!(report.lines[1], "#0   accepted A");
        assert_eq!(report.lines[2], "#1 exit card=1 action=reject");
        assert_eq!(report.lines[4], "#2 snap_back");
        assert_eq!(report.lines[5], "#3 exit card=2 action=skip_up");
        assert!(report
            .lines
            .iter()
            .any(|line| line.contains("completed accepted=1 rejected=1 skipped=1")));
        assert_eq!(
            report.tally_json,
            r#"{"accepted":1,"rejected":1,"skipped":1}"#
        );
    }

    #[test]
    fn reset_step_clears_tally() {
        let report = run_str(
            r#"{
                "items": ["A", "B"],
                "config": {"skip_enabled": false},
                "steps": [
                    {"type": "button", "action": "accept"},
                    {"type": "reset"},
                    {"type": "drag", "dx": 5, "dy": -400, "vy": -900}
                ]
            }"#,
        )
        .expect("replay");
        assert!(report.lines.contains(&"#1 reset".to_string()));
        assert!(report.lines.contains(&"#2 snap_back".to_string()));
        assert_eq!(
            report.tally_json,
            r#"{"accepted":0,"rejected":0,"skipped":0}"#
        );
    }

    #[test]
    fn invalid_button_reports_step_index() {
        let err = run_str(
            r#"{"items": ["A"], "steps": [{"type": "button", "action": "none"}]}"#,
        )
        .expect_err("none button must fail");
        assert!(matches!(err, ReplayError::Step { index: 0, .. }));
    }

    #[test]
    fn serialize_error_is_not_reported_as_parse() {
        let source = serde_json::from_str::<u32>("\"tally\"").expect_err("not a number");
        let err = ReplayError::Serialize(source);
        assert!(err.to_string().starts_with("failed to serialize tally:"));
        assert!(err.source().is_some());
    }

    #[test]
    fn duplicate_items_fail_setup() {
        let err = run_str(r#"{"items": ["A", "A"]}"#).expect_err("duplicate ids");
        assert!(matches!(err, ReplayError::Setup(_)));
    }

    #[test]
    fn run_file_reads_script_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{"items": ["A"], "steps": [{{"type": "button", "action": "reject"}}]}}"#
        )
        .expect("write script");
        let report = run_file(file.path()).expect("replay file");
        assert_eq!(
            report.tally_json,
            r#"{"accepted":0,"rejected":1,"skipped":0}"#
        );
    }
}
