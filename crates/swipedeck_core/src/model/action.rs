//! Discrete swipe actions and their exit directions.

use serde::{Deserialize, Serialize};

/// Outcome of classifying one released gesture or one button press.
///
/// `None` means the gesture did not cross any threshold; the card snaps back
/// and no deck state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeAction {
    /// Rightward swipe: like / save / apply.
    Accept,
    /// Leftward swipe: pass.
    Reject,
    /// Upward swipe: not interested.
    SkipUp,
    /// Below threshold on every axis.
    None,
}

/// Screen direction a resolved card leaves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
}

impl SwipeAction {
    /// Returns whether this action advances the deck cursor.
    pub fn is_resolving(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Returns the exit direction for resolving actions.
    pub fn exit_direction(self) -> Option<SwipeDirection> {
        match self {
            Self::Accept => Some(SwipeDirection::Right),
            Self::Reject => Some(SwipeDirection::Left),
            Self::SkipUp => Some(SwipeDirection::Up),
            Self::None => None,
        }
    }

    /// Stable label used in logs and FFI envelopes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::SkipUp => "skip_up",
            Self::None => "none",
        }
    }

    /// Parses a stable label produced by [`SwipeAction::as_str`].
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "accept" => Some(Self::Accept),
            "reject" => Some(Self::Reject),
            "skip_up" | "skip" => Some(Self::SkipUp),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}
