//! Drag release classifier.
//!
//! Rules, in priority order:
//! 1. Vertical axis (two-axis decks only): if `|vy| >= velocity` or
//!    `|dy| >= distance`, and the gesture points upward (`dy < 0 || vy < 0`),
//!    the result is `SkipUp`.
//! 2. Horizontal axis: if `|vx| >= velocity` or `|dx| >= distance`, the result
//!    is `Accept` when `dx > 0 || vx > 0`, otherwise `Reject`.
//! 3. Otherwise `None`.
//!
//! A downward vertical crossing falls through to the horizontal rule.

use crate::model::action::SwipeAction;
use serde::{Deserialize, Serialize};

/// Default minimum displacement that resolves a gesture on its own.
pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 100.0;
/// Default minimum release velocity (units/second) for a flick.
pub const DEFAULT_VELOCITY_THRESHOLD: f64 = 500.0;

/// Classifier thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeThresholds {
    /// Minimum absolute displacement, in device-independent units.
    pub distance_threshold: f64,
    /// Minimum absolute release velocity, in units per second.
    pub velocity_threshold: f64,
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self {
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
        }
    }
}

/// Axes a deck recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeAxes {
    /// Left/right only; vertical movement is ignored.
    HorizontalOnly,
    /// Up, left and right; up wins on diagonals.
    HorizontalAndVertical,
}

/// Displacement and release velocity of one pointer interaction.
///
/// `dx`/`dy` are totals since the interaction started; `vx`/`vy` are the
/// instantaneous velocity at release. Negative `dy` points up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragSample {
    pub dx: f64,
    pub dy: f64,
    pub vx: f64,
    pub vy: f64,
}

impl DragSample {
    pub fn new(dx: f64, dy: f64, vx: f64, vy: f64) -> Self {
        Self { dx, dy, vx, vy }
    }
}

/// Classifies a release on a two-axis deck (vertical first).
pub fn classify(sample: DragSample, thresholds: SwipeThresholds) -> SwipeAction {
    classify_with_axes(sample, thresholds, SwipeAxes::HorizontalAndVertical)
}

/// Classifies a release, restricted to the given axes.
pub fn classify_with_axes(
    sample: DragSample,
    thresholds: SwipeThresholds,
    axes: SwipeAxes,
) -> SwipeAction {
    let DragSample { dx, dy, vx, vy } = sample;

    if axes == SwipeAxes::HorizontalAndVertical
        && crosses(dy, vy, thresholds)
        && (dy < 0.0 || vy < 0.0)
    {
        return SwipeAction::SkipUp;
    }

    // A motionless horizontal axis has no direction, even with zero thresholds.
    if dx == 0.0 && vx == 0.0 {
        return SwipeAction::None;
    }
    if crosses(dx, vx, thresholds) {
        if dx > 0.0 || vx > 0.0 {
            return SwipeAction::Accept;
        }
        return SwipeAction::Reject;
    }

    SwipeAction::None
}

fn crosses(displacement: f64, velocity: f64, thresholds: SwipeThresholds) -> bool {
    velocity.abs() >= thresholds.velocity_threshold
        || displacement.abs() >= thresholds.distance_threshold
}
