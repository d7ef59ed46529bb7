//! Core deck logic for SwipeDeck.
//! This crate is the single source of truth for swipe classification and
//! deck invariants; UI layers only render what it decides.

pub mod config;
pub mod deck;
pub mod gesture;
pub mod logging;
pub mod model;

pub use config::{ConfigError, ConfigResult, DeckConfig, DEFAULT_EXIT_DELAY_MS};
pub use deck::controller::{
    DeckController, DeckEvent, DeckListener, DeckSetupError, DeckTransition, NoopListener,
    RecordingListener, SessionId,
};
pub use deck::error::{DeckError, DeckResult};
pub use deck::state::{DecisionLog, DeckPosition, DeckState, Tally};
pub use gesture::classifier::{
    classify, classify_with_axes, DragSample, SwipeAxes, SwipeThresholds,
    DEFAULT_DISTANCE_THRESHOLD, DEFAULT_VELOCITY_THRESHOLD,
};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::action::{SwipeAction, SwipeDirection};
pub use model::item::{validate_items, CandidateCard, DeckItem, ItemValidationError, JobCard};
pub use model::score::{MatchScale, MatchTier};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
