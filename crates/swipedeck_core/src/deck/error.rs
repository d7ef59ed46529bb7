//! Deck invalid-call errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DeckResult<T> = Result<T, DeckError>;

/// Programmer errors raised by deck operations.
///
/// None of these are recoverable at runtime; they signal a caller that broke
/// the deck protocol. State is never modified when one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    /// `resolve` was called with `SwipeAction::None`.
    ResolveWithNone,
    /// `resolve` was called after the last item was decided.
    Exhausted { cursor: usize, len: usize },
    /// The item captured for this decision is no longer current.
    StaleItem { expected: usize, current: usize },
    /// A drag update or release arrived without a started interaction.
    NoActiveInteraction,
    /// `SkipUp` was requested on a deck with the vertical axis disabled.
    SkipDisabled,
}

impl Display for DeckError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ResolveWithNone => write!(f, "cannot resolve a deck item with action `none`"),
            Self::Exhausted { cursor, len } => {
                write!(f, "deck is exhausted (cursor {cursor} of {len})")
            }
            Self::StaleItem { expected, current } => write!(
                f,
                "item at index {expected} was already resolved; deck cursor is {current}"
            ),
            Self::NoActiveInteraction => write!(f, "no active drag interaction"),
            Self::SkipDisabled => write!(f, "skip is disabled for this deck"),
        }
    }
}

impl Error for DeckError {}
