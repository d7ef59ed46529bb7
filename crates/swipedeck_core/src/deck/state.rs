//! Deck cursor, tally and decision log.
//!
//! # Responsibility
//! - Hold the immutable item list and the cursor over it.
//! - Count and record every resolved decision.
//!
//! # Invariants
//! - `0 <= cursor <= items.len()`; `cursor == len` is the exhausted state.
//! - `tally.total() == cursor` after every operation.
//! - Every decision log entry corresponds to exactly one tally increment.

use crate::deck::error::{DeckError, DeckResult};
use crate::model::action::SwipeAction;
use crate::model::item::{validate_items, DeckItem, ItemValidationError};
use serde::Serialize;

/// Per-action decision counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub accepted: usize,
    pub rejected: usize,
    pub skipped: usize,
}

impl Tally {
    /// Total decisions made; always equals the deck cursor.
    pub fn total(&self) -> usize {
        self.accepted + self.rejected + self.skipped
    }
}

/// Item ids per decision, in resolution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecisionLog {
    pub accepted: Vec<String>,
    pub rejected: Vec<String>,
    pub skipped: Vec<String>,
}

impl DecisionLog {
    fn clear(&mut self) {
        self.accepted.clear();
        self.rejected.clear();
        self.skipped.clear();
    }
}

/// One-based card position, e.g. `2 / 5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeckPosition {
    pub current: usize,
    pub total: usize,
}

/// Ordered deck of items with a forward-only cursor.
#[derive(Debug, Clone)]
pub struct DeckState<T: DeckItem> {
    items: Vec<T>,
    cursor: usize,
    tally: Tally,
    decisions: DecisionLog,
}

impl<T: DeckItem> DeckState<T> {
    /// Loads a deck at cursor 0 with an empty tally.
    ///
    /// # Errors
    /// - Returns an error on blank or duplicate ids, or invalid match values.
    pub fn new(items: Vec<T>) -> Result<Self, ItemValidationError> {
        validate_items(&items)?;
        Ok(Self {
            items,
            cursor: 0,
            tally: Tally::default(),
            decisions: DecisionLog::default(),
        })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn decisions(&self) -> &DecisionLog {
        &self.decisions
    }

    /// Returns the item under the cursor, or `None` once exhausted.
    pub fn current(&self) -> Option<&T> {
        self.items.get(self.cursor)
    }

    /// Returns the item rendered behind the current card.
    pub fn peek_next(&self) -> Option<&T> {
        self.items.get(self.cursor + 1)
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.items.len()
    }

    /// One-based position of the current card; `None` once exhausted.
    pub fn position(&self) -> Option<DeckPosition> {
        if self.is_exhausted() {
            return None;
        }
        Some(DeckPosition {
            current: self.cursor + 1,
            total: self.items.len(),
        })
    }

    /// Fraction of the deck already decided, in `[0, 1]`.
    ///
    /// An empty deck is complete and reports `1.0`.
    pub fn progress(&self) -> f64 {
        if self.items.is_empty() {
            return 1.0;
        }
        self.cursor as f64 / self.items.len() as f64
    }

    /// Records `action` for the current item and advances the cursor.
    ///
    /// Returns the item that was resolved.
    ///
    /// # Errors
    /// - `ResolveWithNone` when `action` is `SwipeAction::None`.
    /// - `Exhausted` when no current item remains.
    pub fn resolve(&mut self, action: SwipeAction) -> DeckResult<&T> {
        if !action.is_resolving() {
            return Err(DeckError::ResolveWithNone);
        }
        let index = self.cursor;
        let Some(item) = self.items.get(index) else {
            return Err(DeckError::Exhausted {
                cursor: self.cursor,
                len: self.items.len(),
            });
        };

        let id = item.item_id().to_string();
        match action {
            SwipeAction::Accept => {
                self.tally.accepted += 1;
                self.decisions.accepted.push(id);
            }
            SwipeAction::Reject => {
                self.tally.rejected += 1;
                self.decisions.rejected.push(id);
            }
            SwipeAction::SkipUp => {
                self.tally.skipped += 1;
                self.decisions.skipped.push(id);
            }
            SwipeAction::None => unreachable!("non-resolving actions return early"),
        }
        self.cursor += 1;
        debug_assert_eq!(self.tally.total(), self.cursor);

        Ok(&self.items[index])
    }

    /// Resolves the item captured at `index`, rejecting stale captures.
    ///
    /// # Errors
    /// - `StaleItem` when the cursor has moved past `index`.
    /// - Any error from [`DeckState::resolve`].
    pub fn resolve_at(&mut self, index: usize, action: SwipeAction) -> DeckResult<&T> {
        if index != self.cursor {
            return Err(DeckError::StaleItem {
                expected: index,
                current: self.cursor,
            });
        }
        self.resolve(action)
    }

    /// Rewinds to cursor 0 and clears tally and decision log.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.tally = Tally::default();
        self.decisions.clear();
    }
}
