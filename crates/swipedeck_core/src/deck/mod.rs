//! Deck state machine and interaction controller.
//!
//! # Responsibility
//! - Track the cursor and decision tally over an immutable item list.
//! - Bridge pointer/button input to classification, state and listeners.
//!
//! # Invariants
//! - `tally.total() == cursor` after every operation.
//! - Items are never reordered or mutated while a deck is loaded.
//! - Invalid calls return [`DeckError`](error::DeckError) and leave state untouched.

pub mod controller;
pub mod error;
pub mod state;
