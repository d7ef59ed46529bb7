//! Deck domain model.
//!
//! # Responsibility
//! - Define the items a deck presents and the actions a user can take on them.
//! - Keep display payloads opaque to the deck core.
//!
//! # Invariants
//! - Every item is identified by a stable, non-blank string id.
//! - Item ids are unique within one deck.

pub mod action;
pub mod item;
pub mod score;
