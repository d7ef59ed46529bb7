//! Gesture classification.
//!
//! # Responsibility
//! - Turn one released drag into a discrete [`SwipeAction`](crate::model::action::SwipeAction).
//!
//! # Invariants
//! - Classification is pure and deterministic: no I/O, no clock, no state.
//! - Vertical intent is evaluated before horizontal intent on two-axis decks.

pub mod classifier;
