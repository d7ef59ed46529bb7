//! Flutter-facing bindings for the SwipeDeck core.

pub mod api;
