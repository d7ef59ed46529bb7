//! Deck item contracts and the two concrete card payloads.
//!
//! # Responsibility
//! - Define the only view of an item the deck core relies on (`item_id`).
//! - Carry candidate/job display payloads without inspecting them.
//!
//! # Invariants
//! - `item_id()` is non-blank and stable for the lifetime of a deck.
//! - Match percentages, when present, are within `0..=100`.

use crate::model::score::{MatchScale, MatchTier, MAX_MATCH_PERCENTAGE};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque unit a deck presents for an accept/reject/skip decision.
pub trait DeckItem {
    /// Stable identifier used for tallies, logs and callbacks.
    fn item_id(&self) -> &str;

    /// Optional match percentage rendered as a badge.
    fn match_percentage(&self) -> Option<u8> {
        None
    }
}

impl DeckItem for String {
    fn item_id(&self) -> &str {
        self.as_str()
    }
}

impl DeckItem for &str {
    fn item_id(&self) -> &str {
        self
    }
}

/// Item validation failures raised while loading a deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    /// Item at `index` has an empty or whitespace-only id.
    BlankId { index: usize },
    /// Two items share one id.
    DuplicateId(String),
    /// Match percentage is above 100.
    MatchOutOfRange { id: String, value: u8 },
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId { index } => write!(f, "deck item at index {index} has a blank id"),
            Self::DuplicateId(id) => write!(f, "deck item id is duplicated: {id}"),
            Self::MatchOutOfRange { id, value } => write!(
                f,
                "deck item {id} has match percentage {value}; expected 0..={MAX_MATCH_PERCENTAGE}"
            ),
        }
    }
}

impl Error for ItemValidationError {}

/// Validates a full item list before it becomes a deck.
pub fn validate_items<T: DeckItem>(items: &[T]) -> Result<(), ItemValidationError> {
    let mut seen = HashSet::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let id = item.item_id();
        if id.trim().is_empty() {
            return Err(ItemValidationError::BlankId { index });
        }
        if !seen.insert(id) {
            return Err(ItemValidationError::DuplicateId(id.to_string()));
        }
        if let Some(value) = item.match_percentage() {
            if value > MAX_MATCH_PERCENTAGE {
                return Err(ItemValidationError::MatchOutOfRange {
                    id: id.to_string(),
                    value,
                });
            }
        }
    }
    Ok(())
}

/// Candidate profile shown on the company-side deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateCard {
    pub id: String,
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub match_percentage: u8,
    #[serde(default)]
    pub bio: String,
}

impl CandidateCard {
    pub fn match_tier(&self) -> MatchTier {
        MatchScale::Candidate.tier(self.match_percentage)
    }
}

impl DeckItem for CandidateCard {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn match_percentage(&self) -> Option<u8> {
        Some(self.match_percentage)
    }
}

/// Job posting shown on the student-side deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCard {
    pub id: String,
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub location: String,
    /// Employment type label, e.g. full-time or internship.
    #[serde(default)]
    pub work_type: String,
    #[serde(default)]
    pub salary: String,
    pub match_percentage: u8,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub industry: String,
}

impl JobCard {
    pub fn match_tier(&self) -> MatchTier {
        MatchScale::Job.tier(self.match_percentage)
    }
}

impl DeckItem for JobCard {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn match_percentage(&self) -> Option<u8> {
        Some(self.match_percentage)
    }
}
