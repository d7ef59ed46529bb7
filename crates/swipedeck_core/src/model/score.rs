//! Match percentage badges shown on candidate and job cards.

use serde::{Deserialize, Serialize};

/// Badge tier for one match percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Low,
    Fair,
    Strong,
    Excellent,
}

/// Tier cut-offs differ between the company-side candidate deck and the
/// student-side job deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchScale {
    /// `>=90` excellent, `>=80` strong, `>=70` fair, otherwise low.
    Candidate,
    /// `>=80` strong, `>=60` fair, otherwise low. Never excellent.
    Job,
}

/// Highest representable match percentage.
pub const MAX_MATCH_PERCENTAGE: u8 = 100;

impl MatchScale {
    /// Maps a percentage onto this scale's badge tier.
    ///
    /// Values above 100 are treated as 100; callers validate ranges at deck
    /// construction.
    pub fn tier(self, percentage: u8) -> MatchTier {
        let percentage = percentage.min(MAX_MATCH_PERCENTAGE);
        match self {
            Self::Candidate => match percentage {
                90.. => MatchTier::Excellent,
                80..=89 => MatchTier::Strong,
                70..=79 => MatchTier::Fair,
                _ => MatchTier::Low,
            },
            Self::Job => match percentage {
                80.. => MatchTier::Strong,
                60..=79 => MatchTier::Fair,
                _ => MatchTier::Low,
            },
        }
    }
}

impl MatchTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Fair => "fair",
            Self::Strong => "strong",
            Self::Excellent => "excellent",
        }
    }
}
