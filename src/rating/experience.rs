//! Experience tiers and their K-factor multipliers
//!
//! Less experienced winners move ratings further. Only the winning team's
//! tiers are consulted when building the K-factor.

use serde::{Deserialize, Serialize};

/// Multiplier for "30+ matches" and for any label we do not recognize
pub const BASE_MULTIPLIER: f64 = 1.00;

/// Multiplier for "10-30 matches"
pub const TEN_TO_THIRTY_MULTIPLIER: f64 = 1.05;

/// Multiplier for "1-10 matches"
pub const ONE_TO_TEN_MULTIPLIER: f64 = 1.10;

/// Multiplier for brand new players
pub const NEW_PLAYER_MULTIPLIER: f64 = 1.15;

/// Match experience bucket of a participant
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExperienceTier {
    #[default]
    ThirtyPlus,
    TenToThirty,
    OneToTen,
    NewPlayer,
    /// Label that matched no known tier; rated like `ThirtyPlus`
    Unrecognized(String),
}

impl ExperienceTier {
    /// Parse a tier label, tolerating case, surrounding whitespace and the
    /// optional "matches"/"player" suffixes
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "30+" | "30+ matches" => ExperienceTier::ThirtyPlus,
            "10-30" | "10-30 matches" => ExperienceTier::TenToThirty,
            "1-10" | "1-10 matches" => ExperienceTier::OneToTen,
            "new" | "new player" => ExperienceTier::NewPlayer,
            _ => ExperienceTier::Unrecognized(label.to_string()),
        }
    }

    /// Map the 1.0-7.0 experience slider used by the web form onto a tier
    pub fn from_score(score: f64) -> Self {
        if score >= 7.0 {
            ExperienceTier::NewPlayer
        } else if score >= 5.0 {
            ExperienceTier::OneToTen
        } else if score >= 4.0 {
            ExperienceTier::TenToThirty
        } else {
            ExperienceTier::ThirtyPlus
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            ExperienceTier::ThirtyPlus => BASE_MULTIPLIER,
            ExperienceTier::TenToThirty => TEN_TO_THIRTY_MULTIPLIER,
            ExperienceTier::OneToTen => ONE_TO_TEN_MULTIPLIER,
            ExperienceTier::NewPlayer => NEW_PLAYER_MULTIPLIER,
            ExperienceTier::Unrecognized(_) => BASE_MULTIPLIER,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, ExperienceTier::Unrecognized(_))
    }

    /// Canonical label; unknown labels round-trip unchanged
    pub fn label(&self) -> &str {
        match self {
            ExperienceTier::ThirtyPlus => "30+",
            ExperienceTier::TenToThirty => "10-30",
            ExperienceTier::OneToTen => "1-10",
            ExperienceTier::NewPlayer => "New Player",
            ExperienceTier::Unrecognized(label) => label,
        }
    }
}

impl std::fmt::Display for ExperienceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<String> for ExperienceTier {
    fn from(label: String) -> Self {
        ExperienceTier::from_label(&label)
    }
}

impl From<&str> for ExperienceTier {
    fn from(label: &str) -> Self {
        ExperienceTier::from_label(label)
    }
}

impl From<ExperienceTier> for String {
    fn from(tier: ExperienceTier) -> Self {
        tier.label().to_string()
    }
}
