//! Common types used throughout the PTI service

use crate::rating::experience::ExperienceTier;
use serde::{Deserialize, Serialize};
use skillratings::elo::EloRating;

/// Position of a participant within a doubles match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "player")]
    Player,
    #[serde(rename = "partner")]
    Partner,
    #[serde(rename = "opp1")]
    Opponent1,
    #[serde(rename = "opp2")]
    Opponent2,
}

impl Role {
    /// All four roles in response order
    pub const ALL: [Role; 4] = [
        Role::Player,
        Role::Partner,
        Role::Opponent1,
        Role::Opponent2,
    ];

    /// Wire name used in JSON payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Player => "player",
            Role::Partner => "partner",
            Role::Opponent1 => "opp1",
            Role::Opponent2 => "opp2",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which side of the net a team plays on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The requesting player and their partner
    TeamA,
    /// The two opponents
    TeamB,
}

/// One player going into a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Current PTI; lower is better
    pub rating: f64,
    pub experience: ExperienceTier,
}

impl Participant {
    pub fn new(rating: f64, experience: ExperienceTier) -> Self {
        Self { rating, experience }
    }

    /// Parse the experience label leniently; unknown labels are kept as-is
    pub fn with_label(rating: f64, experience_label: &str) -> Self {
        Self::new(rating, ExperienceTier::from_label(experience_label))
    }
}

/// A doubles team; always exactly two players
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub first: Participant,
    pub second: Participant,
}

impl Team {
    pub fn new(first: Participant, second: Participant) -> Self {
        Self { first, second }
    }

    /// Summed team rating. Sums, not means, feed the win expectation.
    pub fn rating_sum(&self) -> f64 {
        self.first.rating + self.second.rating
    }

    /// Team sum wrapped for the skillratings Elo helpers
    pub fn as_elo(&self) -> EloRating {
        EloRating {
            rating: self.rating_sum(),
        }
    }

    /// Average of the two experience multipliers
    pub fn experience_multiplier(&self) -> f64 {
        (self.first.experience.multiplier() + self.second.experience.multiplier()) / 2.0
    }
}

/// Everything needed to rate a single completed match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchInput {
    pub team_a: Team,
    pub team_b: Team,
    /// Raw comma separated set scores from team A's perspective, e.g. "6-4,3-6,6-2"
    pub match_score: String,
}

impl MatchInput {
    pub fn new(team_a: Team, team_b: Team, match_score: impl Into<String>) -> Self {
        Self {
            team_a,
            team_b,
            match_score: match_score.into(),
        }
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::TeamA => &self.team_a,
            Side::TeamB => &self.team_b,
        }
    }

    pub fn participant(&self, role: Role) -> &Participant {
        match role {
            Role::Player => &self.team_a.first,
            Role::Partner => &self.team_a.second,
            Role::Opponent1 => &self.team_b.first,
            Role::Opponent2 => &self.team_b.second,
        }
    }

    /// Side the given role plays on
    pub fn side_of(role: Role) -> Side {
        match role {
            Role::Player | Role::Partner => Side::TeamA,
            Role::Opponent1 | Role::Opponent2 => Side::TeamB,
        }
    }

    /// Same match seen from the other team's side, with each set score mirrored
    pub fn swapped(&self) -> Self {
        let mirrored = self
            .match_score
            .split(',')
            .map(|set| match set.split_once('-') {
                Some((home, away)) => format!("{}-{}", away.trim(), home.trim()),
                None => set.to_string(),
            })
            .collect::<Vec<_>>()
            .join(",");

        Self {
            team_a: self.team_b.clone(),
            team_b: self.team_a.clone(),
            match_score: mirrored,
        }
    }
}

/// Rating of one participant before and after the adjustment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub role: Role,
    pub before: f64,
    pub after: f64,
}

impl RatingChange {
    /// Signed change; negative means the player improved
    pub fn delta(&self) -> f64 {
        self.after - self.before
    }
}
