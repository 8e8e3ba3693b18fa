//! PTI rating adjustment
//!
//! An Elo-style update applied to doubles matches. Both teams are rated by
//! the SUM of their players' PTIs, the expected result is the classic Elo
//! logistic on those sums, and the K-factor is scaled by the winning team's
//! average experience multiplier. Lower PTI is better, so winners move down
//! and losers move up by the same amount.

use crate::config::rating::{RatingSettings, DEFAULT_BASE_K_FACTOR};
use crate::error::PtiError;
use crate::rating::score::parse_match_score;
use crate::types::{MatchInput, Participant, RatingChange, Role, Side, Team};
use serde::{Deserialize, Serialize};
use skillratings::elo::expected_score;
use tracing::{debug, warn};

/// Result of a single PTI calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentResult {
    /// player + partner
    pub team_a_sum: f64,
    /// opp1 + opp2
    pub team_b_sum: f64,
    /// |team_a_sum - team_b_sum|
    pub spread: f64,
    /// Magnitude of the rating change, never negative
    pub adjustment: f64,
    /// Elo win expectation for team A
    pub expected_probability: f64,
    /// 1.0 if team A won, otherwise 0.0
    pub actual_result: f64,
    /// Average multiplier of the winning team
    pub experience_multiplier: f64,
    pub k_factor: f64,
    pub player_wins: bool,
    /// Before/after for player, partner, opp1, opp2 in that order
    pub changes: [RatingChange; 4],
    /// The score was unreadable and team A was assumed to win
    pub score_fallback: bool,
    /// Roles whose experience label was not recognized and rated as 30+
    pub unrecognized_experience: Vec<Role>,
}

impl AdjustmentResult {
    pub fn change(&self, role: Role) -> &RatingChange {
        // `changes` is always built in `Role::ALL` order
        let index = match role {
            Role::Player => 0,
            Role::Partner => 1,
            Role::Opponent1 => 2,
            Role::Opponent2 => 3,
        };
        &self.changes[index]
    }

    pub fn winning_side(&self) -> Side {
        if self.player_wins {
            Side::TeamA
        } else {
            Side::TeamB
        }
    }

    pub fn used_fallback(&self) -> bool {
        self.score_fallback || !self.unrecognized_experience.is_empty()
    }

    /// Fail if any reported number is NaN or infinite. The calculation itself
    /// never validates its inputs, so callers serializing to JSON use this.
    pub fn ensure_finite(&self) -> Result<(), PtiError> {
        let fields = [
            ("team1_sum", self.team_a_sum),
            ("team2_sum", self.team_b_sum),
            ("spread", self.spread),
            ("adjustment", self.adjustment),
            ("expected_prob", self.expected_probability),
            ("k_factor", self.k_factor),
        ];

        if let Some((name, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(PtiError::NonFiniteResult {
                field: name.to_string(),
            });
        }

        if let Some(change) = self
            .changes
            .iter()
            .find(|c| !c.before.is_finite() || !c.after.is_finite())
        {
            return Err(PtiError::NonFiniteResult {
                field: format!("{} pti", change.role),
            });
        }

        Ok(())
    }
}

/// Trait for computing post-match rating adjustments
pub trait AdjustmentCalculator: Send + Sync {
    /// Rate one completed doubles match
    fn compute_adjustment(&self, input: &MatchInput) -> AdjustmentResult;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}

/// The production PTI calculator
#[derive(Debug, Clone)]
pub struct PtiCalculator {
    settings: RatingSettings,
}

impl PtiCalculator {
    pub fn new(settings: RatingSettings) -> crate::error::Result<Self> {
        settings.validate()?;

        Ok(Self { settings })
    }

    pub fn base_k_factor(&self) -> f64 {
        self.settings.base_k_factor
    }
}

impl Default for PtiCalculator {
    fn default() -> Self {
        Self {
            settings: RatingSettings::default(),
        }
    }
}

impl AdjustmentCalculator for PtiCalculator {
    fn compute_adjustment(&self, input: &MatchInput) -> AdjustmentResult {
        let team_a_sum = input.team_a.rating_sum();
        let team_b_sum = input.team_b.rating_sum();
        let spread = (team_a_sum - team_b_sum).abs();

        let (expected_probability, _) =
            expected_score(&input.team_a.as_elo(), &input.team_b.as_elo());

        let outcome = parse_match_score(&input.match_score);
        let actual_result = outcome.actual_result();
        let winner = if outcome.team_a_won {
            Side::TeamA
        } else {
            Side::TeamB
        };

        let experience_multiplier = input.team(winner).experience_multiplier();
        let k_factor = self.settings.base_k_factor * experience_multiplier;
        let adjustment = k_factor * (actual_result - expected_probability).abs();

        let changes = Role::ALL.map(|role| {
            let before = input.participant(role).rating;
            let after = if MatchInput::side_of(role) == winner {
                before - adjustment
            } else {
                before + adjustment
            };
            RatingChange {
                role,
                before,
                after,
            }
        });

        let unrecognized_experience: Vec<Role> = Role::ALL
            .into_iter()
            .filter(|role| !input.participant(*role).experience.is_recognized())
            .collect();

        for role in &unrecognized_experience {
            warn!(
                "Unrecognized experience '{}' for {}, using multiplier 1.0",
                input.participant(*role).experience,
                role
            );
        }

        debug!(
            "PTI calculation - sums: {:.2} vs {:.2}, expected: {:.6}, actual: {}, k: {:.4}, adjustment: {:.6}",
            team_a_sum, team_b_sum, expected_probability, actual_result, k_factor, adjustment
        );

        AdjustmentResult {
            team_a_sum,
            team_b_sum,
            spread,
            adjustment,
            expected_probability,
            actual_result,
            experience_multiplier,
            k_factor,
            player_wins: outcome.team_a_won,
            changes,
            score_fallback: outcome.fell_back,
            unrecognized_experience,
        }
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "pti",
            "base_k_factor": self.settings.base_k_factor,
            "default_base_k_factor": DEFAULT_BASE_K_FACTOR,
        })
    }
}

/// Rate a match from the flat form fields using the default settings
#[allow(clippy::too_many_arguments)]
pub fn compute_adjustment(
    player_rating: f64,
    partner_rating: f64,
    opponent1_rating: f64,
    opponent2_rating: f64,
    player_experience: &str,
    partner_experience: &str,
    opponent1_experience: &str,
    opponent2_experience: &str,
    match_score: &str,
) -> AdjustmentResult {
    let input = MatchInput::new(
        Team::new(
            Participant::with_label(player_rating, player_experience),
            Participant::with_label(partner_rating, partner_experience),
        ),
        Team::new(
            Participant::with_label(opponent1_rating, opponent1_experience),
            Participant::with_label(opponent2_rating, opponent2_experience),
        ),
        match_score,
    );

    PtiCalculator::default().compute_adjustment(&input)
}
