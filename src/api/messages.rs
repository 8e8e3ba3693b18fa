//! Request and response bodies for the PTI calculation endpoint
//!
//! The response shape and rounding mirror what the league web pages already
//! consume from `POST /api/calculate-pti`.

use crate::rating::{AdjustmentResult, ExperienceTier};
use crate::types::{MatchInput, Participant, Role, Team};
use serde::{Deserialize, Serialize};

/// Decimal places used when reporting each value
pub const SPREAD_DECIMALS: i32 = 2;
pub const ADJUSTMENT_DECIMALS: i32 = 6;
pub const RATING_DECIMALS: i32 = 6;
pub const PROBABILITY_DECIMALS: i32 = 10;

/// Round to a fixed number of decimals, exact ties going to the even digit
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Experience as sent by the form: either the 1.0-7.0 slider value or a tier label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExperienceInput {
    Score(f64),
    Label(String),
}

impl ExperienceInput {
    pub fn tier(&self) -> ExperienceTier {
        match self {
            ExperienceInput::Score(score) => ExperienceTier::from_score(*score),
            ExperienceInput::Label(label) => ExperienceTier::from_label(label),
        }
    }
}

impl Default for ExperienceInput {
    fn default() -> Self {
        ExperienceInput::Label(ExperienceTier::ThirtyPlus.label().to_string())
    }
}

/// Body of `POST /api/calculate-pti`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatePtiRequest {
    pub player_pti: f64,
    pub partner_pti: f64,
    pub opp1_pti: f64,
    pub opp2_pti: f64,
    #[serde(default)]
    pub player_exp: ExperienceInput,
    #[serde(default)]
    pub partner_exp: ExperienceInput,
    #[serde(default)]
    pub opp1_exp: ExperienceInput,
    #[serde(default)]
    pub opp2_exp: ExperienceInput,
    #[serde(default)]
    pub match_score: String,
}

impl CalculatePtiRequest {
    pub fn to_match_input(&self) -> MatchInput {
        MatchInput::new(
            Team::new(
                Participant::new(self.player_pti, self.player_exp.tier()),
                Participant::new(self.partner_pti, self.partner_exp.tier()),
            ),
            Team::new(
                Participant::new(self.opp1_pti, self.opp1_exp.tier()),
                Participant::new(self.opp2_pti, self.opp2_exp.tier()),
            ),
            self.match_score.clone(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PtiValue {
    pub pti: f64,
}

/// One rating per role, keyed the way the web pages expect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRatings {
    pub player: PtiValue,
    pub partner: PtiValue,
    pub opp1: PtiValue,
    pub opp2: PtiValue,
}

impl RoleRatings {
    fn collect(mut pti: impl FnMut(Role) -> f64) -> Self {
        Self {
            player: PtiValue {
                pti: pti(Role::Player),
            },
            partner: PtiValue {
                pti: pti(Role::Partner),
            },
            opp1: PtiValue {
                pti: pti(Role::Opponent1),
            },
            opp2: PtiValue {
                pti: pti(Role::Opponent2),
            },
        }
    }
}

/// Intermediate values shown on the calculator page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PtiDetails {
    pub team1_sum: f64,
    pub team2_sum: f64,
    pub expected_prob: f64,
    pub actual_result: f64,
    pub experience_multiplier: f64,
    pub k_factor: f64,
    pub player_wins: bool,
    pub score_fallback: bool,
    pub unrecognized_experience: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PtiResultBody {
    pub spread: f64,
    pub adjustment: f64,
    pub before: RoleRatings,
    pub after: RoleRatings,
    pub details: PtiDetails,
}

impl From<&AdjustmentResult> for PtiResultBody {
    fn from(result: &AdjustmentResult) -> Self {
        Self {
            spread: round_to(result.spread, SPREAD_DECIMALS),
            adjustment: round_to(result.adjustment, ADJUSTMENT_DECIMALS),
            before: RoleRatings::collect(|role| result.change(role).before),
            after: RoleRatings::collect(|role| {
                round_to(result.change(role).after, RATING_DECIMALS)
            }),
            details: PtiDetails {
                team1_sum: result.team_a_sum,
                team2_sum: result.team_b_sum,
                expected_prob: round_to(result.expected_probability, PROBABILITY_DECIMALS),
                actual_result: result.actual_result,
                experience_multiplier: result.experience_multiplier,
                k_factor: result.k_factor,
                player_wins: result.player_wins,
                score_fallback: result.score_fallback,
                unrecognized_experience: result.unrecognized_experience.clone(),
            },
        }
    }
}

/// Successful response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatePtiResponse {
    pub success: bool,
    pub result: PtiResultBody,
}

impl CalculatePtiResponse {
    pub fn from_result(result: &AdjustmentResult) -> Self {
        Self {
            success: true,
            result: result.into(),
        }
    }
}

/// Failure response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::{AdjustmentCalculator, PtiCalculator};

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(40.004, 2), 40.0);
        assert_eq!(round_to(2.4746279672, 6), 2.474628);
        assert_eq!(round_to(-1.25, 1), -1.2);
    }

    #[test]
    fn test_round_to_ties_go_to_even() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(2.5, 0), 2.0);
    }

    #[test]
    fn test_spread_in_eighths_rounds_to_even() {
        let request: CalculatePtiRequest = serde_json::from_value(serde_json::json!({
            "player_pti": 20.125, "partner_pti": 20.0,
            "opp1_pti": 20.0, "opp2_pti": 20.0,
            "match_score": "6-4,6-4"
        }))
        .unwrap();

        let result = PtiCalculator::default().compute_adjustment(&request.to_match_input());
        let json = serde_json::to_value(CalculatePtiResponse::from_result(&result)).unwrap();

        assert_eq!(json["result"]["spread"], 0.12);
    }

    #[test]
    fn test_request_accepts_numbers_and_labels() {
        let request: CalculatePtiRequest = serde_json::from_value(serde_json::json!({
            "player_pti": 50.0,
            "partner_pti": 40,
            "opp1_pti": 30.0,
            "opp2_pti": 20.0,
            "player_exp": 7.0,
            "partner_exp": "1-10 matches",
            "opp1_exp": 4.5,
            "match_score": "6-4,6-4"
        }))
        .unwrap();

        assert_eq!(request.player_exp.tier(), ExperienceTier::NewPlayer);
        assert_eq!(request.partner_exp.tier(), ExperienceTier::OneToTen);
        assert_eq!(request.opp1_exp.tier(), ExperienceTier::TenToThirty);
        // Missing experience defaults to the veteran tier
        assert_eq!(request.opp2_exp.tier(), ExperienceTier::ThirtyPlus);

        let input = request.to_match_input();
        assert_eq!(input.team_a.rating_sum(), 90.0);
        assert_eq!(input.match_score, "6-4,6-4");
    }

    #[test]
    fn test_request_requires_ratings() {
        let result: Result<CalculatePtiRequest, _> = serde_json::from_value(serde_json::json!({
            "player_pti": 50.0,
            "match_score": "6-4"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_response_shape() {
        let request: CalculatePtiRequest = serde_json::from_value(serde_json::json!({
            "player_pti": 50.0, "partner_pti": 40.0,
            "opp1_pti": 30.0, "opp2_pti": 20.0,
            "player_exp": 1.0, "partner_exp": 1.0, "opp1_exp": 1.0, "opp2_exp": 1.0,
            "match_score": "6-4,6-4"
        }))
        .unwrap();

        let result = PtiCalculator::default().compute_adjustment(&request.to_match_input());
        let json = serde_json::to_value(CalculatePtiResponse::from_result(&result)).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["result"]["spread"], 40.0);
        assert_eq!(json["result"]["adjustment"], 2.474628);
        assert_eq!(json["result"]["before"]["opp2"]["pti"], 20.0);
        assert_eq!(json["result"]["after"]["player"]["pti"], 47.525372);
        assert_eq!(json["result"]["after"]["opp1"]["pti"], 32.474628);
        assert_eq!(json["result"]["details"]["team1_sum"], 90.0);
        assert_eq!(json["result"]["details"]["expected_prob"], 0.5573116338);
        assert_eq!(json["result"]["details"]["actual_result"], 1.0);
        assert_eq!(json["result"]["details"]["player_wins"], true);
        assert_eq!(json["result"]["details"]["score_fallback"], false);
        assert!(json["result"]["details"]["unrecognized_experience"]
            .as_array()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_error_response() {
        let json = serde_json::to_value(ErrorResponse::new("boom")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "boom"}));
    }
}
