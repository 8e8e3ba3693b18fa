//! Shared fixtures for integration testing

use rally_pti::rating::ExperienceTier;
use rally_pti::types::{MatchInput, Participant, Team};

/// Build a match from four ratings, four experience labels and a score
pub fn match_input(ratings: [f64; 4], experience: [&str; 4], score: &str) -> MatchInput {
    MatchInput::new(
        Team::new(
            Participant::new(ratings[0], ExperienceTier::from_label(experience[0])),
            Participant::new(ratings[1], ExperienceTier::from_label(experience[1])),
        ),
        Team::new(
            Participant::new(ratings[2], ExperienceTier::from_label(experience[2])),
            Participant::new(ratings[3], ExperienceTier::from_label(experience[3])),
        ),
        score,
    )
}

/// The worked example used on the calculator help page
pub fn reference_request() -> serde_json::Value {
    serde_json::json!({
        "player_pti": 50.0,
        "partner_pti": 40.0,
        "opp1_pti": 30.0,
        "opp2_pti": 20.0,
        "player_exp": "30+",
        "partner_exp": "30+",
        "opp1_exp": "30+",
        "opp2_exp": "30+",
        "match_score": "6-4,6-4"
    })
}
