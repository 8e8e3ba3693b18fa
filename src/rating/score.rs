//! Match score parsing
//!
//! Scores arrive as comma separated "home-away" set scores from team A's
//! perspective. The match goes to whichever side won more sets. Set scores
//! are taken at face value; nothing checks that a set is a complete tennis
//! or paddle set.

use crate::error::PtiError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Games won by one side in a set
///
/// Kept as a normalized digit string so that any size of integer compares
/// correctly; overflow never turns a readable score into a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GameCount(String);

impl GameCount {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for GameCount {
    type Err = PtiError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PtiError::InvalidRequest {
                reason: format!("'{}' is not a game count", trimmed),
            });
        }

        let significant = digits.trim_start_matches('0');
        let normalized = if significant.is_empty() { "0" } else { significant };
        Ok(Self(normalized.to_string()))
    }
}

impl TryFrom<String> for GameCount {
    type Error = PtiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GameCount> for String {
    fn from(count: GameCount) -> Self {
        count.0
    }
}

impl From<u64> for GameCount {
    fn from(count: u64) -> Self {
        Self(count.to_string())
    }
}

impl Ord for GameCount {
    fn cmp(&self, other: &Self) -> Ordering {
        // No leading zeros, so more digits means a bigger number
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for GameCount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for GameCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Games won by each side in one set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub team_a: GameCount,
    pub team_b: GameCount,
}

impl SetScore {
    pub fn parse(raw: &str) -> Result<Self, PtiError> {
        let invalid = || PtiError::InvalidRequest {
            reason: format!("Invalid set score '{}'", raw.trim()),
        };

        let mut parts = raw.split('-');
        let (Some(home), Some(away), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };

        let team_a = home.parse::<GameCount>().map_err(|_| invalid())?;
        let team_b = away.parse::<GameCount>().map_err(|_| invalid())?;

        Ok(Self { team_a, team_b })
    }
}

/// Outcome of parsing a full match score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Whether team A (player and partner) won the match
    pub team_a_won: bool,
    pub team_a_sets: u32,
    pub team_b_sets: u32,
    /// True when the score could not be parsed and team A was assumed to win
    pub fell_back: bool,
}

impl MatchOutcome {
    /// Outcome used when the score is unreadable
    pub fn fallback() -> Self {
        Self {
            team_a_won: true,
            team_a_sets: 0,
            team_b_sets: 0,
            fell_back: true,
        }
    }

    /// 1.0 for a team A win, 0.0 otherwise
    pub fn actual_result(&self) -> f64 {
        if self.team_a_won {
            1.0
        } else {
            0.0
        }
    }
}

/// Parse every set of a score string, failing on the first bad set
pub fn parse_sets(score: &str) -> Result<Vec<SetScore>, PtiError> {
    if score.trim().is_empty() {
        return Err(PtiError::InvalidRequest {
            reason: "Match score is empty".to_string(),
        });
    }

    score.split(',').map(SetScore::parse).collect()
}

/// Strict variant of [`parse_match_score`]: a majority decided from the sets, or an error
pub fn try_parse_match_score(score: &str) -> Result<MatchOutcome, PtiError> {
    let sets = parse_sets(score)?;

    let team_a_sets = sets.iter().filter(|s| s.team_a > s.team_b).count() as u32;
    let team_b_sets = sets.iter().filter(|s| s.team_b > s.team_a).count() as u32;

    Ok(MatchOutcome {
        team_a_won: team_a_sets > team_b_sets,
        team_a_sets,
        team_b_sets,
        fell_back: false,
    })
}

/// Decide the match winner. An unreadable score never fails the calculation;
/// team A is assumed to have won and the outcome is flagged.
pub fn parse_match_score(score: &str) -> MatchOutcome {
    match try_parse_match_score(score) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("Falling back to a team A win: {}", e);
            MatchOutcome::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_set_win() {
        let outcome = parse_match_score("6-4,3-6,6-2");
        assert!(outcome.team_a_won);
        assert_eq!(outcome.team_a_sets, 2);
        assert_eq!(outcome.team_b_sets, 1);
        assert!(!outcome.fell_back);
        assert_eq!(outcome.actual_result(), 1.0);
    }

    #[test]
    fn test_straight_sets_loss() {
        let outcome = parse_match_score("4-6, 2-6");
        assert!(!outcome.team_a_won);
        assert_eq!(outcome.team_b_sets, 2);
        assert_eq!(outcome.actual_result(), 0.0);
    }

    #[test]
    fn test_sets_taken_at_face_value() {
        // 7-6 and 1-6 are not checked for being legal set scores
        let outcome = parse_match_score("7-6,1-6,10-8");
        assert!(outcome.team_a_won);
        assert_eq!(outcome.team_a_sets, 2);
    }

    #[test]
    fn test_split_sets_is_not_a_win() {
        let outcome = parse_match_score("6-4,4-6");
        assert!(!outcome.team_a_won);
        assert!(!outcome.fell_back);

        // Drawn set counts for nobody
        let outcome = parse_match_score("6-6");
        assert!(!outcome.team_a_won);
        assert_eq!(outcome.team_a_sets, 0);
        assert_eq!(outcome.team_b_sets, 0);
    }

    #[test]
    fn test_malformed_scores_fall_back_to_win() {
        for score in ["", "   ", "abc", "6-4,", "6-4-2", "6:4", "-1-6", "6-x", "6-4,,6-3"] {
            let outcome = parse_match_score(score);
            assert!(outcome.team_a_won, "score '{}' should fall back", score);
            assert!(outcome.fell_back, "score '{}' should be flagged", score);
        }
    }

    #[test]
    fn test_strict_parse_reports_error() {
        assert!(try_parse_match_score("6-4,nope").is_err());
        assert!(try_parse_match_score("").is_err());
        assert!(try_parse_match_score("6-4").is_ok());
    }

    #[test]
    fn test_set_score_parse() {
        assert_eq!(
            SetScore::parse(" 7 - 5 ").unwrap(),
            SetScore {
                team_a: GameCount::from(7),
                team_b: GameCount::from(5)
            }
        );
        assert!(SetScore::parse("7").is_err());
    }

    #[test]
    fn test_large_game_counts_are_read() {
        let outcome = parse_match_score("1-99999999999");
        assert!(!outcome.team_a_won);
        assert!(!outcome.fell_back);
        assert_eq!(outcome.team_b_sets, 1);

        // Past every fixed-width integer
        let outcome = parse_match_score("340282366920938463463374607431768211456-1,1-4294967296");
        assert!(!outcome.team_a_won);
        assert_eq!(outcome.team_a_sets, 1);
        assert_eq!(outcome.team_b_sets, 1);
        assert!(!outcome.fell_back);
    }

    #[test]
    fn test_game_count_ordering() {
        let parse = |raw: &str| raw.parse::<GameCount>().unwrap();

        assert_eq!(parse("007"), GameCount::from(7));
        assert_eq!(parse("0").as_str(), "0");
        assert!(parse("10") > parse("9"));
        assert!(parse("4294967296") > parse("4294967295"));
        assert!("x".parse::<GameCount>().is_err());
        assert!(" ".parse::<GameCount>().is_err());
    }
}
