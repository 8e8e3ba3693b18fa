//! PTI rating adjustment
//!
//! This module provides the adjustment calculation, the experience tier
//! table and the match score parser it relies on.

pub mod calculator;
pub mod experience;
pub mod score;

// Re-export commonly used types
pub use calculator::{compute_adjustment, AdjustmentCalculator, AdjustmentResult, PtiCalculator};
pub use experience::ExperienceTier;
pub use score::{parse_match_score, GameCount, MatchOutcome, SetScore};
