//! PTI Calculator CLI Tool
//!
//! Runs a single PTI calculation and prints the same JSON body the
//! `/api/calculate-pti` endpoint would return.
//!
//! Usage:
//!   cargo run --bin pti-calc -- --help
//!   cargo run --bin pti-calc -- --player 50 --partner 40 --opp1 30 --opp2 20 --score "6-4,6-4"
//!   cargo run --bin pti-calc -- --player 50 --partner 40 --opp1 30 --opp2 20 \
//!       --player-exp "New Player" --partner-exp 5.5 --score "3-6,6-3,6-2"

use anyhow::Result;
use clap::Parser;
use rally_pti::api::{CalculatePtiRequest, CalculatePtiResponse, ErrorResponse, ExperienceInput};
use rally_pti::config::{AppConfig, RatingSettings};
use rally_pti::rating::{AdjustmentCalculator, PtiCalculator};
use tracing::debug;

#[derive(Parser)]
#[command(name = "pti-calc")]
#[command(about = "Compute a PTI rating adjustment for one doubles match")]
struct Cli {
    /// Player PTI
    #[arg(long, allow_negative_numbers = true)]
    player: f64,
    /// Partner PTI
    #[arg(long, allow_negative_numbers = true)]
    partner: f64,
    /// First opponent PTI
    #[arg(long, allow_negative_numbers = true)]
    opp1: f64,
    /// Second opponent PTI
    #[arg(long, allow_negative_numbers = true)]
    opp2: f64,

    /// Player experience: tier label ("30+", "10-30", "1-10", "New Player") or 1.0-7.0 score
    #[arg(long, default_value = "30+")]
    player_exp: String,
    /// Partner experience
    #[arg(long, default_value = "30+")]
    partner_exp: String,
    /// First opponent experience
    #[arg(long, default_value = "30+")]
    opp1_exp: String,
    /// Second opponent experience
    #[arg(long, default_value = "30+")]
    opp2_exp: String,

    /// Set scores from the player's side, e.g. "6-4,3-6,6-2"
    #[arg(short, long, default_value = "")]
    score: String,

    /// Base K-factor
    #[arg(long)]
    base_k_factor: Option<f64>,

    /// Print compact JSON instead of pretty JSON
    #[arg(long)]
    compact: bool,
}

/// Numbers are slider scores, anything else is a tier label
fn parse_experience(raw: &str) -> ExperienceInput {
    match raw.trim().parse::<f64>() {
        Ok(score) => ExperienceInput::Score(score),
        Err(_) => ExperienceInput::Label(raw.to_string()),
    }
}

fn to_json<T: serde::Serialize>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = AppConfig::from_env()?.rating;
    if let Some(k) = cli.base_k_factor {
        settings = RatingSettings { base_k_factor: k };
    }
    let calculator = PtiCalculator::new(settings)?;

    let request = CalculatePtiRequest {
        player_pti: cli.player,
        partner_pti: cli.partner,
        opp1_pti: cli.opp1,
        opp2_pti: cli.opp2,
        player_exp: parse_experience(&cli.player_exp),
        partner_exp: parse_experience(&cli.partner_exp),
        opp1_exp: parse_experience(&cli.opp1_exp),
        opp2_exp: parse_experience(&cli.opp2_exp),
        match_score: cli.score.clone(),
    };
    debug!("Calculating PTI for {:?}", request);

    let result = calculator.compute_adjustment(&request.to_match_input());

    if let Err(e) = result.ensure_finite() {
        println!("{}", to_json(&ErrorResponse::new(e.to_string()), cli.compact)?);
        std::process::exit(1);
    }

    println!(
        "{}",
        to_json(&CalculatePtiResponse::from_result(&result), cli.compact)?
    );
    Ok(())
}
