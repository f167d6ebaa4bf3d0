//! Scores a CSV of leads against an offer file without starting the server.
//!
//! Usage: `score_csv <offer.json> <leads.csv>`

use anyhow::Context;
use lead_scoring_api::api::upload::parse_leads;
use lead_scoring_api::config::Config;
use lead_scoring_api::core::models::{IntentCounts, Offer};
use lead_scoring_api::core::pipeline::ScoringPipeline;
use std::env;
use std::fs::File;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let (Some(offer_path), Some(leads_path)) = (args.next(), args.next()) else {
        anyhow::bail!("Usage: score_csv <offer.json> <leads.csv>");
    };

    let config = Config::from_env()?;
    let pipeline = ScoringPipeline::from_config(&config)?;

    let offer: Offer = serde_json::from_reader(
        File::open(&offer_path).with_context(|| format!("Failed to open {}", offer_path))?,
    )
    .with_context(|| format!("Invalid offer JSON in {}", offer_path))?;

    let leads = parse_leads(
        File::open(&leads_path).with_context(|| format!("Failed to open {}", leads_path))?,
    )?;
    tracing::info!("Loaded {} leads from {}", leads.len(), leads_path);

    let scores = pipeline.run(&leads, Some(&offer)).await?;
    let counts = IntentCounts::tally(&scores);
    tracing::info!(
        "Scored {} leads: {} high, {} medium, {} low",
        scores.len(),
        counts.high,
        counts.medium,
        counts.low
    );

    println!("{}", serde_json::to_string_pretty(&scores)?);

    Ok(())
}
