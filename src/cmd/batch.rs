use clap::Args;
use serde::Serialize;
use showdown::api;
use showdown::card::ShowdownCard;
use showdown::config::{PointsTuning, SetConfig};
use showdown::era::Era;
use showdown::error::SdResult;
use std::io;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// JSON array of stat lines.
    #[arg(short, long)]
    pub stats: String,

    /// CSV destination. Defaults to stdout.
    #[arg(short, long)]
    pub output: Option<String>,

    #[command(flatten)]
    pub tuning: PointsTuning,
}

#[derive(Debug, Serialize)]
struct SummaryRow {
    name: String,
    year: u16,
    subtype: String,
    command: Option<u8>,
    outs: Option<u8>,
    accuracy: Option<f64>,
    speed: Option<u8>,
    ip: Option<u8>,
    points: Option<u32>,
    error: Option<String>,
}

impl From<&ShowdownCard> for SummaryRow {
    fn from(card: &ShowdownCard) -> Self {
        Self {
            name: card.name.clone(),
            year: card.year,
            subtype: card.subtype.to_string(),
            command: Some(card.chart.command),
            outs: Some(card.chart.outs),
            accuracy: Some((card.chart.accuracy * 10_000.0).round() / 10_000.0),
            speed: card.speed.map(|s| s.speed),
            ip: card.innings_pitched,
            points: Some(card.points.total),
            error: None,
        }
    }
}

pub fn run(args: BatchArgs, set: &SetConfig, era: Option<Era>) -> SdResult<()> {
    let lines = api::load_stats(&args.stats)?;
    let start = Instant::now();
    let results = api::build_batch(&lines, set, era);
    info!("🔥 Built {} cards in {:.2?}", results.len(), start.elapsed());

    let rows: Vec<SummaryRow> = lines
        .iter()
        .zip(&results)
        .map(|(stats, result)| match result {
            Ok(card) => SummaryRow::from(card),
            Err(e) => {
                warn!("{} ({}): {}", stats.name, stats.year, e);
                SummaryRow {
                    name: stats.name.clone(),
                    year: stats.year,
                    subtype: String::new(),
                    command: None,
                    outs: None,
                    accuracy: None,
                    speed: None,
                    ip: None,
                    points: None,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect();

    match &args.output {
        Some(path) => {
            let mut writer = csv::Writer::from_path(path)?;
            for row in &rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
            info!("💾 Wrote {} rows to {}", rows.len(), path);
        }
        None => {
            let mut writer = csv::Writer::from_writer(io::stdout());
            for row in &rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}
