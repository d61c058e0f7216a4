use crate::card::{CardBuildParams, ChartOverrides, ShowdownCard};
use crate::chart::{Chart, ChartKind, ChartSearch};
use crate::config::SetConfig;
use crate::era::Era;
use crate::error::SdResult;
use crate::ratings::classify;
use crate::stats::{RateProjection, StatLine};
use rayon::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Deserialize)]
#[serde(untagged)]
enum StatsFile {
    Many(Vec<StatLine>),
    One(StatLine),
}

/// Reads a JSON file holding either one stat line or an array of them.
pub fn load_stats<P: AsRef<Path>>(path: P) -> SdResult<Vec<StatLine>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let lines = match serde_json::from_str(&content)? {
        StatsFile::Many(lines) => lines,
        StatsFile::One(line) => vec![line],
    };
    info!("📂 Loaded {} stat line(s) from {:?}", lines.len(), path);
    Ok(lines)
}

/// Service: build one card.
pub fn build_card(
    stats: &StatLine,
    set: &SetConfig,
    era: Option<Era>,
    overrides: ChartOverrides,
) -> SdResult<ShowdownCard> {
    CardBuildParams::builder()
        .stats(stats)
        .set(set)
        .era(era)
        .overrides(overrides)
        .build()
        .build_card()
}

/// Service: build every card independently in parallel. Results keep input order.
pub fn build_batch(
    lines: &[StatLine],
    set: &SetConfig,
    era: Option<Era>,
) -> Vec<SdResult<ShowdownCard>> {
    lines
        .par_iter()
        .map(|stats| build_card(stats, set, era, ChartOverrides::default()))
        .collect()
}

/// Service: every candidate chart for a player, best first.
pub fn ranked_charts(
    stats: &StatLine,
    set: &SetConfig,
    excluded_commands: &[u8],
) -> SdResult<Vec<Chart>> {
    let projection = RateProjection::from_stats(stats)?;
    let kind = ChartKind::for_subtype(classify(stats, &set.stamina));
    ChartSearch::new(kind, set.chart.for_kind(kind), &projection, excluded_commands)?.rank()
}
