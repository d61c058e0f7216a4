use crate::config::{DefenseConfig, FirstBaseCutoffs, MetricScale};
use crate::error::SdResult;
use crate::stats::{Position, PositionStats, StatLine};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

/// Real-world fielding metrics, declared in priority order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DefenseMetric {
    /// Outs Above Average
    Oaa,
    /// Defensive Runs Saved
    Drs,
    /// Total Zone Rating
    Tzr,
    /// Defensive WAR
    Dwar,
}

impl DefenseMetric {
    /// First season the metric is published for.
    pub fn first_year(&self) -> u16 {
        match self {
            Self::Oaa => 2016,
            Self::Drs => 2003,
            Self::Tzr => 1953,
            Self::Dwar => 0,
        }
    }

    pub fn value(&self, stats: &PositionStats) -> Option<f64> {
        match self {
            Self::Oaa => stats.oaa,
            Self::Drs => stats.drs,
            Self::Tzr => stats.tzr,
            Self::Dwar => stats.dwar,
        }
    }

    /// Highest-priority metric present on the record and published for `year`.
    pub fn select(stats: &PositionStats, year: u16) -> Option<(Self, f64)> {
        Self::iter()
            .filter(|m| year >= m.first_year())
            .find_map(|m| m.value(stats).map(|v| (m, v)))
    }
}

/// Pulls values beyond `±ceiling` back toward it by the outlier multiplier.
pub fn dampen(value: f64, scale: &MetricScale) -> f64 {
    let c = scale.ceiling.abs();
    if value > c {
        c + (value - c) * scale.outlier_multiplier
    } else if value < -c {
        -c + (value + c) * scale.outlier_multiplier
    } else {
        value
    }
}

/// Fixed-games value after small-sample shrinkage.
pub fn normalized_value(value: f64, games: f64, config: &DefenseConfig) -> f64 {
    if games <= 0.0 {
        return 0.0;
    }
    let per_basis = value * config.normalize_games / games;
    let shrink = (games / config.full_sample_games).min(1.0);
    per_basis * shrink
}

fn first_base_rating(value: f64, cutoffs: &FirstBaseCutoffs) -> i8 {
    if value >= cutoffs.plus {
        1
    } else if value <= cutoffs.minus {
        -1
    } else {
        0
    }
}

/// In-game rating for one position. Missing metrics rate 0.
pub fn defense_rating(
    stats: &PositionStats,
    year: u16,
    max_rating: i8,
    config: &DefenseConfig,
) -> SdResult<i8> {
    let Some((metric, raw)) = DefenseMetric::select(stats, year) else {
        return Ok(0);
    };
    let Some(table) = config.metrics.get(&metric) else {
        return Ok(0);
    };

    let floor = config.rating_floor.min(max_rating);
    let value = normalized_value(raw, stats.games, config);

    let rating = if stats.position == Position::FirstBase {
        first_base_rating(value, &table.first_base)
    } else {
        let scale = table.scale_for(stats.position);
        let pct = scale.range.percentile(dampen(value, scale), true)?;
        (pct * max_rating as f64).round() as i8
    };

    debug!(
        "{} rated {} from {} {:.1} over {} games",
        stats.position, rating, metric, value, stats.games
    );
    Ok(rating.clamp(floor, max_rating))
}

/// Ratings for every rated position the player is eligible at. A position
/// needs `min_position_games` unless it is the one with the most games.
pub fn defense_ratings(stats: &StatLine, config: &DefenseConfig) -> SdResult<BTreeMap<Position, i8>> {
    let primary_games = stats
        .positions
        .iter()
        .filter(|p| p.position.is_rated())
        .map(|p| stats.position_games(p.position))
        .fold(0.0, f64::max);

    let mut ratings = BTreeMap::new();
    for pos_stats in &stats.positions {
        let position = pos_stats.position;
        if !position.is_rated() || pos_stats.games <= 0.0 {
            continue;
        }
        let games = stats.position_games(position);
        if games < config.min_position_games && games < primary_games {
            debug!("{} skipped with {} games", position, games);
            continue;
        }
        let Some(&max_rating) = config.max_ratings.get(&position) else {
            continue;
        };
        let rating = defense_rating(pos_stats, stats.year, max_rating, config)?;
        ratings
            .entry(position)
            .and_modify(|r: &mut i8| *r = (*r).max(rating))
            .or_insert(rating);
    }
    Ok(ratings)
}
