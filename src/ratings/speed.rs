use crate::config::SpeedConfig;
use crate::era::{Era, SPRINT_SPEED_FIRST_YEAR};
use crate::error::SdResult;
use crate::stats::StatLine;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, EnumString, Display, Serialize, Deserialize)]
pub enum SpeedLetter {
    A,
    B,
    C,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedRating {
    pub speed: u8,
    pub letter: SpeedLetter,
}

/// Everything the converter reads from a stat line.
#[derive(Debug, Clone, Copy)]
pub struct SpeedInputs {
    /// Stolen bases per 400 PA.
    pub stolen_bases: f64,
    pub sprint_speed: Option<f64>,
    pub games: f64,
    pub era: Era,
}

impl SpeedInputs {
    pub fn from_stats(stats: &StatLine, stolen_bases: f64, era: Era) -> Self {
        let sprint_speed = if sprint_speed_usable(stats) {
            stats.sprint_speed
        } else {
            if stats.sprint_speed.is_some() {
                warn!(
                    "{}: sprint speed ignored, record predates enough Statcast seasons",
                    stats.name
                );
            }
            None
        };
        let games = if stats.games > 0.0 {
            stats.games
        } else {
            stats.positions.iter().map(|p| p.games).sum()
        };
        Self {
            stolen_bases,
            sprint_speed,
            games,
            era,
        }
    }
}

/// Sprint speed only counts when at least half the record is in the Statcast era.
pub fn sprint_speed_usable(stats: &StatLine) -> bool {
    if stats.is_multi_year() {
        stats.sprint_era_share() >= 0.5
    } else {
        stats.year >= SPRINT_SPEED_FIRST_YEAR
    }
}

pub fn letter_for(speed: f64, config: &SpeedConfig) -> SpeedLetter {
    if speed >= config.a_breakpoint {
        SpeedLetter::A
    } else if speed >= config.b_breakpoint {
        SpeedLetter::B
    } else {
        SpeedLetter::C
    }
}

pub fn speed_rating(inputs: &SpeedInputs, config: &SpeedConfig) -> SdResult<SpeedRating> {
    let low_games = inputs.games < config.low_games_threshold;
    let band_max = if low_games {
        config.low_games_max_speed.min(config.max_speed)
    } else {
        config.max_speed
    };
    let span = config.max_speed - config.min_speed;

    let sb = inputs.stolen_bases * inputs.era.speed_multiplier();
    let sb_rating = if sb > config.sb_range.max {
        let pct = config.sb_outlier_range.percentile(sb, false)?;
        let rating = config.max_speed + pct * (config.outlier_max_speed - config.max_speed);
        let cap = if low_games { band_max } else { config.outlier_max_speed };
        rating.clamp(config.min_speed, cap)
    } else {
        let pct = config.sb_range.percentile(sb, false)?;
        (config.min_speed + pct * span * config.sb_multiplier).clamp(config.min_speed, band_max)
    };

    let speed = match inputs.sprint_speed {
        Some(ft_per_sec) => {
            let pct = config.sprint_range.percentile(ft_per_sec, false)?;
            let sprint_rating = (config.min_speed + pct * span * config.sprint_multiplier)
                .clamp(config.min_speed, band_max);
            let weight = if sb_rating - sprint_rating >= config.outlier_gap {
                config.outlier_sb_weight
            } else {
                config.sb_weight
            };
            weight * sb_rating + (1.0 - weight) * sprint_rating
        }
        None => sb_rating,
    };

    let rounded = speed.round();
    let letter = letter_for(rounded, config);
    let speed = match config.discrete {
        Some(d) => match letter {
            SpeedLetter::A => d.a,
            SpeedLetter::B => d.b,
            SpeedLetter::C => d.c,
        },
        None => rounded as u8,
    };
    debug!("Speed {} ({}) from {:.1} SB/400", speed, letter, sb);
    Ok(SpeedRating { speed, letter })
}
