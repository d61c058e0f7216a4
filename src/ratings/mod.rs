pub mod defense;
pub mod speed;
pub mod stamina;

pub use self::defense::{defense_rating, defense_ratings, DefenseMetric};
pub use self::speed::{speed_rating, SpeedInputs, SpeedLetter, SpeedRating};
pub use self::stamina::{classify, ip_rating};

use crate::config::SetConfig;
use crate::era::Era;
use crate::error::SdResult;
use crate::stats::{PlayerSubtype, Position, StatLine};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Categorical ratings printed next to the chart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ratings {
    pub defense: BTreeMap<Position, i8>,
    /// Pitcher cards carry no speed.
    pub speed: Option<SpeedRating>,
    /// Innings rating, pitchers only.
    pub innings_pitched: Option<u8>,
}

impl Ratings {
    /// `stolen_bases` is per 400 PA, as produced by the rate projection.
    pub fn from_stats(
        stats: &StatLine,
        subtype: PlayerSubtype,
        stolen_bases: f64,
        era: Era,
        set: &SetConfig,
    ) -> SdResult<Self> {
        if subtype.is_pitcher() {
            return Ok(Self {
                defense: BTreeMap::new(),
                speed: None,
                innings_pitched: ip_rating(stats, subtype, &set.stamina),
            });
        }

        let defense = defense_ratings(stats, &set.defense)?;
        let inputs = SpeedInputs::from_stats(stats, stolen_bases, era);
        let speed = speed_rating(&inputs, &set.speed)?;
        Ok(Self {
            defense,
            speed: Some(speed),
            innings_pitched: None,
        })
    }
}
