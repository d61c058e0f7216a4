pub mod projection;

pub use self::projection::{RateProjection, PA_BASELINE};

use crate::era::SPRINT_SPEED_FIRST_YEAR;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use typed_builder::TypedBuilder;

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
pub enum Position {
    #[strum(serialize = "C")]
    #[serde(rename = "C")]
    Catcher,
    #[strum(serialize = "1B")]
    #[serde(rename = "1B")]
    FirstBase,
    #[strum(serialize = "2B")]
    #[serde(rename = "2B")]
    SecondBase,
    #[strum(serialize = "3B")]
    #[serde(rename = "3B")]
    ThirdBase,
    #[strum(serialize = "SS")]
    #[serde(rename = "SS")]
    Shortstop,
    #[strum(serialize = "LF")]
    #[serde(rename = "LF")]
    LeftField,
    #[strum(serialize = "CF")]
    #[serde(rename = "CF")]
    CenterField,
    #[strum(serialize = "RF")]
    #[serde(rename = "RF")]
    RightField,
    /// Combined outfield games when the source does not split LF/CF/RF.
    #[strum(serialize = "OF")]
    #[serde(rename = "OF")]
    Outfield,
    #[strum(serialize = "DH")]
    #[serde(rename = "DH")]
    DesignatedHitter,
    #[strum(serialize = "P")]
    #[serde(rename = "P")]
    Pitcher,
}

impl Position {
    /// Positions that carry an in-game fielding rating.
    pub fn is_rated(&self) -> bool {
        !matches!(self, Self::DesignatedHitter | Self::Pitcher)
    }
}

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
pub enum Icon {
    #[strum(serialize = "V")]
    #[serde(rename = "V")]
    Mvp,
    #[strum(serialize = "S")]
    #[serde(rename = "S")]
    SilverSlugger,
    #[strum(serialize = "G")]
    #[serde(rename = "G")]
    GoldGlove,
    #[strum(serialize = "HR")]
    #[serde(rename = "HR")]
    HomeRunLeader,
    #[strum(serialize = "SB")]
    #[serde(rename = "SB")]
    StolenBaseLeader,
    #[strum(serialize = "K")]
    #[serde(rename = "K")]
    StrikeoutLeader,
    #[strum(serialize = "20")]
    #[serde(rename = "20")]
    TwentyWins,
    #[strum(serialize = "CY")]
    #[serde(rename = "CY")]
    CyYoung,
    #[strum(serialize = "R")]
    #[serde(rename = "R")]
    Rookie,
    #[strum(serialize = "RY")]
    #[serde(rename = "RY")]
    RookieOfTheYear,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PlayerSubtype {
    PositionPlayer,
    StartingPitcher,
    ReliefPitcher,
}

impl PlayerSubtype {
    pub fn is_pitcher(&self) -> bool {
        !matches!(self, Self::PositionPlayer)
    }
}

/// Games and fielding metrics at one position. Metrics are season totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
pub struct PositionStats {
    pub position: Position,
    #[builder(default)]
    #[serde(default)]
    pub games: f64,
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub oaa: Option<f64>,
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub drs: Option<f64>,
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub tzr: Option<f64>,
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub dwar: Option<f64>,
}

/// One player-season or a pre-aggregated multi-season record.
///
/// For pitchers the batting fields hold the values allowed. Innings are in
/// decimal form (200.1 in box-score notation is 200.333).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TypedBuilder)]
#[serde(default)]
pub struct StatLine {
    #[builder(default, setter(into))]
    pub name: String,
    #[builder(default)]
    pub year: u16,
    #[builder(default, setter(strip_option))]
    pub last_year: Option<u16>,

    #[builder(default)]
    pub pa: f64,
    #[builder(default)]
    pub hits: f64,
    #[builder(default)]
    pub doubles: f64,
    #[builder(default)]
    pub triples: f64,
    #[builder(default)]
    pub home_runs: f64,
    #[builder(default)]
    pub walks: f64,
    #[builder(default)]
    pub hit_by_pitch: f64,
    #[builder(default)]
    pub strikeouts: f64,

    // Batted-ball outs. `fly_outs` counts every air out, popups included.
    #[builder(default, setter(strip_option))]
    pub ground_outs: Option<f64>,
    #[builder(default, setter(strip_option))]
    pub fly_outs: Option<f64>,
    #[builder(default, setter(strip_option))]
    pub popups: Option<f64>,

    #[builder(default)]
    pub stolen_bases: f64,
    #[builder(default, setter(strip_option))]
    pub sprint_speed: Option<f64>,

    #[builder(default)]
    pub games: f64,
    #[builder(default)]
    pub games_started: f64,
    #[builder(default)]
    pub innings_pitched: f64,

    #[builder(default)]
    pub positions: Vec<PositionStats>,
    #[builder(default)]
    pub icons: Vec<Icon>,
}

impl StatLine {
    pub fn singles(&self) -> f64 {
        (self.hits - self.doubles - self.triples - self.home_runs).max(0.0)
    }

    pub fn at_bats(&self) -> f64 {
        (self.pa - self.walks - self.hit_by_pitch).max(0.0)
    }

    pub fn total_bases(&self) -> f64 {
        self.singles() + 2.0 * self.doubles + 3.0 * self.triples + 4.0 * self.home_runs
    }

    pub fn obp(&self) -> f64 {
        ratio(self.hits + self.walks + self.hit_by_pitch, self.pa)
    }

    pub fn batting_avg(&self) -> f64 {
        ratio(self.hits, self.at_bats())
    }

    pub fn slugging(&self) -> f64 {
        ratio(self.total_bases(), self.at_bats())
    }

    pub fn final_year(&self) -> u16 {
        self.last_year.unwrap_or(self.year).max(self.year)
    }

    pub fn is_multi_year(&self) -> bool {
        self.final_year() > self.year
    }

    /// Share of the record's seasons that have Statcast sprint speed.
    pub fn sprint_era_share(&self) -> f64 {
        let first = self.year;
        let last = self.final_year();
        let seasons = (last as u32 - first as u32 + 1) as f64;
        let covered = (first.max(SPRINT_SPEED_FIRST_YEAR)..=last).count() as f64;
        covered / seasons
    }

    pub fn position_games(&self, position: Position) -> f64 {
        self.positions
            .iter()
            .filter(|p| p.position == position)
            .map(|p| p.games)
            .sum()
    }
}

fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}
