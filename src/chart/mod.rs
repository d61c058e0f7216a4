pub mod accuracy;
pub mod builder;
pub mod search;

pub use self::builder::ChartBuilder;
pub use self::search::{forced_chart, ChartSearch};

use crate::error::{SdResult, ShowdownError};
use crate::stats::PlayerSubtype;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumIter, EnumString};

/// Slots on every chart, one per face of the d20.
pub const CHART_SLOTS: u8 = 20;

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
pub enum ChartCategory {
    #[strum(serialize = "PU")]
    #[serde(rename = "PU")]
    Pu,
    #[strum(serialize = "SO")]
    #[serde(rename = "SO")]
    So,
    #[strum(serialize = "GB")]
    #[serde(rename = "GB")]
    Gb,
    #[strum(serialize = "FB")]
    #[serde(rename = "FB")]
    Fb,
    #[strum(serialize = "BB")]
    #[serde(rename = "BB")]
    Bb,
    #[strum(serialize = "1B")]
    #[serde(rename = "1B")]
    Single,
    #[strum(serialize = "1B+")]
    #[serde(rename = "1B+")]
    SinglePlus,
    #[strum(serialize = "2B")]
    #[serde(rename = "2B")]
    Double,
    #[strum(serialize = "3B")]
    #[serde(rename = "3B")]
    Triple,
    #[strum(serialize = "HR")]
    #[serde(rename = "HR")]
    HomeRun,
}

impl ChartCategory {
    pub fn is_out(&self) -> bool {
        matches!(self, Self::Pu | Self::So | Self::Gb | Self::Fb)
    }

    pub fn is_hit(&self) -> bool {
        !self.is_out() && *self != Self::Bb
    }

    pub fn bases(&self) -> f64 {
        match self {
            Self::Single | Self::SinglePlus => 1.0,
            Self::Double => 2.0,
            Self::Triple => 3.0,
            Self::HomeRun => 4.0,
            _ => 0.0,
        }
    }
}

/// Which side of the matchup a chart belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Hitter,
    Pitcher,
}

const HITTER_CATEGORIES: [ChartCategory; 9] = [
    ChartCategory::So,
    ChartCategory::Gb,
    ChartCategory::Fb,
    ChartCategory::Bb,
    ChartCategory::Single,
    ChartCategory::SinglePlus,
    ChartCategory::Double,
    ChartCategory::Triple,
    ChartCategory::HomeRun,
];

const PITCHER_CATEGORIES: [ChartCategory; 8] = [
    ChartCategory::Pu,
    ChartCategory::So,
    ChartCategory::Gb,
    ChartCategory::Fb,
    ChartCategory::Bb,
    ChartCategory::Single,
    ChartCategory::Double,
    ChartCategory::HomeRun,
];

impl ChartKind {
    pub fn for_subtype(subtype: PlayerSubtype) -> Self {
        if subtype.is_pitcher() {
            Self::Pitcher
        } else {
            Self::Hitter
        }
    }

    /// Categories printed on this kind of chart, in dice order.
    pub fn categories(&self) -> &'static [ChartCategory] {
        match self {
            Self::Hitter => &HITTER_CATEGORIES,
            Self::Pitcher => &PITCHER_CATEGORIES,
        }
    }

    /// Category an outcome is recorded under on this kind of chart.
    pub fn fold(&self, category: ChartCategory) -> ChartCategory {
        match (self, category) {
            (Self::Hitter, ChartCategory::Pu) => ChartCategory::Fb,
            (Self::Pitcher, ChartCategory::SinglePlus) => ChartCategory::Single,
            (Self::Pitcher, ChartCategory::Triple) => ChartCategory::Double,
            (_, c) => c,
        }
    }

    /// Probability that this chart, rather than the opponent's, is used.
    pub fn advantage(&self, command: f64, opponent_command: f64) -> f64 {
        let slots = CHART_SLOTS as f64;
        let raw = match self {
            Self::Hitter => command - opponent_command,
            Self::Pitcher => slots - (opponent_command - command),
        };
        raw.clamp(0.0, slots) / slots
    }
}

/// League-average chart on the other side of the matchup. Slots may be
/// fractional since it represents an average over many real cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentChart {
    pub command: f64,
    #[serde(default)]
    pub pu: f64,
    pub so: f64,
    pub gb: f64,
    pub fb: f64,
    pub bb: f64,
    pub single: f64,
    #[serde(default)]
    pub single_plus: f64,
    pub double: f64,
    #[serde(default)]
    pub triple: f64,
    pub home_run: f64,
}

impl OpponentChart {
    pub fn slot(&self, category: ChartCategory) -> f64 {
        match category {
            ChartCategory::Pu => self.pu,
            ChartCategory::So => self.so,
            ChartCategory::Gb => self.gb,
            ChartCategory::Fb => self.fb,
            ChartCategory::Bb => self.bb,
            ChartCategory::Single => self.single,
            ChartCategory::SinglePlus => self.single_plus,
            ChartCategory::Double => self.double,
            ChartCategory::Triple => self.triple,
            ChartCategory::HomeRun => self.home_run,
        }
    }

    pub fn total(&self) -> f64 {
        use strum::IntoEnumIterator;
        ChartCategory::iter().map(|c| self.slot(c)).sum()
    }

    pub fn validate(&self) -> SdResult<()> {
        use strum::IntoEnumIterator;
        if let Some(cat) = ChartCategory::iter().find(|&c| self.slot(c) < 0.0) {
            return Err(ShowdownError::Config(format!(
                "Opponent chart has negative {} slots",
                cat
            )));
        }
        let total = self.total();
        if (total - CHART_SLOTS as f64).abs() > 1e-6 {
            return Err(ShowdownError::Config(format!(
                "Opponent chart slots sum to {}, expected {}",
                total, CHART_SLOTS
            )));
        }
        Ok(())
    }
}

/// In-game rate line implied by a chart against the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectedStats {
    pub obp: f64,
    pub avg: f64,
    pub slg: f64,
    pub hr_rate: f64,
    /// Home runs over a 650 PA season.
    pub hr_per_650: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub command: u8,
    pub outs: u8,
    /// Continuous out count that would reproduce the real OBP exactly.
    pub out_target: f64,
    pub slots: BTreeMap<ChartCategory, u8>,
    pub accuracy: f64,
    /// Simulated minus real OBP. Positive means the chart reaches base too often.
    pub obp_bias: f64,
    pub projected: ProjectedStats,
}

impl Chart {
    pub fn slot(&self, category: ChartCategory) -> u8 {
        self.slots.get(&category).copied().unwrap_or(0)
    }

    pub fn total_slots(&self) -> u32 {
        self.slots.values().map(|&s| s as u32).sum()
    }

    pub fn key(&self) -> (u8, u8) {
        (self.command, self.outs)
    }

    /// Share of out slots that are popups or strikeouts.
    pub fn out_distribution(&self) -> f64 {
        if self.outs == 0 {
            return 0.0;
        }
        let weak = self.slot(ChartCategory::Pu) + self.slot(ChartCategory::So);
        weak as f64 / self.outs as f64
    }

    /// Dice ranges in printed order, e.g. `("SO", "1-3")`. Empty categories are skipped.
    pub fn ranges(&self) -> Vec<(ChartCategory, String)> {
        let mut next = 1u32;
        let mut out = Vec::new();
        for &cat in self.kind.categories() {
            let n = self.slot(cat) as u32;
            if n == 0 {
                continue;
            }
            let end = next + n - 1;
            let label = if n == 1 {
                format!("{}", next)
            } else if cat == ChartCategory::HomeRun && end == CHART_SLOTS as u32 {
                format!("{}+", next)
            } else {
                format!("{}-{}", next, end)
            };
            out.push((cat, label));
            next = end + 1;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_maps_onto_printed_categories() {
        for kind in [ChartKind::Hitter, ChartKind::Pitcher] {
            use strum::IntoEnumIterator;
            for cat in ChartCategory::iter() {
                assert!(kind.categories().contains(&kind.fold(cat)));
            }
        }
    }

    #[test]
    fn test_advantage_clamps() {
        assert_eq!(ChartKind::Hitter.advantage(3.0, 5.0), 0.0);
        assert_eq!(ChartKind::Hitter.advantage(12.0, 2.0), 0.5);
        assert_eq!(ChartKind::Pitcher.advantage(4.0, 10.0), 0.7);
        assert_eq!(ChartKind::Pitcher.advantage(6.0, 0.0), 1.0);
    }

    #[test]
    fn test_opponent_must_fill_chart() {
        let mut opp = OpponentChart {
            command: 3.0,
            pu: 2.0,
            so: 5.0,
            gb: 6.0,
            fb: 4.0,
            bb: 1.0,
            single: 1.5,
            single_plus: 0.0,
            double: 0.4,
            triple: 0.0,
            home_run: 0.1,
        };
        assert!(opp.validate().is_ok());
        opp.gb = 5.0;
        assert!(matches!(opp.validate(), Err(ShowdownError::Config(_))));
    }
}
