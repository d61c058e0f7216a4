pub mod corrections;
pub mod engine;

pub use self::corrections::{apply_all, Correction, Decay, MultiPosition, Stamina};
pub use self::engine::{round_points, PointsEngine, PointsInputs};

use crate::config::WeightedRange;
use crate::error::SdResult;
use crate::stats::{Icon, Position};
use crate::value_range::ValueRange;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every scored category. Corrections dispatch on this exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointsMetric {
    Command,
    OnBase,
    BattingAvg,
    Slugging,
    HomeRuns,
    Speed,
    InningsPitched,
    OutDistribution,
    Defense(Position),
    Icon(Icon),
}

impl PointsMetric {
    /// Categories that absorb decay.
    pub fn is_decay_eligible(&self) -> bool {
        matches!(
            self,
            Self::OnBase | Self::BattingAvg | Self::Slugging | Self::HomeRuns
        )
    }

    pub fn is_stamina_exempt(&self) -> bool {
        matches!(self, Self::OutDistribution)
    }

    pub fn is_defense(&self) -> bool {
        matches!(self, Self::Defense(_))
    }
}

impl fmt::Display for PointsMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command => write!(f, "Command"),
            Self::OnBase => write!(f, "OBP"),
            Self::BattingAvg => write!(f, "AVG"),
            Self::Slugging => write!(f, "SLG"),
            Self::HomeRuns => write!(f, "HR/650"),
            Self::Speed => write!(f, "Speed"),
            Self::InningsPitched => write!(f, "IP"),
            Self::OutDistribution => write!(f, "PU+SO share"),
            Self::Defense(pos) => write!(f, "Defense {}", pos),
            Self::Icon(icon) => write!(f, "Icon {}", icon),
        }
    }
}

/// One line of the points ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsBreakdown {
    pub metric: PointsMetric,
    pub value: f64,
    /// `None` for flat bonuses such as icons.
    pub range: Option<ValueRange>,
    pub percentile: f64,
    pub weight: f64,
    pub base_points: f64,
    /// Net change applied by corrections.
    pub adjustment: f64,
    pub points: f64,
}

impl PointsBreakdown {
    pub fn scored(
        metric: PointsMetric,
        value: f64,
        weighted: &WeightedRange,
        allow_negative: bool,
    ) -> SdResult<Self> {
        let percentile = weighted.range.percentile(value, allow_negative)?;
        let points = percentile * weighted.weight;
        Ok(Self {
            metric,
            value,
            range: Some(weighted.range),
            percentile,
            weight: weighted.weight,
            base_points: points,
            adjustment: 0.0,
            points,
        })
    }

    pub fn flat(metric: PointsMetric, points: f64) -> Self {
        Self {
            metric,
            value: 1.0,
            range: None,
            percentile: 1.0,
            weight: points,
            base_points: points,
            adjustment: 0.0,
            points,
        }
    }

    pub fn adjust(&mut self, delta: f64) {
        self.adjustment += delta;
        self.points += delta;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayRecord {
    pub threshold: f64,
    pub rate: f64,
    pub total_before: f64,
    pub removed: f64,
}

/// Breakdowns plus correction metadata, threaded through each correction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointsLedger {
    pub breakdowns: Vec<PointsBreakdown>,
    pub decay: Vec<DecayRecord>,
    pub stamina_multiplier: Option<f64>,
}

impl PointsLedger {
    pub fn new(breakdowns: Vec<PointsBreakdown>) -> Self {
        Self {
            breakdowns,
            ..Default::default()
        }
    }

    pub fn total(&self) -> f64 {
        self.breakdowns.iter().map(|b| b.points).sum()
    }

    pub fn get(&self, metric: PointsMetric) -> Option<&PointsBreakdown> {
        self.breakdowns.iter().find(|b| b.metric == metric)
    }
}

/// Final valuation of a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Points {
    pub total: u32,
    pub raw_total: f64,
    pub breakdowns: Vec<PointsBreakdown>,
    pub decay: Vec<DecayRecord>,
    pub stamina_multiplier: Option<f64>,
}

impl Points {
    pub fn from_ledger(ledger: PointsLedger, min_points: u32) -> Self {
        let raw_total = ledger.total();
        Self {
            total: round_points(raw_total, min_points),
            raw_total,
            breakdowns: ledger.breakdowns,
            decay: ledger.decay,
            stamina_multiplier: ledger.stamina_multiplier,
        }
    }

    pub fn get(&self, metric: PointsMetric) -> Option<&PointsBreakdown> {
        self.breakdowns.iter().find(|b| b.metric == metric)
    }
}
