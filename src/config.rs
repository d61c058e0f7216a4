mod defaults;

use crate::chart::{ChartKind, OpponentChart, CHART_SLOTS};
use crate::error::{SdResult, ShowdownError};
use crate::ratings::defense::DefenseMetric;
use crate::stats::{Icon, PlayerSubtype, Position};
use crate::value_range::ValueRange;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Edition {
    #[strum(serialize = "2000")]
    #[serde(rename = "2000")]
    Set2000,
    #[strum(serialize = "2001")]
    #[serde(rename = "2001")]
    Set2001,
    #[strum(serialize = "2002")]
    #[serde(rename = "2002")]
    Set2002,
    #[strum(serialize = "2003")]
    #[serde(rename = "2003")]
    Set2003,
    #[strum(serialize = "2004")]
    #[serde(rename = "2004")]
    Set2004,
    #[strum(serialize = "2005")]
    #[serde(rename = "2005")]
    Set2005,
    #[strum(serialize = "classic")]
    #[serde(rename = "classic")]
    Classic,
    #[default]
    #[strum(serialize = "expanded")]
    #[serde(rename = "expanded")]
    Expanded,
}

impl Edition {
    /// 2000 and 2001 print speed as a letter worth 10/15/20.
    pub fn has_discrete_speed(&self) -> bool {
        matches!(self, Self::Set2000 | Self::Set2001)
    }

    pub fn has_icons(&self) -> bool {
        !matches!(self, Self::Set2000 | Self::Set2001 | Self::Set2002)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MultiPositionMode {
    HighestOnly,
    Average,
}

// === CHART ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccuracyWeights {
    pub obp: f64,
    pub avg: f64,
    pub slg: f64,
    pub hr: f64,
}

impl AccuracyWeights {
    pub fn total(&self) -> f64 {
        self.obp + self.avg + self.slg + self.hr
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartTypeConfig {
    pub command_candidates: Vec<u8>,
    pub min_outs: u8,
    pub max_outs: u8,
    pub opponent: OpponentChart,
    pub accuracy: AccuracyWeights,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub hitter: ChartTypeConfig,
    pub pitcher: ChartTypeConfig,
}

impl ChartConfig {
    pub fn for_kind(&self, kind: ChartKind) -> &ChartTypeConfig {
        match kind {
            ChartKind::Hitter => &self.hitter,
            ChartKind::Pitcher => &self.pitcher,
        }
    }
}

// === DEFENSE ===

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MetricScale {
    pub range: ValueRange,
    pub ceiling: f64,
    pub outlier_multiplier: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FirstBaseCutoffs {
    pub plus: f64,
    pub minus: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricTable {
    pub scale: MetricScale,
    #[serde(default)]
    pub position_scales: BTreeMap<Position, MetricScale>,
    pub first_base: FirstBaseCutoffs,
}

impl MetricTable {
    pub fn scale_for(&self, position: Position) -> &MetricScale {
        self.position_scales.get(&position).unwrap_or(&self.scale)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenseConfig {
    pub normalize_games: f64,
    pub full_sample_games: f64,
    /// Games a secondary position needs before it is rated. The position with
    /// the most games always qualifies.
    #[serde(default = "default_min_position_games")]
    pub min_position_games: f64,
    pub rating_floor: i8,
    pub max_ratings: BTreeMap<Position, i8>,
    pub metrics: BTreeMap<DefenseMetric, MetricTable>,
}

/// `lo <= hi`, false when either side is NaN.
fn ordered(lo: f64, hi: f64) -> bool {
    matches!(lo.partial_cmp(&hi), Some(Ordering::Less | Ordering::Equal))
}

fn default_min_position_games() -> f64 {
    10.0
}

// === SPEED ===

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DiscreteSpeeds {
    pub c: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedConfig {
    pub min_speed: f64,
    pub max_speed: f64,
    pub outlier_max_speed: f64,
    pub low_games_threshold: f64,
    pub low_games_max_speed: f64,
    pub sb_range: ValueRange,
    pub sb_outlier_range: ValueRange,
    pub sprint_range: ValueRange,
    pub sb_multiplier: f64,
    pub sprint_multiplier: f64,
    pub sb_weight: f64,
    pub outlier_sb_weight: f64,
    pub outlier_gap: f64,
    pub a_breakpoint: f64,
    pub b_breakpoint: f64,
    #[serde(default)]
    pub discrete: Option<DiscreteSpeeds>,
}

// === STAMINA ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaminaConfig {
    /// Share of games started at or above which a pitcher is a starter.
    pub starter_share: f64,
    pub sp_min_ip: u8,
    pub sp_max_ip: u8,
    pub rp_min_ip: u8,
    pub rp_max_ip: u8,
}

// === POINTS ===

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeightedRange {
    pub range: ValueRange,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DecayStep {
    pub threshold: f64,
    /// Fraction of the points above `threshold` that is removed.
    pub rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtypePoints {
    pub command: WeightedRange,
    pub on_base: WeightedRange,
    pub batting_avg: WeightedRange,
    pub slugging: WeightedRange,
    pub home_runs: WeightedRange,
    #[serde(default)]
    pub speed: Option<WeightedRange>,
    #[serde(default)]
    pub innings_pitched: Option<WeightedRange>,
    #[serde(default)]
    pub out_distribution: Option<WeightedRange>,
    #[serde(default)]
    pub decay: Vec<DecayStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaminaCurve {
    pub sp_norm_ip: f64,
    pub sp_per_ip: f64,
    pub sp_floor: f64,
    pub rp_norm_ip: f64,
    pub rp_per_ip: f64,
    pub rp_cap: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsConfig {
    pub position_player: SubtypePoints,
    pub starting_pitcher: SubtypePoints,
    pub relief_pitcher: SubtypePoints,
    pub defense: BTreeMap<Position, WeightedRange>,
    pub multi_position: MultiPositionMode,
    /// Divisor for `n` occupied positions lives at index `n - 1`.
    pub position_divisors: Vec<f64>,
    pub stamina: StaminaCurve,
    #[serde(default)]
    pub icons: BTreeMap<Icon, f64>,
    pub min_points: u32,
}

impl PointsConfig {
    pub fn for_subtype(&self, subtype: PlayerSubtype) -> &SubtypePoints {
        match subtype {
            PlayerSubtype::PositionPlayer => &self.position_player,
            PlayerSubtype::StartingPitcher => &self.starting_pitcher,
            PlayerSubtype::ReliefPitcher => &self.relief_pitcher,
        }
    }

    pub fn position_divisor(&self, count: usize) -> f64 {
        match count {
            0 | 1 => 1.0,
            n => self
                .position_divisors
                .get(n - 1)
                .copied()
                .unwrap_or((n - 1) as f64),
        }
    }
}

/// Everything one game edition needs to turn stats into a card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetConfig {
    pub edition: Edition,
    pub chart: ChartConfig,
    pub defense: DefenseConfig,
    pub speed: SpeedConfig,
    pub stamina: StaminaConfig,
    pub points: PointsConfig,
}

impl Default for SetConfig {
    fn default() -> Self {
        Self::for_edition(Edition::default())
    }
}

impl SetConfig {
    pub fn for_edition(edition: Edition) -> Self {
        Self {
            edition,
            chart: defaults::chart_config(edition),
            defense: defaults::defense_config(edition),
            speed: defaults::speed_config(edition),
            stamina: defaults::stamina_config(),
            points: defaults::points_config(edition),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SdResult<Self> {
        let content = fs::read_to_string(path)?;
        let set: SetConfig = serde_json::from_str(&content)?;
        set.validate()?;
        Ok(set)
    }

    /// Rejects tables that would make the engine divide by zero or search an
    /// empty space.
    pub fn validate(&self) -> SdResult<()> {
        for (label, cfg) in [("hitter", &self.chart.hitter), ("pitcher", &self.chart.pitcher)] {
            if cfg.command_candidates.is_empty() {
                return Err(ShowdownError::Config(format!(
                    "{} command candidate list is empty",
                    label
                )));
            }
            if cfg.min_outs > cfg.max_outs || cfg.max_outs > CHART_SLOTS {
                return Err(ShowdownError::Config(format!(
                    "{} out bounds {}..={} are invalid",
                    label, cfg.min_outs, cfg.max_outs
                )));
            }
            if cfg.accuracy.total() <= 0.0 {
                return Err(ShowdownError::Config(format!(
                    "{} accuracy weights sum to zero",
                    label
                )));
            }
            cfg.opponent.validate()?;
        }

        let mut ranges: Vec<(String, ValueRange)> = vec![
            ("speed.sb_range".into(), self.speed.sb_range),
            ("speed.sb_outlier_range".into(), self.speed.sb_outlier_range),
            ("speed.sprint_range".into(), self.speed.sprint_range),
        ];
        for (metric, table) in &self.defense.metrics {
            ranges.push((format!("defense.{}", metric), table.scale.range));
            for (pos, scale) in &table.position_scales {
                ranges.push((format!("defense.{}.{}", metric, pos), scale.range));
            }
        }
        for (subtype, points) in [
            ("position_player", &self.points.position_player),
            ("starting_pitcher", &self.points.starting_pitcher),
            ("relief_pitcher", &self.points.relief_pitcher),
        ] {
            let optional = [
                points.speed,
                points.innings_pitched,
                points.out_distribution,
            ];
            let required = [
                points.command,
                points.on_base,
                points.batting_avg,
                points.slugging,
                points.home_runs,
            ];
            for wr in required.iter().chain(optional.iter().flatten()) {
                ranges.push((format!("points.{}", subtype), wr.range));
            }
        }
        for (pos, wr) in &self.points.defense {
            ranges.push((format!("points.defense.{}", pos), wr.range));
        }

        if let Some((label, r)) = ranges.iter().find(|(_, r)| r.is_degenerate()) {
            return Err(ShowdownError::Config(format!(
                "Range '{}' is degenerate: [{}, {}]",
                label, r.min, r.max
            )));
        }

        let speed = &self.speed;
        for (label, upper) in [
            ("max_speed", speed.max_speed),
            ("low_games_max_speed", speed.low_games_max_speed),
            ("outlier_max_speed", speed.outlier_max_speed),
        ] {
            if !ordered(speed.min_speed, upper) {
                return Err(ShowdownError::Config(format!(
                    "speed.min_speed {} exceeds speed.{} {}",
                    speed.min_speed, label, upper
                )));
            }
        }
        if !ordered(speed.max_speed, speed.outlier_max_speed) {
            return Err(ShowdownError::Config(format!(
                "speed.max_speed {} exceeds speed.outlier_max_speed {}",
                speed.max_speed, speed.outlier_max_speed
            )));
        }

        let stamina = &self.stamina;
        for (label, min, max) in [
            ("sp", stamina.sp_min_ip, stamina.sp_max_ip),
            ("rp", stamina.rp_min_ip, stamina.rp_max_ip),
        ] {
            if min > max {
                return Err(ShowdownError::Config(format!(
                    "stamina.{}_min_ip {} exceeds stamina.{}_max_ip {}",
                    label, min, label, max
                )));
            }
        }

        if self.points.min_points < 10 {
            return Err(ShowdownError::Config(format!(
                "min_points must be at least 10, got {}",
                self.points.min_points
            )));
        }
        Ok(())
    }

    pub fn merge_from_cli(&mut self, tuning: &PointsTuning, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($target:expr, $field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    $target = tuning.$field.clone();
                }
            };
        }

        update_if_present!(self.points.min_points, min_points, "min_points");
        update_if_present!(
            self.points.multi_position,
            multi_position_mode,
            "multi_position_mode"
        );
    }
}

/// Points knobs that can be overridden per run without editing a set file.
#[derive(Args, Debug, Clone)]
pub struct PointsTuning {
    #[arg(long, default_value_t = 10)]
    pub min_points: u32,
    #[arg(long, default_value = "average")]
    pub multi_position_mode: MultiPositionMode,
}
