use super::corrections::{apply_all, Correction, Decay, MultiPosition, Stamina};
use super::{Points, PointsBreakdown, PointsLedger, PointsMetric};
use crate::chart::Chart;
use crate::config::PointsConfig;
use crate::error::SdResult;
use crate::ratings::Ratings;
use crate::stats::{Icon, PlayerSubtype};
use std::collections::BTreeSet;
use tracing::debug;

/// What a card contributes to its own valuation.
#[derive(Debug, Clone, Copy)]
pub struct PointsInputs<'a> {
    pub subtype: PlayerSubtype,
    pub chart: &'a Chart,
    pub ratings: &'a Ratings,
    pub icons: &'a [Icon],
}

pub struct PointsEngine<'a> {
    config: &'a PointsConfig,
}

impl<'a> PointsEngine<'a> {
    pub fn new(config: &'a PointsConfig) -> Self {
        Self { config }
    }

    /// One breakdown per scored category, before any correction.
    pub fn base_ledger(&self, inputs: &PointsInputs) -> SdResult<PointsLedger> {
        let table = self.config.for_subtype(inputs.subtype);
        let chart = inputs.chart;
        let projected = &chart.projected;

        let mut breakdowns = vec![
            PointsBreakdown::scored(
                PointsMetric::Command,
                chart.command as f64,
                &table.command,
                false,
            )?,
            PointsBreakdown::scored(PointsMetric::OnBase, projected.obp, &table.on_base, false)?,
            PointsBreakdown::scored(
                PointsMetric::BattingAvg,
                projected.avg,
                &table.batting_avg,
                false,
            )?,
            PointsBreakdown::scored(PointsMetric::Slugging, projected.slg, &table.slugging, false)?,
            PointsBreakdown::scored(
                PointsMetric::HomeRuns,
                projected.hr_per_650,
                &table.home_runs,
                false,
            )?,
        ];

        if let (Some(weighted), Some(speed)) = (&table.speed, &inputs.ratings.speed) {
            breakdowns.push(PointsBreakdown::scored(
                PointsMetric::Speed,
                speed.speed as f64,
                weighted,
                false,
            )?);
        }
        if let (Some(weighted), Some(ip)) = (&table.innings_pitched, inputs.ratings.innings_pitched)
        {
            breakdowns.push(PointsBreakdown::scored(
                PointsMetric::InningsPitched,
                ip as f64,
                weighted,
                false,
            )?);
        }
        if let Some(weighted) = &table.out_distribution {
            breakdowns.push(PointsBreakdown::scored(
                PointsMetric::OutDistribution,
                chart.out_distribution(),
                weighted,
                false,
            )?);
        }

        if !inputs.subtype.is_pitcher() {
            for (&position, &rating) in &inputs.ratings.defense {
                if let Some(weighted) = self.config.defense.get(&position) {
                    breakdowns.push(PointsBreakdown::scored(
                        PointsMetric::Defense(position),
                        rating as f64,
                        weighted,
                        true,
                    )?);
                }
            }
        }

        let icons: BTreeSet<Icon> = inputs.icons.iter().copied().collect();
        for icon in icons {
            if let Some(&points) = self.config.icons.get(&icon) {
                breakdowns.push(PointsBreakdown::flat(PointsMetric::Icon(icon), points));
            }
        }

        Ok(PointsLedger::new(breakdowns))
    }

    pub fn evaluate(&self, inputs: &PointsInputs) -> SdResult<Points> {
        let ledger = self.base_ledger(inputs)?;
        debug!("Base points {:.1}", ledger.total());

        let table = self.config.for_subtype(inputs.subtype);
        let multi = MultiPosition {
            config: self.config,
        };
        let decay = Decay::new(&table.decay);
        let stamina = inputs.ratings.innings_pitched.and_then(|ip| {
            Stamina::for_pitcher(inputs.subtype, ip as f64, &self.config.stamina)
        });

        let mut passes: Vec<&dyn Correction> =
            vec![&multi as &dyn Correction, &decay as &dyn Correction];
        if let Some(s) = &stamina {
            passes.push(s);
        }
        let ledger = apply_all(ledger, &passes);
        Ok(Points::from_ledger(ledger, self.config.min_points))
    }
}

/// Nearest multiple of ten, never below `min_points` (itself at least 10).
pub fn round_points(raw: f64, min_points: u32) -> u32 {
    let floor = min_points.max(10).div_ceil(10) * 10;
    let rounded = if raw.is_finite() && raw > 0.0 {
        ((raw / 10.0).round() * 10.0) as u32
    } else {
        0
    };
    rounded.max(floor)
}
