use crate::chart::{forced_chart, Chart, ChartKind, ChartSearch};
use crate::config::{Edition, SetConfig};
use crate::era::Era;
use crate::error::SdResult;
use crate::points::{Points, PointsEngine, PointsInputs};
use crate::ratings::{classify, Ratings, SpeedRating};
use crate::stats::{Icon, PlayerSubtype, Position, RateProjection, StatLine};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;
use typed_builder::TypedBuilder;

/// Caller-supplied deviations from the normal chart search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOverrides {
    /// Forces this (command, outs) pair and skips the search.
    pub command_outs: Option<(u8, u8)>,
    pub excluded_commands: Vec<u8>,
    /// Zero-based rank of the chart to use.
    pub chart_version: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowdownCard {
    pub name: String,
    pub year: u16,
    pub last_year: Option<u16>,
    pub edition: Edition,
    pub era: Era,
    pub subtype: PlayerSubtype,
    pub chart: Chart,
    pub defense: BTreeMap<Position, i8>,
    pub speed: Option<SpeedRating>,
    pub innings_pitched: Option<u8>,
    pub icons: Vec<Icon>,
    pub points: Points,
}

#[derive(TypedBuilder)]
pub struct CardBuildParams<'a> {
    pub stats: &'a StatLine,
    pub set: &'a SetConfig,
    /// Defaults to the era of the first season.
    #[builder(default)]
    pub era: Option<Era>,
    #[builder(default)]
    pub overrides: ChartOverrides,
}

impl CardBuildParams<'_> {
    pub fn build_card(self) -> SdResult<ShowdownCard> {
        let stats = self.stats;
        let set = self.set;

        let projection = RateProjection::from_stats(stats)?;
        let subtype = classify(stats, &set.stamina);
        let era = self.era.unwrap_or_else(|| Era::from_year(stats.year));
        let kind = ChartKind::for_subtype(subtype);

        let chart = self.chart(kind, &projection)?;
        let ratings = Ratings::from_stats(stats, subtype, projection.stolen_bases, era, set)?;

        let icons: Vec<Icon> = {
            let mut icons: Vec<Icon> = stats
                .icons
                .iter()
                .copied()
                .filter(|i| set.points.icons.contains_key(i))
                .collect();
            icons.sort();
            icons.dedup();
            icons
        };

        let inputs = PointsInputs {
            subtype,
            chart: &chart,
            ratings: &ratings,
            icons: &icons,
        };
        let points = PointsEngine::new(&set.points).evaluate(&inputs)?;

        info!(
            "🃏 {} ({}): {} {}/{} accuracy {:.3}, {} pts",
            stats.name,
            stats.year,
            subtype,
            chart.command,
            chart.outs,
            chart.accuracy,
            points.total
        );

        Ok(ShowdownCard {
            name: stats.name.clone(),
            year: stats.year,
            last_year: stats.last_year,
            edition: set.edition,
            era,
            subtype,
            chart,
            defense: ratings.defense,
            speed: ratings.speed,
            innings_pitched: ratings.innings_pitched,
            icons,
            points,
        })
    }

    fn chart(&self, kind: ChartKind, projection: &RateProjection) -> SdResult<Chart> {
        let config = self.set.chart.for_kind(kind);
        if let Some((command, outs)) = self.overrides.command_outs {
            return forced_chart(kind, config, projection, command, outs);
        }
        ChartSearch::new(kind, config, projection, &self.overrides.excluded_commands)?
            .search(self.overrides.chart_version)
    }
}
