use super::{Chart, ChartBuilder, ChartKind};
use crate::config::ChartTypeConfig;
use crate::error::{SdResult, ShowdownError};
use crate::stats::RateProjection;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Search over (command, outs) pairs for the chart that best reproduces a
/// rate projection against the configured opponent.
pub struct ChartSearch<'a> {
    builder: ChartBuilder<'a>,
    commands: Vec<u8>,
    min_outs: u8,
    max_outs: u8,
}

impl<'a> ChartSearch<'a> {
    pub fn new(
        kind: ChartKind,
        config: &'a ChartTypeConfig,
        projection: &'a RateProjection,
        excluded: &[u8],
    ) -> SdResult<Self> {
        let commands: Vec<u8> = config
            .command_candidates
            .iter()
            .copied()
            .filter(|c| !excluded.contains(c))
            .collect();
        if commands.is_empty() {
            return Err(ShowdownError::Config(format!(
                "No {} command candidates left after excluding {:?}",
                kind, excluded
            )));
        }
        Ok(Self {
            builder: ChartBuilder::new(kind, &config.opponent, projection, &config.accuracy),
            commands,
            min_outs: config.min_outs,
            max_outs: config.max_outs,
        })
    }

    pub fn commands(&self) -> &[u8] {
        &self.commands
    }

    /// Every candidate chart in evaluation order. Each (command, outs) pair
    /// appears at most once.
    pub fn candidates(&self) -> SdResult<Vec<Chart>> {
        let mut seen: HashSet<(u8, u8)> = HashSet::new();
        let mut charts = Vec::with_capacity(self.commands.len() * 2);

        for &command in &self.commands {
            let target = self.builder.out_target(command);
            let base_outs = (target.floor() as i32).clamp(self.min_outs as i32, self.max_outs as i32) as u8;
            if !seen.insert((command, base_outs)) {
                continue;
            }
            let baseline = self.builder.build(command, base_outs)?;

            // One slot toward the real OBP; positive bias needs another out
            let step = if baseline.obp_bias > 0.0 {
                1
            } else if baseline.obp_bias < 0.0 {
                -1
            } else {
                0
            };
            charts.push(baseline);

            let shifted = base_outs as i32 + step;
            if step == 0 || shifted < self.min_outs as i32 || shifted > self.max_outs as i32 {
                continue;
            }
            let shifted = shifted as u8;
            if seen.insert((command, shifted)) {
                charts.push(self.builder.build(command, shifted)?);
            }
        }
        Ok(charts)
    }

    /// Candidates from most to least accurate. Ties fall to the out count
    /// closest to its continuous target, then lower command, then fewer outs.
    pub fn rank(&self) -> SdResult<Vec<Chart>> {
        let mut charts = self.candidates()?;
        charts.sort_by(compare_charts);
        if let Some(best) = charts.first() {
            debug!(
                "{} chart search: {} candidates, best {}/{} at {:.4}",
                self.builder.kind,
                charts.len(),
                best.command,
                best.outs,
                best.accuracy
            );
        }
        Ok(charts)
    }

    /// The `offset`-th best chart; 0 is the most accurate. Offsets past the
    /// end fall back to the last candidate.
    pub fn search(&self, offset: usize) -> SdResult<Chart> {
        let mut ranked = self.rank()?;
        let len = ranked.len();
        if len == 0 {
            return Err(ShowdownError::Config("Chart search produced no candidates".into()));
        }
        if offset >= len {
            warn!(
                "Chart version {} requested but only {} candidates exist, using the last",
                offset, len
            );
        }
        Ok(ranked.swap_remove(offset.min(len - 1)))
    }

    /// Builds the given pair directly. Forced charts always report full accuracy.
    pub fn forced(&self, command: u8, outs: u8) -> SdResult<Chart> {
        force_chart(&self.builder, command, outs)
    }
}

/// Builds a chart for an explicit (command, outs) pair without running a
/// search, so candidate lists and exclusions do not apply.
pub fn forced_chart(
    kind: ChartKind,
    config: &ChartTypeConfig,
    projection: &RateProjection,
    command: u8,
    outs: u8,
) -> SdResult<Chart> {
    let builder = ChartBuilder::new(kind, &config.opponent, projection, &config.accuracy);
    force_chart(&builder, command, outs)
}

fn force_chart(builder: &ChartBuilder<'_>, command: u8, outs: u8) -> SdResult<Chart> {
    let mut chart = builder.build(command, outs)?;
    chart.accuracy = 1.0;
    debug!("Forced chart {}/{}", command, outs);
    Ok(chart)
}

fn compare_charts(a: &Chart, b: &Chart) -> Ordering {
    b.accuracy
        .total_cmp(&a.accuracy)
        .then_with(|| {
            let da = (a.outs as f64 - a.out_target).abs();
            let db = (b.outs as f64 - b.out_target).abs();
            da.total_cmp(&db)
        })
        .then(a.command.cmp(&b.command))
        .then(a.outs.cmp(&b.outs))
}
