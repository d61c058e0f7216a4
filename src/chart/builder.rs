use super::accuracy::{accuracy, simulate};
use super::{Chart, ChartCategory, ChartKind, OpponentChart, CHART_SLOTS};
use crate::config::AccuracyWeights;
use crate::error::{SdResult, ShowdownError};
use crate::stats::RateProjection;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// Below this the card's own chart is almost never rolled, so slot estimates
/// are divided by a floor instead.
const MIN_ADVANTAGE: f64 = 0.05;

/// Turns a real rate line into concrete charts for given (command, outs) pairs.
#[derive(Debug, Clone, Copy)]
pub struct ChartBuilder<'a> {
    pub kind: ChartKind,
    pub opponent: &'a OpponentChart,
    pub projection: &'a RateProjection,
    pub weights: &'a AccuracyWeights,
}

impl<'a> ChartBuilder<'a> {
    pub fn new(
        kind: ChartKind,
        opponent: &'a OpponentChart,
        projection: &'a RateProjection,
        weights: &'a AccuracyWeights,
    ) -> Self {
        Self {
            kind,
            opponent,
            projection,
            weights,
        }
    }

    pub fn advantage(&self, command: u8) -> f64 {
        self.kind.advantage(command as f64, self.opponent.command)
    }

    /// Real per-PA rate of everything recorded under `category` on this chart.
    fn real_rate(&self, category: ChartCategory) -> f64 {
        ChartCategory::iter()
            .filter(|&c| self.kind.fold(c) == category)
            .map(|c| self.projection.rate(c))
            .sum()
    }

    fn opponent_slots(&self, category: ChartCategory) -> f64 {
        ChartCategory::iter()
            .filter(|&c| self.kind.fold(c) == category)
            .map(|c| self.opponent.slot(c))
            .sum()
    }

    /// Slots the card needs in `category` for the matchup to reproduce the real rate.
    fn slot_estimate(&self, category: ChartCategory, advantage: f64) -> f64 {
        let faces = CHART_SLOTS as f64;
        let from_opponent = (1.0 - advantage) * self.opponent_slots(category) / faces;
        ((self.real_rate(category) - from_opponent) * faces / advantage.max(MIN_ADVANTAGE))
            .max(0.0)
    }

    /// Continuous out count whose simulated OBP equals the real OBP.
    pub fn out_target(&self, command: u8) -> f64 {
        let faces = CHART_SLOTS as f64;
        let advantage = self.advantage(command);
        let opponent_on_base: f64 = ChartCategory::iter()
            .filter(|c| !c.is_out())
            .map(|c| self.opponent.slot(c))
            .sum();
        let own_obp =
            (self.projection.obp - (1.0 - advantage) * opponent_on_base / faces)
                / advantage.max(MIN_ADVANTAGE);
        (faces - own_obp * faces).clamp(0.0, faces)
    }

    pub fn build(&self, command: u8, outs: u8) -> SdResult<Chart> {
        if outs > CHART_SLOTS {
            return Err(ShowdownError::Validation(format!(
                "{} outs do not fit on a {}-slot chart",
                outs, CHART_SLOTS
            )));
        }
        let advantage = self.advantage(command);
        let categories = self.kind.categories();
        let mut slots: BTreeMap<ChartCategory, u8> = BTreeMap::new();

        // Outs: largest remainder over the out categories
        let out_cats: Vec<ChartCategory> =
            categories.iter().copied().filter(|c| c.is_out()).collect();
        let mut weights: Vec<f64> = out_cats
            .iter()
            .map(|&c| self.slot_estimate(c, advantage))
            .collect();
        if weights.iter().sum::<f64>() <= 0.0 {
            weights = out_cats.iter().map(|&c| self.real_rate(c)).collect();
        }
        for (cat, n) in out_cats.iter().zip(apportion(outs, &weights)) {
            slots.insert(*cat, n);
        }

        // On-base: round everything but 1B, which absorbs the remainder
        let available = CHART_SLOTS - outs;
        let on_base_cats: Vec<ChartCategory> = categories
            .iter()
            .copied()
            .filter(|&c| !c.is_out() && c != ChartCategory::Single)
            .collect();
        let estimates: Vec<f64> = on_base_cats
            .iter()
            .map(|&c| self.slot_estimate(c, advantage))
            .collect();
        let mut counts: Vec<u8> = estimates
            .iter()
            .map(|e| e.round().min(available as f64) as u8)
            .collect();
        trim_to(&mut counts, &estimates, available);
        let used: u8 = counts.iter().sum();
        for (cat, n) in on_base_cats.iter().zip(counts) {
            slots.insert(*cat, n);
        }
        slots.insert(ChartCategory::Single, available - used);

        let projected = simulate(self.kind, &slots, advantage, self.opponent);
        Ok(Chart {
            kind: self.kind,
            command,
            outs,
            out_target: self.out_target(command),
            slots,
            accuracy: accuracy(&projected, self.projection, self.weights),
            obp_bias: projected.obp - self.projection.obp,
            projected,
        })
    }
}

/// Splits `total` whole slots across `weights` by largest remainder. Ties go to
/// the earlier entry. With no positive weight everything lands on the first.
pub fn apportion(total: u8, weights: &[f64]) -> Vec<u8> {
    let mut result = vec![0u8; weights.len()];
    if weights.is_empty() {
        return result;
    }
    let sum: f64 = weights.iter().map(|w| w.max(0.0)).sum();
    if sum <= 0.0 {
        result[0] = total;
        return result;
    }

    let mut remainders: Vec<(usize, f64)> = Vec::with_capacity(weights.len());
    let mut assigned = 0u8;
    for (i, w) in weights.iter().enumerate() {
        let exact = total as f64 * w.max(0.0) / sum;
        let whole = exact.floor();
        result[i] = whole as u8;
        assigned += whole as u8;
        remainders.push((i, exact - whole));
    }
    remainders.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    for (i, _) in remainders.iter().cycle().take((total - assigned) as usize) {
        result[*i] += 1;
    }
    result
}

/// Removes slots one at a time from whichever entry was rounded furthest
/// above its estimate until the counts fit in `available`.
fn trim_to(counts: &mut [u8], estimates: &[f64], available: u8) {
    while counts.iter().map(|&c| c as u32).sum::<u32>() > available as u32 {
        let mut pick: Option<(usize, f64)> = None;
        for (i, (&c, &e)) in counts.iter().zip(estimates).enumerate() {
            if c == 0 {
                continue;
            }
            let over = c as f64 - e;
            if pick.map_or(true, |(_, best)| over > best) {
                pick = Some((i, over));
            }
        }
        match pick {
            Some((i, _)) => counts[i] -= 1,
            None => break,
        }
    }
}
