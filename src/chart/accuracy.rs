use super::{ChartCategory, ChartKind, OpponentChart, ProjectedStats, CHART_SLOTS};
use crate::config::AccuracyWeights;
use crate::stats::RateProjection;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

const MIN_DENOMINATOR: f64 = 1e-3;

/// Rate line produced by rolling `slots` against `opponent`, where `advantage`
/// is the chance the card's own chart is used.
pub fn simulate(
    kind: ChartKind,
    slots: &BTreeMap<ChartCategory, u8>,
    advantage: f64,
    opponent: &OpponentChart,
) -> ProjectedStats {
    let faces = CHART_SLOTS as f64;
    let mut on_base = 0.0;
    let mut walks = 0.0;
    let mut hits = 0.0;
    let mut bases = 0.0;
    let mut home_runs = 0.0;

    for cat in ChartCategory::iter() {
        let own = if kind.categories().contains(&cat) {
            slots.get(&cat).copied().unwrap_or(0) as f64
        } else {
            0.0
        };
        let q = advantage * own / faces + (1.0 - advantage) * opponent.slot(cat) / faces;
        if cat.is_out() {
            continue;
        }
        on_base += q;
        if cat == ChartCategory::Bb {
            walks += q;
        } else {
            hits += q;
            bases += q * cat.bases();
        }
        if cat == ChartCategory::HomeRun {
            home_runs += q;
        }
    }

    let at_bats = (1.0 - walks).max(MIN_DENOMINATOR);
    ProjectedStats {
        obp: on_base,
        avg: hits / at_bats,
        slg: bases / at_bats,
        hr_rate: home_runs,
        hr_per_650: home_runs * 650.0,
    }
}

fn relative_distance(simulated: f64, real: f64) -> f64 {
    (simulated - real).abs() / real.abs().max(MIN_DENOMINATOR)
}

/// `1 - min(1, d)` where `d` is the weighted mean relative distance between the
/// simulated and real OBP, AVG, SLG and HR rate.
pub fn accuracy(
    projected: &ProjectedStats,
    real: &RateProjection,
    weights: &AccuracyWeights,
) -> f64 {
    let total = weights.total();
    if total <= 0.0 {
        return 0.0;
    }
    let distance = weights.obp * relative_distance(projected.obp, real.obp)
        + weights.avg * relative_distance(projected.avg, real.avg)
        + weights.slg * relative_distance(projected.slg, real.slg)
        + weights.hr * relative_distance(projected.hr_rate, real.hr_rate);
    1.0 - (distance / total).min(1.0)
}
