use super::{DecayRecord, PointsLedger};
use crate::config::{DecayStep, MultiPositionMode, PointsConfig, StaminaCurve};
use crate::stats::PlayerSubtype;
use tracing::debug;

/// One pass over the ledger. Takes the ledger by value and hands back the
/// corrected one so passes compose as a fold.
pub trait Correction {
    fn name(&self) -> &'static str;
    fn apply(&self, ledger: PointsLedger) -> PointsLedger;
}

pub fn apply_all(ledger: PointsLedger, corrections: &[&dyn Correction]) -> PointsLedger {
    corrections.iter().fold(ledger, |ledger, c| {
        let before = ledger.total();
        let ledger = c.apply(ledger);
        debug!("{}: {:.1} -> {:.1}", c.name(), before, ledger.total());
        ledger
    })
}

// === MULTI-POSITION ===

pub struct MultiPosition<'a> {
    pub config: &'a PointsConfig,
}

impl Correction for MultiPosition<'_> {
    fn name(&self) -> &'static str {
        "multi_position"
    }

    fn apply(&self, mut ledger: PointsLedger) -> PointsLedger {
        let indices: Vec<usize> = ledger
            .breakdowns
            .iter()
            .enumerate()
            .filter(|(_, b)| b.metric.is_defense())
            .map(|(i, _)| i)
            .collect();
        if indices.len() < 2 {
            return ledger;
        }

        match self.config.multi_position {
            MultiPositionMode::HighestOnly => {
                let mut best = indices[0];
                for &i in &indices[1..] {
                    if ledger.breakdowns[i].points > ledger.breakdowns[best].points {
                        best = i;
                    }
                }
                for &i in &indices {
                    if i != best {
                        let current = ledger.breakdowns[i].points;
                        ledger.breakdowns[i].adjust(-current);
                    }
                }
            }
            MultiPositionMode::Average => {
                let n = indices.len();
                let sum: f64 = indices.iter().map(|&i| ledger.breakdowns[i].points).sum();
                let each = sum / self.config.position_divisor(n) / n as f64;
                for &i in &indices {
                    let current = ledger.breakdowns[i].points;
                    ledger.breakdowns[i].adjust(each - current);
                }
            }
        }
        ledger
    }
}

// === DECAY ===

pub struct Decay {
    steps: Vec<DecayStep>,
}

impl Decay {
    pub fn new(steps: &[DecayStep]) -> Self {
        let mut steps = steps.to_vec();
        steps.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
        Self { steps }
    }
}

impl Correction for Decay {
    fn name(&self) -> &'static str {
        "decay"
    }

    fn apply(&self, mut ledger: PointsLedger) -> PointsLedger {
        for step in &self.steps {
            let total = ledger.total();
            if total <= step.threshold {
                continue;
            }
            let excess = total - step.threshold;
            let eligible: f64 = ledger
                .breakdowns
                .iter()
                .filter(|b| b.metric.is_decay_eligible() && b.points > 0.0)
                .map(|b| b.points)
                .sum();
            if eligible <= 0.0 {
                continue;
            }
            let removed = (excess * step.rate.clamp(0.0, 1.0)).min(eligible);
            for b in ledger
                .breakdowns
                .iter_mut()
                .filter(|b| b.metric.is_decay_eligible() && b.points > 0.0)
            {
                let share = b.points / eligible;
                b.adjust(-removed * share);
            }
            ledger.decay.push(DecayRecord {
                threshold: step.threshold,
                rate: step.rate,
                total_before: total,
                removed,
            });
        }
        ledger
    }
}

// === STAMINA ===

pub struct Stamina {
    pub multiplier: f64,
}

impl Stamina {
    /// Multiplier for a pitcher's innings rating; `None` when the card is not
    /// penalized or boosted.
    pub fn for_pitcher(subtype: PlayerSubtype, ip: f64, curve: &StaminaCurve) -> Option<Self> {
        let multiplier = match subtype {
            PlayerSubtype::StartingPitcher if ip < curve.sp_norm_ip => {
                (1.0 - (curve.sp_norm_ip - ip) * curve.sp_per_ip).max(curve.sp_floor)
            }
            PlayerSubtype::ReliefPitcher if ip > curve.rp_norm_ip => {
                (1.0 + (ip - curve.rp_norm_ip) * curve.rp_per_ip).min(curve.rp_cap)
            }
            _ => return None,
        };
        Some(Self { multiplier })
    }
}

impl Correction for Stamina {
    fn name(&self) -> &'static str {
        "stamina"
    }

    fn apply(&self, mut ledger: PointsLedger) -> PointsLedger {
        for b in ledger
            .breakdowns
            .iter_mut()
            .filter(|b| !b.metric.is_stamina_exempt())
        {
            let delta = b.points * (self.multiplier - 1.0);
            b.adjust(delta);
        }
        ledger.stamina_multiplier = Some(self.multiplier);
        ledger
    }
}
