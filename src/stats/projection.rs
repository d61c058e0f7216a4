use super::StatLine;
use crate::chart::ChartCategory;
use crate::error::{SdResult, ShowdownError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Plate appearances every projection is rescaled to.
pub const PA_BASELINE: f64 = 400.0;

const DEFAULT_POPUP_SHARE: f64 = 0.15;

/// Outcome counts per `PA_BASELINE` plate appearances, plus the real rate line
/// the chart search tries to reproduce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateProjection {
    pub pu: f64,
    pub so: f64,
    pub gb: f64,
    pub fb: f64,
    pub bb: f64,
    pub single: f64,
    pub single_plus: f64,
    pub double: f64,
    pub triple: f64,
    pub home_run: f64,
    pub stolen_bases: f64,

    pub obp: f64,
    pub avg: f64,
    pub slg: f64,
    pub hr_rate: f64,
}

impl RateProjection {
    pub fn from_stats(stats: &StatLine) -> SdResult<Self> {
        if stats.pa <= 0.0 {
            return Err(ShowdownError::Validation(format!(
                "'{}' has no plate appearances",
                stats.name
            )));
        }
        let scale = PA_BASELINE / stats.pa;

        let in_play_outs = (stats.at_bats() - stats.hits - stats.strikeouts).max(0.0);
        let gb_share = match (stats.ground_outs, stats.fly_outs) {
            (Some(go), Some(fo)) if go + fo > 0.0 => go / (go + fo),
            _ => {
                let go_ao = estimated_go_ao(stats.slugging());
                debug!(
                    "{}: no batted-ball split, GO/AO {:.2} from SLG",
                    stats.name, go_ao
                );
                go_ao / (1.0 + go_ao)
            }
        };
        let ground_outs = in_play_outs * gb_share;
        let air_outs = in_play_outs - ground_outs;

        let popup_share = match (stats.popups, stats.fly_outs) {
            (Some(pu), Some(fo)) if fo > 0.0 => (pu / fo).clamp(0.0, 1.0),
            _ => DEFAULT_POPUP_SHARE,
        };
        let popups = air_outs * popup_share;

        let singles = stats.singles();
        let single_plus = (0.5 * stats.stolen_bases).min(0.35 * singles).max(0.0);

        Ok(Self {
            pu: popups * scale,
            so: stats.strikeouts * scale,
            gb: ground_outs * scale,
            fb: (air_outs - popups) * scale,
            bb: (stats.walks + stats.hit_by_pitch) * scale,
            single: (singles - single_plus) * scale,
            single_plus: single_plus * scale,
            double: stats.doubles * scale,
            triple: stats.triples * scale,
            home_run: stats.home_runs * scale,
            stolen_bases: stats.stolen_bases * scale,
            obp: stats.obp(),
            avg: stats.batting_avg(),
            slg: stats.slugging(),
            hr_rate: stats.home_runs / stats.pa,
        })
    }

    pub fn count(&self, category: ChartCategory) -> f64 {
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

    /// Per-PA rate of one outcome.
    pub fn rate(&self, category: ChartCategory) -> f64 {
        self.count(category) / PA_BASELINE
    }
}

/// Ground-out to air-out ratio implied by slugging when no split is recorded.
pub fn estimated_go_ao(slugging: f64) -> f64 {
    (1.35 - 1.5 * (slugging - 0.400)).clamp(0.6, 2.2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn line() -> StatLine {
        StatLine::builder()
            .name("Test")
            .pa(600.0)
            .hits(150.0)
            .doubles(30.0)
            .triples(3.0)
            .home_runs(25.0)
            .walks(55.0)
            .hit_by_pitch(5.0)
            .strikeouts(120.0)
            .stolen_bases(12.0)
            .build()
    }

    #[test]
    fn test_counts_sum_to_baseline() {
        let proj = RateProjection::from_stats(&line()).unwrap();
        let total: f64 = ChartCategory::iter().map(|c| proj.count(c)).sum();
        assert!((total - PA_BASELINE).abs() < 1e-9, "total {}", total);
    }

    #[test]
    fn test_zero_pa_is_validation_error() {
        let empty = StatLine::builder().name("Nobody").build();
        assert!(matches!(
            RateProjection::from_stats(&empty),
            Err(ShowdownError::Validation(_))
        ));
    }

    #[test]
    fn test_go_ao_estimate_is_clamped() {
        assert_eq!(estimated_go_ao(0.0), 2.2);
        assert_eq!(estimated_go_ao(1.2), 0.6);
        assert!((estimated_go_ao(0.400) - 1.35).abs() < 1e-12);
    }

    #[test]
    fn test_recorded_split_wins_over_estimate() {
        let mut stats = line();
        stats.ground_outs = Some(100.0);
        stats.fly_outs = Some(100.0);
        stats.popups = Some(20.0);
        let proj = RateProjection::from_stats(&stats).unwrap();
        assert!((proj.gb - (proj.fb + proj.pu)).abs() < 1e-9);
        assert!((proj.pu / (proj.fb + proj.pu) - 0.2).abs() < 1e-9);
    }
}
