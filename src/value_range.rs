use crate::error::{SdResult, ShowdownError};
use serde::{Deserialize, Serialize};

/// Whether a higher raw value is better or worse for the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Ascending,
    /// Lower is better (opponent OBP, SLG, HR allowed).
    Descending,
}

/// A bounded interval used to map raw metrics onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub direction: Direction,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            direction: Direction::Ascending,
        }
    }

    pub const fn descending(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            direction: Direction::Descending,
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_degenerate(&self) -> bool {
        self.span() == 0.0 || !self.span().is_finite()
    }

    /// Linear position of `value` inside the range.
    ///
    /// Clamped to `[0, 1]`. With `allow_negative` the lower clamp is lifted so
    /// below-replacement values keep their negative share.
    pub fn percentile(&self, value: f64, allow_negative: bool) -> SdResult<f64> {
        if self.is_degenerate() {
            return Err(ShowdownError::Config(format!(
                "Degenerate value range [{}, {}]",
                self.min, self.max
            )));
        }

        let raw = match self.direction {
            Direction::Ascending => (value - self.min) / self.span(),
            Direction::Descending => (self.max - value) / self.span(),
        };

        let floor = if allow_negative { f64::NEG_INFINITY } else { 0.0 };
        Ok(raw.clamp(floor, 1.0))
    }

    /// Inverse of `percentile` for ascending ranges: `min + pct * span`.
    pub fn value_at(&self, pct: f64) -> f64 {
        self.min + pct * self.span()
    }
}
