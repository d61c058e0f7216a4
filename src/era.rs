use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use strum_macros::{Display, EnumIter, EnumString};

/// First season with Statcast sprint speed.
pub const SPRINT_SPEED_FIRST_YEAR: u16 = 2015;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Era {
    DeadBall,
    LiveBall,
    Integration,
    Expansion,
    FreeAgency,
    Steroid,
    PostSteroid,
    Statcast,
    PitchClock,
}

impl Era {
    pub fn years(&self) -> RangeInclusive<u16> {
        match self {
            Self::DeadBall => 1800..=1919,
            Self::LiveBall => 1920..=1941,
            Self::Integration => 1942..=1960,
            Self::Expansion => 1961..=1976,
            Self::FreeAgency => 1977..=1993,
            Self::Steroid => 1994..=2004,
            Self::PostSteroid => 2005..=2014,
            Self::Statcast => 2015..=2022,
            Self::PitchClock => 2023..=u16::MAX,
        }
    }

    /// Scales raw stolen-base rates so that running-heavy eras do not
    /// inflate speed and low-volume eras are not punished.
    pub fn speed_multiplier(&self) -> f64 {
        match self {
            Self::DeadBall => 0.70,
            Self::LiveBall => 1.15,
            Self::Integration => 1.20,
            Self::Expansion => 1.00,
            Self::FreeAgency => 0.85,
            Self::Steroid => 1.00,
            Self::PostSteroid => 1.05,
            Self::Statcast => 1.10,
            Self::PitchClock => 0.90,
        }
    }

    pub fn from_year(year: u16) -> Self {
        use strum::IntoEnumIterator;
        Self::iter()
            .find(|era| era.years().contains(&year))
            .unwrap_or(Self::DeadBall)
    }
}
