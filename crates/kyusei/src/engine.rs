//! Profile calculation.
//!
//! A [`Calculator`] owns its configuration, a solar term table and an
//! override chain. The free functions use a process-wide default instance.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::confidence::{BoundaryAnalyzer, DEFAULT_WARNING_WINDOW_DAYS};
use crate::cycles::{self, YearCycle, YearCycleEntry, YearCycleTimeline, DEFAULT_YEARS_AHEAD};
use crate::dst::{self, DstIssueDetection};
use crate::error::Result;
use crate::input::{self, DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR};
use crate::overrides::OverrideChain;
use crate::solar::resolver::{SolarResolver, SolarYear};
use crate::solar::terms::{default_table, SolarTermTable, TermStrategy};
use crate::stars::{energetic_star, month_star, principal_reference_year, principal_star, star_metadata};
use crate::types::{CalculationInput, NineStarKiProfile, ProfileMetadata, StarNumber, ValidationResult};

fn default_min_year() -> i32 {
    DEFAULT_MIN_YEAR
}

fn default_max_year() -> i32 {
    DEFAULT_MAX_YEAR
}

fn default_warning_window_days() -> i64 {
    DEFAULT_WARNING_WINDOW_DAYS
}

fn default_years_ahead() -> i32 {
    DEFAULT_YEARS_AHEAD
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    #[serde(default)]
    pub strategy: TermStrategy,
    #[serde(default = "default_min_year")]
    pub min_year: i32,
    #[serde(default = "default_max_year")]
    pub max_year: i32,
    #[serde(default = "default_warning_window_days")]
    pub warning_window_days: i64,
    #[serde(default = "default_years_ahead")]
    pub years_ahead: i32,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            strategy: TermStrategy::default(),
            min_year: default_min_year(),
            max_year: default_max_year(),
            warning_window_days: default_warning_window_days(),
            years_ahead: default_years_ahead(),
        }
    }
}

#[derive(Debug)]
pub struct Calculator {
    config: CalculatorConfig,
    table: Arc<SolarTermTable>,
    overrides: OverrideChain,
}

impl Calculator {
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    /// The fixed strategy shares the process-wide term table.
    pub fn with_config(config: CalculatorConfig) -> Self {
        let table = match config.strategy {
            TermStrategy::Fixed => default_table(),
            strategy => Arc::new(SolarTermTable::for_strategy(strategy)),
        };
        Self {
            config,
            table,
            overrides: OverrideChain::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: OverrideChain) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn table(&self) -> &SolarTermTable {
        &self.table
    }

    pub fn boundary_analyzer(&self) -> BoundaryAnalyzer<'_> {
        BoundaryAnalyzer::new(&self.table, self.config.warning_window_days)
    }

    pub fn validate(&self, input: &CalculationInput) -> ValidationResult {
        input::validate_in_range(input, self.config.min_year, self.config.max_year)
    }

    pub fn calculate_profile(&self, input: &CalculationInput) -> Result<NineStarKiProfile> {
        let birth = input::parse_birth(input, self.config.min_year, self.config.max_year)?;
        let at = birth.instant;

        let resolver = SolarResolver::new(&self.table);
        let SolarYear { solar_year, li_chun } = resolver.solar_year(at);
        let month_index = resolver.month_index(at, solar_year)?;

        let (principal, month, energetic, warnings, confidence) = match self.overrides.lookup(input, at)? {
            Some(hit) => (hit.principal, hit.month, hit.energetic, Vec::new(), None),
            None => {
                let principal = principal_star(principal_reference_year(at.year(), solar_year))?;
                let month = month_star(principal, month_index)?;
                let energetic = energetic_star(principal, month)?;

                let analyzer = self.boundary_analyzer();
                let warnings = analyzer.boundary_warnings(at, solar_year);
                let confidence = analyzer.confidence(at, input.time.is_some(), solar_year);
                (principal, month, energetic, warnings, Some(confidence))
            }
        };

        // A bare date has no wall-clock time to be skipped or repeated.
        let dst_issue = input
            .timezone
            .as_deref()
            .filter(|_| birth.has_time)
            .map(|timezone| dst::detect_dst_issues_local(birth.wall_clock, Some(timezone)))
            .filter(|detection| detection.has_dst_issue);

        let profile = NineStarKiProfile {
            principal_star: principal,
            month_star: month,
            energetic_star: energetic,
            birth_date: at,
            birth_time: input.time.clone(),
            timezone: input.timezone.clone(),
            solar_year,
            solar_month: month_index as u8 + 1,
            solar_year_start: li_chun,
            method: input.method,
            warnings,
            calculated_at: Utc::now(),
            metadata: ProfileMetadata {
                principal: star_metadata(principal),
                month: star_metadata(month),
                energetic: star_metadata(energetic),
            },
            confidence,
            dst_issue,
        };

        log::debug!("{} -> {} (solar year {})", input.date, profile.shorthand(), solar_year);
        Ok(profile)
    }

    pub fn detect_dst(&self, input: &CalculationInput) -> Result<DstIssueDetection> {
        let birth = input::parse_birth(input, self.config.min_year, self.config.max_year)?;
        if !birth.has_time {
            return Ok(DstIssueDetection::none());
        }
        Ok(dst::detect_dst_issues_local(birth.wall_clock, input.timezone.as_deref()))
    }

    pub fn current_year_cycle(&self, principal: StarNumber, at: DateTime<Utc>) -> Result<YearCycle> {
        cycles::current_year_cycle(principal, at)
    }

    /// Uses the configured `years_ahead`.
    pub fn all_year_cycles(&self, principal: StarNumber, birth_year: i32) -> Result<Vec<YearCycleEntry>> {
        cycles::all_year_cycles(principal, birth_year, self.config.years_ahead)
    }

    pub fn year_cycle_timeline(&self, principal: StarNumber, at: DateTime<Utc>) -> Result<YearCycleTimeline> {
        cycles::year_cycle_timeline(principal, at)
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static::lazy_static! {
    static ref DEFAULT_CALCULATOR: Calculator = Calculator::new();
}

pub fn calculate_profile(input: &CalculationInput) -> Result<NineStarKiProfile> {
    DEFAULT_CALCULATOR.calculate_profile(input)
}

pub fn format_profile_shorthand(profile: &NineStarKiProfile) -> String {
    profile.shorthand()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InputError, KyuseiError};

    #[test]
    fn test_config_defaults() {
        let config = CalculatorConfig::default();
        assert_eq!(config.strategy, TermStrategy::Fixed);
        assert_eq!((config.min_year, config.max_year), (1900, 2100));
        assert_eq!(config.warning_window_days, 3);
        assert_eq!(config.years_ahead, 30);
    }

    #[test]
    fn test_override_suppresses_annotations() {
        let profile = calculate_profile(&CalculationInput::new("2000-01-01")).unwrap();
        assert_eq!(profile.shorthand(), "1.6.9");
        assert_eq!(profile.solar_year, 1999);
        assert_eq!(profile.solar_month, 11);
        assert!(profile.warnings.is_empty());
        assert!(profile.confidence.is_none());
    }

    #[test]
    fn test_empty_chain_uses_tables() {
        let calculator = Calculator::new().with_overrides(OverrideChain::empty());
        let profile = calculator.calculate_profile(&CalculationInput::new("1986-02-03")).unwrap();
        assert_eq!(profile.shorthand(), "6.6.5");
        assert!(profile.confidence.is_some());
    }

    #[test]
    fn test_configured_year_range() {
        let calculator = Calculator::with_config(CalculatorConfig {
            min_year: 1950,
            ..CalculatorConfig::default()
        });
        let err = calculator.calculate_profile(&CalculationInput::new("1940-06-01")).unwrap_err();
        assert_eq!(
            err,
            KyuseiError::InvalidInput(InputError::YearOutOfRange {
                year: 1940,
                min: 1950,
                max: 2100
            })
        );
        assert_eq!(
            calculator.validate(&CalculationInput::new("1940-06-01")).error.as_deref(),
            Some("Year must be between 1950 and 2100")
        );
    }

    #[test]
    fn test_bare_date_has_no_dst_issue() {
        for timezone in ["Europe/London", "Europe/Berlin", "America/New_York"] {
            let input = CalculationInput::new("1990-07-10").with_timezone(timezone);
            let profile = calculate_profile(&input).unwrap();
            assert!(profile.dst_issue.is_none(), "{}", timezone);
            assert!(!Calculator::new().detect_dst(&input).unwrap().has_dst_issue, "{}", timezone);
        }
    }

    #[test]
    fn test_skipped_hour_is_still_flagged() {
        let input = CalculationInput::new("2024-03-10")
            .with_time("02:30")
            .with_timezone("America/New_York");
        let profile = calculate_profile(&input).unwrap();
        let issue = profile.dst_issue.unwrap();
        assert_eq!(issue.affected_hour, 2);
        assert!(!issue.time_exists);
    }
}
