//! Boundary proximity: warnings and confidence scores.
//!
//! Near a solar term a few minutes of birth-time uncertainty can move a birth
//! into a different solar year or month. These annotations quantify that risk
//! instead of failing.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::solar::terms::{default_table, SolarTermKind, SolarTermTable};
use crate::types::{
    AffectedStar, BoundaryDirection, BoundaryWarning, ConfidenceBreakdown, ConfidenceLevel, ConfidenceScore,
    ImpactZone, NearestBoundary, WarningType,
};

pub const DEFAULT_WARNING_WINDOW_DAYS: i64 = 3;

const MS_PER_MINUTE: i64 = 60 * 1000;
const MS_PER_HOUR: f64 = 60.0 * 60.0 * 1000.0;
const MS_PER_DAY: f64 = 24.0 * MS_PER_HOUR;

/// A term within the warning window, with its distance in days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyBoundary {
    pub term: SolarTermKind,
    pub name: String,
    pub date: DateTime<Utc>,
    pub days_away: f64,
}

/// `Feb 4, 12:00 UTC`
pub fn format_term_time(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %H:%M UTC").to_string()
}

fn with_unit(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{} {}", n, unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Score for one star given its distance to the deciding boundary.
pub fn single_confidence(
    days_from_boundary: f64,
    hours_from_boundary: f64,
    has_time: bool,
    boundary_name: &str,
    boundary_date: DateTime<Utc>,
    affected_star: AffectedStar,
) -> ConfidenceScore {
    let (level, percentage, recommendation) = if days_from_boundary > 7.0 {
        (
            ConfidenceLevel::VeryHigh,
            95.0 + ((days_from_boundary - 7.0) / 3.0).min(5.0),
            "Very confident in this calculation",
        )
    } else if days_from_boundary >= 3.0 {
        let progress = (days_from_boundary - 3.0) / 4.0;
        (ConfidenceLevel::High, 85.0 + progress * 9.0, "Confident in this calculation")
    } else if days_from_boundary >= 1.0 {
        let progress = (days_from_boundary - 1.0) / 2.0;
        (
            ConfidenceLevel::Medium,
            70.0 + progress * 14.0,
            "Moderately confident - verify birth time if possible",
        )
    } else if hours_from_boundary >= 6.0 || has_time {
        let progress = if has_time { hours_from_boundary / 24.0 } else { 0.5 };
        (
            ConfidenceLevel::Low,
            50.0 + progress * 19.0,
            "Low confidence - birth time verification recommended",
        )
    } else {
        (
            ConfidenceLevel::VeryLow,
            30.0 + (hours_from_boundary / 6.0) * 20.0,
            "Very low confidence - exact birth time needed for accuracy",
        )
    };

    ConfidenceScore {
        level,
        percentage: round1(percentage).min(100.0),
        days_from_boundary: round1(days_from_boundary),
        nearest_boundary: NearestBoundary {
            name: boundary_name.to_string(),
            date: boundary_date,
            affected_star,
        },
        recommendation: recommendation.to_string(),
    }
}

/// Proximity checks against one solar term table.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryAnalyzer<'a> {
    table: &'a SolarTermTable,
    window: Duration,
}

impl<'a> BoundaryAnalyzer<'a> {
    pub fn new(table: &'a SolarTermTable, window_days: i64) -> Self {
        Self {
            table,
            window: Duration::days(window_days),
        }
    }

    fn warning_for(
        &self,
        at: DateTime<Utc>,
        term_date: DateTime<Utc>,
        kind: WarningType,
        term: &str,
    ) -> Option<BoundaryWarning> {
        let diff = at.signed_duration_since(term_date);
        let abs_ms = diff.num_milliseconds().abs();
        if abs_ms > self.window.num_milliseconds() {
            return None;
        }

        let days = (abs_ms as f64 / MS_PER_DAY).round() as i64;
        let total_minutes = abs_ms / MS_PER_MINUTE;
        let hours = total_minutes / 60;
        let minutes = total_minutes % 60;
        let direction = if diff < Duration::zero() {
            BoundaryDirection::Before
        } else {
            BoundaryDirection::After
        };
        let term_time = format_term_time(term_date);
        let star = match kind {
            WarningType::LiChunBoundary => "principal",
            WarningType::SolarTermBoundary => "month",
        };

        let message = format!(
            "Birth was {} and {} {} {} ({}). This could affect your {} star.",
            with_unit(hours, "hour"),
            with_unit(minutes, "minute"),
            direction.as_upper(),
            term,
            term_time,
            star
        );

        Some(BoundaryWarning {
            kind,
            term: term.to_string(),
            term_date,
            days_difference: days,
            hours_to_term: hours,
            minutes_to_term: minutes,
            direction,
            term_time,
            impact_zone: ImpactZone::from_hours(hours),
            message,
        })
    }

    /// Li Chun of the birth's Gregorian year first, then the other eleven
    /// terms of `solar_year` in calendar order. Nothing is merged.
    pub fn boundary_warnings(&self, at: DateTime<Utc>, solar_year: i32) -> Vec<BoundaryWarning> {
        let mut warnings = Vec::new();

        let li_chun = self.table.li_chun(at.year());
        warnings.extend(self.warning_for(
            at,
            li_chun,
            WarningType::LiChunBoundary,
            SolarTermKind::LiChun.display_name(),
        ));

        let terms = self.table.terms_for_year(solar_year);
        for (kind, date) in terms.iter().skip(1) {
            warnings.extend(self.warning_for(at, date, WarningType::SolarTermBoundary, kind.display_name()));
        }

        warnings
    }

    pub fn confidence(&self, at: DateTime<Utc>, has_time: bool, solar_year: i32) -> ConfidenceBreakdown {
        let li_chun = self.table.li_chun(at.year());
        let li_chun_ms = at.signed_duration_since(li_chun).num_milliseconds().abs() as f64;

        let terms = self.table.terms_for_year(solar_year);
        let mut nearest = (SolarTermKind::LiChun, terms.li_chun(), f64::INFINITY);
        for (kind, date) in terms.iter() {
            let distance = at.signed_duration_since(date).num_milliseconds().abs() as f64;
            if distance < nearest.2 {
                nearest = (kind, date, distance);
            }
        }
        let (month_kind, month_date, month_ms) = nearest;

        let principal = single_confidence(
            li_chun_ms / MS_PER_DAY,
            li_chun_ms / MS_PER_HOUR,
            has_time,
            SolarTermKind::LiChun.display_name(),
            li_chun,
            AffectedStar::Principal,
        );
        let month = single_confidence(
            month_ms / MS_PER_DAY,
            month_ms / MS_PER_HOUR,
            has_time,
            month_kind.display_name(),
            month_date,
            AffectedStar::Month,
        );

        let (overall_name, overall_date, overall_star) = if li_chun_ms < month_ms {
            (SolarTermKind::LiChun.display_name(), li_chun, AffectedStar::Principal)
        } else {
            (month_kind.display_name(), month_date, AffectedStar::Month)
        };
        let overall_ms = li_chun_ms.min(month_ms);
        let overall = single_confidence(
            overall_ms / MS_PER_DAY,
            overall_ms / MS_PER_HOUR,
            has_time,
            overall_name,
            overall_date,
            overall_star,
        );

        let mut energetic = overall.clone();
        energetic.nearest_boundary.affected_star = AffectedStar::Both;

        ConfidenceBreakdown {
            overall,
            principal,
            month,
            energetic,
        }
    }

    pub fn nearby_boundaries(&self, at: DateTime<Utc>, solar_year: i32) -> Vec<NearbyBoundary> {
        let window_days = self.window.num_milliseconds() as f64 / MS_PER_DAY;
        self.table
            .terms_for_year(solar_year)
            .iter()
            .filter_map(|(kind, date)| {
                let days = at.signed_duration_since(date).num_milliseconds().abs() as f64 / MS_PER_DAY;
                (days <= window_days).then(|| NearbyBoundary {
                    term: kind,
                    name: kind.display_name().to_string(),
                    date,
                    days_away: round1(days),
                })
            })
            .collect()
    }
}

/// Warnings against the fixed-calendar table with the default 3-day window.
pub fn check_boundary_warnings(at: DateTime<Utc>, solar_year: i32) -> Vec<BoundaryWarning> {
    let table = default_table();
    BoundaryAnalyzer::new(&table, DEFAULT_WARNING_WINDOW_DAYS).boundary_warnings(at, solar_year)
}

pub fn calculate_confidence(at: DateTime<Utc>, has_time: bool, solar_year: i32) -> ConfidenceBreakdown {
    let table = default_table();
    BoundaryAnalyzer::new(&table, DEFAULT_WARNING_WINDOW_DAYS).confidence(at, has_time, solar_year)
}

pub fn nearby_boundaries(at: DateTime<Utc>, solar_year: i32) -> Vec<NearbyBoundary> {
    let table = default_table();
    BoundaryAnalyzer::new(&table, DEFAULT_WARNING_WINDOW_DAYS).nearby_boundaries(at, solar_year)
}
