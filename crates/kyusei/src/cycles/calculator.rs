//! Position of a person in the nine-year cycle.
//!
//! Every principal star sits at its own number in solar year 2022 and moves
//! one step per solar year after that.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::cycles::data::{year_cycle_data, YearCycle};
use crate::error::Result;
use crate::solar::resolver::solar_year_for_date;
use crate::solar::terms::noon_utc;
use crate::types::StarNumber;

pub const CYCLE_REFERENCE_YEAR: i32 = 2022;
pub const DEFAULT_YEARS_AHEAD: i32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearCycleEntry {
    pub calendar_year: i32,
    pub solar_year: i32,
    pub cycle_number: StarNumber,
    pub cycle: YearCycle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearCycleInfo {
    #[serde(flatten)]
    pub cycle: YearCycle,
    pub solar_year: i32,
    /// Li Chun of `solar_year`
    pub start_date: DateTime<Utc>,
    /// Day before the next Li Chun
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearCycleTimeline {
    pub previous: YearCycleInfo,
    pub current: YearCycleInfo,
    pub next: YearCycleInfo,
    pub solar_year: i32,
}

pub fn cycle_number(principal: StarNumber, solar_year: i32) -> StarNumber {
    let position = (principal.get() as i64 + (solar_year as i64 - CYCLE_REFERENCE_YEAR as i64)).rem_euclid(9);
    StarNumber(if position == 0 { 9 } else { position as u8 })
}

pub fn current_year_cycle(principal: StarNumber, at: DateTime<Utc>) -> Result<YearCycle> {
    let solar_year = solar_year_for_date(at).solar_year;
    year_cycle_data(cycle_number(principal, solar_year))
}

/// Entries for `birth_year ..= today.year() + years_ahead`. Solar year is
/// taken equal to the calendar year.
pub fn all_year_cycles_until(
    principal: StarNumber,
    birth_year: i32,
    today: DateTime<Utc>,
    years_ahead: i32,
) -> Result<Vec<YearCycleEntry>> {
    let last = today.year().saturating_add(years_ahead);
    (birth_year..=last)
        .map(|year| {
            let number = cycle_number(principal, year);
            Ok(YearCycleEntry {
                calendar_year: year,
                solar_year: year,
                cycle_number: number,
                cycle: year_cycle_data(number)?,
            })
        })
        .collect()
}

pub fn all_year_cycles(principal: StarNumber, birth_year: i32, years_ahead: i32) -> Result<Vec<YearCycleEntry>> {
    all_year_cycles_until(principal, birth_year, Utc::now(), years_ahead)
}

fn cycle_info(principal: StarNumber, solar_year: i32, today: Option<DateTime<Utc>>) -> Result<YearCycleInfo> {
    let start_date = noon_utc(solar_year, 2, 4);
    let end_date = (noon_utc(solar_year.saturating_add(1), 2, 4) - Duration::days(1)).date_naive();
    let days_remaining = today.map(|at| (end_date - at.date_naive()).num_days());

    Ok(YearCycleInfo {
        cycle: year_cycle_data(cycle_number(principal, solar_year))?,
        solar_year,
        start_date,
        end_date,
        days_remaining,
    })
}

/// The solar year containing `at` with its neighbours on either side.
pub fn year_cycle_timeline(principal: StarNumber, at: DateTime<Utc>) -> Result<YearCycleTimeline> {
    let solar_year = solar_year_for_date(at).solar_year;

    Ok(YearCycleTimeline {
        previous: cycle_info(principal, solar_year - 1, None)?,
        current: cycle_info(principal, solar_year, Some(at))?,
        next: cycle_info(principal, solar_year + 1, None)?,
        solar_year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn star(n: u8) -> StarNumber {
        StarNumber::new(n).unwrap()
    }

    #[test]
    fn test_reference_year_identity() {
        for p in StarNumber::all() {
            assert_eq!(cycle_number(p, CYCLE_REFERENCE_YEAR), p);
        }
    }

    #[test]
    fn test_wraps_before_reference_year() {
        assert_eq!(cycle_number(star(1), 2021).get(), 9);
        assert_eq!(cycle_number(star(1), 2013).get(), 1);
        assert_eq!(cycle_number(star(1), 2012).get(), 9);
        assert_eq!(cycle_number(star(5), 2026).get(), 9);
        assert_eq!(cycle_number(star(5), 2027).get(), 1);
    }

    #[test]
    fn test_timeline_spans() {
        let at = Utc.with_ymd_and_hms(2024, 2, 3, 12, 0, 0).unwrap();
        let timeline = year_cycle_timeline(star(1), at).unwrap();
        assert_eq!(timeline.solar_year, 2023);
        assert_eq!(timeline.current.cycle.number.get(), 2);
        assert_eq!(timeline.current.end_date, NaiveDate::from_ymd_opt(2024, 2, 3).unwrap());
        assert_eq!(timeline.current.days_remaining, Some(0));
        assert_eq!(timeline.previous.cycle.number.get(), 1);
        assert_eq!(timeline.next.cycle.number.get(), 3);
        assert!(timeline.next.days_remaining.is_none());
    }
}
