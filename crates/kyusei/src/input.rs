//! Validation and parsing of [`CalculationInput`].

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;

use crate::error::{InputError, Result};
use crate::types::{CalculationInput, ValidationResult};

pub const DEFAULT_MIN_YEAR: i32 = 1900;
pub const DEFAULT_MAX_YEAR: i32 = 2100;

lazy_static::lazy_static! {
    static ref TIME_REGEX: Regex = Regex::new(r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$").expect("valid time regex");
}

/// Offset-less date-times, read as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// A parsed birth moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthMoment {
    pub instant: DateTime<Utc>,
    /// Wall-clock time as entered, in the input's timezone (UTC without one).
    pub wall_clock: NaiveDateTime,
    /// False for a bare date, whose wall clock is only the local view of UTC midnight.
    pub has_time: bool,
}

enum DateField {
    Day(NaiveDate),
    Instant(DateTime<Utc>, NaiveDate),
}

impl DateField {
    fn day(&self) -> NaiveDate {
        match self {
            DateField::Day(day) => *day,
            DateField::Instant(_, day) => *day,
        }
    }
}

/// ISO 8601 date-time with optional seconds. `Z` or a numeric offset keeps
/// its own calendar date; no offset at all means UTC.
fn parse_date_time(date: &str) -> Option<DateField> {
    let with_offset = DateTime::parse_from_rfc3339(date)
        .or_else(|_| DateTime::parse_from_str(date, "%Y-%m-%dT%H:%M%:z"));
    if let Ok(dt) = with_offset {
        return Some(DateField::Instant(dt.with_timezone(&Utc), dt.date_naive()));
    }

    let naive = date
        .strip_suffix('Z')
        .or_else(|| date.strip_suffix('z'))
        .unwrap_or(date);
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
        .map(|dt| DateField::Instant(dt.and_utc(), dt.date()))
}

fn parse_date_field(date: &str) -> Option<DateField> {
    let date = date.trim();
    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(DateField::Day(day));
    }
    parse_date_time(date)
}

/// Calendar date as written: `YYYY-MM-DD`, or the date part of an ISO 8601
/// date-time in its own offset.
pub fn parse_date_part(date: &str) -> Option<NaiveDate> {
    parse_date_field(date).map(|field| field.day())
}

/// `HH:MM` on a 24-hour clock; a single-digit hour is accepted.
pub fn parse_time(time: &str) -> Option<(u32, u32)> {
    if !TIME_REGEX.is_match(time) {
        return None;
    }
    let (hour, minute) = time.split_once(':')?;
    Some((hour.parse().ok()?, minute.parse().ok()?))
}

/// An IANA zone name known to chrono-tz.
pub fn parse_timezone(timezone: &str) -> Option<Tz> {
    let timezone = timezone.trim();
    if timezone.is_empty() {
        return None;
    }
    timezone.parse::<Tz>().ok()
}

fn check_year(year: i32, min_year: i32, max_year: i32) -> std::result::Result<(), InputError> {
    if year < min_year || year > max_year {
        return Err(InputError::YearOutOfRange {
            year,
            min: min_year,
            max: max_year,
        });
    }
    Ok(())
}

/// Checks in order: date, year range as written, time, timezone, and
/// finally the year of the resolved UTC instant.
pub fn check_input(input: &CalculationInput, min_year: i32, max_year: i32) -> std::result::Result<(), InputError> {
    resolve_birth(input, min_year, max_year).map(|_| ())
}

pub fn validate_in_range(input: &CalculationInput, min_year: i32, max_year: i32) -> ValidationResult {
    match check_input(input, min_year, max_year) {
        Ok(()) => ValidationResult::valid(),
        Err(e) => ValidationResult::invalid(e.to_string()),
    }
}

/// Validation against the default 1900..=2100 range.
pub fn validate_calculation_input(input: &CalculationInput) -> ValidationResult {
    validate_in_range(input, DEFAULT_MIN_YEAR, DEFAULT_MAX_YEAR)
}

/// Resolves a wall-clock time in `tz`.
///
/// An ambiguous time takes the earlier instant. A skipped time is read with
/// the offset in force before the gap, which lands it after the gap.
pub fn resolve_local(tz: &Tz, wall_clock: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&wall_clock) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            let before_gap = wall_clock - Duration::hours(24);
            let offset = tz.offset_from_utc_datetime(&before_gap).fix().local_minus_utc();
            (wall_clock - Duration::seconds(offset as i64)).and_utc()
        }
    }
}

fn resolve_birth(input: &CalculationInput, min_year: i32, max_year: i32) -> std::result::Result<BirthMoment, InputError> {
    let field = parse_date_field(&input.date).ok_or(InputError::InvalidDate)?;
    check_year(field.day().year(), min_year, max_year)?;

    let time = match &input.time {
        Some(time) => {
            let (hour, minute) = parse_time(time).ok_or(InputError::InvalidTime)?;
            Some(NaiveTime::from_hms_opt(hour, minute, 0).ok_or(InputError::InvalidTime)?)
        }
        None => None,
    };
    let tz = match &input.timezone {
        Some(timezone) => Some(parse_timezone(timezone).ok_or(InputError::InvalidTimezone)?),
        None => None,
    };

    let moment = match (time, field) {
        (Some(time), field) => {
            let wall_clock = field.day().and_time(time);
            let instant = match &tz {
                Some(tz) => resolve_local(tz, wall_clock),
                None => wall_clock.and_utc(),
            };
            BirthMoment {
                instant,
                wall_clock,
                has_time: true,
            }
        }
        (None, DateField::Instant(instant, _)) => BirthMoment {
            instant,
            wall_clock: local_view(instant, tz.as_ref()),
            has_time: true,
        },
        (None, DateField::Day(day)) => {
            let instant = day.and_hms_opt(0, 0, 0).ok_or(InputError::InvalidDate)?.and_utc();
            BirthMoment {
                instant,
                wall_clock: local_view(instant, tz.as_ref()),
                has_time: false,
            }
        }
    };

    check_year(moment.instant.year(), min_year, max_year)?;
    Ok(moment)
}

/// Validates `input` and resolves it to a UTC instant.
pub fn parse_birth(input: &CalculationInput, min_year: i32, max_year: i32) -> Result<BirthMoment> {
    Ok(resolve_birth(input, min_year, max_year)?)
}

fn local_view(instant: DateTime<Utc>, tz: Option<&Tz>) -> NaiveDateTime {
    match tz {
        Some(tz) => instant.with_timezone(tz).naive_local(),
        None => instant.naive_utc(),
    }
}

/// UTC instant for `input` under the default year range.
pub fn parse_birth_instant(input: &CalculationInput) -> Result<DateTime<Utc>> {
    parse_birth(input, DEFAULT_MIN_YEAR, DEFAULT_MAX_YEAR).map(|moment| moment.instant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_time_format() {
        assert_eq!(parse_time("9:05"), Some((9, 5)));
        assert_eq!(parse_time("23:59"), Some((23, 59)));
        assert_eq!(parse_time("24:00"), None);
        assert_eq!(parse_time("12:60"), None);
        assert_eq!(parse_time("12:5"), None);
    }

    #[test]
    fn test_bare_date_is_utc_midnight() {
        let instant = parse_birth_instant(&CalculationInput::new("1990-07-10")).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(1990, 7, 10, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_rfc3339_keeps_instant() {
        let instant = parse_birth_instant(&CalculationInput::new("2024-02-04T18:00:00-08:00")).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 2, 5, 2, 0, 0).unwrap());
    }

    #[test]
    fn test_local_time_in_zone() {
        let input = CalculationInput::new("2024-02-04")
            .with_time("18:00")
            .with_timezone("America/Los_Angeles");
        let moment = parse_birth(&input, DEFAULT_MIN_YEAR, DEFAULT_MAX_YEAR).unwrap();
        assert_eq!(moment.instant, Utc.with_ymd_and_hms(2024, 2, 5, 2, 0, 0).unwrap());
        assert_eq!(moment.wall_clock.hour(), 18);
    }

    #[test]
    fn test_skipped_time_moves_past_gap() {
        let tz: Tz = "America/New_York".parse().unwrap();
        let wall_clock = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap().and_hms_opt(2, 30, 0).unwrap();
        // Read as EST: 07:30 UTC, which is 03:30 EDT.
        assert_eq!(resolve_local(&tz, wall_clock), Utc.with_ymd_and_hms(2024, 3, 10, 7, 30, 0).unwrap());
    }

    #[test]
    fn test_repeated_time_takes_first() {
        let tz: Tz = "America/New_York".parse().unwrap();
        let wall_clock = NaiveDate::from_ymd_opt(2024, 11, 3).unwrap().and_hms_opt(1, 30, 0).unwrap();
        // First occurrence is EDT (UTC-4).
        assert_eq!(resolve_local(&tz, wall_clock), Utc.with_ymd_and_hms(2024, 11, 3, 5, 30, 0).unwrap());
    }

    #[test]
    fn test_iso_date_times_without_seconds() {
        let expected = Utc.with_ymd_and_hms(1986, 3, 15, 12, 0, 0).unwrap();
        for date in [
            "1986-03-15T12:00Z",
            "1986-03-15T12:00",
            "1986-03-15T12:00:00",
            "1986-03-15T12:00:00.000Z",
            "1986-03-15T14:00+02:00",
        ] {
            assert_eq!(parse_birth_instant(&CalculationInput::new(date)).unwrap(), expected, "{}", date);
        }
        assert_eq!(parse_date_part("1986-03-16T01:00+13:00"), NaiveDate::from_ymd_opt(1986, 3, 16));
        assert!(parse_date_part("1986-03-15T12").is_none());
    }

    #[test]
    fn test_bare_date_has_no_time() {
        let input = CalculationInput::new("1990-07-10").with_timezone("Europe/London");
        assert!(!parse_birth(&input, DEFAULT_MIN_YEAR, DEFAULT_MAX_YEAR).unwrap().has_time);
        let timed = input.clone().with_time("01:00");
        assert!(parse_birth(&timed, DEFAULT_MIN_YEAR, DEFAULT_MAX_YEAR).unwrap().has_time);
    }

    #[test]
    fn test_year_range_applies_to_resolved_instant() {
        let late = CalculationInput::new("2100-12-31T23:00:00-05:00");
        assert_eq!(
            check_input(&late, DEFAULT_MIN_YEAR, DEFAULT_MAX_YEAR),
            Err(InputError::YearOutOfRange {
                year: 2101,
                min: 1900,
                max: 2100
            })
        );
        let early = CalculationInput::new("1900-01-01").with_time("00:30").with_timezone("Asia/Tokyo");
        assert!(check_input(&early, DEFAULT_MIN_YEAR, DEFAULT_MAX_YEAR).is_err());
        let last = CalculationInput::new("2100-12-31T23:00:00Z");
        assert!(check_input(&last, DEFAULT_MIN_YEAR, DEFAULT_MAX_YEAR).is_ok());
    }

    #[test]
    fn test_validation_order() {
        let input = CalculationInput::new("1800-01-01").with_time("99:99");
        assert_eq!(
            check_input(&input, DEFAULT_MIN_YEAR, DEFAULT_MAX_YEAR),
            Err(InputError::YearOutOfRange {
                year: 1800,
                min: 1900,
                max: 2100
            })
        );
    }
}
