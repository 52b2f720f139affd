//! Daylight-saving edge cases around the supplied birth time.
//!
//! Everything here is advisory: it annotates a profile and never blocks a
//! calculation.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::input::{parse_date_part, parse_time, parse_timezone};
use crate::solar::resolver::solar_year_for_date;
use crate::solar::terms::noon_utc;
use crate::types::CalculationInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstIssueType {
    SpringForwardMissing,
    FallBackAmbiguous,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DstAlternative {
    pub time: String,
    pub description: String,
    pub solar_year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DstIssueDetection {
    pub has_dst_issue: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<DstIssueType>,
    pub time_exists: bool,
    /// -1 when there is no issue
    pub affected_hour: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<DstAlternative>,
}

impl DstIssueDetection {
    pub fn none() -> Self {
        Self {
            has_dst_issue: false,
            issue_type: None,
            time_exists: true,
            affected_hour: -1,
            warning: None,
            alternatives: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    SpringForward,
    FallBack,
}

/// Local dates on which the zone's UTC offset changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DstTransitions {
    pub spring_forward: Option<NaiveDate>,
    pub fall_back: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedHours {
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DstTransition {
    pub kind: TransitionKind,
    pub transition_date: NaiveDate,
    pub message: String,
    pub suggestion: String,
    pub affected_hours: AffectedHours,
    pub alternatives: Vec<DstAlternative>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DstWarning {
    pub has_dst: bool,
    pub is_transition_date: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<DstTransition>,
}

impl DstWarning {
    fn plain(has_dst: bool) -> Self {
        Self {
            has_dst,
            is_transition_date: false,
            transition: None,
        }
    }
}

fn offset_seconds(tz: &Tz, at: NaiveDateTime) -> i32 {
    tz.offset_from_utc_datetime(&at).fix().local_minus_utc()
}

/// Compares the UTC offset on Jan 15 and Jul 15 of `year`.
pub fn observes_dst(tz: &Tz, year: i32) -> bool {
    let sample = |month| NaiveDate::from_ymd_opt(year, month, 15).and_then(|d| d.and_hms_opt(12, 0, 0));
    match (sample(1), sample(7)) {
        (Some(winter), Some(summer)) => offset_seconds(tz, winter) != offset_seconds(tz, summer),
        _ => false,
    }
}

fn local_solar_year(date: NaiveDate) -> i32 {
    solar_year_for_date(noon_utc(date.year(), date.month(), date.day())).solar_year
}

fn hhmm(hour: i64, minute: u32) -> String {
    format!("{:02}:{:02}", hour.rem_euclid(24), minute)
}

/// Flags the wall-clock hours that DST commonly skips (2:00) or repeats (1:00)
/// in zones that observe DST at all.
pub fn detect_dst_issues_local(local: NaiveDateTime, timezone: Option<&str>) -> DstIssueDetection {
    let tz = match timezone.and_then(parse_timezone) {
        Some(tz) => tz,
        None => return DstIssueDetection::none(),
    };

    if !observes_dst(&tz, local.year()) {
        return DstIssueDetection::none();
    }

    let hour = local.hour() as i64;
    let minute = local.minute();
    let solar_year = local_solar_year(local.date());
    let shown = hhmm(hour, minute);
    let name = tz.name();

    match hour {
        2 => DstIssueDetection {
            has_dst_issue: true,
            issue_type: Some(DstIssueType::SpringForwardMissing),
            time_exists: false,
            affected_hour: 2,
            warning: Some(format!(
                "This time ({}) doesn't exist in {} on this date due to DST spring forward.",
                shown, name
            )),
            alternatives: vec![
                DstAlternative {
                    time: hhmm(hour - 1, minute),
                    description: "Standard Time (before the transition)".to_string(),
                    solar_year,
                },
                DstAlternative {
                    time: hhmm(hour + 1, minute),
                    description: "Daylight Time (after the transition)".to_string(),
                    solar_year,
                },
            ],
        },
        1 => DstIssueDetection {
            has_dst_issue: true,
            issue_type: Some(DstIssueType::FallBackAmbiguous),
            time_exists: true,
            affected_hour: 1,
            warning: Some(format!(
                "This time ({}) occurred twice in {} on this date due to DST fall back.",
                shown, name
            )),
            alternatives: vec![
                DstAlternative {
                    time: shown.clone(),
                    description: "First occurrence (Daylight Time, before fall back)".to_string(),
                    solar_year,
                },
                DstAlternative {
                    time: shown.clone(),
                    description: "Second occurrence (Standard Time, after fall back)".to_string(),
                    solar_year,
                },
            ],
        },
        _ => DstIssueDetection::none(),
    }
}

/// [`detect_dst_issues_local`] for an absolute instant, viewed on the zone's
/// wall clock.
pub fn detect_dst_issues(at: DateTime<Utc>, timezone: Option<&str>) -> DstIssueDetection {
    match timezone.and_then(parse_timezone) {
        Some(tz) => detect_dst_issues_local(at.with_timezone(&tz).naive_local(), timezone),
        None => DstIssueDetection::none(),
    }
}

/// Scans every day of `year` for a change in UTC offset.
///
/// A larger offset after the change is a spring-forward date, a smaller one a
/// fall-back date. Offsets are sampled at 12:00 UTC.
pub fn dst_transitions(tz: &Tz, year: i32) -> DstTransitions {
    let mut transitions = DstTransitions::default();
    let (first, last) = match (NaiveDate::from_ymd_opt(year, 1, 1), NaiveDate::from_ymd_opt(year, 12, 31)) {
        (Some(first), Some(last)) => (first, last),
        _ => return transitions,
    };

    let sample = |date: NaiveDate| date.and_hms_opt(12, 0, 0).map(|at| offset_seconds(tz, at));
    let mut previous = sample(first);
    let mut date = first;
    while date < last {
        date += Duration::days(1);
        let current = sample(date);
        if let (Some(before), Some(after)) = (previous, current) {
            if after > before {
                transitions.spring_forward = Some(date);
            } else if after < before {
                transitions.fall_back = Some(date);
            }
        }
        previous = current;
    }
    transitions
}

/// Precise check of the supplied wall-clock time against the zone's actual
/// transition dates. Requires both a time and a timezone.
pub fn check_dst_transition(input: &CalculationInput) -> DstWarning {
    let (time, timezone) = match (&input.time, &input.timezone) {
        (Some(time), Some(timezone)) => (time.as_str(), timezone.as_str()),
        _ => return DstWarning::plain(false),
    };
    let (date, (hour, minute), tz) = match (parse_date_part(&input.date), parse_time(time), parse_timezone(timezone)) {
        (Some(date), Some(hm), Some(tz)) => (date, hm, tz),
        _ => return DstWarning::plain(false),
    };

    if !observes_dst(&tz, date.year()) {
        return DstWarning::plain(false);
    }

    let transitions = dst_transitions(&tz, date.year());
    let kind = if transitions.spring_forward == Some(date) {
        TransitionKind::SpringForward
    } else if transitions.fall_back == Some(date) {
        TransitionKind::FallBack
    } else {
        return DstWarning::plain(true);
    };

    let wall_clock = match date.and_hms_opt(hour, minute, 0) {
        Some(wall_clock) => wall_clock,
        None => return DstWarning::plain(true),
    };
    let solar_year = local_solar_year(date);
    let affected_hours = AffectedHours {
        start: hour,
        end: hour + 1,
    };

    let transition = match (kind, tz.from_local_datetime(&wall_clock)) {
        (TransitionKind::SpringForward, LocalResult::None) => {
            let before = hhmm(hour as i64 - 1, minute);
            let after = hhmm(hour as i64 + 1, minute);
            DstTransition {
                kind,
                transition_date: date,
                message: format!(
                    "Your birth time ({}) falls during the \"spring forward\" hour that doesn't exist in {}.",
                    time, timezone
                ),
                suggestion: "This time never occurred on this date due to DST. Please verify which time you meant."
                    .to_string(),
                affected_hours,
                alternatives: vec![
                    DstAlternative {
                        description: format!("{} Standard Time (before DST transition)", before),
                        time: before,
                        solar_year,
                    },
                    DstAlternative {
                        description: format!("{} Daylight Time (after DST transition)", after),
                        time: after,
                        solar_year,
                    },
                ],
            }
        }
        (TransitionKind::FallBack, LocalResult::Ambiguous(_, _)) => DstTransition {
            kind,
            transition_date: date,
            message: format!(
                "Your birth time ({}) occurred twice on this date due to DST \"fall back\".",
                time
            ),
            suggestion:
                "This time happened twice. Please verify if you were born during the first or second occurrence."
                    .to_string(),
            affected_hours,
            alternatives: vec![
                DstAlternative {
                    time: time.to_string(),
                    description: format!("First {} (Daylight Time, before fall back)", time),
                    solar_year,
                },
                DstAlternative {
                    time: time.to_string(),
                    description: format!("Second {} (Standard Time, after fall back)", time),
                    solar_year,
                },
            ],
        },
        _ => {
            return DstWarning {
                has_dst: true,
                is_transition_date: true,
                transition: None,
            }
        }
    };

    DstWarning {
        has_dst: true,
        is_transition_date: true,
        transition: Some(transition),
    }
}
