use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::dst::DstIssueDetection;
use crate::error::{KyuseiError, Result};
use crate::stars::metadata::StarMetadata;

/// A star number in the range 1..=9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StarNumber(pub(crate) u8);

impl StarNumber {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 9;

    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(KyuseiError::StarOutOfRange(value as i64))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position, for indexing 9-wide tables.
    pub(crate) fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    pub fn all() -> impl Iterator<Item = StarNumber> {
        (Self::MIN..=Self::MAX).map(StarNumber)
    }
}

impl TryFrom<u8> for StarNumber {
    type Error = KyuseiError;

    fn try_from(value: u8) -> Result<Self> {
        StarNumber::new(value)
    }
}

impl From<StarNumber> for u8 {
    fn from(star: StarNumber) -> u8 {
        star.0
    }
}

impl fmt::Display for StarNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CalculationMethod {
    #[default]
    #[serde(rename = "traditional")]
    Traditional,
    #[serde(rename = "chinese-ascending")]
    ChineseAscending,
}

impl CalculationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationMethod::Traditional => "traditional",
            CalculationMethod::ChineseAscending => "chinese-ascending",
        }
    }
}

impl FromStr for CalculationMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "traditional" => Ok(CalculationMethod::Traditional),
            "chinese-ascending" => Ok(CalculationMethod::ChineseAscending),
            other => Err(format!("Unknown calculation method: {}", other)),
        }
    }
}

/// Raw birth data as entered by the user.
///
/// `date` is either `YYYY-MM-DD` or an RFC 3339 date-time. `time` is a 24-hour
/// `HH:MM` wall-clock time, local to `timezone` when one is given and UTC
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default)]
    pub method: CalculationMethod,
}

impl CalculationInput {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: None,
            timezone: None,
            method: CalculationMethod::default(),
        }
    }

    /// Input for an exact instant, carried as an RFC 3339 string.
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self::new(instant.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn with_method(mut self, method: CalculationMethod) -> Self {
        self.method = method;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self { is_valid: true, error: None }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    LiChunBoundary,
    SolarTermBoundary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryDirection {
    Before,
    After,
}

impl BoundaryDirection {
    pub fn as_upper(&self) -> &'static str {
        match self {
            BoundaryDirection::Before => "BEFORE",
            BoundaryDirection::After => "AFTER",
        }
    }
}

/// How much birth-time precision matters near a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactZone {
    High,
    Medium,
    Low,
}

impl ImpactZone {
    pub fn from_hours(hours: i64) -> Self {
        if hours <= 24 {
            ImpactZone::High
        } else if hours <= 72 {
            ImpactZone::Medium
        } else {
            ImpactZone::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryWarning {
    #[serde(rename = "type")]
    pub kind: WarningType,
    pub term: String,
    pub term_date: DateTime<Utc>,
    pub days_difference: i64,
    pub hours_to_term: i64,
    pub minutes_to_term: i64,
    pub direction: BoundaryDirection,
    pub term_time: String,
    pub impact_zone: ImpactZone,
    pub message: String,
}

/// Ordered from least to most confident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffectedStar {
    Principal,
    Month,
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestBoundary {
    pub name: String,
    pub date: DateTime<Utc>,
    pub affected_star: AffectedStar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceScore {
    pub level: ConfidenceLevel,
    /// 0-100, one decimal place
    pub percentage: f64,
    pub days_from_boundary: f64,
    pub nearest_boundary: NearestBoundary,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    pub overall: ConfidenceScore,
    pub principal: ConfidenceScore,
    pub month: ConfidenceScore,
    pub energetic: ConfidenceScore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileMetadata {
    pub principal: StarMetadata,
    pub month: StarMetadata,
    pub energetic: StarMetadata,
}

/// The result of one calculation. Built once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NineStarKiProfile {
    pub principal_star: StarNumber,
    pub month_star: StarNumber,
    pub energetic_star: StarNumber,

    pub birth_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    pub solar_year: i32,
    /// 1 = the month opened by Li Chun, 12 = the month opened by Xiao Han
    pub solar_month: u8,
    pub solar_year_start: DateTime<Utc>,

    pub method: CalculationMethod,
    pub warnings: Vec<BoundaryWarning>,
    pub calculated_at: DateTime<Utc>,

    pub metadata: ProfileMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<ConfidenceBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst_issue: Option<DstIssueDetection>,
}

impl NineStarKiProfile {
    pub fn shorthand(&self) -> String {
        format!("{}.{}.{}", self.principal_star, self.month_star, self.energetic_star)
    }
}
