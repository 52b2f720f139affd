use chrono::{DateTime, Utc};
use thiserror::Error;

/// Rejections of caller-supplied input. The display strings are user facing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid date")]
    InvalidDate,
    #[error("Year must be between {min} and {max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
    #[error("Time must be in HH:MM format (24-hour)")]
    InvalidTime,
    #[error("Invalid timezone format")]
    InvalidTimezone,
}

/// Errors that can occur during a Nine Star Ki calculation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KyuseiError {
    #[error(transparent)]
    InvalidInput(#[from] InputError),
    #[error("Star number out of range: {0}")]
    StarOutOfRange(i64),
    #[error("No month star pattern for principal star {principal}")]
    MissingMonthPattern { principal: u8 },
    #[error("Unable to find energetic star for principal={principal}, month={month}")]
    MissingEnergeticStar { principal: u8, month: u8 },
    #[error("Year cycle data not found for cycle number {0}")]
    MissingYearCycle(u8),
    #[error("Unable to determine solar month for {datetime} (solar year {solar_year})")]
    MonthNotFound {
        datetime: DateTime<Utc>,
        solar_year: i32,
    },
}

impl KyuseiError {
    /// True for errors caused by the caller rather than by the static tables.
    pub fn is_input_error(&self) -> bool {
        matches!(self, KyuseiError::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, KyuseiError>;
