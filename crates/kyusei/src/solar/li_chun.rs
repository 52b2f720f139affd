//! Verified Li Chun instants and data-confidence ranges.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// (year, month, day, hour, minute) in UTC.
type LiChunInstant = (i32, u32, u32, u32, u32);

const VERIFIED_LI_CHUN: &[LiChunInstant] = &[
    (1920, 2, 5, 2, 23),
    (1954, 2, 4, 8, 26),
    (1963, 2, 4, 12, 51),
    (1970, 2, 4, 5, 11),
    (1971, 2, 4, 11, 27),
    (1972, 2, 4, 17, 17),
    (1977, 2, 3, 22, 24),
    (1980, 2, 4, 15, 53),
    (1985, 2, 3, 21, 0),
    (1986, 2, 4, 2, 50),
    (1990, 2, 4, 2, 8),
    (1994, 2, 4, 13, 5),
    (1995, 2, 4, 7, 15),
    (1998, 2, 4, 0, 44),
    (1999, 2, 4, 6, 33),
    (2000, 2, 4, 12, 23),
    (2005, 2, 3, 17, 30),
    (2008, 2, 4, 10, 59),
    (2010, 2, 3, 22, 38),
    (2015, 2, 4, 3, 45),
    (2020, 2, 4, 8, 53),
    (2021, 2, 3, 22, 59),
    (2022, 2, 4, 4, 51),
    (2023, 2, 4, 10, 43),
    (2024, 2, 4, 8, 11),
    (2025, 2, 3, 22, 10),
];

pub const VERIFIED_FIRST_YEAR: i32 = 1920;
pub const VERIFIED_LAST_YEAR: i32 = 2030;
pub const HISTORICAL_FIRST_YEAR: i32 = 1800;

/// Exact Li Chun instant for `year`, if it is in the verified table.
pub fn li_chun_instant(year: i32) -> Option<DateTime<Utc>> {
    VERIFIED_LI_CHUN
        .iter()
        .find(|entry| entry.0 == year)
        .and_then(|&(y, month, day, hour, minute)| {
            Utc.with_ymd_and_hms(y, month, day, hour, minute, 0).single()
        })
}

/// Years that have an exact Li Chun instant.
pub fn verified_li_chun_years() -> impl Iterator<Item = i32> {
    VERIFIED_LI_CHUN.iter().map(|entry| entry.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataConfidence {
    Verified,
    Historical,
    Projected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarTermsWarning {
    pub has_warning: bool,
    pub confidence: DataConfidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub fn data_confidence(year: i32) -> DataConfidence {
    if (VERIFIED_FIRST_YEAR..=VERIFIED_LAST_YEAR).contains(&year) {
        DataConfidence::Verified
    } else if (HISTORICAL_FIRST_YEAR..VERIFIED_FIRST_YEAR).contains(&year) {
        DataConfidence::Historical
    } else {
        DataConfidence::Projected
    }
}

/// How far the solar term dates for `year` can be trusted.
pub fn solar_terms_confidence(year: i32) -> SolarTermsWarning {
    let confidence = data_confidence(year);
    let message = match confidence {
        DataConfidence::Verified => None,
        DataConfidence::Historical => Some(format!(
            "Data for year {} is based on historical approximations. Solar term dates may vary by ±1-2 days from actual values.",
            year
        )),
        DataConfidence::Projected => Some(format!(
            "Data for year {} is an astronomical projection. Solar term dates may vary by ±1-2 days from actual values.",
            year
        )),
    };

    SolarTermsWarning {
        has_warning: message.is_some(),
        confidence,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verified_instant_lookup() {
        let instant = li_chun_instant(1985).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(1985, 2, 3, 21, 0, 0).unwrap());
        assert!(li_chun_instant(1950).is_none());
    }

    #[test]
    fn test_confidence_ranges() {
        assert_eq!(data_confidence(1920), DataConfidence::Verified);
        assert_eq!(data_confidence(2030), DataConfidence::Verified);
        assert_eq!(data_confidence(1919), DataConfidence::Historical);
        assert_eq!(data_confidence(1800), DataConfidence::Historical);
        assert_eq!(data_confidence(1799), DataConfidence::Projected);
        assert_eq!(data_confidence(2031), DataConfidence::Projected);
    }

    #[test]
    fn test_warning_messages() {
        assert!(!solar_terms_confidence(1990).has_warning);
        let historical = solar_terms_confidence(1905);
        assert!(historical.has_warning);
        assert!(historical.message.unwrap().contains("historical approximations"));
        let projected = solar_terms_confidence(2050);
        assert!(projected.message.unwrap().starts_with("Data for year 2050 is an astronomical projection"));
    }
}
