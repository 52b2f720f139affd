//! The twelve major solar terms (jieqi) and the strategies that date them.
//!
//! A solar year runs from Li Chun to the next Li Chun and is cut into twelve
//! solar months, each opened by one of the terms below. Xiao Han, the last
//! boundary, falls in January of the following Gregorian year.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::solar::li_chun::li_chun_instant;
use crate::solar::resolver::solar_year_for_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SolarTermKind {
    LiChun,
    JingZhe,
    QingMing,
    LiXia,
    MangZhong,
    XiaoShu,
    LiQiu,
    BaiLu,
    HanLu,
    LiDong,
    DaXue,
    XiaoHan,
}

/// Major terms in calendar order, starting at Li Chun.
pub const MAJOR_TERMS: [SolarTermKind; 12] = [
    SolarTermKind::LiChun,
    SolarTermKind::JingZhe,
    SolarTermKind::QingMing,
    SolarTermKind::LiXia,
    SolarTermKind::MangZhong,
    SolarTermKind::XiaoShu,
    SolarTermKind::LiQiu,
    SolarTermKind::BaiLu,
    SolarTermKind::HanLu,
    SolarTermKind::LiDong,
    SolarTermKind::DaXue,
    SolarTermKind::XiaoHan,
];

type TermNames = (&'static str, &'static str);

const TERM_NAMES: [TermNames; 12] = [
    ("Li Chun (立春)", "Start of Spring"),
    ("Jing Zhe (惊蛰)", "Awakening of Insects"),
    ("Qing Ming (清明)", "Clear and Bright"),
    ("Li Xia (立夏)", "Start of Summer"),
    ("Mang Zhong (芒种)", "Grain in Ear"),
    ("Xiao Shu (小暑)", "Lesser Heat"),
    ("Li Qiu (立秋)", "Start of Autumn"),
    ("Bai Lu (白露)", "White Dew"),
    ("Han Lu (寒露)", "Cold Dew"),
    ("Li Dong (立冬)", "Start of Winter"),
    ("Da Xue (大雪)", "Greater Snow"),
    ("Xiao Han (小寒)", "Lesser Cold"),
];

impl SolarTermKind {
    /// Position in the solar year, 0 = Li Chun.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Pinyin with the Chinese characters, e.g. `Li Chun (立春)`.
    pub fn display_name(self) -> &'static str {
        TERM_NAMES[self.index()].0
    }

    pub fn english_name(self) -> &'static str {
        TERM_NAMES[self.index()].1
    }
}

/// Fixed calendar dates (month, day) of the book method. Xiao Han is in year + 1.
const FIXED_DATES: [(u32, u32); 12] = [
    (2, 4),
    (3, 5),
    (4, 5),
    (5, 5),
    (6, 6),
    (7, 7),
    (8, 8),
    (9, 8),
    (10, 8),
    (11, 7),
    (12, 7),
    (1, 5),
];

/// Solar month start dates. The book method resolves months against these
/// rather than [`FIXED_DATES`]; the astronomical table uses them as
/// approximations for every term other than Li Chun.
const MONTH_START_DATES: [(u32, u32); 12] = [
    (2, 4),
    (3, 6),
    (4, 5),
    (5, 6),
    (6, 6),
    (7, 7),
    (8, 8),
    (9, 8),
    (10, 8),
    (11, 8),
    (12, 7),
    (1, 6),
];

/// Noon UTC on the given date. Saturates for years chrono cannot represent.
pub(crate) fn noon_utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or(if year < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

fn terms_from_dates(year: i32, dates: &[(u32, u32); 12]) -> [DateTime<Utc>; 12] {
    let mut boundaries = [DateTime::<Utc>::MIN_UTC; 12];
    for (i, &(month, day)) in dates.iter().enumerate() {
        let term_year = if i == 11 { year.saturating_add(1) } else { year };
        boundaries[i] = noon_utc(term_year, month, day);
    }
    boundaries
}

/// The twelve boundary instants of one solar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSolarTerms {
    pub year: i32,
    pub boundaries: [DateTime<Utc>; 12],
}

impl YearSolarTerms {
    pub fn get(&self, kind: SolarTermKind) -> DateTime<Utc> {
        self.boundaries[kind.index()]
    }

    pub fn li_chun(&self) -> DateTime<Utc> {
        self.get(SolarTermKind::LiChun)
    }

    pub fn xiao_han(&self) -> DateTime<Utc> {
        self.get(SolarTermKind::XiaoHan)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SolarTermKind, DateTime<Utc>)> + '_ {
        MAJOR_TERMS.iter().map(move |&kind| (kind, self.get(kind)))
    }

    pub fn is_strictly_increasing(&self) -> bool {
        self.boundaries.windows(2).all(|pair| pair[0] < pair[1])
    }
}

/// A source of solar term dates.
///
/// Implementations must return strictly increasing boundaries whose Li Chun
/// agrees with [`SolarTermSource::li_chun`] for the same year.
pub trait SolarTermSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn li_chun(&self, year: i32) -> DateTime<Utc>;

    fn terms_for_year(&self, year: i32) -> YearSolarTerms;

    /// Solar year containing `at`.
    fn solar_year(&self, at: DateTime<Utc>) -> i32 {
        let year = at.year();
        if at < self.li_chun(year) {
            year - 1
        } else {
            year
        }
    }

    /// Instants at which each of the twelve solar months begins.
    fn month_starts(&self, year: i32) -> [DateTime<Utc>; 12] {
        self.terms_for_year(year).boundaries
    }

    /// When true, boundaries are compared by UTC calendar day and a boundary
    /// day belongs entirely to the month it opens.
    fn day_granular(&self) -> bool {
        false
    }
}

/// Book method: every boundary on the same calendar date at 12:00 UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedCalendar;

impl SolarTermSource for FixedCalendar {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn li_chun(&self, year: i32) -> DateTime<Utc> {
        noon_utc(year, 2, 4)
    }

    fn terms_for_year(&self, year: i32) -> YearSolarTerms {
        YearSolarTerms {
            year,
            boundaries: terms_from_dates(year, &FIXED_DATES),
        }
    }

    fn solar_year(&self, at: DateTime<Utc>) -> i32 {
        solar_year_for_date(at).solar_year
    }

    fn month_starts(&self, year: i32) -> [DateTime<Utc>; 12] {
        terms_from_dates(year, &MONTH_START_DATES)
    }

    fn day_granular(&self) -> bool {
        true
    }
}

/// Verified Li Chun instants where known, approximate dates for everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct AstronomicalTable;

impl SolarTermSource for AstronomicalTable {
    fn name(&self) -> &'static str {
        "astronomical"
    }

    fn li_chun(&self, year: i32) -> DateTime<Utc> {
        li_chun_instant(year).unwrap_or_else(|| noon_utc(year, 2, 4))
    }

    fn terms_for_year(&self, year: i32) -> YearSolarTerms {
        let mut boundaries = terms_from_dates(year, &MONTH_START_DATES);
        boundaries[0] = self.li_chun(year);
        YearSolarTerms { year, boundaries }
    }
}

/// Selects a [`SolarTermSource`] by name, e.g. from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermStrategy {
    #[default]
    Fixed,
    Astronomical,
}

impl TermStrategy {
    pub fn source(self) -> Arc<dyn SolarTermSource> {
        match self {
            TermStrategy::Fixed => Arc::new(FixedCalendar),
            TermStrategy::Astronomical => Arc::new(AstronomicalTable),
        }
    }
}

impl std::str::FromStr for TermStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(TermStrategy::Fixed),
            "astronomical" => Ok(TermStrategy::Astronomical),
            other => Err(format!("Unknown solar term strategy: {}", other)),
        }
    }
}

/// Memoising wrapper around a [`SolarTermSource`].
///
/// Entries are pure functions of the year, so a racing duplicate insert is
/// harmless and nothing is ever invalidated.
pub struct SolarTermTable {
    source: Arc<dyn SolarTermSource>,
    cache: RwLock<HashMap<i32, YearSolarTerms>>,
}

impl SolarTermTable {
    pub fn new(source: Arc<dyn SolarTermSource>) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn fixed() -> Self {
        Self::new(Arc::new(FixedCalendar))
    }

    pub fn for_strategy(strategy: TermStrategy) -> Self {
        Self::new(strategy.source())
    }

    pub fn source(&self) -> &dyn SolarTermSource {
        self.source.as_ref()
    }

    pub fn li_chun(&self, year: i32) -> DateTime<Utc> {
        self.source.li_chun(year)
    }

    pub fn terms_for_year(&self, year: i32) -> YearSolarTerms {
        if let Ok(cache) = self.cache.read() {
            if let Some(terms) = cache.get(&year) {
                return *terms;
            }
        }

        let terms = self.source.terms_for_year(year);
        if let Ok(mut cache) = self.cache.write() {
            cache.entry(year).or_insert(terms);
            log::debug!("cached {} solar terms for {}", self.source.name(), year);
        }
        terms
    }

    pub fn month_starts(&self, year: i32) -> [DateTime<Utc>; 12] {
        self.source.month_starts(year)
    }

    pub fn cached_years(&self) -> usize {
        self.cache.read().map(|c| c.len()).unwrap_or(0)
    }
}

impl fmt::Debug for SolarTermTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolarTermTable")
            .field("source", &self.source.name())
            .field("cached_years", &self.cached_years())
            .finish()
    }
}

lazy_static::lazy_static! {
    static ref DEFAULT_TABLE: Arc<SolarTermTable> = Arc::new(SolarTermTable::fixed());
}

/// Process-wide fixed-calendar table.
pub fn default_table() -> Arc<SolarTermTable> {
    Arc::clone(&DEFAULT_TABLE)
}

/// Solar terms for `year` from the process-wide fixed-calendar table.
pub fn solar_terms_for_year(year: i32) -> YearSolarTerms {
    DEFAULT_TABLE.terms_for_year(year)
}

/// Li Chun of `year` under the fixed calendar.
pub fn li_chun_for_year(year: i32) -> DateTime<Utc> {
    DEFAULT_TABLE.li_chun(year)
}

/// The twelve month-opening instants of a solar year, Li Chun first.
pub fn month_boundaries(solar_year: i32) -> [DateTime<Utc>; 12] {
    DEFAULT_TABLE.month_starts(solar_year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_terms_are_noon_utc() {
        let terms = FixedCalendar.terms_for_year(2024);
        assert_eq!(terms.li_chun(), Utc.with_ymd_and_hms(2024, 2, 4, 12, 0, 0).unwrap());
        assert_eq!(terms.get(SolarTermKind::LiDong), Utc.with_ymd_and_hms(2024, 11, 7, 12, 0, 0).unwrap());
        assert_eq!(terms.xiao_han(), Utc.with_ymd_and_hms(2025, 1, 5, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_fixed_months_open_after_warning_dates() {
        let terms = FixedCalendar.terms_for_year(1990);
        let starts = FixedCalendar.month_starts(1990);
        assert_eq!(starts[0], terms.li_chun());
        assert_eq!(terms.get(SolarTermKind::JingZhe), Utc.with_ymd_and_hms(1990, 3, 5, 12, 0, 0).unwrap());
        assert_eq!(starts[1], Utc.with_ymd_and_hms(1990, 3, 6, 12, 0, 0).unwrap());
        assert_eq!(starts[3], Utc.with_ymd_and_hms(1990, 5, 6, 12, 0, 0).unwrap());
        assert_eq!(starts[9], Utc.with_ymd_and_hms(1990, 11, 8, 12, 0, 0).unwrap());
        assert_eq!(starts[11], Utc.with_ymd_and_hms(1991, 1, 6, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_astronomical_uses_verified_li_chun() {
        let terms = AstronomicalTable.terms_for_year(2021);
        assert_eq!(terms.li_chun(), Utc.with_ymd_and_hms(2021, 2, 3, 22, 59, 0).unwrap());
        assert_eq!(terms.get(SolarTermKind::JingZhe), Utc.with_ymd_and_hms(2021, 3, 6, 12, 0, 0).unwrap());
        assert!(terms.is_strictly_increasing());
    }

    #[test]
    fn test_cache_fills_once_per_year() {
        let table = SolarTermTable::fixed();
        let first = table.terms_for_year(1990);
        let second = table.terms_for_year(1990);
        table.terms_for_year(1991);
        assert_eq!(first, second);
        assert_eq!(table.cached_years(), 2);
    }

    #[test]
    fn test_term_names() {
        assert_eq!(SolarTermKind::LiChun.display_name(), "Li Chun (立春)");
        assert_eq!(SolarTermKind::XiaoHan.english_name(), "Lesser Cold");
        assert_eq!(SolarTermKind::HanLu.index(), 8);
    }
}
