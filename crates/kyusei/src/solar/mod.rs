pub mod li_chun;
pub mod resolver;
pub mod terms;

pub use li_chun::{data_confidence, li_chun_instant, solar_terms_confidence, DataConfidence, SolarTermsWarning};
pub use resolver::{month_index_for, solar_year_for_date, SolarResolver, SolarYear};
pub use terms::{
    default_table, li_chun_for_year, month_boundaries, solar_terms_for_year, AstronomicalTable, FixedCalendar,
    SolarTermKind, SolarTermSource, SolarTermTable, TermStrategy, YearSolarTerms, MAJOR_TERMS,
};
