//! Nine Star Ki (Kyusei Kigaku) calculations.
//!
//! A birth instant is mapped onto its solar year and solar month (both
//! bounded by the twelve major solar terms, starting at Li Chun) and from
//! there onto the principal, month and energetic stars.

pub mod confidence;
pub mod cycles;
pub mod dst;
pub mod engine;
pub mod error;
pub mod input;
pub mod overrides;
pub mod solar;
pub mod stars;
pub mod types;

pub use confidence::{calculate_confidence, check_boundary_warnings, nearby_boundaries, BoundaryAnalyzer, NearbyBoundary};
pub use cycles::{
    all_year_cycles, all_year_cycles_until, current_year_cycle, cycle_number, year_cycle_timeline, YearCycle,
    YearCycleEntry, YearCycleInfo, YearCycleTimeline,
};
pub use dst::{
    check_dst_transition, detect_dst_issues, detect_dst_issues_local, dst_transitions, DstIssueDetection,
    DstIssueType, DstTransitions, DstWarning,
};
pub use engine::{calculate_profile, format_profile_shorthand, Calculator, CalculatorConfig};
pub use error::{InputError, KyuseiError, Result};
pub use input::{parse_birth_instant, validate_calculation_input};
pub use overrides::{OverrideChain, OverrideKind, OverrideSource};
pub use solar::{
    month_boundaries, month_index_for, solar_terms_confidence, solar_terms_for_year, solar_year_for_date,
    SolarTermKind, SolarTermTable, TermStrategy, YearSolarTerms,
};
pub use stars::{star_metadata, stars_by_element, stars_by_polarity, Element, Polarity, StarMetadata};
pub use types::{
    BoundaryWarning, CalculationInput, CalculationMethod, ConfidenceBreakdown, ConfidenceLevel, ConfidenceScore,
    NineStarKiProfile, StarNumber, ValidationResult,
};
