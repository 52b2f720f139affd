use chrono::{Duration, TimeZone, Utc};
use kyusei::confidence::{single_confidence, BoundaryAnalyzer};
use kyusei::types::{AffectedStar, BoundaryDirection, ImpactZone, WarningType};
use kyusei::{calculate_confidence, check_boundary_warnings, nearby_boundaries, ConfidenceLevel, SolarTermTable};

#[test]
fn test_day_after_li_chun() {
    let at = Utc.with_ymd_and_hms(2024, 2, 5, 12, 0, 0).unwrap();
    let warnings = check_boundary_warnings(at, 2024);
    assert_eq!(warnings.len(), 1);

    let warning = &warnings[0];
    assert_eq!(warning.kind, WarningType::LiChunBoundary);
    assert_eq!(warning.direction, BoundaryDirection::After);
    assert_eq!(warning.days_difference, 1);
    assert_eq!(warning.hours_to_term, 24);
    assert_eq!(warning.minutes_to_term, 0);
    assert_eq!(warning.impact_zone, ImpactZone::High);
    assert_eq!(
        warning.message,
        "Birth was 24 hours and 0 minutes AFTER Li Chun (立春) (Feb 4, 12:00 UTC). This could affect your principal star."
    );
}

#[test]
fn test_before_solar_term_uses_month_star() {
    let at = Utc.with_ymd_and_hms(2000, 8, 6, 10, 59, 0).unwrap();
    let warnings = check_boundary_warnings(at, 2000);
    assert_eq!(warnings.len(), 1);
    let warning = &warnings[0];
    assert_eq!(warning.kind, WarningType::SolarTermBoundary);
    assert_eq!(warning.direction, BoundaryDirection::Before);
    assert_eq!((warning.hours_to_term, warning.minutes_to_term), (49, 1));
    assert_eq!(warning.impact_zone, ImpactZone::Medium);
    assert!(warning.message.contains("49 hours and 1 minute BEFORE Li Qiu"));
    assert!(warning.message.ends_with("This could affect your month star."));
}

#[test]
fn test_no_warnings_mid_month() {
    let at = Utc.with_ymd_and_hms(1990, 6, 20, 12, 0, 0).unwrap();
    assert!(check_boundary_warnings(at, 1990).is_empty());
    assert!(nearby_boundaries(at, 1990).is_empty());
}

#[test]
fn test_wider_window() {
    let table = SolarTermTable::fixed();
    let at = Utc.with_ymd_and_hms(1990, 6, 20, 12, 0, 0).unwrap();
    let analyzer = BoundaryAnalyzer::new(&table, 15);
    let nearby = analyzer.nearby_boundaries(at, 1990);
    assert_eq!(nearby.len(), 1);
    assert_eq!(nearby[0].name, "Mang Zhong (芒种)");
    assert_eq!(nearby[0].days_away, 14.0);
}

#[test]
fn test_principal_confidence_grows_with_distance() {
    let li_chun = Utc.with_ymd_and_hms(2024, 2, 4, 12, 0, 0).unwrap();
    let mut previous = 0.0;
    for hours in (1..=24 * 14).step_by(5) {
        let at = li_chun + Duration::hours(hours);
        let score = calculate_confidence(at, true, 2024).principal;
        assert!(score.percentage >= previous, "dropped at +{}h", hours);
        previous = score.percentage;
    }
}

#[test]
fn test_overall_picks_closer_boundary() {
    // Two days before Jing Zhe, a month after Li Chun.
    let at = Utc.with_ymd_and_hms(2024, 3, 3, 12, 0, 0).unwrap();
    let breakdown = calculate_confidence(at, false, 2024);
    assert_eq!(breakdown.principal.level, ConfidenceLevel::VeryHigh);
    assert_eq!(breakdown.month.level, ConfidenceLevel::Medium);
    assert_eq!(breakdown.overall.nearest_boundary.affected_star, AffectedStar::Month);
    assert_eq!(breakdown.overall.percentage, breakdown.month.percentage);
    assert_eq!(breakdown.energetic.nearest_boundary.affected_star, AffectedStar::Both);
    assert_eq!(breakdown.energetic.percentage, breakdown.overall.percentage);
}

#[test]
fn test_levels_are_ordered() {
    let date = Utc.with_ymd_and_hms(2024, 2, 4, 12, 0, 0).unwrap();
    let levels: Vec<ConfidenceLevel> = [0.1, 0.5, 2.0, 5.0, 9.0]
        .iter()
        .map(|&d| single_confidence(d, d * 24.0, false, "x", date, AffectedStar::Principal).level)
        .collect();
    assert!(levels.windows(2).all(|w| w[0] < w[1]));
}
