use chrono::{TimeZone, Utc};
use kyusei::{calculate_profile, parse_birth_instant, validate_calculation_input, CalculationInput, CalculationMethod};

fn error_for(input: CalculationInput) -> Option<String> {
    validate_calculation_input(&input).error
}

#[test]
fn test_valid_inputs() {
    assert!(validate_calculation_input(&CalculationInput::new("1990-07-10")).is_valid);
    assert!(validate_calculation_input(&CalculationInput::new("1990-07-10T08:15:00+02:00")).is_valid);
    let full = CalculationInput::new("2100-12-31").with_time("7:05").with_timezone("Europe/Berlin");
    assert!(validate_calculation_input(&full).is_valid);
}

#[test]
fn test_rejection_messages() {
    assert_eq!(error_for(CalculationInput::new("not-a-date")).as_deref(), Some("Invalid date"));
    assert_eq!(error_for(CalculationInput::new("2023-02-30")).as_deref(), Some("Invalid date"));
    assert_eq!(
        error_for(CalculationInput::new("1899-12-31")).as_deref(),
        Some("Year must be between 1900 and 2100")
    );
    assert_eq!(
        error_for(CalculationInput::new("2101-01-01")).as_deref(),
        Some("Year must be between 1900 and 2100")
    );
    assert_eq!(
        error_for(CalculationInput::new("2000-01-01").with_time("25:00")).as_deref(),
        Some("Time must be in HH:MM format (24-hour)")
    );
    assert_eq!(
        error_for(CalculationInput::new("2000-01-01").with_timezone("")).as_deref(),
        Some("Invalid timezone format")
    );
    assert_eq!(
        error_for(CalculationInput::new("2000-01-01").with_timezone("Mars/Olympus_Mons")).as_deref(),
        Some("Invalid timezone format")
    );
}

#[test]
fn test_invalid_input_never_yields_profile() {
    let err = calculate_profile(&CalculationInput::new("1800-05-05")).unwrap_err();
    assert!(err.is_input_error());
    assert_eq!(err.to_string(), "Year must be between 1900 and 2100");
}

#[test]
fn test_time_without_zone_is_utc() {
    let input = CalculationInput::new("1995-03-06").with_time("23:45");
    assert_eq!(
        parse_birth_instant(&input).unwrap(),
        Utc.with_ymd_and_hms(1995, 3, 6, 23, 45, 0).unwrap()
    );
}

#[test]
fn test_method_is_carried_through() {
    let input = CalculationInput::new("1990-07-10").with_method(CalculationMethod::ChineseAscending);
    let profile = calculate_profile(&input).unwrap();
    assert_eq!(profile.method, CalculationMethod::ChineseAscending);
    assert_eq!(profile.shorthand(), "1.3.3");
}

#[test]
fn test_input_deserialises_with_defaults() {
    let input: CalculationInput = serde_json::from_str(r#"{"date":"2000-08-08"}"#).unwrap();
    assert_eq!(input.method, CalculationMethod::Traditional);
    assert!(input.time.is_none());
    let ascending: CalculationInput =
        serde_json::from_str(r#"{"date":"2000-08-08","method":"chinese-ascending"}"#).unwrap();
    assert_eq!(ascending.method, CalculationMethod::ChineseAscending);
}
