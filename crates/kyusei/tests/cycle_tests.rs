use chrono::{TimeZone, Utc};
use kyusei::cycles::{all_year_cycle_data, year_cycle_data, DEFAULT_YEARS_AHEAD};
use kyusei::{all_year_cycles_until, current_year_cycle, cycle_number, year_cycle_timeline, StarNumber};

#[test]
fn test_cycle_repeats_every_nine_years() {
    for principal in StarNumber::all() {
        for year in 1900..2100 {
            assert_eq!(cycle_number(principal, year), cycle_number(principal, year + 9));
            let next = cycle_number(principal, year + 1).get();
            let this = cycle_number(principal, year).get();
            assert_eq!(next, if this == 9 { 1 } else { this + 1 });
        }
    }
}

#[test]
fn test_every_cycle_has_data() {
    assert_eq!(all_year_cycle_data().len(), 9);
    for number in StarNumber::all() {
        assert_eq!(year_cycle_data(number).unwrap().number, number);
    }
}

#[test]
fn test_current_cycle_turns_at_li_chun() {
    let principal = StarNumber::new(3).unwrap();
    let before = Utc.with_ymd_and_hms(2024, 2, 3, 23, 0, 0).unwrap();
    let after = Utc.with_ymd_and_hms(2024, 2, 4, 0, 0, 0).unwrap();
    assert_eq!(current_year_cycle(principal, before).unwrap().number.get(), 4);
    assert_eq!(current_year_cycle(principal, after).unwrap().number.get(), 5);
}

#[test]
fn test_all_cycles_span() {
    let principal = StarNumber::new(7).unwrap();
    let today = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let entries = all_year_cycles_until(principal, 1990, today, DEFAULT_YEARS_AHEAD).unwrap();
    assert_eq!(entries.len(), 65);
    assert_eq!(entries[0].calendar_year, 1990);
    assert_eq!(entries.last().unwrap().calendar_year, 2054);

    let reference = entries.iter().find(|e| e.calendar_year == 2022).unwrap();
    assert_eq!(reference.cycle_number, principal);
    assert!(entries.iter().all(|e| e.solar_year == e.calendar_year));
    assert!(entries.iter().all(|e| e.cycle.number == e.cycle_number));
}

#[test]
fn test_timeline_serialises_flat() {
    let principal = StarNumber::new(9).unwrap();
    let at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let timeline = year_cycle_timeline(principal, at).unwrap();
    assert_eq!(timeline.solar_year, 2024);
    assert_eq!(timeline.current.days_remaining, Some(247));

    let value = serde_json::to_value(&timeline).unwrap();
    assert_eq!(value["current"]["number"], 2);
    assert_eq!(value["current"]["solarYear"], 2024);
    assert_eq!(value["current"]["endDate"], "2025-02-03");
    assert!(value["next"].get("daysRemaining").is_none());
}
