pub mod calculator;
pub mod data;

pub use calculator::{
    all_year_cycles, all_year_cycles_until, current_year_cycle, cycle_number, year_cycle_timeline, YearCycleEntry,
    YearCycleInfo, YearCycleTimeline, CYCLE_REFERENCE_YEAR, DEFAULT_YEARS_AHEAD,
};
pub use data::{all_year_cycle_data, year_cycle_data, YearCycle};
