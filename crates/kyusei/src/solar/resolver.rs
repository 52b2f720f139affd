//! Maps an instant onto its solar year and solar month.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{KyuseiError, Result};
use crate::solar::terms::{default_table, noon_utc, SolarTermTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarYear {
    pub solar_year: i32,
    /// Li Chun of the Gregorian year containing the instant, not of `solar_year`.
    pub li_chun: DateTime<Utc>,
}

/// Fixed Li Chun rule on the UTC calendar date.
///
/// January, and February 1-3, belong to the previous solar year; February 4
/// onward belongs to the current one. Shared by the profile engine, the DST
/// alternatives and the year-cycle calculator.
pub fn solar_year_for_date(at: DateTime<Utc>) -> SolarYear {
    let year = at.year();
    let solar_year = if at.month() == 1 || (at.month() == 2 && at.day() <= 3) {
        year - 1
    } else {
        year
    };

    SolarYear {
        solar_year,
        li_chun: noon_utc(year, 2, 4),
    }
}

/// Solar year and month resolution against a [`SolarTermTable`].
#[derive(Debug, Clone, Copy)]
pub struct SolarResolver<'a> {
    table: &'a SolarTermTable,
}

impl<'a> SolarResolver<'a> {
    pub fn new(table: &'a SolarTermTable) -> Self {
        Self { table }
    }

    pub fn solar_year(&self, at: DateTime<Utc>) -> SolarYear {
        SolarYear {
            solar_year: self.table.source().solar_year(at),
            li_chun: self.table.li_chun(at.year()),
        }
    }

    /// Index 0..=11 of the solar month containing `at` within `solar_year`.
    ///
    /// Month `i` runs from boundary `i` up to boundary `i + 1`; month 11 runs
    /// from Xiao Han to the next year's Li Chun. A boundary belongs to the
    /// month it opens.
    pub fn month_index(&self, at: DateTime<Utc>, solar_year: i32) -> Result<usize> {
        let starts = self.table.month_starts(solar_year);
        let next_li_chun = self.table.li_chun(solar_year.saturating_add(1));

        let mut edges = starts.to_vec();
        edges.push(next_li_chun);

        let found = if self.table.source().day_granular() {
            let day = at.date_naive();
            edges
                .windows(2)
                .position(|w| w[0].date_naive() <= day && day < w[1].date_naive())
        } else {
            edges.windows(2).position(|w| w[0] <= at && at < w[1])
        };

        found.ok_or_else(|| {
            log::warn!("no solar month for {} in solar year {}", at, solar_year);
            KyuseiError::MonthNotFound {
                datetime: at,
                solar_year,
            }
        })
    }
}

/// Solar month index of `at` against the process-wide fixed-calendar table.
pub fn month_index_for(at: DateTime<Utc>, solar_year: i32) -> Result<usize> {
    SolarResolver::new(&default_table()).month_index(at, solar_year)
}
