//! Energetic (third) star: a dense lookup over all 81 principal/month pairs.

use crate::error::{KyuseiError, Result};
use crate::types::StarNumber;

/// `ENERGETIC_STARS[principal - 1][month - 1]`
const ENERGETIC_STARS: [[u8; 9]; 9] = [
    [5, 4, 3, 2, 1, 9, 8, 7, 6],
    [6, 5, 4, 3, 2, 1, 9, 8, 7],
    [7, 6, 5, 4, 3, 2, 1, 9, 8],
    [8, 7, 6, 5, 4, 3, 2, 1, 9],
    [9, 8, 7, 6, 5, 4, 3, 2, 1],
    [1, 9, 8, 7, 6, 5, 4, 3, 2],
    [2, 1, 9, 8, 7, 6, 5, 4, 3],
    [3, 2, 1, 9, 8, 7, 6, 5, 4],
    [4, 3, 2, 1, 9, 8, 7, 6, 5],
];

pub fn energetic_star(principal: StarNumber, month: StarNumber) -> Result<StarNumber> {
    let missing = || {
        log::warn!("energetic star table has no entry for {}.{}", principal, month);
        KyuseiError::MissingEnergeticStar {
            principal: principal.get(),
            month: month.get(),
        }
    };

    let star = ENERGETIC_STARS
        .get(principal.index())
        .and_then(|row| row.get(month.index()))
        .copied()
        .ok_or_else(missing)?;
    StarNumber::new(star).map_err(|_| missing())
}
