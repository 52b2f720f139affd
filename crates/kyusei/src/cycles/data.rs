//! Reference data for the nine yearly cycle positions.

use serde::{Deserialize, Serialize};

use crate::error::{KyuseiError, Result};
use crate::stars::metadata::{Direction, Element};
use crate::types::StarNumber;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearCycle {
    pub number: StarNumber,
    pub name: String,
    pub element: Element,
    pub direction: Direction,
    pub season: String,
    pub keywords: Vec<String>,
    pub theme: String,
    pub guidance: String,
}

#[allow(clippy::too_many_arguments)]
fn cycle(
    number: u8,
    name: &str,
    element: Element,
    direction: Direction,
    season: &str,
    keywords: &[&str],
    theme: &str,
    guidance: &str,
) -> YearCycle {
    YearCycle {
        number: StarNumber(number),
        name: name.to_string(),
        element,
        direction,
        season: season.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        theme: theme.to_string(),
        guidance: guidance.to_string(),
    }
}

// Ordered by number so index == number - 1.
lazy_static::lazy_static! {
    static ref YEAR_CYCLES: Vec<YearCycle> = vec![
        cycle(1, "Rest and Reflection", Element::Water, Direction::North, "Winter",
            &["rest", "reflection", "planning"],
            "A quiet year at the bottom of the cycle, suited to recovery and inner work.",
            "Conserve energy, review the last nine years and let plans take shape slowly."),
        cycle(2, "Preparation", Element::Earth, Direction::Southwest, "Late Summer",
            &["preparation", "nurturing", "patience"],
            "Groundwork for the growth that follows; relationships and support matter most.",
            "Tend to foundations, accept help and avoid forcing results."),
        cycle(3, "New Beginnings", Element::Wood, Direction::East, "Spring",
            &["growth", "initiative", "momentum"],
            "Energy rises and new projects find their start.",
            "Act on ideas prepared earlier while keeping an eye on haste."),
        cycle(4, "Expansion", Element::Wood, Direction::Southeast, "Late Spring",
            &["expansion", "communication", "connection"],
            "Efforts begin to spread; reputation and networks grow.",
            "Communicate clearly and follow through on commitments."),
        cycle(5, "Turning Point", Element::Earth, Direction::Center, "Transition",
            &["center", "change", "balance"],
            "The middle of the cycle, where momentum peaks and directions shift.",
            "Stay grounded, finish what is essential and expect change."),
        cycle(6, "Harvest and Leadership", Element::Metal, Direction::Northwest, "Autumn",
            &["leadership", "responsibility", "harvest"],
            "Results of earlier work arrive along with greater responsibility.",
            "Take charge where needed and organise what has been gained."),
        cycle(7, "Enjoyment", Element::Metal, Direction::West, "Autumn",
            &["enjoyment", "reward", "celebration"],
            "A year to appreciate rewards and spend time with others.",
            "Enjoy results while keeping spending and commitments in proportion."),
        cycle(8, "Reassessment", Element::Earth, Direction::Northeast, "Late Winter",
            &["stillness", "reassessment", "renewal"],
            "A pause to examine direction before the cycle turns again.",
            "Review priorities, let go of what no longer fits and prepare quietly."),
        cycle(9, "Recognition", Element::Fire, Direction::South, "Summer",
            &["recognition", "clarity", "visibility"],
            "The peak of visibility, when achievements and flaws are both seen.",
            "Be open about intentions and finish the cycle with integrity."),
    ];
}

pub fn year_cycle_data(number: StarNumber) -> Result<YearCycle> {
    YEAR_CYCLES
        .iter()
        .find(|c| c.number == number)
        .cloned()
        .ok_or_else(|| {
            log::warn!("year cycle table has no entry {}", number);
            KyuseiError::MissingYearCycle(number.get())
        })
}

pub fn all_year_cycle_data() -> &'static [YearCycle] {
    &YEAR_CYCLES
}
