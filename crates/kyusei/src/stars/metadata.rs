//! Static reference data for the nine stars.

use serde::{Deserialize, Serialize};

use crate::types::StarNumber;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Water,
    Earth,
    Wood,
    Fire,
    Metal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Yin,
    Yang,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigram {
    Kan,
    Kun,
    Zhen,
    Xun,
    Qian,
    Dui,
    Gen,
    Li,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarMetadata {
    pub number: StarNumber,
    pub element: Element,
    pub polarity: Polarity,
    /// None for the central 5 star
    pub trigram: Option<Trigram>,
    pub direction: Direction,
    pub color: String,
    pub description: String,
    pub characteristics: Vec<String>,
    pub keywords: Vec<String>,
}

#[allow(clippy::too_many_arguments)]
fn entry(
    number: u8,
    element: Element,
    polarity: Polarity,
    trigram: Option<Trigram>,
    direction: Direction,
    color: &str,
    description: &str,
    characteristics: &[&str],
    keywords: &[&str],
) -> StarMetadata {
    StarMetadata {
        number: StarNumber(number),
        element,
        polarity,
        trigram,
        direction,
        color: color.to_string(),
        description: description.to_string(),
        characteristics: characteristics.iter().map(|s| s.to_string()).collect(),
        keywords: keywords.iter().map(|s| s.to_string()).collect(),
    }
}

lazy_static::lazy_static! {
    static ref STAR_METADATA: Vec<StarMetadata> = vec![
        entry(1, Element::Water, Polarity::Yang, Some(Trigram::Kan), Direction::North, "#1e40af",
            "Water Star - Depth and Flow",
            &["Adaptable and flowing", "Deep thinker", "Intuitive nature"],
            &["wisdom", "depth", "flexibility"]),
        entry(2, Element::Earth, Polarity::Yin, Some(Trigram::Kun), Direction::Southwest, "#78716c",
            "Soil/Earth Star - Nurturing Foundation",
            &["Nurturing and supportive", "Patient and steady", "Service-oriented"],
            &["receptivity", "nurture", "devotion"]),
        entry(3, Element::Wood, Polarity::Yang, Some(Trigram::Zhen), Direction::East, "#059669",
            "Thunder/Wood Star - Growth and Action",
            &["Dynamic and energetic", "Pioneer spirit", "Quick to act"],
            &["growth", "initiative", "vitality"]),
        entry(4, Element::Wood, Polarity::Yin, Some(Trigram::Xun), Direction::Southeast, "#10b981",
            "Wind/Wood Star - Gentle Influence",
            &["Gentle and persistent", "Communicative", "Adaptable"],
            &["communication", "flexibility", "influence"]),
        entry(5, Element::Earth, Polarity::Yang, None, Direction::Center, "#ca8a04",
            "Central Earth Star - Power and Transformation",
            &["Powerful presence", "Transformative", "Central focus"],
            &["power", "transformation", "control"]),
        entry(6, Element::Metal, Polarity::Yang, Some(Trigram::Qian), Direction::Northwest, "#71717a",
            "Heaven/Metal Star - Leadership and Authority",
            &["Natural leader", "Dignified", "Authoritative"],
            &["leadership", "dignity", "heaven"]),
        entry(7, Element::Metal, Polarity::Yin, Some(Trigram::Dui), Direction::West, "#a1a1aa",
            "Lake/Metal Star - Joy and Expression",
            &["Joyful expression", "Social and charming", "Creative"],
            &["joy", "pleasure", "expression"]),
        entry(8, Element::Earth, Polarity::Yang, Some(Trigram::Gen), Direction::Northeast, "#57534e",
            "Mountain/Earth Star - Stillness and Contemplation",
            &["Still and contemplative", "Self-disciplined", "Introspective"],
            &["stillness", "introspection", "completion"]),
        entry(9, Element::Fire, Polarity::Yin, Some(Trigram::Li), Direction::South, "#dc2626",
            "Fire Star - Illumination and Clarity",
            &["Bright and illuminating", "Passionate", "Clear vision"],
            &["illumination", "passion", "clarity"]),
    ];
}

pub fn star_metadata(star: StarNumber) -> StarMetadata {
    STAR_METADATA[star.index()].clone()
}

pub fn all_star_metadata() -> &'static [StarMetadata] {
    &STAR_METADATA
}

pub fn stars_by_element(element: Element) -> Vec<StarMetadata> {
    STAR_METADATA.iter().filter(|s| s.element == element).cloned().collect()
}

pub fn stars_by_polarity(polarity: Polarity) -> Vec<StarMetadata> {
    STAR_METADATA.iter().filter(|s| s.polarity == polarity).cloned().collect()
}
