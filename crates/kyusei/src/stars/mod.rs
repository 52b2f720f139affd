pub mod energetic;
pub mod metadata;
pub mod month;
pub mod principal;

pub use energetic::energetic_star;
pub use metadata::{
    all_star_metadata, star_metadata, stars_by_element, stars_by_polarity, Direction, Element, Polarity,
    StarMetadata, Trigram,
};
pub use month::month_star;
pub use principal::{principal_reference_year, principal_star};
