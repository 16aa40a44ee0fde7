//! Mentor profile: loading, category resolution, career labels and the
//! display card.

pub mod career;
pub mod display;
pub mod resolver;

pub use career::{career_duration, career_months};
pub use display::{matching_rate, ProfileCard, ReviewCard};
pub use resolver::{category_label, load_profile, resolve_category};
