//! Derived scores.
//!
//! - Readability of a block of text, on a 1-10 scale
//! - SEO quality of a page, on a 0-100 scale

mod readability;
mod seo;

pub use readability::readability_score;
pub use seo::{calculate_seo_score, SeoInputs};
