pub mod input;
pub mod review;

pub use review::{handle_review_key, ReviewContext};
