pub mod components;
pub mod screens;

pub use screens::{render_done, render_loading, render_review, ReviewData};
