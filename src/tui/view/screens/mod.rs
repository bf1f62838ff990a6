mod done;
mod loading;
mod review;

pub use done::render_done;
pub use loading::render_loading;
pub use review::{render_review, ReviewData};
