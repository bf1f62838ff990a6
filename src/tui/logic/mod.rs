pub mod selection;

pub use selection::{SelectionModel, WindowRow, VISIBLE_ROWS};
