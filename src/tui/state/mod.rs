pub mod app_state;
pub mod modes;
pub mod scan;
pub mod session;

pub use app_state::App;
pub use modes::{Action, Phase};
pub use scan::{ScanMessage, ScanProgress};
pub use session::ReviewSession;
