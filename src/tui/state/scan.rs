use crate::model::OrphanFile;

pub enum ScanMessage {
    RegistryBuilt { installed: usize },
    ScanningLocation { category: String, path: String },
    ScanComplete { orphans: Vec<OrphanFile> },
}

const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

#[derive(Debug, Clone, Default)]
pub struct ScanProgress {
    pub installed_apps: Option<usize>,
    pub current_category: String,
    pub current_path: Option<String>,
    pub locations_done: usize,
    pub total_locations: usize,
    tick: usize,
}

impl ScanProgress {
    pub fn new(total_locations: usize) -> Self {
        Self {
            current_category: "Reading installed applications".to_string(),
            total_locations,
            ..Default::default()
        }
    }

    pub fn advance_spinner(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn spinner(&self) -> char {
        SPINNER[self.tick % SPINNER.len()]
    }
}
