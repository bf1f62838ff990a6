use crate::cleaner::DeletionExecutor;
use crate::config::Config;
use crate::tui::service::scanner::start_scan;
use crate::tui::state::{ReviewSession, ScanMessage, ScanProgress};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

pub struct App {
    pub config: Config,
    pub home: PathBuf,
    pub session: ReviewSession,
    pub executor: DeletionExecutor,
    pub scan_progress: ScanProgress,
    pub scan_receiver: Option<Receiver<ScanMessage>>,
}

impl App {
    pub fn new(config: Config, home: PathBuf, executor: DeletionExecutor) -> Self {
        Self {
            config,
            home,
            session: ReviewSession::new(),
            executor,
            scan_progress: ScanProgress::default(),
            scan_receiver: None,
        }
    }

    pub fn begin_scan(&mut self) {
        let (rx, progress) = start_scan(&self.config.scan, self.home.clone());
        self.scan_receiver = Some(rx);
        self.scan_progress = progress;
    }
}
