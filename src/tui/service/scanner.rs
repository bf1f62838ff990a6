use crate::config::ScanConfig;
use crate::model::SelectableItem;
use crate::registry::InstalledAppRegistry;
use crate::scanner::{configured_locations, scan_residue};
use crate::tui::state::{ReviewSession, ScanMessage, ScanProgress};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use tracing::{debug, warn};

const SCAN_ABORTED_NOTICE: &str = "Scan stopped unexpectedly. See the log for details.";

/// Runs the residue scan off the UI thread so the spinner keeps turning.
/// Only this one scan is ever in flight.
pub fn start_scan(config: &ScanConfig, home: PathBuf) -> (Receiver<ScanMessage>, ScanProgress) {
    let (tx, rx) = channel();
    let progress = ScanProgress::new(configured_locations(config, &home).len());
    let config = config.clone();

    thread::spawn(move || {
        let registry_tx = tx.clone();
        let location_tx = tx.clone();

        let registry = InstalledAppRegistry::system(&home);
        let orphans = scan_residue(
            &config,
            &home,
            &registry,
            |installed| {
                let _ = registry_tx.send(ScanMessage::RegistryBuilt {
                    installed: installed.len(),
                });
            },
            |location| {
                let _ = location_tx.send(ScanMessage::ScanningLocation {
                    category: location.category.clone(),
                    path: location.path.display().to_string(),
                });
            },
        );

        if tx.send(ScanMessage::ScanComplete { orphans }).is_err() {
            debug!("scan finished after the review closed");
        }
    });

    (rx, progress)
}

pub struct PollContext<'a> {
    pub scan_receiver: &'a mut Option<Receiver<ScanMessage>>,
    pub scan_progress: &'a mut ScanProgress,
    pub session: &'a mut ReviewSession,
}

pub fn poll_scan_messages(ctx: &mut PollContext) {
    let Some(rx) = ctx.scan_receiver.take() else {
        return;
    };

    loop {
        match rx.try_recv() {
            Ok(ScanMessage::RegistryBuilt { installed }) => {
                ctx.scan_progress.installed_apps = Some(installed);
            }
            Ok(ScanMessage::ScanningLocation { category, path }) => {
                if ctx.scan_progress.current_path.is_some() {
                    ctx.scan_progress.locations_done += 1;
                }
                ctx.scan_progress.current_category = category;
                ctx.scan_progress.current_path = Some(path);
            }
            Ok(ScanMessage::ScanComplete { orphans }) => {
                ctx.scan_progress.locations_done = ctx.scan_progress.total_locations;
                ctx.scan_progress.current_path = None;
                let items = orphans.iter().map(SelectableItem::from).collect();
                ctx.session.start(items);
                return;
            }
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                warn!("scan thread exited without a result");
                ctx.scan_progress.current_path = None;
                ctx.session.start(Vec::new());
                ctx.session.set_notice(SCAN_ABORTED_NOTICE);
                return;
            }
        }
    }

    *ctx.scan_receiver = Some(rx);
}
