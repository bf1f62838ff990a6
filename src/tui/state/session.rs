use crate::cleaner::{CleanResult, DeletionExecutor};
use crate::model::{Confidence, SelectableItem};
use crate::tui::logic::SelectionModel;
use crate::tui::state::{Action, Phase};
use tracing::{debug, info};

const EMPTY_SELECTION_NOTICE: &str = "Nothing marked. Press Space to mark items.";

/// One review pass: scan result in, confirmed deletions out.
pub struct ReviewSession {
    phase: Phase,
    selection: Option<SelectionModel>,
    notice: Option<String>,
    result: Option<CleanResult>,
    finished: bool,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            selection: None,
            notice: None,
            result: None,
            finished: false,
        }
    }

    pub fn start(&mut self, items: Vec<SelectableItem>) {
        info!(items = items.len(), "review started");
        self.selection = Some(SelectionModel::new(items));
        self.phase = Phase::Reviewing;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selection(&self) -> Option<&SelectionModel> {
        self.selection.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Shown until the next action.
    pub fn set_notice(&mut self, notice: &str) {
        self.notice = Some(notice.to_string());
    }

    pub fn result(&self) -> Option<&CleanResult> {
        self.result.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn handle(&mut self, action: Action) {
        self.notice = None;

        match self.phase {
            Phase::Idle => {
                if action == Action::Quit {
                    self.finish();
                }
            }
            Phase::Reviewing => self.handle_reviewing(action),
            Phase::Confirming => match action {
                Action::Confirm => self.phase = Phase::Executing,
                Action::Quit => self.phase = Phase::Reviewing,
                _ => {}
            },
            Phase::Executing => {}
            Phase::Done => self.finished = true,
        }
    }

    fn handle_reviewing(&mut self, action: Action) {
        if action == Action::Quit {
            debug!("review discarded");
            self.finish();
            return;
        }

        let Some(selection) = self.selection.as_mut() else {
            return;
        };

        match action {
            Action::Up => selection.move_cursor(-1),
            Action::Down => selection.move_cursor(1),
            Action::Toggle => selection.toggle_focused(),
            Action::SelectAll => selection.toggle_select_all(),
            Action::FilterHigh => selection.set_filter(Confidence::High),
            Action::FilterMedium => selection.set_filter(Confidence::Medium),
            Action::FilterLow => selection.set_filter(Confidence::Low),
            Action::FilterAll => selection.clear_filter(),
            Action::Confirm => {
                if selection.marked_count() == 0 {
                    self.notice = Some(EMPTY_SELECTION_NOTICE.to_string());
                } else {
                    self.phase = Phase::Confirming;
                }
            }
            Action::Quit => {}
        }
    }

    fn finish(&mut self) {
        self.selection = None;
        self.finished = true;
    }

    /// Runs the whole batch; only valid once the operator confirmed.
    pub fn execute(&mut self, executor: &DeletionExecutor) {
        if self.phase != Phase::Executing {
            return;
        }

        let items = self
            .selection
            .as_ref()
            .map(|s| s.marked_items())
            .unwrap_or_default();

        self.result = Some(executor.execute(&items));
        self.phase = Phase::Done;
    }
}

impl Default for ReviewSession {
    fn default() -> Self {
        Self::new()
    }
}
