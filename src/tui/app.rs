use crate::tui::state::App;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;

use crate::tui::controller::{handle_review_key, ReviewContext};
use crate::tui::service::scanner::{poll_scan_messages, PollContext};
use crate::tui::state::Phase;
use crate::tui::view::components::modal::{
    render_confirm_modal, render_executing_modal, ConfirmModalData,
};
use crate::tui::view::{render_done, render_loading, render_review, ReviewData};

const TICK: Duration = Duration::from_millis(100);

impl App {
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> Result<()> {
        self.begin_scan();

        while !self.session.is_finished() {
            self.poll_scan();

            if self.session.phase() == Phase::Executing {
                // show the progress frame before the blocking batch
                terminal.draw(|f| self.render(f))?;
                self.session.execute(&self.executor);
                continue;
            }

            terminal.draw(|f| self.render(f))?;

            if event::poll(TICK)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            } else {
                self.scan_progress.advance_spinner();
            }
        }

        Ok(())
    }

    fn poll_scan(&mut self) {
        let mut ctx = PollContext {
            scan_receiver: &mut self.scan_receiver,
            scan_progress: &mut self.scan_progress,
            session: &mut self.session,
        };
        poll_scan_messages(&mut ctx);
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let mut ctx = ReviewContext {
            session: &mut self.session,
        };
        handle_review_key(&mut ctx, code, modifiers);
    }

    fn render(&self, f: &mut ratatui::Frame) {
        let dry_run = self.executor.is_dry_run();

        if let (Phase::Done, Some(result)) = (self.session.phase(), self.session.result()) {
            render_done(f, result, dry_run);
            return;
        }

        let Some(selection) = self.session.selection() else {
            render_loading(f, &self.scan_progress);
            return;
        };

        render_review(
            f,
            &ReviewData {
                selection,
                notice: self.session.notice(),
                dry_run,
            },
        );

        match self.session.phase() {
            Phase::Confirming => render_confirm_modal(
                f,
                &ConfirmModalData {
                    marked_count: selection.marked_count(),
                    total_size: selection.marked_size(),
                    dry_run,
                },
            ),
            Phase::Executing => render_executing_modal(f, selection.marked_count()),
            _ => {}
        }
    }
}
