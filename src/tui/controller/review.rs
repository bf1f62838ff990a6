use crate::tui::controller::input::action_for;
use crate::tui::state::{Action, Phase, ReviewSession};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct ReviewContext<'a> {
    pub session: &'a mut ReviewSession,
}

pub fn handle_review_key(ctx: &mut ReviewContext, code: KeyCode, modifiers: KeyModifiers) {
    // any key leaves the summary
    if ctx.session.phase() == Phase::Done {
        ctx.session.handle(Action::Quit);
        return;
    }

    if let Some(action) = action_for(code, modifiers) {
        ctx.session.handle(action);
    }
}
