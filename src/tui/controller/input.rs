use crate::tui::state::Action;
use crossterm::event::{KeyCode, KeyModifiers};

pub fn action_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(code, KeyCode::Char('c')).then_some(Action::Quit);
    }

    let action = match code {
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::Char(' ') => Action::Toggle,
        KeyCode::Enter | KeyCode::Char('y') => Action::Confirm,
        KeyCode::Char('a') => Action::SelectAll,
        KeyCode::Char('1') | KeyCode::Char('h') => Action::FilterHigh,
        KeyCode::Char('2') | KeyCode::Char('m') => Action::FilterMedium,
        KeyCode::Char('3') | KeyCode::Char('l') => Action::FilterLow,
        KeyCode::Char('0') => Action::FilterAll,
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('n') => Action::Quit,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Option<Action> {
        action_for(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_map() {
        assert_eq!(key(KeyCode::Char('k')), Some(Action::Up));
        assert_eq!(key(KeyCode::Down), Some(Action::Down));
        assert_eq!(key(KeyCode::Char(' ')), Some(Action::Toggle));
        assert_eq!(key(KeyCode::Char('y')), Some(Action::Confirm));
        assert_eq!(key(KeyCode::Enter), Some(Action::Confirm));
        assert_eq!(key(KeyCode::Char('h')), Some(Action::FilterHigh));
        assert_eq!(key(KeyCode::Char('2')), Some(Action::FilterMedium));
        assert_eq!(key(KeyCode::Char('l')), Some(Action::FilterLow));
        assert_eq!(key(KeyCode::Char('0')), Some(Action::FilterAll));
        assert_eq!(key(KeyCode::Char('n')), Some(Action::Quit));
        assert_eq!(key(KeyCode::Esc), Some(Action::Quit));
        assert_eq!(key(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        assert_eq!(
            action_for(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Action::Quit)
        );
        assert_eq!(action_for(KeyCode::Char('a'), KeyModifiers::CONTROL), None);
    }
}
