//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // List navigation
    SelectNext,
    SelectPrev,

    // Account actions on the list
    Reload,
    OpenAddDialog,
    OpenEditDialog,
    DeleteSelected,
    ToggleSelected,

    // Add/edit dialog
    DialogChar(char),
    DialogBackspace,
    DialogNextField,
    DialogPrevField,
    DialogSubmit,
    DialogCancel,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Whether keys drive the list or a dialog
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Dialog,
}

/// Text field focused in the add/edit dialog
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum DialogField {
    #[default]
    Name,
    Balance,
    Currency,
}

impl DialogField {
    pub fn next(&self) -> DialogField {
        match self {
            DialogField::Name => DialogField::Balance,
            DialogField::Balance => DialogField::Currency,
            DialogField::Currency => DialogField::Name,
        }
    }

    pub fn prev(&self) -> DialogField {
        match self {
            DialogField::Name => DialogField::Currency,
            DialogField::Balance => DialogField::Name,
            DialogField::Currency => DialogField::Balance,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DialogField::Name => "Name",
            DialogField::Balance => "Balance",
            DialogField::Currency => "Currency",
        }
    }
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, input_mode: InputMode, show_help: bool) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
            KeyCode::Char('r') => Some(UiEvent::Reload),
            KeyCode::Char('a') => Some(UiEvent::OpenAddDialog),
            KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::OpenEditDialog),
            KeyCode::Char('d') | KeyCode::Delete => Some(UiEvent::DeleteSelected),
            KeyCode::Char(' ') | KeyCode::Char('t') => Some(UiEvent::ToggleSelected),
            _ => None,
        },
        InputMode::Dialog => match key.code {
            KeyCode::Esc => Some(UiEvent::DialogCancel),
            KeyCode::Enter => Some(UiEvent::DialogSubmit),
            KeyCode::Tab | KeyCode::Down => Some(UiEvent::DialogNextField),
            KeyCode::BackTab | KeyCode::Up => Some(UiEvent::DialogPrevField),
            KeyCode::Backspace => Some(UiEvent::DialogBackspace),
            KeyCode::Char(c) => Some(UiEvent::DialogChar(c)),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_actions() {
        let map = |code| key_to_ui_event(press(code), InputMode::Normal, false);
        assert_eq!(map(KeyCode::Char('a')), Some(UiEvent::OpenAddDialog));
        assert_eq!(map(KeyCode::Enter), Some(UiEvent::OpenEditDialog));
        assert_eq!(map(KeyCode::Char('d')), Some(UiEvent::DeleteSelected));
        assert_eq!(map(KeyCode::Char(' ')), Some(UiEvent::ToggleSelected));
        assert_eq!(map(KeyCode::Char('r')), Some(UiEvent::Reload));
        assert_eq!(map(KeyCode::Down), Some(UiEvent::SelectNext));
        assert_eq!(map(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_dialog_mode_types_letters() {
        let map = |code| key_to_ui_event(press(code), InputMode::Dialog, false);
        assert_eq!(map(KeyCode::Char('q')), Some(UiEvent::DialogChar('q')));
        assert_eq!(map(KeyCode::Char('d')), Some(UiEvent::DialogChar('d')));
        assert_eq!(map(KeyCode::Enter), Some(UiEvent::DialogSubmit));
        assert_eq!(map(KeyCode::Esc), Some(UiEvent::DialogCancel));
        assert_eq!(map(KeyCode::BackTab), Some(UiEvent::DialogPrevField));
    }

    #[test]
    fn test_help_popup_swallows_keys() {
        let event = key_to_ui_event(press(KeyCode::Char('d')), InputMode::Normal, true);
        assert_eq!(event, Some(UiEvent::CloseHelp));
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_ui_event(key, InputMode::Dialog, false), Some(UiEvent::Quit));
    }

    #[test]
    fn test_field_cycle() {
        assert_eq!(DialogField::Currency.next(), DialogField::Name);
        assert_eq!(DialogField::Name.prev(), DialogField::Currency);
    }
}
