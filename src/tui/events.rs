use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// User actions from terminal events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    Analyze,
    CopyReply,
    NewAnalysis,
    OpenFilePrompt,
    RemoveFile,
    ToggleFocus,
    MoveUp,
    MoveDown,
    Cancel,
    Enter,
    InsertChar(char),
    DeleteChar,
    /// Bracketed paste; a dropped file arrives as its path
    Paste(String),
    None,
}

/// Poll for terminal events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if event::poll(timeout)? {
        return Ok(match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key_to_action(key),
            Event::Paste(text) => Action::Paste(text),
            _ => Action::None,
        });
    }
    Ok(Action::None)
}

fn key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Char('s'), KeyModifiers::CONTROL) | (KeyCode::F(5), _) => Action::Analyze,
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => Action::CopyReply,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::NewAnalysis,
        (KeyCode::Char('o'), KeyModifiers::CONTROL) => Action::OpenFilePrompt,
        (KeyCode::Char('x'), KeyModifiers::CONTROL) => Action::RemoveFile,

        (KeyCode::Tab, _) => Action::ToggleFocus,
        (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::Esc, _) => Action::Cancel,
        (KeyCode::Enter, _) => Action::Enter,

        // Text input
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::InsertChar(c)
        }
        (KeyCode::Backspace, _) => Action::DeleteChar,

        _ => Action::None,
    }
}
