use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A key press, reduced to what the game cares about
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Space,
    P,
    Q,
    R,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if (ev.modifiers, ev.code) == (KeyModifiers::CONTROL, KeyCode::Char('c')) {
            return Some(Command::Quit);
        }
        if !normal_modifiers.contains(ev.modifiers) {
            return None;
        }
        match ev.code {
            KeyCode::Char('w' | 'W' | 'k') | KeyCode::Up => Some(Command::Up),
            KeyCode::Char('s' | 'S' | 'j') | KeyCode::Down => Some(Command::Down),
            KeyCode::Char('a' | 'A' | 'h') | KeyCode::Left => Some(Command::Left),
            KeyCode::Char('d' | 'D' | 'l') | KeyCode::Right => Some(Command::Right),
            KeyCode::Enter => Some(Command::Enter),
            KeyCode::Esc => Some(Command::Esc),
            KeyCode::Char(' ') => Some(Command::Space),
            KeyCode::Char('p' | 'P') => Some(Command::P),
            KeyCode::Char('q' | 'Q') => Some(Command::Q),
            KeyCode::Char('r' | 'R') => Some(Command::R),
            _ => None,
        }
    }
}
