use super::{InputError, InputSource, Signal};
use crate::command::Command;
use crate::game::Direction;
use crossterm::event::{poll, read, Event};
use std::time::{Duration, Instant};

/// Arrow keys (or `wasd` or `hjkl`) steer; the last one pressed before a
/// tick is the one that counts.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Keyboard {
    pending: Option<Direction>,
}

impl Keyboard {
    pub(crate) fn new() -> Keyboard {
        Keyboard::default()
    }

    fn handle_event(&mut self, event: Event) -> Option<Signal> {
        if matches!(event, Event::Resize(..)) {
            return Some(Signal::Redraw);
        }
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        let direction = match cmd {
            Command::Up => Direction::North,
            Command::Down => Direction::South,
            Command::Left => Direction::West,
            Command::Right => Direction::East,
            _ => return Signal::from_command(cmd),
        };
        self.pending = Some(direction);
        None
    }
}

impl InputSource for Keyboard {
    fn next_signal(&mut self, timeout: Duration) -> Result<Option<Signal>, InputError> {
        let deadline = Instant::now() + timeout;
        loop {
            let wait = deadline.saturating_duration_since(Instant::now());
            if !poll(wait).map_err(InputError::Read)? {
                return Ok(None);
            }
            if let sig @ Some(_) = self.handle_event(read().map_err(InputError::Read)?) {
                return Ok(sig);
            }
        }
    }

    fn take_direction(&mut self) -> Option<Direction> {
        self.pending.take()
    }
}
