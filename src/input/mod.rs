//! Sources of steering and control input for the game loop
mod keyboard;
mod slot;
mod tracking;
pub(crate) use self::keyboard::Keyboard;
pub(crate) use self::tracking::PointerTracker;
use crate::command::Command;
use crate::game::{Control, Direction, GameState};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Which flavor of the game to play
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Variant {
    /// Steer with the keyboard
    #[default]
    Classic,
    /// Steer by moving the mouse pointer
    Tracking,
}

impl Variant {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Tracking => "tracking",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Variant, ParseVariantError> {
        match s {
            "classic" => Ok(Variant::Classic),
            "tracking" => Ok(Variant::Tracking),
            _ => Err(ParseVariantError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown game variant {0:?}; expected \"classic\" or \"tracking\"")]
pub(crate) struct ParseVariantError(String);

/// Something the player asked for other than a change of direction
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Signal {
    Control(Control),
    /// Pause if running, resume if paused
    TogglePause,
    Quit,
    /// The screen needs to be drawn again
    Redraw,
}

impl Signal {
    /// Translate a non-steering key command
    fn from_command(cmd: Command) -> Option<Signal> {
        match cmd {
            Command::P | Command::Space | Command::Esc => Some(Signal::TogglePause),
            Command::R | Command::Enter => Some(Signal::Control(Control::Restart)),
            Command::Q | Command::Quit => Some(Signal::Quit),
            Command::Up | Command::Down | Command::Left | Command::Right => None,
        }
    }
}

/// Resolve a pause toggle against the game's current state
pub(crate) fn toggle_pause(state: GameState) -> Option<Control> {
    match state {
        GameState::Running => Some(Control::Pause),
        GameState::Paused => Some(Control::Resume),
        GameState::GameOver(_) => None,
    }
}

/// The narrow interface the game loop needs from an input device
pub(crate) trait InputSource {
    /// Wait up to `timeout` for the player to send a [`Signal`].  Returns
    /// `Ok(None)` if the time ran out first.
    fn next_signal(&mut self, timeout: Duration) -> Result<Option<Signal>, InputError>;

    /// Return the direction requested since the previous call, if any
    fn take_direction(&mut self) -> Option<Direction>;

    /// Instructions to show the player, if the source currently has any
    fn hint(&self) -> Option<&'static str> {
        None
    }
}

#[derive(Debug, Error)]
pub(crate) enum InputError {
    #[error("input device is unavailable")]
    Unavailable(#[source] std::io::Error),
    #[error("failed to read input")]
    Read(#[source] std::io::Error),
    #[error("input capture stopped unexpectedly")]
    Disconnected,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cause;
    use rstest::rstest;

    #[rstest]
    #[case("classic", Ok(Variant::Classic))]
    #[case("tracking", Ok(Variant::Tracking))]
    #[case("webcam", Err(ParseVariantError(String::from("webcam"))))]
    fn parse_variant(#[case] s: &str, #[case] r: Result<Variant, ParseVariantError>) {
        assert_eq!(s.parse::<Variant>(), r);
    }

    #[test]
    fn variant_display_roundtrip() {
        for v in [Variant::Classic, Variant::Tracking] {
            assert_eq!(v.to_string().parse::<Variant>(), Ok(v));
        }
    }

    #[rstest]
    #[case(GameState::Running, Some(Control::Pause))]
    #[case(GameState::Paused, Some(Control::Resume))]
    #[case(GameState::GameOver(Cause::Wall), None)]
    fn test_toggle_pause(#[case] state: GameState, #[case] control: Option<Control>) {
        assert_eq!(toggle_pause(state), control);
    }

    #[rstest]
    #[case(Command::P, Some(Signal::TogglePause))]
    #[case(Command::Esc, Some(Signal::TogglePause))]
    #[case(Command::R, Some(Signal::Control(Control::Restart)))]
    #[case(Command::Q, Some(Signal::Quit))]
    #[case(Command::Quit, Some(Signal::Quit))]
    #[case(Command::Left, None)]
    fn signal_from_command(#[case] cmd: Command, #[case] signal: Option<Signal>) {
        assert_eq!(Signal::from_command(cmd), signal);
    }
}
