use super::slot::LatestSlot;
use super::{InputError, InputSource, Signal};
use crate::command::Command;
use crate::consts;
use crate::game::Direction;
use crossterm::event::{read, DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind};
use crossterm::execute;
use std::cmp::Ordering;
use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

/// A pointer position in terminal cells
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Sample {
    x: i32,
    y: i32,
}

impl Sample {
    pub(super) fn new(x: u16, y: u16) -> Sample {
        Sample {
            x: i32::from(x),
            y: i32::from(y),
        }
    }
}

/// Bucket the movement from `from` to `to` into the direction of its dominant
/// axis.  Movements shorter than `dead_zone` cells, and exact diagonals, have
/// no direction.
pub(super) fn bucket(from: Sample, to: Sample, dead_zone: u16) -> Option<Direction> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx.abs().max(dy.abs()) < i32::from(dead_zone) {
        return None;
    }
    match dx.abs().cmp(&dy.abs()) {
        Ordering::Greater if dx > 0 => Some(Direction::East),
        Ordering::Greater => Some(Direction::West),
        Ordering::Less if dy > 0 => Some(Direction::South),
        Ordering::Less => Some(Direction::North),
        Ordering::Equal => None,
    }
}

/// Steers the snake by following the mouse pointer.
///
/// Terminal events are read on a separate capture thread.  Pointer positions
/// go into a [`LatestSlot`] (only the freshest one matters) while key presses
/// go through a channel (none may be lost).
#[derive(Debug)]
pub(crate) struct PointerTracker {
    latest: LatestSlot<Sample>,
    signals: Receiver<Signal>,
    /// The sample that movement is currently measured from
    anchor: Option<Sample>,
    dead_zone: u16,
}

impl PointerTracker {
    /// Turn on mouse reporting and start the capture thread
    pub(crate) fn start(dead_zone: u16) -> Result<PointerTracker, InputError> {
        execute!(io::stdout(), EnableMouseCapture).map_err(InputError::Unavailable)?;
        let latest = LatestSlot::new();
        let (sender, signals) = mpsc::channel();
        let slot = latest.clone();
        if let Err(e) = thread::Builder::new()
            .name(String::from("pointer-capture"))
            .spawn(move || capture(read, &slot, &sender))
        {
            let _ = execute!(io::stdout(), DisableMouseCapture);
            return Err(InputError::Unavailable(e));
        }
        log::info!("Pointer tracking started with a dead zone of {dead_zone} cell(s)");
        Ok(PointerTracker::from_parts(latest, signals, dead_zone))
    }

    fn from_parts(
        latest: LatestSlot<Sample>,
        signals: Receiver<Signal>,
        dead_zone: u16,
    ) -> PointerTracker {
        PointerTracker {
            latest,
            signals,
            anchor: None,
            dead_zone,
        }
    }
}

impl InputSource for PointerTracker {
    fn next_signal(&mut self, timeout: Duration) -> Result<Option<Signal>, InputError> {
        match self.signals.recv_timeout(timeout) {
            Ok(sig) => Ok(Some(sig)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(InputError::Disconnected),
        }
    }

    fn take_direction(&mut self) -> Option<Direction> {
        let sample = self.latest.take()?;
        let Some(anchor) = self.anchor else {
            self.anchor = Some(sample);
            return None;
        };
        let direction = bucket(anchor, sample, self.dead_zone)?;
        self.anchor = Some(sample);
        Some(direction)
    }

    fn hint(&self) -> Option<&'static str> {
        self.anchor
            .is_none()
            .then_some("Move the pointer over the window to steer!")
    }
}

impl Drop for PointerTracker {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableMouseCapture);
    }
}

/// Body of the capture thread.  Runs until the game stops listening or
/// `next_event` fails too many times in a row.  While reads are failing no
/// samples arrive, so the snake simply keeps its course.
fn capture<F>(mut next_event: F, slot: &LatestSlot<Sample>, sender: &Sender<Signal>)
where
    F: FnMut() -> io::Result<Event>,
{
    let mut failures = 0;
    loop {
        let event = match next_event() {
            Ok(event) => {
                failures = 0;
                event
            }
            Err(e) => {
                failures += 1;
                if failures >= consts::MAX_CAPTURE_FAILURES {
                    log::warn!(
                        "Pointer capture stopped after {failures} failed terminal reads: {e}"
                    );
                    return;
                }
                log::warn!("Failed to read terminal event; retrying: {e}");
                thread::sleep(consts::CAPTURE_RETRY_DELAY);
                continue;
            }
        };
        let signal = match event {
            Event::Mouse(ev) => {
                if matches!(ev.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
                    slot.put(Sample::new(ev.column, ev.row));
                }
                None
            }
            Event::Resize(..) => Some(Signal::Redraw),
            ev => ev
                .as_key_press_event()
                .and_then(Command::from_key_event)
                .and_then(Signal::from_command),
        };
        if let Some(sig) = signal {
            if sender.send(sig).is_err() {
                return;
            }
        }
    }
}
