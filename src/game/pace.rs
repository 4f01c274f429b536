use crate::consts;
use std::time::Duration;
use thiserror::Error;

/// How the time between ticks shrinks as the snake grows
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Pace {
    base: Duration,
    step: Duration,
    floor: Duration,
}

impl Pace {
    pub(crate) fn new(base: Duration, step: Duration, floor: Duration) -> Result<Pace, PaceError> {
        if floor.is_zero() {
            Err(PaceError::ZeroFloor)
        } else if floor > base {
            Err(PaceError::FloorAboveBase { floor, base })
        } else {
            Ok(Pace { base, step, floor })
        }
    }

    /// Return the time to wait before the next tick for a snake that is
    /// `length` segments long and started out `initial_length` segments long
    pub(crate) fn interval(&self, length: usize, initial_length: usize) -> Duration {
        let grown = u32::try_from(length.saturating_sub(initial_length)).unwrap_or(u32::MAX);
        self.base
            .saturating_sub(self.step.saturating_mul(grown))
            .max(self.floor)
    }
}

impl Default for Pace {
    fn default() -> Pace {
        Pace {
            base: consts::BASE_TICK_PERIOD,
            step: consts::TICK_PERIOD_STEP,
            floor: consts::MIN_TICK_PERIOD,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum PaceError {
    #[error("minimum tick period must be greater than zero")]
    ZeroFloor,
    #[error("minimum tick period ({floor:?}) is longer than the base tick period ({base:?})")]
    FloorAboveBase { floor: Duration, base: Duration },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(3, Duration::from_millis(100))]
    #[case(1, Duration::from_millis(100))]
    #[case(4, Duration::from_millis(98))]
    #[case(13, Duration::from_millis(80))]
    #[case(28, Duration::from_millis(50))]
    #[case(29, Duration::from_millis(50))]
    #[case(1000, Duration::from_millis(50))]
    #[case(usize::MAX, Duration::from_millis(50))]
    fn default_interval(#[case] length: usize, #[case] interval: Duration) {
        assert_eq!(Pace::default().interval(length, 3), interval);
    }

    #[test]
    fn interval_is_monotonic() {
        let pace = Pace::default();
        let intervals = (1..100).map(|len| pace.interval(len, 3)).collect::<Vec<_>>();
        assert!(intervals.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn floor_above_base() {
        let r = Pace::new(
            Duration::from_millis(50),
            Duration::from_millis(1),
            Duration::from_millis(60),
        );
        assert_eq!(
            r,
            Err(PaceError::FloorAboveBase {
                floor: Duration::from_millis(60),
                base: Duration::from_millis(50)
            })
        );
    }

    #[test]
    fn zero_floor() {
        let r = Pace::new(Duration::from_millis(50), Duration::ZERO, Duration::ZERO);
        assert_eq!(r, Err(PaceError::ZeroFloor));
    }
}
