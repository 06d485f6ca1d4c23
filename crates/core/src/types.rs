use core::{fmt::Display, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

/// Color of a single lit unit.
pub type Color = rgb::RGB8;

/// Frequency in hertz, used as an animation frame rate.
#[derive(
    Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, PartialOrd, Ord, Hash, Default,
)]
pub struct Hertz(pub u32);

impl Hertz {
    /// Returns the duration of a single period or `None` for a zero frequency.
    #[must_use]
    pub fn period(self) -> Option<Duration> {
        (self.0 > 0).then(|| Duration::from_secs_f64(1.0_f64 / f64::from(self.0)))
    }
}

impl FromStr for Hertz {
    type Err = <u32 as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u32::from_str(s).map(Self)
    }
}

impl From<u32> for Hertz {
    fn from(inner: u32) -> Self {
        Self(inner)
    }
}

/// A zero frequency never repeats, so its period saturates to [`Duration::MAX`].
impl From<Hertz> for Duration {
    fn from(value: Hertz) -> Self {
        value.period().unwrap_or(Duration::MAX)
    }
}

impl Display for Hertz {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.fmt(f)
    }
}

/// Position of a unit in the tree space, `y` is the vertical axis.
#[derive(Serialize, Deserialize, PartialEq, Clone, Copy, Debug, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<(f64, f64, f64)> for Position {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self { x, y, z }
    }
}

impl From<[f64; 3]> for Position {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

#[test]
fn test_hertz_period() {
    assert_eq!(Hertz(0).period(), None);
    assert_eq!(Hertz(50).period().map(|period| period.as_millis()), Some(20));
    assert_eq!("60".parse::<Hertz>(), Ok(Hertz(60)));
}

#[test]
fn test_zero_hertz_into_duration() {
    assert_eq!(Duration::from(Hertz(0)), Duration::MAX);
    assert_eq!(Duration::from(Hertz(4)).as_millis(), 250);
}
