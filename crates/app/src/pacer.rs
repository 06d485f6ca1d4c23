//! Frame rate pacing.

use std::time::Duration;

use xmaslights_core::{Error, Hertz, Result};

/// Best effort pacing primitive that waits a fixed period between two frames.
///
/// The wait is not adaptive: if applying a frame or rendering it takes longer than a period,
/// the animation simply runs slower than the nominal frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePacer {
    period: Duration,
}

impl FramePacer {
    /// Creates a pacer for the given frame rate, a zero rate is rejected.
    pub fn new(fps: Hertz) -> Result<Self> {
        let period = fps.period().ok_or(Error::InvalidFps)?;
        Ok(Self { period })
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Suspends the current task for a single frame period.
    pub async fn wait(&self) {
        tokio::time::sleep(self.period).await;
    }
}
