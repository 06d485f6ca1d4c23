//! Playback control signals shared between a playback task and its controllers.

use std::{
    fmt::Display,
    sync::{
        atomic::{AtomicBool, AtomicU8, Ordering},
        Arc,
    },
};

use tokio::sync::Notify;

/// Lifecycle of a collection playback.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackState {
    /// Nothing is being played, a new animation can be started.
    #[default]
    Idle = 0,
    /// Frames are being applied.
    Playing = 1,
    /// Frame advancement is blocked until the playback is resumed or stopped.
    Paused = 2,
    /// A stop has been observed and the units are being turned off.
    Stopping = 3,
}

impl PlaybackState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Playing,
            2 => Self::Paused,
            3 => Self::Stopping,
            _ => Self::Idle,
        }
    }
}

impl Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Playing => f.write_str("playing"),
            Self::Paused => f.write_str("paused"),
            Self::Stopping => f.write_str("stopping"),
        }
    }
}

/// What the playback task should do after a frame boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Checkpoint {
    Continue,
    Stop,
}

#[derive(Debug, Default)]
struct Signals {
    pause: AtomicBool,
    stop: AtomicBool,
    looping: AtomicBool,
    state: AtomicU8,
    // Wakes up a paused playback task.
    wake: Notify,
}

/// Cloneable handle to control a playback from any task or thread.
///
/// Requests are only observed by the playback task at frame boundaries.
#[derive(Debug, Clone, Default)]
pub struct PlaybackHandle(Arc<Signals>);

impl PlaybackHandle {
    /// Returns the current playback state.
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        PlaybackState::from_u8(self.0.state.load(Ordering::Acquire))
    }

    /// Asks the playback to stop advancing frames.
    pub fn request_pause(&self) {
        self.0.pause.store(true, Ordering::Release);
    }

    /// Lets a paused playback continue.
    pub fn request_resume(&self) {
        self.0.pause.store(false, Ordering::Release);
        self.0.wake.notify_waiters();
    }

    /// Asks the playback to stop at the next frame boundary, even if it is paused.
    pub fn request_stop(&self) {
        self.0.stop.store(true, Ordering::Release);
        self.0.wake.notify_waiters();
    }

    /// Enables or disables looping, takes effect when the current pass is over.
    pub fn set_looping(&self, looping: bool) {
        self.0.looping.store(looping, Ordering::Release);
    }

    #[must_use]
    pub fn is_looping(&self) -> bool {
        self.0.looping.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn is_pause_requested(&self) -> bool {
        self.0.pause.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn is_stop_requested(&self) -> bool {
        self.0.stop.load(Ordering::Acquire)
    }

    pub(crate) fn set_state(&self, state: PlaybackState) {
        self.0.state.store(state as u8, Ordering::Release);
    }

    /// Drops pending pause and stop requests.
    pub(crate) fn clear_requests(&self) {
        self.0.pause.store(false, Ordering::Release);
        self.0.stop.store(false, Ordering::Release);
    }

    /// Returns the handle to the idle state after a playback run.
    pub(crate) fn finish(&self) {
        self.clear_requests();
        self.set_state(PlaybackState::Idle);
    }

    /// Checks the pending requests at a frame boundary.
    ///
    /// While a pause is requested this waits until it is either resumed or stopped.
    pub(crate) async fn checkpoint(&self) -> Checkpoint {
        loop {
            let notified = self.0.wake.notified();
            tokio::pin!(notified);
            // Register the waiter before reading the flags, otherwise a wake up sent between
            // the check and the await would be lost.
            notified.as_mut().enable();

            if self.is_stop_requested() {
                self.set_state(PlaybackState::Stopping);
                return Checkpoint::Stop;
            }

            if !self.is_pause_requested() {
                if self.state() == PlaybackState::Paused {
                    log::debug!("Playback resumed");
                    self.set_state(PlaybackState::Playing);
                }
                return Checkpoint::Continue;
            }

            if self.state() != PlaybackState::Paused {
                log::debug!("Playback paused");
                self.set_state(PlaybackState::Paused);
            }
            notified.await;
        }
    }
}
