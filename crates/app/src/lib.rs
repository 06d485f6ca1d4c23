//! Xmaslights application
//!
//! Cooperative playback of frame animations over a collection of LED units. A collection is
//! driven by a single task which yields at two points only: the pacing sleep between frames
//! and the wait while playback is paused. Every other party talks to the task through a
//! [`PlaybackHandle`].

// Linter configuration
#![warn(unsafe_code, missing_copy_implementations)]
#![warn(clippy::pedantic)]
#![warn(clippy::use_self)]
// Too many false positives.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub use xmaslights_core::{
    normalize, Animation, BoostPolicy, Color, Error as XmaslightsError, Frame, FrameAllocator,
    Hertz, Position, Result as XmaslightsResult, Unit,
};

pub use crate::{
    collection::{Collection, PlaybackSummary, SETTLE_DELAY, VERTICAL_OFFSET},
    config::PlaybackConfig,
    pacer::FramePacer,
    player::Player,
    render::{NoRender, StripRender, UnitsRender},
    signals::{PlaybackHandle, PlaybackState},
};

mod collection;
mod config;
mod pacer;
mod player;
mod render;
mod signals;
