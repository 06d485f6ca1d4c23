//! Xmaslights core
//!
//! Strictly typed model of an addressable LED tree: the units themselves, the decoding
//! of flat channel frames, the re-centering of a raw position cloud and the per-frame
//! intensity boost allocation. Everything here is synchronous and allocation is the only
//! runtime requirement, the playback scheduling lives in the application crate.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
// Linter configuration
#![warn(unsafe_code, missing_copy_implementations)]
#![warn(clippy::pedantic)]
#![warn(clippy::use_self)]
// Too many false positives.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::cast_precision_loss
)]

extern crate alloc;

pub use crate::{
    allocator::{Allocation, BoostPolicy, FrameAllocator, BOOST_CAP},
    errors::{Error, Result},
    frame::{Animation, Frame, CHANNELS_PER_COLOR},
    types::{Color, Hertz, Position},
    unit::{Unit, BOOST_INTENSITY},
};

pub mod allocator;
pub mod errors;
pub mod frame;
pub mod normalize;
pub mod types;
pub mod unit;
