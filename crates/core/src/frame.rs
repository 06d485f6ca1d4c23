//! Animation frames and their decoding from flat channel values.

use alloc::vec::Vec;
use core::{ops::Deref, time::Duration};

use rgb::FromSlice;

use crate::{Color, Error, Hertz, Result};

/// Number of channels per single color.
pub const CHANNELS_PER_COLOR: usize = 3;

/// One time slice of colors, one per unit, `None` means the unit is off.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame(Vec<Option<Color>>);

impl Frame {
    /// Splits flat channel values into colors for a collection of `units` lights.
    ///
    /// A black color turns the unit off.
    pub fn decode(channels: &[u8], units: usize) -> Result<Self> {
        if channels.len() != units * CHANNELS_PER_COLOR {
            return Err(Error::frame_length_mismatch(units, channels.len()));
        }

        let colors = channels
            .as_rgb()
            .iter()
            .map(|&color| (color != Color::default()).then_some(color))
            .collect();
        Ok(Self(colors))
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Option<Color>> {
        self.0
    }
}

impl From<Vec<Option<Color>>> for Frame {
    fn from(colors: Vec<Option<Color>>) -> Self {
        Self(colors)
    }
}

impl Deref for Frame {
    type Target = [Option<Color>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Finite sequence of flat channel frames played at the given frame rate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Animation {
    pub frames: Vec<Vec<u8>>,
    pub fps: Hertz,
}

impl Animation {
    pub fn new(frames: Vec<Vec<u8>>, fps: impl Into<Hertz>) -> Self {
        Self {
            frames,
            fps: fps.into(),
        }
    }

    /// Pause between two consecutive frames.
    pub fn frame_period(&self) -> Result<Duration> {
        self.fps.period().ok_or(Error::InvalidFps)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_frame() {
        let frame = Frame::decode(&[255, 0, 0, 0, 0, 0, 1, 2, 3], 3).unwrap();
        assert_eq!(
            frame.into_inner(),
            vec![
                Some(Color::new(255, 0, 0)),
                None,
                Some(Color::new(1, 2, 3))
            ]
        );
    }

    #[test]
    fn test_decode_frame_length_mismatch() {
        assert_eq!(
            Frame::decode(&[0; 8], 3),
            Err(Error::FrameLengthMismatch {
                expected: 9,
                actual: 8
            })
        );
        // Enough channels for three colors, but there are four units.
        assert_eq!(
            Frame::decode(&[0; 9], 4),
            Err(Error::FrameLengthMismatch {
                expected: 12,
                actual: 9
            })
        );
        assert_eq!(Frame::decode(&[], 0), Ok(Frame::default()));
    }

    #[test]
    fn test_animation_with_zero_fps() {
        let animation = Animation::new(vec![vec![0; 3]], 0);
        assert_eq!(animation.frame_period(), Err(Error::InvalidFps));
    }
}
