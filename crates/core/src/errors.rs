use displaydoc::Display;

/// A specialized result type for the light playback.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while driving a light collection.
#[derive(Clone, Copy, PartialEq, Eq, Display, Debug)]
pub enum Error {
    /// The frame has {actual} color channels, but the collection expects {expected}.
    FrameLengthMismatch {
        /// Channel count required by the collection, three per unit.
        expected: usize,
        /// Channel count carried by the rejected frame.
        actual: usize,
    },
    /// The animation frame rate must be greater than zero.
    InvalidFps,
    /// The collection is already playing an animation.
    AlreadyPlaying,
}

impl Error {
    /// Creates a frame length mismatch error for a collection of the given length.
    #[must_use]
    pub fn frame_length_mismatch(units: usize, channels: usize) -> Self {
        Self::FrameLengthMismatch {
            expected: units * crate::CHANNELS_PER_COLOR,
            actual: channels,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[test]
fn test_error_messages() {
    assert_eq!(
        Error::frame_length_mismatch(3, 8).to_string(),
        "The frame has 8 color channels, but the collection expects 9."
    );
    assert_eq!(
        Error::InvalidFps.to_string(),
        "The animation frame rate must be greater than zero."
    );
}
