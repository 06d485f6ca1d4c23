use serde::{Deserialize, Serialize};
use xmaslights_core::{BoostPolicy, FrameAllocator, Hertz, BOOST_CAP};

/// Playback configuration of a light collection.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Target frame rate of the animations.
    pub fps: Hertz,
    /// Whether an animation starts over once its last frame is shown.
    #[serde(rename = "loop")]
    pub looping: bool,
    /// How long a granted intensity boost lasts.
    pub boost_policy: BoostPolicy,
    /// The maximum number of units boosted in a single frame.
    pub boost_cap: usize,
    /// Factor applied to every channel value while loading animations.
    pub brightness: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            fps: Hertz(30),
            looping: false,
            boost_policy: BoostPolicy::Transient,
            boost_cap: BOOST_CAP,
            brightness: 1.0,
        }
    }
}

impl PlaybackConfig {
    /// Creates a frame allocator with the configured boost settings.
    #[must_use]
    pub fn allocator(&self) -> FrameAllocator {
        FrameAllocator::new(self.boost_policy).with_cap(self.boost_cap)
    }
}

#[test]
fn test_partial_config_uses_defaults() {
    let config: PlaybackConfig =
        serde_json::from_str(r#"{ "fps": 60, "loop": true, "boost_policy": "sticky" }"#).unwrap();

    assert_eq!(config.fps, Hertz(60));
    assert!(config.looping);
    assert_eq!(config.allocator().policy(), BoostPolicy::Sticky);
    assert_eq!(config.allocator().cap(), BOOST_CAP);
    assert_eq!(config.brightness, 1.0);
}
