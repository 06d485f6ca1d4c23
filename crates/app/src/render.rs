//! Renderer seam.

use std::fmt::Debug;

use smart_leds::{SmartLedsWrite, RGB8};
use xmaslights_core::Unit;

/// Something that displays units after their state has changed.
///
/// A playback task calls it after every applied frame and after the units have been reset,
/// implementations read the color, intensity and position of each unit.
pub trait UnitsRender {
    fn render(&mut self, units: &[Unit]);
}

/// Renderer for the headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRender;

impl UnitsRender for NoRender {
    fn render(&mut self, _units: &[Unit]) {}
}

/// Adapter that writes unit colors into a LED strip, the turned off units become black.
#[derive(Debug, Default)]
pub struct StripRender<S> {
    strip: S,
}

impl<S> StripRender<S> {
    pub fn new(strip: S) -> Self {
        Self { strip }
    }

    pub fn strip(&self) -> &S {
        &self.strip
    }

    pub fn into_inner(self) -> S {
        self.strip
    }
}

impl<S> UnitsRender for StripRender<S>
where
    S: SmartLedsWrite<Color = RGB8>,
    S::Error: Debug,
{
    fn render(&mut self, units: &[Unit]) {
        let colors = units.iter().map(|unit| unit.color().unwrap_or_default());
        if let Err(err) = self.strip.write(colors) {
            log::warn!("Unable to write colors to the strip: {err:?}");
        }
    }
}
