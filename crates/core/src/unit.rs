//! A single addressable light.

use crate::{Color, Position};

/// Point light intensity of a unit that has been granted a boost.
pub const BOOST_INTENSITY: f32 = 10.0;

/// Single addressable light with a spatial position and an on/off color state.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    position: Position,
    color: Option<Color>,
    boosted: bool,
    // Set by `update`, cleared once the renderer has picked up the position.
    needs_update: bool,
}

impl Unit {
    /// Creates a new unit which is turned off.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            position,
            color: None,
            boosted: false,
            needs_update: true,
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Current color, `None` if the unit is turned off.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.color.is_some()
    }

    #[must_use]
    pub fn is_boosted(&self) -> bool {
        self.boosted
    }

    /// Point light intensity the renderer should use for this unit.
    ///
    /// Only a lit unit can shine, so a boosted unit that is turned off reports zero.
    #[must_use]
    pub fn intensity(&self) -> f32 {
        if self.boosted && self.is_on() {
            BOOST_INTENSITY
        } else {
            0.0
        }
    }

    /// Moves the unit, the new position becomes visible after the next [`Self::update`].
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Turns the unit on with the given color, or off if there is no color.
    pub fn set_color(&mut self, color: Option<Color>) {
        match color {
            Some(color) => self.turn_on(color),
            None => self.turn_off(),
        }
    }

    /// Sets both the color and the boost flag computed by the frame allocator.
    pub fn apply(&mut self, color: Option<Color>, boosted: bool) {
        self.set_color(color);
        self.boosted = boosted;
    }

    pub fn turn_on(&mut self, color: Color) {
        self.color = Some(color);
    }

    /// Turns the unit off, an unlit unit keeps no boost.
    pub fn turn_off(&mut self) {
        self.color = None;
        self.boosted = false;
    }

    /// Re-applies the current position for whoever renders this unit.
    pub fn update(&mut self) {
        self.needs_update = true;
    }

    /// Returns true once after each [`Self::update`] call.
    pub fn take_update(&mut self) -> bool {
        core::mem::take(&mut self.needs_update)
    }

    /// Turns the unit off and re-applies its position.
    pub fn reset(&mut self) {
        self.turn_off();
        self.update();
    }
}
