//! Rectangular bounds the bodies live in
//!
//! The arena is read-only during a tick. Bodies consult it while integrating
//! to clamp their position and bounce off the walls.

use crate::simulation::error::SimError;

/// Damping applied to the velocity component reversed by a wall hit
pub const DEFAULT_BOUNCE_DAMPING: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    width: u32,
    height: u32,
    bounce_damping: f64,
}

impl Arena {
    pub fn new(width: u32, height: u32, bounce_damping: f64) -> Result<Self, SimError> {
        validate(width, height, bounce_damping)?;
        Ok(Self {
            width,
            height,
            bounce_damping,
        })
    }

    /// Apply a resize event from the presentation layer
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SimError> {
        validate(width, height, self.bounce_damping)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.width as f64
    }

    pub fn height(&self) -> f64 {
        self.height as f64
    }

    pub fn bounce_damping(&self) -> f64 {
        self.bounce_damping
    }

    /// Centre of the arena, used to place generated scenarios
    pub fn center(&self) -> (f64, f64) {
        (self.width() / 2.0, self.height() / 2.0)
    }
}

fn validate(width: u32, height: u32, damping: f64) -> Result<(), SimError> {
    if width == 0 || height == 0 || !(0.0..=1.0).contains(&damping) {
        return Err(SimError::InvalidArena {
            width,
            height,
            damping,
        });
    }
    Ok(())
}
