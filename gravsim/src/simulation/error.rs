//! Error types for the gravity engine
//!
//! Configuration errors are raised at construction time and abort setup.
//! Force computation errors abort the tick they occur in.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Mass must be finite and strictly positive (integration divides by it)
    #[error("body {name:?}: mass must be positive and finite, got {mass}")]
    InvalidMass { name: String, mass: f64 },

    /// Density must be finite and strictly positive (radius takes its square root)
    #[error("body {name:?}: density must be positive and finite, got {density}")]
    InvalidDensity { name: String, density: f64 },

    /// Scheduler or stepping settings out of range
    #[error("invalid engine settings: {0}")]
    InvalidEngine(String),

    /// Arena must have a non-zero extent and a damping coefficient in [0, 1]
    #[error("invalid arena {width}x{height} with damping {damping}")]
    InvalidArena { width: u32, height: u32, damping: f64 },

    /// A worker branch panicked while accumulating pairwise forces
    #[error("force computation failed: {0}")]
    ForceComputation(String),

    #[error("scenario contains no bodies")]
    EmptyScenario,
}
