//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`EngineConfig`]     – scheduler tuning and the time step ceiling
//! - [`ArenaConfig`]      – bounds and wall damping
//! - [`ParametersConfig`] – radius scaling, generator seed, heaviest-body boost
//! - [`BodyConfig`]       – explicit initial state for each body
//! - [`GeneratorConfig`]  – optional procedural bodies appended after `bodies`
//!
//! Everything except the bodies has a default matching the stock simulation.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   thread_budget: 8
//!   block_size: 64
//!   max_dt: 0.0166667
//!
//! arena:
//!   width: 1200
//!   height: 800
//!   bounce_damping: 0.5
//!
//! parameters:
//!   size_factor: 0.1
//!   seed: 7
//!   heaviest_mass_factor: 3.0
//!
//! bodies:
//!   - name: Sun
//!     mass: 1000000.0
//!     x: [600.0, 400.0]
//!     fixed: true
//!   - name: Pusher
//!     mass: 20000.0
//!     x: [300.0, 400.0]
//!     v: [0.0, 40.0]
//!     kind: repulsive
//!
//! generator:
//!   orbital:
//!     count: 32
//! ```

use serde::Deserialize;

use crate::simulation::arena::DEFAULT_BOUNCE_DAMPING;
use crate::simulation::engine::DEFAULT_MAX_DT;
use crate::simulation::scheduler::{DEFAULT_BLOCK_SIZE, DEFAULT_THREAD_BUDGET};
use crate::simulation::states::DEFAULT_SIZE_FACTOR;

/// Scheduler tuning and time step ceiling
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub thread_budget: usize, // workers available to the force scheduler
    pub block_size: usize,    // ranges this small are scanned directly
    pub max_dt: f64,          // largest dt integrated in one tick
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thread_budget: DEFAULT_THREAD_BUDGET,
            block_size: DEFAULT_BLOCK_SIZE,
            max_dt: DEFAULT_MAX_DT,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: u32,
    pub height: u32,
    pub bounce_damping: f64, // fraction of speed kept after hitting a wall
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            bounce_damping: DEFAULT_BOUNCE_DAMPING,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub size_factor: f64,          // radius = sqrt(mass / density / pi) * size_factor
    pub seed: u64,                 // generator seed, makes runs reproducible
    pub heaviest_mass_factor: f64, // applied once after setup, 1.0 leaves masses alone
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            size_factor: DEFAULT_SIZE_FACTOR,
            seed: 0,
            heaviest_mass_factor: 1.0,
        }
    }
}

/// Force law a body applies: `kind: "attractive"` or `kind: "repulsive"`
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ForceKindConfig {
    #[default]
    #[serde(rename = "attractive")]
    Attractive,

    #[serde(rename = "repulsive")]
    Repulsive,
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub mass: f64,
    #[serde(default = "default_density")]
    pub density: f64,
    pub x: [f64; 2], // initial position
    #[serde(default)]
    pub v: [f64; 2], // initial velocity
    #[serde(default)]
    pub fixed: bool, // never moves
    #[serde(default)]
    pub kind: ForceKindConfig,
}

fn default_density() -> f64 {
    1.0
}

/// A heavy fixed sun at the arena centre with planets strung out to its right
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct OrbitalConfig {
    pub count: usize,          // total bodies including the sun
    pub sun_mass: f64,
    pub max_planet_mass: f64,  // planet mass is uniform in [1, 1 + max_planet_mass)
    pub min_offset: f64,       // closest planet distance from the sun
    pub offset_range: f64,     // whole-number offset in [min_offset, min_offset + offset_range)
    pub speed_factor: f64,     // multiple of the circular orbit speed
}

impl Default for OrbitalConfig {
    fn default() -> Self {
        Self {
            count: 32,
            sun_mass: 1_000_000.0,
            max_planet_mass: 50_000.0,
            min_offset: 100.0,
            offset_range: 600.0,
            speed_factor: 1.5,
        }
    }
}

/// A random cloud around the arena centre, some of it repulsive
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ClusterConfig {
    pub count: usize,
    pub repulsor_fraction: f64, // probability a body is a repulsor
    pub spread: f64,            // half-width of the spawn square
    pub max_speed: f64,         // velocity components in [-max_speed, max_speed)
    pub min_mass: f64,
    pub mass_range: f64,        // mass in [min_mass, min_mass + mass_range)
    // mass, position and velocity offsets are drawn as whole numbers
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            count: 32,
            repulsor_fraction: 0.1,
            spread: 200.0,
            max_speed: 50.0,
            min_mass: 10_000.0,
            mass_range: 300_000.0,
        }
    }
}

/// Procedural bodies; each generator that is present appends its bodies
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct GeneratorConfig {
    pub orbital: Option<OrbitalConfig>,
    pub cluster: Option<ClusterConfig>,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub generator: Option<GeneratorConfig>,
}
