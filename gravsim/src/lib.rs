pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Body, ForceKind, NVec2};
pub use simulation::error::SimError;
pub use simulation::arena::Arena;
pub use simulation::forces::{apply_pairwise_force, attraction, force_magnitude, accumulate_forces_sequential, G, MIN_DISTANCE};
pub use simulation::scheduler::ForceScheduler;
pub use simulation::engine::{Engine, Simulation, BodyView};
pub use simulation::scenario::build_simulation;

pub use configuration::config::{EngineConfig, ArenaConfig, ParametersConfig, BodyConfig, GeneratorConfig, ScenarioConfig};

pub use benchmark::benchmark::bench_scheduler;
