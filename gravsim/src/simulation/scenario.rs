//! Build fully-initialized simulations from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime
//! [`Simulation`]: explicit bodies first, then any generated ones, then the
//! optional heaviest-body mass boost.

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::{
    BodyConfig, ClusterConfig, ForceKindConfig, OrbitalConfig, ScenarioConfig,
};
use crate::simulation::arena::Arena;
use crate::simulation::engine::{Engine, Simulation};
use crate::simulation::error::SimError;
use crate::simulation::states::{Body, ForceKind, NVec2};

pub fn build_simulation(cfg: &ScenarioConfig) -> Result<Simulation, SimError> {
    let a_cfg = &cfg.arena;
    let arena = Arena::new(a_cfg.width, a_cfg.height, a_cfg.bounce_damping)?;

    let p_cfg = &cfg.parameters;
    let size_factor = p_cfg.size_factor;

    // Bodies: map `BodyConfig` -> runtime `Body`
    let mut bodies = cfg
        .bodies
        .iter()
        .map(|bc| body_from_config(bc, size_factor))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rng = StdRng::seed_from_u64(p_cfg.seed);
    if let Some(generator) = &cfg.generator {
        if let Some(o) = &generator.orbital {
            bodies.extend(orbital_bodies(o, &arena, size_factor, &mut rng)?);
        }
        if let Some(c) = &generator.cluster {
            bodies.extend(cluster_bodies(c, &arena, size_factor, &mut rng)?);
        }
    }

    if bodies.is_empty() {
        return Err(SimError::EmptyScenario);
    }
    let count = bodies.len();

    let e_cfg = &cfg.engine;
    let engine = Engine {
        thread_budget: e_cfg.thread_budget,
        block_size: e_cfg.block_size,
        max_dt: e_cfg.max_dt,
    };

    let mut sim = Simulation::new(bodies, arena, &engine)?;
    if p_cfg.heaviest_mass_factor != 1.0 {
        sim.amplify_heaviest(p_cfg.heaviest_mass_factor)?;
    }

    info!(
        "created {count} bodies in a {}x{} arena",
        a_cfg.width, a_cfg.height
    );
    Ok(sim)
}

pub fn body_from_config(bc: &BodyConfig, size_factor: f64) -> Result<Body, SimError> {
    let kind = match bc.kind {
        ForceKindConfig::Attractive => ForceKind::Attractive,
        ForceKindConfig::Repulsive => ForceKind::Repulsive,
    };
    Body::with_size_factor(
        bc.name.as_str(),
        bc.mass,
        bc.density,
        NVec2::new(bc.x[0], bc.x[1]),
        NVec2::new(bc.v[0], bc.v[1]),
        bc.fixed,
        kind,
        size_factor,
    )
}

/// Fixed "Sun" at the arena centre plus `count - 1` planets on the sun's row,
/// each launched upward at `speed_factor` times its circular orbit speed
pub fn orbital_bodies(
    cfg: &OrbitalConfig,
    arena: &Arena,
    size_factor: f64,
    rng: &mut StdRng,
) -> Result<Vec<Body>, SimError> {
    if cfg.count == 0 {
        return Ok(Vec::new());
    }
    let (cx, cy) = arena.center();
    let sun = Body::with_size_factor(
        "Sun",
        cfg.sun_mass,
        1.0,
        NVec2::new(cx, cy),
        NVec2::zeros(),
        true,
        ForceKind::Attractive,
        size_factor,
    )?;

    let mut bodies = Vec::with_capacity(cfg.count);
    for i in 1..cfg.count {
        let mass = 1.0 + uniform(rng, cfg.max_planet_mass);
        let x = cx + cfg.min_offset + whole(rng, cfg.offset_range);

        let mut planet = Body::with_size_factor(
            format!("Planet{i}"),
            mass,
            1.0,
            NVec2::new(x, cy),
            NVec2::zeros(),
            false,
            ForceKind::Attractive,
            size_factor,
        )?;
        let speed = planet.orbital_speed(&sun) * cfg.speed_factor;
        planet.set_velocity(NVec2::new(0.0, speed));
        bodies.push(planet);
    }

    bodies.insert(0, sun);
    Ok(bodies)
}

/// Random cloud of free bodies around the arena centre
pub fn cluster_bodies(
    cfg: &ClusterConfig,
    arena: &Arena,
    size_factor: f64,
    rng: &mut StdRng,
) -> Result<Vec<Body>, SimError> {
    let (cx, cy) = arena.center();

    (0..cfg.count)
        .map(|i| {
            let kind = if rng.gen::<f64>() < cfg.repulsor_fraction {
                ForceKind::Repulsive
            } else {
                ForceKind::Attractive
            };
            let mass = cfg.min_mass + whole(rng, cfg.mass_range);
            let x = NVec2::new(
                cx + cfg.spread - whole(rng, 2.0 * cfg.spread),
                cy + cfg.spread - whole(rng, 2.0 * cfg.spread),
            );
            let v = NVec2::new(
                -cfg.max_speed + whole(rng, 2.0 * cfg.max_speed),
                -cfg.max_speed + whole(rng, 2.0 * cfg.max_speed),
            );
            Body::with_size_factor(format!("Planet{i}"), mass, 1.0, x, v, false, kind, size_factor)
        })
        .collect()
}

/// Uniform whole number in `[0, range)`, or 0 when the range holds none
fn whole(rng: &mut StdRng, range: f64) -> f64 {
    let n = range.floor() as u64;
    if n > 0 {
        rng.gen_range(0..n) as f64
    } else {
        0.0
    }
}

/// Uniform sample in `[0, range)`, or 0 for an empty range
fn uniform(rng: &mut StdRng, range: f64) -> f64 {
    if range > 0.0 {
        rng.gen_range(0.0..range)
    } else {
        0.0
    }
}
