//! Runtime engine settings and the per-tick driver
//!
//! `Engine` carries the scheduler tuning and the time step ceiling.
//! `Simulation` owns the bodies, the arena and the scheduler, and advances
//! them one tick at a time.

use std::time::Instant;

use log::{debug, error};

use crate::simulation::arena::Arena;
use crate::simulation::error::SimError;
use crate::simulation::scheduler::{ForceScheduler, DEFAULT_BLOCK_SIZE, DEFAULT_THREAD_BUDGET};
use crate::simulation::states::{Body, NVec2};

/// Largest time delta integrated in one tick (one 60 Hz frame)
pub const DEFAULT_MAX_DT: f64 = 1.0 / 60.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub thread_budget: usize, // workers available to the force scheduler
    pub block_size: usize,    // ranges this small are scanned directly
    pub max_dt: f64,          // ceiling on the integrated time delta
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            thread_budget: DEFAULT_THREAD_BUDGET,
            block_size: DEFAULT_BLOCK_SIZE,
            max_dt: DEFAULT_MAX_DT,
        }
    }
}

/// What a renderer needs to draw one body after a tick
#[derive(Debug, Clone, PartialEq)]
pub struct BodyView {
    pub name: String,
    pub position: NVec2,
    pub velocity: NVec2,
    pub radius: f64,
}

pub struct Simulation {
    bodies: Vec<Body>,
    arena: Arena,
    scheduler: ForceScheduler,
    max_dt: f64,
    time: f64,
    ticks: u64,
}

impl Simulation {
    pub fn new(bodies: Vec<Body>, arena: Arena, engine: &Engine) -> Result<Self, SimError> {
        if !(engine.max_dt.is_finite() && engine.max_dt > 0.0) {
            return Err(SimError::InvalidEngine(format!(
                "max_dt must be positive and finite, got {}",
                engine.max_dt
            )));
        }
        let scheduler = ForceScheduler::new(engine.thread_budget, engine.block_size)?;

        Ok(Self {
            bodies,
            arena,
            scheduler,
            max_dt: engine.max_dt,
            time: 0.0,
            ticks: 0,
        })
    }

    /// Advance one tick: reset forces, accumulate every pairwise force, then
    /// integrate each body with `dt` capped at the engine's `max_dt`.
    ///
    /// If force accumulation fails the bodies are not integrated and the
    /// error is returned.
    pub fn step(&mut self, dt: f64) -> Result<(), SimError> {
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(SimError::InvalidEngine(format!(
                "time step must be non-negative and finite, got {dt}"
            )));
        }
        let dt = dt.min(self.max_dt);
        let start = Instant::now();

        self.reset_forces();
        if let Err(e) = self.scheduler.compute(&mut self.bodies) {
            error!("tick {} aborted: {e}", self.ticks);
            return Err(e);
        }
        self.integrate(dt);

        self.time += dt;
        self.ticks += 1;
        debug!(
            "tick {}: {} bodies, dt {dt:.5}, {:.3} ms",
            self.ticks,
            self.bodies.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(())
    }

    pub fn reset_forces(&mut self) {
        for b in self.bodies.iter_mut() {
            b.reset_forces();
        }
    }

    fn integrate(&mut self, dt: f64) {
        let arena = &self.arena;
        for b in self.bodies.iter_mut() {
            b.integrate(dt, arena);
        }
    }

    /// Apply a resize event; takes effect from the next tick
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SimError> {
        self.arena.resize(width, height)
    }

    /// Index of the heaviest body, first one wins on ties
    pub fn heaviest_body_index(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, b) in self.bodies.iter().enumerate() {
            match best {
                Some(j) if self.bodies[j].mass() >= b.mass() => {}
                _ => best = Some(i),
            }
        }
        best
    }

    /// Multiply the heaviest body's mass by `factor`. Its radius is unchanged.
    pub fn amplify_heaviest(&mut self, factor: f64) -> Result<(), SimError> {
        if let Some(i) = self.heaviest_body_index() {
            let body = &mut self.bodies[i];
            body.set_mass(body.mass() * factor)?;
        }
        Ok(())
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn snapshot(&self) -> Vec<BodyView> {
        self.bodies
            .iter()
            .map(|b| BodyView {
                name: b.name().to_string(),
                position: b.position(),
                velocity: b.velocity(),
                radius: b.radius(),
            })
            .collect()
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn scheduler(&self) -> &ForceScheduler {
        &self.scheduler
    }

    /// Simulated time elapsed, after dt capping
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
