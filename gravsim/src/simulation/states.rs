//! Core state types for the gravity engine
//!
//! A `Body` owns its kinematic state (position, velocity), its force
//! accumulator for the current tick, and the force law it applies when it is
//! the subject of a pairwise interaction.

use nalgebra::Vector2;

use crate::simulation::arena::Arena;
use crate::simulation::error::SimError;
use crate::simulation::forces::G;

pub type NVec2 = Vector2<f64>;

/// Scale from "area" (mass / density) to displayed radius
pub const DEFAULT_SIZE_FACTOR: f64 = 0.1;

/// Smallest radius any body is given, regardless of mass
pub const MIN_RADIUS: f64 = 2.0;

/// Force law a body applies when it initiates a pairwise interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForceKind {
    /// Standard gravity: both bodies pulled toward each other
    #[default]
    Attractive,
    /// Same magnitude with the sign flipped: both bodies pushed apart
    Repulsive,
}

#[derive(Debug, Clone)]
pub struct Body {
    name: String,
    mass: f64,
    density: f64,
    radius: f64, // fixed at construction
    x: NVec2,    // position
    v: NVec2,    // velocity
    f: NVec2,    // accumulated force for the current tick
    fixed: bool,
    kind: ForceKind,
}

impl Body {
    /// Build a body with the default size factor.
    ///
    /// Fails if `mass` or `density` is not strictly positive and finite.
    pub fn new(
        name: impl Into<String>,
        mass: f64,
        density: f64,
        x: NVec2,
        v: NVec2,
        fixed: bool,
        kind: ForceKind,
    ) -> Result<Self, SimError> {
        Self::with_size_factor(name, mass, density, x, v, fixed, kind, DEFAULT_SIZE_FACTOR)
    }

    /// Build a body whose radius is `max(sqrt(mass / density / pi) * size_factor, MIN_RADIUS)`.
    #[allow(clippy::too_many_arguments)]
    pub fn with_size_factor(
        name: impl Into<String>,
        mass: f64,
        density: f64,
        x: NVec2,
        v: NVec2,
        fixed: bool,
        kind: ForceKind,
        size_factor: f64,
    ) -> Result<Self, SimError> {
        let name = name.into();
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::InvalidMass { name, mass });
        }
        if !(density.is_finite() && density > 0.0) {
            return Err(SimError::InvalidDensity { name, density });
        }

        let radius = ((mass / density) / std::f64::consts::PI).sqrt() * size_factor;

        Ok(Self {
            name,
            mass,
            density,
            radius: radius.max(MIN_RADIUS),
            x,
            v,
            f: NVec2::zeros(),
            fixed,
            kind,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Change the mass. The radius keeps the value computed at construction.
    pub fn set_mass(&mut self, mass: f64) -> Result<(), SimError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::InvalidMass {
                name: self.name.clone(),
                mass,
            });
        }
        self.mass = mass;
        Ok(())
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn position(&self) -> NVec2 {
        self.x
    }

    pub fn velocity(&self) -> NVec2 {
        self.v
    }

    pub fn set_velocity(&mut self, v: NVec2) {
        self.v = v;
    }

    pub fn force(&self) -> NVec2 {
        self.f
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    pub fn kind(&self) -> ForceKind {
        self.kind
    }

    /// Euclidean distance between centres
    pub fn distance_to(&self, other: &Body) -> f64 {
        (other.x - self.x).norm()
    }

    /// Speed needed for a circular orbit around `other`.
    /// Only meant for seeding initial velocities.
    pub fn orbital_speed(&self, other: &Body) -> f64 {
        let numerator = G * other.mass * other.mass;
        let denominator = (self.mass + other.mass) * self.distance_to(other);
        (numerator / denominator).sqrt()
    }

    pub fn apply_force(&mut self, f: NVec2) {
        self.f += f;
    }

    pub fn reset_forces(&mut self) {
        self.f = NVec2::zeros();
    }

    /// Semi-implicit Euler step followed by a damped bounce off the arena walls.
    /// Fixed bodies are left untouched.
    ///
    /// The position ends in `[radius, bound - radius]` on each axis only while
    /// the body fits, i.e. `2 * radius <= bound`. A body wider than the arena
    /// is pinned at `bound - radius` whenever it crosses the high wall.
    pub fn integrate(&mut self, dt: f64, arena: &Arena) {
        if self.fixed {
            return;
        }

        let a = self.f / self.mass; // F = ma
        self.v += dt * a;
        self.x += dt * self.v;

        let damping = arena.bounce_damping();
        bounce(&mut self.x.x, &mut self.v.x, self.radius, arena.width(), damping);
        bounce(&mut self.x.y, &mut self.v.y, self.radius, arena.height(), damping);
    }
}

/// Clamp one axis into `[radius, bound - radius]`, reversing and damping the
/// velocity component if a wall was crossed
fn bounce(pos: &mut f64, vel: &mut f64, radius: f64, bound: f64, damping: f64) {
    if *pos + radius > bound {
        *pos = bound - radius;
        *vel = -*vel * damping;
    } else if *pos - radius < 0.0 {
        *pos = radius;
        *vel = -*vel * damping;
    }
}
