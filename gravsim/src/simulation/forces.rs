//! Pairwise force law for the gravity engine
//!
//! One call handles one unordered pair: the force is computed once and applied
//! with opposite signs to both bodies. The sign convention is chosen by the
//! force law of the body that initiates the call.

use crate::simulation::states::{Body, ForceKind, NVec2};

/// Gravitational constant (toy units, not SI)
pub const G: f64 = 1.0;

/// Softening floor on the squared separation (20 * 20)
pub const MIN_DISTANCE: f64 = 20.0 * 20.0;

/// Magnitude of the force between `a` and `b`: `G * m_a * m_b / max(r^2, MIN_DISTANCE)`
pub fn force_magnitude(a: &Body, b: &Body) -> f64 {
    let r = b.position() - a.position();
    G * a.mass() * b.mass() / r.dot(&r).max(MIN_DISTANCE)
}

/// Attractive force exerted on `a` by `b`, pointing from `a` toward `b`.
///
/// The squared separation is floored at [`MIN_DISTANCE`], so the result is
/// always finite. The direction is `r / max(|r|, 20)`, so the vector's length
/// equals [`force_magnitude`] only once the bodies are at least 20 apart;
/// closer pairs get `|r| / 20` of it, and exactly coincident centres get zero.
pub fn attraction(a: &Body, b: &Body) -> NVec2 {
    // r points from a to b
    let r = b.position() - a.position();

    let r2 = r.dot(&r).max(MIN_DISTANCE); // keep close pairs from flying apart
    let dist = r2.sqrt();

    // F = |F| * r / |r|
    let magnitude = G * a.mass() * b.mass() / r2;
    r * (magnitude / dist)
}

/// Accumulate the force between `a` and `b` into both accumulators.
///
/// `a` is the subject of the call: if it is a repulsor the pair pushes apart,
/// otherwise the pair attracts. `b`'s own force law is not consulted.
pub fn apply_pairwise_force(a: &mut Body, b: &mut Body) {
    let f = match a.kind() {
        ForceKind::Attractive => attraction(a, b),
        ForceKind::Repulsive => -attraction(a, b),
    };

    a.apply_force(f);
    b.apply_force(-f);
}

/// Naive all-pairs accumulation on the calling thread.
///
/// Reference the parallel scheduler is checked and benchmarked against.
/// Accumulators are not reset first.
pub fn accumulate_forces_sequential(bodies: &mut [Body]) {
    let n = bodies.len();

    // Loop over each unordered pair (i, j) with i < j
    for i in 0..n {
        // split so body i and every body j > i can be borrowed together
        let (head, tail) = bodies.split_at_mut(i + 1);
        let bi = &mut head[i];
        for bj in tail.iter_mut() {
            apply_pairwise_force(bi, bj);
        }
    }
}
