use std::time::Instant;

use crate::simulation::forces::accumulate_forces_sequential;
use crate::simulation::scheduler::{ForceScheduler, DEFAULT_BLOCK_SIZE};
use crate::simulation::states::{Body, ForceKind, NVec2};
use crate::simulation::error::SimError;

/// Thread budgets compared against the sequential double loop
const BUDGETS: [usize; 4] = [1, 2, 4, 8];

/// Helper to build a manual body set of size `n`
pub fn make_bodies(n: usize) -> Result<Vec<Body>, SimError> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            // deterministic positions, no rand needed
            let x = NVec2::new(
                600.0 + (i_f * 0.37).sin() * 400.0,
                400.0 + (i_f * 0.13).cos() * 300.0,
            );
            Body::new(format!("b{i}"), 1000.0, 1.0, x, NVec2::zeros(), false, ForceKind::Attractive)
        })
        .collect()
}

/// Time one full force accumulation per N, sequential vs. each thread budget.
/// Paste output directly into a spreadsheet to graph
pub fn bench_scheduler() -> Result<(), SimError> {
    let ns = [256, 512, 1024, 2048, 4096, 8192];
    let steps = 3; // runs averaged per model

    let schedulers = BUDGETS
        .iter()
        .map(|&t| ForceScheduler::new(t, DEFAULT_BLOCK_SIZE))
        .collect::<Result<Vec<_>, _>>()?;

    let header: Vec<String> = BUDGETS.iter().map(|t| format!("t{t}_ms")).collect();
    println!("N,sequential_ms,{}", header.join(","));

    for n in ns {
        let template = make_bodies(n)?;

        // Sequential reference
        let mut bodies = template.clone();
        accumulate_forces_sequential(&mut bodies); // warm-up
        let t0 = Instant::now();
        for _ in 0..steps {
            accumulate_forces_sequential(&mut bodies);
        }
        let ms_seq = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        let mut row = vec![format!("{n}"), format!("{ms_seq:.6}")];
        for scheduler in &schedulers {
            let mut bodies = template.clone();
            scheduler.compute(&mut bodies)?; // warm-up

            let t1 = Instant::now();
            for _ in 0..steps {
                scheduler.compute(&mut bodies)?;
            }
            let ms = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;
            row.push(format!("{ms:.6}"));
        }

        println!("{}", row.join(","));
    }
    Ok(())
}
