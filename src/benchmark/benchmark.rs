use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::simulation::params::Parameters;
use crate::simulation::solver::step_system;
use crate::simulation::split::{apply_slice, slice_system};
use crate::simulation::states::{IdSource, InputSnapshot, NVec2, Slime, System};

const SURFACE: (f64, f64) = (1280.0, 720.0);

/// Build a system with `count` slimes of `outer` ring points laid out in
/// a row across the surface. Deterministic: seeded rng, no wall clock.
fn bench_system(count: usize, outer: usize) -> (System, Parameters, StdRng, IdSource) {
    let params = Parameters::default();
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut ids = IdSource::new();

    let mut slimes = Vec::with_capacity(count);
    for i in 0..count {
        let x = SURFACE.0 * (i as f64 + 0.5) / count as f64;
        slimes.push(Slime::circular(
            NVec2::new(x, SURFACE.1 * 0.4),
            outer,
            1.0,
            80.0,
            [0.0, 1.0, 0.67],
            [0.0, 1.0, 0.6],
            &mut rng,
            &mut ids,
        ));
    }

    let system = System {
        slimes,
        food: Vec::new(),
        bounds: NVec2::new(SURFACE.0, SURFACE.1),
        t: 0.0,
        events: Vec::new(),
    };

    (system, params, rng, ids)
}

/// Solver cost per pass as the ring size grows. Spring count is
/// quadratic in the outer point count, so this curve should be too.
pub fn bench_solver() {
    let ns = [8, 16, 32, 64, 128];
    let steps = 1000;

    for n in ns {
        let (mut sys, params, _rng, _ids) = bench_system(1, n);
        let input = InputSnapshot::default();

        // Warm up
        for _ in 0..10 {
            step_system(&mut sys, &input, &params);
        }

        let t0 = Instant::now();
        for _ in 0..steps {
            step_system(&mut sys, &input, &params);
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        println!(
            "outer = {n:4}, springs = {:5}, step = {per_step:10.8} s",
            sys.slimes[0].springs.len()
        );
    }
}

/// Slice cost across growing populations: one long horizontal cut that
/// bisects every slime in the row.
pub fn bench_split() {
    let counts = [1, 4, 16, 64];

    for count in counts {
        let (mut sys, params, mut rng, mut ids) = bench_system(count, 16);

        let cut_start = NVec2::new(0.0, SURFACE.1 * 0.4);
        let cut_end = NVec2::new(SURFACE.0, SURFACE.1 * 0.4);

        let t0 = Instant::now();
        let outcome = slice_system(&mut sys, cut_start, cut_end, &params, &mut rng, &mut ids);
        let split_time = t0.elapsed().as_secs_f64();

        let spawned = outcome.spawn.len();
        apply_slice(&mut sys, outcome);

        println!(
            "slimes = {count:3}, spawned = {spawned:3}, slice = {split_time:10.8} s, total now = {}",
            sys.slimes.len()
        );
    }
}
