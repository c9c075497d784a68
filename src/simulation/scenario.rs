//! Build a fully-initialized simulation scenario from configuration.
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime
//! bundle consumed by the viewer and the tests:
//! - numerical parameters (`Parameters`)
//! - system state (`System` with the initial slimes at t = 0)
//! - the seeded rng and monotonic id source every constructor draws from
//!
//! The scenario is inserted into Bevy as a `Resource` and consumed by
//! the input, physics, and drawing systems.

use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::configuration::config::{ScenarioConfig, SlimeConfig};
use crate::simulation::params::Parameters;
use crate::simulation::states::{IdSource, NVec2, Slime, System};

/// Bevy resource representing a fully-initialized scenario.
///
/// The rng and id source live here rather than inside `System` so that
/// state stays plain data: everything nondeterministic is drawn from
/// these two injected handles.
#[derive(Resource)]
pub struct Scenario {
    pub parameters: Parameters,
    pub system: System,
    pub rng: StdRng,
    pub ids: IdSource,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Self {
        // Parameters (runtime) from the engine + parameters blocks.
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            base_gravity: p_cfg.base_gravity,
            grounded_gravity_mult: p_cfg.grounded_gravity_mult,
            friction: p_cfg.friction,
            ground_friction: p_cfg.ground_friction,
            drag_strength: p_cfg.drag_strength,
            drag_radius: p_cfg.drag_radius,
            sub_steps: cfg.engine.sub_steps,
            constraint_iterations: cfg.engine.constraint_iterations,
            healing_rate: p_cfg.healing_rate,
            growth_factor: p_cfg.growth_factor,
            min_split_points: p_cfg.min_split_points,
            min_slice_length: p_cfg.min_slice_length,
            food_gravity: p_cfg.food_gravity,
            food_radius: p_cfg.food_radius,
            seed: cfg.engine.seed,
        };

        let mut rng = StdRng::seed_from_u64(parameters.seed);
        let mut ids = IdSource::new();

        // Slimes: map each SlimeConfig to a fresh circular slime.
        let slimes: Vec<Slime> = cfg
            .slimes
            .iter()
            .map(|sc: &SlimeConfig| {
                Slime::circular(
                    NVec2::new(sc.center[0], sc.center[1]),
                    sc.num_outer_points,
                    sc.scale,
                    sc.base_radius,
                    sc.color,
                    sc.glow,
                    &mut rng,
                    &mut ids,
                )
            })
            .collect();

        // Initial system state at t = 0.
        let system = System {
            slimes,
            food: Vec::new(),
            bounds: NVec2::new(cfg.surface[0], cfg.surface[1]),
            t: 0.0,
            events: Vec::new(),
        };

        Self {
            parameters,
            system,
            rng,
            ids,
        }
    }
}
