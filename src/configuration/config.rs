//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – loop structure (sub-steps, relaxation sweeps, seed)
//! - [`ParametersConfig`] – physical and behavioral tunables
//! - [`SlimeConfig`]      – initial state for each slime
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   sub_steps: 3              # physics passes per rendered frame
//!   constraint_iterations: 3  # relaxation sweeps per pass
//!   seed: 42                  # rng seed, reproducible runs
//!
//! parameters:
//!   base_gravity: 0.15
//!   grounded_gravity_mult: 3.0
//!   friction: 0.97
//!   ground_friction: 0.5
//!   drag_strength: 0.15
//!   drag_radius: 50.0
//!   healing_rate: 0.03
//!   growth_factor: 1.05
//!   min_split_points: 3
//!   min_slice_length: 10.0
//!   food_gravity: 0.3
//!   food_radius: 8.0
//!
//! surface: [ 1280.0, 720.0 ]
//!
//! slimes:
//!   - center: [ 640.0, 240.0 ]
//!     num_outer_points: 15
//!     scale: 1.0
//!     base_radius: 80.0
//!     color: [ 0.0, 1.0, 0.67 ]
//!     glow:  [ 0.0, 1.0, 0.6 ]
//! ```
//!
//! The engine maps this configuration into its internal runtime scenario
//! representation in `simulation::scenario`.

use serde::Deserialize;

/// Loop structure of the simulation.
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub sub_steps: u32, // physics passes per rendered frame
    pub constraint_iterations: u32, // relaxation sweeps per pass
    pub seed: u64, // rng seed for masses, stiffness, splits
}

/// Physical and behavioral tunables for a scenario.
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub base_gravity: f64, // per-step gravity
    pub grounded_gravity_mult: f64, // settle boost when resting on the floor
    pub friction: f64, // velocity damping per step
    pub ground_friction: f64, // bounce damping on boundary clamp
    pub drag_strength: f64, // pointer pull fraction per step
    pub drag_radius: f64, // pick radius at scale 1.0
    pub healing_rate: f64, // healing progress per tick
    pub growth_factor: f64, // scale multiplier per feed
    pub min_split_points: usize, // outer points each split half must keep
    pub min_slice_length: f64, // shorter gestures are a no-op
    pub food_gravity: f64, // fall acceleration for food
    pub food_radius: f64,
}

/// Configuration for a single slime's initial state.
#[derive(Deserialize, Debug)]
pub struct SlimeConfig {
    pub center: Vec<f64>, // initial center position [x, y]
    pub num_outer_points: usize, // ring size, 15 in the default scenario
    pub scale: f64, // initial uniform scale
    pub base_radius: f64, // ring radius at scale 1.0
    pub color: [f32; 3], // body color, rgb in 0..1
    pub glow: [f32; 3], // glow color, rgb in 0..1
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub engine: EngineConfig, // loop-level configuration
    pub parameters: ParametersConfig, // physical and behavioral tunables
    pub surface: Vec<f64>, // initial surface size [width, height]
    pub slimes: Vec<SlimeConfig>, // initial slime population
}
