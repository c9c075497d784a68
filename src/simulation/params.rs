//! Numerical and behavioral parameters for the simulation.
//!
//! `Parameters` holds the runtime tunables:
//! - gravity, friction, and the grounded "settle" boost,
//! - drag coupling strength and pick radius,
//! - sub-step and relaxation iteration counts,
//! - healing, growth, slicing, and food constants,
//! - the rng seed that makes runs reproducible.

#[derive(Debug, Clone)]
pub struct Parameters {
    pub base_gravity: f64, // per-step gravity added to implicit velocity
    pub grounded_gravity_mult: f64, // settle boost for bodies resting on the floor
    pub friction: f64, // velocity damping per step
    pub ground_friction: f64, // bounce damping applied on boundary clamp
    pub drag_strength: f64, // fraction of pointer offset applied per step
    pub drag_radius: f64, // pick radius at scale 1.0
    pub sub_steps: u32, // physics passes per rendered frame
    pub constraint_iterations: u32, // relaxation sweeps per pass
    pub healing_rate: f64, // healing progress per tick
    pub growth_factor: f64, // scale multiplier per feed
    pub min_split_points: usize, // outer points each split half must keep
    pub min_slice_length: f64, // gestures shorter than this are a no-op
    pub food_gravity: f64, // fall acceleration for food items
    pub food_radius: f64,
    pub seed: u64, // deterministic seed for masses, stiffness, splits
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            base_gravity: 0.15,
            grounded_gravity_mult: 3.0,
            friction: 0.97,
            ground_friction: 0.5,
            drag_strength: 0.15,
            drag_radius: 50.0,
            sub_steps: 3,
            constraint_iterations: 3,
            healing_rate: 0.03,
            growth_factor: 1.05,
            min_split_points: 3,
            min_slice_length: 10.0,
            food_gravity: 0.3,
            food_radius: 8.0,
            seed: 42,
        }
    }
}
