pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{
    DragTarget, Food, IdSource, InputSnapshot, NVec2, Point, SimEvent, Slime, Spring, System,
};
pub use simulation::params::Parameters;
pub use simulation::geometry::Rect;
pub use simulation::solver::{find_drag_point, resize_system, step_slime, step_system};
pub use simulation::split::{apply_slice, slice_system, SliceOutcome};
pub use simulation::healing::update_healing;
pub use simulation::food::{spawn_food, update_food};
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, ParametersConfig, ScenarioConfig, SlimeConfig};

pub use visualization::vis2d::run_2d;

pub use benchmark::benchmark::{bench_solver, bench_split};
