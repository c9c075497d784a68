pub mod states;
pub mod params;
pub mod geometry;
pub mod solver;
pub mod healing;
pub mod split;
pub mod food;
pub mod scenario;
