//! Core state types for the slime simulation.
//!
//! A `Slime` is a mass-spring ring: outer points at indices `0..n-1`
//! followed by exactly one center point stored last. The spring set is
//! fully determined by the outer point count and is rebuilt wholesale
//! whenever topology changes, never patched incrementally.
//!
//! `System` owns the live slime collection, the falling food items, the
//! surface bounds, and the event buffer drained by the presentation layer.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::Rng;
use std::f64::consts::TAU;

use crate::simulation::geometry::{self, Rect};

pub type NVec2 = Vector2<f64>;

/// One Verlet mass point. Velocity is implicit: `x - px` is the
/// displacement over the last sub-step.
#[derive(Debug, Clone, Copy)]
pub struct Point {
    pub x: NVec2, // position
    pub px: NVec2, // previous position
    pub base_mass: f64, // mass at scale 1.0
    pub mass: f64, // base_mass * slime scale
    pub fixed: bool, // fixed points never integrate
    pub is_center: bool, // exactly one per slime, stored last
    pub healing: bool, // set on points born from a split
    pub heal_progress: f64, // per-point regrowth in [0, 1]
    pub id: u64,
}

impl Point {
    /// A point at rest: previous position equals position.
    pub fn at(pos: NVec2, base_mass: f64, scale: f64, id: u64) -> Self {
        Point {
            x: pos,
            px: pos,
            base_mass,
            mass: base_mass * scale,
            fixed: false,
            is_center: false,
            healing: false,
            heal_progress: 0.0,
            id,
        }
    }

    /// Implicit velocity over the last sub-step.
    pub fn velocity(&self) -> NVec2 {
        self.x - self.px
    }
}

/// A length constraint between two points of the same slime, relaxed
/// iteratively. `length` is always `base_length * scale`, with a small
/// pulse layered on top while the slime is healing.
#[derive(Debug, Clone, Copy)]
pub struct Spring {
    pub a: usize, // first point index
    pub b: usize, // second point index
    pub base_length: f64, // rest length at scale 1.0
    pub length: f64, // current rest length
    pub stiffness: f64, // relaxation step fraction in (0, 1)
}

/// One soft-body slime: point ring + springs + identity.
#[derive(Debug, Clone)]
pub struct Slime {
    pub points: Vec<Point>, // outer ring then the single center point
    pub springs: Vec<Spring>, // ring edges + cross braces + spokes
    pub scale: f64, // uniform length/mass multiplier
    pub base_radius: f64, // ring radius at scale 1.0
    pub color: [f32; 3],
    pub glow: [f32; 3],
    pub healing: bool, // true between a split and settling
    pub healing_progress: f64, // 0..1, clamped at exactly 1.0 on settle
    pub healing_direction: f64, // angle away from the cut, cosmetic
    pub pulse_time: f64, // breathing phase while healing
    pub id: u64,
}

impl Slime {
    /// Fresh slime: an evenly spaced circular ring around `center`.
    /// Outer masses and spring stiffness are jittered through `rng`.
    #[allow(clippy::too_many_arguments)]
    pub fn circular(
        center: NVec2,
        num_outer: usize,
        scale: f64,
        base_radius: f64,
        color: [f32; 3],
        glow: [f32; 3],
        rng: &mut StdRng,
        ids: &mut IdSource,
    ) -> Self {
        let radius = base_radius * scale;
        let mut points = Vec::with_capacity(num_outer + 1);
        for i in 0..num_outer {
            let angle = i as f64 / num_outer as f64 * TAU;
            let pos = center + NVec2::new(angle.cos(), angle.sin()) * radius;
            let base_mass = 1.0 + rng.gen::<f64>() * 0.5;
            points.push(Point::at(pos, base_mass, scale, ids.next_id()));
        }

        let mut center_point = Point::at(center, 2.0, scale, ids.next_id());
        center_point.is_center = true;
        points.push(center_point);

        let mut slime = Slime {
            points,
            springs: Vec::new(),
            scale,
            base_radius,
            color,
            glow,
            healing: false,
            healing_progress: 0.0,
            healing_direction: 0.0,
            pulse_time: 0.0,
            id: ids.next_id(),
        };
        slime.rebuild_springs(rng);
        slime
    }

    /// Slime rebuilt from a split: `ring` already carries the inferred
    /// velocities and healing flags of a fresh offspring ring. A new
    /// center point is created at `center` and the slime starts healing.
    #[allow(clippy::too_many_arguments)]
    pub fn from_split(
        mut ring: Vec<Point>,
        center: NVec2,
        scale: f64,
        base_radius: f64,
        color: [f32; 3],
        glow: [f32; 3],
        healing_direction: f64,
        rng: &mut StdRng,
        ids: &mut IdSource,
    ) -> Self {
        for p in &mut ring {
            p.mass = p.base_mass * scale;
        }

        let mut center_point = Point::at(center, 2.0, scale, ids.next_id());
        center_point.is_center = true;
        ring.push(center_point);

        let mut slime = Slime {
            points: ring,
            springs: Vec::new(),
            scale,
            base_radius,
            color,
            glow,
            healing: true,
            healing_progress: 0.0,
            healing_direction,
            pulse_time: 0.0,
            id: ids.next_id(),
        };
        slime.rebuild_springs(rng);
        slime
    }

    /// Outer ring size, excluding the trailing center point.
    pub fn outer_count(&self) -> usize {
        match self.points.last() {
            Some(p) if p.is_center => self.points.len() - 1,
            _ => self.points.len(),
        }
    }

    /// Current center position. Falls back to the last point if the
    /// center flag is missing, and to the origin for an empty slime.
    pub fn center(&self) -> NVec2 {
        self.points
            .iter()
            .rev()
            .find(|p| p.is_center)
            .or_else(|| self.points.last())
            .map(|p| p.x)
            .unwrap_or_else(NVec2::zeros)
    }

    /// Bounding box over the outer ring only.
    pub fn bounding_box(&self) -> Rect {
        geometry::bounding_box(&self.points[..self.outer_count()])
    }

    /// Rebuild the full spring set from the current outer point count:
    /// ring edges between neighbors, cross braces between non-adjacent
    /// outer pairs, and a spoke from every outer point to the center.
    pub fn rebuild_springs(&mut self, rng: &mut StdRng) {
        self.springs.clear();
        let n = self.outer_count();
        if n == 0 {
            return;
        }
        let center = n; // center point index, always last

        // Ring edges. Base length is stored relative to the current
        // scale so later growth rescales cleanly.
        for i in 0..n {
            let j = (i + 1) % n;
            let dist = geometry::distance(self.points[i].x, self.points[j].x);
            self.springs.push(Spring {
                a: i,
                b: j,
                base_length: dist / self.scale,
                length: dist,
                stiffness: 0.1 + rng.gen::<f64>() * 0.05,
            });
        }

        // Soft cross braces between non-adjacent outer pairs keep the
        // ring from folding over on itself.
        for i in 0..n {
            for j in (i + 2)..n {
                if j - i < n - 1 {
                    let dist = geometry::distance(self.points[i].x, self.points[j].x);
                    self.springs.push(Spring {
                        a: i,
                        b: j,
                        base_length: dist / self.scale,
                        length: dist,
                        stiffness: 0.005 + rng.gen::<f64>() * 0.005,
                    });
                }
            }
        }

        // Radial spokes, rest length pinned to the base radius.
        for i in 0..n {
            self.springs.push(Spring {
                a: center,
                b: i,
                base_length: self.base_radius,
                length: self.base_radius * self.scale,
                stiffness: 0.03,
            });
        }
    }

    /// Instantaneous growth after a feed: every spring rest length and
    /// every point mass is rescaled exactly.
    pub fn grow(&mut self, factor: f64) {
        self.scale *= factor;
        for spring in &mut self.springs {
            spring.length = spring.base_length * self.scale;
        }
        for point in &mut self.points {
            point.mass = point.base_mass * self.scale;
        }
    }
}

/// A falling food item. Same implicit-velocity representation as the
/// slime points.
#[derive(Debug, Clone, Copy)]
pub struct Food {
    pub x: NVec2, // position
    pub px: NVec2, // previous position
    pub radius: f64,
}

/// The live simulation state.
#[derive(Debug, Clone)]
pub struct System {
    pub slimes: Vec<Slime>, // unordered, membership changes on split
    pub food: Vec<Food>,
    pub bounds: NVec2, // surface size (width, height)
    pub t: f64, // elapsed sub-steps
    pub events: Vec<SimEvent>, // drained by the presentation layer
}

/// The point currently grabbed by the pointer, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragTarget {
    pub slime_id: u64,
    pub point_index: usize,
}

/// Per-tick snapshot of pointer state, written by the input collaborator
/// before the physics pass and read-only during it.
#[derive(Debug, Clone, Copy)]
pub struct InputSnapshot {
    pub pointer: NVec2, // cursor in surface coordinates
    pub pressed: bool,
    pub drag: Option<DragTarget>,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        InputSnapshot {
            pointer: NVec2::zeros(),
            pressed: false,
            drag: None,
        }
    }
}

/// Monotonic id source for slimes and points. A plain counter keeps
/// split and regrowth behavior reproducible under a fixed seed.
#[derive(Debug, Clone)]
pub struct IdSource {
    next: u64,
}

impl IdSource {
    pub fn new() -> Self {
        IdSource { next: 1 }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Cosmetic trigger points handed to the particle/audio collaborators.
/// Position and color only; no physics state crosses this boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    Fed { pos: NVec2, color: [f32; 3] },
    Split { pos: NVec2, color: [f32; 3] },
    Healed { pos: NVec2, color: [f32; 3] },
}
