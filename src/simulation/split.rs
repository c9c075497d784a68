//! Slice engine: partition one slime into two healing offspring.
//!
//! Outer points are classified against the cut line by the sign of a
//! cross product, each accepted group is rebuilt as a fresh circular
//! ring around its centroid, and the result is handed back as an atomic
//! remove/spawn outcome for the manager to apply between ticks.

use rand::rngs::StdRng;
use rand::Rng;
use std::f64::consts::{PI, TAU};

use crate::simulation::geometry;
use crate::simulation::params::Parameters;
use crate::simulation::states::{IdSource, NVec2, Point, SimEvent, Slime, System};

/// Result of a slice gesture: slime indices to drop and replacements to
/// append. Applied in one shot so a partial split is never observable.
#[derive(Debug, Default)]
pub struct SliceOutcome {
    pub remove: Vec<usize>,
    pub spawn: Vec<Slime>,
}

impl SliceOutcome {
    pub fn is_noop(&self) -> bool {
        self.remove.is_empty() && self.spawn.is_empty()
    }
}

/// Evaluate a finished slice gesture against every slime. Gestures
/// shorter than the minimum length are a no-op, and slimes that are too
/// small or cut near-tangentially are silently skipped.
pub fn slice_system(
    sys: &mut System,
    cut_start: NVec2,
    cut_end: NVec2,
    params: &Parameters,
    rng: &mut StdRng,
    ids: &mut IdSource,
) -> SliceOutcome {
    let mut outcome = SliceOutcome::default();
    if geometry::distance(cut_start, cut_end) <= params.min_slice_length {
        return outcome;
    }

    let cut = cut_end - cut_start;
    let cut_angle = cut.y.atan2(cut.x);

    let System { slimes, events, .. } = sys;
    for (index, slime) in slimes.iter().enumerate() {
        // Broad phase: the cut must touch the outer-point bounding box.
        let bbox = slime.bounding_box();
        if !geometry::segment_intersects_rect(cut_start, cut_end, &bbox) {
            continue;
        }

        let n_outer = slime.outer_count();
        if n_outer < params.min_split_points * 2 {
            continue;
        }

        // Half-plane classification by the sign of the cross product.
        // Points are grouped; the boundary geometry itself is not clipped.
        let mut group_a: Vec<NVec2> = Vec::new();
        let mut group_b: Vec<NVec2> = Vec::new();
        for point in &slime.points[..n_outer] {
            let rel = point.x - cut_start;
            let side = rel.x * cut.y - rel.y * cut.x;
            if side >= 0.0 {
                group_a.push(point.x);
            } else {
                group_b.push(point.x);
            }
        }

        // An unbalanced or near-tangent cut leaves the slime intact.
        if group_a.len() < params.min_split_points || group_b.len() < params.min_split_points {
            continue;
        }

        // Record parent velocities for organic residual motion in the
        // offspring, then mark the parent for removal.
        let velocities: Vec<NVec2> = slime.points[..n_outer]
            .iter()
            .map(|p| p.velocity())
            .collect();
        let typical_base_mass = slime.points[0].base_mass;

        outcome.remove.push(index);
        events.push(SimEvent::Split {
            pos: slime.center(),
            color: slime.color,
        });

        // Each half heals outward, away from its sibling.
        let halves = [(group_a, cut_angle + PI), (group_b, cut_angle)];
        for (group, direction) in halves {
            let center = geometry::centroid(&group);
            let radius = geometry::mean_radius(&group, center);
            let count = group.len().max(params.min_split_points * 2);

            let ring = build_ring(count, center, radius, typical_base_mass, &velocities, rng, ids);

            // Area/mass is preserved proportionally to the point-count
            // ratio rather than split exactly.
            let scale = slime.scale * (count as f64 / n_outer as f64).sqrt();
            outcome.spawn.push(Slime::from_split(
                ring,
                center,
                scale,
                slime.base_radius,
                slime.color,
                slime.glow,
                direction,
                rng,
                ids,
            ));
        }
    }

    outcome
}

/// Apply a slice outcome as one atomic replace: remove every marked
/// index, then append all offspring.
pub fn apply_slice(sys: &mut System, outcome: SliceOutcome) {
    let mut remove = outcome.remove;
    remove.sort_unstable_by(|a, b| b.cmp(a)); // descending keeps indices valid
    for index in remove {
        if index < sys.slimes.len() {
            sys.slimes.remove(index);
        }
    }
    sys.slimes.extend(outcome.spawn);
}

/// Fresh evenly spaced ring for a split offspring. The jagged partition
/// outline is discarded in favor of a clean circle; each point samples a
/// damped velocity from the parent ring so the halves keep moving.
fn build_ring(
    count: usize,
    center: NVec2,
    radius: f64,
    base_mass: f64,
    velocities: &[NVec2],
    rng: &mut StdRng,
    ids: &mut IdSource,
) -> Vec<Point> {
    let mut ring = Vec::with_capacity(count);
    for i in 0..count {
        let angle = i as f64 / count as f64 * TAU;
        let pos = center + NVec2::new(angle.cos(), angle.sin()) * radius;
        let v = if velocities.is_empty() {
            NVec2::zeros()
        } else {
            velocities[rng.gen_range(0..velocities.len())] * 0.8
        };
        ring.push(Point {
            x: pos,
            px: pos - v, // inferred velocity via the previous position
            base_mass,
            mass: base_mass, // rescaled by the from_split constructor
            fixed: false,
            is_center: false,
            healing: true,
            heal_progress: 0.0,
            id: ids.next_id(),
        });
    }
    ring
}
