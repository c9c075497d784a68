//! Fixed-step soft-body solver.
//!
//! One pass per slime, in a fixed phase order: grounding check, drag
//! coupling, Verlet integration, boundary clamping, and Jakobsen-style
//! constraint relaxation, with the healing sub-phase last. The front end
//! runs `step_system` `params.sub_steps` times per rendered frame; the
//! sub-stepping is for stability, not a variable timestep.

use crate::simulation::food;
use crate::simulation::healing::update_healing;
use crate::simulation::params::Parameters;
use crate::simulation::states::{DragTarget, InputSnapshot, NVec2, SimEvent, Slime, System};

/// Advance one slime by one sub-step. Returns the center position before
/// the step so the caller can derive velocity-driven cosmetic effects.
pub fn step_slime(
    slime: &mut Slime,
    input: &InputSnapshot,
    params: &Parameters,
    bounds: NVec2,
    events: &mut Vec<SimEvent>,
) -> NVec2 {
    let prev_center = slime.center();

    let margin = (slime.base_radius * slime.scale * 0.1).max(10.0);
    let n = slime.outer_count();

    // Grounding check: a body already resting on the floor gets boosted
    // gravity so it settles instead of jittering indefinitely.
    let mut lowest_y = f64::NEG_INFINITY;
    for p in &slime.points[..n] {
        lowest_y = lowest_y.max(p.x.y);
    }
    let grounded = n > 0 && lowest_y >= bounds.y - margin - 1.0;
    let dragged = matches!(input.drag, Some(d) if d.slime_id == slime.id);
    let gravity = if grounded && !dragged {
        params.base_gravity * params.grounded_gravity_mult
    } else {
        params.base_gravity
    };

    // Drag coupling: pull the grabbed point toward the pointer and rewrite
    // its previous position so the implied velocity matches the pull,
    // otherwise the point's own inertia fights the drag.
    if let Some(DragTarget {
        slime_id,
        point_index,
    }) = input.drag
    {
        if slime_id == slime.id {
            if let Some(point) = slime.points.get_mut(point_index) {
                let pull = (input.pointer - point.x) * params.drag_strength;
                point.x += pull;
                point.px = point.x - pull;
            }
        }
    }

    // Verlet integration: velocity is implicit in the position history.
    // Friction damps it, gravity biases it, and the boundary clamp
    // rewrites history for a damped bounce instead of a hard stop.
    for point in slime.points.iter_mut() {
        if point.fixed {
            continue;
        }
        let pos = point.x;
        let mut v = (point.x - point.px) * params.friction;
        v.y += gravity;
        point.x += v;
        point.px = pos;

        // The center point is allowed closer to the edges than the ring.
        let m = if point.is_center { margin * 0.5 } else { margin };
        if point.x.y > bounds.y - m {
            point.x.y = bounds.y - m;
            point.px.y = point.x.y + v.y * params.ground_friction;
        }
        if point.x.y < m {
            point.x.y = m;
            point.px.y = point.x.y + v.y * params.ground_friction;
        }
        if point.x.x < m {
            point.x.x = m;
            point.px.x = point.x.x + v.x * params.ground_friction;
        } else if point.x.x > bounds.x - m {
            point.x.x = bounds.x - m;
            point.px.x = point.x.x + v.x * params.ground_friction;
        }
    }

    // Constraint relaxation: move each spring's endpoints a stiffness
    // fraction toward the rest length, split evenly unless one end is
    // fixed. Fixed iteration count.
    for _ in 0..params.constraint_iterations {
        for si in 0..slime.springs.len() {
            let spring = slime.springs[si];
            // Stale indices are legal at tick boundaries; skip them.
            if spring.a >= slime.points.len() || spring.b >= slime.points.len() {
                continue;
            }
            let d = slime.points[spring.b].x - slime.points[spring.a].x;
            let dist = d.norm();
            if dist == 0.0 {
                continue; // degenerate spring, skip this sweep
            }
            let difference = (spring.length - dist) / dist;

            let fixed_a = slime.points[spring.a].fixed;
            let fixed_b = slime.points[spring.b].fixed;
            let mut scalar_a = 0.5;
            let mut scalar_b = 0.5;
            if fixed_a {
                scalar_a = 0.0;
                scalar_b = 1.0;
            }
            if fixed_b {
                scalar_b = 0.0;
                scalar_a = 1.0;
            }
            if fixed_a && fixed_b {
                scalar_a = 0.0;
                scalar_b = 0.0;
            }

            let shift = d * (difference * spring.stiffness);
            if !fixed_a {
                let p = &mut slime.points[spring.a];
                p.x -= shift * scalar_a;
            }
            if !fixed_b {
                let p = &mut slime.points[spring.b];
                p.x += shift * scalar_b;
            }
        }
    }

    if slime.healing {
        update_healing(slime, params, events);
    }

    prev_center
}

/// One physics pass over every slime plus the food items. All slimes see
/// the same input snapshot; splits are never applied mid-pass.
pub fn step_system(sys: &mut System, input: &InputSnapshot, params: &Parameters) {
    let bounds = sys.bounds;
    let System {
        slimes,
        food,
        events,
        ..
    } = sys;

    for slime in slimes.iter_mut() {
        step_slime(slime, input, params, bounds, events);
    }

    food::update_food(slimes, food, bounds, params, events);

    sys.t += 1.0;
}

/// Nearest grabbable point across all slimes. Global nearest wins,
/// within a pick radius that grows with each slime's scale.
pub fn find_drag_point(sys: &System, pointer: NVec2, params: &Parameters) -> Option<DragTarget> {
    let mut best: Option<(f64, DragTarget)> = None;
    for slime in &sys.slimes {
        let pick_radius = params.drag_radius * slime.scale;
        for (i, point) in slime.points.iter().enumerate() {
            let dist = (point.x - pointer).norm();
            if dist < pick_radius && best.map_or(true, |(d, _)| dist < d) {
                best = Some((
                    dist,
                    DragTarget {
                        slime_id: slime.id,
                        point_index: i,
                    },
                ));
            }
        }
    }
    best.map(|(_, target)| target)
}

/// Rescale every stored position after a surface-size change. Degenerate
/// old bounds (first layout) fall back to recentering on the new surface.
pub fn resize_system(sys: &mut System, new_bounds: NVec2) {
    let old = sys.bounds;
    let sx = new_bounds.x / old.x;
    let sy = new_bounds.y / old.y;

    if sx.is_finite() && sy.is_finite() && old.x > 0.0 && old.y > 0.0 {
        for slime in &mut sys.slimes {
            for p in &mut slime.points {
                p.x = NVec2::new(p.x.x * sx, p.x.y * sy);
                p.px = NVec2::new(p.px.x * sx, p.px.y * sy);
            }
        }
        for f in &mut sys.food {
            f.x = NVec2::new(f.x.x * sx, f.x.y * sy);
            f.px = NVec2::new(f.px.x * sx, f.px.y * sy);
        }
    } else {
        for slime in &mut sys.slimes {
            if slime.points.is_empty() {
                continue;
            }
            let shift = new_bounds * 0.5 - slime.center();
            for p in &mut slime.points {
                p.x += shift;
                p.px += shift;
            }
        }
        for f in &mut sys.food {
            f.x = new_bounds * 0.5;
            f.px = f.x;
        }
    }

    sys.bounds = new_bounds;
}
