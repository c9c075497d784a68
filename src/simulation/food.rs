//! Falling food and the feed rule.
//!
//! Food drops with the same implicit-velocity scheme as the slime
//! points. The first outer point within reach eats an item, which grows
//! its slime instantly and notifies the cosmetic collaborators.

use rand::rngs::StdRng;
use rand::Rng;

use crate::simulation::params::Parameters;
use crate::simulation::states::{Food, NVec2, SimEvent, Slime, System};

/// Drop a new food item near the top edge at a random x.
pub fn spawn_food(sys: &mut System, params: &Parameters, rng: &mut StdRng) {
    let r = params.food_radius;
    let x = rng.gen::<f64>() * (sys.bounds.x - r * 4.0) + r * 2.0;
    let y = r * 2.0 + rng.gen::<f64>() * 50.0;
    let pos = NVec2::new(x, y);
    sys.food.push(Food {
        x: pos,
        px: pos,
        radius: r,
    });
}

/// One food pass: fall, cull off-screen items, and resolve eating.
/// Bounding-box broad phase first, then a per-outer-point reach test
/// scaled with the slime's size.
pub fn update_food(
    slimes: &mut [Slime],
    food: &mut Vec<Food>,
    bounds: NVec2,
    params: &Parameters,
    events: &mut Vec<SimEvent>,
) {
    let mut i = food.len();
    while i > 0 {
        i -= 1;

        {
            let item = &mut food[i];
            let mut vy = item.x.y - item.px.y;
            item.px = item.x;
            vy += params.food_gravity;
            item.x.y += vy;
        }

        if food[i].x.y - food[i].radius > bounds.y {
            food.remove(i);
            continue;
        }

        let pos = food[i].x;
        let radius = food[i].radius;
        let mut eaten = false;
        for slime in slimes.iter_mut() {
            let bbox = slime.bounding_box();
            if pos.x + radius < bbox.min_x
                || pos.x - radius > bbox.max_x
                || pos.y + radius < bbox.min_y
                || pos.y - radius > bbox.max_y
            {
                continue;
            }

            let n = slime.outer_count();
            let reach = radius + 10.0 * slime.scale;
            if slime.points[..n].iter().any(|p| (p.x - pos).norm() < reach) {
                slime.grow(params.growth_factor);
                events.push(SimEvent::Fed {
                    pos,
                    color: slime.color,
                });
                eaten = true;
                break;
            }
        }

        if eaten {
            food.remove(i);
        }
    }
}
