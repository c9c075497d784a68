use rand::rngs::StdRng;
use rand::SeedableRng;

use slimesim::simulation::geometry::{
    bounding_box, centroid, distance, mean_radius, segment_intersects_rect, Rect,
};
use slimesim::{
    apply_slice, find_drag_point, resize_system, slice_system, step_slime, step_system,
    update_food, update_healing, DragTarget, Food, IdSource, InputSnapshot, NVec2, Parameters,
    SimEvent, Slime, Spring, System,
};

const COLOR: [f32; 3] = [0.0, 1.0, 0.67];
const GLOW: [f32; 3] = [0.0, 1.0, 0.6];
const BOUNDS: (f64, f64) = (1280.0, 720.0);

/// Default physics parameters for tests
fn test_params() -> Parameters {
    Parameters::default()
}

/// Fresh rng + id source with a fixed seed
fn seeded(seed: u64) -> (StdRng, IdSource) {
    (StdRng::seed_from_u64(seed), IdSource::new())
}

/// Build a circular test slime at scale 1.0 with an 80 unit base radius
fn test_slime(center: NVec2, outer: usize, rng: &mut StdRng, ids: &mut IdSource) -> Slime {
    Slime::circular(center, outer, 1.0, 80.0, COLOR, GLOW, rng, ids)
}

/// Wrap slimes into a System over the default test surface
fn test_system(slimes: Vec<Slime>) -> System {
    System {
        slimes,
        food: Vec::new(),
        bounds: NVec2::new(BOUNDS.0, BOUNDS.1),
        t: 0.0,
        events: Vec::new(),
    }
}

// ==================================================================================
// Geometry tests
// ==================================================================================

#[test]
fn distance_is_euclidean() {
    let d = distance(NVec2::new(1.0, 2.0), NVec2::new(4.0, 6.0));
    assert!((d - 5.0).abs() < 1e-12, "expected 5.0, got {}", d);
}

#[test]
fn bounding_box_excludes_center_and_handles_empty() {
    let (mut rng, mut ids) = seeded(1);
    let slime = test_slime(NVec2::new(200.0, 200.0), 12, &mut rng, &mut ids);
    let bbox = slime.bounding_box();

    // The ring has radius 80, so the box must span roughly that extent
    assert!((bbox.min_x - 120.0).abs() < 1.0, "min_x = {}", bbox.min_x);
    assert!((bbox.max_x - 280.0).abs() < 1.0, "max_x = {}", bbox.max_x);
    assert!(bbox.width() > 0.0 && bbox.height() > 0.0);

    let empty = bounding_box(&[]);
    assert_eq!(
        empty,
        Rect {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 0.0
        }
    );
}

#[test]
fn centroid_and_mean_radius_of_square() {
    let pts = [
        NVec2::new(0.0, 0.0),
        NVec2::new(2.0, 0.0),
        NVec2::new(2.0, 2.0),
        NVec2::new(0.0, 2.0),
    ];
    let c = centroid(&pts);
    assert!((c - NVec2::new(1.0, 1.0)).norm() < 1e-12);

    let r = mean_radius(&pts, c);
    assert!((r - 2.0f64.sqrt()).abs() < 1e-12, "r = {}", r);
}

#[test]
fn segment_rect_overlap_cases() {
    let rect = Rect {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 10.0,
        max_y: 10.0,
    };

    // Endpoint inside
    assert!(segment_intersects_rect(
        NVec2::new(5.0, 5.0),
        NVec2::new(50.0, 50.0),
        &rect
    ));
    // Pass-through crossing, both endpoints outside
    assert!(segment_intersects_rect(
        NVec2::new(-5.0, 5.0),
        NVec2::new(15.0, 5.0),
        &rect
    ));
    // Clear miss
    assert!(!segment_intersects_rect(
        NVec2::new(20.0, 20.0),
        NVec2::new(30.0, 20.0),
        &rect
    ));
    // Degenerate zero-length segment outside: parallel case, no crossing
    assert!(!segment_intersects_rect(
        NVec2::new(20.0, 20.0),
        NVec2::new(20.0, 20.0),
        &rect
    ));
}

// ==================================================================================
// Topology tests
// ==================================================================================

#[test]
fn spring_count_matches_formula() {
    // ring edges N + cross braces N(N-3)/2 + spokes N
    for n in [6usize, 9, 15] {
        let (mut rng, mut ids) = seeded(2);
        let slime = test_slime(NVec2::new(400.0, 300.0), n, &mut rng, &mut ids);
        let expected = n + n * (n - 3) / 2 + n;
        assert_eq!(
            slime.springs.len(),
            expected,
            "n = {}: expected {} springs, got {}",
            n,
            expected,
            slime.springs.len()
        );
    }
}

#[test]
fn exactly_one_center_stored_last() {
    let (mut rng, mut ids) = seeded(3);
    let slime = test_slime(NVec2::new(400.0, 300.0), 10, &mut rng, &mut ids);

    let centers = slime.points.iter().filter(|p| p.is_center).count();
    assert_eq!(centers, 1);
    assert!(slime.points.last().unwrap().is_center);
    assert_eq!(slime.outer_count(), 10);
}

#[test]
fn seeded_construction_is_deterministic() {
    let build = || {
        let (mut rng, mut ids) = seeded(99);
        test_slime(NVec2::new(400.0, 300.0), 15, &mut rng, &mut ids)
    };
    let a = build();
    let b = build();

    for (pa, pb) in a.points.iter().zip(b.points.iter()) {
        assert_eq!(pa.base_mass, pb.base_mass);
        assert_eq!(pa.id, pb.id);
    }
    for (sa, sb) in a.springs.iter().zip(b.springs.iter()) {
        assert_eq!(sa.stiffness, sb.stiffness);
    }
}

// ==================================================================================
// Growth tests
// ==================================================================================

#[test]
fn grow_rescales_lengths_and_masses_exactly() {
    let (mut rng, mut ids) = seeded(4);
    let mut slime = test_slime(NVec2::new(400.0, 300.0), 12, &mut rng, &mut ids);
    let params = test_params();

    slime.grow(params.growth_factor);

    assert_eq!(slime.scale, 1.05);
    for spring in &slime.springs {
        assert_eq!(spring.length, spring.base_length * slime.scale);
    }
    for point in &slime.points {
        assert_eq!(point.mass, point.base_mass * slime.scale);
    }
}

#[test]
fn feeding_ten_times_compounds_scale() {
    let (mut rng, mut ids) = seeded(5);
    let mut slime = test_slime(NVec2::new(400.0, 300.0), 12, &mut rng, &mut ids);
    let params = test_params();

    let mut expected = 1.0f64;
    for _ in 0..10 {
        slime.grow(params.growth_factor);
        expected *= params.growth_factor;
    }

    assert_eq!(slime.scale, expected);
    assert!((slime.scale - 1.6289).abs() < 1e-3, "scale = {}", slime.scale);
}

// ==================================================================================
// Solver tests
// ==================================================================================

#[test]
fn gravity_pulls_points_down() {
    let (mut rng, mut ids) = seeded(6);
    let mut slime = test_slime(NVec2::new(640.0, 300.0), 12, &mut rng, &mut ids);
    let params = test_params();
    let bounds = NVec2::new(BOUNDS.0, BOUNDS.1);
    let input = InputSnapshot::default();
    let mut events = Vec::new();

    let before: f64 = slime.points.iter().map(|p| p.x.y).sum();
    step_slime(&mut slime, &input, &params, bounds, &mut events);
    let after: f64 = slime.points.iter().map(|p| p.x.y).sum();

    assert!(after > before, "mean y did not increase: {} -> {}", before, after);
}

#[test]
fn boundary_clamp_is_exact() {
    let (mut rng, mut ids) = seeded(7);
    let mut slime = test_slime(NVec2::new(640.0, 300.0), 8, &mut rng, &mut ids);
    // Isolate the clamp phase: no springs, points thrown far outside
    slime.springs.clear();
    let way_out = [
        NVec2::new(-500.0, -500.0),
        NVec2::new(2000.0, 300.0),
        NVec2::new(640.0, 2000.0),
    ];
    for (i, pos) in way_out.iter().enumerate() {
        slime.points[i].x = *pos;
        slime.points[i].px = *pos;
    }

    let params = test_params();
    let bounds = NVec2::new(BOUNDS.0, BOUNDS.1);
    let input = InputSnapshot::default();
    let mut events = Vec::new();
    step_slime(&mut slime, &input, &params, bounds, &mut events);

    // margin = max(10, 80 * 1.0 * 0.1) = 10, half for the center point
    let margin = 10.0;
    let n = slime.outer_count();
    for p in &slime.points[..n] {
        assert!(p.x.x >= margin && p.x.x <= bounds.x - margin, "x = {}", p.x.x);
        assert!(p.x.y >= margin && p.x.y <= bounds.y - margin, "y = {}", p.x.y);
    }
    let center = slime.points.last().unwrap();
    assert!(center.x.y >= margin * 0.5 && center.x.y <= bounds.y - margin * 0.5);
}

#[test]
fn drag_pulls_point_toward_pointer() {
    let (mut rng, mut ids) = seeded(8);
    let mut slime = test_slime(NVec2::new(640.0, 300.0), 8, &mut rng, &mut ids);
    slime.springs.clear(); // isolate the drag coupling
    let params = test_params();
    let bounds = NVec2::new(BOUNDS.0, BOUNDS.1);

    let pointer = NVec2::new(900.0, 300.0);
    let input = InputSnapshot {
        pointer,
        pressed: true,
        drag: Some(DragTarget {
            slime_id: slime.id,
            point_index: 0,
        }),
    };
    let mut events = Vec::new();

    let before = (slime.points[0].x - pointer).norm();
    step_slime(&mut slime, &input, &params, bounds, &mut events);
    let after = (slime.points[0].x - pointer).norm();

    // Drag applies the pull directly and again through the implied velocity
    assert!(after < before - 40.0, "drag too weak: {} -> {}", before, after);
}

#[test]
fn relaxation_recovers_rest_lengths() {
    let (mut rng, mut ids) = seeded(9);
    let mut slime = test_slime(NVec2::new(640.0, 360.0), 10, &mut rng, &mut ids);
    let mut params = test_params();
    params.base_gravity = 0.0; // isolate the constraint solver

    // Stretch the whole ring radially away from the center
    let center = slime.center();
    let n = slime.outer_count();
    for p in &mut slime.points[..n] {
        let stretched = center + (p.x - center) * 1.5;
        p.x = stretched;
        p.px = stretched;
    }

    let spring_error = |s: &Slime| -> f64 {
        s.springs
            .iter()
            .map(|sp: &Spring| {
                let d = (s.points[sp.b].x - s.points[sp.a].x).norm();
                (d - sp.length).abs()
            })
            .sum()
    };

    let bounds = NVec2::new(BOUNDS.0, BOUNDS.1);
    let input = InputSnapshot::default();
    let mut events = Vec::new();

    let before = spring_error(&slime);
    for _ in 0..50 {
        step_slime(&mut slime, &input, &params, bounds, &mut events);
    }
    let after = spring_error(&slime);

    assert!(
        after < before * 0.5,
        "constraint error did not shrink: {} -> {}",
        before,
        after
    );
}

#[test]
fn degenerate_spring_and_stale_index_are_skipped() {
    let (mut rng, mut ids) = seeded(10);
    let mut slime = test_slime(NVec2::new(640.0, 300.0), 8, &mut rng, &mut ids);

    // Coincident endpoints make a zero-length spring
    slime.points[1].x = slime.points[0].x;
    slime.points[1].px = slime.points[0].px;
    // A stale reference past the end of the point list
    slime.springs.push(Spring {
        a: 99,
        b: 0,
        base_length: 10.0,
        length: 10.0,
        stiffness: 0.1,
    });

    let params = test_params();
    let bounds = NVec2::new(BOUNDS.0, BOUNDS.1);
    let input = InputSnapshot::default();
    let mut events = Vec::new();
    step_slime(&mut slime, &input, &params, bounds, &mut events);

    for p in &slime.points {
        assert!(p.x.x.is_finite() && p.x.y.is_finite(), "non-finite point");
    }
}

#[test]
fn find_drag_point_respects_scaled_radius() {
    let (mut rng, mut ids) = seeded(11);
    let slime = test_slime(NVec2::new(640.0, 300.0), 15, &mut rng, &mut ids);
    let sys = test_system(vec![slime]);
    let params = test_params();

    // Point 0 sits at (720, 300); 49 units away is within the 50 radius
    let hit = find_drag_point(&sys, NVec2::new(769.0, 300.0), &params);
    assert_eq!(
        hit,
        Some(DragTarget {
            slime_id: sys.slimes[0].id,
            point_index: 0
        })
    );

    // 51 units away from every point is a miss
    let miss = find_drag_point(&sys, NVec2::new(771.0, 300.0), &params);
    assert_eq!(miss, None);
}

// ==================================================================================
// Resize tests
// ==================================================================================

#[test]
fn resize_rescales_positions_by_ratio() {
    let (mut rng, mut ids) = seeded(12);
    let slime = test_slime(NVec2::new(640.0, 360.0), 8, &mut rng, &mut ids);
    let mut sys = test_system(vec![slime]);

    let before = sys.slimes[0].points[0].x;
    resize_system(&mut sys, NVec2::new(BOUNDS.0 * 2.0, BOUNDS.1 * 2.0));
    let after = sys.slimes[0].points[0].x;

    assert!((after - before * 2.0).norm() < 1e-9);
    assert_eq!(sys.bounds, NVec2::new(BOUNDS.0 * 2.0, BOUNDS.1 * 2.0));
}

#[test]
fn resize_from_degenerate_bounds_recenters() {
    let (mut rng, mut ids) = seeded(13);
    let slime = test_slime(NVec2::new(640.0, 360.0), 8, &mut rng, &mut ids);
    let mut sys = test_system(vec![slime]);
    sys.bounds = NVec2::zeros(); // first-layout case

    resize_system(&mut sys, NVec2::new(800.0, 600.0));

    let center = sys.slimes[0].center();
    assert!((center - NVec2::new(400.0, 300.0)).norm() < 1e-9);
}

// ==================================================================================
// Split tests
// ==================================================================================

#[test]
fn short_gesture_is_a_noop() {
    let (mut rng, mut ids) = seeded(14);
    let slime = test_slime(NVec2::new(640.0, 300.0), 15, &mut rng, &mut ids);
    let mut sys = test_system(vec![slime]);
    let params = test_params();

    let outcome = slice_system(
        &mut sys,
        NVec2::new(640.0, 295.0),
        NVec2::new(640.0, 304.0),
        &params,
        &mut rng,
        &mut ids,
    );

    assert!(outcome.is_noop());
    assert_eq!(sys.slimes.len(), 1);
}

#[test]
fn missed_cut_leaves_slime_unmodified() {
    let (mut rng, mut ids) = seeded(15);
    let slime = test_slime(NVec2::new(640.0, 300.0), 15, &mut rng, &mut ids);
    let snapshot = slime.clone();
    let mut sys = test_system(vec![slime]);
    let params = test_params();

    // A long cut nowhere near the slime's bounding box
    let outcome = slice_system(
        &mut sys,
        NVec2::new(0.0, 700.0),
        NVec2::new(1280.0, 700.0),
        &params,
        &mut rng,
        &mut ids,
    );

    assert!(outcome.is_noop());
    let slime = &sys.slimes[0];
    assert_eq!(slime.points.len(), snapshot.points.len());
    for (a, b) in slime.points.iter().zip(snapshot.points.iter()) {
        assert_eq!(a.x, b.x);
        assert_eq!(a.id, b.id);
    }
    assert_eq!(slime.springs.len(), snapshot.springs.len());
}

#[test]
fn undersized_slime_is_skipped() {
    let (mut rng, mut ids) = seeded(16);
    // 5 outer points is below the 2 * 3 minimum
    let slime = test_slime(NVec2::new(640.0, 300.0), 5, &mut rng, &mut ids);
    let mut sys = test_system(vec![slime]);
    let params = test_params();

    let outcome = slice_system(
        &mut sys,
        NVec2::new(640.0, 100.0),
        NVec2::new(640.0, 500.0),
        &params,
        &mut rng,
        &mut ids,
    );

    assert!(outcome.is_noop());
}

#[test]
fn vertical_cut_splits_15_point_slime() {
    let (mut rng, mut ids) = seeded(17);
    let slime = test_slime(NVec2::new(640.0, 300.0), 15, &mut rng, &mut ids);
    let original_id = slime.id;
    let original_scale = slime.scale;
    let mut sys = test_system(vec![slime]);
    let params = test_params();

    let outcome = slice_system(
        &mut sys,
        NVec2::new(640.0, 100.0),
        NVec2::new(640.0, 500.0),
        &params,
        &mut rng,
        &mut ids,
    );

    assert_eq!(outcome.remove, vec![0]);
    assert_eq!(outcome.spawn.len(), 2);

    // A vertical cut through the centroid of a 15-ring gives 7/8 groups
    let mut counts: Vec<usize> = outcome.spawn.iter().map(|s| s.outer_count()).collect();
    counts.sort_unstable();
    assert_eq!(counts, vec![7, 8]);

    for child in &outcome.spawn {
        assert!(child.healing);
        assert_eq!(child.healing_progress, 0.0);
        assert!(child.outer_count() >= params.min_split_points * 2);
        assert!(child.points.last().unwrap().is_center);
        for p in &child.points[..child.outer_count()] {
            assert!(p.healing);
            assert_eq!(p.heal_progress, 0.0);
        }
        // scale * sqrt(count / 15), area roughly conserved by point ratio
        let expected = original_scale * (child.outer_count() as f64 / 15.0).sqrt();
        assert!((child.scale - expected).abs() < 1e-12);
        assert_eq!(child.color, COLOR);
    }

    // The two halves heal in opposite directions
    let d0 = outcome.spawn[0].healing_direction;
    let d1 = outcome.spawn[1].healing_direction;
    assert!(((d0 - d1).abs() - std::f64::consts::PI).abs() < 1e-12);

    // Split event was emitted for the parent
    assert!(sys
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::Split { .. })));

    // Atomic replace: parent gone, both children live
    apply_slice(&mut sys, outcome);
    assert_eq!(sys.slimes.len(), 2);
    assert!(sys.slimes.iter().all(|s| s.id != original_id));
}

#[test]
fn small_groups_are_padded_to_minimum_ring() {
    let (mut rng, mut ids) = seeded(18);
    // 6 outer points cut down the middle: groups of 3 and 3
    let slime = test_slime(NVec2::new(640.0, 300.0), 6, &mut rng, &mut ids);
    let mut sys = test_system(vec![slime]);
    let params = test_params();

    let outcome = slice_system(
        &mut sys,
        NVec2::new(640.0, 100.0),
        NVec2::new(640.0, 500.0),
        &params,
        &mut rng,
        &mut ids,
    );

    assert_eq!(outcome.spawn.len(), 2);
    for child in &outcome.spawn {
        // max(3, 2 * min_split_points) = 6
        assert_eq!(child.outer_count(), 6);
    }
}

// ==================================================================================
// Healing tests
// ==================================================================================

/// Put a fresh slime into the healing state by hand
fn healing_slime(rng: &mut StdRng, ids: &mut IdSource) -> Slime {
    let mut slime = test_slime(NVec2::new(640.0, 300.0), 10, rng, ids);
    slime.healing = true;
    slime.healing_progress = 0.0;
    let n = slime.outer_count();
    for p in &mut slime.points[..n] {
        p.healing = true;
        p.heal_progress = 0.0;
    }
    slime
}

#[test]
fn healing_settles_in_34_ticks_and_never_overshoots() {
    let (mut rng, mut ids) = seeded(19);
    let mut slime = healing_slime(&mut rng, &mut ids);
    let params = test_params();
    let mut events = Vec::new();

    for tick in 1..=33 {
        update_healing(&mut slime, &params, &mut events);
        assert!(slime.healing, "settled early at tick {}", tick);
        assert!(slime.healing_progress < 1.0);
    }

    update_healing(&mut slime, &params, &mut events);
    assert!(!slime.healing);
    assert_eq!(slime.healing_progress, 1.0);
    assert!(slime.points.iter().all(|p| !p.healing));
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, SimEvent::Healed { .. }))
            .count(),
        1
    );

    // Terminal: further ticks change nothing
    update_healing(&mut slime, &params, &mut events);
    assert_eq!(slime.healing_progress, 1.0);
}

#[test]
fn healing_pulse_stays_within_3_percent() {
    let (mut rng, mut ids) = seeded(20);
    let mut slime = healing_slime(&mut rng, &mut ids);
    let params = test_params();
    let mut events = Vec::new();

    for _ in 0..10 {
        update_healing(&mut slime, &params, &mut events);
        if !slime.healing {
            break;
        }
        for spring in &slime.springs {
            let rest = spring.base_length * slime.scale;
            assert!(
                (spring.length - rest).abs() <= rest * 0.03 + 1e-12,
                "pulse out of range: {} vs {}",
                spring.length,
                rest
            );
        }
    }
}

// ==================================================================================
// Food tests
// ==================================================================================

#[test]
fn food_falls_and_is_culled_off_screen() {
    let mut sys = test_system(Vec::new());
    let params = test_params();
    let pos = NVec2::new(300.0, 100.0);
    sys.food.push(Food {
        x: pos,
        px: pos,
        radius: params.food_radius,
    });

    let System {
        slimes,
        food,
        events,
        bounds,
        ..
    } = &mut sys;
    update_food(slimes, food, *bounds, &params, events);
    assert_eq!(sys.food.len(), 1);
    assert!(sys.food[0].x.y > 100.0, "food did not fall");

    // Below the floor it disappears
    sys.food[0].x = NVec2::new(300.0, 760.0);
    sys.food[0].px = sys.food[0].x;
    let System {
        slimes,
        food,
        events,
        bounds,
        ..
    } = &mut sys;
    update_food(slimes, food, *bounds, &params, events);
    assert!(sys.food.is_empty());
}

#[test]
fn eaten_food_grows_the_slime() {
    let (mut rng, mut ids) = seeded(21);
    let slime = test_slime(NVec2::new(640.0, 300.0), 12, &mut rng, &mut ids);
    let mut sys = test_system(vec![slime]);
    let params = test_params();

    // Right on top of outer point 0 at (720, 300)
    let pos = NVec2::new(720.0, 300.0);
    sys.food.push(Food {
        x: pos,
        px: pos,
        radius: params.food_radius,
    });

    let System {
        slimes,
        food,
        events,
        bounds,
        ..
    } = &mut sys;
    update_food(slimes, food, *bounds, &params, events);

    assert!(sys.food.is_empty(), "food was not eaten");
    assert_eq!(sys.slimes[0].scale, 1.05);
    assert!(sys.events.iter().any(|e| matches!(e, SimEvent::Fed { .. })));
}

// ==================================================================================
// System step tests
// ==================================================================================

#[test]
fn step_system_advances_time_and_stays_finite() {
    let (mut rng, mut ids) = seeded(22);
    let a = test_slime(NVec2::new(400.0, 300.0), 12, &mut rng, &mut ids);
    let b = test_slime(NVec2::new(900.0, 300.0), 9, &mut rng, &mut ids);
    let mut sys = test_system(vec![a, b]);
    let params = test_params();
    let input = InputSnapshot::default();

    for _ in 0..(params.sub_steps * 60) {
        step_system(&mut sys, &input, &params);
    }

    assert_eq!(sys.t, (params.sub_steps * 60) as f64);
    for slime in &sys.slimes {
        for p in &slime.points {
            assert!(p.x.x.is_finite() && p.x.y.is_finite());
        }
    }
}
