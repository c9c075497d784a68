//! Bevy 2D viewer and input front end.
//!
//! Thin dispatch layer around the core: it snapshots pointer state before
//! the physics pass, runs the fixed sub-steps, applies finished slice
//! gestures between ticks, and draws everything with gizmos. Drawing has
//! read-only access to physics state.
//!
//! Controls: left-drag grabs the nearest point, `S` toggles slice mode
//! (left-drag then cuts instead), `F` drops a food item.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::simulation::food::spawn_food;
use crate::simulation::scenario::Scenario;
use crate::simulation::solver::{find_drag_point, resize_system, step_system};
use crate::simulation::split::{apply_slice, slice_system};
use crate::simulation::states::{DragTarget, InputSnapshot, NVec2, SimEvent};

/// Pointer and gesture state owned by the front end. Surface coordinates
/// throughout (top-left origin, y down), same as window coordinates.
#[derive(Resource)]
struct UiState {
    pointer: NVec2,
    pressed: bool,
    slice_mode: bool,
    drag: Option<DragTarget>,
    slice_start: Option<NVec2>,
    slice_end: Option<NVec2>,
}

impl Default for UiState {
    fn default() -> Self {
        UiState {
            pointer: NVec2::zeros(),
            pressed: false,
            slice_mode: false,
            drag: None,
            slice_start: None,
            slice_end: None,
        }
    }
}

pub fn run_2d(scenario: Scenario) {
    println!(
        "run_2d: starting Bevy viewer with {} slimes",
        scenario.system.slimes.len()
    );

    App::new()
        .insert_resource(scenario)
        .init_resource::<UiState>()
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_camera_system)
        .add_systems(
            Update,
            (
                surface_sync_system,
                input_system,
                physics_step_system,
                draw_system,
            )
                .chain(), // input must be snapshotted before physics reads it
        )
        .run();
}

fn setup_camera_system(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());
}

/// Keep the simulation surface in sync with the window size.
fn surface_sync_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut scenario: ResMut<Scenario>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let new_bounds = NVec2::new(window.width() as f64, window.height() as f64);
    if (new_bounds - scenario.system.bounds).norm() > f64::EPSILON {
        resize_system(&mut scenario.system, new_bounds);
    }
}

fn input_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut ui: ResMut<UiState>,
    mut scenario: ResMut<Scenario>,
) {
    // Window cursor coordinates are top-left based, same convention as
    // the simulation surface, so no mapping is needed here.
    if let Ok(window) = windows.get_single() {
        if let Some(cursor) = window.cursor_position() {
            ui.pointer = NVec2::new(cursor.x as f64, cursor.y as f64);
        }
    }

    if keys.just_pressed(KeyCode::KeyS) {
        ui.slice_mode = !ui.slice_mode;
        ui.slice_start = None;
        ui.slice_end = None;
    }

    if keys.just_pressed(KeyCode::KeyF) {
        let Scenario {
            system,
            parameters,
            rng,
            ..
        } = &mut *scenario;
        spawn_food(system, parameters, rng);
    }

    if mouse.just_pressed(MouseButton::Left) {
        ui.pressed = true;
        if ui.slice_mode {
            ui.slice_start = Some(ui.pointer);
            ui.slice_end = Some(ui.pointer);
        } else {
            ui.drag = find_drag_point(&scenario.system, ui.pointer, &scenario.parameters);
        }
    }

    if ui.pressed && ui.slice_mode && ui.slice_start.is_some() {
        ui.slice_end = Some(ui.pointer);
    }

    if mouse.just_released(MouseButton::Left) {
        // A finished slice gesture is applied here, between ticks, never
        // mid-physics-pass.
        if ui.slice_mode {
            if let (Some(start), Some(end)) = (ui.slice_start.take(), ui.slice_end.take()) {
                let Scenario {
                    system,
                    parameters,
                    rng,
                    ids,
                } = &mut *scenario;
                let outcome = slice_system(system, start, end, parameters, rng, ids);
                if !outcome.is_noop() {
                    apply_slice(system, outcome);
                }
            }
        }
        ui.pressed = false;
        ui.drag = None;
    }
}

fn physics_step_system(ui: Res<UiState>, mut scenario: ResMut<Scenario>) {
    let input = InputSnapshot {
        pointer: ui.pointer,
        pressed: ui.pressed,
        drag: ui.drag,
    };

    // Split &mut Scenario into &mut fields in one destructuring step.
    let Scenario {
        system, parameters, ..
    } = &mut *scenario;

    for _ in 0..parameters.sub_steps {
        step_system(system, &input, parameters);
    }
}

fn draw_system(mut gizmos: Gizmos, ui: Res<UiState>, mut scenario: ResMut<Scenario>) {
    let bounds = scenario.system.bounds;
    // Surface (top-left, y down) to Bevy world (centered, y up).
    let to_world = move |p: NVec2| {
        Vec2::new(
            (p.x - bounds.x * 0.5) as f32,
            (bounds.y * 0.5 - p.y) as f32,
        )
    };

    for slime in &scenario.system.slimes {
        let n = slime.outer_count();
        if n == 0 {
            continue;
        }
        let color = Color::rgb(slime.color[0], slime.color[1], slime.color[2]);
        let mut outline: Vec<Vec2> = slime.points[..n].iter().map(|p| to_world(p.x)).collect();
        outline.push(outline[0]); // close the ring
        gizmos.linestrip_2d(outline, color);

        let glow_alpha = if slime.healing {
            0.3 + 0.4 * slime.healing_progress as f32
        } else {
            0.7
        };
        let glow = Color::rgba(slime.glow[0], slime.glow[1], slime.glow[2], glow_alpha);
        gizmos.circle_2d(to_world(slime.center()), (6.0 * slime.scale) as f32, glow);
    }

    for item in &scenario.system.food {
        gizmos.circle_2d(
            to_world(item.x),
            item.radius as f32,
            Color::rgb(1.0, 0.39, 0.28),
        );
    }

    if ui.slice_mode && ui.pressed {
        if let (Some(start), Some(end)) = (ui.slice_start, ui.slice_end) {
            gizmos.line_2d(
                to_world(start),
                to_world(end),
                Color::rgba(1.0, 0.0, 0.0, 0.7),
            );
        }
    }

    // Cosmetic trigger points: a one-frame flash where the particle and
    // audio collaborators would hook in.
    for event in scenario.system.events.drain(..) {
        let (SimEvent::Fed { pos, color }
        | SimEvent::Split { pos, color }
        | SimEvent::Healed { pos, color }) = event;
        gizmos.circle_2d(
            to_world(pos),
            14.0,
            Color::rgba(color[0], color[1], color[2], 0.6),
        );
    }
}
