//! Input domain: per-frame snapshot sampling and fixed-tick latches.
//!
//! Edge inputs (jump press/release, dash press) are captured on the render
//! frame cadence and latched until the next fixed simulation tick consumes
//! them. Consumption clears a latch exactly once; level inputs (held keys,
//! move axis) are re-sampled every frame and read directly.

use bevy::prelude::*;

/// Neutral per-frame input record. Rebuilt from the keyboard every frame.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct FrameInput {
    pub move_axis: Vec2,
    pub jump_down: bool,
    pub jump_held: bool,
    pub jump_up: bool,
    pub dash_down: bool,
}

/// Edge-input latches bridging the frame cadence to the fixed tick.
///
/// `time_jump_pressed` is stamped with the fixed-step clock so the jump
/// buffer window is reproducible under fixed-step simulation.
#[derive(Resource, Debug, Clone, Copy)]
pub struct InputLatches {
    pub jump_queued: bool,
    pub jump_released: bool,
    pub dash_queued: bool,
    pub time_jump_pressed: f32,
}

impl Default for InputLatches {
    fn default() -> Self {
        Self {
            jump_queued: false,
            jump_released: false,
            dash_queued: false,
            time_jump_pressed: f32::MIN,
        }
    }
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameInput>()
            .init_resource::<InputLatches>()
            .add_systems(PreUpdate, sample_input);
    }
}

fn sample_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    fixed_time: Res<Time<Fixed>>,
    mut input: ResMut<FrameInput>,
    mut latches: ResMut<InputLatches>,
) {
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    input.move_axis = Vec2::new(x, y);
    input.jump_down =
        keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::KeyK);
    input.jump_held = keyboard.pressed(KeyCode::Space) || keyboard.pressed(KeyCode::KeyK);
    input.jump_up =
        keyboard.just_released(KeyCode::Space) || keyboard.just_released(KeyCode::KeyK);
    input.dash_down =
        keyboard.just_pressed(KeyCode::ShiftLeft) || keyboard.just_pressed(KeyCode::KeyJ);

    if input.jump_down {
        latches.jump_queued = true;
        latches.time_jump_pressed = fixed_time.elapsed_secs();
    }
    if input.jump_up {
        latches.jump_released = true;
    }
    if input.dash_down {
        latches.dash_queued = true;
    }
}
