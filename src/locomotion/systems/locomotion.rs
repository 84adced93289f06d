//! Locomotion domain: fixed-tick resolver systems and frame-cadence
//! cosmetic updates.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::input::{FrameInput, InputLatches};
use crate::locomotion::resolver;
use crate::locomotion::{Facing, GameLayer, LocomotionTuning, MotionState, Player};

pub(crate) fn spawn_player(mut commands: Commands) {
    commands.spawn((
        (Player, MotionState::default(), crate::grapple::Grapple::default()),
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(Vec2::new(24.0, 48.0)),
            ..default()
        },
        Transform::from_xyz(-300.0, -120.0, 0.0),
        (
            RigidBody::Dynamic,
            Collider::rectangle(24.0, 48.0),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            // Gravity is shaped by the resolver while in lower-body mode.
            GravityScale(0.0),
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Player,
                [GameLayer::Ground, GameLayer::Wall, GameLayer::Sensor],
            ),
        ),
    ));
    info!("player spawned");
}

/// Move the frame-captured jump-release edge into the motion state at the
/// top of the tick. The press and dash latches stay in `InputLatches` until
/// their resolvers consume them.
pub(crate) fn ingest_latches(
    mut latches: ResMut<InputLatches>,
    mut query: Query<&mut MotionState, With<Player>>,
) {
    for mut state in &mut query {
        if latches.jump_released {
            state.jump_button_released = true;
        }
    }
    latches.jump_released = false;
}

/// Count down the wall-jump lockout on the fixed clock.
pub(crate) fn tick_fixed_timers(time: Res<Time>, mut query: Query<&mut MotionState, With<Player>>) {
    let dt = time.delta_secs();
    for mut state in &mut query {
        if state.currently_wall_jumping {
            state.wall_jump_timer -= dt;
            if state.wall_jump_timer <= 0.0 {
                state.currently_wall_jumping = false;
            }
        }
    }
}

/// The main movement pipeline: wall climb overrides everything; otherwise
/// wall slide, horizontal movement and gravity shaping run in that order.
pub(crate) fn drive_motion(
    time: Res<Time>,
    input: Res<FrameInput>,
    tuning: Res<LocomotionTuning>,
    mut query: Query<&mut MotionState, With<Player>>,
) {
    let dt = time.delta_secs();
    for mut state in &mut query {
        if state.is_wall_climbing {
            if !resolver::apply_wall_climb(&mut state, &input, &tuning) {
                debug!("wall stick ended: wall lost");
            }
        } else {
            resolver::apply_wall_slide(&mut state, &tuning, dt);
            resolver::apply_horizontal(&mut state, &input, &tuning, dt);
            resolver::apply_gravity(&mut state, &tuning, dt);
        }
    }
}

pub(crate) fn resolve_jump_intent(
    time: Res<Time>,
    input: Res<FrameInput>,
    tuning: Res<LocomotionTuning>,
    mut latches: ResMut<InputLatches>,
    mut query: Query<&mut MotionState, With<Player>>,
) {
    let now = time.elapsed_secs();
    for mut state in &mut query {
        if let Some(kind) = resolver::resolve_jump(&mut state, &mut latches, &input, &tuning, now)
        {
            debug!(
                "jump: {kind:?}, air_jumps_used={}, vy={:.0}",
                state.air_jumps_used, state.velocity.y
            );
        }
    }
}

/// Commit the resolved velocity to the rigid body. While dashing the dash
/// system owns the velocity write instead.
pub(crate) fn commit_velocity(
    mut query: Query<(&MotionState, &mut LinearVelocity), With<Player>>,
) {
    for (state, mut velocity) in &mut query {
        if !state.currently_dashing {
            velocity.0 = state.velocity;
        }
    }
}

/// Frame-cadence cooldown countdowns (dash, wall re-stick). These only
/// gate future fixed-tick decisions, so running them on the render clock
/// matches the latch contract.
pub(crate) fn tick_frame_cooldowns(
    time: Res<Time>,
    mut query: Query<&mut MotionState, With<Player>>,
) {
    let dt = time.delta_secs();
    for mut state in &mut query {
        if state.dash_cooldown_timer > 0.0 {
            state.dash_cooldown_timer -= dt;
        }
        if state.dash_cooldown_timer <= 0.0 && !state.can_dash {
            state.can_dash = true;
        }
        if state.wall_stick_cooldown > 0.0 {
            state.wall_stick_cooldown -= dt;
        }
    }
}

pub(crate) fn flip_sprite(mut query: Query<(&MotionState, &mut Sprite), With<Player>>) {
    for (state, mut sprite) in &mut query {
        sprite.flip_x = state.facing == Facing::Left;
    }
}
