//! Locomotion domain: per-tick velocity resolution.
//!
//! Pure decision logic over `MotionState` + input, called from the
//! `FixedUpdate` systems in strict order: contacts, wall slide / climb,
//! horizontal movement, gravity shaping, jump resolution, dash resolution.
//! Keeping these free of ECS plumbing lets the timing-window behavior be
//! tested tick-by-tick.

use bevy::prelude::*;

use crate::input::{FrameInput, InputLatches};
use crate::locomotion::{JumpStyle, LocomotionTuning, MotionState};

/// Which jump branch executed this tick. Exactly one branch may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    WallStick,
    Wall,
    Ground,
    Air,
}

pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Smoothstep-interpolated x position for a wall snap in progress.
pub fn wall_snap_x(start_x: f32, target_x: f32, elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return target_x;
    }
    start_x + (target_x - start_x) * smoothstep(elapsed / duration)
}

/// Ingest ground/ceiling contact. A grounded transition resets the coyote,
/// jump-buffer, wall-jump, dash and air-jump bookkeeping; a ground exit
/// stamps `time_left_ground` on the simulation clock.
pub fn apply_ground_contact(state: &mut MotionState, hit_ground: bool, hit_ceiling: bool, now: f32) {
    if hit_ceiling {
        state.velocity.y = state.velocity.y.min(0.0);
    }

    if !state.is_grounded && hit_ground {
        state.is_grounded = true;
        state.can_use_coyote = true;
        state.can_use_jump_buffer = true;
        state.jump_ended_early = false;
        state.currently_jumping = false;
        state.jump_button_released = false;
        state.currently_wall_jumping = false;
        state.has_wall_jumped = false;
        state.dashes_used = 0;
        state.air_jumps_used = 0;
    } else if state.is_grounded && !hit_ground {
        state.is_grounded = false;
        state.time_left_ground = now;
    }
}

/// Ingest lateral wall contact and derive the sliding sub-state. Sliding
/// requires the slide ability, being airborne, a wall on the side the actor
/// is pressing toward, non-upward velocity, and no dash or wall-jump
/// lockout in progress.
pub fn apply_wall_contact(
    state: &mut MotionState,
    wall_on_left: bool,
    wall_on_right: bool,
    input: &FrameInput,
    tuning: &LocomotionTuning,
) {
    state.wall_on_left = wall_on_left;
    state.wall_on_right = wall_on_right;

    let holding_toward_wall = (wall_on_left && input.move_axis.x < 0.0)
        || (wall_on_right && input.move_axis.x > 0.0);

    let can_slide = tuning.allow_wall_slide
        && !state.is_grounded
        && (wall_on_left || wall_on_right)
        && state.velocity.y <= 0.0
        && !state.currently_dashing;

    state.is_sliding_on_wall =
        can_slide && holding_toward_wall && !state.currently_wall_jumping;

    if state.is_sliding_on_wall {
        state.turn(wall_on_right);
    }
}

/// Wall slide velocity clamp plus the wall-jump chaining buffer. While
/// sliding the fall is capped at `wall_slide_speed` and horizontal motion
/// is pinned to the wall; after leaving the wall the buffer counts down,
/// keeping a wall jump live for a short grace window.
pub fn apply_wall_slide(state: &mut MotionState, tuning: &LocomotionTuning, dt: f32) {
    if state.is_sliding_on_wall {
        state.velocity.y = state.velocity.y.max(-tuning.wall_slide_speed);
        if !state.currently_wall_jumping && !state.currently_dashing {
            state.velocity.x = 0.0;
        }
        state.wall_jump_buffer_timer = tuning.wall_jump_input_buffer;
    } else if state.wall_jump_buffer_timer > 0.0 {
        state.wall_jump_buffer_timer -= dt;
    }
}

/// Horizontal acceleration toward the input axis, with separate ground and
/// air deceleration. Suppressed while dashing, wall jumping, or sliding.
pub fn apply_horizontal(
    state: &mut MotionState,
    input: &FrameInput,
    tuning: &LocomotionTuning,
    dt: f32,
) {
    if state.currently_wall_jumping || state.currently_dashing || state.is_sliding_on_wall {
        return;
    }

    if input.move_axis.x == 0.0 {
        let decel = if state.is_grounded {
            tuning.decel
        } else {
            tuning.air_decel
        };
        state.velocity.x = move_towards(state.velocity.x, 0.0, decel * dt);
    } else {
        state.velocity.x = move_towards(
            state.velocity.x,
            input.move_axis.x * tuning.max_speed,
            tuning.accel * dt,
        );
        state.turn(input.move_axis.x > 0.0);
    }
}

/// Gravity shaping. Grounded actors are pinned with a small stick force;
/// sliding and dashing suspend gravity; airborne actors fall toward the
/// terminal speed, with the one-time early-apex cut and the early-end fall
/// multiplier when a variable jump was released mid-ascent.
pub fn apply_gravity(state: &mut MotionState, tuning: &LocomotionTuning, dt: f32) {
    if state.is_grounded {
        state.velocity.y = state.velocity.y.max(tuning.grounding_force);
        return;
    }
    if state.is_sliding_on_wall || state.currently_dashing {
        return;
    }

    if tuning.jump_style == JumpStyle::Variable
        && state.currently_jumping
        && state.jump_button_released
        && state.velocity.y > 0.0
    {
        state.velocity.y *= tuning.variable_jump_multiplier;
        state.jump_ended_early = true;
        state.jump_button_released = false;
    }

    let gravity_mult = if state.jump_ended_early && state.velocity.y > 0.0 {
        tuning.jump_end_early_multiplier
    } else {
        1.0
    };

    state.velocity.y = move_towards(
        state.velocity.y,
        -tuning.max_fall_speed,
        gravity_mult * tuning.fall_accel * dt,
    );
}

/// Wall-climb (stick) velocity: vertical input drives the climb, horizontal
/// motion is zeroed. Returns false when wall contact was lost and the stick
/// must end.
pub fn apply_wall_climb(
    state: &mut MotionState,
    input: &FrameInput,
    tuning: &LocomotionTuning,
) -> bool {
    state.velocity = Vec2::new(0.0, input.move_axis.y * tuning.wall_climb_speed);

    if !state.wall_on_left && !state.wall_on_right {
        state.is_wall_climbing = false;
        return false;
    }
    true
}

fn has_buffered_jump(
    state: &MotionState,
    latches: &InputLatches,
    tuning: &LocomotionTuning,
    now: f32,
) -> bool {
    state.can_use_jump_buffer && now < latches.time_jump_pressed + tuning.jump_buffer_time
}

fn can_use_coyote_time(state: &MotionState, tuning: &LocomotionTuning, now: f32) -> bool {
    state.can_use_coyote && !state.is_grounded && now < state.time_left_ground + tuning.coyote_time
}

fn can_wall_jump(state: &MotionState, tuning: &LocomotionTuning) -> bool {
    if !tuning.allow_wall_jump {
        return false;
    }
    state.is_sliding_on_wall
        || (state.wall_jump_buffer_timer > 0.0 && (state.wall_on_left || state.wall_on_right))
}

fn can_air_jump(state: &MotionState, tuning: &LocomotionTuning) -> bool {
    if !tuning.allow_double_jump
        || state.air_jumps_used >= tuning.max_air_jumps
        || state.is_sliding_on_wall
        || state.currently_wall_jumping
        || state.currently_dashing
        || state.is_grounded
    {
        return false;
    }
    if state.has_wall_jumped && !tuning.air_jump_from_wall {
        return false;
    }
    true
}

fn consume_jump(state: &mut MotionState) {
    state.jump_ended_early = false;
    state.can_use_jump_buffer = false;
    state.can_use_coyote = false;
    state.currently_jumping = true;
    state.jump_button_released = false;
}

/// Resolve jump intent. At most one branch executes per tick, in priority
/// order: wall-stick jump, wall jump, ground/coyote jump, air jump.
/// Evaluating always consumes the `jump_queued` latch; an executed branch
/// additionally consumes the buffer and coyote windows.
pub fn resolve_jump(
    state: &mut MotionState,
    latches: &mut InputLatches,
    input: &FrameInput,
    tuning: &LocomotionTuning,
    now: f32,
) -> Option<JumpKind> {
    if !latches.jump_queued && !has_buffered_jump(state, latches, tuning, now) {
        return None;
    }

    let kind = if state.is_wall_climbing {
        do_wall_stick_jump(state, tuning);
        Some(JumpKind::WallStick)
    } else if can_wall_jump(state, tuning) {
        do_wall_jump(state, input, tuning);
        Some(JumpKind::Wall)
    } else if state.is_grounded || can_use_coyote_time(state, tuning, now) {
        do_ground_jump(state, tuning);
        Some(JumpKind::Ground)
    } else if can_air_jump(state, tuning) {
        do_air_jump(state, tuning);
        Some(JumpKind::Air)
    } else {
        None
    };

    latches.jump_queued = false;
    if kind.is_some() {
        latches.time_jump_pressed = f32::MIN;
    }
    kind
}

fn do_ground_jump(state: &mut MotionState, tuning: &LocomotionTuning) {
    state.velocity.y = tuning.jump_force;
    consume_jump(state);
}

fn do_air_jump(state: &mut MotionState, tuning: &LocomotionTuning) {
    if tuning.air_jumps_reset_velocity
        && state.velocity.y < tuning.air_jump_velocity_reset_threshold
    {
        state.velocity.y = 0.0;
    }
    state.velocity.y = tuning.air_jump_power;
    state.air_jumps_used += 1;
    consume_jump(state);
}

fn do_wall_jump(state: &mut MotionState, input: &FrameInput, tuning: &LocomotionTuning) {
    state.wall_jump_direction = if state.wall_on_left { 1.0 } else { -1.0 };

    // Holding up selects the steeper climb-style trajectory.
    let climbing_up = tuning.allow_wall_climb && input.move_axis.y > 0.1;
    let power = if climbing_up {
        tuning.wall_climb_power()
    } else {
        tuning.wall_jump_power()
    };
    state.velocity = Vec2::new(state.wall_jump_direction * power.x, power.y);
    if !climbing_up {
        state.turn(state.wall_jump_direction > 0.0);
    }

    state.currently_wall_jumping = true;
    state.wall_jump_timer = tuning.wall_jump_time;
    state.has_wall_jumped = true;
    state.is_sliding_on_wall = false;

    // Break any wall stick and arm the re-stick cooldown.
    state.is_wall_climbing = false;
    state.wall_stick_cooldown = tuning.wall_stick_cooldown;

    state.air_jumps_used = 0;
    consume_jump(state);
}

fn do_wall_stick_jump(state: &mut MotionState, tuning: &LocomotionTuning) {
    state.is_wall_climbing = false;

    let dir = if state.wall_on_left { 1.0 } else { -1.0 };
    state.velocity = Vec2::new(dir * tuning.wall_stick_jump_force, tuning.wall_stick_jump_force);
    state.turn(dir > 0.0);
    consume_jump(state);
}

pub fn can_start_dash(state: &MotionState, tuning: &LocomotionTuning) -> bool {
    if !tuning.allow_dash || !state.can_dash || state.dash_cooldown_timer > 0.0 {
        return false;
    }
    if !state.is_grounded {
        if !tuning.can_dash_in_air {
            return false;
        }
        if state.dashes_used >= tuning.max_air_dashes {
            return false;
        }
    }
    if state.currently_wall_jumping || state.is_wall_climbing {
        return false;
    }
    true
}

/// Wall-stick entry gate, shared by the collision handler. A dash keeps
/// ownership of the body until it expires, so it can never be interrupted
/// by a stick.
pub fn can_enter_wall_stick(state: &MotionState, tuning: &LocomotionTuning) -> bool {
    tuning.allow_wall_stick
        && !state.currently_dashing
        && state.wall_stick_cooldown <= 0.0
        && !state.is_wall_climbing
}

/// Resolve dash intent. Consumes the `dash_queued` latch whether or not a
/// dash starts; starting arms the cooldown and the fixed dash duration.
pub fn resolve_dash(
    state: &mut MotionState,
    latches: &mut InputLatches,
    tuning: &LocomotionTuning,
) -> bool {
    if !latches.dash_queued || state.currently_dashing {
        latches.dash_queued = false;
        return false;
    }
    latches.dash_queued = false;

    if !can_start_dash(state, tuning) {
        return false;
    }

    state.currently_dashing = true;
    state.can_dash = false;
    state.dash_timer = tuning.dash_duration;
    state.dash_cooldown_timer = tuning.dash_cooldown;
    state.dash_direction = state.facing.sign();

    if !state.is_grounded && tuning.can_dash_in_air {
        state.dashes_used += 1;
    }
    true
}
