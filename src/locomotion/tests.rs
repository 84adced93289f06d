//! Locomotion domain: tick-by-tick tests for the resolver.

use bevy::prelude::Vec2;

use super::resolver::{
    JumpKind, apply_gravity, apply_ground_contact, apply_horizontal, apply_wall_contact,
    apply_wall_slide, can_enter_wall_stick, can_start_dash, move_towards, resolve_dash,
    resolve_jump, wall_snap_x,
};
use super::{Facing, JumpStyle, LocomotionTuning, MotionState};
use crate::input::{FrameInput, InputLatches};

const DT: f32 = 1.0 / 60.0;

fn tuning() -> LocomotionTuning {
    LocomotionTuning::default()
}

fn airborne_state(now_left_ground: f32) -> MotionState {
    MotionState {
        is_grounded: false,
        can_use_coyote: true,
        can_use_jump_buffer: true,
        time_left_ground: now_left_ground,
        ..MotionState::default()
    }
}

fn queued_jump() -> InputLatches {
    InputLatches {
        jump_queued: true,
        ..InputLatches::default()
    }
}

// -----------------------------------------------------------------------------
// Helper math
// -----------------------------------------------------------------------------

#[test]
fn test_move_towards_clamps_at_target() {
    assert_eq!(move_towards(0.0, 10.0, 4.0), 4.0);
    assert_eq!(move_towards(8.0, 10.0, 4.0), 10.0);
    assert_eq!(move_towards(10.0, 0.0, 4.0), 6.0);
    assert_eq!(move_towards(-2.0, -10.0, 3.0), -5.0);
}

#[test]
fn test_wall_snap_interpolation_endpoints() {
    assert_eq!(wall_snap_x(0.0, 10.0, 0.0, 0.1), 0.0);
    assert_eq!(wall_snap_x(0.0, 10.0, 0.1, 0.1), 10.0);
    // Degenerate duration snaps immediately.
    assert_eq!(wall_snap_x(0.0, 10.0, 0.0, 0.0), 10.0);
    // Midpoint of smoothstep is halfway.
    assert!((wall_snap_x(0.0, 10.0, 0.05, 0.1) - 5.0).abs() < 1e-4);
}

// -----------------------------------------------------------------------------
// Ground contact and landing resets
// -----------------------------------------------------------------------------

#[test]
fn test_landing_resets_air_resources() {
    let mut state = MotionState {
        is_grounded: false,
        air_jumps_used: 1,
        dashes_used: 1,
        has_wall_jumped: true,
        currently_wall_jumping: true,
        jump_ended_early: true,
        currently_jumping: true,
        ..MotionState::default()
    };

    apply_ground_contact(&mut state, true, false, 3.0);

    assert!(state.is_grounded);
    assert_eq!(state.air_jumps_used, 0);
    assert_eq!(state.dashes_used, 0);
    assert!(!state.has_wall_jumped);
    assert!(!state.currently_wall_jumping);
    assert!(!state.jump_ended_early);
    assert!(!state.currently_jumping);
    assert!(state.can_use_coyote);
    assert!(state.can_use_jump_buffer);
}

#[test]
fn test_leaving_ground_stamps_the_clock() {
    let mut state = MotionState {
        is_grounded: true,
        ..MotionState::default()
    };
    apply_ground_contact(&mut state, false, false, 7.25);
    assert!(!state.is_grounded);
    assert_eq!(state.time_left_ground, 7.25);
}

#[test]
fn test_ceiling_contact_cancels_ascent() {
    let mut state = MotionState {
        velocity: Vec2::new(0.0, 400.0),
        ..MotionState::default()
    };
    apply_ground_contact(&mut state, false, true, 0.0);
    assert_eq!(state.velocity.y, 0.0);
}

// -----------------------------------------------------------------------------
// Coyote and buffered jumps
// -----------------------------------------------------------------------------

#[test]
fn test_coyote_jump_inside_the_window() {
    let tuning = tuning();
    let mut state = airborne_state(0.0);
    let mut latches = queued_jump();

    let kind = resolve_jump(&mut state, &mut latches, &FrameInput::default(), &tuning, 0.19);
    assert_eq!(kind, Some(JumpKind::Ground));
    assert_eq!(state.velocity.y, tuning.jump_force);
}

#[test]
fn test_coyote_jump_expires_after_the_window() {
    let mut tuning = tuning();
    tuning.allow_double_jump = false;
    let mut state = airborne_state(0.0);
    let mut latches = queued_jump();

    let kind = resolve_jump(&mut state, &mut latches, &FrameInput::default(), &tuning, 0.21);
    assert_eq!(kind, None);
    // The latch is still consumed.
    assert!(!latches.jump_queued);
}

#[test]
fn test_buffered_jump_fires_on_landing_without_a_fresh_press() {
    let tuning = tuning();
    let mut state = MotionState {
        is_grounded: true,
        can_use_jump_buffer: true,
        ..MotionState::default()
    };
    // Pressed 0.1s ago, within the 0.2s buffer; no press this tick.
    let mut latches = InputLatches {
        time_jump_pressed: 0.9,
        ..InputLatches::default()
    };

    let kind = resolve_jump(&mut state, &mut latches, &FrameInput::default(), &tuning, 1.0);
    assert_eq!(kind, Some(JumpKind::Ground));
    // Executing cleared the buffer timestamp, so it cannot fire again.
    assert_eq!(latches.time_jump_pressed, f32::MIN);
}

#[test]
fn test_jump_latch_is_consumed_exactly_once() {
    let tuning = tuning();
    let mut state = MotionState {
        is_grounded: true,
        can_use_jump_buffer: true,
        ..MotionState::default()
    };
    let mut latches = queued_jump();

    assert!(resolve_jump(&mut state, &mut latches, &FrameInput::default(), &tuning, 0.0).is_some());

    // Same latch state next tick: nothing fires.
    state.is_grounded = true;
    let again = resolve_jump(&mut state, &mut latches, &FrameInput::default(), &tuning, DT);
    assert_eq!(again, None);
}

// -----------------------------------------------------------------------------
// Air jumps
// -----------------------------------------------------------------------------

#[test]
fn test_air_jump_respects_the_cap() {
    let tuning = tuning();
    let mut state = airborne_state(0.0);
    state.can_use_coyote = false;
    let now = 1.0; // well past coyote

    let mut latches = queued_jump();
    let first = resolve_jump(&mut state, &mut latches, &FrameInput::default(), &tuning, now);
    assert_eq!(first, Some(JumpKind::Air));
    assert_eq!(state.air_jumps_used, 1);
    assert_eq!(state.velocity.y, tuning.air_jump_power);

    let mut latches = queued_jump();
    let second = resolve_jump(&mut state, &mut latches, &FrameInput::default(), &tuning, now);
    assert_eq!(second, None);
}

#[test]
fn test_air_jump_resets_downward_velocity_first() {
    let tuning = tuning();
    let mut state = airborne_state(0.0);
    state.can_use_coyote = false;
    state.velocity.y = -500.0;

    let mut latches = queued_jump();
    resolve_jump(&mut state, &mut latches, &FrameInput::default(), &tuning, 1.0);
    assert_eq!(state.velocity.y, tuning.air_jump_power);
}

#[test]
fn test_no_air_jump_after_wall_jump_in_same_airtime() {
    let tuning = tuning();
    let mut state = airborne_state(0.0);
    state.can_use_coyote = false;
    state.has_wall_jumped = true;

    let mut latches = queued_jump();
    let kind = resolve_jump(&mut state, &mut latches, &FrameInput::default(), &tuning, 1.0);
    assert_eq!(kind, None);
}

// -----------------------------------------------------------------------------
// Wall slide and wall jumps
// -----------------------------------------------------------------------------

#[test]
fn test_grounded_and_sliding_are_mutually_exclusive() {
    let tuning = tuning();
    let mut state = MotionState {
        is_grounded: true,
        ..MotionState::default()
    };
    let input = FrameInput {
        move_axis: Vec2::new(-1.0, 0.0),
        ..FrameInput::default()
    };

    apply_wall_contact(&mut state, true, false, &input, &tuning);
    assert!(!state.is_sliding_on_wall);

    state.is_grounded = false;
    apply_wall_contact(&mut state, true, false, &input, &tuning);
    assert!(state.is_sliding_on_wall);
}

#[test]
fn test_slide_requires_pressing_toward_the_wall() {
    let tuning = tuning();
    let mut state = MotionState::default();
    let away = FrameInput {
        move_axis: Vec2::new(1.0, 0.0),
        ..FrameInput::default()
    };
    apply_wall_contact(&mut state, true, false, &away, &tuning);
    assert!(!state.is_sliding_on_wall);
}

#[test]
fn test_wall_slide_caps_fall_speed() {
    let tuning = tuning();
    let mut state = MotionState {
        is_sliding_on_wall: true,
        velocity: Vec2::new(40.0, -600.0),
        ..MotionState::default()
    };

    apply_wall_slide(&mut state, &tuning, DT);
    assert_eq!(state.velocity.y, -tuning.wall_slide_speed);
    assert_eq!(state.velocity.x, 0.0);
    assert_eq!(state.wall_jump_buffer_timer, tuning.wall_jump_input_buffer);
}

#[test]
fn test_wall_jump_launches_away_and_restores_air_jumps() {
    let tuning = tuning();
    let mut state = MotionState {
        is_sliding_on_wall: true,
        wall_on_left: true,
        air_jumps_used: 1,
        ..MotionState::default()
    };

    let mut latches = queued_jump();
    let kind = resolve_jump(&mut state, &mut latches, &FrameInput::default(), &tuning, 1.0);
    assert_eq!(kind, Some(JumpKind::Wall));

    let power = tuning.wall_jump_power();
    assert!((state.velocity.x - power.x).abs() < 1e-4);
    assert!((state.velocity.y - power.y).abs() < 1e-4);
    assert!(state.velocity.x > 0.0);
    assert!(state.has_wall_jumped);
    assert!(state.currently_wall_jumping);
    assert_eq!(state.wall_jump_timer, tuning.wall_jump_time);
    assert_eq!(state.air_jumps_used, 0);
}

#[test]
fn test_wall_jump_holding_up_uses_the_climb_trajectory() {
    let tuning = tuning();
    let mut state = MotionState {
        is_sliding_on_wall: true,
        wall_on_right: true,
        ..MotionState::default()
    };
    let input = FrameInput {
        move_axis: Vec2::new(0.0, 1.0),
        ..FrameInput::default()
    };

    let mut latches = queued_jump();
    resolve_jump(&mut state, &mut latches, &input, &tuning, 1.0);

    let power = tuning.wall_climb_power();
    assert!((state.velocity.x + power.x).abs() < 1e-4);
    assert!((state.velocity.y - power.y).abs() < 1e-4);
}

#[test]
fn test_wall_jump_outranks_air_jump() {
    let tuning = tuning();
    let mut state = airborne_state(0.0);
    state.can_use_coyote = false;
    state.is_sliding_on_wall = true;
    state.wall_on_right = true;

    let mut latches = queued_jump();
    let kind = resolve_jump(&mut state, &mut latches, &FrameInput::default(), &tuning, 1.0);
    assert_eq!(kind, Some(JumpKind::Wall));
    assert_eq!(state.air_jumps_used, 0);
}

#[test]
fn test_wall_stick_jump_outranks_everything() {
    let tuning = tuning();
    let mut state = MotionState {
        is_wall_climbing: true,
        wall_on_left: true,
        is_sliding_on_wall: true,
        ..MotionState::default()
    };

    let mut latches = queued_jump();
    let kind = resolve_jump(&mut state, &mut latches, &FrameInput::default(), &tuning, 1.0);
    assert_eq!(kind, Some(JumpKind::WallStick));
    assert!(!state.is_wall_climbing);
    assert_eq!(state.velocity.x, tuning.wall_stick_jump_force);
    assert_eq!(state.velocity.y, tuning.wall_stick_jump_force);
}

#[test]
fn test_wall_jump_power_projects_the_angle() {
    let tuning = tuning();
    let power = tuning.wall_jump_power();
    let expected_x = tuning.wall_jump_force_h * 60.0_f32.to_radians().cos();
    let expected_y = tuning.wall_jump_force_v * 60.0_f32.to_radians().sin();
    assert!((power.x - expected_x).abs() < 1e-3);
    assert!((power.y - expected_y).abs() < 1e-3);
}

// -----------------------------------------------------------------------------
// Gravity shaping
// -----------------------------------------------------------------------------

#[test]
fn test_early_release_cuts_ascent_exactly_once() {
    let tuning = tuning();
    let mut state = MotionState {
        velocity: Vec2::new(0.0, 600.0),
        currently_jumping: true,
        jump_button_released: true,
        ..MotionState::default()
    };

    apply_gravity(&mut state, &tuning, DT);
    let after_cut = 600.0 * tuning.variable_jump_multiplier
        - tuning.jump_end_early_multiplier * tuning.fall_accel * DT;
    assert!((state.velocity.y - after_cut).abs() < 1e-3);
    assert!(state.jump_ended_early);
    assert!(!state.jump_button_released);

    // Second tick: only the fall multiplier, no second halving.
    let before = state.velocity.y;
    apply_gravity(&mut state, &tuning, DT);
    let expected = before - tuning.jump_end_early_multiplier * tuning.fall_accel * DT;
    assert!((state.velocity.y - expected).abs() < 1e-3);
}

#[test]
fn test_fixed_jump_style_ignores_early_release() {
    let mut tuning = tuning();
    tuning.jump_style = JumpStyle::Fixed;
    let mut state = MotionState {
        velocity: Vec2::new(0.0, 600.0),
        currently_jumping: true,
        jump_button_released: true,
        ..MotionState::default()
    };

    apply_gravity(&mut state, &tuning, DT);
    assert!(!state.jump_ended_early);
    assert!((state.velocity.y - (600.0 - tuning.fall_accel * DT)).abs() < 1e-3);
}

#[test]
fn test_gravity_is_suspended_while_sliding_and_dashing() {
    let tuning = tuning();
    for setup in [
        |s: &mut MotionState| s.is_sliding_on_wall = true,
        |s: &mut MotionState| s.currently_dashing = true,
    ] {
        let mut state = MotionState {
            velocity: Vec2::new(0.0, -50.0),
            ..MotionState::default()
        };
        setup(&mut state);
        apply_gravity(&mut state, &tuning, DT);
        assert_eq!(state.velocity.y, -50.0);
    }
}

#[test]
fn test_fall_speed_is_clamped_at_terminal() {
    let tuning = tuning();
    let mut state = MotionState {
        velocity: Vec2::new(0.0, -tuning.max_fall_speed),
        ..MotionState::default()
    };
    apply_gravity(&mut state, &tuning, DT);
    assert_eq!(state.velocity.y, -tuning.max_fall_speed);
}

#[test]
fn test_grounding_force_pins_grounded_actors() {
    let tuning = tuning();
    let mut state = MotionState {
        is_grounded: true,
        velocity: Vec2::new(0.0, -400.0),
        ..MotionState::default()
    };
    apply_gravity(&mut state, &tuning, DT);
    assert_eq!(state.velocity.y, tuning.grounding_force);
}

// -----------------------------------------------------------------------------
// Horizontal movement
// -----------------------------------------------------------------------------

#[test]
fn test_horizontal_accelerates_toward_input() {
    let tuning = tuning();
    let mut state = MotionState {
        is_grounded: true,
        ..MotionState::default()
    };
    let input = FrameInput {
        move_axis: Vec2::new(1.0, 0.0),
        ..FrameInput::default()
    };

    apply_horizontal(&mut state, &input, &tuning, DT);
    assert!((state.velocity.x - tuning.accel * DT).abs() < 1e-3);
    assert_eq!(state.facing, Facing::Right);
}

#[test]
fn test_horizontal_is_locked_during_wall_jump() {
    let tuning = tuning();
    let mut state = MotionState {
        currently_wall_jumping: true,
        velocity: Vec2::new(250.0, 0.0),
        ..MotionState::default()
    };
    let input = FrameInput {
        move_axis: Vec2::new(-1.0, 0.0),
        ..FrameInput::default()
    };

    apply_horizontal(&mut state, &input, &tuning, DT);
    assert_eq!(state.velocity.x, 250.0);
}

// -----------------------------------------------------------------------------
// Dash
// -----------------------------------------------------------------------------

#[test]
fn test_dash_starts_and_arms_cooldown() {
    let tuning = tuning();
    let mut state = MotionState {
        is_grounded: true,
        facing: Facing::Left,
        ..MotionState::default()
    };
    let mut latches = InputLatches {
        dash_queued: true,
        ..InputLatches::default()
    };

    assert!(resolve_dash(&mut state, &mut latches, &tuning));
    assert!(state.currently_dashing);
    assert!(!state.can_dash);
    assert_eq!(state.dash_timer, tuning.dash_duration);
    assert_eq!(state.dash_cooldown_timer, tuning.dash_cooldown);
    assert_eq!(state.dash_direction, -1.0);
    assert!(!latches.dash_queued);
}

#[test]
fn test_dash_is_refused_during_cooldown() {
    let tuning = tuning();
    let mut state = MotionState {
        is_grounded: true,
        can_dash: true,
        dash_cooldown_timer: 0.3,
        ..MotionState::default()
    };
    let mut latches = InputLatches {
        dash_queued: true,
        ..InputLatches::default()
    };

    assert!(!resolve_dash(&mut state, &mut latches, &tuning));
    assert!(!state.currently_dashing);
    assert!(!latches.dash_queued);
}

#[test]
fn test_air_dashes_are_capped() {
    let tuning = tuning();
    let state = MotionState {
        is_grounded: false,
        dashes_used: tuning.max_air_dashes,
        ..MotionState::default()
    };
    assert!(!can_start_dash(&state, &tuning));
}

#[test]
fn test_dash_is_refused_during_wall_jump() {
    let tuning = tuning();
    let state = MotionState {
        is_grounded: true,
        currently_wall_jumping: true,
        ..MotionState::default()
    };
    assert!(!can_start_dash(&state, &tuning));
}

#[test]
fn test_dash_is_refused_while_stuck_to_a_wall() {
    let tuning = tuning();
    let mut state = MotionState {
        is_wall_climbing: true,
        wall_on_left: true,
        ..MotionState::default()
    };
    assert!(!can_start_dash(&state, &tuning));

    let mut latches = InputLatches {
        dash_queued: true,
        ..InputLatches::default()
    };
    assert!(!resolve_dash(&mut state, &mut latches, &tuning));
    // Dashing and wall climbing stay mutually exclusive.
    assert!(!state.currently_dashing);
    assert!(state.is_wall_climbing);
}

#[test]
fn test_wall_stick_entry_is_refused_while_dashing() {
    let tuning = tuning();
    let mut state = MotionState {
        currently_dashing: true,
        ..MotionState::default()
    };
    assert!(!can_enter_wall_stick(&state, &tuning));

    state.currently_dashing = false;
    assert!(can_enter_wall_stick(&state, &tuning));

    state.wall_stick_cooldown = 0.1;
    assert!(!can_enter_wall_stick(&state, &tuning));
}
