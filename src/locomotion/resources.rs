//! Locomotion domain: tuning resource and ability flags.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed-height or variable-height jumps. Variable jumps cut the ascent
/// short when the jump button is released before the apex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumpStyle {
    Fixed,
    #[default]
    Variable,
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionTuning {
    // Horizontal movement
    pub max_speed: f32,
    pub accel: f32,
    pub decel: f32,
    pub air_decel: f32,
    /// Small downward velocity applied while grounded to keep contact.
    pub grounding_force: f32,

    // Jumping
    pub jump_style: JumpStyle,
    pub jump_force: f32,
    pub max_fall_speed: f32,
    pub fall_accel: f32,
    pub coyote_time: f32,
    pub jump_buffer_time: f32,
    /// Extra gravity multiplier after an early-ended jump, while ascending.
    pub jump_end_early_multiplier: f32,
    /// Fraction of upward velocity kept when the jump button is released
    /// mid-ascent (the one-time early-apex cut).
    pub variable_jump_multiplier: f32,

    // Air jumps
    pub allow_double_jump: bool,
    pub max_air_jumps: u8,
    pub air_jump_power: f32,
    pub air_jumps_reset_velocity: bool,
    pub air_jump_velocity_reset_threshold: f32,
    /// Allow an air jump after a wall jump in the same airborne phase.
    pub air_jump_from_wall: bool,

    // Walls
    pub allow_wall_slide: bool,
    pub allow_wall_jump: bool,
    pub allow_wall_climb: bool,
    pub allow_wall_stick: bool,
    pub wall_check_distance: f32,
    pub wall_slide_speed: f32,
    pub wall_jump_angle_deg: f32,
    pub wall_jump_force_h: f32,
    pub wall_jump_force_v: f32,
    pub wall_jump_time: f32,
    pub wall_jump_input_buffer: f32,
    pub wall_climb_angle_deg: f32,
    pub wall_climb_force_h: f32,
    pub wall_climb_force_v: f32,

    // Wall stick
    pub wall_climb_speed: f32,
    pub wall_stick_cooldown: f32,
    pub wall_stick_jump_force: f32,
    pub wall_snap_duration: f32,

    // Dash
    pub allow_dash: bool,
    pub dash_speed: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,
    pub can_dash_in_air: bool,
    pub max_air_dashes: u8,
    /// Fraction of dash velocity retained when the dash ends.
    pub dash_momentum: f32,

    // Sensing
    pub ground_check_distance: f32,
}

impl Default for LocomotionTuning {
    fn default() -> Self {
        Self {
            max_speed: 320.0,
            accel: 3000.0,
            decel: 2600.0,
            air_decel: 1400.0,
            grounding_force: -30.0,
            jump_style: JumpStyle::Variable,
            jump_force: 680.0,
            max_fall_speed: 900.0,
            fall_accel: 1800.0,
            coyote_time: 0.2,
            jump_buffer_time: 0.2,
            jump_end_early_multiplier: 3.5,
            variable_jump_multiplier: 0.5,
            allow_double_jump: true,
            max_air_jumps: 1,
            air_jump_power: 640.0,
            air_jumps_reset_velocity: true,
            air_jump_velocity_reset_threshold: -100.0,
            air_jump_from_wall: false,
            allow_wall_slide: true,
            allow_wall_jump: true,
            allow_wall_climb: true,
            allow_wall_stick: true,
            wall_check_distance: 6.0,
            wall_slide_speed: 100.0,
            wall_jump_angle_deg: 60.0,
            wall_jump_force_h: 700.0,
            wall_jump_force_v: 750.0,
            wall_jump_time: 0.2,
            wall_jump_input_buffer: 0.1,
            wall_climb_angle_deg: 75.0,
            wall_climb_force_h: 700.0,
            wall_climb_force_v: 750.0,
            wall_climb_speed: 150.0,
            wall_stick_cooldown: 0.2,
            wall_stick_jump_force: 450.0,
            wall_snap_duration: 0.1,
            allow_dash: true,
            dash_speed: 900.0,
            dash_duration: 0.15,
            dash_cooldown: 0.6,
            can_dash_in_air: true,
            max_air_dashes: 1,
            dash_momentum: 0.3,
            ground_check_distance: 4.0,
        }
    }
}

impl LocomotionTuning {
    /// Launch velocity of a standard wall jump, projected from the
    /// configured angle. The x component is mirrored away from the wall.
    pub fn wall_jump_power(&self) -> Vec2 {
        let angle = self.wall_jump_angle_deg.to_radians();
        Vec2::new(
            self.wall_jump_force_h * angle.cos(),
            self.wall_jump_force_v * angle.sin(),
        )
    }

    /// Launch velocity of the steeper climb-style wall jump, selected by
    /// holding up while jumping off a wall.
    pub fn wall_climb_power(&self) -> Vec2 {
        let angle = self.wall_climb_angle_deg.to_radians();
        Vec2::new(
            self.wall_climb_force_h * angle.cos(),
            self.wall_climb_force_v * angle.sin(),
        )
    }

    /// Clamp out configuration values the resolver cannot run with,
    /// degrading abilities instead of halting. Returns a description of
    /// every adjustment made.
    pub fn sanitize(&mut self) -> Vec<String> {
        let mut fixes = Vec::new();
        if self.dash_duration <= 0.0 && self.allow_dash {
            self.allow_dash = false;
            fixes.push("dash_duration <= 0, disabling dash".to_string());
        }
        if self.coyote_time < 0.0 {
            self.coyote_time = 0.0;
            fixes.push("coyote_time < 0, clamped to 0".to_string());
        }
        if self.jump_buffer_time < 0.0 {
            self.jump_buffer_time = 0.0;
            fixes.push("jump_buffer_time < 0, clamped to 0".to_string());
        }
        if self.max_fall_speed <= 0.0 {
            self.max_fall_speed = 900.0;
            fixes.push("max_fall_speed <= 0, reset to default".to_string());
        }
        fixes
    }
}
