//! Locomotion domain: components and physics layers.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Trigger zones (checkpoints, goals) - should not block movement
    Sensor,
}

#[derive(Component, Debug)]
pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

/// Full per-actor locomotion state, owned exclusively by the resolver
/// systems. Timestamps (`time_left_ground`) are on the fixed-step clock.
#[derive(Component, Debug, Clone)]
pub struct MotionState {
    /// Working velocity for this tick, committed to the rigid body at the
    /// end of the resolver chain (except while dashing).
    pub velocity: Vec2,
    pub facing: Facing,

    // Ground contact
    pub is_grounded: bool,
    pub time_left_ground: f32,
    pub can_use_coyote: bool,
    pub can_use_jump_buffer: bool,

    // Jump bookkeeping
    pub currently_jumping: bool,
    pub jump_ended_early: bool,
    pub jump_button_released: bool,
    pub air_jumps_used: u8,

    // Wall contact and wall jumping
    pub wall_on_left: bool,
    pub wall_on_right: bool,
    pub is_sliding_on_wall: bool,
    pub currently_wall_jumping: bool,
    pub has_wall_jumped: bool,
    pub wall_jump_direction: f32,
    /// Remaining lockout of the current wall jump.
    pub wall_jump_timer: f32,
    /// Grace window after losing wall contact during which a wall jump is
    /// still accepted (chaining).
    pub wall_jump_buffer_timer: f32,

    // Wall stick (climbing) sub-state
    pub is_wall_climbing: bool,
    pub wall_stick_cooldown: f32,

    // Dash sub-state
    pub currently_dashing: bool,
    pub can_dash: bool,
    pub dash_timer: f32,
    pub dash_cooldown_timer: f32,
    pub dashes_used: u8,
    pub dash_direction: f32,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            is_grounded: false,
            time_left_ground: f32::MIN,
            can_use_coyote: false,
            can_use_jump_buffer: false,
            currently_jumping: false,
            jump_ended_early: false,
            jump_button_released: false,
            air_jumps_used: 0,
            wall_on_left: false,
            wall_on_right: false,
            is_sliding_on_wall: false,
            currently_wall_jumping: false,
            has_wall_jumped: false,
            wall_jump_direction: 0.0,
            wall_jump_timer: 0.0,
            wall_jump_buffer_timer: 0.0,
            is_wall_climbing: false,
            wall_stick_cooldown: 0.0,
            currently_dashing: false,
            can_dash: true,
            dash_timer: 0.0,
            dash_cooldown_timer: 0.0,
            dashes_used: 0,
            dash_direction: 1.0,
        }
    }
}

impl MotionState {
    pub fn turn(&mut self, face_right: bool) {
        self.facing = if face_right {
            Facing::Right
        } else {
            Facing::Left
        };
    }

    /// Reset the transient fields that should not survive a respawn.
    pub fn reset_transient(&mut self) {
        let facing = self.facing;
        *self = MotionState {
            facing,
            ..default()
        };
    }
}

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Smooth reposition flush to a wall after a stick, ticked on the frame
/// cadence and aborted if the stick ends before it finishes.
#[derive(Component, Debug)]
pub struct WallSnap {
    pub start_x: f32,
    pub target_x: f32,
    pub elapsed: f32,
    pub duration: f32,
}

impl WallSnap {
    pub fn new(start_x: f32, target_x: f32, duration: f32) -> Self {
        Self {
            start_x,
            target_x,
            elapsed: 0.0,
            duration,
        }
    }
}
