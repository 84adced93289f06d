//! Locomotion domain: the lower-body state resolver.
//!
//! Each fixed tick runs a strictly ordered chain: ingest latched input,
//! probe contacts, drive movement (wall climb or slide/move/gravity),
//! resolve jump intent, resolve dash intent, commit velocity. Cooldown
//! countdowns and visual effects tick on the frame cadence.

mod components;
pub(crate) mod resolver;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{Facing, GameLayer, Ground, MotionState, Player, Wall, WallSnap};
pub use resources::{JumpStyle, LocomotionTuning};

use bevy::prelude::*;

use crate::body_mode::BodyMode;
use crate::locomotion::systems::{
    animate_wall_snap, commit_velocity, drive_dash, drive_motion, enter_wall_stick, flip_sprite,
    ingest_latches, resolve_dash_intent, resolve_jump_intent, sense_ground, sense_walls,
    spawn_player, tick_fixed_timers, tick_frame_cooldowns,
};

pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LocomotionTuning>()
            .add_systems(Startup, spawn_player)
            .add_systems(
                Update,
                (tick_frame_cooldowns, animate_wall_snap, flip_sprite),
            )
            .add_systems(
                FixedUpdate,
                (
                    ingest_latches,
                    tick_fixed_timers,
                    sense_ground,
                    sense_walls,
                    enter_wall_stick,
                    drive_motion,
                    resolve_jump_intent,
                    resolve_dash_intent,
                    drive_dash,
                    commit_velocity,
                )
                    .chain()
                    .run_if(in_state(BodyMode::LowerBody)),
            );
    }
}
