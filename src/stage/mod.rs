//! Stage domain: level geometry, checkpoints, respawn, and the goal.

mod systems;

#[cfg(test)]
mod tests;

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::stage::systems::{
    check_kill_plane, detect_checkpoints, detect_goal, respawn_on_request, restart_stage,
    spawn_stage, update_respawn_point,
};

/// A checkpoint sensor. Touching it moves the respawn point here.
#[derive(Component, Debug)]
pub struct Checkpoint;

/// The level-exit sensor.
#[derive(Component, Debug)]
pub struct GoalZone;

/// Where the player reappears on respawn.
#[derive(Resource, Debug, Clone, Copy)]
pub struct RespawnPoint {
    pub position: Vec2,
}

impl Default for RespawnPoint {
    fn default() -> Self {
        Self {
            position: Vec2::new(-300.0, -120.0),
        }
    }
}

/// Fired when the player touches a checkpoint it has not claimed yet.
#[derive(Debug, Clone, Copy)]
pub struct CheckpointReached {
    pub position: Vec2,
}

impl Message for CheckpointReached {}

/// Fired once when the player reaches the goal zone.
#[derive(Debug, Clone, Copy)]
pub struct LevelCompleted;

impl Message for LevelCompleted {}

pub struct StagePlugin;

impl Plugin for StagePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RespawnPoint>()
            .add_message::<CheckpointReached>()
            .add_message::<LevelCompleted>()
            .add_systems(Startup, spawn_stage)
            .add_systems(
                Update,
                (
                    (detect_checkpoints, update_respawn_point).chain(),
                    detect_goal,
                    check_kill_plane,
                    respawn_on_request,
                    restart_stage,
                ),
            );
    }
}
