//! Stage domain: tests for respawn behavior.

use avian2d::prelude::LinearVelocity;
use bevy::prelude::*;

use super::systems::{KILL_PLANE_Y, respawn_player};
use super::{CheckpointReached, RespawnPoint};
use crate::grapple::{Grapple, GrapplePhase, Rope};
use crate::locomotion::MotionState;

#[test]
fn test_checkpoint_notification_moves_the_respawn_point() {
    let mut app = App::new();
    app.add_message::<CheckpointReached>()
        .init_resource::<RespawnPoint>()
        .add_systems(Update, super::systems::update_respawn_point);

    app.world_mut()
        .resource_mut::<bevy::ecs::message::Messages<CheckpointReached>>()
        .write(CheckpointReached {
            position: Vec2::new(120.0, 40.0),
        });
    app.update();

    assert_eq!(
        app.world().resource::<RespawnPoint>().position,
        Vec2::new(120.0, 40.0)
    );
}

#[test]
fn test_default_respawn_is_above_the_kill_plane() {
    let respawn = RespawnPoint::default();
    assert!(respawn.position.y > KILL_PLANE_Y);
}

#[test]
fn test_respawn_resets_motion_and_drops_the_rope() {
    let respawn = RespawnPoint {
        position: Vec2::new(50.0, 10.0),
    };
    let mut transform = Transform::from_xyz(400.0, -900.0, 0.0);
    let mut velocity = LinearVelocity(Vec2::new(200.0, -700.0));
    let mut state = MotionState {
        currently_dashing: true,
        is_wall_climbing: true,
        air_jumps_used: 1,
        ..MotionState::default()
    };
    let mut grapple = Grapple {
        phase: GrapplePhase::Attached(Rope::new(Vec2::new(0.0, 300.0), 100.0, 20.0, 0.0)),
    };

    respawn_player(
        &respawn,
        &mut transform,
        &mut velocity,
        &mut state,
        &mut grapple,
    );

    assert_eq!(transform.translation.truncate(), Vec2::new(50.0, 10.0));
    assert_eq!(velocity.0, Vec2::ZERO);
    assert!(!state.currently_dashing);
    assert!(!state.is_wall_climbing);
    assert_eq!(state.air_jumps_used, 0);
    assert!(!grapple.is_attached());
}
