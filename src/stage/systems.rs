//! Stage domain: geometry spawn, checkpoint/goal sensors, respawn.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::grapple::Grapple;
use crate::locomotion::{GameLayer, Ground, MotionState, Player, Wall};
use crate::stage::{Checkpoint, CheckpointReached, GoalZone, LevelCompleted, RespawnPoint};

/// Falling below this height counts as death.
pub const KILL_PLANE_Y: f32 = -600.0;

/// A checkpoint the player has already claimed.
#[derive(Component)]
pub(crate) struct Claimed;

pub(crate) fn spawn_stage(mut commands: Commands) {
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);
    let checkpoint_color = Color::srgb(0.3, 0.6, 0.8);
    let goal_color = Color::srgb(0.8, 0.7, 0.2);

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]);
    let sensor_layers = CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]);

    // Ground
    commands.spawn((
        Ground,
        Sprite {
            color: ground_color,
            custom_size: Some(Vec2::new(1200.0, 40.0)),
            ..default()
        },
        Transform::from_xyz(0.0, -200.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(1200.0, 40.0),
        ground_layers,
    ));

    // Left wall
    commands.spawn((
        Wall,
        Sprite {
            color: wall_color,
            custom_size: Some(Vec2::new(40.0, 700.0)),
            ..default()
        },
        Transform::from_xyz(-620.0, 130.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(40.0, 700.0),
        wall_layers,
    ));

    // Right wall
    commands.spawn((
        Wall,
        Sprite {
            color: wall_color,
            custom_size: Some(Vec2::new(40.0, 700.0)),
            ..default()
        },
        Transform::from_xyz(620.0, 130.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(40.0, 700.0),
        wall_layers,
    ));

    // Mid-height platforms for jump and dash routes
    for (x, y, w) in [(-340.0, -60.0, 200.0), (20.0, 40.0, 180.0), (380.0, 140.0, 200.0)] {
        commands.spawn((
            Ground,
            Sprite {
                color: platform_color,
                custom_size: Some(Vec2::new(w, 24.0)),
                ..default()
            },
            Transform::from_xyz(x, y, 0.0),
            RigidBody::Static,
            Collider::rectangle(w, 24.0),
            ground_layers,
        ));
    }

    // Ceiling beam for grapple swings
    commands.spawn((
        Ground,
        Sprite {
            color: ground_color,
            custom_size: Some(Vec2::new(900.0, 30.0)),
            ..default()
        },
        Transform::from_xyz(0.0, 440.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(900.0, 30.0),
        ground_layers,
    ));

    // Checkpoints along the route
    for (x, y) in [(20.0, 76.0), (380.0, 176.0)] {
        commands.spawn((
            Checkpoint,
            Sprite {
                color: checkpoint_color,
                custom_size: Some(Vec2::new(20.0, 48.0)),
                ..default()
            },
            Transform::from_xyz(x, y, 0.0),
            RigidBody::Static,
            Collider::rectangle(20.0, 48.0),
            Sensor,
            CollisionEventsEnabled,
            sensor_layers,
        ));
    }

    // Goal
    commands.spawn((
        GoalZone,
        Sprite {
            color: goal_color,
            custom_size: Some(Vec2::new(32.0, 64.0)),
            ..default()
        },
        Transform::from_xyz(560.0, -148.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(32.0, 64.0),
        Sensor,
        CollisionEventsEnabled,
        sensor_layers,
    ));
}

/// Match a collision-start pair against (player, marker) in either order.
fn sensor_hit<T: Component>(
    start: &CollisionStart,
    players: &Query<(), With<Player>>,
    sensors: &Query<&Transform, (With<T>, Without<Claimed>)>,
) -> Option<Entity> {
    let (a, b) = (start.collider1, start.collider2);
    if players.get(a).is_ok() && sensors.get(b).is_ok() {
        Some(b)
    } else if players.get(b).is_ok() && sensors.get(a).is_ok() {
        Some(a)
    } else {
        None
    }
}

/// First touch of a checkpoint claims it and announces the position.
pub(crate) fn detect_checkpoints(
    mut commands: Commands,
    mut collisions: MessageReader<CollisionStart>,
    players: Query<(), With<Player>>,
    checkpoints: Query<&Transform, (With<Checkpoint>, Without<Claimed>)>,
    mut sprites: Query<&mut Sprite>,
    mut reached: MessageWriter<CheckpointReached>,
) {
    for start in collisions.read() {
        let Some(entity) = sensor_hit::<Checkpoint>(start, &players, &checkpoints) else {
            continue;
        };
        let Ok(transform) = checkpoints.get(entity) else {
            continue;
        };

        let position = transform.translation.truncate();
        reached.write(CheckpointReached { position });
        commands.entity(entity).insert(Claimed);
        if let Ok(mut sprite) = sprites.get_mut(entity) {
            sprite.color = Color::srgb(0.5, 0.85, 0.5);
        }
        info!("checkpoint claimed at {position:?}");
    }
}

/// The respawn point follows checkpoint notifications, keeping claim
/// detection and respawn policy decoupled.
pub(crate) fn update_respawn_point(
    mut reached: MessageReader<CheckpointReached>,
    mut respawn: ResMut<RespawnPoint>,
) {
    for message in reached.read() {
        respawn.position = message.position;
        debug!("respawn point moved to {:?}", message.position);
    }
}

/// Reaching the goal fires the completion notification once.
pub(crate) fn detect_goal(
    mut commands: Commands,
    mut collisions: MessageReader<CollisionStart>,
    players: Query<(), With<Player>>,
    goals: Query<&Transform, (With<GoalZone>, Without<Claimed>)>,
    mut completed: MessageWriter<LevelCompleted>,
) {
    for start in collisions.read() {
        let Some(entity) = sensor_hit::<GoalZone>(start, &players, &goals) else {
            continue;
        };
        completed.write(LevelCompleted);
        commands.entity(entity).insert(Claimed);
        info!("level complete");
    }
}

/// Reset the player at the respawn point with all transient motion state
/// cleared and any rope dropped.
pub(crate) fn respawn_player(
    respawn: &RespawnPoint,
    transform: &mut Transform,
    velocity: &mut LinearVelocity,
    state: &mut MotionState,
    grapple: &mut Grapple,
) {
    transform.translation.x = respawn.position.x;
    transform.translation.y = respawn.position.y;
    velocity.0 = Vec2::ZERO;
    state.reset_transient();
    grapple.release();
}

/// Falling past the kill plane respawns immediately.
pub(crate) fn check_kill_plane(
    respawn: Res<RespawnPoint>,
    mut query: Query<
        (&mut Transform, &mut LinearVelocity, &mut MotionState, &mut Grapple),
        With<Player>,
    >,
) {
    for (mut transform, mut velocity, mut state, mut grapple) in &mut query {
        if transform.translation.y < KILL_PLANE_Y {
            respawn_player(&respawn, &mut transform, &mut velocity, &mut state, &mut grapple);
            info!("fell out of the stage, respawning");
        }
    }
}

/// Full stage reset after completion: unclaim checkpoints, restore their
/// idle visual, drop the banner, move the respawn point back to the start
/// and respawn there.
pub(crate) fn restart_stage(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut respawn: ResMut<RespawnPoint>,
    claimed: Query<Entity, With<Claimed>>,
    mut checkpoint_sprites: Query<&mut Sprite, With<Checkpoint>>,
    banners: Query<Entity, With<crate::ui::CompletionBanner>>,
    mut players: Query<
        (&mut Transform, &mut LinearVelocity, &mut MotionState, &mut Grapple),
        With<Player>,
    >,
) {
    if !keyboard.just_pressed(KeyCode::Enter) {
        return;
    }

    *respawn = RespawnPoint::default();
    for entity in &claimed {
        commands.entity(entity).remove::<Claimed>();
    }
    for mut sprite in &mut checkpoint_sprites {
        sprite.color = Color::srgb(0.3, 0.6, 0.8);
    }
    for entity in &banners {
        commands.entity(entity).despawn();
    }
    for (mut transform, mut velocity, mut state, mut grapple) in &mut players {
        respawn_player(&respawn, &mut transform, &mut velocity, &mut state, &mut grapple);
    }
    info!("stage restarted");
}

/// Manual respawn request.
pub(crate) fn respawn_on_request(
    keyboard: Res<ButtonInput<KeyCode>>,
    respawn: Res<RespawnPoint>,
    mut query: Query<
        (&mut Transform, &mut LinearVelocity, &mut MotionState, &mut Grapple),
        With<Player>,
    >,
) {
    if !keyboard.just_pressed(KeyCode::KeyR) {
        return;
    }
    for (mut transform, mut velocity, mut state, mut grapple) in &mut query {
        respawn_player(&respawn, &mut transform, &mut velocity, &mut state, &mut grapple);
    }
    info!("respawned at {:?}", respawn.position);
}
