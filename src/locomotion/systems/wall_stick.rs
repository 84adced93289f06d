//! Locomotion domain: collision-triggered wall stick and the smooth snap.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::locomotion::resolver;
use crate::locomotion::{LocomotionTuning, MotionState, Player, Wall, WallSnap};

const SNAP_SKIN: f32 = 2.0;

fn cuboid_half_extents(collider: &Collider) -> Vec2 {
    match collider.shape_scaled().as_cuboid() {
        Some(c) => Vec2::new(c.half_extents.x, c.half_extents.y),
        None => Vec2::new(12.0, 24.0),
    }
}

/// Enter the wall-stick sub-state on a qualifying wall collision. Entry is
/// collision-triggered rather than probe-driven, gated by the re-stick
/// cooldown; the actor is then eased flush to the wall surface over a short
/// duration by `animate_wall_snap`.
pub(crate) fn enter_wall_stick(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionStart>,
    tuning: Res<LocomotionTuning>,
    wall_query: Query<(&Transform, &Collider), With<Wall>>,
    mut player_query: Query<
        (Entity, &Transform, &Collider, &mut MotionState, &mut LinearVelocity),
        With<Player>,
    >,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (player_entity, wall_entity) in pairs {
            let Ok((entity, transform, collider, mut state, mut velocity)) =
                player_query.get_mut(player_entity)
            else {
                continue;
            };
            let Ok((wall_transform, wall_collider)) = wall_query.get(wall_entity) else {
                continue;
            };

            if !resolver::can_enter_wall_stick(&state, &tuning) {
                continue;
            }

            let player_x = transform.translation.x;
            let wall_x = wall_transform.translation.x;
            let hit_on_left = wall_x < player_x;

            // Require the lateral probes to agree, so floor/ceiling corners
            // of wall colliders do not trigger a stick.
            if (hit_on_left && !state.wall_on_left) || (!hit_on_left && !state.wall_on_right) {
                continue;
            }

            debug!("wall hit: sticking (left={hit_on_left})");
            state.is_wall_climbing = true;
            state.velocity.y = 0.0;
            velocity.y = 0.0;

            let wall_half = cuboid_half_extents(wall_collider);
            let player_half = cuboid_half_extents(collider);
            let surface_x = if hit_on_left {
                wall_x + wall_half.x
            } else {
                wall_x - wall_half.x
            };
            let offset = player_half.x + SNAP_SKIN;
            let target_x = if hit_on_left {
                surface_x + offset
            } else {
                surface_x - offset
            };

            commands
                .entity(entity)
                .insert(WallSnap::new(player_x, target_x, tuning.wall_snap_duration));
        }
    }
}

/// Ease the stuck actor flush to the wall on the frame cadence; aborts
/// immediately if the stick ended first.
pub(crate) fn animate_wall_snap(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &mut WallSnap, &MotionState), With<Player>>,
) {
    for (entity, mut transform, mut snap, state) in &mut query {
        if !state.is_wall_climbing {
            commands.entity(entity).remove::<WallSnap>();
            continue;
        }

        snap.elapsed += time.delta_secs();
        if snap.elapsed >= snap.duration {
            transform.translation.x = snap.target_x;
            commands.entity(entity).remove::<WallSnap>();
        } else {
            transform.translation.x =
                resolver::wall_snap_x(snap.start_x, snap.target_x, snap.elapsed, snap.duration);
        }
    }
}
