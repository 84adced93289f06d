//! Locomotion domain: ground, ceiling and wall probing.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::input::FrameInput;
use crate::locomotion::resolver;
use crate::locomotion::{GameLayer, LocomotionTuning, MotionState, Player};

fn cuboid_half_extents(collider: &Collider) -> Vec2 {
    match collider.shape_scaled().as_cuboid() {
        Some(c) => Vec2::new(c.half_extents.x, c.half_extents.y),
        None => Vec2::new(12.0, 24.0),
    }
}

/// Cast short rays from the feet and head to classify ground and ceiling
/// contact. A grounded transition resets the airborne bookkeeping inside
/// the resolver.
pub(crate) fn sense_ground(
    spatial_query: SpatialQuery,
    time: Res<Time>,
    tuning: Res<LocomotionTuning>,
    mut query: Query<(&Transform, &Collider, &mut MotionState), With<Player>>,
) {
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);
    let now = time.elapsed_secs();

    for (transform, collider, mut state) in &mut query {
        let half = cuboid_half_extents(collider);
        let center = transform.translation.truncate();

        let feet = center - Vec2::new(0.0, half.y);
        let head = center + Vec2::new(0.0, half.y);

        let hit_ground = spatial_query
            .cast_ray(
                feet,
                Dir2::NEG_Y,
                tuning.ground_check_distance,
                true,
                &ground_filter,
            )
            .is_some();
        let hit_ceiling = spatial_query
            .cast_ray(
                head,
                Dir2::Y,
                tuning.ground_check_distance,
                true,
                &ground_filter,
            )
            .is_some();

        let was_grounded = state.is_grounded;
        resolver::apply_ground_contact(&mut state, hit_ground, hit_ceiling, now);

        if state.is_grounded && !was_grounded {
            debug!("landed: air jumps and dash quota reset");
        } else if !state.is_grounded && was_grounded {
            debug!("left ground at t={now:.3}");
        }
    }
}

/// Fan of three rays per side (top, middle, bottom of the collider) against
/// the wall layer, then derive the wall-slide sub-state from the contact
/// flags and the held direction.
pub(crate) fn sense_walls(
    spatial_query: SpatialQuery,
    input: Res<FrameInput>,
    tuning: Res<LocomotionTuning>,
    mut query: Query<(&Transform, &Collider, &mut MotionState), With<Player>>,
) {
    let wall_filter = SpatialQueryFilter::from_mask(GameLayer::Wall);

    for (transform, collider, mut state) in &mut query {
        let half = cuboid_half_extents(collider);
        let center = transform.translation.truncate();
        let reach = half.x + tuning.wall_check_distance;

        let origins = [
            center + Vec2::new(0.0, half.y - 2.0),
            center,
            center - Vec2::new(0.0, half.y - 2.0),
        ];

        let mut wall_on_left = false;
        let mut wall_on_right = false;
        for origin in origins {
            wall_on_left |= spatial_query
                .cast_ray(origin, Dir2::NEG_X, reach, true, &wall_filter)
                .is_some();
            wall_on_right |= spatial_query
                .cast_ray(origin, Dir2::X, reach, true, &wall_filter)
                .is_some();
        }

        resolver::apply_wall_contact(&mut state, wall_on_left, wall_on_right, &input, &tuning);
    }
}
