//! Grapple domain: fire/attach flow, wrap geometry, tension physics.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::camera::MainCamera;
use crate::grapple::components::{
    Grapple, GrapplePhase, Rope, should_unwrap, tension_force, winding_clockwise,
};
use crate::grapple::resources::GrappleTuning;
use crate::input::FrameInput;
use crate::locomotion::{GameLayer, Player};

/// Frame-captured grapple commands, latched until the fixed tick consumes
/// them (same contract as the jump/dash latches).
#[derive(Resource, Debug, Default)]
pub struct GrappleCommand {
    pub fire_at: Option<Vec2>,
    pub release: bool,
}

impl GrappleCommand {
    /// Drop any un-consumed commands. Called on mode transitions so a
    /// click latched just before a switch cannot fire at a stale point
    /// on the next activation.
    pub fn clear(&mut self) {
        self.fire_at = None;
        self.release = false;
    }
}

/// A wrap anchor is only created when the obstruction is meaningfully far
/// from the current pivot, so the cast does not re-detect the pivot corner.
const WRAP_MIN_SEPARATION: f32 = 5.0;

/// Sample mouse fire/release on the frame cadence into the command latch.
pub(crate) fn sample_aim(
    mouse: Res<ButtonInput<MouseButton>>,
    window: Query<&Window, With<PrimaryWindow>>,
    camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut command: ResMut<GrappleCommand>,
) {
    if mouse.just_released(MouseButton::Left) {
        command.release = true;
    }
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok(window) = window.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    if let Ok(world_point) = camera.viewport_to_world_2d(camera_transform, cursor) {
        command.fire_at = Some(world_point);
    }
}

/// Consume a fire command: ray toward the aim point; a hit starts the hook
/// travel phase. A miss is not an error, the grapple simply stays idle.
pub(crate) fn fire_grapple(
    spatial_query: SpatialQuery,
    tuning: Res<GrappleTuning>,
    mut command: ResMut<GrappleCommand>,
    mut query: Query<(&Transform, &mut Grapple), With<Player>>,
) {
    let Some(aim) = command.fire_at.take() else {
        return;
    };
    let filter = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);

    for (transform, mut grapple) in &mut query {
        if !matches!(grapple.phase, GrapplePhase::Idle) {
            continue;
        }

        let origin = transform.translation.truncate();
        let Ok(direction) = Dir2::new(aim - origin) else {
            continue;
        };

        match spatial_query.cast_ray(origin, direction, tuning.max_rope_distance, true, &filter) {
            Some(hit) => {
                let target = origin + *direction * hit.distance;
                grapple.phase = GrapplePhase::Shooting {
                    target,
                    tip: origin,
                };
                debug!("grapple fired toward {target:?}");
            }
            None => debug!("grapple missed"),
        }
    }
}

/// Advance the hook tip toward its target; on arrival, attach with the
/// rope constructed atomically around its first anchor.
pub(crate) fn advance_hook(
    time: Res<Time>,
    tuning: Res<GrappleTuning>,
    mut query: Query<(&Transform, &mut Grapple), With<Player>>,
) {
    let now = time.elapsed_secs();
    let step = tuning.hook_travel_speed * time.delta_secs();

    for (transform, mut grapple) in &mut query {
        let GrapplePhase::Shooting { target, tip } = grapple.phase else {
            continue;
        };

        let new_tip = tip.move_towards(target, step);
        if new_tip.distance_squared(target) < 1.0 {
            let origin = transform.translation.truncate();
            let length = tuning.initial_length(origin, target);
            grapple.phase = GrapplePhase::Attached(Rope::new(
                target,
                length,
                tuning.min_rope_length,
                now,
            ));
            debug!("grapple attached, rope length {length:.1}");
        } else {
            grapple.phase = GrapplePhase::Shooting {
                target,
                tip: new_tip,
            };
        }
    }
}

/// Retract or extend the rope from vertical input, clamped to the legal
/// range.
pub(crate) fn adjust_rope_length(
    time: Res<Time>,
    input: Res<FrameInput>,
    tuning: Res<GrappleTuning>,
    mut query: Query<&mut Grapple, With<Player>>,
) {
    if input.move_axis.y == 0.0 {
        return;
    }
    // Pulling down shortens the rope, pushing up pays it out.
    let delta = input.move_axis.y * tuning.climb_speed * time.delta_secs();

    for mut grapple in &mut query {
        if let GrapplePhase::Attached(rope) = &mut grapple.phase {
            rope.adjust_length(delta, tuning.min_rope_length, tuning.max_rope_distance);
        }
    }
}

/// Wrap check: if the line from the actor to the current pivot is blocked,
/// pivot the rope on the obstruction, recording the winding direction at
/// creation. A cast that finds nothing is simply "no wrap this tick".
pub(crate) fn update_wrap(
    spatial_query: SpatialQuery,
    time: Res<Time>,
    tuning: Res<GrappleTuning>,
    mut query: Query<(&Transform, &mut Grapple), With<Player>>,
) {
    let now = time.elapsed_secs();
    let filter = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);

    for (transform, mut grapple) in &mut query {
        let GrapplePhase::Attached(rope) = &mut grapple.phase else {
            continue;
        };

        let actor = transform.translation.truncate();
        let pivot = rope.last_anchor().position;
        let offset = pivot - actor;
        let distance = offset.length();
        let Ok(direction) = Dir2::new(offset) else {
            continue;
        };

        // Stop the cast just short of the pivot itself.
        let reach = distance - WRAP_MIN_SEPARATION;
        if reach <= 0.0 {
            continue;
        }

        let Some(hit) = spatial_query.cast_ray(actor, direction, reach, true, &filter) else {
            continue;
        };
        let hit_point = actor + *direction * hit.distance;
        if hit_point.distance(pivot) <= WRAP_MIN_SEPARATION {
            continue;
        }

        let new_anchor = hit_point + hit.normal * tuning.wrap_offset;
        let anchors = rope.anchors();
        let prev_segment = if anchors.len() > 1 {
            pivot - anchors[anchors.len() - 2].position
        } else {
            pivot - actor
        };
        let clockwise = winding_clockwise(prev_segment, new_anchor - pivot);

        rope.push_anchor(new_anchor, clockwise, now);
        debug!("rope wrapped at {new_anchor:?} (cw={clockwise})");
    }
}

/// Unwrap check: remove the current pivot when the swing direction has
/// flipped against the sign recorded at creation, guarded by the minimum
/// anchor lifetime to prevent wrap/unwrap oscillation.
pub(crate) fn update_unwrap(
    time: Res<Time>,
    tuning: Res<GrappleTuning>,
    mut query: Query<(&Transform, &mut Grapple), With<Player>>,
) {
    let now = time.elapsed_secs();

    for (transform, mut grapple) in &mut query {
        let GrapplePhase::Attached(rope) = &mut grapple.phase else {
            continue;
        };
        let anchors = rope.anchors();
        if anchors.len() <= 1 {
            continue;
        }

        let actor = transform.translation.truncate();
        let last = rope.last_anchor();
        let previous = anchors[anchors.len() - 2].position;

        if should_unwrap(actor, last, previous, now, tuning.min_anchor_lifetime)
            && rope.pop_anchor()
        {
            debug!("rope unwrapped");
        }
    }
}

/// Spring-damper tension toward the current pivot while the rope is taut,
/// integrated into the body's velocity as a force.
pub(crate) fn apply_rope_tension(
    time: Res<Time>,
    tuning: Res<GrappleTuning>,
    mut query: Query<(&Transform, &Grapple, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();

    for (transform, grapple, mut velocity) in &mut query {
        let GrapplePhase::Attached(rope) = &grapple.phase else {
            continue;
        };

        let actor = transform.translation.truncate();
        let force = tension_force(
            actor,
            rope.last_anchor().position,
            velocity.0,
            rope.available_length(),
            tuning.swing_force,
            tuning.damper,
        );
        velocity.0 += force * dt;
    }
}

/// Consume a release command: drop all anchors at once and return to idle.
pub(crate) fn release_grapple(
    mut command: ResMut<GrappleCommand>,
    mut query: Query<&mut Grapple, With<Player>>,
) {
    if !command.release {
        return;
    }
    command.release = false;

    for mut grapple in &mut query {
        if !matches!(grapple.phase, GrapplePhase::Idle) {
            grapple.release();
            debug!("grapple released");
        }
    }
}

/// Draw the rope polyline (anchors in order, then the actor) or the
/// traveling hook. Purely cosmetic, frame cadence.
pub(crate) fn draw_rope(mut gizmos: Gizmos, query: Query<(&Transform, &Grapple), With<Player>>) {
    let rope_color = Color::srgb(0.85, 0.7, 0.4);

    for (transform, grapple) in &query {
        let actor = transform.translation.truncate();
        match &grapple.phase {
            GrapplePhase::Idle => {}
            GrapplePhase::Shooting { tip, .. } => {
                gizmos.line_2d(actor, *tip, rope_color);
            }
            GrapplePhase::Attached(rope) => {
                let anchors = rope.anchors();
                for pair in anchors.windows(2) {
                    gizmos.line_2d(pair[0].position, pair[1].position, rope_color);
                }
                gizmos.line_2d(rope.last_anchor().position, actor, rope_color);
            }
        }
    }
}
