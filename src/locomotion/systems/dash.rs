//! Locomotion domain: dash start and the timed velocity override.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::input::InputLatches;
use crate::locomotion::resolver;
use crate::locomotion::{LocomotionTuning, MotionState, Player};

pub(crate) fn resolve_dash_intent(
    tuning: Res<LocomotionTuning>,
    mut latches: ResMut<InputLatches>,
    mut query: Query<&mut MotionState, With<Player>>,
) {
    for mut state in &mut query {
        if resolver::resolve_dash(&mut state, &mut latches, &tuning) {
            debug!(
                "dash started: dir={}, dashes_used={}",
                state.dash_direction, state.dashes_used
            );
        }
    }
}

/// While a dash is active this system owns the rigid-body velocity,
/// bypassing the resolver's commit. On expiry the horizontal velocity is
/// damped to the momentum fraction.
pub(crate) fn drive_dash(
    time: Res<Time>,
    tuning: Res<LocomotionTuning>,
    mut query: Query<(&mut MotionState, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();
    for (mut state, mut velocity) in &mut query {
        if !state.currently_dashing {
            continue;
        }

        velocity.0 = Vec2::new(state.dash_direction * tuning.dash_speed, 0.0);

        state.dash_timer -= dt;
        if state.dash_timer <= 0.0 {
            state.currently_dashing = false;
            let damped = Vec2::new(velocity.x * tuning.dash_momentum, velocity.y);
            velocity.0 = damped;
            state.velocity = damped;
            debug!("dash finished");
        }
    }
}
