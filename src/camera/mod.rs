//! Camera domain: target selection and smoothed follow.
//!
//! The follow target is normally the player; an override target (set by
//! stage triggers such as vista zones) takes priority until cleared. Mode
//! switches re-log the active target so traces show which scheme the
//! camera was framing.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::body_mode::BodyModeChanged;
use crate::locomotion::Player;

#[derive(Component)]
pub struct MainCamera;

/// Current camera target policy. An override outranks the player.
#[derive(Resource, Debug, Default)]
pub struct CameraTarget {
    override_point: Option<Vec2>,
}

impl CameraTarget {
    /// Pin the camera to a fixed point until cleared.
    pub fn set_custom_target(&mut self, point: Vec2) {
        self.override_point = Some(point);
    }

    /// Return control to player-follow.
    pub fn clear_custom_target(&mut self) {
        self.override_point = None;
    }

    pub fn override_point(&self) -> Option<Vec2> {
        self.override_point
    }
}

/// Follow smoothing factor per second. Higher snaps harder.
const FOLLOW_RATE: f32 = 6.0;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraTarget>()
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, (follow_target, log_mode_target));
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
}

/// Exponential smoothing toward the active target point.
fn follow_target(
    time: Res<Time>,
    target: Res<CameraTarget>,
    player: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut camera: Query<&mut Transform, With<MainCamera>>,
) {
    let goal = match target.override_point() {
        Some(point) => point,
        None => match player.single() {
            Ok(transform) => transform.translation.truncate(),
            Err(_) => return,
        },
    };

    let alpha = 1.0 - (-FOLLOW_RATE * time.delta_secs()).exp();
    for mut transform in &mut camera {
        let current = transform.translation.truncate();
        let next = current.lerp(goal, alpha);
        transform.translation.x = next.x;
        transform.translation.y = next.y;
    }
}

fn log_mode_target(mut changed: MessageReader<BodyModeChanged>, target: Res<CameraTarget>) {
    for message in changed.read() {
        match target.override_point() {
            Some(point) => debug!("mode {:?}, camera pinned at {point:?}", message.mode),
            None => debug!("mode {:?}, camera following player", message.mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_outranks_player_follow() {
        let mut target = CameraTarget::default();
        assert!(target.override_point().is_none());

        target.set_custom_target(Vec2::new(100.0, 50.0));
        assert_eq!(target.override_point(), Some(Vec2::new(100.0, 50.0)));

        target.clear_custom_target();
        assert!(target.override_point().is_none());
    }
}
