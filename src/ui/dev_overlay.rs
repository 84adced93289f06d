//! UI domain: dev-tools motion state overlay (F1).

use avian2d::prelude::LinearVelocity;
use bevy::prelude::*;

use crate::grapple::{Grapple, GrapplePhase};
use crate::locomotion::{MotionState, Player};

/// Marker for the dev overlay text
#[derive(Component)]
pub struct DevOverlayText;

pub(crate) fn spawn_dev_overlay(mut commands: Commands) {
    commands.spawn((
        DevOverlayText,
        Text::new(String::new()),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.7, 0.9, 0.7)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            bottom: Val::Px(16.0),
            ..default()
        },
        Visibility::Hidden,
    ));
}

pub(crate) fn toggle_dev_overlay(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut query: Query<&mut Visibility, With<DevOverlayText>>,
) {
    if !keyboard.just_pressed(KeyCode::F1) {
        return;
    }
    for mut visibility in &mut query {
        *visibility = match *visibility {
            Visibility::Hidden => Visibility::Inherited,
            _ => Visibility::Hidden,
        };
    }
}

pub(crate) fn update_dev_overlay(
    player: Query<(&Transform, &LinearVelocity, &MotionState, &Grapple), With<Player>>,
    mut query: Query<(&mut Text, &Visibility), With<DevOverlayText>>,
) {
    let Ok((transform, velocity, state, grapple)) = player.single() else {
        return;
    };

    for (mut text, visibility) in &mut query {
        if *visibility == Visibility::Hidden {
            continue;
        }

        let rope = match &grapple.phase {
            GrapplePhase::Idle => "idle".to_string(),
            GrapplePhase::Shooting { .. } => "shooting".to_string(),
            GrapplePhase::Attached(rope) => format!(
                "attached ({} anchors, {:.0} free)",
                rope.anchors().len(),
                rope.available_length()
            ),
        };

        text.0 = format!(
            "pos ({:.0}, {:.0})  vel ({:.0}, {:.0})\n\
             grounded {}  sliding {}  climbing {}  dashing {}\n\
             air jumps {}  dashes {}  rope {}",
            transform.translation.x,
            transform.translation.y,
            velocity.x,
            velocity.y,
            state.is_grounded,
            state.is_sliding_on_wall,
            state.is_wall_climbing,
            state.currently_dashing,
            state.air_jumps_used,
            state.dashes_used,
            rope,
        );
    }
}
