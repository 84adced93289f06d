//! UI domain: active control-scheme indicator.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::body_mode::{BodyMode, BodyModeChanged};

const HUD_PADDING: f32 = 16.0;

/// Marker for the mode indicator text
#[derive(Component)]
pub struct ModeIndicatorText;

fn mode_label(mode: BodyMode) -> &'static str {
    match mode {
        BodyMode::LowerBody => "LEGS",
        BodyMode::UpperBody => "ARMS",
    }
}

pub(crate) fn spawn_mode_indicator(mut commands: Commands) {
    commands.spawn((
        ModeIndicatorText,
        Text::new(mode_label(BodyMode::default())),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        TextColor(Color::srgb(0.9, 0.9, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(HUD_PADDING),
            top: Val::Px(HUD_PADDING),
            ..default()
        },
    ));
}

pub(crate) fn update_mode_indicator(
    mut changed: MessageReader<BodyModeChanged>,
    mut query: Query<&mut Text, With<ModeIndicatorText>>,
) {
    for message in changed.read() {
        for mut text in &mut query {
            text.0 = mode_label(message.mode).to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_labels_are_distinct() {
        assert_ne!(
            mode_label(BodyMode::LowerBody),
            mode_label(BodyMode::UpperBody)
        );
    }
}
