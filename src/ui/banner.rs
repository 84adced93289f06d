//! UI domain: level completion banner.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::stage::LevelCompleted;

/// Marker for the completion banner
#[derive(Component)]
pub struct CompletionBanner;

pub(crate) fn show_completion_banner(
    mut commands: Commands,
    mut completed: MessageReader<LevelCompleted>,
    existing: Query<(), With<CompletionBanner>>,
) {
    if completed.read().next().is_none() || !existing.is_empty() {
        return;
    }

    commands
        .spawn((
            CompletionBanner,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                top: Val::Percent(35.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        padding: UiRect::all(Val::Px(20.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.85)),
                ))
                .with_children(|parent| {
                    parent.spawn((
                        Text::new("LEVEL COMPLETE"),
                        TextFont {
                            font_size: 48.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.9, 0.8, 0.3)),
                    ));
                });
        });
}
