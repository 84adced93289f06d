//! UI domain: toggleable controls reference panel.

use bevy::prelude::*;

const PANEL_PADDING: f32 = 16.0;

const CONTROLS_TEXT: &str = "\
A/D  move      Space  jump
Shift  dash    Tab  switch body
Mouse  grapple (hold to swing)
W/S  rope length    R  respawn
Enter  restart    H  toggle this panel";

/// Marker for the controls panel root
#[derive(Component)]
pub struct ControlsPanel;

pub(crate) fn spawn_controls_panel(mut commands: Commands) {
    commands
        .spawn((
            ControlsPanel,
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(PANEL_PADDING),
                top: Val::Px(PANEL_PADDING),
                padding: UiRect::all(Val::Px(10.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.75)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(CONTROLS_TEXT),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.85)),
            ));
        });
}

pub(crate) fn toggle_controls_panel(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut query: Query<&mut Visibility, With<ControlsPanel>>,
) {
    if !keyboard.just_pressed(KeyCode::KeyH) {
        return;
    }
    for mut visibility in &mut query {
        *visibility = match *visibility {
            Visibility::Hidden => Visibility::Inherited,
            _ => Visibility::Hidden,
        };
    }
}
