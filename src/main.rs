mod body_mode;
mod camera;
mod config;
mod grapple;
mod input;
mod locomotion;
mod stage;
mod ui;

use avian2d::prelude::*;
use bevy::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Severed".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .insert_resource(Gravity(Vec2::new(0.0, -1800.0)))
        .add_plugins((
            config::ConfigPlugin,
            input::InputPlugin,
            locomotion::LocomotionPlugin,
            grapple::GrapplePlugin,
            body_mode::BodyModePlugin,
            stage::StagePlugin,
            camera::CameraPlugin,
            ui::UiPlugin,
        ))
        .run();
}
