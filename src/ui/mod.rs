//! UI domain: mode indicator, controls panel, and completion banner.

mod banner;
mod hud_controls;
mod hud_mode;

#[cfg(feature = "dev-tools")]
mod dev_overlay;

pub use banner::CompletionBanner;

use bevy::prelude::*;

use crate::ui::banner::show_completion_banner;
use crate::ui::hud_controls::{spawn_controls_panel, toggle_controls_panel};
use crate::ui::hud_mode::{spawn_mode_indicator, update_mode_indicator};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_mode_indicator, spawn_controls_panel))
            .add_systems(
                Update,
                (
                    update_mode_indicator,
                    toggle_controls_panel,
                    show_completion_banner,
                ),
            );

        #[cfg(feature = "dev-tools")]
        {
            use crate::ui::dev_overlay::{
                spawn_dev_overlay, toggle_dev_overlay, update_dev_overlay,
            };
            app.add_systems(Startup, spawn_dev_overlay).add_systems(
                Update,
                (toggle_dev_overlay, update_dev_overlay),
            );
        }
    }
}
