//! Config domain: optional RON tuning overrides loaded at startup.
//!
//! Missing or malformed files are not fatal; the built-in defaults are
//! already playable, so load failures warn and fall through.

mod data;
mod loader;


pub use data::TuningFile;
pub use loader::{TuningLoadError, load_tuning_file};

use bevy::prelude::*;
use std::path::Path;

use crate::body_mode::BodyModeSettings;
use crate::grapple::GrappleTuning;
use crate::locomotion::LocomotionTuning;

const TUNING_PATH: &str = "assets/data/tuning.ron";

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, apply_tuning);
    }
}

fn apply_tuning(
    mut locomotion: ResMut<LocomotionTuning>,
    mut grapple: ResMut<GrappleTuning>,
    mut body_mode: ResMut<BodyModeSettings>,
) {
    let file = match load_tuning_file(Path::new(TUNING_PATH)) {
        Ok(file) => file,
        Err(e) => {
            warn!("{e}; using default tuning");
            return;
        }
    };

    if let Some(mut tuning) = file.locomotion {
        for fix in tuning.sanitize() {
            warn!("locomotion tuning: {fix}");
        }
        *locomotion = tuning;
    }
    if let Some(mut tuning) = file.grapple {
        for fix in tuning.sanitize() {
            warn!("grapple tuning: {fix}");
        }
        *grapple = tuning;
    }
    if let Some(settings) = file.body_mode {
        *body_mode = settings;
    }
    info!("tuning loaded from {TUNING_PATH}");
}
