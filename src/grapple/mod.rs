//! Grapple domain: the upper-body swinging-rope solver.
//!
//! Fixed-tick chain while upper-body control is live: consume a fire
//! command, advance the hook, adjust length, wrap, unwrap, apply tension,
//! consume a release command. Aim sampling and rope rendering run on the
//! frame cadence.

mod components;
mod resources;
mod systems;


pub use components::{
    Grapple, GrapplePhase, Rope, RopeAnchor, should_unwrap, tension_force, winding_clockwise,
};
pub use resources::{GrappleTuning, RopeLengthRule};
pub use systems::GrappleCommand;

use bevy::prelude::*;

use crate::body_mode::BodyMode;
use crate::grapple::systems::{
    adjust_rope_length, advance_hook, apply_rope_tension, draw_rope, fire_grapple, release_grapple,
    sample_aim, update_unwrap, update_wrap,
};

pub struct GrapplePlugin;

impl Plugin for GrapplePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GrappleTuning>()
            .init_resource::<GrappleCommand>()
            .add_systems(PreUpdate, sample_aim.run_if(in_state(BodyMode::UpperBody)))
            .add_systems(Update, draw_rope)
            .add_systems(
                FixedUpdate,
                (
                    fire_grapple,
                    advance_hook,
                    adjust_rope_length,
                    update_wrap,
                    update_unwrap,
                    apply_rope_tension,
                    release_grapple,
                )
                    .chain()
                    .run_if(in_state(BodyMode::UpperBody)),
            );
    }
}
