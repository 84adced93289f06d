//! Body-mode domain: the two-state control-scheme coordinator.
//!
//! Exactly one of the lower-body locomotion resolver and the upper-body
//! grapple solver is live at a time; the other's systems are gated off via
//! the state. Transitions hand the gravity regime between the resolver
//! (manual shaping) and the physics engine (rope swinging).


use avian2d::prelude::*;
use bevy::ecs::message::{Message, MessageWriter};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::grapple::{Grapple, GrappleCommand};
use crate::locomotion::{MotionState, Player};

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Copy, Default)]
pub enum BodyMode {
    #[default]
    LowerBody,
    UpperBody,
}

impl BodyMode {
    pub fn toggled(self) -> Self {
        match self {
            BodyMode::LowerBody => BodyMode::UpperBody,
            BodyMode::UpperBody => BodyMode::LowerBody,
        }
    }
}

/// Notification fired on every mode transition, consumed by camera
/// targeting and UI.
#[derive(Debug, Clone, Copy)]
pub struct BodyModeChanged {
    pub mode: BodyMode,
}

impl Message for BodyModeChanged {}

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyModeSettings {
    /// Start in upper-body (grapple) mode instead of lower-body.
    pub initial_upper_body: bool,
}

pub struct BodyModePlugin;

impl Plugin for BodyModePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<BodyMode>()
            .init_resource::<BodyModeSettings>()
            .add_message::<BodyModeChanged>()
            .add_systems(PostStartup, apply_initial_mode)
            .add_systems(Update, switch_body_mode)
            .add_systems(OnEnter(BodyMode::LowerBody), enter_lower_body)
            .add_systems(OnEnter(BodyMode::UpperBody), enter_upper_body);
    }
}

/// Apply the configured initial mode once, after tuning has loaded. This
/// is initialization, not a switch, so no notification is fired.
fn apply_initial_mode(settings: Res<BodyModeSettings>, mut next: ResMut<NextState<BodyMode>>) {
    if settings.initial_upper_body {
        next.set(BodyMode::UpperBody);
    }
}

/// Edge-triggered toggle between the two control schemes.
fn switch_body_mode(
    keyboard: Res<ButtonInput<KeyCode>>,
    current: Res<State<BodyMode>>,
    mut next: ResMut<NextState<BodyMode>>,
    mut changed: MessageWriter<BodyModeChanged>,
) {
    if !keyboard.just_pressed(KeyCode::Tab) {
        return;
    }

    let mode = current.get().toggled();
    next.set(mode);
    changed.write(BodyModeChanged { mode });
    info!("body mode switched to {mode:?}");
}

/// Returning to lower-body control: drop the rope, restore manual gravity
/// and sync the resolver's working velocity from the body so impulses
/// accrued while swinging are not discarded.
fn enter_lower_body(
    mut command: ResMut<GrappleCommand>,
    mut query: Query<
        (&mut MotionState, &mut Grapple, &mut GravityScale, &LinearVelocity),
        With<Player>,
    >,
) {
    command.clear();
    for (mut state, mut grapple, mut gravity, velocity) in &mut query {
        grapple.release();
        gravity.0 = 0.0;
        state.velocity = velocity.0;
    }
}

/// Entering upper-body control: the physics engine owns gravity while the
/// rope applies forces; any rope left over from a previous activation is
/// dropped.
fn enter_upper_body(
    mut command: ResMut<GrappleCommand>,
    mut query: Query<(&mut Grapple, &mut GravityScale), With<Player>>,
) {
    command.clear();
    for (mut grapple, mut gravity) in &mut query {
        gravity.0 = 1.0;
        grapple.release();
    }
}
