//! Locomotion domain: system modules for the fixed-tick resolver chain.

pub(crate) mod dash;
pub(crate) mod locomotion;
pub(crate) mod sensors;
pub(crate) mod wall_stick;

pub(crate) use dash::{drive_dash, resolve_dash_intent};
pub(crate) use locomotion::{
    commit_velocity, drive_motion, flip_sprite, ingest_latches, resolve_jump_intent,
    spawn_player, tick_fixed_timers, tick_frame_cooldowns,
};
pub(crate) use sensors::{sense_ground, sense_walls};
pub(crate) use wall_stick::{animate_wall_snap, enter_wall_stick};
