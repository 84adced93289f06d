//! Grapple domain: tuning resource and the length-derivation strategy.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// How the initial rope length is derived from the hook hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum RopeLengthRule {
    /// Straight-line distance from the actor to the hit point.
    #[default]
    LineDistance,
    /// Vertical component of the hit vector minus a fixed offset.
    VerticalProjection { offset: f32 },
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrappleTuning {
    /// Rope retract/extend speed from vertical input.
    pub climb_speed: f32,
    /// Spring constant pulling the actor toward the pivot when stretched.
    pub swing_force: f32,
    /// Damping of the velocity component along the rope.
    pub damper: f32,
    /// Offset along the surface normal for wrap anchors, so the rope does
    /// not re-intersect the corner it wrapped on.
    pub wrap_offset: f32,
    pub min_rope_length: f32,
    pub max_rope_distance: f32,
    /// Hook tip travel speed during the shooting phase.
    pub hook_travel_speed: f32,
    /// Minimum age before a wrap anchor may unwrap (flicker guard).
    pub min_anchor_lifetime: f32,
    pub length_rule: RopeLengthRule,
}

impl Default for GrappleTuning {
    fn default() -> Self {
        Self {
            climb_speed: 150.0,
            swing_force: 35.0,
            damper: 8.0,
            wrap_offset: 3.0,
            min_rope_length: 20.0,
            max_rope_distance: 600.0,
            hook_travel_speed: 1600.0,
            min_anchor_lifetime: 0.1,
            length_rule: RopeLengthRule::LineDistance,
        }
    }
}

impl GrappleTuning {
    /// Initial rope length for a hook that hit `hit_point`, per the
    /// configured rule, clamped to the legal range.
    pub fn initial_length(&self, actor: Vec2, hit_point: Vec2) -> f32 {
        let raw = match self.length_rule {
            RopeLengthRule::LineDistance => actor.distance(hit_point),
            RopeLengthRule::VerticalProjection { offset } => {
                (hit_point.y - actor.y).abs() - offset
            }
        };
        raw.clamp(self.min_rope_length, self.max_rope_distance)
    }

    /// Clamp out values the solver cannot run with. Returns a description
    /// of every adjustment made.
    pub fn sanitize(&mut self) -> Vec<String> {
        let mut fixes = Vec::new();
        if self.min_rope_length <= 0.0 {
            self.min_rope_length = 1.0;
            fixes.push("min_rope_length <= 0, clamped to 1".to_string());
        }
        if self.max_rope_distance < self.min_rope_length {
            self.max_rope_distance = self.min_rope_length;
            fixes.push("max_rope_distance < min_rope_length, clamped".to_string());
        }
        if self.hook_travel_speed <= 0.0 {
            self.hook_travel_speed = 1600.0;
            fixes.push("hook_travel_speed <= 0, reset to default".to_string());
        }
        fixes
    }
}
