//! Grapple domain: rope state and the pure swing/wrap math.

use bevy::prelude::*;

/// One fixed rope pivot. `clockwise` records the winding direction at the
/// moment the rope wrapped here; `created_at` (fixed clock) feeds the
/// unwrap flicker guard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RopeAnchor {
    pub position: Vec2,
    pub clockwise: bool,
    pub created_at: f32,
}

/// An attached rope: an ordered pivot list plus the total slack length.
///
/// The anchor list is never empty: construction requires the first anchor
/// and unwrapping refuses to remove the root, so the "active rope with no
/// pivot" state cannot be represented.
#[derive(Debug, Clone)]
pub struct Rope {
    anchors: Vec<RopeAnchor>,
    total_length: f32,
}

impl Rope {
    pub fn new(anchor: Vec2, initial_length: f32, min_length: f32, now: f32) -> Self {
        Self {
            anchors: vec![RopeAnchor {
                position: anchor,
                clockwise: false,
                created_at: now,
            }],
            total_length: initial_length.max(min_length),
        }
    }

    pub fn anchors(&self) -> &[RopeAnchor] {
        &self.anchors
    }

    pub fn total_length(&self) -> f32 {
        self.total_length
    }

    /// The current swing pivot.
    pub fn last_anchor(&self) -> RopeAnchor {
        *self
            .anchors
            .last()
            .unwrap_or_else(|| unreachable!("rope anchor list is non-empty by construction"))
    }

    pub fn push_anchor(&mut self, position: Vec2, clockwise: bool, now: f32) {
        self.anchors.push(RopeAnchor {
            position,
            clockwise,
            created_at: now,
        });
    }

    /// Remove the current pivot, unless it is the root anchor.
    pub fn pop_anchor(&mut self) -> bool {
        if self.anchors.len() > 1 {
            self.anchors.pop();
            true
        } else {
            false
        }
    }

    /// Combined length of the wrapped (fixed) segments between anchors.
    pub fn wrapped_length(&self) -> f32 {
        self.anchors
            .windows(2)
            .map(|pair| pair[0].position.distance(pair[1].position))
            .sum()
    }

    /// Rope length free to swing from the current pivot.
    pub fn available_length(&self) -> f32 {
        self.total_length - self.wrapped_length()
    }

    pub fn adjust_length(&mut self, delta: f32, min_length: f32, max_length: f32) {
        self.total_length = (self.total_length + delta).clamp(min_length, max_length);
    }
}

/// Grapple phase machine. `Attached` carries its rope, so an attached
/// grapple without rope state cannot exist.
#[derive(Debug, Clone, Default)]
pub enum GrapplePhase {
    #[default]
    Idle,
    /// Hook tip traveling toward the hit point before attaching.
    Shooting { target: Vec2, tip: Vec2 },
    Attached(Rope),
}

#[derive(Component, Debug, Default)]
pub struct Grapple {
    pub phase: GrapplePhase,
}

impl Grapple {
    pub fn is_attached(&self) -> bool {
        matches!(self.phase, GrapplePhase::Attached(_))
    }

    /// Drop the rope whole and return to idle.
    pub fn release(&mut self) {
        self.phase = GrapplePhase::Idle;
    }
}

/// Winding direction of `next_segment` relative to `prev_segment`:
/// clockwise iff the cross product is negative.
pub fn winding_clockwise(prev_segment: Vec2, next_segment: Vec2) -> bool {
    prev_segment.perp_dot(next_segment) < 0.0
}

/// Whether the current pivot should unwrap: the swing direction of the
/// actor relative to the pivot's segment has flipped sign against the
/// direction recorded when the wrap was created. Anchors younger than
/// `min_lifetime` are always retained (flicker guard), so a wrap created
/// this tick cannot oscillate straight back off.
pub fn should_unwrap(
    actor: Vec2,
    last: RopeAnchor,
    previous: Vec2,
    now: f32,
    min_lifetime: f32,
) -> bool {
    if now - last.created_at < min_lifetime {
        return false;
    }
    let segment = last.position - previous;
    let actor_vector = actor - last.position;
    winding_clockwise(segment, actor_vector) != last.clockwise
}

/// Spring-damper rope tension. Zero while the rope is slack; otherwise a
/// Hooke pull toward the pivot proportional to the stretch, minus damping
/// of the velocity component along the rope.
pub fn tension_force(
    actor: Vec2,
    pivot: Vec2,
    velocity: Vec2,
    available_length: f32,
    swing_force: f32,
    damper: f32,
) -> Vec2 {
    let offset = pivot - actor;
    let distance = offset.length();
    if distance <= available_length || distance <= f32::EPSILON {
        return Vec2::ZERO;
    }

    let direction = offset / distance;
    let stretch = distance - available_length;
    let spring = stretch * swing_force;
    let damping = velocity.dot(direction) * damper;
    direction * (spring - damping)
}
