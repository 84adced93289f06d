//! Config domain: the on-disk tuning file shape.

use serde::{Deserialize, Serialize};

use crate::body_mode::BodyModeSettings;
use crate::grapple::GrappleTuning;
use crate::locomotion::LocomotionTuning;

/// Top-level layout of assets/data/tuning.ron. Every section is optional;
/// a missing section keeps the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningFile {
    pub locomotion: Option<LocomotionTuning>,
    pub grapple: Option<GrappleTuning>,
    pub body_mode: Option<BodyModeSettings>,
}
