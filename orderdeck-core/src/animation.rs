//! Named animation presets consumed by drag and reorder transitions.
//!
//! A preset is a data-only record: duration, easing curve, spring
//! parameters. It is selected once per container instance and never mutated
//! at runtime; the rendering layer decides what to do with it.

use serde::{Deserialize, Serialize};

/// Easing curve family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    EaseOut,
    EaseInOut,
    Spring,
}

/// Immutable timing configuration resolved from a preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    pub duration_ms: u64,
    pub easing: Easing,
    pub stiffness: f64,
    pub damping: f64,
}

/// Which preset a container uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationPreset {
    /// Balanced spring — the default for direct manipulation.
    #[default]
    Smooth,
    /// Fast, stiff response for dense lists.
    Snappy,
    /// Slow ease-out for low-distraction dashboards.
    Gentle,
    /// No transition at all.
    Instant,
}

impl AnimationPreset {
    /// Resolve a preset from its configuration name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "smooth" => Some(AnimationPreset::Smooth),
            "snappy" => Some(AnimationPreset::Snappy),
            "gentle" => Some(AnimationPreset::Gentle),
            "instant" => Some(AnimationPreset::Instant),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AnimationPreset::Smooth => "smooth",
            AnimationPreset::Snappy => "snappy",
            AnimationPreset::Gentle => "gentle",
            AnimationPreset::Instant => "instant",
        }
    }

    /// Look up the timing record for this preset.
    pub fn config(self) -> AnimationConfig {
        match self {
            AnimationPreset::Smooth => AnimationConfig {
                duration_ms: 200,
                easing: Easing::Spring,
                stiffness: 260.0,
                damping: 20.0,
            },
            AnimationPreset::Snappy => AnimationConfig {
                duration_ms: 120,
                easing: Easing::EaseOut,
                stiffness: 420.0,
                damping: 28.0,
            },
            AnimationPreset::Gentle => AnimationConfig {
                duration_ms: 350,
                easing: Easing::EaseInOut,
                stiffness: 140.0,
                damping: 18.0,
            },
            AnimationPreset::Instant => AnimationConfig {
                duration_ms: 0,
                easing: Easing::Linear,
                stiffness: 0.0,
                damping: 0.0,
            },
        }
    }
}
