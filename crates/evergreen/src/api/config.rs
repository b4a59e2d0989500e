use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::geometry::Dimensions;

/// Scene configuration. Every field is optional in JSON and falls back to
/// the default below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of foliage particles (default: 4500).
    pub foliage_count: usize,
    /// Number of sphere ornaments (default: 250).
    pub sphere_count: usize,
    /// Number of box ornaments (default: 100).
    pub box_count: usize,
    /// Height of the tree cone, centered on y = 0 (default: 12).
    pub tree_height: f32,
    /// Radius of the tree cone at its base (default: 5).
    pub tree_base_radius: f32,
    /// Radius of the scatter sphere (default: 25).
    pub scatter_radius: f32,
    /// Rate of the exponential blend toward the target, per second (default: 2.5).
    pub animation_speed: f32,
    /// Probability that an ornament is painted gold rather than the accent color (default: 0.4).
    pub gold_probability: f32,
    /// Largest frame delta the clock will pass on, in seconds (default: 0.25).
    pub max_frame_delta: f32,
    /// Seed for procedural generation (default: 42).
    pub seed: u64,
    /// Start fully formed as a tree instead of scattered.
    pub start_as_tree: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            foliage_count: 4500,
            sphere_count: 250,
            box_count: 100,
            tree_height: 12.0,
            tree_base_radius: 5.0,
            scatter_radius: 25.0,
            animation_speed: 2.5,
            gold_probability: 0.4,
            max_frame_delta: 0.25,
            seed: 42,
            start_as_tree: false,
        }
    }
}

impl SceneConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Clamp every numeric field into a usable range.
    /// Negative or non-finite sizes collapse to 0 so generators emit
    /// coincident points instead of NaN.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.tree_height = non_negative("tree_height", self.tree_height);
        self.tree_base_radius = non_negative("tree_base_radius", self.tree_base_radius);
        self.scatter_radius = non_negative("scatter_radius", self.scatter_radius);
        self.animation_speed = non_negative("animation_speed", self.animation_speed);

        if !self.gold_probability.is_finite() {
            log::warn!(
                "config: gold_probability is not finite, using {}",
                defaults.gold_probability
            );
            self.gold_probability = defaults.gold_probability;
        } else if !(0.0..=1.0).contains(&self.gold_probability) {
            log::warn!("config: gold_probability {} clamped to [0, 1]", self.gold_probability);
            self.gold_probability = self.gold_probability.clamp(0.0, 1.0);
        }

        if !self.max_frame_delta.is_finite() || self.max_frame_delta <= 0.0 {
            log::warn!(
                "config: max_frame_delta {} invalid, using {}",
                self.max_frame_delta,
                defaults.max_frame_delta
            );
            self.max_frame_delta = defaults.max_frame_delta;
        }
        self
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            tree_height: self.tree_height,
            tree_base_radius: self.tree_base_radius,
            scatter_radius: self.scatter_radius,
        }
    }

    /// Apex of the tree cone, where a topper ornament sits.
    pub fn tree_top(&self) -> Vec3 {
        Vec3::new(0.0, self.tree_height / 2.0, 0.0)
    }
}

fn non_negative(name: &str, value: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("config: {} = {} clamped to 0", name, value);
        0.0
    }
}
