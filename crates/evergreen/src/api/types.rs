/// Which arrangement the scene is heading toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeState {
    /// Elements drift through the scatter sphere.
    #[default]
    Scattered,
    /// Elements gather into the cone silhouette.
    Tree,
}

impl TreeState {
    pub fn from_bool(is_tree: bool) -> Self {
        if is_tree {
            TreeState::Tree
        } else {
            TreeState::Scattered
        }
    }

    pub fn is_tree(self) -> bool {
        self == TreeState::Tree
    }

    /// Blend value this state pulls toward (0.0 = scattered, 1.0 = tree).
    pub fn target_value(self) -> f32 {
        match self {
            TreeState::Scattered => 0.0,
            TreeState::Tree => 1.0,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            TreeState::Scattered => TreeState::Tree,
            TreeState::Tree => TreeState::Scattered,
        }
    }
}

/// Timing snapshot shared by every controller within one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTick {
    /// Seconds since the scene started, wrapped to the shared oscillation
    /// period (see `core::time::PHASE_PERIOD`).
    pub elapsed: f32,
    /// Seconds since the previous frame (0.0 on the first frame).
    pub delta: f32,
}

impl FrameTick {
    pub fn new(elapsed: f32, delta: f32) -> Self {
        Self { elapsed, delta }
    }
}
