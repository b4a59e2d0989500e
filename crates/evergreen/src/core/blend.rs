use crate::api::types::TreeState;
use crate::extensions::easing::lerp;

/// Progress from scattered (0.0) to tree (1.0), carried across frames.
///
/// Each advance moves the factor a fraction `speed * dt` of the remaining
/// distance toward the target, which approximates an exponential decay with
/// rate `speed`. Flipping the target mid-flight just reverses the approach
/// from wherever the factor currently is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendState {
    factor: f32,
}

impl BlendState {
    pub fn new() -> Self {
        Self { factor: 0.0 }
    }

    /// Start already converged on `state`.
    pub fn settled(state: TreeState) -> Self {
        Self {
            factor: state.target_value(),
        }
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Move toward `target` and return the new factor.
    pub fn advance(&mut self, target: TreeState, speed: f32, dt: f32) -> f32 {
        let goal = target.target_value();
        let k = speed * dt;
        let k = if k.is_nan() { 0.0 } else { k.clamp(0.0, 1.0) };

        let next = if k >= 1.0 { goal } else { lerp(self.factor, goal, k) };
        if next.is_finite() {
            self.factor = next.clamp(0.0, 1.0);
        }
        self.factor
    }

    /// True once the factor sits exactly on the target value.
    pub fn is_settled(&self, target: TreeState) -> bool {
        self.factor == target.target_value()
    }
}

impl Default for BlendState {
    fn default() -> Self {
        Self::new()
    }
}
