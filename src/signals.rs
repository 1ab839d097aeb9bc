use nalgebra_glm as glm;

/// Clamp bounds for the pinch-driven radius scale.
pub const SCALE_MIN: f32 = 0.6;
pub const SCALE_MAX: f32 = 2.2;

/// Field rotation increment per frame, radians. Two discrete levels:
/// base drift with at most one tracked hand, boosted with two.
pub const SPIN_BASE: f32 = 0.005;
pub const SPIN_BOOSTED: f32 = 0.02;

/// Animation inputs derived from hand tracking. Produced by the landmark
/// interpreter on the feed thread, consumed by the frame driver once per
/// rendered frame. Crosses threads only as an owned channel message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSignals {
    /// Rigid X/Y translation of the whole field, world units.
    pub hand_offset: glm::Vec2,
    /// Radius dilation from the pinch distance, within [SCALE_MIN, SCALE_MAX].
    pub scale: f32,
    /// Current spin level, SPIN_BASE or SPIN_BOOSTED.
    pub spin_boost: f32,
}

impl Default for ControlSignals {
    fn default() -> Self {
        Self {
            hand_offset: glm::vec2(0.0, 0.0),
            scale: 1.0,
            spin_boost: SPIN_BASE,
        }
    }
}
