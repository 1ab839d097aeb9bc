use nalgebra_glm as glm;

use crate::pose::Landmark;
use crate::signals::{self, ControlSignals};

/// MediaPipe-style landmark indices on a 21-point hand.
const INDEX_TIP: usize = 8;
const THUMB_TIP: usize = 4;

/// Folds tracker results into control signals, one result at a time.
/// Holds the latest signals so a lost detection keeps the field at its
/// last known pose instead of snapping back to the defaults.
pub struct LandmarkInterpreter {
    signals: ControlSignals,
}

impl LandmarkInterpreter {
    pub fn new() -> Self {
        Self {
            signals: ControlSignals::default(),
        }
    }

    /// Interprets one tracker result. Offset and scale come from the
    /// first hand's index fingertip and thumb tip in normalized image
    /// coordinates; the spin level only looks at the hand count. An empty
    /// result (or a hand too short to carry both tips) leaves offset and
    /// scale untouched.
    pub fn interpret(&mut self, hands: &[Vec<Landmark>]) -> ControlSignals {
        if let Some(first) = hands.first() {
            if let (Some(index_tip), Some(thumb_tip)) =
                (first.get(INDEX_TIP), first.get(THUMB_TIP))
            {
                self.signals.hand_offset = glm::vec2(
                    (index_tip.x - 0.5) * 30.0,
                    -(index_tip.y - 0.5) * 25.0, // image Y grows downward
                );
                let pinch = glm::distance(
                    &glm::vec2(index_tip.x, index_tip.y),
                    &glm::vec2(thumb_tip.x, thumb_tip.y),
                );
                self.signals.scale = (pinch * 5.0).clamp(signals::SCALE_MIN, signals::SCALE_MAX);
            }
        }
        self.signals.spin_boost = if hands.len() == 2 {
            signals::SPIN_BOOSTED
        } else {
            signals::SPIN_BASE
        };
        self.signals
    }
}

impl Default for LandmarkInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lm(x: f32, y: f32) -> Landmark {
        Landmark { x, y, z: 0.0 }
    }

    fn hand(index_tip: (f32, f32), thumb_tip: (f32, f32)) -> Vec<Landmark> {
        let mut landmarks = vec![lm(0.0, 0.0); 21];
        landmarks[THUMB_TIP] = lm(thumb_tip.0, thumb_tip.1);
        landmarks[INDEX_TIP] = lm(index_tip.0, index_tip.1);
        landmarks
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn centered_pinch_maps_to_origin_and_minimum_scale() {
        let mut interpreter = LandmarkInterpreter::new();
        let signals = interpreter.interpret(&[hand((0.5, 0.5), (0.5, 0.5))]);
        assert!(approx(signals.hand_offset.x, 0.0));
        assert!(approx(signals.hand_offset.y, 0.0));
        assert!(approx(signals.scale, signals::SCALE_MIN));
    }

    #[test]
    fn fingertip_offset_inverts_the_image_y_axis() {
        let mut interpreter = LandmarkInterpreter::new();
        let signals = interpreter.interpret(&[hand((1.0, 0.0), (1.0, 0.0))]);
        assert!(approx(signals.hand_offset.x, 15.0));
        assert!(approx(signals.hand_offset.y, 12.5));
    }

    #[test]
    fn wide_pinch_clamps_to_maximum_scale() {
        let mut interpreter = LandmarkInterpreter::new();
        let signals = interpreter.interpret(&[hand((0.0, 0.0), (1.0, 1.0))]);
        assert!(approx(signals.scale, signals::SCALE_MAX));
    }

    #[test]
    fn two_hands_boost_the_spin_regardless_of_landmarks() {
        let mut interpreter = LandmarkInterpreter::new();
        let hands = [hand((0.1, 0.9), (0.2, 0.8)), vec![lm(0.0, 0.0); 21]];
        assert_eq!(interpreter.interpret(&hands).spin_boost, signals::SPIN_BOOSTED);
        assert_eq!(
            interpreter.interpret(&hands[..1]).spin_boost,
            signals::SPIN_BASE
        );
        assert_eq!(interpreter.interpret(&[]).spin_boost, signals::SPIN_BASE);
    }

    #[test]
    fn lost_tracking_retains_offset_and_scale() {
        let mut interpreter = LandmarkInterpreter::new();
        let before = interpreter.interpret(&[hand((1.0, 0.0), (0.5, 0.5))]);
        let after = interpreter.interpret(&[]);
        assert_eq!(after.hand_offset, before.hand_offset);
        assert_eq!(after.scale, before.scale);
    }

    #[test]
    fn short_hand_counts_for_spin_but_not_for_pose() {
        let mut interpreter = LandmarkInterpreter::new();
        let before = interpreter.interpret(&[hand((1.0, 0.0), (0.5, 0.5))]);
        // Five landmarks: thumb tip present, index tip missing.
        let stub = vec![lm(0.3, 0.3); 5];
        let after = interpreter.interpret(&[stub.clone(), stub]);
        assert_eq!(after.hand_offset, before.hand_offset);
        assert_eq!(after.scale, before.scale);
        assert_eq!(after.spin_boost, signals::SPIN_BOOSTED);
    }
}
