// CPU reference of the per-particle vertex stage in shader.wgsl.
// The two must stay in lockstep.

use nalgebra_glm as glm;

/// Angular drift rate, radians per second.
pub const ANGULAR_DRIFT: f32 = 0.7;
/// Breathing radius: base plus a sinusoid phase-shifted by height so the
/// bands desynchronize.
pub const RADIUS_BASE: f32 = 10.0;
pub const RADIUS_AMPLITUDE: f32 = 2.0;
pub const HEIGHT_PHASE: f32 = 0.15;
/// Alpha crosses zero at |height| = FADE_SPAN.
pub const FADE_SPAN: f32 = 35.0;

/// Maps one particle's static record plus the frame inputs to a
/// field-local position and opacity. Pure; the hand offset translates the
/// field rigidly, the scale dilates the breathing radius. Alpha is left
/// unclamped below zero near the band edges and the render target clamps
/// on write.
#[allow(dead_code)]
pub fn particle_position(
    angle: f32,
    height: f32,
    time: f32,
    hand_offset: glm::Vec2,
    scale: f32,
) -> ([f32; 3], f32) {
    let a = angle + time * ANGULAR_DRIFT;
    let r = (RADIUS_BASE + (height * HEIGHT_PHASE + time).sin() * RADIUS_AMPLITUDE) * scale;
    let position = [
        a.cos() * r + hand_offset.x,
        height + hand_offset.y,
        a.sin() * r,
    ];
    let alpha = 1.0 - height.abs() / FADE_SPAN;
    (position, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn rest_state_sits_on_the_base_radius() {
        let (position, alpha) = particle_position(0.0, 0.0, 0.0, glm::vec2(0.0, 0.0), 1.0);
        assert!(approx(position[0], 10.0));
        assert!(approx(position[1], 0.0));
        assert!(approx(position[2], 0.0));
        assert!(approx(alpha, 1.0));
    }

    #[test]
    fn identical_inputs_yield_identical_outputs() {
        let a = particle_position(1.3, -12.5, 4.75, glm::vec2(3.0, -2.0), 1.8);
        let b = particle_position(1.3, -12.5, 4.75, glm::vec2(3.0, -2.0), 1.8);
        assert_eq!(a, b);
    }

    #[test]
    fn alpha_fades_linearly_with_height() {
        let alpha_at = |height: f32| particle_position(0.0, height, 0.0, glm::vec2(0.0, 0.0), 1.0).1;
        assert!(approx(alpha_at(0.0), 1.0));
        assert!(approx(alpha_at(35.0), 0.0));
        assert!(approx(alpha_at(-35.0), 0.0));
        assert!(approx(alpha_at(17.5), 0.5));
        // Linear falloff, no clamping on the CPU side.
        assert!(alpha_at(70.0) < 0.0);
    }

    #[test]
    fn scale_dilates_the_radius() {
        let (position, _) = particle_position(0.0, 0.0, 0.0, glm::vec2(0.0, 0.0), 2.0);
        assert!(approx(position[0], 20.0));
    }

    #[test]
    fn hand_offset_translates_rigidly() {
        let (position, _) = particle_position(0.0, 0.0, 0.0, glm::vec2(5.0, -3.0), 1.0);
        assert!(approx(position[0], 15.0));
        assert!(approx(position[1], -3.0));
        assert!(approx(position[2], 0.0));
    }

    #[test]
    fn radius_breathes_within_the_amplitude() {
        for step in 0..100 {
            let time = step as f32 * 0.17;
            let (position, _) = particle_position(0.0, 0.0, time, glm::vec2(0.0, 0.0), 1.0);
            let radius = (position[0] * position[0] + position[2] * position[2]).sqrt();
            assert!(radius >= RADIUS_BASE - RADIUS_AMPLITUDE - 1e-4);
            assert!(radius <= RADIUS_BASE + RADIUS_AMPLITUDE + 1e-4);
        }
    }
}
