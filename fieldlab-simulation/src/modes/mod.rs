//! The five mode renderers. Each one consumes the current parameters plus
//! phase time and produces a complete frame on its own surface; the shared
//! drawing primitives live in fieldlab-core.

mod ampere;
mod faraday;
mod gauss_b;
mod gauss_e;
mod wave;

pub use ampere::AmpereRenderer;
pub use faraday::FaradayRenderer;
pub use gauss_b::GaussBRenderer;
pub use gauss_e::GaussERenderer;
pub use wave::WaveRenderer;

use fieldlab_core::{Color, ModeRenderer};

// Shared palette
pub(crate) const BACKGROUND: Color = Color::rgb(8, 8, 14);
pub(crate) const RED: Color = Color::rgb(255, 107, 107);
pub(crate) const TEAL: Color = Color::rgb(78, 205, 196);
pub(crate) const GOLD: Color = Color::rgb(255, 215, 0);
pub(crate) const VIOLET: Color = Color::rgb(138, 43, 226);
pub(crate) const WHITE: Color = Color::rgb(255, 255, 255);

/// The full renderer set, one per mode, in tab order.
pub fn renderers() -> Vec<Box<dyn ModeRenderer>> {
    vec![
        Box::new(GaussERenderer),
        Box::new(GaussBRenderer),
        Box::new(FaradayRenderer),
        Box::new(AmpereRenderer),
        Box::new(WaveRenderer),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldlab_config::{Mode, Parameters};
    use fieldlab_core::Surface;

    fn drawn_pixels(surface: &Surface) -> usize {
        surface
            .pixels()
            .chunks_exact(4)
            .filter(|px| px[0] != BACKGROUND.r || px[1] != BACKGROUND.g || px[2] != BACKGROUND.b)
            .count()
    }

    #[test]
    fn every_mode_has_a_renderer_in_tab_order() {
        let set = renderers();
        assert_eq!(set.len(), 5);
        for (renderer, mode) in set.iter().zip(Mode::ALL) {
            assert_eq!(renderer.mode(), mode);
        }
    }

    #[test]
    fn phase_steps_match_per_mode_tuning() {
        for renderer in renderers() {
            let expected = match renderer.mode() {
                Mode::GaussB | Mode::Ampere => 0.03,
                _ => 0.02,
            };
            assert_eq!(renderer.phase_step(), expected);
        }
    }

    #[test]
    fn every_renderer_draws_something() {
        let params = Parameters::default();
        for renderer in renderers() {
            let mut surface = Surface::new(400, 400);
            renderer.draw(&mut surface, &params, 0.0);
            assert!(
                drawn_pixels(&surface) > 100,
                "mode '{}' produced an empty frame",
                renderer.mode()
            );
        }
    }

    #[test]
    fn frames_are_deterministic_for_equal_phase_time() {
        let params = Parameters::default();
        for renderer in renderers() {
            let mut a = Surface::new(320, 400);
            let mut b = Surface::new(320, 400);
            renderer.draw(&mut a, &params, 1.23);
            renderer.draw(&mut b, &params, 1.23);
            assert_eq!(a, b, "mode '{}' is not deterministic", renderer.mode());
        }
    }

    #[test]
    fn frames_move_with_phase_time() {
        // 0.37 is not a multiple of any default-parameter period, so every
        // mode must produce a visibly different frame.
        let params = Parameters::default();
        for renderer in renderers() {
            let mut a = Surface::new(320, 400);
            let mut b = Surface::new(320, 400);
            renderer.draw(&mut a, &params, 0.0);
            renderer.draw(&mut b, &params, 0.37);
            assert_ne!(a, b, "mode '{}' ignores phase time", renderer.mode());
        }
    }

    #[test]
    fn wave_frames_repeat_after_one_period() {
        // At the default 1 Hz the wave is periodic in exactly one second of
        // phase time; the frames must be pixel-identical across a period.
        let params = Parameters::default();
        let renderer = WaveRenderer;
        let mut a = Surface::new(320, 400);
        let mut b = Surface::new(320, 400);
        renderer.draw(&mut a, &params, 0.0);
        renderer.draw(&mut b, &params, 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_charge_takes_the_negative_palette() {
        // Charge only picks the palette in this mode; the geometry is
        // identical for any value, so frames compare exactly.
        let mut params = Parameters::default();
        let renderer = GaussERenderer;

        params.gauss_e.charge = 0.0;
        let mut zero = Surface::new(320, 400);
        renderer.draw(&mut zero, &params, 0.5);

        params.gauss_e.charge = -3.0;
        let mut negative = Surface::new(320, 400);
        renderer.draw(&mut negative, &params, 0.5);

        params.gauss_e.charge = 3.0;
        let mut positive = Surface::new(320, 400);
        renderer.draw(&mut positive, &params, 0.5);

        assert_eq!(zero, negative);
        assert_ne!(zero, positive);
    }

    #[test]
    fn frame_is_redrawn_from_scratch() {
        // Drawing at a late phase then an early one must equal drawing the
        // early one alone: nothing persists between frames.
        let params = Parameters::default();
        for renderer in renderers() {
            let mut reused = Surface::new(320, 400);
            renderer.draw(&mut reused, &params, 5.0);
            renderer.draw(&mut reused, &params, 0.1);
            let mut fresh = Surface::new(320, 400);
            renderer.draw(&mut fresh, &params, 0.1);
            assert_eq!(reused, fresh, "mode '{}' leaks stale frames", renderer.mode());
        }
    }
}
