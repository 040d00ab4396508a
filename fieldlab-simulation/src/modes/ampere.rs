//! Ampere-Maxwell law: enclosed current seen end-on, dashed amperian path
//! with scrolling dashes, and tangential B-vectors swept around the path.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, TAU};

use fieldlab_core::{ModeRenderer, Surface};
use fieldlab_config::{Mode, Parameters};

use super::{BACKGROUND, GOLD, TEAL};

/// Pixels per meter of path radius.
const PATH_SCALE: f32 = 80.0;
const NUM_WAVEFRONTS: u32 = 3;
const NUM_VECTORS: usize = 16;

pub struct AmpereRenderer;

impl ModeRenderer for AmpereRenderer {
    fn mode(&self) -> Mode {
        Mode::Ampere
    }

    fn phase_step(&self) -> f64 {
        0.03
    }

    fn draw(&self, surface: &mut Surface, params: &Parameters, t: f64) {
        let p = params.ampere;
        let t = t as f32;
        surface.clear(BACKGROUND);

        let center = surface.center();
        let path_radius = p.path_radius as f32 * PATH_SCALE;

        // Expanding field wavefronts
        for i in 0..NUM_WAVEFRONTS {
            let travel = (t * 50.0 + i as f32 * 60.0).rem_euclid(180.0);
            let radius = travel + path_radius - 20.0;
            let alpha = 1.0 - travel / 180.0;
            if radius > 0.0 {
                surface.stroke_circle(center, radius, 2.0, TEAL.fade(alpha * 0.4));
            }
        }

        // Current dot with pulsing aura (current flowing out of the plane)
        let pulse = 12.0 + (t * 4.0).sin() * 3.0;
        surface.glow(center, pulse * 3.0, GOLD.fade(0.6));
        surface.fill_circle(center, pulse, GOLD);
        surface.fill_circle(center, 3.0, BACKGROUND);

        // Amperian path; dash offset scrolls to suggest circulation direction
        surface.dashed_circle(center, path_radius, 15.0, 10.0, -t * 30.0, 4.0, GOLD.fade(0.7));

        for i in 0..NUM_VECTORS {
            let angle = i as f32 / NUM_VECTORS as f32 * TAU + t * 0.5;
            let base = center + Vec2::from_angle(angle) * path_radius;
            let tangent = angle + FRAC_PI_2;
            let length = 30.0 + (t * 3.0 + i as f32).sin() * 5.0;
            let tip = base + Vec2::from_angle(tangent) * length;

            // Vector trail, brighter toward the tip
            let mid = base + Vec2::from_angle(tangent) * (length * 0.5);
            surface.thick_line(base, mid, 4.0, TEAL.fade(0.3));
            surface.thick_line(mid, tip, 4.0, TEAL.fade(0.8));

            // Solid arrow head
            surface.fill_triangle(
                tip,
                tip - Vec2::from_angle(tangent - 0.4) * 10.0,
                tip - Vec2::from_angle(tangent + 0.4) * 10.0,
                TEAL,
            );

            // Marker particle bobbing across the path
            let bob = path_radius + (t * 4.0 + i as f32 * 0.5).sin() * 10.0;
            surface.fill_circle(center + Vec2::from_angle(angle) * bob, 3.0, TEAL);
        }
    }
}
