//! Gauss's law for E: point charge, dashed gaussian surface, radiating
//! field lines with traveling marker particles.

use glam::Vec2;
use std::f32::consts::TAU;

use fieldlab_core::{ModeRenderer, Surface};
use fieldlab_config::{Mode, Parameters};

use super::{BACKGROUND, GOLD, RED, TEAL};

/// Pixels per meter of gaussian radius.
const RADIUS_SCALE: f32 = 60.0;
const NUM_FIELD_LINES: usize = 16;
const LINE_INNER: f32 = 20.0;
const LINE_OUTER: f32 = 150.0;

pub struct GaussERenderer;

impl ModeRenderer for GaussERenderer {
    fn mode(&self) -> Mode {
        Mode::GaussE
    }

    fn phase_step(&self) -> f64 {
        0.02
    }

    fn draw(&self, surface: &mut Surface, params: &Parameters, t: f64) {
        let p = params.gauss_e;
        let t = t as f32;
        surface.clear(BACKGROUND);

        let center = surface.center();
        let surface_radius = p.radius as f32 * RADIUS_SCALE;
        let charge_color = if p.charge > 0.0 { RED } else { TEAL };

        // Pulsing glow behind the charge
        let pulse = 15.0 + (t * 3.0).sin() * 3.0;
        surface.glow(center, pulse * 2.0, charge_color.fade(0.8));
        surface.fill_circle(center, pulse, charge_color);

        // Gaussian surface; the scrolling dashes suggest the closed boundary
        surface.dashed_circle(center, surface_radius, 10.0, 10.0, -t * 20.0, 3.0, GOLD.fade(0.6));

        for i in 0..NUM_FIELD_LINES {
            let angle = i as f32 / NUM_FIELD_LINES as f32 * TAU;
            let dir = Vec2::from_angle(angle);

            // Field line fading toward the outside
            let mid = center + dir * (LINE_INNER + (LINE_OUTER - LINE_INNER) * 0.5);
            surface.line(center + dir * LINE_INNER, mid, charge_color);
            surface.line(mid, center + dir * LINE_OUTER, charge_color.fade(0.35));

            // Marker particle traveling outward along the line
            let travel = (t * 50.0 + i as f32 * 20.0).rem_euclid(130.0) + LINE_INNER;
            surface.fill_circle(center + dir * travel, 3.0, charge_color);

            // Breathing arrow head
            let arrow_dist = 100.0 + (t * 2.0).sin() * 10.0;
            surface.arrow_head(center + dir * arrow_dist, angle, 10.0, charge_color);
        }
    }
}
