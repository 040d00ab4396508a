//! Gauss's law for B: current-carrying wire with concentric tangential
//! field circles and rotating marker particles. The distance parameter only
//! feeds the formula readout; the geometry is a fixed illustration.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, TAU};

use fieldlab_core::{ModeRenderer, Surface};
use fieldlab_config::{Mode, Parameters};

use super::{BACKGROUND, GOLD, RED, TEAL};

const WIRE_HALF_LENGTH: f32 = 150.0;
const NUM_CIRCLES: u32 = 5;
const CIRCLE_SPACING: f32 = 30.0;
const NUM_TANGENT_ARROWS: usize = 12;
const ARROW_RING_RADIUS: f32 = 120.0;

pub struct GaussBRenderer;

impl ModeRenderer for GaussBRenderer {
    fn mode(&self) -> Mode {
        Mode::GaussB
    }

    fn phase_step(&self) -> f64 {
        0.03
    }

    fn draw(&self, surface: &mut Surface, _params: &Parameters, t: f64) {
        let t = t as f32;
        surface.clear(BACKGROUND);

        let center = surface.center();

        // Current flow ticks scrolling down the wire
        let flow = (t * 30.0).rem_euclid(15.0);
        let mut offset = -WIRE_HALF_LENGTH;
        while offset < WIRE_HALF_LENGTH {
            let y = center.y + offset + flow;
            let alpha = 0.3 + (t * 2.0 + offset * 0.1).sin() * 0.2;
            surface.thick_line(
                Vec2::new(center.x - 5.0, y),
                Vec2::new(center.x + 5.0, y),
                3.0,
                GOLD.fade(alpha),
            );
            offset += 15.0;
        }

        // The wire itself
        surface.thick_line(
            Vec2::new(center.x, center.y - WIRE_HALF_LENGTH),
            Vec2::new(center.x, center.y + WIRE_HALF_LENGTH),
            10.0,
            GOLD,
        );

        // Pulsing current-direction arrow at the top
        let arrow = 10.0 + (t * 3.0).sin() * 2.0;
        surface.fill_triangle(
            Vec2::new(center.x, center.y - WIRE_HALF_LENGTH),
            Vec2::new(center.x - arrow, center.y - WIRE_HALF_LENGTH + 15.0),
            Vec2::new(center.x + arrow, center.y - WIRE_HALF_LENGTH + 15.0),
            RED,
        );

        // Concentric field circles with rotating particles. Field lines
        // close on themselves, so nothing radiates outward here.
        for i in 1..=NUM_CIRCLES {
            let radius = i as f32 * CIRCLE_SPACING;
            let alpha = (1.0 - i as f32 * 0.15) * (0.8 + (t * 2.0 + i as f32).sin() * 0.2);
            surface.stroke_circle(center, radius, 3.0, TEAL.fade(alpha));

            for j in 0..8 {
                let angle = j as f32 / 8.0 * TAU + t + i as f32 * 0.5;
                let p = center + Vec2::from_angle(angle) * radius;
                surface.fill_circle(p, 2.0, TEAL);
            }
        }

        // Tangential arrows showing field direction around the wire
        for i in 0..NUM_TANGENT_ARROWS {
            let angle = i as f32 / NUM_TANGENT_ARROWS as f32 * TAU + t * 0.5;
            let base = center + Vec2::from_angle(angle) * ARROW_RING_RADIUS;
            let tangent = angle + FRAC_PI_2;
            let length = 20.0 + (t * 3.0 + i as f32).sin() * 5.0;
            let tip = base + Vec2::from_angle(tangent) * length;
            surface.line(base, tip, TEAL);
            surface.arrow_head(tip, tangent, 8.0, TEAL);
        }
    }
}
