//! Faraday's law: an oscillating field-line bundle threading a conducting
//! loop, with induced-EMF sparks and current arrows whose orbit direction
//! follows the sign of the EMF. The only renderer (besides the wave) whose
//! phase time also feeds the formula set directly.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, TAU};
use std::f64::consts::PI;

use fieldlab_core::{ModeRenderer, Surface};
use fieldlab_config::{Mode, Parameters};

use super::{BACKGROUND, GOLD, RED, VIOLET};

use crate::formulas;

/// Pixels per meter of loop radius.
const LOOP_SCALE: f32 = 100.0;
const NUM_FIELD_LINES: u32 = 20;
const DOTS_PER_LINE: u32 = 8;
const NUM_SPARKS: usize = 12;
const NUM_CURRENT_ARROWS: usize = 8;

pub struct FaradayRenderer;

impl ModeRenderer for FaradayRenderer {
    fn mode(&self) -> Mode {
        Mode::Faraday
    }

    fn phase_step(&self) -> f64 {
        0.02
    }

    fn draw(&self, surface: &mut Surface, params: &Parameters, t: f64) {
        let p = params.faraday;
        let r = formulas::faraday(&p, t);
        let tf = t as f32;
        surface.clear(BACKGROUND);

        let center = surface.center();
        let width = surface.width() as f32;
        let height = surface.height() as f32;
        let loop_radius = p.loop_radius as f32 * LOOP_SCALE;

        // Field strength drives line opacity; EMF magnitude drives sparks
        let field_alpha = (r.field.abs() / p.b_field) as f32;
        let emf_peak = r.omega * p.b_field * PI * p.loop_radius * p.loop_radius;
        let emf_intensity = if emf_peak > 0.0 {
            (r.emf.abs() / emf_peak) as f32
        } else {
            0.0
        };

        // Oscillating vertical field-line bundle
        let spacing = width / NUM_FIELD_LINES as f32;
        for i in 0..NUM_FIELD_LINES {
            let sway = (tf * 2.0 + i as f32 * 0.3).sin() * 5.0;
            let x = i as f32 * spacing + sway;
            surface.thick_line(
                Vec2::new(x, 0.0),
                Vec2::new(x, height),
                2.0,
                VIOLET.fade(field_alpha * 0.7),
            );

            // Bright dots drifting down the lines
            let slot = height / DOTS_PER_LINE as f32;
            let drift = (tf * 50.0).rem_euclid(slot);
            for j in 0..DOTS_PER_LINE {
                let y = j as f32 * slot + drift;
                surface.fill_circle(Vec2::new(x, y), 2.0, VIOLET.fade(field_alpha * 0.8));
            }
        }

        // Loop aura brightens with the induced EMF
        surface.stroke_circle(center, loop_radius, 12.0, GOLD.fade(emf_intensity * 0.3));
        surface.stroke_circle(center, loop_radius, 5.0, GOLD);

        // Sparks orbiting just outside the loop
        for i in 0..NUM_SPARKS {
            let angle = i as f32 / NUM_SPARKS as f32 * TAU + tf * 3.0;
            let dist = loop_radius + 5.0 + (tf * 5.0 + i as f32).sin() * 3.0;
            let pos = center + Vec2::from_angle(angle) * dist;
            surface.fill_circle(pos, 2.0 + emf_intensity * 2.0, GOLD.fade(emf_intensity * 0.8));
        }

        // Induced current arrows; orbit direction tracks sign(emf)
        if r.emf.abs() > 0.01 {
            let dir = if r.emf > 0.0 { 1.0f32 } else { -1.0 };
            for i in 0..NUM_CURRENT_ARROWS {
                let angle = i as f32 / NUM_CURRENT_ARROWS as f32 * TAU + tf * 2.0 * dir;
                let base = center + Vec2::from_angle(angle) * loop_radius;
                let tangent = angle + FRAC_PI_2 * dir;
                let tip = base + Vec2::from_angle(tangent) * 15.0;
                surface.thick_line(base, tip, 3.0, RED.fade(emf_intensity));
                surface.arrow_head(tip, tangent, 8.0, RED.fade(emf_intensity));
            }
        }
    }
}
