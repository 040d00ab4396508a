//! Plane electromagnetic wave: two superposed transverse sinusoids for E
//! and B traveling along a horizontal axis, with per-sample direction
//! glyphs. One shared monotonic phase time feeds both the drawing and the
//! sine formulas.

use glam::Vec2;

use fieldlab_core::{ModeRenderer, Surface};
use fieldlab_config::{Mode, Parameters, WaveParams};

use super::{BACKGROUND, RED, TEAL, WHITE};

use crate::formulas;

/// Pixels per field unit of amplitude.
const AMPLITUDE_SCALE: f32 = 80.0;
/// The surface width spans x in [0, 10] meters.
const DOMAIN: f64 = 10.0;
const PARTICLES_PER_CURVE: u32 = 15;
const NUM_STATIONS: u32 = 8;

pub struct WaveRenderer;

impl WaveRenderer {
    /// Vertical pixel positions of the E and B curves at one screen column.
    /// The B sample is scaled back up by c, so the two curves superpose
    /// exactly, which is the point of the visualization.
    fn curve_points(p: &WaveParams, px: u32, width: u32, center_y: f32, t: f64) -> (f32, f32) {
        let x = px as f64 / width as f64 * DOMAIN;
        let s = formulas::wave_sample(p, x, t);
        let e_y = center_y - s.e as f32 * AMPLITUDE_SCALE;
        let b_y = center_y - (s.b * p.speed) as f32 * AMPLITUDE_SCALE;
        (e_y, b_y)
    }
}

impl ModeRenderer for WaveRenderer {
    fn mode(&self) -> Mode {
        Mode::Wave
    }

    fn phase_step(&self) -> f64 {
        0.02
    }

    fn draw(&self, surface: &mut Surface, params: &Parameters, t: f64) {
        let p = params.wave;
        surface.clear(BACKGROUND);

        let width = surface.width();
        let center_y = surface.height() as f32 / 2.0;

        // Propagation axis
        surface.line(
            Vec2::new(0.0, center_y),
            Vec2::new(width as f32, center_y),
            WHITE.fade(0.2),
        );

        // Sample both curves once per screen column
        let mut e_points = Vec::with_capacity(width as usize);
        let mut b_points = Vec::with_capacity(width as usize);
        for px in 0..width {
            let (e_y, b_y) = Self::curve_points(&p, px, width, center_y, t);
            e_points.push(Vec2::new(px as f32, e_y));
            b_points.push(Vec2::new(px as f32, b_y));
        }

        // Trail pass then main pass, E over B
        surface.polyline(&b_points, 8.0, TEAL.fade(0.2));
        surface.polyline(&e_points, 8.0, RED.fade(0.2));
        surface.polyline(&b_points, 4.0, TEAL);
        surface.polyline(&e_points, 4.0, RED);

        // Marker particles riding each curve
        for i in 0..PARTICLES_PER_CURVE {
            let px = i * width / PARTICLES_PER_CURVE;
            let (e_y, b_y) = Self::curve_points(&p, px, width, center_y, t);
            surface.fill_circle(Vec2::new(px as f32, e_y), 3.0, RED);
            surface.fill_circle(Vec2::new(px as f32, b_y), 3.0, TEAL);
        }

        // Sample stations: vertical E vector plus B direction glyph
        for i in 0..NUM_STATIONS {
            let px = i * width / NUM_STATIONS + width / (NUM_STATIONS * 2);
            let x = px as f64 / width as f64 * DOMAIN;
            let s = formulas::wave_sample(&p, x, t);
            let sx = px as f32;

            // E vector along the transverse axis
            let e_len = s.e.abs() as f32 * AMPLITUDE_SCALE * 0.6;
            let e_sign = if s.e >= 0.0 { 1.0f32 } else { -1.0 };
            let tip = Vec2::new(sx, center_y - e_len * e_sign);
            surface.thick_line(Vec2::new(sx, center_y), tip, 3.0, RED);
            if s.e.abs() > 0.1 {
                surface.fill_triangle(
                    tip,
                    Vec2::new(sx - 5.0, tip.y + 10.0 * e_sign),
                    Vec2::new(sx + 5.0, tip.y + 10.0 * e_sign),
                    RED,
                );
            }

            // B points out of (dot) or into (cross) the drawing plane
            let glyph = Vec2::new(sx, center_y);
            surface.stroke_circle(glyph, 8.0, 2.0, TEAL);
            if s.b.abs() > 0.01 {
                if s.b > 0.0 {
                    surface.fill_circle(glyph, 3.0, TEAL);
                } else {
                    surface.line(glyph + Vec2::new(-4.0, -4.0), glyph + Vec2::new(4.0, 4.0), TEAL);
                    surface.line(glyph + Vec2::new(4.0, -4.0), glyph + Vec2::new(-4.0, 4.0), TEAL);
                }
            }
        }
    }
}
