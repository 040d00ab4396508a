//! Offscreen RGBA drawing surface and the shared drawing primitives used by
//! every mode renderer (lines, circles, dashed paths, glows, arrows).

use glam::Vec2;

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Scales the alpha channel by a factor in [0, 1].
    pub fn fade(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self {
            a: (self.a as f32 * f) as u8,
            ..self
        }
    }
}

/// One addressable 2-D raster surface. Each mode owns exactly one; a full
/// frame is clear + redraw, nothing persists between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>, // RGBA, row-major
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    /// Resizes to the container width and the fixed mode height, discarding
    /// any previous contents.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![0; (width * height * 4) as usize];
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        Some([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ])
    }

    /// Fills the whole surface with one color, replacing everything.
    pub fn clear(&mut self, color: Color) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk[0] = color.r;
            chunk[1] = color.g;
            chunk[2] = color.b;
            chunk[3] = color.a;
        }
    }

    /// Alpha-blends one pixel. Out-of-bounds coordinates are ignored so
    /// callers can draw geometry that partially leaves the surface.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        let a = color.a as f32 / 255.0;
        let inv = 1.0 - a;
        self.pixels[idx] = (color.r as f32 * a + self.pixels[idx] as f32 * inv) as u8;
        self.pixels[idx + 1] = (color.g as f32 * a + self.pixels[idx + 1] as f32 * inv) as u8;
        self.pixels[idx + 2] = (color.b as f32 * a + self.pixels[idx + 2] as f32 * inv) as u8;
        self.pixels[idx + 3] = self.pixels[idx + 3].saturating_add(color.a);
    }

    /// Single-pixel line between two points.
    pub fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0);
        let inc = delta / steps;
        let mut p = from;
        for _ in 0..=steps as u32 {
            self.blend_pixel(p.x.round() as i32, p.y.round() as i32, color);
            p += inc;
        }
    }

    /// Line with thickness, stamped as discs along the segment.
    pub fn thick_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let radius = (width / 2.0).max(0.5);
        let delta = to - from;
        let steps = delta.length().ceil().max(1.0);
        let inc = delta / steps;
        let mut p = from;
        for _ in 0..=steps as u32 {
            self.fill_circle(p, radius, color);
            p += inc;
        }
    }

    /// Connected line strip, used for wave curves.
    pub fn polyline(&mut self, points: &[Vec2], width: f32, color: Color) {
        for pair in points.windows(2) {
            if width <= 1.0 {
                self.line(pair[0], pair[1], color);
            } else {
                self.thick_line(pair[0], pair[1], width, color);
            }
        }
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let r = radius.max(0.5);
        let min_x = (center.x - r).floor() as i32;
        let max_x = (center.x + r).ceil() as i32;
        let min_y = (center.y - r).floor() as i32;
        let max_y = (center.y + r).ceil() as i32;
        let r_sq = r * r;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let d = Vec2::new(x as f32, y as f32) - center;
                if d.length_squared() <= r_sq {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        // Step so consecutive stamps overlap
        let step = (0.75 / radius).min(0.2);
        let mut angle = 0.0f32;
        while angle < std::f32::consts::TAU {
            let p = center + Vec2::from_angle(angle) * radius;
            if width <= 1.0 {
                self.blend_pixel(p.x.round() as i32, p.y.round() as i32, color);
            } else {
                self.fill_circle(p, width / 2.0, color);
            }
            angle += step;
        }
    }

    /// Dashed circular path. `offset` scrolls the dash pattern along the
    /// circumference, which reads as circulation direction when animated.
    pub fn dashed_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        dash: f32,
        gap: f32,
        offset: f32,
        width: f32,
        color: Color,
    ) {
        if radius <= 0.0 || dash <= 0.0 {
            return;
        }
        let circumference = std::f32::consts::TAU * radius;
        let pattern = dash + gap;
        let mut s = 0.0f32;
        while s < circumference {
            let phase = (s + offset).rem_euclid(pattern);
            if phase < dash {
                let angle = s / radius;
                let p = center + Vec2::from_angle(angle) * radius;
                if width <= 1.0 {
                    self.blend_pixel(p.x.round() as i32, p.y.round() as i32, color);
                } else {
                    self.fill_circle(p, width / 2.0, color);
                }
            }
            s += 0.75;
        }
    }

    /// Radial glow: full alpha at the center falling off to zero at `radius`.
    pub fn glow(&mut self, center: Vec2, radius: f32, color: Color) {
        let r = radius.max(0.5);
        let min_x = (center.x - r).floor() as i32;
        let max_x = (center.x + r).ceil() as i32;
        let min_y = (center.y - r).floor() as i32;
        let max_y = (center.y + r).ceil() as i32;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let d = (Vec2::new(x as f32, y as f32) - center).length();
                if d <= r {
                    let falloff = 1.0 - d / r;
                    self.blend_pixel(x, y, color.fade(falloff * falloff));
                }
            }
        }
    }

    /// Open arrow head: two strokes angled back from the tip.
    pub fn arrow_head(&mut self, tip: Vec2, angle: f32, size: f32, color: Color) {
        for spread in [-0.3f32, 0.3] {
            let back = tip - Vec2::from_angle(angle + spread) * size;
            self.line(tip, back, color);
        }
    }

    /// Filled triangle, used for solid arrow heads.
    pub fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        let min_x = a.x.min(b.x).min(c.x).floor() as i32;
        let max_x = a.x.max(b.x).max(c.x).ceil() as i32;
        let min_y = a.y.min(b.y).min(c.y).floor() as i32;
        let max_y = a.y.max(b.y).max(c.y).ceil() as i32;
        let edge = |p0: Vec2, p1: Vec2, p: Vec2| (p1 - p0).perp_dot(p - p0);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec2::new(x as f32, y as f32);
                let w0 = edge(a, b, p);
                let w1 = edge(b, c, p);
                let w2 = edge(c, a, p);
                let all_neg = w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0;
                let all_pos = w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0;
                if all_neg || all_pos {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }
}
