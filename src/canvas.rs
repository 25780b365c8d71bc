use crate::color::{self, Rgb};

pub(crate) const CANVAS_W: u32 = 160;
pub(crate) const CANVAS_H: u32 = 160;

// Scale/rotation pivot, the center of the sprite.
const PIVOT_X: f64 = 80.0;
const PIVOT_Y: f64 = 80.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Pixel {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl Pixel {
    pub(crate) const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub(crate) fn from_hex(hex: &str) -> Option<Self> {
        let Rgb { r, g, b } = color::parse_hex(hex)?;
        Some(Self::rgb(r, g, b))
    }
}

/// The fixed 160x160 logical drawing surface the sprite core renders
/// into. Primitives take canvas-space f64 coordinates and apply the
/// current scale/rotation about the sprite center, mirroring a 2D
/// context's transform stack (one level deep is all the sprite needs).
pub(crate) struct PixelCanvas {
    pub(crate) w: u32,
    pub(crate) h: u32,
    pub(crate) px: Vec<Pixel>,
    scale: f64,
    rotation: f64,
}

impl PixelCanvas {
    pub(crate) fn new() -> Self {
        Self {
            w: CANVAS_W,
            h: CANVAS_H,
            px: vec![Pixel::default(); (CANVAS_W * CANVAS_H) as usize],
            scale: 1.0,
            rotation: 0.0,
        }
    }

    pub(crate) fn idx(&self, x: u32, y: u32) -> usize {
        (y * self.w + x) as usize
    }

    pub(crate) fn pixel(&self, x: u32, y: u32) -> Pixel {
        if x < self.w && y < self.h {
            self.px[self.idx(x, y)]
        } else {
            Pixel::default()
        }
    }

    pub(crate) fn clear(&mut self) {
        self.px.fill(Pixel::default());
        self.scale = 1.0;
        self.rotation = 0.0;
    }

    /// Number of non-transparent pixels; handy for "did anything draw".
    pub(crate) fn ink_count(&self) -> usize {
        self.px.iter().filter(|p| p.a > 0).count()
    }

    pub(crate) fn set_transform(&mut self, scale: f64, rotation: f64) {
        self.scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        self.rotation = rotation;
    }

    pub(crate) fn reset_transform(&mut self) {
        self.scale = 1.0;
        self.rotation = 0.0;
    }

    fn is_identity(&self) -> bool {
        self.scale == 1.0 && self.rotation == 0.0
    }

    /// Forward transform: scale then rotate about the pivot.
    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let (dx, dy) = ((x - PIVOT_X) * self.scale, (y - PIVOT_Y) * self.scale);
        let (s, c) = self.rotation.sin_cos();
        (PIVOT_X + dx * c - dy * s, PIVOT_Y + dx * s + dy * c)
    }

    /// Inverse transform: un-rotate then un-scale about the pivot.
    fn unapply(&self, x: f64, y: f64) -> (f64, f64) {
        let (dx, dy) = (x - PIVOT_X, y - PIVOT_Y);
        let (s, c) = (-self.rotation).sin_cos();
        let (rx, ry) = (dx * c - dy * s, dx * s + dy * c);
        (PIVOT_X + rx / self.scale, PIVOT_Y + ry / self.scale)
    }

    fn set(&mut self, x: i32, y: i32, p: Pixel) {
        if x >= 0 && y >= 0 && (x as u32) < self.w && (y as u32) < self.h {
            let i = self.idx(x as u32, y as u32);
            self.px[i] = p;
        }
    }

    /// Fills an axis-aligned rectangle given in untransformed canvas
    /// coordinates. Under a non-identity transform the fill is resolved
    /// by inverse-mapping every pixel of the transformed bounding box,
    /// so scaled/rotated fills stay hole-free.
    pub(crate) fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, p: Pixel) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }

        if self.is_identity() {
            let x0 = x.round() as i32;
            let y0 = y.round() as i32;
            let x1 = x0 + w.round() as i32;
            let y1 = y0 + h.round() as i32;
            for yy in y0..y1 {
                for xx in x0..x1 {
                    self.set(xx, yy, p);
                }
            }
            return;
        }

        let corners = [
            self.apply(x, y),
            self.apply(x + w, y),
            self.apply(x, y + h),
            self.apply(x + w, y + h),
        ];
        let min_x = corners.iter().map(|c| c.0).fold(f64::INFINITY, f64::min);
        let max_x = corners.iter().map(|c| c.0).fold(f64::NEG_INFINITY, f64::max);
        let min_y = corners.iter().map(|c| c.1).fold(f64::INFINITY, f64::min);
        let max_y = corners.iter().map(|c| c.1).fold(f64::NEG_INFINITY, f64::max);

        let x0 = (min_x.floor() as i32).max(0);
        let y0 = (min_y.floor() as i32).max(0);
        let x1 = (max_x.ceil() as i32).min(self.w as i32 - 1);
        let y1 = (max_y.ceil() as i32).min(self.h as i32 - 1);

        for yy in y0..=y1 {
            for xx in x0..=x1 {
                let (sx, sy) = self.unapply(xx as f64 + 0.5, yy as f64 + 0.5);
                if sx >= x && sx < x + w && sy >= y && sy < y + h {
                    self.set(xx, yy, p);
                }
            }
        }
    }

    /// 2px-thick line segment, Bresenham over the transformed endpoints.
    pub(crate) fn stroke_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, p: Pixel) {
        let (ax, ay) = self.apply(x0, y0);
        let (bx, by) = self.apply(x1, y1);

        let mut x = ax.round() as i32;
        let mut y = ay.round() as i32;
        let ex = bx.round() as i32;
        let ey = by.round() as i32;

        let dx = (ex - x).abs();
        let dy = -(ey - y).abs();
        let sx = if x < ex { 1 } else { -1 };
        let sy = if y < ey { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set(x, y, p);
            self.set(x + 1, y, p);
            self.set(x, y + 1, p);
            if x == ex && y == ey {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draws one of the tiny effect glyphs. `(x, y)` is the baseline
    /// left corner, text-style; `cell` is the pixel size of one glyph
    /// cell. Unsupported characters draw nothing.
    pub(crate) fn draw_glyph(&mut self, ch: char, x: f64, y: f64, cell: f64, p: Pixel) {
        let Some(rows) = glyph_mask(ch) else {
            return;
        };
        let top = y - rows.len() as f64 * cell;
        for (gy, row) in rows.iter().enumerate() {
            for gx in 0..GLYPH_W {
                if row & (1 << (GLYPH_W - 1 - gx)) != 0 {
                    self.fill_rect(
                        x + gx as f64 * cell,
                        top + gy as f64 * cell,
                        cell,
                        cell,
                        p,
                    );
                }
            }
        }
    }
}

const GLYPH_W: usize = 5;

// 5x5 bitmap masks for the few characters the effect layer uses.
fn glyph_mask(ch: char) -> Option<&'static [u8; 5]> {
    match ch {
        'z' | 'Z' => Some(&[0b11111, 0b00010, 0b00100, 0b01000, 0b11111]),
        '\u{2665}' => Some(&[0b01010, 0b11111, 0b11111, 0b01110, 0b00100]),
        '*' => Some(&[0b00100, 0b10101, 0b01110, 0b10101, 0b00100]),
        _ => None,
    }
}
