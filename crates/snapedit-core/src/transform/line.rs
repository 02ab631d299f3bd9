//! Straight line overlay.
//!
//! Lines are rasterized with integer Bresenham. Strokes wider than one pixel
//! stamp a filled disc of radius `thickness / 2` at every point, which gives
//! round caps. Endpoints may lie anywhere: the segment is clipped to the
//! image (grown by the stroke radius) before rasterizing, and pixels outside
//! the image are skipped. A stroke wide enough to swallow the whole image
//! is a plain fill. Drawing never fails, and its cost is bounded by the
//! image size rather than by `thickness`.

use crate::buffer::{PixelBuffer, CHANNELS};

/// Default stroke color (pure green).
pub const HIGHLIGHT: [u8; 3] = [0, 255, 0];

/// Draw a [`HIGHLIGHT`] line from `start` to `end` on a copy of `image`.
///
/// Coordinates are `(x, y)` with a top-left origin. `thickness` is the
/// stroke width in pixels; 0 is treated as 1.
pub fn draw_line(
    image: &PixelBuffer,
    start: (i32, i32),
    end: (i32, i32),
    thickness: u32,
) -> PixelBuffer {
    draw_line_with_color(image, start, end, thickness, HIGHLIGHT)
}

/// Draw a line in an arbitrary color. See [`draw_line`].
pub fn draw_line_with_color(
    image: &PixelBuffer,
    start: (i32, i32),
    end: (i32, i32),
    thickness: u32,
    color: [u8; 3],
) -> PixelBuffer {
    let mut canvas = Canvas::new(image, thickness.max(1) / 2, color);

    let start = (start.0 as i64, start.1 as i64);
    let end = (end.0 as i64, end.1 as i64);
    if canvas.swallowed_by(start, end) {
        canvas.fill();
    } else if let Some((start, end)) = canvas.clip(start, end) {
        canvas.stroke(start, end);
    }

    canvas.finish()
}

/// Mutable working copy of the image being drawn on.
struct Canvas {
    width: i64,
    height: i64,
    pixels: Vec<u8>,
    radius: i64,
    color: [u8; 3],
}

impl Canvas {
    fn new(image: &PixelBuffer, radius: u32, color: [u8; 3]) -> Self {
        Self {
            width: image.width() as i64,
            height: image.height() as i64,
            pixels: image.as_raw().to_vec(),
            radius: radius as i64,
            color,
        }
    }

    /// True when some point of the stroke is near enough to the image center
    /// that its disc covers every pixel.
    ///
    /// The 2px margin absorbs Bresenham and endpoint rounding, so a `true`
    /// here means stroking would have painted the whole image anyway.
    fn swallowed_by(&self, p0: (i64, i64), p1: (i64, i64)) -> bool {
        let (w, h) = ((self.width - 1) as f64, (self.height - 1) as f64);
        let reach = self.radius as f64 - w.hypot(h) / 2.0 - 2.0;
        reach >= 0.0 && distance_to_segment((w / 2.0, h / 2.0), p0, p1) <= reach
    }

    fn fill(&mut self) {
        for px in self.pixels.chunks_exact_mut(CHANNELS) {
            px.copy_from_slice(&self.color);
        }
    }

    /// Liang-Barsky clip against the image bounds grown by the brush radius.
    ///
    /// Returns `None` when no part of the stroke can touch the image.
    /// Endpoints that are already inside are kept exact.
    fn clip(&self, p0: (i64, i64), p1: (i64, i64)) -> Option<((i64, i64), (i64, i64))> {
        let min = -self.radius as f64;
        let max_x = (self.width - 1 + self.radius) as f64;
        let max_y = (self.height - 1 + self.radius) as f64;

        let (x0, y0) = (p0.0 as f64, p0.1 as f64);
        let dx = p1.0 as f64 - x0;
        let dy = p1.1 as f64 - y0;

        let mut t0 = 0.0f64;
        let mut t1 = 1.0f64;
        let edges = [
            (-dx, x0 - min),
            (dx, max_x - x0),
            (-dy, y0 - min),
            (dy, max_y - y0),
        ];

        for (p, q) in edges {
            if p == 0.0 {
                // Parallel to this edge: either fully inside or fully outside
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }

        let at = |t: f64| ((x0 + t * dx).round() as i64, (y0 + t * dy).round() as i64);
        let start = if t0 > 0.0 { at(t0) } else { p0 };
        let end = if t1 < 1.0 { at(t1) } else { p1 };
        Some((start, end))
    }

    fn stroke(&mut self, (mut x, mut y): (i64, i64), (x1, y1): (i64, i64)) {
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            // Once a stamp covers the whole image the rest of the stroke is a no-op
            if self.stamp(x, y) || (x == x1 && y == y1) {
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

    /// Fill the disc centered on `(cx, cy)`, visiting only the rows and
    /// columns that lie inside the image.
    ///
    /// Returns true when the disc covered every pixel.
    fn stamp(&mut self, cx: i64, cy: i64) -> bool {
        let r = self.radius as i128;
        let (cx, cy) = (cx as i128, cy as i128);
        let (w, h) = (self.width as i128, self.height as i128);

        let top = (cy - r).max(0);
        let bottom = (cy + r).min(h - 1);
        let mut covered = top == 0 && bottom == h - 1;

        for y in top..=bottom {
            let dy = y - cy;
            let half = isqrt(r * r - dy * dy);
            let left = (cx - half).max(0);
            let right = (cx + half).min(w - 1);
            if left > right {
                covered = false;
                continue;
            }
            covered &= left == 0 && right == w - 1;
            self.fill_span(y as usize, left as usize, right as usize);
        }
        covered
    }

    fn fill_span(&mut self, y: usize, left: usize, right: usize) {
        let row = y * self.width as usize;
        let span = &mut self.pixels[(row + left) * CHANNELS..(row + right + 1) * CHANNELS];
        for px in span.chunks_exact_mut(CHANNELS) {
            px.copy_from_slice(&self.color);
        }
    }

    fn finish(self) -> PixelBuffer {
        PixelBuffer::from_parts(self.width as u32, self.height as u32, self.pixels)
    }
}

fn distance_to_segment(p: (f64, f64), a: (i64, i64), b: (i64, i64)) -> f64 {
    let (ax, ay) = (a.0 as f64, a.1 as f64);
    let (dx, dy) = (b.0 as f64 - ax, b.1 as f64 - ay);
    let len2 = dx * dx + dy * dy;
    let t = if len2 == 0.0 {
        0.0
    } else {
        (((p.0 - ax) * dx + (p.1 - ay) * dy) / len2).clamp(0.0, 1.0)
    };
    (p.0 - (ax + t * dx)).hypot(p.1 - (ay + t * dy))
}

/// Largest `s` with `s * s <= n`, for `n >= 0`.
fn isqrt(n: i128) -> i128 {
    let mut s = (n as f64).sqrt() as i128;
    while s * s > n {
        s -= 1;
    }
    while (s + 1) * (s + 1) <= n {
        s += 1;
    }
    s
}
