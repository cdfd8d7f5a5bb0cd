//! The sparkle badge design.
//!
//! A white four-pointed star (the superellipse `|x|^0.6 + |y|^0.6 = 1`) on a
//! green circle, with soft edges on both the circle and the star.

use image::{ImageBuffer, Rgba, RgbaImage};

/// Badge background (#00a884)
pub const BACKGROUND: [u8; 3] = [0, 168, 132];

const WHITE: u8 = 255;

/// Width of the anti-aliased rim of the circle, in pixels
const EDGE_WIDTH: f64 = 1.5;

/// Star half-extent as a fraction of the circle radius
const STAR_SCALE: f64 = 0.45;
const STAR_EXPONENT: f64 = 0.6;

/// Below this the star is solid white; between it and 1.0 it fades into the background
const STAR_CORE: f64 = 0.85;
const STAR_FADE: f64 = 0.15;

/// Color of pixel `(x, y)` on a `width` x `height` canvas.
///
/// Pixels outside the badge circle are fully transparent. Total for any
/// `width, height >= 1`.
pub fn icon_color(x: u32, y: u32, width: u32, height: u32) -> Rgba<u8> {
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;
    let dx = x as f64 - cx;
    let dy = y as f64 - cy;
    let dist = (dx * dx + dy * dy).sqrt();
    let radius = width.min(height) as f64 / 2.0 - 1.0;

    if dist > radius {
        return Rgba([0, 0, 0, 0]);
    }

    let alpha = edge_alpha(dist, radius);
    let star_val = star_value(dx, dy, radius * STAR_SCALE);

    if star_val < STAR_CORE {
        Rgba([WHITE, WHITE, WHITE, alpha])
    } else if star_val < 1.0 {
        let blend = (1.0 - star_val) / STAR_FADE;
        let mix = |bg: u8| (WHITE as f64 * blend + bg as f64 * (1.0 - blend)) as u8;
        Rgba([
            mix(BACKGROUND[0]),
            mix(BACKGROUND[1]),
            mix(BACKGROUND[2]),
            alpha,
        ])
    } else {
        Rgba([BACKGROUND[0], BACKGROUND[1], BACKGROUND[2], alpha])
    }
}

/// Renders the whole canvas, pixel for pixel what the encoder stores.
pub fn render(width: u32, height: u32) -> RgbaImage {
    ImageBuffer::from_fn(width, height, |x, y| icon_color(x, y, width, height))
}

fn edge_alpha(dist: f64, radius: f64) -> u8 {
    if dist > radius - EDGE_WIDTH {
        ((radius - dist) / EDGE_WIDTH * 255.0).clamp(0.0, 255.0) as u8
    } else {
        255
    }
}

// A degenerate star (tiny canvas) or a non-finite power falls back to 1.0,
// which paints plain background.
fn star_value(dx: f64, dy: f64, star_size: f64) -> f64 {
    if star_size <= 0.0 {
        return 1.0;
    }

    let nx = dx.abs() / star_size;
    let ny = dy.abs() / star_size;
    let value = nx.powf(STAR_EXPONENT) + ny.powf(STAR_EXPONENT);

    if value.is_finite() {
        value
    } else {
        1.0
    }
}
