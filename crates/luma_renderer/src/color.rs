//! Color helpers: RGB radiance values and their conversion to display bytes.

use luma_math::Vec3;

/// Color type alias (linear RGB radiance, non-negative)
pub type Color = Vec3;

/// Display gamma applied at the final pixel write.
pub const DEFAULT_GAMMA: f32 = 2.2;

/// Average of the three channels.
#[inline]
pub fn channel_avg(c: Color) -> f32 {
    (c.x + c.y + c.z) / 3.0
}

/// Apply gamma correction `c^(1/γ)` per channel.
///
/// Non-positive channels map to zero.
pub fn gamma_correct(c: Color, gamma: f32) -> Color {
    let inv = 1.0 / gamma;
    let channel = |x: f32| if x > 0.0 { x.powf(inv) } else { 0.0 };
    Color::new(channel(c.x), channel(c.y), channel(c.z))
}

/// Clamp every channel to [0, 1].
#[inline]
pub fn clamp_01(c: Color) -> Color {
    c.clamp(Color::ZERO, Color::ONE)
}

/// Convert an already gamma-corrected color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let c = clamp_01(color);
    let r = (255.0 * c.x).round() as u8;
    let g = (255.0 * c.y).round() as u8;
    let b = (255.0 * c.z).round() as u8;
    [r, g, b, 255]
}

/// Per-channel transmittance `exp(-σ·d)` over a distance.
///
/// A zero coefficient transmits fully even over an infinite distance.
pub fn transmittance(sigma: Color, distance: f32) -> Color {
    let channel = |s: f32| if s == 0.0 { 1.0 } else { (-s * distance).exp() };
    Color::new(channel(sigma.x), channel(sigma.y), channel(sigma.z))
}
