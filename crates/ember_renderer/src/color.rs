//! Color output: gamma correction and pixel quantization.

use ember_math::{Interval, Vec3};
use std::io::{self, Write};

/// Color type alias (linear RGB, components typically 0-1)
pub type Color = Vec3;

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Write one pixel as a `r g b` line of integers in [0, 255].
///
/// `pixel_sum` is the raw sum of per-sample radiance estimates; it is
/// averaged over `samples_per_pixel`, gamma-corrected, and clamped to
/// [0, 0.999] before quantization.
pub fn write_color(
    out: &mut dyn Write,
    pixel_sum: Color,
    samples_per_pixel: u32,
) -> io::Result<()> {
    let scale = 1.0 / samples_per_pixel as f32;

    let r = linear_to_gamma(pixel_sum.x * scale);
    let g = linear_to_gamma(pixel_sum.y * scale);
    let b = linear_to_gamma(pixel_sum.z * scale);

    let intensity = Interval::new(0.0, 0.999);
    writeln!(
        out,
        "{} {} {}",
        (256.0 * intensity.clamp(r)) as i32,
        (256.0 * intensity.clamp(g)) as i32,
        (256.0 * intensity.clamp(b)) as i32,
    )
}
