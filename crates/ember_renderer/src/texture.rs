//! Textures: colors computed from surface coordinates.

use crate::Color;
use ember_core::Image;
use ember_math::Vec3;
use std::sync::Arc;

/// Trait for textures sampled by UV coordinates and hit point.
pub trait Texture: Send + Sync {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color;
}

/// A single uniform color.
pub struct SolidColor {
    albedo: Color,
}

impl SolidColor {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        self.albedo
    }
}

/// A 3D checker pattern alternating between two textures.
pub struct Checker {
    inv_scale: f32,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl Checker {
    /// Checker over two uniform colors with the given cell scale.
    pub fn new(scale: f32, even: Color, odd: Color) -> Self {
        Self::textured(
            scale,
            Arc::new(SolidColor::new(even)),
            Arc::new(SolidColor::new(odd)),
        )
    }

    /// Checker over two arbitrary textures.
    pub fn textured(scale: f32, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        }
    }
}

impl Texture for Checker {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color {
        let x = (self.inv_scale * p.x).floor() as i64;
        let y = (self.inv_scale * p.y).floor() as i64;
        let z = (self.inv_scale * p.z).floor() as i64;

        if (x + y + z) % 2 == 0 {
            self.even.value(u, v, p)
        } else {
            self.odd.value(u, v, p)
        }
    }
}

/// A texture backed by an image file, sampled by nearest pixel.
pub struct ImageTexture {
    image: Image,
}

impl ImageTexture {
    /// Load the named image through the loader's search path; a failed
    /// load shows up as the loader's magenta sentinel.
    pub fn load(filename: &str) -> Self {
        Self {
            image: Image::load(filename),
        }
    }

    pub fn new(image: Image) -> Self {
        Self { image }
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Vec3) -> Color {
        // Clamp to [0,1], flipping v to image coordinates
        let u = u.clamp(0.0, 1.0);
        let v = 1.0 - v.clamp(0.0, 1.0);

        let i = (u * self.image.width() as f32) as i64;
        let j = (v * self.image.height() as f32) as i64;
        let pixel = self.image.pixel(i, j);

        let color_scale = 1.0 / 255.0;
        Color::new(
            color_scale * pixel[0] as f32,
            color_scale * pixel[1] as f32,
            color_scale * pixel[2] as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_ignores_coordinates() {
        let tex = SolidColor::new(Color::new(0.1, 0.2, 0.3));
        assert_eq!(tex.value(0.0, 0.0, Vec3::ZERO), Color::new(0.1, 0.2, 0.3));
        assert_eq!(
            tex.value(0.7, 0.3, Vec3::new(5.0, -2.0, 9.0)),
            Color::new(0.1, 0.2, 0.3)
        );
    }

    #[test]
    fn test_checker_alternates_between_cells() {
        let even = Color::ONE;
        let odd = Color::ZERO;
        let tex = Checker::new(1.0, even, odd);

        let a = tex.value(0.0, 0.0, Vec3::new(0.5, 0.5, 0.5));
        let b = tex.value(0.0, 0.0, Vec3::new(1.5, 0.5, 0.5));
        assert_ne!(a, b);

        // Two cells over on one axis is the same color again
        let c = tex.value(0.0, 0.0, Vec3::new(2.5, 0.5, 0.5));
        assert_eq!(a, c);
    }

    #[test]
    fn test_image_texture_samples_pixels() {
        // 2x1 image: red then blue
        let image = Image::from_rgb8(2, 1, vec![255, 0, 0, 0, 0, 255]);
        let tex = ImageTexture::new(image);

        let left = tex.value(0.1, 0.5, Vec3::ZERO);
        let right = tex.value(0.9, 0.5, Vec3::ZERO);

        assert!(left.x > 0.9 && left.z < 0.1);
        assert!(right.z > 0.9 && right.x < 0.1);
    }

    #[test]
    fn test_image_texture_missing_file_is_magenta() {
        let tex = ImageTexture::load("no-such-texture-anywhere.png");
        let c = tex.value(0.5, 0.5, Vec3::ZERO);

        assert_eq!(c, Color::new(1.0, 0.0, 1.0));
    }
}
