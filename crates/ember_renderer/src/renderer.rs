//! Radiance estimation and the multi-threaded render driver.

use crate::color::{write_color, Color};
use crate::object::{HitRecord, Object};
use crate::Camera;
use ember_math::{Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::time::Instant;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Background color when a ray escapes the scene
    pub background: Color,
    /// Worker thread count; defaults to available hardware parallelism
    pub threads: Option<usize>,
    /// Base RNG seed. Workers seed with `seed + worker index`, so renders
    /// repeat exactly for a fixed seed and thread count. Unseeded renders
    /// draw worker seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 50,
            background: Color::ZERO,
            threads: None,
            seed: None,
        }
    }
}

/// Compute the radiance arriving along a ray.
///
/// Recursive Monte Carlo estimate: exhausted depth contributes nothing, an
/// escaped ray contributes the background, and a surface contributes its
/// emission plus the attenuated estimate along the scattered ray. The lower
/// intersection bound of 0.001 suppresses self-intersection acne.
pub fn ray_color(
    ray: &Ray,
    depth: u32,
    world: &Object,
    background: Color,
    rng: &mut dyn RngCore,
) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();

    if !world.hit(ray, Interval::new(0.001, f32::INFINITY), &mut rec) {
        return background;
    }

    let emitted = rec.material.emitted(rec.u, rec.v, rec.p);

    match rec.material.scatter(ray, &rec, rng) {
        Some(scatter) => {
            emitted
                + scatter.attenuation
                    * ray_color(&scatter.scattered, depth - 1, world, background, rng)
        }
        None => emitted,
    }
}

/// Raw render output: per-pixel sums of radiance samples, row-major.
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Color>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// The raw sample sum accumulated for pixel (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Write the image as plain-text PPM (P3): header, then one `r g b`
    /// line per pixel, row-major, top-to-bottom, left-to-right.
    pub fn write_ppm(&self, out: &mut dyn Write, samples_per_pixel: u32) -> io::Result<()> {
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "255")?;

        for pixel_sum in &self.pixels {
            write_color(out, *pixel_sum, samples_per_pixel)?;
        }

        Ok(())
    }
}

/// Render the scene, spreading scanlines across a fixed pool of worker
/// threads.
///
/// Worker `t` of `T` owns rows `t, t+T, t+2T, ...`; the ownership is
/// enforced by handing each worker disjoint `&mut` row slices, so the
/// shared pixel buffer needs no locks or atomics. Work is partitioned
/// statically up front; the call returns only after every worker has
/// finished.
pub fn render(camera: &Camera, config: &RenderConfig, world: &Object) -> Framebuffer {
    let width = camera.image_width as usize;
    let mut frame = Framebuffer::new(camera.image_width, camera.image_height);

    let workers = config
        .threads
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        })
        .max(1);

    log::info!(
        "Rendering {}x{} at {} samples/pixel, depth {}, {} workers",
        camera.image_width,
        camera.image_height,
        config.samples_per_pixel,
        config.max_depth,
        workers
    );
    let start = Instant::now();

    std::thread::scope(|scope| {
        let mut bands: Vec<Vec<(usize, &mut [Color])>> = Vec::with_capacity(workers);
        bands.resize_with(workers, Vec::new);
        for (j, row) in frame.pixels.chunks_mut(width).enumerate() {
            bands[j % workers].push((j, row));
        }

        for (worker, band) in bands.into_iter().enumerate() {
            let seed = config.seed.map(|s| s.wrapping_add(worker as u64));
            scope.spawn(move || {
                let mut rng: StdRng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };

                for (j, row) in band {
                    for (i, pixel) in row.iter_mut().enumerate() {
                        let mut sum = Color::ZERO;
                        for _ in 0..config.samples_per_pixel {
                            let ray = camera.get_ray(i as u32, j as u32, &mut rng);
                            sum += ray_color(
                                &ray,
                                config.max_depth,
                                world,
                                config.background,
                                &mut rng,
                            );
                        }
                        *pixel = sum;
                    }
                    log::debug!("worker {worker} finished scanline {j}");
                }
            });
        }
    });

    log::info!("Render finished in {:.2?}", start.elapsed());
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{DiffuseLight, Lambertian, Material};
    use crate::{Bvh, Sphere, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn empty_world() -> Object {
        Bvh::new(Vec::new()).into()
    }

    #[test]
    fn test_ray_color_depth_exhausted_is_black() {
        let world = empty_world();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0.0);
        let mut rng = StdRng::seed_from_u64(0);

        let c = ray_color(&ray, 0, &world, Color::ONE, &mut rng);
        assert_eq!(c, Color::ZERO);
    }

    #[test]
    fn test_ray_color_miss_returns_background_exactly() {
        let world = empty_world();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0.0);
        let mut rng = StdRng::seed_from_u64(0);

        let c = ray_color(&ray, 50, &world, Color::ONE, &mut rng);
        assert_eq!(c, Color::ONE);
    }

    #[test]
    fn test_ray_color_black_absorber_blocks_background() {
        // A non-scattering, black-emitting material: an occluded ray
        // contributes nothing even against a white background.
        let absorber: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::ZERO));
        let world: Object =
            Bvh::new(vec![Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0, absorber).into()]).into();

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0.0);
        let mut rng = StdRng::seed_from_u64(0);

        let c = ray_color(&ray, 50, &world, Color::ONE, &mut rng);
        assert_eq!(c, Color::ZERO);
    }

    #[test]
    fn test_ray_color_adds_emission_to_scatter() {
        // Emissive-only hit: the estimate is exactly the emitted color
        let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::new(3.0, 2.0, 1.0)));
        let world: Object =
            Bvh::new(vec![Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0, light).into()]).into();

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0.0);
        let mut rng = StdRng::seed_from_u64(0);

        let c = ray_color(&ray, 50, &world, Color::ZERO, &mut rng);
        assert_eq!(c, Color::new(3.0, 2.0, 1.0));
    }

    fn camera(width: u32, height: u32) -> Camera {
        let mut camera = Camera::new()
            .with_resolution(width, height)
            .with_position(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y)
            .with_lens(90.0, 0.0, 1.0);
        camera.initialize();
        camera
    }

    #[test]
    fn test_render_covers_every_scanline_for_any_pool_size() {
        // Empty world on a white background with one sample: every pixel of
        // every row must hold exactly white, whatever the worker count.
        let world = empty_world();

        for threads in 1..=5 {
            for height in [1, 2, 5, 7] {
                let cam = camera(4, height);
                let config = RenderConfig {
                    samples_per_pixel: 1,
                    max_depth: 5,
                    background: Color::ONE,
                    threads: Some(threads),
                    seed: Some(1),
                };

                let frame = render(&cam, &config, &world);
                for y in 0..height {
                    for x in 0..4 {
                        assert_eq!(frame.pixel(x, y), Color::ONE, "threads={threads} row={y}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_render_accumulates_unweighted_sample_sums() {
        let world = empty_world();
        let cam = camera(2, 2);
        let config = RenderConfig {
            samples_per_pixel: 8,
            max_depth: 5,
            background: Color::new(0.25, 0.5, 1.0),
            threads: Some(2),
            seed: Some(1),
        };

        let frame = render(&cam, &config, &world);
        // All samples miss, so each pixel sums to 8 * background
        assert_eq!(frame.pixel(0, 0), 8.0 * Color::new(0.25, 0.5, 1.0));
    }

    #[test]
    fn test_render_seeded_runs_repeat_exactly() {
        let gray: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
        let world: Object =
            Bvh::new(vec![Sphere::new(Vec3::ZERO, 1.0, gray).into()]).into();
        let cam = camera(6, 4);
        let config = RenderConfig {
            samples_per_pixel: 4,
            max_depth: 8,
            background: Color::new(0.7, 0.8, 1.0),
            threads: Some(3),
            seed: Some(42),
        };

        let a = render(&cam, &config, &world);
        let b = render(&cam, &config, &world);

        for y in 0..4 {
            for x in 0..6 {
                assert_eq!(a.pixel(x, y), b.pixel(x, y));
            }
        }
    }

    #[test]
    fn test_render_single_sphere_center_and_corners() {
        // Unit sphere at the origin, camera on +z looking down -z: the
        // center pixel shows the sphere, the corners show pure background.
        let gray: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
        let world: Object =
            Bvh::new(vec![Sphere::new(Vec3::ZERO, 1.0, gray).into()]).into();

        let mut cam = Camera::new()
            .with_resolution(11, 11)
            .with_position(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y)
            .with_lens(90.0, 0.0, 1.0);
        cam.initialize();

        let config = RenderConfig {
            samples_per_pixel: 1,
            max_depth: 1,
            background: Color::ONE,
            threads: Some(2),
            seed: Some(3),
        };

        let frame = render(&cam, &config, &world);

        // Depth 1 terminates after the first bounce, so the sphere shows
        // as non-background (black) at the center pixel
        assert_ne!(frame.pixel(5, 5), Color::ONE);

        for (x, y) in [(0, 0), (10, 0), (0, 10), (10, 10)] {
            assert_eq!(frame.pixel(x, y), Color::ONE);
        }
    }

    #[test]
    fn test_framebuffer_ppm_header_and_order() {
        let mut frame = Framebuffer::new(2, 1);
        frame.pixels[0] = Color::ZERO;
        frame.pixels[1] = Color::ONE;

        let mut buf = Vec::new();
        frame.write_ppm(&mut buf, 1).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text, "P3\n2 1\n255\n0 0 0\n255 255 255\n");
    }
}
