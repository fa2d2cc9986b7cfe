//! ember renderer - CPU Monte Carlo path tracing.
//!
//! The core of the workspace: a BVH over a sum type of scene objects, a
//! thin-lens camera that generates jittered rays, a recursive radiance
//! estimator, and a scanline-partitioned multi-threaded render driver.

mod bvh;
mod camera;
mod color;
mod instance;
mod material;
mod object;
mod quad;
mod renderer;
mod sphere;
mod texture;

pub use bvh::Bvh;
pub use camera::Camera;
pub use color::{linear_to_gamma, write_color, Color};
pub use instance::{RotateY, Translate};
pub use material::{Dielectric, DiffuseLight, Lambertian, Material, Metal, Scatter};
pub use object::{HitRecord, Object};
pub use quad::{make_box, Quad};
pub use renderer::{ray_color, render, Framebuffer, RenderConfig};
pub use sphere::Sphere;
pub use texture::{Checker, ImageTexture, SolidColor, Texture};

/// Re-export the math leaves so scene code needs a single dependency.
pub use ember_math::{Aabb, Interval, Ray, Vec3};

use rand::{Rng, RngCore};

/// Uniform sample in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen()
}
