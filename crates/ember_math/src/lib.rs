//! Geometry primitives shared across the ember workspace.
//!
//! Re-exports `glam` so downstream crates get `Vec3` and friends from a
//! single place, and adds the ray-tracing leaf types: `Interval`, `Aabb`,
//! and `Ray`.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
