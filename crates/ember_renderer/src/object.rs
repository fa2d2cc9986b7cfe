//! Scene objects and the ray-object intersection record.

use crate::material::{Material, Scatter};
use crate::{Bvh, Quad, RotateY, Sphere, Translate};
use ember_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;

/// A material used for `HitRecord::default()`; absorbs everything.
struct Absorb;

impl Material for Absorb {
    fn scatter(&self, _ray_in: &Ray, _rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<Scatter> {
        None
    }
}

static ABSORB: Absorb = Absorb;

/// Record of a ray-object intersection.
///
/// Written once per successful hit during traversal, and overwritten only
/// when a strictly closer hit is found later.
#[derive(Clone)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (always points against the ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a dyn Material,
    /// UV texture coordinates
    pub u: f32,
    pub v: f32,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> Default for HitRecord<'a> {
    fn default() -> Self {
        Self {
            p: Vec3::ZERO,
            normal: Vec3::ZERO,
            material: &ABSORB,
            u: 0.0,
            v: 0.0,
            t: 0.0,
            front_face: false,
        }
    }
}

impl<'a> HitRecord<'a> {
    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// A scene object.
///
/// Every variant answers the same two queries, so primitives, instancing
/// wrappers, and whole hierarchies compose uniformly: a BVH can hold quads,
/// a rotation can wrap a BVH, and the renderer only ever sees `Object`.
pub enum Object {
    Sphere(Sphere),
    Quad(Quad),
    Translate(Translate),
    RotateY(RotateY),
    Bvh(Bvh),
}

impl Object {
    /// Test the ray against this object within `ray_t`.
    ///
    /// Returns true and fills in `rec` on a hit. Traversal is read-only
    /// apart from writes into the caller-supplied record, so concurrent
    /// queries from independent samples need no synchronization.
    pub fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        match self {
            Object::Sphere(sphere) => sphere.hit(ray, ray_t, rec),
            Object::Quad(quad) => quad.hit(ray, ray_t, rec),
            Object::Translate(translate) => translate.hit(ray, ray_t, rec),
            Object::RotateY(rotate) => rotate.hit(ray, ray_t, rec),
            Object::Bvh(bvh) => bvh.hit(ray, ray_t, rec),
        }
    }

    /// Get the axis-aligned bounding box of this object.
    pub fn bounding_box(&self) -> Aabb {
        match self {
            Object::Sphere(sphere) => sphere.bounding_box(),
            Object::Quad(quad) => quad.bounding_box(),
            Object::Translate(translate) => translate.bounding_box(),
            Object::RotateY(rotate) => rotate.bounding_box(),
            Object::Bvh(bvh) => bvh.bounding_box(),
        }
    }
}
