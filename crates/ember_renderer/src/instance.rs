//! Instancing wrappers: translation and Y-axis rotation.
//!
//! Instead of transforming geometry, these move the incoming ray into
//! object space and the hit results back out to world space.

use crate::object::{HitRecord, Object};
use ember_math::{Aabb, Interval, Ray, Vec3};

/// Moves an object by a fixed offset.
pub struct Translate {
    inner: Box<Object>,
    offset: Vec3,
    bbox: Aabb,
}

impl Translate {
    pub fn new(inner: Object, offset: Vec3) -> Self {
        let bbox = inner.bounding_box().translate(offset);
        Self {
            inner: Box::new(inner),
            offset,
            bbox,
        }
    }

    pub(crate) fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        // Intersect in object space, then lift the hit point back out
        let offset_ray = Ray::new(ray.origin() - self.offset, ray.direction(), ray.time());

        if !self.inner.hit(&offset_ray, ray_t, rec) {
            return false;
        }

        rec.p += self.offset;
        true
    }

    pub(crate) fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

impl From<Translate> for Object {
    fn from(translate: Translate) -> Self {
        Object::Translate(translate)
    }
}

/// Rotates an object around the Y axis.
pub struct RotateY {
    inner: Box<Object>,
    sin_theta: f32,
    cos_theta: f32,
    bbox: Aabb,
}

impl RotateY {
    pub fn new(inner: Object, degrees: f32) -> Self {
        let radians = degrees.to_radians();
        let sin_theta = radians.sin();
        let cos_theta = radians.cos();

        // World-space box of the rotated object from its 8 rotated corners
        let inner_box = inner.bounding_box();
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);

        for i in 0..2 {
            for j in 0..2 {
                for k in 0..2 {
                    let x = if i == 0 { inner_box.x.min } else { inner_box.x.max };
                    let y = if j == 0 { inner_box.y.min } else { inner_box.y.max };
                    let z = if k == 0 { inner_box.z.min } else { inner_box.z.max };

                    let new_x = cos_theta * x + sin_theta * z;
                    let new_z = -sin_theta * x + cos_theta * z;

                    let corner = Vec3::new(new_x, y, new_z);
                    min = min.min(corner);
                    max = max.max(corner);
                }
            }
        }

        Self {
            inner: Box::new(inner),
            sin_theta,
            cos_theta,
            bbox: Aabb::from_points(min, max),
        }
    }

    fn to_object_space(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x - self.sin_theta * v.z,
            v.y,
            self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }

    fn to_world_space(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x + self.sin_theta * v.z,
            v.y,
            -self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }

    pub(crate) fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let rotated = Ray::new(
            self.to_object_space(ray.origin()),
            self.to_object_space(ray.direction()),
            ray.time(),
        );

        if !self.inner.hit(&rotated, ray_t, rec) {
            return false;
        }

        rec.p = self.to_world_space(rec.p);
        rec.normal = self.to_world_space(rec.normal);
        true
    }

    pub(crate) fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

impl From<RotateY> for Object {
    fn from(rotate: RotateY) -> Self {
        Object::RotateY(rotate)
    }
}
