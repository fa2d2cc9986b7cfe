//! Planar quadrilateral primitive.

use crate::material::Material;
use crate::object::{HitRecord, Object};
use ember_math::{Aabb, Interval, Ray, Vec3};
use std::sync::Arc;

/// A parallelogram defined by an origin point `q` and two edge vectors.
pub struct Quad {
    q: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    material: Arc<dyn Material>,
    bbox: Aabb,
    normal: Vec3,
    d: f32,
}

impl Quad {
    /// Create a quad spanning `q` to `q + u + v`.
    pub fn new(q: Vec3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        let n = u.cross(v);
        let normal = n.normalize();
        let d = normal.dot(q);
        let w = n / n.dot(n);

        // Box of both diagonals; padding keeps the planar box intersectable
        let bbox = Aabb::surrounding(
            &Aabb::from_points(q, q + u + v),
            &Aabb::from_points(q + u, q + v),
        );

        Self {
            q,
            u,
            v,
            w,
            material,
            bbox,
            normal,
            d,
        }
    }

    pub(crate) fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let denom = self.normal.dot(ray.direction());

        // Ray parallel to the plane
        if denom.abs() < 1e-8 {
            return false;
        }

        let t = (self.d - self.normal.dot(ray.origin())) / denom;
        if !ray_t.contains(t) {
            return false;
        }

        // Locate the hit within the plane using planar coordinates
        let intersection = ray.at(t);
        let planar_hit = intersection - self.q;
        let alpha = self.w.dot(planar_hit.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar_hit));

        let unit = Interval::new(0.0, 1.0);
        if !unit.contains(alpha) || !unit.contains(beta) {
            return false;
        }

        rec.t = t;
        rec.p = intersection;
        rec.u = alpha;
        rec.v = beta;
        rec.material = self.material.as_ref();
        rec.set_face_normal(ray, self.normal);

        true
    }

    pub(crate) fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

impl From<Quad> for Object {
    fn from(quad: Quad) -> Self {
        Object::Quad(quad)
    }
}

/// The six quad faces of an axis-aligned box spanning corners `a` and `b`.
pub fn make_box(a: Vec3, b: Vec3, material: Arc<dyn Material>) -> Vec<Object> {
    let min = a.min(b);
    let max = a.max(b);

    let dx = Vec3::new(max.x - min.x, 0.0, 0.0);
    let dy = Vec3::new(0.0, max.y - min.y, 0.0);
    let dz = Vec3::new(0.0, 0.0, max.z - min.z);

    vec![
        // front
        Quad::new(
            Vec3::new(min.x, min.y, max.z),
            dx,
            dy,
            Arc::clone(&material),
        )
        .into(),
        // right
        Quad::new(
            Vec3::new(max.x, min.y, max.z),
            -dz,
            dy,
            Arc::clone(&material),
        )
        .into(),
        // back
        Quad::new(
            Vec3::new(max.x, min.y, min.z),
            -dx,
            dy,
            Arc::clone(&material),
        )
        .into(),
        // left
        Quad::new(
            Vec3::new(min.x, min.y, min.z),
            dz,
            dy,
            Arc::clone(&material),
        )
        .into(),
        // top
        Quad::new(
            Vec3::new(min.x, max.y, max.z),
            dx,
            -dz,
            Arc::clone(&material),
        )
        .into(),
        // bottom
        Quad::new(Vec3::new(min.x, min.y, min.z), dx, dz, material).into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::Color;

    fn gray() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)))
    }

    fn unit_quad() -> Quad {
        // Unit square in the z=0 plane from (0,0) to (1,1)
        Quad::new(Vec3::ZERO, Vec3::X, Vec3::Y, gray())
    }

    #[test]
    fn test_quad_hit_center() {
        let quad = unit_quad();
        let ray = Ray::new(Vec3::new(0.5, 0.5, 1.0), Vec3::new(0.0, 0.0, -1.0), 0.0);
        let mut rec = HitRecord::default();

        assert!(quad.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 1.0).abs() < 1e-6);
        assert!((rec.u - 0.5).abs() < 1e-6);
        assert!((rec.v - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_quad_miss_outside_edges() {
        let quad = unit_quad();
        let ray = Ray::new(Vec3::new(1.5, 0.5, 1.0), Vec3::new(0.0, 0.0, -1.0), 0.0);
        let mut rec = HitRecord::default();

        assert!(!quad.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_quad_miss_parallel_ray() {
        let quad = unit_quad();
        let ray = Ray::new(Vec3::new(0.5, 0.5, 1.0), Vec3::new(1.0, 0.0, 0.0), 0.0);
        let mut rec = HitRecord::default();

        assert!(!quad.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_quad_bbox_is_intersectable_despite_zero_depth() {
        let quad = unit_quad();
        let bbox = quad.bounding_box();
        let ray = Ray::new(Vec3::new(0.5, 0.5, 1.0), Vec3::new(0.0, 0.0, -1.0), 0.0);

        assert!(bbox.hit(&ray, Interval::new(0.0, f32::INFINITY)));
    }

    #[test]
    fn test_make_box_has_six_faces() {
        let faces = make_box(Vec3::ZERO, Vec3::ONE, gray());
        assert_eq!(faces.len(), 6);

        // A ray through the box hits some face from every axis direction
        for direction in [Vec3::X, Vec3::Y, Vec3::Z] {
            let ray = Ray::new(Vec3::splat(0.5) - 2.0 * direction, direction, 0.0);
            let mut rec = HitRecord::default();
            let hit = faces
                .iter()
                .any(|f| f.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
            assert!(hit);
        }
    }
}
