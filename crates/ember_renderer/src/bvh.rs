//! Bounding Volume Hierarchy acceleration structure.
//!
//! A binary tree over scene objects, built once and immutable afterwards,
//! so all render threads can traverse it concurrently without locking.
//! Nodes live in a flat arena and reference children by index; a leaf's
//! two child handles may alias the same object.

use crate::object::{HitRecord, Object};
use ember_math::{Aabb, Interval, Ray};
use std::cmp::Ordering;

/// Handle to a BVH child: either another arena node or a leaf object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Child {
    Node(u32),
    Object(u32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Node {
    bbox: Aabb,
    left: Child,
    right: Child,
}

/// A built hierarchy over a set of scene objects.
///
/// Construction sorts the object array in place; the arena then refers to
/// objects by index. An empty object set builds a hierarchy that never
/// reports a hit and has an empty bounding box.
pub struct Bvh {
    objects: Vec<Object>,
    nodes: Vec<Node>,
    root: Option<u32>,
}

impl Bvh {
    /// Build a hierarchy over the given objects.
    pub fn new(mut objects: Vec<Object>) -> Self {
        let mut nodes = Vec::new();

        let root = if objects.is_empty() {
            None
        } else {
            let end = objects.len();
            Some(Self::build(&mut objects, &mut nodes, 0, end))
        };

        log::debug!(
            "Built BVH: {} objects, {} nodes",
            objects.len(),
            nodes.len()
        );

        Self {
            objects,
            nodes,
            root,
        }
    }

    /// Recursively build the subtree over `objects[start..end]`, returning
    /// the arena index of its root node.
    ///
    /// The split axis is the longest axis of the range's union box, and the
    /// range is ordered by each box's minimum coordinate on that axis. The
    /// sort is stable so equal keys keep their input order and the tree
    /// shape is identical across runs.
    fn build(objects: &mut [Object], nodes: &mut Vec<Node>, start: usize, end: usize) -> u32 {
        let mut bbox = Aabb::EMPTY;
        for object in &objects[start..end] {
            bbox = Aabb::surrounding(&bbox, &object.bounding_box());
        }

        let axis = bbox.longest_axis();
        let span = end - start;

        let (left, right) = match span {
            1 => {
                // Both children alias the single object
                let handle = Child::Object(start as u32);
                (handle, handle)
            }
            2 => {
                if axis_min(&objects[start], axis) < axis_min(&objects[start + 1], axis) {
                    (
                        Child::Object(start as u32),
                        Child::Object(start as u32 + 1),
                    )
                } else {
                    (
                        Child::Object(start as u32 + 1),
                        Child::Object(start as u32),
                    )
                }
            }
            _ => {
                objects[start..end].sort_by(|a, b| {
                    axis_min(a, axis)
                        .partial_cmp(&axis_min(b, axis))
                        .unwrap_or(Ordering::Equal)
                });

                let mid = start + span / 2;
                let left = Self::build(objects, nodes, start, mid);
                let right = Self::build(objects, nodes, mid, end);
                (Child::Node(left), Child::Node(right))
            }
        };

        nodes.push(Node { bbox, left, right });
        (nodes.len() - 1) as u32
    }

    /// Find the closest hit along the ray within `ray_t`, if any.
    pub fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        match self.root {
            None => false,
            Some(root) => self.hit_node(root, ray, ray_t, rec),
        }
    }

    fn hit_node<'a>(
        &'a self,
        index: u32,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
    ) -> bool {
        let node = &self.nodes[index as usize];

        if !node.bbox.hit(ray, ray_t) {
            return false;
        }

        let hit_left = self.hit_child(node.left, ray, ray_t, rec);

        // Only search the right subtree up to the closest hit so far; this
        // also makes the record reflect the closer of two subtree hits.
        let right_max = if hit_left { rec.t } else { ray_t.max };
        let hit_right = self.hit_child(node.right, ray, Interval::new(ray_t.min, right_max), rec);

        hit_left || hit_right
    }

    fn hit_child<'a>(
        &'a self,
        child: Child,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
    ) -> bool {
        match child {
            Child::Node(index) => self.hit_node(index, ray, ray_t, rec),
            Child::Object(index) => self.objects[index as usize].hit(ray, ray_t, rec),
        }
    }

    /// Bounding box of the whole hierarchy.
    pub fn bounding_box(&self) -> Aabb {
        match self.root {
            None => Aabb::EMPTY,
            Some(root) => self.nodes[root as usize].bbox,
        }
    }
}

impl From<Bvh> for Object {
    fn from(bvh: Bvh) -> Self {
        Object::Bvh(bvh)
    }
}

/// Minimum coordinate of an object's bounding box on the given axis.
fn axis_min(object: &Object, axis: usize) -> f32 {
    object.bounding_box().axis_interval(axis).min
}
