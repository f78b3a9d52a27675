use glam::{Vec2, Vec3, Vec4, Vec4Swizzles};
use shared_structs::{BVHNode, Instance, IntersectionRecord, Triangle, TriangleRef};

use crate::mesh::{Mesh, Piece};
use crate::primitive::Primitive;

pub const EPS: f32 = 0.001;

const STACK_SIZE: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            min_distance: EPS,
            max_distance: f32::INFINITY,
        }
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Result of one intersection query.
#[derive(Clone, Copy, Debug)]
pub struct Intersection {
    ray: Ray,
    record: IntersectionRecord,
}

impl Intersection {
    pub fn new(ray: Ray, record: IntersectionRecord) -> Self {
        Self { ray, record }
    }

    /// `false` means the ray escaped the scene.
    pub fn has(&self) -> bool {
        self.record.has_hit()
    }

    pub fn ray(&self) -> &Ray {
        &self.ray
    }

    pub fn record(&self) -> &IntersectionRecord {
        &self.record
    }

    pub fn distance(&self) -> f32 {
        self.record.distance
    }

    pub fn position(&self) -> Vec3 {
        self.ray.at(self.record.distance)
    }

    pub fn to_primitive(&self, triangles: &[Triangle]) -> Primitive {
        let triangle = &triangles[self.record.primitive_id as usize];
        Primitive::from_triangle(triangle, self.record.barycentric)
    }

    /// The piece that was hit. Ids are trusted to be in range.
    pub fn piece_in<'m>(&self, instances: &[Instance], meshes: &'m [Mesh<'m>]) -> &'m Piece<'m> {
        let instance = instances[self.record.instance_id as usize];
        let mesh = &meshes[instance.mesh_id as usize];
        &mesh.pieces[self.record.geometry_id as usize]
    }
}

pub trait Intersector {
    /// Nearest hit along `ray` among instances whose mask shares a bit with `mask`.
    fn intersect(&self, ray: &Ray, mask: u32) -> Intersection;
}

struct TriangleHit {
    t: f32,
    barycentric: Vec2,
    backface: bool,
}

// Adapted from raytri.c
fn muller_trumbore(ro: Vec3, rd: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<TriangleHit> {
    let edge1 = b - a;
    let edge2 = c - a;

    // begin calculating determinant - also used to calculate U parameter
    let pv = rd.cross(edge2);

    // if determinant is near zero, ray lies in plane of triangle
    let det = edge1.dot(pv);
    if det.abs() < 1e-8 {
        return None;
    }
    let inv_det = 1.0 / det;

    // calculate distance from vert0 to ray origin
    let tv = ro - a;

    // calculate U parameter and test bounds
    let u = tv.dot(pv) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    // prepare to test V parameter
    let qv = tv.cross(edge1);

    // calculate V parameter and test bounds
    let v = rd.dot(qv) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(qv) * inv_det;
    Some(TriangleHit {
        t,
        barycentric: Vec2::new(u, v),
        backface: det < 0.0,
    })
}

fn intersect_aabb(aabb_min: Vec3, aabb_max: Vec3, ro: Vec3, inv_rd: Vec3, prev_min_t: f32) -> f32 {
    let t1 = (aabb_min - ro) * inv_rd;
    let t2 = (aabb_max - ro) * inv_rd;
    let tmin = t1.min(t2).max_element();
    let tmax = t1.max(t2).min_element();
    if tmax >= tmin && tmax > 0.0 && tmin < prev_min_t {
        tmin
    } else {
        f32::INFINITY
    }
}

/// Software intersector over a flattened, world-space triangle soup.
pub struct BVHReference<'a> {
    pub nodes: &'a [BVHNode],
    pub vertices: &'a [Vec4],
    pub triangles: &'a [TriangleRef],
}

impl<'a> BVHReference<'a> {
    fn intersect_front_to_back(&self, ray: &Ray, mask: u32) -> IntersectionRecord {
        let mut result = IntersectionRecord::default();
        if self.nodes.is_empty() {
            return result;
        }

        let inv_rd = ray.direction.recip();
        let mut closest = ray.max_distance;
        let mut stack = [0u32; STACK_SIZE];
        let mut stack_len = 1;

        while stack_len > 0 {
            stack_len -= 1;
            let node = &self.nodes[stack[stack_len] as usize];
            if node.is_leaf() {
                if intersect_aabb(node.aabb_min(), node.aabb_max(), ray.origin, inv_rd, closest).is_infinite() {
                    continue;
                }
                for i in 0..node.triangle_count() {
                    let triangle = &self.triangles[(node.first_triangle_index() + i) as usize];
                    if triangle.mask & mask == 0 {
                        continue;
                    }
                    let a = self.vertices[triangle.vertices.x as usize].xyz();
                    let b = self.vertices[triangle.vertices.y as usize].xyz();
                    let c = self.vertices[triangle.vertices.z as usize].xyz();

                    if let Some(hit) = muller_trumbore(ray.origin, ray.direction, a, b, c) {
                        if hit.t > ray.min_distance && hit.t < closest {
                            closest = hit.t;
                            result.distance = hit.t;
                            result.barycentric = hit.barycentric;
                            result.instance_id = triangle.instance_id;
                            result.geometry_id = triangle.geometry_id;
                            result.primitive_id = triangle.primitive_id();
                            result.set_hit(true);
                            result.set_backface(hit.backface);
                        }
                    }
                }
            } else {
                // find closest child
                let mut min_index = node.left_node_index();
                let mut max_index = node.right_node_index();
                let min_child = &self.nodes[min_index as usize];
                let max_child = &self.nodes[max_index as usize];
                let mut min_dist = intersect_aabb(min_child.aabb_min(), min_child.aabb_max(), ray.origin, inv_rd, closest);
                let mut max_dist = intersect_aabb(max_child.aabb_min(), max_child.aabb_max(), ray.origin, inv_rd, closest);
                if min_dist > max_dist {
                    core::mem::swap(&mut min_index, &mut max_index);
                    core::mem::swap(&mut min_dist, &mut max_dist);
                }

                // if min child isn't hit, both children aren't hit, so skip
                if min_dist.is_infinite() {
                    continue;
                }

                // push valid children in the best order
                let pushes = if max_dist.is_finite() { 2 } else { 1 };
                debug_assert!(
                    stack_len + pushes <= STACK_SIZE,
                    "BVH is deeper than the {} entry traversal stack",
                    STACK_SIZE
                );
                if max_dist.is_finite() && stack_len < STACK_SIZE {
                    stack[stack_len] = max_index;
                    stack_len += 1;
                }
                if stack_len < STACK_SIZE {
                    stack[stack_len] = min_index; // <-- this child will be popped first
                    stack_len += 1;
                }
            }
        }

        result
    }
}

impl<'a> Intersector for BVHReference<'a> {
    fn intersect(&self, ray: &Ray, mask: u32) -> Intersection {
        Intersection::new(*ray, self.intersect_front_to_back(ray, mask))
    }
}
