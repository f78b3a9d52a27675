use std::time::Instant;

use glam::{Vec3, Vec4, Vec4Swizzles};
use shared_structs::{BVHNode, TriangleRef};

const MAX_LEAF_TRIANGLES: u32 = 2;

trait BVHNodeExtensions {
    fn update_aabb(&mut self, vertices: &[Vec4], triangles: &[TriangleRef], indirect_indices: &[u32]);
}

impl BVHNodeExtensions for BVHNode {
    fn update_aabb(&mut self, vertices: &[Vec4], triangles: &[TriangleRef], indirect_indices: &[u32]) {
        let mut aabb_min = Vec3::splat(f32::INFINITY);
        let mut aabb_max = Vec3::splat(f32::NEG_INFINITY);

        for i in 0..self.triangle_count() {
            let indirect_index = indirect_indices[(self.first_triangle_index() + i) as usize];
            let index = triangles[indirect_index as usize].vertices;
            let v0 = vertices[index.x as usize].xyz();
            let v1 = vertices[index.y as usize].xyz();
            let v2 = vertices[index.z as usize].xyz();

            aabb_min = aabb_min.min(v0.min(v1).min(v2));
            aabb_max = aabb_max.max(v0.max(v1).max(v2));
        }

        self.set_aabb(aabb_min, aabb_max);
    }
}

/// Midpoint-split bounding volume hierarchy. Leaves index straight into the
/// reordered `triangles` they were built from.
#[derive(Clone, Debug, Default)]
pub struct BVH {
    pub nodes: Vec<BVHNode>,
}

impl BVH {
    /// Builds over `triangles`, reordering them so every leaf owns a contiguous range.
    pub fn build(vertices: &[Vec4], triangles: &mut Vec<TriangleRef>) -> BVH {
        if triangles.is_empty() {
            return BVH::default();
        }
        let start = Instant::now();

        let mut indirect_indices: Vec<u32> = (0..triangles.len() as u32).collect();
        let centroids = triangles
            .iter()
            .map(|triangle| {
                let ind = triangle.vertices;
                let v0 = vertices[ind.x as usize].xyz();
                let v1 = vertices[ind.y as usize].xyz();
                let v2 = vertices[ind.z as usize].xyz();
                (v0 + v1 + v2) / 3.0
            })
            .collect::<Vec<_>>();

        let mut nodes = vec![BVHNode::default(); triangles.len() * 2 - 1];
        let mut node_count = 1;

        let root = &mut nodes[0];
        root.set_first_triangle_index(0);
        root.set_triangle_count(triangles.len() as u32);
        root.update_aabb(vertices, triangles, &indirect_indices);

        let mut stack = vec![0];
        while let Some(node_idx) = stack.pop() {
            let node = &mut nodes[node_idx];
            if node.triangle_count() <= MAX_LEAF_TRIANGLES {
                continue;
            }

            // calculate the max axis
            let extent = node.aabb_max() - node.aabb_min();
            let mut axis = 0;
            if extent.y > extent.x {
                axis = 1;
            }
            if extent.z > extent[axis] {
                axis = 2;
            }

            // split along the axis
            let split = node.aabb_min()[axis] + extent[axis] * 0.5;

            // partition the triangles, [first, a) goes left
            let first = node.first_triangle_index() as usize;
            let mut a = first;
            let mut b = first + node.triangle_count() as usize;
            while a < b {
                let centroid = centroids[indirect_indices[a] as usize][axis];
                if centroid < split {
                    a += 1;
                } else {
                    b -= 1;
                    indirect_indices.swap(a, b);
                }
            }

            // if either side is empty (no split), then we're done
            let left_count = (a - first) as u32;
            if left_count == 0 || left_count == node.triangle_count() {
                continue;
            }

            // create children
            let prev_triangle_count = node.triangle_count();
            let left_idx = node_count;
            let right_idx = node_count + 1;
            node_count += 2;
            node.set_left_node_index(left_idx as u32);
            node.set_triangle_count(0);
            nodes[left_idx].set_first_triangle_index(first as u32);
            nodes[left_idx].set_triangle_count(left_count);
            nodes[right_idx].set_first_triangle_index(a as u32);
            nodes[right_idx].set_triangle_count(prev_triangle_count - left_count);
            nodes[left_idx].update_aabb(vertices, triangles, &indirect_indices);
            nodes[right_idx].update_aabb(vertices, triangles, &indirect_indices);

            // push children onto the stack
            stack.push(right_idx);
            stack.push(left_idx);
        }

        nodes.truncate(node_count);
        *triangles = indirect_indices.iter().map(|&i| triangles[i as usize]).collect();

        log::debug!(
            "Built BVH with {} nodes over {} triangles in {:?}",
            nodes.len(),
            triangles.len(),
            start.elapsed()
        );
        Self { nodes }
    }
}
