#![no_std]

use bytemuck::{Pod, Zeroable};
use glam::{UVec4, Vec2, Vec3, Vec4};

mod image_view;

pub use image_view::{AddressMode, Filter, ImageView, Sampler};

/// Minimum roughness used anywhere a microfacet lobe is evaluated or sampled.
pub const ROUGHNESS_FLOOR: f32 = 0.04;

/// Mask that makes every instance visible to a ray.
pub const RAY_MASK_ALL: u32 = u32::MAX;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PrelightConfig {
    pub sample_count: u32,
    pub specular_levels: u32,
    pub unused: [u32; 2],
}

impl Default for PrelightConfig {
    fn default() -> Self {
        Self {
            sample_count: 1024,
            specular_levels: 5,
            unused: [0; 2],
        }
    }
}

impl PrelightConfig {
    /// Face size of specular level `level` for a source cube with faces of `source_size`.
    pub fn specular_level_size(&self, source_size: u32, level: u32) -> u32 {
        (source_size >> level.min(31)).max(1)
    }

    /// Roughness that specular level `level` is convolved with.
    pub fn specular_level_roughness(&self, level: u32) -> f32 {
        if self.specular_levels <= 1 {
            return ROUGHNESS_FLOOR;
        }
        let roughness = level as f32 / (self.specular_levels - 1) as f32;
        roughness.max(ROUGHNESS_FLOOR)
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct TracingConfig {
    pub light_direction: Vec4, // xyz = direction toward the light
    pub light_color: Vec4,     // w = intensity
    pub ray_mask: u32,
    pub unused: [u32; 3],
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            light_direction: Vec4::new(0.0, 1.0, 0.0, 0.0),
            light_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            ray_mask: RAY_MASK_ALL,
            unused: [0; 3],
        }
    }
}

impl TracingConfig {
    pub fn light_radiance(&self) -> Vec3 {
        self.light_color.truncate() * self.light_color.w
    }
}

/// Per-triangle shading data: the raw vertex normals and texture coordinates.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Triangle {
    pub normals: [Vec3; 3],
    pub uvs: [Vec2; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Instance {
    pub mesh_id: u32,
    pub mask: u32,
}

/// Links a triangle in the intersection buffers back to the scene.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct TriangleRef {
    pub vertices: UVec4, // xyz = vertex indices, w = index into the triangle data buffer
    pub instance_id: u32,
    pub geometry_id: u32,
    pub mask: u32,
    pub unused: u32,
}

impl TriangleRef {
    pub fn primitive_id(&self) -> u32 {
        self.vertices.w
    }
}

/// Raw hit record as returned by an intersection query.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct IntersectionRecord {
    pub barycentric: Vec2,
    pub distance: f32,
    pub instance_id: u32,
    pub geometry_id: u32,
    pub primitive_id: u32,
    hit: u32,
    backface: u32,
}

impl Default for IntersectionRecord {
    fn default() -> Self {
        Self {
            barycentric: Vec2::ZERO,
            distance: f32::INFINITY,
            instance_id: 0,
            geometry_id: 0,
            primitive_id: 0,
            hit: 0,
            backface: 0,
        }
    }
}

impl IntersectionRecord {
    pub fn has_hit(&self) -> bool {
        self.hit != 0
    }

    pub fn set_hit(&mut self, hit: bool) {
        self.hit = if hit { 1 } else { 0 };
    }

    pub fn is_backface(&self) -> bool {
        self.backface != 0
    }

    pub fn set_backface(&mut self, backface: bool) {
        self.backface = if backface { 1 } else { 0 };
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct BVHNode {
    aabb_min: Vec4, // w = triangle count
    aabb_max: Vec4, // w = left_node if triangle_count is 0, first_triangle_index otherwise
}

impl Default for BVHNode {
    fn default() -> Self {
        Self {
            aabb_min: Vec4::new(f32::INFINITY, f32::INFINITY, f32::INFINITY, 0.0),
            aabb_max: Vec4::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY, 0.0),
        }
    }
}

impl BVHNode {
    pub fn triangle_count(&self) -> u32 {
        self.aabb_min.w.to_bits()
    }

    pub fn left_node_index(&self) -> u32 {
        self.aabb_max.w.to_bits()
    }

    pub fn right_node_index(&self) -> u32 {
        self.left_node_index() + 1
    }

    pub fn first_triangle_index(&self) -> u32 {
        self.aabb_max.w.to_bits()
    }

    pub fn aabb_min(&self) -> Vec3 {
        self.aabb_min.truncate()
    }

    pub fn aabb_max(&self) -> Vec3 {
        self.aabb_max.truncate()
    }

    pub fn is_leaf(&self) -> bool {
        self.triangle_count() > 0
    }

    pub fn set_triangle_count(&mut self, triangle_count: u32) {
        self.aabb_min.w = f32::from_bits(triangle_count);
    }

    pub fn set_left_node_index(&mut self, left_node_index: u32) {
        self.aabb_max.w = f32::from_bits(left_node_index);
    }

    pub fn set_first_triangle_index(&mut self, first_triangle_index: u32) {
        self.aabb_max.w = f32::from_bits(first_triangle_index);
    }

    pub fn set_aabb(&mut self, aabb_min: Vec3, aabb_max: Vec3) {
        self.aabb_min = aabb_min.extend(self.aabb_min.w);
        self.aabb_max = aabb_max.extend(self.aabb_max.w);
    }
}
