use glam::{Vec3, Vec4Swizzles};
use shared_structs::{Instance, TracingConfig, Triangle};

pub mod bsdf;
pub mod coordinate;
pub mod cube;
pub mod env;
pub mod geometry;
pub mod intersection;
pub mod material;
pub mod mesh;
pub mod prelight;
pub mod primitive;
pub mod sample;
pub mod sequence;
pub mod surface;
pub mod util;

use env::{Background, Env};
use intersection::{Intersector, Ray};
use mesh::Mesh;
use surface::Surface;

/// Read-only scene buffers a shading invocation resolves hits against.
#[derive(Clone, Copy)]
pub struct SceneBuffers<'a> {
    pub triangles: &'a [Triangle],
    pub instances: &'a [Instance],
    pub meshes: &'a [Mesh<'a>],
}

/// Radiance arriving along `ray`: one directional light plus baked ambient
/// on a hit, the background otherwise.
pub fn shade_ray<I: Intersector>(
    config: &TracingConfig,
    ray: &Ray,
    intersector: &I,
    scene: &SceneBuffers,
    env: &Env,
    background: &Background,
) -> Vec3 {
    let intersection = intersector.intersect(ray, config.ray_mask);
    if !intersection.has() {
        return util::mask_nan(background.color_for(ray));
    }

    let primitive = intersection.to_primitive(scene.triangles);
    let piece = intersection.piece_in(scene.instances, scene.meshes);
    let surface = Surface::new(primitive, piece.material);

    let view = geometry::normalize(-ray.direction);
    let light = geometry::normalize(config.light_direction.xyz());

    let direct = surface.color_with(&light, &view) * config.light_radiance();
    let ambient = env.compute(&surface, &view);
    util::mask_nan(direct + ambient)
}
