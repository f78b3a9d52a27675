use std::time::Instant;

use glam::Vec4;
use kernels::cube::CubeChain;
use kernels::env::{Background, Env};
use kernels::intersection::Ray;
use kernels::SceneBuffers;
use rayon::prelude::*;
use shared_structs::TracingConfig;

use crate::error::{Error, Result};
use crate::prelight::PrelitMaps;
use crate::scene::{self, Scene, World};
use crate::texture::Texture;

/// Everything ambient shading reads: the baked maps and the split-sum BRDF table.
pub struct Lighting<'a> {
    pub maps: &'a PrelitMaps,
    pub lut: &'a Texture,
    pub background: &'a Texture,
}

/// Shades `rays` into `output`, one slot per ray.
pub fn shade_into(
    world: &World,
    scene: &Scene,
    lighting: &Lighting,
    config: &TracingConfig,
    rays: &[Ray],
    output: &mut [Vec4],
) -> Result<()> {
    if rays.len() != output.len() {
        return Err(Error::RayBufferMismatch {
            rays: rays.len(),
            outputs: output.len(),
        });
    }
    scene.validate()?;

    let pieces = scene.pieces();
    let meshes = scene::meshes(&pieces);
    let buffers = SceneBuffers {
        triangles: &world.triangles,
        instances: &world.instances,
        meshes: &meshes,
    };
    let specular_levels = lighting.maps.specular_views()?;
    let env = Env::new(
        lighting.maps.irradiance_view()?,
        CubeChain::new(&specular_levels),
        lighting.lut.view(),
    );
    let background = Background {
        cube: lighting.background.cube_view()?,
    };
    let intersector = world.intersector();

    let start = Instant::now();
    output.par_iter_mut().zip(rays.par_iter()).for_each(|(out, ray)| {
        let radiance = kernels::shade_ray(config, ray, &intersector, &buffers, &env, &background);
        *out = radiance.extend(1.0);
    });
    log::debug!("Shaded {} rays in {:?}", rays.len(), start.elapsed());
    Ok(())
}

pub fn shade(
    world: &World,
    scene: &Scene,
    lighting: &Lighting,
    config: &TracingConfig,
    rays: &[Ray],
) -> Result<Vec<Vec4>> {
    let mut output = vec![Vec4::ZERO; rays.len()];
    shade_into(world, scene, lighting, config, rays, &mut output)?;
    Ok(output)
}
