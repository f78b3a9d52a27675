use std::time::Instant;

use glam::{UVec2, Vec4};
use kernels::coordinate::InScreen;
use kernels::cube::CubeView;
use kernels::prelight;
use rayon::prelude::*;
use shared_structs::PrelightConfig;

use crate::error::{Error, Result};
use crate::texture::Texture;

/// Baked image-based lighting for one source environment.
#[derive(Clone, Debug)]
pub struct PrelitMaps {
    pub irradiance: Texture,
    pub specular: Vec<Texture>, // level i is convolved with roughness i / (levels - 1)
}

impl PrelitMaps {
    pub fn irradiance_view(&self) -> Result<CubeView<'_>> {
        self.irradiance.cube_view()
    }

    /// Cube views of every specular level, ready for a `CubeChain`.
    pub fn specular_views(&self) -> Result<Vec<CubeView<'_>>> {
        if self.specular.is_empty() {
            return Err(Error::ZeroSpecularLevels);
        }
        self.specular.iter().map(Texture::cube_view).collect()
    }
}

// One texel per invocation, rows handed out to the rayon pool.
fn bake_cube(size: u32, texel: impl Fn(InScreen) -> Vec4 + Sync) -> Texture {
    let mut output = Texture::cube(size);
    output
        .texels
        .par_chunks_mut(size as usize)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                *out = texel(InScreen(UVec2::new(x as u32, y as u32)));
            }
        });
    output
}

pub fn bake_irradiance(source: &CubeView, sample_count: u32) -> Texture {
    let size = source.size();
    let start = Instant::now();
    let map = bake_cube(size, |coordinate| prelight::irradiance_at(source, coordinate, size, sample_count));
    log::debug!("Baked {size}x{size} irradiance in {:?}", start.elapsed());
    map
}

pub fn bake_specular(source: &CubeView, config: &PrelightConfig) -> Vec<Texture> {
    (0..config.specular_levels)
        .into_par_iter()
        .map(|level| {
            let size = config.specular_level_size(source.size(), level);
            let roughness = config.specular_level_roughness(level);
            let start = Instant::now();
            let map = bake_cube(size, |coordinate| {
                prelight::prefiltered_at(source, coordinate, size, roughness, config.sample_count)
            });
            log::debug!(
                "Baked specular level {level} ({size}x{size}, roughness {roughness:.2}) in {:?}",
                start.elapsed()
            );
            map
        })
        .collect()
}

/// Convolves `source` into irradiance and prefiltered specular cube atlases.
///
/// Each output texel is independent, and the diffuse and specular passes run concurrently.
/// Results are deterministic for a given source and configuration.
pub fn bake(source: &Texture, config: &PrelightConfig) -> Result<PrelitMaps> {
    if config.sample_count == 0 {
        return Err(Error::ZeroSampleCount);
    }
    if config.specular_levels == 0 {
        return Err(Error::ZeroSpecularLevels);
    }
    if !config.sample_count.is_power_of_two() {
        log::warn!(
            "Sample count {} is not a power of two, Hammersley points will be unevenly stratified",
            config.sample_count
        );
    }
    let source = source.cube_view()?;

    log::info!(
        "Prelighting {0}x{0} cube with {1} samples and {2} specular levels",
        source.size(),
        config.sample_count,
        config.specular_levels
    );
    let start = Instant::now();
    let (irradiance, specular) = rayon::join(
        || bake_irradiance(&source, config.sample_count),
        || bake_specular(&source, config),
    );
    log::info!("Prelight finished in {:?}", start.elapsed());

    Ok(PrelitMaps { irradiance, specular })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_configs_are_rejected() {
        let source = Texture::cube(2);
        let config = PrelightConfig {
            sample_count: 0,
            ..Default::default()
        };
        assert!(matches!(bake(&source, &config), Err(Error::ZeroSampleCount)));

        let config = PrelightConfig {
            specular_levels: 0,
            ..Default::default()
        };
        assert!(matches!(bake(&source, &config), Err(Error::ZeroSpecularLevels)));

        let flat = Texture::solid(2, 2, Vec4::ONE);
        assert!(matches!(bake(&flat, &PrelightConfig::default()), Err(Error::InvalidCubeAtlas { .. })));
    }

    #[test]
    fn specular_levels_halve_in_size() {
        let source = Texture::solid(8, 48, Vec4::ONE);
        let config = PrelightConfig {
            sample_count: 4,
            specular_levels: 5,
            ..Default::default()
        };
        let maps = bake(&source, &config).unwrap();
        assert_eq!((maps.irradiance.width, maps.irradiance.height), (8, 48));
        let sizes: Vec<_> = maps.specular.iter().map(|level| (level.width, level.height)).collect();
        assert_eq!(sizes, vec![(8, 48), (4, 24), (2, 12), (1, 6), (1, 6)]);
    }
}
