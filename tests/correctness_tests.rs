use core::f32::consts::PI;

use approx::assert_abs_diff_eq;
use glam::{Mat4, UVec2, Vec2, Vec3, Vec4};
use rand::{Rng, SeedableRng};
use tracelit::kernels::coordinate::{self, Face, InFace, InScreen};
use tracelit::kernels::geometry::Normalized;
use tracelit::kernels::intersection::Ray;
use tracelit::kernels::prelight;
use tracelit::scene::{InstanceData, MaterialTextures, MeshData, PieceData, TriangleGeometry};
use tracelit::shared_structs::{PrelightConfig, Sampler, TracingConfig};
use tracelit::{Error, Lighting, PrelitMaps, Scene, Texture, World};

fn uniform_cube(size: u32, color: Vec4) -> Texture {
    Texture::solid(size, size * 6, color)
}

fn noisy_cube(size: u32, seed: u64) -> Texture {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let texels = (0..size * size * 6)
        .map(|_| Vec4::new(rng.gen(), rng.gen(), rng.gen(), 1.0))
        .collect();
    Texture::new(size, size * 6, texels)
}

fn furnace_test(color: Vec4, config: PrelightConfig) {
    let source = uniform_cube(4, color);
    let maps = tracelit::bake(&source, &config).unwrap();

    for texel in maps.irradiance.texels.iter().chain(maps.specular.iter().flat_map(|level| level.texels.iter())) {
        assert_abs_diff_eq!(texel.x, color.x, epsilon = 1e-5);
        assert_abs_diff_eq!(texel.y, color.y, epsilon = 1e-5);
        assert_abs_diff_eq!(texel.z, color.z, epsilon = 1e-5);
    }
}

#[test]
fn furnace_test_white() {
    furnace_test(
        Vec4::ONE,
        PrelightConfig {
            sample_count: 64,
            specular_levels: 3,
            ..Default::default()
        },
    );
}

#[test]
fn furnace_test_tinted() {
    furnace_test(
        Vec4::new(0.8, 0.4, 0.1, 1.0),
        PrelightConfig {
            sample_count: 32,
            specular_levels: 1,
            ..Default::default()
        },
    );
}

#[test]
fn bake_is_deterministic() {
    let source = noisy_cube(8, 42);
    let config = PrelightConfig {
        sample_count: 16,
        specular_levels: 4,
        ..Default::default()
    };
    let first = tracelit::bake(&source, &config).unwrap();
    let second = tracelit::bake(&source, &config).unwrap();
    assert_eq!(first.irradiance, second.irradiance);
    assert_eq!(first.specular, second.specular);
}

#[test]
fn baked_map_dimensions() {
    let source = noisy_cube(16, 1);
    let config = PrelightConfig {
        sample_count: 4,
        specular_levels: 3,
        ..Default::default()
    };
    let maps = tracelit::bake(&source, &config).unwrap();
    assert_eq!((maps.irradiance.width, maps.irradiance.height), (16, 96));
    let sizes: Vec<_> = maps.specular.iter().map(|level| (level.width, level.height)).collect();
    assert_eq!(sizes, vec![(16, 96), (8, 48), (4, 24)]);
}

#[test]
fn diffuse_bake_is_smoother_than_source() {
    let source = noisy_cube(8, 3);
    let maps = tracelit::bake(
        &source,
        &PrelightConfig {
            sample_count: 128,
            specular_levels: 1,
            ..Default::default()
        },
    )
    .unwrap();

    let spread = |texture: &Texture| {
        let (min, max) = texture
            .texels
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), texel| (min.min(texel.x), max.max(texel.x)));
        max - min
    };
    assert!(spread(&maps.irradiance) < spread(&source) * 0.5);
}

// Only the +Z face is lit.
fn one_face_lit_cube(size: u32) -> Texture {
    let face_texels = (size * size) as usize;
    let mut texels = vec![Vec4::new(0.0, 0.0, 0.0, 1.0); face_texels * 6];
    let lit = Face::PositiveZ.index() as usize * face_texels;
    texels[lit..lit + face_texels].fill(Vec4::ONE);
    Texture::new(size, size * 6, texels)
}

#[test]
fn single_texel_bake_reads_back_along_the_axis() {
    let source = one_face_lit_cube(1);
    let config = PrelightConfig {
        sample_count: 64,
        specular_levels: 1,
        ..Default::default()
    };
    let maps = tracelit::bake(&source, &config).unwrap();
    let levels = maps.specular_views().unwrap();

    let roughness = config.specular_level_roughness(0);
    let expected = prelight::prefiltered(&source.cube_view().unwrap(), &Normalized::Z, roughness, 64);
    let baked = levels[0].sample(Sampler::LINEAR_CLAMP, Vec3::Z);
    assert_abs_diff_eq!(baked.x, expected.x, epsilon = 1e-6);
    assert_abs_diff_eq!(baked.x, 1.0, epsilon = 1e-6);
}

#[test]
fn baked_levels_read_back_their_convolution() {
    let source = one_face_lit_cube(16);
    let source_view = source.cube_view().unwrap();
    let config = PrelightConfig {
        sample_count: 64,
        specular_levels: 5,
        ..Default::default()
    };
    let maps = tracelit::bake(&source, &config).unwrap();
    let levels = maps.specular_views().unwrap();

    for (level, view) in levels.iter().enumerate() {
        let roughness = config.specular_level_roughness(level as u32);
        let size = view.size();
        for y in 0..size {
            for x in 0..size {
                let texel = InScreen::from_face(Face::PositiveZ, InFace(UVec2::new(x, y)), size);
                let direction = coordinate::direction_for(texel, size);
                let expected = prelight::prefiltered(&source_view, &direction, roughness, config.sample_count);
                let baked = view.sample(Sampler::LINEAR_CLAMP, direction.value());
                assert_abs_diff_eq!(baked.x, expected.x, epsilon = 1e-4);
            }
        }
    }

    // The last level is a single texel per face, convolved around the face axis.
    let last = levels.len() - 1;
    let roughness = config.specular_level_roughness(last as u32);
    let expected = prelight::prefiltered(&source_view, &Normalized::Z, roughness, 64);
    assert_abs_diff_eq!(levels[last].sample(Sampler::LINEAR_CLAMP, Vec3::Z).x, expected.x, epsilon = 1e-6);
}

const BACKGROUND: Vec4 = Vec4::new(0.1, 0.2, 0.3, 1.0);
const AMBIENT: Vec4 = Vec4::new(0.5, 0.5, 0.5, 1.0);

// A unit quad in the z = 0 plane, facing +Z.
fn quad_scene(mask: u32) -> Scene {
    let geometry = |positions: [Vec3; 3]| TriangleGeometry {
        positions,
        normals: [Vec3::Z; 3],
        uvs: [Vec2::ZERO, Vec2::X, Vec2::Y],
    };
    Scene {
        materials: vec![MaterialTextures::uniform(Vec3::ONE, 0.0, 0.5)],
        meshes: vec![MeshData {
            pieces: vec![PieceData {
                material: 0,
                triangles: vec![
                    geometry([Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)]),
                    geometry([Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 0.0)]),
                ],
            }],
        }],
        instances: vec![InstanceData {
            mesh: 0,
            mask,
            transform: Mat4::IDENTITY,
        }],
    }
}

struct Fixture {
    maps: PrelitMaps,
    lut: Texture,
    background: Texture,
}

impl Fixture {
    fn new() -> Self {
        let config = PrelightConfig {
            sample_count: 16,
            specular_levels: 3,
            ..Default::default()
        };
        Self {
            maps: tracelit::bake(&uniform_cube(2, AMBIENT), &config).unwrap(),
            lut: Texture::solid(1, 1, Vec4::new(1.0, 0.0, 0.0, 1.0)),
            background: uniform_cube(1, BACKGROUND),
        }
    }

    fn lighting(&self) -> Lighting<'_> {
        Lighting {
            maps: &self.maps,
            lut: &self.lut,
            background: &self.background,
        }
    }
}

fn light_from_above() -> TracingConfig {
    TracingConfig {
        light_direction: Vec4::new(0.0, 0.0, 1.0, 0.0),
        ..Default::default()
    }
}

#[test]
fn shading_a_single_quad() {
    let scene = quad_scene(1);
    let world = World::build(&scene).unwrap();
    let fixture = Fixture::new();

    let rays = [
        Ray::new(Vec3::new(0.25, 0.25, 1.0), Vec3::NEG_Z),
        Ray::new(Vec3::new(5.0, 5.0, 1.0), Vec3::NEG_Z),
        Ray::new(Vec3::new(0.75, 0.75, 1.0), Vec3::NEG_Z),
    ];
    let output = tracelit::shade(&world, &scene, &fixture.lighting(), &light_from_above(), &rays).unwrap();

    // Rough white dielectric seen head-on under a head-on light:
    // (1 - F0) / pi diffuse, D = 16 / pi at roughness 0.5, plus ambient.
    let direct = 0.96 / PI + 16.0 / PI * 0.04 / 4.0;
    let ambient = 1.0 * AMBIENT.x + 0.04 * AMBIENT.x;
    for hit in [output[0], output[2]] {
        assert_abs_diff_eq!(hit.x, direct + ambient, epsilon = 1e-3);
        assert_abs_diff_eq!(hit.y, hit.x, epsilon = 1e-6);
        assert_eq!(hit.w, 1.0);
    }
    assert!(output[1].abs_diff_eq(BACKGROUND, 1e-6));
}

#[test]
fn masked_instances_are_invisible() {
    let scene = quad_scene(0b10);
    let world = World::build(&scene).unwrap();
    let fixture = Fixture::new();
    let rays = [Ray::new(Vec3::new(0.25, 0.25, 1.0), Vec3::NEG_Z)];

    let config = TracingConfig {
        ray_mask: 0b01,
        ..light_from_above()
    };
    let output = tracelit::shade(&world, &scene, &fixture.lighting(), &config, &rays).unwrap();
    assert!(output[0].abs_diff_eq(BACKGROUND, 1e-6));

    let config = TracingConfig {
        ray_mask: 0b11,
        ..light_from_above()
    };
    let output = tracelit::shade(&world, &scene, &fixture.lighting(), &config, &rays).unwrap();
    assert!(!output[0].abs_diff_eq(BACKGROUND, 1e-3));
}

#[test]
fn light_behind_the_surface_leaves_only_ambient() {
    let scene = quad_scene(1);
    let world = World::build(&scene).unwrap();
    let fixture = Fixture::new();
    let rays = [Ray::new(Vec3::new(0.25, 0.25, 1.0), Vec3::NEG_Z)];

    let config = TracingConfig {
        light_direction: Vec4::new(0.0, 0.0, -1.0, 0.0),
        ..Default::default()
    };
    let output = tracelit::shade(&world, &scene, &fixture.lighting(), &config, &rays).unwrap();
    assert_abs_diff_eq!(output[0].x, 1.04 * AMBIENT.x, epsilon = 1e-4);
}

#[test]
fn output_must_match_ray_count() {
    let scene = quad_scene(1);
    let world = World::build(&scene).unwrap();
    let fixture = Fixture::new();
    let rays = [Ray::new(Vec3::ZERO, Vec3::Z); 3];
    let mut output = vec![Vec4::ZERO; 2];

    let result = tracelit::trace::shade_into(
        &world,
        &scene,
        &fixture.lighting(),
        &TracingConfig::default(),
        &rays,
        &mut output,
    );
    assert!(matches!(result, Err(Error::RayBufferMismatch { rays: 3, outputs: 2 })));
}
