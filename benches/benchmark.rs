// This file contains benchmarks for the purpose of guarding against
// performance regressions. To run them, use `cargo bench`.

use glam::{Mat4, Vec2, Vec3, Vec4};
use tracelit::kernels::intersection::Ray;
use tracelit::scene::{InstanceData, MaterialTextures, MeshData, PieceData, TriangleGeometry};
use tracelit::shared_structs::{PrelightConfig, TracingConfig};
use tracelit::{Lighting, Scene, Texture, World};

use criterion::{criterion_group, criterion_main, Criterion};

fn gradient_cube(size: u32) -> Texture {
    let texels = (0..size * size * 6)
        .map(|i| {
            let t = i as f32 / (size * size * 6) as f32;
            Vec4::new(t, 1.0 - t, 0.5, 1.0)
        })
        .collect();
    Texture::new(size, size * 6, texels)
}

// A grid of quads, `cells` on a side.
fn grid_scene(cells: u32) -> Scene {
    let mut triangles = Vec::new();
    for y in 0..cells {
        for x in 0..cells {
            let corner = |dx: u32, dy: u32| Vec3::new((x + dx) as f32, (y + dy) as f32, 0.0);
            let geometry = |positions: [Vec3; 3]| TriangleGeometry {
                positions,
                normals: [Vec3::Z; 3],
                uvs: [Vec2::ZERO, Vec2::X, Vec2::Y],
            };
            triangles.push(geometry([corner(0, 0), corner(1, 0), corner(0, 1)]));
            triangles.push(geometry([corner(1, 0), corner(1, 1), corner(0, 1)]));
        }
    }
    Scene {
        materials: vec![MaterialTextures::uniform(Vec3::splat(0.8), 0.0, 0.4)],
        meshes: vec![MeshData {
            pieces: vec![PieceData { material: 0, triangles }],
        }],
        instances: vec![InstanceData {
            mesh: 0,
            mask: 1,
            transform: Mat4::IDENTITY,
        }],
    }
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let source = gradient_cube(32);
    let config = PrelightConfig {
        sample_count: 64,
        specular_levels: 5,
        ..Default::default()
    };
    let maps = tracelit::bake(&source, &config).unwrap();
    let lut = Texture::solid(1, 1, Vec4::new(1.0, 0.0, 0.0, 1.0));
    let lighting = Lighting {
        maps: &maps,
        lut: &lut,
        background: &source,
    };

    let cells = 64;
    let scene = grid_scene(cells);
    let world = World::build(&scene).unwrap();
    let rays: Vec<Ray> = (0..256 * 256)
        .map(|i| {
            let uv = Vec2::new((i % 256) as f32, (i / 256) as f32) / 256.0 * cells as f32;
            Ray::new(uv.extend(1.0), Vec3::new(0.1, 0.2, -1.0))
        })
        .collect();

    let mut group = c.benchmark_group("Performance regression tests");
    group.sample_size(10);
    group.bench_function("Prelight 32x32 cube, 256 samples", |b| {
        let config = PrelightConfig {
            sample_count: 256,
            ..config
        };
        b.iter(|| tracelit::bake(&source, &config))
    });
    group.bench_function("BVH build, 8192 triangles", |b| {
        b.iter(|| World::build(&scene))
    });
    group.bench_function("Shade 65536 rays", |b| {
        b.iter(|| tracelit::shade(&world, &scene, &lighting, &TracingConfig::default(), &rays))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
