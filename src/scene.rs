use glam::{Mat3, Mat4, UVec4, Vec2, Vec3, Vec4};
use kernels::intersection::BVHReference;
use kernels::material::Material;
use kernels::mesh::{Mesh, Piece};
use shared_structs::{Instance, Triangle, TriangleRef};

use crate::bvh::BVH;
use crate::error::{Error, Result};
use crate::texture::Texture;

pub struct MaterialTextures {
    pub albedo: Texture,
    pub metal_roughness: Texture, // R = metalness, G = roughness
}

impl MaterialTextures {
    /// Untextured material with a constant base color, metalness and roughness.
    pub fn uniform(base_color: Vec3, metalness: f32, roughness: f32) -> Self {
        Self {
            albedo: Texture::solid(1, 1, base_color.extend(1.0)),
            metal_roughness: Texture::solid(1, 1, Vec4::new(metalness, roughness, 0.0, 1.0)),
        }
    }

    pub fn material(&self) -> Material<'_> {
        Material::new(self.albedo.view(), self.metal_roughness.view())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangleGeometry {
    pub positions: [Vec3; 3],
    pub normals: [Vec3; 3],
    pub uvs: [Vec2; 3],
}

pub struct PieceData {
    pub material: usize,
    pub triangles: Vec<TriangleGeometry>,
}

pub struct MeshData {
    pub pieces: Vec<PieceData>,
}

pub struct InstanceData {
    pub mesh: usize,
    pub mask: u32,
    pub transform: Mat4,
}

/// Host-side scene: everything lives in object space and is referenced by index.
#[derive(Default)]
pub struct Scene {
    pub materials: Vec<MaterialTextures>,
    pub meshes: Vec<MeshData>,
    pub instances: Vec<InstanceData>,
}

impl Scene {
    pub fn validate(&self) -> Result<()> {
        for (mesh_index, mesh) in self.meshes.iter().enumerate() {
            for (piece_index, piece) in mesh.pieces.iter().enumerate() {
                if piece.material >= self.materials.len() {
                    return Err(Error::InvalidMaterialIndex {
                        mesh: mesh_index,
                        piece: piece_index,
                        material: piece.material,
                    });
                }
            }
        }
        for (instance_index, instance) in self.instances.iter().enumerate() {
            if instance.mesh >= self.meshes.len() {
                return Err(Error::InvalidMeshIndex {
                    instance: instance_index,
                    mesh: instance.mesh,
                });
            }
        }
        Ok(())
    }

    /// Per-mesh piece lists in the layout the shading kernels index into.
    pub fn pieces(&self) -> Vec<Vec<Piece<'_>>> {
        self.meshes
            .iter()
            .map(|mesh| {
                mesh.pieces
                    .iter()
                    .map(|piece| Piece {
                        material: self.materials[piece.material].material(),
                    })
                    .collect()
            })
            .collect()
    }
}

pub fn meshes<'a>(pieces: &'a [Vec<Piece<'a>>]) -> Vec<Mesh<'a>> {
    pieces.iter().map(|pieces| Mesh { pieces: pieces.as_slice() }).collect()
}

/// The scene flattened into world-space buffers plus the BVH over them.
pub struct World {
    pub vertices: Vec<Vec4>,
    pub triangle_refs: Vec<TriangleRef>,
    pub triangles: Vec<Triangle>,
    pub instances: Vec<Instance>,
    pub bvh: BVH,
}

impl World {
    pub fn build(scene: &Scene) -> Result<World> {
        scene.validate()?;

        let mut vertices = Vec::new();
        let mut triangle_refs = Vec::new();
        let mut triangles = Vec::new();
        let mut instances = Vec::with_capacity(scene.instances.len());

        for (instance_id, instance) in scene.instances.iter().enumerate() {
            instances.push(Instance {
                mesh_id: instance.mesh as u32,
                mask: instance.mask,
            });
            let normal_transform = Mat3::from_mat4(instance.transform).inverse().transpose();

            for (geometry_id, piece) in scene.meshes[instance.mesh].pieces.iter().enumerate() {
                for geometry in &piece.triangles {
                    let base = vertices.len() as u32;
                    for position in geometry.positions {
                        vertices.push(instance.transform.transform_point3(position).extend(1.0));
                    }
                    triangle_refs.push(TriangleRef {
                        vertices: UVec4::new(base, base + 1, base + 2, triangles.len() as u32),
                        instance_id: instance_id as u32,
                        geometry_id: geometry_id as u32,
                        mask: instance.mask,
                        unused: 0,
                    });
                    triangles.push(Triangle {
                        normals: geometry.normals.map(|normal| normal_transform * normal),
                        uvs: geometry.uvs,
                    });
                }
            }
        }

        let bvh = BVH::build(&vertices, &mut triangle_refs);
        log::info!(
            "Flattened {} instances into {} triangles",
            instances.len(),
            triangles.len()
        );

        Ok(World {
            vertices,
            triangle_refs,
            triangles,
            instances,
            bvh,
        })
    }

    pub fn intersector(&self) -> BVHReference<'_> {
        BVHReference {
            nodes: &self.bvh.nodes,
            vertices: &self.vertices,
            triangles: &self.triangle_refs,
        }
    }
}
