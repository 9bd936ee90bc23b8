use crate::core::block::{BlockType, VoxelCode, base_color, is_solid_code};
use crate::core::chunk::{Chunk, ChunkCoord};
use crate::core::face::Face;
use crate::render::mesh::{ChunkMesh, add_face};
use crate::world::store::World;

/// Small positional tint applied to surface voxels so large grass areas don't tile visibly.
fn surface_tint(color: [f32; 3], position: [f32; 3]) -> [f32; 3] {
    let variation = ((position[0] * 1.1 + position[2] * 0.7).sin() * 0.5 + 0.5) * 0.1;
    [
        (color[0] + variation * 0.5 - 0.025).clamp(0.0, 1.0),
        (color[1] + variation - 0.05).clamp(0.0, 1.0),
        color[2],
    ]
}

fn vertex_color(code: VoxelCode, position: [f32; 3]) -> [f32; 3] {
    let color = base_color(code);
    if code == BlockType::Grass.code() {
        surface_tint(color, position)
    } else {
        color
    }
}

/// Neighbor lookup that stays inside the chunk when it can and falls back to
/// world coordinates across the chunk border.
fn neighbor_is_solid(world: &World, chunk: &Chunk, local: [i32; 3], face: Face) -> bool {
    let [dx, dy, dz] = face.offset();
    let (nx, ny, nz) = (local[0] + dx, local[1] + dy, local[2] + dz);
    if chunk.contains_local(nx, ny, nz) {
        return is_solid_code(chunk.get(nx, ny, nz));
    }
    let [ox, oy, oz] = chunk.origin();
    world.is_solid(ox + nx, oy + ny, oz + nz)
}

/// Regenerates the full surface of one chunk. Missing chunks yield an empty mesh.
pub fn build_chunk_mesh(world: &World, coord: ChunkCoord) -> ChunkMesh {
    let Some(chunk) = world.chunk(coord) else {
        return ChunkMesh::default();
    };
    if chunk.is_empty() {
        return ChunkMesh::default();
    }

    let size = chunk.size();
    let scale = world.tile_size();
    let [ox, oy, oz] = chunk.origin();
    let mut mesh = ChunkMesh::default();

    for y in 0..size {
        for z in 0..size {
            for x in 0..size {
                let code = chunk.get(x, y, z);
                if !is_solid_code(code) {
                    continue;
                }
                let origin = [(ox + x) as f32, (oy + y) as f32, (oz + z) as f32];
                for face in Face::ALL {
                    if neighbor_is_solid(world, chunk, [x, y, z], face) {
                        continue;
                    }
                    add_face(&mut mesh, face, origin, scale, |p| vertex_color(code, p));
                }
            }
        }
    }

    tracing::trace!(
        "Meshed chunk ({}, {}): {} triangles",
        coord.x,
        coord.z,
        mesh.triangle_count()
    );
    mesh
}
