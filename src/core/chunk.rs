use serde::{Deserialize, Serialize};

use crate::core::block::{AIR, VoxelCode, is_solid_code};
use crate::render::mesh::ChunkMesh;

/// Horizontal chunk coordinate. The world has a single vertical layer of chunks.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from((x, z): (i32, i32)) -> Self {
        Self { x, z }
    }
}

/// A cube of `size³` voxel codes plus the geometry last generated from them.
pub struct Chunk {
    coord: ChunkCoord,
    size: i32,
    voxels: Vec<VoxelCode>,
    solid_count: usize,
    mesh: Option<ChunkMesh>,
    mesh_dirty: bool,
}

impl Chunk {
    pub fn new(coord: ChunkCoord, size: i32) -> Self {
        let size = size.max(1);
        let edge = size as usize;
        Chunk {
            coord,
            size,
            voxels: vec![AIR; edge * edge * edge],
            solid_count: 0,
            mesh: None,
            mesh_dirty: true,
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    /// World voxel coordinate of local `(0, 0, 0)`.
    pub fn origin(&self) -> [i32; 3] {
        [self.coord.x * self.size, 0, self.coord.z * self.size]
    }

    pub fn contains_local(&self, x: i32, y: i32, z: i32) -> bool {
        (0..self.size).contains(&x) && (0..self.size).contains(&y) && (0..self.size).contains(&z)
    }

    /// The only place that turns local coordinates into a slot of `voxels`.
    pub fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if !self.contains_local(x, y, z) {
            return None;
        }
        let size = self.size as usize;
        Some((y as usize * size + z as usize) * size + x as usize)
    }

    pub fn get(&self, x: i32, y: i32, z: i32) -> VoxelCode {
        self.index(x, y, z).map_or(AIR, |i| self.voxels[i])
    }

    /// Writes a voxel and marks the mesh dirty. Returns `false` when the
    /// coordinate is outside the chunk, in which case nothing changes.
    pub fn set(&mut self, x: i32, y: i32, z: i32, code: VoxelCode) -> bool {
        let Some(i) = self.index(x, y, z) else {
            return false;
        };
        let previous = self.voxels[i];
        match (is_solid_code(previous), is_solid_code(code)) {
            (false, true) => self.solid_count += 1,
            (true, false) => self.solid_count -= 1,
            _ => {}
        }
        self.voxels[i] = code;
        self.mesh_dirty = true;
        true
    }

    pub fn voxels(&self) -> &[VoxelCode] {
        &self.voxels
    }

    pub fn solid_count(&self) -> usize {
        self.solid_count
    }

    pub fn is_empty(&self) -> bool {
        self.solid_count == 0
    }

    pub fn mesh(&self) -> Option<&ChunkMesh> {
        self.mesh.as_ref()
    }

    pub fn set_mesh(&mut self, mesh: ChunkMesh) {
        self.mesh = Some(mesh);
        self.mesh_dirty = false;
    }

    pub fn is_mesh_dirty(&self) -> bool {
        self.mesh_dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_follows_y_then_z_then_x_layout() {
        let chunk = Chunk::new(ChunkCoord::new(0, 0), 4);
        assert_eq!(chunk.index(0, 0, 0), Some(0));
        assert_eq!(chunk.index(1, 0, 0), Some(1));
        assert_eq!(chunk.index(0, 0, 1), Some(4));
        assert_eq!(chunk.index(0, 1, 0), Some(16));
        assert_eq!(chunk.index(3, 3, 3), Some(63));
    }

    #[test]
    fn index_rejects_out_of_range() {
        let chunk = Chunk::new(ChunkCoord::new(0, 0), 4);
        assert_eq!(chunk.index(-1, 0, 0), None);
        assert_eq!(chunk.index(0, 4, 0), None);
        assert_eq!(chunk.index(0, 0, 4), None);
        assert_eq!(chunk.get(10, 10, 10), AIR);
    }

    #[test]
    fn set_tracks_solid_count_and_dirtiness() {
        let mut chunk = Chunk::new(ChunkCoord::new(1, 2), 4);
        chunk.set_mesh(ChunkMesh::default());
        assert!(!chunk.is_mesh_dirty());

        assert!(chunk.set(1, 1, 1, 3));
        assert!(chunk.is_mesh_dirty());
        assert_eq!(chunk.solid_count(), 1);

        assert!(chunk.set(1, 1, 1, 2));
        assert_eq!(chunk.solid_count(), 1);

        assert!(chunk.set(1, 1, 1, AIR));
        assert!(chunk.is_empty());

        assert!(!chunk.set(4, 0, 0, 1));
        assert!(chunk.is_empty());
    }

    #[test]
    fn origin_scales_by_chunk_size() {
        let chunk = Chunk::new(ChunkCoord::new(2, 3), 16);
        assert_eq!(chunk.origin(), [32, 0, 48]);
    }
}
