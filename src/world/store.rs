use rustc_hash::FxHashMap;

use crate::core::block::{AIR, VoxelCode, is_solid_code};
use crate::core::chunk::{Chunk, ChunkCoord};
use crate::render::mesh::ChunkMesh;
use crate::render::mesher::build_chunk_mesh;
use crate::utils::settings::WorldSettings;
use crate::world::generator::TerrainGenerator;

/// World-scale parameters, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldParams {
    /// Voxels per chunk edge. Also the height of the world.
    pub chunk_size: i32,
    /// Chunks per horizontal edge.
    pub world_size: i32,
    /// World units per voxel.
    pub tile_size: f32,
}

impl Default for WorldParams {
    fn default() -> Self {
        WorldSettings::default().into()
    }
}

impl From<&WorldSettings> for WorldParams {
    fn from(settings: &WorldSettings) -> Self {
        WorldParams {
            chunk_size: settings.chunk_size as i32,
            world_size: settings.world_size as i32,
            tile_size: settings.tile_size,
        }
    }
}

impl From<WorldSettings> for WorldParams {
    fn from(settings: WorldSettings) -> Self {
        (&settings).into()
    }
}

/// The chunk store: a fixed `world_size × world_size` grid of chunks.
pub struct World {
    params: WorldParams,
    chunks: FxHashMap<ChunkCoord, Chunk>,
}

impl World {
    /// Allocates every chunk of the grid, filled with air.
    pub fn new(params: WorldParams) -> Self {
        let params = WorldParams {
            chunk_size: params.chunk_size.max(1),
            world_size: params.world_size.max(0),
            tile_size: params.tile_size,
        };
        let mut chunks = FxHashMap::default();
        for cx in 0..params.world_size {
            for cz in 0..params.world_size {
                let coord = ChunkCoord::new(cx, cz);
                chunks.insert(coord, Chunk::new(coord, params.chunk_size));
            }
        }
        World { params, chunks }
    }

    /// Fills every chunk from the terrain height field. Meshes are left dirty.
    pub fn generate(&mut self, generator: &TerrainGenerator) {
        for chunk in self.chunks.values_mut() {
            generator.fill_chunk(chunk);
        }
        tracing::info!(
            "Generated {} chunks ({}x{} voxels per layer)",
            self.chunks.len(),
            self.extent(),
            self.extent()
        );
    }

    pub fn params(&self) -> WorldParams {
        self.params
    }

    pub fn chunk_size(&self) -> i32 {
        self.params.chunk_size
    }

    pub fn world_size(&self) -> i32 {
        self.params.world_size
    }

    pub fn tile_size(&self) -> f32 {
        self.params.tile_size
    }

    /// World size in voxels along X and along Z.
    pub fn extent(&self) -> i32 {
        self.params.world_size * self.params.chunk_size
    }

    pub fn chunk_coord_of(&self, wx: i32, wz: i32) -> ChunkCoord {
        ChunkCoord::new(
            wx.div_euclid(self.params.chunk_size),
            wz.div_euclid(self.params.chunk_size),
        )
    }

    /// Splits a world voxel coordinate into its chunk and local coordinate, or
    /// `None` when it lies outside the world.
    fn locate(&self, wx: i32, wy: i32, wz: i32) -> Option<(ChunkCoord, [i32; 3])> {
        let size = self.params.chunk_size;
        if !(0..size).contains(&wy) {
            return None;
        }
        let coord = self.chunk_coord_of(wx, wz);
        let range = 0..self.params.world_size;
        if !range.contains(&coord.x) || !range.contains(&coord.z) {
            return None;
        }
        Some((coord, [wx.rem_euclid(size), wy, wz.rem_euclid(size)]))
    }

    pub fn get_voxel(&self, wx: i32, wy: i32, wz: i32) -> VoxelCode {
        self.locate(wx, wy, wz)
            .and_then(|(coord, [lx, ly, lz])| self.chunks.get(&coord).map(|c| c.get(lx, ly, lz)))
            .unwrap_or(AIR)
    }

    /// Overwrites one voxel. Out-of-range coordinates are ignored and return
    /// `false`. The containing chunk's mesh is only marked dirty, callers
    /// decide when to rebuild.
    pub fn set_voxel(&mut self, wx: i32, wy: i32, wz: i32, code: VoxelCode) -> bool {
        let Some((coord, [lx, ly, lz])) = self.locate(wx, wy, wz) else {
            return false;
        };
        self.chunks
            .get_mut(&coord)
            .is_some_and(|chunk| chunk.set(lx, ly, lz, code))
    }

    pub fn is_solid(&self, wx: i32, wy: i32, wz: i32) -> bool {
        is_solid_code(self.get_voxel(wx, wy, wz))
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn chunk_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(&coord)
    }

    /// Chunk coordinates in ascending `(x, z)` order.
    pub fn chunk_coords(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<ChunkCoord> = self.chunks.keys().copied().collect();
        coords.sort_unstable();
        coords
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.chunk_coords()
            .into_iter()
            .filter_map(move |coord| self.chunks.get(&coord))
    }

    pub fn active_chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn mesh(&self, coord: ChunkCoord) -> Option<&ChunkMesh> {
        self.chunks.get(&coord).and_then(Chunk::mesh)
    }

    /// Regenerates one chunk's geometry from scratch.
    pub fn rebuild_chunk(&mut self, coord: ChunkCoord) -> bool {
        if !self.chunks.contains_key(&coord) {
            return false;
        }
        let mesh = build_chunk_mesh(self, coord);
        let triangles = mesh.triangle_count();
        match self.chunks.get_mut(&coord) {
            Some(chunk) => {
                chunk.set_mesh(mesh);
                tracing::debug!(
                    "Rebuilt chunk ({}, {}): {} triangles",
                    coord.x,
                    coord.z,
                    triangles
                );
                true
            }
            None => false,
        }
    }

    /// Remeshes the chunk containing a world voxel coordinate.
    pub fn rebuild_chunk_at(&mut self, wx: i32, wy: i32, wz: i32) -> bool {
        match self.locate(wx, wy, wz) {
            Some((coord, _)) => self.rebuild_chunk(coord),
            None => false,
        }
    }

    /// Remeshes every chunk written to since its last rebuild. Returns how many were rebuilt.
    pub fn rebuild_dirty(&mut self) -> usize {
        let dirty: Vec<ChunkCoord> = self
            .chunk_coords()
            .into_iter()
            .filter(|coord| self.chunks.get(coord).is_some_and(Chunk::is_mesh_dirty))
            .collect();
        for coord in &dirty {
            self.rebuild_chunk(*coord);
        }
        dirty.len()
    }

    pub fn rebuild_all(&mut self) {
        for coord in self.chunk_coords() {
            self.rebuild_chunk(coord);
        }
        tracing::info!(
            "Meshed {} chunks, {} triangles total",
            self.chunks.len(),
            self.total_triangle_count()
        );
    }

    pub fn total_triangle_count(&self) -> usize {
        self.chunks
            .values()
            .filter_map(Chunk::mesh)
            .map(ChunkMesh::triangle_count)
            .sum()
    }
}
