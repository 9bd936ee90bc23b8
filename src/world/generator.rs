//! Deterministic height-field terrain.
//!
//! Every column is a pure function of its world coordinate, so chunks can be
//! filled in any order and always produce the same world.

use crate::constants::*;
use crate::core::block::BlockType;
use crate::core::chunk::Chunk;
use crate::utils::settings::TerrainSettings;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainGenerator {
    pub base_height: f64,
    pub noise_scale: f64,
    pub amplitude: f64,
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        TerrainGenerator {
            base_height: TERRAIN_BASE_HEIGHT,
            noise_scale: TERRAIN_NOISE_SCALE,
            amplitude: TERRAIN_AMPLITUDE,
        }
    }
}

impl From<&TerrainSettings> for TerrainGenerator {
    fn from(settings: &TerrainSettings) -> Self {
        TerrainGenerator {
            base_height: settings.base_height,
            noise_scale: settings.noise_scale,
            amplitude: settings.amplitude,
        }
    }
}

impl TerrainGenerator {
    /// Unclamped column height: number of solid voxels the column would hold
    /// in a world of unlimited height.
    pub fn height(&self, wx: i32, wz: i32) -> i32 {
        let s = self.noise_scale;
        let h = self.base_height + (wx as f64 * s).sin() * (wz as f64 * s).cos() * self.amplitude;
        h.floor() as i32
    }

    /// First empty layer of a freshly generated column in a world `world_height` voxels tall.
    pub fn surface_height(&self, wx: i32, wz: i32, world_height: i32) -> i32 {
        self.height(wx, wz).clamp(0, world_height.max(0))
    }

    /// Fills one chunk: primary fill below the column height, surface type on the top layer.
    pub fn fill_chunk(&self, chunk: &mut Chunk) {
        let size = chunk.size();
        let [base_x, _, base_z] = chunk.origin();

        for lx in 0..size {
            for lz in 0..size {
                let height = self.surface_height(base_x + lx, base_z + lz, size);
                for y in 0..height {
                    chunk.set(lx, y, lz, BlockType::Stone.code());
                }
                if height > 0 {
                    chunk.set(lx, height - 1, lz, BlockType::Grass.code());
                }
            }
        }
    }
}
