use serde::{Deserialize, Serialize};

/// Raw material code stored in a chunk. `0` is air, anything else is solid.
pub type VoxelCode = u8;

pub const AIR: VoxelCode = 0;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockType {
    #[default]
    Air = 0,
    Stone = 1,
    Grass = 2,
    Sand = 3,
}

impl BlockType {
    pub const fn code(self) -> VoxelCode {
        self as VoxelCode
    }

    pub fn from_code(code: VoxelCode) -> Option<Self> {
        match code {
            0 => Some(BlockType::Air),
            1 => Some(BlockType::Stone),
            2 => Some(BlockType::Grass),
            3 => Some(BlockType::Sand),
            _ => None,
        }
    }

    pub fn color(&self) -> [f32; 3] {
        match self {
            BlockType::Air => [0.5, 0.5, 0.5],
            BlockType::Stone => [0.6, 0.6, 0.6],
            BlockType::Grass => [0.3, 0.7, 0.3],
            BlockType::Sand => [0.8, 0.7, 0.5],
        }
    }
}

impl From<BlockType> for VoxelCode {
    fn from(block: BlockType) -> Self {
        block.code()
    }
}

pub fn is_solid_code(code: VoxelCode) -> bool {
    code != AIR
}

/// Base color for a stored code. Unknown codes fall back to the air color so a
/// bad edit still renders.
pub fn base_color(code: VoxelCode) -> [f32; 3] {
    BlockType::from_code(code).unwrap_or_default().color()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_roundtrip_through_block_type() {
        for block in [BlockType::Air, BlockType::Stone, BlockType::Grass, BlockType::Sand] {
            assert_eq!(BlockType::from_code(block.code()), Some(block));
        }
        assert_eq!(BlockType::from_code(42), None);
    }

    #[test]
    fn unknown_code_uses_air_color() {
        assert_eq!(base_color(200), BlockType::Air.color());
        assert_eq!(base_color(2), [0.3, 0.7, 0.3]);
    }

    #[test]
    fn unknown_codes_are_still_solid() {
        assert!(is_solid_code(9));
        assert!(!is_solid_code(AIR));
    }
}
