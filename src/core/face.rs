/// One of the six axis-aligned faces of a voxel.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Face {
    Right,
    Left,
    Top,
    Bottom,
    Front,
    Back,
}

/// UV assigned to the four corners of every face, in corner order.
pub const FACE_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Right,
        Face::Left,
        Face::Top,
        Face::Bottom,
        Face::Front,
        Face::Back,
    ];

    /// Step to the neighbouring voxel across this face.
    pub const fn offset(self) -> [i32; 3] {
        match self {
            Face::Right => [1, 0, 0],
            Face::Left => [-1, 0, 0],
            Face::Top => [0, 1, 0],
            Face::Bottom => [0, -1, 0],
            Face::Front => [0, 0, 1],
            Face::Back => [0, 0, -1],
        }
    }

    pub fn normal(self) -> [f32; 3] {
        let [x, y, z] = self.offset();
        [x as f32, y as f32, z as f32]
    }

    /// Corner offsets relative to the voxel's minimum corner. Corners 0-1-2 and
    /// 2-1-3 wind counter-clockwise when seen from outside the voxel.
    pub const fn corners(self) -> [[f32; 3]; 4] {
        match self {
            Face::Right => [
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [1.0, 0.0, 1.0],
                [1.0, 1.0, 1.0],
            ],
            Face::Left => [
                [0.0, 0.0, 1.0],
                [0.0, 1.0, 1.0],
                [0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            Face::Top => [
                [0.0, 1.0, 0.0],
                [0.0, 1.0, 1.0],
                [1.0, 1.0, 0.0],
                [1.0, 1.0, 1.0],
            ],
            Face::Bottom => [
                [0.0, 0.0, 1.0],
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 1.0],
                [1.0, 0.0, 0.0],
            ],
            Face::Front => [
                [1.0, 0.0, 1.0],
                [1.0, 1.0, 1.0],
                [0.0, 0.0, 1.0],
                [0.0, 1.0, 1.0],
            ],
            Face::Back => [
                [0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    #[test]
    fn corners_wind_towards_the_normal() {
        for face in Face::ALL {
            let c = face.corners();
            let n = cross(sub(c[1], c[0]), sub(c[2], c[0]));
            assert_eq!(n, face.normal(), "{face:?}");
        }
    }

    #[test]
    fn corners_lie_on_the_face_plane() {
        for face in Face::ALL {
            let normal = face.normal();
            let axis = normal.iter().position(|v| *v != 0.0).unwrap();
            let plane = if normal[axis] > 0.0 { 1.0 } else { 0.0 };
            for corner in face.corners() {
                assert_eq!(corner[axis], plane, "{face:?}");
            }
        }
    }
}
