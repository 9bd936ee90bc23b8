use crate::core::face::{FACE_UVS, Face};
use crate::core::vertex::Vertex;

/// Geometry generated for one chunk: interleaved vertices plus a triangle list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    pub fn with_capacity(quads: usize) -> Self {
        ChunkMesh {
            vertices: Vec::with_capacity(quads * 4),
            indices: Vec::with_capacity(quads * 6),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Appends one face of the unit voxel whose minimum corner is `origin`, scaled
/// by `scale`. `shade` maps each corner's world position to its color.
pub fn add_face<F>(mesh: &mut ChunkMesh, face: Face, origin: [f32; 3], scale: f32, shade: F)
where
    F: Fn([f32; 3]) -> [f32; 3],
{
    let base_idx = mesh.vertices.len() as u32;
    let normal = face.normal();
    for (corner, uv) in face.corners().into_iter().zip(FACE_UVS) {
        let position = [
            (origin[0] + corner[0]) * scale,
            (origin[1] + corner[1]) * scale,
            (origin[2] + corner[2]) * scale,
        ];
        mesh.vertices.push(Vertex {
            position,
            normal,
            uv,
            color: shade(position),
        });
    }
    mesh.indices.extend_from_slice(&[
        base_idx,
        base_idx + 1,
        base_idx + 2,
        base_idx + 2,
        base_idx + 1,
        base_idx + 3,
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_face_emits_four_vertices_and_two_triangles() {
        let mut mesh = ChunkMesh::default();
        add_face(&mut mesh, Face::Top, [0.0, 0.0, 0.0], 1.0, |_| [1.0, 0.0, 0.0]);
        add_face(&mut mesh, Face::Left, [2.0, 0.0, 0.0], 1.0, |_| [1.0, 0.0, 0.0]);

        assert_eq!(mesh.quad_count(), 2);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(&mesh.indices[6..], &[4, 5, 6, 6, 5, 7]);
        assert!(mesh.vertices[..4].iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn positions_are_scaled_by_tile_size() {
        let mut mesh = ChunkMesh::default();
        add_face(&mut mesh, Face::Right, [3.0, 1.0, 2.0], 2.0, |_| [0.0; 3]);
        assert_eq!(mesh.vertices[0].position, [8.0, 2.0, 4.0]);
        assert_eq!(mesh.vertices[3].position, [8.0, 4.0, 6.0]);
    }

    #[test]
    fn byte_views_cover_whole_buffers() {
        let mut mesh = ChunkMesh::with_capacity(1);
        add_face(&mut mesh, Face::Front, [0.0, 0.0, 0.0], 1.0, |p| p);
        assert_eq!(mesh.vertex_bytes().len(), 4 * Vertex::STRIDE);
        assert_eq!(mesh.index_bytes().len(), 6 * 4);
    }
}
