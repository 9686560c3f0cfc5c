use super::Mesh;
use crate::render::{Topology, VertexLayout};

/// Edge length of the light marker relative to the unit cube.
pub const LIGHT_CUBE_SCALE: f32 = 0.2;

const CORNERS: [[f32; 3]; 8] = [
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, 0.5, -0.5],
    [-0.5, 0.5, -0.5],
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
];

const CORNER_INDICES: [u32; 36] = [
    0, 1, 2, 2, 3, 0, // back
    4, 5, 6, 6, 7, 4, // front
    0, 4, 7, 7, 3, 0, // left
    1, 5, 6, 6, 2, 1, // right
    3, 2, 6, 6, 7, 3, // top
    0, 1, 5, 5, 4, 0, // bottom
];

/// Four vertices per face: `xyz nx ny nz u v`.
#[rustfmt::skip]
const FACE_VERTICES: [f32; 24 * 8] = [
    // back (-z)
    -0.5, -0.5, -0.5,  0.0,  0.0, -1.0,  0.0, 0.0,
     0.5, -0.5, -0.5,  0.0,  0.0, -1.0,  1.0, 0.0,
     0.5,  0.5, -0.5,  0.0,  0.0, -1.0,  1.0, 1.0,
    -0.5,  0.5, -0.5,  0.0,  0.0, -1.0,  0.0, 1.0,
    // front (+z)
    -0.5, -0.5,  0.5,  0.0,  0.0,  1.0,  0.0, 0.0,
     0.5, -0.5,  0.5,  0.0,  0.0,  1.0,  1.0, 0.0,
     0.5,  0.5,  0.5,  0.0,  0.0,  1.0,  1.0, 1.0,
    -0.5,  0.5,  0.5,  0.0,  0.0,  1.0,  0.0, 1.0,
    // left (-x)
    -0.5,  0.5,  0.5, -1.0,  0.0,  0.0,  1.0, 0.0,
    -0.5,  0.5, -0.5, -1.0,  0.0,  0.0,  1.0, 1.0,
    -0.5, -0.5, -0.5, -1.0,  0.0,  0.0,  0.0, 1.0,
    -0.5, -0.5,  0.5, -1.0,  0.0,  0.0,  0.0, 0.0,
    // right (+x)
     0.5,  0.5,  0.5,  1.0,  0.0,  0.0,  1.0, 0.0,
     0.5,  0.5, -0.5,  1.0,  0.0,  0.0,  1.0, 1.0,
     0.5, -0.5, -0.5,  1.0,  0.0,  0.0,  0.0, 1.0,
     0.5, -0.5,  0.5,  1.0,  0.0,  0.0,  0.0, 0.0,
    // bottom (-y)
    -0.5, -0.5, -0.5,  0.0, -1.0,  0.0,  0.0, 1.0,
     0.5, -0.5, -0.5,  0.0, -1.0,  0.0,  1.0, 1.0,
     0.5, -0.5,  0.5,  0.0, -1.0,  0.0,  1.0, 0.0,
    -0.5, -0.5,  0.5,  0.0, -1.0,  0.0,  0.0, 0.0,
    // top (+y)
    -0.5,  0.5, -0.5,  0.0,  1.0,  0.0,  0.0, 1.0,
     0.5,  0.5, -0.5,  0.0,  1.0,  0.0,  1.0, 1.0,
     0.5,  0.5,  0.5,  0.0,  1.0,  0.0,  1.0, 0.0,
    -0.5,  0.5,  0.5,  0.0,  1.0,  0.0,  0.0, 0.0,
];

fn face_indices() -> Vec<u32> {
    (0..6u32)
        .flat_map(|face| {
            let b = face * 4;
            [b, b + 1, b + 2, b + 2, b + 3, b]
        })
        .collect()
}

/// Unit cube over its 8 shared corners (positions only), 36 indices.
pub fn cube() -> Mesh {
    Mesh::indexed(
        CORNERS.iter().flatten().copied().collect(),
        CORNER_INDICES.to_vec(),
        VertexLayout::Position,
    )
}

/// Unit cube with per-face normals: 24 vertices, 36 indices.
pub fn lit_cube() -> Mesh {
    let vertices = FACE_VERTICES
        .chunks_exact(8)
        .flat_map(|v| v[..6].iter().copied())
        .collect();
    Mesh::indexed(vertices, face_indices(), VertexLayout::PositionNormal)
}

/// Unit cube with per-face normals and UVs: 24 vertices, 36 indices.
pub fn textured_cube() -> Mesh {
    Mesh::indexed(FACE_VERTICES.to_vec(), face_indices(), VertexLayout::PositionNormalUv)
}

/// Light marker: 36 unshared positions of a cube scaled by `scale`.
pub fn light_cube(scale: f32) -> Mesh {
    let vertices = face_indices()
        .into_iter()
        .flat_map(|i| {
            let v = &FACE_VERTICES[i as usize * 8..i as usize * 8 + 3];
            [v[0] * scale, v[1] * scale, v[2] * scale]
        })
        .collect();
    Mesh::new(vertices, VertexLayout::Position, Topology::Triangles)
}
