use std::f32::consts::PI;

use super::Mesh;
use crate::render::VertexLayout;

pub const SPHERE_RADIUS: f32 = 1.0;
pub const SPHERE_SECTORS: u32 = 32;
pub const SPHERE_STACKS: u32 = 16;

/// Latitude/longitude sphere: `(stacks + 1) × (sectors + 1)` vertices laid
/// out as `xyz nx ny nz u v`, `6 × sectors × stacks` indices.
///
/// Ring `i` sits at polar angle `φ = π·i/stacks`, segment `j` at azimuth
/// `θ = 2π·j/sectors`. The seam column is duplicated so UVs wrap cleanly.
/// Triangles touching the poles are degenerate and left in. Zero sector or
/// stack counts are raised to one.
pub fn uv_sphere(radius: f32, sectors: u32, stacks: u32) -> Mesh {
    let sectors = sectors.max(1);
    let stacks = stacks.max(1);
    let ring = sectors + 1;
    let mut vertices = Vec::with_capacity(((stacks + 1) * ring * 8) as usize);

    for i in 0..=stacks {
        let v = i as f32 / stacks as f32;
        let phi = v * PI;

        for j in 0..=sectors {
            let u = j as f32 / sectors as f32;
            let theta = u * 2.0 * PI;

            let x = theta.cos() * phi.sin();
            let y = phi.cos();
            let z = theta.sin() * phi.sin();

            vertices.extend_from_slice(&[radius * x, radius * y, radius * z, x, y, z, u, v]);
        }
    }

    let mut indices = Vec::with_capacity((6 * sectors * stacks) as usize);
    for i in 0..stacks {
        for j in 0..sectors {
            let first = i * ring + j;
            let second = first + ring;
            indices.extend_from_slice(&[first, second, first + 1]);
            indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }

    Mesh::indexed(vertices, indices, VertexLayout::PositionNormalUv)
}
