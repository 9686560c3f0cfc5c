//! CPU-side vertex data for the built-in shapes.
//!
//! Meshes are plain interleaved `f32` blobs plus optional `u32` indices.
//! They are uploaded once and never modified afterwards.

mod cube;
mod sphere;

pub use cube::{cube, light_cube, lit_cube, textured_cube, LIGHT_CUBE_SCALE};
pub use sphere::{uv_sphere, SPHERE_RADIUS, SPHERE_SECTORS, SPHERE_STACKS};

use glam::Vec3;

use crate::render::{Topology, VertexLayout};

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<f32>,
    pub indices: Option<Vec<u32>>,
    pub layout: VertexLayout,
    pub topology: Topology,
}

impl Mesh {
    /// Non-indexed mesh drawn over all of its vertices.
    pub fn new(vertices: Vec<f32>, layout: VertexLayout, topology: Topology) -> Self {
        Self {
            vertices,
            indices: None,
            layout,
            topology,
        }
    }

    /// Indexed triangle list.
    pub fn indexed(vertices: Vec<f32>, indices: Vec<u32>, layout: VertexLayout) -> Self {
        Self {
            vertices,
            indices: Some(indices),
            layout,
            topology: Topology::Triangles,
        }
    }

    /// Position-only mesh from a list of points.
    pub fn from_points(points: &[[f32; 3]], topology: Topology) -> Self {
        Self::new(points.iter().flatten().copied().collect(), VertexLayout::Position, topology)
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.layout.vertex_count(self.vertices.len())
    }

    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Elements a draw call covers: the index count for indexed meshes,
    /// the vertex count otherwise.
    pub fn draw_count(&self) -> u32 {
        match &self.indices {
            Some(indices) => indices.len() as u32,
            None => self.vertex_count(),
        }
    }

    /// Interleaving is whole and every index addresses an existing vertex.
    pub fn is_well_formed(&self) -> bool {
        let stride = self.layout.stride() as usize;
        if self.vertices.len() % stride != 0 {
            return false;
        }
        let n = self.vertex_count();
        self.indices
            .as_deref()
            .is_none_or(|indices| indices.iter().all(|&i| i < n))
    }

    /// Vertex positions (first three floats of each vertex).
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices
            .chunks_exact(self.layout.stride() as usize)
            .map(|v| Vec3::new(v[0], v[1], v[2]))
    }
}
