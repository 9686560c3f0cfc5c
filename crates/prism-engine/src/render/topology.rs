/// Primitive assembly mode for a vertex stream.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Topology {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl Topology {
    /// Whether the GPU rasterizes this topology directly.
    ///
    /// Line loops and triangle fans have no wgpu equivalent and are lowered
    /// through [`lowered_indices`].
    #[inline]
    pub fn is_native(self) -> bool {
        !matches!(self, Topology::LineLoop | Topology::TriangleFan)
    }

    /// Topology actually used for rasterization after lowering.
    pub fn lowered(self) -> Topology {
        match self {
            Topology::LineLoop => Topology::LineStrip,
            Topology::TriangleFan => Topology::Triangles,
            other => other,
        }
    }

    /// Number of primitives assembled from `count` vertices.
    pub fn primitive_count(self, count: u32) -> u32 {
        match self {
            Topology::Points => count,
            Topology::Lines => count / 2,
            Topology::LineStrip => count.saturating_sub(1),
            Topology::LineLoop => {
                if count < 2 { 0 } else { count }
            }
            Topology::Triangles => count / 3,
            Topology::TriangleStrip | Topology::TriangleFan => count.saturating_sub(2),
        }
    }
}

/// Index list that draws `count` vertices of `topology` with its lowered
/// counterpart, or `None` for native topologies.
///
/// - line loop `0..n` → strip `0, 1, .., n-1, 0`
/// - fan `0..n` → list `(0, i, i+1)` for `i in 1..n-1`
pub fn lowered_indices(topology: Topology, count: u32) -> Option<Vec<u32>> {
    match topology {
        Topology::LineLoop => {
            if count < 2 {
                return Some(Vec::new());
            }
            let mut out: Vec<u32> = (0..count).collect();
            out.push(0);
            Some(out)
        }
        Topology::TriangleFan => {
            let mut out = Vec::with_capacity(count.saturating_sub(2) as usize * 3);
            for i in 1..count.saturating_sub(1) {
                out.extend_from_slice(&[0, i, i + 1]);
            }
            Some(out)
        }
        _ => None,
    }
}
