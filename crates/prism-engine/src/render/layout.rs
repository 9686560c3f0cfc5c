/// One vertex attribute inside an interleaved float stream.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Attribute {
    /// Shader input location.
    pub location: u32,
    /// Number of `f32` components.
    pub components: u32,
    /// Offset from the start of the vertex, in floats.
    pub offset: u32,
}

impl Attribute {
    #[inline]
    pub const fn byte_offset(self) -> u64 {
        self.offset as u64 * 4
    }
}

const POSITION: [Attribute; 1] = [Attribute { location: 0, components: 3, offset: 0 }];

const POSITION_NORMAL: [Attribute; 2] = [
    Attribute { location: 0, components: 3, offset: 0 },
    Attribute { location: 1, components: 3, offset: 3 },
];

const POSITION_NORMAL_UV: [Attribute; 3] = [
    Attribute { location: 0, components: 3, offset: 0 },
    Attribute { location: 1, components: 3, offset: 3 },
    Attribute { location: 2, components: 2, offset: 6 },
];

/// Interleaving used by a vertex blob.
///
/// The attribute table must describe exactly the order fields were
/// interleaved in; drawables and shaders are both checked against it.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum VertexLayout {
    /// `xyz`
    #[default]
    Position,
    /// `xyz nx ny nz`
    PositionNormal,
    /// `xyz nx ny nz u v`
    PositionNormalUv,
}

impl VertexLayout {
    pub fn attributes(self) -> &'static [Attribute] {
        match self {
            VertexLayout::Position => &POSITION,
            VertexLayout::PositionNormal => &POSITION_NORMAL,
            VertexLayout::PositionNormalUv => &POSITION_NORMAL_UV,
        }
    }

    /// Floats per vertex.
    pub fn stride(self) -> u32 {
        self.attributes()
            .iter()
            .map(|a| a.offset + a.components)
            .max()
            .unwrap_or(0)
    }

    #[inline]
    pub fn stride_bytes(self) -> u64 {
        self.stride() as u64 * 4
    }

    pub fn attribute(self, location: u32) -> Option<Attribute> {
        self.attributes().iter().copied().find(|a| a.location == location)
    }

    /// Number of whole vertices in a float blob of `len` elements.
    #[inline]
    pub fn vertex_count(self, len: usize) -> u32 {
        (len / self.stride() as usize) as u32
    }
}
