//! Vertex record and buffer layout for the 2D batch
//!
//! The batch writes [`QuadVertex`] records into a contiguous CPU pool and
//! uploads them verbatim, so the struct is `#[repr(C)]` and byte-castable
//! via `bytemuck`. The matching [`BufferLayout`] describes the same fields
//! to the backend for vertex attribute setup.

use bytemuck::{Pod, Zeroable};

/// Per-vertex record of the quad batch.
///
/// Positions are already transformed into world space on the CPU; the
/// vertex shader only applies the view-projection matrix.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    /// World-space position
    pub position: [f32; 3],
    /// RGBA color, components in 0.0..=1.0
    pub color: [f32; 4],
    /// Texture coordinates
    pub tex_coords: [f32; 2],
    /// Texture slot index, as a float for attribute interpolation rules
    pub tex_index: f32,
}

/// Unit-quad corner offsets, shared read-only by every batch.
///
/// Corners are listed counter-clockwise from bottom-left; the w component
/// is 1 so a plain `Mat4` multiply applies translation.
pub const QUAD_VERTEX_POSITIONS: [[f32; 4]; 4] = [
    [-0.5, -0.5, 0.0, 1.0],
    [0.5, -0.5, 0.0, 1.0],
    [0.5, 0.5, 0.0, 1.0],
    [-0.5, 0.5, 0.0, 1.0],
];

/// Texture coordinates matching [`QUAD_VERTEX_POSITIONS`] corner for corner
pub const QUAD_TEX_COORDS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Number of vertices per quad
pub const VERTICES_PER_QUAD: u32 = 4;

/// Number of indices per quad (two triangles)
pub const INDICES_PER_QUAD: u32 = 6;

/// Build the static index pattern for `max_quads` quads.
///
/// Each quad at vertex offset `4i` contributes `{0, 1, 2, 2, 3, 0} + 4i`.
/// Computed once at renderer construction and uploaded to an immutable
/// index buffer.
pub fn quad_index_pattern(max_quads: u32) -> Vec<u32> {
    let mut indices = Vec::with_capacity((max_quads * INDICES_PER_QUAD) as usize);
    for quad in 0..max_quads {
        let offset = quad * VERTICES_PER_QUAD;
        indices.extend_from_slice(&[
            offset,
            offset + 1,
            offset + 2,
            offset + 2,
            offset + 3,
            offset,
        ]);
    }
    indices
}

/// Scalar type of a vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderDataType {
    /// Single 32-bit float
    Float,
    /// 2-component float vector
    Float2,
    /// 3-component float vector
    Float3,
    /// 4-component float vector
    Float4,
    /// Single 32-bit integer
    Int,
}

impl ShaderDataType {
    /// Size of the attribute in bytes
    pub fn size(&self) -> u32 {
        match self {
            Self::Float | Self::Int => 4,
            Self::Float2 => 8,
            Self::Float3 => 12,
            Self::Float4 => 16,
        }
    }

    /// Number of scalar components
    pub fn component_count(&self) -> u32 {
        match self {
            Self::Float | Self::Int => 1,
            Self::Float2 => 2,
            Self::Float3 => 3,
            Self::Float4 => 4,
        }
    }
}

/// One named attribute within a vertex buffer layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferElement {
    /// Attribute name as the shader declares it
    pub name: &'static str,
    /// Scalar type of the attribute
    pub data_type: ShaderDataType,
    /// Byte offset from the start of the vertex record, filled in by
    /// [`BufferLayout::new`]
    pub offset: u32,
}

impl BufferElement {
    /// Create an element; the offset is assigned by the owning layout
    pub fn new(name: &'static str, data_type: ShaderDataType) -> Self {
        Self {
            name,
            data_type,
            offset: 0,
        }
    }
}

/// Ordered attribute description of one vertex record.
///
/// Offsets and stride are derived from the element order, mirroring how
/// the fields are packed in the `#[repr(C)]` vertex struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferLayout {
    elements: Vec<BufferElement>,
    stride: u32,
}

impl BufferLayout {
    /// Build a layout, computing per-element offsets and the total stride
    pub fn new(mut elements: Vec<BufferElement>) -> Self {
        let mut offset = 0;
        for element in &mut elements {
            element.offset = offset;
            offset += element.data_type.size();
        }
        Self {
            elements,
            stride: offset,
        }
    }

    /// Attribute elements in declaration order
    pub fn elements(&self) -> &[BufferElement] {
        &self.elements
    }

    /// Byte distance between consecutive vertex records
    pub fn stride(&self) -> u32 {
        self.stride
    }
}

impl QuadVertex {
    /// The buffer layout matching this vertex record
    pub fn layout() -> BufferLayout {
        BufferLayout::new(vec![
            BufferElement::new("a_Position", ShaderDataType::Float3),
            BufferElement::new("a_Color", ShaderDataType::Float4),
            BufferElement::new("a_TextureCoord", ShaderDataType::Float2),
            BufferElement::new("a_TextureIndex", ShaderDataType::Float),
        ])
    }
}
