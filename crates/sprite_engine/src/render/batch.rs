//! CPU-side vertex pool and batch accounting
//!
//! [`BatchState`] owns the fixed-capacity vertex pool outright. It is
//! allocated once at renderer construction and overwritten every frame;
//! nothing here allocates per draw call. The write cursor is an explicit
//! index, bounds-checked against the pool length on every quad write.

use bytemuck::Zeroable;

use crate::foundation::math::{Color, Mat4, Vec4};
use crate::render::vertex::{QuadVertex, QUAD_TEX_COORDS, QUAD_VERTEX_POSITIONS, VERTICES_PER_QUAD};

/// Per-scene statistics for performance monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Indexed draw calls issued (batch flushes with geometry, plus one
    /// per circle)
    pub draw_calls: u32,

    /// Quads submitted since `begin_scene`
    pub quads_submitted: u32,

    /// Circles submitted since `begin_scene`
    pub circles_submitted: u32,

    /// Flushes performed, including the final one at `end_scene`
    pub flushes: u32,

    /// Highest occupied texture slot count observed in any batch
    pub peak_texture_count: u32,
}

/// Accumulated vertex data for the batch currently being built
pub struct BatchState {
    vertices: Box<[QuadVertex]>,
    cursor: usize,
    quad_count: u32,
    max_quads: u32,
}

impl BatchState {
    /// Allocate the pool for `max_quads` quads (4 vertices each)
    pub fn new(max_quads: u32) -> Self {
        let vertex_count = (max_quads * VERTICES_PER_QUAD) as usize;
        Self {
            vertices: vec![QuadVertex::zeroed(); vertex_count].into_boxed_slice(),
            cursor: 0,
            quad_count: 0,
            max_quads,
        }
    }

    /// Whether the next quad would exceed capacity
    pub fn is_full(&self) -> bool {
        self.quad_count == self.max_quads
    }

    /// Quads written since the last reset
    pub fn quad_count(&self) -> u32 {
        self.quad_count
    }

    /// Append one quad: four unit-quad corners through `transform`, with a
    /// shared color and the resolved texture slot.
    ///
    /// The caller must have flushed a full batch first; writing past
    /// capacity is a bug, not an overflow condition, hence the assert.
    pub fn push_quad(&mut self, transform: &Mat4, color: Color, tex_index: f32) {
        assert!(
            self.cursor + VERTICES_PER_QUAD as usize <= self.vertices.len(),
            "quad write past pool capacity; flush must run before push_quad on a full batch"
        );

        for corner in 0..VERTICES_PER_QUAD as usize {
            let position = transform * Vec4::from(QUAD_VERTEX_POSITIONS[corner]);
            self.vertices[self.cursor] = QuadVertex {
                position: [position.x, position.y, position.z],
                color: [color.x, color.y, color.z, color.w],
                tex_coords: QUAD_TEX_COORDS[corner],
                tex_index,
            };
            self.cursor += 1;
        }
        self.quad_count += 1;
    }

    /// The written span of the pool, from base to the current cursor
    pub fn written(&self) -> &[QuadVertex] {
        &self.vertices[..self.cursor]
    }

    /// Byte length of the written span (what a flush uploads)
    pub fn byte_len(&self) -> usize {
        self.cursor * std::mem::size_of::<QuadVertex>()
    }

    /// Move the write cursor back to the pool base
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.quad_count = 0;
    }
}
