//! Backend abstraction traits for the rendering system
//!
//! This module defines the traits a graphics backend must implement for the
//! 2D renderer to run on top of it. The renderer never talks to a graphics
//! API directly: it uploads bytes, binds objects, sets uniforms, and issues
//! indexed draws exclusively through these traits. GPU submission is
//! fire-and-forget; nothing here blocks or reports completion.

use std::sync::Arc;

use crate::foundation::math::{Mat4, Vec4};
use crate::render::vertex::BufferLayout;
use crate::render::RenderError;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// A compiled shader program
pub trait Shader {
    /// Name the shader was registered under (for diagnostics)
    fn name(&self) -> &str;

    /// Make this program current
    fn bind(&self);

    /// Upload a 4x4 float matrix uniform
    fn upload_uniform_mat4(&self, name: &str, matrix: &Mat4);

    /// Upload a 4-component float vector uniform
    fn upload_uniform_float4(&self, name: &str, value: &Vec4);

    /// Upload an int-array uniform (sampler slot -> texture unit mapping)
    fn upload_uniform_int_array(&self, name: &str, values: &[i32]);
}

/// A 2D texture object.
///
/// The slot table needs identity, not content: two handles refer to the
/// same texture exactly when their `Arc`s point at the same allocation
/// (`Arc::ptr_eq`).
pub trait Texture2D {
    /// Bind this texture to the given texture unit
    fn bind(&self, unit: u32);

    /// Source path of the texture (for diagnostics)
    fn filepath(&self) -> &str;
}

/// A GPU vertex buffer with a fixed byte capacity
pub trait VertexBuffer {
    /// Make this buffer current
    fn bind(&self);

    /// Upload exactly `data.len()` bytes starting at the buffer base.
    ///
    /// Callers upload only the written span of a frame, never the full
    /// capacity, so a zero-length upload is valid and must be a no-op.
    fn set_data(&self, data: &[u8]);

    /// The vertex layout this buffer was created with
    fn layout(&self) -> &BufferLayout;
}

/// A GPU index buffer
pub trait IndexBuffer {
    /// Make this buffer current
    fn bind(&self);

    /// Number of indices in the buffer
    fn count(&self) -> u32;
}

/// A vertex array object tying one vertex buffer to one index buffer
pub trait VertexArray {
    /// Make this array (and its buffers) current
    fn bind(&self);

    /// Total index count of the attached index buffer; a draw with no
    /// explicit count uses all of them
    fn index_count(&self) -> u32;
}

/// Main rendering backend trait.
///
/// Acts as the factory for buffer objects and the sink for draw calls.
/// Implementations are single-threaded; the renderer owns the backend and
/// is itself owned by the render loop.
pub trait RenderBackend {
    /// Create a vertex buffer of `capacity` bytes with the given layout.
    /// The contents are undefined until the first `set_data`.
    fn create_vertex_buffer(
        &mut self,
        capacity: usize,
        layout: BufferLayout,
    ) -> BackendResult<Arc<dyn VertexBuffer>>;

    /// Create an index buffer from a fixed set of indices
    fn create_index_buffer(&mut self, indices: &[u32]) -> BackendResult<Arc<dyn IndexBuffer>>;

    /// Create a vertex array from previously created buffers
    fn create_vertex_array(
        &mut self,
        vertex_buffer: Arc<dyn VertexBuffer>,
        index_buffer: Arc<dyn IndexBuffer>,
    ) -> BackendResult<Arc<dyn VertexArray>>;

    /// Issue an indexed draw of `index_count` indices from the given
    /// vertex array. A count of zero is a void draw and must not fail.
    fn draw_indexed(&mut self, vertex_array: &dyn VertexArray, index_count: u32);
}
