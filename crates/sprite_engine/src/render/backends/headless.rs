//! Headless recording backend
//!
//! Implements every capability trait without a GPU. Buffer uploads and
//! draw calls are appended to a shared [`BackendLog`]; shaders and
//! textures record their own binds and uniform uploads. This is what the
//! test suite asserts against, and what the demo app runs on.
//!
//! State is behind `Mutex` because resources are handed out as
//! `Arc<dyn ...>` with `&self` methods; the renderer itself is
//! single-threaded, so the locks are never contended.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::foundation::math::{Mat4, Vec4};
use crate::render::api::{
    BackendResult, IndexBuffer, RenderBackend, Shader, Texture2D, VertexArray, VertexBuffer,
};
use crate::render::vertex::BufferLayout;

/// Shared record of buffer uploads and draw calls.
///
/// Keep a clone of the `Arc<BackendLog>` before boxing the backend into
/// the renderer; the log outlives the move.
#[derive(Debug, Default)]
pub struct BackendLog {
    uploads: Mutex<Vec<Vec<u8>>>,
    draws: Mutex<Vec<u32>>,
}

impl BackendLog {
    /// Byte lengths of every `set_data` call, in order
    pub fn upload_sizes(&self) -> Vec<usize> {
        self.uploads
            .lock()
            .expect("log poisoned")
            .iter()
            .map(Vec::len)
            .collect()
    }

    /// Full byte payloads of every `set_data` call, in order
    pub fn upload_payloads(&self) -> Vec<Vec<u8>> {
        self.uploads.lock().expect("log poisoned").clone()
    }

    /// Index counts of every `draw_indexed` call, in order
    pub fn draw_counts(&self) -> Vec<u32> {
        self.draws.lock().expect("log poisoned").clone()
    }

    fn record_upload(&self, bytes: &[u8]) {
        self.uploads.lock().expect("log poisoned").push(bytes.to_vec());
    }

    fn record_draw(&self, index_count: u32) {
        self.draws.lock().expect("log poisoned").push(index_count);
    }
}

/// Last value uploaded for a uniform
#[derive(Debug, Clone)]
pub enum UniformValue {
    /// 4x4 matrix uniform
    Mat4(Mat4),
    /// 4-component vector uniform
    Float4(Vec4),
    /// Int-array uniform (recorded in full)
    IntArray(Vec<i32>),
}

/// Shader that records binds and uniform uploads
pub struct HeadlessShader {
    name: String,
    bind_count: Mutex<u32>,
    uniforms: Mutex<HashMap<String, UniformValue>>,
}

impl HeadlessShader {
    /// Create a shader with the given registry name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bind_count: Mutex::new(0),
            uniforms: Mutex::new(HashMap::new()),
        }
    }

    /// How many times `bind` ran
    pub fn bind_count(&self) -> u32 {
        *self.bind_count.lock().expect("shader state poisoned")
    }

    /// Last value uploaded for `name`, if any
    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniforms
            .lock()
            .expect("shader state poisoned")
            .get(name)
            .cloned()
    }

    /// Last int-array uniform uploaded for `name`, if any
    pub fn int_array_uniform(&self, name: &str) -> Option<Vec<i32>> {
        match self.uniform(name) {
            Some(UniformValue::IntArray(values)) => Some(values),
            _ => None,
        }
    }

    fn record(&self, name: &str, value: UniformValue) {
        self.uniforms
            .lock()
            .expect("shader state poisoned")
            .insert(name.to_string(), value);
    }
}

impl Shader for HeadlessShader {
    fn name(&self) -> &str {
        &self.name
    }

    fn bind(&self) {
        *self.bind_count.lock().expect("shader state poisoned") += 1;
    }

    fn upload_uniform_mat4(&self, name: &str, matrix: &Mat4) {
        self.record(name, UniformValue::Mat4(*matrix));
    }

    fn upload_uniform_float4(&self, name: &str, value: &Vec4) {
        self.record(name, UniformValue::Float4(*value));
    }

    fn upload_uniform_int_array(&self, name: &str, values: &[i32]) {
        self.record(name, UniformValue::IntArray(values.to_vec()));
    }
}

/// Texture that records which units it was bound to
pub struct HeadlessTexture {
    filepath: String,
    bound_units: Mutex<Vec<u32>>,
}

impl HeadlessTexture {
    /// Create a texture identified by a source path
    pub fn new(filepath: impl Into<String>) -> Self {
        Self {
            filepath: filepath.into(),
            bound_units: Mutex::new(Vec::new()),
        }
    }

    /// Every unit this texture was bound to, in order
    pub fn bound_units(&self) -> Vec<u32> {
        self.bound_units.lock().expect("texture state poisoned").clone()
    }
}

impl Texture2D for HeadlessTexture {
    fn bind(&self, unit: u32) {
        self.bound_units
            .lock()
            .expect("texture state poisoned")
            .push(unit);
    }

    fn filepath(&self) -> &str {
        &self.filepath
    }
}

struct HeadlessVertexBuffer {
    capacity: usize,
    layout: BufferLayout,
    log: Arc<BackendLog>,
}

impl VertexBuffer for HeadlessVertexBuffer {
    fn bind(&self) {}

    fn set_data(&self, data: &[u8]) {
        assert!(
            data.len() <= self.capacity,
            "upload of {} bytes exceeds buffer capacity {}",
            data.len(),
            self.capacity
        );
        self.log.record_upload(data);
    }

    fn layout(&self) -> &BufferLayout {
        &self.layout
    }
}

struct HeadlessIndexBuffer {
    count: u32,
}

impl IndexBuffer for HeadlessIndexBuffer {
    fn bind(&self) {}

    fn count(&self) -> u32 {
        self.count
    }
}

struct HeadlessVertexArray {
    index_buffer: Arc<dyn IndexBuffer>,
}

impl VertexArray for HeadlessVertexArray {
    fn bind(&self) {}

    fn index_count(&self) -> u32 {
        self.index_buffer.count()
    }
}

/// Backend factory and draw sink backed by a [`BackendLog`]
#[derive(Default)]
pub struct HeadlessBackend {
    log: Arc<BackendLog>,
}

impl HeadlessBackend {
    /// Create a backend with a fresh log
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the shared log; survives moving the backend into the
    /// renderer
    pub fn log(&self) -> Arc<BackendLog> {
        Arc::clone(&self.log)
    }
}

impl RenderBackend for HeadlessBackend {
    fn create_vertex_buffer(
        &mut self,
        capacity: usize,
        layout: BufferLayout,
    ) -> BackendResult<Arc<dyn VertexBuffer>> {
        Ok(Arc::new(HeadlessVertexBuffer {
            capacity,
            layout,
            log: Arc::clone(&self.log),
        }))
    }

    fn create_index_buffer(&mut self, indices: &[u32]) -> BackendResult<Arc<dyn IndexBuffer>> {
        Ok(Arc::new(HeadlessIndexBuffer {
            count: indices.len() as u32,
        }))
    }

    fn create_vertex_array(
        &mut self,
        _vertex_buffer: Arc<dyn VertexBuffer>,
        index_buffer: Arc<dyn IndexBuffer>,
    ) -> BackendResult<Arc<dyn VertexArray>> {
        Ok(Arc::new(HeadlessVertexArray { index_buffer }))
    }

    fn draw_indexed(&mut self, _vertex_array: &dyn VertexArray, index_count: u32) {
        self.log.record_draw(index_count);
    }
}
