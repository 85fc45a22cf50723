//! Capability traits consumed by the renderer.

mod render_backend;

pub use render_backend::{
    BackendResult, IndexBuffer, RenderBackend, Shader, Texture2D, VertexArray, VertexBuffer,
};
