//! Asset lookup for the renderer
//!
//! The renderer only needs two things from the asset layer: a shader by
//! name and the default 1x1 opaque white texture used for untextured
//! (solid-color) quads. Everything else about asset loading and caching
//! lives outside this crate; handles are shared-ownership `Arc`s so their
//! lifetime extends to the longest-lived holder.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::render::api::{Shader, Texture2D};

/// Asset lookup errors
#[derive(Debug, Error)]
pub enum AssetError {
    /// No shader registered under the requested name
    #[error("shader not found: {0}")]
    ShaderNotFound(String),
}

/// Registry of shaders and the default white texture.
///
/// Populated once during application startup, then shared read-only with
/// the renderer via `Arc<AssetRegistry>`.
pub struct AssetRegistry {
    shaders: HashMap<String, Arc<dyn Shader>>,
    white_texture: Arc<dyn Texture2D>,
}

impl AssetRegistry {
    /// Create a registry holding the default white texture
    pub fn new(white_texture: Arc<dyn Texture2D>) -> Self {
        Self {
            shaders: HashMap::new(),
            white_texture,
        }
    }

    /// Register a shader under a name, replacing any previous entry
    pub fn register_shader(&mut self, name: impl Into<String>, shader: Arc<dyn Shader>) {
        self.shaders.insert(name.into(), shader);
    }

    /// Look up a shader by name
    pub fn get_shader(&self, name: &str) -> Result<Arc<dyn Shader>, AssetError> {
        self.shaders
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::ShaderNotFound(name.to_string()))
    }

    /// The default 1x1 opaque white texture (texture slot 0 of every batch)
    pub fn white_texture(&self) -> Arc<dyn Texture2D> {
        Arc::clone(&self.white_texture)
    }
}
