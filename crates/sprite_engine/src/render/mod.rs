//! # 2D Rendering System
//!
//! This module contains the sprite batching core and the capability traits
//! it consumes.
//!
//! ## Architecture
//!
//! - **api**: traits the graphics backend implements ([`api::RenderBackend`],
//!   [`api::Shader`], [`api::Texture2D`], buffer objects)
//! - **vertex**: the packed vertex record and buffer layout description
//! - **texture_slots**: bounded per-batch texture slot table
//! - **batch**: CPU-side vertex pool and per-frame statistics
//! - **renderer_2d**: scene lifecycle, draw submission, flush pipeline
//! - **backends**: in-repo backend implementations (currently the headless
//!   recorder used by tests and the demo app)
//!
//! Draw order is submission order: later draws paint over earlier ones,
//! and an automatic flush never reorders geometry.

pub mod api;
pub mod backends;
pub mod batch;
pub mod renderer_2d;
pub mod texture_slots;
pub mod vertex;

mod renderer_2d_tests;

pub use batch::BatchStats;
pub use renderer_2d::{Renderer2D, BATCH_SHADER, CIRCLE_SHADER};
pub use vertex::{BufferElement, BufferLayout, QuadVertex, ShaderDataType};

use thiserror::Error;

use crate::assets::AssetError;
use crate::core::config::ConfigError;

/// Errors raised while constructing the renderer or its GPU resources
#[derive(Debug, Error)]
pub enum RenderError {
    /// A required asset could not be resolved
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    /// The supplied configuration is unusable
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The backend failed to create a resource
    #[error("backend error: {0}")]
    Backend(String),
}

/// Scene protocol violations.
///
/// These are contract errors on the caller's side, not runtime conditions:
/// draw calls are only valid between `begin_scene` and `end_scene`, and
/// scenes never nest. Capacity overflow is deliberately absent here; it is
/// absorbed by the automatic flush policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SceneError {
    /// `begin_scene` was called while a scene was already active
    #[error("scene has already started")]
    SceneAlreadyActive,

    /// A draw call or `end_scene` arrived outside an active scene
    #[error("no active scene; calls must be bracketed by begin_scene/end_scene")]
    NoActiveScene,
}
