//! # Sprite Engine
//!
//! A 2D sprite batching renderer written in Rust.
//!
//! The engine accumulates per-frame draw requests (textured quads, solid
//! circles) into a shared, preallocated vertex buffer and flushes the
//! accumulated geometry into as few indexed draw calls as possible. The
//! low-level graphics API is not part of this crate: it is consumed through
//! the capability traits in [`render::api`], which a backend (OpenGL,
//! Vulkan, a test recorder) implements.
//!
//! ## Architecture
//!
//! - **Renderer2D**: scene lifecycle, draw submission, and flush policy
//! - **BatchState**: CPU-side vertex pool with an explicit write cursor
//! - **TextureSlotTable**: bounded texture-to-slot mapping per batch
//! - **AssetRegistry**: named shader lookup and the default white texture
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sprite_engine::prelude::*;
//! use sprite_engine::render::backends::headless::{HeadlessBackend, HeadlessShader, HeadlessTexture};
//!
//! let backend = HeadlessBackend::new();
//! let white: Arc<dyn Texture2D> = Arc::new(HeadlessTexture::new("white_1x1.png"));
//!
//! let mut assets = AssetRegistry::new(white);
//! assets.register_shader(BATCH_SHADER, Arc::new(HeadlessShader::new(BATCH_SHADER)));
//! assets.register_shader(CIRCLE_SHADER, Arc::new(HeadlessShader::new(CIRCLE_SHADER)));
//!
//! let config = Renderer2DConfig::default();
//! let mut renderer = Renderer2D::new(Box::new(backend), Arc::new(assets), config).unwrap();
//!
//! renderer.begin_scene(&Mat4::identity()).unwrap();
//! renderer.draw_texture_at(Vec3::new(0.0, 0.0, 0.0), Vec2::new(1.0, 1.0),
//!                          &renderer.white_texture(), 0.0, Color::new(1.0, 0.0, 0.0, 1.0)).unwrap();
//! renderer.end_scene().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod assets;
pub mod core;
pub mod foundation;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, AssetRegistry},
        core::config::Renderer2DConfig,
        foundation::math::{Color, Mat4, Vec2, Vec3, Vec4},
        render::{
            api::{RenderBackend, Shader, Texture2D, VertexArray},
            renderer_2d::{Renderer2D, BATCH_SHADER, CIRCLE_SHADER},
            RenderError, SceneError,
        },
    };
}
