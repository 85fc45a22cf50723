//! Sprite batch demo
//!
//! Drives the 2D renderer through a few frames of quads and circles on
//! the headless backend and reports what reached the backend: uploads,
//! draw calls, and batch statistics. Useful as a smoke test and as a
//! worked example of the submission API.

use std::sync::Arc;

use sprite_engine::prelude::*;
use sprite_engine::render::backends::headless::{
    HeadlessBackend, HeadlessShader, HeadlessTexture,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Starting sprite batch demo...");

    let backend = HeadlessBackend::new();
    let backend_log = backend.log();

    let white: Arc<dyn Texture2D> = Arc::new(HeadlessTexture::new("textures/white_1x1.png"));
    let ship: Arc<dyn Texture2D> = Arc::new(HeadlessTexture::new("textures/ship.png"));
    let asteroid: Arc<dyn Texture2D> = Arc::new(HeadlessTexture::new("textures/asteroid.png"));

    let mut assets = AssetRegistry::new(Arc::clone(&white));
    assets.register_shader(BATCH_SHADER, Arc::new(HeadlessShader::new(BATCH_SHADER)));
    assets.register_shader(CIRCLE_SHADER, Arc::new(HeadlessShader::new(CIRCLE_SHADER)));

    let config = Renderer2DConfig::new(1024, 16);
    let mut renderer = Renderer2D::new(Box::new(backend), Arc::new(assets), config)?;

    let view_projection = Mat4::new_orthographic(-8.0, 8.0, -6.0, 6.0, -1.0, 1.0);

    for frame in 0..3 {
        renderer.begin_scene(&view_projection)?;

        // A field of rotating asteroid sprites.
        for i in 0..32 {
            let angle = (frame * 32 + i) as f32 * 3.0;
            let x = -6.0 + (i % 8) as f32 * 1.5;
            let y = -4.0 + (i / 8) as f32 * 2.0;
            renderer.draw_texture_at(
                Vec3::new(x, y, 0.0),
                Vec2::new(1.0, 1.0),
                &asteroid,
                angle,
                Color::new(1.0, 1.0, 1.0, 1.0),
            )?;
        }

        // The ship, plus an untextured tinted quad as its exhaust.
        renderer.draw_texture_at(
            Vec3::new(0.0, 0.0, 0.1),
            Vec2::new(1.0, 1.5),
            &ship,
            (frame as f32) * 10.0,
            Color::new(1.0, 1.0, 1.0, 1.0),
        )?;
        renderer.draw_texture_at(
            Vec3::new(0.0, -1.0, 0.1),
            Vec2::new(0.3, 0.6),
            &renderer.white_texture(),
            0.0,
            Color::new(1.0, 0.6, 0.1, 0.8),
        )?;

        // Shield bubble, drawn as an immediate circle.
        renderer.draw_circle_at(
            Vec3::new(0.0, 0.0, 0.2),
            Vec2::new(2.2, 2.2),
            Color::new(0.3, 0.6, 1.0, 0.25),
        )?;

        renderer.end_scene()?;

        let stats = renderer.stats();
        log::info!(
            "frame {}: {} quads + {} circles in {} draw calls ({} flushes, peak {} texture slots)",
            frame,
            stats.quads_submitted,
            stats.circles_submitted,
            stats.draw_calls,
            stats.flushes,
            stats.peak_texture_count,
        );
    }

    log::info!(
        "backend saw {} uploads and {} draw calls total",
        backend_log.upload_sizes().len(),
        backend_log.draw_counts().len(),
    );
    Ok(())
}
