//! Scenario tests for the 2D batch renderer
//!
//! These run the full submission pipeline against the headless recording
//! backend and assert on what actually reached the "GPU": upload byte
//! spans, draw-call index counts, texture binds, and uniform uploads.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::assets::AssetRegistry;
    use crate::core::config::Renderer2DConfig;
    use crate::foundation::math::{Color, Mat4, Vec2, Vec3, Vec4};
    use crate::render::backends::headless::{
        BackendLog, HeadlessBackend, HeadlessShader, HeadlessTexture, UniformValue,
    };
    use crate::render::api::{Shader, Texture2D};
    use crate::render::renderer_2d::{Renderer2D, BATCH_SHADER, CIRCLE_SHADER};
    use crate::render::vertex::{QuadVertex, QUAD_VERTEX_POSITIONS};
    use crate::render::SceneError;

    const VERTEX_SIZE: usize = std::mem::size_of::<QuadVertex>();
    const QUAD_BYTES: usize = 4 * VERTEX_SIZE;

    struct Fixture {
        renderer: Renderer2D,
        log: Arc<BackendLog>,
        batch_shader: Arc<HeadlessShader>,
        circle_shader: Arc<HeadlessShader>,
        white: Arc<dyn Texture2D>,
        // Uploads/draws recorded during construction (the unit quad for
        // the circle path); scenario assertions skip these.
        init_uploads: usize,
    }

    impl Fixture {
        fn new(max_quads: u32, max_slots: u32) -> Self {
            let backend = HeadlessBackend::new();
            let log = backend.log();

            let white: Arc<dyn Texture2D> = Arc::new(HeadlessTexture::new("white_1x1.png"));
            let batch_shader = Arc::new(HeadlessShader::new(BATCH_SHADER));
            let circle_shader = Arc::new(HeadlessShader::new(CIRCLE_SHADER));

            let mut assets = AssetRegistry::new(Arc::clone(&white));
            assets.register_shader(BATCH_SHADER, Arc::clone(&batch_shader) as Arc<dyn Shader>);
            assets.register_shader(CIRCLE_SHADER, Arc::clone(&circle_shader) as Arc<dyn Shader>);

            let renderer = Renderer2D::new(
                Box::new(backend),
                Arc::new(assets),
                Renderer2DConfig::new(max_quads, max_slots),
            )
            .expect("renderer construction");

            let init_uploads = log.upload_sizes().len();
            Self {
                renderer,
                log,
                batch_shader,
                circle_shader,
                white,
                init_uploads,
            }
        }

        fn scene_uploads(&self) -> Vec<usize> {
            self.log.upload_sizes().split_off(self.init_uploads)
        }

        fn scene_draws(&self) -> Vec<u32> {
            self.log.draw_counts()
        }

        fn texture(path: &str) -> Arc<dyn Texture2D> {
            Arc::new(HeadlessTexture::new(path))
        }

        fn red() -> Color {
            Color::new(1.0, 0.0, 0.0, 1.0)
        }
    }

    #[test]
    fn single_flush_uploads_exactly_the_written_span() {
        let mut f = Fixture::new(100, 32);
        let tex_a = Fixture::texture("a.png");
        let tex_b = Fixture::texture("b.png");

        f.renderer.begin_scene(&Mat4::identity()).unwrap();
        for i in 0..3 {
            let transform = Mat4::new_translation(&Vec3::new(i as f32, 0.0, 0.0));
            let texture = if i == 0 { &f.white } else if i == 1 { &tex_a } else { &tex_b };
            f.renderer.draw_texture(&transform, texture, Fixture::red()).unwrap();
        }
        f.renderer.end_scene().unwrap();

        assert_eq!(f.scene_uploads(), vec![3 * QUAD_BYTES]);
        assert_eq!(f.scene_draws(), vec![3 * 6]);
        assert_eq!(f.renderer.stats().flushes, 1);
    }

    #[test]
    fn repeated_texture_consumes_one_slot() {
        let mut f = Fixture::new(100, 32);
        let tex = Fixture::texture("a.png");

        f.renderer.begin_scene(&Mat4::identity()).unwrap();
        for _ in 0..5 {
            f.renderer
                .draw_texture(&Mat4::identity(), &tex, Fixture::red())
                .unwrap();
        }

        assert_eq!(f.renderer.texture_count(), 2);
        assert_eq!(f.renderer.slot_of(&tex), Some(1));
        f.renderer.end_scene().unwrap();
    }

    #[test]
    fn quad_overflow_flushes_once_and_keeps_every_quad() {
        let mut f = Fixture::new(4, 32);

        f.renderer.begin_scene(&Mat4::identity()).unwrap();
        for _ in 0..5 {
            f.renderer
                .draw_texture(&Mat4::identity(), &f.white.clone(), Fixture::red())
                .unwrap();
        }
        f.renderer.end_scene().unwrap();

        let stats = f.renderer.stats();
        assert_eq!(stats.quads_submitted, 5);
        assert_eq!(stats.flushes, 2);
        assert_eq!(f.scene_uploads(), vec![4 * QUAD_BYTES, QUAD_BYTES]);
        assert_eq!(f.scene_draws(), vec![24, 6]);
    }

    #[test]
    fn texture_overflow_flushes_and_restores_white_slot() {
        // Capacity 3: white + two user textures.
        let mut f = Fixture::new(100, 3);
        let tex_a = Fixture::texture("a.png");
        let tex_b = Fixture::texture("b.png");
        let tex_c = Fixture::texture("c.png");

        f.renderer.begin_scene(&Mat4::identity()).unwrap();
        f.renderer.draw_texture(&Mat4::identity(), &tex_a, Fixture::red()).unwrap();
        f.renderer.draw_texture(&Mat4::identity(), &tex_b, Fixture::red()).unwrap();
        // Third distinct texture: the table is full, so this flushes the
        // two pending quads and lands in slot 1 of the fresh table.
        f.renderer.draw_texture(&Mat4::identity(), &tex_c, Fixture::red()).unwrap();

        assert_eq!(f.renderer.slot_of(&tex_c), Some(1));
        assert_eq!(f.renderer.slot_of(&tex_a), None);
        assert_eq!(f.renderer.texture_count(), 2);
        assert_eq!(f.renderer.slot_of(&f.white.clone()), Some(0));

        f.renderer.end_scene().unwrap();
        assert_eq!(f.renderer.stats().flushes, 2);
        assert_eq!(f.scene_uploads(), vec![2 * QUAD_BYTES, QUAD_BYTES]);
        // After the final flush the table is back to {0: white}.
        assert_eq!(f.renderer.texture_count(), 1);
        assert_eq!(f.renderer.slot_of(&f.white.clone()), Some(0));
    }

    #[test]
    fn written_corners_are_the_transformed_unit_quad() {
        let mut f = Fixture::new(16, 32);
        let transform = Mat4::new_translation(&Vec3::new(7.0, -2.0, 1.0))
            * Mat4::new_nonuniform_scaling(&Vec3::new(3.0, 2.0, 1.0));

        f.renderer.begin_scene(&Mat4::identity()).unwrap();
        f.renderer
            .draw_texture(&transform, &f.white.clone(), Fixture::red())
            .unwrap();
        f.renderer.end_scene().unwrap();

        let payloads = f.log.upload_payloads();
        let batch_bytes = payloads.last().expect("one scene upload");
        let vertices: &[QuadVertex] = bytemuck::cast_slice(batch_bytes);
        assert_eq!(vertices.len(), 4);

        for (corner, vertex) in vertices.iter().enumerate() {
            let expected = transform * Vec4::from(QUAD_VERTEX_POSITIONS[corner]);
            assert_eq!(vertex.position, [expected.x, expected.y, expected.z]);
            assert_eq!(vertex.tex_index, 0.0);
        }
    }

    #[test]
    fn empty_scene_flush_is_a_noop() {
        let mut f = Fixture::new(16, 32);

        f.renderer.begin_scene(&Mat4::identity()).unwrap();
        f.renderer.end_scene().unwrap();

        assert_eq!(f.scene_uploads(), vec![0]);
        assert_eq!(f.scene_draws(), vec![0]);
        assert_eq!(f.renderer.pending_quads(), 0);
        assert_eq!(f.renderer.stats().draw_calls, 0);
    }

    #[test]
    fn nested_begin_scene_is_a_protocol_violation() {
        let mut f = Fixture::new(16, 32);

        f.renderer.begin_scene(&Mat4::identity()).unwrap();
        assert_eq!(
            f.renderer.begin_scene(&Mat4::identity()),
            Err(SceneError::SceneAlreadyActive)
        );
        // The original scene is still usable.
        f.renderer
            .draw_texture(&Mat4::identity(), &f.white.clone(), Fixture::red())
            .unwrap();
        f.renderer.end_scene().unwrap();
    }

    #[test]
    fn calls_outside_a_scene_are_rejected() {
        let mut f = Fixture::new(16, 32);
        let tex = Fixture::texture("a.png");

        assert_eq!(
            f.renderer.draw_texture(&Mat4::identity(), &tex, Fixture::red()),
            Err(SceneError::NoActiveScene)
        );
        assert_eq!(
            f.renderer.draw_circle(&Mat4::identity(), Fixture::red()),
            Err(SceneError::NoActiveScene)
        );
        assert_eq!(f.renderer.end_scene(), Err(SceneError::NoActiveScene));
    }

    #[test]
    fn white_and_textured_quads_share_one_batch() {
        let mut f = Fixture::new(100, 32);
        let tex_a = Fixture::texture("a.png");

        f.renderer.begin_scene(&Mat4::identity()).unwrap();
        f.renderer
            .draw_texture(
                &Mat4::new_translation(&Vec3::new(1.0, 0.0, 0.0)),
                &f.white.clone(),
                Fixture::red(),
            )
            .unwrap();
        f.renderer
            .draw_texture(
                &Mat4::new_translation(&Vec3::new(2.0, 0.0, 0.0)),
                &tex_a,
                Fixture::red(),
            )
            .unwrap();

        assert_eq!(f.renderer.pending_quads(), 2);
        assert_eq!(f.renderer.texture_count(), 2);
        assert_eq!(f.renderer.slot_of(&tex_a), Some(1));

        f.renderer.end_scene().unwrap();

        let stats = f.renderer.stats();
        assert_eq!(stats.flushes, 1);
        assert_eq!(stats.quads_submitted, 2);
        assert_eq!(stats.peak_texture_count, 2);
        assert_eq!(f.scene_uploads(), vec![2 * QUAD_BYTES]);

        // Slot 0 stayed white, slot 1 went to tex_a.
        let payloads = f.log.upload_payloads();
        let vertices: &[QuadVertex] = bytemuck::cast_slice(payloads.last().unwrap());
        assert_eq!(vertices[0].tex_index, 0.0);
        assert_eq!(vertices[4].tex_index, 1.0);

        // The sampler uniform enumerates both occupied units.
        assert_eq!(
            f.batch_shader.int_array_uniform("u_Texture"),
            Some(vec![0, 1])
        );
    }

    #[test]
    fn circles_draw_immediately_with_their_own_shader() {
        let mut f = Fixture::new(16, 32);
        let view_projection = Mat4::new_orthographic(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);

        f.renderer.begin_scene(&view_projection).unwrap();
        f.renderer
            .draw_circle_at(Vec3::zeros(), Vec2::new(2.0, 2.0), Fixture::red())
            .unwrap();

        // The circle drew before any batch flush.
        assert_eq!(f.scene_draws(), vec![6]);
        assert_eq!(f.renderer.pending_quads(), 0);
        assert!(f.circle_shader.bind_count() >= 1);
        assert!(matches!(
            f.circle_shader.uniform("u_Color"),
            Some(UniformValue::Float4(c)) if c == Fixture::red()
        ));
        assert!(matches!(
            f.circle_shader.uniform("u_ViewProjection"),
            Some(UniformValue::Mat4(m)) if m == view_projection
        ));

        f.renderer.end_scene().unwrap();
        let stats = f.renderer.stats();
        assert_eq!(stats.circles_submitted, 1);
        assert_eq!(stats.draw_calls, 1);
    }

    #[test]
    fn quads_and_circles_interleave_in_submission_order() {
        let mut f = Fixture::new(16, 32);

        f.renderer.begin_scene(&Mat4::identity()).unwrap();
        f.renderer
            .draw_texture(&Mat4::identity(), &f.white.clone(), Fixture::red())
            .unwrap();
        f.renderer
            .draw_circle(&Mat4::identity(), Fixture::red())
            .unwrap();
        f.renderer.end_scene().unwrap();

        // Circle first (immediate), then the batched quad at end_scene.
        assert_eq!(f.scene_draws(), vec![6, 6]);
        assert_eq!(f.renderer.stats().draw_calls, 2);
    }

    #[test]
    fn missing_shader_fails_construction() {
        let backend = HeadlessBackend::new();
        let white: Arc<dyn Texture2D> = Arc::new(HeadlessTexture::new("white_1x1.png"));
        let assets = AssetRegistry::new(white);

        let result = Renderer2D::new(
            Box::new(backend),
            Arc::new(assets),
            Renderer2DConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn invalid_config_fails_construction() {
        let backend = HeadlessBackend::new();
        let white: Arc<dyn Texture2D> = Arc::new(HeadlessTexture::new("white_1x1.png"));
        let mut assets = AssetRegistry::new(Arc::clone(&white));
        assets.register_shader(BATCH_SHADER, Arc::new(HeadlessShader::new(BATCH_SHADER)));
        assets.register_shader(CIRCLE_SHADER, Arc::new(HeadlessShader::new(CIRCLE_SHADER)));

        let result = Renderer2D::new(
            Box::new(backend),
            Arc::new(assets),
            Renderer2DConfig::new(16, 1),
        );
        assert!(result.is_err());
    }
}
