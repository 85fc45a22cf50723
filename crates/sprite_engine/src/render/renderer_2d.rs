//! # 2D Batch Renderer
//!
//! High-level draw submission API for textured quads and solid circles.
//!
//! ## Frame protocol
//!
//! `begin_scene` and `end_scene` bracket exactly one batch lifetime. Draw
//! calls between them accumulate vertices into the shared pool; hitting the
//! quad or texture-slot capacity triggers an automatic flush that is
//! invisible to the caller. `end_scene` flushes whatever remains.
//!
//! ## Ownership
//!
//! The renderer exclusively owns all mutable batch state (vertex pool,
//! slot table, cursor, counters) and the boxed backend. There are no
//! process-wide singletons; construct one renderer per render loop and
//! keep it on the render thread.

use std::sync::Arc;

use crate::assets::AssetRegistry;
use crate::core::config::Renderer2DConfig;
use crate::foundation::math::{self, Color, Mat4, Vec2, Vec3};
use crate::render::api::{RenderBackend, Shader, Texture2D, VertexArray, VertexBuffer};
use crate::render::batch::{BatchState, BatchStats};
use crate::render::texture_slots::TextureSlotTable;
use crate::render::vertex::{quad_index_pattern, QuadVertex, INDICES_PER_QUAD, QUAD_TEX_COORDS, QUAD_VERTEX_POSITIONS};
use crate::render::{RenderError, SceneError};

/// Name of the batched quad shader in the asset registry
pub const BATCH_SHADER: &str = "texture_batch";

/// Name of the non-batched circle shader in the asset registry
pub const CIRCLE_SHADER: &str = "solid_circle";

/// Sampler-array uniform enumerating slot -> texture unit
const UNIFORM_TEXTURES: &str = "u_Texture";
/// View-projection matrix uniform shared by both shaders
const UNIFORM_VIEW_PROJECTION: &str = "u_ViewProjection";
/// Per-draw transform uniform of the circle shader
const UNIFORM_TRANSFORM: &str = "u_Transform";
/// Per-draw color uniform of the circle shader
const UNIFORM_COLOR: &str = "u_Color";

/// Per-scene context, alive between `begin_scene` and `end_scene`
struct SceneData {
    view_projection: Mat4,
}

/// The 2D sprite batch renderer.
///
/// See the [module docs](self) for the frame protocol. All GPU interaction
/// goes through the capability traits in [`crate::render::api`].
pub struct Renderer2D {
    backend: Box<dyn RenderBackend>,
    batch: BatchState,
    slots: TextureSlotTable,
    stats: BatchStats,

    batch_shader: Arc<dyn Shader>,
    circle_shader: Arc<dyn Shader>,
    white_texture: Arc<dyn Texture2D>,

    quad_vertex_buffer: Arc<dyn VertexBuffer>,
    batch_vertex_array: Arc<dyn VertexArray>,
    unit_quad_vertex_array: Arc<dyn VertexArray>,

    // Identity slot -> unit mapping, precomputed to table capacity; a
    // flush uploads the first `texture_count` entries.
    samplers: Vec<i32>,

    scene: Option<SceneData>,
}

impl Renderer2D {
    /// Create the renderer and its one-time GPU resources.
    ///
    /// Allocates the CPU vertex pool, uploads the static 6-per-quad index
    /// pattern, and creates the unit-quad vertex array used by the circle
    /// path. Neither the pool nor the buffers are ever reallocated; every
    /// frame reuses them.
    pub fn new(
        mut backend: Box<dyn RenderBackend>,
        assets: Arc<AssetRegistry>,
        config: Renderer2DConfig,
    ) -> Result<Self, RenderError> {
        config.validate()?;

        let batch_shader = assets.get_shader(BATCH_SHADER)?;
        let circle_shader = assets.get_shader(CIRCLE_SHADER)?;
        let white_texture = assets.white_texture();

        // Shared quad batch: one big mutable vertex buffer plus the
        // precomputed repeating index pattern.
        let pool_bytes = config.max_quad_vertices() as usize * std::mem::size_of::<QuadVertex>();
        let quad_vertex_buffer =
            backend.create_vertex_buffer(pool_bytes, QuadVertex::layout())?;
        let indices = quad_index_pattern(config.max_quad_count);
        let quad_index_buffer = backend.create_index_buffer(&indices)?;
        let batch_vertex_array = backend
            .create_vertex_array(Arc::clone(&quad_vertex_buffer), quad_index_buffer)?;

        // Immediate path: a single static unit quad the circle shader
        // deforms per draw via its transform uniform.
        let unit_quad_vertex_array = Self::create_unit_quad(backend.as_mut())?;

        log::debug!(
            "Renderer2D initialized: {} quads, {} texture slots, {} byte vertex pool",
            config.max_quad_count,
            config.max_texture_slots,
            pool_bytes
        );

        Ok(Self {
            backend,
            batch: BatchState::new(config.max_quad_count),
            slots: TextureSlotTable::new(config.max_texture_slots, Arc::clone(&white_texture)),
            stats: BatchStats::default(),
            batch_shader,
            circle_shader,
            white_texture,
            quad_vertex_buffer,
            batch_vertex_array,
            unit_quad_vertex_array,
            samplers: (0..config.max_texture_slots as i32).collect(),
            scene: None,
        })
    }

    fn create_unit_quad(backend: &mut dyn RenderBackend) -> Result<Arc<dyn VertexArray>, RenderError> {
        let vertices: Vec<QuadVertex> = (0..4)
            .map(|corner| QuadVertex {
                position: [
                    QUAD_VERTEX_POSITIONS[corner][0],
                    QUAD_VERTEX_POSITIONS[corner][1],
                    QUAD_VERTEX_POSITIONS[corner][2],
                ],
                color: [1.0, 1.0, 1.0, 1.0],
                tex_coords: QUAD_TEX_COORDS[corner],
                tex_index: 0.0,
            })
            .collect();
        let bytes = bytemuck::cast_slice(&vertices);

        let vertex_buffer = backend.create_vertex_buffer(bytes.len(), QuadVertex::layout())?;
        vertex_buffer.set_data(bytes);
        let index_buffer = backend.create_index_buffer(&quad_index_pattern(1))?;
        backend.create_vertex_array(vertex_buffer, index_buffer)
    }

    /// Start a scene, making draw calls valid.
    ///
    /// Fails with [`SceneError::SceneAlreadyActive`] when called inside an
    /// open scene. Resets the write cursor, binds the batch shader, and
    /// uploads the view-projection matrix.
    pub fn begin_scene(&mut self, view_projection: &Mat4) -> Result<(), SceneError> {
        if self.scene.is_some() {
            return Err(SceneError::SceneAlreadyActive);
        }

        self.batch.reset();
        self.stats = BatchStats::default();

        self.batch_shader.bind();
        self.batch_shader
            .upload_uniform_mat4(UNIFORM_VIEW_PROJECTION, view_projection);

        self.scene = Some(SceneData {
            view_projection: *view_projection,
        });
        log::trace!("begin_scene");
        Ok(())
    }

    /// End the scene, flushing any pending geometry.
    ///
    /// Fails with [`SceneError::NoActiveScene`] when no scene is open.
    pub fn end_scene(&mut self) -> Result<(), SceneError> {
        if self.scene.is_none() {
            return Err(SceneError::NoActiveScene);
        }

        self.flush();
        self.scene = None;
        log::trace!(
            "end_scene: {} quads, {} circles, {} draw calls, {} flushes",
            self.stats.quads_submitted,
            self.stats.circles_submitted,
            self.stats.draw_calls,
            self.stats.flushes
        );
        Ok(())
    }

    /// Submit a textured quad under an arbitrary world transform.
    ///
    /// Capacity overflow (quad pool or texture slots) is absorbed by an
    /// automatic flush; the only error condition is calling this outside
    /// an active scene.
    pub fn draw_texture(
        &mut self,
        transform: &Mat4,
        texture: &Arc<dyn Texture2D>,
        color: Color,
    ) -> Result<(), SceneError> {
        if self.scene.is_none() {
            return Err(SceneError::NoActiveScene);
        }

        // Quad capacity first, so a capacity flush cannot strand a slot
        // allocated for this very draw.
        if self.batch.is_full() {
            self.flush();
        }

        let slot = match self.slots.resolve(texture) {
            Some(slot) => slot,
            None => {
                self.flush();
                match self.slots.resolve(texture) {
                    Some(slot) => slot,
                    // Capacity >= 2 is enforced by config validation, so a
                    // freshly reset table always has a free slot.
                    None => unreachable!("texture slot table empty after flush"),
                }
            }
        };

        self.batch.push_quad(transform, color, slot as f32);
        self.stats.quads_submitted += 1;
        self.stats.peak_texture_count = self.stats.peak_texture_count.max(self.slots.count());
        Ok(())
    }

    /// Submit a textured quad from position, size, and a z rotation in
    /// degrees. Builds translate * rotate * scale and delegates to
    /// [`Renderer2D::draw_texture`].
    pub fn draw_texture_at(
        &mut self,
        position: Vec3,
        size: Vec2,
        texture: &Arc<dyn Texture2D>,
        rotation_degrees: f32,
        color: Color,
    ) -> Result<(), SceneError> {
        let transform = math::quad_transform(position, size, rotation_degrees);
        self.draw_texture(&transform, texture, color)
    }

    /// Draw a solid circle under an arbitrary world transform.
    ///
    /// Circles bypass the batch: the disc shape needs per-fragment math
    /// (a signed-distance test in the fragment stage), so each circle is
    /// an immediate indexed draw of the shared unit quad with its own
    /// shader and uniforms.
    pub fn draw_circle(&mut self, transform: &Mat4, color: Color) -> Result<(), SceneError> {
        let scene = self.scene.as_ref().ok_or(SceneError::NoActiveScene)?;

        self.circle_shader.bind();
        self.circle_shader
            .upload_uniform_mat4(UNIFORM_VIEW_PROJECTION, &scene.view_projection);
        self.circle_shader
            .upload_uniform_mat4(UNIFORM_TRANSFORM, transform);
        self.circle_shader.upload_uniform_float4(UNIFORM_COLOR, &color);

        self.unit_quad_vertex_array.bind();
        let index_count = self.unit_quad_vertex_array.index_count();
        self.backend
            .draw_indexed(self.unit_quad_vertex_array.as_ref(), index_count);

        self.stats.circles_submitted += 1;
        self.stats.draw_calls += 1;
        Ok(())
    }

    /// Draw a solid circle from position and size (translate * scale).
    pub fn draw_circle_at(
        &mut self,
        position: Vec3,
        size: Vec2,
        color: Color,
    ) -> Result<(), SceneError> {
        let transform = math::circle_transform(position, size);
        self.draw_circle(&transform, color)
    }

    /// Submit a caller-provided vertex array with its own shader.
    ///
    /// Escape hatch for geometry that does not fit the quad batch. Uploads
    /// the scene view-projection and the given transform, then draws the
    /// array in full.
    pub fn submit(
        &mut self,
        vertex_array: &Arc<dyn VertexArray>,
        shader: &Arc<dyn Shader>,
        transform: &Mat4,
    ) -> Result<(), SceneError> {
        let scene = self.scene.as_ref().ok_or(SceneError::NoActiveScene)?;

        shader.bind();
        shader.upload_uniform_mat4(UNIFORM_VIEW_PROJECTION, &scene.view_projection);
        shader.upload_uniform_mat4(UNIFORM_TRANSFORM, transform);

        vertex_array.bind();
        self.backend
            .draw_indexed(vertex_array.as_ref(), vertex_array.index_count());
        self.stats.draw_calls += 1;
        Ok(())
    }

    /// Upload the written vertex span, bind the occupied texture slots,
    /// and issue the batch draw call, then reset the batch.
    ///
    /// A flush with zero pending quads is a harmless no-op: it uploads
    /// zero bytes and issues a void draw. The upload length is always the
    /// written span, never the full pool capacity, so stale tail data
    /// never crosses the bus.
    fn flush(&mut self) {
        let quad_count = self.batch.quad_count();

        self.quad_vertex_buffer
            .set_data(bytemuck::cast_slice(self.batch.written()));

        let texture_count = self.slots.count() as usize;
        for (unit, texture) in self.slots.occupied().enumerate() {
            texture.bind(unit as u32);
        }

        self.batch_shader.bind();
        self.batch_shader
            .upload_uniform_int_array(UNIFORM_TEXTURES, &self.samplers[..texture_count]);

        self.batch_vertex_array.bind();
        self.backend
            .draw_indexed(self.batch_vertex_array.as_ref(), quad_count * INDICES_PER_QUAD);

        if quad_count > 0 {
            self.stats.draw_calls += 1;
        }
        self.stats.flushes += 1;
        log::trace!("flush: {} quads, {} textures", quad_count, texture_count);

        self.batch.reset();
        self.slots.reset();
    }

    /// Whether a scene is currently open
    pub fn is_scene_active(&self) -> bool {
        self.scene.is_some()
    }

    /// Statistics for the current scene (reset on `begin_scene`)
    pub fn stats(&self) -> BatchStats {
        self.stats
    }

    /// Quads pending in the current batch
    pub fn pending_quads(&self) -> u32 {
        self.batch.quad_count()
    }

    /// Occupied texture slots in the current batch (>= 1)
    pub fn texture_count(&self) -> u32 {
        self.slots.count()
    }

    /// Slot currently assigned to `texture`, if it is in the batch
    pub fn slot_of(&self, texture: &Arc<dyn Texture2D>) -> Option<u32> {
        self.slots.slot_of(texture)
    }

    /// The default white texture (slot 0)
    pub fn white_texture(&self) -> Arc<dyn Texture2D> {
        Arc::clone(&self.white_texture)
    }
}
