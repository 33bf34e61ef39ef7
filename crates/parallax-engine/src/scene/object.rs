use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::camera::FrameView;
use crate::math::Transform;
use crate::render::{
    ImageData, ObjectUniforms, ParallaxPipeline, RenderCtx, ShadingFlags, Texture, TextureKind,
};

use super::Geometry;

pub const DEFAULT_DEPTH_SCALE: f32 = 0.05;
pub const DEFAULT_LIGHT_POSITION: Vec3 = Vec3::new(0.0, -1.0, -7.0);

/// A drawable entity: geometry, its three surface maps and a model transform.
///
/// CPU state (geometry, images, toggles, uniforms) is always available. The
/// GPU side (buffers, textures, bind group) is created on the first
/// [`Object::render`] and dropped whenever the geometry or a map changes.
pub struct Object {
    geometry: Geometry,

    diffuse: ImageData,
    normal_map: ImageData,
    depth_map: ImageData,

    transform: Transform,
    shading: ShadingFlags,
    depth_scale: f32,
    light_position: Vec3,

    uniforms: ObjectUniforms,
    gpu: Option<ObjectGpu>,
}

struct ObjectGpu {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    ubo: wgpu::Buffer,
    _textures: [Texture; 3],
    bind_group: wgpu::BindGroup,
    index_count: u32,
}

impl Object {
    /// Empty object with flat placeholder maps; draws nothing until it has geometry.
    pub fn new() -> Self {
        Self {
            geometry: Geometry::new(),
            diffuse: ImageData::solid_color(1, 1, [255, 255, 255, 255]),
            normal_map: ImageData::flat_normal_map(),
            depth_map: ImageData::flat_depth_map(),
            transform: Transform::new(),
            shading: ShadingFlags::default(),
            depth_scale: DEFAULT_DEPTH_SCALE,
            light_position: DEFAULT_LIGHT_POSITION,
            uniforms: ObjectUniforms::default(),
            gpu: None,
        }
    }

    /// Turns this object into the unit textured quad with the given maps.
    pub fn make_textured_quad(
        &mut self,
        diffuse: ImageData,
        normal_map: ImageData,
        depth_map: ImageData,
    ) {
        self.geometry = Geometry::textured_quad();
        self.diffuse = diffuse;
        self.normal_map = normal_map;
        self.depth_map = depth_map;
        self.gpu = None;
    }

    /// Replaces the geometry, generating its vertex buffer if it is stale.
    pub fn set_geometry(&mut self, mut geometry: Geometry) {
        geometry.ensure_generated();
        self.geometry = geometry;
        self.gpu = None;
    }

    /// Replaces the diffuse map.
    pub fn load_texture(&mut self, image: ImageData) {
        self.diffuse = image;
        self.gpu = None;
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn shading(&self) -> ShadingFlags {
        self.shading
    }

    pub fn set_shading(&mut self, shading: ShadingFlags) {
        self.shading = shading;
    }

    pub fn set_use_normal_map(&mut self, enabled: bool) {
        self.shading.normal_map = enabled;
    }

    pub fn set_use_parallax_mapping(&mut self, enabled: bool) {
        self.shading.parallax_mapping = enabled;
    }

    pub fn set_use_self_shadowing(&mut self, enabled: bool) {
        self.shading.self_shadowing = enabled;
    }

    pub fn depth_scale(&self) -> f32 {
        self.depth_scale
    }

    /// Sets the parallax depth scale; negative values clamp to zero.
    pub fn set_depth_scale(&mut self, depth_scale: f32) {
        self.depth_scale = depth_scale.max(0.0);
    }

    pub fn adjust_depth_scale(&mut self, delta: f32) {
        self.set_depth_scale(self.depth_scale + delta);
        log::info!("depth scale: {:.3}", self.depth_scale);
    }

    pub fn light_position(&self) -> Vec3 {
        self.light_position
    }

    pub fn set_light_position(&mut self, position: Vec3) {
        self.light_position = position;
    }

    /// Uniform block written by the last `update`.
    pub fn uniforms(&self) -> &ObjectUniforms {
        &self.uniforms
    }

    /// True when the geometry has triangles and a vertex buffer matching them.
    pub fn is_drawable(&self) -> bool {
        self.geometry.index_count() > 0
            && !self.geometry.vertices().is_empty()
            && !self.geometry.is_stale()
    }

    pub fn has_gpu_resources(&self) -> bool {
        self.gpu.is_some()
    }

    /// Refreshes the uniform block for this frame.
    pub fn update(&mut self, frame: &FrameView) {
        self.uniforms = ObjectUniforms::new(
            self.transform.matrix(),
            frame,
            self.light_position,
            self.shading,
            self.depth_scale,
        );
    }

    /// Records this object's draw into `pass`, creating GPU resources on first use.
    ///
    /// `pipeline.ensure_pipeline` must have run for `ctx.surface_format`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        pipeline: &ParallaxPipeline,
        pass: &mut wgpu::RenderPass<'_>,
    ) {
        if !self.is_drawable() {
            return;
        }
        let Some(render_pipeline) = pipeline.pipeline() else {
            return;
        };

        self.ensure_gpu(ctx, pipeline);
        let Some(gpu) = self.gpu.as_ref() else {
            return;
        };

        ctx.queue.write_buffer(&gpu.ubo, 0, bytemuck::bytes_of(&self.uniforms));

        pass.set_pipeline(render_pipeline);
        pass.set_bind_group(0, &gpu.bind_group, &[]);
        pass.set_vertex_buffer(0, gpu.vbo.slice(..));
        pass.set_index_buffer(gpu.ibo.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..gpu.index_count, 0, 0..1);
    }

    fn ensure_gpu(&mut self, ctx: &RenderCtx<'_>, pipeline: &ParallaxPipeline) {
        if self.gpu.is_some() {
            return;
        }

        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("object vbo"),
            contents: bytemuck::cast_slice(self.geometry.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("object ibo"),
            contents: bytemuck::cast_slice(self.geometry.index_data()),
            usage: wgpu::BufferUsages::INDEX,
        });

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("object ubo"),
            size: std::mem::size_of::<ObjectUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let upload = |image: &ImageData, kind, label| {
            Texture::from_image(ctx.device, ctx.queue, image, kind, label)
        };
        let diffuse = upload(&self.diffuse, TextureKind::Color, "diffuse map");
        let normal = upload(&self.normal_map, TextureKind::Data, "normal map");
        let depth = upload(&self.depth_map, TextureKind::Data, "depth map");

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object bind group"),
            layout: pipeline.bind_group_layout(),
            entries: &[
                wgpu::BindGroupEntry {
                    binding: ParallaxPipeline::UNIFORM_BINDING,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: ParallaxPipeline::DIFFUSE_BINDING,
                    resource: wgpu::BindingResource::TextureView(diffuse.view()),
                },
                wgpu::BindGroupEntry {
                    binding: ParallaxPipeline::NORMAL_BINDING,
                    resource: wgpu::BindingResource::TextureView(normal.view()),
                },
                wgpu::BindGroupEntry {
                    binding: ParallaxPipeline::DEPTH_BINDING,
                    resource: wgpu::BindingResource::TextureView(depth.view()),
                },
                wgpu::BindGroupEntry {
                    binding: ParallaxPipeline::SAMPLER_BINDING,
                    resource: wgpu::BindingResource::Sampler(pipeline.sampler()),
                },
            ],
        });

        log::debug!(
            "object GPU resources created ({} vertices, {} indices)",
            self.geometry.vertices().len(),
            self.geometry.index_count()
        );

        self.gpu = Some(ObjectGpu {
            vbo,
            ibo,
            ubo,
            _textures: [diffuse, normal, depth],
            bind_group,
            index_count: self.geometry.index_count(),
        });
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}
