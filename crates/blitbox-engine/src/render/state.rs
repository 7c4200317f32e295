use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;

use crate::assets::{self, SceneAssets};
use crate::shader;

use super::geometry::{
    self, PresentVertex, SceneVertex, BOX_VERTICES, CLEAR_VERTICES, PRESENT_VERTICES,
    STRIP_INDICES,
};
use super::offscreen::{OffscreenTarget, COLOR_FORMAT, DEPTH_FORMAT};
use super::{RenderCtx, RenderTarget, Viewport};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ScreenUniform {
    size: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

/// Everything the frame renderer needs, created exactly once.
///
/// Handles are owned here and only read after construction; any failure
/// during construction unwinds and releases the partially created resources
/// through wgpu's RAII handles.
pub struct RenderState {
    offscreen: OffscreenTarget,

    // scene pass
    fill_pipeline: wgpu::RenderPipeline,
    mesh_pipeline: wgpu::RenderPipeline,
    screen_ubo: wgpu::Buffer,
    fill_bind_group: wgpu::BindGroup,
    clear_vbo: wgpu::Buffer,
    box_vbo: wgpu::Buffer,
    strip_ibo: wgpu::Buffer,
    circle_vbo: wgpu::Buffer,
    circle_ibo: wgpu::Buffer,
    circle_index_count: u32,

    // present pass
    present_pipeline: wgpu::RenderPipeline,
    present_bind_group: wgpu::BindGroup,
    present_vbo: wgpu::Buffer,

    viewport: Viewport,
}

impl RenderState {
    /// The resource initializer: validates all four shader stages, creates
    /// the offscreen target, builds the three pipelines and uploads the
    /// static vertex/index buffers.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        scene_assets: &SceneAssets,
        size: PhysicalSize<u32>,
    ) -> Result<Self> {
        // Shader validation happens before any pipeline exists so a broken
        // stage reports its own name and compiler log.
        let display_vert = shader::compile(assets::DISPLAY_VERT, &scene_assets.display_vert)?;
        let fill_frag = shader::compile(assets::FILL_FRAG, &scene_assets.fill_frag)?;
        let fb_vert = shader::compile(assets::FRAMEBUFFER_VERT, &scene_assets.framebuffer_vert)?;
        let fb_frag = shader::compile(assets::FRAMEBUFFER_FRAG, &scene_assets.framebuffer_frag)?;

        shader::require_global(&[&display_vert, &fill_frag], "uScreen")?;
        shader::require_global(&[&display_vert, &fill_frag], "uTexture")?;
        shader::require_global(&[&fb_vert, &fb_frag], "uTexture")?;
        shader::require_global(&[&fb_vert, &fb_frag], "uSampler")?;

        let offscreen = OffscreenTarget::new(device, size.width, size.height)
            .context("offscreen target creation failed")?;

        let display_vert_mod = create_module(device, assets::DISPLAY_VERT, &scene_assets.display_vert);
        let fill_frag_mod = create_module(device, assets::FILL_FRAG, &scene_assets.fill_frag);
        let fb_vert_mod = create_module(device, assets::FRAMEBUFFER_VERT, &scene_assets.framebuffer_vert);
        let fb_frag_mod = create_module(device, assets::FRAMEBUFFER_FRAG, &scene_assets.framebuffer_frag);

        // uScreen uniform + bind group shared by both scene pipelines.
        let screen_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("blitbox uScreen ubo"),
            size: std::mem::size_of::<ScreenUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let fill_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("blitbox fill bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: std::num::NonZeroU64::new(
                        std::mem::size_of::<ScreenUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let fill_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("blitbox fill bind group"),
            layout: &fill_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen_ubo.as_entire_binding(),
            }],
        });

        let fill_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("blitbox fill pipeline layout"),
            bind_group_layouts: &[&fill_bgl],
            immediate_size: 0,
        });

        let fill_pipeline = scene_pipeline(
            device,
            "blitbox fill pipeline",
            &fill_layout,
            &display_vert_mod,
            "vs_fill",
            &fill_frag_mod,
            SceneVertex::layout(),
            wgpu::IndexFormat::Uint32,
        );

        let mesh_pipeline = scene_pipeline(
            device,
            "blitbox mesh pipeline",
            &fill_layout,
            &display_vert_mod,
            "vs_mesh",
            &fill_frag_mod,
            geometry::mesh_layout(),
            wgpu::IndexFormat::Uint16,
        );

        // Present pipeline: samples the offscreen color view.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("blitbox present sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let present_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("blitbox present bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let present_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("blitbox present bind group"),
            layout: &present_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&offscreen.color_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let present_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("blitbox present pipeline layout"),
            bind_group_layouts: &[&present_bgl],
            immediate_size: 0,
        });

        let present_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("blitbox present pipeline"),
            layout: Some(&present_layout),

            vertex: wgpu::VertexState {
                module: &fb_vert_mod,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[PresentVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fb_frag_mod,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        // Static buffer uploads.
        let clear_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("blitbox clear vbo"),
            contents: bytemuck::cast_slice(&CLEAR_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let box_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("blitbox box vbo"),
            contents: bytemuck::cast_slice(&BOX_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let strip_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("blitbox strip ibo"),
            contents: bytemuck::cast_slice(&STRIP_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let circle_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("blitbox circle vbo"),
            contents: scene_assets.circle.bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let circle_indices = scene_assets.circle.indices();
        let circle_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("blitbox circle ibo"),
            contents: bytemuck::cast_slice(&circle_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let present_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("blitbox present vbo"),
            contents: bytemuck::cast_slice(&PRESENT_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::info!(
            "render state ready: offscreen {}x{}, {} circle indices",
            size.width,
            size.height,
            circle_indices.len()
        );

        Ok(Self {
            offscreen,
            fill_pipeline,
            mesh_pipeline,
            screen_ubo,
            fill_bind_group,
            clear_vbo,
            box_vbo,
            strip_ibo,
            circle_vbo,
            circle_ibo,
            circle_index_count: circle_indices.len() as u32,
            present_pipeline,
            present_bind_group,
            present_vbo,
            viewport: Viewport::from_physical(size),
        })
    }

    /// The resize handler. Records the new drawable size for the next
    /// frame's uScreen uniform; the offscreen target keeps its fixed extent.
    /// Zero dimensions are recorded as-is (the shader guards the division).
    pub fn set_viewport(&mut self, size: PhysicalSize<u32>) {
        self.viewport = Viewport::from_physical(size);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The frame renderer. Two passes in fixed order: the scene pass
    /// accumulates the clear quad, the box and the circle into the offscreen
    /// target; the present pass then samples that target onto the surface.
    pub fn draw(&self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        let uniform = ScreenUniform {
            size: [self.viewport.width, self.viewport.height],
            _pad: [0.0; 2],
        };
        ctx.queue
            .write_buffer(&self.screen_ubo, 0, bytemuck::bytes_of(&uniform));

        // Scene pass. Ends (and flushes its attachment writes) before the
        // present pass may sample the offscreen color view.
        {
            let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("blitbox scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.offscreen.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.offscreen.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(0),
                        store: wgpu::StoreOp::Store,
                    }),
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(&self.fill_pipeline);
            rpass.set_bind_group(0, &self.fill_bind_group, &[]);
            rpass.set_index_buffer(self.strip_ibo.slice(..), wgpu::IndexFormat::Uint32);

            // Background fill quad.
            rpass.set_vertex_buffer(0, self.clear_vbo.slice(..));
            rpass.draw_indexed(0..STRIP_INDICES.len() as u32, 0, 0..1);

            // Box, same pipeline and indices.
            rpass.set_vertex_buffer(0, self.box_vbo.slice(..));
            rpass.draw_indexed(0..STRIP_INDICES.len() as u32, 0, 0..1);

            // Shading circle.
            rpass.set_pipeline(&self.mesh_pipeline);
            rpass.set_bind_group(0, &self.fill_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.circle_vbo.slice(..));
            rpass.set_index_buffer(self.circle_ibo.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..self.circle_index_count, 0, 0..1);
        }

        // Present pass onto the window surface.
        {
            let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("blitbox present pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(&self.present_pipeline);
            rpass.set_bind_group(0, &self.present_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.present_vbo.slice(..));
            rpass.draw(0..PRESENT_VERTICES.len() as u32, 0..1);
        }
    }
}

fn create_module(device: &wgpu::Device, name: &str, source: &str) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(name),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    })
}

/// Builds one of the two scene pipelines: triangle-strip topology, depth
/// test and blending disabled, rendering into the offscreen color format.
#[allow(clippy::too_many_arguments)]
fn scene_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    vert: &wgpu::ShaderModule,
    vert_entry: &str,
    frag: &wgpu::ShaderModule,
    vertex_layout: wgpu::VertexBufferLayout<'_>,
    strip_index_format: wgpu::IndexFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),

        vertex: wgpu::VertexState {
            module: vert,
            entry_point: Some(vert_entry),
            compilation_options: Default::default(),
            buffers: &[vertex_layout],
        },

        fragment: Some(wgpu::FragmentState {
            module: frag,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: COLOR_FORMAT,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            strip_index_format: Some(strip_index_format),
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        // The depth/stencil attachment exists but the scene never tests
        // against it.
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::Always,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
