//! wgpu implementation of the rendering boundary.
//!
//! Each shading program owns a CPU-side copy of its uniform block; uniform
//! locations are byte offsets into that block. The active program's block is
//! uploaded when the frame is presented. Blend state lives in the pipeline,
//! so every program carries one pipeline per blend mode.

use crate::geometry::Mesh;
use anyhow::Context;
use glam::{Mat4, Vec3};
use viewer_core::constants::CLEAR_COLOR;
use viewer_core::render_mode::{
    UNIFORM_COLOR, UNIFORM_LIGHT_POSITION, UNIFORM_NORMAL_MATRIX, UNIFORM_OPACITY,
    UNIFORM_PROJECTION, UNIFORM_VIEW,
};
use viewer_core::{Blend, RenderBackend, Shading, UniformLocation, ViewerError};
use wgpu::util::DeviceExt;

static LAMBERT_WGSL: &str = include_str!("../shaders/lambert.wgsl");
static PHONG_WGSL: &str = include_str!("../shaders/phong.wgsl");

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

// Byte offsets matching the WGSL `Uniforms` structs.
const LAMBERT_LAYOUT: &[(&str, u32)] = &[
    (UNIFORM_PROJECTION, 0),
    (UNIFORM_VIEW, 64),
    (UNIFORM_LIGHT_POSITION, 128),
    (UNIFORM_OPACITY, 140),
    (UNIFORM_COLOR, 144),
];
const LAMBERT_BLOCK_SIZE: usize = 160;

const PHONG_LAYOUT: &[(&str, u32)] = &[
    (UNIFORM_PROJECTION, 0),
    (UNIFORM_VIEW, 64),
    (UNIFORM_NORMAL_MATRIX, 128),
    (UNIFORM_LIGHT_POSITION, 192),
    (UNIFORM_OPACITY, 204),
    (UNIFORM_COLOR, 208),
];
const PHONG_BLOCK_SIZE: usize = 224;

struct Program {
    layout: &'static [(&'static str, u32)],
    block: Vec<u8>,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    opaque: wgpu::RenderPipeline,
    transparent: wgpu::RenderPipeline,
}

impl Program {
    fn location(&self, name: &str) -> Option<UniformLocation> {
        self.layout
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, offset)| UniformLocation(*offset))
    }

    fn write(&mut self, location: UniformLocation, bytes: &[u8]) {
        let start = location.0 as usize;
        match self.block.get_mut(start..start + bytes.len()) {
            Some(dst) => dst.copy_from_slice(bytes),
            None => log::warn!("uniform write at {} out of block bounds", start),
        }
    }

    fn pipeline(&self, blend: Blend) -> &wgpu::RenderPipeline {
        match blend {
            Blend::Opaque => &self.opaque,
            Blend::Transparent => &self.transparent,
        }
    }
}

struct ProgramDesc<'a> {
    label: &'static str,
    source: &'static str,
    layout: &'static [(&'static str, u32)],
    block_size: usize,
    bind_group_layout: &'a wgpu::BindGroupLayout,
    pipeline_layout: &'a wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    sample_count: u32,
}

fn additive_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

fn build_program(device: &wgpu::Device, desc: ProgramDesc<'_>) -> Program {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(desc.label),
        source: wgpu::ShaderSource::Wgsl(desc.source.into()),
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(desc.label),
        size: desc.block_size as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(desc.label),
        layout: desc.bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    let vertex_buffers = [wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<crate::geometry::MeshVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
                shader_location: 1,
            },
        ],
    }];

    let make_pipeline = |blend: Option<wgpu::BlendState>| {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(desc.pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: desc.sample_count,
                ..Default::default()
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: desc.format,
                    blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        })
    };
    let opaque = make_pipeline(None);
    let transparent = make_pipeline(Some(additive_blend()));

    Program {
        layout: desc.layout,
        block: vec![0; desc.block_size],
        uniform_buffer,
        bind_group,
        opaque,
        transparent,
    }
}

/// Largest sample count not above the request that both the colour and the
/// depth attachment support.
fn pick_sample_count(adapter: &wgpu::Adapter, format: wgpu::TextureFormat, requested: u32) -> u32 {
    let color = adapter.get_texture_format_features(format).flags;
    let depth = adapter.get_texture_format_features(DEPTH_FORMAT).flags;
    [16, 8, 4, 2]
        .into_iter()
        .find(|&n| n <= requested && color.sample_count_supported(n) && depth.sample_count_supported(n))
        .unwrap_or(1)
}

fn attachment_view(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    format: wgpu::TextureFormat,
    sample_count: u32,
    label: &str,
) -> wgpu::TextureView {
    device
        .create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
        .create_view(&wgpu::TextureViewDescriptor::default())
}

pub struct GpuState<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sample_count: u32,
    msaa_view: Option<wgpu::TextureView>,
    depth_view: wgpu::TextureView,
    lambert: Program,
    phong: Program,
    active: Shading,
    blend: Blend,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    clear_pending: bool,
    draw_pending: bool,
    fatal: bool,
}

impl<'w> GpuState<'w> {
    pub async fn new(
        window: &'w winit::window::Window,
        mesh: &Mesh,
        requested_msaa: u32,
    ) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(|e| ViewerError::Surface(e.to_string()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(ViewerError::Adapter)?;
        log::info!("adapter: {}", adapter.get_info().name);
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| ViewerError::Device(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(caps.formats[0]);
        // The frame pacer owns the cadence, so prefer presenting without vsync.
        let present_mode = [wgpu::PresentMode::Immediate, wgpu::PresentMode::Mailbox]
            .into_iter()
            .find(|m| caps.present_modes.contains(m))
            .unwrap_or(wgpu::PresentMode::Fifo);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let sample_count = pick_sample_count(&adapter, format, requested_msaa);
        log::info!(
            "surface {:?} {:?}, msaa {} (requested {})",
            format,
            present_mode,
            sample_count,
            requested_msaa
        );

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniforms"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let lambert = build_program(
            &device,
            ProgramDesc {
                label: "lambert",
                source: LAMBERT_WGSL,
                layout: LAMBERT_LAYOUT,
                block_size: LAMBERT_BLOCK_SIZE,
                bind_group_layout: &bind_group_layout,
                pipeline_layout: &pipeline_layout,
                format,
                sample_count,
            },
        );
        let phong = build_program(
            &device,
            ProgramDesc {
                label: "phong",
                source: PHONG_WGSL,
                layout: PHONG_LAYOUT,
                block_size: PHONG_BLOCK_SIZE,
                bind_group_layout: &bind_group_layout,
                pipeline_layout: &pipeline_layout,
                format,
                sample_count,
            },
        );

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("menger_vb"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("menger_ib"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let index_count = u32::try_from(mesh.indices.len()).context("mesh index count")?;

        let msaa_view = (sample_count > 1)
            .then(|| attachment_view(&device, &config, format, sample_count, "msaa"));
        let depth_view = attachment_view(&device, &config, DEPTH_FORMAT, sample_count, "depth");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            sample_count,
            msaa_view,
            depth_view,
            lambert,
            phong,
            active: Shading::Phong,
            blend: Blend::Transparent,
            vertex_buffer,
            index_buffer,
            index_count,
            clear_pending: false,
            draw_pending: false,
            fatal: false,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.reconfigure();
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        let format = self.config.format;
        self.msaa_view = (self.sample_count > 1).then(|| {
            attachment_view(&self.device, &self.config, format, self.sample_count, "msaa")
        });
        self.depth_view = attachment_view(
            &self.device,
            &self.config,
            DEPTH_FORMAT,
            self.sample_count,
            "depth",
        );
    }

    /// Set after an unrecoverable surface error; the loop should end.
    pub fn is_fatal(&self) -> bool {
        self.fatal
    }

    fn program(&self, shading: Shading) -> &Program {
        match shading {
            Shading::Lambert => &self.lambert,
            Shading::Phong => &self.phong,
        }
    }

    fn active_program_mut(&mut self) -> &mut Program {
        match self.active {
            Shading::Lambert => &mut self.lambert,
            Shading::Phong => &mut self.phong,
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let program = self.program(self.active);
        self.queue
            .write_buffer(&program.uniform_buffer, 0, &program.block);

        let (color_load, depth_load) = if self.clear_pending {
            let [r, g, b, a] = CLEAR_COLOR;
            (
                wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                wgpu::LoadOp::Clear(1.0),
            )
        } else {
            (wgpu::LoadOp::Load, wgpu::LoadOp::Load)
        };
        let (view, resolve_target) = match &self.msaa_view {
            Some(msaa) => (msaa, Some(&frame_view)),
            None => (&frame_view, None),
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("menger"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: color_load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: depth_load,
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if self.draw_pending {
                rpass.set_pipeline(program.pipeline(self.blend));
                rpass.set_bind_group(0, &program.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..self.index_count, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl RenderBackend for GpuState<'_> {
    fn use_program(&mut self, shading: Shading) {
        self.active = shading;
    }

    fn uniform_location(&self, shading: Shading, name: &str) -> Option<UniformLocation> {
        self.program(shading).location(name)
    }

    fn set_uniform_f32(&mut self, location: UniformLocation, value: f32) {
        self.active_program_mut()
            .write(location, bytemuck::bytes_of(&value));
    }

    fn set_uniform_vec3(&mut self, location: UniformLocation, value: Vec3) {
        self.active_program_mut()
            .write(location, bytemuck::cast_slice(&value.to_array()));
    }

    fn set_uniform_mat4(&mut self, location: UniformLocation, value: &Mat4) {
        self.active_program_mut()
            .write(location, bytemuck::cast_slice(&value.to_cols_array()));
    }

    fn set_blend(&mut self, blend: Blend) {
        self.blend = blend;
    }

    fn clear(&mut self) {
        self.clear_pending = true;
    }

    fn draw_mesh(&mut self) {
        self.draw_pending = true;
    }

    fn present(&mut self) {
        match self.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => self.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory");
                self.fatal = true;
            }
            Err(e) => log::warn!("frame skipped: {:?}", e),
        }
        self.clear_pending = false;
        self.draw_pending = false;
    }
}
