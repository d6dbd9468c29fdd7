//! wgpu renderer shared by the web and native front ends.

mod helpers;

use crate::constants::{CLEAR_COLOR, INDICATOR_TEXTURE_SIZE};
use crate::indicator::indicator_texture;
use crate::scene::{Scene, Shading, TextureKind};
use crate::texture::ImageSlot;
use crate::uniforms::{draw_order, pack_frame, pack_object, FrameUniforms, ObjectUniforms};
use fnv::FnvHashMap;
use glam::Vec2;
use helpers::{
    create_depth_target, create_image_sampler, make_background_pipeline, make_scene_pipeline, upload_mip_chain,
    upload_rgba_texture,
};
use wgpu::util::DeviceExt;

const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
const DATA_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter")]
    NoAdapter,
    #[error("request_device error: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

struct GpuTexture {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl From<(wgpu::Texture, wgpu::TextureView)> for GpuTexture {
    fn from((texture, view): (wgpu::Texture, wgpu::TextureView)) -> Self {
        Self {
            _texture: texture,
            view,
        }
    }
}

struct GpuImage {
    slot: ImageSlot,
    color: GpuTexture,
    normal: Option<GpuTexture>,
}

/// Textures and sampler bound together for one draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct TextureSetKey {
    color: Option<TextureKind>,
    normal: Option<TextureKind>,
    repeat: bool,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    #[allow(dead_code)]
    depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,

    lit_pipeline: wgpu::RenderPipeline,
    additive_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,

    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,

    // One 256-aligned slot per drawn entity, bound with a dynamic offset
    object_bgl: wgpu::BindGroupLayout,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    object_stride: u64,
    object_capacity: usize,
    object_staging: Vec<u8>,

    texture_bgl: wgpu::BindGroupLayout,
    clamp_sampler: wgpu::Sampler,
    repeat_sampler: wgpu::Sampler,
    white: GpuTexture,
    flat_normal: GpuTexture,
    indicator: GpuTexture,
    images: Vec<GpuImage>,
    // Rebuilt lazily; cleared whenever an image arrives
    texture_sets: FnvHashMap<TextureSetKey, wgpu::BindGroup>,

    background_pipeline: wgpu::RenderPipeline,
    background_bgl: wgpu::BindGroupLayout,
    background_bind_group: Option<wgpu::BindGroup>,

    meshes: Vec<GpuMesh>,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'a>>,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let width = width.max(1);
        let height = height.max(1);
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(target)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;
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
            .await?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[render] surface {:?} {}x{}", format, width, height);

        let (depth_tex, depth_view) = create_depth_target(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::SCENE_WGSL.into()),
        });

        let frame_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_bgl"),
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
        let object_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniforms>() as u64),
                },
                count: None,
            }],
        });
        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
            ],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&frame_bgl, &object_bgl, &texture_bgl],
            push_constant_ranges: &[],
        });
        let lit_pipeline = make_scene_pipeline(&device, &layout, &shader, Shading::Standard, format);
        let additive_pipeline = make_scene_pipeline(&device, &layout, &shader, Shading::Additive, format);
        let line_pipeline = make_scene_pipeline(&device, &layout, &shader, Shading::Line, format);

        let background_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("background_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::BACKGROUND_WGSL.into()),
        });
        let background_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("background_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
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
        let background_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("background_pl"),
            bind_group_layouts: &[&background_bgl],
            push_constant_ranges: &[],
        });
        let background_pipeline = make_background_pipeline(&device, &background_layout, &background_shader, format);

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bg"),
            layout: &frame_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let align = device.limits().min_uniform_buffer_offset_alignment as u64;
        let object_stride = (std::mem::size_of::<ObjectUniforms>() as u64).div_ceil(align) * align;
        let object_capacity = 16;
        let (object_buffer, object_bind_group) =
            create_object_slots(&device, &object_bgl, object_stride, object_capacity);

        let clamp_sampler = create_image_sampler(&device, "clamp_sampler", wgpu::AddressMode::ClampToEdge);
        let repeat_sampler = create_image_sampler(&device, "repeat_sampler", wgpu::AddressMode::Repeat);
        let white: GpuTexture = upload_rgba_texture(&device, &queue, "white_tex", COLOR_FORMAT, 1, &[255; 4]).into();
        let flat_normal: GpuTexture =
            upload_rgba_texture(&device, &queue, "flat_normal_tex", DATA_FORMAT, 1, &[128, 128, 255, 255]).into();
        let pixels = indicator_texture(INDICATOR_TEXTURE_SIZE);
        let indicator: GpuTexture = upload_rgba_texture(
            &device,
            &queue,
            "indicator_tex",
            COLOR_FORMAT,
            INDICATOR_TEXTURE_SIZE,
            &pixels,
        )
        .into();

        let [r, g, b] = CLEAR_COLOR;
        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_tex,
            depth_view,
            lit_pipeline,
            additive_pipeline,
            line_pipeline,
            frame_buffer,
            frame_bind_group,
            object_bgl,
            object_buffer,
            object_bind_group,
            object_stride,
            object_capacity,
            object_staging: Vec::new(),
            texture_bgl,
            clamp_sampler,
            repeat_sampler,
            white,
            flat_normal,
            indicator,
            images: Vec::new(),
            texture_sets: FnvHashMap::default(),
            background_pipeline,
            background_bgl,
            background_bind_group: None,
            meshes: Vec::new(),
            width,
            height,
            clear_color: wgpu::Color { r, g, b, a: 1.0 },
        })
    }

    /// Reapply the current surface configuration after the surface was
    /// lost or went out of date.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            let (tex, view) = create_depth_target(&self.device, width, height);
            self.depth_tex = tex;
            self.depth_view = view;
        }
    }

    /// Upload meshes added to the scene since the previous frame. Scene
    /// meshes are append-only, so only the tail needs uploading.
    fn sync_meshes(&mut self, scene: &Scene) {
        for data in &scene.meshes()[self.meshes.len()..] {
            let vertex_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_vertices"),
                contents: bytemuck::cast_slice(&data.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_indices"),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            self.meshes.push(GpuMesh {
                vertex_buffer,
                index_buffer,
                index_count: data.indices.len() as u32,
            });
        }
    }

    /// Upload images added to the scene since the previous frame, the same
    /// append-only way as meshes.
    fn sync_images(&mut self, scene: &Scene) {
        let known = self.images.len();
        for image in &scene.images()[known..] {
            let label = format!("{:?}_tex", image.slot);
            let color: GpuTexture = upload_mip_chain(&self.device, &self.queue, &label, COLOR_FORMAT, &image.mips).into();
            let normal: Option<GpuTexture> = image.slot.has_normal_map().then(|| {
                let label = format!("{:?}_normal_tex", image.slot);
                upload_mip_chain(&self.device, &self.queue, &label, DATA_FORMAT, &image.mips).into()
            });
            log::info!(
                "[render] uploaded {:?} {}x{} mips={}",
                image.slot,
                image.width(),
                image.height(),
                image.mips.len()
            );
            let gpu = GpuImage {
                slot: image.slot,
                color,
                normal,
            };
            if gpu.slot == ImageSlot::Background {
                self.background_bind_group = Some(self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("background_bg"),
                    layout: &self.background_bgl,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(&gpu.color.view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(&self.clamp_sampler),
                        },
                    ],
                }));
            }
            self.images.push(gpu);
        }
        if self.images.len() != known {
            self.texture_sets.clear();
        }
    }

    fn gpu_image(&self, slot: ImageSlot) -> Option<&GpuImage> {
        self.images.iter().find(|i| i.slot == slot)
    }

    fn color_view(&self, kind: Option<TextureKind>) -> &wgpu::TextureView {
        match kind {
            Some(TextureKind::Indicator) => &self.indicator.view,
            Some(TextureKind::Image(slot)) => self.gpu_image(slot).map_or(&self.white.view, |i| &i.color.view),
            None => &self.white.view,
        }
    }

    fn normal_view(&self, kind: Option<TextureKind>) -> &wgpu::TextureView {
        match kind {
            Some(TextureKind::Image(slot)) => self
                .gpu_image(slot)
                .and_then(|i| i.normal.as_ref())
                .map_or(&self.flat_normal.view, |n| &n.view),
            Some(TextureKind::Indicator) | None => &self.flat_normal.view,
        }
    }

    fn ensure_texture_set(&mut self, key: TextureSetKey) {
        if self.texture_sets.contains_key(&key) {
            return;
        }
        let sampler = if key.repeat {
            &self.repeat_sampler
        } else {
            &self.clamp_sampler
        };
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texture_set_bg"),
            layout: &self.texture_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(self.color_view(key.color)),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(self.normal_view(key.normal)),
                },
            ],
        });
        self.texture_sets.insert(key, bind_group);
    }

    fn ensure_object_capacity(&mut self, count: usize) {
        if count <= self.object_capacity {
            return;
        }
        let capacity = count.next_power_of_two();
        let (buffer, bind_group) =
            create_object_slots(&self.device, &self.object_bgl, self.object_stride, capacity);
        self.object_buffer = buffer;
        self.object_bind_group = bind_group;
        self.object_capacity = capacity;
    }

    pub fn render(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        self.sync_meshes(scene);
        self.sync_images(scene);

        let frame_uniforms = pack_frame(scene);
        self.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&frame_uniforms));

        let entities = scene.entities();
        let mut draws = Vec::with_capacity(entities.len());
        self.object_staging.clear();
        for index in draw_order(scene) {
            let entity = &entities[index];
            let Some(uniforms) = pack_object(scene, entity) else {
                continue;
            };
            let Some(material) = scene.material(entity.material) else {
                continue;
            };
            let slot = draws.len();
            self.object_staging
                .resize(slot * self.object_stride as usize, 0);
            self.object_staging
                .extend_from_slice(bytemuck::bytes_of(&uniforms));
            let textures = TextureSetKey {
                color: material.texture,
                normal: material.normal_map,
                repeat: material.uv_repeat != Vec2::ONE,
            };
            self.ensure_texture_set(textures);
            draws.push((entity.mesh.0, material.shading, textures, slot));
        }
        self.ensure_object_capacity(draws.len());
        if !self.object_staging.is_empty() {
            self.queue
                .write_buffer(&self.object_buffer, 0, &self.object_staging);
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if let Some(background) = &self.background_bind_group {
                rpass.set_pipeline(&self.background_pipeline);
                rpass.set_bind_group(0, background, &[]);
                rpass.draw(0..3, 0..1);
            }
            rpass.set_bind_group(0, &self.frame_bind_group, &[]);
            for (mesh, shading, textures, slot) in draws {
                let Some(gpu_mesh) = self.meshes.get(mesh) else {
                    continue;
                };
                let pipeline = match shading {
                    Shading::Standard => &self.lit_pipeline,
                    Shading::Additive => &self.additive_pipeline,
                    Shading::Line => &self.line_pipeline,
                };
                let Some(textures) = self.texture_sets.get(&textures) else {
                    continue;
                };
                let offset = (slot as u64 * self.object_stride) as u32;
                rpass.set_pipeline(pipeline);
                rpass.set_bind_group(1, &self.object_bind_group, &[offset]);
                rpass.set_bind_group(2, textures, &[]);
                rpass.set_vertex_buffer(0, gpu_mesh.vertex_buffer.slice(..));
                rpass.set_index_buffer(gpu_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..gpu_mesh.index_count, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_object_slots(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    stride: u64,
    capacity: usize,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("object_uniforms"),
        size: stride * capacity as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("object_bg"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniforms>() as u64),
            }),
        }],
    });
    (buffer, bind_group)
}
