use crate::atlas::AtlasImage;
use crate::constants::CLEAR_COLOR;
use flapboard_core::FlapInstance;
use web_sys as web;

mod flaps;
mod helpers;

use flaps::{create_flap_resources, FlapResources, FlapUniforms};

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    flaps: FlapResources,
    sampler: wgpu::Sampler,
    // Atlas texture is kept alive alongside the bind group that samples it
    _atlas: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        atlas: &AtlasImage,
        atlas_side: u32,
        cell_count: usize,
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
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
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let flaps = create_flap_resources(&device, format, cell_count);
        let sampler = helpers::create_linear_sampler(&device);
        let (atlas_tex, atlas_view) =
            helpers::create_rgba_texture(&device, &queue, "glyph_atlas", atlas.size, &atlas.rgba);
        let bind_group = flaps.bind_atlas(&device, &atlas_view, &sampler);
        write_uniforms(&queue, &flaps, atlas_side);

        let [r, g, b] = CLEAR_COLOR;
        Ok(Self {
            surface,
            device,
            queue,
            config,
            flaps,
            sampler,
            _atlas: atlas_tex,
            bind_group,
            width,
            height,
            clear_color: wgpu::Color { r, g, b, a: 1.0 },
        })
    }

    /// Swap in a freshly rasterised atlas after the glyph set changed.
    pub fn set_atlas(&mut self, atlas: &AtlasImage, atlas_side: u32) {
        let (tex, view) = helpers::create_rgba_texture(
            &self.device,
            &self.queue,
            "glyph_atlas",
            atlas.size,
            &atlas.rgba,
        );
        self.bind_group = self.flaps.bind_atlas(&self.device, &view, &self.sampler);
        self._atlas = tex;
        write_uniforms(&self.queue, &self.flaps, atlas_side);
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
        }
    }

    pub fn render(&mut self, instances: &[FlapInstance]) -> Result<(), wgpu::SurfaceError> {
        self.flaps
            .write_instances(&self.device, &self.queue, instances);
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
                label: Some("flap_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if !instances.is_empty() {
                rpass.set_pipeline(&self.flaps.pipeline);
                rpass.set_bind_group(0, &self.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.flaps.vertex_buffer.slice(..));
                rpass.set_vertex_buffer(1, self.flaps.instance_buffer.slice(..));
                rpass.draw(
                    0..flapboard_core::FLAP_VERTICES.len() as u32,
                    0..instances.len() as u32,
                );
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn write_uniforms(queue: &wgpu::Queue, flaps: &FlapResources, atlas_side: u32) {
    let u = FlapUniforms {
        atlas_side: atlas_side.max(1) as f32,
        _pad: [0.0; 3],
    };
    queue.write_buffer(&flaps.uniform_buffer, 0, bytemuck::bytes_of(&u));
}
