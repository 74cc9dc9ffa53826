use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Rect;
use crate::render::quad::{
    logical_clip_to_scissor, premul_alpha_blend, viewport_ubo_min_binding_size, QuadVertex,
    ViewportUniform, QUAD_INDICES, QUAD_VERTICES,
};
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawList, LineCap, SegmentCmd};

/// Draws the segments of one [`DrawList`].
///
/// Every segment becomes an instanced quad shaded as a capsule distance
/// field, so edges stay smooth at any scale factor. Instances are uploaded
/// again only when the list's revision moves, which is why a renderer must
/// stay paired with a single list.
#[derive(Default)]
pub struct SegmentRenderer {
    pipeline: Option<InkPipeline>,
    instances: Option<wgpu::Buffer>,
    capacity: usize,
    count: u32,
    revision: Option<u64>,
}

/// Everything that depends only on the device and the target format.
struct InkPipeline {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,
    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,
}

impl SegmentRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws `list` with its local origin at `bounds.origin`, clipped to `bounds`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        list: &DrawList,
        bounds: Rect,
    ) {
        if self.pipeline.as_ref().map(|p| p.format) != Some(ctx.format) {
            self.pipeline = Some(InkPipeline::build(ctx));
        }
        if self.revision != Some(list.revision()) {
            self.upload(ctx, list);
        }
        if self.count == 0 {
            return;
        }
        let Some((sx, sy, sw, sh)) = logical_clip_to_scissor(bounds, ctx.viewport, ctx.scale) else {
            return;
        };
        let (Some(gpu), Some(instances)) = (self.pipeline.as_ref(), self.instances.as_ref()) else {
            return;
        };

        ctx.queue.write_buffer(
            &gpu.viewport_ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform {
                viewport: [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)],
                origin: [bounds.origin.x, bounds.origin.y],
            }),
        );

        let mut pass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("autograph ink pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        pass.set_pipeline(&gpu.pipeline);
        pass.set_bind_group(0, &gpu.bind_group, &[]);
        pass.set_vertex_buffer(0, gpu.quad_vbo.slice(..));
        pass.set_vertex_buffer(1, instances.slice(..));
        pass.set_index_buffer(gpu.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        pass.set_scissor_rect(sx, sy, sw, sh);
        pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..self.count);
    }

    fn upload(&mut self, ctx: &RenderCtx<'_>, list: &DrawList) {
        let data: Vec<SegmentInstance> = list.items().iter().filter_map(SegmentInstance::from_cmd).collect();
        self.count = data.len() as u32;
        self.revision = Some(list.revision());
        if data.is_empty() {
            return;
        }

        if self.instances.is_none() || data.len() > self.capacity {
            self.capacity = data.len().next_power_of_two().max(256);
            self.instances = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("autograph ink instances"),
                size: (self.capacity * std::mem::size_of::<SegmentInstance>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            log::trace!("ink instance buffer grown to {} segments", self.capacity);
        }
        if let Some(buf) = self.instances.as_ref() {
            ctx.queue.write_buffer(buf, 0, bytemuck::cast_slice(&data));
        }
    }
}

impl InkPipeline {
    fn build(ctx: &RenderCtx<'_>) -> Self {
        let device = ctx.device;
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("autograph ink shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/ink.wgsl").into()),
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("autograph ink bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: viewport_ubo_min_binding_size(),
                },
                count: None,
            }],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("autograph ink pipeline"),
            layout: Some(&device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("autograph ink pipeline layout"),
                bind_group_layouts: &[&layout],
                immediate_size: 0,
            })),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), SegmentInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let viewport_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("autograph ink viewport"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("autograph ink bind group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        let quad_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("autograph ink quad"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("autograph ink quad indices"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!("ink pipeline built for {:?}", ctx.format);
        Self {
            format: ctx.format,
            pipeline,
            bind_group,
            viewport_ubo,
            quad_vbo,
            quad_ibo,
        }
    }
}

/// Per-segment vertex data, 40 bytes:
///
/// ```text
/// p0      [f32; 2]  @location(1)
/// p1      [f32; 2]  @location(2)
/// params  [f32; 2]  @location(3)  x: half width, y: 1.0 for butt caps
/// color   [f32; 4]  @location(4)  premultiplied
/// ```
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct SegmentInstance {
    p0: [f32; 2],
    p1: [f32; 2],
    params: [f32; 2],
    color: [f32; 4],
}

impl SegmentInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] =
        wgpu::vertex_attr_array![1 => Float32x2, 2 => Float32x2, 3 => Float32x2, 4 => Float32x4];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SegmentInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// `None` when the segment would not leave visible ink.
    fn from_cmd(cmd: &SegmentCmd) -> Option<Self> {
        let style = &cmd.style;
        let drawable = style.width.is_finite()
            && style.width > 0.0
            && cmd.from.is_finite()
            && cmd.to.is_finite()
            && style.color.is_finite();
        drawable.then(|| Self {
            p0: [cmd.from.x, cmd.from.y],
            p1: [cmd.to.x, cmd.to.y],
            params: [
                style.width * 0.5,
                if style.cap == LineCap::Butt { 1.0 } else { 0.0 },
            ],
            color: style.color.to_array(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::InkStyle;

    use super::*;

    fn cmd(width: f32) -> SegmentCmd {
        SegmentCmd {
            from: Vec2::new(1.0, 2.0),
            to: Vec2::new(3.0, 4.0),
            style: InkStyle::new(Color::black(), width),
        }
    }

    #[test]
    fn instance_is_40_bytes() {
        assert_eq!(std::mem::size_of::<SegmentInstance>(), 40);
    }

    #[test]
    fn instance_carries_half_width() {
        let inst = SegmentInstance::from_cmd(&cmd(3.0)).unwrap();
        assert_eq!(inst.params, [1.5, 0.0]);
        assert_eq!(inst.p0, [1.0, 2.0]);
        assert_eq!(inst.p1, [3.0, 4.0]);
        assert_eq!(inst.color, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn butt_cap_sets_flag() {
        let mut c = cmd(2.0);
        c.style.cap = LineCap::Butt;
        assert_eq!(SegmentInstance::from_cmd(&c).unwrap().params[1], 1.0);
    }

    #[test]
    fn degenerate_width_is_skipped() {
        assert!(SegmentInstance::from_cmd(&cmd(0.0)).is_none());
        assert!(SegmentInstance::from_cmd(&cmd(f32::NAN)).is_none());
    }

    #[test]
    fn non_finite_position_is_skipped() {
        let mut c = cmd(2.0);
        c.to.x = f32::INFINITY;
        assert!(SegmentInstance::from_cmd(&c).is_none());
    }
}
