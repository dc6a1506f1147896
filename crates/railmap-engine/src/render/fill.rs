use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Vec2, Viewport};
use crate::paint::Paint;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

/// Solid-fill renderer for every [`DrawCmd`].
///
/// Rects and convex polygons are both flattened on the CPU into one triangle list
/// (polygons as a fan around their first vertex). Vertices are logical pixels with a
/// linear premultiplied color each, so a frame is one upload and one draw per clip
/// rect.
#[derive(Default)]
pub struct FillRenderer {
    format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,

    // Reused across frames.
    vertices: Vec<FillVertex>,
    batches: Vec<Batch>,
}

/// Consecutive vertices sharing one clip rect.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Batch {
    range: (u32, u32),
    clip: Option<Rect>,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct FillVertex {
    pos: [f32; 2],
    color: [f32; 4],
}

impl FillVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<FillVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Logical viewport size, padded to 16 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    size: [f32; 2],
    _pad: [f32; 2],
}

const VIEWPORT_UBO_SIZE: NonZeroU64 = match NonZeroU64::new(std::mem::size_of::<ViewportUniform>() as u64) {
    Some(size) => size,
    None => panic!("ViewportUniform must not be zero-sized"),
};

impl FillRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws `draw_list` into `target` on top of what is already there.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &mut DrawList) {
        tessellate(draw_list, &mut self.vertices, &mut self.batches);
        if self.vertices.is_empty() {
            return;
        }

        self.prepare(ctx);
        let (Some(pipeline), Some(bind_group), Some(ubo), Some(vbo)) =
            (&self.pipeline, &self.bind_group, &self.viewport_ubo, &self.vbo)
        else {
            return;
        };

        let uniform = ViewportUniform {
            size: [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)],
            _pad: [0.0; 2],
        };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&uniform));
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&self.vertices));

        let mut pass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("railmap fill pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, bind_group, &[]);
        pass.set_vertex_buffer(0, vbo.slice(..));

        for batch in &self.batches {
            if let Some((x, y, w, h)) = scissor(batch.clip, ctx.viewport, ctx.scale_factor) {
                pass.set_scissor_rect(x, y, w, h);
                pass.draw(batch.range.0..batch.range.1, 0..1);
            }
        }
    }

    /// Builds the pipeline for the current surface format and grows the vertex buffer
    /// to fit this frame.
    fn prepare(&mut self, ctx: &RenderCtx<'_>) {
        if self.format != Some(ctx.surface_format) || self.pipeline.is_none() {
            self.build_pipeline(ctx);
        }

        let needed = self.vertices.len();
        if self.vbo.is_none() || needed > self.vbo_capacity {
            let capacity = needed.next_power_of_two().max(256);
            log::trace!("fill vertex buffer grows to {capacity} vertices");
            self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("railmap fill vbo"),
                size: (capacity * std::mem::size_of::<FillVertex>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.vbo_capacity = capacity;
        }
    }

    fn build_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let device = ctx.device;
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("railmap fill shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/fill.wgsl").into()),
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("railmap fill bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(VIEWPORT_UBO_SIZE),
                },
                count: None,
            }],
        });

        let ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("railmap viewport ubo"),
            size: VIEWPORT_UBO_SIZE.get(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("railmap fill bind group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry { binding: 0, resource: ubo.as_entire_binding() }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("railmap fill pipeline layout"),
            bind_group_layouts: &[&layout],
            immediate_size: 0,
        });

        // Premultiplied "over".
        let over = wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("railmap fill pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[FillVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState { color: over, alpha: over }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            // Car winding flips with heading.
            primitive: wgpu::PrimitiveState { cull_mode: None, ..Default::default() },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("fill pipeline built for {:?}", ctx.surface_format);
        self.format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group = Some(bind_group);
        self.viewport_ubo = Some(ubo);
    }
}

/// Flattens `draw_list` into triangles in paint order, grouping runs that share a
/// clip rect.
fn tessellate(draw_list: &mut DrawList, vertices: &mut Vec<FillVertex>, batches: &mut Vec<Batch>) {
    vertices.clear();
    batches.clear();

    for item in draw_list.iter_in_paint_order() {
        let start = vertices.len() as u32;
        match &item.cmd {
            DrawCmd::Rect(cmd) => {
                if let Some(color) = solid(cmd.paint) {
                    let r = cmd.rect.normalized();
                    let (min, max) = (r.min(), r.max());
                    let corners = [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)];
                    fan(&corners, color, vertices);
                }
            }
            DrawCmd::Polygon(cmd) => {
                if let Some(color) = solid(cmd.paint) {
                    fan(&cmd.points, color, vertices);
                }
            }
        }

        let end = vertices.len() as u32;
        if end == start {
            continue;
        }
        match batches.last_mut() {
            Some(b) if b.clip == item.clip_rect && b.range.1 == start => b.range.1 = end,
            _ => batches.push(Batch { range: (start, end), clip: item.clip_rect }),
        }
    }
}

fn solid(paint: Paint) -> Option<[f32; 4]> {
    paint.resolve(1.0).map(|c| [c.r, c.g, c.b, c.a])
}

/// Appends a triangle fan over `points`. Fewer than three points, or any non-finite
/// one, produce nothing.
fn fan(points: &[Vec2], color: [f32; 4], out: &mut Vec<FillVertex>) {
    if points.len() < 3 || points.iter().any(|p| !p.is_finite()) {
        return;
    }
    let v = |p: Vec2| FillVertex { pos: [p.x, p.y], color };
    let pivot = points[0];
    for edge in points[1..].windows(2) {
        out.extend([v(pivot), v(edge[0]), v(edge[1])]);
    }
}

/// Physical scissor `(x, y, w, h)` for a logical clip rect, clamped to the viewport.
/// `None` clip covers the whole viewport; an empty result means skip the draw.
fn scissor(clip: Option<Rect>, viewport: Viewport, scale: f32) -> Option<(u32, u32, u32, u32)> {
    let vw = (viewport.width * scale).max(1.0) as u32;
    let vh = (viewport.height * scale).max(1.0) as u32;

    let Some(r) = clip else { return Some((0, 0, vw, vh)) };
    let px = |v: f32, limit: u32| ((v * scale).max(0.0) as u32).min(limit);
    let (min, max) = (r.min(), r.max());
    let (x0, y0) = (px(min.x, vw), px(min.y, vh));
    let (x1, y1) = (px(max.x, vw), px(max.y, vh));

    let (w, h) = (x1.saturating_sub(x0), y1.saturating_sub(y0));
    (w > 0 && h > 0).then_some((x0, y0, w, h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use crate::scene::ZIndex;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    fn pts(coords: &[(f32, f32)]) -> Vec<Vec2> {
        coords.iter().map(|&(x, y)| Vec2::new(x, y)).collect()
    }

    // ── fan ───────────────────────────────────────────────────────────────

    #[test]
    fn quad_becomes_two_triangles() {
        let mut out = Vec::new();
        fan(&pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]), RED, &mut out);
        assert_eq!(out.len(), 6);
        assert_eq!(out[0].pos, [0.0, 0.0]);
        assert_eq!(out[3].pos, [0.0, 0.0]);
        assert_eq!(out[5].pos, [0.0, 1.0]);
    }

    #[test]
    fn arrow_pentagon_becomes_three_triangles() {
        let mut out = Vec::new();
        let outline = pts(&[(0.0, 0.0), (2.0, 1.0), (0.0, 2.0), (-4.0, 2.0), (-4.0, 0.0)]);
        fan(&outline, RED, &mut out);
        assert_eq!(out.len(), 9);
        assert!(out.iter().all(|v| v.color == RED));
    }

    #[test]
    fn degenerate_outline_is_skipped() {
        let mut out = Vec::new();
        fan(&pts(&[(0.0, 0.0), (1.0, 1.0)]), RED, &mut out);
        fan(&pts(&[(0.0, 0.0), (f32::NAN, 1.0), (1.0, 0.0)]), RED, &mut out);
        assert!(out.is_empty());
    }

    // ── tessellate ────────────────────────────────────────────────────────

    #[test]
    fn rects_and_polygons_share_one_batch_per_clip() {
        let white = Color::from_premul(1.0, 1.0, 1.0, 1.0);
        let mut dl = DrawList::new();
        dl.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        dl.push_solid_rect(ZIndex::OVERLAY, Rect::new(0.0, 0.0, 10.0, 10.0), white);
        dl.push_solid_polygon(ZIndex::OVERLAY, pts(&[(0.0, 0.0), (5.0, 0.0), (0.0, 5.0)]), white);
        dl.pop_clip();
        dl.push_solid_rect(ZIndex::DEBUG, Rect::new(0.0, 0.0, 1.0, 1.0), white);

        let (mut vertices, mut batches) = (Vec::new(), Vec::new());
        tessellate(&mut dl, &mut vertices, &mut batches);

        assert_eq!(vertices.len(), 15);
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].range, (0, 9));
        assert_eq!(batches[1], Batch { range: (9, 15), clip: None });
    }

    #[test]
    fn unpainted_commands_emit_nothing() {
        let mut dl = DrawList::new();
        dl.push_rect(ZIndex::OVERLAY, Rect::new(0.0, 0.0, 10.0, 10.0), Paint::None);
        dl.push_polygon(ZIndex::OVERLAY, pts(&[(0.0, 0.0), (5.0, 0.0), (0.0, 5.0)]), Paint::None);

        let (mut vertices, mut batches) = (Vec::new(), Vec::new());
        tessellate(&mut dl, &mut vertices, &mut batches);
        assert!(vertices.is_empty() && batches.is_empty());
    }

    // ── scissor ───────────────────────────────────────────────────────────

    fn vp() -> Viewport {
        Viewport::new(100.0, 50.0)
    }

    #[test]
    fn no_clip_covers_physical_viewport() {
        assert_eq!(scissor(None, vp(), 2.0), Some((0, 0, 200, 100)));
    }

    #[test]
    fn clip_is_clamped_to_viewport() {
        let clip = Rect::new(80.0, -10.0, 50.0, 30.0);
        assert_eq!(scissor(Some(clip), vp(), 1.0), Some((80, 0, 20, 20)));
    }

    #[test]
    fn zero_area_clip_skips_draw() {
        let clip = Rect::new(10.0, 10.0, 0.0, 5.0);
        assert_eq!(scissor(Some(clip), vp(), 1.0), None);
    }
}
