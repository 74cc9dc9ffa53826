//! Unit-quad geometry, the viewport uniform, blend state and scissor math.

use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Viewport};

// ── blend ─────────────────────────────────────────────────────────────────

pub(crate) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

// ── viewport uniform ──────────────────────────────────────────────────────

/// Window size plus the offset of the surface being drawn, both in logical px.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub origin: [f32; 2],
}

/// Minimum binding size for the viewport uniform buffer.
pub(crate) fn viewport_ubo_min_binding_size() -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(std::mem::size_of::<ViewportUniform>() as u64)
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(crate) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(crate) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

// ── scissor rect ──────────────────────────────────────────────────────────

/// Converts a logical-pixel clip rect to physical scissor arguments `(x, y, w, h)`.
///
/// The result is clamped to the viewport. `None` means nothing is visible and
/// the draw call should be skipped.
pub(crate) fn logical_clip_to_scissor(
    clip: Rect,
    viewport: Viewport,
    scale: f32,
) -> Option<(u32, u32, u32, u32)> {
    let phys_vw = (viewport.width * scale).max(1.0) as u32;
    let phys_vh = (viewport.height * scale).max(1.0) as u32;

    let max = clip.max();
    let x = ((clip.origin.x * scale).max(0.0) as u32).min(phys_vw);
    let y = ((clip.origin.y * scale).max(0.0) as u32).min(phys_vh);
    let x2 = ((max.x * scale).max(0.0).ceil() as u32).min(phys_vw);
    let y2 = ((max.y * scale).max(0.0).ceil() as u32).min(phys_vh);
    let (w, h) = (x2.saturating_sub(x), y2.saturating_sub(y));

    if w == 0 || h == 0 { None } else { Some((x, y, w, h)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport::new(400.0, 300.0);

    #[test]
    fn scissor_scales_to_physical() {
        let s = logical_clip_to_scissor(Rect::new(10.0, 20.0, 100.0, 50.0), VP, 2.0);
        assert_eq!(s, Some((20, 40, 200, 100)));
    }

    #[test]
    fn scissor_clamps_to_viewport() {
        let s = logical_clip_to_scissor(Rect::new(350.0, -10.0, 100.0, 50.0), VP, 1.0);
        assert_eq!(s, Some((350, 0, 50, 40)));
    }

    #[test]
    fn scissor_outside_viewport_is_none() {
        assert_eq!(logical_clip_to_scissor(Rect::new(500.0, 0.0, 10.0, 10.0), VP, 1.0), None);
        assert_eq!(logical_clip_to_scissor(Rect::new(0.0, 0.0, 0.0, 10.0), VP, 1.0), None);
    }

    #[test]
    fn viewport_uniform_is_16_bytes() {
        assert_eq!(std::mem::size_of::<ViewportUniform>(), 16);
        assert!(viewport_ubo_min_binding_size().is_some());
    }
}
