//! GPU device and swapchain.
//!
//! [`Gpu`] owns the wgpu device/queue and the window surface. Each frame the
//! runtime acquires a [`GpuFrame`], renderers record into its encoder, and
//! the frame is submitted and presented.

mod gpu;
mod surface;

pub use gpu::Gpu;

/// Options for bringing up the GPU.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB swapchain format when one is offered.
    ///
    /// Off by default: ink colors are CSS values (already sRGB-encoded) and
    /// must reach the display unchanged.
    pub prefer_srgb: bool,

    /// FIFO paces presentation to the display, which replay timing follows.
    pub present_mode: wgpu::PresentMode,

    /// Requested alpha mode; ignored when the surface does not support it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Frames the compositor may queue ahead (a hint).
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}

/// What the caller should do after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The swapchain was rebuilt; the next frame should succeed.
    Reconfigured,
    /// Drop this frame and try again next time.
    SkipFrame,
    /// Out of memory; shut down.
    Fatal,
}

/// One acquired swapchain image plus the encoder recording into it.
///
/// Submit promptly: the next image cannot be acquired while this one is held.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
