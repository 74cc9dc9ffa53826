//! wgpu rendering of `scene` draw lists.
//!
//! Geometry is uploaded in logical pixels (top-left origin, +Y down); the
//! vertex shader maps it to clip space through a viewport uniform.

mod ctx;
mod ink;
mod quad;

pub use ctx::{RenderCtx, RenderTarget};
pub use ink::SegmentRenderer;
