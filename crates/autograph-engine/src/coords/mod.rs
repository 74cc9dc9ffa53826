//! Logical-pixel geometry: origin top-left, +Y down.
//!
//! Backing stores are sized in physical pixels, `logical * scale_factor`.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::{SurfaceSize, Viewport};
