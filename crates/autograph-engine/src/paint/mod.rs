//! Paint model shared between the pad engines and renderers.
//!
//! Colors are premultiplied sRGB-encoded RGBA on the GPU side. Stroke records carry
//! colors as CSS strings; [`Color::from_css`] is the single place those are
//! interpreted.

pub mod color;

pub use color::Color;
