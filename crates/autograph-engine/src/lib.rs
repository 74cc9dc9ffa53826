//! Platform and GPU plumbing for the autograph signature pad.
//!
//! Geometry lives in [`coords`], retained ink in [`scene`], and [`render`]
//! turns it into wgpu draws. [`window::Runtime`] drives a single winit
//! window and calls into a [`core::App`] once per frame with translated
//! [`input`].

pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod time;
pub mod window;
