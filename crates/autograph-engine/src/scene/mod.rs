//! Retained ink geometry.
//!
//! A [`DrawList`] behaves like a canvas: segments accumulate in paint order
//! until the list is cleared, and renderers re-upload only when its revision
//! changes.

mod ink;
mod list;

pub use ink::{InkStyle, LineCap, SegmentCmd};
pub use list::DrawList;
