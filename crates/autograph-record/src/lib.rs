//! Stroke record model for captured signatures.
//!
//! A signature is kept as structured, replayable strokes rather than pixels.
//! This crate owns that data contract and nothing else, so storage and
//! transport code can depend on it without any engine or GPU code.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`model`] | `Point`, `Stroke`, `StrokeRecord`, invariant checks |
//! | [`wire`] | JSON encoding (the interoperability contract) |
//! | [`store`] | `RecordSink` / `RecordSource` collaborators, `MemoryStore`, `DirStore` |
//! | [`error`] | `RecordError` |
//!
//! # Quick start
//!
//! ```rust
//! use autograph_record::{Point, Stroke, StrokeRecord};
//!
//! let mut record = StrokeRecord::new();
//! record.push(
//!     Stroke::new("s1", "#1a1a2e", 2.5)
//!         .with_points([Point::new(4.0, 8.0, 0.0), Point::new(20.0, 9.0, 16.0)]),
//! );
//!
//! let json = record.to_json().unwrap();
//! assert_eq!(StrokeRecord::from_json(&json).unwrap(), record);
//! ```

pub mod error;
pub mod model;
pub mod store;
pub mod wire;

pub use error::RecordError;
pub use model::{Point, Stroke, StrokeRecord};
pub use store::{DirStore, MemoryStore, RecordSink, RecordSource};
