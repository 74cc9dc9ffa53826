//! Signature pad: capture live pointer input into a [`StrokeRecord`] and
//! replay a record statically or as a time-bounded animation.
//!
//! | module        | contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`surface`]   | `InkSurface` drawing seam and the `InkCanvas` impl    |
//! | [`pointer`]   | `PointerSource` with mouse and touch variants         |
//! | [`capture`]   | `CaptureEngine` state machine                         |
//! | [`timeline`]  | time-ordered flattening of a record for playback      |
//! | [`scheduler`] | display-frame requests (`FrameScheduler`, `FrameQueue`)|
//! | [`replay`]    | `ReplayEngine` static and animated rendering          |
//! | [`config`]    | ink, replay and pad settings                          |
//! | [`app`]       | `PadApplication`, the desktop host                    |
//!
//! The engines are independent of the window runtime: anything that
//! implements [`InkSurface`] can be drawn on, and anything that implements
//! [`FrameScheduler`] can pace playback.

pub mod app;
pub mod capture;
pub mod config;
pub mod pointer;
pub mod replay;
pub mod scheduler;
pub mod surface;
pub mod timeline;

pub use app::PadApplication;
pub use capture::{CaptureEngine, CaptureState};
pub use config::{InkConfig, PadConfig, ReplayConfig};
pub use pointer::{Contact, MouseActivity, PointerPhase, PointerSample, PointerSource, TouchActivity};
pub use replay::ReplayEngine;
pub use scheduler::{FrameQueue, FrameRequest, FrameScheduler};
pub use surface::{InkCanvas, InkSurface};
pub use timeline::{ReplayTimeline, TimelineEntry};

pub use autograph_record::{Point, Stroke, StrokeRecord};
