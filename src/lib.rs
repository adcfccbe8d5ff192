//! # Cycle Video
//!
//! Turn a video clip into a boomerang: the clip plays forward, then immediately
//! in reverse, as one continuous video-only stream.
//!
//! The decode/reverse/concatenate/encode work is delegated to an external
//! media engine (`ffmpeg` by default). This crate owns the transformation
//! contract around it: input validation, deterministic output naming, the
//! composition request, and the success/failure report.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use cycle_video::{CycleVideoBuilder, FfmpegEngine};
//!
//! # fn main() -> cycle_video::Result<()> {
//! let builder = CycleVideoBuilder::new(FfmpegEngine::default(), "renders");
//! let summary = builder.run(Some(Path::new("clip.mp4")), &mut std::io::stdout())?;
//! assert!(summary.output().ends_with("cycle_clip.mp4"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom Engines
//!
//! Anything implementing [`Engine`](engine::Engine) can stand in for ffmpeg:
//!
//! ```rust
//! use cycle_video::engine::{CompositionRequest, Engine, EngineOutcome};
//!
//! struct AlwaysOk;
//!
//! impl Engine for AlwaysOk {
//!     fn name(&self) -> &str {
//!         "always-ok"
//!     }
//!
//!     fn compose(&self, request: &CompositionRequest) -> EngineOutcome {
//!         EngineOutcome::Success(request.output.clone())
//!     }
//!
//!     fn describe(&self, request: &CompositionRequest) -> String {
//!         format!("always-ok {}", request.input.display())
//!     }
//! }
//! ```
//!
//! ## Known Hazards
//!
//! Outputs are not locked: two concurrent runs on the same input write the
//! same output path. An engine that hangs hangs the caller; there is no timeout.

pub mod builder;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod naming;

// Re-export commonly used types for convenience
pub use crate::{
    builder::{CycleVideoBuilder, RunSummary},
    config::Config,
    engine::{Engine, EngineOutcome, FfmpegEngine},
    error::{CycleError, Result},
    naming::{InputSpec, OutputSpec},
};
