#![doc = include_str!("../README.md")]

pub mod config;
pub mod engine;
pub mod error;
pub mod raster;

// Main entry points: the pipeline and its configuration.
pub use crate::engine::{process, process_with_report, EngineParams, Kernel3x3, WorkerTopology};
pub use crate::error::{CodecError, EngineError};
pub use crate::raster::{RasterBuffer, RasterView};
