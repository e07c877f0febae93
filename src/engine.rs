//! Partitioned 3×3 convolution engine.
//!
//! Overview
//! - [`partition`] splits the image rows into one static range per worker;
//!   the last range absorbs the remainder.
//! - [`halo`] computes, per range, the one extra row above and below needed
//!   to convolve the range's boundary rows correctly. Every worker receives
//!   exactly these rows, whether it reads them out of shared memory or has
//!   them shipped inside its assignment — the convolution code cannot tell
//!   the two apart, which is what makes the output independent of the worker
//!   layout.
//! - [`kernel`] holds the 3×3 weight matrix and the per-range convolution
//!   with clamp activation.
//! - [`worker`] assembles a worker's local pixel window and drives one
//!   worker's receive → convolve → emit lifecycle.
//! - [`merge`] reassembles worker results, in any arrival order, into one
//!   contiguous output buffer and rejects any deviation from the partition.
//! - [`pipeline`] wires it all together behind [`process`]: fan-out
//!   assignment, fan-in completion, single barrier, no locks.

pub mod halo;
pub mod kernel;
pub mod merge;
pub mod partition;
pub mod pipeline;
pub mod worker;

pub use self::halo::{halo_for, HaloSpec};
pub use self::kernel::{convolve, Kernel3x3};
pub use self::merge::merge;
pub use self::partition::{partition_rows, RowRange};
pub use self::pipeline::{
    process, process_with_report, EngineParams, ProcessReport, WorkerTopology,
};
pub use self::worker::{LocalView, OwnedAssignment, WorkerResult};
