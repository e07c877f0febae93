use super::halo::{halo_for, HaloSpec};
use super::kernel::{convolve, Kernel3x3};
use super::partition::RowRange;
use crate::raster::RasterView;
use log::debug;

/// One worker's produced rows: the convolved pixels for exactly its assigned
/// range, halo excluded.
#[derive(Clone, Debug)]
pub struct WorkerResult {
    pub range: RowRange,
    pub pixels: Vec<u8>,
}

/// Read-only pixel window a worker convolves: its assigned range plus the
/// halo rows, backed either by the shared input image or by owned bytes
/// shipped in the assignment.
///
/// `data` holds exactly `window().len()` stride-padded rows; row indexing
/// stays in global image coordinates so the convolution code is identical
/// for both backings.
#[derive(Clone, Debug)]
pub struct LocalView<'a> {
    pub width: usize,
    pub stride: usize,
    pub halo: HaloSpec,
    pub data: &'a [u8],
}

impl<'a> LocalView<'a> {
    #[inline]
    pub fn range(&self) -> RowRange {
        self.halo.range
    }

    #[inline]
    pub fn window(&self) -> RowRange {
        self.halo.window()
    }

    /// Row `y` in global image coordinates; `y` must lie inside `window()`.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let local = y - self.window().start;
        &self.data[local * self.stride..(local + 1) * self.stride]
    }
}

/// Owned assignment for a worker in its own address space: image geometry
/// plus the window bytes the coordinator extracted for it.
#[derive(Clone, Debug)]
pub struct OwnedAssignment {
    pub worker: usize,
    pub width: usize,
    pub stride: usize,
    pub halo: HaloSpec,
    pub rows: Vec<u8>,
}

/// Copy the window (assigned rows plus halo) out of the shared image.
///
/// This is the one extra transfer an isolated worker needs beyond its own
/// rows; omitting the halo rows here is exactly what produced seams at
/// segment boundaries in naive row-scatter designs.
pub fn extract_window(image: &RasterView<'_>, halo: &HaloSpec) -> Vec<u8> {
    let window = halo.window();
    image.data[window.start * image.stride..window.end * image.stride].to_vec()
}

/// Build the owned assignment for one isolated worker.
pub fn make_assignment(image: &RasterView<'_>, worker: usize, range: RowRange) -> OwnedAssignment {
    let halo = halo_for(range, image.height);
    OwnedAssignment {
        worker,
        width: image.width,
        stride: image.stride,
        halo,
        rows: extract_window(image, &halo),
    }
}

/// Worker body for the shared-memory topology: halo rows are direct reads
/// from the input image.
pub fn run_colocated(
    image: &RasterView<'_>,
    worker: usize,
    range: RowRange,
    kernel: &Kernel3x3,
) -> WorkerResult {
    let halo = halo_for(range, image.height);
    debug!(
        "worker {worker}: convolving {range} (halo {}+{})",
        halo.rows_above, halo.rows_below
    );
    let window = halo.window();
    let view = LocalView {
        width: image.width,
        stride: image.stride,
        halo,
        data: &image.data[window.start * image.stride..window.end * image.stride],
    };
    WorkerResult {
        range,
        pixels: convolve(&view, kernel),
    }
}

/// Worker body for the isolated topology: everything the worker reads
/// arrived inside the assignment.
pub fn run_isolated(assignment: &OwnedAssignment, kernel: &Kernel3x3) -> WorkerResult {
    let halo = assignment.halo;
    debug!(
        "worker {}: convolving {} (halo {}+{})",
        assignment.worker, halo.range, halo.rows_above, halo.rows_below
    );
    let view = LocalView {
        width: assignment.width,
        stride: assignment.stride,
        halo,
        data: &assignment.rows,
    };
    WorkerResult {
        range: halo.range,
        pixels: convolve(&view, kernel),
    }
}
