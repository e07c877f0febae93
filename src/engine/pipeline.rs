use super::kernel::Kernel3x3;
use super::merge::merge;
use super::partition::{partition_rows, RowRange};
use super::worker::{make_assignment, run_colocated, run_isolated, WorkerResult};
use crate::error::EngineError;
use crate::raster::{row_stride, RasterBuffer, RasterView};
use log::debug;
use serde::Serialize;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

/// How the worker pool is realized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerTopology {
    /// Scoped threads sharing the read-only input image; halo rows are free
    /// direct reads.
    Colocated,
    /// Workers own their pixel windows; assignments and results move over
    /// channels, modelling workers in separate address spaces.
    Isolated,
}

/// Engine configuration: pool size, kernel weights, worker topology.
#[derive(Clone, Copy, Debug)]
pub struct EngineParams {
    pub workers: usize,
    pub kernel: Kernel3x3,
    pub topology: WorkerTopology,
}

impl EngineParams {
    pub fn new(workers: usize, kernel: Kernel3x3) -> Self {
        Self {
            workers,
            kernel,
            topology: WorkerTopology::Colocated,
        }
    }

    pub fn with_topology(mut self, topology: WorkerTopology) -> Self {
        self.topology = topology;
        self
    }
}

/// Timing and layout record for one [`process`] run.
#[derive(Clone, Debug, Serialize)]
pub struct ProcessReport {
    pub workers: usize,
    pub topology: WorkerTopology,
    pub ranges: Vec<RowRange>,
    pub elapsed_ms: f64,
    pub elapsed_convolve_ms: f64,
}

/// Convolve `image` with `params.kernel` across `params.workers` workers.
///
/// Synchronous; blocks until every worker has reported. The output is
/// byte-identical for any worker count and either topology.
pub fn process(image: RasterView<'_>, params: &EngineParams) -> Result<RasterBuffer, EngineError> {
    process_with_report(image, params).map(|(out, _)| out)
}

/// [`process`], additionally returning a serializable timing report.
pub fn process_with_report(
    image: RasterView<'_>,
    params: &EngineParams,
) -> Result<(RasterBuffer, ProcessReport), EngineError> {
    let start = Instant::now();
    validate_image(&image)?;
    let partition = partition_rows(image.height, params.workers)?;
    debug!(
        "partitioned {} rows across {} workers ({:?})",
        image.height, params.workers, params.topology
    );

    let convolve_start = Instant::now();
    let results = match params.topology {
        WorkerTopology::Colocated => colocated_pool(&image, &partition, &params.kernel)?,
        WorkerTopology::Isolated => isolated_pool(&image, &partition, &params.kernel)?,
    };
    let elapsed_convolve_ms = convolve_start.elapsed().as_secs_f64() * 1000.0;

    let pixels = merge(results, &partition, image.stride)?;
    let output = RasterBuffer::from_raw(image.width, image.height, pixels);
    let report = ProcessReport {
        workers: params.workers,
        topology: params.topology,
        ranges: partition,
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        elapsed_convolve_ms,
    };
    Ok((output, report))
}

fn validate_image(image: &RasterView<'_>) -> Result<(), EngineError> {
    if image.width == 0 || image.height == 0 {
        return Err(EngineError::InvalidArgument(format!(
            "image dimensions must be positive, got {}x{}",
            image.width, image.height
        )));
    }
    let stride = row_stride(image.width);
    if image.stride != stride {
        return Err(EngineError::InvalidArgument(format!(
            "stride {} does not match width {} (expected {stride})",
            image.stride, image.width
        )));
    }
    let expected = image.height * image.stride;
    if image.data.len() != expected {
        return Err(EngineError::InvalidArgument(format!(
            "pixel buffer holds {} bytes, expected {expected}",
            image.data.len()
        )));
    }
    Ok(())
}

/// Fan-out over scoped threads sharing the input; fan-in by joining handles.
fn colocated_pool(
    image: &RasterView<'_>,
    partition: &[RowRange],
    kernel: &Kernel3x3,
) -> Result<Vec<WorkerResult>, EngineError> {
    thread::scope(|scope| {
        let handles: Vec<_> = partition
            .iter()
            .enumerate()
            .map(|(worker, &range)| scope.spawn(move || run_colocated(image, worker, range, kernel)))
            .collect();
        handles
            .into_iter()
            .enumerate()
            .map(|(worker, handle)| {
                handle.join().map_err(|_| EngineError::WorkerFailure {
                    worker,
                    reason: "worker panicked".to_string(),
                })
            })
            .collect()
    })
}

/// Fan-out by shipping owned windows through per-worker channels; fan-in over
/// a shared result channel in whatever order workers finish.
fn isolated_pool(
    image: &RasterView<'_>,
    partition: &[RowRange],
    kernel: &Kernel3x3,
) -> Result<Vec<WorkerResult>, EngineError> {
    let kernel = *kernel;
    let (result_tx, result_rx) = mpsc::channel::<WorkerResult>();

    thread::scope(|scope| {
        for (worker, &range) in partition.iter().enumerate() {
            let (assign_tx, assign_rx) = mpsc::channel();
            let tx = result_tx.clone();
            scope.spawn(move || {
                // one assignment per worker, then the sender hangs up
                for assignment in assign_rx {
                    let result = run_isolated(&assignment, &kernel);
                    if tx.send(result).is_err() {
                        break;
                    }
                }
            });
            assign_tx
                .send(make_assignment(image, worker, range))
                .map_err(|_| EngineError::WorkerFailure {
                    worker,
                    reason: "assignment channel closed".to_string(),
                })?;
        }
        drop(result_tx);

        let mut results = Vec::with_capacity(partition.len());
        for _ in 0..partition.len() {
            let result = result_rx.recv().map_err(|_| EngineError::WorkerFailure {
                worker: results.len(),
                reason: "worker disconnected before reporting its range".to_string(),
            })?;
            results.push(result);
        }
        Ok(results)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::CHANNELS;

    fn gradient(width: usize, height: usize) -> RasterBuffer {
        let stride = row_stride(width);
        let data = (0..height * stride).map(|i| (i % 247) as u8).collect();
        RasterBuffer::from_raw(width, height, data)
    }

    #[test]
    fn rejects_zero_workers_before_any_work() {
        let image = gradient(4, 4);
        let params = EngineParams::new(0, Kernel3x3::sharpen(5).unwrap());
        assert!(matches!(
            process(image.as_view(), &params),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_mismatched_stride() {
        let image = gradient(4, 4);
        let mut view = image.as_view();
        view.stride = view.width * CHANNELS + 8;
        let params = EngineParams::new(1, Kernel3x3::sharpen(5).unwrap());
        assert!(matches!(
            process(view, &params),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn report_records_partition_and_topology() {
        let image = gradient(6, 10);
        let params = EngineParams::new(3, Kernel3x3::sharpen(5).unwrap())
            .with_topology(WorkerTopology::Isolated);
        let (_, report) = process_with_report(image.as_view(), &params).unwrap();
        assert_eq!(report.workers, 3);
        assert_eq!(report.topology, WorkerTopology::Isolated);
        assert_eq!(
            report.ranges,
            vec![RowRange::new(0, 3), RowRange::new(3, 6), RowRange::new(6, 10)]
        );
    }
}
