use super::partition::RowRange;
use super::worker::WorkerResult;
use crate::error::EngineError;

/// Reassemble per-worker outputs into one contiguous pixel buffer.
///
/// Results may arrive in any order; each one is copied to its range's byte
/// offset. The multiset of result ranges must be exactly the partition:
/// a missing range, a foreign range, or a range delivered twice is a bug in
/// the dispatch layer and fails the run. Excess-worker partitions contain
/// repeated empty ranges, so empty results are matched against the first
/// still-unfilled slot.
pub fn merge(
    results: Vec<WorkerResult>,
    partition: &[RowRange],
    stride: usize,
) -> Result<Vec<u8>, EngineError> {
    let height = partition.last().map_or(0, |r| r.end);
    let mut out = vec![0u8; height * stride];
    let mut filled = vec![false; partition.len()];

    for result in results {
        let slot = partition
            .iter()
            .enumerate()
            .find(|(i, r)| **r == result.range && !filled[*i]);
        let idx = match slot {
            Some((i, _)) => i,
            None if partition.contains(&result.range) => {
                return Err(EngineError::DuplicateRange {
                    range: result.range,
                });
            }
            None => {
                return Err(EngineError::UnexpectedRange {
                    range: result.range,
                });
            }
        };

        let expected = result.range.len() * stride;
        if result.pixels.len() != expected {
            return Err(EngineError::WorkerFailure {
                worker: idx,
                reason: format!(
                    "result for {} holds {} bytes, expected {expected}",
                    result.range,
                    result.pixels.len()
                ),
            });
        }
        filled[idx] = true;
        out[result.range.start * stride..result.range.start * stride + expected]
            .copy_from_slice(&result.pixels);
    }

    if let Some(idx) = filled.iter().position(|f| !f) {
        return Err(EngineError::IncompletePartition {
            missing: partition[idx],
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(start: usize, end: usize, stride: usize, value: u8) -> WorkerResult {
        WorkerResult {
            range: RowRange::new(start, end),
            pixels: vec![value; (end - start) * stride],
        }
    }

    #[test]
    fn merges_out_of_order_arrivals() {
        let stride = 8;
        let partition = [RowRange::new(0, 2), RowRange::new(2, 3), RowRange::new(3, 5)];
        let out = merge(
            vec![
                result(3, 5, stride, 3),
                result(0, 2, stride, 1),
                result(2, 3, stride, 2),
            ],
            &partition,
            stride,
        )
        .unwrap();
        assert_eq!(&out[..2 * stride], &vec![1u8; 2 * stride][..]);
        assert_eq!(&out[2 * stride..3 * stride], &vec![2u8; stride][..]);
        assert_eq!(&out[3 * stride..], &vec![3u8; 2 * stride][..]);
    }

    #[test]
    fn accepts_repeated_empty_ranges() {
        let stride = 4;
        let partition = [RowRange::new(0, 0), RowRange::new(0, 0), RowRange::new(0, 2)];
        let out = merge(
            vec![
                result(0, 0, stride, 0),
                result(0, 2, stride, 9),
                result(0, 0, stride, 0),
            ],
            &partition,
            stride,
        )
        .unwrap();
        assert_eq!(out, vec![9u8; 2 * stride]);
    }

    #[test]
    fn rejects_missing_result() {
        let stride = 4;
        let partition = [RowRange::new(0, 1), RowRange::new(1, 2)];
        let err = merge(vec![result(0, 1, stride, 1)], &partition, stride).unwrap_err();
        assert!(matches!(
            err,
            EngineError::IncompletePartition {
                missing: RowRange { start: 1, end: 2 }
            }
        ));
    }

    #[test]
    fn rejects_duplicate_result() {
        let stride = 4;
        let partition = [RowRange::new(0, 1), RowRange::new(1, 2)];
        let err = merge(
            vec![
                result(0, 1, stride, 1),
                result(0, 1, stride, 1),
                result(1, 2, stride, 2),
            ],
            &partition,
            stride,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::DuplicateRange { .. }));
    }

    #[test]
    fn rejects_foreign_range() {
        let stride = 4;
        let partition = [RowRange::new(0, 2)];
        let err = merge(vec![result(1, 2, stride, 1)], &partition, stride).unwrap_err();
        assert!(matches!(err, EngineError::UnexpectedRange { .. }));
    }

    #[test]
    fn rejects_malformed_result_buffer() {
        let stride = 4;
        let partition = [RowRange::new(0, 2)];
        let bad = WorkerResult {
            range: RowRange::new(0, 2),
            pixels: vec![0u8; stride], // one row short
        };
        let err = merge(vec![bad], &partition, stride).unwrap_err();
        assert!(matches!(err, EngineError::WorkerFailure { .. }));
    }
}
