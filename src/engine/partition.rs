use crate::error::EngineError;
use serde::Serialize;
use std::fmt;

/// Half-open range of image rows assigned to one worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "row range must not be inverted");
        Self { start, end }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for RowRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rows [{}, {})", self.start, self.end)
    }
}

/// Split `height` rows into one ordered, disjoint, covering range per worker.
///
/// The first `workers - 1` ranges get `height / workers` rows each; the last
/// absorbs the remainder. With more workers than rows the leading ranges are
/// empty, which downstream stages treat as valid no-ops, so correctness never
/// depends on `workers <= height`.
pub fn partition_rows(height: usize, workers: usize) -> Result<Vec<RowRange>, EngineError> {
    if workers == 0 {
        return Err(EngineError::InvalidArgument(
            "worker count must be at least 1".to_string(),
        ));
    }
    if height == 0 {
        return Err(EngineError::InvalidArgument(
            "image height must be at least 1".to_string(),
        ));
    }

    let base = height / workers;
    let mut ranges = Vec::with_capacity(workers);
    for i in 0..workers {
        let start = base * i;
        let end = if i + 1 == workers { height } else { base * (i + 1) };
        ranges.push(RowRange::new(start, end));
    }
    Ok(ranges)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_covering(ranges: &[RowRange], height: usize) {
        assert_eq!(ranges[0].start, 0);
        assert_eq!(ranges.last().unwrap().end, height);
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        let total: usize = ranges.iter().map(RowRange::len).sum();
        assert_eq!(total, height);
    }

    #[test]
    fn covers_rows_for_all_small_configurations() {
        for height in 1..=48 {
            for workers in 1..=53 {
                let ranges = partition_rows(height, workers).unwrap();
                assert_eq!(ranges.len(), workers);
                assert_covering(&ranges, height);
            }
        }
    }

    #[test]
    fn last_worker_absorbs_remainder() {
        let ranges = partition_rows(10, 3).unwrap();
        assert_eq!(
            ranges,
            vec![RowRange::new(0, 3), RowRange::new(3, 6), RowRange::new(6, 10)]
        );
    }

    #[test]
    fn excess_workers_get_empty_ranges() {
        let ranges = partition_rows(2, 5).unwrap();
        assert_eq!(ranges.len(), 5);
        assert!(ranges[..4].iter().all(RowRange::is_empty));
        assert_eq!(ranges[4], RowRange::new(0, 2));
    }

    #[test]
    fn rejects_zero_arguments() {
        assert!(matches!(
            partition_rows(0, 3),
            Err(EngineError::InvalidArgument(_))
        ));
        assert!(matches!(
            partition_rows(3, 0),
            Err(EngineError::InvalidArgument(_))
        ));
    }
}
