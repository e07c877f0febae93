use super::partition::RowRange;

/// Halo requirement for one worker: its assigned range plus the neighboring
/// rows needed to convolve the range's first and last rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HaloSpec {
    pub range: RowRange,
    pub rows_above: usize,
    pub rows_below: usize,
}

impl HaloSpec {
    /// Rows the worker must be able to read: the assigned range widened by
    /// the halo on each side.
    #[inline]
    pub fn window(&self) -> RowRange {
        RowRange::new(
            self.range.start - self.rows_above,
            self.range.end + self.rows_below,
        )
    }
}

/// Computes the halo rows required to convolve `range` in an image of
/// `height` rows.
///
/// Interior segment boundaries always need exactly one row on each side;
/// at the image's own top and bottom edges the request degenerates to zero
/// halo rows there, and the kernel skips the out-of-range taps instead.
/// Empty ranges need no data at all.
pub fn halo_for(range: RowRange, height: usize) -> HaloSpec {
    if range.is_empty() {
        return HaloSpec {
            range,
            rows_above: 0,
            rows_below: 0,
        };
    }
    HaloSpec {
        range,
        rows_above: usize::from(range.start > 0),
        rows_below: usize::from(range.end < height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_range_needs_both_sides() {
        let spec = halo_for(RowRange::new(4, 8), 16);
        assert_eq!(spec.rows_above, 1);
        assert_eq!(spec.rows_below, 1);
        assert_eq!(spec.window(), RowRange::new(3, 9));
    }

    #[test]
    fn image_edges_degenerate_to_zero_halo() {
        let top = halo_for(RowRange::new(0, 4), 16);
        assert_eq!((top.rows_above, top.rows_below), (0, 1));
        assert_eq!(top.window(), RowRange::new(0, 5));

        let bottom = halo_for(RowRange::new(12, 16), 16);
        assert_eq!((bottom.rows_above, bottom.rows_below), (1, 0));
        assert_eq!(bottom.window(), RowRange::new(11, 16));

        let whole = halo_for(RowRange::new(0, 16), 16);
        assert_eq!((whole.rows_above, whole.rows_below), (0, 0));
    }

    #[test]
    fn empty_range_needs_nothing() {
        let spec = halo_for(RowRange::new(0, 0), 16);
        assert_eq!((spec.rows_above, spec.rows_below), (0, 0));
        assert!(spec.window().is_empty());
    }
}
