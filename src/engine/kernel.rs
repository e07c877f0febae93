use super::worker::LocalView;
use crate::error::EngineError;
use crate::raster::CHANNELS;
use nalgebra::Matrix3;

/// Fixed 3×3 integer convolution kernel.
///
/// The weights are injected configuration rather than a baked-in constant;
/// [`Kernel3x3::sharpen`] builds the reference sharpening cross with a
/// caller-chosen center weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kernel3x3 {
    weights: Matrix3<i32>,
}

impl Kernel3x3 {
    pub fn new(weights: Matrix3<i32>) -> Self {
        Self { weights }
    }

    /// Reference sharpening kernel: negative orthogonal taps, zero diagonals,
    /// configurable center. A center below 1 would drain energy from the
    /// image instead of sharpening it and is rejected.
    pub fn sharpen(center: i32) -> Result<Self, EngineError> {
        if center < 1 {
            return Err(EngineError::InvalidArgument(format!(
                "sharpen center weight must be >= 1, got {center}"
            )));
        }
        #[rustfmt::skip]
        let weights = Matrix3::new(
             0, -1,  0,
            -1, center, -1,
             0, -1,  0,
        );
        Ok(Self::new(weights))
    }

    #[inline]
    pub fn weight(&self, ki: usize, kj: usize) -> i32 {
        self.weights[(ki, kj)]
    }
}

/// Convolve the view's assigned range, producing exactly
/// `range.len() * stride` output bytes with no halo rows included.
///
/// Each output row starts as a full-stride copy of its input row; the copy
/// is what leaves the first and last pixel columns and the row padding
/// untouched. Columns `[1, width - 1)` are then overwritten per channel with
/// the clamped weighted sum, accumulated in `i32`. A tap row outside the
/// view's window can only lie outside the image itself (the halo guarantees
/// every in-image neighbor is present) and is skipped, so the image's
/// absolute top and bottom rows accumulate fewer than nine terms.
pub fn convolve(view: &LocalView<'_>, kernel: &Kernel3x3) -> Vec<u8> {
    let range = view.range();
    let stride = view.stride;
    let mut out = vec![0u8; range.len() * stride];
    if range.is_empty() {
        return out;
    }

    let window = view.window();
    for y in range.start..range.end {
        let dst = &mut out[(y - range.start) * stride..(y - range.start + 1) * stride];
        dst.copy_from_slice(view.row(y));
        if view.width <= 2 {
            // every column is an edge column; the copy is the output
            continue;
        }
        for x in 1..view.width - 1 {
            for c in 0..CHANNELS {
                let mut sum = 0i32;
                for ki in -1i64..=1 {
                    let tap_y = y as i64 + ki;
                    if tap_y < window.start as i64 || tap_y >= window.end as i64 {
                        continue;
                    }
                    let src = view.row(tap_y as usize);
                    for kj in -1i64..=1 {
                        let tap_x = (x as i64 + kj) as usize;
                        sum += src[tap_x * CHANNELS + c] as i32
                            * kernel.weight((ki + 1) as usize, (kj + 1) as usize);
                    }
                }
                dst[x * CHANNELS + c] = sum.clamp(0, 255) as u8;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::halo::halo_for;
    use crate::engine::partition::RowRange;
    use crate::raster::row_stride;

    fn view_over<'a>(width: usize, height: usize, data: &'a [u8]) -> LocalView<'a> {
        LocalView {
            width,
            stride: row_stride(width),
            halo: halo_for(RowRange::new(0, height), height),
            data,
        }
    }

    #[test]
    fn sharpen_rejects_non_positive_center() {
        assert!(matches!(
            Kernel3x3::sharpen(0),
            Err(EngineError::InvalidArgument(_))
        ));
        assert!(Kernel3x3::sharpen(1).is_ok());
    }

    #[test]
    fn sharpen_weight_layout() {
        let k = Kernel3x3::sharpen(5).unwrap();
        assert_eq!(k.weight(1, 1), 5);
        assert_eq!(k.weight(0, 1), -1);
        assert_eq!(k.weight(1, 0), -1);
        assert_eq!(k.weight(0, 0), 0);
        assert_eq!(k.weight(2, 2), 0);
    }

    #[test]
    fn identity_kernel_preserves_interior() {
        let width = 4;
        let stride = row_stride(width);
        let mut data = vec![0u8; 3 * stride];
        for (i, b) in data.iter_mut().enumerate() {
            *b = (i % 251) as u8;
        }
        let identity = Kernel3x3::new(Matrix3::new(0, 0, 0, 0, 1, 0, 0, 0, 0));
        let out = convolve(&view_over(width, 3, &data), &identity);
        assert_eq!(out, data);
    }

    #[test]
    fn all_positive_kernel_clamps_at_255() {
        let width = 3;
        let stride = row_stride(width);
        let data = vec![255u8; 3 * stride];
        let ones = Kernel3x3::new(Matrix3::from_element(1));
        let out = convolve(&view_over(width, 3, &data), &ones);
        // center pixel sums to 9 * 255 and must saturate, not wrap
        assert_eq!(out[stride + CHANNELS], 255);
        assert_eq!(out[stride + CHANNELS + 1], 255);
        assert_eq!(out[stride + CHANNELS + 2], 255);
    }

    #[test]
    fn all_negative_kernel_clamps_at_0() {
        let width = 3;
        let stride = row_stride(width);
        let data = vec![200u8; 3 * stride];
        let negate = Kernel3x3::new(Matrix3::from_element(-1));
        let out = convolve(&view_over(width, 3, &data), &negate);
        assert_eq!(out[stride + CHANNELS], 0);
    }
}
