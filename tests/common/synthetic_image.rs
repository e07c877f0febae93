use raster_conv::raster::{row_stride, RasterBuffer, CHANNELS};

/// Generates a deterministic gradient raster. Padding bytes carry a nonzero
/// marker pattern so that padding preservation is observable.
pub fn gradient_raster(width: usize, height: usize) -> RasterBuffer {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let stride = row_stride(width);
    let mut data = vec![0u8; height * stride];
    for y in 0..height {
        let row = &mut data[y * stride..(y + 1) * stride];
        for x in 0..width {
            for c in 0..CHANNELS {
                row[x * CHANNELS + c] = ((x * 7 + y * 13 + c * 29) % 256) as u8;
            }
        }
        for (i, pad) in row[width * CHANNELS..].iter_mut().enumerate() {
            *pad = ((0xA0 + y + i) % 256) as u8;
        }
    }
    RasterBuffer::from_raw(width, height, data)
}

/// Generates a raster with every pixel byte set to `value` (padding zeroed).
pub fn solid_raster(width: usize, height: usize, value: u8) -> RasterBuffer {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let stride = row_stride(width);
    let mut data = vec![0u8; height * stride];
    for y in 0..height {
        let row = &mut data[y * stride..y * stride + width * CHANNELS];
        row.fill(value);
    }
    RasterBuffer::from_raw(width, height, data)
}
