/// Bytes per pixel (blue, green, red, as stored by 24-bit BMP).
pub const CHANNELS: usize = 3;

/// Bytes per row for `width` pixels, rounded up to the 4-byte row boundary
/// required by the raster format.
#[inline]
pub const fn row_stride(width: usize) -> usize {
    (width * CHANNELS + 3) & !3
}

/// Borrowed, read-only view over a 24-bit pixel buffer.
///
/// `data` holds `height * stride` bytes; the tail of each row beyond
/// `width * CHANNELS` is format padding and is carried through untouched.
#[derive(Clone, Debug)]
pub struct RasterView<'a> {
    pub width: usize,
    pub height: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> RasterView<'a> {
    /// Full-stride row `y`, padding included.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.stride]
    }
}
