use super::view::{row_stride, RasterView};

/// Owned 24-bit pixel buffer with stride and borrowed view conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterBuffer {
    width: usize,
    height: usize,
    stride: usize,
    data: Vec<u8>,
}

impl RasterBuffer {
    /// Zero-filled buffer for the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "image dimensions must be positive");
        let stride = row_stride(width);
        Self {
            width,
            height,
            stride,
            data: vec![0u8; height * stride],
        }
    }

    /// Wrap raw pixel bytes; `data` must hold exactly `height` stride-padded
    /// rows.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Self {
        assert!(width > 0 && height > 0, "image dimensions must be positive");
        let stride = row_stride(width);
        assert_eq!(
            data.len(),
            height * stride,
            "pixel buffer does not match dimensions"
        );
        Self {
            width,
            height,
            stride,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row, padding included
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Raw pixel bytes, `height * stride` long
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Borrow as a read-only `RasterView`
    pub fn as_view(&self) -> RasterView<'_> {
        RasterView {
            width: self.width,
            height: self.height,
            stride: self.stride,
            data: &self.data,
        }
    }
}
