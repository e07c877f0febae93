//! Pixel-buffer data model and BMP codec.
//!
//! The engine operates on 24-bit rasters: three bytes per pixel, rows padded
//! to a 4-byte boundary. [`RasterView`] is the borrowed, read-only form the
//! engine consumes; [`RasterBuffer`] owns its bytes and is what the codec
//! produces and the engine returns.

pub mod buffer;
pub mod io;
pub mod view;

pub use self::buffer::RasterBuffer;
pub use self::view::{row_stride, RasterView, CHANNELS};
