//! I/O helpers for 24-bit BMP files and JSON reports.
//!
//! - `load_bmp`: read an uncompressed bottom-up 24-bit BMP into a
//!   [`RasterBuffer`], keeping the pre-pixel file prefix verbatim.
//! - `save_bmp`: write the preserved prefix followed by the pixel payload.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{row_stride, RasterBuffer};
use crate::error::CodecError;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Smallest legal BMP prefix: 14-byte file header + 40-byte info header.
const MIN_HEADER_LEN: usize = 54;

/// Verbatim copy of everything in the file before the pixel array.
///
/// The engine never interprets these bytes beyond the fields parsed at load
/// time; keeping the whole prefix means color-space blocks and other optional
/// header extensions survive a decode/encode round trip untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    bytes: Vec<u8>,
}

impl BmpHeader {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Plain 54-byte header for the given dimensions, used when there is no
    /// source file to inherit a prefix from.
    pub fn for_dimensions(width: usize, height: usize) -> Self {
        let stride = row_stride(width);
        let file_size = (MIN_HEADER_LEN + height * stride) as u32;
        let mut bytes = vec![0u8; MIN_HEADER_LEN];
        bytes[0..2].copy_from_slice(b"BM");
        bytes[2..6].copy_from_slice(&file_size.to_le_bytes());
        bytes[10..14].copy_from_slice(&(MIN_HEADER_LEN as u32).to_le_bytes());
        bytes[14..18].copy_from_slice(&40u32.to_le_bytes());
        bytes[18..22].copy_from_slice(&(width as i32).to_le_bytes());
        bytes[22..26].copy_from_slice(&(height as i32).to_le_bytes());
        bytes[26..28].copy_from_slice(&1u16.to_le_bytes());
        bytes[28..30].copy_from_slice(&24u16.to_le_bytes());
        bytes[34..38].copy_from_slice(&((height * stride) as u32).to_le_bytes());
        Self { bytes }
    }
}

/// Load an uncompressed 24-bit BMP from disk.
///
/// Returns the preserved header prefix alongside the pixel buffer. Rows keep
/// the file's bottom-up order; the engine is agnostic to row direction, and
/// `save_bmp` writes them back in the same order.
pub fn load_bmp(path: &Path) -> Result<(BmpHeader, RasterBuffer), CodecError> {
    let bytes = fs::read(path)?;
    if bytes.len() < MIN_HEADER_LEN {
        return Err(CodecError::Truncated {
            expected: MIN_HEADER_LEN,
            actual: bytes.len(),
        });
    }
    if &bytes[0..2] != b"BM" {
        return Err(CodecError::BadMagic);
    }

    let pixel_offset = read_u32_le(&bytes, 10) as usize;
    let width = read_i32_le(&bytes, 18);
    let height = read_i32_le(&bytes, 22);
    let bpp = read_u16_le(&bytes, 28);
    let compression = read_u32_le(&bytes, 30);

    if bpp != 24 {
        return Err(CodecError::Unsupported(format!("{bpp} bits per pixel")));
    }
    if compression != 0 {
        return Err(CodecError::Unsupported(format!(
            "compression type {compression}"
        )));
    }
    if width <= 0 || height <= 0 {
        return Err(CodecError::Unsupported(format!(
            "dimensions {width}x{height} (empty or top-down)"
        )));
    }
    if pixel_offset < MIN_HEADER_LEN || pixel_offset > bytes.len() {
        return Err(CodecError::Unsupported(format!(
            "pixel data offset {pixel_offset}"
        )));
    }

    let (width, height) = (width as usize, height as usize);
    let stride = row_stride(width);
    let expected = pixel_offset + height * stride;
    if bytes.len() < expected {
        return Err(CodecError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }

    let header = BmpHeader {
        bytes: bytes[..pixel_offset].to_vec(),
    };
    let data = bytes[pixel_offset..expected].to_vec();
    Ok((header, RasterBuffer::from_raw(width, height, data)))
}

/// Write the preserved header prefix and the pixel payload back to disk,
/// byte-for-byte.
pub fn save_bmp(path: &Path, header: &BmpHeader, image: &RasterBuffer) -> Result<(), CodecError> {
    ensure_parent_dir(path)?;
    let mut out = Vec::with_capacity(header.bytes.len() + image.data().len());
    out.extend_from_slice(&header.bytes);
    out.extend_from_slice(image.data());
    fs::write(path, out)?;
    Ok(())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), CodecError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<(), CodecError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn read_u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn read_i32_le(bytes: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
