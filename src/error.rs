//! Errors raised when constructing pixel buffers.
//!
//! Rasterization, compositing and extraction never fail; degenerate input
//! produces empty output. Only the buffer constructors validate.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("invalid image size {width}*{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("pixel buffer holds {actual} pixels but {expected} are required")]
    BufferTooSmall { expected: usize, actual: usize },
    #[error("row stride {stride} is smaller than the width {width}")]
    InvalidStride { stride: u32, width: u32 },
}

pub type Result<T> = std::result::Result<T, ImageError>;
