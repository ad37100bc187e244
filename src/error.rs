use alloc::string::String;

use crate::pixel::PixelFormat;

/// Errors from image data construction, access and view creation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ImageDataError {
    #[error("data too small, got {actual} but expected at least {expected} bytes")]
    DataTooSmall { expected: usize, actual: usize },

    #[error("{operation}(): the image is {}", variant_name(.compressed))]
    WrongVariant {
        operation: &'static str,
        /// Whether the image the operation was attempted on is compressed.
        compressed: bool,
    },

    #[error("invalid pixel size: {0}")]
    InvalidPixelSize(u32),

    #[error("pixel size of {0:?} is not known, pass it explicitly")]
    UnknownPixelSize(PixelFormat),

    #[error("invalid row alignment: {0}, expected 1, 2, 4 or 8")]
    InvalidAlignment(u8),

    #[error("image layout overflows the address space")]
    SizeOverflow,

    #[error("pixel format mismatch: expected {expected:?}, got {actual:?}")]
    FormatMismatch {
        expected: PixelFormat,
        actual: PixelFormat,
    },

    #[error("stored pixel size {actual} doesn't match the {expected}-byte pixel type")]
    PixelSizeMismatch { expected: usize, actual: usize },

    #[error("row stride {stride} is not a multiple of the pixel size {pixel_size}")]
    UnalignedStride { stride: usize, pixel_size: usize },

    #[error("image has no pixels")]
    EmptyImage,

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}

fn variant_name(compressed: &bool) -> &'static str {
    if *compressed {
        "compressed"
    } else {
        "not compressed"
    }
}

impl ImageDataError {
    pub(crate) fn wrong_variant(operation: &'static str, compressed: bool) -> Self {
        ImageDataError::WrongVariant {
            operation,
            compressed,
        }
    }
}

/// Single exit point for contract violations.
///
/// With the `fast-fail` feature the violation panics right here, otherwise it
/// is logged and handed back to the caller.
#[inline]
#[track_caller]
pub(crate) fn violation(err: ImageDataError) -> ImageDataError {
    #[cfg(feature = "fast-fail")]
    panic!("{err}");

    #[cfg(not(feature = "fast-fail"))]
    {
        log::debug!("contract violation: {err}");
        err
    }
}
