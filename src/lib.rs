//! # zenimagedata
//!
//! Owned image data as produced by importers, with validated layouts and
//! zero-copy strided views.
//!
//! An [`ImageData`] holds either uncompressed pixels, described by a
//! [`PixelFormat`] and a [`PixelStorage`] layout, or block-compressed data,
//! described by a [`CompressedPixelFormat`]. Uncompressed data is checked
//! against its layout on construction; afterwards it can be viewed through
//! [`PixelView`] (per-pixel, stride-aware) or handed to consumers as an
//! [`ImageView`] / [`CompressedImageView`] without copying. The buffer can be
//! taken back out with [`ImageData::release()`].
//!
//! ## Layout
//!
//! Rows are padded to [`PixelStorage::alignment`] and followed by
//! [`PixelStorage::row_skip`] extra bytes; 3D slices are followed by
//! [`PixelStorage::image_skip`] bytes. See [`layout::data_properties()`].
//!
//! ## Features
//!
//! - `rgb` / `imgref`: typed `imgref::ImgRef` access to 2D images
//! - `fast-fail`: contract violations (wrong-variant access, undersized
//!   buffers) panic instead of returning an error
//!
//! ## Usage
//!
//! ```
//! use zenimagedata::{ImageData2D, PixelFormat, PixelStorage};
//!
//! // 5x2 RGB, rows padded to 4 bytes: 16 bytes per row
//! let image = ImageData2D::from_format(
//!     PixelStorage::new(),
//!     PixelFormat::RGB8Unorm,
//!     [5, 2],
//!     vec![0u8; 32],
//!     None,
//! )?;
//!
//! let pixels = image.pixels()?;
//! assert_eq!(pixels.strides(), [3, 16]);
//! assert_eq!(pixels.pixel([4, 1]), &[0, 0, 0]);
//! # Ok::<(), zenimagedata::ImageDataError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod image_data;
mod image_view;
mod importer;
pub mod layout;
mod limits;
mod pixel;
mod storage;
#[cfg(feature = "imgref")]
mod typed;
mod view;

// Re-exports
pub use error::ImageDataError;
pub use image_data::{ImageData, ImageData1D, ImageData2D, ImageData3D, ImageDataKind};
pub use image_view::{
    CompressedImageView, CompressedImageViewMut, ImageDescriptor, ImageView, ImageViewMut,
};
pub use importer::{ImporterHandle, ImporterRegistry};
pub use layout::DataProperties;
pub use limits::Limits;
pub use pixel::{CompressedPixelFormat, PixelFormat};
pub use storage::{CompressedPixelStorage, PixelStorage};
#[cfg(feature = "imgref")]
pub use typed::TypedPixel;
pub use view::{PixelView, PixelViewMut};
