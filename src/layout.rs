//! Byte layout of uncompressed image data.
//!
//! Given a [`PixelStorage`], a pixel size and an extent, computes where the
//! first pixel is, how far apart consecutive pixels, rows and slices are, and
//! how many bytes a buffer needs at minimum to hold the whole image.

use crate::error::ImageDataError;
use crate::storage::PixelStorage;

/// Result of the layout calculation for an `N`-dimensional image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataProperties<const N: usize> {
    /// Byte offset of the first pixel, from [`PixelStorage::skip`].
    pub offset: usize,
    /// Byte distance between neighbors along each axis: pixel size, row
    /// stride, slice stride.
    pub strides: [usize; N],
    /// Minimum buffer size in bytes, including the leading offset.
    pub size: usize,
    row_stride: usize,
}

impl<const N: usize> DataProperties<N> {
    /// Bytes from one pixel to the next one in the same row.
    #[inline]
    pub fn pixel_stride(&self) -> usize {
        self.strides[0]
    }

    /// Bytes from the start of one row to the start of the next, including
    /// alignment padding and row skip. For 1D images this is the padded
    /// size of the single row.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }
}

/// Compute offset, strides and minimum size for an uncompressed image.
///
/// # Errors
///
/// Returns [`ImageDataError::InvalidAlignment`] for alignments other than 1,
/// 2, 4 and 8, [`ImageDataError::InvalidPixelSize`] for a zero pixel size,
/// and [`ImageDataError::SizeOverflow`] if any intermediate value doesn't fit
/// into `usize`.
pub fn data_properties<const N: usize>(
    storage: &PixelStorage,
    pixel_size: u32,
    size: [u32; N],
) -> Result<DataProperties<N>, ImageDataError> {
    const { assert!(N >= 1 && N <= 3, "images have one to three dimensions") };

    if !storage.has_valid_alignment() {
        return Err(ImageDataError::InvalidAlignment(storage.alignment));
    }
    if pixel_size == 0 {
        return Err(ImageDataError::InvalidPixelSize(pixel_size));
    }

    let pixel_size = pixel_size as usize;
    let extent = size.map(|v| v as usize);

    let row_bytes = extent[0]
        .checked_mul(pixel_size)
        .ok_or(ImageDataError::SizeOverflow)?;
    let row_stride = align_up(row_bytes, storage.alignment as usize)?
        .checked_add(storage.row_skip as usize)
        .ok_or(ImageDataError::SizeOverflow)?;
    let slice_stride = if N >= 2 {
        row_stride
            .checked_mul(extent[1])
            .and_then(|v| v.checked_add(storage.image_skip as usize))
            .ok_or(ImageDataError::SizeOverflow)?
    } else {
        row_stride
    };

    let all_strides = [pixel_size, row_stride, slice_stride];
    let strides: [usize; N] = core::array::from_fn(|i| all_strides[i]);

    let mut offset = 0usize;
    for (skip, stride) in storage.skip.iter().zip(strides) {
        offset = (*skip as usize)
            .checked_mul(stride)
            .and_then(|v| v.checked_add(offset))
            .ok_or(ImageDataError::SizeOverflow)?;
    }

    // The outermost axis determines the footprint: a single padded row for
    // 1D, rows times height for 2D, slices times depth for 3D.
    let body = if extent.contains(&0) {
        0
    } else if N == 1 {
        row_stride
    } else {
        strides[N - 1]
            .checked_mul(extent[N - 1])
            .ok_or(ImageDataError::SizeOverflow)?
    };

    let size = offset.checked_add(body).ok_or(ImageDataError::SizeOverflow)?;

    Ok(DataProperties {
        offset,
        strides,
        size,
        row_stride,
    })
}

/// Minimum buffer size in bytes for an uncompressed image.
pub fn image_data_size<const N: usize>(
    storage: &PixelStorage,
    pixel_size: u32,
    size: [u32; N],
) -> Result<usize, ImageDataError> {
    data_properties(storage, pixel_size, size).map(|p| p.size)
}

#[inline]
fn align_up(value: usize, alignment: usize) -> Result<usize, ImageDataError> {
    value
        .checked_add(alignment - 1)
        .map(|v| v & !(alignment - 1))
        .ok_or(ImageDataError::SizeOverflow)
}
