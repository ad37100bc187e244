//! Strided pixel views.
//!
//! A view has `N` spatial axes, each with a size and a byte stride, plus an
//! implicit trailing axis covering the `pixel_size` bytes of one pixel. Padding
//! between rows and slices is simply never addressed.

use alloc::vec::Vec;
use core::fmt;

use crate::error::ImageDataError;
use crate::layout::{DataProperties, data_properties};
use crate::storage::PixelStorage;

// ---------------------------------------------------------------------------
// PixelView (borrowed, immutable)
// ---------------------------------------------------------------------------

/// Borrowed strided view of pixel data.
#[derive(Clone, Copy)]
pub struct PixelView<'a, const N: usize> {
    data: &'a [u8],
    size: [usize; N],
    strides: [usize; N],
    pixel_size: usize,
}

impl<'a, const N: usize> PixelView<'a, N> {
    /// Create a view with validation.
    ///
    /// `data` starts at the first pixel. An empty view (any size component
    /// zero) accepts any data.
    ///
    /// # Errors
    ///
    /// Returns [`ImageDataError::DataTooSmall`] if the last addressed byte
    /// lies outside `data`.
    pub fn new(
        data: &'a [u8],
        size: [usize; N],
        strides: [usize; N],
        pixel_size: usize,
    ) -> Result<Self, ImageDataError> {
        let required = required_bytes(&size, &strides, pixel_size)?;
        if data.len() < required {
            return Err(ImageDataError::DataTooSmall {
                expected: required,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            size,
            strides,
            pixel_size,
        })
    }

    /// Size along each axis, in pixels.
    #[inline]
    pub fn size(&self) -> [usize; N] {
        self.size
    }

    /// Byte stride along each axis.
    #[inline]
    pub fn strides(&self) -> [usize; N] {
        self.strides
    }

    /// Size of the trailing per-pixel axis in bytes.
    #[inline]
    pub fn pixel_size(&self) -> usize {
        self.pixel_size
    }

    /// Whether the view addresses no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.contains(&0)
    }

    /// Bytes of the pixel at `coords`, `None` if out of bounds.
    pub fn get(&self, coords: [usize; N]) -> Option<&'a [u8]> {
        let offset = offset_of(&self.size, &self.strides, coords)?;
        self.data.get(offset..offset + self.pixel_size)
    }

    /// Bytes of the pixel at `coords`.
    ///
    /// # Panics
    ///
    /// Panics if `coords` is out of bounds.
    #[inline]
    pub fn pixel(&self, coords: [usize; N]) -> &'a [u8] {
        match self.get(coords) {
            Some(px) => px,
            None => panic!("pixel {coords:?} out of bounds (size: {:?})", self.size),
        }
    }

    /// Iterate over all pixels, first axis fastest.
    pub fn iter(&self) -> impl Iterator<Item = &'a [u8]> + use<'a, N> {
        let data = self.data;
        let pixel_size = self.pixel_size;
        Offsets::new(self.size, self.strides).map(move |o| &data[o..o + pixel_size])
    }

    /// Copy all pixels into a tightly packed buffer, dropping any padding.
    pub fn to_packed_vec(&self) -> Vec<u8> {
        let count: usize = self.size.iter().product();
        let mut out = Vec::with_capacity(count * self.pixel_size);
        for px in self.iter() {
            out.extend_from_slice(px);
        }
        out
    }
}

impl<const N: usize> fmt::Debug for PixelView<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PixelView({:?}, strides {:?}, {} bytes/pixel)",
            self.size, self.strides, self.pixel_size
        )
    }
}

// ---------------------------------------------------------------------------
// PixelViewMut (borrowed, mutable)
// ---------------------------------------------------------------------------

/// Mutable borrowed strided view of pixel data.
///
/// Same semantics as [`PixelView`] but allows writing pixels.
pub struct PixelViewMut<'a, const N: usize> {
    data: &'a mut [u8],
    size: [usize; N],
    strides: [usize; N],
    pixel_size: usize,
}

impl<'a, const N: usize> PixelViewMut<'a, N> {
    /// Create a mutable view with validation.
    ///
    /// # Errors
    ///
    /// Returns [`ImageDataError::DataTooSmall`] if the last addressed byte
    /// lies outside `data`.
    pub fn new(
        data: &'a mut [u8],
        size: [usize; N],
        strides: [usize; N],
        pixel_size: usize,
    ) -> Result<Self, ImageDataError> {
        let required = required_bytes(&size, &strides, pixel_size)?;
        if data.len() < required {
            return Err(ImageDataError::DataTooSmall {
                expected: required,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            size,
            strides,
            pixel_size,
        })
    }

    #[inline]
    pub fn size(&self) -> [usize; N] {
        self.size
    }

    #[inline]
    pub fn strides(&self) -> [usize; N] {
        self.strides
    }

    #[inline]
    pub fn pixel_size(&self) -> usize {
        self.pixel_size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.contains(&0)
    }

    /// Reborrow as an immutable view.
    pub fn as_view(&self) -> PixelView<'_, N> {
        PixelView {
            data: self.data,
            size: self.size,
            strides: self.strides,
            pixel_size: self.pixel_size,
        }
    }

    pub fn get(&self, coords: [usize; N]) -> Option<&[u8]> {
        let offset = offset_of(&self.size, &self.strides, coords)?;
        self.data.get(offset..offset + self.pixel_size)
    }

    pub fn get_mut(&mut self, coords: [usize; N]) -> Option<&mut [u8]> {
        let offset = offset_of(&self.size, &self.strides, coords)?;
        self.data.get_mut(offset..offset + self.pixel_size)
    }

    /// Mutable bytes of the pixel at `coords`.
    ///
    /// # Panics
    ///
    /// Panics if `coords` is out of bounds.
    pub fn pixel_mut(&mut self, coords: [usize; N]) -> &mut [u8] {
        let size = self.size;
        match self.get_mut(coords) {
            Some(px) => px,
            None => panic!("pixel {coords:?} out of bounds (size: {size:?})"),
        }
    }

    /// Set every pixel to `value`. Padding bytes are left untouched.
    ///
    /// # Panics
    ///
    /// Panics if `value.len()` differs from the pixel size.
    pub fn fill(&mut self, value: &[u8]) {
        assert_eq!(
            value.len(),
            self.pixel_size,
            "fill value has {} bytes, pixels have {}",
            value.len(),
            self.pixel_size
        );
        for offset in Offsets::new(self.size, self.strides) {
            self.data[offset..offset + self.pixel_size].copy_from_slice(value);
        }
    }
}

impl<const N: usize> fmt::Debug for PixelViewMut<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PixelViewMut({:?}, strides {:?}, {} bytes/pixel)",
            self.size, self.strides, self.pixel_size
        )
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a view over uncompressed image data laid out per `storage`.
pub(crate) fn strided<'a, const N: usize>(
    storage: &PixelStorage,
    pixel_size: u32,
    size: [u32; N],
    data: &'a [u8],
) -> Result<PixelView<'a, N>, ImageDataError> {
    let props = data_properties(storage, pixel_size, size)?;
    let start = data_start(&props, data.len(), size)?;
    PixelView::new(
        &data[start..],
        size.map(|v| v as usize),
        props.strides,
        pixel_size as usize,
    )
}

/// Mutable counterpart of [`strided`].
pub(crate) fn strided_mut<'a, const N: usize>(
    storage: &PixelStorage,
    pixel_size: u32,
    size: [u32; N],
    data: &'a mut [u8],
) -> Result<PixelViewMut<'a, N>, ImageDataError> {
    let props = data_properties(storage, pixel_size, size)?;
    let start = data_start(&props, data.len(), size)?;
    PixelViewMut::new(
        &mut data[start..],
        size.map(|v| v as usize),
        props.strides,
        pixel_size as usize,
    )
}

/// Where the first pixel starts. Empty images start at zero so that a
/// relinquished buffer still yields a valid, empty view.
fn data_start<const N: usize>(
    props: &DataProperties<N>,
    len: usize,
    size: [u32; N],
) -> Result<usize, ImageDataError> {
    if size.contains(&0) {
        return Ok(0);
    }
    if len < props.size {
        return Err(ImageDataError::DataTooSmall {
            expected: props.size,
            actual: len,
        });
    }
    Ok(props.offset)
}

/// Bytes needed to address every pixel: offset of the last pixel plus its
/// size. Zero for empty views.
fn required_bytes<const N: usize>(
    size: &[usize; N],
    strides: &[usize; N],
    pixel_size: usize,
) -> Result<usize, ImageDataError> {
    if size.contains(&0) {
        return Ok(0);
    }
    let mut last = 0usize;
    for (&s, &stride) in size.iter().zip(strides) {
        last = (s - 1)
            .checked_mul(stride)
            .and_then(|v| v.checked_add(last))
            .ok_or(ImageDataError::SizeOverflow)?;
    }
    last.checked_add(pixel_size).ok_or(ImageDataError::SizeOverflow)
}

#[inline]
fn offset_of<const N: usize>(
    size: &[usize; N],
    strides: &[usize; N],
    coords: [usize; N],
) -> Option<usize> {
    let mut offset = 0;
    for i in 0..N {
        if coords[i] >= size[i] {
            return None;
        }
        offset += coords[i] * strides[i];
    }
    Some(offset)
}

/// Byte offsets of all pixels in a view, first axis fastest.
struct Offsets<const N: usize> {
    size: [usize; N],
    strides: [usize; N],
    index: [usize; N],
    done: bool,
}

impl<const N: usize> Offsets<N> {
    fn new(size: [usize; N], strides: [usize; N]) -> Self {
        Self {
            size,
            strides,
            index: [0; N],
            done: size.contains(&0),
        }
    }
}

impl<const N: usize> Iterator for Offsets<N> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.done {
            return None;
        }
        let offset = self
            .index
            .iter()
            .zip(&self.strides)
            .map(|(i, s)| i * s)
            .sum();

        // Advance like an odometer.
        self.done = true;
        for axis in 0..N {
            self.index[axis] += 1;
            if self.index[axis] < self.size[axis] {
                self.done = false;
                break;
            }
            self.index[axis] = 0;
        }
        Some(offset)
    }
}
