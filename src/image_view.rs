//! Non-owning image views handed to render and upload code.
//!
//! These carry the same metadata as [`ImageData`](crate::ImageData) plus an
//! optional borrowed buffer. A view without data is still useful to
//! consumers that only need size and format, e.g. to allocate a texture.

use core::fmt;

use crate::error::ImageDataError;
use crate::layout::{DataProperties, data_properties};
use crate::pixel::{CompressedPixelFormat, PixelFormat};
use crate::storage::{CompressedPixelStorage, PixelStorage};
use crate::view::{PixelView, PixelViewMut, strided, strided_mut};

/// Uncompressed image metadata shared by [`ImageView`] and [`ImageViewMut`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageDescriptor<const N: usize> {
    pub storage: PixelStorage,
    pub format: PixelFormat,
    pub format_extra: u32,
    pub pixel_size: u32,
    pub size: [u32; N],
}

impl<const N: usize> ImageDescriptor<N> {
    /// Descriptor with the pixel size looked up from `format`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageDataError::UnknownPixelSize`] for implementation-specific
    /// formats.
    pub fn new(
        storage: PixelStorage,
        format: PixelFormat,
        size: [u32; N],
    ) -> Result<Self, ImageDataError> {
        let pixel_size = format
            .pixel_size()
            .ok_or(ImageDataError::UnknownPixelSize(format))?;
        Ok(Self {
            storage,
            format,
            format_extra: 0,
            pixel_size,
            size,
        })
    }

    pub fn data_properties(&self) -> Result<DataProperties<N>, ImageDataError> {
        data_properties(&self.storage, self.pixel_size, self.size)
    }

    /// Validate that `len` bytes are enough for this image.
    pub(crate) fn check_len(&self, len: usize) -> Result<(), ImageDataError> {
        let expected = self.data_properties()?.size;
        if self.size.contains(&0) {
            return Ok(());
        }
        if len < expected {
            return Err(ImageDataError::DataTooSmall {
                expected,
                actual: len,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ImageView / ImageViewMut
// ---------------------------------------------------------------------------

/// Borrowed uncompressed image.
#[derive(Clone, Copy)]
pub struct ImageView<'a, const N: usize> {
    descriptor: ImageDescriptor<N>,
    data: Option<&'a [u8]>,
}

impl<'a, const N: usize> ImageView<'a, N> {
    /// View `data` as an image described by `descriptor`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageDataError::DataTooSmall`] if `data` can't hold the image.
    pub fn new(descriptor: ImageDescriptor<N>, data: &'a [u8]) -> Result<Self, ImageDataError> {
        descriptor.check_len(data.len())?;
        Ok(Self {
            descriptor,
            data: Some(data),
        })
    }

    /// View carrying only metadata.
    pub fn without_data(descriptor: ImageDescriptor<N>) -> Self {
        Self {
            descriptor,
            data: None,
        }
    }

    #[inline]
    pub fn descriptor(&self) -> &ImageDescriptor<N> {
        &self.descriptor
    }

    #[inline]
    pub fn storage(&self) -> PixelStorage {
        self.descriptor.storage
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.descriptor.format
    }

    #[inline]
    pub fn format_extra(&self) -> u32 {
        self.descriptor.format_extra
    }

    #[inline]
    pub fn pixel_size(&self) -> u32 {
        self.descriptor.pixel_size
    }

    #[inline]
    pub fn size(&self) -> [u32; N] {
        self.descriptor.size
    }

    /// Borrowed image data, `None` for metadata-only views.
    #[inline]
    pub fn data(&self) -> Option<&'a [u8]> {
        self.data
    }

    /// Strided pixel view, `None` for metadata-only views.
    pub fn pixels(&self) -> Option<PixelView<'a, N>> {
        let d = &self.descriptor;
        strided(&d.storage, d.pixel_size, d.size, self.data?).ok()
    }
}

impl<const N: usize> fmt::Debug for ImageView<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ImageView({:?}, {:?}, {})",
            self.descriptor.size,
            self.descriptor.format,
            if self.data.is_some() { "with data" } else { "no data" }
        )
    }
}

/// Mutably borrowed uncompressed image.
pub struct ImageViewMut<'a, const N: usize> {
    descriptor: ImageDescriptor<N>,
    data: Option<&'a mut [u8]>,
}

impl<'a, const N: usize> ImageViewMut<'a, N> {
    /// # Errors
    ///
    /// Returns [`ImageDataError::DataTooSmall`] if `data` can't hold the image.
    pub fn new(
        descriptor: ImageDescriptor<N>,
        data: &'a mut [u8],
    ) -> Result<Self, ImageDataError> {
        descriptor.check_len(data.len())?;
        Ok(Self {
            descriptor,
            data: Some(data),
        })
    }

    pub fn without_data(descriptor: ImageDescriptor<N>) -> Self {
        Self {
            descriptor,
            data: None,
        }
    }

    #[inline]
    pub fn descriptor(&self) -> &ImageDescriptor<N> {
        &self.descriptor
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.descriptor.format
    }

    #[inline]
    pub fn size(&self) -> [u32; N] {
        self.descriptor.size
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    pub fn data_mut(&mut self) -> Option<&mut [u8]> {
        self.data.as_deref_mut()
    }

    pub fn pixels(&self) -> Option<PixelView<'_, N>> {
        let d = &self.descriptor;
        strided(&d.storage, d.pixel_size, d.size, self.data.as_deref()?).ok()
    }

    pub fn pixels_mut(&mut self) -> Option<PixelViewMut<'_, N>> {
        let d = &self.descriptor;
        strided_mut(&d.storage, d.pixel_size, d.size, self.data.as_deref_mut()?).ok()
    }

    /// Downgrade to an immutable view.
    pub fn into_view(self) -> ImageView<'a, N> {
        ImageView {
            descriptor: self.descriptor,
            data: self.data.map(|d| &*d),
        }
    }
}

impl<const N: usize> fmt::Debug for ImageViewMut<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ImageViewMut({:?}, {:?}, {})",
            self.descriptor.size,
            self.descriptor.format,
            if self.data.is_some() { "with data" } else { "no data" }
        )
    }
}

// ---------------------------------------------------------------------------
// CompressedImageView / CompressedImageViewMut
// ---------------------------------------------------------------------------

/// Borrowed block-compressed image.
///
/// No size validation happens here; compressed data is passed through as-is.
#[derive(Clone, Copy, Debug)]
pub struct CompressedImageView<'a, const N: usize> {
    storage: CompressedPixelStorage,
    format: CompressedPixelFormat,
    size: [u32; N],
    data: Option<&'a [u8]>,
}

impl<'a, const N: usize> CompressedImageView<'a, N> {
    pub fn new(
        storage: CompressedPixelStorage,
        format: CompressedPixelFormat,
        size: [u32; N],
        data: &'a [u8],
    ) -> Self {
        Self {
            storage,
            format,
            size,
            data: Some(data),
        }
    }

    pub fn without_data(
        storage: CompressedPixelStorage,
        format: CompressedPixelFormat,
        size: [u32; N],
    ) -> Self {
        Self {
            storage,
            format,
            size,
            data: None,
        }
    }

    #[inline]
    pub fn storage(&self) -> CompressedPixelStorage {
        self.storage
    }

    #[inline]
    pub fn format(&self) -> CompressedPixelFormat {
        self.format
    }

    #[inline]
    pub fn size(&self) -> [u32; N] {
        self.size
    }

    #[inline]
    pub fn data(&self) -> Option<&'a [u8]> {
        self.data
    }
}

/// Mutably borrowed block-compressed image.
#[derive(Debug)]
pub struct CompressedImageViewMut<'a, const N: usize> {
    storage: CompressedPixelStorage,
    format: CompressedPixelFormat,
    size: [u32; N],
    data: Option<&'a mut [u8]>,
}

impl<'a, const N: usize> CompressedImageViewMut<'a, N> {
    pub fn new(
        storage: CompressedPixelStorage,
        format: CompressedPixelFormat,
        size: [u32; N],
        data: &'a mut [u8],
    ) -> Self {
        Self {
            storage,
            format,
            size,
            data: Some(data),
        }
    }

    pub fn without_data(
        storage: CompressedPixelStorage,
        format: CompressedPixelFormat,
        size: [u32; N],
    ) -> Self {
        Self {
            storage,
            format,
            size,
            data: None,
        }
    }

    #[inline]
    pub fn storage(&self) -> CompressedPixelStorage {
        self.storage
    }

    #[inline]
    pub fn format(&self) -> CompressedPixelFormat {
        self.format
    }

    #[inline]
    pub fn size(&self) -> [u32; N] {
        self.size
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    pub fn data_mut(&mut self) -> Option<&mut [u8]> {
        self.data.as_deref_mut()
    }

    pub fn into_view(self) -> CompressedImageView<'a, N> {
        CompressedImageView {
            storage: self.storage,
            format: self.format,
            size: self.size,
            data: self.data.map(|d| &*d),
        }
    }
}
