//! Owned decoded image data, as produced by importers.

use alloc::vec::Vec;
use core::fmt;

use crate::error::{ImageDataError, violation};
use crate::image_view::{
    CompressedImageView, CompressedImageViewMut, ImageDescriptor, ImageView, ImageViewMut,
};
use crate::importer::ImporterHandle;
use crate::layout::{DataProperties, data_properties};
use crate::pixel::{CompressedPixelFormat, PixelFormat};
use crate::storage::{CompressedPixelStorage, PixelStorage};
use crate::view::{PixelView, PixelViewMut, strided, strided_mut};

/// What kind of data an [`ImageData`] holds, with the parameters that only
/// make sense for that kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageDataKind {
    /// Per-pixel data addressed through a [`PixelStorage`] layout.
    Uncompressed {
        storage: PixelStorage,
        format: PixelFormat,
        /// Additional format qualifier, e.g. a GL type paired with an
        /// implementation-specific format. Zero if unused.
        format_extra: u32,
        pixel_size: u32,
    },
    /// Block-compressed data. Has no per-pixel structure.
    Compressed {
        storage: CompressedPixelStorage,
        format: CompressedPixelFormat,
    },
}

impl ImageDataKind {
    #[inline]
    pub fn is_compressed(&self) -> bool {
        matches!(self, ImageDataKind::Compressed { .. })
    }
}

/// Image data owned by the import pipeline.
///
/// Holds either uncompressed or block-compressed data for a 1D, 2D or 3D
/// image together with an optional handle of the importer that produced it.
///
/// Uncompressed data is validated against its layout on construction, so
/// [`pixels()`](Self::pixels) and the view conversions never see an
/// undersized buffer. Compressed data is accepted at any length.
///
/// Variant-specific accessors return [`ImageDataError::WrongVariant`] when
/// called on the other kind of data; with the `fast-fail` feature they panic
/// instead.
pub struct ImageData<const N: usize> {
    kind: ImageDataKind,
    size: [u32; N],
    data: Vec<u8>,
    importer: Option<ImporterHandle>,
}

/// One-dimensional image data.
pub type ImageData1D = ImageData<1>;
/// Two-dimensional image data.
pub type ImageData2D = ImageData<2>;
/// Three-dimensional image data.
pub type ImageData3D = ImageData<3>;

impl<const N: usize> ImageData<N> {
    // Construction -----------------------------------------------------------

    /// Uncompressed image data with an explicit pixel size.
    ///
    /// `data` is taken over without copying.
    ///
    /// # Errors
    ///
    /// Returns [`ImageDataError::DataTooSmall`] if `data` is shorter than the
    /// layout requires, [`ImageDataError::InvalidPixelSize`] for a zero pixel
    /// size and [`ImageDataError::InvalidAlignment`] for an unsupported row
    /// alignment.
    pub fn new(
        storage: PixelStorage,
        format: PixelFormat,
        format_extra: u32,
        pixel_size: u32,
        size: [u32; N],
        data: Vec<u8>,
        importer: Option<ImporterHandle>,
    ) -> Result<Self, ImageDataError> {
        const { assert!(N >= 1 && N <= 3, "images have one to three dimensions") };

        let descriptor = ImageDescriptor {
            storage,
            format,
            format_extra,
            pixel_size,
            size,
        };
        descriptor.check_len(data.len()).map_err(violation)?;

        log::trace!(
            "uncompressed {format:?} image {size:?}, {} bytes",
            data.len()
        );
        Ok(Self {
            kind: ImageDataKind::Uncompressed {
                storage,
                format,
                format_extra,
                pixel_size,
            },
            size,
            data,
            importer,
        })
    }

    /// Uncompressed image data with the pixel size looked up from `format`.
    ///
    /// # Errors
    ///
    /// Same as [`new()`](Self::new), plus [`ImageDataError::UnknownPixelSize`]
    /// for implementation-specific formats.
    pub fn from_format(
        storage: PixelStorage,
        format: PixelFormat,
        size: [u32; N],
        data: Vec<u8>,
        importer: Option<ImporterHandle>,
    ) -> Result<Self, ImageDataError> {
        let pixel_size = lookup_pixel_size(format)?;
        Self::new(storage, format, 0, pixel_size, size, data, importer)
    }

    /// Uncompressed image data in a format given as a raw integer.
    ///
    /// The value is wrapped into [`PixelFormat::Implementation`]. Since such
    /// formats aren't in the size table, `pixel_size` needs to be supplied for
    /// construction to succeed.
    pub fn from_raw_format(
        storage: PixelStorage,
        format: u32,
        format_extra: u32,
        pixel_size: Option<u32>,
        size: [u32; N],
        data: Vec<u8>,
        importer: Option<ImporterHandle>,
    ) -> Result<Self, ImageDataError> {
        let format = PixelFormat::wrap(format);
        let pixel_size = match pixel_size {
            Some(pixel_size) => pixel_size,
            None => lookup_pixel_size(format)?,
        };
        Self::new(storage, format, format_extra, pixel_size, size, data, importer)
    }

    /// Block-compressed image data. The buffer length isn't checked.
    pub fn compressed(
        storage: CompressedPixelStorage,
        format: CompressedPixelFormat,
        size: [u32; N],
        data: Vec<u8>,
        importer: Option<ImporterHandle>,
    ) -> Self {
        const { assert!(N >= 1 && N <= 3, "images have one to three dimensions") };

        log::trace!(
            "compressed {format:?} image {size:?}, {} bytes",
            data.len()
        );
        Self {
            kind: ImageDataKind::Compressed { storage, format },
            size,
            data,
            importer,
        }
    }

    /// Block-compressed image data in a format given as a raw integer.
    pub fn compressed_from_raw(
        storage: CompressedPixelStorage,
        format: u32,
        size: [u32; N],
        data: Vec<u8>,
        importer: Option<ImporterHandle>,
    ) -> Self {
        Self::compressed(
            storage,
            CompressedPixelFormat::wrap(format),
            size,
            data,
            importer,
        )
    }

    // Ownership transfer -----------------------------------------------------

    /// Move the image out, leaving an empty husk behind.
    ///
    /// The husk keeps its kind, format and importer handle but has a zero
    /// size and an empty buffer. It can be dropped or assigned over.
    pub fn take(&mut self) -> Self {
        let husk = Self {
            kind: self.kind,
            size: [0; N],
            data: Vec::new(),
            importer: self.importer,
        };
        core::mem::replace(self, husk)
    }

    /// Like [`take()`](Self::take), but the returned image refers to a
    /// different importer.
    pub fn take_with_importer(&mut self, importer: Option<ImporterHandle>) -> Self {
        self.take().with_importer(importer)
    }

    /// Re-parent the image to a different importer.
    pub fn with_importer(mut self, importer: Option<ImporterHandle>) -> Self {
        self.importer = importer;
        self
    }

    /// Exchange the complete contents of two images, whatever kind each holds.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    /// Replace this image with `other`, returning the previous contents.
    pub fn assign(&mut self, other: Self) -> Self {
        core::mem::replace(self, other)
    }

    /// Give up the buffer.
    ///
    /// Returns the data exactly as stored. The image is left with a zero
    /// size; kind and format stay as they were.
    pub fn release(&mut self) -> Vec<u8> {
        log::trace!("releasing {} bytes of {:?} image", self.data.len(), self.size);
        self.size = [0; N];
        core::mem::take(&mut self.data)
    }

    /// Consume the image and return its buffer.
    pub fn into_data(mut self) -> Vec<u8> {
        self.release()
    }

    // Accessors --------------------------------------------------------------

    #[inline]
    pub fn is_compressed(&self) -> bool {
        self.kind.is_compressed()
    }

    /// Kind of data along with its parameters.
    #[inline]
    pub fn kind(&self) -> &ImageDataKind {
        &self.kind
    }

    /// Image size. All zeros once the data has been taken or released.
    #[inline]
    pub fn size(&self) -> [u32; N] {
        self.size
    }

    /// Raw image data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw image data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Handle of the importer that produced the image, if any.
    #[inline]
    pub fn importer(&self) -> Option<ImporterHandle> {
        self.importer
    }

    /// Storage of uncompressed data.
    pub fn storage(&self) -> Result<PixelStorage, ImageDataError> {
        match self.kind {
            ImageDataKind::Uncompressed { storage, .. } => Ok(storage),
            ImageDataKind::Compressed { .. } => Err(compressed_error("storage")),
        }
    }

    /// Format of uncompressed data.
    pub fn format(&self) -> Result<PixelFormat, ImageDataError> {
        match self.kind {
            ImageDataKind::Uncompressed { format, .. } => Ok(format),
            ImageDataKind::Compressed { .. } => Err(compressed_error("format")),
        }
    }

    /// Additional format qualifier of uncompressed data.
    pub fn format_extra(&self) -> Result<u32, ImageDataError> {
        match self.kind {
            ImageDataKind::Uncompressed { format_extra, .. } => Ok(format_extra),
            ImageDataKind::Compressed { .. } => Err(compressed_error("format_extra")),
        }
    }

    /// Pixel size of uncompressed data, in bytes.
    pub fn pixel_size(&self) -> Result<u32, ImageDataError> {
        match self.kind {
            ImageDataKind::Uncompressed { pixel_size, .. } => Ok(pixel_size),
            ImageDataKind::Compressed { .. } => Err(compressed_error("pixel_size")),
        }
    }

    /// Storage of compressed data.
    pub fn compressed_storage(&self) -> Result<CompressedPixelStorage, ImageDataError> {
        match self.kind {
            ImageDataKind::Compressed { storage, .. } => Ok(storage),
            ImageDataKind::Uncompressed { .. } => {
                Err(uncompressed_error("compressed_storage"))
            }
        }
    }

    /// Format of compressed data.
    pub fn compressed_format(&self) -> Result<CompressedPixelFormat, ImageDataError> {
        match self.kind {
            ImageDataKind::Compressed { format, .. } => Ok(format),
            ImageDataKind::Uncompressed { .. } => Err(uncompressed_error("compressed_format")),
        }
    }

    // Views ------------------------------------------------------------------

    /// Offset, strides and minimum size of uncompressed data.
    pub fn data_properties(&self) -> Result<DataProperties<N>, ImageDataError> {
        let descriptor = self.descriptor("data_properties")?;
        data_properties(&descriptor.storage, descriptor.pixel_size, self.size)
    }

    /// Strided view of uncompressed pixels.
    pub fn pixels(&self) -> Result<PixelView<'_, N>, ImageDataError> {
        let d = self.descriptor("pixels")?;
        strided(&d.storage, d.pixel_size, d.size, &self.data)
    }

    /// Mutable strided view of uncompressed pixels.
    pub fn pixels_mut(&mut self) -> Result<PixelViewMut<'_, N>, ImageDataError> {
        let d = self.descriptor("pixels_mut")?;
        strided_mut(&d.storage, d.pixel_size, d.size, &mut self.data)
    }

    /// Borrow uncompressed data as an [`ImageView`].
    pub fn image_view(&self) -> Result<ImageView<'_, N>, ImageDataError> {
        let descriptor = self.descriptor("image_view")?;
        ImageView::new(descriptor, &self.data)
    }

    /// Mutably borrow uncompressed data as an [`ImageViewMut`].
    pub fn image_view_mut(&mut self) -> Result<ImageViewMut<'_, N>, ImageDataError> {
        let descriptor = self.descriptor("image_view_mut")?;
        ImageViewMut::new(descriptor, &mut self.data)
    }

    /// Borrow compressed data as a [`CompressedImageView`].
    pub fn compressed_image_view(&self) -> Result<CompressedImageView<'_, N>, ImageDataError> {
        match self.kind {
            ImageDataKind::Compressed { storage, format } => Ok(CompressedImageView::new(
                storage, format, self.size, &self.data,
            )),
            ImageDataKind::Uncompressed { .. } => {
                Err(uncompressed_error("compressed_image_view"))
            }
        }
    }

    /// Mutably borrow compressed data as a [`CompressedImageViewMut`].
    pub fn compressed_image_view_mut(
        &mut self,
    ) -> Result<CompressedImageViewMut<'_, N>, ImageDataError> {
        match self.kind {
            ImageDataKind::Compressed { storage, format } => Ok(CompressedImageViewMut::new(
                storage,
                format,
                self.size,
                &mut self.data,
            )),
            ImageDataKind::Uncompressed { .. } => {
                Err(uncompressed_error("compressed_image_view_mut"))
            }
        }
    }

    // Helpers ----------------------------------------------------------------

    fn descriptor(&self, operation: &'static str) -> Result<ImageDescriptor<N>, ImageDataError> {
        match self.kind {
            ImageDataKind::Uncompressed {
                storage,
                format,
                format_extra,
                pixel_size,
            } => Ok(ImageDescriptor {
                storage,
                format,
                format_extra,
                pixel_size,
                size: self.size,
            }),
            ImageDataKind::Compressed { .. } => Err(compressed_error(operation)),
        }
    }
}

#[track_caller]
fn compressed_error(operation: &'static str) -> ImageDataError {
    violation(ImageDataError::wrong_variant(operation, true))
}

#[track_caller]
fn uncompressed_error(operation: &'static str) -> ImageDataError {
    violation(ImageDataError::wrong_variant(operation, false))
}

fn lookup_pixel_size(format: PixelFormat) -> Result<u32, ImageDataError> {
    format
        .pixel_size()
        .ok_or_else(|| violation(ImageDataError::UnknownPixelSize(format)))
}

impl<const N: usize> fmt::Debug for ImageData<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ImageDataKind::Uncompressed { format, .. } => write!(
                f,
                "ImageData({:?}, {format:?}, {} bytes)",
                self.size,
                self.data.len()
            ),
            ImageDataKind::Compressed { format, .. } => write!(
                f,
                "ImageData({:?}, compressed {format:?}, {} bytes)",
                self.size,
                self.data.len()
            ),
        }
    }
}

impl<'a, const N: usize> TryFrom<&'a ImageData<N>> for ImageView<'a, N> {
    type Error = ImageDataError;

    fn try_from(image: &'a ImageData<N>) -> Result<Self, Self::Error> {
        image.image_view()
    }
}

impl<'a, const N: usize> TryFrom<&'a mut ImageData<N>> for ImageViewMut<'a, N> {
    type Error = ImageDataError;

    fn try_from(image: &'a mut ImageData<N>) -> Result<Self, Self::Error> {
        image.image_view_mut()
    }
}

impl<'a, const N: usize> TryFrom<&'a ImageData<N>> for CompressedImageView<'a, N> {
    type Error = ImageDataError;

    fn try_from(image: &'a ImageData<N>) -> Result<Self, Self::Error> {
        image.compressed_image_view()
    }
}

impl<'a, const N: usize> TryFrom<&'a mut ImageData<N>> for CompressedImageViewMut<'a, N> {
    type Error = ImageDataError;

    fn try_from(image: &'a mut ImageData<N>) -> Result<Self, Self::Error> {
        image.compressed_image_view_mut()
    }
}
