//! Typed 2D access through `imgref`.

use imgref::ImgRef;
use rgb::AsPixels as _;
use rgb::alt::BGRA;
use rgb::{Rgb, Rgba};

use crate::error::{ImageDataError, violation};
use crate::image_data::{ImageData2D, ImageDataKind};
use crate::pixel::PixelFormat;

/// Pixel types that can be borrowed straight out of uncompressed image data.
pub trait TypedPixel: Copy + private::Sealed {
    /// The format whose memory layout matches this type.
    const FORMAT: PixelFormat;
}

mod private {
    pub trait Sealed {}
}

macro_rules! impl_typed_pixel {
    ($ty:ty, $format:expr) => {
        impl private::Sealed for $ty {}
        impl TypedPixel for $ty {
            const FORMAT: PixelFormat = $format;
        }
    };
}

impl_typed_pixel!(Rgb<u8>, PixelFormat::RGB8Unorm);
impl_typed_pixel!(Rgba<u8>, PixelFormat::RGBA8Unorm);
impl_typed_pixel!(BGRA<u8>, PixelFormat::BGRA8Unorm);

impl ImageData2D {
    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    ///
    /// Row padding is expressed through the `ImgRef` stride, which requires
    /// the row stride and the leading offset to be whole multiples of the
    /// pixel size.
    ///
    /// # Errors
    ///
    /// - [`ImageDataError::WrongVariant`] for compressed data
    /// - [`ImageDataError::FormatMismatch`] if the format doesn't match `P`
    /// - [`ImageDataError::PixelSizeMismatch`] if the stored pixel size isn't
    ///   the size of `P`
    /// - [`ImageDataError::UnalignedStride`] if rows can't be expressed in
    ///   whole pixels
    /// - [`ImageDataError::EmptyImage`] if the image has no pixels
    pub fn as_imgref<P: TypedPixel>(&self) -> Result<ImgRef<'_, P>, ImageDataError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let format = match *self.kind() {
            ImageDataKind::Uncompressed { format, .. } => format,
            ImageDataKind::Compressed { .. } => {
                return Err(violation(ImageDataError::wrong_variant("as_imgref", true)));
            }
        };
        if !format.is_memory_compatible(P::FORMAT) {
            return Err(ImageDataError::FormatMismatch {
                expected: P::FORMAT,
                actual: format,
            });
        }

        let [width, height] = self.size().map(|v| v as usize);
        if width == 0 || height == 0 {
            return Err(ImageDataError::EmptyImage);
        }

        let props = self.data_properties()?;
        let pixel_size = props.pixel_stride();
        if pixel_size != core::mem::size_of::<P>() {
            return Err(ImageDataError::PixelSizeMismatch {
                expected: core::mem::size_of::<P>(),
                actual: pixel_size,
            });
        }
        for stride in [props.row_stride(), props.offset] {
            if stride % pixel_size != 0 {
                return Err(ImageDataError::UnalignedStride { stride, pixel_size });
            }
        }

        let pixels: &[P] = self.data()[props.offset..].as_pixels();
        Ok(ImgRef::new_stride(
            pixels,
            width,
            height,
            props.row_stride() / pixel_size,
        ))
    }
}

#[cfg(all(test, not(feature = "fast-fail")))]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::pixel::CompressedPixelFormat;
    use crate::storage::{CompressedPixelStorage, PixelStorage};

    #[test]
    fn packed_rgba() {
        let data: Vec<u8> = (0..16).collect();
        let image = ImageData2D::from_format(
            PixelStorage::new(),
            PixelFormat::RGBA8Srgb,
            [2, 2],
            data,
            None,
        )
        .unwrap();
        let img = image.as_imgref::<Rgba<u8>>().unwrap();
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 2);
        assert_eq!(img.stride(), 2);
        assert_eq!(img[(1usize, 1usize)], Rgba::new(12, 13, 14, 15));
    }

    #[test]
    fn padded_rows_become_stride() {
        // 1x2 RGB8 with 4-byte alignment: 3 bytes + 1 padding per row, which
        // isn't a whole pixel.
        let image = ImageData2D::from_format(
            PixelStorage::new(),
            PixelFormat::RGB8Unorm,
            [1, 2],
            vec![0; 8],
            None,
        )
        .unwrap();
        assert_eq!(
            image.as_imgref::<Rgb<u8>>().unwrap_err(),
            ImageDataError::UnalignedStride {
                stride: 4,
                pixel_size: 3
            }
        );

        // Skipping a whole pixel per row works.
        let image = ImageData2D::from_format(
            PixelStorage::packed().with_row_skip(3),
            PixelFormat::RGB8Unorm,
            [1, 2],
            vec![1, 2, 3, 0, 0, 0, 4, 5, 6, 0, 0, 0],
            None,
        )
        .unwrap();
        let img = image.as_imgref::<Rgb<u8>>().unwrap();
        assert_eq!(img.stride(), 2);
        assert_eq!(img[(0usize, 1usize)], Rgb::new(4, 5, 6));
    }

    #[test]
    fn format_and_variant_mismatch() {
        let image = ImageData2D::from_format(
            PixelStorage::new(),
            PixelFormat::RGBA8Unorm,
            [1, 1],
            vec![0; 4],
            None,
        )
        .unwrap();
        assert_eq!(
            image.as_imgref::<BGRA<u8>>().unwrap_err(),
            ImageDataError::FormatMismatch {
                expected: PixelFormat::BGRA8Unorm,
                actual: PixelFormat::RGBA8Unorm
            }
        );

        let compressed = ImageData2D::compressed(
            CompressedPixelStorage::new(),
            CompressedPixelFormat::Bc1RGBAUnorm,
            [4, 4],
            vec![0; 8],
            None,
        );
        assert!(matches!(
            compressed.as_imgref::<Rgba<u8>>(),
            Err(ImageDataError::WrongVariant { .. })
        ));
    }

    #[test]
    fn explicit_pixel_size_must_match_type() {
        // RGBA8 format with an explicit 3-byte pixel size.
        let image = ImageData2D::new(
            PixelStorage::packed(),
            PixelFormat::RGBA8Unorm,
            0,
            3,
            [4, 1],
            vec![7; 12],
            None,
        )
        .unwrap();
        assert_eq!(
            image.as_imgref::<Rgba<u8>>().unwrap_err(),
            ImageDataError::PixelSizeMismatch {
                expected: 4,
                actual: 3
            }
        );

        // Oversized pixels are rejected too, even when the stride divides.
        let image = ImageData2D::new(
            PixelStorage::packed(),
            PixelFormat::RGB8Unorm,
            0,
            6,
            [2, 1],
            vec![0; 12],
            None,
        )
        .unwrap();
        assert!(matches!(
            image.as_imgref::<Rgb<u8>>(),
            Err(ImageDataError::PixelSizeMismatch {
                expected: 3,
                actual: 6
            })
        ));
    }
}
