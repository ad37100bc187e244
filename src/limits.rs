use crate::error::ImageDataError;
use crate::image_data::ImageData;

/// Resource limits importers apply to the images they produce.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    pub max_depth: Option<u64>,
    /// Maximum pixel count (width * height * depth).
    pub max_pixels: Option<u64>,
    /// Maximum size of the image buffer in bytes.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check an image against the limits. Axes the image doesn't have count
    /// as 1.
    pub fn check_image<const N: usize>(&self, image: &ImageData<N>) -> Result<(), ImageDataError> {
        let size = image.size();
        let axis = |i: usize| size.get(i).map_or(1, |&v| u64::from(v));
        self.check(axis(0), axis(1), axis(2))?;
        self.check_memory(image.data().len())
    }

    /// Check dimensions against limits. Returns Ok(()) or LimitExceeded error.
    pub fn check(&self, width: u64, height: u64, depth: u64) -> Result<(), ImageDataError> {
        if let Some(max_w) = self.max_width {
            if width > max_w {
                return Err(ImageDataError::LimitExceeded(alloc::format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if height > max_h {
                return Err(ImageDataError::LimitExceeded(alloc::format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_d) = self.max_depth {
            if depth > max_d {
                return Err(ImageDataError::LimitExceeded(alloc::format!(
                    "depth {depth} exceeds limit {max_d}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = width.saturating_mul(height).saturating_mul(depth);
            if pixels > max_px {
                return Err(ImageDataError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check that a buffer size is within memory limits.
    pub fn check_memory(&self, bytes: usize) -> Result<(), ImageDataError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes as u64 > max_mem {
                return Err(ImageDataError::LimitExceeded(alloc::format!(
                    "buffer of {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::pixel::PixelFormat;
    use crate::storage::PixelStorage;

    fn gray_3d() -> ImageData<3> {
        ImageData::from_format(
            PixelStorage::packed(),
            PixelFormat::R8Unorm,
            [4, 3, 2],
            vec![0; 24],
            None,
        )
        .unwrap()
    }

    #[test]
    fn unlimited_by_default() {
        assert!(Limits::default().check_image(&gray_3d()).is_ok());
    }

    #[test]
    fn depth_and_pixel_limits() {
        let limits = Limits {
            max_depth: Some(1),
            ..Default::default()
        };
        match limits.check_image(&gray_3d()) {
            Err(ImageDataError::LimitExceeded(msg)) => assert!(msg.contains("depth")),
            other => panic!("expected LimitExceeded, got {other:?}"),
        }

        let limits = Limits {
            max_pixels: Some(23),
            ..Default::default()
        };
        assert!(limits.check_image(&gray_3d()).is_err());
    }

    #[test]
    fn memory_limit() {
        let limits = Limits {
            max_memory_bytes: Some(16),
            ..Default::default()
        };
        assert!(limits.check_image(&gray_3d()).is_err());
        assert!(limits.check_memory(16).is_ok());
    }
}
