/// Uncompressed pixel format.
///
/// [`PixelFormat::Implementation`] carries formats this crate doesn't know
/// about, for example API-specific enum values passed through by an importer.
/// Such formats have no entry in the size table, so their pixel size has to
/// be supplied by whoever creates the image.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Single channel, 8-bit normalized unsigned.
    R8Unorm,
    /// Two channels, 8-bit normalized unsigned.
    RG8Unorm,
    /// 3 channels, 8-bit RGB.
    RGB8Unorm,
    /// 4 channels, 8-bit RGBA.
    RGBA8Unorm,
    /// 3 channels, 8-bit sRGB-encoded RGB.
    RGB8Srgb,
    /// 4 channels, 8-bit sRGB-encoded RGBA.
    RGBA8Srgb,
    /// 4 channels, 8-bit BGRA.
    BGRA8Unorm,
    /// Single channel, 16-bit normalized unsigned (native endian).
    R16Unorm,
    /// 3 channels, 16-bit RGB (native endian).
    RGB16Unorm,
    /// 4 channels, 16-bit RGBA (native endian).
    RGBA16Unorm,
    /// Single channel, 16-bit float.
    R16F,
    /// 4 channels, 16-bit float.
    RGBA16F,
    /// Single channel, 32-bit unsigned integer.
    R32UI,
    /// Single channel, 32-bit float.
    R32F,
    /// Two channels, 32-bit float.
    RG32F,
    /// 3 channels, 32-bit float.
    RGB32F,
    /// 4 channels, 32-bit float.
    RGBA32F,
    /// Implementation-specific format, stored as-is.
    Implementation(u32),
}

impl PixelFormat {
    /// Wrap an implementation-specific format value.
    pub const fn wrap(raw: u32) -> Self {
        Self::Implementation(raw)
    }

    /// The wrapped value if this is an implementation-specific format.
    pub const fn unwrap_implementation(self) -> Option<u32> {
        match self {
            Self::Implementation(raw) => Some(raw),
            _ => None,
        }
    }

    /// Whether this format is implementation-specific.
    pub const fn is_implementation_specific(self) -> bool {
        matches!(self, Self::Implementation(_))
    }

    /// Bytes per pixel, `None` for implementation-specific formats.
    pub const fn pixel_size(self) -> Option<u32> {
        Some(match self {
            Self::R8Unorm => 1,
            Self::RG8Unorm | Self::R16Unorm | Self::R16F => 2,
            Self::RGB8Unorm | Self::RGB8Srgb => 3,
            Self::RGBA8Unorm | Self::RGBA8Srgb | Self::BGRA8Unorm => 4,
            Self::R32UI | Self::R32F => 4,
            Self::RGB16Unorm => 6,
            Self::RGBA16Unorm | Self::RGBA16F | Self::RG32F => 8,
            Self::RGB32F => 12,
            Self::RGBA32F => 16,
            Self::Implementation(_) => return None,
        })
    }

    /// Number of channels, `None` for implementation-specific formats.
    pub const fn channels(self) -> Option<u32> {
        Some(match self {
            Self::R8Unorm | Self::R16Unorm | Self::R16F | Self::R32UI | Self::R32F => 1,
            Self::RG8Unorm | Self::RG32F => 2,
            Self::RGB8Unorm | Self::RGB8Srgb | Self::RGB16Unorm | Self::RGB32F => 3,
            Self::RGBA8Unorm
            | Self::RGBA8Srgb
            | Self::BGRA8Unorm
            | Self::RGBA16Unorm
            | Self::RGBA16F
            | Self::RGBA32F => 4,
            Self::Implementation(_) => return None,
        })
    }

    /// Whether this format has the same memory representation as `other`.
    ///
    /// Formats that differ only in how the values are interpreted, such as
    /// `RGBA8Unorm` and `RGBA8Srgb`, are compatible.
    pub fn is_memory_compatible(&self, other: PixelFormat) -> bool {
        if *self == other {
            return true;
        }
        matches!(
            (*self, other),
            (Self::RGB8Unorm, Self::RGB8Srgb)
                | (Self::RGB8Srgb, Self::RGB8Unorm)
                | (Self::RGBA8Unorm, Self::RGBA8Srgb)
                | (Self::RGBA8Srgb, Self::RGBA8Unorm)
        )
    }
}

/// Block-compressed pixel format.
///
/// Compressed data has no per-pixel structure; it is addressed in blocks of
/// [`block_size()`](Self::block_size) pixels, each taking
/// [`block_data_size()`](Self::block_data_size) bytes.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompressedPixelFormat {
    /// S3TC BC1 (DXT1), RGBA with 1-bit alpha.
    Bc1RGBAUnorm,
    /// S3TC BC2 (DXT3), RGBA with explicit alpha.
    Bc2RGBAUnorm,
    /// S3TC BC3 (DXT5), RGBA with interpolated alpha.
    Bc3RGBAUnorm,
    /// RGTC BC4, single channel.
    Bc4RUnorm,
    /// RGTC BC5, two channels.
    Bc5RGUnorm,
    /// BPTC BC6H, unsigned float RGB.
    Bc6hRGBUfloat,
    /// BPTC BC7, RGBA.
    Bc7RGBAUnorm,
    /// ETC2 RGB.
    Etc2RGB8Unorm,
    /// ETC2 RGBA with EAC alpha.
    Etc2RGBA8Unorm,
    /// ASTC with 4x4 blocks.
    Astc4x4RGBAUnorm,
    /// ASTC with 8x8 blocks.
    Astc8x8RGBAUnorm,
    /// Implementation-specific format, stored as-is.
    Implementation(u32),
}

impl CompressedPixelFormat {
    /// Wrap an implementation-specific format value.
    pub const fn wrap(raw: u32) -> Self {
        Self::Implementation(raw)
    }

    /// The wrapped value if this is an implementation-specific format.
    pub const fn unwrap_implementation(self) -> Option<u32> {
        match self {
            Self::Implementation(raw) => Some(raw),
            _ => None,
        }
    }

    /// Whether this format is implementation-specific.
    pub const fn is_implementation_specific(self) -> bool {
        matches!(self, Self::Implementation(_))
    }

    /// Block dimensions in pixels, `None` for implementation-specific formats.
    pub const fn block_size(self) -> Option<[u32; 3]> {
        Some(match self {
            Self::Astc8x8RGBAUnorm => [8, 8, 1],
            Self::Implementation(_) => return None,
            _ => [4, 4, 1],
        })
    }

    /// Bytes per block, `None` for implementation-specific formats.
    pub const fn block_data_size(self) -> Option<u32> {
        Some(match self {
            Self::Bc1RGBAUnorm | Self::Bc4RUnorm | Self::Etc2RGB8Unorm => 8,
            Self::Implementation(_) => return None,
            _ => 16,
        })
    }
}
