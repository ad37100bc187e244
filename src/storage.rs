//! Pixel storage parameters describing how rows and images are laid out in
//! memory.

/// Layout policy for uncompressed pixel data.
///
/// Defaults to 4-byte row alignment with no extra skip bytes, which matches
/// what most graphics APIs expect for unpacking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelStorage {
    /// Row alignment in bytes. One of 1, 2, 4 or 8.
    pub alignment: u8,
    /// Extra bytes after each (aligned) row.
    pub row_skip: u32,
    /// Extra bytes after each 2D slice. Only affects 3D images.
    pub image_skip: u32,
    /// Leading offset in pixels, rows and slices before the first pixel.
    pub skip: [u32; 3],
}

impl Default for PixelStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelStorage {
    /// Default storage: 4-byte alignment, nothing skipped.
    pub const fn new() -> Self {
        Self {
            alignment: 4,
            row_skip: 0,
            image_skip: 0,
            skip: [0; 3],
        }
    }

    /// Tightly packed rows.
    pub const fn packed() -> Self {
        Self::new().with_alignment(1)
    }

    pub const fn with_alignment(mut self, alignment: u8) -> Self {
        self.alignment = alignment;
        self
    }

    pub const fn with_row_skip(mut self, bytes: u32) -> Self {
        self.row_skip = bytes;
        self
    }

    pub const fn with_image_skip(mut self, bytes: u32) -> Self {
        self.image_skip = bytes;
        self
    }

    /// Skip `x` pixels, `y` rows and `z` slices before the first pixel.
    pub const fn with_skip(mut self, skip: [u32; 3]) -> Self {
        self.skip = skip;
        self
    }

    pub(crate) const fn has_valid_alignment(&self) -> bool {
        matches!(self.alignment, 1 | 2 | 4 | 8)
    }
}

/// Layout parameters for block-compressed data.
///
/// Carried along with the data for consumers; the container itself doesn't
/// interpret any of it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CompressedPixelStorage {
    /// Block dimensions in pixels, zero if unspecified.
    pub block_size: [u32; 3],
    /// Bytes per block, zero if unspecified.
    pub block_data_size: u32,
    /// Leading offset in pixels, rows and slices.
    pub skip: [u32; 3],
}

impl CompressedPixelStorage {
    pub const fn new() -> Self {
        Self {
            block_size: [0; 3],
            block_data_size: 0,
            skip: [0; 3],
        }
    }

    pub const fn with_block_size(mut self, block_size: [u32; 3], block_data_size: u32) -> Self {
        self.block_size = block_size;
        self.block_data_size = block_data_size;
        self
    }

    pub const fn with_skip(mut self, skip: [u32; 3]) -> Self {
        self.skip = skip;
        self
    }
}
