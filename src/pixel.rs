/// Storage for one pixel: exactly four bytes.
///
/// Codecs take `&Pixel` / `&mut Pixel`, so a too-short or out-of-bounds span
/// cannot reach them.
pub type Pixel = [u8; 4];

/// Bytes per pixel for every supported layout.
pub const BYTES_PER_PIXEL: usize = 4;

/// Semantic role of one storage byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
    /// Padding byte; written as `0xFF`, read as opaque alpha.
    Padding,
}

/// Pixel memory layout, named by storage order from byte offset 0 to 3.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// 4 channels, 8-bit ABGR (channels reversed relative to RGBA).
    Abgr8,
    /// 4 channels, 8-bit ARGB.
    Argb8,
    /// 4 channels, 8-bit RGBA.
    Rgba8,
    /// 4 channels, 8-bit BGRA (32-bit BMP native order).
    Bgra8,
    /// 4 channels, 8-bit XBGR (opaque; first byte is padding, not alpha).
    Xbgr8,
    /// 4 channels, 8-bit RGBX (opaque; 4th byte is padding, not alpha).
    Rgbx8,
    /// 4 channels, 8-bit BGRX (opaque; 4th byte is padding, not alpha).
    Bgrx8,
}

impl PixelLayout {
    /// Every supported layout.
    pub const ALL: [PixelLayout; 7] = [
        Self::Abgr8,
        Self::Argb8,
        Self::Rgba8,
        Self::Bgra8,
        Self::Xbgr8,
        Self::Rgbx8,
        Self::Bgrx8,
    ];

    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        BYTES_PER_PIXEL
    }

    /// Whether the fourth channel carries alpha rather than padding.
    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::Abgr8 | Self::Argb8 | Self::Rgba8 | Self::Bgra8)
    }

    /// Channel stored at each byte offset.
    pub fn channels(&self) -> [Channel; 4] {
        use Channel::*;
        match self {
            Self::Abgr8 => [Alpha, Blue, Green, Red],
            Self::Argb8 => [Alpha, Red, Green, Blue],
            Self::Rgba8 => [Red, Green, Blue, Alpha],
            Self::Bgra8 => [Blue, Green, Red, Alpha],
            Self::Xbgr8 => [Padding, Blue, Green, Red],
            Self::Rgbx8 => [Red, Green, Blue, Padding],
            Self::Bgrx8 => [Blue, Green, Red, Padding],
        }
    }

    /// Byte offset of `channel`, or `None` if the layout does not store it.
    pub fn offset_of(&self, channel: Channel) -> Option<usize> {
        self.channels().iter().position(|&c| c == channel)
    }

    /// Whether this layout has the same memory representation as `other`.
    ///
    /// For example, `Bgra8` and `Bgrx8` are compatible (same 4-byte B,G,R,X/A layout).
    pub fn is_memory_compatible(&self, other: PixelLayout) -> bool {
        if *self == other {
            return true;
        }
        matches!(
            (*self, other),
            (Self::Bgra8, Self::Bgrx8)
                | (Self::Bgrx8, Self::Bgra8)
                | (Self::Rgba8, Self::Rgbx8)
                | (Self::Rgbx8, Self::Rgba8)
                | (Self::Abgr8, Self::Xbgr8)
                | (Self::Xbgr8, Self::Abgr8)
        )
    }
}
