//! Per-layout pixel codecs.
//!
//! Each codec is a zero-sized type with a fixed byte-to-channel mapping.
//! All operations are associated functions, so generic callers are
//! monomorphized and the per-pixel loop carries no layout branch.
//!
//! ## Narrowing
//!
//! Writes do not clamp. [`PixelCodec::write_int`] narrows with `as u8`, which
//! keeps the low byte (`256` becomes `0`, `-1` becomes `255`).
//! [`PixelCodec::write_float`] scales by 255 and narrows with `as u8`, which
//! truncates toward zero and saturates (`1.5` becomes `255`, `-0.5` becomes
//! `0`, NaN becomes `0`). Use the `_clamped` variants when inputs may leave
//! the nominal range.

use crate::color::{CHANNEL_MAX, ColorRec, IntColorRec};
use crate::pixel::{Pixel, PixelLayout};

/// Conversion between one 4-byte pixel and the two color records.
pub trait PixelCodec {
    /// Byte layout this codec reads and writes.
    const LAYOUT: PixelLayout;

    /// Read raw bytes as 0–255 channels, no scaling.
    fn read_int(px: &Pixel) -> IntColorRec;

    /// Read raw bytes as `byte / 255.0` channels.
    fn read_float(px: &Pixel) -> ColorRec;

    /// Store each channel narrowed to a byte (wrapping).
    fn write_int(px: &mut Pixel, color: &IntColorRec);

    /// Store each channel multiplied by 255.0 and narrowed (truncating).
    fn write_float(px: &mut Pixel, color: &ColorRec);

    /// Like [`write_int`](Self::write_int), but clamps channels to `0..=255` first.
    #[inline]
    fn write_int_clamped(px: &mut Pixel, color: &IntColorRec) {
        Self::write_int(px, &color.clamped());
    }

    /// Like [`write_float`](Self::write_float), but clamps channels to `0.0..=1.0` first.
    #[inline]
    fn write_float_clamped(px: &mut Pixel, color: &ColorRec) {
        Self::write_float(px, &color.clamped());
    }
}

#[inline(always)]
fn norm(v: u8) -> f32 {
    v as f32 / CHANNEL_MAX
}

#[inline(always)]
fn narrow(v: f32) -> u8 {
    (v * CHANNEL_MAX) as u8
}

/// A, B, G, R: channels stored in reverse of semantic order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Abgr;

impl PixelCodec for Abgr {
    const LAYOUT: PixelLayout = PixelLayout::Abgr8;

    #[inline]
    fn read_int(px: &Pixel) -> IntColorRec {
        IntColorRec::new(px[3].into(), px[2].into(), px[1].into(), px[0].into())
    }

    #[inline]
    fn read_float(px: &Pixel) -> ColorRec {
        ColorRec::new(norm(px[3]), norm(px[2]), norm(px[1]), norm(px[0]))
    }

    #[inline]
    fn write_int(px: &mut Pixel, c: &IntColorRec) {
        *px = [c.a as u8, c.b as u8, c.g as u8, c.r as u8];
    }

    #[inline]
    fn write_float(px: &mut Pixel, c: &ColorRec) {
        *px = [narrow(c.a), narrow(c.b), narrow(c.g), narrow(c.r)];
    }
}

/// A, R, G, B.
#[derive(Clone, Copy, Debug, Default)]
pub struct Argb;

impl PixelCodec for Argb {
    const LAYOUT: PixelLayout = PixelLayout::Argb8;

    #[inline]
    fn read_int(px: &Pixel) -> IntColorRec {
        IntColorRec::new(px[1].into(), px[2].into(), px[3].into(), px[0].into())
    }

    #[inline]
    fn read_float(px: &Pixel) -> ColorRec {
        ColorRec::new(norm(px[1]), norm(px[2]), norm(px[3]), norm(px[0]))
    }

    #[inline]
    fn write_int(px: &mut Pixel, c: &IntColorRec) {
        *px = [c.a as u8, c.r as u8, c.g as u8, c.b as u8];
    }

    #[inline]
    fn write_float(px: &mut Pixel, c: &ColorRec) {
        *px = [narrow(c.a), narrow(c.r), narrow(c.g), narrow(c.b)];
    }
}

/// R, G, B, A.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rgba;

impl PixelCodec for Rgba {
    const LAYOUT: PixelLayout = PixelLayout::Rgba8;

    #[inline]
    fn read_int(px: &Pixel) -> IntColorRec {
        IntColorRec::new(px[0].into(), px[1].into(), px[2].into(), px[3].into())
    }

    #[inline]
    fn read_float(px: &Pixel) -> ColorRec {
        ColorRec::new(norm(px[0]), norm(px[1]), norm(px[2]), norm(px[3]))
    }

    #[inline]
    fn write_int(px: &mut Pixel, c: &IntColorRec) {
        *px = [c.r as u8, c.g as u8, c.b as u8, c.a as u8];
    }

    #[inline]
    fn write_float(px: &mut Pixel, c: &ColorRec) {
        *px = [narrow(c.r), narrow(c.g), narrow(c.b), narrow(c.a)];
    }
}

/// B, G, R, A. Native order of 32-bit BMP and most Windows surfaces.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bgra;

impl PixelCodec for Bgra {
    const LAYOUT: PixelLayout = PixelLayout::Bgra8;

    #[inline]
    fn read_int(px: &Pixel) -> IntColorRec {
        IntColorRec::new(px[2].into(), px[1].into(), px[0].into(), px[3].into())
    }

    #[inline]
    fn read_float(px: &Pixel) -> ColorRec {
        ColorRec::new(norm(px[2]), norm(px[1]), norm(px[0]), norm(px[3]))
    }

    #[inline]
    fn write_int(px: &mut Pixel, c: &IntColorRec) {
        *px = [c.b as u8, c.g as u8, c.r as u8, c.a as u8];
    }

    #[inline]
    fn write_float(px: &mut Pixel, c: &ColorRec) {
        *px = [narrow(c.b), narrow(c.g), narrow(c.r), narrow(c.a)];
    }
}

/// X, B, G, R. Opaque: the leading byte is padding.
///
/// Reads report alpha 255 / 1.0; writes ignore the record's alpha and store
/// `0xFF` in the padding byte.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xbgr;

impl PixelCodec for Xbgr {
    const LAYOUT: PixelLayout = PixelLayout::Xbgr8;

    #[inline]
    fn read_int(px: &Pixel) -> IntColorRec {
        IntColorRec::new(px[3].into(), px[2].into(), px[1].into(), 255)
    }

    #[inline]
    fn read_float(px: &Pixel) -> ColorRec {
        ColorRec::new(norm(px[3]), norm(px[2]), norm(px[1]), 1.0)
    }

    #[inline]
    fn write_int(px: &mut Pixel, c: &IntColorRec) {
        *px = [0xFF, c.b as u8, c.g as u8, c.r as u8];
    }

    #[inline]
    fn write_float(px: &mut Pixel, c: &ColorRec) {
        *px = [0xFF, narrow(c.b), narrow(c.g), narrow(c.r)];
    }
}

/// R, G, B, X. Opaque: the 4th byte is padding.
///
/// Reads report alpha 255 / 1.0; writes store `0xFF` in the padding byte.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rgbx;

impl PixelCodec for Rgbx {
    const LAYOUT: PixelLayout = PixelLayout::Rgbx8;

    #[inline]
    fn read_int(px: &Pixel) -> IntColorRec {
        IntColorRec::new(px[0].into(), px[1].into(), px[2].into(), 255)
    }

    #[inline]
    fn read_float(px: &Pixel) -> ColorRec {
        ColorRec::new(norm(px[0]), norm(px[1]), norm(px[2]), 1.0)
    }

    #[inline]
    fn write_int(px: &mut Pixel, c: &IntColorRec) {
        *px = [c.r as u8, c.g as u8, c.b as u8, 0xFF];
    }

    #[inline]
    fn write_float(px: &mut Pixel, c: &ColorRec) {
        *px = [narrow(c.r), narrow(c.g), narrow(c.b), 0xFF];
    }
}

/// B, G, R, X. Opaque: the 4th byte is padding.
///
/// Reads report alpha 255 / 1.0; writes store `0xFF` in the padding byte,
/// matching what the BMP encoder emits for opaque 32-bit output.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bgrx;

impl PixelCodec for Bgrx {
    const LAYOUT: PixelLayout = PixelLayout::Bgrx8;

    #[inline]
    fn read_int(px: &Pixel) -> IntColorRec {
        IntColorRec::new(px[2].into(), px[1].into(), px[0].into(), 255)
    }

    #[inline]
    fn read_float(px: &Pixel) -> ColorRec {
        ColorRec::new(norm(px[2]), norm(px[1]), norm(px[0]), 1.0)
    }

    #[inline]
    fn write_int(px: &mut Pixel, c: &IntColorRec) {
        *px = [c.b as u8, c.g as u8, c.r as u8, 0xFF];
    }

    #[inline]
    fn write_float(px: &mut Pixel, c: &ColorRec) {
        *px = [narrow(c.b), narrow(c.g), narrow(c.r), 0xFF];
    }
}

/// Run `$body` with `$codec` bound to the codec type for `$layout`.
///
/// The match happens once, outside whatever loop `$body` contains.
macro_rules! with_codec {
    ($layout:expr, $codec:ident => $body:expr) => {
        match $layout {
            $crate::PixelLayout::Abgr8 => {
                type $codec = $crate::codec::Abgr;
                $body
            }
            $crate::PixelLayout::Argb8 => {
                type $codec = $crate::codec::Argb;
                $body
            }
            $crate::PixelLayout::Rgba8 => {
                type $codec = $crate::codec::Rgba;
                $body
            }
            $crate::PixelLayout::Bgra8 => {
                type $codec = $crate::codec::Bgra;
                $body
            }
            $crate::PixelLayout::Xbgr8 => {
                type $codec = $crate::codec::Xbgr;
                $body
            }
            $crate::PixelLayout::Rgbx8 => {
                type $codec = $crate::codec::Rgbx;
                $body
            }
            $crate::PixelLayout::Bgrx8 => {
                type $codec = $crate::codec::Bgrx;
                $body
            }
        }
    };
}

pub(crate) use with_codec;
