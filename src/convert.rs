//! Whole-surface conversions built on the pixel codecs.
//!
//! The generic functions are monomorphized per codec, so their inner loops
//! carry no layout branch. The `_as` variants take [`PixelLayout`] tags,
//! match once, and call into the generic versions.

use alloc::vec::Vec;
use enough::Stop;

use crate::codec::{PixelCodec, with_codec};
use crate::color::ColorRec;
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::{Pixel, PixelLayout};
use crate::surface::{Surface, SurfaceMut};

/// How float channels outside `0.0..=1.0` are narrowed on write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Narrowing {
    /// Scale and cast: truncates toward zero, saturates out of range.
    #[default]
    Truncate,
    /// Clamp to `0.0..=1.0` first.
    Clamp,
}

/// Owned buffer of normalized colors, row-major, no padding.
///
/// `pixels.len() == width * height` holds for the buffer's whole life.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorBuffer {
    pixels: Vec<ColorRec>,
    width: u32,
    height: u32,
}

impl ColorBuffer {
    /// Wrap `pixels`; the length must be exactly `width * height`.
    pub fn from_pixels(
        pixels: Vec<ColorRec>,
        width: u32,
        height: u32,
    ) -> Result<Self, BitmapError> {
        let needed = pixel_count(width, height)?;
        if pixels.len() != needed {
            return Err(BitmapError::BufferTooSmall {
                needed,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[ColorRec] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [ColorRec] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<ColorRec> {
        self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<&ColorRec> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize)
    }

    /// Rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[ColorRec]> + '_ {
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, ColorRec> {
        imgref::ImgRef::new(&self.pixels, self.width as usize, self.height as usize)
    }
}

fn pixel_count(width: u32, height: u32) -> Result<usize, BitmapError> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })
}

fn check_same_size(src: (u32, u32), dst: (u32, u32)) -> Result<(), BitmapError> {
    if src != dst {
        return Err(BitmapError::DimensionsMismatch {
            expected: src,
            actual: dst,
        });
    }
    Ok(())
}

// ── Rows ────────────────────────────────────────────────────────────

/// Decode a row of pixels into `dst`. Converts `min(src.len(), dst.len())` pixels.
#[inline]
pub fn read_row<C: PixelCodec>(src: &[Pixel], dst: &mut [ColorRec]) {
    for (out, px) in dst.iter_mut().zip(src) {
        *out = C::read_float(px);
    }
}

/// Encode a row of colors into `dst`. Converts `min(src.len(), dst.len())` pixels.
#[inline]
pub fn write_row<C: PixelCodec>(src: &[ColorRec], dst: &mut [Pixel], narrowing: Narrowing) {
    match narrowing {
        Narrowing::Truncate => write_row_with(src, dst, C::write_float),
        Narrowing::Clamp => write_row_with(src, dst, C::write_float_clamped),
    }
}

#[inline(always)]
fn write_row_with<F>(src: &[ColorRec], dst: &mut [Pixel], write: F)
where
    F: Fn(&mut Pixel, &ColorRec),
{
    for (px, c) in dst.iter_mut().zip(src) {
        write(px, c);
    }
}

// ── Surfaces ────────────────────────────────────────────────────────

/// Decode every pixel of `src` with codec `C` into a new [`ColorBuffer`].
///
/// `limits` bounds the output allocation. `stop` is polled every 16 rows.
pub fn read_surface<C: PixelCodec>(
    src: &Surface<'_>,
    limits: Option<&Limits>,
    stop: impl Stop,
) -> Result<ColorBuffer, BitmapError> {
    read_surface_impl::<C>(src, limits, &stop)
}

fn read_surface_impl<C: PixelCodec>(
    src: &Surface<'_>,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<ColorBuffer, BitmapError> {
    let (width, height) = (src.width(), src.height());
    let count = pixel_count(width, height)?;
    let out_bytes = count
        .checked_mul(core::mem::size_of::<ColorRec>())
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    if let Some(limits) = limits {
        limits.check(width, height)?;
        limits.check_memory(out_bytes)?;
    }
    stop.check()?;

    let mut pixels = Vec::with_capacity(count);
    for (row_idx, row) in src.rows().enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        pixels.extend(row.iter().map(C::read_float));
    }
    ColorBuffer::from_pixels(pixels, width, height)
}

/// Encode `src` into `dst` with codec `C`. Dimensions must match.
pub fn write_surface<C: PixelCodec>(
    src: &ColorBuffer,
    dst: &mut SurfaceMut<'_>,
    narrowing: Narrowing,
    stop: impl Stop,
) -> Result<(), BitmapError> {
    write_surface_impl::<C>(src, dst, narrowing, &stop)
}

fn write_surface_impl<C: PixelCodec>(
    src: &ColorBuffer,
    dst: &mut SurfaceMut<'_>,
    narrowing: Narrowing,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    check_same_size((src.width(), src.height()), (dst.width(), dst.height()))?;
    stop.check()?;
    for (row_idx, (src_row, dst_row)) in src.rows().zip(dst.rows_mut()).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        write_row::<C>(src_row, dst_row, narrowing);
    }
    Ok(())
}

/// Copy `src` (layout `S`) into `dst` (layout `D`) through [`crate::IntColorRec`].
///
/// Lossless between alpha layouts. Writing to a padding layout drops alpha;
/// reading from one yields opaque alpha.
pub fn transcode<S: PixelCodec, D: PixelCodec>(
    src: &Surface<'_>,
    dst: &mut SurfaceMut<'_>,
    stop: impl Stop,
) -> Result<(), BitmapError> {
    transcode_impl::<S, D>(src, dst, &stop)
}

fn transcode_impl<S: PixelCodec, D: PixelCodec>(
    src: &Surface<'_>,
    dst: &mut SurfaceMut<'_>,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    check_same_size((src.width(), src.height()), (dst.width(), dst.height()))?;
    stop.check()?;
    for (row_idx, (src_row, dst_row)) in src.rows().zip(dst.rows_mut()).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for (out, px) in dst_row.iter_mut().zip(src_row) {
            D::write_int(out, &S::read_int(px));
        }
    }
    Ok(())
}

/// Rewrite every pixel of `surface` from layout `S` to layout `D` in place.
pub fn transcode_in_place<S: PixelCodec, D: PixelCodec>(
    surface: &mut SurfaceMut<'_>,
    stop: impl Stop,
) -> Result<(), BitmapError> {
    transcode_in_place_impl::<S, D>(surface, &stop)
}

fn transcode_in_place_impl<S: PixelCodec, D: PixelCodec>(
    surface: &mut SurfaceMut<'_>,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    stop.check()?;
    for (row_idx, row) in surface.rows_mut().enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for px in row {
            let color = S::read_int(px);
            D::write_int(px, &color);
        }
    }
    Ok(())
}

// ── Runtime layout selection ────────────────────────────────────────

/// [`read_surface`] with the codec chosen by `layout`.
pub fn read_surface_as(
    layout: PixelLayout,
    src: &Surface<'_>,
    limits: Option<&Limits>,
    stop: impl Stop,
) -> Result<ColorBuffer, BitmapError> {
    let stop: &dyn Stop = &stop;
    with_codec!(layout, C => read_surface_impl::<C>(src, limits, stop))
}

/// [`write_surface`] with the codec chosen by `layout`.
pub fn write_surface_as(
    layout: PixelLayout,
    src: &ColorBuffer,
    dst: &mut SurfaceMut<'_>,
    narrowing: Narrowing,
    stop: impl Stop,
) -> Result<(), BitmapError> {
    let stop: &dyn Stop = &stop;
    with_codec!(layout, C => write_surface_impl::<C>(src, dst, narrowing, stop))
}

/// [`transcode`] with both codecs chosen by layout tag.
pub fn transcode_as(
    src_layout: PixelLayout,
    src: &Surface<'_>,
    dst_layout: PixelLayout,
    dst: &mut SurfaceMut<'_>,
    stop: impl Stop,
) -> Result<(), BitmapError> {
    let stop: &dyn Stop = &stop;
    with_codec!(src_layout, S => {
        with_codec!(dst_layout, D => transcode_impl::<S, D>(src, dst, stop))
    })
}

/// [`transcode_in_place`] with both codecs chosen by layout tag.
pub fn transcode_in_place_as(
    src_layout: PixelLayout,
    dst_layout: PixelLayout,
    surface: &mut SurfaceMut<'_>,
    stop: impl Stop,
) -> Result<(), BitmapError> {
    let stop: &dyn Stop = &stop;
    with_codec!(src_layout, S => {
        with_codec!(dst_layout, D => transcode_in_place_impl::<S, D>(surface, stop))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Abgr, Bgra, Bgrx, Rgba};
    use alloc::vec;
    use enough::Unstoppable;

    #[test]
    fn read_then_write_is_identity() {
        let data: Vec<u8> = (0..48).map(|i| (i * 5) as u8).collect();
        let src = Surface::packed(&data, 4, 3).unwrap();
        let colors = read_surface::<Abgr>(&src, None, Unstoppable).unwrap();
        assert_eq!((colors.width(), colors.height()), (4, 3));
        assert_eq!(colors.pixels().len(), 12);

        let mut out = vec![0u8; 48];
        let mut dst = SurfaceMut::packed(&mut out, 4, 3).unwrap();
        write_surface::<Abgr>(&colors, &mut dst, Narrowing::Truncate, Unstoppable).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn buffer_pixel_lookup() {
        let data = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let src = Surface::packed(&data, 2, 1).unwrap();
        let colors = read_surface::<Rgba>(&src, None, Unstoppable).unwrap();
        assert_eq!(colors.pixel(1, 0).unwrap().r, 5.0 / 255.0);
        assert!(colors.pixel(2, 0).is_none());
        assert!(colors.pixel(0, 1).is_none());
    }

    #[test]
    fn limits_reject_large_read() {
        let data = [0u8; 16];
        let src = Surface::packed(&data, 2, 2).unwrap();
        let limits = Limits {
            max_pixels: Some(3),
            ..Default::default()
        };
        match read_surface::<Bgra>(&src, Some(&limits), Unstoppable) {
            Err(BitmapError::LimitExceeded(_)) => {}
            other => panic!("expected LimitExceeded, got {other:?}"),
        }
        let limits = Limits {
            max_memory_bytes: Some(63),
            ..Default::default()
        };
        assert!(read_surface::<Bgra>(&src, Some(&limits), Unstoppable).is_err());
        let limits = Limits {
            max_memory_bytes: Some(64),
            ..Default::default()
        };
        assert!(read_surface::<Bgra>(&src, Some(&limits), Unstoppable).is_ok());
    }

    #[test]
    fn write_rejects_size_mismatch() {
        let colors = ColorBuffer::from_pixels(vec![ColorRec::WHITE; 4], 2, 2).unwrap();
        let mut out = [0u8; 12];
        let mut dst = SurfaceMut::packed(&mut out, 3, 1).unwrap();
        let err = write_surface::<Rgba>(&colors, &mut dst, Narrowing::Truncate, Unstoppable)
            .unwrap_err();
        assert!(matches!(
            err,
            BitmapError::DimensionsMismatch {
                expected: (2, 2),
                actual: (3, 1)
            }
        ));
    }

    #[test]
    fn write_fills_every_destination_row() {
        let colors = ColorBuffer::from_pixels(vec![ColorRec::WHITE; 6], 3, 2).unwrap();
        assert_eq!((colors.width(), colors.height()), (3, 2));
        assert_eq!(colors.rows().count(), 2);

        let mut out = [0u8; 24];
        let mut dst = SurfaceMut::packed(&mut out, 3, 2).unwrap();
        write_surface::<Rgba>(&colors, &mut dst, Narrowing::Truncate, Unstoppable).unwrap();
        assert!(out.iter().all(|&b| b == 255));

        // A 2x2 buffer never passes for 3x2: the dimensions travel with the pixels.
        let small = ColorBuffer::from_pixels(vec![ColorRec::WHITE; 4], 2, 2).unwrap();
        let mut out = [0u8; 24];
        let mut dst = SurfaceMut::packed(&mut out, 3, 2).unwrap();
        let err = write_surface::<Rgba>(&small, &mut dst, Narrowing::Truncate, Unstoppable)
            .unwrap_err();
        assert!(matches!(err, BitmapError::DimensionsMismatch { .. }));
        assert!(out.iter().all(|&b| b == 0));
    }

    #[test]
    fn from_pixels_checks_length() {
        assert!(ColorBuffer::from_pixels(vec![ColorRec::BLACK; 5], 2, 2).is_err());
        assert!(ColorBuffer::from_pixels(vec![], 0, 7).is_ok());
    }

    #[test]
    fn write_narrowing_modes() {
        let colors = ColorBuffer::from_pixels(vec![ColorRec::new(1.5, -0.5, 0.5, 2.0)], 1, 1)
            .unwrap();
        let mut clamped = [0u8; 4];
        let mut dst = SurfaceMut::packed(&mut clamped, 1, 1).unwrap();
        write_surface::<Rgba>(&colors, &mut dst, Narrowing::Clamp, Unstoppable).unwrap();
        assert_eq!(clamped, [255, 0, 127, 255]);

        // 1.5 * 255 and 2.0 * 255 saturate at 255, -0.5 * 255 saturates at 0.
        let mut truncated = [0u8; 4];
        let mut dst = SurfaceMut::packed(&mut truncated, 1, 1).unwrap();
        write_surface::<Rgba>(&colors, &mut dst, Narrowing::Truncate, Unstoppable).unwrap();
        assert_eq!(truncated, [255, 0, 127, 255]);

        let in_range = ColorBuffer::from_pixels(vec![ColorRec::new(0.999, 0.0, 0.5, 1.0)], 1, 1)
            .unwrap();
        let mut dst = SurfaceMut::packed(&mut truncated, 1, 1).unwrap();
        write_surface::<Rgba>(&in_range, &mut dst, Narrowing::Truncate, Unstoppable).unwrap();
        assert_eq!(truncated, [254, 0, 127, 255]);
    }

    #[test]
    fn transcode_abgr_to_bgra() {
        let data = [40u8, 30, 20, 10, 4, 3, 2, 1];
        let src = Surface::packed(&data, 2, 1).unwrap();
        let mut out = [0u8; 8];
        let mut dst = SurfaceMut::packed(&mut out, 2, 1).unwrap();
        transcode::<Abgr, Bgra>(&src, &mut dst, Unstoppable).unwrap();
        assert_eq!(out, [30, 20, 10, 40, 3, 2, 1, 4]);
    }

    #[test]
    fn transcode_in_place_to_padding() {
        let mut data = [1u8, 2, 3, 0];
        let mut s = SurfaceMut::packed(&mut data, 1, 1).unwrap();
        transcode_in_place::<Rgba, Bgrx>(&mut s, Unstoppable).unwrap();
        assert_eq!(data, [3, 2, 1, 0xFF]);
    }

    #[test]
    fn layout_tagged_variants_match_generic() {
        let data: Vec<u8> = (0..32).collect();
        let src = Surface::packed(&data, 4, 2).unwrap();
        for layout in PixelLayout::ALL {
            let tagged = read_surface_as(layout, &src, None, Unstoppable).unwrap();
            let generic = with_codec!(layout, C => read_surface::<C>(&src, None, Unstoppable))
                .unwrap();
            assert_eq!(tagged, generic, "{layout:?}");
        }

        let mut a = vec![0u8; 32];
        let mut b = vec![0u8; 32];
        transcode_as(
            PixelLayout::Argb8,
            &src,
            PixelLayout::Abgr8,
            &mut SurfaceMut::packed(&mut a, 4, 2).unwrap(),
            Unstoppable,
        )
        .unwrap();
        transcode::<crate::codec::Argb, Abgr>(
            &src,
            &mut SurfaceMut::packed(&mut b, 4, 2).unwrap(),
            Unstoppable,
        )
        .unwrap();
        assert_eq!(a, b);
        assert_eq!(&a[..4], &[0, 3, 2, 1]);
    }

    #[test]
    fn row_helpers() {
        let src = [[0u8, 51, 102, 255], [255, 255, 255, 0]];
        let mut colors = [ColorRec::default(); 2];
        read_row::<Rgba>(&src, &mut colors);
        assert_eq!(colors[0], ColorRec::new(0.0, 0.2, 0.4, 1.0));

        let mut back = [[0u8; 4]; 2];
        write_row::<Rgba>(&colors, &mut back, Narrowing::Truncate);
        assert_eq!(back, src);
    }

    #[cfg(feature = "imgref")]
    #[test]
    fn color_buffer_as_imgref() {
        let colors = ColorBuffer::from_pixels(vec![ColorRec::WHITE; 6], 3, 2).unwrap();
        let img = colors.as_imgref();
        assert_eq!((img.width(), img.height()), (3, 2));
        assert_eq!(img.buf().len(), 6);
    }
}
