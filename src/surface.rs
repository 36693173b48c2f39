//! Borrowed views over strided 4-byte-per-pixel buffers.
//!
//! A surface validates its buffer once, at construction. After that every
//! pixel it hands out is a `&[u8; 4]` (or `&mut [u8; 4]`) that is known to
//! be in bounds, so the codecs never need to check anything.

use crate::error::BitmapError;
use crate::pixel::{BYTES_PER_PIXEL, Pixel};

/// Validate `len` bytes as `height` rows of `width` pixels, `stride` bytes apart.
///
/// The last row only needs `width * 4` bytes, not a full stride.
fn validate(len: usize, width: u32, height: u32, stride: usize) -> Result<usize, BitmapError> {
    let row_bytes = (width as usize)
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    if stride < row_bytes {
        return Err(BitmapError::InvalidStride {
            stride,
            min: row_bytes,
        });
    }
    let needed = match height {
        0 => 0,
        h => stride
            .checked_mul(h as usize - 1)
            .and_then(|n| n.checked_add(row_bytes))
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?,
    };
    if len < needed {
        return Err(BitmapError::BufferTooSmall {
            needed,
            actual: len,
        });
    }
    Ok(row_bytes)
}

fn packed_stride(width: u32, height: u32) -> Result<usize, BitmapError> {
    (width as usize)
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })
}

#[cfg(feature = "imgref")]
fn dims_from_imgref(width: usize, height: usize) -> Result<(u32, u32), BitmapError> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(BitmapError::DimensionsTooLarge {
            width: u32::MAX,
            height: u32::MAX,
        }),
    }
}

/// Read-only pixel surface.
#[derive(Clone, Copy, Debug)]
pub struct Surface<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    stride: usize,
    row_bytes: usize,
}

impl<'a> Surface<'a> {
    /// Wrap `data` as `height` rows of `width` pixels, `stride` bytes apart.
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        stride: usize,
    ) -> Result<Self, BitmapError> {
        let row_bytes = validate(data.len(), width, height, stride)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
            row_bytes,
        })
    }

    /// Wrap tightly packed rows (`stride == width * 4`).
    pub fn packed(data: &'a [u8], width: u32, height: u32) -> Result<Self, BitmapError> {
        Self::new(data, width, height, packed_stride(width, height)?)
    }

    /// View an [`imgref::ImgRef`] of 4-byte pixels. The imgref stride is
    /// in pixels and is converted to bytes.
    #[cfg(feature = "imgref")]
    pub fn from_imgref(img: imgref::ImgRef<'a, Pixel>) -> Result<Self, BitmapError> {
        let (width, height) = dims_from_imgref(img.width(), img.height())?;
        let stride = img.stride() * BYTES_PER_PIXEL;
        Self::new(img.into_buf().as_flattened(), width, height, stride)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes between the starts of consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The underlying bytes, including any row padding.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Pixels of row `y`, or `None` past the last row.
    pub fn row(&self, y: u32) -> Option<&'a [Pixel]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.stride;
        let bytes = &self.data[start..start + self.row_bytes];
        Some(bytes.as_chunks::<BYTES_PER_PIXEL>().0)
    }

    /// The pixel at (`x`, `y`), or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&'a Pixel> {
        self.row(y)?.get(x as usize)
    }

    /// All rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &'a [Pixel]> + '_ {
        (0..self.height).filter_map(move |y| self.row(y))
    }
}

/// Mutable pixel surface.
#[derive(Debug)]
pub struct SurfaceMut<'a> {
    data: &'a mut [u8],
    width: u32,
    height: u32,
    stride: usize,
    row_bytes: usize,
}

impl<'a> SurfaceMut<'a> {
    /// Wrap `data` as `height` rows of `width` pixels, `stride` bytes apart.
    pub fn new(
        data: &'a mut [u8],
        width: u32,
        height: u32,
        stride: usize,
    ) -> Result<Self, BitmapError> {
        let row_bytes = validate(data.len(), width, height, stride)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
            row_bytes,
        })
    }

    /// Wrap tightly packed rows (`stride == width * 4`).
    pub fn packed(data: &'a mut [u8], width: u32, height: u32) -> Result<Self, BitmapError> {
        let stride = packed_stride(width, height)?;
        Self::new(data, width, height, stride)
    }

    /// View an [`imgref::ImgRefMut`] of 4-byte pixels.
    #[cfg(feature = "imgref")]
    pub fn from_imgref_mut(img: imgref::ImgRefMut<'a, Pixel>) -> Result<Self, BitmapError> {
        let (width, height) = dims_from_imgref(img.width(), img.height())?;
        let stride = img.stride() * BYTES_PER_PIXEL;
        Self::new(img.into_buf().as_flattened_mut(), width, height, stride)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Reborrow as a read-only surface.
    pub fn as_surface(&self) -> Surface<'_> {
        Surface {
            data: &*self.data,
            width: self.width,
            height: self.height,
            stride: self.stride,
            row_bytes: self.row_bytes,
        }
    }

    pub fn row(&self, y: u32) -> Option<&[Pixel]> {
        self.as_surface().row(y)
    }

    pub fn row_mut(&mut self, y: u32) -> Option<&mut [Pixel]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.stride;
        let bytes = &mut self.data[start..start + self.row_bytes];
        Some(bytes.as_chunks_mut::<BYTES_PER_PIXEL>().0)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<&Pixel> {
        self.as_surface().pixel(x, y)
    }

    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut Pixel> {
        self.row_mut(y)?.get_mut(x as usize)
    }

    /// All rows, top to bottom, as disjoint mutable slices.
    ///
    /// Rows never overlap, so they can be handed to different threads.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Pixel]> + '_ {
        let row_bytes = self.row_bytes;
        let padding = self.stride - row_bytes;
        let mut rest: &mut [u8] = &mut *self.data;
        (0..self.height).map(move |_| {
            let (row, tail) = core::mem::take(&mut rest).split_at_mut(row_bytes);
            // the last row may end without padding
            rest = tail.get_mut(padding..).unwrap_or_default();
            row.as_chunks_mut::<BYTES_PER_PIXEL>().0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn packed_rows_and_pixels() {
        let data: alloc::vec::Vec<u8> = (0..24).collect();
        let s = Surface::packed(&data, 3, 2).unwrap();
        assert_eq!(s.stride(), 12);
        assert_eq!(s.row(1).unwrap()[0], [12, 13, 14, 15]);
        assert_eq!(s.pixel(2, 0), Some(&[8, 9, 10, 11]));
        assert_eq!(s.pixel(3, 0), None);
        assert_eq!(s.pixel(0, 2), None);
        assert_eq!(s.rows().count(), 2);
    }

    #[test]
    fn padded_stride_skips_padding() {
        // 1 pixel per row, 8-byte stride, last row without padding
        let data = [1, 2, 3, 4, 0xEE, 0xEE, 0xEE, 0xEE, 5, 6, 7, 8];
        let s = Surface::new(&data, 1, 2, 8).unwrap();
        let rows: alloc::vec::Vec<_> = s.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], &[[1u8, 2, 3, 4]]);
        assert_eq!(rows[1], &[[5u8, 6, 7, 8]]);
    }

    #[test]
    fn rejects_short_buffer() {
        let data = [0u8; 15];
        match Surface::packed(&data, 2, 2) {
            Err(BitmapError::BufferTooSmall { needed, actual }) => {
                assert_eq!((needed, actual), (16, 15));
            }
            other => panic!("expected BufferTooSmall, got {other:?}"),
        }
    }

    #[test]
    fn rejects_narrow_stride() {
        let data = [0u8; 64];
        match Surface::new(&data, 4, 2, 12) {
            Err(BitmapError::InvalidStride { stride, min }) => {
                assert_eq!((stride, min), (12, 16));
            }
            other => panic!("expected InvalidStride, got {other:?}"),
        }
    }

    #[test]
    fn rejects_overflowing_dimensions() {
        let data = [0u8; 4];
        let err = Surface::new(&data, 1, u32::MAX, usize::MAX).unwrap_err();
        assert!(matches!(err, BitmapError::DimensionsTooLarge { .. }));
    }

    #[test]
    fn empty_surfaces() {
        let s = Surface::packed(&[], 0, 5).unwrap();
        assert_eq!(s.row(0), Some(&[][..]));
        let mut buf = [0u8; 0];
        let mut m = SurfaceMut::packed(&mut buf, 3, 0).unwrap();
        assert_eq!(m.rows_mut().count(), 0);
        let mut none = [0u8; 0];
        let mut z = SurfaceMut::packed(&mut none, 0, 3).unwrap();
        assert_eq!(z.rows_mut().count(), 3);
    }

    #[test]
    fn rows_mut_are_disjoint() {
        let mut data = vec![0u8; 2 * 8 + 4];
        let mut s = SurfaceMut::new(&mut data, 1, 3, 8).unwrap();
        for (y, row) in s.rows_mut().enumerate() {
            row[0] = [y as u8; 4];
        }
        assert_eq!(s.pixel(0, 2), Some(&[2, 2, 2, 2]));
        assert_eq!(&data[4..8], &[0, 0, 0, 0]);
        assert_eq!(&data[8..12], &[1, 1, 1, 1]);
    }

    #[test]
    fn pixel_mut_writes_in_place() {
        let mut data = [0u8; 8];
        let mut s = SurfaceMut::packed(&mut data, 2, 1).unwrap();
        *s.pixel_mut(1, 0).unwrap() = [9, 8, 7, 6];
        assert!(s.pixel_mut(2, 0).is_none());
        assert_eq!(data, [0, 0, 0, 0, 9, 8, 7, 6]);
    }

    #[cfg(feature = "imgref")]
    #[test]
    fn imgref_views() {
        let buf = vec![
            [1u8, 2, 3, 4],
            [5, 6, 7, 8],
            [0; 4],
            [9, 10, 11, 12],
            [13, 14, 15, 16],
        ];
        let mut img = imgref::ImgVec::new_stride(buf, 2, 2, 3);
        let s = Surface::from_imgref(img.as_ref()).unwrap();
        assert_eq!(s.stride(), 12);
        assert_eq!(s.pixel(1, 1), Some(&[13, 14, 15, 16]));

        let mut m = SurfaceMut::from_imgref_mut(img.as_mut()).unwrap();
        *m.pixel_mut(0, 1).unwrap() = [0xFF; 4];
        assert_eq!(img.buf()[3], [0xFF; 4]);
    }
}
