/// Bounds on the [`ColorBuffer`](crate::ColorBuffer) that
/// [`read_surface`](crate::read_surface) allocates.
///
/// A `ColorRec` is 16 bytes, so a surface of `w * h` pixels needs
/// `16 * w * h` bytes. `None` leaves a bound unchecked.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum `width * height`.
    pub max_pixels: Option<u64>,
    /// Maximum size of the color buffer, in bytes.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Reject a surface whose dimensions exceed any bound.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), crate::BitmapError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(crate::BitmapError::LimitExceeded(alloc::format!(
                    "surface width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(crate::BitmapError::LimitExceeded(alloc::format!(
                    "surface height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(crate::BitmapError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Reject a color buffer of `bytes` bytes if it exceeds `max_memory_bytes`.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), crate::BitmapError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes as u64 > max_mem {
                return Err(crate::BitmapError::LimitExceeded(alloc::format!(
                    "color buffer of {bytes} bytes exceeds limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}
