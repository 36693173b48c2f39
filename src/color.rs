//! Canonical color records.
//!
//! [`IntColorRec`] carries channels in the 0–255 integer domain and
//! [`ColorRec`] carries them normalized to 0.0–1.0. Neither type clamps:
//! intermediate results may leave the nominal range, and the pixel codecs
//! narrow whatever they are given.

use core::ops::{Add, Div, Mul, Sub};

/// Scale between the integer and normalized float domains.
pub const CHANNEL_MAX: f32 = 255.0;

/// Four-channel color, normalized to `0.0..=1.0`.
///
/// Channel order in constructors and arrays is R, G, B, A.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColorRec {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Four-channel color in the `0..=255` integer domain.
///
/// Channel order in constructors and arrays is R, G, B, A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntColorRec {
    pub r: i32,
    pub g: i32,
    pub b: i32,
    pub a: i32,
}

impl ColorRec {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Build a color from red, green, blue, alpha. No range check.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Scale to the integer domain, truncating toward zero.
    ///
    /// Out-of-range channels are scaled without clamping, so `1.5` becomes
    /// `382`. NaN becomes `0`.
    #[inline]
    pub fn to_int(self) -> IntColorRec {
        IntColorRec {
            r: (self.r * CHANNEL_MAX) as i32,
            g: (self.g * CHANNEL_MAX) as i32,
            b: (self.b * CHANNEL_MAX) as i32,
            a: (self.a * CHANNEL_MAX) as i32,
        }
    }

    /// Clamp every channel to `0.0..=1.0`. NaN channels become `0.0`.
    #[inline]
    pub fn clamped(self) -> Self {
        Self {
            r: clamp_unit(self.r),
            g: clamp_unit(self.g),
            b: clamp_unit(self.b),
            a: clamp_unit(self.a),
        }
    }
}

// f32::clamp passes NaN through; narrowing later would turn it into 0 anyway,
// but clamped() promises an in-range record.
#[inline]
fn clamp_unit(v: f32) -> f32 {
    if v > 0.0 { v.min(1.0) } else { 0.0 }
}

impl IntColorRec {
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Build a color from red, green, blue, alpha. No range check.
    #[inline]
    pub const fn new(r: i32, g: i32, b: i32, a: i32) -> Self {
        Self { r, g, b, a }
    }

    /// Normalize to the float domain (`channel / 255.0`).
    #[inline]
    pub fn to_float(self) -> ColorRec {
        ColorRec {
            r: self.r as f32 / CHANNEL_MAX,
            g: self.g as f32 / CHANNEL_MAX,
            b: self.b as f32 / CHANNEL_MAX,
            a: self.a as f32 / CHANNEL_MAX,
        }
    }

    /// Clamp every channel to `0..=255`.
    #[inline]
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0, 255),
            g: self.g.clamp(0, 255),
            b: self.b.clamp(0, 255),
            a: self.a.clamp(0, 255),
        }
    }
}

impl From<IntColorRec> for ColorRec {
    #[inline]
    fn from(c: IntColorRec) -> Self {
        c.to_float()
    }
}

impl From<ColorRec> for IntColorRec {
    #[inline]
    fn from(c: ColorRec) -> Self {
        c.to_int()
    }
}

impl From<[f32; 4]> for ColorRec {
    #[inline]
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<ColorRec> for [f32; 4] {
    #[inline]
    fn from(c: ColorRec) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

impl From<[i32; 4]> for IntColorRec {
    #[inline]
    fn from([r, g, b, a]: [i32; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<IntColorRec> for [i32; 4] {
    #[inline]
    fn from(c: IntColorRec) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

// ── Arithmetic ──────────────────────────────────────────────────────

impl Add for ColorRec {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b, self.a + rhs.a)
    }
}

impl Sub for ColorRec {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b, self.a - rhs.a)
    }
}

impl Mul for ColorRec {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b, self.a * rhs.a)
    }
}

impl Mul<f32> for ColorRec {
    type Output = Self;
    #[inline]
    fn mul(self, s: f32) -> Self {
        Self::new(self.r * s, self.g * s, self.b * s, self.a * s)
    }
}

impl Div<f32> for ColorRec {
    type Output = Self;
    #[inline]
    fn div(self, s: f32) -> Self {
        Self::new(self.r / s, self.g / s, self.b / s, self.a / s)
    }
}

// Integer channel arithmetic wraps on `i32` overflow.

impl Add for IntColorRec {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.r.wrapping_add(rhs.r),
            self.g.wrapping_add(rhs.g),
            self.b.wrapping_add(rhs.b),
            self.a.wrapping_add(rhs.a),
        )
    }
}

impl Sub for IntColorRec {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.r.wrapping_sub(rhs.r),
            self.g.wrapping_sub(rhs.g),
            self.b.wrapping_sub(rhs.b),
            self.a.wrapping_sub(rhs.a),
        )
    }
}

impl Mul for IntColorRec {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.r.wrapping_mul(rhs.r),
            self.g.wrapping_mul(rhs.g),
            self.b.wrapping_mul(rhs.b),
            self.a.wrapping_mul(rhs.a),
        )
    }
}

impl Mul<i32> for IntColorRec {
    type Output = Self;
    #[inline]
    fn mul(self, s: i32) -> Self {
        Self::new(
            self.r.wrapping_mul(s),
            self.g.wrapping_mul(s),
            self.b.wrapping_mul(s),
            self.a.wrapping_mul(s),
        )
    }
}

/// # Panics
///
/// Panics if `s` is zero, like integer division.
impl Div<i32> for IntColorRec {
    type Output = Self;
    #[inline]
    fn div(self, s: i32) -> Self {
        Self::new(
            self.r.wrapping_div(s),
            self.g.wrapping_div(s),
            self.b.wrapping_div(s),
            self.a.wrapping_div(s),
        )
    }
}

// ── rgb crate interop ───────────────────────────────────────────────

#[cfg(feature = "rgb")]
impl From<rgb::Rgba<u8>> for IntColorRec {
    #[inline]
    fn from(p: rgb::Rgba<u8>) -> Self {
        Self::new(p.r.into(), p.g.into(), p.b.into(), p.a.into())
    }
}

/// Narrows each channel with `as u8`, same as [`crate::PixelCodec::write_int`].
#[cfg(feature = "rgb")]
impl From<IntColorRec> for rgb::Rgba<u8> {
    #[inline]
    fn from(c: IntColorRec) -> Self {
        rgb::Rgba {
            r: c.r as u8,
            g: c.g as u8,
            b: c.b as u8,
            a: c.a as u8,
        }
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::Rgba<f32>> for ColorRec {
    #[inline]
    fn from(p: rgb::Rgba<f32>) -> Self {
        Self::new(p.r, p.g, p.b, p.a)
    }
}

#[cfg(feature = "rgb")]
impl From<ColorRec> for rgb::Rgba<f32> {
    #[inline]
    fn from(c: ColorRec) -> Self {
        rgb::Rgba {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}
