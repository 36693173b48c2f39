//! # zenpixcodec
//!
//! Per-pixel codecs between 4-byte bitmap storage and canonical colors.
//!
//! Every pixel a renderer loads, composites, or stores passes through one
//! of these conversions, so each one is a handful of byte moves with no
//! branches, no allocation, and no bounds checks beyond the type system.
//!
//! ## Color records
//!
//! - [`IntColorRec`]: `i32` channels, nominally 0–255.
//! - [`ColorRec`]: `f32` channels, nominally 0.0–1.0.
//!
//! The two are related by a fixed scale of 255 (`float = int / 255.0`,
//! `int = trunc(float * 255.0)`). Neither type clamps.
//!
//! ## Codecs
//!
//! One zero-sized type per layout, all implementing [`PixelCodec`]:
//!
//! | Codec | Byte 0 | Byte 1 | Byte 2 | Byte 3 |
//! |-------|--------|--------|--------|--------|
//! | [`Abgr`] | A | B | G | R |
//! | [`Argb`] | A | R | G | B |
//! | [`Rgba`] | R | G | B | A |
//! | [`Bgra`] | B | G | R | A |
//! | [`Xbgr`] | X | B | G | R |
//! | [`Rgbx`] | R | G | B | X |
//! | [`Bgrx`] | B | G | R | X |
//!
//! `X` is padding: read as opaque alpha, written as `0xFF`.
//!
//! Pixels are `&[u8; 4]` / `&mut [u8; 4]`. Use a [`Surface`] or
//! [`SurfaceMut`] to validate a whole strided buffer once and get those
//! spans out of it.
//!
//! ## Non-Goals
//!
//! - Color-space transforms (gamma, sRGB)
//! - Alpha compositing
//! - Format detection: the caller knows its buffer's layout
//!
//! ## Usage
//!
//! ```
//! use zenpixcodec::{Abgr, ColorRec, IntColorRec, PixelCodec};
//!
//! let mut px = [0x28, 0x1E, 0x14, 0x0A];
//! assert_eq!(Abgr::read_int(&px), IntColorRec::new(10, 20, 30, 40));
//!
//! Abgr::write_float(&mut px, &ColorRec::new(1.0, 0.0, 0.0, 1.0));
//! assert_eq!(px, [255, 0, 0, 255]);
//! ```
//!
//! Whole surfaces, with the layout picked at runtime:
//!
//! ```
//! use zenpixcodec::{PixelLayout, Surface, SurfaceMut, Unstoppable, transcode_as};
//!
//! let bgra = [30u8, 20, 10, 40];
//! let mut abgr = [0u8; 4];
//! transcode_as(
//!     PixelLayout::Bgra8,
//!     &Surface::packed(&bgra, 1, 1)?,
//!     PixelLayout::Abgr8,
//!     &mut SurfaceMut::packed(&mut abgr, 1, 1)?,
//!     Unstoppable,
//! )?;
//! assert_eq!(abgr, [40, 30, 20, 10]);
//! # Ok::<(), zenpixcodec::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod codec;
mod color;
mod convert;
mod error;
mod limits;
mod pixel;
mod surface;

// Re-exports
pub use codec::{Abgr, Argb, Bgra, Bgrx, PixelCodec, Rgba, Rgbx, Xbgr};
pub use color::{CHANNEL_MAX, ColorRec, IntColorRec};
pub use convert::{
    ColorBuffer, Narrowing, read_row, read_surface, read_surface_as, transcode, transcode_as,
    transcode_in_place, transcode_in_place_as, write_row, write_surface, write_surface_as,
};
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use limits::Limits;
pub use pixel::{BYTES_PER_PIXEL, Channel, Pixel, PixelLayout};
pub use surface::{Surface, SurfaceMut};
