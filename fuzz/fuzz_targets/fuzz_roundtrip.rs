#![no_main]
use libfuzzer_sys::fuzz_target;
use zenpixcodec::*;

fn check_pixel<C: PixelCodec>(stored: Pixel) {
    // Rewriting what was read must reproduce the stored bytes
    let mut px = stored;
    C::write_int(&mut px, &C::read_int(&stored));
    let mut fpx = stored;
    C::write_float(&mut fpx, &C::read_float(&stored));
    if C::LAYOUT.has_alpha() {
        assert_eq!(px, stored, "{:?} int", C::LAYOUT);
        assert_eq!(fpx, stored, "{:?} float", C::LAYOUT);
    } else {
        assert_eq!(px, fpx, "{:?} int vs float", C::LAYOUT);
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&width, rest)) = data.split_first() else {
        return;
    };
    let width = u32::from(width.max(1));
    let height = (rest.len() / (width as usize * 4)) as u32;
    let Ok(src) = Surface::packed(rest, width, height) else {
        return;
    };

    for row in src.rows() {
        for &px in row {
            check_pixel::<Abgr>(px);
            check_pixel::<Argb>(px);
            check_pixel::<Rgba>(px);
            check_pixel::<Bgra>(px);
            check_pixel::<Xbgr>(px);
            check_pixel::<Rgbx>(px);
            check_pixel::<Bgrx>(px);
        }
    }

    // Any layout pair through a whole surface must agree with per-pixel conversion
    let mut out = vec![0u8; rest.len()];
    let Ok(mut dst) = SurfaceMut::packed(&mut out, width, height) else {
        return;
    };
    transcode_as(PixelLayout::Abgr8, &src, PixelLayout::Bgra8, &mut dst, enough::Unstoppable)
        .expect("same-size transcode cannot fail");
    for (x, y) in (0..height).flat_map(|y| (0..width).map(move |x| (x, y))) {
        let (Some(a), Some(b)) = (src.pixel(x, y), dst.pixel(x, y)) else {
            panic!("pixel ({x}, {y}) out of bounds");
        };
        assert_eq!(Abgr::read_int(a), Bgra::read_int(b));
    }
});
