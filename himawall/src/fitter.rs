//! Output scaling of the assembled composite to the display size.
//!
//! Three policies, all guaranteeing output dimensions exactly equal to the
//! target: `fit` letterboxes, `fill` center-crops (falling back to
//! letterboxing when the crop would discard too much of the frame), and
//! `stretch` ignores aspect ratio. Transparent regions of the composite
//! (blank cells from failed tile fetches) are flattened onto the background
//! color.

use crate::config::ScaleMode;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tracing::debug;

/// Fill color for letterbox bars and blank cells.
const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Scale `composite` to exactly `pic_size` under the given policy.
///
/// `cover_ratio` applies to `fill` only: it is the minimum fraction of the
/// scaled image that must remain visible after cropping. When the crop would
/// retain less, the image is letterboxed instead.
pub fn fit_to_size(
    composite: &RgbaImage,
    pic_size: (u32, u32),
    mode: ScaleMode,
    cover_ratio: f64,
) -> RgbaImage {
    let (target_w, target_h) = pic_size;

    match mode {
        ScaleMode::Stretch => {
            let resized = imageops::resize(composite, target_w, target_h, FilterType::Lanczos3);
            compose_onto_background(target_w, target_h, &resized, 0, 0)
        }
        ScaleMode::Fit => letterbox(composite, target_w, target_h),
        ScaleMode::Fill => {
            let (w, h) = composite.dimensions();
            let scale = f64::max(
                target_w as f64 / w as f64,
                target_h as f64 / h as f64,
            );
            let scaled_w = ((w as f64 * scale).round() as u32).max(target_w);
            let scaled_h = ((h as f64 * scale).round() as u32).max(target_h);
            let visible =
                (target_w as f64 * target_h as f64) / (scaled_w as f64 * scaled_h as f64);

            if visible < cover_ratio {
                debug!(
                    visible = visible,
                    cover_ratio = cover_ratio,
                    "fill would crop too much, falling back to letterbox"
                );
                letterbox(composite, target_w, target_h)
            } else {
                cover(composite, target_w, target_h, scaled_w, scaled_h)
            }
        }
    }
}

/// Uniform scale to fit inside the target, centered on the background.
fn letterbox(src: &RgbaImage, target_w: u32, target_h: u32) -> RgbaImage {
    let (w, h) = src.dimensions();
    let scale = f64::min(target_w as f64 / w as f64, target_h as f64 / h as f64);
    let scaled_w = ((w as f64 * scale).round() as u32).clamp(1, target_w);
    let scaled_h = ((h as f64 * scale).round() as u32).clamp(1, target_h);

    let resized = imageops::resize(src, scaled_w, scaled_h, FilterType::Lanczos3);
    compose_onto_background(
        target_w,
        target_h,
        &resized,
        ((target_w - scaled_w) / 2) as i64,
        ((target_h - scaled_h) / 2) as i64,
    )
}

/// Uniform scale to cover the target, then center-crop the overflow.
fn cover(src: &RgbaImage, target_w: u32, target_h: u32, scaled_w: u32, scaled_h: u32) -> RgbaImage {
    let resized = imageops::resize(src, scaled_w, scaled_h, FilterType::Lanczos3);
    let cropped = imageops::crop_imm(
        &resized,
        (scaled_w - target_w) / 2,
        (scaled_h - target_h) / 2,
        target_w,
        target_h,
    )
    .to_image();
    compose_onto_background(target_w, target_h, &cropped, 0, 0)
}

/// Alpha-blend an image onto an opaque background canvas of the target size.
fn compose_onto_background(
    target_w: u32,
    target_h: u32,
    img: &RgbaImage,
    x: i64,
    y: i64,
) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(target_w, target_h, BACKGROUND);
    imageops::overlay(&mut canvas, img, x, y);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(color))
    }

    const WHITE: [u8; 4] = [255, 255, 255, 255];

    #[test]
    fn all_modes_produce_exact_target_dimensions() {
        let sources = [
            solid(100, 100, WHITE),
            solid(300, 100, WHITE),
            solid(100, 300, WHITE),
            solid(1100, 1100, WHITE),
            solid(7, 13, WHITE),
        ];
        let targets = [(2560, 1440), (1440, 2560), (100, 100), (33, 77)];

        for src in &sources {
            for &target in &targets {
                for mode in [ScaleMode::Fit, ScaleMode::Fill, ScaleMode::Stretch] {
                    let out = fit_to_size(src, target, mode, 0.95);
                    assert_eq!(
                        out.dimensions(),
                        target,
                        "mode {:?}, src {:?}",
                        mode,
                        src.dimensions()
                    );
                }
            }
        }
    }

    #[test]
    fn fit_letterboxes_a_square_onto_a_wide_target() {
        // 100x100 white into 200x100: white center, black bars at the sides
        let out = fit_to_size(&solid(100, 100, WHITE), (200, 100), ScaleMode::Fit, 0.95);
        assert_eq!(out.get_pixel(100, 50), &Rgba(WHITE));
        assert_eq!(out.get_pixel(10, 50), &Rgba([0, 0, 0, 255]));
        assert_eq!(out.get_pixel(190, 50), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn fill_covers_the_whole_target_when_allowed() {
        // 100x100 into 200x100 crops half the frame: visible ratio 0.5
        let out = fit_to_size(&solid(100, 100, WHITE), (200, 100), ScaleMode::Fill, 0.4);
        for &(x, y) in &[(0, 0), (199, 0), (0, 99), (199, 99), (100, 50)] {
            assert_eq!(out.get_pixel(x, y), &Rgba(WHITE), "pixel ({}, {})", x, y);
        }
    }

    #[test]
    fn fill_falls_back_to_letterbox_below_cover_ratio() {
        // Same geometry, but demanding 90% visibility forces the fallback
        let out = fit_to_size(&solid(100, 100, WHITE), (200, 100), ScaleMode::Fill, 0.9);
        assert_eq!(out.get_pixel(100, 50), &Rgba(WHITE));
        assert_eq!(out.get_pixel(10, 50), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn stretch_fills_every_pixel() {
        let out = fit_to_size(&solid(50, 200, WHITE), (120, 40), ScaleMode::Stretch, 0.95);
        for &(x, y) in &[(0, 0), (119, 39), (60, 20)] {
            assert_eq!(out.get_pixel(x, y), &Rgba(WHITE));
        }
    }

    #[test]
    fn transparent_cells_flatten_to_background() {
        // Composite with a transparent left half, as left by a failed tile
        let mut src = solid(100, 100, WHITE);
        for y in 0..100 {
            for x in 0..50 {
                src.put_pixel(x, y, Rgba([0, 0, 0, 0]));
            }
        }
        let out = fit_to_size(&src, (100, 100), ScaleMode::Stretch, 0.95);
        assert_eq!(out.get_pixel(10, 50), &Rgba([0, 0, 0, 255]));
        assert_eq!(out.get_pixel(90, 50), &Rgba(WHITE));
    }

    #[test]
    fn fit_matching_aspect_has_no_bars() {
        let out = fit_to_size(&solid(1100, 1100, WHITE), (550, 550), ScaleMode::Fit, 0.95);
        assert_eq!(out.get_pixel(0, 0), &Rgba(WHITE));
        assert_eq!(out.get_pixel(549, 549), &Rgba(WHITE));
    }
}
