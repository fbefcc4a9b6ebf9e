//! Scene to RGB image.

use glam::Vec2;
use image::{Rgb, RgbImage};

use crate::scene::Scene;

/// Rasterize `scene` into a `width` x `height` image.
///
/// Scene coordinates are scaled to the output size and flipped so that scene
/// y = 0 lands on the bottom row. Pixels are sampled at their centres.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rasterize(scene: &Scene, width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, Rgb(scene.background.0));
    if width == 0 || height == 0 {
        return img;
    }
    let sx = width as f32 / scene.width;
    let sy = height as f32 / scene.height;

    for shape in &scene.shapes {
        let (lo, hi) = shape.bounds();
        let x0 = ((lo.x * sx).floor().max(0.0) as u32).min(width);
        let x1 = ((hi.x * sx).ceil().max(0.0) as u32).min(width);
        let y0 = ((lo.y * sy).floor().max(0.0) as u32).min(height);
        let y1 = ((hi.y * sy).ceil().max(0.0) as u32).min(height);
        let color = Rgb(shape.color().0);

        for py in y0..y1 {
            for px in x0..x1 {
                let p = Vec2::new((px as f32 + 0.5) / sx, (py as f32 + 0.5) / sy);
                if shape.contains(p) {
                    img.put_pixel(px, height - 1 - py, color);
                }
            }
        }
    }
    img
}
