use crate::bitmap::Rgba;

/// Perceptual luminance, 0.0 (black) to 255.0 (white).
pub fn luminance(pixel: Rgba) -> f32 {
    pixel.r as f32 * 0.3 + pixel.g as f32 * 0.59 + pixel.b as f32 * 0.11
}

/// Threshold a pixel to a single bit.
///
/// Dark and sufficiently opaque pixels are "on"; transparent or near-white
/// pixels are "off". The invert flag flips the result.
pub fn pixel_bit(pixel: Rgba, invert: bool) -> bool {
    invert != (luminance(pixel) < 127.0 && pixel.a > 63)
}
