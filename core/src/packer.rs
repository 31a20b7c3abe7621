use alloc::vec::Vec;

use crate::{bitmap::PixelBuffer, threshold};

/// Bytes needed to store one row of `width` pixels.
pub fn bytewidth(width: usize) -> usize {
    width.div_ceil(8)
}

/// Threshold one image row into `bytewidth * 8` bits.
///
/// Columns past the image width only exist in the last byte of the row and
/// take the invert flag's value, so unused bits stay uniform with the
/// background instead of defaulting to zero.
pub fn row_bits(image: &PixelBuffer, y: usize, invert: bool) -> Vec<bool> {
    let width = image.width();
    (0..bytewidth(width) * 8)
        .map(|x| {
            if x < width {
                threshold::pixel_bit(image.get(x, y), invert)
            } else {
                invert
            }
        })
        .collect()
}

/// Pack a bit row into bytes, MSB first.
pub fn pack_row(bits: &[bool]) -> Vec<u8> {
    let mut bytes = alloc::vec![0u8; bits.len().div_ceil(8)];
    for (idx, &bit) in bits.iter().enumerate() {
        bytes[idx / 8] |= (bit as u8) << (7 - (idx % 8));
    }
    bytes
}
