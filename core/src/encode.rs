use alloc::{format, string::String};
use log::trace;

use crate::{
    bitmap::{MAX_HEIGHT, MAX_WIDTH, PixelBuffer},
    options::{EncodingOptions, OutputProfile},
    packer, padding,
    padding::STATUS_BYTEWIDTH,
};

/// Glyphs for the half-width preview, indexed by a (left, right) bit pair.
const SKINNY_GLYPHS: [char; 4] = ['·', '▐', '▌', '█'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    ImageTooLarge { width: usize, height: usize },
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EncodeError::ImageTooLarge { width, height } => write!(
                f,
                "image too large ({}x{}, maximum {}x{})",
                width, height, MAX_WIDTH, MAX_HEIGHT
            ),
        }
    }
}

pub type Result<T> = core::result::Result<T, EncodeError>;

/// Render an image as a C/C++ literal-array snippet.
///
/// `source` is free text describing where the image came from; it is echoed
/// into the header comment and nowhere else.
pub fn encode(image: &PixelBuffer, options: &EncodingOptions, source: &str) -> Result<String> {
    let width = image.width();
    let height = image.height();
    if width > MAX_WIDTH || height > MAX_HEIGHT {
        return Err(EncodeError::ImageTooLarge { width, height });
    }

    let bytewidth = packer::bytewidth(width);
    let pad = padding::compute(options.profile, options.right_justify, bytewidth, height);
    let fill = options.format.render(padding::fill_byte(options.invert));
    trace!(
        "encoding {}x{} image, {} bytes per row, padding {:?}",
        width, height, bytewidth, pad
    );

    let mut out = String::new();
    out.push_str("/**\n * Made with the lcdbmp bitmap converter\n *\n");
    out.push_str(&format!(" * This bitmap from {source}\n */\n"));

    match options.profile {
        OutputProfile::Status => {
            if let Some(shift) = pad.shift_x {
                out.push_str(&format!("#define STATUS_SCREEN_X {shift}\n"));
            }
            out.push_str(&format!(
                "#define STATUS_SCREENWIDTH {}\n",
                (bytewidth + pad.extra_x) * 8
            ));
        }
        OutputProfile::Boot => {
            out.push_str(&format!("#define CUSTOM_BOOTSCREEN_BMPWIDTH  {width}\n"));
            out.push_str(&format!("#define CUSTOM_BOOTSCREEN_BMPHEIGHT {height}\n"));
        }
        OutputProfile::Generic => {
            let prefix = options.name.to_uppercase();
            out.push_str(&format!("#define {prefix}_BMPWIDTH  {width}\n"));
            out.push_str(&format!("#define {prefix}_BMPHEIGHT {height}\n"));
        }
    }

    let array_name = match options.profile {
        OutputProfile::Generic => options.name.as_str(),
        OutputProfile::Boot => "custom_start_bmp",
        OutputProfile::Status => "status_screen0_bmp",
    };
    out.push_str(&format!("const unsigned char {array_name}[] PROGMEM = {{\n"));

    for y in 0..height {
        let bits = packer::row_bits(image, y, options.invert);
        let bytes = packer::pack_row(&bits);
        out.push_str("  ");
        for (i, &byte) in bytes.iter().enumerate() {
            out.push_str(&options.format.render(byte));
            // Only the true final literal of the array drops its comma
            let last = y + 1 == height && i + 1 == bytes.len();
            out.push(if last && pad.extra_x == 0 && pad.extra_y == 0 {
                ' '
            } else {
                ','
            });
        }
        for x in (0..pad.extra_x).rev() {
            out.push_str(&fill);
            out.push(if x > 0 || y + 1 < height || pad.extra_y > 0 {
                ','
            } else {
                ' '
            });
        }
        if options.ascii_preview {
            out.push_str(" // ");
            annotate(&mut out, &bits, options.skinny_ascii);
        }
        out.push('\n');
    }

    // Padding rows span the full status width even when a shift directive
    // left the pixel rows unpadded
    for y in (0..pad.extra_y).rev() {
        out.push_str("  ");
        for x in (0..STATUS_BYTEWIDTH).rev() {
            out.push_str(&fill);
            if x > 0 || y > 0 {
                out.push(',');
            }
        }
        out.push('\n');
    }

    out.push_str("};\n");
    Ok(out)
}

fn annotate(out: &mut String, bits: &[bool], skinny: bool) {
    if skinny {
        for pair in bits.chunks_exact(2) {
            out.push(SKINNY_GLYPHS[((pair[0] as usize) << 1) | pair[1] as usize]);
        }
    } else {
        for &bit in bits {
            out.push(if bit { '#' } else { '.' });
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use pretty_assertions::assert_eq;
    use std::{string::ToString, vec::Vec};

    use super::*;
    use crate::{
        bitmap::{PIX_OFF, PIX_ON},
        options::NumericFormat,
    };

    fn options(name: &str) -> EncodingOptions {
        EncodingOptions {
            name: name.to_string(),
            ..EncodingOptions::default()
        }
    }

    fn from_bits(width: usize, height: usize, bits: &[u8]) -> PixelBuffer {
        let pixels = bits
            .iter()
            .map(|&b| if b != 0 { PIX_ON } else { PIX_OFF })
            .collect();
        PixelBuffer::new(width, height, pixels)
    }

    #[test]
    fn canonical_single_byte_image() {
        let image = PixelBuffer::filled(8, 1, PIX_ON);
        let text = encode(&image, &options("logo"), "an 8x1 test image").unwrap();
        assert_eq!(
            text,
            "/**\n\
             \x20* Made with the lcdbmp bitmap converter\n\
             \x20*\n\
             \x20* This bitmap from an 8x1 test image\n\
             \x20*/\n\
             #define LOGO_BMPWIDTH  8\n\
             #define LOGO_BMPHEIGHT 1\n\
             const unsigned char logo[] PROGMEM = {\n\
             \x20 0xFF \n\
             };\n"
        );
    }

    #[test]
    fn invert_flips_every_bit() {
        let image = from_bits(8, 1, &[1, 0, 1, 1, 0, 0, 1, 1]);
        let plain = encode(&image, &options("bm"), "test").unwrap();
        let inverted = encode(
            &image,
            &EncodingOptions {
                invert: true,
                ..options("bm")
            },
            "test",
        )
        .unwrap();
        assert!(plain.contains("0xB3"));
        assert!(inverted.contains("0x4C"));
    }

    #[test]
    fn binary_literals() {
        let image = from_bits(8, 1, &[1, 0, 1, 1, 0, 0, 1, 1]);
        let text = encode(
            &image,
            &EncodingOptions {
                format: NumericFormat::Binary,
                ..options("bm")
            },
            "test",
        )
        .unwrap();
        assert!(text.contains("  B10110011 \n"));
    }

    #[test]
    fn boot_profile_macros() {
        let image = PixelBuffer::filled(16, 2, PIX_OFF);
        let text = encode(
            &image,
            &EncodingOptions {
                profile: OutputProfile::Boot,
                ..options("ignored")
            },
            "test",
        )
        .unwrap();
        assert!(text.contains("#define CUSTOM_BOOTSCREEN_BMPWIDTH  16\n"));
        assert!(text.contains("#define CUSTOM_BOOTSCREEN_BMPHEIGHT 2\n"));
        assert!(text.contains("const unsigned char custom_start_bmp[] PROGMEM = {\n"));
        assert!(!text.contains("IGNORED"));
    }

    #[test]
    fn status_right_justify_pads_rows_and_appends_fill_rows() {
        let image = PixelBuffer::filled(64, 10, PIX_OFF);
        let text = encode(
            &image,
            &EncodingOptions {
                profile: OutputProfile::Status,
                right_justify: true,
                ..options("ignored")
            },
            "test",
        )
        .unwrap();
        assert!(text.contains("#define STATUS_SCREENWIDTH 128\n"));
        assert!(!text.contains("STATUS_SCREEN_X"));
        assert!(text.contains("const unsigned char status_screen0_bmp[] PROGMEM = {\n"));

        let rows: Vec<&str> = text
            .lines()
            .filter(|line| line.starts_with("  0x"))
            .collect();
        assert_eq!(rows.len(), 19);
        for row in &rows {
            assert_eq!(row.matches("0x00").count(), 16);
        }
        // the final fill literal carries neither comma nor space
        assert!(text.ends_with("0x00\n};\n"));
    }

    #[test]
    fn status_left_pad_emits_shift_directive() {
        let image = PixelBuffer::filled(64, 10, PIX_OFF);
        let text = encode(
            &image,
            &EncodingOptions {
                profile: OutputProfile::Status,
                right_justify: false,
                ..options("ignored")
            },
            "test",
        )
        .unwrap();
        assert!(text.contains("#define STATUS_SCREEN_X 64\n"));
        assert!(text.contains("#define STATUS_SCREENWIDTH 64\n"));

        let rows: Vec<&str> = text
            .lines()
            .filter(|line| line.starts_with("  0x"))
            .collect();
        assert_eq!(rows.len(), 19);
        // pixel rows stay 8 bytes wide, fill rows span all 16
        assert_eq!(rows[0].matches("0x00").count(), 8);
        assert_eq!(rows[10].matches("0x00").count(), 16);
    }

    #[test]
    fn status_inverted_fill() {
        let image = PixelBuffer::filled(64, 10, PIX_ON);
        let text = encode(
            &image,
            &EncodingOptions {
                profile: OutputProfile::Status,
                right_justify: true,
                invert: true,
                ..options("ignored")
            },
            "test",
        )
        .unwrap();
        // image bits invert to 0x00, padding fills with 0xFF
        assert!(text.contains("0x00,0xFF"));
        assert!(text.ends_with("0xFF\n};\n"));
    }

    #[test]
    fn ascii_preview_annotates_each_row() {
        let image = from_bits(8, 1, &[1, 0, 1, 1, 0, 0, 1, 1]);
        let text = encode(
            &image,
            &EncodingOptions {
                ascii_preview: true,
                ..options("bm")
            },
            "test",
        )
        .unwrap();
        assert!(text.contains("  0xB3  // #.##..##\n"));
    }

    #[test]
    fn ascii_preview_covers_synthetic_columns() {
        let image = PixelBuffer::filled(4, 1, PIX_ON);
        let text = encode(
            &image,
            &EncodingOptions {
                ascii_preview: true,
                ..options("bm")
            },
            "test",
        )
        .unwrap();
        assert!(text.contains("  0xF0  // ####....\n"));
    }

    #[test]
    fn skinny_ascii_halves_the_preview() {
        let image = from_bits(8, 1, &[1, 0, 1, 1, 0, 0, 1, 1]);
        let text = encode(
            &image,
            &EncodingOptions {
                ascii_preview: true,
                skinny_ascii: true,
                ..options("bm")
            },
            "test",
        )
        .unwrap();
        assert!(text.contains("  0xB3  // ▌█·█\n"));
    }

    #[test]
    fn rejects_oversized_images() {
        let image = PixelBuffer::filled(129, 1, PIX_OFF);
        assert_eq!(
            encode(&image, &options("bm"), "test"),
            Err(EncodeError::ImageTooLarge {
                width: 129,
                height: 1
            })
        );
        let image = PixelBuffer::filled(1, 65, PIX_OFF);
        assert!(encode(&image, &options("bm"), "test").is_err());
    }

    #[test]
    fn multi_row_commas() {
        let image = PixelBuffer::filled(16, 2, PIX_ON);
        let text = encode(&image, &options("bm"), "test").unwrap();
        assert!(text.contains("  0xFF,0xFF,\n  0xFF,0xFF \n};\n"));
    }
}
