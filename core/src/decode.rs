use alloc::{collections::BTreeMap, string::String, vec::Vec};
use log::info;
use memchr::memchr_iter;

use crate::bitmap::{PIX_OFF, PIX_ON, PixelBuffer};

/// A decode that recognizes fewer rows than this is abandoned.
const MIN_ROWS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// No line of the input yielded a usable literal count
    NoBitmapFound,
    /// Fewer than [`MIN_ROWS`] lines matched the inferred width
    InsufficientRows { rows: usize },
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeError::NoBitmapFound => write!(f, "no bitmap found in the input text"),
            DecodeError::InsufficientRows { rows } => {
                write!(f, "only {} usable rows, need at least {}", rows, MIN_ROWS)
            }
        }
    }
}

pub type Result<T> = core::result::Result<T, DecodeError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBitmap {
    /// Width in pixels, inferred from the modal per-line literal count
    pub width: usize,
    /// Height in pixels, the number of accepted lines
    pub height: usize,
    pub image: PixelBuffer,
}

/// Reconstruct a bitmap from an arbitrary block of C/C++ source text.
///
/// The width is taken from the per-line literal counts by majority vote,
/// which screens out headers, macros and stray prose without any real
/// parsing. Lines whose literals expand to exactly that many pixels become
/// the bitmap rows; everything else is dropped.
pub fn decode(text: &str) -> Result<DecodedBitmap> {
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    let mut most = 0;
    let mut winner = 0;
    for line in text.split('\n') {
        let fields = strip_blanks(line);
        let n = fields
            .split(',')
            .filter(|field| parse_literal(field).is_some())
            .count();
        if n == 0 {
            continue;
        }
        let count = counts.entry(n).or_insert(0);
        *count += 1;
        // a later count must beat, not tie, the running maximum
        if *count > most {
            most = *count;
            winner = n;
        }
    }
    if winner == 0 {
        return Err(DecodeError::NoBitmapFound);
    }
    let width = winner * 8;

    let mut rows: Vec<Vec<_>> = Vec::new();
    for line in text.split('\n') {
        let fields = strip_blanks(line);
        let mut row = Vec::new();
        for field in fields.split(',') {
            if let Some(byte) = parse_literal(field) {
                for bit in (0..8).rev() {
                    row.push(if byte >> bit & 1 == 1 { PIX_ON } else { PIX_OFF });
                }
            }
        }
        if row.len() == width {
            rows.push(row);
        }
    }

    let height = rows.len();
    if height < MIN_ROWS {
        return Err(DecodeError::InsufficientRows { rows: height });
    }
    info!("decoded a {}x{} bitmap", width, height);

    let mut pixels = Vec::with_capacity(width * height);
    for row in rows {
        pixels.extend(row);
    }
    Ok(DecodedBitmap {
        width,
        height,
        image: PixelBuffer::new(width, height, pixels),
    })
}

fn strip_blanks(line: &str) -> String {
    line.chars().filter(|&c| c != ' ' && c != '\t').collect()
}

/// Find a numeric literal anywhere inside a comma-separated field and parse
/// it to a byte. Searching rather than matching the whole field keeps rows
/// with glued trailing annotations (`0xC3//..####..`) parseable. Forms, in
/// priority order: `0x`/`0X` hex, `0b` binary, `B` binary, plain decimal.
/// Over-long literals keep their low byte.
fn parse_literal(field: &str) -> Option<u8> {
    let bytes = field.as_bytes();
    for at in memchr_iter(b'0', bytes) {
        if matches!(bytes.get(at + 1), Some(b'x' | b'X')) {
            let digits = digit_run(&bytes[at + 2..], |b| b.is_ascii_hexdigit());
            if !digits.is_empty() {
                return Some(fold(digits, 16));
            }
        }
    }
    for at in memchr_iter(b'0', bytes) {
        if bytes.get(at + 1) == Some(&b'b') {
            let digits = digit_run(&bytes[at + 2..], |b| matches!(b, b'0' | b'1'));
            if !digits.is_empty() {
                return Some(fold(digits, 2));
            }
        }
    }
    for at in memchr_iter(b'B', bytes) {
        let digits = digit_run(&bytes[at + 1..], |b| matches!(b, b'0' | b'1'));
        if !digits.is_empty() {
            return Some(fold(digits, 2));
        }
    }
    let start = bytes.iter().position(|b| b.is_ascii_digit())?;
    Some(fold(digit_run(&bytes[start..], |b| b.is_ascii_digit()), 10))
}

fn digit_run(bytes: &[u8], valid: impl Fn(u8) -> bool) -> &[u8] {
    let end = bytes.iter().position(|&b| !valid(b)).unwrap_or(bytes.len());
    &bytes[..end]
}

fn fold(digits: &[u8], radix: u8) -> u8 {
    digits.iter().fold(0u8, |acc, &d| {
        let value = match d {
            b'0'..=b'9' => d - b'0',
            b'a'..=b'f' => d - b'a' + 10,
            b'A'..=b'F' => d - b'A' + 10,
            _ => 0,
        };
        acc.wrapping_mul(radix).wrapping_add(value)
    })
}
