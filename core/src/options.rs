use alloc::{format, string::String};

/// How byte literals are rendered in the generated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericFormat {
    /// `0xNN`, two uppercase hex digits
    #[default]
    Hex,
    /// `Bnnnnnnnn`, eight binary digits
    Binary,
}

impl NumericFormat {
    pub fn render(self, byte: u8) -> String {
        match self {
            NumericFormat::Hex => format!("0x{byte:02X}"),
            NumericFormat::Binary => format!("B{byte:08b}"),
        }
    }
}

/// Output shape: which size macros get emitted and how rows are padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OutputProfile {
    /// Free-standing array named by the caller
    #[default]
    Generic,
    /// Custom boot screen image
    Boot,
    /// Status screen image, padded to the full 128x152 px grid
    Status,
}

#[derive(Debug, Clone)]
pub struct EncodingOptions {
    /// Flip on/off polarity of every bit, padding included
    pub invert: bool,
    pub format: NumericFormat,
    /// Append an ASCII rendering of each row as a trailing comment
    pub ascii_preview: bool,
    /// Half-width ASCII preview, only meaningful with `ascii_preview`
    pub skinny_ascii: bool,
    pub profile: OutputProfile,
    /// Push a narrow status graphic to the right edge, `Status` only
    pub right_justify: bool,
    /// Identifier for the generated array and macros, `Generic` only.
    /// Callers should mint a fresh one per conversion to avoid symbol
    /// collisions between coexisting outputs.
    pub name: String,
}

impl Default for EncodingOptions {
    fn default() -> Self {
        Self {
            invert: false,
            format: NumericFormat::default(),
            ascii_preview: false,
            skinny_ascii: false,
            profile: OutputProfile::default(),
            right_justify: false,
            name: String::from("bitmap"),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn literal_rendering() {
        assert_eq!(NumericFormat::Hex.render(0xFF), "0xFF");
        assert_eq!(NumericFormat::Hex.render(0x0A), "0x0A");
        assert_eq!(NumericFormat::Binary.render(0xB3), "B10110011");
        assert_eq!(NumericFormat::Binary.render(0x00), "B00000000");
    }

    #[test]
    fn profile_parses_from_lowercase() {
        assert_eq!("generic".parse(), Ok(OutputProfile::Generic));
        assert_eq!("boot".parse(), Ok(OutputProfile::Boot));
        assert_eq!("status".parse(), Ok(OutputProfile::Status));
        assert!("lcd".parse::<OutputProfile>().is_err());
    }
}
