use crate::options::OutputProfile;

/// Status screen geometry: 16 bytes (128 px) by 19 rows.
pub const STATUS_BYTEWIDTH: usize = 16;
pub const STATUS_ROWS: usize = 19;

/// Extra geometry the status profile needs around a smaller image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    /// Fill bytes appended to each pixel row
    pub extra_x: usize,
    /// Fill rows appended below the image
    pub extra_y: usize,
    /// Horizontal offset in pixels communicated to the consumer instead of
    /// physically padding the rows
    pub shift_x: Option<usize>,
}

impl Padding {
    pub const NONE: Padding = Padding {
        extra_x: 0,
        extra_y: 0,
        shift_x: None,
    };
}

/// Fill byte matching the background polarity, so padding is visually blank.
pub fn fill_byte(invert: bool) -> u8 {
    if invert { 0xFF } else { 0x00 }
}

/// Compute the padding a profile requires around a `bytewidth` x `height`
/// byte grid. Only `Status` ever pads: every row ends up 16 bytes wide and
/// the grid 19 rows tall. A narrow image is either padded on the trailing
/// side (`right_justify`) or left at its own width with the offset reported
/// as a shift directive.
pub fn compute(
    profile: OutputProfile,
    right_justify: bool,
    bytewidth: usize,
    height: usize,
) -> Padding {
    if profile != OutputProfile::Status {
        return Padding::NONE;
    }

    let mut extra_x = STATUS_BYTEWIDTH.saturating_sub(bytewidth);
    let mut shift_x = None;
    if !right_justify && extra_x > 0 {
        shift_x = Some(extra_x * 8);
        extra_x = 0;
    }

    Padding {
        extra_x,
        extra_y: STATUS_ROWS.saturating_sub(height),
        shift_x,
    }
}
