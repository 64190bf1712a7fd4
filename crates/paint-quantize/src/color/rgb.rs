//! 8-bit RGB color type
//!
//! `Rgb` is the value type every stage of the pipeline speaks: decoded image
//! pixels, base and accent palette entries, and preview output.

use std::fmt;

/// A color with three 8-bit channels.
///
/// Immutable value type. Equality, ordering and hashing are by channel value,
/// so `Rgb` can key frequency tables directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub red: u8,
    /// Green channel (0..=255)
    pub green: u8,
    /// Blue channel (0..=255)
    pub blue: u8,
}

impl Rgb {
    /// Create a new color from channel values.
    ///
    /// # Example
    /// ```
    /// use paint_quantize::Rgb;
    /// let red = Rgb::new(237, 28, 36);
    /// assert_eq!(red.red, 237);
    /// ```
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Create a color from a byte array [R, G, B].
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

impl fmt::Display for Rgb {
    /// Formats as `#RRGGBB` (uppercase hex).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}
