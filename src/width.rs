//! Generic input-unit widths.
//!
//! The lexical core (NFA execution, the scanner, string/char payloads) is
//! parameterized over the width of one input unit instead of being tied to
//! `char`. Three widths are supported end-to-end, matching the three
//! fixed-width Unicode encodings: 8-bit, 16-bit and 32-bit code units.
//!
//! The regex mini-language itself is always written as 8-bit ASCII text (it
//! is a pattern over character *classes*, not over a specific source
//! buffer), so matching against a wider buffer requires widening each class
//! member and literal byte to the buffer's unit type at compile time.

use std::fmt;

/// One input unit a [`crate::scanner::Scanner`] or [`crate::regex::Nfa`] can
/// consume.
///
/// Implemented for `u8`, `u16` and `u32`. `u8` buffers are raw bytes (not
/// necessarily valid UTF-8 — the scanner never requires that, only its
/// human-facing snippet rendering does its best to decode one).
pub trait CharWidth: Copy + Eq + Ord + fmt::Debug + 'static {
    /// Widens a pattern-language ASCII byte to this unit type.
    fn from_ascii(byte: u8) -> Self;

    /// Attempts to decode a run of units back to a displayable `String`, for
    /// diagnostics only. Lossy: unrepresentable sequences are replaced with
    /// `U+FFFD`.
    fn render(units: &[Self]) -> String;
}

impl CharWidth for u8 {
    fn from_ascii(byte: u8) -> Self {
        byte
    }

    fn render(units: &[Self]) -> String {
        String::from_utf8_lossy(units).into_owned()
    }
}

impl CharWidth for u16 {
    fn from_ascii(byte: u8) -> Self {
        byte as u16
    }

    fn render(units: &[Self]) -> String {
        char::decode_utf16(units.iter().copied())
            .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }
}

impl CharWidth for u32 {
    fn from_ascii(byte: u8) -> Self {
        byte as u32
    }

    fn render(units: &[Self]) -> String {
        units
            .iter()
            .map(|&u| char::from_u32(u).unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_widening_preserves_value() {
        assert_eq!(u8::from_ascii(b'a'), b'a');
        assert_eq!(u16::from_ascii(b'a'), b'a' as u16);
        assert_eq!(u32::from_ascii(b'a'), b'a' as u32);
    }

    #[test]
    fn render_round_trips_ascii() {
        let units: Vec<u16> = "abc".encode_utf16().collect();
        assert_eq!(u16::render(&units), "abc");

        let units: Vec<u32> = "abc".chars().map(|c| c as u32).collect();
        assert_eq!(u32::render(&units), "abc");
    }
}
