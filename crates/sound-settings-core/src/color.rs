// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Packed ARGB colors and their text encodings.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Packed 32-bit color, alpha in the high byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Argb(u32);

/// Input was not a recognizable color encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed color '{0}'")]
pub struct ParseColorError(pub String);

impl Argb {
    /// Build from `[a, r, g, b]`.
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    /// Reinterpret a stored signed integer as a color (bit-for-bit).
    pub const fn from_stored(stored: i32) -> Self {
        Self(u32::from_be_bytes(stored.to_be_bytes()))
    }

    /// Signed integer form used by the settings store (bit-for-bit).
    pub const fn to_stored(self) -> i32 {
        i32::from_be_bytes(self.0.to_be_bytes())
    }

    /// Raw packed value.
    pub const fn packed(self) -> u32 {
        self.0
    }

    /// Alpha channel.
    pub const fn alpha(self) -> u8 {
        self.0.to_be_bytes()[0]
    }

    /// Lowercase `#aarrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:08x}", self.0)
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

fn parse_hex_digits(digits: &str) -> Option<Argb> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    match digits.len() {
        8 => Some(Argb(value)),
        6 => Some(Argb(0xFF00_0000 | value)),
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<Argb> {
    let value: i64 = text.parse().ok()?;
    if let Ok(signed) = i32::try_from(value) {
        return Some(Argb::from_stored(signed));
    }
    u32::try_from(value).ok().map(Argb)
}

impl FromStr for Argb {
    type Err = ParseColorError;

    /// Accepts `#aarrggbb`, `#rrggbb` (opaque), a decimal packed integer, or
    /// bare hex digits. Decimal wins when a bare string is valid as both.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let parsed = match text.strip_prefix('#') {
            Some(digits) => parse_hex_digits(digits),
            None => parse_decimal(text).or_else(|| parse_hex_digits(text)),
        };
        parsed.ok_or_else(|| ParseColorError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn default_teal_renders_lowercase_hex() {
        let c = Argb::from_bytes([0xFF, 0x80, 0xCB, 0xC4]);
        assert_eq!(c.to_hex(), "#ff80cbc4");
        assert_eq!(c.to_string(), "#ff80cbc4");
        assert_eq!(c.alpha(), 0xFF);
    }

    #[test]
    fn stored_form_keeps_bits() {
        let c = Argb::from_bytes([0xFF, 0x00, 0x00, 0x01]);
        assert!(c.to_stored() < 0);
        assert_eq!(Argb::from_stored(c.to_stored()), c);
    }

    #[test]
    fn six_digit_hex_is_opaque() {
        let c: Argb = "#336699".parse().unwrap();
        assert_eq!(c.packed(), 0xFF33_6699);
    }

    #[test]
    fn picker_integers_are_accepted() {
        let signed: Argb = "-8336444".parse().unwrap();
        assert_eq!(signed.to_hex(), "#ff80cbc4");
        let unsigned: Argb = "4286630852".parse().unwrap();
        assert_eq!(unsigned, signed);
    }

    #[test]
    fn bare_hex_falls_back_after_decimal() {
        let c: Argb = "ff80cbc4".parse().unwrap();
        assert_eq!(c.packed(), 0xFF80_CBC4);
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        for bad in ["", "#", "#12345", "#gg0000", "teal", "#ff80cbc4ff", "99999999999"] {
            assert!(bad.parse::<Argb>().is_err(), "{bad:?} should not parse");
        }
    }
}
