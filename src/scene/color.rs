//! Normalized RGBA colors and hex conversion.

use std::fmt;

use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color: '{0}'")]
pub struct ParseColorError(String);

/// A color with channels in the normalized [0, 1] range.
///
/// Serializes as a `[r, g, b, a]` array; deserializes from either a
/// 3-element (alpha defaults to 1.0) or 4-element array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Fallback color for elements missing from a palette.
    pub const fn grey() -> Self {
        Self::opaque(0.8, 0.8, 0.8)
    }

    pub const fn black() -> Self {
        Self::opaque(0.0, 0.0, 0.0)
    }

    /// Quantizes one channel to 8 bits, truncating toward zero.
    fn quantize(channel: f64) -> u8 {
        (channel.clamp(0.0, 1.0) * 255.0) as u8
    }

    /// `#rrggbb` form; alpha is dropped. Channels are scaled by 255 and
    /// truncated, so converting back and forth reproduces the same string.
    pub fn to_hex(self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            Self::quantize(self.r),
            Self::quantize(self.g),
            Self::quantize(self.b)
        )
    }

    /// `0xrrggbb` form, the literal NGL color schemes expect.
    pub fn to_js_hex(self) -> String {
        format!(
            "0x{:02x}{:02x}{:02x}",
            Self::quantize(self.r),
            Self::quantize(self.g),
            Self::quantize(self.b)
        )
    }

    /// Parses `#rrggbb`, `0xrrggbb` or bare `rrggbb` into normalized
    /// channels with the given alpha.
    pub fn from_hex(s: &str, alpha: f64) -> Result<Self, ParseColorError> {
        let digits = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .unwrap_or(s);
        if digits.len() != 6 {
            return Err(ParseColorError(s.to_string()));
        }
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ParseColorError(s.to_string()))
        };
        Ok(Self::new(
            parse(0..2)? as f64 / 255.0,
            parse(2..4)? as f64 / 255.0,
            parse(4..6)? as f64 / 255.0,
            alpha,
        ))
    }
}

impl std::str::FromStr for Rgba {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s, 1.0)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(4)?;
        tup.serialize_element(&self.r)?;
        tup.serialize_element(&self.g)?;
        tup.serialize_element(&self.b)?;
        tup.serialize_element(&self.a)?;
        tup.end()
    }
}

struct RgbaVisitor;

impl<'de> Visitor<'de> for RgbaVisitor {
    type Value = Rgba;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an array of 3 or 4 numbers in [0, 1]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Rgba, A::Error> {
        let r = seq
            .next_element()?
            .ok_or_else(|| serde::de::Error::invalid_length(0, &self))?;
        let g = seq
            .next_element()?
            .ok_or_else(|| serde::de::Error::invalid_length(1, &self))?;
        let b = seq
            .next_element()?
            .ok_or_else(|| serde::de::Error::invalid_length(2, &self))?;
        let a = seq.next_element()?.unwrap_or(1.0);
        if seq.next_element::<f64>()?.is_some() {
            return Err(serde::de::Error::invalid_length(5, &self));
        }
        Ok(Rgba::new(r, g, b, a))
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(RgbaVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn to_hex_truncates_channels() {
        // 0.5 * 255 = 127.5 -> 0x7f, not 0x80
        assert_eq!(Rgba::opaque(0.5, 0.5, 0.5).to_hex(), "#7f7f7f");
        assert_eq!(Rgba::opaque(1.0, 0.0, 0.0).to_hex(), "#ff0000");
        assert_eq!(Rgba::opaque(0.0, 0.0, 0.0).to_hex(), "#000000");
    }

    #[test]
    fn to_hex_clamps_out_of_range() {
        assert_eq!(Rgba::opaque(1.5, -0.2, 1.0).to_hex(), "#ff00ff");
    }

    #[test]
    fn to_js_hex_prefix() {
        assert_eq!(Rgba::opaque(1.0, 0.8, 0.8).to_js_hex(), "0xffcccc");
    }

    #[test]
    fn from_hex_accepts_three_prefixes() {
        for s in ["#ffcccc", "0xffcccc", "ffcccc"] {
            let c = Rgba::from_hex(s, 1.0).unwrap();
            assert!(approx_eq(c.r, 1.0, 1e-12));
            assert!(approx_eq(c.g, 204.0 / 255.0, 1e-12));
            assert!(approx_eq(c.b, 204.0 / 255.0, 1e-12));
            assert!(approx_eq(c.a, 1.0, 1e-12));
        }
    }

    #[test]
    fn from_hex_rejects_malformed() {
        assert!(Rgba::from_hex("#fff", 1.0).is_err());
        assert!(Rgba::from_hex("#gggggg", 1.0).is_err());
        assert!(Rgba::from_hex("", 1.0).is_err());
    }

    #[test]
    fn round_trip_idempotent_after_first_quantization() {
        // Arbitrary channel values lose precision once; after that the
        // hex form is a fixed point.
        for c in [
            Rgba::opaque(0.123, 0.456, 0.789),
            Rgba::opaque(0.5, 0.25, 0.999),
            Rgba::opaque(1.0, 0.0, 0.3333),
        ] {
            let hex = c.to_hex();
            let back = Rgba::from_hex(&hex, 1.0).unwrap();
            assert_eq!(back.to_hex(), hex);
        }
    }

    #[test]
    fn serde_three_and_four_element_arrays() {
        let c: Rgba = serde_json::from_str("[1.0, 0.5, 0.0]").unwrap();
        assert!(approx_eq(c.a, 1.0, 1e-12));
        let c: Rgba = serde_json::from_str("[1.0, 0.5, 0.0, 0.25]").unwrap();
        assert!(approx_eq(c.a, 0.25, 1e-12));
        assert!(serde_json::from_str::<Rgba>("[1.0, 0.5]").is_err());

        let json = serde_json::to_string(&Rgba::opaque(1.0, 0.5, 0.0)).unwrap();
        assert_eq!(json, "[1.0,0.5,0.0,1.0]");
    }
}
