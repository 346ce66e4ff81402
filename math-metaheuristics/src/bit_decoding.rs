//! Decoding of 32-bit genes into real coordinates.

use std::fmt;
use std::str::FromStr;

use ndarray::Array1;

use crate::bounds::Bounds;
use crate::error::{OptimizerError, Result};

/// Largest value of eight BCD digits.
const BCD_MAX: f64 = 99_999_999.0;
/// Scale of the Q16.16 fixed-point format.
const Q16_SCALE: f64 = 65_536.0;

/// Interpretation of a 32-bit gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitDecoder {
    /// Bits read as an `f32`, squashed with `tanh` and scaled to the larger
    /// bound magnitude.
    #[default]
    Ieee754,
    /// Two's complement Q16.16.
    FixedPoint,
    /// Eight packed decimal digits mapped linearly onto the bounds.
    Bcd,
}

impl FromStr for BitDecoder {
    type Err = OptimizerError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ieee754" | "ieee" | "float" => Ok(BitDecoder::Ieee754),
            "fixedpoint" | "fixed" | "fixed_point" | "q16.16" => Ok(BitDecoder::FixedPoint),
            "bcd" => Ok(BitDecoder::Bcd),
            _ => Err(OptimizerError::UnknownDecoder(s.to_string())),
        }
    }
}

impl fmt::Display for BitDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitDecoder::Ieee754 => f.write_str("ieee754"),
            BitDecoder::FixedPoint => f.write_str("fixedpoint"),
            BitDecoder::Bcd => f.write_str("bcd"),
        }
    }
}

/// Decodes one word into `[low, high]`.
///
/// # Panics
///
/// Panics if `low > high` or either bound is NaN. Genomes decoded through [`Bounds`] never
/// hit this; only direct callers can.
///
/// ```rust
/// use math_metaheuristics::{BitDecoder, decode_word};
/// assert_eq!(decode_word(BitDecoder::FixedPoint, 0x0001_0000, -10.0, 10.0), 1.0);
/// assert_eq!(decode_word(BitDecoder::Bcd, 0x9999_9999, -10.0, 10.0), 10.0);
/// ```
pub fn decode_word(decoder: BitDecoder, word: u32, low: f64, high: f64) -> f64 {
    assert!(low <= high, "inverted decoding bounds [{low}, {high}]");
    match decoder {
        BitDecoder::Ieee754 => {
            let f = f32::from_bits(word) as f64;
            let f = if f.is_finite() { f } else { 0.0 };
            (f.tanh() * low.abs().max(high.abs())).clamp(low, high)
        }
        BitDecoder::FixedPoint => (word as i32 as f64 / Q16_SCALE).clamp(low, high),
        BitDecoder::Bcd => {
            let digits = (0..8).rev().fold(0u64, |acc, nibble| {
                let d = (word >> (nibble * 4)) & 0xF;
                acc * 10 + d.min(9) as u64
            });
            let t = digits as f64 / BCD_MAX;
            low * (1.0 - t) + high * t
        }
    }
}

/// Decodes a whole genome, one word per dimension.
pub(crate) fn decode_genome(decoder: BitDecoder, genome: &[u32], bounds: &Bounds) -> Array1<f64> {
    genome
        .iter()
        .enumerate()
        .map(|(j, &w)| decode_word(decoder, w, bounds.lower()[j], bounds.upper()[j]))
        .collect()
}
