// Timing conversion for MusicXML divisions to 960 PPQ - feature 006-musicxml-import

use super::errors::ConversionError;

/// Rational fraction for lossless timing conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    pub numerator: i64,
    pub denominator: i64,
}

impl Fraction {
    /// Create fraction for MusicXML duration → 960 PPQ conversion
    pub fn from_musicxml(duration: i32, source_divisions: i32) -> Self {
        let numerator = duration as i64 * 960;
        let denominator = source_divisions as i64;
        Self::new(numerator, denominator).normalize()
    }

    /// Create a new fraction
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Reduce to lowest terms using GCD
    fn normalize(self) -> Self {
        let gcd = gcd(self.numerator, self.denominator);
        Fraction {
            numerator: self.numerator / gcd,
            denominator: self.denominator / gcd,
        }
    }

    /// Convert to integer ticks (may require rounding)
    pub fn to_ticks(&self) -> Result<i32, ConversionError> {
        if self.denominator == 1 {
            // Exact conversion
            if self.numerator > i32::MAX as i64 || self.numerator < i32::MIN as i64 {
                return Err(ConversionError::TickOverflow {
                    value: self.numerator,
                });
            }
            Ok(self.numerator as i32)
        } else {
            // Round to nearest integer
            let rounded = (self.numerator + self.denominator / 2) / self.denominator;
            if rounded > i32::MAX as i64 || rounded < i32::MIN as i64 {
                return Err(ConversionError::TickOverflow { value: rounded });
            }
            Ok(rounded as i32)
        }
    }

    /// Check if rounding is required (denominator != 1)
    pub fn requires_rounding(&self) -> bool {
        self.denominator != 1
    }
}

/// Compute greatest common divisor using Euclidean algorithm
fn gcd(a: i64, b: i64) -> i64 {
    let a = a.abs();
    let b = b.abs();
    if b == 0 { a } else { gcd(b, a % b) }
}
