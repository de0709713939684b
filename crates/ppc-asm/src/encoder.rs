//! Bit-field composition of 32-bit instruction words.
//!
//! Every PowerPC instruction is one big-endian 32-bit word made of
//! contiguous fields, most-significant first:
//!
//! ```text
//! D-form:  [ opcd(6) | rt(5) | ra(5) |          d(16)           ]
//! X-form:  [ opcd(6) | rt(5) | ra(5) | rb(5) |   xo(10)   | rc(1) ]
//! I-form:  [ opcd(6) |               li(24)             | aa | lk ]
//! B-form:  [ opcd(6) | bo(5) | bi(5) |     bd(14)       | aa | lk ]
//! ```
//!
//! [`compose`] packs a list of [`Field`]s into such a word, checking each
//! value against its declared width and signedness and checking that the
//! widths cover exactly 32 bits.

use alloc::vec::Vec;

use crate::error::AsmError;

/// Width of one instruction word in bits.
pub const WORD_BITS: u32 = 32;

/// Width of one instruction word in bytes.
pub const WORD_BYTES: u64 = 4;

/// One bit field of an instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    /// Field value. Signed fields may be negative.
    pub value: i64,
    /// Width in bits (1..=32).
    pub width: u8,
    /// Whether the value is stored as two's complement.
    pub signed: bool,
}

impl Field {
    /// An unsigned field.
    #[inline]
    #[must_use]
    pub const fn unsigned(value: i64, width: u8) -> Self {
        Self {
            value,
            width,
            signed: false,
        }
    }

    /// A two's-complement signed field.
    #[inline]
    #[must_use]
    pub const fn signed(value: i64, width: u8) -> Self {
        Self {
            value,
            width,
            signed: true,
        }
    }

    /// A single-bit flag.
    #[inline]
    #[must_use]
    pub const fn flag(set: bool) -> Self {
        Self::unsigned(set as i64, 1)
    }

    /// Check the value against the declared range and return its unsigned
    /// bit pattern within the field.
    fn bits(&self) -> Result<u32, AsmError> {
        if self.width == 0 || u32::from(self.width) > WORD_BITS {
            return Err(AsmError::InvalidFieldWidth { width: self.width });
        }
        let (min, max) = AsmError::field_range(self.width, self.signed);
        if self.value < min || self.value > max {
            return Err(AsmError::FieldOverflow {
                value: self.value,
                width: self.width,
                signed: self.signed,
            });
        }
        let mask = (1u64 << self.width) - 1;
        // Negative signed values wrap to their two's-complement pattern.
        Ok((self.value as u64 & mask) as u32)
    }
}

/// Pack `fields` into one 32-bit word, most-significant field first.
///
/// # Errors
///
/// - [`AsmError::InvalidFieldWidth`] for a zero or over-wide field.
/// - [`AsmError::FieldOverflow`] when a value does not fit its field.
/// - [`AsmError::WidthMismatch`] when the widths do not total 32 bits.
///
/// # Examples
///
/// ```rust
/// use ppc_asm::encoder::{compose, Field};
///
/// // addi r3, r1, 8
/// let word = compose(&[
///     Field::unsigned(14, 6),
///     Field::unsigned(3, 5),
///     Field::unsigned(1, 5),
///     Field::signed(8, 16),
/// ])?;
/// assert_eq!(word, 0x3861_0008);
/// # Ok::<(), ppc_asm::AsmError>(())
/// ```
pub fn compose(fields: &[Field]) -> Result<u32, AsmError> {
    let total: u32 = fields.iter().map(|f| u32::from(f.width)).sum();
    if total != WORD_BITS {
        return Err(AsmError::WidthMismatch { total });
    }

    let mut word = 0u32;
    let mut bits_left = WORD_BITS;
    for field in fields {
        let bits = field.bits()?;
        bits_left -= u32::from(field.width);
        word |= bits << bits_left;
    }
    Ok(word)
}

/// Split `word` into unsigned field values along `widths`, most-significant
/// first. Inverse of [`compose`] for in-range input.
///
/// # Errors
///
/// Returns [`AsmError::InvalidFieldWidth`] or [`AsmError::WidthMismatch`]
/// when `widths` does not describe a 32-bit layout.
pub fn decompose(word: u32, widths: &[u8]) -> Result<Vec<u32>, AsmError> {
    let total: u32 = widths.iter().map(|&w| u32::from(w)).sum();
    if total != WORD_BITS {
        return Err(AsmError::WidthMismatch { total });
    }

    let mut out = Vec::with_capacity(widths.len());
    let mut bits_left = WORD_BITS;
    for &width in widths {
        if width == 0 {
            return Err(AsmError::InvalidFieldWidth { width });
        }
        bits_left -= u32::from(width);
        let mask = ((1u64 << width) - 1) as u32;
        out.push((word >> bits_left) & mask);
    }
    Ok(out)
}

/// Serialize one word in big-endian order, the only byte order used by
/// this crate.
#[inline]
#[must_use]
pub fn encode_word(word: u32) -> [u8; 4] {
    word.to_be_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn d_form(opcd: i64, rt: i64, ra: i64, d: i64) -> [Field; 4] {
        [
            Field::unsigned(opcd, 6),
            Field::unsigned(rt, 5),
            Field::unsigned(ra, 5),
            Field::signed(d, 16),
        ]
    }

    #[test]
    fn compose_d_form() {
        // stw r31, 0x1C(r1)
        assert_eq!(compose(&d_form(36, 31, 1, 0x1C)).unwrap(), 0x93E1_001C);
    }

    #[test]
    fn compose_negative_displacement() {
        // stwu r1, -0x2C(r1)
        assert_eq!(compose(&d_form(37, 1, 1, -0x2C)).unwrap(), 0x9421_FFD4);
    }

    #[test]
    fn compose_single_32_bit_field() {
        let word = compose(&[Field::unsigned(0xDEAD_BEEF, 32)]).unwrap();
        assert_eq!(word, 0xDEAD_BEEF);
    }

    #[test]
    fn signed_minus_one_fills_field() {
        let word = compose(&[
            Field::unsigned(0, 6),
            Field::signed(-1, 24),
            Field::flag(false),
            Field::flag(false),
        ])
        .unwrap();
        assert_eq!(word, 0x03FF_FFFC);
    }

    #[test]
    fn width_sum_short_fails() {
        let err = compose(&[
            Field::unsigned(0, 6),
            Field::unsigned(0, 5),
            Field::unsigned(0, 5),
            Field::unsigned(0, 15),
        ])
        .unwrap_err();
        assert_eq!(err, AsmError::WidthMismatch { total: 31 });
    }

    #[test]
    fn width_sum_long_fails() {
        let err = compose(&[Field::unsigned(0, 32), Field::unsigned(0, 1)]).unwrap_err();
        assert_eq!(err, AsmError::WidthMismatch { total: 33 });
    }

    #[test]
    fn unsigned_overflow_fails() {
        let err = compose(&[Field::unsigned(32, 5), Field::unsigned(0, 27)]).unwrap_err();
        assert_eq!(
            err,
            AsmError::FieldOverflow {
                value: 32,
                width: 5,
                signed: false
            }
        );
    }

    #[test]
    fn unsigned_negative_fails() {
        let err = compose(&[Field::unsigned(-1, 16), Field::unsigned(0, 16)]).unwrap_err();
        assert!(matches!(err, AsmError::FieldOverflow { value: -1, .. }));
    }

    #[test]
    fn signed_bounds() {
        assert!(compose(&d_form(14, 0, 0, 0x7FFF)).is_ok());
        assert!(compose(&d_form(14, 0, 0, -0x8000)).is_ok());
        assert!(compose(&d_form(14, 0, 0, 0x8000)).is_err());
        assert!(compose(&d_form(14, 0, 0, -0x8001)).is_err());
    }

    #[test]
    fn zero_width_field_fails() {
        let err = compose(&[
            Field::unsigned(0, 0),
            Field::unsigned(0, 16),
            Field::unsigned(0, 16),
        ])
        .unwrap_err();
        assert_eq!(err, AsmError::InvalidFieldWidth { width: 0 });
    }

    #[test]
    fn decompose_recovers_fields() {
        let fields = vec![
            Field::unsigned(31, 6),
            Field::unsigned(3, 5),
            Field::unsigned(31, 5),
            Field::unsigned(3, 5),
            Field::unsigned(444, 10),
            Field::flag(false),
        ];
        let word = compose(&fields).unwrap();
        let widths: Vec<u8> = fields.iter().map(|f| f.width).collect();
        assert_eq!(decompose(word, &widths).unwrap(), vec![31, 3, 31, 3, 444, 0]);
    }

    #[test]
    fn decompose_rejects_bad_layout() {
        assert_eq!(
            decompose(0, &[16, 8]).unwrap_err(),
            AsmError::WidthMismatch { total: 24 }
        );
    }

    #[test]
    fn encode_word_is_big_endian() {
        assert_eq!(encode_word(1234), [0x00, 0x00, 0x04, 0xD2]);
    }
}
