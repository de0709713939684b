//! Error types for field composition, label resolution, and emission.

use alloc::string::String;
use core::fmt;

/// Assembly error.
///
/// Every failure is synchronous and aborts the whole operation: a failed
/// instruction never yields truncated output.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AsmError {
    /// A field value does not fit its declared width and signedness.
    FieldOverflow {
        /// The offending value.
        value: i64,
        /// Declared field width in bits.
        width: u8,
        /// Whether the field is two's-complement signed.
        signed: bool,
    },

    /// A field was declared with a width of zero or more than 32 bits.
    InvalidFieldWidth {
        /// The declared width.
        width: u8,
    },

    /// The field widths of a component list do not total exactly 32 bits.
    WidthMismatch {
        /// Sum of all declared widths.
        total: u32,
    },

    /// A relative-address instruction references a label that is neither
    /// defined in the sequence nor seeded by the caller.
    UndefinedLabel {
        /// The missing label name.
        label: String,
    },

    /// An instruction produced a different number of bytes than it reported
    /// during address assignment.
    ByteCountMismatch {
        /// Address of the offending instruction.
        address: u64,
        /// Byte count reported during address assignment.
        expected: u64,
        /// Byte count actually produced.
        actual: u64,
    },

    /// Two distinct labels were bound to the same address (strict-label
    /// mode only).
    LabelAlias {
        /// The label being bound.
        label: String,
        /// The label already bound to the same address.
        other: String,
        /// The shared address.
        address: u64,
    },

    /// A configurable resource limit was exceeded.
    ResourceLimitExceeded {
        /// Human-readable name of the resource (e.g. "instructions").
        resource: String,
        /// The configured limit that was exceeded.
        limit: usize,
    },
}

impl AsmError {
    /// Inclusive `(min, max)` range of a field, as reported in diagnostics.
    #[must_use]
    pub fn field_range(width: u8, signed: bool) -> (i64, i64) {
        let width = u32::from(width.min(32));
        if width == 0 {
            return (0, 0);
        }
        if signed {
            let half = 1i64 << (width - 1);
            (-half, half - 1)
        } else {
            (0, (1i64 << width) - 1)
        }
    }
}

impl fmt::Display for AsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmError::FieldOverflow {
                value,
                width,
                signed,
            } => {
                let (min, max) = AsmError::field_range(*width, *signed);
                let kind = if *signed { "signed" } else { "unsigned" };
                write!(
                    f,
                    "value {} does not fit {}-bit {} field [{}..{}]",
                    value, width, kind, min, max
                )
            }
            AsmError::InvalidFieldWidth { width } => {
                write!(f, "invalid field width {} (expected 1..=32)", width)
            }
            AsmError::WidthMismatch { total } => {
                write!(f, "field widths total {} bits, expected 32", total)
            }
            AsmError::UndefinedLabel { label } => {
                write!(f, "undefined label '{}'", label)
            }
            AsmError::ByteCountMismatch {
                address,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "instruction at 0x{:08X} produced {} bytes, expected {}",
                    address, actual, expected
                )
            }
            AsmError::LabelAlias {
                label,
                other,
                address,
            } => {
                write!(
                    f,
                    "label '{}' aliases '{}' at 0x{:08X}",
                    label, other, address
                )
            }
            AsmError::ResourceLimitExceeded { resource, limit } => {
                write!(
                    f,
                    "resource limit exceeded: {} (limit: {})",
                    resource, limit
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AsmError {}
