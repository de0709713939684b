//! Register operands.
//!
//! General-purpose and floating-point registers are distinct types so a
//! float register cannot be passed where a general register is required.
//! Both are plain field-value sources: an instruction only ever reads
//! [`Register::number`].

use core::fmt;

/// Common view of a register operand.
pub trait Register: Copy + fmt::Debug {
    /// Register number as encoded in a 5-bit field.
    fn number(self) -> u8;
}

/// General-purpose register `r0`–`r31`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gpr(pub u8);

/// Floating-point register `f0`–`f31`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fpr(pub u8);

impl Register for Gpr {
    #[inline]
    fn number(self) -> u8 {
        self.0
    }
}

impl Register for Fpr {
    #[inline]
    fn number(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Gpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

impl fmt::Display for Fpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

// ── Special-purpose register numbers ────────────────────────────────────

/// Link register.
pub const LR: u16 = 8;
/// Count register.
pub const CTR: u16 = 9;

// ── Named registers ─────────────────────────────────────────────────────

pub const R0: Gpr = Gpr(0);
pub const R1: Gpr = Gpr(1);
pub const R2: Gpr = Gpr(2);
pub const R3: Gpr = Gpr(3);
pub const R4: Gpr = Gpr(4);
pub const R5: Gpr = Gpr(5);
pub const R6: Gpr = Gpr(6);
pub const R7: Gpr = Gpr(7);
pub const R8: Gpr = Gpr(8);
pub const R9: Gpr = Gpr(9);
pub const R10: Gpr = Gpr(10);
pub const R11: Gpr = Gpr(11);
pub const R12: Gpr = Gpr(12);
pub const R13: Gpr = Gpr(13);
pub const R14: Gpr = Gpr(14);
pub const R15: Gpr = Gpr(15);
pub const R16: Gpr = Gpr(16);
pub const R17: Gpr = Gpr(17);
pub const R18: Gpr = Gpr(18);
pub const R19: Gpr = Gpr(19);
pub const R20: Gpr = Gpr(20);
pub const R21: Gpr = Gpr(21);
pub const R22: Gpr = Gpr(22);
pub const R23: Gpr = Gpr(23);
pub const R24: Gpr = Gpr(24);
pub const R25: Gpr = Gpr(25);
pub const R26: Gpr = Gpr(26);
pub const R27: Gpr = Gpr(27);
pub const R28: Gpr = Gpr(28);
pub const R29: Gpr = Gpr(29);
pub const R30: Gpr = Gpr(30);
pub const R31: Gpr = Gpr(31);

pub const F0: Fpr = Fpr(0);
pub const F1: Fpr = Fpr(1);
pub const F2: Fpr = Fpr(2);
pub const F3: Fpr = Fpr(3);
pub const F4: Fpr = Fpr(4);
pub const F5: Fpr = Fpr(5);
pub const F6: Fpr = Fpr(6);
pub const F7: Fpr = Fpr(7);
pub const F8: Fpr = Fpr(8);
pub const F9: Fpr = Fpr(9);
pub const F10: Fpr = Fpr(10);
pub const F11: Fpr = Fpr(11);
pub const F12: Fpr = Fpr(12);
pub const F13: Fpr = Fpr(13);
pub const F14: Fpr = Fpr(14);
pub const F15: Fpr = Fpr(15);
pub const F16: Fpr = Fpr(16);
pub const F17: Fpr = Fpr(17);
pub const F18: Fpr = Fpr(18);
pub const F19: Fpr = Fpr(19);
pub const F20: Fpr = Fpr(20);
pub const F21: Fpr = Fpr(21);
pub const F22: Fpr = Fpr(22);
pub const F23: Fpr = Fpr(23);
pub const F24: Fpr = Fpr(24);
pub const F25: Fpr = Fpr(25);
pub const F26: Fpr = Fpr(26);
pub const F27: Fpr = Fpr(27);
pub const F28: Fpr = Fpr(28);
pub const F29: Fpr = Fpr(29);
pub const F30: Fpr = Fpr(30);
pub const F31: Fpr = Fpr(31);
