//! Instruction variants: the unit of emission.
//!
//! An [`Instruction`] is a tagged union over how its bytes are obtained:
//!
//! - [`InstructionKind::Concrete`]: a fixed 32-bit word.
//! - [`InstructionKind::AddressDependent`]: fields computed from the
//!   instruction's own address.
//! - [`InstructionKind::RelativeAddress`]: fields computed from a jump
//!   target (address, symbol or relative offset) and the instruction's own
//!   address.
//! - [`InstructionKind::Composite`]: an ordered group of nested
//!   instructions addressed as one unit.
//! - [`InstructionKind::CurrentAddress`]: loads its own final address plus
//!   an offset into a register (two words).
//!
//! Encoding is a pure function of `(own address, symbol table)`; the same
//! instruction can be emitted any number of times at different addresses.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::encoder::{self, Field, WORD_BYTES};
use crate::error::AsmError;
use crate::ppc;
use crate::register::Gpr;
use crate::symbols::SymbolTable;

// ─── JumpTarget ────────────────────────────────────────────

/// Branch destination: a concrete address, a label resolved at emission, or
/// a byte offset from the branch itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JumpTarget {
    /// Absolute address.
    Address(u64),
    /// Label looked up in the symbol table.
    Symbol(String),
    /// Signed byte offset from the branch's own address.
    Relative(i64),
}

impl JumpTarget {
    /// Word displacement from a branch at `own` to this target, rounded
    /// toward negative infinity.
    ///
    /// # Errors
    ///
    /// Returns [`AsmError::UndefinedLabel`] for an unbound symbol.
    pub fn displacement(&self, own: u64, symbols: &SymbolTable) -> Result<i64, AsmError> {
        match self {
            JumpTarget::Address(addr) => Ok(BranchRecipe::displacement(*addr, own)),
            JumpTarget::Symbol(name) => {
                Ok(BranchRecipe::displacement(symbols.resolve(name)?, own))
            }
            JumpTarget::Relative(offset) => Ok(offset.div_euclid(WORD_BYTES as i64)),
        }
    }
}

impl From<u64> for JumpTarget {
    fn from(addr: u64) -> Self {
        JumpTarget::Address(addr)
    }
}

impl From<i64> for JumpTarget {
    fn from(offset: i64) -> Self {
        JumpTarget::Relative(offset)
    }
}

impl From<i32> for JumpTarget {
    fn from(offset: i32) -> Self {
        JumpTarget::Relative(i64::from(offset))
    }
}

impl From<&str> for JumpTarget {
    fn from(name: &str) -> Self {
        JumpTarget::Symbol(String::from(name))
    }
}

impl From<String> for JumpTarget {
    fn from(name: String) -> Self {
        JumpTarget::Symbol(name)
    }
}

impl fmt::Display for JumpTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JumpTarget::Address(addr) => write!(f, "0x{:x}", addr),
            JumpTarget::Symbol(name) => f.write_str(name),
            JumpTarget::Relative(offset) => write!(f, ".{:+}", offset),
        }
    }
}

// ─── Recipes ───────────────────────────────────────────────

/// Add a signed offset to an address, failing when the result leaves the
/// unsigned 32-bit address space.
fn offset_address(address: u64, offset: i64) -> Result<u64, AsmError> {
    let value = i128::from(address) + i128::from(offset);
    u32::try_from(value)
        .map(u64::from)
        .map_err(|_| AsmError::FieldOverflow {
            value: i64::try_from(value).unwrap_or(i64::MAX),
            width: 32,
            signed: false,
        })
}

/// Address just past `len` bytes placed at `address`, failing when they do
/// not fit below 4 GiB.
pub(crate) fn advance_address(address: u64, len: u64) -> Result<u64, AsmError> {
    address
        .checked_add(len)
        .filter(|end| *end <= ADDRESS_SPACE_END)
        .ok_or(AsmError::FieldOverflow {
            value: i64::try_from(address).unwrap_or(i64::MAX),
            width: 32,
            signed: false,
        })
}

/// One past the highest byte address.
const ADDRESS_SPACE_END: u64 = 1 << 32;

/// Fields computed from the instruction's own address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AddressRecipe {
    /// `lis register, (address + offset) >> 16`
    UpperHalf {
        /// Destination register.
        register: Gpr,
        /// Byte offset added to the own address.
        offset: i64,
    },
    /// `ori register, register, (address + offset) & 0xFFFF`
    LowerHalf {
        /// Destination register.
        register: Gpr,
        /// Byte offset added to the own address.
        offset: i64,
    },
    /// Raw data word holding `address + offset`.
    Word {
        /// Byte offset added to the own address.
        offset: i64,
    },
}

impl AddressRecipe {
    /// Field layout of the instruction when placed at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`AsmError::FieldOverflow`] if `address + offset` is outside
    /// the 32-bit address space.
    pub fn fields(&self, address: u64) -> Result<Vec<Field>, AsmError> {
        Ok(match *self {
            AddressRecipe::UpperHalf { register, offset } => {
                let value = offset_address(address, offset)?;
                ppc::d_form_unsigned(ppc::OP_ADDIS, register.0, 0, (value >> 16) as i64).to_vec()
            }
            AddressRecipe::LowerHalf { register, offset } => {
                let value = offset_address(address, offset)?;
                ppc::d_form_unsigned(ppc::OP_ORI, register.0, register.0, (value & 0xFFFF) as i64)
                    .to_vec()
            }
            AddressRecipe::Word { offset } => {
                let value = offset_address(address, offset)?;
                alloc::vec![Field::unsigned(value as i64, 32)]
            }
        })
    }
}

impl fmt::Display for AddressRecipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressRecipe::UpperHalf { register, offset } => {
                write!(f, "lis {}, hi(. + {})", register, offset)
            }
            AddressRecipe::LowerHalf { register, offset } => {
                write!(f, "ori {0}, {0}, lo(. + {1})", register, offset)
            }
            AddressRecipe::Word { offset } => write!(f, ".long . + {}", offset),
        }
    }
}

/// Fields computed from a branch's word displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BranchRecipe {
    /// I-form unconditional branch with a 24-bit word displacement.
    Branch {
        /// Set the link register.
        link: bool,
    },
    /// B-form conditional branch with a 14-bit word displacement.
    Conditional {
        /// Branch options.
        bo: u8,
        /// Condition register bit.
        bi: u8,
        /// AA bit.
        absolute: bool,
        /// Set the link register.
        link: bool,
    },
}

impl BranchRecipe {
    /// Word displacement from `own` to `target`, rounded toward negative
    /// infinity.
    #[must_use]
    pub fn displacement(target: u64, own: u64) -> i64 {
        let delta = (i128::from(target) - i128::from(own)).div_euclid(WORD_BYTES as i128);
        i64::try_from(delta).unwrap_or(if delta < 0 { i64::MIN } else { i64::MAX })
    }

    /// Field layout of the branch for a word displacement `disp`.
    #[must_use]
    pub fn fields(&self, disp: i64) -> Vec<Field> {
        match *self {
            BranchRecipe::Branch { link } => ppc::i_form(disp, false, link).to_vec(),
            BranchRecipe::Conditional {
                bo,
                bi,
                absolute,
                link,
            } => ppc::b_form(bo, bi, disp, absolute, link).to_vec(),
        }
    }
}

impl fmt::Display for BranchRecipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchRecipe::Branch { link: false } => f.write_str("b"),
            BranchRecipe::Branch { link: true } => f.write_str("bl"),
            BranchRecipe::Conditional {
                bo,
                bi,
                absolute,
                link,
            } => {
                let suffix = match (absolute, link) {
                    (false, false) => "",
                    (false, true) => "l",
                    (true, false) => "a",
                    (true, true) => "la",
                };
                write!(f, "bc{} {}, {}", suffix, bo, bi)
            }
        }
    }
}

// ─── Instruction ───────────────────────────────────────────

/// How an instruction produces its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InstructionKind {
    /// A fixed 32-bit word.
    Concrete(u32),
    /// One word whose fields depend on the own address.
    AddressDependent(AddressRecipe),
    /// One word whose fields depend on a jump target and the own address.
    RelativeAddress {
        /// Branch destination.
        target: JumpTarget,
        /// Field layout.
        recipe: BranchRecipe,
    },
    /// Nested instructions emitted back to back.
    Composite(Vec<Instruction>),
    /// `lis`/`ori` pair loading `own address + offset` into `register`.
    CurrentAddress {
        /// Destination register.
        register: Gpr,
        /// Byte offset added to the own address.
        offset: i64,
    },
}

/// Byte length of a [`InstructionKind::CurrentAddress`] load.
pub const CURRENT_ADDRESS_BYTES: u64 = 2 * WORD_BYTES;

/// One unit of emission, with an optional label and display name.
///
/// Equality compares how the bytes are produced; the label and display name
/// are ignored.
///
/// # Examples
///
/// ```rust
/// use ppc_asm::{ppc, register::*, SymbolTable};
///
/// let instr = ppc::stw(R31, 0x1C, R1)?;
/// assert_eq!(instr.byte_count(), 4);
/// assert_eq!(instr.bytes_for(0, &SymbolTable::new())?, [0x93, 0xE1, 0x00, 0x1C]);
/// # Ok::<(), ppc_asm::AsmError>(())
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    kind: InstructionKind,
    label: Option<String>,
    name: Option<String>,
}

impl Instruction {
    /// Wrap an instruction kind with no label or name.
    #[must_use]
    pub fn new(kind: InstructionKind) -> Self {
        Self {
            kind,
            label: None,
            name: None,
        }
    }

    /// A concrete instruction holding `value`.
    #[must_use]
    pub fn word(value: u32) -> Self {
        Self::new(InstructionKind::Concrete(value))
    }

    /// Compose `fields` into a concrete instruction.
    ///
    /// # Errors
    ///
    /// Propagates [`encoder::compose`] failures.
    pub fn compose(fields: &[Field]) -> Result<Self, AsmError> {
        encoder::compose(fields).map(Self::word)
    }

    /// An instruction whose fields are computed from its own address.
    #[must_use]
    pub fn address_dependent(recipe: AddressRecipe) -> Self {
        Self::new(InstructionKind::AddressDependent(recipe))
    }

    /// A branch-style instruction resolved against a target at emission.
    #[must_use]
    pub fn relative(target: impl Into<JumpTarget>, recipe: BranchRecipe) -> Self {
        Self::new(InstructionKind::RelativeAddress {
            target: target.into(),
            recipe,
        })
    }

    /// A group of instructions addressed as one unit.
    #[must_use]
    pub fn composite(parts: Vec<Instruction>) -> Self {
        Self::new(InstructionKind::Composite(parts))
    }

    /// Load `own address + offset` (in bytes) into `register`.
    #[must_use]
    pub fn current_address(register: Gpr, offset: i64) -> Self {
        Self::new(InstructionKind::CurrentAddress { register, offset })
    }

    /// Attach a label bound to this instruction's address during assembly.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attach a diagnostic display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The instruction kind.
    #[must_use]
    pub fn kind(&self) -> &InstructionKind {
        &self.kind
    }

    /// The attached label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The display name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The fixed word of a concrete instruction.
    #[must_use]
    pub fn value(&self) -> Option<u32> {
        match self.kind {
            InstructionKind::Concrete(value) => Some(value),
            _ => None,
        }
    }

    /// Number of bytes this instruction emits, independent of its address.
    #[must_use]
    pub fn byte_count(&self) -> u64 {
        match &self.kind {
            InstructionKind::Concrete(_)
            | InstructionKind::AddressDependent(_)
            | InstructionKind::RelativeAddress { .. } => WORD_BYTES,
            InstructionKind::Composite(parts) => parts.iter().map(Instruction::byte_count).sum(),
            InstructionKind::CurrentAddress { .. } => CURRENT_ADDRESS_BYTES,
        }
    }

    /// Append this instruction's bytes, placed at `address`, to `out`.
    ///
    /// On error `out` may hold a partial encoding; callers discard it.
    ///
    /// # Errors
    ///
    /// Returns [`AsmError::UndefinedLabel`] for an unresolved jump target and
    /// any composition error of the computed fields.
    pub fn write_bytes(
        &self,
        address: u64,
        symbols: &SymbolTable,
        out: &mut Vec<u8>,
    ) -> Result<(), AsmError> {
        match &self.kind {
            InstructionKind::Concrete(value) => {
                out.extend_from_slice(&encoder::encode_word(*value));
            }
            InstructionKind::AddressDependent(recipe) => {
                let word = encoder::compose(&recipe.fields(address)?)?;
                out.extend_from_slice(&encoder::encode_word(word));
            }
            InstructionKind::RelativeAddress { target, recipe } => {
                let disp = target.displacement(address, symbols)?;
                let word = encoder::compose(&recipe.fields(disp))?;
                out.extend_from_slice(&encoder::encode_word(word));
            }
            InstructionKind::Composite(parts) => {
                let mut address = address;
                for part in parts {
                    part.write_bytes(address, symbols, out)?;
                    address = advance_address(address, part.byte_count())?;
                }
            }
            InstructionKind::CurrentAddress { register, offset } => {
                let value = offset_address(address, *offset)?;
                crate::pseudo::load_unsigned_32bit(*register, value)?
                    .write_bytes(address, symbols, out)?;
            }
        }
        Ok(())
    }

    /// This instruction's bytes when placed at `address`.
    ///
    /// # Errors
    ///
    /// See [`Instruction::write_bytes`].
    pub fn bytes_for(&self, address: u64, symbols: &SymbolTable) -> Result<Vec<u8>, AsmError> {
        let mut out = Vec::with_capacity(self.byte_count() as usize);
        self.write_bytes(address, symbols, &mut out)?;
        Ok(out)
    }

    /// Resolve a relative-address instruction at `address` into a concrete
    /// one. Other kinds are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AsmError::UndefinedLabel`] for an unresolved target and any
    /// composition error of the computed fields.
    pub fn concrete_at(self, address: u64, symbols: &SymbolTable) -> Result<Self, AsmError> {
        let word = match &self.kind {
            InstructionKind::RelativeAddress { target, recipe } => {
                encoder::compose(&recipe.fields(target.displacement(address, symbols)?))?
            }
            _ => return Ok(self),
        };
        Ok(Self {
            kind: InstructionKind::Concrete(word),
            label: self.label,
            name: self.name,
        })
    }

    /// Treat the jump target as an offset that is already relative:
    /// resolve at address 0 against an empty symbol table. A
    /// [`JumpTarget::Relative`] offset encodes the same at any address.
    ///
    /// # Errors
    ///
    /// Fails with [`AsmError::UndefinedLabel`] for a symbolic target and with
    /// [`AsmError::FieldOverflow`] if the offset does not fit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ppc_asm::ppc;
    ///
    /// let bdnz = ppc::bdnz(-8).concretize()?;
    /// assert_eq!(bdnz.value(), Some(0x4200_FFF8));
    /// # Ok::<(), ppc_asm::AsmError>(())
    /// ```
    pub fn concretize(self) -> Result<Self, AsmError> {
        self.concrete_at(0, &SymbolTable::new())
    }
}

impl PartialEq for Instruction {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Instruction {}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            return write!(f, "<{}>", name);
        }
        match &self.kind {
            InstructionKind::Concrete(value) => write!(f, "<{:08x}>", value),
            InstructionKind::AddressDependent(recipe) => write!(f, "<{}>", recipe),
            InstructionKind::RelativeAddress { target, recipe } => {
                write!(f, "<relative: {} - {}>", target, recipe)
            }
            InstructionKind::Composite(parts) => {
                f.write_str("<composite:")?;
                for part in parts {
                    write!(f, " {}", part)?;
                }
                f.write_str(">")
            }
            InstructionKind::CurrentAddress { register, offset } => {
                write!(f, "<load {} = . + {}>", register, offset)
            }
        }
    }
}

impl From<InstructionKind> for Instruction {
    fn from(kind: InstructionKind) -> Self {
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::*;
    use alloc::format;
    use alloc::vec;

    fn bytes(instr: &Instruction, address: u64) -> Vec<u8> {
        instr.bytes_for(address, &SymbolTable::new()).unwrap()
    }

    #[test]
    fn concrete_ignores_address_and_symbols() {
        let instr = Instruction::word(1234);
        assert_eq!(bytes(&instr, 0), [0x00, 0x00, 0x04, 0xD2]);
        assert_eq!(bytes(&instr, 0x8000_0000), [0x00, 0x00, 0x04, 0xD2]);
    }

    #[test]
    fn equality_ignores_label_and_name() {
        let a = Instruction::word(1234);
        let b = Instruction::word(1234).with_label("foobar").with_name("thing");
        assert_eq!(a, b);
        assert_ne!(a, Instruction::word(1235));
    }

    #[test]
    fn with_label_sets_label() {
        let instr = Instruction::word(1234);
        assert_eq!(instr.label(), None);
        let instr = instr.with_label("foobar");
        assert_eq!(instr.label(), Some("foobar"));
    }

    #[test]
    fn relative_literal_target() {
        let instr = Instruction::relative(0x8008_5760u64, BranchRecipe::Branch { link: false });
        assert_eq!(bytes(&instr, 0x8008_57FC), [0x4B, 0xFF, 0xFF, 0x64]);
    }

    #[test]
    fn relative_symbol_target() {
        let recipe = BranchRecipe::Conditional {
            bo: 12,
            bi: 2,
            absolute: false,
            link: false,
        };
        let instr = Instruction::relative("TheFunPlace", recipe);
        let symbols: SymbolTable = [("TheFunPlace", 0x8003_8094u64)].into_iter().collect();
        assert_eq!(
            instr.bytes_for(0x8003_8034, &symbols).unwrap(),
            [0x41, 0x82, 0x00, 0x60]
        );
    }

    #[test]
    fn relative_missing_symbol_fails() {
        let instr = Instruction::relative("nowhere", BranchRecipe::Branch { link: true });
        assert_eq!(
            instr.bytes_for(0, &SymbolTable::new()).unwrap_err(),
            AsmError::UndefinedLabel {
                label: "nowhere".into()
            }
        );
    }

    #[test]
    fn displacement_rounds_down() {
        assert_eq!(BranchRecipe::displacement(0x100, 0x100), 0);
        assert_eq!(BranchRecipe::displacement(0x110, 0x100), 4);
        assert_eq!(BranchRecipe::displacement(0x100, 0x110), -4);
        assert_eq!(BranchRecipe::displacement(0x100, 0x102), -1);
    }

    #[test]
    fn relative_offset_ignores_own_address() {
        let instr = Instruction::relative(-0x9C_i64, BranchRecipe::Branch { link: false });
        assert_eq!(bytes(&instr, 0), [0x4B, 0xFF, 0xFF, 0x64]);
        assert_eq!(bytes(&instr, 0x8008_57FC), [0x4B, 0xFF, 0xFF, 0x64]);
    }

    #[test]
    fn relative_offset_displacement() {
        let symbols = SymbolTable::new();
        assert_eq!(JumpTarget::Relative(-8).displacement(0x100, &symbols), Ok(-2));
        assert_eq!(JumpTarget::Relative(-2).displacement(0x100, &symbols), Ok(-1));
        assert_eq!(JumpTarget::from(16).displacement(0x100, &symbols), Ok(4));
    }

    #[test]
    fn composite_past_address_space_fails() {
        let composite = Instruction::composite(vec![Instruction::word(1), Instruction::word(2)]);
        assert!(matches!(
            composite.bytes_for(u64::MAX - 3, &SymbolTable::new()),
            Err(AsmError::FieldOverflow { width: 32, .. })
        ));
    }

    #[test]
    fn advance_stops_at_address_space_end() {
        assert_eq!(advance_address(0xFFFF_FFFC, 4), Ok(0x1_0000_0000));
        assert!(advance_address(0xFFFF_FFFC, 8).is_err());
        assert!(advance_address(u64::MAX, 1).is_err());
    }

    #[test]
    fn conditional_out_of_range_fails() {
        let instr = Instruction::relative(
            0x10_0000u64,
            BranchRecipe::Conditional {
                bo: 12,
                bi: 2,
                absolute: false,
                link: false,
            },
        );
        assert!(matches!(
            instr.bytes_for(0, &SymbolTable::new()),
            Err(AsmError::FieldOverflow { width: 14, .. })
        ));
    }

    #[test]
    fn concretize_keeps_name() {
        let instr = Instruction::relative(16u64, BranchRecipe::Branch { link: false })
            .with_name("b +16")
            .concretize()
            .unwrap();
        assert_eq!(instr.value(), Some(0x4800_0010));
        assert_eq!(instr.name(), Some("b +16"));
    }

    #[test]
    fn concretize_symbol_fails() {
        let err = Instruction::relative("label", BranchRecipe::Branch { link: false })
            .concretize()
            .unwrap_err();
        assert!(matches!(err, AsmError::UndefinedLabel { .. }));
    }

    #[test]
    fn concretize_passes_through_other_kinds() {
        let instr = Instruction::word(7);
        assert_eq!(instr.clone().concretize().unwrap(), instr);
    }

    #[test]
    fn address_dependent_word() {
        let instr = Instruction::address_dependent(AddressRecipe::Word { offset: 8 });
        assert_eq!(bytes(&instr, 0x8000_1000), [0x80, 0x00, 0x10, 0x08]);
    }

    #[test]
    fn address_dependent_halves() {
        let hi = Instruction::address_dependent(AddressRecipe::UpperHalf {
            register: R3,
            offset: 0,
        });
        let lo = Instruction::address_dependent(AddressRecipe::LowerHalf {
            register: R3,
            offset: 0,
        });
        // lis r3, 0x8000 / ori r3, r3, 0x1234
        assert_eq!(bytes(&hi, 0x8000_1234), [0x3C, 0x60, 0x80, 0x00]);
        assert_eq!(bytes(&lo, 0x8000_1234), [0x60, 0x63, 0x12, 0x34]);
    }

    #[test]
    fn address_dependent_negative_address_fails() {
        let instr = Instruction::address_dependent(AddressRecipe::Word { offset: -8 });
        assert!(matches!(
            instr.bytes_for(4, &SymbolTable::new()),
            Err(AsmError::FieldOverflow { value: -4, .. })
        ));
    }

    #[test]
    fn composite_byte_count_and_bytes() {
        let composite = Instruction::composite(vec![Instruction::word(1), Instruction::word(2)]);
        assert_eq!(composite.byte_count(), 8);
        assert_eq!(bytes(&composite, 0), [0, 0, 0, 1, 0, 0, 0, 2]);
    }

    #[test]
    fn composite_advances_address_for_parts() {
        let composite = Instruction::composite(vec![
            Instruction::address_dependent(AddressRecipe::Word { offset: 0 }),
            Instruction::address_dependent(AddressRecipe::Word { offset: 0 }),
        ]);
        assert_eq!(bytes(&composite, 0x100), [0, 0, 1, 0, 0, 0, 1, 4]);
    }

    #[test]
    fn nested_composite_equality() {
        let a = Instruction::composite(vec![
            Instruction::word(1),
            Instruction::composite(vec![Instruction::word(2)]),
        ]);
        let b = Instruction::composite(vec![
            Instruction::word(1).with_label("x"),
            Instruction::composite(vec![Instruction::word(2)]),
        ]);
        assert_eq!(a, b);
        assert_eq!(a.byte_count(), 8);
    }

    #[test]
    fn current_address_loads_own_address() {
        let instr = Instruction::current_address(R3, 8);
        assert_eq!(instr.byte_count(), 8);
        assert_eq!(
            bytes(&instr, 0x8000_FFFC),
            [0x3C, 0x60, 0x80, 0x01, 0x60, 0x63, 0x00, 0x04]
        );
    }

    #[test]
    fn current_address_equality() {
        assert_eq!(
            Instruction::current_address(R3, 8),
            Instruction::current_address(R3, 8)
        );
        assert_ne!(
            Instruction::current_address(R3, 8),
            Instruction::current_address(R4, 8)
        );
    }

    #[test]
    fn display_forms() {
        assert_eq!(format!("{}", Instruction::word(0x6000_0000)), "<60000000>");
        assert_eq!(
            format!("{}", Instruction::word(0).with_name("nop")),
            "<nop>"
        );
        let rel = Instruction::relative("loop", BranchRecipe::Branch { link: true });
        assert_eq!(format!("{}", rel), "<relative: loop - bl>");
        let bc = Instruction::relative(
            0x20u64,
            BranchRecipe::Conditional {
                bo: 16,
                bi: 0,
                absolute: false,
                link: false,
            },
        );
        assert_eq!(format!("{}", bc), "<relative: 0x20 - bc 16, 0>");
        let back = Instruction::relative(-8, BranchRecipe::Branch { link: false });
        assert_eq!(format!("{}", back), "<relative: .-8 - b>");
    }
}
