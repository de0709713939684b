//! Pseudo-instructions built from catalog entries.

use alloc::format;
use alloc::vec;

use crate::encoder::WORD_BYTES;
use crate::error::AsmError;
use crate::instruction::{AddressRecipe, Instruction};
use crate::ppc::{lis, ori};
use crate::register::Gpr;

/// Load an unsigned 32-bit constant: `lis register, hi` then
/// `ori register, register, lo`.
///
/// # Errors
///
/// Returns [`AsmError::FieldOverflow`] if `value` does not fit in 32 bits.
///
/// # Examples
///
/// ```rust
/// use ppc_asm::{pseudo, register::R3, SymbolTable};
///
/// let load = pseudo::load_unsigned_32bit(R3, 0x8000_1234)?;
/// assert_eq!(load.byte_count(), 8);
/// assert_eq!(
///     load.bytes_for(0, &SymbolTable::new())?,
///     [0x3C, 0x60, 0x80, 0x00, 0x60, 0x63, 0x12, 0x34]
/// );
/// # Ok::<(), ppc_asm::AsmError>(())
/// ```
pub fn load_unsigned_32bit(register: Gpr, value: u64) -> Result<Instruction, AsmError> {
    let value = u32::try_from(value).map_err(|_| AsmError::FieldOverflow {
        value: i64::try_from(value).unwrap_or(i64::MAX),
        width: 32,
        signed: false,
    })?;
    let hi = i64::from(value >> 16);
    let lo = i64::from(value & 0xFFFF);
    Ok(Instruction::composite(vec![lis(register, hi)?, ori(register, register, lo)?])
        .with_name(format!("li32 {}, 0x{:x}", register, value)))
}

/// Load the address of this pseudo-instruction plus `instruction_offset`
/// words into `register`.
///
/// An offset too large to express in bytes saturates and fails at emission.
#[must_use]
pub fn load_current_address(register: Gpr, instruction_offset: i64) -> Instruction {
    Instruction::current_address(register, instruction_offset.saturating_mul(WORD_BYTES as i64))
}

/// Load `own address + offset` bytes into `register` as two
/// address-dependent words.
///
/// Unlike [`load_current_address`], each half is recomputed from its own
/// address, so the pair can be emitted separately and still agree.
#[must_use]
pub fn load_address_of(register: Gpr, offset: i64) -> Instruction {
    Instruction::composite(vec![
        Instruction::address_dependent(AddressRecipe::UpperHalf { register, offset }),
        Instruction::address_dependent(AddressRecipe::LowerHalf {
            register,
            offset: offset.saturating_sub(WORD_BYTES as i64),
        }),
    ])
}

/// A data word holding its own address plus `offset`.
#[must_use]
pub fn address_word(offset: i64) -> Instruction {
    Instruction::address_dependent(AddressRecipe::Word { offset })
}
