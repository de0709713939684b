//! Two-pass layout: label address assignment, then byte emission.
//!
//! Every instruction reports its byte length without knowing its address,
//! so layout never iterates: pass 1 walks the sequence once, binding each
//! label to the running address; pass 2 walks it again, encoding every
//! instruction at its final address against the complete symbol table.
//! Forward and backward references therefore resolve identically.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::AsmError;
use crate::instruction::{advance_address, Instruction};
use crate::symbols::SymbolTable;

/// Linker behaviour switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkOptions {
    /// Reject two distinct labels bound to the same address instead of
    /// logging a warning.
    pub strict_labels: bool,
}

/// Total bytes `instructions` will emit.
#[must_use]
pub fn byte_count(instructions: &[Instruction]) -> u64 {
    instructions.iter().map(Instruction::byte_count).sum()
}

/// Pass 1: bind every instruction label to its address.
///
/// Starts from a private copy of `seed`; the caller's table is never
/// modified. A label defined twice is rebound to the later address.
///
/// # Errors
///
/// Returns [`AsmError::LabelAlias`] in strict-label mode when two distinct
/// labels land on the same address, and [`AsmError::FieldOverflow`] when
/// the sequence runs past the 32-bit address space.
pub fn assign_addresses(
    base_address: u64,
    instructions: &[Instruction],
    seed: Option<&SymbolTable>,
    options: &LinkOptions,
) -> Result<SymbolTable, AsmError> {
    let mut symbols = seed.cloned().unwrap_or_default();
    let mut address = base_address;

    for instr in instructions {
        if let Some(label) = instr.label() {
            if let Some(other) = symbols.alias_of(label, address) {
                if options.strict_labels {
                    return Err(AsmError::LabelAlias {
                        label: String::from(label),
                        other: String::from(other),
                        address,
                    });
                }
                log::warn!("label '{}' aliases '{}' at 0x{:08X}", label, other, address);
            }
            if let Some(previous) = symbols.define(label, address) {
                if previous != address {
                    log::debug!(
                        "label '{}' rebound from 0x{:08X} to 0x{:08X}",
                        label,
                        previous,
                        address
                    );
                }
            }
        }
        address = advance_address(address, instr.byte_count())?;
    }

    log::debug!(
        "assigned {} labels over {} instructions ending at 0x{:08X}",
        symbols.len(),
        instructions.len(),
        address
    );
    Ok(symbols)
}

/// Pass 2: encode every instruction at its address.
///
/// # Errors
///
/// Fails on the first instruction that cannot be encoded; no partial output
/// is returned. [`AsmError::ByteCountMismatch`] reports an instruction whose
/// emitted length disagrees with its declared [`Instruction::byte_count`].
pub fn emit(
    base_address: u64,
    instructions: &[Instruction],
    symbols: &SymbolTable,
) -> Result<Vec<u8>, AsmError> {
    let total = byte_count(instructions);
    let mut output = Vec::with_capacity(usize::try_from(total).unwrap_or(0));
    let mut address = base_address;

    for instr in instructions {
        let start = output.len();
        instr.write_bytes(address, symbols, &mut output)?;
        let actual = (output.len() - start) as u64;
        let expected = instr.byte_count();
        if actual != expected {
            return Err(AsmError::ByteCountMismatch {
                address,
                expected,
                actual,
            });
        }
        log::trace!("0x{:08X}: {}", address, instr);
        address = advance_address(address, actual)?;
    }

    log::debug!(
        "emitted {} bytes at 0x{:08X}",
        output.len(),
        base_address
    );
    Ok(output)
}

/// Run both passes, returning the bytes and the completed symbol table.
///
/// # Errors
///
/// Any error from [`assign_addresses`] or [`emit`].
///
/// # Examples
///
/// ```rust
/// use ppc_asm::linker::{link, LinkOptions};
/// use ppc_asm::ppc;
///
/// let program = [ppc::b("end"), ppc::nop().with_label("end")];
/// let (bytes, symbols) = link(0x8000_0000, &program, None, &LinkOptions::default())?;
/// assert_eq!(bytes, [0x48, 0x00, 0x00, 0x04, 0x60, 0x00, 0x00, 0x00]);
/// assert_eq!(symbols.get("end"), Some(0x8000_0004));
/// # Ok::<(), ppc_asm::AsmError>(())
/// ```
pub fn link(
    base_address: u64,
    instructions: &[Instruction],
    seed: Option<&SymbolTable>,
    options: &LinkOptions,
) -> Result<(Vec<u8>, SymbolTable), AsmError> {
    let symbols = assign_addresses(base_address, instructions, seed, options)?;
    let bytes = emit(base_address, instructions, &symbols)?;
    Ok((bytes, symbols))
}
