//! # ppc-asm: PowerPC Instruction Encoder
//!
//! `ppc-asm` builds 32-bit big-endian PowerPC machine code from typed
//! instruction values. Instructions are constructed in Rust (no text
//! parsing), optionally labeled, and laid out at a base address in two
//! passes so branches can reference labels defined before or after them.
//!
//! ## Quick Start
//!
//! ```rust
//! use ppc_asm::{assemble_at, ppc, register::*};
//!
//! let code = assemble_at(0x8000_3000, &[
//!     ppc::li(R3, 0)?.with_label("top"),
//!     ppc::addi(R3, R3, 1)?,
//!     ppc::cmpwi(R3, 10)?,
//!     ppc::bne("top"),
//!     ppc::blr()?,
//! ])?;
//! assert_eq!(code.len(), 20);
//! assert_eq!(&code[12..16], [0x40, 0x82, 0xFF, 0xF4]);
//! # Ok::<(), ppc_asm::AsmError>(())
//! ```
//!
//! ## Features
//!
//! - **Checked fields**: every immediate and register is range-checked
//!   against its bit field before it is packed.
//! - **Labels**: forward and backward label references, plus caller-seeded
//!   symbols for code outside the sequence.
//! - **Address-dependent encodings**: pseudo-instructions that load their
//!   own address.
//! - **`no_std` + `alloc`**: embeddable in patchers, loaders and emulators.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
// ── Pedantic lint policy ─────────────────────────────────────────────────
// Field packing performs narrowing / sign-changing casts between integer
// widths and uses dense hex literals for instruction words.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::cast_possible_wrap,
    clippy::unreadable_literal,
    clippy::match_same_arms,
    clippy::redundant_closure_for_method_calls,
    clippy::wildcard_imports,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args,
    clippy::doc_markdown,
    clippy::similar_names,
    clippy::fn_params_excessive_bools,
    clippy::many_single_char_names,
    clippy::return_self_not_must_use,
    clippy::missing_errors_doc
)]

extern crate alloc;

/// Public assembler API: builder pattern and `AssemblyResult`.
pub mod assembler;
/// Bit-field composition of instruction words.
pub mod encoder;
/// Error types.
pub mod error;
/// Instruction variants and their encoding recipes.
pub mod instruction;
/// Two-pass layout: address assignment and emission.
pub mod linker;
/// PowerPC opcode catalog.
pub mod ppc;
/// Pseudo-instructions: constant and address loads.
pub mod pseudo;
/// General-purpose and floating-point registers.
pub mod register;
/// Label name → address table.
pub mod symbols;

// Re-exports
pub use assembler::{Assembler, AssemblyResult, ResourceLimits};
pub use encoder::Field;
pub use error::AsmError;
pub use instruction::{AddressRecipe, BranchRecipe, Instruction, InstructionKind, JumpTarget};
pub use linker::LinkOptions;
pub use register::{Fpr, Gpr, Register};
pub use symbols::SymbolTable;

use alloc::vec::Vec;

/// Assemble `instructions` at base address 0.
///
/// # Errors
///
/// Returns [`AsmError`] if a label is undefined or a computed field does
/// not fit.
///
/// # Examples
///
/// ```rust
/// use ppc_asm::{assemble, ppc};
///
/// let code = assemble(&[ppc::nop()])?;
/// assert_eq!(code, vec![0x60, 0x00, 0x00, 0x00]);
/// # Ok::<(), ppc_asm::AsmError>(())
/// ```
pub fn assemble(instructions: &[Instruction]) -> Result<Vec<u8>, AsmError> {
    assemble_at(0, instructions)
}

/// Assemble with an explicit base address.
///
/// # Errors
///
/// See [`assemble`].
///
/// # Examples
///
/// ```rust
/// use ppc_asm::{assemble_at, ppc};
///
/// let code = assemble_at(0x8008_57FC, &[ppc::b(0x8008_5760u64)])?;
/// assert_eq!(code, vec![0x4B, 0xFF, 0xFF, 0x64]);
/// # Ok::<(), ppc_asm::AsmError>(())
/// ```
pub fn assemble_at(base_address: u64, instructions: &[Instruction]) -> Result<Vec<u8>, AsmError> {
    assemble_with(base_address, instructions, None)
}

/// Assemble with labels outside the sequence seeded from `symbols`.
///
/// `symbols` is only read; labels defined in the sequence override seeded
/// entries of the same name for this call.
///
/// # Errors
///
/// See [`assemble`].
///
/// # Examples
///
/// ```rust
/// use ppc_asm::{assemble_with, ppc, SymbolTable};
///
/// let mut symbols = SymbolTable::new();
/// symbols.define("TheFunPlace", 0x8003_8094);
/// let code = assemble_with(
///     0x8003_8034,
///     &[ppc::beq("TheFunPlace"), ppc::nop(), ppc::nop()],
///     Some(&symbols),
/// )?;
/// assert_eq!(&code[..4], [0x41, 0x82, 0x00, 0x60]);
/// # Ok::<(), ppc_asm::AsmError>(())
/// ```
pub fn assemble_with(
    base_address: u64,
    instructions: &[Instruction],
    symbols: Option<&SymbolTable>,
) -> Result<Vec<u8>, AsmError> {
    let (bytes, _) = linker::link(base_address, instructions, symbols, &LinkOptions::default())?;
    Ok(bytes)
}

/// Total bytes `instructions` will emit, without assigning addresses.
#[must_use]
pub fn byte_count(instructions: &[Instruction]) -> u64 {
    linker::byte_count(instructions)
}
