//! Serde round-trip tests for `ppc_asm` public types.
//!
//! Validates that public types serialize to JSON and deserialize back to
//! identical values.

#![cfg(feature = "serde")]

use ppc_asm::register::*;
use ppc_asm::{
    ppc, pseudo, AddressRecipe, AsmError, Assembler, BranchRecipe, Field, Instruction,
    JumpTarget, LinkOptions, ResourceLimits, SymbolTable,
};

/// Helper: serialize to JSON, deserialize back, assert equality.
fn round_trip<T>(val: &T)
where
    T: serde::Serialize + serde::de::DeserializeOwned + PartialEq + core::fmt::Debug,
{
    let json = serde_json::to_string(val).expect("serialize");
    let back: T = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(val, &back, "round-trip mismatch for JSON: {json}");
}

// ─── Registers and fields ───────────────────────────────────────────────────

#[test]
fn serde_registers() {
    round_trip(&R31);
    round_trip(&F12);
}

#[test]
fn serde_field() {
    round_trip(&Field::signed(-0x2C, 16));
    round_trip(&Field::flag(true));
}

// ─── Recipes and targets ────────────────────────────────────────────────────

#[test]
fn serde_jump_target() {
    round_trip(&JumpTarget::Address(0x8008_5760));
    round_trip(&JumpTarget::from("TheFunPlace"));
    round_trip(&JumpTarget::Relative(-8));
}

#[test]
fn serde_recipes() {
    round_trip(&AddressRecipe::UpperHalf {
        register: R3,
        offset: 8,
    });
    round_trip(&AddressRecipe::Word { offset: -4 });
    round_trip(&BranchRecipe::Conditional {
        bo: 12,
        bi: 2,
        absolute: false,
        link: false,
    });
}

// ─── Instructions ───────────────────────────────────────────────────────────

#[test]
fn serde_instructions() {
    round_trip(&ppc::stw(R31, 0x1C, R1).unwrap());
    round_trip(&ppc::beq("Label"));
    round_trip(&pseudo::load_unsigned_32bit(R5, 0xDEAD_BEEF).unwrap());
    round_trip(&pseudo::load_address_of(R4, 0x20));
    round_trip(&Instruction::current_address(R3, 8));
}

#[test]
fn serde_instruction_keeps_label_and_name() {
    let instr = ppc::li(R5, 9999).unwrap().with_label("start");
    let json = serde_json::to_string(&instr).unwrap();
    let back: Instruction = serde_json::from_str(&json).unwrap();
    assert_eq!(back.label(), Some("start"));
    assert_eq!(back.name(), Some("li r5, 9999"));
}

// ─── Symbols, configuration and errors ──────────────────────────────────────

#[test]
fn serde_symbol_table_is_a_map() {
    let symbols: SymbolTable = [("a", 1u64), ("b", 2)].into_iter().collect();
    round_trip(&symbols);
    assert_eq!(serde_json::to_string(&symbols).unwrap(), r#"{"a":1,"b":2}"#);
}

#[test]
fn serde_configuration() {
    round_trip(&ResourceLimits::default());
    round_trip(&LinkOptions {
        strict_labels: true,
    });
}

#[test]
fn serde_errors() {
    round_trip(&AsmError::FieldOverflow {
        value: 32,
        width: 5,
        signed: false,
    });
    round_trip(&AsmError::UndefinedLabel {
        label: "missing".into(),
    });
    round_trip(&AsmError::LabelAlias {
        label: "b".into(),
        other: "a".into(),
        address: 0x40,
    });
}

#[test]
fn serde_assembly_result() {
    let mut asm = Assembler::new();
    asm.enable_listing();
    asm.push(ppc::nop().with_label("start")).unwrap();
    let result = asm.finish().unwrap();
    let json = serde_json::to_string(&result).unwrap();
    let back: ppc_asm::AssemblyResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back.bytes(), result.bytes());
    assert_eq!(back.labels(), result.labels());
    assert_eq!(back.listing(), result.listing());
}
