//! Basic assembly example: demonstrates the one-shot and builder APIs.
//!
//! Run with: `cargo run --example basic`

use ppc_asm::register::*;
use ppc_asm::{assemble_at, assemble_with, ppc, pseudo, Assembler, SymbolTable};

fn main() {
    println!("=== ppc_asm basic example ===\n");

    // --- One-shot assembly ---
    println!("1. One-shot assembly (stw r31, 0x1C(r1); blr):");
    let bytes = assemble_at(
        0x8000_3000,
        &[ppc::stw(R31, 0x1C, R1).unwrap(), ppc::blr().unwrap()],
    )
    .unwrap();
    print_hex("   ", &bytes);

    // --- Seeded symbols ---
    println!("\n2. Branch to a symbol outside the sequence:");
    let symbols: SymbolTable = [("OSReport", 0x8000_6000u64)].into_iter().collect();
    let bytes = assemble_with(0x8000_3000, &[ppc::bl("OSReport")], Some(&symbols)).unwrap();
    print_hex("   ", &bytes);

    // --- Builder API ---
    println!("\n3. Builder API (counted copy loop):");
    let mut asm = Assembler::new();
    asm.base_address(0x8000_4000).enable_listing();
    asm.extend([
        ppc::stwu(R1, -0x10, R1).unwrap().with_label("copy_words"),
        ppc::mtctr(R5).unwrap(),
        ppc::lwz(R6, 0, R4).unwrap().with_label("loop"),
        ppc::stw(R6, 0, R3).unwrap(),
        ppc::addi(R4, R4, 4).unwrap(),
        ppc::addi(R3, R3, 4).unwrap(),
        ppc::bdnz("loop"),
        ppc::addi(R1, R1, 0x10).unwrap(),
        ppc::blr().unwrap(),
    ])
    .unwrap();

    let result = asm.finish().unwrap();
    print_hex("   ", result.bytes());

    // Label addresses
    println!("\n   Labels:");
    for (name, addr) in result.labels() {
        println!("   {}: 0x{:X}", name, addr);
    }

    // Listing output
    println!("\n   Listing:");
    for line in result.listing().lines() {
        println!("   {}", line);
    }

    // --- Pseudo-instructions ---
    println!("\n4. Pseudo-instructions (constant and own-address loads):");
    let bytes = assemble_at(
        0x8000_FFF8,
        &[
            pseudo::load_unsigned_32bit(R3, 0xDEAD_BEEF).unwrap(),
            pseudo::load_current_address(R4, 0),
        ],
    )
    .unwrap();
    print_hex("   ", &bytes);

    println!("\n=== Done! ===");
}

fn print_hex(prefix: &str, bytes: &[u8]) {
    print!("{}", prefix);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && i % 16 == 0 {
            println!();
            print!("{}", prefix);
        }
        print!("{:02X} ", b);
    }
    println!();
}
