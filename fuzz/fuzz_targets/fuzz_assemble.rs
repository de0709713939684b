#![no_main]
use libfuzzer_sys::fuzz_target;
use ppc_asm::register::{Gpr, R0};
use ppc_asm::{assemble_at, byte_count, ppc, pseudo, Instruction};

fuzz_target!(|data: &[u8]| {
    let Some((&base, ops)) = data.split_first() else {
        return;
    };
    let base = u64::from(base) << 24;

    // Each byte pair picks an instruction kind and an operand.
    let program: Vec<Instruction> = ops
        .chunks_exact(2)
        .filter_map(|pair| {
            let operand = pair[1];
            let label = format!("l{}", operand % 8);
            match pair[0] % 8 {
                0 => Some(ppc::nop().with_label(label)),
                1 => Some(ppc::b(label)),
                2 => Some(ppc::beq(label)),
                3 => ppc::addi(Gpr(operand % 40), R0, i64::from(operand as i8)).ok(),
                4 => Some(pseudo::load_current_address(Gpr(operand % 32), i64::from(operand))),
                5 => Some(pseudo::load_address_of(Gpr(operand % 32), i64::from(operand as i8))),
                6 => Some(Instruction::composite(vec![ppc::sync(), ppc::isync()])),
                _ => Some(ppc::bdnz(i64::from(operand as i8) * 4)),
            }
        })
        .collect();

    if let Ok(bytes) = assemble_at(base, &program) {
        assert_eq!(bytes.len() as u64, byte_count(&program));
    }
});
