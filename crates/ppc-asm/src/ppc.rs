//! PowerPC opcode catalog: one constructor per instruction.
//!
//! Constructors with immediate or register fields compose eagerly and
//! return `Result`, so a range violation surfaces where the instruction is
//! built. Branches to a [`JumpTarget`] defer encoding to emission time and
//! return the [`Instruction`] directly; call [`Instruction::concretize`] on
//! one whose literal target is already a relative offset.
//!
//! Operand order follows the assembler mnemonic: destination first, then
//! sources, with `offset(base)` memory operands passed as `offset, base`.

use alloc::format;
use alloc::string::String;

use crate::encoder::Field;
use crate::error::AsmError;
use crate::instruction::{BranchRecipe, Instruction, JumpTarget};
use crate::register::{Fpr, Gpr, Register, CTR, R0};

// ── Primary opcodes ─────────────────────────────────────────────────────

const OP_MULLI: u8 = 7;
const OP_CMPWI: u8 = 11;
const OP_ADDI: u8 = 14;
pub(crate) const OP_ADDIS: u8 = 15;
const OP_BC: u8 = 16;
const OP_B: u8 = 18;
const OP_XL: u8 = 19; // bclr, bcctr
const OP_RLWINM: u8 = 21;
pub(crate) const OP_ORI: u8 = 24;
const OP_X: u8 = 31; // extended integer ops
const OP_LWZ: u8 = 32;
const OP_LBZ: u8 = 34;
const OP_STW: u8 = 36;
const OP_STWU: u8 = 37;
const OP_STB: u8 = 38;
const OP_LHZ: u8 = 40;
const OP_LMW: u8 = 46;
const OP_STMW: u8 = 47;
const OP_LFS: u8 = 48;
const OP_STFS: u8 = 52;
const OP_FP_SINGLE: u8 = 59;

// ── Extended opcodes ────────────────────────────────────────────────────

const XO_CMP: u16 = 0;
const XO_LWZX: u16 = 23;
const XO_ADD: u16 = 266;
const XO_MFSPR: u16 = 339;
const XO_OR: u16 = 444;
const XO_MTSPR: u16 = 467;
const XO_DCBI: u16 = 470;
const XO_ICBI: u16 = 982;
const XO_BCLR: u16 = 16;
const XO_BCCTR: u16 = 528;
const XO_FDIVS: u8 = 18;
const XO_FMULS: u8 = 25;

// ── Fixed words ─────────────────────────────────────────────────────────

/// `ori r0, r0, 0`
const NOP_WORD: u32 = 0x6000_0000;
const SYNC_WORD: u32 = 0x7C00_04AC;
const ISYNC_WORD: u32 = 0x4C00_012C;

// ── Field layouts ───────────────────────────────────────────────────────

#[inline]
fn reg(n: u8) -> Field {
    Field::unsigned(i64::from(n), 5)
}

/// D-form with a signed 16-bit displacement or immediate.
pub(crate) fn d_form(opcd: u8, rt: u8, ra: u8, d: i64) -> [Field; 4] {
    [
        Field::unsigned(i64::from(opcd), 6),
        reg(rt),
        reg(ra),
        Field::signed(d, 16),
    ]
}

/// D-form with an unsigned 16-bit immediate.
pub(crate) fn d_form_unsigned(opcd: u8, rt: u8, ra: u8, imm: i64) -> [Field; 4] {
    [
        Field::unsigned(i64::from(opcd), 6),
        reg(rt),
        reg(ra),
        Field::unsigned(imm, 16),
    ]
}

/// X-form: three register fields, 10-bit extended opcode, record bit.
fn x_form(opcd: u8, rt: u8, ra: u8, rb: u8, xo: u16, rc: bool) -> [Field; 6] {
    [
        Field::unsigned(i64::from(opcd), 6),
        reg(rt),
        reg(ra),
        reg(rb),
        Field::unsigned(i64::from(xo), 10),
        Field::flag(rc),
    ]
}

/// I-form unconditional branch.
pub(crate) fn i_form(li: i64, aa: bool, lk: bool) -> [Field; 4] {
    [
        Field::unsigned(i64::from(OP_B), 6),
        Field::signed(li, 24),
        Field::flag(aa),
        Field::flag(lk),
    ]
}

/// B-form conditional branch.
pub(crate) fn b_form(bo: u8, bi: u8, bd: i64, aa: bool, lk: bool) -> [Field; 6] {
    [
        Field::unsigned(i64::from(OP_BC), 6),
        Field::unsigned(i64::from(bo), 5),
        Field::unsigned(i64::from(bi), 5),
        Field::signed(bd, 14),
        Field::flag(aa),
        Field::flag(lk),
    ]
}

/// XL-form branch to a special register.
fn xl_branch(bo: u8, bi: u8, bh: u8, xo: u16, lk: bool) -> [Field; 7] {
    [
        Field::unsigned(i64::from(OP_XL), 6),
        Field::unsigned(i64::from(bo), 5),
        Field::unsigned(i64::from(bi), 5),
        Field::unsigned(0, 3),
        Field::unsigned(i64::from(bh), 2),
        Field::unsigned(i64::from(xo), 10),
        Field::flag(lk),
    ]
}

/// A-form single-precision float op.
fn a_form(frt: u8, fra: u8, frb: u8, frc: u8, xo: u8) -> [Field; 7] {
    [
        Field::unsigned(i64::from(OP_FP_SINGLE), 6),
        reg(frt),
        reg(fra),
        reg(frb),
        reg(frc),
        Field::unsigned(i64::from(xo), 5),
        Field::flag(false),
    ]
}

fn hex(value: i64) -> String {
    if value < 0 {
        format!("-0x{:x}", value.unsigned_abs())
    } else {
        format!("0x{:x}", value)
    }
}

// ── Loads ───────────────────────────────────────────────────────────────

/// `lmw start, offset(input)`: load registers `start`..`r31` from memory.
pub fn lmw(start_register: Gpr, offset: i64, input_register: Gpr) -> Result<Instruction, AsmError> {
    Instruction::compose(&d_form(OP_LMW, start_register.0, input_register.0, offset))
}

/// `lwz output, offset(input)`: `output = *(u32*)(input + offset)`.
pub fn lwz(output_register: Gpr, offset: i64, input_register: Gpr) -> Result<Instruction, AsmError> {
    Ok(
        Instruction::compose(&d_form(OP_LWZ, output_register.0, input_register.0, offset))?
            .with_name(format!(
                "lwz {}, {}({})",
                output_register,
                hex(offset),
                input_register
            )),
    )
}

/// `lwzx output, a, b`: `output = *(u32*)(a + b)`.
pub fn lwzx(
    output_register: Gpr,
    input_register_a: Gpr,
    input_register_b: Gpr,
) -> Result<Instruction, AsmError> {
    Instruction::compose(&x_form(
        OP_X,
        output_register.0,
        input_register_a.0,
        input_register_b.0,
        XO_LWZX,
        false,
    ))
}

/// `lhz output, offset(input)`: load halfword and zero.
pub fn lhz(output_register: Gpr, offset: i64, input_register: Gpr) -> Result<Instruction, AsmError> {
    Instruction::compose(&d_form(OP_LHZ, output_register.0, input_register.0, offset))
}

/// `lbz output, offset(input)`: load byte and zero.
pub fn lbz(output_register: Gpr, offset: i64, input_register: Gpr) -> Result<Instruction, AsmError> {
    Instruction::compose(&d_form(OP_LBZ, output_register.0, input_register.0, offset))
}

/// `lfs output, offset(input)`: `output = *(f32*)(input + offset)`.
pub fn lfs(output_register: Fpr, offset: i64, input_register: Gpr) -> Result<Instruction, AsmError> {
    Instruction::compose(&d_form(OP_LFS, output_register.0, input_register.0, offset))
}

// ── Stores ──────────────────────────────────────────────────────────────

fn store(
    input_register: impl Register,
    offset: i64,
    output_register: Gpr,
    opcode: u8,
) -> Result<Instruction, AsmError> {
    Instruction::compose(&d_form(
        opcode,
        input_register.number(),
        output_register.0,
        offset,
    ))
}

/// `stb input, offset(output)`: `*(u8*)(output + offset) = input`.
pub fn stb(input_register: Gpr, offset: i64, output_register: Gpr) -> Result<Instruction, AsmError> {
    store(input_register, offset, output_register, OP_STB)
}

/// `stw input, offset(output)`: `*(u32*)(output + offset) = input`.
pub fn stw(input_register: Gpr, offset: i64, output_register: Gpr) -> Result<Instruction, AsmError> {
    store(input_register, offset, output_register, OP_STW)
}

/// `stfs input, offset(output)`: `*(f32*)(output + offset) = input`.
pub fn stfs(input_register: Fpr, offset: i64, output_register: Gpr) -> Result<Instruction, AsmError> {
    store(input_register, offset, output_register, OP_STFS)
}

/// `stwu input, offset(output)`: store word and update `output`.
pub fn stwu(input_register: Gpr, offset: i64, output_register: Gpr) -> Result<Instruction, AsmError> {
    store(input_register, offset, output_register, OP_STWU)
}

/// `stmw start, offset(output)`: store registers `start`..`r31`.
pub fn stmw(start_register: Gpr, offset: i64, output_register: Gpr) -> Result<Instruction, AsmError> {
    store(start_register, offset, output_register, OP_STMW)
}

// ── Integer arithmetic and logic ────────────────────────────────────────

/// `add output, a, b`
pub fn add(output_register: Gpr, input_register1: Gpr, input_register2: Gpr) -> Result<Instruction, AsmError> {
    Instruction::compose(&x_form(
        OP_X,
        output_register.0,
        input_register1.0,
        input_register2.0,
        XO_ADD,
        false,
    ))
}

/// `addi output, input, literal`: signed 16-bit immediate.
pub fn addi(output_register: Gpr, input_register: Gpr, literal: i64) -> Result<Instruction, AsmError> {
    Instruction::compose(&d_form(OP_ADDI, output_register.0, input_register.0, literal))
}

/// `addis output, input, literal`: adds `literal << 16`.
pub fn addis(output_register: Gpr, input_register: Gpr, literal: i64) -> Result<Instruction, AsmError> {
    Instruction::compose(&d_form_unsigned(
        OP_ADDIS,
        output_register.0,
        input_register.0,
        literal,
    ))
}

/// `li register, literal`: `addi register, r0, literal`.
pub fn li(register: Gpr, literal: i64) -> Result<Instruction, AsmError> {
    Ok(addi(register, R0, literal)?.with_name(format!("li {}, {}", register, literal)))
}

/// `lis register, literal`: `addis register, r0, literal`.
pub fn lis(register: Gpr, literal: i64) -> Result<Instruction, AsmError> {
    addis(register, R0, literal)
}

/// `mulli output, input, literal`
pub fn mulli(output_register: Gpr, input_register: Gpr, literal: i64) -> Result<Instruction, AsmError> {
    Instruction::compose(&d_form(OP_MULLI, output_register.0, input_register.0, literal))
}

fn or_impl(output: Gpr, a: Gpr, b: Gpr, record: bool) -> Result<Instruction, AsmError> {
    Instruction::compose(&x_form(OP_X, a.0, output.0, b.0, XO_OR, record))
}

/// `or output, a, b`
pub fn or(output_register: Gpr, input_register_a: Gpr, input_register_b: Gpr) -> Result<Instruction, AsmError> {
    or_impl(output_register, input_register_a, input_register_b, false)
}

/// `or. output, a, b`: also updates CR0.
pub fn or_record(
    output_register: Gpr,
    input_register_a: Gpr,
    input_register_b: Gpr,
) -> Result<Instruction, AsmError> {
    or_impl(output_register, input_register_a, input_register_b, true)
}

/// `ori output, input, constant`: unsigned 16-bit immediate.
pub fn ori(output_register: Gpr, input_register: Gpr, constant: i64) -> Result<Instruction, AsmError> {
    Instruction::compose(&d_form_unsigned(
        OP_ORI,
        output_register.0,
        input_register.0,
        constant,
    ))
}

/// `nop`: `ori r0, r0, 0`.
#[must_use]
pub fn nop() -> Instruction {
    Instruction::word(NOP_WORD)
}

/// `rlwinm output, input, shift, mask_begin, mask_end`
pub fn rlwinm(
    output_register: Gpr,
    input_register: Gpr,
    shift: u8,
    mask_begin: u8,
    mask_end: u8,
) -> Result<Instruction, AsmError> {
    Instruction::compose(&[
        Field::unsigned(i64::from(OP_RLWINM), 6),
        reg(output_register.0),
        reg(input_register.0),
        reg(shift),
        reg(mask_begin),
        reg(mask_end),
        Field::flag(false),
    ])
}

// ── Compare ─────────────────────────────────────────────────────────────

/// `cmpwi input, literal`: compare into CR0.
pub fn cmpwi(input_register: Gpr, literal: i64) -> Result<Instruction, AsmError> {
    Instruction::compose(&[
        Field::unsigned(i64::from(OP_CMPWI), 6),
        Field::unsigned(0, 3),
        Field::flag(false),
        Field::flag(false),
        reg(input_register.0),
        Field::signed(literal, 16),
    ])
}

/// `cmp bf, l, ra, rb`
///
/// `bf` selects the condition register field (0–7); `l` must be 0 for the
/// 32-bit subset.
pub fn cmp(bf: u8, l: u8, ra: Gpr, rb: Gpr) -> Result<Instruction, AsmError> {
    Instruction::compose(&[
        Field::unsigned(i64::from(OP_X), 6),
        Field::unsigned(i64::from(bf), 3),
        Field::flag(false),
        Field::unsigned(i64::from(l), 1),
        reg(ra.0),
        reg(rb.0),
        Field::unsigned(i64::from(XO_CMP), 10),
        Field::flag(false),
    ])
}

/// `cmpw bf, ra, rb`: `cmp bf, 0, ra, rb`.
pub fn cmpw(bf: u8, ra: Gpr, rb: Gpr) -> Result<Instruction, AsmError> {
    cmp(bf, 0, ra, rb)
}

// ── Branches ────────────────────────────────────────────────────────────

/// `b target`: branch without setting the link register.
pub fn b(target: impl Into<JumpTarget>) -> Instruction {
    let target = target.into();
    let name = format!("b {}", target);
    Instruction::relative(target, BranchRecipe::Branch { link: false }).with_name(name)
}

/// `bl target`: branch and set the link register.
pub fn bl(target: impl Into<JumpTarget>) -> Instruction {
    let target = target.into();
    let name = format!("bl {}", target);
    Instruction::relative(target, BranchRecipe::Branch { link: true }).with_name(name)
}

/// Conditional branch `bc bo, bi, target`.
pub fn bc(bo: u8, bi: u8, target: impl Into<JumpTarget>) -> Instruction {
    let target = target.into();
    let name = format!("bc {}, {}, {}", bo, bi, target);
    conditional(bo, bi, target).with_name(name)
}

fn conditional(bo: u8, bi: u8, target: JumpTarget) -> Instruction {
    Instruction::relative(
        target,
        BranchRecipe::Conditional {
            bo,
            bi,
            absolute: false,
            link: false,
        },
    )
}

/// `bc` with a fixed BO/BI pair, named by its extended mnemonic.
fn extended(mnemonic: &str, bo: u8, bi: u8, target: impl Into<JumpTarget>) -> Instruction {
    let target = target.into();
    let name = format!("{} {}", mnemonic, target);
    conditional(bo, bi, target).with_name(name)
}

/// Decrement CTR, branch if CTR != 0.
pub fn bdnz(target: impl Into<JumpTarget>) -> Instruction {
    extended("bdnz", 16, 0, target)
}

/// Branch if the last comparison was equal.
pub fn beq(target: impl Into<JumpTarget>) -> Instruction {
    extended("beq", 12, 2, target)
}

/// Branch if the last comparison was greater than.
pub fn bgt(target: impl Into<JumpTarget>) -> Instruction {
    extended("bgt", 12, 1, target)
}

/// Branch if the last comparison was not less than.
pub fn bge(target: impl Into<JumpTarget>) -> Instruction {
    extended("bge", 4, 0, target)
}

/// Branch if the last comparison was not greater than.
pub fn ble(target: impl Into<JumpTarget>) -> Instruction {
    extended("ble", 4, 1, target)
}

/// Branch if the last comparison was not equal.
pub fn bne(target: impl Into<JumpTarget>) -> Instruction {
    extended("bne", 4, 2, target)
}

/// `bclr bo, bi, bh`: branch conditionally to the link register.
pub fn bclr(bo: u8, bi: u8, bh: u8) -> Result<Instruction, AsmError> {
    Instruction::compose(&xl_branch(bo, bi, bh, XO_BCLR, false))
}

/// `blr`: return through the link register.
pub fn blr() -> Result<Instruction, AsmError> {
    bclr(20, 0, 0)
}

/// `bcctrl bo, bi, bh`: branch conditionally to CTR, setting the link register.
pub fn bcctrl(bo: u8, bi: u8, bh: u8) -> Result<Instruction, AsmError> {
    Instruction::compose(&xl_branch(bo, bi, bh, XO_BCCTR, true))
}

/// `bctrl`: call through CTR.
pub fn bctrl() -> Result<Instruction, AsmError> {
    bcctrl(20, 0, 0)
}

// ── Special registers ───────────────────────────────────────────────────

fn special_register_op(register: Gpr, special_register: u16, xo: u16) -> Result<Instruction, AsmError> {
    // The SPR number is encoded with its 5-bit halves swapped.
    let top = special_register >> 5;
    let bottom = special_register & 0b11111;
    Instruction::compose(&[
        Field::unsigned(i64::from(OP_X), 6),
        reg(register.0),
        Field::unsigned(i64::from(bottom), 5),
        Field::unsigned(i64::from(top), 5),
        Field::unsigned(i64::from(xo), 10),
        Field::flag(false),
    ])
}

/// `mtspr special_register, input`
pub fn mtspr(special_register: u16, input_register: Gpr) -> Result<Instruction, AsmError> {
    special_register_op(input_register, special_register, XO_MTSPR)
}

/// `mtctr rs`
pub fn mtctr(rs: Gpr) -> Result<Instruction, AsmError> {
    mtspr(CTR, rs)
}

/// `mfspr output, special_register`
pub fn mfspr(output_register: Gpr, special_register: u16) -> Result<Instruction, AsmError> {
    special_register_op(output_register, special_register, XO_MFSPR)
}

// ── Cache and synchronization ───────────────────────────────────────────

/// `sync`
#[must_use]
pub fn sync() -> Instruction {
    Instruction::word(SYNC_WORD)
}

/// `isync`
#[must_use]
pub fn isync() -> Instruction {
    Instruction::word(ISYNC_WORD)
}

/// `icbi ra, rb`: invalidate the instruction cache block at `ra + rb`.
pub fn icbi(ra: u8, rb: u8) -> Result<Instruction, AsmError> {
    Instruction::compose(&x_form(OP_X, 0, ra, rb, XO_ICBI, false))
}

/// `dcbi ra, rb`: invalidate the data cache block at `ra + rb`.
pub fn dcbi(ra: u8, rb: u8) -> Result<Instruction, AsmError> {
    Instruction::compose(&x_form(OP_X, 0, ra, rb, XO_DCBI, false))
}

// ── Floating point ──────────────────────────────────────────────────────

/// `fmuls output, a, c`
pub fn fmuls(output_register: Fpr, ra: Fpr, rc: Fpr) -> Result<Instruction, AsmError> {
    Instruction::compose(&a_form(output_register.0, ra.0, 0, rc.0, XO_FMULS))
}

/// `fdivs output, a, b`
pub fn fdivs(output_register: Fpr, ra: Fpr, rb: Fpr) -> Result<Instruction, AsmError> {
    Instruction::compose(&a_form(output_register.0, ra.0, rb.0, 0, XO_FDIVS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::*;
    use crate::symbols::SymbolTable;
    use alloc::vec::Vec;

    fn bytes_at(instr: &Instruction, address: u64) -> Vec<u8> {
        instr.bytes_for(address, &SymbolTable::new()).unwrap()
    }

    fn bytes(instr: Result<Instruction, AsmError>) -> Vec<u8> {
        bytes_at(&instr.unwrap(), 0)
    }

    #[test]
    fn stw_r31() {
        assert_eq!(bytes(stw(R31, 0x1C, R1)), [0x93, 0xE1, 0x00, 0x1C]);
    }

    #[test]
    fn stfs_f0() {
        assert_eq!(bytes(stfs(F0, 0x1000, R2)), [208, 2, 16, 0]);
    }

    #[test]
    fn lfs_negative_offset() {
        assert_eq!(
            bytes(lfs(F0, 0x8041_A4A8 - 0x8042_23C0, R2)),
            [0xC0, 0x02, 0x80, 0xE8]
        );
    }

    #[test]
    fn addi_r3() {
        assert_eq!(bytes(addi(R3, R1, 0x8)), [0x38, 0x61, 0x00, 0x08]);
    }

    #[test]
    fn addi_out_of_range() {
        assert!(matches!(
            addi(R3, R1, 0x8000),
            Err(AsmError::FieldOverflow { value: 0x8000, width: 16, signed: true })
        ));
    }

    #[test]
    fn or_r31() {
        assert_eq!(bytes(or(R31, R3, R3)), [124, 127, 27, 120]);
    }

    #[test]
    fn or_record_sets_rc() {
        assert_eq!(bytes(or_record(R31, R3, R3)), [124, 127, 27, 121]);
    }

    #[test]
    fn lmw_r25() {
        assert_eq!(bytes(lmw(R25, 0x774, R25)), [187, 57, 7, 116]);
    }

    #[test]
    fn lwz_r10() {
        assert_eq!(bytes(lwz(R10, 0x774, R25)), [0x81, 0x59, 0x07, 0x74]);
    }

    #[test]
    fn lwz_r31_stack_slot() {
        assert_eq!(bytes(lwz(R31, 0x1C, R1)), [0x83, 0xE1, 0x00, 0x1C]);
    }

    #[test]
    fn lwz_has_display_name() {
        let instr = lwz(R10, -0x10, R25).unwrap();
        assert_eq!(instr.name(), Some("lwz r10, -0x10(r25)"));
    }

    #[test]
    fn lwzx_r0() {
        assert_eq!(bytes(lwzx(R0, R4, R0)), [0x7C, 0x04, 0x00, 0x2E]);
    }

    #[test]
    fn lhz_negative() {
        assert_eq!(bytes(lhz(R6, -0x40DA, R2)), [0xA0, 0xC2, 0xBF, 0x26]);
    }

    #[test]
    fn lbz_r4() {
        assert_eq!(bytes(lbz(R4, 0x2, R3)), [0x88, 0x83, 0x00, 0x02]);
    }

    #[test]
    fn rlwinm_r0() {
        assert_eq!(bytes(rlwinm(R0, R0, 0x2, 0x0, 0x1D)), [0x54, 0x00, 0x10, 0x3A]);
    }

    #[test]
    fn rlwinm_shift_out_of_range() {
        assert!(rlwinm(R0, R0, 32, 0, 31).is_err());
    }

    #[test]
    fn cmpwi_zero() {
        assert_eq!(bytes(cmpwi(R30, 0)), [0x2C, 0x1E, 0x00, 0x00]);
    }

    #[test]
    fn cmpwi_minus_one() {
        assert_eq!(bytes(cmpwi(R4, -1)), [0x2C, 0x04, 0xFF, 0xFF]);
    }

    #[test]
    fn cmpw_cr0() {
        // cmpw r3, r4
        assert_eq!(bytes(cmpw(0, R3, R4)), [0x7C, 0x03, 0x20, 0x00]);
    }

    #[test]
    fn b_backward() {
        assert_eq!(
            bytes_at(&b(0x8008_5760u64), 0x8008_5760 + 0x9C),
            [0x4B, 0xFF, 0xFF, 0x64]
        );
    }

    #[test]
    fn bl_backward() {
        assert_eq!(
            bytes_at(&bl(0x8008_5760u64), 0x8008_5760 + 0x9C),
            [0x4B, 0xFF, 0xFF, 0x65]
        );
    }

    #[test]
    fn b_has_display_name() {
        assert_eq!(b("loop").name(), Some("b loop"));
        assert_eq!(bl(0x8000_1000u64).name(), Some("bl 0x80001000"));
    }

    #[test]
    fn bdnz_relative() {
        assert_eq!(
            bytes_at(&bdnz(16u64).concretize().unwrap(), 0x8000_0000),
            [0x42, 0x00, 0x00, 0x10]
        );
    }

    #[test]
    fn bdnz_relative_backward() {
        let instr = bdnz(-8).concretize().unwrap();
        assert_eq!(instr.value(), Some(0x4200_FFF8));
        assert_eq!(bytes_at(&bdnz(-8), 0x8000_1000), [0x42, 0x00, 0xFF, 0xF8]);
    }

    #[test]
    fn b_relative_backward() {
        assert_eq!(b(-8).concretize().unwrap().value(), Some(0x4BFF_FFF8));
        assert_eq!(b(-0x9C).concretize().unwrap().value(), Some(0x4BFF_FF64));
    }

    #[test]
    fn conditional_branches_have_display_names() {
        assert_eq!(beq("loop").name(), Some("beq loop"));
        assert_eq!(bne(0x8000_1000u64).name(), Some("bne 0x80001000"));
        assert_eq!(bdnz(-8).name(), Some("bdnz .-8"));
        assert_eq!(bc(12, 2, "done").name(), Some("bc 12, 2, done"));
        assert_eq!(format!("{}", bge("top")), "<bge top>");
    }

    #[test]
    fn beq_forward() {
        assert_eq!(
            bytes_at(&beq(0x8003_8094u64), 0x8003_8034),
            [0x41, 0x82, 0x00, 0x60]
        );
    }

    #[test]
    fn beq_symbol() {
        let symbols: SymbolTable = [("TheFunPlace", 0x8003_8094u64)].into_iter().collect();
        assert_eq!(
            beq("TheFunPlace").bytes_for(0x8003_8034, &symbols).unwrap(),
            [0x41, 0x82, 0x00, 0x60]
        );
    }

    #[test]
    fn bge_forward() {
        assert_eq!(
            bytes_at(&bge(0x801C_93F8u64), 0x801C_93EC),
            [0x40, 0x80, 0x00, 0x0C]
        );
    }

    #[test]
    fn bne_forward() {
        assert_eq!(
            bytes_at(&bne(0x8003_8094u64), 0x8003_8034),
            [0x40, 0x82, 0x00, 0x60]
        );
    }

    #[test]
    fn bgt_ble_condition_bits() {
        assert_eq!(bytes_at(&bgt(8u64), 0), [0x41, 0x81, 0x00, 0x08]);
        assert_eq!(bytes_at(&ble(8u64), 0), [0x40, 0x81, 0x00, 0x08]);
    }

    #[test]
    fn blr_word() {
        assert_eq!(bytes(blr()), [0x4E, 0x80, 0x00, 0x20]);
    }

    #[test]
    fn bctrl_word() {
        assert_eq!(bytes(bctrl()), [0x4E, 0x80, 0x04, 0x21]);
    }

    #[test]
    fn li_r5() {
        let instr = li(R5, 9999).unwrap();
        assert_eq!(instr.name(), Some("li r5, 9999"));
        assert_eq!(bytes_at(&instr, 0), [56, 160, 39, 15]);
    }

    #[test]
    fn lis_r3() {
        assert_eq!(bytes(lis(R3, 0x8000)), [0x3C, 0x60, 0x80, 0x00]);
    }

    #[test]
    fn stwu_negative() {
        assert_eq!(bytes(stwu(R1, -0x2C, R1)), [0x94, 0x21, 0xFF, 0xD4]);
    }

    #[test]
    fn stmw_negative() {
        assert_eq!(bytes(stmw(R25, -0x2C, R1)), [191, 33, 255, 212]);
    }

    #[test]
    fn stb_r0() {
        assert_eq!(bytes(stb(R0, 8, R3)), [0x98, 0x03, 0x00, 0x08]);
    }

    #[test]
    fn sync_word() {
        assert_eq!(bytes_at(&sync(), 0), [0x7C, 0x00, 0x04, 0xAC]);
    }

    #[test]
    fn isync_word() {
        assert_eq!(bytes_at(&isync(), 0), [0x4C, 0x00, 0x01, 0x2C]);
    }

    #[test]
    fn icbi_matches_raw_encoding() {
        let instr = icbi(3, 4).unwrap();
        assert_eq!(instr.value(), Some(0x7C00_07AC + (3 << 16) + (4 << 11)));
    }

    #[test]
    fn dcbi_1_2() {
        assert_eq!(bytes(dcbi(1, 2)), [0x7C, 0x01, 0x13, 0xAC]);
    }

    #[test]
    fn add_r3() {
        // add r3, r4, r5
        assert_eq!(bytes(add(R3, R4, R5)), [0x7C, 0x64, 0x2A, 0x14]);
    }

    #[test]
    fn mfspr_lr() {
        assert_eq!(bytes(mfspr(R0, LR)), [0x7C, 0x08, 0x02, 0xA6]);
    }

    #[test]
    fn mtspr_lr() {
        assert_eq!(bytes(mtspr(LR, R0)), [0x7C, 0x08, 0x03, 0xA6]);
    }

    #[test]
    fn mtctr_r12() {
        assert_eq!(bytes(mtctr(R12)), [0x7D, 0x89, 0x03, 0xA6]);
    }

    #[test]
    fn mulli_r3() {
        // mulli r3, r3, 12
        assert_eq!(bytes(mulli(R3, R3, 12)), [0x1C, 0x63, 0x00, 0x0C]);
    }

    #[test]
    fn fmuls_f1() {
        // fmuls f1, f2, f3
        assert_eq!(bytes(fmuls(F1, F2, F3)), [0xEC, 0x22, 0x00, 0xF2]);
    }

    #[test]
    fn fdivs_f1() {
        // fdivs f1, f2, f3
        assert_eq!(bytes(fdivs(F1, F2, F3)), [0xEC, 0x22, 0x18, 0x24]);
    }

    #[test]
    fn nop_word() {
        assert_eq!(bytes_at(&nop(), 0), [96, 0, 0, 0]);
        assert_eq!(nop(), ori(R0, R0, 0).unwrap());
    }

    #[test]
    fn register_out_of_range() {
        assert!(matches!(
            addi(Gpr(32), R0, 0),
            Err(AsmError::FieldOverflow { value: 32, width: 5, .. })
        ));
    }
}
