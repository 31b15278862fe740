/*!
cycles.rs - Cycle timing constants and helpers for the 6502 CPU core.

Purpose
=======
Provides:
  - Fixed costs for sequences that are not table instructions (reset,
    hardware interrupts, the undefined-opcode fallback).
  - `page_crossed`     : the high-byte comparison used by indexed modes and
                         taken branches.
  - `instruction_cycles`: how base cost, resolver penalty and handler extras
                         combine for one instruction.

Base costs for legal opcodes live in the descriptor table (`table.rs`).
*/

use crate::cpu::table::Instruction;

/// Pending cycles after `reset`.
pub const RESET_CYCLES: u8 = 8;
/// Cost charged for an undefined opcode under the NOP policy.
pub const UNDEFINED_OPCODE_CYCLES: u8 = 2;
/// Maskable interrupt entry.
pub const IRQ_CYCLES: u8 = 7;
/// Non-maskable interrupt entry.
pub const NMI_CYCLES: u8 = 8;

/// True when `a` and `b` lie on different 256-byte pages.
#[inline]
pub const fn page_crossed(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

/// Total cost of one instruction.
///
/// - `resolver_extra`: page-cross cycle from the addressing mode; only charged when the
///   mnemonic reads its operand (stores and read-modify-write already carry the worst case).
/// - `handler_extra`: cycles reported by the handler (taken branches).
#[inline]
pub fn instruction_cycles(instr: &Instruction, resolver_extra: u8, handler_extra: u8) -> u8 {
    let penalty = if instr.mnemonic.takes_page_penalty() {
        resolver_extra
    } else {
        0
    };
    instr.cycles + penalty + handler_extra
}
