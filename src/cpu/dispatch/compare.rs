/*!
compare.rs - CMP / CPX / CPY opcode family handler

Flags: C = reg >= M, Z = reg == M, N = bit 7 of (reg - M). Registers unchanged.
Only CMP has indexed forms, so only CMP can pay the page-cross cycle.
*/

use crate::bus::CpuBus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{compare, fetch_operand};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Mnemonic;

pub(super) fn handle<C: CpuRegs, B: CpuBus>(
    m: Mnemonic,
    cpu: &mut C,
    bus: &mut B,
    op: &mut Operand,
    _extra: &mut u8,
) -> bool {
    let reg = match m {
        Mnemonic::Cmp => cpu.a(),
        Mnemonic::Cpx => cpu.x(),
        Mnemonic::Cpy => cpu.y(),
        _ => return false,
    };
    let v = fetch_operand(cpu, bus, op);
    compare(cpu, reg, v);
    true
}
