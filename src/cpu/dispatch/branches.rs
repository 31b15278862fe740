/*!
branches.rs - Relative branch opcode handler (BPL/BMI/BVC/BVS/BCC/BCS/BNE/BEQ)

Cycle Rules
===========
Base cost: 2 cycles (from the descriptor table).
Taken: +1.
Taken onto a different page than the instruction after the branch: +1 more.

The resolver has already consumed the displacement byte, so PC is the address of the
next instruction when `execute::branch` adds the offset.
*/

use crate::bus::CpuBus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::branch;
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::Status;
use crate::cpu::table::Mnemonic;

pub(super) fn handle<C: CpuRegs, B: CpuBus>(
    m: Mnemonic,
    cpu: &mut C,
    _bus: &mut B,
    op: &mut Operand,
    extra: &mut u8,
) -> bool {
    let take = match m {
        Mnemonic::Bpl => !cpu.flag(Status::NEGATIVE),
        Mnemonic::Bmi => cpu.flag(Status::NEGATIVE),
        Mnemonic::Bvc => !cpu.flag(Status::OVERFLOW),
        Mnemonic::Bvs => cpu.flag(Status::OVERFLOW),
        Mnemonic::Bcc => !cpu.flag(Status::CARRY),
        Mnemonic::Bcs => cpu.flag(Status::CARRY),
        Mnemonic::Bne => !cpu.flag(Status::ZERO),
        Mnemonic::Beq => cpu.flag(Status::ZERO),
        _ => return false,
    };
    *extra += branch(cpu, op, take);
    true
}
