/*!
control_flow.rs - JMP / JSR / RTS / RTI / BRK handler

Stack layout
============
JSR pushes the address of its own last byte (PC - 1 after the operand), high byte
first; RTS pulls it and adds 1.

BRK skips one padding byte, pushes PC and P (BREAK and UNUSED set), sets I and loads
PC from $FFFE/$FFFF. RTI pulls P (BREAK dropped, UNUSED forced) and then PC.
*/

use crate::bus::CpuBus;
use crate::cpu::addressing::Operand;
use crate::cpu::core::IRQ_VECTOR;
use crate::cpu::execute::{pull_status, pull_word, push_status, push_word};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::Status;
use crate::cpu::table::Mnemonic;

pub(super) fn handle<C: CpuRegs, B: CpuBus>(
    m: Mnemonic,
    cpu: &mut C,
    bus: &mut B,
    op: &mut Operand,
    _extra: &mut u8,
) -> bool {
    match m {
        Mnemonic::Jmp => cpu.set_pc(op.addr),
        Mnemonic::Jsr => {
            let ret = cpu.pc().wrapping_sub(1);
            push_word(cpu, bus, ret);
            cpu.set_pc(op.addr);
        }
        Mnemonic::Rts => {
            let ret = pull_word(cpu, bus);
            cpu.set_pc(ret.wrapping_add(1));
        }
        Mnemonic::Rti => {
            pull_status(cpu, bus);
            let pc = pull_word(cpu, bus);
            cpu.set_pc(pc);
        }
        Mnemonic::Brk => {
            cpu.advance_pc(1);
            let pc = cpu.pc();
            push_word(cpu, bus, pc);
            push_status(cpu, bus, true);
            cpu.set_flag(Status::INTERRUPT_DISABLE, true);
            let target = bus.read_word(IRQ_VECTOR);
            cpu.set_pc(target);
        }
        _ => return false,
    }
    true
}
