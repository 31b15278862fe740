/*!
misc.rs - Transfers / Stack / Flag / NOP opcode family handler

Transfers:
  TAX TAY TXA TYA TSX  (Z/N from the copied value)
  TXS                  (no flags)

Stack:
  PHA PLA (Z/N)  PHP (B and U set in the pushed byte)  PLP (B dropped, U forced)

Flag operations:
  CLC SEC CLI SEI CLD SED CLV

All fixed cost; nothing here touches *extra.
*/

use crate::bus::CpuBus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{pull, pull_status, push, push_status};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::Status;
use crate::cpu::table::Mnemonic;

pub(super) fn handle<C: CpuRegs, B: CpuBus>(
    m: Mnemonic,
    cpu: &mut C,
    bus: &mut B,
    _op: &mut Operand,
    _extra: &mut u8,
) -> bool {
    match m {
        // -------- Transfers --------
        Mnemonic::Tax => transfer(cpu, C::a, C::set_x),
        Mnemonic::Tay => transfer(cpu, C::a, C::set_y),
        Mnemonic::Txa => transfer(cpu, C::x, C::set_a),
        Mnemonic::Tya => transfer(cpu, C::y, C::set_a),
        Mnemonic::Tsx => transfer(cpu, C::sp, C::set_x),
        Mnemonic::Txs => {
            let x = cpu.x();
            cpu.set_sp(x);
        }

        // -------- Stack --------
        Mnemonic::Pha => {
            let a = cpu.a();
            push(cpu, bus, a);
        }
        Mnemonic::Php => push_status(cpu, bus, true),
        Mnemonic::Pla => {
            let v = pull(cpu, bus);
            cpu.set_a(v);
            cpu.update_zn(v);
        }
        Mnemonic::Plp => pull_status(cpu, bus),

        // -------- Flags --------
        Mnemonic::Clc => cpu.set_flag(Status::CARRY, false),
        Mnemonic::Sec => cpu.set_flag(Status::CARRY, true),
        Mnemonic::Cli => cpu.set_flag(Status::INTERRUPT_DISABLE, false),
        Mnemonic::Sei => cpu.set_flag(Status::INTERRUPT_DISABLE, true),
        Mnemonic::Cld => cpu.set_flag(Status::DECIMAL, false),
        Mnemonic::Sed => cpu.set_flag(Status::DECIMAL, true),
        Mnemonic::Clv => cpu.set_flag(Status::OVERFLOW, false),

        Mnemonic::Nop => {}
        _ => return false,
    }
    true
}

#[inline]
fn transfer<C: CpuRegs>(cpu: &mut C, get: fn(&C) -> u8, set: fn(&mut C, u8)) {
    let v = get(cpu);
    set(cpu, v);
    cpu.update_zn(v);
}
