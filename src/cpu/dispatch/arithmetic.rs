/*!
arithmetic.rs - ADC / SBC and register increment/decrement handler

ADC, SBC
    Binary add/subtract with carry; C, V, Z, N updated. DECIMAL is ignored.
    Read-type: indexed page crossings cost +1 (applied by the core).

INX INY DEX DEY
    8-bit wrapping step of X or Y, Z/N from the result.
*/

use crate::bus::CpuBus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{adc, fetch_operand, sbc};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Mnemonic;

pub(super) fn handle<C: CpuRegs, B: CpuBus>(
    m: Mnemonic,
    cpu: &mut C,
    bus: &mut B,
    op: &mut Operand,
    _extra: &mut u8,
) -> bool {
    match m {
        Mnemonic::Adc => {
            let v = fetch_operand(cpu, bus, op);
            adc(cpu, v);
        }
        Mnemonic::Sbc => {
            let v = fetch_operand(cpu, bus, op);
            sbc(cpu, v);
        }
        Mnemonic::Inx => {
            let r = cpu.x().wrapping_add(1);
            cpu.set_x(r);
            cpu.update_zn(r);
        }
        Mnemonic::Iny => {
            let r = cpu.y().wrapping_add(1);
            cpu.set_y(r);
            cpu.update_zn(r);
        }
        Mnemonic::Dex => {
            let r = cpu.x().wrapping_sub(1);
            cpu.set_x(r);
            cpu.update_zn(r);
        }
        Mnemonic::Dey => {
            let r = cpu.y().wrapping_sub(1);
            cpu.set_y(r);
            cpu.update_zn(r);
        }
        _ => return false,
    }
    true
}
