/*!
load_store.rs - Load / Store opcode family handler

Loads (set Z/N; read-type, so indexed page crossings cost +1 in the core):
    LDA LDX LDY

Stores (no flags; base cost already covers the worst case):
    STA STX STY
*/

use crate::bus::CpuBus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::fetch_operand;
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
        Mnemonic::Lda => {
            let v = fetch_operand(cpu, bus, op);
            cpu.set_a(v);
            cpu.update_zn(v);
        }
        Mnemonic::Ldx => {
            let v = fetch_operand(cpu, bus, op);
            cpu.set_x(v);
            cpu.update_zn(v);
        }
        Mnemonic::Ldy => {
            let v = fetch_operand(cpu, bus, op);
            cpu.set_y(v);
            cpu.update_zn(v);
        }
        Mnemonic::Sta => bus.write(op.addr, cpu.a()),
        Mnemonic::Stx => bus.write(op.addr, cpu.x()),
        Mnemonic::Sty => bus.write(op.addr, cpu.y()),
        _ => return false,
    }
    true
}
