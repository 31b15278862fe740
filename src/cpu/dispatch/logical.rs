/*!
logical.rs - Bitwise opcode family handler

```text
    AND ORA EOR : A op M, Z/N from result (read-type page penalty applies)
    BIT         : Z from A & M, N/V from M bits 7/6; A unchanged
```
*/

use crate::bus::CpuBus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{bit, fetch_operand};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Mnemonic;

pub(super) fn handle<C: CpuRegs, B: CpuBus>(
    m: Mnemonic,
    cpu: &mut C,
    bus: &mut B,
    op: &mut Operand,
    _extra: &mut u8,
) -> bool {
    let combine: fn(u8, u8) -> u8 = match m {
        Mnemonic::And => |a, v| a & v,
        Mnemonic::Ora => |a, v| a | v,
        Mnemonic::Eor => |a, v| a ^ v,
        Mnemonic::Bit => {
            let v = fetch_operand(cpu, bus, op);
            bit(cpu, v);
            return true;
        }
        _ => return false,
    };
    let v = fetch_operand(cpu, bus, op);
    let r = combine(cpu.a(), v);
    cpu.set_a(r);
    cpu.update_zn(r);
    true
}

#[cfg(test)]
mod tests {
    use crate::bus::CpuBus;
    use crate::cpu::state::Status;
    use crate::test_utils::boot_nrom;

    #[test]
    fn and_ora_eor() {
        // LDA #$F0; AND #$3C; ORA #$01; EOR #$FF
        let mut cpu = boot_nrom(&[0xA9, 0xF0, 0x29, 0x3C, 0x09, 0x01, 0x49, 0xFF]);
        cpu.step();
        cpu.step();
        assert_eq!(cpu.state().a, 0x30);
        cpu.step();
        assert_eq!(cpu.state().a, 0x31);
        cpu.step();
        assert_eq!(cpu.state().a, 0xCE);
        assert!(cpu.flag(Status::NEGATIVE));
    }

    #[test]
    fn and_to_zero_sets_z() {
        let mut cpu = boot_nrom(&[0xA9, 0x0F, 0x29, 0xF0]);
        cpu.step();
        cpu.step();
        assert!(cpu.flag(Status::ZERO));
    }

    #[test]
    fn eor_abs_y_page_cross_penalty() {
        // LDY #$FF; EOR $0201,Y
        let mut cpu = boot_nrom(&[0xA0, 0xFF, 0x59, 0x01, 0x02]);
        cpu.step();
        assert_eq!(cpu.step(), 5);
    }

    #[test]
    fn bit_zero_page_keeps_a() {
        // LDA #$01; BIT $20
        let mut cpu = boot_nrom(&[0xA9, 0x01, 0x24, 0x20]);
        cpu.bus_mut().write(0x0020, 0xC0);
        cpu.step();
        assert_eq!(cpu.step(), 3);
        assert_eq!(cpu.state().a, 0x01);
        assert!(cpu.flag(Status::ZERO));
        assert!(cpu.flag(Status::NEGATIVE));
        assert!(cpu.flag(Status::OVERFLOW));
    }
}
