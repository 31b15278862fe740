/*!
rmw.rs - Read-modify-write opcode family handler

```text
    ASL LSR ROL ROR : Accumulator mode targets A; memory modes read, shift, write back.
                      C from the bit shifted out, Z/N from the result.
    INC DEC         : memory only, 8-bit wrap, Z/N from the result.
```

Indexed forms carry the worst-case cost in their base cycles; no page penalty.
*/

use crate::bus::CpuBus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{asl, fetch_operand, lsr, rol, ror, write_back};
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
        Mnemonic::Asl | Mnemonic::Lsr | Mnemonic::Rol | Mnemonic::Ror => {
            let v = fetch_operand(cpu, bus, op);
            let carry_in = cpu.flag(Status::CARRY);
            let (r, carry_out) = match m {
                Mnemonic::Asl => asl(v),
                Mnemonic::Lsr => lsr(v),
                Mnemonic::Rol => rol(v, carry_in),
                _ => ror(v, carry_in),
            };
            cpu.set_flag(Status::CARRY, carry_out);
            cpu.update_zn(r);
            write_back(cpu, bus, op, r);
        }
        Mnemonic::Inc | Mnemonic::Dec => {
            let v = fetch_operand(cpu, bus, op);
            let r = if m == Mnemonic::Inc {
                v.wrapping_add(1)
            } else {
                v.wrapping_sub(1)
            };
            cpu.update_zn(r);
            write_back(cpu, bus, op, r);
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::bus::CpuBus;
    use crate::cpu::state::Status;
    use crate::test_utils::boot_nrom;

    #[test]
    fn asl_accumulator() {
        // LDA #$81; ASL A
        let mut cpu = boot_nrom(&[0xA9, 0x81, 0x0A]);
        cpu.step();
        assert_eq!(cpu.step(), 2);
        assert_eq!(cpu.state().a, 0x02);
        assert!(cpu.flag(Status::CARRY));
    }

    #[test]
    fn ror_memory_uses_carry_in() {
        // SEC; ROR $10
        let mut cpu = boot_nrom(&[0x38, 0x66, 0x10]);
        cpu.bus_mut().write(0x0010, 0x02);
        cpu.step();
        assert_eq!(cpu.step(), 5);
        assert_eq!(cpu.bus_mut().read(0x0010), 0x81);
        assert!(!cpu.flag(Status::CARRY));
        assert!(cpu.flag(Status::NEGATIVE));
    }

    #[test]
    fn rol_and_lsr_accumulator() {
        // CLC; LDA #$80; ROL A; LSR A
        let mut cpu = boot_nrom(&[0x18, 0xA9, 0x80, 0x2A, 0x4A]);
        for _ in 0..3 {
            cpu.step();
        }
        assert_eq!(cpu.state().a, 0x00);
        assert!(cpu.flag(Status::CARRY));
        assert!(cpu.flag(Status::ZERO));
        cpu.step();
        assert_eq!(cpu.state().a, 0x00);
        assert!(!cpu.flag(Status::CARRY));
    }

    #[test]
    fn inc_dec_wrap_in_memory() {
        // INC $0200; DEC $10
        let mut cpu = boot_nrom(&[0xEE, 0x00, 0x02, 0xC6, 0x10]);
        cpu.bus_mut().write(0x0200, 0xFF);
        assert_eq!(cpu.step(), 6);
        assert_eq!(cpu.bus_mut().read(0x0200), 0x00);
        assert!(cpu.flag(Status::ZERO));
        assert_eq!(cpu.step(), 5);
        assert_eq!(cpu.bus_mut().read(0x0010), 0xFF);
        assert!(cpu.flag(Status::NEGATIVE));
    }

    #[test]
    fn asl_abs_x_has_fixed_cost() {
        // LDX #$01; ASL $02FF,X
        let mut cpu = boot_nrom(&[0xA2, 0x01, 0x1E, 0xFF, 0x02]);
        cpu.step();
        assert_eq!(cpu.step(), 7);
    }
}
