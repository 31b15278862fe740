/*!
addressing.rs - 6502 addressing modes and operand resolution

Overview
========
Provides canonical helpers for:
- Instruction stream byte/word fetch
- Effective address calculation for all thirteen 6502 addressing modes
- Page-cross reporting (for the +1 cycle read penalty)
- Emulation of the 6502 JMP (indirect) page-wrap quirk

Scope & Responsibilities
=======================
- Pure address / operand resolution only. No cycle penalties are applied here;
  `resolve` reports `page_crossed` and the core decides whether it costs a cycle.
- The page test compares the true pre-index base with the indexed address.

Caller Assumptions
==================
- PC points at the first operand byte (the opcode has already been consumed).
- On return PC points past the operand bytes.

Relative mode
=============
The signed displacement is sign-extended into a u16 (`rel`) so the branch target
is simply `pc.wrapping_add(rel)` where `pc` already points past the operand.
*/

use crate::bus::CpuBus;
use crate::cpu::regs::CpuRegs;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    Implicit,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndexedIndirect,
    IndirectIndexed,
}

impl AddressingMode {
    /// Operand bytes following the opcode.
    pub const fn operand_len(self) -> u16 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndexedIndirect
            | AddressingMode::IndirectIndexed => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

/// Result of resolving one instruction's operand.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Operand {
    pub mode: AddressingMode,
    /// Effective address (unused for Implicit / Accumulator / Relative).
    pub addr: u16,
    /// Sign-extended branch displacement (Relative only).
    pub rel: u16,
    /// Indexing moved the address onto another page.
    pub page_crossed: bool,
    /// Last operand byte fetched by the handler (memory or A).
    pub fetched: u8,
}

impl Operand {
    fn new(mode: AddressingMode) -> Self {
        Self {
            mode,
            addr: 0,
            rel: 0,
            page_crossed: false,
            fetched: 0,
        }
    }

    fn at(mode: AddressingMode, addr: u16) -> Self {
        Self {
            addr,
            ..Self::new(mode)
        }
    }

    fn indexed(mode: AddressingMode, base: u16, index: u8) -> Self {
        let addr = base.wrapping_add(index as u16);
        Self {
            addr,
            page_crossed: crate::cpu::cycles::page_crossed(base, addr),
            ..Self::new(mode)
        }
    }

    /// Extra cycles this resolution incurred (0 or 1).
    #[inline]
    pub fn extra_cycles(&self) -> u8 {
        self.page_crossed as u8
    }
}

/// Fetch next byte from the instruction stream, incrementing PC.
#[inline]
pub(crate) fn fetch_byte<C: CpuRegs, B: CpuBus>(cpu: &mut C, bus: &mut B) -> u8 {
    let v = bus.read(cpu.pc());
    cpu.advance_pc(1);
    v
}

/// Fetch next little-endian word (low, then high), incrementing PC twice.
#[inline]
pub(crate) fn fetch_word<C: CpuRegs, B: CpuBus>(cpu: &mut C, bus: &mut B) -> u16 {
    let lo = fetch_byte(cpu, bus) as u16;
    let hi = fetch_byte(cpu, bus) as u16;
    (hi << 8) | lo
}

/// Resolve the operand for `mode`, advancing PC past the operand bytes.
pub(crate) fn resolve<C: CpuRegs, B: CpuBus>(
    mode: AddressingMode,
    cpu: &mut C,
    bus: &mut B,
) -> Operand {
    use AddressingMode::*;
    match mode {
        Implicit | Accumulator => Operand::new(mode),
        Immediate => {
            let addr = cpu.pc();
            cpu.advance_pc(1);
            Operand::at(mode, addr)
        }
        ZeroPage => Operand::at(mode, fetch_byte(cpu, bus) as u16),
        ZeroPageX => Operand::at(mode, fetch_byte(cpu, bus).wrapping_add(cpu.x()) as u16),
        ZeroPageY => Operand::at(mode, fetch_byte(cpu, bus).wrapping_add(cpu.y()) as u16),
        Relative => {
            let offset = fetch_byte(cpu, bus) as i8;
            Operand {
                rel: offset as i16 as u16,
                ..Operand::new(mode)
            }
        }
        Absolute => Operand::at(mode, fetch_word(cpu, bus)),
        AbsoluteX => {
            let base = fetch_word(cpu, bus);
            Operand::indexed(mode, base, cpu.x())
        }
        AbsoluteY => {
            let base = fetch_word(cpu, bus);
            Operand::indexed(mode, base, cpu.y())
        }
        Indirect => {
            let ptr = fetch_word(cpu, bus);
            Operand::at(mode, read_word_indirect_bug(bus, ptr))
        }
        IndexedIndirect => {
            let zp = fetch_byte(cpu, bus).wrapping_add(cpu.x());
            Operand::at(mode, read_word_zp(bus, zp))
        }
        IndirectIndexed => {
            let zp = fetch_byte(cpu, bus);
            let base = read_word_zp(bus, zp);
            Operand::indexed(mode, base, cpu.y())
        }
    }
}

// -------------------------
// Low-level word helpers
// -------------------------

/// Read a 16-bit little endian pointer from zero page with wraparound
/// on the high byte (standard 6502 zero-page indirect behavior).
#[inline]
pub(crate) fn read_word_zp<B: CpuBus>(bus: &mut B, base: u8) -> u16 {
    let lo = bus.read(base as u16) as u16;
    let hi = bus.read(base.wrapping_add(1) as u16) as u16;
    (hi << 8) | lo
}

/// Emulate the original 6502 JMP (indirect) hardware bug: when the
/// low byte of the pointer is 0xFF, the high byte is fetched from the
/// start of the same page instead of the next one.
#[inline]
pub(crate) fn read_word_indirect_bug<B: CpuBus>(bus: &mut B, addr: u16) -> u16 {
    let lo = bus.read(addr) as u16;
    let hi_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
    let hi = bus.read(hi_addr) as u16;
    (hi << 8) | lo
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::FlatMemory;
    use crate::cpu::state::CpuState;

    fn setup(pc: u16, operand: &[u8]) -> (CpuState, FlatMemory) {
        let mut mem = FlatMemory::new();
        mem.load(pc, operand);
        let cpu = CpuState {
            pc,
            ..CpuState::new()
        };
        (cpu, mem)
    }

    #[test]
    fn implicit_and_accumulator_leave_pc() {
        let (mut cpu, mut mem) = setup(0x0400, &[]);
        for mode in [AddressingMode::Implicit, AddressingMode::Accumulator] {
            let op = resolve(mode, &mut cpu, &mut mem);
            assert_eq!(op.extra_cycles(), 0);
            assert_eq!(cpu.pc, 0x0400);
        }
    }

    #[test]
    fn immediate_points_at_operand() {
        let (mut cpu, mut mem) = setup(0x0400, &[0x42]);
        let op = resolve(AddressingMode::Immediate, &mut cpu, &mut mem);
        assert_eq!(op.addr, 0x0400);
        assert_eq!(cpu.pc, 0x0401);
    }

    #[test]
    fn zero_page_indexed_wraps_in_page_zero() {
        let (mut cpu, mut mem) = setup(0x0400, &[0xF0]);
        cpu.x = 0x20;
        let op = resolve(AddressingMode::ZeroPageX, &mut cpu, &mut mem);
        assert_eq!(op.addr, 0x0010);
        assert!(!op.page_crossed);

        let (mut cpu, mut mem) = setup(0x0400, &[0xFF]);
        cpu.y = 0x01;
        let op = resolve(AddressingMode::ZeroPageY, &mut cpu, &mut mem);
        assert_eq!(op.addr, 0x0000);
    }

    #[test]
    fn absolute_x_page_cross_detection() {
        let (mut cpu, mut mem) = setup(0x0400, &[0xFF, 0x20]);
        cpu.x = 1;
        let op = resolve(AddressingMode::AbsoluteX, &mut cpu, &mut mem);
        assert_eq!(op.addr, 0x2100);
        assert!(op.page_crossed);
        assert_eq!(op.extra_cycles(), 1);
        assert_eq!(cpu.pc, 0x0402);

        let (mut cpu, mut mem) = setup(0x0400, &[0x00, 0x20]);
        cpu.x = 1;
        let op = resolve(AddressingMode::AbsoluteX, &mut cpu, &mut mem);
        assert_eq!(op.addr, 0x2001);
        assert_eq!(op.extra_cycles(), 0);
    }

    #[test]
    fn absolute_y_wraps_past_ffff() {
        let (mut cpu, mut mem) = setup(0x0400, &[0xFF, 0xFF]);
        cpu.y = 2;
        let op = resolve(AddressingMode::AbsoluteY, &mut cpu, &mut mem);
        assert_eq!(op.addr, 0x0001);
        assert!(op.page_crossed);
    }

    #[test]
    fn indirect_jmp_bug() {
        // Pointer $30FF: high byte comes from $3000, not $3100.
        let (mut cpu, mut mem) = setup(0x0400, &[0xFF, 0x30]);
        mem.write(0x30FF, 0x34);
        mem.write(0x3000, 0x12);
        mem.write(0x3100, 0x99);
        let op = resolve(AddressingMode::Indirect, &mut cpu, &mut mem);
        assert_eq!(op.addr, 0x1234);
        assert_eq!(cpu.pc, 0x0402);
    }

    #[test]
    fn indexed_indirect_wraps_pointer_in_zero_page() {
        let (mut cpu, mut mem) = setup(0x0400, &[0xFE]);
        cpu.x = 1;
        mem.write(0x00FF, 0x78);
        mem.write(0x0000, 0x56);
        let op = resolve(AddressingMode::IndexedIndirect, &mut cpu, &mut mem);
        assert_eq!(op.addr, 0x5678);
        assert_eq!(cpu.pc, 0x0401);
    }

    #[test]
    fn indirect_indexed_page_cross() {
        let (mut cpu, mut mem) = setup(0x0400, &[0x10]);
        mem.write(0x0010, 0xFF);
        mem.write(0x0011, 0x20);
        cpu.y = 1;
        let op = resolve(AddressingMode::IndirectIndexed, &mut cpu, &mut mem);
        assert_eq!(op.addr, 0x2100);
        assert!(op.page_crossed);

        let (mut cpu, mut mem) = setup(0x0400, &[0x10]);
        mem.write(0x0010, 0x00);
        mem.write(0x0011, 0x20);
        cpu.y = 1;
        let op = resolve(AddressingMode::IndirectIndexed, &mut cpu, &mut mem);
        assert_eq!(op.addr, 0x2001);
        assert!(!op.page_crossed);
    }

    #[test]
    fn relative_sign_extends() {
        let (mut cpu, mut mem) = setup(0x0400, &[0xFB]);
        let op = resolve(AddressingMode::Relative, &mut cpu, &mut mem);
        assert_eq!(cpu.pc, 0x0401);
        assert_eq!(cpu.pc.wrapping_add(op.rel), 0x03FC);

        let (mut cpu, mut mem) = setup(0x0400, &[0x05]);
        let op = resolve(AddressingMode::Relative, &mut cpu, &mut mem);
        assert_eq!(op.rel, 0x0005);
    }

    #[test]
    fn operand_lengths() {
        assert_eq!(AddressingMode::Implicit.operand_len(), 0);
        assert_eq!(AddressingMode::IndirectIndexed.operand_len(), 1);
        assert_eq!(AddressingMode::Indirect.operand_len(), 2);
    }
}
