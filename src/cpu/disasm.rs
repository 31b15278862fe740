//! Disassembler over any `CpuBus`, driven by the opcode descriptor table.
//!
//! Output is one `(address, text)` pair per instruction, e.g.
//! `(0x8000, "LDA #$01")`, `(0x8002, "BNE $8000")`. Bytes without a descriptor
//! become `"???"` and advance by one.
//!
//! Reads go through the bus, so disassembling a peripheral window counts as an access.

use crate::bus::CpuBus;
use crate::cpu::addressing::AddressingMode;
use crate::cpu::table::lookup;

/// Disassemble `start..=end`. An instruction whose operand runs past `end` is still
/// decoded in full; decoding stops once the next address would pass `end` or $FFFF.
pub fn disassemble<B: CpuBus>(bus: &mut B, start: u16, end: u16) -> Vec<(u16, String)> {
    let mut lines = Vec::new();
    let mut addr = start as u32;
    let end = end as u32;

    while addr <= end {
        let at = addr as u16;
        let opcode = bus.read(at);
        let Some(instr) = lookup(opcode) else {
            lines.push((at, "???".to_string()));
            addr += 1;
            continue;
        };

        let len = instr.mode.operand_len();
        let lo = if len >= 1 {
            bus.read(at.wrapping_add(1))
        } else {
            0
        };
        let hi = if len >= 2 {
            bus.read(at.wrapping_add(2))
        } else {
            0
        };
        let next = at.wrapping_add(1 + len);

        let operand = format_operand(instr.mode, lo, hi, next);
        let name = instr.mnemonic.name();
        let text = if operand.is_empty() {
            name.to_string()
        } else {
            format!("{name} {operand}")
        };
        lines.push((at, text));
        addr += 1 + len as u32;
    }
    lines
}

fn format_operand(mode: AddressingMode, lo: u8, hi: u8, next: u16) -> String {
    use AddressingMode::*;
    let word = u16::from_le_bytes([lo, hi]);
    match mode {
        Implicit => String::new(),
        Accumulator => "A".to_string(),
        Immediate => format!("#${lo:02X}"),
        ZeroPage => format!("${lo:02X}"),
        ZeroPageX => format!("${lo:02X},X"),
        ZeroPageY => format!("${lo:02X},Y"),
        // Branch targets are shown resolved.
        Relative => format!("${:04X}", next.wrapping_add(lo as i8 as i16 as u16)),
        Absolute => format!("${word:04X}"),
        AbsoluteX => format!("${word:04X},X"),
        AbsoluteY => format!("${word:04X},Y"),
        Indirect => format!("(${word:04X})"),
        IndexedIndirect => format!("(${lo:02X},X)"),
        IndirectIndexed => format!("(${lo:02X}),Y"),
    }
}
