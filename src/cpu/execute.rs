/*!
execute.rs - 6502 instruction semantic helpers (ALU, flags, stack, RMW)

Purpose
=======
Centralize side-effect logic for instructions so every dispatch family shares a
single implementation. Helpers are generic over `CpuRegs` (registers) and
`CpuBus` (memory); nothing here knows about cycles.

Scope (crate-visible)
---------------------
Operand access:
    fetch_operand, write_back

Stack helpers:
    push, pull, push_word, pull_word, push_status, pull_status

ALU:
    adc, sbc, compare, bit
    asl, lsr, rol, ror   (pure: value + carry in -> result + carry out)

Branch:
    branch

Design Notes
============
- Stack: page $01, push writes at $0100|SP then decrements; pull increments then reads.
  SP wraps silently in both directions.
- ADC/SBC are binary only. DECIMAL is stored in the status register but ignored here.
*/

use crate::bus::CpuBus;
use crate::cpu::addressing::{AddressingMode, Operand};
use crate::cpu::cycles::page_crossed;
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{STACK_PAGE, Status};

// ---------------------------------------------------------------------
// Operand access
// ---------------------------------------------------------------------

/// Read the operand value: A for Accumulator mode, memory otherwise.
/// The value is latched into `op.fetched`.
#[inline]
pub(crate) fn fetch_operand<C: CpuRegs, B: CpuBus>(cpu: &C, bus: &mut B, op: &mut Operand) -> u8 {
    let v = match op.mode {
        AddressingMode::Accumulator => cpu.a(),
        AddressingMode::Implicit => op.fetched,
        _ => bus.read(op.addr),
    };
    op.fetched = v;
    v
}

/// Store a read-modify-write result where the operand came from.
#[inline]
pub(crate) fn write_back<C: CpuRegs, B: CpuBus>(cpu: &mut C, bus: &mut B, op: &Operand, v: u8) {
    if op.mode == AddressingMode::Accumulator {
        cpu.set_a(v);
    } else {
        bus.write(op.addr, v);
    }
}

// ---------------------------------------------------------------------
// Stack
// ---------------------------------------------------------------------

#[inline]
pub(crate) fn push<C: CpuRegs, B: CpuBus>(cpu: &mut C, bus: &mut B, v: u8) {
    let sp = cpu.sp();
    bus.write(STACK_PAGE | sp as u16, v);
    cpu.set_sp(sp.wrapping_sub(1));
}

#[inline]
pub(crate) fn pull<C: CpuRegs, B: CpuBus>(cpu: &mut C, bus: &mut B) -> u8 {
    let sp = cpu.sp().wrapping_add(1);
    cpu.set_sp(sp);
    bus.read(STACK_PAGE | sp as u16)
}

/// Push high byte first so the word sits little-endian in memory.
#[inline]
pub(crate) fn push_word<C: CpuRegs, B: CpuBus>(cpu: &mut C, bus: &mut B, v: u16) {
    push(cpu, bus, (v >> 8) as u8);
    push(cpu, bus, v as u8);
}

#[inline]
pub(crate) fn pull_word<C: CpuRegs, B: CpuBus>(cpu: &mut C, bus: &mut B) -> u16 {
    let lo = pull(cpu, bus) as u16;
    let hi = pull(cpu, bus) as u16;
    (hi << 8) | lo
}

/// Push P with UNUSED set and BREAK as requested (PHP/BRK: set, IRQ/NMI: clear).
#[inline]
pub(crate) fn push_status<C: CpuRegs, B: CpuBus>(cpu: &mut C, bus: &mut B, set_break: bool) {
    let mut p = Status::from_bits_retain(cpu.status()) | Status::UNUSED;
    p.set(Status::BREAK, set_break);
    push(cpu, bus, p.bits());
}

/// Pull P (PLP/RTI): BREAK dropped, UNUSED forced.
#[inline]
pub(crate) fn pull_status<C: CpuRegs, B: CpuBus>(cpu: &mut C, bus: &mut B) {
    let v = pull(cpu, bus);
    let p = (Status::from_bits_retain(v) | Status::UNUSED) - Status::BREAK;
    cpu.set_status(p.bits());
}

// ---------------------------------------------------------------------
// ALU
// ---------------------------------------------------------------------

/// A = A + v + C. Sets C, V, Z, N.
pub(crate) fn adc<C: CpuRegs>(cpu: &mut C, v: u8) {
    let a = cpu.a();
    let sum = a as u16 + v as u16 + cpu.flag(Status::CARRY) as u16;
    let r = sum as u8;
    cpu.set_flag(Status::CARRY, sum > 0xFF);
    cpu.set_flag(Status::OVERFLOW, (a ^ r) & (v ^ r) & 0x80 != 0);
    cpu.set_a(r);
    cpu.update_zn(r);
}

/// A = A - v - !C, via ADC of the one's complement.
#[inline]
pub(crate) fn sbc<C: CpuRegs>(cpu: &mut C, v: u8) {
    adc(cpu, v ^ 0xFF);
}

/// CMP/CPX/CPY: C if reg >= v, Z if equal, N from bit 7 of the difference.
#[inline]
pub(crate) fn compare<C: CpuRegs>(cpu: &mut C, reg: u8, v: u8) {
    let diff = reg.wrapping_sub(v);
    cpu.set_flag(Status::CARRY, reg >= v);
    cpu.update_zn(diff);
}

/// BIT: Z from A & v, N and V copied from v bits 7 and 6.
#[inline]
pub(crate) fn bit<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.set_flag(Status::ZERO, cpu.a() & v == 0);
    cpu.set_flag(Status::NEGATIVE, v & 0x80 != 0);
    cpu.set_flag(Status::OVERFLOW, v & 0x40 != 0);
}

// Shifts return (result, carry_out).

#[inline]
pub(crate) fn asl(v: u8) -> (u8, bool) {
    (v << 1, v & 0x80 != 0)
}

#[inline]
pub(crate) fn lsr(v: u8) -> (u8, bool) {
    (v >> 1, v & 0x01 != 0)
}

#[inline]
pub(crate) fn rol(v: u8, carry_in: bool) -> (u8, bool) {
    ((v << 1) | carry_in as u8, v & 0x80 != 0)
}

#[inline]
pub(crate) fn ror(v: u8, carry_in: bool) -> (u8, bool) {
    ((v >> 1) | ((carry_in as u8) << 7), v & 0x01 != 0)
}

// ---------------------------------------------------------------------
// Branch
// ---------------------------------------------------------------------

/// Apply a conditional branch. PC already points past the operand.
/// Returns extra cycles: 0 not taken, 1 taken, 2 taken onto another page.
pub(crate) fn branch<C: CpuRegs>(cpu: &mut C, op: &Operand, take: bool) -> u8 {
    if !take {
        return 0;
    }
    let next = cpu.pc();
    let target = next.wrapping_add(op.rel);
    cpu.set_pc(target);
    1 + page_crossed(next, target) as u8
}
