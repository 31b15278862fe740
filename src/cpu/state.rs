/*!
state.rs - Canonical 6502 CPU architectural state (registers + flags) and
inline-friendly helpers.

Overview
========
`CpuState` is the single authoritative owner for all architecturally visible
registers. It intentionally excludes:
  - Bus / memory logic
  - Instruction decode / dispatch logic
  - Timing / cycle accounting
Those live in higher layers (core, dispatch, execute modules).

Invariant
=========
The UNUSED bit (bit 5) reads back as 1 no matter what was written. Every
status mutator re-asserts it.

6502 Status Register Bit Layout (for reference)
===============================================
Bit: 7 6 5 4 3 2 1 0
     N V 1 B D I Z C
Where:
  N = NEGATIVE
  V = OVERFLOW
  1 = UNUSED (always reads as 1)
  B = BREAK (only meaningful in the pushed copy: PHP/BRK set it, IRQ/NMI clear it)
  D = DECIMAL (stored and toggled, arithmetic stays binary on this CPU)
  I = INTERRUPT_DISABLE
  Z = ZERO
  C = CARRY
*/

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Processor status register.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        const CARRY = 0b0000_0001;
        const ZERO = 0b0000_0010;
        const INTERRUPT_DISABLE = 0b0000_0100;
        const DECIMAL = 0b0000_1000;
        const BREAK = 0b0001_0000;
        const UNUSED = 0b0010_0000;
        const OVERFLOW = 0b0100_0000;
        const NEGATIVE = 0b1000_0000;
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::UNUSED
    }
}

/// Stack lives in page $01.
pub const STACK_PAGE: u16 = 0x0100;
/// Stack pointer after reset.
pub const RESET_SP: u8 = 0xFD;

/// Pure architectural register / flag container for the 6502 CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuState {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: Status,
}

impl Default for CpuState {
    fn default() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: RESET_SP,
            pc: 0x0000,
            status: Status::UNUSED,
        }
    }
}

impl CpuState {
    /// Register file in its post-reset shape (PC still unloaded).
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------
    // Status byte
    // ---------------------------------------------------------------------

    /// Status as a raw byte; UNUSED always set.
    #[inline]
    pub fn status_byte(&self) -> u8 {
        (self.status | Status::UNUSED).bits()
    }

    /// Load status from a raw byte (B is kept as written, U is forced).
    #[inline]
    pub fn set_status_byte(&mut self, v: u8) {
        self.status = Status::from_bits_retain(v) | Status::UNUSED;
    }

    // ---------------------------------------------------------------------
    // Flag Operations
    // ---------------------------------------------------------------------

    #[inline]
    pub fn flag(&self, f: Status) -> bool {
        (self.status | Status::UNUSED).contains(f)
    }

    #[inline]
    pub fn set_flag(&mut self, f: Status, on: bool) {
        self.status.set(f, on);
        self.status.insert(Status::UNUSED);
    }

    /// Composite helper to update ZERO + NEGATIVE according to 6502 rules.
    #[inline]
    pub fn update_zn(&mut self, result: u8) {
        self.set_flag(Status::ZERO, result == 0);
        self.set_flag(Status::NEGATIVE, result & 0x80 != 0);
    }
}

impl fmt::Display for CpuState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} PC:{:04X}",
            self.a,
            self.x,
            self.y,
            self.status_byte(),
            self.sp,
            self.pc
        )
    }
}
