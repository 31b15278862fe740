/*!
regs.rs - CpuRegs trait: the register + flag surface used by instruction
semantics, plus the `Register` identifier for host-side inspection.

The trait does NOT include:
  - Stack push/pop
  - Instruction fetch helpers
  - Bus access of any kind

Memory, stack and fetch operations stay explicit at call sites (`&mut impl CpuBus`),
keeping implementations small and static dispatch cheap.

Implementations Provided:
=========================
- CpuRegs for `CpuState` (the canonical state owner)
*/

use crate::cpu::state::{CpuState, Status};

/// Identifies one 8-bit register for get/set by name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Register {
    A,
    X,
    Y,
    StackPointer,
    Status,
}

/// Minimal 6502 register + flag API needed by addressing, semantics and dispatch.
///
/// ALL mutating methods take &mut self, enabling generic call sites:
///   fn op<T: CpuRegs>(cpu: &mut T) { ... }
pub trait CpuRegs {
    // ---------------------------------------------------------------------
    // Read accessors
    // ---------------------------------------------------------------------
    fn a(&self) -> u8;
    fn x(&self) -> u8;
    fn y(&self) -> u8;
    fn sp(&self) -> u8;
    fn pc(&self) -> u16;
    /// Raw status byte (UNUSED set).
    fn status(&self) -> u8;

    // ---------------------------------------------------------------------
    // Mutators
    // ---------------------------------------------------------------------
    fn set_a(&mut self, v: u8);
    fn set_x(&mut self, v: u8);
    fn set_y(&mut self, v: u8);
    fn set_sp(&mut self, v: u8);
    fn set_pc(&mut self, v: u16);
    fn set_status(&mut self, v: u8);

    // ---------------------------------------------------------------------
    // Flags
    // ---------------------------------------------------------------------
    fn flag(&self, f: Status) -> bool;
    fn set_flag(&mut self, f: Status, on: bool);

    /// Advance PC by `delta` (wrapping at 16 bits).
    #[inline]
    fn advance_pc(&mut self, delta: u16) {
        let pc = self.pc().wrapping_add(delta);
        self.set_pc(pc);
    }

    /// Composite: update ZERO and NEGATIVE based on result.
    #[inline]
    fn update_zn(&mut self, result: u8) {
        self.set_flag(Status::ZERO, result == 0);
        self.set_flag(Status::NEGATIVE, result & 0x80 != 0);
    }

    /// Read an 8-bit register by identifier.
    fn register(&self, r: Register) -> u8 {
        match r {
            Register::A => self.a(),
            Register::X => self.x(),
            Register::Y => self.y(),
            Register::StackPointer => self.sp(),
            Register::Status => self.status(),
        }
    }

    /// Write an 8-bit register by identifier. Status writes keep UNUSED set.
    fn set_register(&mut self, r: Register, v: u8) {
        match r {
            Register::A => self.set_a(v),
            Register::X => self.set_x(v),
            Register::Y => self.set_y(v),
            Register::StackPointer => self.set_sp(v),
            Register::Status => self.set_status(v),
        }
    }
}

impl CpuRegs for CpuState {
    #[inline]
    fn a(&self) -> u8 {
        self.a
    }
    #[inline]
    fn x(&self) -> u8 {
        self.x
    }
    #[inline]
    fn y(&self) -> u8 {
        self.y
    }
    #[inline]
    fn sp(&self) -> u8 {
        self.sp
    }
    #[inline]
    fn pc(&self) -> u16 {
        self.pc
    }
    #[inline]
    fn status(&self) -> u8 {
        self.status_byte()
    }

    #[inline]
    fn set_a(&mut self, v: u8) {
        self.a = v;
    }
    #[inline]
    fn set_x(&mut self, v: u8) {
        self.x = v;
    }
    #[inline]
    fn set_y(&mut self, v: u8) {
        self.y = v;
    }
    #[inline]
    fn set_sp(&mut self, v: u8) {
        self.sp = v;
    }
    #[inline]
    fn set_pc(&mut self, v: u16) {
        self.pc = v;
    }
    #[inline]
    fn set_status(&mut self, v: u8) {
        self.set_status_byte(v);
    }

    #[inline]
    fn flag(&self, f: Status) -> bool {
        CpuState::flag(self, f)
    }
    #[inline]
    fn set_flag(&mut self, f: Status, on: bool) {
        CpuState::set_flag(self, f, on);
    }

    // update_zn / register / set_register use default implementations
}

#[cfg(test)]
mod tests {
    use super::{CpuRegs, Register};
    use crate::cpu::state::{CpuState, Status};

    #[test]
    fn register_round_trip_by_identifier() {
        let mut s = CpuState::new();
        for (r, v) in [
            (Register::A, 0x11),
            (Register::X, 0x22),
            (Register::Y, 0x33),
            (Register::StackPointer, 0x44),
        ] {
            s.set_register(r, v);
            assert_eq!(s.register(r), v);
        }
    }

    #[test]
    fn status_register_keeps_unused() {
        let mut s = CpuState::new();
        s.set_register(Register::Status, 0xC3);
        assert_eq!(s.register(Register::Status), 0xE3);
        assert!(CpuRegs::flag(&s, Status::NEGATIVE));
        assert!(CpuRegs::flag(&s, Status::CARRY));
    }

    #[test]
    fn advance_pc_wraps() {
        let mut s = CpuState::new();
        s.pc = 0xFFFF;
        s.advance_pc(2);
        assert_eq!(s.pc, 0x0001);
    }
}
