/*!
core::Cpu - The 6502 CPU: register state plus the bus it drives.

Overview
========
`Cpu<B>` owns its `CpuState` and the `CpuBus` it was built with. Hosts drive it one
clock pulse at a time (`clock`) or one instruction at a time (`step`, `run`).

Clocking
========
The engine is a two-state machine:

```text
    pending == 0  -> fetch the opcode at PC, resolve the operand, execute the handler,
                     and load `pending` with base + extra cycles
    every pulse   -> consume one pending cycle
```

All side effects of an instruction happen on its first pulse; the remaining pulses
only burn time. An instruction of cost N therefore spans exactly N calls to `clock`.

Undefined opcodes
=================
The 105 byte values with no documented instruction follow `UndefinedOpcodePolicy`:
`Nop` (default) charges 2 cycles and moves on, `Halt` stops the clock until `reset`.
Both log the event at warn level. Neither reproduces real undocumented-opcode behavior.
*/

use crate::bus::CpuBus;
use crate::cpu::addressing::{Operand, resolve};
use crate::cpu::cycles::{
    IRQ_CYCLES, NMI_CYCLES, RESET_CYCLES, UNDEFINED_OPCODE_CYCLES, instruction_cycles,
};
use crate::cpu::dispatch;
use crate::cpu::execute::{push_status, push_word};
use crate::cpu::regs::{CpuRegs, Register};
use crate::cpu::state::{CpuState, Status};
use crate::cpu::table::lookup;

pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;
pub const NMI_VECTOR: u16 = 0xFFFA;

/// What the engine does with an opcode byte that has no descriptor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum UndefinedOpcodePolicy {
    /// Skip the byte, charge 2 cycles.
    #[default]
    Nop,
    /// Stop clocking until the next reset.
    Halt,
}

pub struct Cpu<B: CpuBus> {
    state: CpuState,
    bus: B,
    // Latches from the most recent fetch.
    opcode: u8,
    operand: Option<Operand>,
    cycles: u8,
    clock_count: u64,
    halted: bool,
    policy: UndefinedOpcodePolicy,
}

impl<B: CpuBus> Cpu<B> {
    /// Construct a CPU around `bus` with power-up register values.
    /// Call `reset` before clocking to load PC from the reset vector.
    pub fn new(bus: B) -> Self {
        Self::with_policy(bus, UndefinedOpcodePolicy::default())
    }

    pub fn with_policy(bus: B, policy: UndefinedOpcodePolicy) -> Self {
        Self {
            state: CpuState::new(),
            bus,
            opcode: 0,
            operand: None,
            cycles: 0,
            clock_count: 0,
            halted: false,
            policy,
        }
    }

    pub fn set_undefined_opcode_policy(&mut self, policy: UndefinedOpcodePolicy) {
        self.policy = policy;
    }

    pub fn undefined_opcode_policy(&self) -> UndefinedOpcodePolicy {
        self.policy
    }

    /// Reset: A = X = Y = 0, SP = $FD, P = UNUSED, PC from $FFFC/$FFFD, 8 cycles pending.
    pub fn reset(&mut self) {
        self.state = CpuState::new();
        self.state.pc = self.bus.read_word(RESET_VECTOR);
        self.opcode = 0;
        self.operand = None;
        self.halted = false;
        self.cycles = RESET_CYCLES;
        log::debug!("cpu reset: vector ${:04X}", self.state.pc);
    }

    /// Advance one clock pulse.
    pub fn clock(&mut self) {
        if self.halted {
            return;
        }
        if self.cycles == 0 {
            self.cycles = self.fetch_and_execute();
            if self.halted {
                return;
            }
        }
        self.cycles -= 1;
        self.clock_count += 1;
    }

    /// True when the last instruction has used all of its cycles.
    #[inline]
    pub fn complete(&self) -> bool {
        self.cycles == 0
    }

    /// Finish any pending cycles, then run exactly one instruction to completion.
    /// Returns that instruction's cycle count (0 if the CPU is or becomes halted).
    pub fn step(&mut self) -> u32 {
        while !self.complete() && !self.halted {
            self.clock();
        }
        let start = self.clock_count;
        self.clock();
        while !self.complete() && !self.halted {
            self.clock();
        }
        (self.clock_count - start) as u32
    }

    /// Step up to `max_instructions` or until halted. Returns total cycles consumed.
    pub fn run(&mut self, max_instructions: usize) -> u64 {
        let mut total = 0u64;
        for _ in 0..max_instructions {
            if self.halted {
                break;
            }
            total += self.step() as u64;
        }
        total
    }

    /// Maskable interrupt request. Ignored while INTERRUPT_DISABLE is set.
    /// The sequence's cycles queue behind any still pending.
    pub fn irq(&mut self) {
        if self.state.flag(Status::INTERRUPT_DISABLE) {
            return;
        }
        self.interrupt(IRQ_VECTOR, IRQ_CYCLES);
    }

    /// Non-maskable interrupt.
    pub fn nmi(&mut self) {
        self.interrupt(NMI_VECTOR, NMI_CYCLES);
    }

    // Push PC and P (BREAK clear), set I, jump through `vector`.
    fn interrupt(&mut self, vector: u16, cost: u8) {
        let pc = self.state.pc;
        push_word(&mut self.state, &mut self.bus, pc);
        push_status(&mut self.state, &mut self.bus, false);
        self.state.set_flag(Status::INTERRUPT_DISABLE, true);
        self.state.pc = self.bus.read_word(vector);
        self.cycles = self.cycles.saturating_add(cost);
    }

    fn fetch_and_execute(&mut self) -> u8 {
        let pc = self.state.pc;
        let opcode = self.bus.read(pc);
        self.opcode = opcode;
        self.state.advance_pc(1);

        let Some(instr) = lookup(opcode) else {
            return self.undefined_opcode(opcode, pc);
        };

        #[cfg(feature = "trace")]
        log::trace!(
            "{pc:04X}  {opcode:02X}  {:<3}  {}  CYC:{}",
            instr.mnemonic.name(),
            self.state,
            self.clock_count
        );

        let mut op = resolve(instr.mode, &mut self.state, &mut self.bus);
        let extra = dispatch::execute(instr, &mut self.state, &mut self.bus, &mut op);
        let cost = instruction_cycles(instr, op.extra_cycles(), extra);
        self.operand = Some(op);
        cost
    }

    fn undefined_opcode(&mut self, opcode: u8, pc: u16) -> u8 {
        self.operand = None;
        match self.policy {
            UndefinedOpcodePolicy::Nop => {
                log::warn!("undefined opcode ${opcode:02X} at ${pc:04X}; executing as NOP");
                UNDEFINED_OPCODE_CYCLES
            }
            UndefinedOpcodePolicy::Halt => {
                log::warn!("undefined opcode ${opcode:02X} at ${pc:04X}; halting");
                self.halted = true;
                0
            }
        }
    }

    // ---------------------------------------------------------------------
    // Inspection
    // ---------------------------------------------------------------------

    pub fn state(&self) -> &CpuState {
        &self.state
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn into_bus(self) -> B {
        self.bus
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn set_pc(&mut self, pc: u16) {
        self.state.pc = pc;
    }

    pub fn register(&self, r: Register) -> u8 {
        CpuRegs::register(&self.state, r)
    }

    pub fn set_register(&mut self, r: Register, v: u8) {
        CpuRegs::set_register(&mut self.state, r, v);
    }

    pub fn flag(&self, f: Status) -> bool {
        self.state.flag(f)
    }

    pub fn set_flag(&mut self, f: Status, on: bool) {
        self.state.set_flag(f, on);
    }

    /// Cycles left on the current instruction.
    pub fn cycles(&self) -> u8 {
        self.cycles
    }

    /// Pulses consumed since construction.
    pub fn clock_count(&self) -> u64 {
        self.clock_count
    }

    /// Opcode byte of the most recent fetch.
    pub fn last_opcode(&self) -> u8 {
        self.opcode
    }

    /// Resolved operand of the most recent documented instruction.
    pub fn last_operand(&self) -> Option<&Operand> {
        self.operand.as_ref()
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }
}
