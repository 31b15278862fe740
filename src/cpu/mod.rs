/*!
cpu - The NMOS 6502 core used by the console (binary arithmetic only).

Modules:

```text
    state.rs      - `CpuState` registers and the `Status` flag set.
    regs.rs       - `CpuRegs` trait (register/flag surface) and `Register` identifiers.
    addressing.rs - Addressing modes and operand resolution.
    cycles.rs     - Fixed costs and page-cross rule.
    table.rs      - Static opcode descriptor table (`Mnemonic`, `Instruction`).
    execute.rs    - Instruction semantic helpers (ALU, stack, RMW, branch).
    dispatch/     - Per-family instruction handlers behind a single `execute` entry.
    core/         - `Cpu<B>`: clock, step/run, reset, interrupts.
    disasm.rs     - Table-driven disassembler.
```

The public surface is the `Cpu` type; handlers and helpers stay crate-internal.

Usage:
```rust
use nescore::{Bus, Cpu};

let mut cpu = Cpu::new(Bus::new());
cpu.reset();
let cycles = cpu.step();
assert!(cycles >= 2);
```

Feature flags:
    trace - one `log::trace!` line per executed instruction.
*/

pub mod addressing;
pub mod core;
pub mod cycles;
pub mod disasm;
pub(crate) mod dispatch;
pub(crate) mod execute;
pub mod regs;
pub mod state;
pub mod table;

pub use crate::cpu::addressing::{AddressingMode, Operand};
pub use crate::cpu::core::{Cpu, UndefinedOpcodePolicy};
pub use crate::cpu::regs::{CpuRegs, Register};
pub use crate::cpu::state::{CpuState, Status};
pub use crate::cpu::table::{Instruction, Mnemonic};
