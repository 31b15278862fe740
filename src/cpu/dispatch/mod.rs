/*!
dispatch - Tagged instruction dispatch for one decoded 6502 instruction

Overview
========
The core looks the opcode up in the descriptor table (`table::lookup`), resolves the
operand (`addressing::resolve`) and then calls `execute` here. `execute` routes the
mnemonic to its family handler:

```text
    load_store   - LDA LDX LDY STA STX STY
    logical      - AND ORA EOR BIT
    arithmetic   - ADC SBC INX INY DEX DEY
    compare      - CMP CPX CPY
    rmw          - ASL LSR ROL ROR INC DEC
    branches     - BPL BMI BVC BVS BCC BCS BNE BEQ
    control_flow - JMP JSR RTS RTI BRK
    misc         - transfers, stack, flag set/clear, NOP
```

Each family exposes `handle(mnemonic, cpu, bus, op, extra) -> bool`. A handler returns
false for mnemonics outside its family; the chain below is exhaustive over `Mnemonic`,
which the `families_cover_every_legal_opcode` test pins down.

Cycle Accounting
================
Handlers never see base cycles. They only add handler-specific extras to `*extra`
(taken branches). The page-cross penalty from the resolver is applied by the core
through `cycles::instruction_cycles`.
*/

pub(crate) mod arithmetic;
pub(crate) mod branches;
pub(crate) mod compare;
pub(crate) mod control_flow;
pub(crate) mod load_store;
pub(crate) mod logical;
pub(crate) mod misc;
pub(crate) mod rmw;

use crate::bus::CpuBus;
use crate::cpu::addressing::Operand;
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Instruction;

/// Execute one decoded instruction. PC already points past the operand bytes.
/// Returns the handler's extra cycles.
pub(crate) fn execute<C: CpuRegs, B: CpuBus>(
    instr: &Instruction,
    cpu: &mut C,
    bus: &mut B,
    op: &mut Operand,
) -> u8 {
    let m = instr.mnemonic;
    let mut extra = 0u8;
    let handled = load_store::handle(m, cpu, bus, op, &mut extra)
        || logical::handle(m, cpu, bus, op, &mut extra)
        || arithmetic::handle(m, cpu, bus, op, &mut extra)
        || compare::handle(m, cpu, bus, op, &mut extra)
        || rmw::handle(m, cpu, bus, op, &mut extra)
        || branches::handle(m, cpu, bus, op, &mut extra)
        || control_flow::handle(m, cpu, bus, op, &mut extra)
        || misc::handle(m, cpu, bus, op, &mut extra);
    debug_assert!(handled, "no handler for {}", m.name());
    extra
}
