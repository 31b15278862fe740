#![doc = r#"
nescore library crate.

A clock-driven 6502 CPU, the console's CPU-side address bus, and the iNES cartridge
loader with its banking mappers.

Modules:
- bus: `CpuBus` capability, the console `Bus` (RAM, cartridge slot, peripheral window),
  and `FlatMemory` for tests and tools
- cartridge: iNES v1 loader; owns PRG ROM, CHR ROM/RAM and PRG RAM
- cpu: 6502 core (state + addressing + descriptor table + dispatch + `Cpu<B>`)
- mapper: closed `Mapper` enum and the NROM variant
- mappers: MMC1, UxROM and CNROM translation state

In tests, shared iNES builders are available under `crate::test_utils`.
"#]

pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod mapper;
pub mod mappers;

pub use bus::{Bus, CpuBus, FlatMemory};
pub use cartridge::{Cartridge, CartridgeError, Mirroring};
pub use cpu::{Cpu, CpuState, Register, Status, UndefinedOpcodePolicy};
pub use mapper::Mapper;

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
