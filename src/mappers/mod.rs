/*
Module: mappers

Declares the switchable-bank mapper variants and re-exports their public types.
The closed `Mapper` enum and the unbanked NROM variant live in `crate::mapper`.

Implemented:
- MMC1 (id 0x10)
- UxROM (id 0x20)
- CNROM (id 0x30)
*/

pub mod cnrom;
pub mod mmc1;
pub mod uxrom;

pub use cnrom::Cnrom;
pub use mmc1::Mmc1;
pub use uxrom::Uxrom;
