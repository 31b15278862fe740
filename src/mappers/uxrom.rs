/*
UxROM (board id 0x20) address translation.

Characteristics:
- PRG: 16 KiB switchable bank at $8000-$BFFF, last 16 KiB bank fixed at $C000-$FFFF.
- CHR: 8 KiB, unbanked. Usually CHR RAM.
- Mirroring: Determined solely by iNES header.

Bank Select:
- Any write to $8000-$FFFF latches the low 4 bits of the value, modulo the PRG bank count.

Reset Behavior:
- Switchable bank returns to 0.
*/

use crate::mapper::{MappedAddr, prg_ram_window};

#[derive(Debug, Clone)]
pub struct Uxrom {
    prg_bank: u8,
    prg_bank_count: u8,
    chr_is_ram: bool,
}

impl Uxrom {
    pub fn new(prg_banks: u8, chr_banks: u8) -> Self {
        Self {
            prg_bank: 0,
            prg_bank_count: prg_banks.max(1),
            chr_is_ram: chr_banks == 0,
        }
    }

    pub fn reset(&mut self) {
        self.prg_bank = 0;
    }

    pub fn cpu_map_read(&self, addr: u16) -> Option<MappedAddr> {
        let ofs = (addr & 0x3FFF) as usize;
        match addr {
            0x8000..=0xBFFF => Some(MappedAddr::PrgRom(self.prg_bank as usize * 0x4000 + ofs)),
            0xC000..=0xFFFF => Some(MappedAddr::PrgRom(
                (self.prg_bank_count - 1) as usize * 0x4000 + ofs,
            )),
            _ => prg_ram_window(addr),
        }
    }

    pub fn cpu_map_write(&mut self, addr: u16, data: u8) -> Option<MappedAddr> {
        match addr {
            0x8000..=0xFFFF => {
                self.prg_bank = (data & 0x0F) % self.prg_bank_count;
                Some(MappedAddr::Latched)
            }
            _ => prg_ram_window(addr),
        }
    }

    pub fn ppu_map_read(&self, addr: u16) -> Option<usize> {
        match addr {
            0x0000..=0x1FFF => Some(addr as usize),
            _ => None,
        }
    }

    pub fn ppu_map_write(&self, addr: u16) -> Option<usize> {
        match addr {
            0x0000..=0x1FFF if self.chr_is_ram => Some(addr as usize),
            _ => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn current_prg_bank(&self) -> u8 {
        self.prg_bank
    }
}
