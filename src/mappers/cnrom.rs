/*
CNROM (board id 0x30) address translation.

Characteristics:
- PRG: Fixed (16 KiB mirrored or 32 KiB direct) at $8000-$FFFF; no PRG banking.
- CHR: Switchable in 8 KiB banks via CPU writes to $8000-$FFFF (bank select register).
- Mirroring: Determined solely by iNES header (no dynamic control by the mapper).

Bank Select:
- Hardware uses the lower 2 bits of the value written to select the CHR bank.
  The result is further reduced modulo the number of 8 KiB CHR banks present.

Reset Behavior:
- CHR bank is reset to 0.
*/

use crate::mapper::{CHR_BANK_SIZE, MappedAddr, prg_ram_window};

#[derive(Debug, Clone)]
pub struct Cnrom {
    prg_is_16k: bool,
    chr_is_ram: bool,
    chr_bank: u8,
    chr_bank_count: u8,
}

impl Cnrom {
    pub fn new(prg_banks: u8, chr_banks: u8) -> Self {
        Self {
            prg_is_16k: prg_banks <= 1,
            chr_is_ram: chr_banks == 0,
            chr_bank: 0,
            chr_bank_count: chr_banks.max(1),
        }
    }

    pub fn reset(&mut self) {
        self.chr_bank = 0;
    }

    #[inline]
    fn chr_offset(&self, addr: u16) -> usize {
        self.chr_bank as usize * CHR_BANK_SIZE + (addr & 0x1FFF) as usize
    }

    pub fn cpu_map_read(&self, addr: u16) -> Option<MappedAddr> {
        match addr {
            0x8000..=0xFFFF => {
                let mask = if self.prg_is_16k { 0x3FFF } else { 0x7FFF };
                Some(MappedAddr::PrgRom((addr & mask) as usize))
            }
            _ => prg_ram_window(addr),
        }
    }

    pub fn cpu_map_write(&mut self, addr: u16, data: u8) -> Option<MappedAddr> {
        match addr {
            0x8000..=0xFFFF => {
                self.chr_bank = (data & 0x03) % self.chr_bank_count;
                Some(MappedAddr::Latched)
            }
            _ => prg_ram_window(addr),
        }
    }

    pub fn ppu_map_read(&self, addr: u16) -> Option<usize> {
        match addr {
            0x0000..=0x1FFF => Some(self.chr_offset(addr)),
            _ => None,
        }
    }

    pub fn ppu_map_write(&self, addr: u16) -> Option<usize> {
        match addr {
            0x0000..=0x1FFF if self.chr_is_ram => Some(self.chr_offset(addr)),
            _ => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn current_chr_bank(&self) -> u8 {
        self.chr_bank
    }
}
