//! MMC1 (board id 0x10) address translation.
//!
//! Implements:
//! - Serial shift register writes (5-bit) to control / CHR0 / CHR1 / PRG registers
//! - PRG banking modes (32K switch, or 16K with fixed low or high)
//! - CHR banking (8K or 4K+4K), over CHR ROM or the 8K CHR RAM fallback
//! - Runtime nametable mirroring from the control register
//! - PRG RAM window at $6000-$7FFF
//!
//! Deferred / Simplified:
//! - PRG RAM disable bit enforcement (treated as always enabled)
//! - Consecutive-cycle write filtering (every write is shifted in)
//! - Large board variants (SUROM / SOROM / etc.)

use crate::cartridge::Mirroring;
use crate::mapper::{MappedAddr, prg_ram_window};

const CONTROL_POWER_ON: u8 = 0x0C;

/// MMC1 banking state. Owns no memory; offsets are resolved against the cartridge buffers.
#[derive(Debug, Clone)]
pub struct Mmc1 {
    // 5-bit registers
    control: u8,
    chr_bank0: u8,
    chr_bank1: u8,
    prg_bank: u8,

    // Serial latch
    shift_reg: u8,
    shift_count: u8,

    // Bank counts
    prg_16k_bank_count: u8,
    chr_4k_bank_count: usize,
    chr_is_ram: bool,

    // Cached PRG mapping
    prg_bank_lo_index: u8,
    prg_bank_hi_index: u8,
}

impl Mmc1 {
    pub fn new(prg_banks: u8, chr_banks: u8) -> Self {
        let prg_16k_bank_count = prg_banks.max(1);
        // CHR RAM boards expose a single 8K bank.
        let chr_4k_bank_count = chr_banks.max(1) as usize * 2;
        let mut s = Self {
            control: CONTROL_POWER_ON,
            chr_bank0: 0,
            chr_bank1: 0,
            prg_bank: 0,
            shift_reg: 0,
            shift_count: 0,
            prg_16k_bank_count,
            chr_4k_bank_count,
            chr_is_ram: chr_banks == 0,
            prg_bank_lo_index: 0,
            prg_bank_hi_index: prg_16k_bank_count - 1,
        };
        s.recompute_prg_banks();
        s
    }

    pub fn reset(&mut self) {
        self.control = CONTROL_POWER_ON;
        self.shift_reg = 0;
        self.shift_count = 0;
        self.chr_bank0 = 0;
        self.chr_bank1 = 0;
        self.prg_bank = 0;
        self.recompute_prg_banks();
    }

    #[inline]
    fn prg_mode(&self) -> u8 {
        (self.control >> 2) & 0x03
    }
    #[inline]
    fn chr_mode(&self) -> u8 {
        (self.control >> 4) & 0x01
    }

    pub fn mirroring(&self) -> Mirroring {
        match self.control & 0x03 {
            0 => Mirroring::OneScreenLo,
            1 => Mirroring::OneScreenHi,
            2 => Mirroring::Vertical,
            _ => Mirroring::Horizontal,
        }
    }

    fn recompute_prg_banks(&mut self) {
        let count = self.prg_16k_bank_count;
        let last = count - 1;
        match self.prg_mode() {
            0 | 1 => {
                // 32K mode ignores the low bit of the bank number.
                let bank = (self.prg_bank & 0x0E) % count;
                self.prg_bank_lo_index = bank;
                self.prg_bank_hi_index = (bank + 1) % count;
            }
            2 => {
                self.prg_bank_lo_index = 0;
                self.prg_bank_hi_index = (self.prg_bank & 0x0F) % count;
            }
            _ => {
                self.prg_bank_lo_index = (self.prg_bank & 0x0F) % count;
                self.prg_bank_hi_index = last;
            }
        }
    }

    fn commit_register(&mut self, addr: u16, value5: u8) {
        match addr {
            0x8000..=0x9FFF => {
                self.control = value5 & 0x1F;
                self.recompute_prg_banks();
            }
            0xA000..=0xBFFF => {
                self.chr_bank0 = value5 & 0x1F;
            }
            0xC000..=0xDFFF => {
                self.chr_bank1 = value5 & 0x1F;
            }
            0xE000..=0xFFFF => {
                self.prg_bank = value5 & 0x1F;
                self.recompute_prg_banks();
            }
            _ => {}
        }
    }

    fn serial_write(&mut self, addr: u16, data: u8) {
        if data & 0x80 != 0 {
            self.shift_reg = 0;
            self.shift_count = 0;
            self.control |= CONTROL_POWER_ON;
            self.recompute_prg_banks();
            return;
        }
        self.shift_reg |= (data & 1) << self.shift_count;
        self.shift_count += 1;
        if self.shift_count == 5 {
            let value5 = self.shift_reg & 0x1F;
            self.commit_register(addr, value5);
            self.shift_reg = 0;
            self.shift_count = 0;
        }
    }

    fn chr_offset(&self, addr: u16) -> usize {
        let count = self.chr_4k_bank_count;
        let (bank4k, ofs) = if self.chr_mode() == 0 {
            // 8K mode: low bit of CHR0 ignored, both halves follow it.
            let bank = (self.chr_bank0 & !1) as usize % count;
            (bank + (addr >= 0x1000) as usize, addr & 0x0FFF)
        } else if addr < 0x1000 {
            (self.chr_bank0 as usize % count, addr & 0x0FFF)
        } else {
            (self.chr_bank1 as usize % count, addr & 0x0FFF)
        };
        bank4k * 0x1000 + ofs as usize
    }

    pub fn cpu_map_read(&self, addr: u16) -> Option<MappedAddr> {
        match addr {
            0x8000..=0xBFFF => Some(MappedAddr::PrgRom(
                self.prg_bank_lo_index as usize * 0x4000 + (addr & 0x3FFF) as usize,
            )),
            0xC000..=0xFFFF => Some(MappedAddr::PrgRom(
                self.prg_bank_hi_index as usize * 0x4000 + (addr & 0x3FFF) as usize,
            )),
            _ => prg_ram_window(addr),
        }
    }

    pub fn cpu_map_write(&mut self, addr: u16, data: u8) -> Option<MappedAddr> {
        match addr {
            0x8000..=0xFFFF => {
                self.serial_write(addr, data);
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
    pub(crate) fn debug_prg_banks(&self) -> (u8, u8) {
        (self.prg_bank_lo_index, self.prg_bank_hi_index)
    }
}

#[cfg(test)]
mod tests {
    use super::Mmc1;
    use crate::cartridge::Mirroring;
    use crate::mapper::MappedAddr;

    fn write_serial(mapper: &mut Mmc1, addr: u16, value5: u8) {
        for i in 0..5 {
            let bit = (value5 >> i) & 1;
            assert_eq!(mapper.cpu_map_write(addr, bit), Some(MappedAddr::Latched));
        }
    }

    #[test]
    fn power_on_fixes_last_bank_high() {
        let m = Mmc1::new(8, 1);
        assert_eq!(m.debug_prg_banks(), (0, 7));
        assert_eq!(m.cpu_map_read(0xC000), Some(MappedAddr::PrgRom(7 * 0x4000)));
        assert_eq!(m.mirroring(), Mirroring::OneScreenLo);
    }

    #[test]
    fn partial_serial_write_commits_nothing() {
        let mut m = Mmc1::new(8, 1);
        for _ in 0..4 {
            m.cpu_map_write(0xE000, 1);
        }
        assert_eq!(m.debug_prg_banks(), (0, 7));
        m.cpu_map_write(0xE000, 1);
        assert_eq!(m.debug_prg_banks(), (0x0F % 8, 7));
    }

    #[test]
    fn reset_bit_clears_shift_and_forces_mode_3() {
        let mut m = Mmc1::new(4, 1);
        write_serial(&mut m, 0x8000, 0b00000); // 32K mode
        m.cpu_map_write(0x8000, 1);
        m.cpu_map_write(0x8000, 1);
        m.cpu_map_write(0x8000, 0x80);
        write_serial(&mut m, 0xE000, 0b00010);
        assert_eq!(m.debug_prg_banks(), (2, 3));
    }

    #[test]
    fn prg_mode_fix_upper_switch_low() {
        let mut m = Mmc1::new(8, 1);
        write_serial(&mut m, 0x8000, 0b01111); // mode 3
        write_serial(&mut m, 0xE000, 0b00101); // prg_bank=5
        assert_eq!(m.debug_prg_banks(), (5, 7));
        assert_eq!(
            m.cpu_map_read(0x8001),
            Some(MappedAddr::PrgRom(5 * 0x4000 + 1))
        );
    }

    #[test]
    fn prg_mode_fix_lower_switch_high() {
        let mut m = Mmc1::new(8, 1);
        write_serial(&mut m, 0x8000, 0b01000); // mode 2
        write_serial(&mut m, 0xE000, 0b00011);
        assert_eq!(m.debug_prg_banks(), (0, 3));
    }

    #[test]
    fn prg_32k_mode_ignores_low_bit() {
        let mut m = Mmc1::new(8, 1);
        write_serial(&mut m, 0x8000, 0b00000);
        write_serial(&mut m, 0xE000, 0b00101);
        assert_eq!(m.debug_prg_banks(), (4, 5));
    }

    #[test]
    fn chr_8k_mode_mapping() {
        let mut m = Mmc1::new(2, 2);
        write_serial(&mut m, 0x8000, 0b00000); // chr_mode=0
        write_serial(&mut m, 0xA000, 0b00011); // low bit ignored
        assert_eq!(m.ppu_map_read(0x0000), Some(0x2000));
        assert_eq!(m.ppu_map_read(0x1000), Some(0x3000));
    }

    #[test]
    fn chr_4k_mode_mapping() {
        let mut m = Mmc1::new(2, 2);
        write_serial(&mut m, 0x8000, 0b10000); // chr_mode=1
        write_serial(&mut m, 0xA000, 0b00001);
        write_serial(&mut m, 0xC000, 0b00010);
        assert_eq!(m.ppu_map_read(0x0004), Some(0x1004));
        assert_eq!(m.ppu_map_read(0x1004), Some(0x2004));
    }

    #[test]
    fn large_chr_rom_keeps_full_bank_count() {
        // 200 x 8K is 400 4K banks, past what a u8 count can hold.
        let mut m = Mmc1::new(2, 200);
        assert_eq!(m.chr_4k_bank_count, 400);
        write_serial(&mut m, 0x8000, 0b10000);
        write_serial(&mut m, 0xC000, 0b11111);
        assert_eq!(m.ppu_map_read(0x1004), Some(31 * 0x1000 + 4));
    }

    #[test]
    fn chr_ram_only_accepts_writes_when_present() {
        assert!(Mmc1::new(2, 1).ppu_map_write(0x0000).is_none());
        assert_eq!(Mmc1::new(2, 0).ppu_map_write(0x0123), Some(0x0123));
    }

    #[test]
    fn mirroring_follows_control() {
        let mut m = Mmc1::new(2, 1);
        for (bits, mode) in [
            (0, Mirroring::OneScreenLo),
            (1, Mirroring::OneScreenHi),
            (2, Mirroring::Vertical),
            (3, Mirroring::Horizontal),
        ] {
            write_serial(&mut m, 0x8000, 0b01100 | bits);
            assert_eq!(m.mirroring(), mode);
        }
    }

    #[test]
    fn prg_ram_window_passes_through() {
        let mut m = Mmc1::new(2, 1);
        assert_eq!(m.cpu_map_write(0x6001, 0x42), Some(MappedAddr::PrgRam(1)));
        assert_eq!(m.cpu_map_read(0x7FFF), Some(MappedAddr::PrgRam(0x1FFF)));
        assert_eq!(m.cpu_map_read(0x5000), None);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut m = Mmc1::new(4, 1);
        write_serial(&mut m, 0x8000, 0b00010);
        write_serial(&mut m, 0xE000, 0b00010);
        m.reset();
        assert_eq!(m.debug_prg_banks(), (0, 3));
        assert_eq!(m.mirroring(), Mirroring::OneScreenLo);
    }
}
