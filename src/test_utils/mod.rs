//! Shared test fixtures: minimal iNES (v1) images and a booted CPU on top of them.
//!
//! Header bytes written by `build_ines`:
//! - 0..4  magic `NES\x1A`
//! - 4     PRG ROM size in 16 KiB units
//! - 5     CHR ROM size in 8 KiB units (0 => the loader supplies 8 KiB CHR RAM)
//! - 6, 7  flag bytes (mirroring, battery, trainer, mapper nibbles)
//! - 8     PRG RAM size in 8 KiB units (0 => 8 KiB)
//! - 9..16 zero
//!
//! PRG payload bytes are 0xAA and CHR bytes 0xCC so tests can tell the two apart.

#![allow(dead_code)]

use crate::bus::Bus;
use crate::cartridge::Cartridge;
use crate::cpu::Cpu;

const PRG_UNIT: usize = 16 * 1024;
const CHR_UNIT: usize = 8 * 1024;

/// Build an iNES image with the given bank counts, flag bytes and optional trainer.
pub fn build_ines(
    prg_16k: usize,
    chr_8k: usize,
    flags6: u8,
    flags7: u8,
    prg_ram_8k: u8,
    trainer: Option<&[u8; 512]>,
) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(16 + 512 + prg_16k * PRG_UNIT + chr_8k * CHR_UNIT);
    bytes.extend_from_slice(b"NES\x1A");
    bytes.extend_from_slice(&[prg_16k as u8, chr_8k as u8, flags6, flags7, prg_ram_8k]);
    bytes.resize(16, 0);
    if let Some(t) = trainer {
        bytes.extend_from_slice(t);
    }
    bytes.resize(bytes.len() + prg_16k * PRG_UNIT, 0xAA);
    bytes.resize(bytes.len() + chr_8k * CHR_UNIT, 0xCC);
    bytes
}

/// One-bank NROM image with `prg` at $8000 and (reset, nmi, irq) in the vector slots.
pub fn build_nrom_with_prg(
    prg: &[u8],
    chr_8k: usize,
    prg_ram_8k: u8,
    vectors: Option<(u16, u16, u16)>,
) -> Vec<u8> {
    assert!(
        prg.len() <= PRG_UNIT - 6,
        "program overlaps the vector slots"
    );
    let mut rom = build_ines(1, chr_8k, 0, 0, prg_ram_8k, None);
    let bank = &mut rom[16..16 + PRG_UNIT];
    bank[..prg.len()].copy_from_slice(prg);
    let (reset, nmi, irq) = vectors.unwrap_or((0x8000, 0x8000, 0x8000));
    set_vectors_in_prg(bank, reset, nmi, irq);
    rom
}

/// Store NMI, RESET and IRQ vectors in the last six bytes of a 16 or 32 KiB PRG image.
pub fn set_vectors_in_prg(prg: &mut [u8], reset: u16, nmi: u16, irq: u16) {
    assert!(
        prg.len() == PRG_UNIT || prg.len() == 2 * PRG_UNIT,
        "unsupported PRG length {}",
        prg.len()
    );
    let top = prg.len() - 6;
    prg[top..top + 2].copy_from_slice(&nmi.to_le_bytes());
    prg[top + 2..top + 4].copy_from_slice(&reset.to_le_bytes());
    prg[top + 4..].copy_from_slice(&irq.to_le_bytes());
}

/// Reset CPU over a `Bus` holding an NROM cartridge built from `prg`.
/// The 8 reset cycles are still pending.
pub fn boot_nrom(prg: &[u8]) -> Cpu<Bus> {
    boot_nrom_with_vectors(prg, (0x8000, 0x8000, 0x8000))
}

/// `boot_nrom` with RESET pointing at `reset`.
pub fn boot_nrom_at(prg: &[u8], reset: u16) -> Cpu<Bus> {
    boot_nrom_with_vectors(prg, (reset, 0x8000, 0x8000))
}

pub fn boot_nrom_with_vectors(prg: &[u8], vectors: (u16, u16, u16)) -> Cpu<Bus> {
    let rom = build_nrom_with_prg(prg, 1, 1, Some(vectors));
    let cart = Cartridge::from_ines_bytes(&rom).expect("parse");
    let mut bus = Bus::new();
    bus.insert_cartridge(cart);
    let mut cpu = Cpu::new(bus);
    cpu.reset();
    cpu
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout() {
        let rom = build_ines(2, 1, 0x01, 0x00, 1, None);
        assert_eq!(&rom[0..4], b"NES\x1A");
        assert_eq!(&rom[4..9], &[2, 1, 0x01, 0x00, 1]);
        assert!(rom[9..16].iter().all(|&b| b == 0));
        assert_eq!(rom.len(), 16 + 2 * PRG_UNIT + CHR_UNIT);
        assert_eq!(rom[16], 0xAA);
        assert_eq!(rom[rom.len() - 1], 0xCC);
    }

    #[test]
    fn trainer_sits_between_header_and_prg() {
        let rom = build_ines(1, 0, 0x04, 0x00, 0, Some(&[0x77; 512]));
        assert_eq!(rom[16], 0x77);
        assert_eq!(rom[16 + 511], 0x77);
        assert_eq!(rom[16 + 512], 0xAA);
    }

    #[test]
    fn vectors_land_at_the_top_of_prg() {
        for len in [PRG_UNIT, 2 * PRG_UNIT] {
            let mut prg = vec![0u8; len];
            set_vectors_in_prg(&mut prg, 0x8123, 0x8456, 0x8ABC);
            assert_eq!(&prg[len - 6..], &[0x56, 0x84, 0x23, 0x81, 0xBC, 0x8A]);
        }
    }

    #[test]
    fn nrom_program_and_boot() {
        let rom = build_nrom_with_prg(&[0xA9, 0x01], 1, 1, None);
        assert_eq!(&rom[16..18], &[0xA9, 0x01]);
        assert_eq!(rom[16 + 0x3FFD], 0x80);

        let cpu = boot_nrom_at(&[0xEA; 4], 0x8002);
        assert_eq!(cpu.pc(), 0x8002);
        assert_eq!(cpu.cycles(), 8);
    }
}
