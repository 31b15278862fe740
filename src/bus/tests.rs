use crate::bus::peripheral::Access;
use crate::bus::{Bus, CpuBus, Route};
use crate::cartridge::Cartridge;
use crate::test_utils::build_ines;

fn bus_with(rom: &[u8]) -> Bus {
    let cart = Cartridge::from_ines_bytes(rom).expect("parse");
    let mut bus = Bus::new();
    bus.insert_cartridge(cart);
    bus
}

/// Helper for MMC1 serial writes (5 LSB-first writes).
fn mmc1_serial_write(bus: &mut Bus, addr: u16, value5: u8) {
    for i in 0..5 {
        bus.write(addr, (value5 >> i) & 1);
    }
}

#[test]
fn ram_mirroring() {
    let mut bus = Bus::new();

    bus.write(0x0001, 0xAA);
    assert_eq!(bus.read(0x0001), 0xAA);
    assert_eq!(bus.read(0x0801), 0xAA);
    assert_eq!(bus.read(0x1001), 0xAA);
    assert_eq!(bus.read(0x1801), 0xAA);

    bus.write(0x1801, 0x55);
    assert_eq!(bus.read(0x0001), 0x55);
}

#[test]
fn peripheral_window_reads_zero_and_sees_folded_address() {
    let mut bus = Bus::new();
    bus.write(0x2008, 0x80);
    assert_eq!(
        bus.peripheral().last_access(),
        Some(Access::Write(0x2000, 0x80))
    );
    assert_eq!(bus.read(0x3FFE), 0x00);
    assert_eq!(bus.peripheral().last_access(), Some(Access::Read(0x2006)));
    assert_eq!(bus.peripheral().reads(), 1);
    assert_eq!(bus.peripheral().writes(), 1);
}

#[test]
fn open_bus_reads_zero_and_drops_writes() {
    let mut bus = Bus::new();
    bus.write(0x4016, 0x12);
    assert_eq!(bus.read(0x4016), 0x00);
    // Without a cartridge the top half is open too.
    bus.write(0x8000, 0x34);
    assert_eq!(bus.read(0x8000), 0x00);
    assert_eq!(bus.read(0xFFFC), 0x00);
}

#[test]
fn cartridge_serves_prg_rom() {
    let mut bus = bus_with(&build_ines(1, 1, 0, 0, 1, None));
    assert_eq!(bus.read(0x8000), 0xAA);
    assert_eq!(bus.read(0xC000), 0xAA);
    assert_eq!(bus.route(0x8000), Route::Cartridge);
}

#[test]
fn prg_ram_basic() {
    let mut bus = bus_with(&build_ines(1, 1, 0, 0, 1, None));
    bus.write(0x6000, 0x42);
    assert_eq!(bus.read(0x6000), 0x42);
    assert_eq!(bus.route(0x6000), Route::Cartridge);
    // $5FFF is below the PRG RAM window
    assert_eq!(bus.route(0x5FFF), Route::OpenBus);
}

#[test]
fn routes_partition_the_address_space() {
    let bus = bus_with(&build_ines(1, 1, 0, 0, 1, None));
    let mut counts = std::collections::HashMap::new();
    for addr in 0..=0xFFFFu16 {
        *counts.entry(bus.route(addr)).or_insert(0usize) += 1;
    }
    assert_eq!(counts[&Route::Ram], 0x2000);
    assert_eq!(counts[&Route::Peripheral], 0x2000);
    assert_eq!(counts[&Route::Cartridge], 0xA000);
    assert_eq!(counts[&Route::OpenBus], 0x2000);
}

#[test]
fn removing_cartridge_restores_open_bus() {
    let mut bus = bus_with(&build_ines(1, 1, 0, 0, 1, None));
    let cart = bus.remove_cartridge();
    assert!(cart.is_some());
    assert_eq!(bus.route(0x8000), Route::OpenBus);
    assert!(bus.insert_cartridge(cart.expect("cart")).is_none());
    assert_eq!(bus.route(0x8000), Route::Cartridge);
}

#[test]
fn nrom_prg_rom_writes_land_in_place() {
    let mut bus = bus_with(&build_ines(1, 1, 0, 0, 1, None));
    bus.write(0x8010, 0x01);
    assert_eq!(bus.read(0x8010), 0x01);
    // 16K image mirrors, so the upper window sees it too.
    assert_eq!(bus.read(0xC010), 0x01);
}

#[test]
fn uxrom_bank_switch_through_bus() {
    let mut rom = build_ines(4, 0, 0x20, 0, 0, None);
    for bank in 0..4 {
        rom[16 + bank * 0x4000] = bank as u8;
    }
    let mut bus = bus_with(&rom);
    assert_eq!(bus.read(0x8000), 0);
    assert_eq!(bus.read(0xC000), 3);
    bus.write(0x8000, 2);
    assert_eq!(bus.read(0x8000), 2);
    assert_eq!(bus.read(0xC000), 3);
}

#[test]
fn mmc1_prg_switch_through_bus() {
    let mut rom = build_ines(8, 1, 0x10, 0, 1, None);
    for bank in 0..8 {
        rom[16 + bank * 0x4000] = 0x10 + bank as u8;
    }
    let mut bus = bus_with(&rom);
    assert_eq!(bus.read(0xC000), 0x17);
    mmc1_serial_write(&mut bus, 0xE000, 3);
    assert_eq!(bus.read(0x8000), 0x13);

    bus.reset();
    assert_eq!(bus.read(0x8000), 0x10);
}

#[test]
fn reset_clears_ram_but_keeps_cartridge() {
    let mut bus = bus_with(&build_ines(1, 1, 0, 0, 1, None));
    bus.write(0x0100, 0x77);
    bus.reset();
    assert_eq!(bus.read(0x0100), 0x00);
    assert!(bus.cartridge().is_some());
}

#[test]
fn custom_peripheral_injection() {
    struct Latch(u8);
    impl CpuBus for Latch {
        fn read(&mut self, _addr: u16) -> u8 {
            self.0
        }
        fn write(&mut self, _addr: u16, data: u8) {
            self.0 = data;
        }
    }

    let mut bus = Bus::with_peripheral(Latch(0));
    bus.write(0x2001, 0x5A);
    assert_eq!(bus.read(0x3FF9), 0x5A);
    assert_eq!(bus.peripheral().0, 0x5A);
}

#[test]
fn read_word_is_little_endian() {
    let mut bus = Bus::new();
    bus.write(0x0010, 0x34);
    bus.write(0x0011, 0x12);
    assert_eq!(bus.read_word(0x0010), 0x1234);
}
