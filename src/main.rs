use std::env;

use anyhow::{Context, Result};
use nescore::cpu::disasm::disassemble;
use nescore::{Bus, Cartridge, Cpu, CpuBus};

const MAX_INSTRUCTIONS: usize = 100_000;

fn build_demo_ines() -> Vec<u8> {
    // iNES header: 1 x 16KB PRG, 1 x 8KB CHR, NROM, 8KB PRG RAM
    let mut rom = Vec::with_capacity(16 + 16 * 1024 + 8 * 1024);
    rom.extend_from_slice(b"NES\x1A");
    rom.extend_from_slice(&[1, 1, 0, 0, 1]);
    rom.extend_from_slice(&[0u8; 7]);

    let mut prg = vec![0u8; 16 * 1024];
    let program: &[u8] = &[
        0xA9, 0x10, // $8000 LDA #$10
        0x69, 0x05, // $8002 ADC #$05 => A = 0x15
        0x8D, 0x00, 0x02, // $8004 STA $0200
        0xE8, // $8007 INX
        0xD0, 0xFD, // $8008 BNE $8007 (until X wraps to 0)
        0x4C, 0x0A, 0x80, // $800A JMP $800A
    ];
    prg[..program.len()].copy_from_slice(program);

    // NMI, RESET, IRQ all at $8000; the 16KB bank is mirrored at $C000.
    for (offset, vector) in [(0x3FFA, 0x8000u16), (0x3FFC, 0x8000), (0x3FFE, 0x8000)] {
        prg[offset..offset + 2].copy_from_slice(&vector.to_le_bytes());
    }

    rom.extend_from_slice(&prg);
    rom.extend(std::iter::repeat(0u8).take(8 * 1024));
    rom
}

fn load_cartridge() -> Result<Cartridge> {
    match env::args().nth(1) {
        Some(path) => Cartridge::from_ines_file(&path)
            .with_context(|| format!("failed to load cartridge from {path}")),
        None => Cartridge::from_ines_bytes(&build_demo_ines()).context("failed to parse demo ROM"),
    }
}

fn main() -> Result<()> {
    let cart = load_cartridge()?;
    println!(
        "mapper {:#04X} ({}), PRG {} KiB, CHR {} KiB, {:?} mirroring",
        cart.mapper_id(),
        cart.mapper().name(),
        cart.prg_rom_len() / 1024,
        cart.chr_len() / 1024,
        cart.mirroring()
    );

    let mut bus = Bus::new();
    bus.insert_cartridge(cart);
    let mut cpu = Cpu::new(bus);
    cpu.reset();

    let entry = cpu.pc();
    for (addr, text) in disassemble(cpu.bus_mut(), entry, entry.saturating_add(12)) {
        println!("  {addr:04X}  {text}");
    }

    // Run until the program parks on a jump-to-self or the cap is reached.
    let mut executed = 0usize;
    let mut cycles = 0u64;
    while executed < MAX_INSTRUCTIONS && !cpu.is_halted() {
        let pc = cpu.pc();
        cycles += cpu.step() as u64;
        executed += 1;
        if cpu.pc() == pc {
            break;
        }
    }

    println!("executed {executed} instructions in {cycles} cycles");
    println!("{}", cpu.state());
    println!("mem[$0200] = ${:02X}", cpu.bus_mut().read(0x0200));
    Ok(())
}
