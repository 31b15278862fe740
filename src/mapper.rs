/*!
Mapper subsystem: the closed set of cartridge banking schemes and the NROM (baseline) variant.

Purpose:
- Decouple CPU/PPU address translation from the `Cartridge`, which owns the actual memory.
- A mapper never touches bank bytes. It answers "where inside PRG/CHR does this address land?"
  and the cartridge performs the access.

Translation contract:
- `cpu_map_read` / `cpu_map_write` take full CPU addresses and return `Some(MappedAddr)` when
  the cartridge claims the access, `None` to let the Bus fall through to RAM / peripheral / open bus.
- `ppu_map_read` / `ppu_map_write` take PPU pattern-table addresses and return a CHR offset.
- Writes carry the data byte so switchable schemes can latch bank registers.

Mapper ids:
- The id is composed from the header as `((flags6 >> 4) << 4) | (flags7 >> 4)`, so the
  flags-6 nibble sits in the high position. Boards 0..=15 of the usual numbering therefore land
  on multiples of 0x10 (NROM 0x00, MMC1 0x10, UxROM 0x20, CNROM 0x30).
*/

use crate::cartridge::Mirroring;
use crate::mappers::{Cnrom, Mmc1, Uxrom};

/// Size of one PRG ROM bank (16 KiB).
pub const PRG_BANK_SIZE: usize = 16 * 1024;
/// Size of one CHR bank (8 KiB).
pub const CHR_BANK_SIZE: usize = 8 * 1024;

/// Where a CPU access landed inside the cartridge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MappedAddr {
    /// Offset into PRG ROM.
    PrgRom(usize),
    /// Offset into PRG RAM ($6000-$7FFF window).
    PrgRam(usize),
    /// The write was consumed by a mapper register; no memory is touched.
    Latched,
}

/// Map the $6000-$7FFF window onto PRG RAM. Shared by every variant.
#[inline]
pub(crate) fn prg_ram_window(addr: u16) -> Option<MappedAddr> {
    match addr {
        0x6000..=0x7FFF => Some(MappedAddr::PrgRam((addr & 0x1FFF) as usize)),
        _ => None,
    }
}

/// Every supported banking scheme.
#[derive(Clone, Debug)]
pub enum Mapper {
    Nrom(Nrom),
    Mmc1(Mmc1),
    Uxrom(Uxrom),
    Cnrom(Cnrom),
}

impl Mapper {
    pub const NROM: u8 = 0x00;
    pub const MMC1: u8 = 0x10;
    pub const UXROM: u8 = 0x20;
    pub const CNROM: u8 = 0x30;

    /// Instantiate the variant for a header-derived mapper id, or `None` if unsupported.
    pub fn from_id(id: u8, prg_banks: u8, chr_banks: u8) -> Option<Self> {
        let mapper = match id {
            Self::NROM => Mapper::Nrom(Nrom::new(prg_banks, chr_banks)),
            Self::MMC1 => Mapper::Mmc1(Mmc1::new(prg_banks, chr_banks)),
            Self::UXROM => Mapper::Uxrom(Uxrom::new(prg_banks, chr_banks)),
            Self::CNROM => Mapper::Cnrom(Cnrom::new(prg_banks, chr_banks)),
            _ => return None,
        };
        Some(mapper)
    }

    pub fn id(&self) -> u8 {
        match self {
            Mapper::Nrom(_) => Self::NROM,
            Mapper::Mmc1(_) => Self::MMC1,
            Mapper::Uxrom(_) => Self::UXROM,
            Mapper::Cnrom(_) => Self::CNROM,
        }
    }

    /// Board name, for logs and debuggers.
    pub fn name(&self) -> &'static str {
        match self {
            Mapper::Nrom(_) => "NROM",
            Mapper::Mmc1(_) => "MMC1",
            Mapper::Uxrom(_) => "UxROM",
            Mapper::Cnrom(_) => "CNROM",
        }
    }

    #[inline]
    pub fn cpu_map_read(&self, addr: u16) -> Option<MappedAddr> {
        match self {
            Mapper::Nrom(m) => m.cpu_map_read(addr),
            Mapper::Mmc1(m) => m.cpu_map_read(addr),
            Mapper::Uxrom(m) => m.cpu_map_read(addr),
            Mapper::Cnrom(m) => m.cpu_map_read(addr),
        }
    }

    #[inline]
    pub fn cpu_map_write(&mut self, addr: u16, data: u8) -> Option<MappedAddr> {
        match self {
            Mapper::Nrom(m) => m.cpu_map_write(addr),
            Mapper::Mmc1(m) => m.cpu_map_write(addr, data),
            Mapper::Uxrom(m) => m.cpu_map_write(addr, data),
            Mapper::Cnrom(m) => m.cpu_map_write(addr, data),
        }
    }

    #[inline]
    pub fn ppu_map_read(&self, addr: u16) -> Option<usize> {
        match self {
            Mapper::Nrom(m) => m.ppu_map_read(addr),
            Mapper::Mmc1(m) => m.ppu_map_read(addr),
            Mapper::Uxrom(m) => m.ppu_map_read(addr),
            Mapper::Cnrom(m) => m.ppu_map_read(addr),
        }
    }

    #[inline]
    pub fn ppu_map_write(&mut self, addr: u16) -> Option<usize> {
        match self {
            Mapper::Nrom(m) => m.ppu_map_write(addr),
            Mapper::Mmc1(m) => m.ppu_map_write(addr),
            Mapper::Uxrom(m) => m.ppu_map_write(addr),
            Mapper::Cnrom(m) => m.ppu_map_write(addr),
        }
    }

    /// Return bank registers to their power-on state.
    pub fn reset(&mut self) {
        match self {
            Mapper::Nrom(_) => {}
            Mapper::Mmc1(m) => m.reset(),
            Mapper::Uxrom(m) => m.reset(),
            Mapper::Cnrom(m) => m.reset(),
        }
    }

    /// Runtime nametable mirroring, when the board controls it. `None` defers to the header.
    pub fn mirroring(&self) -> Option<Mirroring> {
        match self {
            Mapper::Mmc1(m) => Some(m.mirroring()),
            _ => None,
        }
    }
}

/// NROM: no banking. 16 KiB PRG is mirrored across $8000-$FFFF, 32 KiB is mapped directly.
#[derive(Clone, Debug)]
pub struct Nrom {
    prg_banks: u8,
    chr_banks: u8,
}

impl Nrom {
    pub fn new(prg_banks: u8, chr_banks: u8) -> Self {
        Self {
            prg_banks,
            chr_banks,
        }
    }

    #[inline]
    fn prg_offset(&self, addr: u16) -> usize {
        if self.prg_banks > 1 {
            (addr & 0x7FFF) as usize
        } else {
            (addr & 0x3FFF) as usize
        }
    }

    pub fn cpu_map_read(&self, addr: u16) -> Option<MappedAddr> {
        match addr {
            0x8000..=0xFFFF => Some(MappedAddr::PrgRom(self.prg_offset(addr))),
            _ => prg_ram_window(addr),
        }
    }

    pub fn cpu_map_write(&self, addr: u16) -> Option<MappedAddr> {
        // Same translation as reads; the cartridge writes in place.
        self.cpu_map_read(addr)
    }

    pub fn ppu_map_read(&self, addr: u16) -> Option<usize> {
        match addr {
            0x0000..=0x1FFF => Some(addr as usize),
            _ => None,
        }
    }

    pub fn ppu_map_write(&self, addr: u16) -> Option<usize> {
        // Only CHR RAM boards accept pattern writes.
        match addr {
            0x0000..=0x1FFF if self.chr_banks == 0 => Some(addr as usize),
            _ => None,
        }
    }
}
