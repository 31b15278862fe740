/*!
Cartridge with iNES (v1) loader and Mapper integration.

Features:
- Parse the 16-byte iNES header from bytes, any `Read` source, or a file path
- Skip the 512-byte trainer when flags 6 bit 2 is set
- Extract PRG ROM, CHR (ROM, or 8 KiB CHR RAM when the CHR count is 0) and PRG RAM
- Determine mirroring and the mapper id, then select a `Mapper` variant
- Serve CPU/PPU accesses by asking the mapper for an offset and touching the owned buffers

Notes:
- Loading never yields a partially valid cartridge: every fault is a `CartridgeError`.
- Mapper id composition: `((flags6 >> 4) << 4) | (flags7 >> 4)`.
- PRG RAM allocation policy:
  - If header byte 8 (PRG-RAM size in 8 KiB units) is 0, allocate 8 KiB by convention.
  - Otherwise allocate size_in_units * 8 KiB.
- Translated offsets are bounds-checked against the buffers; an out-of-range offset
  behaves like an unclaimed access.
*/

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::mapper::{CHR_BANK_SIZE, MappedAddr, Mapper, PRG_BANK_SIZE};

pub const HEADER_LEN: usize = 16;
pub const TRAINER_LEN: usize = 512;
pub const MAGIC: [u8; 4] = *b"NES\x1A";
const PRG_RAM_UNIT: usize = 8 * 1024;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    OneScreenLo,
    OneScreenHi,
    FourScreen,
}

/// Faults raised while loading an iNES image.
#[derive(Debug)]
pub enum CartridgeError {
    HeaderTooShort,
    BadMagic,
    Truncated {
        section: &'static str,
        expected: usize,
        actual: usize,
    },
    UnsupportedMapper(u8),
    Io(io::Error),
}

impl fmt::Display for CartridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartridgeError::HeaderTooShort => {
                write!(f, "data too small for a {HEADER_LEN}-byte iNES header")
            }
            CartridgeError::BadMagic => write!(f, "invalid iNES header magic (expected NES<1A>)"),
            CartridgeError::Truncated {
                section,
                expected,
                actual,
            } => write!(
                f,
                "truncated {section}: expected {expected} bytes, found {actual}"
            ),
            CartridgeError::UnsupportedMapper(id) => write!(f, "unsupported mapper id: 0x{id:02X}"),
            CartridgeError::Io(e) => write!(f, "failed to read iNES image: {e}"),
        }
    }
}

impl std::error::Error for CartridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CartridgeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CartridgeError {
    fn from(e: io::Error) -> Self {
        CartridgeError::Io(e)
    }
}

/// Raw iNES header fields.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InesHeader {
    pub magic: [u8; 4],
    pub prg_rom_chunks: u8,
    pub chr_rom_chunks: u8,
    pub flags6: u8,
    pub flags7: u8,
    pub prg_ram_size: u8,
    pub tv_system1: u8,
    pub tv_system2: u8,
    pub reserved: [u8; 5],
}

impl InesHeader {
    pub fn parse(data: &[u8]) -> Result<Self, CartridgeError> {
        let h: &[u8; HEADER_LEN] = data
            .get(..HEADER_LEN)
            .and_then(|s| s.try_into().ok())
            .ok_or(CartridgeError::HeaderTooShort)?;
        if h[0..4] != MAGIC {
            return Err(CartridgeError::BadMagic);
        }
        Ok(Self {
            magic: MAGIC,
            prg_rom_chunks: h[4],
            chr_rom_chunks: h[5],
            flags6: h[6],
            flags7: h[7],
            prg_ram_size: h[8],
            tv_system1: h[9],
            tv_system2: h[10],
            reserved: [h[11], h[12], h[13], h[14], h[15]],
        })
    }

    #[inline]
    pub fn mapper_id(&self) -> u8 {
        ((self.flags6 >> 4) << 4) | (self.flags7 >> 4)
    }

    #[inline]
    pub fn has_trainer(&self) -> bool {
        self.flags6 & 0b0000_0100 != 0
    }

    #[inline]
    pub fn battery_backed(&self) -> bool {
        self.flags6 & 0b0000_0010 != 0
    }

    pub fn mirroring(&self) -> Mirroring {
        if self.flags6 & 0b0000_1000 != 0 {
            Mirroring::FourScreen
        } else if self.flags6 & 0b0000_0001 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        }
    }

    pub fn prg_ram_len(&self) -> usize {
        match self.prg_ram_size {
            0 => PRG_RAM_UNIT,
            n => n as usize * PRG_RAM_UNIT,
        }
    }
}

#[derive(Clone)]
pub struct Cartridge {
    header: InesHeader,
    mapper: Mapper,
    prg_rom: Vec<u8>,
    chr: Vec<u8>,
    chr_is_ram: bool,
    prg_ram: Vec<u8>,
}

// Debug implemented manually; bank contents are not useful in output.
impl fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cartridge")
            .field("mapper", &self.mapper.name())
            .field("mapper_id", &self.header.mapper_id())
            .field("mirroring", &self.mirroring())
            .field("has_trainer", &self.header.has_trainer())
            .field("prg_rom_len", &self.prg_rom.len())
            .field("chr_len", &self.chr.len())
            .field("chr_is_ram", &self.chr_is_ram)
            .field("prg_ram_len", &self.prg_ram.len())
            .finish()
    }
}

/// Slice `len` bytes at `offset`, or report which section ran short.
fn take<'a>(
    data: &'a [u8],
    offset: usize,
    len: usize,
    section: &'static str,
) -> Result<&'a [u8], CartridgeError> {
    let available = data.len().saturating_sub(offset);
    data.get(offset..offset + len)
        .ok_or(CartridgeError::Truncated {
            section,
            expected: len,
            actual: available,
        })
}

impl Cartridge {
    // -------------- Construction --------------

    /// Load a cartridge from raw iNES bytes.
    pub fn from_ines_bytes(data: &[u8]) -> Result<Self, CartridgeError> {
        let header = InesHeader::parse(data)?;

        let mut offset = HEADER_LEN;
        if header.has_trainer() {
            take(data, offset, TRAINER_LEN, "trainer")?;
            offset += TRAINER_LEN;
        }

        let prg_len = header.prg_rom_chunks as usize * PRG_BANK_SIZE;
        let prg_rom = take(data, offset, prg_len, "PRG ROM")?.to_vec();
        offset += prg_len;

        let chr_is_ram = header.chr_rom_chunks == 0;
        let chr = if chr_is_ram {
            vec![0; CHR_BANK_SIZE]
        } else {
            let chr_len = header.chr_rom_chunks as usize * CHR_BANK_SIZE;
            take(data, offset, chr_len, "CHR ROM")?.to_vec()
        };

        let id = header.mapper_id();
        let mapper = Mapper::from_id(id, header.prg_rom_chunks, header.chr_rom_chunks)
            .ok_or(CartridgeError::UnsupportedMapper(id))?;

        let cart = Self {
            prg_ram: vec![0; header.prg_ram_len()],
            header,
            mapper,
            prg_rom,
            chr,
            chr_is_ram,
        };
        log::debug!(
            "cartridge loaded: mapper={} (0x{:02X}) prg={}x16K chr={}x8K{} mirroring={:?} trainer={}",
            cart.mapper.name(),
            id,
            header.prg_rom_chunks,
            header.chr_rom_chunks,
            if chr_is_ram { " (CHR RAM)" } else { "" },
            cart.mirroring(),
            header.has_trainer(),
        );
        Ok(cart)
    }

    /// Load a cartridge from any byte stream.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, CartridgeError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_ines_bytes(&bytes)
    }

    /// Load a cartridge from an iNES file (.nes).
    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self, CartridgeError> {
        Self::from_reader(File::open(path)?)
    }

    // -------------- CPU side --------------

    /// Read through the mapper. `None` means the cartridge does not claim `addr`.
    pub fn cpu_read(&self, addr: u16) -> Option<u8> {
        match self.mapper.cpu_map_read(addr)? {
            MappedAddr::PrgRom(ofs) => self.prg_rom.get(ofs).copied(),
            MappedAddr::PrgRam(ofs) => self.prg_ram_byte(ofs).copied(),
            MappedAddr::Latched => None,
        }
    }

    /// Write through the mapper. Returns whether the cartridge claimed the access.
    pub fn cpu_write(&mut self, addr: u16, data: u8) -> bool {
        match self.mapper.cpu_map_write(addr, data) {
            Some(MappedAddr::PrgRom(ofs)) => match self.prg_rom.get_mut(ofs) {
                Some(b) => {
                    *b = data;
                    true
                }
                None => false,
            },
            Some(MappedAddr::PrgRam(ofs)) => {
                let len = self.prg_ram.len();
                match self.prg_ram.get_mut(ofs % len.max(1)) {
                    Some(b) => {
                        *b = data;
                        true
                    }
                    None => false,
                }
            }
            Some(MappedAddr::Latched) => true,
            None => false,
        }
    }

    #[inline]
    fn prg_ram_byte(&self, ofs: usize) -> Option<&u8> {
        self.prg_ram.get(ofs % self.prg_ram.len().max(1))
    }

    // -------------- PPU side --------------

    pub fn ppu_read(&self, addr: u16) -> Option<u8> {
        let ofs = self.mapper.ppu_map_read(addr)?;
        self.chr.get(ofs).copied()
    }

    /// Write CHR RAM. CHR ROM boards decline and the byte is dropped.
    pub fn ppu_write(&mut self, addr: u16, data: u8) -> bool {
        let Some(ofs) = self.mapper.ppu_map_write(addr) else {
            return false;
        };
        match self.chr.get_mut(ofs) {
            Some(b) => {
                *b = data;
                true
            }
            None => false,
        }
    }

    /// Return mapper bank registers to their power-on state. Memory contents are kept.
    pub fn reset(&mut self) {
        self.mapper.reset();
    }

    // -------------- Accessors --------------

    pub fn header(&self) -> &InesHeader {
        &self.header
    }

    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    pub fn mapper_id(&self) -> u8 {
        self.header.mapper_id()
    }

    /// Current nametable arrangement: the mapper's runtime choice if it has one, else the header's.
    pub fn mirroring(&self) -> Mirroring {
        self.mapper
            .mirroring()
            .unwrap_or_else(|| self.header.mirroring())
    }

    pub fn battery_backed(&self) -> bool {
        self.header.battery_backed()
    }

    pub fn has_trainer(&self) -> bool {
        self.header.has_trainer()
    }

    pub fn chr_is_ram(&self) -> bool {
        self.chr_is_ram
    }

    pub fn prg_rom_len(&self) -> usize {
        self.prg_rom.len()
    }

    pub fn chr_len(&self) -> usize {
        self.chr.len()
    }

    pub fn prg_ram_len(&self) -> usize {
        self.prg_ram.len()
    }
}
