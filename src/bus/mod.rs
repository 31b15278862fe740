#![doc = r#"
Bus module: the CPU-visible address space.

Overview
- `CpuBus` is the byte-level capability the CPU core consumes. Anything that can answer
  16-bit reads and writes can drive the CPU: the console `Bus`, the 64 KiB `FlatMemory`,
  or a host-provided peripheral.
- `Bus` owns the 2 KiB work RAM, at most one inserted `Cartridge`, and the device behind
  the $2000-$3FFF register window.

Modules and responsibilities
- cpu_interface: address decoder (`Route`) and the read/write dispatch in priority order.
- ram: 2 KiB work RAM mirrored through $1FFF.
- peripheral: `PeripheralStub`, the default occupant of the register window.
- flat: `FlatMemory`, a mirror-free 64 KiB memory for tests and tools.

Address map (in priority order)
- Cartridge: whatever its mapper claims (PRG RAM $6000-$7FFF, PRG ROM $8000-$FFFF)
- $0000-$1FFF: RAM, masked with & 0x07FF
- $2000-$3FFF: peripheral, registers mirrored every 8 bytes
- anything else: open bus (reads 0, writes dropped)
"#]

pub mod cpu_interface;
pub mod flat;
pub mod peripheral;
pub mod ram;

#[cfg(test)]
mod tests;

pub use cpu_interface::Route;
pub use flat::FlatMemory;
pub use peripheral::PeripheralStub;
pub use ram::Ram;

use crate::cartridge::Cartridge;

/// Byte-level memory access as seen from the CPU.
///
/// Both calls are total over the 16-bit space; there is no bus error on a 6502.
/// `read` takes `&mut self` because device reads may have side effects.
pub trait CpuBus {
    fn read(&mut self, addr: u16) -> u8;

    fn write(&mut self, addr: u16, data: u8);

    /// Little-endian word at `addr`, `addr + 1` (wrapping at $FFFF).
    #[inline]
    fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }
}

/// Console address space: RAM, cartridge slot and the $2000-$3FFF device.
pub struct Bus<P: CpuBus = PeripheralStub> {
    pub(crate) ram: Ram,
    pub(crate) cartridge: Option<Cartridge>,
    pub(crate) peripheral: P,
}

impl Bus {
    /// Bus with the built-in peripheral stub and an empty cartridge slot.
    pub fn new() -> Self {
        Self::with_peripheral(PeripheralStub::new())
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: CpuBus> Bus<P> {
    pub fn with_peripheral(peripheral: P) -> Self {
        Self {
            ram: Ram::new(),
            cartridge: None,
            peripheral,
        }
    }

    /// Insert a cartridge, returning the one previously in the slot.
    pub fn insert_cartridge(&mut self, cart: Cartridge) -> Option<Cartridge> {
        self.cartridge.replace(cart)
    }

    pub fn remove_cartridge(&mut self) -> Option<Cartridge> {
        self.cartridge.take()
    }

    pub fn cartridge(&self) -> Option<&Cartridge> {
        self.cartridge.as_ref()
    }

    pub fn cartridge_mut(&mut self) -> Option<&mut Cartridge> {
        self.cartridge.as_mut()
    }

    pub fn peripheral(&self) -> &P {
        &self.peripheral
    }

    pub fn peripheral_mut(&mut self) -> &mut P {
        &mut self.peripheral
    }

    pub fn ram(&self) -> &Ram {
        &self.ram
    }

    /// Which device serves `addr` right now.
    #[inline]
    pub fn route(&self, addr: u16) -> Route {
        cpu_interface::route(self, addr)
    }

    /// Clear RAM and return the cartridge's bank registers to power-on state.
    pub fn reset(&mut self) {
        self.ram.reset();
        if let Some(cart) = self.cartridge.as_mut() {
            cart.reset();
        }
        log::debug!(
            "bus reset (cartridge: {})",
            self.cartridge
                .as_ref()
                .map_or("none", |c| c.mapper().name())
        );
    }
}

impl<P: CpuBus> CpuBus for Bus<P> {
    #[inline]
    fn read(&mut self, addr: u16) -> u8 {
        cpu_interface::cpu_read(self, addr)
    }

    #[inline]
    fn write(&mut self, addr: u16, data: u8) {
        cpu_interface::cpu_write(self, addr, data)
    }
}
