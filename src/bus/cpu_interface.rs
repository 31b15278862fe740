/*!
CPU interface dispatcher

Purpose
- Centralize CPU-visible address decoding and delegate to devices.
- Keep the priority order in one place: cartridge, RAM, peripheral window, open bus.

Notes
- This module does not own device state. It operates on a `Bus` and delegates.
- The cartridge is consulted first for every address; its mapper decides what it claims.
- The peripheral receives the folded register address `$2000 | (addr & 7)`.
*/

use crate::bus::peripheral::PERIPHERAL_BASE;
use crate::bus::{Bus, CpuBus};

/// The device that serves a CPU address.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Cartridge,
    Ram,
    Peripheral,
    OpenBus,
}

/// Value seen on reads nobody answers.
pub const OPEN_BUS: u8 = 0x00;

#[inline]
fn fold_peripheral(addr: u16) -> u16 {
    PERIPHERAL_BASE | (addr & 0x0007)
}

/// Decode `addr` against the fixed map, ignoring the cartridge.
#[inline]
fn route_fixed(addr: u16) -> Route {
    match addr {
        0x0000..=0x1FFF => Route::Ram,
        0x2000..=0x3FFF => Route::Peripheral,
        _ => Route::OpenBus,
    }
}

pub fn route<P: CpuBus>(bus: &Bus<P>, addr: u16) -> Route {
    match &bus.cartridge {
        Some(cart) if cart.cpu_read(addr).is_some() => Route::Cartridge,
        _ => route_fixed(addr),
    }
}

/// CPU-visible read from the unified address space.
pub fn cpu_read<P: CpuBus>(bus: &mut Bus<P>, addr: u16) -> u8 {
    if let Some(v) = bus.cartridge.as_ref().and_then(|c| c.cpu_read(addr)) {
        return v;
    }
    match route_fixed(addr) {
        Route::Ram => bus.ram.read(addr),
        Route::Peripheral => bus.peripheral.read(fold_peripheral(addr)),
        _ => OPEN_BUS,
    }
}

/// CPU-visible write to the unified address space.
pub fn cpu_write<P: CpuBus>(bus: &mut Bus<P>, addr: u16, data: u8) {
    if let Some(cart) = bus.cartridge.as_mut() {
        if cart.cpu_write(addr, data) {
            return;
        }
    }
    match route_fixed(addr) {
        Route::Ram => bus.ram.write(addr, data),
        Route::Peripheral => bus.peripheral.write(fold_peripheral(addr), data),
        // Open bus: dropped
        _ => {}
    }
}
