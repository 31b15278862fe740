//! Flat 64 KiB memory: every address is plain RAM.
//!
//! Handy for driving the CPU in isolation (tests, tools, non-console hosts) where the
//! console memory map would get in the way, e.g. placing code or pointers below $8000.

use crate::bus::CpuBus;

pub const FLAT_MEMORY_SIZE: usize = 0x1_0000;

#[derive(Clone)]
pub struct FlatMemory {
    data: Box<[u8]>,
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl FlatMemory {
    pub fn new() -> Self {
        Self {
            data: vec![0; FLAT_MEMORY_SIZE].into_boxed_slice(),
        }
    }

    /// Copy `bytes` starting at `addr`, wrapping past $FFFF.
    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        let mut a = addr;
        for &b in bytes {
            self.data[a as usize] = b;
            a = a.wrapping_add(1);
        }
    }

    /// Store a little-endian word (low byte at `addr`).
    pub fn write_word(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.data[addr as usize] = lo;
        self.data[addr.wrapping_add(1) as usize] = hi;
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }
}

impl CpuBus for FlatMemory {
    #[inline]
    fn read(&mut self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    #[inline]
    fn write(&mut self, addr: u16, data: u8) {
        self.data[addr as usize] = data;
    }
}
