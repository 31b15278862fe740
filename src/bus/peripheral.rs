/*!
Placeholder for the device living in the $2000-$3FFF window (the picture processor on
real hardware).

The Bus folds the 8-byte register mirror before forwarding, so a peripheral only ever
sees $2000-$2007. The stub answers 0 to every read, swallows every write, and keeps a
little bookkeeping so hosts and tests can observe the traffic.
*/

use crate::bus::CpuBus;

/// Base of the peripheral register window.
pub const PERIPHERAL_BASE: u16 = 0x2000;

/// Direction of the last access seen by the stub.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Read(u16),
    Write(u16, u8),
}

#[derive(Clone, Debug, Default)]
pub struct PeripheralStub {
    reads: u64,
    writes: u64,
    last: Option<Access>,
}

impl PeripheralStub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reads(&self) -> u64 {
        self.reads
    }

    pub fn writes(&self) -> u64 {
        self.writes
    }

    pub fn last_access(&self) -> Option<Access> {
        self.last
    }
}

impl CpuBus for PeripheralStub {
    fn read(&mut self, addr: u16) -> u8 {
        log::trace!("peripheral read  ${addr:04X}");
        self.reads += 1;
        self.last = Some(Access::Read(addr));
        0
    }

    fn write(&mut self, addr: u16, data: u8) {
        log::trace!("peripheral write ${addr:04X} <- ${data:02X}");
        self.writes += 1;
        self.last = Some(Access::Write(addr, data));
    }
}
