//   Copyright 2026 Martin Åkesson
//
//   Licensed under the Apache License, Version 2.0 (the "License");
//   you may not use this file except in compliance with the License.
//   You may obtain a copy of the License at
//
//       http://www.apache.org/licenses/LICENSE-2.0
//
//   Unless required by applicable law or agreed to in writing, software
//   distributed under the License is distributed on an "AS IS" BASIS,
//   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//   See the License for the specific language governing permissions and
//   limitations under the License.

//! Pin-level types shared by the CPU and every device: the Bus Controller
//! Interface (BCI), the internal PIC handshake, and the access-width tag
//! carried on the `s` pins.

use std::fmt;

/// Access width tag carried on the BCI's `s` pins (`S0`-`S1`).
///
/// `Exec` is used only for the opcode-fetch transaction on cycle 0; every
/// load/store instruction uses one of the other three widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessSize {
    Byte,
    Short,
    Long,
    Exec,
}

impl AccessSize {
    /// Number of bytes a transfer of this width touches (`Exec` reads a
    /// full instruction word, same as `Long`).
    pub const fn bytes(self) -> u32 {
        match self {
            AccessSize::Byte => 1,
            AccessSize::Short => 2,
            AccessSize::Long | AccessSize::Exec => 4,
        }
    }

    /// Mask that keeps exactly `bytes()` low bytes of a 32-bit value.
    pub const fn mask(self) -> u32 {
        match self {
            AccessSize::Byte => 0x0000_00ff,
            AccessSize::Short => 0x0000_ffff,
            AccessSize::Long | AccessSize::Exec => 0xffff_ffff,
        }
    }
}

impl From<u8> for AccessSize {
    fn from(tag: u8) -> Self {
        match tag & 0b11 {
            0 => AccessSize::Byte,
            1 => AccessSize::Short,
            2 => AccessSize::Long,
            _ => AccessSize::Exec,
        }
    }
}

impl From<AccessSize> for u8 {
    fn from(size: AccessSize) -> Self {
        match size {
            AccessSize::Byte => 0,
            AccessSize::Short => 1,
            AccessSize::Long => 2,
            AccessSize::Exec => 3,
        }
    }
}

/// Bus error codes carried on the `be` pins. `Ok` means no error; every
/// other value is reserved for the embedder except the handful named here,
/// which the reference devices and driver use directly.
pub mod bus_error {
    pub const OK: u8 = 0x00;
    pub const ENOENT: u8 = 0x01;
    pub const EIO: u8 = 0x04;
    pub const EACCES: u8 = 0x0c;
    pub const EBUSY: u8 = 0x0f;
    /// Distinguished code the driver uses when a transfer was requested but
    /// no device acknowledged it ("open bus").
    pub const OPEN_BUS: u8 = 0x7f;
}

/// Bus Controller Interface: the pin bundle used for every memory-mapped
/// transfer between the CPU and its devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bci {
    /// A0-A31: address bus.
    pub a: u32,
    /// D0-D31: data bus.
    pub d: u32,
    /// RW: false = read, true = write.
    pub rw: bool,
    /// S0-S1: transfer width.
    pub s: AccessSize,
    /// BE0-BE7: bus error code, `bus_error::OK` when clear.
    pub be: u8,
    /// BUSREQ: CPU requests a transfer.
    pub busreq: bool,
    /// BUSACK: a device has satisfied the current transfer.
    pub busack: bool,
    /// BUSIRQ: master enable for promoting bus errors to an IRQ.
    pub busirq: bool,
}

impl Default for Bci {
    fn default() -> Self {
        Self {
            a: 0xffff_ffff,
            d: 0xffff_ffff,
            rw: false,
            s: AccessSize::Exec,
            be: bus_error::OK,
            busreq: false,
            busack: false,
            busirq: true,
        }
    }
}

/// Internal PIC (Programmable Interrupt Controller) handshake: a single
/// vector register plus a request/acknowledge pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pic {
    /// V0-V31: the vector loaded into `pc` on reset or IRQ entry.
    pub v: u32,
    /// IRQ: an interrupt is pending.
    pub irq: bool,
    /// IRQACK: the CPU has taken the vector this tick.
    pub irqack: bool,
}

/// Bus-error vector for a given error code: `0xF0000000 | (code << 8)`.
pub const fn bus_error_vector(code: u8) -> u32 {
    0xf000_0000 | ((code as u32) << 8)
}

impl fmt::Display for Bci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "a={:08X} d={:08X} rw={} s={:?} be={:02X} busreq={} busack={}",
            self.a,
            self.d,
            if self.rw { "W" } else { "R" },
            self.s,
            self.be,
            self.busreq,
            self.busack
        )
    }
}
