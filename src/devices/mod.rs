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

//! Reference peripherals: ROM, RAM, a memory-mapped terminal, and an I/O
//! bus with PCI-style configuration-space indirection over an ATA block
//! device.

pub mod ata;
pub mod iobus;
pub mod ram;
pub mod rom;
pub mod terminal;

use crate::pins::AccessSize;

/// Read `size` little-endian bytes from `buf` at `addr`, zero-extended
/// into a `u32`. Out-of-range reads return zero.
pub(crate) fn read_width(buf: &[u8], addr: u32, size: AccessSize) -> u32 {
    let addr = addr as usize;
    let width = size.bytes() as usize;
    let mut out = 0u32;
    for i in 0..width {
        let byte = buf.get(addr + i).copied().unwrap_or(0);
        out |= (byte as u32) << (8 * i);
    }
    out
}

/// Write the low `size` little-endian bytes of `value` into `buf` at
/// `addr`. Out-of-range bytes are silently dropped.
pub(crate) fn write_width(buf: &mut [u8], addr: u32, value: u32, size: AccessSize) {
    let addr = addr as usize;
    let width = size.bytes() as usize;
    for i in 0..width {
        if let Some(slot) = buf.get_mut(addr + i) {
            *slot = (value >> (8 * i)) as u8;
        }
    }
}

/// Does `addr` fall within `[base, base + len)`?
pub(crate) fn in_window(addr: u32, base: u32, len: u32) -> bool {
    let end = base.wrapping_add(len);
    if end >= base {
        addr >= base && addr < end
    } else {
        // Window wraps the address space (e.g. the reference I/O-bus
        // window at 0xfffffffe); treat it as wrapping.
        addr >= base || addr < end
    }
}
