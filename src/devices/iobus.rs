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

//! I/O bus indirection window with PCI-style configuration-space
//! addressing: a two-register port/data window in front of a set of
//! registered configuration-space functions (e.g. [`Ata`](super::ata::Ata)).

use crate::device::Device;
use crate::devices::in_window;
use crate::pins::{bus_error, Bci};

const PORT_OFFSET: u32 = 0;
const DATA_OFFSET: u32 = 4;
const WINDOW_LEN: u32 = 8;

/// The decoded fields of a port-register write: which (bus, device,
/// function, register) the next data-register access targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PciAddress {
    pub bus: u8,
    pub device: u8,
    pub function: u8,
    pub register: u8,
}

impl PciAddress {
    fn decode(raw: u32) -> Self {
        Self {
            bus: (raw >> 16) as u8,
            device: ((raw >> 11) & 0x1f) as u8,
            function: ((raw >> 8) & 0x7) as u8,
            register: raw as u8,
        }
    }

    fn encode(self) -> u32 {
        ((self.bus as u32) << 16)
            | (((self.device as u32) & 0x1f) << 11)
            | (((self.function as u32) & 0x7) << 8)
            | self.register as u32
    }
}

/// A device reachable through the I/O bus's configuration-space
/// indirection, identified by a fixed `(bus, device)` pair.
pub trait PciFunction {
    fn matches(&self, bus: u8, device: u8) -> bool;
    fn config_read(&mut self, function: u8, register: u8) -> u32;
    fn config_write(&mut self, function: u8, register: u8, value: u32);
}

pub struct IoBus {
    base: u32,
    port: PciAddress,
    functions: Vec<Box<dyn PciFunction>>,
}

impl IoBus {
    pub fn new(base: u32) -> Self {
        Self {
            base,
            port: PciAddress::default(),
            functions: Vec::new(),
        }
    }

    /// Register a sub-device behind the I/O bus. Devices are searched in
    /// registration order; the first `(bus, device)` match wins, matching
    /// `iobus_dev_pci_t::search_device`.
    pub fn attach(&mut self, function: Box<dyn PciFunction>) {
        self.functions.push(function);
    }

    fn find_mut(&mut self) -> Option<&mut Box<dyn PciFunction>> {
        let (bus, device) = (self.port.bus, self.port.device);
        self.functions.iter_mut().find(|f| f.matches(bus, device))
    }
}

impl Device for IoBus {
    fn update(&mut self, bci: &mut Bci) {
        if !bci.busreq || !in_window(bci.a, self.base, WINDOW_LEN) {
            return;
        }

        let offset = bci.a.wrapping_sub(self.base);

        if offset == PORT_OFFSET {
            if bci.rw {
                self.port = PciAddress::decode(bci.d);
            } else {
                bci.d = self.port.encode();
            }
        } else if offset == DATA_OFFSET {
            let (function, register) = (self.port.function, self.port.register);
            match self.find_mut() {
                Some(dev) if bci.rw => dev.config_write(function, register, bci.d),
                Some(dev) => bci.d = dev.config_read(function, register),
                None if bci.rw => {}
                None => bci.d = 0xffff_ffff,
            }
        } else {
            return;
        }

        bci.be = bus_error::OK;
        bci.busack = true;
    }
}
