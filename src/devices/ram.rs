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

//! Fixed-size read/write RAM device.

use crate::device::Device;
use crate::devices::{in_window, read_width, write_width};
use crate::pins::{bus_error, Bci};

pub struct Ram {
    base: u32,
    mem: Vec<u8>,
}

impl Ram {
    pub fn new(base: u32, size: usize) -> Self {
        Self {
            base,
            mem: vec![0u8; size],
        }
    }

    pub fn len(&self) -> usize {
        self.mem.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mem.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.mem
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.mem
    }
}

impl Device for Ram {
    fn update(&mut self, bci: &mut Bci) {
        if !bci.busreq || !in_window(bci.a, self.base, self.mem.len() as u32) {
            return;
        }

        let offset = bci.a - self.base;

        if bci.rw {
            write_width(&mut self.mem, offset, bci.d, bci.s);
        } else {
            bci.d = read_width(&self.mem, offset, bci.s);
        }

        bci.be = bus_error::OK;
        bci.busack = true;
    }
}
