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

//! Fixed-size, read-only ROM device. Writes fail with `EACCES`.

use crate::device::Device;
use crate::devices::{in_window, read_width};
use crate::pins::{bus_error, Bci};

pub struct Rom {
    base: u32,
    image: Vec<u8>,
}

impl Rom {
    /// Create a ROM of `size` bytes mapped at `base`, initialized from
    /// `image` (truncated or zero-padded to `size`).
    pub fn new(base: u32, size: usize, image: &[u8]) -> Self {
        let mut buf = vec![0u8; size];
        let n = image.len().min(size);
        buf[..n].copy_from_slice(&image[..n]);
        Self { base, image: buf }
    }

    pub fn len(&self) -> usize {
        self.image.len()
    }

    pub fn is_empty(&self) -> bool {
        self.image.is_empty()
    }
}

impl Device for Rom {
    fn update(&mut self, bci: &mut Bci) {
        if !bci.busreq || !in_window(bci.a, self.base, self.image.len() as u32) {
            return;
        }

        let offset = bci.a - self.base;

        if bci.rw {
            bci.be = bus_error::EACCES;
        } else {
            bci.d = read_width(&self.image, offset, bci.s);
            bci.be = bus_error::OK;
        }

        bci.busack = true;
    }
}
