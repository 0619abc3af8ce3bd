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

//! Memory-mapped character terminal: offset 0 is write-only character
//! output, offset 1 is read-only keyboard input, all other offsets in the
//! two-byte window read as zero and ignore writes.
//!
//! Host terminal raw-mode handling is a host-process concern outside this
//! crate's scope; the embedder feeds input bytes via
//! [`Terminal::push_input`] instead of this device reading a real keyboard
//! directly.

use std::collections::VecDeque;
use std::io::Write;

use crate::device::Device;
use crate::pins::{bus_error, Bci};

const WINDOW_LEN: u32 = 2;

pub struct Terminal {
    base: u32,
    input: VecDeque<u8>,
    /// Every byte written to the output register, in order. Mirrors what a
    /// real terminal would have printed.
    output: Vec<u8>,
}

impl Terminal {
    pub fn new(base: u32) -> Self {
        Self {
            base,
            input: VecDeque::new(),
            output: Vec::new(),
        }
    }

    /// Queue a byte to be returned by the next read of the input register.
    pub fn push_input(&mut self, byte: u8) {
        self.input.push_back(byte);
    }

    /// Bytes written to the output register so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }
}

impl Device for Terminal {
    fn update(&mut self, bci: &mut Bci) {
        if !bci.busreq || bci.a < self.base || bci.a >= self.base + WINDOW_LEN {
            return;
        }

        let offset = bci.a - self.base;

        if bci.rw {
            if offset == 0 {
                let byte = bci.d as u8;
                self.output.push(byte);
                let _ = std::io::stdout().write_all(&[byte]);
            }
        } else {
            bci.d = match offset {
                1 => self.input.pop_front().unwrap_or(0) as u32,
                _ => 0,
            };
        }

        bci.be = bus_error::OK;
        bci.busack = true;
    }
}
