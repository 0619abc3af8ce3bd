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

//! # hyrisc-core
//!
//! A cycle-stepped emulator core for Hyrisc, a fictional 32-bit RISC
//! architecture: the multi-cycle fetch/decode/execute state machine, the
//! ALU/FPU contracts, the pin-level Bus Controller Interface (BCI) and
//! interrupt handshake, and the synchronous tick driver that coordinates
//! the CPU with memory-mapped [`Device`]s.
//!
//! ## Example
//!
//! ```rust
//! use hyrisc_core::{Cpu, Device};
//! use hyrisc_core::devices::ram::Ram;
//! use hyrisc_core::driver;
//!
//! // nop (0x8f) at the reset vector.
//! let mut ram = Ram::new(0x8000_0000, 0x1000);
//! ram.as_mut_slice()[0] = 0x8f;
//!
//! let mut devices: Vec<Box<dyn Device>> = vec![Box::new(ram)];
//!
//! let mut cpu = Cpu::new();
//! cpu.pic.v = 0x8000_0000;
//! cpu.reset = true;
//! driver::tick(&mut cpu, &mut devices);
//! cpu.reset = false;
//!
//! for _ in 0..3 {
//!     driver::tick(&mut cpu, &mut devices);
//! }
//! assert_eq!(cpu.regs.pc(), 0x8000_0004);
//! assert_eq!(cpu.cycle(), 0);
//! ```

pub mod alu;
pub mod cpu;
pub mod decoder;
pub mod device;
pub mod devices;
pub mod driver;
pub mod fpu;
pub mod pins;
pub mod registers;

pub use cpu::{Cpu, Trap};
pub use device::Device;
pub use pins::{Bci, Pic};
pub use registers::Registers;

#[cfg(test)]
mod tests;
