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

//! The tick driver: clocks the CPU, then polls every attached device in
//! registration order.
//!
//! The CPU owns no device list itself — devices are a driver concern, kept
//! outside [`Cpu`] so an embedder can wire an arbitrary memory map without
//! this crate knowing its shape.

use crate::cpu::{Cpu, Trap};
use crate::device::Device;
use crate::pins::bus_error;

/// One tick: clock the CPU, then give every device a chance to service the
/// CPU's bus request.
///
/// Devices are polled in the order given, so overlapping windows resolve
/// deterministically as "first registered wins". If no device acknowledges
/// an outstanding `busreq`, this is "open bus" — the driver (not the CPU)
/// detects it and flags it so the CPU's next-tick housekeeping promotes it
/// to an IRQ.
pub fn tick(cpu: &mut Cpu, devices: &mut [Box<dyn Device>]) -> Option<Trap> {
    let trap = cpu.tick();

    if cpu.bci.busreq {
        for device in devices.iter_mut() {
            device.update(&mut cpu.bci);
            if cpu.bci.busack {
                break;
            }
        }

        if !cpu.bci.busack {
            cpu.bci.be = bus_error::OPEN_BUS;
        }
    }

    trap
}

/// Run the CPU for `ticks` clock edges, stopping early if a trap is raised.
/// Returns the trap that stopped it, if any.
pub fn run(cpu: &mut Cpu, devices: &mut [Box<dyn Device>], ticks: u64) -> Option<Trap> {
    for _ in 0..ticks {
        if let Some(trap) = tick(cpu, devices) {
            return Some(trap);
        }
    }
    None
}
