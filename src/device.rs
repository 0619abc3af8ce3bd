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

//! The device contract: every memory-mapped peripheral implements one
//! method, polled once per tick by the [driver](crate::driver).

use crate::pins::Bci;

/// A memory-mapped device.
///
/// `update` is called once per tick, after the CPU has (possibly) asserted
/// `busreq`. Implementations must:
///
/// 1. Examine `bci.busreq` and `bci.a`; if the request falls outside the
///    device's window, return without touching `bci`.
/// 2. Otherwise decode `bci.rw`/`bci.s` and satisfy the transfer: a read
///    populates `bci.d` (upper bits zeroed beyond the requested width); a
///    write stores the low bits of `bci.d` into backing storage.
/// 3. Assert `bci.busack = true` and set `bci.be` (`bus_error::OK` on
///    success, a nonzero code on failure).
/// 4. Never clear `bci.busreq` — that belongs to the CPU's housekeeping.
///
/// At most one device should acknowledge a request in a given tick; when
/// windows overlap, the driver polls devices in registration order and the
/// first device to assert `busack` wins.
pub trait Device {
    fn update(&mut self, bci: &mut Bci);
}
