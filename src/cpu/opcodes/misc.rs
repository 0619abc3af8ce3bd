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

//! `nop`, the host-breakpoint opcode, and the illegal-instruction default.
//!
//! A hosted implementation might raise a host signal for these (`SIGINT`/
//! `SIGBREAK` for the breakpoint, `SIGILL` for anything undefined); this
//! crate hands both conditions back to the embedder as a
//! [`Trap`](crate::cpu::Trap) instead.

use crate::cpu::{Cpu, ExecOutcome, Trap};

pub(super) fn nop() -> ExecOutcome {
    ExecOutcome::Done
}

pub(super) fn breakpoint(cpu: &mut Cpu) -> ExecOutcome {
    cpu.raise(Trap::Breakpoint);
    ExecOutcome::Done
}

pub(super) fn illegal(cpu: &mut Cpu, opcode: u8) -> ExecOutcome {
    cpu.raise(Trap::Illegal(opcode));
    ExecOutcome::Done
}
