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

//! `mov`, `li`, `lui`: no bus traffic, single cycle.

use super::{regy, set_regx};
use crate::cpu::{Cpu, ExecOutcome};

pub(super) fn mov(cpu: &mut Cpu) -> ExecOutcome {
    let v = regy(cpu);
    set_regx(cpu, v);
    ExecOutcome::Done
}

pub(super) fn li(cpu: &mut Cpu) -> ExecOutcome {
    set_regx(cpu, cpu.decoder.imm16 as u32);
    ExecOutcome::Done
}

pub(super) fn lui(cpu: &mut Cpu) -> ExecOutcome {
    set_regx(cpu, (cpu.decoder.imm16 as u32) << 16);
    ExecOutcome::Done
}
