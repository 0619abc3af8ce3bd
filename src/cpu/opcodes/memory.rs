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

//! `load`/`store`/`lea` in their four addressing-mode flavors (indexed
//! multiply, indexed shift, fixed add, fixed sub). Loads and stores span
//! two cycles: cycle 2 issues the transfer, cycle 3 waits for `busack`.
//!
//! The original's cycle-3 load handlers read `bci.d` unconditionally,
//! without checking `busack` (unlike the store/call/push handlers, which
//! do) — an asymmetry that looks like an oversight rather than an
//! intentional contract. This crate applies the documented wait-for-ack
//! protocol uniformly to every bus-touching opcode; see DESIGN.md.

use super::{indexed_multiply, indexed_shift, regy, set_regx};
use crate::cpu::{Cpu, ExecOutcome};
use crate::pins::AccessSize;

fn size(cpu: &Cpu) -> AccessSize {
    cpu.decoder.size()
}

fn load(cpu: &mut Cpu, phase: u8, addr: u32) -> ExecOutcome {
    match phase {
        0 => {
            cpu.init_read(addr, size(cpu));
            ExecOutcome::Pending
        }
        _ => match cpu.bus_wait() {
            ExecOutcome::Done => {
                let v = cpu.bci.d;
                set_regx(cpu, v);
                ExecOutcome::Done
            }
            pending => pending,
        },
    }
}

fn store(cpu: &mut Cpu, phase: u8, addr: u32) -> ExecOutcome {
    match phase {
        0 => {
            let value = cpu.regs.r[cpu.decoder.fieldx as usize];
            cpu.init_write(addr, value, size(cpu));
            ExecOutcome::Pending
        }
        _ => cpu.bus_wait(),
    }
}

pub(super) fn load_m(cpu: &mut Cpu, phase: u8) -> ExecOutcome {
    let addr = indexed_multiply(cpu);
    load(cpu, phase, addr)
}

pub(super) fn load_s(cpu: &mut Cpu, phase: u8) -> ExecOutcome {
    let addr = indexed_shift(cpu);
    load(cpu, phase, addr)
}

pub(super) fn load_fa(cpu: &mut Cpu, phase: u8) -> ExecOutcome {
    let addr = regy(cpu).wrapping_add(cpu.decoder.imm10());
    load(cpu, phase, addr)
}

pub(super) fn load_fs(cpu: &mut Cpu, phase: u8) -> ExecOutcome {
    let addr = regy(cpu).wrapping_sub(cpu.decoder.imm10());
    load(cpu, phase, addr)
}

pub(super) fn store_m(cpu: &mut Cpu, phase: u8) -> ExecOutcome {
    let addr = indexed_multiply(cpu);
    store(cpu, phase, addr)
}

pub(super) fn store_s(cpu: &mut Cpu, phase: u8) -> ExecOutcome {
    let addr = indexed_shift(cpu);
    store(cpu, phase, addr)
}

pub(super) fn store_fa(cpu: &mut Cpu, phase: u8) -> ExecOutcome {
    let addr = regy(cpu).wrapping_add(cpu.decoder.imm10());
    store(cpu, phase, addr)
}

pub(super) fn store_fs(cpu: &mut Cpu, phase: u8) -> ExecOutcome {
    let addr = regy(cpu).wrapping_sub(cpu.decoder.imm10());
    store(cpu, phase, addr)
}

pub(super) fn lea_m(cpu: &mut Cpu) -> ExecOutcome {
    let addr = indexed_multiply(cpu);
    set_regx(cpu, addr);
    ExecOutcome::Done
}

pub(super) fn lea_s(cpu: &mut Cpu) -> ExecOutcome {
    let addr = indexed_shift(cpu);
    set_regx(cpu, addr);
    ExecOutcome::Done
}

pub(super) fn lea_fa(cpu: &mut Cpu) -> ExecOutcome {
    let addr = regy(cpu).wrapping_add(cpu.decoder.imm10());
    set_regx(cpu, addr);
    ExecOutcome::Done
}

pub(super) fn lea_fs(cpu: &mut Cpu) -> ExecOutcome {
    let addr = regy(cpu).wrapping_sub(cpu.decoder.imm10());
    set_regx(cpu, addr);
    ExecOutcome::Done
}
