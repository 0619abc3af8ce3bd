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

//! `sext`/`zext`, `rst` (single and, per the "I extension", ranged),
//! `inc`/`dec`, `tst`, and the `lsl`/`lsr`/`asl`/`asr` shift family.
//!
//! `sext` here performs genuine sign extension from the `SIZE`-selected
//! width for all inputs, not just negative ones; see DESIGN.md.
//!
//! `rst`'s ranged form (part of the "I extension") zeroes `fieldx..=fieldy`
//! inclusive; see DESIGN.md.

use super::*;
use crate::alu;
use crate::cpu::{Cpu, ExecOutcome};

fn sext(value: u32, size: u8) -> u32 {
    let bits = match size {
        0 => 8,
        1 => 16,
        _ => 32,
    };
    if bits >= 32 {
        return value;
    }
    let shift = 32 - bits;
    (((value << shift) as i32) >> shift) as u32
}

fn zext(value: u32, size: u8) -> u32 {
    match size {
        0 => value & 0xff,
        1 => value & 0xffff,
        _ => value,
    }
}

pub(super) fn dispatch(cpu: &mut Cpu) -> ExecOutcome {
    let d = cpu.decoder;

    match d.opcode {
        SEXT => {
            let v = sext(regy(cpu), d.size);
            set_regx(cpu, v);
        }
        ZEXT => {
            let v = zext(regy(cpu), d.size);
            set_regx(cpu, v);
        }
        RSTS => {
            let mut dst = 0u32;
            alu::rst(&mut cpu.regs.st, &mut dst);
            set_regx(cpu, dst);
        }
        RSTM => {
            // fieldx > fieldy is unspecified; treated as a no-op rather
            // than silently swapping the range.
            if d.fieldx <= d.fieldy {
                for i in d.fieldx..=d.fieldy {
                    cpu.regs.r[i as usize] = 0;
                }
            }
        }
        INC => {
            let mut dst = regx(cpu);
            alu::inc(&mut cpu.regs.st, &mut dst, 1u32 << d.size);
            set_regx(cpu, dst);
        }
        DEC => {
            let mut dst = regx(cpu);
            alu::dec(&mut cpu.regs.st, &mut dst, 1u32 << d.size);
            set_regx(cpu, dst);
        }
        TST => alu::tst(&mut cpu.regs.st, regx(cpu), d.fieldy as u32),
        LSLR => shift(cpu, alu::lsl, regy(cpu), regz(cpu)),
        LSLI16 => {
            let dst = regx(cpu);
            shift(cpu, alu::lsl, dst, d.imm16 as u32)
        }
        LSRR => shift(cpu, alu::lsr, regy(cpu), regz(cpu)),
        LSRI16 => {
            let dst = regx(cpu);
            shift(cpu, alu::lsr, dst, d.imm16 as u32)
        }
        ASLR => shift(cpu, alu::asl, regy(cpu), regz(cpu)),
        ASLI16 => {
            let dst = regx(cpu);
            shift(cpu, alu::asl, dst, d.imm16 as u32)
        }
        ASRR => shift(cpu, alu::asr, regy(cpu), regz(cpu)),
        ASRI16 => {
            let dst = regx(cpu);
            shift(cpu, alu::asr, dst, d.imm16 as u32)
        }
        _ => unreachable!("bitwidth::dispatch called for non-bitwidth opcode"),
    }

    ExecOutcome::Done
}

fn shift(cpu: &mut Cpu, op: fn(&mut crate::registers::StatusWord, &mut u32, u32, u32), src1: u32, src2: u32) {
    let mut dst = 0u32;
    op(&mut cpu.regs.st, &mut dst, src1, src2);
    set_regx(cpu, dst);
}
