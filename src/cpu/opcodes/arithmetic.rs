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

//! `add`/`sub`/`mul`/`div` in their five operand flavors, plus `cmp`/
//! `cmpz`. Single cycle, no bus traffic.
//!
//! `addu`/`subu`/`mulu` produce bit-identical results for the "signed" and
//! "unsigned" immediate flavors — only the immediate's extension differs
//! (zero- vs sign-extend) before it reaches the ALU. `div` is the one
//! operation where signedness changes the arithmetic itself, so
//! `divu`/`divs` are genuinely different ALU entry points.
//!
//! Signed and unsigned immediates are distinct operand flavors: this crate
//! genuinely sign-extends the immediate for every `*si8`/`*si16` opcode
//! rather than reusing the unsigned zero-extension; see DESIGN.md.

use super::*;
use crate::alu;
use crate::cpu::{Cpu, ExecOutcome};

fn zext8(v: u8) -> u32 {
    v as u32
}
fn sext8(v: u8) -> u32 {
    (v as i8) as i32 as u32
}
fn zext16(v: u16) -> u32 {
    v as u32
}
fn sext16(v: u16) -> u32 {
    (v as i16) as i32 as u32
}

pub(super) fn dispatch(cpu: &mut Cpu) -> ExecOutcome {
    let d = cpu.decoder;
    let mut dst = regx(cpu);

    match d.opcode {
        ADDR => alu::addu(&mut cpu.regs.st, &mut dst, regy(cpu), regz(cpu)),
        ADDUI8 => alu::addu(&mut cpu.regs.st, &mut dst, regy(cpu), zext8(d.imm8)),
        ADDUI16 => alu::addu(&mut cpu.regs.st, &mut dst, dst, zext16(d.imm16)),
        ADDSI8 => alu::addu(&mut cpu.regs.st, &mut dst, regy(cpu), sext8(d.imm8)),
        ADDSI16 => alu::addu(&mut cpu.regs.st, &mut dst, dst, sext16(d.imm16)),

        SUBR => alu::subu(&mut cpu.regs.st, &mut dst, regy(cpu), regz(cpu)),
        SUBUI8 => alu::subu(&mut cpu.regs.st, &mut dst, regy(cpu), zext8(d.imm8)),
        SUBUI16 => alu::subu(&mut cpu.regs.st, &mut dst, dst, zext16(d.imm16)),
        SUBSI8 => alu::subu(&mut cpu.regs.st, &mut dst, regy(cpu), sext8(d.imm8)),
        SUBSI16 => alu::subu(&mut cpu.regs.st, &mut dst, dst, sext16(d.imm16)),

        MULR => alu::mulu(&mut cpu.regs.st, &mut dst, regy(cpu), regz(cpu)),
        MULUI8 => alu::mulu(&mut cpu.regs.st, &mut dst, regy(cpu), zext8(d.imm8)),
        MULUI16 => alu::mulu(&mut cpu.regs.st, &mut dst, dst, zext16(d.imm16)),
        MULSI8 => alu::mulu(&mut cpu.regs.st, &mut dst, regy(cpu), sext8(d.imm8)),
        MULSI16 => alu::mulu(&mut cpu.regs.st, &mut dst, dst, sext16(d.imm16)),

        DIVR => alu::divu(&mut cpu.regs.st, &mut dst, regy(cpu), regz(cpu)),
        DIVUI8 => alu::divu(&mut cpu.regs.st, &mut dst, regy(cpu), zext8(d.imm8)),
        DIVUI16 => alu::divu(&mut cpu.regs.st, &mut dst, dst, zext16(d.imm16)),
        DIVSI8 => alu::divs(&mut cpu.regs.st, &mut dst, regy(cpu), sext8(d.imm8)),
        DIVSI16 => alu::divs(&mut cpu.regs.st, &mut dst, dst, sext16(d.imm16)),

        CMPZ => {
            alu::cmpz(&mut cpu.regs.st, regx(cpu));
            return ExecOutcome::Done;
        }
        CMPR => {
            alu::cmp(&mut cpu.regs.st, regx(cpu), regy(cpu));
            return ExecOutcome::Done;
        }
        CMPI8 => {
            // The original reads its own `imm16` field here, which
            // encoding 2 (2-field + 8-bit immediate) never populates —
            // an opcode/encoding mismatch that makes `cmp.b` always
            // compare against zero there. Read the immediate the
            // opcode's own encoding actually carries instead.
            alu::cmpb(&mut cpu.regs.st, regx(cpu), d.imm8 as u32);
            return ExecOutcome::Done;
        }
        CMPI16 => {
            alu::cmp(&mut cpu.regs.st, regx(cpu), d.imm16 as u32);
            return ExecOutcome::Done;
        }

        _ => unreachable!("arithmetic::dispatch called for non-arithmetic opcode"),
    }

    set_regx(cpu, dst);
    ExecOutcome::Done
}
