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

//! `and`/`or`/`xor`/`not`/`neg`. Single cycle, `C` always cleared.

use super::*;
use crate::alu;
use crate::cpu::{Cpu, ExecOutcome};

pub(super) fn dispatch(cpu: &mut Cpu) -> ExecOutcome {
    let d = cpu.decoder;
    let mut dst = regx(cpu);

    match d.opcode {
        ANDR => alu::and(&mut cpu.regs.st, &mut dst, regy(cpu), regz(cpu)),
        ANDI8 => alu::and(&mut cpu.regs.st, &mut dst, regy(cpu), d.imm8 as u32),
        ANDI16 => alu::and(&mut cpu.regs.st, &mut dst, dst, d.imm16 as u32),

        ORR => alu::or(&mut cpu.regs.st, &mut dst, regy(cpu), regz(cpu)),
        ORI8 => alu::or(&mut cpu.regs.st, &mut dst, regy(cpu), d.imm8 as u32),
        ORI16 => alu::or(&mut cpu.regs.st, &mut dst, dst, d.imm16 as u32),

        XORR => alu::xor(&mut cpu.regs.st, &mut dst, regy(cpu), regz(cpu)),
        XORI8 => alu::xor(&mut cpu.regs.st, &mut dst, regy(cpu), d.imm8 as u32),
        XORI16 => alu::xor(&mut cpu.regs.st, &mut dst, dst, d.imm16 as u32),

        NOT => alu::not(&mut cpu.regs.st, &mut dst, regy(cpu)),
        NEG => alu::neg(&mut cpu.regs.st, &mut dst, regy(cpu)),

        _ => unreachable!("logical::dispatch called for non-logical opcode"),
    }

    set_regx(cpu, dst);
    ExecOutcome::Done
}
