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

//! Integration tests for the execution core — assemble short programs by
//! hand (one 32-bit word per instruction, matching [`crate::decoder`]'s
//! bit layout) and drive them through [`crate::driver`].

use crate::cpu::opcodes::*;
use crate::device::Device;
use crate::devices::ram::Ram;
use crate::devices::rom::Rom;
use crate::driver;
use crate::registers::Condition;
use crate::Cpu;

fn enc1(opcode: u8, fieldx: u8, imm16: u16) -> u32 {
    opcode as u32 | (1u32 << 8) | ((fieldx as u32) << 10) | ((imm16 as u32) << 15)
}

fn enc2(opcode: u8, fieldx: u8, fieldy: u8, imm8: u8) -> u32 {
    opcode as u32 | (2u32 << 8) | ((fieldx as u32) << 10) | ((fieldy as u32) << 15) | ((imm8 as u32) << 20)
}

fn enc3(opcode: u8, fieldx: u8, fieldy: u8, fieldz: u8, fieldw: u8, size: u8) -> u32 {
    opcode as u32
        | (3u32 << 8)
        | ((fieldx as u32) << 10)
        | ((fieldy as u32) << 15)
        | ((fieldz as u32) << 20)
        | ((fieldw as u32) << 25)
        | ((size as u32) << 30)
}

const ROM_BASE: u32 = 0x8000_0000;

/// Assemble `words` into a ROM image at [`ROM_BASE`], power the core on
/// (asserting `reset` for one tick, per scenario 1's "after reset and 4
/// ticks" framing), and hand back the booted `Cpu` plus its device list.
fn boot(words: &[u32]) -> (Cpu, Vec<Box<dyn Device>>) {
    let mut image = Vec::with_capacity(words.len() * 4 + 4);
    for w in words {
        image.extend_from_slice(&w.to_le_bytes());
    }

    let rom = Rom::new(ROM_BASE, image.len().max(64), &image);
    let mut devices: Vec<Box<dyn Device>> = vec![Box::new(rom)];

    let mut cpu = Cpu::new();
    cpu.pic.v = ROM_BASE;
    cpu.reset = true;
    driver::tick(&mut cpu, &mut devices);
    cpu.reset = false;

    (cpu, devices)
}

fn run(cpu: &mut Cpu, devices: &mut [Box<dyn Device>], ticks: u32) {
    for _ in 0..ticks {
        driver::tick(cpu, devices);
    }
}

#[test]
fn power_on_fetch() {
    // Scenario 1: ROM holds a single nop at the reset vector.
    let (mut cpu, mut devices) = boot(&[NOP as u32]);
    run(&mut cpu, &mut devices, 3);
    assert_eq!(cpu.regs.pc(), ROM_BASE + 4);
    assert_eq!(cpu.cycle(), 0);
}

#[test]
fn constant_load() {
    // Scenario 2: li r1, 0xDEAD ; lui r2, 0xBEEF ; or r2, 0xDEAD
    let program = [
        enc1(LI, 1, 0xDEAD),
        enc1(LUI, 2, 0xBEEF),
        enc1(ORI16, 2, 0xDEAD),
    ];
    let (mut cpu, mut devices) = boot(&program);
    run(&mut cpu, &mut devices, 3 * program.len() as u32);

    assert_eq!(cpu.regs.r[1], 0x0000_DEAD);
    assert_eq!(cpu.regs.r[2], 0xBEEF_DEAD);
}

#[test]
fn unsigned_carry() {
    // Scenario 3: li r1, 0xFFFF ; lui r1, 0xFFFF ; or r1, 0xFFFF ; addu r1, r1, 1
    let program = [
        enc1(LI, 1, 0xFFFF),
        enc1(LUI, 1, 0xFFFF),
        enc1(ORI16, 1, 0xFFFF),
        enc2(ADDUI8, 1, 1, 1),
    ];
    let (mut cpu, mut devices) = boot(&program);
    run(&mut cpu, &mut devices, 3 * program.len() as u32);

    assert_eq!(cpu.regs.r[1], 0);
    assert!(cpu.regs.st.zero());
    assert!(cpu.regs.st.carry());
    assert!(!cpu.regs.st.negative());
}

#[test]
fn memory_round_trip() {
    // Scenario 4: li r1, 0x1234 ; li r2, 0x10 ; store.long [r2+r0*0], r1 ;
    // load.long r3, [r2+r0*0]
    //
    // The reference driver maps RAM at 0x10000000; this test maps it at
    // 0x0 instead so the literal "li r2, 0x10" lands inside the window
    // with a single 16-bit immediate. The round-trip behavior under test
    // doesn't depend on the window's base.
    const LONG: u8 = 2;
    let program = [
        enc1(LI, 1, 0x1234),
        enc1(LI, 2, 0x0010),
        enc3(STOREM, 1, 2, 0, 0, LONG),
        enc3(LOADM, 3, 2, 0, 0, LONG),
    ];

    let mut image = Vec::with_capacity(program.len() * 4);
    for w in &program {
        image.extend_from_slice(&w.to_le_bytes());
    }
    let rom = Rom::new(ROM_BASE, image.len().max(64), &image);
    let ram = Ram::new(0x0, 0x1000);
    let mut devices: Vec<Box<dyn Device>> = vec![Box::new(rom), Box::new(ram)];

    let mut cpu = Cpu::new();
    cpu.pic.v = ROM_BASE;
    cpu.reset = true;
    driver::tick(&mut cpu, &mut devices);
    cpu.reset = false;

    // li, li: 3 ticks each (no bus). store, load: 4 ticks each (fetch,
    // capture, decode+issue, bus-wait) — one extra tick over the baseline
    // for each of the "two bus operations" the scenario calls out.
    run(&mut cpu, &mut devices, 3 + 3 + 4 + 4);

    assert_eq!(cpu.regs.r[3], 0x1234);
}

#[test]
fn bus_error_promotes_to_irq() {
    // Scenario 5: load.long r1, [r0+r0*0] targets address 0, which no
    // device in this test claims — an open-bus condition.
    let program = [enc3(LOADM, 1, 0, 0, 0, 2)];
    let (mut cpu, mut devices) = boot(&program);
    assert!(cpu.bci.busirq);

    // fetch, capture, decode+issue (no device acks within this tick, so
    // the driver flags the outstanding request as open bus).
    run(&mut cpu, &mut devices, 3);
    assert_eq!(cpu.cycle(), 3);

    // The following tick's housekeeping observes the unacknowledged
    // request and promotes it to an IRQ.
    driver::tick(&mut cpu, &mut devices);

    assert!(cpu.pic.irq);
    // The low byte of the vector carries a driver-assigned diagnostic
    // code (see DESIGN.md); only the top byte is architecturally defined
    // as the bus-error vector space.
    assert_eq!(cpu.pic.v & 0xff00_0000, 0xf000_0000);
    assert_eq!(cpu.regs.pc(), cpu.pic.v);
}

#[test]
fn device_signaled_bus_error_with_mapped_handler_fetches_cleanly() {
    // lui r2, 0x8000 ; store.long [r2+r0*0], r0 — a write to the ROM
    // image itself, which the ROM device rejects with EACCES instead of
    // acknowledging it.
    let program = [enc1(LUI, 2, 0x8000), enc3(STOREM, 0, 2, 0, 0, 2)];
    let (mut cpu, mut devices) = boot(&program);
    assert!(cpu.bci.busirq);

    // lui (3 ticks, no bus) then store's fetch/capture/decode+issue (3
    // ticks): the write is issued and rejected by the ROM within the same
    // tick, leaving busreq/busack both asserted on a stalled cycle 3.
    run(&mut cpu, &mut devices, 3 + 3);
    assert_eq!(cpu.cycle(), 3);
    assert_eq!(cpu.bci.be, crate::pins::bus_error::EACCES);
    assert!(cpu.bci.busack);

    let handler_vector = crate::pins::bus_error_vector(crate::pins::bus_error::EACCES);
    let handler = Rom::new(handler_vector, 64, &(NOP as u32).to_le_bytes());
    devices.push(Box::new(handler));

    // The following tick's housekeeping promotes the device-signaled
    // error to an IRQ, preempting the stalled store. If the preempted
    // transfer's stale busack survived into the vector fetch, the driver
    // would see an already-acknowledged request and skip servicing it,
    // so the next instruction boundary would latch stale data instead of
    // the handler's actual opcode.
    driver::tick(&mut cpu, &mut devices);
    assert!(cpu.pic.irq);
    assert_eq!(cpu.pic.v, handler_vector);
    assert_eq!(cpu.regs.pc(), handler_vector);

    run(&mut cpu, &mut devices, 3);
    assert_eq!(cpu.regs.pc(), handler_vector + 4);
    assert_eq!(cpu.cycle(), 0);
}

#[test]
fn conditional_branch_tie_break() {
    // Scenario 6, as the condition-code table is actually specified: with
    // r1 == r2, Z is set and N/V are both clear (V is reserved and never
    // written by any integer op). `eq` and `ne` behave as expected.
    let mut st = crate::registers::StatusWord::new();
    st.set_zero(true);
    st.set_negative(false);
    st.set_overflow(false);

    assert!(Condition(0).test(st)); // eq
    assert!(!Condition(1).test(st)); // ne

    // `gt`/`le` as literally defined (`gt = !Z && N==V`, `le = Z && N!=V`)
    // both evaluate false here: `gt` because Z is set, `le` because N==V
    // makes `N != V` false. A tie could instead be read as `ble` taken,
    // which would require `le` to be `Z || (N != V)`; see DESIGN.md for
    // why this crate keeps the table's literal `&&` form instead.
    assert!(!Condition(12).test(st)); // gt
    assert!(!Condition(13).test(st)); // le
}

#[test]
fn reserved_condition_codes_are_always_false() {
    let st = crate::registers::StatusWord::new();
    for cc in 15..=31u8 {
        assert!(!Condition(cc).test(st), "cc {cc} should be always-false");
    }
}

#[test]
fn push_pop_round_trip() {
    let program = [
        enc1(LI, 1, 0x4242),
        enc2(PUSHS, 1, 0, 0),
        enc2(POPS, 2, 0, 0),
    ];
    let (mut cpu, mut devices) = boot(&program);
    cpu.regs.set_sp(0x0000_1000);
    let ram = Ram::new(0x0, 0x2000);
    devices.push(Box::new(ram));

    let sp_before = cpu.regs.sp();
    run(&mut cpu, &mut devices, 3 + 4 + 4);

    assert_eq!(cpu.regs.r[2], 0x4242);
    assert_eq!(cpu.regs.sp(), sp_before);
}

#[test]
fn zero_register_is_clamped_after_every_instruction() {
    // li r0, 0x1234 would appear to write r0, but the zero-register
    // invariant restores it before the next instruction boundary.
    let program = [enc1(LI, 0, 0x1234)];
    let (mut cpu, mut devices) = boot(&program);
    run(&mut cpu, &mut devices, 3);
    assert_eq!(cpu.regs.r[0], 0);
}

#[test]
fn illegal_opcode_raises_a_trap() {
    let program = [0x0000_0000u32]; // opcode 0x00 is undefined
    let (mut cpu, mut devices) = boot(&program);

    driver::tick(&mut cpu, &mut devices);
    driver::tick(&mut cpu, &mut devices);
    let trap = driver::tick(&mut cpu, &mut devices);

    assert_eq!(trap, Some(crate::Trap::Illegal(0x00)));
}

#[test]
fn breakpoint_opcode_raises_a_trap() {
    let program = [BREAKPOINT as u32];
    let (mut cpu, mut devices) = boot(&program);
    driver::tick(&mut cpu, &mut devices);
    driver::tick(&mut cpu, &mut devices);
    let trap = driver::tick(&mut cpu, &mut devices);

    assert_eq!(trap, Some(crate::Trap::Breakpoint));
}
