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

//! The Hyrisc core: register file, decoder latch, and the four-state
//! cycle-stepped execution engine.

pub mod opcodes;

use crate::decoder::DecodedInstruction;
use crate::pins::{bus_error, AccessSize, Bci, Pic};
use crate::registers::Registers;

/// A condition the core cannot resolve on its own; handed back to the
/// embedder rather than raised as a host signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trap {
    /// An undefined opcode was fetched. Carries the raw opcode byte.
    Illegal(u8),
    /// The host-breakpoint opcode (`0x45`) was executed.
    Breakpoint,
}

/// Outcome of a per-opcode handler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExecOutcome {
    /// The instruction has fully committed; the core returns to cycle 0.
    Done,
    /// The instruction issued a bus transfer that has not yet been
    /// acknowledged; the core stays on cycle 3 and re-invokes the
    /// completion handler next tick.
    Pending,
}

/// The Hyrisc core.
///
/// `bci`/`pic`/`reset`/`freeze` are the external pins; everything else is
/// internal latch state invisible to devices.
pub struct Cpu {
    pub regs: Registers,
    pub bci: Bci,
    pub pic: Pic,
    /// RESET pin: level-sensitive, highest priority.
    pub reset: bool,
    /// FREEZE pin: level-sensitive, suppresses progress while asserted.
    pub freeze: bool,

    cycle: u8,
    instruction: u32,
    decoder: DecodedInstruction,
    trap: Option<Trap>,
}

impl Cpu {
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            bci: Bci::default(),
            pic: Pic::default(),
            reset: false,
            freeze: false,
            cycle: 0,
            instruction: 0xffff_ffff,
            decoder: DecodedInstruction::default(),
            trap: None,
        }
    }

    pub fn cycle(&self) -> u8 {
        self.cycle
    }

    /// Zero the internal latches, restore the BCI to its power-on defaults,
    /// and load `pc` from the current IRQ vector (the embedder is expected
    /// to have set `pic.v` to the reset vector before asserting `reset`).
    fn reset_now(&mut self) {
        self.regs = Registers::new();
        self.cycle = 0;
        self.instruction = 0xffff_ffff;
        self.decoder = DecodedInstruction::default();

        self.bci = Bci::default();
        self.pic.irq = false;
        self.pic.irqack = false;
        self.freeze = false;

        self.regs.set_pc(self.pic.v);
    }

    /// Bus housekeeping run at the start of every tick: retire an
    /// acknowledged IRQ entry, clear a satisfied transfer, and promote a bus
    /// error (or an un-acknowledged "open bus" transfer) to an IRQ while
    /// `busirq` is asserted.
    ///
    /// The irqack-observed clear runs first and unconditionally: gating it
    /// on `be` still being nonzero, or on reaching it only after the
    /// clear-both branch below, lets the CPU re-enter the same vector every
    /// tick once `irqack` is set. A normal-IRQ redirect sets `irqack`, then
    /// its own cycle-0 fetch sets `busreq`/`busack` — the clear-both branch
    /// below would otherwise consume those pins and return before this
    /// check is ever reached, leaving `irq` asserted forever.
    ///
    /// The clear-both branch only fires outside cycle 3: a bus-touching
    /// opcode's cycle-3 handler (`bus_wait`) is the one that consumes and
    /// retires `busreq`/`busack` for its own transfer, on the same tick it
    /// observes the acknowledgment. Clearing the pins here first — before
    /// that handler runs later in the same tick — would erase the
    /// acknowledgment before it's ever read, so cycle 3 is excluded; the
    /// fetch phase (cycle 1, which reads `d` directly and never consults
    /// `busack`) still gets its pins swept here exactly one tick after
    /// acknowledgment, per the documented housekeeping contract.
    fn bci_update(&mut self) {
        if self.pic.irqack {
            self.bci.be = bus_error::OK;
            self.pic.irq = false;
            self.pic.irqack = false;
        }

        if self.cycle != 3 && self.bci.busreq && self.bci.busack {
            self.bci.busreq = false;
            self.bci.busack = false;
            return;
        }

        if !self.bci.busirq {
            return;
        }

        let open_bus = self.bci.busreq && !self.bci.busack;

        if self.bci.be != bus_error::OK || open_bus {
            // Promoting preempts whatever transfer is in flight — including
            // a cycle-3 handler still waiting on its own `busack`, or a
            // device that has already acknowledged a now-abandoned
            // transfer. Retire both pins here so the vector fetch this
            // redirect leads to starts from clean bus state rather than
            // inheriting a stale acknowledgment.
            self.bci.busreq = false;
            self.bci.busack = false;
            self.pic.irq = true;
            self.pic.v = crate::pins::bus_error_vector(self.bci.be);
        }
    }

    /// Priority: reset > freeze > IRQ > normal fetch. Returns whether the
    /// cycle state machine should also run this tick — an IRQ redirect
    /// still falls through to a cycle-0 fetch in the same tick.
    fn handle_signals(&mut self) -> bool {
        if self.reset {
            self.reset_now();
            return false;
        }

        if self.freeze {
            return false;
        }

        if self.pic.irq {
            self.cycle = 0;
            self.regs.set_pc(self.pic.v);
            self.pic.irqack = true;
            return true;
        }

        true
    }

    /// Advance the core by one tick. Returns a trap raised during this
    /// tick's execute phase, if any.
    pub fn tick(&mut self) -> Option<Trap> {
        self.trap = None;

        self.bci_update();

        if !self.handle_signals() {
            return None;
        }

        match self.cycle {
            0 => {
                self.bci.a = self.regs.pc();
                self.bci.s = AccessSize::Exec;
                self.bci.rw = false;
                self.bci.busreq = true;
                self.bci.be = bus_error::OK;
                self.cycle = 1;
            }
            1 => {
                self.instruction = self.bci.d;
                self.regs.set_pc(self.regs.pc().wrapping_add(4));
                self.cycle = 2;
            }
            2 => {
                self.decoder = DecodedInstruction::decode(self.instruction);
                match opcodes::dispatch(self, 0) {
                    ExecOutcome::Done => {
                        self.cycle = 0;
                        self.regs.clamp_zero_register();
                    }
                    ExecOutcome::Pending => self.cycle = 3,
                }
            }
            3 => {
                if let ExecOutcome::Done = opcodes::dispatch(self, 1) {
                    self.cycle = 0;
                    self.regs.clamp_zero_register();
                }
            }
            _ => unreachable!("cycle counter out of range"),
        }

        self.trap
    }

    pub(crate) fn raise(&mut self, trap: Trap) {
        self.trap = Some(trap);
    }

    /// Issue a bus read for the current instruction's execute phase.
    pub(crate) fn init_read(&mut self, addr: u32, size: AccessSize) {
        self.bci.a = addr;
        self.bci.s = size;
        self.bci.rw = false;
        self.bci.busreq = true;
        self.bci.be = bus_error::OK;
    }

    /// Issue a bus write for the current instruction's execute phase.
    pub(crate) fn init_write(&mut self, addr: u32, value: u32, size: AccessSize) {
        self.bci.a = addr;
        self.bci.s = size;
        self.bci.d = value;
        self.bci.rw = true;
        self.bci.busreq = true;
        self.bci.be = bus_error::OK;
    }

    /// Consume `busack` if asserted, retiring both bus pins for this
    /// transfer in the same step (see `bci_update`). Returns `Pending` (and
    /// leaves both pins alone) if the device has not yet acknowledged the
    /// transfer.
    pub(crate) fn bus_wait(&mut self) -> ExecOutcome {
        if !self.bci.busack {
            return ExecOutcome::Pending;
        }
        self.bci.busreq = false;
        self.bci.busack = false;
        ExecOutcome::Done
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
