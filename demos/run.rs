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

use std::env;
use std::fs;
use std::process;

use hyrisc_core::devices::ata::Ata;
use hyrisc_core::devices::iobus::IoBus;
use hyrisc_core::devices::ram::Ram;
use hyrisc_core::devices::rom::Rom;
use hyrisc_core::devices::terminal::Terminal;
use hyrisc_core::{driver, Cpu, Device};

// The reference memory map from the device-contract writeup: ROM holds
// the boot image, RAM is general-purpose working memory, the terminal is
// a one-character-wide console, and the I/O bus is the indirection window
// in front of the ATA disk.
const ROM_BASE: u32 = 0x8000_0000;
const ROM_SIZE: usize = 0x10_0000;
const RAM_BASE: u32 = 0x1000_0000;
const RAM_SIZE: usize = 0x10_0000;
const TERMINAL_BASE: u32 = 0xa000_0000;
const IOBUS_BASE: u32 = 0xffff_fffe;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <rom-image> [--trace] [--max-cycles N] [--disk FILE]", args[0]);
        eprintln!();
        eprintln!("  Loads a raw binary as the ROM image at {ROM_BASE:#010x} and runs the");
        eprintln!("  Hyrisc core until it traps or exceeds the cycle limit.");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  --trace          Print register state after each tick");
        eprintln!("  --max-cycles N   Stop after N ticks (default: 1000000)");
        eprintln!("  --disk FILE      Back the I/O-bus ATA device with FILE (created if absent)");
        process::exit(1);
    }

    let filename = &args[1];

    let mut trace = false;
    let mut max_cycles: u64 = 1_000_000;
    let mut disk_path: Option<String> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--trace" => trace = true,
            "--max-cycles" => {
                i += 1;
                max_cycles = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("Error: --max-cycles requires a numeric argument");
                    process::exit(1);
                });
            }
            "--disk" => {
                i += 1;
                disk_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("Error: --disk requires a path argument");
                    process::exit(1);
                }));
            }
            other => {
                eprintln!("Unknown option: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let image = fs::read(filename).unwrap_or_else(|e| {
        eprintln!("Error reading '{}': {}", filename, e);
        process::exit(1);
    });

    if image.len() > ROM_SIZE {
        eprintln!("Error: image ({} bytes) exceeds ROM window ({} bytes)", image.len(), ROM_SIZE);
        process::exit(1);
    }

    let rom = Rom::new(ROM_BASE, ROM_SIZE, &image);
    let ram = Ram::new(RAM_BASE, RAM_SIZE);
    let terminal = Terminal::new(TERMINAL_BASE);

    let mut devices: Vec<Box<dyn Device>> = vec![Box::new(rom), Box::new(ram), Box::new(terminal)];

    if let Some(path) = disk_path {
        let mut iobus = IoBus::new(IOBUS_BASE);
        let ata = Ata::open(path.as_ref(), 1024, 0, 1).unwrap_or_else(|e| {
            eprintln!("Error opening disk image '{}': {}", path, e);
            process::exit(1);
        });
        iobus.attach(Box::new(ata));
        devices.push(Box::new(iobus));
    }

    let mut cpu = Cpu::new();
    cpu.pic.v = ROM_BASE;
    cpu.reset = true;
    driver::tick(&mut cpu, &mut devices);
    cpu.reset = false;

    println!("Loaded {} bytes at {ROM_BASE:#010x}, reset vector -> {ROM_BASE:#010x}", image.len());
    println!("Initial state: {:?}", cpu.regs);
    println!();

    let mut ticks = 0u64;
    let trap = loop {
        if ticks >= max_cycles {
            break None;
        }
        if trace {
            print!("{:?}  ", cpu.regs);
        }
        let trap = driver::tick(&mut cpu, &mut devices);
        ticks += 1;
        if trace {
            println!("cycle={}", cpu.cycle());
        }
        if trap.is_some() {
            break trap;
        }
    };

    println!();
    match trap {
        Some(trap) => println!("Trap after {} ticks: {:?}", ticks, trap),
        None => println!("Tick limit ({}) reached", max_cycles),
    }
    println!("Final state: {:?}", cpu.regs);
}
