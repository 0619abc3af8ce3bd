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

//! ATA-style block device reachable through the [I/O bus](super::iobus):
//! a fixed-size backing file addressed as 512-byte sectors.
//!
//! Only the command surface needed to satisfy the device contract is
//! implemented — read one sector, write one sector, report status. The
//! full ATA command set (identify, DMA, multi-sector chaining) is out of
//! scope; this is a deliberate simplification, recorded in `DESIGN.md`.
//!
//! Sector data moves through a single auto-incrementing data register
//! (configuration register 4) rather than a dedicated PIO data port, since
//! the configuration-space register field is too narrow (8 bits) to
//! address a 512-byte sector directly.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::devices::iobus::PciFunction;

pub const SECTOR_LEN: usize = 512;

const REG_COMMAND: u8 = 0;
const REG_LBA_LOW: u8 = 1;
const REG_LBA_HIGH: u8 = 2;
const REG_COUNT: u8 = 3;
const REG_DATA: u8 = 4;

const CMD_NOP: u32 = 0;
const CMD_READ_SECTOR: u32 = 1;
const CMD_WRITE_SECTOR: u32 = 2;

const STATUS_OK: u32 = 0;
const STATUS_ERROR: u32 = 1;

pub struct Ata {
    bus: u8,
    device: u8,
    file: File,
    sector_count: u32,
    lba_low: u16,
    lba_high: u16,
    count: u16,
    status: u32,
    staging: [u8; SECTOR_LEN],
    staging_pos: usize,
}

impl Ata {
    /// Open (or create) `path` as the backing store and attach it at the
    /// given `(bus, device)` configuration-space address. The file is
    /// extended with zero sectors if it is shorter than `sectors`.
    pub fn open(path: &Path, sectors: u32, bus: u8, device: u8) -> io::Result<Self> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let wanted_len = sectors as u64 * SECTOR_LEN as u64;
        let actual_len = file.metadata()?.len();
        if actual_len < wanted_len {
            file.set_len(wanted_len)?;
        }

        Ok(Self {
            bus,
            device,
            file,
            sector_count: sectors,
            lba_low: 0,
            lba_high: 0,
            count: 0,
            status: STATUS_OK,
            staging: [0u8; SECTOR_LEN],
            staging_pos: 0,
        })
    }

    fn lba(&self) -> u32 {
        (self.lba_high as u32) << 16 | self.lba_low as u32
    }

    fn execute(&mut self, command: u32) {
        self.status = match command {
            CMD_NOP => STATUS_OK,
            CMD_READ_SECTOR => self.read_sector().map(|_| STATUS_OK).unwrap_or(STATUS_ERROR),
            CMD_WRITE_SECTOR => self.write_sector().map(|_| STATUS_OK).unwrap_or(STATUS_ERROR),
            _ => STATUS_ERROR,
        };
        self.staging_pos = 0;
    }

    fn read_sector(&mut self) -> io::Result<()> {
        let lba = self.lba();
        if lba >= self.sector_count {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "lba out of range"));
        }
        self.file
            .seek(SeekFrom::Start(lba as u64 * SECTOR_LEN as u64))?;
        self.file.read_exact(&mut self.staging)?;
        Ok(())
    }

    fn write_sector(&mut self) -> io::Result<()> {
        let lba = self.lba();
        if lba >= self.sector_count {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "lba out of range"));
        }
        self.file
            .seek(SeekFrom::Start(lba as u64 * SECTOR_LEN as u64))?;
        self.file.write_all(&self.staging)?;
        self.file.flush()?;
        Ok(())
    }
}

impl PciFunction for Ata {
    fn matches(&self, bus: u8, device: u8) -> bool {
        self.bus == bus && self.device == device
    }

    fn config_read(&mut self, _function: u8, register: u8) -> u32 {
        match register {
            REG_COMMAND => self.status,
            REG_LBA_LOW => self.lba_low as u32,
            REG_LBA_HIGH => self.lba_high as u32,
            REG_COUNT => self.count as u32,
            REG_DATA => {
                let byte = self.staging[self.staging_pos];
                self.staging_pos = (self.staging_pos + 1) % SECTOR_LEN;
                byte as u32
            }
            _ => 0,
        }
    }

    fn config_write(&mut self, _function: u8, register: u8, value: u32) {
        match register {
            REG_COMMAND => self.execute(value),
            REG_LBA_LOW => self.lba_low = value as u16,
            REG_LBA_HIGH => self.lba_high = value as u16,
            REG_COUNT => self.count = value as u16,
            REG_DATA => {
                self.staging[self.staging_pos] = value as u8;
                self.staging_pos = (self.staging_pos + 1) % SECTOR_LEN;
            }
            _ => {}
        }
    }
}
