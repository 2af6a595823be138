//! Glue between the filesystem driver and the block device.
//! Every entry point is checked against the drive index; only drive 0 exists.
//! Transfers are forwarded as-is, no retries, and any non-positive transfer count is an I/O error.

use alloc::sync::Arc;

use crate::block_dev::{BlockDevice, DiskStatus};
use crate::config::{DRIVE, FIXED_FAT_TIME, SECTOR_SIZE};
use crate::error::{DiskError, FsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoctlCmd {
    /// Flush pending writes. The medium writes through, so this always succeeds.
    Sync,
    SectorCount,
    SectorSize,
    /// Erase block size in sectors.
    BlockSize,
}

pub struct Disk<D: BlockDevice> {
    device: Arc<D>,
    status: DiskStatus,
}

fn check_drive(drive: u8) -> Result<(), DiskError> {
    if drive != DRIVE {
        return Err(DiskError::NoSuchDrive);
    }
    Ok(())
}

impl<D: BlockDevice> Disk<D> {
    pub fn new(device: Arc<D>) -> Self {
        Self {
            device,
            status: DiskStatus::NOINIT,
        }
    }

    pub fn disk_initialize(&mut self, drive: u8) -> Result<DiskStatus, DiskError> {
        check_drive(drive)?;
        self.status = self.device.init();
        log::debug!("disk {}: initialized, status {:?}", drive, self.status);
        Ok(self.status)
    }

    /// NOINIT comes from our own bookkeeping, the media bits from the device.
    pub fn disk_status(&self, drive: u8) -> Result<DiskStatus, DiskError> {
        check_drive(drive)?;
        let live = self.device.status().difference(DiskStatus::NOINIT);
        Ok(live | self.status.intersection(DiskStatus::NOINIT))
    }

    pub fn disk_read(&self, drive: u8, buf: &mut [u8], sector: u32, count: u32) -> Result<(), DiskError> {
        check_drive(drive)?;
        if buf.len() != count as usize * SECTOR_SIZE {
            return Err(DiskError::Io);
        }
        if self.device.read_blocks(sector, count, buf) > 0 {
            Ok(())
        } else {
            Err(DiskError::Io)
        }
    }

    pub fn disk_write(&self, drive: u8, buf: &[u8], sector: u32, count: u32) -> Result<(), DiskError> {
        check_drive(drive)?;
        if buf.len() != count as usize * SECTOR_SIZE {
            return Err(DiskError::Io);
        }
        if self.device.write_blocks(sector, count, buf) > 0 {
            Ok(())
        } else {
            Err(DiskError::Io)
        }
    }

    pub fn disk_ioctl(&self, drive: u8, cmd: IoctlCmd) -> Result<u32, DiskError> {
        check_drive(drive)?;
        Ok(match cmd {
            IoctlCmd::Sync => 0,
            IoctlCmd::SectorCount => self.device.num_sectors(),
            IoctlCmd::SectorSize => SECTOR_SIZE as u32,
            IoctlCmd::BlockSize => 1,
        })
    }

    pub fn device(&self) -> Arc<D> {
        Arc::clone(&self.device)
    }

    pub(crate) fn read_sector(&self, sector: u32, buf: &mut [u8; SECTOR_SIZE]) -> Result<(), FsError> {
        self.disk_read(DRIVE, buf.as_mut_slice(), sector, 1)?;
        Ok(())
    }

    pub(crate) fn write_sector(&self, sector: u32, buf: &[u8; SECTOR_SIZE]) -> Result<(), FsError> {
        self.disk_write(DRIVE, buf.as_slice(), sector, 1)?;
        Ok(())
    }
}

/// Current time in packed FAT format. There is no RTC, so this is always 1999-09-09 00:00:00.
pub fn fat_time() -> u32 {
    FIXED_FAT_TIME
}

/// Splits a packed FAT timestamp into (year, month, day, hour, minute, second).
pub fn unpack_fat_time(t: u32) -> (u32, u32, u32, u32, u32, u32) {
    (
        1980 + (t >> 25),
        (t >> 21) & 0x0F,
        (t >> 16) & 0x1F,
        (t >> 11) & 0x1F,
        (t >> 5) & 0x3F,
        (t & 0x1F) * 2,
    )
}
