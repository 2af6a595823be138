use bitflags::bitflags;

bitflags! {
    /// Drive status bits, as reported by `init` and `status`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DiskStatus: u8 {
        /// Drive has not been initialized.
        const NOINIT = 0x01;
        /// No medium in the drive.
        const NODISK = 0x02;
        /// Medium is write protected.
        const PROTECT = 0x04;
    }
}

impl DiskStatus {
    pub fn is_ready(self) -> bool {
        !self.intersects(DiskStatus::NOINIT | DiskStatus::NODISK)
    }
}

/// The storage medium underneath the filesystem, typically the SD card.
/// Implementations own no file semantics; they move whole sectors.
pub trait BlockDevice: Send + Sync {
    /// Brings the medium up. Called once per mount.
    fn init(&self) -> DiskStatus;

    fn status(&self) -> DiskStatus;

    /// Number of addressable sectors on the medium.
    fn num_sectors(&self) -> u32;

    /// Reads `count` sectors starting at `sector` into `buf`.
    /// `buf.len()` must be `count * SECTOR_SIZE`.
    /// Returns the number of sectors transferred; zero means failure.
    fn read_blocks(&self, sector: u32, count: u32, buf: &mut [u8]) -> u32;

    /// Writes `count` sectors starting at `sector` from `buf`.
    /// Returns the number of sectors transferred; zero means failure.
    fn write_blocks(&self, sector: u32, count: u32, buf: &[u8]) -> u32;
}
