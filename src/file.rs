//! Open file objects and byte-granular access to inode contents.

use crate::config::*;
use crate::disk::{fat_time, Disk};
use crate::error::{FsError, Result};
use crate::inode::{cmap, write_inode};
use crate::structs::{FileType, Inode, SuperBlock};
use crate::BlockDevice;

/// An open file. Holds the byte offset and the index of the cluster that offset falls in.
/// Created by `FileSystem::open` and dead after a successful `FileSystem::close`;
/// any further use of a closed file fails with `FsError::Closed`.
#[derive(Debug)]
pub struct File {
    pub(crate) inode_id: u32,
    pub(crate) generation: u32,
    pub(crate) readable: bool,
    pub(crate) writable: bool,
    pub(crate) pos: u64,
    pub(crate) cluster: u32,
    pub(crate) size: u64,
    pub(crate) closed: bool,
}

impl File {
    pub(crate) fn new(inode: &Inode, readable: bool, writable: bool, pos: u64, bytes_per_cluster: u64) -> Self {
        Self {
            inode_id: inode.id,
            generation: inode.generation,
            readable,
            writable,
            pos,
            cluster: (pos / bytes_per_cluster) as u32,
            size: inode.size,
            closed: false,
        }
    }

    pub fn inode_id(&self) -> u32 {
        self.inode_id
    }

    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Index, within the file's cluster chain, of the cluster the position falls in.
    pub fn cluster(&self) -> u32 {
        self.cluster
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_readable(&self) -> bool {
        self.readable
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn rewind_cluster(&mut self) {
        self.cluster = 0;
    }

    pub fn advance_cluster(&mut self) {
        self.cluster += 1;
    }

    pub(crate) fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(FsError::Closed);
        }
        Ok(())
    }

    /// False once the inode was unlinked, even if its slot now holds another file.
    pub(crate) fn refers_to(&self, inode: &Inode) -> bool {
        inode.file_type() != FileType::Free && inode.generation == self.generation
    }
}

/// Reads inode contents starting at `offset`.
/// Returns the number of bytes read, short at end of file and zero at or past it.
/// Unallocated clusters inside the file read as zeros.
pub fn read_at<D: BlockDevice>(
    disk: &Disk<D>,
    superblock: &mut SuperBlock,
    inode: &Inode,
    offset: u64,
    buffer: &mut [u8],
) -> Result<usize> {
    if offset >= inode.size {
        return Ok(0);
    }
    let len = buffer.len().min((inode.size - offset) as usize);
    let bytes_per_cluster = superblock.bytes_per_cluster();
    let mut lookup = *inode;
    let mut sector_buf = [0u8; SECTOR_SIZE];
    let mut bytes_read = 0;

    while bytes_read < len {
        let current = offset + bytes_read as u64;
        let cluster_index = (current / bytes_per_cluster) as usize;
        let in_cluster = current % bytes_per_cluster;
        let sector_in_cluster = (in_cluster / SECTOR_SIZE as u64) as u32;
        let start = (in_cluster % SECTOR_SIZE as u64) as usize;
        let chunk = (SECTOR_SIZE - start).min(len - bytes_read);

        match cmap(disk, superblock, &mut lookup, cluster_index, false)? {
            Some(first_sector) => {
                disk.read_sector(first_sector + sector_in_cluster, &mut sector_buf)?;
                buffer[bytes_read..bytes_read + chunk].copy_from_slice(&sector_buf[start..start + chunk]);
            }
            None => buffer[bytes_read..bytes_read + chunk].fill(0),
        }
        bytes_read += chunk;
    }

    Ok(bytes_read)
}

/// Copies `data` into `sector` at byte `start`, reading the sector first unless it is overwritten whole.
fn write_chunk<D: BlockDevice>(
    disk: &Disk<D>,
    sector: u32,
    start: usize,
    data: &[u8],
    sector_buf: &mut [u8; SECTOR_SIZE],
) -> Result<()> {
    if data.len() < SECTOR_SIZE {
        disk.read_sector(sector, sector_buf)?;
    }
    sector_buf[start..start + data.len()].copy_from_slice(data);
    disk.write_sector(sector, sector_buf)
}

/// Writes `buffer` into the inode at `offset`, allocating clusters as needed,
/// and persists the inode. Extends the size when writing past the end.
/// A failure after some bytes went through returns the partial count; a failure
/// before that still persists any clusters already allocated, then returns the error.
pub fn write_at<D: BlockDevice>(
    disk: &Disk<D>,
    superblock: &mut SuperBlock,
    inode: &mut Inode,
    offset: u64,
    buffer: &[u8],
) -> Result<usize> {
    if buffer.is_empty() {
        return Ok(0);
    }

    let bytes_per_cluster = superblock.bytes_per_cluster();
    let clusters_before = inode.clusters;
    let mut sector_buf = [0u8; SECTOR_SIZE];
    let mut bytes_written = 0;
    let mut failure = None;

    while bytes_written < buffer.len() {
        let current = offset + bytes_written as u64;
        let cluster_index = (current / bytes_per_cluster) as usize;
        let in_cluster = current % bytes_per_cluster;
        let sector_in_cluster = (in_cluster / SECTOR_SIZE as u64) as u32;
        let start = (in_cluster % SECTOR_SIZE as u64) as usize;
        let chunk = (SECTOR_SIZE - start).min(buffer.len() - bytes_written);

        let written = match cmap(disk, superblock, inode, cluster_index, true) {
            Ok(Some(first_sector)) => write_chunk(
                disk,
                first_sector + sector_in_cluster,
                start,
                &buffer[bytes_written..bytes_written + chunk],
                &mut sector_buf,
            ),
            Ok(None) => Err(FsError::OutOfBounds),
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            failure = Some(e);
            break;
        }
        bytes_written += chunk;
    }

    if let Some(e) = failure {
        if bytes_written == 0 {
            // Clusters allocated before the failure are already marked used
            if inode.clusters != clusters_before {
                write_inode(disk, superblock, inode)?;
            }
            return Err(e);
        }
    }

    let end = offset + bytes_written as u64;
    if end > inode.size {
        inode.size = end;
    }
    inode.mtime = fat_time();
    write_inode(disk, superblock, inode)?;

    Ok(bytes_written)
}
