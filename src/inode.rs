//! Management of reading and writing to inodes, and of their cluster maps.

use crate::bitmap::*;
use crate::config::*;
use crate::disk::Disk;
use crate::error::{FsError, Result};
use crate::structs::{FileType, Inode, SuperBlock};
use crate::BlockDevice;

fn inode_location(superblock: &SuperBlock, inode_id: u32) -> Result<(u32, usize)> {
    if inode_id == RESERVED_INODE_ID || inode_id >= superblock.num_inodes {
        return Err(FsError::OutOfBounds);
    }
    let sector = superblock.inode_table_start + inode_id / INODES_PER_SECTOR as u32;
    let offset = (inode_id as usize % INODES_PER_SECTOR) * INODE_SIZE;
    Ok((sector, offset))
}

pub fn get_inode<D: BlockDevice>(disk: &Disk<D>, superblock: &SuperBlock, inode_id: u32) -> Result<Inode> {
    let (sector, offset) = inode_location(superblock, inode_id)?;
    let mut buf = [0u8; SECTOR_SIZE];
    disk.read_sector(sector, &mut buf)?;

    let inode: Inode = unsafe {
        core::ptr::read_unaligned(buf.as_ptr().add(offset) as *const Inode)
    };
    Ok(inode)
}

pub fn write_inode<D: BlockDevice>(disk: &Disk<D>, superblock: &SuperBlock, inode: &Inode) -> Result<()> {
    let (sector, offset) = inode_location(superblock, inode.id)?;
    let mut buf = [0u8; SECTOR_SIZE];
    disk.read_sector(sector, &mut buf)?;
    unsafe {
        core::ptr::write_unaligned(buf.as_mut_ptr().add(offset) as *mut Inode, *inode);
    }
    disk.write_sector(sector, &buf)
}

/// Allocates an inode id and writes a fresh inode of the given type into the table.
pub fn alloc_inode<D: BlockDevice>(
    disk: &Disk<D>,
    superblock: &mut SuperBlock,
    ftype: FileType,
    mtime: u32,
) -> Result<Inode> {
    let inode_id = alloc_inode_id(disk, superblock)?;
    let previous = get_inode(disk, superblock, inode_id)?;
    let mut inode = Inode::new(inode_id, ftype, mtime);
    inode.generation = previous.generation.wrapping_add(1);
    write_inode(disk, superblock, &inode)?;
    log::trace!("alloc inode {} gen {} ({:?})", inode_id, inode.generation, ftype);
    Ok(inode)
}

/// Releases every cluster of the inode and then the inode itself.
pub fn free_inode<D: BlockDevice>(disk: &Disk<D>, superblock: &mut SuperBlock, inode: &mut Inode) -> Result<()> {
    truncate(disk, superblock, inode)?;
    inode.ftype = FileType::Free as u8;
    inode.links_cnt = 0;
    write_inode(disk, superblock, inode)?;
    free_inode_id(disk, superblock, inode.id)?;
    log::trace!("free inode {}", inode.id);
    Ok(())
}

fn read_ptr(sector_buf: &[u8; SECTOR_SIZE], index: usize) -> u32 {
    let at = index * 4;
    u32::from_le_bytes([sector_buf[at], sector_buf[at + 1], sector_buf[at + 2], sector_buf[at + 3]])
}

fn write_ptr(sector_buf: &mut [u8; SECTOR_SIZE], index: usize, value: u32) {
    let at = index * 4;
    sector_buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

/// Maps the `cluster_index`-th cluster of a file to the first sector of its data cluster.
/// Returns `None` for a hole when `create` is false. With `create`, missing clusters
/// (and the indirect cluster) are allocated; the caller must persist the inode afterwards.
pub fn cmap<D: BlockDevice>(
    disk: &Disk<D>,
    superblock: &mut SuperBlock,
    inode: &mut Inode,
    cluster_index: usize,
    create: bool,
) -> Result<Option<u32>> {
    // Direct clusters
    if cluster_index < NUM_DIRECT_PTRS {
        let sector = inode.direct_ptrs[cluster_index];
        if sector != 0 {
            return Ok(Some(sector));
        }
        if !create {
            return Ok(None);
        }
        let sector = alloc_cluster(disk, superblock)?;
        inode.direct_ptrs[cluster_index] = sector;
        inode.clusters += 1;
        return Ok(Some(sector));
    }

    // Indirect clusters
    let indirect_index = cluster_index - NUM_DIRECT_PTRS;
    if indirect_index >= PTRS_PER_SECTOR {
        return Err(FsError::FileTooLarge);
    }

    if inode.indirect_ptr == 0 {
        if !create {
            return Ok(None);
        }
        // Freshly allocated clusters are zeroed, so every pointer starts out as a hole.
        inode.indirect_ptr = alloc_cluster(disk, superblock)?;
        inode.clusters += 1;
    }

    let mut ptrs = [0u8; SECTOR_SIZE];
    disk.read_sector(inode.indirect_ptr, &mut ptrs)?;
    let sector = read_ptr(&ptrs, indirect_index);
    if sector != 0 {
        return Ok(Some(sector));
    }
    if !create {
        return Ok(None);
    }
    let sector = alloc_cluster(disk, superblock)?;
    write_ptr(&mut ptrs, indirect_index, sector);
    disk.write_sector(inode.indirect_ptr, &ptrs)?;
    inode.clusters += 1;
    Ok(Some(sector))
}

/// Frees every data cluster of the inode and resets its size to zero.
/// The caller must persist the inode afterwards.
pub fn truncate<D: BlockDevice>(disk: &Disk<D>, superblock: &mut SuperBlock, inode: &mut Inode) -> Result<()> {
    for ptr in inode.direct_ptrs.iter_mut() {
        if *ptr != 0 {
            free_cluster(disk, superblock, *ptr)?;
            *ptr = 0;
        }
    }

    if inode.indirect_ptr != 0 {
        let mut ptrs = [0u8; SECTOR_SIZE];
        disk.read_sector(inode.indirect_ptr, &mut ptrs)?;
        for i in 0..PTRS_PER_SECTOR {
            let sector = read_ptr(&ptrs, i);
            if sector != 0 {
                free_cluster(disk, superblock, sector)?;
            }
        }
        free_cluster(disk, superblock, inode.indirect_ptr)?;
        inode.indirect_ptr = 0;
    }

    inode.clusters = 0;
    inode.size = 0;
    Ok(())
}
