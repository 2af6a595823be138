//! Management of the cluster bitmap and the inode bitmap.
//! The cluster bitmap tracks which data clusters hold file or directory contents.
//! The inode bitmap tracks which inode table slots are live.

use crate::config::*;
use crate::disk::Disk;
use crate::error::{FsError, Result};
use crate::structs::SuperBlock;
use crate::superblock::write_superblock;
use crate::BlockDevice;

const BITS_PER_SECTOR: u32 = SECTOR_SIZE as u32 * 8;

/// Sets the first clear bit in the bitmap.
/// Returns the item ID of the bit that was set.
fn set_first_clear_bit<D: BlockDevice>(
    disk: &Disk<D>,
    bitmap_start: u32,
    bitmap_sectors: u32,
    total_items: u32,
) -> Result<u32> {
    let mut buf = [0u8; SECTOR_SIZE];

    for i in 0..bitmap_sectors {
        let sector = bitmap_start + i;
        disk.read_sector(sector, &mut buf)?;

        for j in 0..SECTOR_SIZE {
            if buf[j] == 0xFF {
                continue;
            }
            for k in 0..8 {
                let item_id = i * BITS_PER_SECTOR + j as u32 * 8 + k;
                if item_id >= total_items {
                    return Err(FsError::OutOfSpace);
                }
                if buf[j] & (1 << k) == 0 {
                    buf[j] |= 1 << k;
                    disk.write_sector(sector, &buf)?;
                    return Ok(item_id);
                }
            }
        }
    }

    Err(FsError::OutOfSpace)
}

/// Sets or clears a specific bit. Returns the previous value of the bit.
fn set_bit_at<D: BlockDevice>(
    disk: &Disk<D>,
    bitmap_start: u32,
    bitmap_sectors: u32,
    item_id: u32,
    total_items: u32,
    value: bool,
) -> Result<bool> {
    if item_id >= total_items {
        return Err(FsError::OutOfBounds);
    }

    let sector_index = item_id / BITS_PER_SECTOR;
    let byte_offset = ((item_id % BITS_PER_SECTOR) / 8) as usize;
    let bit_offset = item_id % 8;
    if sector_index >= bitmap_sectors {
        return Err(FsError::OutOfBounds);
    }

    let sector = bitmap_start + sector_index;
    let mut buf = [0u8; SECTOR_SIZE];
    disk.read_sector(sector, &mut buf)?;
    let prev = buf[byte_offset] & (1 << bit_offset) != 0;
    if value {
        buf[byte_offset] |= 1 << bit_offset;
    } else {
        buf[byte_offset] &= !(1 << bit_offset);
    }
    disk.write_sector(sector, &buf)?;

    Ok(prev)
}

/// Allocates a data cluster and zero-fills it.
/// Returns the first sector of the cluster, which is what inodes store.
pub fn alloc_cluster<D: BlockDevice>(disk: &Disk<D>, superblock: &mut SuperBlock) -> Result<u32> {
    if superblock.free_clusters == 0 {
        return Err(FsError::OutOfSpace);
    }
    let cluster = set_first_clear_bit(
        disk,
        superblock.cluster_bitmap_start,
        superblock.cluster_bitmap_sectors,
        superblock.num_clusters,
    )?;
    superblock.free_clusters -= 1;
    write_superblock(disk, superblock)?;

    let first_sector = superblock.cluster_to_sector(cluster);
    let zero = [0u8; SECTOR_SIZE];
    for sector in first_sector..first_sector + superblock.sectors_per_cluster {
        disk.write_sector(sector, &zero)?;
    }
    log::trace!("alloc cluster {} (sector {})", cluster, first_sector);

    Ok(first_sector)
}

/// Releases the cluster starting at `first_sector`.
pub fn free_cluster<D: BlockDevice>(disk: &Disk<D>, superblock: &mut SuperBlock, first_sector: u32) -> Result<()> {
    let cluster = superblock.sector_to_cluster(first_sector)?;
    let was_set = set_bit_at(
        disk,
        superblock.cluster_bitmap_start,
        superblock.cluster_bitmap_sectors,
        cluster,
        superblock.num_clusters,
        false,
    )?;
    if was_set {
        superblock.free_clusters += 1;
        write_superblock(disk, superblock)?;
    }
    log::trace!("free cluster {} (sector {})", cluster, first_sector);
    Ok(())
}

pub fn alloc_inode_id<D: BlockDevice>(disk: &Disk<D>, superblock: &mut SuperBlock) -> Result<u32> {
    if superblock.free_inodes == 0 {
        return Err(FsError::OutOfInodes);
    }
    let inode_id = set_first_clear_bit(
        disk,
        superblock.inode_bitmap_start,
        superblock.inode_bitmap_sectors,
        superblock.num_inodes,
    )
    .map_err(|e| if e == FsError::OutOfSpace { FsError::OutOfInodes } else { e })?;
    superblock.free_inodes -= 1;
    write_superblock(disk, superblock)?;
    Ok(inode_id)
}

pub fn free_inode_id<D: BlockDevice>(disk: &Disk<D>, superblock: &mut SuperBlock, inode_id: u32) -> Result<()> {
    let was_set = set_bit_at(
        disk,
        superblock.inode_bitmap_start,
        superblock.inode_bitmap_sectors,
        inode_id,
        superblock.num_inodes,
        false,
    )?;
    if was_set {
        superblock.free_inodes += 1;
        write_superblock(disk, superblock)?;
    }
    Ok(())
}

/// Marks an inode id as used without going through first-fit. Used by format
/// for the reserved inode and the root directory.
pub fn reserve_inode_id<D: BlockDevice>(disk: &Disk<D>, superblock: &mut SuperBlock, inode_id: u32) -> Result<()> {
    let was_set = set_bit_at(
        disk,
        superblock.inode_bitmap_start,
        superblock.inode_bitmap_sectors,
        inode_id,
        superblock.num_inodes,
        true,
    )?;
    if !was_set {
        superblock.free_inodes -= 1;
        write_superblock(disk, superblock)?;
    }
    Ok(())
}
