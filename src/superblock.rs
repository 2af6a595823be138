use crate::config::*;
use crate::disk::Disk;
use crate::error::{FsError, Result};
use crate::structs::SuperBlock;
use crate::BlockDevice;

pub fn read_superblock<D: BlockDevice>(disk: &Disk<D>) -> Result<SuperBlock> {
    let mut buf = [0u8; SECTOR_SIZE];
    disk.read_sector(SUPERBLOCK_SECTOR, &mut buf)?;
    let superblock: SuperBlock = unsafe {
        core::ptr::read_unaligned(buf.as_ptr() as *const SuperBlock)
    };

    if superblock.magic != MAGIC || superblock.sector_size != SECTOR_SIZE as u32 {
        return Err(FsError::InvalidSuperBlock);
    }
    if superblock.sectors_per_cluster == 0
        || superblock.root_inode != ROOT_INODE_ID
        || superblock.data_start >= superblock.num_sectors
    {
        return Err(FsError::InvalidSuperBlock);
    }

    Ok(superblock)
}

pub fn write_superblock<D: BlockDevice>(disk: &Disk<D>, superblock: &SuperBlock) -> Result<()> {
    let mut buf = [0u8; SECTOR_SIZE];
    unsafe {
        core::ptr::write_unaligned(buf.as_mut_ptr() as *mut SuperBlock, *superblock);
    }
    disk.write_sector(SUPERBLOCK_SECTOR, &buf)
}

fn sectors_for_bits(bits: u32) -> u32 {
    bits.div_ceil(SECTOR_SIZE as u32 * 8)
}

/// Computes the layout of a fresh volume:
/// superblock | cluster bitmap | inode bitmap | inode table | data clusters.
pub fn layout(options: &crate::FormatOptions) -> Result<SuperBlock> {
    let spc = options.sectors_per_cluster;
    // Inode 0 is reserved and inode 1 is the root, so at least one more is needed to be useful.
    if spc == 0 || options.num_inodes < 3 {
        return Err(FsError::InvalidGeometry);
    }

    let inode_bitmap_sectors = sectors_for_bits(options.num_inodes);
    let inode_table_sectors = options.num_inodes.div_ceil(INODES_PER_SECTOR as u32);
    let fixed = 1 + inode_bitmap_sectors + inode_table_sectors;
    let remaining = options
        .num_sectors
        .checked_sub(fixed)
        .ok_or(FsError::InvalidGeometry)?;

    // The bitmap eats into the data region, so size it for the upper bound first.
    let cluster_bitmap_sectors = sectors_for_bits(remaining / spc).max(1);
    let data_sectors = remaining
        .checked_sub(cluster_bitmap_sectors)
        .ok_or(FsError::InvalidGeometry)?;
    let num_clusters = data_sectors / spc;
    if num_clusters == 0 {
        return Err(FsError::InvalidGeometry);
    }

    let cluster_bitmap_start = SUPERBLOCK_SECTOR + 1;
    let inode_bitmap_start = cluster_bitmap_start + cluster_bitmap_sectors;
    let inode_table_start = inode_bitmap_start + inode_bitmap_sectors;
    let data_start = inode_table_start + inode_table_sectors;

    Ok(SuperBlock {
        magic: MAGIC,
        num_sectors: options.num_sectors,
        sector_size: SECTOR_SIZE as u32,
        sectors_per_cluster: spc,
        num_clusters,
        free_clusters: num_clusters,
        num_inodes: options.num_inodes,
        free_inodes: options.num_inodes,
        root_inode: ROOT_INODE_ID,
        cluster_bitmap_start,
        cluster_bitmap_sectors,
        inode_bitmap_start,
        inode_bitmap_sectors,
        inode_table_start,
        inode_table_sectors,
        data_start,
    })
}

/// Zeroes every metadata sector and writes the superblock.
/// The root directory is created by the caller.
pub fn format_fs<D: BlockDevice>(disk: &Disk<D>, options: &crate::FormatOptions) -> Result<SuperBlock> {
    if options.num_sectors > disk.device().num_sectors() {
        return Err(FsError::InvalidGeometry);
    }
    let superblock = layout(options)?;
    let zero = [0u8; SECTOR_SIZE];
    for sector in superblock.cluster_bitmap_start..superblock.data_start {
        disk.write_sector(sector, &zero)?;
    }
    write_superblock(disk, &superblock)?;
    log::debug!(
        "format: {} sectors, {} clusters of {} bytes, {} inodes, data at sector {}",
        superblock.num_sectors,
        superblock.num_clusters,
        superblock.bytes_per_cluster(),
        superblock.num_inodes,
        superblock.data_start
    );
    Ok(superblock)
}
