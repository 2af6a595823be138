//! On-disk records. Every field is a plain integer or byte array, so any bit pattern
//! read back from the medium is a valid value.

use crate::config::*;
use crate::error::{FsError, Result};

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SuperBlock {
    pub magic: u32,
    pub num_sectors: u32,
    pub sector_size: u32,
    pub sectors_per_cluster: u32,
    pub num_clusters: u32,   // Clusters in the data region
    pub free_clusters: u32,
    pub num_inodes: u32,
    pub free_inodes: u32,
    pub root_inode: u32,

    pub cluster_bitmap_start: u32,
    pub cluster_bitmap_sectors: u32,
    pub inode_bitmap_start: u32,
    pub inode_bitmap_sectors: u32,
    pub inode_table_start: u32,
    pub inode_table_sectors: u32,
    pub data_start: u32, // First sector of cluster 0
}

impl SuperBlock {
    pub fn bytes_per_cluster(&self) -> u64 {
        self.sector_size as u64 * self.sectors_per_cluster as u64
    }

    /// First sector of the given data cluster.
    pub fn cluster_to_sector(&self, cluster: u32) -> u32 {
        self.data_start + cluster * self.sectors_per_cluster
    }

    /// Inverse of `cluster_to_sector`; fails for sectors that do not start a cluster.
    pub fn sector_to_cluster(&self, sector: u32) -> Result<u32> {
        if sector < self.data_start || (sector - self.data_start) % self.sectors_per_cluster != 0 {
            return Err(FsError::OutOfBounds);
        }
        let cluster = (sector - self.data_start) / self.sectors_per_cluster;
        if cluster >= self.num_clusters {
            return Err(FsError::OutOfBounds);
        }
        Ok(cluster)
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Free = 0,
    Regular = 1,
    Directory = 2,
}

impl FileType {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            1 => FileType::Regular,
            2 => FileType::Directory,
            _ => FileType::Free,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Inode {
    pub id: u32,
    pub ftype: u8,
    pub _pad: [u8; 3],
    pub links_cnt: u32,
    pub clusters: u32, // Allocated data clusters, indirect cluster included
    pub size: u64,
    pub mtime: u32,    // Packed FAT timestamp
    /// First sector of the indirect cluster, 0 if none.
    pub indirect_ptr: u32,
    /// First sector of each direct cluster, 0 if unallocated.
    pub direct_ptrs: [u32; NUM_DIRECT_PTRS],
    /// Bumped every time the slot is handed out again, so stale `File`s can tell.
    pub generation: u32,
    pub reserved: [u8; 44],
}

const _: () = assert!(core::mem::size_of::<Inode>() == INODE_SIZE);
const _: () = assert!(core::mem::size_of::<DirEntry>() == DIR_ENTRY_SIZE);
const _: () = assert!(core::mem::size_of::<SuperBlock>() <= SECTOR_SIZE);

impl Inode {
    pub fn new(id: u32, ftype: FileType, mtime: u32) -> Self {
        Self {
            id,
            ftype: ftype as u8,
            _pad: [0; 3],
            links_cnt: 1,
            clusters: 0,
            size: 0,
            mtime,
            indirect_ptr: 0,
            direct_ptrs: [0; NUM_DIRECT_PTRS],
            generation: 0,
            reserved: [0; 44],
        }
    }

    pub fn file_type(&self) -> FileType {
        FileType::from_raw(self.ftype)
    }

    pub fn is_dir(&self) -> bool {
        self.file_type() == FileType::Directory
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct DirEntry {
    pub inode_id: u32,
    pub name: [u8; MAX_FILE_NAME_LEN],
}

impl DirEntry {
    pub const NULL: Self = Self {
        inode_id: 0,
        name: [0; MAX_FILE_NAME_LEN],
    };

    pub fn new(inode_id: u32, name: &[u8]) -> Result<Self> {
        if name.is_empty() || name.len() > MAX_FILE_NAME_LEN || name.contains(&b'/') || name.contains(&0) {
            return Err(FsError::InvalidFileName);
        }
        let mut arr = [0; MAX_FILE_NAME_LEN];
        arr[..name.len()].copy_from_slice(name);
        Ok(Self { inode_id, name: arr })
    }
}

/// Metadata returned by `FileSystem::stat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    pub inode_id: u32,
    pub ftype: FileType,
    pub size: u64,
    pub mtime: u32,
}
