//! Directory contents: a flat array of fixed-size entries stored like file data.
//! A slot whose inode id is 0 is free. Directories never shrink.

use crate::config::*;
use crate::disk::{fat_time, Disk};
use crate::error::{FsError, Result};
use crate::file::{read_at, write_at};
use crate::inode::{alloc_inode, write_inode};
use crate::structs::*;
use crate::BlockDevice;

pub fn trim_zero(name: &[u8]) -> &[u8] {
    let mut end = name.len();
    while end > 0 && name[end - 1] == 0 {
        end -= 1;
    }
    &name[..end]
}

fn name_cmp(n1: &[u8], n2: &[u8]) -> bool {
    trim_zero(n1) == trim_zero(n2)
}

pub fn is_dot_or_dotdot(name: &[u8]) -> bool {
    name_cmp(name, DOT_NAME) || name_cmp(name, DOTDOT_NAME)
}

impl DirEntry {
    pub fn is_empty(&self) -> bool {
        self.inode_id == 0
    }

    pub fn name_eq(&self, name: &[u8]) -> bool {
        name_cmp(&self.name, name)
    }
}

fn num_slots(dir: &Inode) -> usize {
    (dir.size / DIR_ENTRY_SIZE as u64) as usize
}

fn read_entry<D: BlockDevice>(
    disk: &Disk<D>,
    superblock: &mut SuperBlock,
    dir: &Inode,
    index: usize,
) -> Result<DirEntry> {
    let mut raw = [0u8; DIR_ENTRY_SIZE];
    let n = read_at(disk, superblock, dir, (index * DIR_ENTRY_SIZE) as u64, &mut raw)?;
    if n != DIR_ENTRY_SIZE {
        return Err(FsError::OutOfBounds);
    }
    Ok(unsafe { core::ptr::read_unaligned(raw.as_ptr() as *const DirEntry) })
}

fn write_entry<D: BlockDevice>(
    disk: &Disk<D>,
    superblock: &mut SuperBlock,
    dir: &mut Inode,
    index: usize,
    entry: &DirEntry,
) -> Result<()> {
    let mut raw = [0u8; DIR_ENTRY_SIZE];
    unsafe {
        core::ptr::write_unaligned(raw.as_mut_ptr() as *mut DirEntry, *entry);
    }
    let n = write_at(disk, superblock, dir, (index * DIR_ENTRY_SIZE) as u64, &raw)?;
    if n != DIR_ENTRY_SIZE {
        return Err(FsError::OutOfSpace);
    }
    Ok(())
}

/// Finds the slot holding `name`. Returns the slot index and the entry.
fn dir_find<D: BlockDevice>(
    disk: &Disk<D>,
    superblock: &mut SuperBlock,
    dir: &Inode,
    name: &[u8],
) -> Result<Option<(usize, DirEntry)>> {
    if !dir.is_dir() {
        return Err(FsError::NotDirectory);
    }
    for index in 0..num_slots(dir) {
        let entry = read_entry(disk, superblock, dir, index)?;
        if !entry.is_empty() && entry.name_eq(name) {
            return Ok(Some((index, entry)));
        }
    }
    Ok(None)
}

/// Query inode id of a file by name in the parent directory inode.
pub fn dir_lookup<D: BlockDevice>(
    disk: &Disk<D>,
    superblock: &mut SuperBlock,
    dir: &Inode,
    name: &[u8],
) -> Result<u32> {
    if name.len() > MAX_FILE_NAME_LEN {
        return Err(FsError::InvalidFileName);
    }
    match dir_find(disk, superblock, dir, name)? {
        Some((_, entry)) => {
            log::trace!("lookup {:?} -> inode {}", core::str::from_utf8(name), entry.inode_id);
            Ok(entry.inode_id)
        }
        None => Err(FsError::NotFound),
    }
}

/// Add a new directory entry, reusing the first free slot or appending one.
/// Does not touch the child's link count, which is the caller's responsibility.
pub fn dir_add_entry<D: BlockDevice>(
    disk: &Disk<D>,
    superblock: &mut SuperBlock,
    dir: &mut Inode,
    child: &DirEntry,
) -> Result<()> {
    if dir_find(disk, superblock, dir, &child.name)?.is_some() {
        return Err(FsError::AlreadyExists);
    }

    let slots = num_slots(dir);
    let mut target = slots;
    for index in 0..slots {
        if read_entry(disk, superblock, dir, index)?.is_empty() {
            target = index;
            break;
        }
    }
    write_entry(disk, superblock, dir, target, child)
}

/// Remove a directory entry by name. Does not reclaim the child inode.
/// Returns the inode id the entry pointed to.
pub fn dir_rm_entry<D: BlockDevice>(
    disk: &Disk<D>,
    superblock: &mut SuperBlock,
    dir: &mut Inode,
    name: &[u8],
) -> Result<u32> {
    if name.is_empty() || name.len() > MAX_FILE_NAME_LEN || is_dot_or_dotdot(name) {
        return Err(FsError::InvalidFileName);
    }
    let (index, entry) = dir_find(disk, superblock, dir, name)?.ok_or(FsError::NotFound)?;
    write_entry(disk, superblock, dir, index, &DirEntry::NULL)?;
    Ok(entry.inode_id)
}

/// Renames an entry in place. Fails with `AlreadyExists` if `entry`'s name is taken.
pub fn dir_rename_entry<D: BlockDevice>(
    disk: &Disk<D>,
    superblock: &mut SuperBlock,
    dir: &mut Inode,
    old_name: &[u8],
    entry: &DirEntry,
) -> Result<()> {
    if is_dot_or_dotdot(old_name) {
        return Err(FsError::InvalidFileName);
    }
    if dir_find(disk, superblock, dir, &entry.name)?.is_some() {
        return Err(FsError::AlreadyExists);
    }
    let (index, _) = dir_find(disk, superblock, dir, old_name)?.ok_or(FsError::NotFound)?;
    write_entry(disk, superblock, dir, index, entry)
}

/// Points an existing entry at a different inode. Used to fix up `..` after a move.
pub fn dir_repoint_entry<D: BlockDevice>(
    disk: &Disk<D>,
    superblock: &mut SuperBlock,
    dir: &mut Inode,
    name: &[u8],
    inode_id: u32,
) -> Result<()> {
    let (index, mut entry) = dir_find(disk, superblock, dir, name)?.ok_or(FsError::NotFound)?;
    entry.inode_id = inode_id;
    write_entry(disk, superblock, dir, index, &entry)
}

/// True if the directory holds nothing but `.` and `..`.
pub fn dir_is_empty<D: BlockDevice>(
    disk: &Disk<D>,
    superblock: &mut SuperBlock,
    dir: &Inode,
) -> Result<bool> {
    if !dir.is_dir() {
        return Err(FsError::NotDirectory);
    }
    for index in 0..num_slots(dir) {
        let entry = read_entry(disk, superblock, dir, index)?;
        if !entry.is_empty() && !is_dot_or_dotdot(&entry.name) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Writes the `.` and `..` entries of a new directory.
pub fn init_dir<D: BlockDevice>(
    disk: &Disk<D>,
    superblock: &mut SuperBlock,
    dir: &mut Inode,
    parent_id: u32,
) -> Result<()> {
    write_entry(disk, superblock, dir, 0, &DirEntry::new(dir.id, DOT_NAME)?)?;
    write_entry(disk, superblock, dir, 1, &DirEntry::new(parent_id, DOTDOT_NAME)?)?;
    Ok(())
}

/// Create a new directory named `dir_name` inside `parent`.
/// Returns the inode id of the new directory.
pub fn mkdir<D: BlockDevice>(
    disk: &Disk<D>,
    superblock: &mut SuperBlock,
    parent: &mut Inode,
    dir_name: &[u8],
) -> Result<u32> {
    if !parent.is_dir() {
        return Err(FsError::NotDirectory);
    }
    if is_dot_or_dotdot(dir_name) {
        return Err(FsError::InvalidFileName);
    }
    let entry_template = DirEntry::new(0, dir_name)?;
    if dir_find(disk, superblock, parent, dir_name)?.is_some() {
        return Err(FsError::AlreadyExists);
    }

    let mut dir = alloc_inode(disk, superblock, FileType::Directory, fat_time())?;
    dir.links_cnt = 2; // Entry in the parent plus its own '.'
    init_dir(disk, superblock, &mut dir, parent.id)?;

    dir_add_entry(disk, superblock, parent, &DirEntry { inode_id: dir.id, ..entry_template })?;
    parent.links_cnt += 1; // The child's '..'
    write_inode(disk, superblock, parent)?;

    Ok(dir.id)
}
