//! Path resolution and manipulation utilities.
//! Paths are absolute or relative to the root, which is the same thing here: there is no cwd.

use crate::config::*;
use crate::directory::dir_lookup;
use crate::disk::Disk;
use crate::error::{FsError, Result};
use crate::inode::get_inode;
use crate::structs::SuperBlock;
use crate::BlockDevice;

/// Splits a path into its parent directory and final component.
/// `"/a/b/c"` gives `("/a/b", "c")`, `"c"` gives `("/", "c")`. Trailing slashes are ignored.
pub fn split(path: &str) -> (&str, &str) {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) => ("/", &trimmed[1..]),
        Some(i) => (&trimmed[..i], &trimmed[i + 1..]),
        None => ("/", trimmed),
    }
}

/// Resolves a path to an inode id, walking from the root directory.
/// Empty components (`//`) are skipped; `.` and `..` go through the directory entries.
pub fn resolve<D: BlockDevice>(disk: &Disk<D>, superblock: &mut SuperBlock, path: &str) -> Result<u32> {
    if path.is_empty() {
        return Err(FsError::InvalidPath);
    }

    let mut current_id = ROOT_INODE_ID;
    for component in path.split('/').filter(|s| !s.is_empty()) {
        let current = get_inode(disk, superblock, current_id)?;
        if !current.is_dir() {
            return Err(FsError::NotDirectory);
        }
        current_id = dir_lookup(disk, superblock, &current, component.as_bytes())?;
    }
    log::trace!("resolve {} -> inode {}", path, current_id);

    Ok(current_id)
}
