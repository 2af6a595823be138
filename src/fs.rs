use alloc::sync::Arc;

use crate::bitmap::reserve_inode_id;
use crate::config::*;
use crate::directory::{
    dir_add_entry, dir_is_empty, dir_lookup, dir_rename_entry, dir_repoint_entry, dir_rm_entry, init_dir,
    is_dot_or_dotdot,
};
use crate::disk::{fat_time, Disk};
use crate::error::{FsError, Result};
use crate::file::{read_at, write_at, File};
use crate::inode::{alloc_inode, free_inode, get_inode, truncate, write_inode};
use crate::path::{resolve, split};
use crate::structs::*;
use crate::superblock::{format_fs, read_superblock};
use crate::BlockDevice;

/// What `open` does depending on whether the path already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Fail with `NotFound` if missing.
    OpenExisting,
    /// Fail with `AlreadyExists` if present.
    CreateNew,
    OpenOrCreate,
    /// Create if missing, truncate to zero if present.
    CreateAlways,
    /// Open or create, positioned at the end of the file.
    Append,
}

impl Disposition {
    fn creates(self) -> bool {
        self != Disposition::OpenExisting
    }
}

/// Access requested from `FileSystem::open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    pub read: bool,
    pub write: bool,
    pub disposition: Disposition,
}

impl Access {
    pub const fn new(read: bool, write: bool, disposition: Disposition) -> Self {
        Self { read, write, disposition }
    }
}

/// A mounted volume.
/// Methods operate on the instance directly; wrap it in a lock if it is shared.
pub struct FileSystem<D: BlockDevice> {
    disk: Disk<D>,
    superblock: SuperBlock,
}

fn init_disk<D: BlockDevice>(device: Arc<D>) -> Result<Disk<D>> {
    let mut disk = Disk::new(device);
    let status = disk.disk_initialize(DRIVE)?;
    if !status.is_ready() {
        log::debug!("disk not ready: {:?}", status);
        return Err(FsError::NotReady);
    }
    Ok(disk)
}

impl<D: BlockDevice> FileSystem<D> {
    /// Lays out a fresh volume and creates the root directory.
    pub fn format(device: Arc<D>, options: FormatOptions) -> Result<Self> {
        let disk = init_disk(device)?;
        let mut superblock = format_fs(&disk, &options)?;

        reserve_inode_id(&disk, &mut superblock, RESERVED_INODE_ID)?;
        reserve_inode_id(&disk, &mut superblock, ROOT_INODE_ID)?;
        let mut root = Inode::new(ROOT_INODE_ID, FileType::Directory, fat_time());
        root.links_cnt = 2; // '.' and '..' both point back at the root
        write_inode(&disk, &superblock, &root)?;
        init_dir(&disk, &mut superblock, &mut root, ROOT_INODE_ID)?;

        Ok(Self { disk, superblock })
    }

    pub fn mount(device: Arc<D>) -> Result<Self> {
        let disk = init_disk(device)?;
        let superblock = read_superblock(&disk)?;
        log::debug!(
            "mount: {} clusters ({} free), {} inodes ({} free)",
            superblock.num_clusters,
            superblock.free_clusters,
            superblock.num_inodes,
            superblock.free_inodes
        );
        Ok(Self { disk, superblock })
    }

    pub fn open(&mut self, path: &str, access: Access) -> Result<File> {
        let inode = match resolve(&self.disk, &mut self.superblock, path) {
            Ok(inode_id) => {
                if access.disposition == Disposition::CreateNew {
                    return Err(FsError::AlreadyExists);
                }
                let mut inode = get_inode(&self.disk, &self.superblock, inode_id)?;
                if inode.is_dir() {
                    return Err(FsError::IsDirectory);
                }
                if access.disposition == Disposition::CreateAlways && (inode.size > 0 || inode.clusters > 0) {
                    truncate(&self.disk, &mut self.superblock, &mut inode)?;
                    inode.mtime = fat_time();
                    write_inode(&self.disk, &self.superblock, &inode)?;
                }
                inode
            }
            Err(FsError::NotFound) if access.disposition.creates() => self.create_file(path)?,
            Err(e) => return Err(e),
        };

        let pos = if access.disposition == Disposition::Append { inode.size } else { 0 };
        let file = File::new(&inode, access.read, access.write, pos, self.bytes_per_cluster());
        log::debug!("open {} -> inode {} ({:?})", path, inode.id, access);
        Ok(file)
    }

    fn create_file(&mut self, path: &str) -> Result<Inode> {
        let (parent_path, file_name) = split(path);
        // Validate the name before anything is allocated
        let entry = DirEntry::new(0, file_name.as_bytes())?;
        let parent_id = resolve(&self.disk, &mut self.superblock, parent_path)?;
        let mut parent = get_inode(&self.disk, &self.superblock, parent_id)?;
        if !parent.is_dir() {
            return Err(FsError::NotDirectory);
        }

        let mut inode = alloc_inode(&self.disk, &mut self.superblock, FileType::Regular, fat_time())?;
        let added = dir_add_entry(
            &self.disk,
            &mut self.superblock,
            &mut parent,
            &DirEntry { inode_id: inode.id, ..entry },
        );
        if let Err(e) = added {
            free_inode(&self.disk, &mut self.superblock, &mut inode)?;
            return Err(e);
        }
        log::debug!("create {} in inode {} -> inode {}", file_name, parent_id, inode.id);
        Ok(inode)
    }

    /// Loads the inode behind an open file. Fails if the file was closed or its inode
    /// unlinked, including when the inode id has since been given to a new file.
    fn file_inode(&self, file: &File) -> Result<Inode> {
        file.ensure_open()?;
        let inode = get_inode(&self.disk, &self.superblock, file.inode_id)?;
        if !file.refers_to(&inode) {
            return Err(FsError::NotFound);
        }
        Ok(inode)
    }

    /// Syncs the file's inode to disk and marks the file closed.
    /// On failure the file stays open and `close` can be retried.
    pub fn close(&mut self, file: &mut File) -> Result<()> {
        file.ensure_open()?;
        match get_inode(&self.disk, &self.superblock, file.inode_id) {
            Ok(inode) if file.refers_to(&inode) => {
                write_inode(&self.disk, &self.superblock, &inode)?;
            }
            Ok(_) => {} // Unlinked while open, nothing left to sync
            Err(e) => return Err(e),
        }
        file.closed = true;
        log::debug!("close inode {}", file.inode_id);
        Ok(())
    }

    /// Reads from the current position and advances it by the bytes read.
    /// Returns 0 at end of file.
    pub fn read(&mut self, file: &mut File, buf: &mut [u8]) -> Result<usize> {
        let inode = self.file_inode(file)?;
        if !file.readable {
            return Err(FsError::AccessDenied);
        }
        let n = read_at(&self.disk, &mut self.superblock, &inode, file.pos, buf)?;
        self.advance(file, n, inode.size);
        Ok(n)
    }

    /// Writes at the current position and advances it by the bytes written.
    pub fn write(&mut self, file: &mut File, buf: &[u8]) -> Result<usize> {
        let mut inode = self.file_inode(file)?;
        if !file.writable {
            return Err(FsError::AccessDenied);
        }
        let n = write_at(&self.disk, &mut self.superblock, &mut inode, file.pos, buf)?;
        self.advance(file, n, inode.size);
        Ok(n)
    }

    fn advance(&self, file: &mut File, n: usize, size: u64) {
        file.pos += n as u64;
        file.cluster = (file.pos / self.bytes_per_cluster()) as u32;
        file.size = size;
    }

    /// Moves the file to byte position `pos`.
    ///
    /// The caller walks the file's cluster pointer to the cluster holding `pos` first
    /// (`File::rewind_cluster`, then `File::advance_cluster` once per whole cluster);
    /// a pointer that disagrees with `pos` fails with `InvalidSeek`.
    /// Read-only files clamp `pos` to their size. Returns the resulting position.
    pub fn seek(&mut self, file: &mut File, pos: u64) -> Result<u64> {
        let inode = self.file_inode(file)?;
        let bytes_per_cluster = self.bytes_per_cluster();
        if file.cluster as u64 != pos / bytes_per_cluster {
            return Err(FsError::InvalidSeek);
        }

        let target = if file.writable { pos } else { pos.min(inode.size) };
        if target > MAX_FILE_CLUSTERS as u64 * bytes_per_cluster {
            return Err(FsError::FileTooLarge);
        }
        file.pos = target;
        file.cluster = (target / bytes_per_cluster) as u32;
        file.size = inode.size;
        log::trace!("seek inode {} -> {}", inode.id, target);
        Ok(target)
    }

    /// Removes a file or an empty directory and releases its clusters.
    pub fn unlink(&mut self, path: &str) -> Result<()> {
        let (parent_path, name) = split(path);
        if name.is_empty() {
            return Err(FsError::InvalidPath);
        }
        let parent_id = resolve(&self.disk, &mut self.superblock, parent_path)?;
        let mut parent = get_inode(&self.disk, &self.superblock, parent_id)?;
        let child_id = dir_lookup(&self.disk, &mut self.superblock, &parent, name.as_bytes())?;
        let mut child = get_inode(&self.disk, &self.superblock, child_id)?;

        if child.is_dir() && !dir_is_empty(&self.disk, &mut self.superblock, &child)? {
            return Err(FsError::NotEmpty);
        }

        dir_rm_entry(&self.disk, &mut self.superblock, &mut parent, name.as_bytes())?;
        if child.is_dir() {
            parent.links_cnt -= 1; // The child's '..'
            write_inode(&self.disk, &self.superblock, &parent)?;
        }
        free_inode(&self.disk, &mut self.superblock, &mut child)?;
        log::debug!("unlink {} (inode {})", path, child_id);
        Ok(())
    }

    /// Moves an entry to a new path. The destination must not exist.
    /// A failed rename leaves both directories as they were.
    pub fn rename(&mut self, old_path: &str, new_path: &str) -> Result<()> {
        let (old_parent_path, old_name) = split(old_path);
        let (new_parent_path, new_name) = split(new_path);
        if old_name.is_empty() || new_name.is_empty() {
            return Err(FsError::InvalidPath);
        }
        if is_dot_or_dotdot(old_name.as_bytes()) || is_dot_or_dotdot(new_name.as_bytes()) {
            return Err(FsError::InvalidFileName);
        }

        let old_parent_id = resolve(&self.disk, &mut self.superblock, old_parent_path)?;
        let mut old_parent = get_inode(&self.disk, &self.superblock, old_parent_id)?;
        let child_id = dir_lookup(&self.disk, &mut self.superblock, &old_parent, old_name.as_bytes())?;
        let mut child = get_inode(&self.disk, &self.superblock, child_id)?;

        let new_parent_id = resolve(&self.disk, &mut self.superblock, new_parent_path)?;
        let mut new_parent = get_inode(&self.disk, &self.superblock, new_parent_id)?;
        if !new_parent.is_dir() {
            return Err(FsError::NotDirectory);
        }
        match dir_lookup(&self.disk, &mut self.superblock, &new_parent, new_name.as_bytes()) {
            Ok(_) => return Err(FsError::AlreadyExists),
            Err(FsError::NotFound) => {}
            Err(e) => return Err(e),
        }
        let entry = DirEntry::new(child_id, new_name.as_bytes())?;
        if child.is_dir() && self.is_within(new_parent_id, child_id)? {
            return Err(FsError::InvalidPath);
        }

        if old_parent_id == new_parent_id {
            dir_rename_entry(&self.disk, &mut self.superblock, &mut old_parent, old_name.as_bytes(), &entry)?;
        } else {
            dir_add_entry(&self.disk, &mut self.superblock, &mut new_parent, &entry)?;
            if let Err(e) = dir_rm_entry(&self.disk, &mut self.superblock, &mut old_parent, old_name.as_bytes()) {
                dir_rm_entry(&self.disk, &mut self.superblock, &mut new_parent, new_name.as_bytes())?;
                return Err(e);
            }
            if child.is_dir() {
                dir_repoint_entry(&self.disk, &mut self.superblock, &mut child, DOTDOT_NAME, new_parent_id)?;
                old_parent.links_cnt -= 1;
                new_parent.links_cnt += 1;
                write_inode(&self.disk, &self.superblock, &old_parent)?;
                write_inode(&self.disk, &self.superblock, &new_parent)?;
            }
        }
        log::debug!("rename {} -> {} (inode {})", old_path, new_path, child_id);
        Ok(())
    }

    /// True if directory `dir_id` is `ancestor_id` or lies below it.
    fn is_within(&mut self, dir_id: u32, ancestor_id: u32) -> Result<bool> {
        let mut current = dir_id;
        loop {
            if current == ancestor_id {
                return Ok(true);
            }
            if current == ROOT_INODE_ID {
                return Ok(false);
            }
            let inode = get_inode(&self.disk, &self.superblock, current)?;
            current = dir_lookup(&self.disk, &mut self.superblock, &inode, DOTDOT_NAME)?;
        }
    }

    /// Creates a directory. Returns its inode id.
    pub fn mkdir(&mut self, path: &str) -> Result<u32> {
        let (parent_path, name) = split(path);
        if name.is_empty() {
            return Err(FsError::AlreadyExists);
        }
        let parent_id = resolve(&self.disk, &mut self.superblock, parent_path)?;
        let mut parent = get_inode(&self.disk, &self.superblock, parent_id)?;
        let inode_id = crate::directory::mkdir(&self.disk, &mut self.superblock, &mut parent, name.as_bytes())?;
        log::debug!("mkdir {} -> inode {}", path, inode_id);
        Ok(inode_id)
    }

    pub fn stat(&mut self, path: &str) -> Result<Metadata> {
        let inode_id = resolve(&self.disk, &mut self.superblock, path)?;
        let inode = get_inode(&self.disk, &self.superblock, inode_id)?;
        Ok(Metadata {
            inode_id,
            ftype: inode.file_type(),
            size: inode.size,
            mtime: inode.mtime,
        })
    }

    pub fn bytes_per_cluster(&self) -> u64 {
        self.superblock.bytes_per_cluster()
    }

    pub fn root_inode_id(&self) -> u32 {
        ROOT_INODE_ID
    }

    pub fn superblock(&self) -> &SuperBlock {
        &self.superblock
    }

    pub fn disk(&self) -> &Disk<D> {
        &self.disk
    }

    pub fn device(&self) -> Arc<D> {
        self.disk.device()
    }
}
