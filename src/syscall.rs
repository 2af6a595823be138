//! The POSIX surface the hosted runtime calls into.
//!
//! Descriptors 0, 1 and 2 are the console: output goes through the framebuffer
//! console, input always fails. Higher descriptors index the descriptor table.
//! Every failure is a single `SysError`; the runtime turns it into `errno` and -1.

use spin::Mutex;

use crate::config::*;
use crate::console::{Console, Surface};
use crate::error::{SysError, SysResult};
use crate::fdtable::DescriptorTable;
use crate::flags::translate;
use crate::fs::FileSystem;
use crate::heap::BumpHeap;
use crate::BlockDevice;

pub const SEEK_SET: i32 = 0;
pub const SEEK_CUR: i32 = 1;
pub const SEEK_END: i32 = 2;

/// `st_mode` type bits of a character device.
pub const S_IFCHR: u32 = 0o020000;

const STDOUT: i32 = 1;
const STDERR: i32 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stat {
    pub dev: u32,
    pub ino: u32,
    pub mode: u32,
    pub nlink: u32,
    pub uid: u32,
    pub gid: u32,
    pub rdev: u32,
    pub size: u64,
    pub blksize: u32,
    pub blocks: u64,
    pub atime: i64,
    pub mtime: i64,
    pub ctime: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeVal {
    pub sec: i64,
    pub usec: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeZone {
    pub minuteswest: i32,
    pub dsttime: i32,
}

/// All state behind the syscall surface. Not reentrant; see `SharedSyscalls`.
pub struct Syscalls<D: BlockDevice, S: Surface> {
    fs: FileSystem<D>,
    console: Console<S>,
    files: DescriptorTable,
    heap: BumpHeap,
}

/// `Syscalls` behind a lock, for embeddings that call in from more than one context.
pub type SharedSyscalls<D, S> = Mutex<Syscalls<D, S>>;

fn is_console(fd: i32) -> bool {
    (0..CONSOLE_FDS as i32).contains(&fd)
}

impl<D: BlockDevice, S: Surface> Syscalls<D, S> {
    pub fn new(fs: FileSystem<D>, console: Console<S>, heap: HeapRegion) -> Self {
        Self {
            fs,
            console,
            files: DescriptorTable::new(),
            heap: BumpHeap::new(heap),
        }
    }

    pub fn fs(&self) -> &FileSystem<D> {
        &self.fs
    }

    pub fn console(&self) -> &Console<S> {
        &self.console
    }

    pub fn files(&self) -> &DescriptorTable {
        &self.files
    }

    pub fn heap(&self) -> &BumpHeap {
        &self.heap
    }

    /// Opens `path` and returns its descriptor. `mode` (permission bits) is ignored.
    pub fn open(&mut self, path: &str, flags: u32, _mode: u32) -> SysResult<i32> {
        let access = translate(flags).inspect_err(|_| log::warn!("open {}: unsupported flags {:#x}", path, flags))?;
        if self.files.first_free().is_none() {
            log::warn!("open {}: descriptor table full", path);
            return Err(SysError::TooManyOpenFiles);
        }
        let file = self.fs.open(path, access).map_err(|e| {
            log::warn!("open {}: {}", path, e);
            SysError::Io
        })?;
        let fd = self.files.insert(file)?;
        log::debug!("open {} -> fd {}", path, fd);
        Ok(fd)
    }

    /// Closes `fd`. If the driver cannot close the file, the descriptor stays open.
    pub fn close(&mut self, fd: i32) -> SysResult<()> {
        let file = self.files.get_mut(fd)?;
        if let Err(e) = self.fs.close(file) {
            log::warn!("close fd {}: {}", fd, e);
            return Err(e.into());
        }
        self.files.clear(fd)?;
        log::debug!("close fd {}", fd);
        Ok(())
    }

    /// Reads into `buf` and returns the byte count; 0 at end of file.
    pub fn read(&mut self, fd: i32, buf: &mut [u8]) -> SysResult<usize> {
        if is_console(fd) {
            return Err(SysError::BadDescriptor);
        }
        let file = self.files.get_mut(fd)?;
        self.fs.read(file, buf).map_err(|e| {
            log::warn!("read fd {}: {}", fd, e);
            e.into()
        })
    }

    /// Console writes always report the full length.
    pub fn write(&mut self, fd: i32, buf: &[u8]) -> SysResult<usize> {
        if is_console(fd) {
            self.console.write_bytes(buf);
            return Ok(buf.len());
        }
        let file = self.files.get_mut(fd)?;
        self.fs.write(file, buf).map_err(|e| {
            log::warn!("write fd {}: {}", fd, e);
            e.into()
        })
    }

    /// Moves the file position. Seeking from the end is not supported.
    /// Returns the new position.
    pub fn lseek(&mut self, fd: i32, offset: i64, whence: i32) -> SysResult<u64> {
        if whence != SEEK_SET && whence != SEEK_CUR {
            log::warn!("lseek fd {}: unsupported whence {}", fd, whence);
            return Err(SysError::InvalidArgument);
        }
        let file = self.files.get_mut(fd)?;

        let base = if whence == SEEK_SET { 0 } else { file.position() as i64 };
        let target = base.checked_add(offset).ok_or(SysError::InvalidArgument)?;
        let target = u64::try_from(target).map_err(|_| SysError::InvalidArgument)?;
        let target = if file.is_writable() { target } else { target.min(file.size()) };

        let bytes_per_cluster = self.fs.bytes_per_cluster();
        if target > MAX_FILE_CLUSTERS as u64 * bytes_per_cluster {
            return Err(SysError::InvalidArgument);
        }

        // Walk the cluster pointer to the cluster holding the target.
        let saved = file.cluster();
        file.rewind_cluster();
        let mut remaining = target;
        while remaining >= bytes_per_cluster {
            remaining -= bytes_per_cluster;
            file.advance_cluster();
        }

        self.fs.seek(file, target).map_err(|e| {
            log::warn!("lseek fd {}: {}", fd, e);
            file.cluster = saved;
            e.into()
        })
    }

    /// Only the console output descriptors can be stat'ed.
    pub fn fstat(&self, fd: i32) -> SysResult<Stat> {
        if fd != STDOUT && fd != STDERR {
            return Err(SysError::NotFound);
        }
        let config = self.console.config();
        let size = config.framebuffer_len() as u64;
        Ok(Stat {
            ino: fd as u32,
            mode: S_IFCHR,
            size,
            blksize: SECTOR_SIZE as u32,
            blocks: size.div_ceil(SECTOR_SIZE as u64),
            ..Default::default()
        })
    }

    pub fn unlink(&mut self, path: &str) -> SysResult<()> {
        self.fs.unlink(path).map_err(|e| {
            log::warn!("unlink {}: {}", path, e);
            SysError::NotFound
        })
    }

    pub fn rename(&mut self, old_path: &str, new_path: &str) -> SysResult<()> {
        self.fs.rename(old_path, new_path).map_err(|e| {
            log::warn!("rename {} -> {}: {}", old_path, new_path, e);
            SysError::NotFound
        })
    }

    /// Hard links are not supported.
    pub fn link(&mut self, _old_path: &str, _new_path: &str) -> SysResult<()> {
        Err(SysError::NotFound)
    }

    /// Grows the heap by `amount` bytes and returns the start of the new span.
    pub fn sbrk(&mut self, amount: usize) -> SysResult<usize> {
        self.heap.grow(amount).inspect_err(|_| {
            log::warn!("sbrk {}: out of memory ({} left)", amount, self.heap.remaining())
        })
    }

    /// There is no clock; time is always the epoch.
    pub fn gettimeofday(&self) -> SysResult<(TimeVal, TimeZone)> {
        Ok((TimeVal::default(), TimeZone::default()))
    }

    pub fn isatty(&self, _fd: i32) -> bool {
        true
    }

    pub fn getpid(&self) -> i32 {
        1
    }

    pub fn kill(&mut self, _pid: i32, _sig: i32) -> SysResult<()> {
        Err(SysError::InvalidArgument)
    }

    pub fn fork(&mut self) -> SysResult<i32> {
        Err(SysError::Again)
    }

    pub fn wait(&mut self) -> SysResult<i32> {
        Err(SysError::NoChild)
    }

    pub fn execve(&mut self, _path: &str, _argv: &[&str], _env: &[&str]) -> SysResult<()> {
        Err(SysError::OutOfMemory)
    }

    pub fn times(&self) -> SysResult<u64> {
        Err(SysError::Unsupported)
    }
}
