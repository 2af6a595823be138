//! pibridge gives a hosted language runtime the POSIX services it expects
//! (files, console output, heap growth) on a bare-metal Raspberry Pi.
//!
//! Layers, from bottom to top:
//! 1. Block Device: sector transfers from the SD card.          User implemented (hardware-specific)
//! 2. Disk: drive-checked glue over the block device.
//! 3. Filesystem: a small inode-based volume.
//!    Layout: Superblock | Cluster Bitmap | Inode Bitmap | Inode Table | Data Clusters
//! 4. Console: 8x12 text on the HDMI framebuffer, obtained through the VideoCore mailbox.
//! 5. Syscalls: descriptor table, open-flag translation, seek, stat, sbrk and the process stubs.
//!
//! Everything lives in one `Syscalls` value; wrap it in a lock (`SharedSyscalls`) if it is shared.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod config;
mod block_dev;
mod disk;
mod structs;
mod bitmap;
mod superblock;
mod inode;
mod directory;
mod path;
mod file;
mod fs;
mod error;
mod flags;
mod fdtable;
mod font;
mod poll;
mod mailbox;
mod console;
mod heap;
mod syscall;

pub use block_dev::{BlockDevice, DiskStatus};
pub use config::*;
pub use disk::{fat_time, unpack_fat_time, Disk, IoctlCmd};
pub use structs::{FileType, Metadata, SuperBlock};
pub use path::split;
pub use file::File;
pub use fs::{Access, Disposition, FileSystem};
pub use error::{DiskError, FsError, Result, SysError, SysResult};
pub use flags::{translate, OpenFlags, FLAG_TABLE};
pub use fdtable::DescriptorTable;
pub use font::{glyph, Glyph, FONT};
pub use poll::{Poll, SpinPoll};
pub use mailbox::{request_framebuffer, request_framebuffer_at, Bcm2835Mailbox, FramebufferRequest, Mailbox, FRAMEBUFFER_CHANNEL, MAIL0_BASE};
pub use console::{Console, MemorySurface, MmioSurface, ScrollState, Surface};
pub use heap::{BumpHeap, LockedHeap};
pub use syscall::{SharedSyscalls, Stat, Syscalls, TimeVal, TimeZone, S_IFCHR, SEEK_CUR, SEEK_END, SEEK_SET};
