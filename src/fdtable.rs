//! Descriptor table. Slot `i` backs descriptor `i + CONSOLE_FDS`; the console
//! descriptors have no slot.

use crate::config::{CONSOLE_FDS, MAX_OPEN_FILES};
use crate::error::{SysError, SysResult};
use crate::file::File;

pub struct DescriptorTable {
    slots: [Option<File>; MAX_OPEN_FILES],
}

impl DescriptorTable {
    pub const fn new() -> Self {
        Self {
            slots: [const { None }; MAX_OPEN_FILES],
        }
    }

    /// Index of the first empty slot, if any.
    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(|slot| slot.is_none())
    }

    /// Stores `file` in the first empty slot and returns its descriptor.
    pub fn insert(&mut self, file: File) -> SysResult<i32> {
        let index = self.first_free().ok_or(SysError::TooManyOpenFiles)?;
        self.slots[index] = Some(file);
        Ok((index + CONSOLE_FDS) as i32)
    }

    fn index(fd: i32) -> SysResult<usize> {
        let fd = usize::try_from(fd).map_err(|_| SysError::BadDescriptor)?;
        if fd < CONSOLE_FDS || fd >= CONSOLE_FDS + MAX_OPEN_FILES {
            return Err(SysError::BadDescriptor);
        }
        Ok(fd - CONSOLE_FDS)
    }

    /// The open file behind `fd`. Console descriptors and empty slots are `BadDescriptor`.
    pub fn get_mut(&mut self, fd: i32) -> SysResult<&mut File> {
        let index = Self::index(fd)?;
        self.slots[index].as_mut().ok_or(SysError::BadDescriptor)
    }

    /// Empties the slot behind `fd`, returning what it held.
    pub fn clear(&mut self, fd: i32) -> SysResult<File> {
        let index = Self::index(fd)?;
        self.slots[index].take().ok_or(SysError::BadDescriptor)
    }

    pub fn is_open(&self, fd: i32) -> bool {
        Self::index(fd).is_ok_and(|index| self.slots[index].is_some())
    }

    pub fn open_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

impl Default for DescriptorTable {
    fn default() -> Self {
        Self::new()
    }
}
