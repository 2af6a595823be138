//! Monotonic bump heap between the end of the image and the top of RAM.
//! Nothing is ever returned to it.

use core::alloc::{GlobalAlloc, Layout};

use spin::Mutex;

use crate::config::HeapRegion;
use crate::error::{SysError, SysResult};

#[derive(Debug)]
pub struct BumpHeap {
    region: HeapRegion,
    top: usize,
}

impl BumpHeap {
    pub const fn new(region: HeapRegion) -> Self {
        Self { region, top: region.start }
    }

    /// Advances the top by `amount` and returns the previous top.
    /// Fails without moving the top if the new top would pass the ceiling.
    pub fn grow(&mut self, amount: usize) -> SysResult<usize> {
        let new_top = self
            .top
            .checked_add(amount)
            .filter(|&end| end <= self.region.ceiling)
            .ok_or(SysError::OutOfMemory)?;
        let prev = self.top;
        self.top = new_top;
        Ok(prev)
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn remaining(&self) -> usize {
        self.region.ceiling.saturating_sub(self.top)
    }

    pub fn region(&self) -> HeapRegion {
        self.region
    }

    /// Reserves `layout.size()` bytes at the next `layout.align()` boundary.
    fn alloc_layout(&mut self, layout: Layout) -> SysResult<usize> {
        let mask = layout.align() - 1;
        let start = self.top.checked_add(mask).ok_or(SysError::OutOfMemory)? & !mask;
        let end = start.checked_add(layout.size()).ok_or(SysError::OutOfMemory)?;
        self.grow(end - self.top)?;
        Ok(start)
    }
}

/// `GlobalAlloc` over a `BumpHeap`. Deallocation is a no-op.
pub struct LockedHeap(Mutex<BumpHeap>);

impl LockedHeap {
    pub const fn new(region: HeapRegion) -> Self {
        Self(Mutex::new(BumpHeap::new(region)))
    }

    pub fn lock(&self) -> spin::MutexGuard<'_, BumpHeap> {
        self.0.lock()
    }
}

unsafe impl GlobalAlloc for LockedHeap {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        match self.0.lock().alloc_layout(layout) {
            Ok(addr) => addr as *mut u8,
            Err(_) => core::ptr::null_mut(),
        }
    }

    unsafe fn dealloc(&self, _ptr: *mut u8, _layout: Layout) {}
}
