//! Common utilities for tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pibridge::*;

pub const ORANGE: &str = "\x1b[38;5;214m";
pub const RESET: &str = "\x1b[0m";

/// Provides a macro for logging messages during tests.
/// e.g. log!("placeholder") -> println!("[test] placeholder");
#[macro_export]
macro_rules! log {
    ($msg:expr) => {
        println!("{}[test] {}{}", crate::common::ORANGE, $msg, crate::common::RESET)
    };
    ($msg:expr, $($arg:tt)*) => {
        println!("{}[test] {}{}", crate::common::ORANGE, format!($msg, $($arg)*), crate::common::RESET)
    };
}

/// Sector array in memory, with transfer counters and switchable failures.
pub struct RamDisk {
    inner: Mutex<Vec<u8>>,
    num_sectors: u32,
    init_status: DiskStatus,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
    pub inits: AtomicUsize,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    /// Counts down to a single failing write; 0 when disarmed.
    write_countdown: AtomicUsize,
}

impl RamDisk {
    pub fn new(num_sectors: u32) -> Self {
        Self::with_init_status(num_sectors, DiskStatus::empty())
    }

    /// A disk whose `init` reports `status`, e.g. `NOINIT` for a card that never comes up.
    pub fn with_init_status(num_sectors: u32, status: DiskStatus) -> Self {
        RamDisk {
            inner: Mutex::new(vec![0u8; num_sectors as usize * SECTOR_SIZE]),
            num_sectors,
            init_status: status,
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
            inits: AtomicUsize::new(0),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            write_countdown: AtomicUsize::new(0),
        }
    }

    pub fn transfers(&self) -> usize {
        self.reads.load(Ordering::SeqCst) + self.writes.load(Ordering::SeqCst)
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes the `n`-th write from now fail once; the writes around it go through.
    pub fn fail_nth_write(&self, n: usize) {
        self.write_countdown.store(n, Ordering::SeqCst);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn range(&self, sector: u32, count: u32, len: usize) -> Option<std::ops::Range<usize>> {
        let end = sector.checked_add(count)?;
        if count == 0 || end > self.num_sectors || len != count as usize * SECTOR_SIZE {
            return None;
        }
        let start = sector as usize * SECTOR_SIZE;
        Some(start..start + len)
    }
}

impl BlockDevice for RamDisk {
    fn init(&self) -> DiskStatus {
        self.inits.fetch_add(1, Ordering::SeqCst);
        self.init_status
    }

    fn status(&self) -> DiskStatus {
        self.init_status
    }

    fn num_sectors(&self) -> u32 {
        self.num_sectors
    }

    fn read_blocks(&self, sector: u32, count: u32, buf: &mut [u8]) -> u32 {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return 0;
        }
        match self.range(sector, count, buf.len()) {
            Some(range) => {
                buf.copy_from_slice(&self.inner.lock().unwrap()[range]);
                count
            }
            None => 0,
        }
    }

    fn write_blocks(&self, sector: u32, count: u32, buf: &[u8]) -> u32 {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return 0;
        }
        let countdown = self.write_countdown.load(Ordering::SeqCst);
        if countdown > 0 {
            self.write_countdown.store(countdown - 1, Ordering::SeqCst);
            if countdown == 1 {
                return 0;
            }
        }
        match self.range(sector, count, buf.len()) {
            Some(range) => {
                self.inner.lock().unwrap()[range].copy_from_slice(buf);
                count
            }
            None => 0,
        }
    }
}

/// Formats a fresh volume of `num_sectors` with 64 inodes and default clusters.
pub fn fresh_fs(num_sectors: u32) -> (Arc<RamDisk>, FileSystem<RamDisk>) {
    let disk = Arc::new(RamDisk::new(num_sectors));
    let fs = FileSystem::format(Arc::clone(&disk), FormatOptions::new(num_sectors, 64)).unwrap();
    (disk, fs)
}

pub fn memory_console(config: ConsoleConfig) -> Console<MemorySurface> {
    Console::new(MemorySurface::new(config.framebuffer_len()), config).unwrap()
}

pub const HEAP: HeapRegion = HeapRegion::new(0x0010_0000, 0x0020_0000);

/// Syscalls over a 1024-sector RAM disk and a full-size memory console.
pub fn fresh_syscalls() -> (Arc<RamDisk>, Syscalls<RamDisk, MemorySurface>) {
    let (disk, fs) = fresh_fs(1024);
    let console = memory_console(ConsoleConfig::default());
    (disk, Syscalls::new(fs, console, HEAP))
}

/// Mailbox that records traffic. When answering, every read fills in the
/// framebuffer pointer and pitch of the given request, as the GPU would.
pub struct FakeMailbox {
    pub sent: Vec<(u8, u32)>,
    pub reads: Vec<u8>,
    answer: Option<(*mut FramebufferRequest, u32)>,
}

impl FakeMailbox {
    pub fn new() -> Self {
        Self { sent: Vec::new(), reads: Vec::new(), answer: None }
    }

    pub fn answering(request: *mut FramebufferRequest, pointer: u32) -> Self {
        Self { sent: Vec::new(), reads: Vec::new(), answer: Some((request, pointer)) }
    }
}

impl Mailbox for FakeMailbox {
    fn write(&mut self, channel: u8, data: u32) {
        self.sent.push((channel, data));
    }

    fn read(&mut self, channel: u8) -> u32 {
        self.reads.push(channel);
        if let Some((request, pointer)) = self.answer {
            unsafe {
                let width = (*request).virtual_width;
                let depth = (*request).bit_depth;
                (*request).pitch = width * depth / 8;
                (*request).pointer = pointer;
            }
        }
        0
    }
}

/// Poll strategy that counts waits and condition checks, and gives up
/// loudly instead of hanging a test.
pub struct CountingPoll {
    pub waits: usize,
    pub checks: usize,
    pub max_checks: usize,
}

impl CountingPoll {
    pub fn new() -> Self {
        Self { waits: 0, checks: 0, max_checks: 1000 }
    }
}

impl Poll for CountingPoll {
    fn wait_until(&mut self, ready: &mut dyn FnMut() -> bool) {
        self.waits += 1;
        loop {
            self.checks += 1;
            if ready() {
                return;
            }
            assert!(self.checks < self.max_checks, "device never became ready");
        }
    }
}
