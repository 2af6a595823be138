//! VideoCore mailbox (MAIL0) and the framebuffer request sent through it.

use crate::config::ConsoleConfig;
use crate::error::{SysError, SysResult};
use crate::poll::Poll;

pub const MAIL0_BASE: usize = 0x2000_B880;

// Register offsets, in bytes from MAIL0_BASE
const MAIL0_READ: usize = 0x00;
const MAIL0_STATUS: usize = 0x18;
const MAIL0_WRITE: usize = 0x20;

const STATUS_FULL: u32 = 0x8000_0000;
const STATUS_EMPTY: u32 = 0x4000_0000;

/// The low nibble of every message carries the channel.
const CHANNEL_MASK: u32 = 0xF;

pub const FRAMEBUFFER_CHANNEL: u8 = 1;

/// A channel-multiplexed message pipe to the GPU.
pub trait Mailbox {
    /// Sends `data`, whose low four bits are replaced by the channel.
    fn write(&mut self, channel: u8, data: u32);

    /// Waits for a message on `channel` and returns it with the channel bits cleared.
    /// Messages for other channels are discarded.
    fn read(&mut self, channel: u8) -> u32;
}

pub struct Bcm2835Mailbox<P: Poll> {
    base: usize,
    poll: P,
}

impl<P: Poll> Bcm2835Mailbox<P> {
    /// # Safety
    /// `base` must address the MAIL0 register block, mapped for volatile access.
    pub const unsafe fn new(base: usize, poll: P) -> Self {
        Self { base, poll }
    }

    fn reg(&self, offset: usize) -> *mut u32 {
        (self.base + offset) as *mut u32
    }
}

impl<P: Poll> Mailbox for Bcm2835Mailbox<P> {
    fn write(&mut self, channel: u8, data: u32) {
        let status = self.reg(MAIL0_STATUS);
        // SAFETY: the register block was handed to `new` as valid MMIO
        self.poll
            .wait_until(&mut || unsafe { core::ptr::read_volatile(status) } & STATUS_FULL == 0);
        let message = (data & !CHANNEL_MASK) | (channel as u32 & CHANNEL_MASK);
        unsafe { core::ptr::write_volatile(self.reg(MAIL0_WRITE), message) };
    }

    fn read(&mut self, channel: u8) -> u32 {
        let status = self.reg(MAIL0_STATUS);
        loop {
            // SAFETY: the register block was handed to `new` as valid MMIO
            self.poll
                .wait_until(&mut || unsafe { core::ptr::read_volatile(status) } & STATUS_EMPTY == 0);
            let data = unsafe { core::ptr::read_volatile(self.reg(MAIL0_READ)) };
            if data & CHANNEL_MASK == channel as u32 & CHANNEL_MASK {
                return data & !CHANNEL_MASK;
            }
        }
    }
}

/// Framebuffer request, laid out as the GPU reads it.
/// The GPU fills in `pitch`, `pointer` and `size` in place.
#[repr(C, align(16))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FramebufferRequest {
    pub physical_width: u32,
    pub physical_height: u32,
    pub virtual_width: u32,
    pub virtual_height: u32,
    pub pitch: u32,
    pub bit_depth: u32,
    pub x_offset: u32,
    pub y_offset: u32,
    pub pointer: u32,
    pub size: u32,
}

impl FramebufferRequest {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            physical_width: config.width as u32,
            physical_height: config.height as u32,
            virtual_width: config.width as u32,
            virtual_height: config.height as u32,
            bit_depth: config.bit_depth as u32,
            ..Default::default()
        }
    }
}

/// The GPU takes 32-bit message addresses only.
fn message_address(addr: usize) -> SysResult<u32> {
    u32::try_from(addr).map_err(|_| SysError::InvalidArgument)
}

/// Sends `request` on the framebuffer channel and returns the framebuffer address the GPU filled in.
/// `request` must sit where the GPU sees it at the same address, below 4 GiB.
pub fn request_framebuffer<M: Mailbox>(mailbox: &mut M, request: &mut FramebufferRequest) -> SysResult<usize> {
    let bus_address = message_address(request as *mut FramebufferRequest as usize)?;
    request_framebuffer_at(mailbox, request, bus_address)
}

/// Like `request_framebuffer`, for when the GPU sees `request` at `bus_address`
/// rather than at its CPU address (e.g. through an uncached alias).
pub fn request_framebuffer_at<M: Mailbox>(
    mailbox: &mut M,
    request: &mut FramebufferRequest,
    bus_address: u32,
) -> SysResult<usize> {
    mailbox.write(FRAMEBUFFER_CHANNEL, bus_address);
    mailbox.read(FRAMEBUFFER_CHANNEL);

    // SAFETY: `request` is a valid reference; the read is volatile because the GPU wrote behind the compiler's back
    let pointer = unsafe { core::ptr::read_volatile(&request.pointer) };
    if pointer == 0 {
        log::warn!("framebuffer request refused");
        return Err(SysError::Io);
    }
    log::debug!("framebuffer at {:#x}, pitch {}", pointer, request.pitch);
    Ok(pointer as usize)
}
