//! Text console drawn into a 16 bpp framebuffer.
//!
//! The cursor advances one glyph cell per character and wraps at the right edge.
//! Running off the bottom row does not scroll right away: the console enters
//! `PendingScroll` and scrolls on the next character, so the last row stays
//! visible until there is something to replace it with.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::config::*;
use crate::error::{SysError, SysResult};
use crate::font::glyph;
use crate::mailbox::{request_framebuffer, FramebufferRequest, Mailbox};

/// Pixel memory the console draws into. Offsets are in bytes.
pub trait Surface {
    fn len(&self) -> usize;

    fn write_pixel(&mut self, offset: usize, color: u16);

    fn read_pixel(&self, offset: usize) -> u16;

    /// Moves `count` bytes from `src` down to `dst`, where `dst < src`.
    fn copy_down(&mut self, src: usize, dst: usize, count: usize);

    fn zero(&mut self, start: usize, count: usize);
}

/// Framebuffer in ordinary memory.
pub struct MemorySurface {
    bytes: Vec<u8>,
}

impl MemorySurface {
    pub fn new(len: usize) -> Self {
        Self { bytes: vec![0; len] }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Surface for MemorySurface {
    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn write_pixel(&mut self, offset: usize, color: u16) {
        self.bytes[offset..offset + 2].copy_from_slice(&color.to_le_bytes());
    }

    fn read_pixel(&self, offset: usize) -> u16 {
        u16::from_le_bytes([self.bytes[offset], self.bytes[offset + 1]])
    }

    fn copy_down(&mut self, src: usize, dst: usize, count: usize) {
        self.bytes.copy_within(src..src + count, dst);
    }

    fn zero(&mut self, start: usize, count: usize) {
        self.bytes[start..start + count].fill(0);
    }
}

/// Framebuffer handed out by the GPU. Every access is volatile.
pub struct MmioSurface {
    base: *mut u8,
    len: usize,
}

// SAFETY: the framebuffer is plain memory owned by whoever owns the surface.
unsafe impl Send for MmioSurface {}

impl MmioSurface {
    /// # Safety
    /// `base` must point to `len` bytes of framebuffer memory, 4-byte aligned,
    /// that nothing else writes to while the surface lives.
    pub const unsafe fn new(base: *mut u8, len: usize) -> Self {
        Self { base, len }
    }
}

impl Surface for MmioSurface {
    fn len(&self) -> usize {
        self.len
    }

    fn write_pixel(&mut self, offset: usize, color: u16) {
        debug_assert!(offset + 2 <= self.len);
        // SAFETY: offset is within the region given to `new`
        unsafe { core::ptr::write_volatile(self.base.add(offset) as *mut u16, color) };
    }

    fn read_pixel(&self, offset: usize) -> u16 {
        debug_assert!(offset + 2 <= self.len);
        // SAFETY: offset is within the region given to `new`
        unsafe { core::ptr::read_volatile(self.base.add(offset) as *const u16) }
    }

    fn copy_down(&mut self, src: usize, dst: usize, count: usize) {
        debug_assert!(dst < src && src + count <= self.len);
        // Word at a time, front to back; safe for overlap since dst < src.
        for i in (0..count).step_by(4) {
            // SAFETY: both ranges lie within the region given to `new`, which is 4-byte aligned
            unsafe {
                let word = core::ptr::read_volatile(self.base.add(src + i) as *const u32);
                core::ptr::write_volatile(self.base.add(dst + i) as *mut u32, word);
            }
        }
    }

    fn zero(&mut self, start: usize, count: usize) {
        debug_assert!(start + count <= self.len);
        for i in (0..count).step_by(4) {
            // SAFETY: start + count is within the region given to `new`, which is 4-byte aligned
            unsafe { core::ptr::write_volatile(self.base.add(start + i) as *mut u32, 0) };
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollState {
    Normal,
    /// The cursor ran past the last row; the next character scrolls first.
    PendingScroll,
}

pub struct Console<S: Surface> {
    surface: S,
    config: ConsoleConfig,
    row: usize,
    column: usize,
    state: ScrollState,
}

impl<S: Surface> Console<S> {
    /// Only 16 bpp is drawn; the surface must hold the whole screen.
    pub fn new(surface: S, config: ConsoleConfig) -> SysResult<Self> {
        if config.bit_depth != BIT_DEPTH
            || config.columns() == 0
            || config.rows() == 0
            || surface.len() < config.framebuffer_len()
        {
            return Err(SysError::InvalidArgument);
        }
        Ok(Self {
            surface,
            config,
            row: 0,
            column: 0,
            state: ScrollState::Normal,
        })
    }

    /// Cursor position as (row, column).
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.column)
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn write_char(&mut self, c: u8) {
        if self.state == ScrollState::PendingScroll {
            self.scroll();
            self.state = ScrollState::Normal;
        }

        if c == b'\n' {
            self.column = 0;
            self.row += 1;
        } else {
            self.draw_glyph(c, self.column, self.row);
            self.column += 1;
            if self.column >= self.config.columns() {
                self.column = 0;
                self.row += 1;
            }
        }

        if self.row >= self.config.rows() {
            self.state = ScrollState::PendingScroll;
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &c in bytes {
            self.write_char(c);
        }
    }

    /// Draws `c` into cell (column, row). Cells off the screen are ignored.
    pub fn draw_glyph(&mut self, c: u8, column: usize, row: usize) {
        if column >= self.config.columns() || row >= self.config.rows() {
            return;
        }
        let stride = self.config.stride();
        let bpp = self.config.bytes_per_pixel();
        for (i, &line) in glyph(c).iter().enumerate() {
            let row_start = (row * GLYPH_HEIGHT + i) * stride + column * GLYPH_WIDTH * bpp;
            for j in 0..GLYPH_WIDTH {
                let color = if line & (1 << j) != 0 {
                    self.config.foreground
                } else {
                    self.config.background
                };
                self.surface.write_pixel(row_start + j * bpp, color);
            }
        }
    }

    /// Moves every text row up by one, blanks the bottom row and
    /// puts the cursor at the start of it.
    pub fn scroll(&mut self) {
        let text_row = self.config.stride() * GLYPH_HEIGHT;
        let used = text_row * self.config.rows();
        self.surface.copy_down(text_row, 0, used - text_row);
        self.surface.zero(used - text_row, text_row);
        self.row = self.config.rows() - 1;
        self.column = 0;
    }
}

impl<S: Surface> fmt::Write for Console<S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

impl Console<MmioSurface> {
    /// Asks the GPU for a framebuffer matching `config` and opens a console on it.
    ///
    /// # Safety
    /// `request` must be visible to the GPU at its own address, and the framebuffer
    /// the GPU returns must not be touched by anything else.
    pub unsafe fn from_mailbox<M: Mailbox>(
        mailbox: &mut M,
        request: &mut FramebufferRequest,
        config: ConsoleConfig,
    ) -> SysResult<Self> {
        *request = FramebufferRequest::new(&config);
        let base = request_framebuffer(mailbox, request)?;
        // SAFETY: the GPU hands out at least `framebuffer_len` bytes for the geometry requested
        let surface = unsafe { MmioSurface::new(base as *mut u8, config.framebuffer_len()) };
        Console::new(surface, config)
    }
}
