use core::fmt::Write;
use std::ptr::addr_of_mut;

mod common;

use common::{memory_console, CountingPoll, FakeMailbox};
use pibridge::*;

/// 2 columns by 2 rows of text.
fn tiny() -> ConsoleConfig {
    ConsoleConfig { width: 16, height: 24, ..ConsoleConfig::default() }
}

fn pixel(console: &Console<MemorySurface>, x: usize, y: usize) -> u16 {
    let config = console.config();
    console.surface().read_pixel(y * config.stride() + x * config.bytes_per_pixel())
}

#[test]
fn test_newline_draws_nothing() {
    let config = ConsoleConfig { background: BLUE, ..ConsoleConfig::default() };
    let mut console = memory_console(config);
    console.write_char(b'\n');
    assert_eq!(console.cursor(), (1, 0));
    assert!(console.surface().as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn test_wraps_at_right_edge() {
    let mut console = memory_console(ConsoleConfig::default());
    console.write_bytes(&[b'A'; 159]);
    assert_eq!(console.cursor(), (0, 159));
    console.write_char(b'A');
    assert_eq!(console.cursor(), (1, 0));
    assert_eq!(console.state(), ScrollState::Normal);
}

#[test]
fn test_scroll_is_deferred() {
    let mut console = memory_console(tiny());
    console.write_bytes(b"abcd");
    assert_eq!(console.state(), ScrollState::PendingScroll);
    assert_eq!(console.cursor(), (2, 0));

    let text_row = tiny().stride() * GLYPH_HEIGHT;
    let second_row = console.surface().as_bytes()[text_row..2 * text_row].to_vec();

    console.write_char(b'e');
    assert_eq!(console.state(), ScrollState::Normal);
    assert_eq!(console.cursor(), (1, 1));
    assert_eq!(&console.surface().as_bytes()[..text_row], &second_row[..]);
}

#[test]
fn test_newline_at_bottom_defers_scroll() {
    let mut console = memory_console(tiny());
    console.write_bytes(b"x\n\n");
    assert_eq!(console.state(), ScrollState::PendingScroll);
    console.write_char(b'\n');
    assert_eq!(console.cursor(), (2, 0));
    assert_eq!(console.state(), ScrollState::PendingScroll);
    // "x" has been scrolled off the top
    assert!(console.surface().as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn test_glyph_pixels() {
    let config = ConsoleConfig { foreground: WHITE, background: RED, ..ConsoleConfig::default() };
    let mut console = memory_console(config);
    console.write_char(b'A');
    // Third row of 'A' is 0x08: only the fourth pixel from the left is lit
    assert_eq!(pixel(&console, 3, 2), WHITE);
    assert_eq!(pixel(&console, 2, 2), RED);
    assert_eq!(pixel(&console, 4, 2), RED);
    assert_eq!(pixel(&console, 0, 0), RED);
    // Neighbouring cell untouched
    assert_eq!(pixel(&console, GLYPH_WIDTH, 2), 0);
}

#[test]
fn test_high_bytes_draw_fallback() {
    let config = ConsoleConfig { background: CYAN, ..ConsoleConfig::default() };
    let mut console = memory_console(config);
    console.write_char(0xC3);
    assert_eq!(console.cursor(), (0, 1));
    for y in 0..GLYPH_HEIGHT {
        for x in 0..GLYPH_WIDTH {
            assert_eq!(pixel(&console, x, y), CYAN);
        }
    }
}

#[test]
fn test_fmt_write() {
    let mut console = memory_console(ConsoleConfig::default());
    writeln!(console, "{} + {} = {}", 1, 2, 3).unwrap();
    assert_eq!(console.cursor(), (1, 0));
}

#[test]
fn test_rejects_bad_config() {
    let config = ConsoleConfig::default();
    let short = MemorySurface::new(config.framebuffer_len() - 1);
    assert_eq!(Console::new(short, config).err(), Some(SysError::InvalidArgument));

    let deep = ConsoleConfig { bit_depth: 32, ..config };
    let surface = MemorySurface::new(deep.framebuffer_len());
    assert_eq!(Console::new(surface, deep).err(), Some(SysError::InvalidArgument));

    let narrow = ConsoleConfig { width: 4, ..config };
    let surface = MemorySurface::new(narrow.framebuffer_len());
    assert_eq!(Console::new(surface, narrow).err(), Some(SysError::InvalidArgument));
}

#[test]
fn test_mailbox_waits_for_hardware() {
    // Word offsets: READ 0, STATUS 6, WRITE 8
    let mut regs = [0u32; 9];
    regs[0] = 0x0012_3401;
    let base = regs.as_mut_ptr() as usize;
    let mut mailbox = unsafe { Bcm2835Mailbox::new(base, CountingPoll::new()) };

    mailbox.write(FRAMEBUFFER_CHANNEL, 0x0004_0000);
    assert_eq!(mailbox.read(FRAMEBUFFER_CHANNEL), 0x0012_3400);
    assert_eq!(unsafe { std::ptr::read_volatile((base + 0x20) as *const u32) }, 0x0004_0001);
}

#[test]
fn test_request_framebuffer() {
    let mut request = FramebufferRequest::new(&ConsoleConfig::default());
    let mut mailbox = FakeMailbox::answering(addr_of_mut!(request), 0x3C10_0000);
    let base = request_framebuffer_at(&mut mailbox, &mut request, 0xC008_0000).unwrap();
    assert_eq!(base, 0x3C10_0000);
    assert_eq!(request.pitch, 1280 * 2);

    assert_eq!(mailbox.sent, vec![(FRAMEBUFFER_CHANNEL, 0xC008_0000)]);
    assert_eq!(mailbox.reads, vec![FRAMEBUFFER_CHANNEL]);
}

#[test]
fn test_refused_framebuffer() {
    let mut request = FramebufferRequest::new(&ConsoleConfig::default());
    let mut mailbox = FakeMailbox::new();
    assert_eq!(request_framebuffer_at(&mut mailbox, &mut request, 0x0008_0000), Err(SysError::Io));
}

#[test]
fn test_locked_heap_through_public_api() {
    let heap = LockedHeap::new(common::HEAP);
    assert_eq!(heap.lock().grow(16), Ok(common::HEAP.start));
    assert_eq!(heap.lock().top(), common::HEAP.start + 16);

    let mut bump = BumpHeap::new(HeapRegion::new(0x1000, 0x1010));
    assert_eq!(bump.grow(0x11), Err(SysError::OutOfMemory));
    assert_eq!(bump.remaining(), 0x10);
}
