pub const MAGIC: u32 = 0x50494252; // "PIBR" in ASCII

pub const SECTOR_SIZE: usize = 512;
pub const SUPERBLOCK_SECTOR: u32 = 0;
pub const RESERVED_INODE_ID: u32 = 0; // Never handed out, dir entries use 0 as "empty"
pub const ROOT_INODE_ID: u32 = 1;
pub const INODE_SIZE: usize = 128;
pub const INODES_PER_SECTOR: usize = SECTOR_SIZE / INODE_SIZE;

pub const MAX_FILE_NAME_LEN: usize = 64 - 4; // DirEntry size minus inode ID (4 bytes)
pub const DIR_ENTRY_SIZE: usize = 64;
pub const DOT_NAME: &[u8; 1] = b".";
pub const DOTDOT_NAME: &[u8; 2] = b"..";

pub const NUM_DIRECT_PTRS: usize = 12;
pub const PTRS_PER_SECTOR: usize = SECTOR_SIZE / 4; // Indirect pointers live in the cluster's first sector
pub const MAX_FILE_CLUSTERS: usize = NUM_DIRECT_PTRS + PTRS_PER_SECTOR;

pub const DEFAULT_SECTORS_PER_CLUSTER: u32 = 4;

/// The only drive the disk glue answers for.
pub const DRIVE: u8 = 0;

/// Packed FAT date/time reported for every timestamp: 1999-09-09 00:00:00.
pub const FIXED_FAT_TIME: u32 = ((1999 - 1980) << 25) | (9 << 21) | (9 << 16);

pub const MAX_OPEN_FILES: usize = 20;
/// Descriptors 0, 1 and 2 belong to the console.
pub const CONSOLE_FDS: usize = 3;

pub const GLYPH_WIDTH: usize = 8;
pub const GLYPH_HEIGHT: usize = 12;

pub const SCREEN_WIDTH: usize = 1280;
pub const SCREEN_HEIGHT: usize = 720;
pub const BIT_DEPTH: usize = 16;

// RGB565 palette
pub const ORANGE: u16 = 0xFD60;
pub const BLACK: u16 = 0x0000;
pub const BLUE: u16 = 0x001F;
pub const RED: u16 = 0xF800;
pub const GREEN: u16 = 0x07E0;
pub const CYAN: u16 = 0x07FF;
pub const MAGENTA: u16 = 0xF81F;
pub const YELLOW: u16 = 0xFFE0;
pub const WHITE: u16 = 0xFFFF;

/// Geometry and colors of the framebuffer console. Fixed after initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub width: usize,
    pub height: usize,
    pub bit_depth: usize,
    pub foreground: u16,
    pub background: u16,
}

impl ConsoleConfig {
    pub const fn bytes_per_pixel(&self) -> usize {
        self.bit_depth / 8
    }

    /// Bytes per pixel row.
    pub const fn stride(&self) -> usize {
        self.width * self.bytes_per_pixel()
    }

    pub const fn framebuffer_len(&self) -> usize {
        self.stride() * self.height
    }

    /// Console width in characters.
    pub const fn columns(&self) -> usize {
        self.width / GLYPH_WIDTH
    }

    /// Console height in characters.
    pub const fn rows(&self) -> usize {
        self.height / GLYPH_HEIGHT
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            bit_depth: BIT_DEPTH,
            foreground: GREEN,
            background: BLACK,
        }
    }
}

/// Parameters for laying out a fresh volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    pub num_sectors: u32,
    pub num_inodes: u32,
    pub sectors_per_cluster: u32,
}

impl FormatOptions {
    pub fn new(num_sectors: u32, num_inodes: u32) -> Self {
        Self {
            num_sectors,
            num_inodes,
            sectors_per_cluster: DEFAULT_SECTORS_PER_CLUSTER,
        }
    }

    pub fn with_sectors_per_cluster(mut self, sectors_per_cluster: u32) -> Self {
        self.sectors_per_cluster = sectors_per_cluster;
        self
    }
}

/// The span the bump heap hands out: from the end of the loaded image up to installed RAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapRegion {
    pub start: usize,
    pub ceiling: usize,
}

impl HeapRegion {
    pub const fn new(start: usize, ceiling: usize) -> Self {
        Self { start, ceiling }
    }
}
