use thiserror::Error;

/// Failures of the filesystem driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("disk I/O failed")]
    Io,
    #[error("disk is not ready")]
    NotReady,
    #[error("invalid superblock")]
    InvalidSuperBlock,
    #[error("volume geometry is too small or malformed")]
    InvalidGeometry,
    #[error("no free clusters left")]
    OutOfSpace,
    #[error("no free inodes left")]
    OutOfInodes,
    #[error("index out of bounds")]
    OutOfBounds,
    #[error("file exceeds the maximum cluster count")]
    FileTooLarge,
    #[error("no such file or directory")]
    NotFound,
    #[error("entry already exists")]
    AlreadyExists,
    #[error("not a directory")]
    NotDirectory,
    #[error("is a directory")]
    IsDirectory,
    #[error("directory not empty")]
    NotEmpty,
    #[error("invalid path")]
    InvalidPath,
    #[error("invalid file name")]
    InvalidFileName,
    #[error("file not opened for this access")]
    AccessDenied,
    #[error("cluster pointer does not match the seek target")]
    InvalidSeek,
    #[error("file is closed")]
    Closed,
}

pub type Result<T> = core::result::Result<T, FsError>;

/// Failures of the block device glue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DiskError {
    #[error("no such drive")]
    NoSuchDrive,
    #[error("drive not initialized")]
    NotReady,
    #[error("block transfer failed")]
    Io,
}

impl From<DiskError> for FsError {
    fn from(err: DiskError) -> Self {
        match err {
            DiskError::NotReady => FsError::NotReady,
            DiskError::NoSuchDrive | DiskError::Io => FsError::Io,
        }
    }
}

/// Errors surfaced to the hosted runtime by the syscall bridge.
/// Each maps onto the newlib errno value the runtime expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SysError {
    #[error("Bad file descriptor")]
    BadDescriptor,
    #[error("Too many open files")]
    TooManyOpenFiles,
    #[error("Input/output error")]
    Io,
    #[error("Invalid argument")]
    InvalidArgument,
    #[error("No such device")]
    NoSuchDrive,
    #[error("Cannot allocate memory")]
    OutOfMemory,
    #[error("Unsupported open flags")]
    UnsupportedFlags,
    #[error("No such file or directory")]
    NotFound,
    #[error("Resource temporarily unavailable")]
    Again,
    #[error("No child processes")]
    NoChild,
    #[error("Function not implemented")]
    Unsupported,
}

impl SysError {
    pub fn errno(self) -> i32 {
        match self {
            SysError::NotFound => 2,
            SysError::Io => 5,
            SysError::BadDescriptor => 9,
            SysError::NoChild => 10,
            SysError::Again => 11,
            SysError::OutOfMemory => 12,
            SysError::NoSuchDrive => 19,
            SysError::InvalidArgument | SysError::UnsupportedFlags => 22,
            SysError::TooManyOpenFiles => 24,
            SysError::Unsupported => 88,
        }
    }
}

impl From<DiskError> for SysError {
    fn from(err: DiskError) -> Self {
        match err {
            DiskError::NoSuchDrive => SysError::NoSuchDrive,
            DiskError::NotReady | DiskError::Io => SysError::Io,
        }
    }
}

impl From<FsError> for SysError {
    fn from(err: FsError) -> Self {
        match err {
            // Reading a write-only file (or the reverse) is EBADF in POSIX.
            FsError::AccessDenied | FsError::Closed => SysError::BadDescriptor,
            FsError::InvalidSeek => SysError::InvalidArgument,
            _ => SysError::Io,
        }
    }
}

pub type SysResult<T> = core::result::Result<T, SysError>;
