use bitflags::bitflags;

bitflags! {
    /// Desired access for `CreateFile` (`GENERIC_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FileAccess: u32 {
        const GENERIC_READ = 0x8000_0000;
        const GENERIC_WRITE = 0x4000_0000;
        const GENERIC_EXECUTE = 0x2000_0000;
        const GENERIC_ALL = 0x1000_0000;
        const DELETE = 0x0001_0000;
    }
}

bitflags! {
    /// Share mode for `CreateFile` (`FILE_SHARE_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FileShare: u32 {
        const READ = 0x0000_0001;
        const WRITE = 0x0000_0002;
        const DELETE = 0x0000_0004;
    }
}

bitflags! {
    /// Attributes and flags for `CreateFile` (`FILE_ATTRIBUTE_*`, `FILE_FLAG_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FileAttributes: u32 {
        const READONLY = 0x0000_0001;
        const HIDDEN = 0x0000_0002;
        const SYSTEM = 0x0000_0004;
        const DIRECTORY = 0x0000_0010;
        const ARCHIVE = 0x0000_0020;
        const NORMAL = 0x0000_0080;
        const TEMPORARY = 0x0000_0100;
        const DELETE_ON_CLOSE = 0x0400_0000;
        const SEQUENTIAL_SCAN = 0x0800_0000;
        const RANDOM_ACCESS = 0x1000_0000;
        const OVERLAPPED = 0x4000_0000;
        const WRITE_THROUGH = 0x8000_0000;
    }
}

/// Creation disposition for `CreateFile`.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    CreateNew = 1,
    CreateAlways = 2,
    OpenExisting = 3,
    OpenAlways = 4,
    TruncateExisting = 5,
}

/// Move method for `SetFilePointerEx`.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeekFrom {
    Begin = 0,
    Current = 1,
    End = 2,
}

/// Infinite timeout for wait functions.
pub const INFINITE: u32 = 0xFFFF_FFFF;

/// Result of `WaitForSingleObject`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaitResult {
    /// `WAIT_OBJECT_0`: the object was signaled.
    Signaled,
    /// `WAIT_ABANDONED`: the owning thread exited while holding the mutex.
    Abandoned,
    /// `WAIT_TIMEOUT`: the interval elapsed.
    Timeout,
}

pub const WAIT_OBJECT_0: u32 = 0x0000_0000;
pub const WAIT_ABANDONED: u32 = 0x0000_0080;
pub const WAIT_TIMEOUT: u32 = 0x0000_0102;
pub const WAIT_FAILED: u32 = 0xFFFF_FFFF;

/// `MAX_PATH`, the classic path buffer length in characters.
pub const MAX_PATH: usize = 260;
