//! Kernel32: modules, kernel object handles, events, files, environment and
//! system information.

mod file;
mod library;
mod sync;
mod sysinfo;

pub use file::*;
pub use library::*;
pub use sync::*;
pub use sysinfo::*;

use crate::error::SysError;

/// Reads the calling thread's last-error code (`GetLastError`).
#[inline]
pub fn last_error() -> SysError {
    SysError::last()
}

/// Sets the calling thread's last-error code (`SetLastError`).
#[inline]
pub fn set_last_error(err: SysError) {
    err.set_last()
}

/// Describes a Win32 error code with `FormatMessageW`.
pub fn format_message(err: SysError) -> alloc::string::String {
    err.message()
}
