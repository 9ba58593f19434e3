//! User32: windows, window classes, the message loop, menus, accelerator
//! tables, hooks, timers and message boxes.
//!
//! Windows created by [`create_window`] dispatch to Rust closures through
//! [`crate::callbacks`]. Handle-centric calls are methods on [`HWND`],
//! [`HMENU`] and [`HACCEL`] named after the API they forward to.
//!
//! [`HWND`]: crate::HWND
//! [`HMENU`]: crate::HMENU
//! [`HACCEL`]: crate::HACCEL

mod accel;
mod class;
mod hook;
mod menu;
mod message;
mod resource;
mod timer;
mod window;

pub use accel::*;
pub use class::*;
pub use hook::*;
pub use menu::*;
pub use message::*;
pub use resource::*;
pub use timer::*;
pub use window::*;

use crate::error::{Result, SysError, WinError};

/// Runs `call` with the last error cleared, so a legitimate zero result can
/// be told apart from a failure.
pub(crate) fn checked_zero<T: PartialEq + Default>(api: &'static str, call: impl FnOnce() -> T) -> Result<T> {
    SysError::SUCCESS.set_last();
    let value = call();
    if value == T::default() {
        let err = SysError::last();
        if err != SysError::SUCCESS {
            return Err(WinError::Win32(api, err));
        }
    }
    Ok(value)
}
