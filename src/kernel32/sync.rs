use windows_sys::Win32::System::Threading::{CreateEventW, ResetEvent, SetEvent, Sleep, WaitForSingleObject};

use crate::co::{WAIT_ABANDONED, WAIT_FAILED, WAIT_OBJECT_0, WAIT_TIMEOUT, WaitResult};
use crate::error::{Result, WinError};
use crate::guard::{Guard, HandleGuard};
use crate::handles::HANDLE;
use crate::string::WString;

/// Creates or opens an event object, closed when the guard drops.
pub fn create_event(manual_reset: bool, initial_state: bool, name: Option<&str>) -> Result<HandleGuard> {
    let name = name.map(WString::from_str);
    let ptr = name.as_ref().map_or(core::ptr::null(), |n| n.as_ptr());
    let handle = unsafe { CreateEventW(core::ptr::null(), manual_reset as i32, initial_state as i32, ptr) };
    if handle.is_null() {
        return Err(WinError::last("CreateEventW"));
    }
    Ok(unsafe { Guard::new(HANDLE::from_ptr(handle)) })
}

/// Suspends the calling thread.
pub fn sleep(ms: u32) {
    unsafe { Sleep(ms) }
}

impl HANDLE {
    pub fn SetEvent(self) -> Result<()> {
        match unsafe { SetEvent(self.ptr()) } {
            0 => Err(WinError::last("SetEvent")),
            _ => Ok(()),
        }
    }

    pub fn ResetEvent(self) -> Result<()> {
        match unsafe { ResetEvent(self.ptr()) } {
            0 => Err(WinError::last("ResetEvent")),
            _ => Ok(()),
        }
    }

    /// Waits up to `ms` milliseconds, or forever with [`crate::co::INFINITE`].
    pub fn WaitForSingleObject(self, ms: u32) -> Result<WaitResult> {
        match unsafe { WaitForSingleObject(self.ptr(), ms) } {
            WAIT_OBJECT_0 => Ok(WaitResult::Signaled),
            WAIT_ABANDONED => Ok(WaitResult::Abandoned),
            WAIT_TIMEOUT => Ok(WaitResult::Timeout),
            WAIT_FAILED => Err(WinError::last("WaitForSingleObject")),
            _ => Err(WinError::Msg("WaitForSingleObject returned an unknown code")),
        }
    }
}
