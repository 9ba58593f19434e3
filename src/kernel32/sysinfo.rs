use alloc::string::String;

use windows_sys::Win32::System::Environment::{
    ExpandEnvironmentStringsW, GetEnvironmentVariableW, SetEnvironmentVariableW,
};
use windows_sys::Win32::System::SystemInformation::{GetLocalTime, GetSystemTime, GetTickCount64};
use windows_sys::Win32::System::Threading::{GetCurrentProcessId, GetCurrentThreadId};

use crate::error::{Result, SysError, WinError};
use crate::string::WString;
use crate::structs::SYSTEMTIME;

pub fn current_process_id() -> u32 {
    unsafe { GetCurrentProcessId() }
}

pub fn current_thread_id() -> u32 {
    unsafe { GetCurrentThreadId() }
}

/// Milliseconds since system start.
pub fn tick_count() -> u64 {
    unsafe { GetTickCount64() }
}

/// Current local date and time.
pub fn local_time() -> SYSTEMTIME {
    let mut st = SYSTEMTIME::default();
    unsafe { GetLocalTime((&mut st as *mut SYSTEMTIME).cast()) };
    st
}

/// Current date and time in UTC.
pub fn system_time() -> SYSTEMTIME {
    let mut st = SYSTEMTIME::default();
    unsafe { GetSystemTime((&mut st as *mut SYSTEMTIME).cast()) };
    st
}

/// Reads an environment variable of the process. `None` if it is not set.
pub fn env_var(name: &str) -> Result<Option<String>> {
    let name = WString::from_str(name);
    let mut buf = WString::new_alloc_buf(256);
    loop {
        SysError::SUCCESS.set_last();
        let len = unsafe { GetEnvironmentVariableW(name.as_ptr(), buf.as_mut_ptr(), buf.buf_len() as u32) } as usize;
        if len == 0 {
            return match SysError::last() {
                SysError::SUCCESS => Ok(Some(String::new())),
                SysError::ENVVAR_NOT_FOUND => Ok(None),
                err => Err(WinError::Win32("GetEnvironmentVariableW", err)),
            };
        }
        // On a short buffer the required size, null included, is returned.
        if len < buf.buf_len() {
            return Ok(Some(buf.to_string_lossy()));
        }
        buf.resize(len);
    }
}

/// Sets an environment variable of the process; `None` deletes it.
pub fn set_env_var(name: &str, value: Option<&str>) -> Result<()> {
    let name = WString::from_str(name);
    let value = value.map(WString::from_str);
    let ptr = value.as_ref().map_or(core::ptr::null(), |v| v.as_ptr());
    match unsafe { SetEnvironmentVariableW(name.as_ptr(), ptr) } {
        0 => Err(WinError::last("SetEnvironmentVariableW")),
        _ => Ok(()),
    }
}

/// Replaces `%NAME%` references with the values of the variables.
pub fn expand_env_strings(src: &str) -> Result<String> {
    let src = WString::from_str(src);
    let mut buf = WString::new_alloc_buf(src.buf_len() + 64);
    loop {
        let len = unsafe { ExpandEnvironmentStringsW(src.as_ptr(), buf.as_mut_ptr(), buf.buf_len() as u32) } as usize;
        if len == 0 {
            return Err(WinError::last("ExpandEnvironmentStringsW"));
        }
        if len <= buf.buf_len() {
            return Ok(buf.to_string_lossy());
        }
        buf.resize(len);
    }
}
