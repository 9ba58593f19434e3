//! Error definitions for Win32 and COM calls.
//!
//! The taxonomy is the platform's own: HRESULT values for COM, Win32 error
//! codes for flat functions, `CDERR_*` codes for the common dialogs.

use alloc::string::String;
use core::fmt;
use thiserror::Error;

/// Result alias for every fallible binding.
pub type Result<T> = core::result::Result<T, WinError>;

/// Represents all possible errors returned by the bindings.
#[derive(Debug, Error)]
pub enum WinError {
    /// COM method or function failed with HRESULT.
    #[error("{0} failed with HRESULT {1:#010X}")]
    Com(&'static str, i32),

    /// Win32 function signaled failure, code taken from `GetLastError`.
    #[error("{0} failed: {1}")]
    Win32(&'static str, SysError),

    /// Common dialog failure, code taken from `CommDlgExtendedError`.
    #[error("{0} failed: {1}")]
    CommDlg(&'static str, CdErr),

    /// `IDispatch::Invoke` raised an exception (`DISP_E_EXCEPTION`).
    #[error("{0}")]
    Exception(ComException),

    /// Call succeeded but returned a null pointer where an object was expected.
    #[error("null pointer returned by {0}")]
    NullPointer(&'static str),

    /// A callback slot is already bound to another closure.
    #[error("callback slot already in use: {0}")]
    CallbackBusy(&'static str),

    /// VARIANT holds a type the caller did not expect.
    #[error("unexpected VARIANT type {0}")]
    VariantType(u16),

    /// String could not be parsed as a GUID.
    #[error("invalid GUID string: {0}")]
    InvalidGuid(String),

    /// Generic error with descriptive message.
    #[error("{0}")]
    Msg(&'static str),
}

impl WinError {
    /// Builds a `Win32` error from the calling thread's last-error code.
    pub fn last(api: &'static str) -> Self {
        WinError::Win32(api, SysError::last())
    }

    /// Returns the error as an HRESULT, when one can be derived.
    pub fn hresult(&self) -> Option<i32> {
        match self {
            WinError::Com(_, hr) => Some(*hr),
            WinError::Win32(_, err) => Some(err.to_hresult()),
            WinError::Exception(ex) => Some(ex.scode),
            _ => None,
        }
    }
}

/// A Win32 error code, as returned by `GetLastError`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SysError(pub u32);

impl SysError {
    pub const SUCCESS: Self = Self(0);
    pub const INVALID_FUNCTION: Self = Self(1);
    pub const FILE_NOT_FOUND: Self = Self(2);
    pub const PATH_NOT_FOUND: Self = Self(3);
    pub const ACCESS_DENIED: Self = Self(5);
    pub const INVALID_HANDLE: Self = Self(6);
    pub const NOT_ENOUGH_MEMORY: Self = Self(8);
    pub const OUTOFMEMORY: Self = Self(14);
    pub const NOT_SUPPORTED: Self = Self(50);
    pub const FILE_EXISTS: Self = Self(80);
    pub const INVALID_PARAMETER: Self = Self(87);
    pub const INSUFFICIENT_BUFFER: Self = Self(122);
    pub const MOD_NOT_FOUND: Self = Self(126);
    pub const PROC_NOT_FOUND: Self = Self(127);
    pub const ALREADY_EXISTS: Self = Self(183);
    pub const ENVVAR_NOT_FOUND: Self = Self(203);
    pub const MORE_DATA: Self = Self(234);
    pub const INVALID_WINDOW_HANDLE: Self = Self(1400);
    pub const INVALID_MENU_HANDLE: Self = Self(1401);
    pub const INVALID_CURSOR_HANDLE: Self = Self(1402);
    pub const INVALID_ACCEL_HANDLE: Self = Self(1403);
    pub const INVALID_HOOK_HANDLE: Self = Self(1404);
    pub const CLASS_ALREADY_EXISTS: Self = Self(1410);
    pub const CLASS_DOES_NOT_EXIST: Self = Self(1411);
    pub const CLASS_HAS_WINDOWS: Self = Self(1412);
    pub const INVALID_INDEX: Self = Self(1413);
    pub const TIMEOUT: Self = Self(1460);

    /// Reads the calling thread's last-error code.
    #[inline]
    pub fn last() -> Self {
        Self(unsafe { windows_sys::Win32::Foundation::GetLastError() })
    }

    /// Sets the calling thread's last-error code.
    #[inline]
    pub fn set_last(self) {
        unsafe { windows_sys::Win32::Foundation::SetLastError(self.0) }
    }

    /// Returns the raw code.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Converts the code with the `HRESULT_FROM_WIN32` rule.
    pub const fn to_hresult(self) -> i32 {
        if (self.0 as i32) <= 0 {
            self.0 as i32
        } else {
            ((self.0 & 0x0000_FFFF) | (7 << 16) | 0x8000_0000) as i32
        }
    }

    /// Returns the symbolic name of common codes.
    pub fn name(self) -> Option<&'static str> {
        Some(match self.0 {
            0 => "ERROR_SUCCESS",
            1 => "ERROR_INVALID_FUNCTION",
            2 => "ERROR_FILE_NOT_FOUND",
            3 => "ERROR_PATH_NOT_FOUND",
            5 => "ERROR_ACCESS_DENIED",
            6 => "ERROR_INVALID_HANDLE",
            8 => "ERROR_NOT_ENOUGH_MEMORY",
            14 => "ERROR_OUTOFMEMORY",
            50 => "ERROR_NOT_SUPPORTED",
            80 => "ERROR_FILE_EXISTS",
            87 => "ERROR_INVALID_PARAMETER",
            122 => "ERROR_INSUFFICIENT_BUFFER",
            126 => "ERROR_MOD_NOT_FOUND",
            127 => "ERROR_PROC_NOT_FOUND",
            183 => "ERROR_ALREADY_EXISTS",
            203 => "ERROR_ENVVAR_NOT_FOUND",
            234 => "ERROR_MORE_DATA",
            1400 => "ERROR_INVALID_WINDOW_HANDLE",
            1401 => "ERROR_INVALID_MENU_HANDLE",
            1402 => "ERROR_INVALID_CURSOR_HANDLE",
            1403 => "ERROR_INVALID_ACCEL_HANDLE",
            1404 => "ERROR_INVALID_HOOK_HANDLE",
            1410 => "ERROR_CLASS_ALREADY_EXISTS",
            1411 => "ERROR_CLASS_DOES_NOT_EXIST",
            1412 => "ERROR_CLASS_HAS_WINDOWS",
            1413 => "ERROR_INVALID_INDEX",
            1460 => "ERROR_TIMEOUT",
            _ => return None,
        })
    }

    /// Retrieves the system description of the code with `FormatMessageW`.
    pub fn message(self) -> String {
        use windows_sys::Win32::System::Diagnostics::Debug::{
            FORMAT_MESSAGE_FROM_SYSTEM, FORMAT_MESSAGE_IGNORE_INSERTS, FormatMessageW,
        };

        let mut buf = [0u16; 512];
        let len = unsafe {
            FormatMessageW(
                FORMAT_MESSAGE_FROM_SYSTEM | FORMAT_MESSAGE_IGNORE_INSERTS,
                core::ptr::null(),
                self.0,
                0,
                buf.as_mut_ptr(),
                buf.len() as u32,
                core::ptr::null(),
            )
        } as usize;

        String::from_utf16_lossy(&buf[..len.min(buf.len())])
            .trim_end()
            .into()
    }
}

impl fmt::Debug for SysError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SysError({self})")
    }
}

impl fmt::Display for SysError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} ({})", self.0),
            None => write!(f, "error {}", self.0),
        }
    }
}

/// A common dialog box error code, as returned by `CommDlgExtendedError`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CdErr(pub u32);

impl CdErr {
    pub const DIALOGFAILURE: Self = Self(0xFFFF);
    pub const STRUCTSIZE: Self = Self(0x0001);
    pub const INITIALIZATION: Self = Self(0x0002);
    pub const NOTEMPLATE: Self = Self(0x0003);
    pub const NOHINSTANCE: Self = Self(0x0004);
    pub const LOADSTRFAILURE: Self = Self(0x0005);
    pub const FINDRESFAILURE: Self = Self(0x0006);
    pub const LOADRESFAILURE: Self = Self(0x0007);
    pub const LOCKRESFAILURE: Self = Self(0x0008);
    pub const MEMALLOCFAILURE: Self = Self(0x0009);
    pub const MEMLOCKFAILURE: Self = Self(0x000A);
    pub const NOHOOK: Self = Self(0x000B);
    pub const REGISTERMSGFAIL: Self = Self(0x000C);
    pub const FNERR_SUBCLASSFAILURE: Self = Self(0x3001);
    pub const FNERR_INVALIDFILENAME: Self = Self(0x3002);
    pub const FNERR_BUFFERTOOSMALL: Self = Self(0x3003);
    pub const CCERR_CHOOSECOLORCODES: Self = Self(0x5000);

    fn name(self) -> &'static str {
        match self.0 {
            0xFFFF => "CDERR_DIALOGFAILURE",
            0x0001 => "CDERR_STRUCTSIZE",
            0x0002 => "CDERR_INITIALIZATION",
            0x0003 => "CDERR_NOTEMPLATE",
            0x0004 => "CDERR_NOHINSTANCE",
            0x0005 => "CDERR_LOADSTRFAILURE",
            0x0006 => "CDERR_FINDRESFAILURE",
            0x0007 => "CDERR_LOADRESFAILURE",
            0x0008 => "CDERR_LOCKRESFAILURE",
            0x0009 => "CDERR_MEMALLOCFAILURE",
            0x000A => "CDERR_MEMLOCKFAILURE",
            0x000B => "CDERR_NOHOOK",
            0x000C => "CDERR_REGISTERMSGFAIL",
            0x3001 => "FNERR_SUBCLASSFAILURE",
            0x3002 => "FNERR_INVALIDFILENAME",
            0x3003 => "FNERR_BUFFERTOOSMALL",
            0x5000 => "CCERR_CHOOSECOLORCODES",
            _ => "CDERR_UNKNOWN",
        }
    }
}

impl fmt::Display for CdErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#06x})", self.name(), self.0)
    }
}

/// Exception payload filled by `IDispatch::Invoke` through `EXCEPINFO`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComException {
    /// Application error code (`wCode`), zero when `scode` is used.
    pub code: u16,

    /// Error HRESULT (`scode`).
    pub scode: i32,

    /// Name of the exception origin (`bstrSource`).
    pub origin: String,

    /// Human readable description (`bstrDescription`).
    pub description: String,

    /// Help file path (`bstrHelpFile`).
    pub help_file: String,

    /// Help context id (`dwHelpContext`).
    pub help_context: u32,
}

impl fmt::Display for ComException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "COM exception {:#010X}", self.scode)?;
        if self.code != 0 {
            write!(f, " (code {})", self.code)?;
        }
        if !self.origin.is_empty() {
            write!(f, " from {}", self.origin)?;
        }
        if !self.description.is_empty() {
            write!(f, ": {}", self.description)?;
        }
        Ok(())
    }
}
