use alloc::{ffi::CString, string::String};
use core::ffi::c_void;

use windows_sys::Win32::System::LibraryLoader::{GetModuleFileNameW, GetModuleHandleW, GetProcAddress, LoadLibraryW};

use crate::error::{Result, WinError};
use crate::guard::{Guard, LibraryGuard};
use crate::handles::HINSTANCE;
use crate::string::WString;

/// Returns the handle of a module already loaded in the process, or of the
/// executable for `None`. The handle is not reference counted.
pub fn module_handle(name: Option<&str>) -> Result<HINSTANCE> {
    let name = name.map(WString::from_str);
    let ptr = name.as_ref().map_or(core::ptr::null(), |n| n.as_ptr());
    let hmod = unsafe { GetModuleHandleW(ptr) };
    if hmod.is_null() {
        return Err(WinError::last("GetModuleHandleW"));
    }
    Ok(HINSTANCE::from_ptr(hmod))
}

/// Loads a DLL, freed with `FreeLibrary` when the guard drops.
pub fn load_library(name: &str) -> Result<LibraryGuard> {
    let name = WString::from_str(name);
    let hmod = unsafe { LoadLibraryW(name.as_ptr()) };
    if hmod.is_null() {
        return Err(WinError::last("LoadLibraryW"));
    }
    log::debug!("loaded {name}");
    Ok(unsafe { Guard::new(HINSTANCE::from_ptr(hmod)) })
}

impl HINSTANCE {
    /// Resolves an exported function by name.
    ///
    /// The returned address must be transmuted to the export's exact
    /// signature before being called.
    pub fn GetProcAddress(self, name: &str) -> Result<*const c_void> {
        let name = CString::new(name).map_err(|_| WinError::Msg("export name contains a null byte"))?;
        match unsafe { GetProcAddress(self.ptr(), name.as_ptr().cast()) } {
            Some(proc) => Ok(proc as *const c_void),
            None => Err(WinError::last("GetProcAddress")),
        }
    }

    /// Full path of the module file; `HINSTANCE::NULL` is the executable.
    pub fn GetModuleFileName(self) -> Result<String> {
        let mut buf = WString::new_alloc_buf(crate::co::MAX_PATH);
        loop {
            let len = unsafe { GetModuleFileNameW(self.ptr(), buf.as_mut_ptr(), buf.buf_len() as u32) } as usize;
            if len == 0 {
                return Err(WinError::last("GetModuleFileNameW"));
            }
            // A truncated path fills the whole buffer.
            if len < buf.buf_len() {
                return Ok(buf.to_string_lossy());
            }
            let grown = buf.buf_len() * 2;
            buf.resize(grown);
        }
    }
}

#[cfg(all(test, windows))]
mod tests {
    use super::*;
    use crate::error::SysError;

    #[test]
    fn test_module_lookup() -> Result<()> {
        let exe = module_handle(None)?;
        assert!(!exe.is_null());
        let path = HINSTANCE::NULL.GetModuleFileName()?;
        assert_eq!(exe.GetModuleFileName()?, path);
        assert!(path.to_ascii_lowercase().ends_with(".exe"));
        Ok(())
    }

    #[test]
    fn test_load_and_resolve() -> Result<()> {
        let kernel = load_library("kernel32.dll")?;
        let proc = kernel.GetProcAddress("GetTickCount64")?;
        assert!(!proc.is_null());
        assert!(matches!(
            kernel.GetProcAddress("NoSuchExport"),
            Err(WinError::Win32("GetProcAddress", SysError::PROC_NOT_FOUND))
        ));
        kernel.close()
    }

    #[test]
    fn test_missing_library() {
        assert!(matches!(
            load_library("winabi-no-such-module.dll"),
            Err(WinError::Win32("LoadLibraryW", SysError::MOD_NOT_FOUND))
        ));
        assert!(module_handle(Some("winabi-no-such-module.dll")).is_err());
    }
}
