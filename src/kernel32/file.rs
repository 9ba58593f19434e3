use alloc::string::String;

use windows_sys::Win32::Storage::FileSystem::{
    CreateFileW, DeleteFileW, GetFileSizeEx, GetTempPathW, ReadFile, SetFilePointerEx, WriteFile,
};

use crate::co::{Disposition, FileAccess, FileAttributes, FileShare, SeekFrom};
use crate::error::{Result, WinError};
use crate::guard::{Guard, HandleGuard};
use crate::handles::HANDLE;
use crate::string::WString;

/// Opens or creates a file, closed when the guard drops.
pub fn create_file(
    path: &str,
    access: FileAccess,
    share: FileShare,
    disposition: Disposition,
    attributes: FileAttributes,
) -> Result<HandleGuard> {
    let path = WString::from_str(path);
    let handle = unsafe {
        CreateFileW(
            path.as_ptr(),
            access.bits(),
            share.bits(),
            core::ptr::null(),
            disposition as u32,
            attributes.bits(),
            core::ptr::null_mut(),
        )
    };

    let handle = HANDLE::from_ptr(handle);
    if handle == HANDLE::INVALID {
        return Err(WinError::last("CreateFileW"));
    }
    Ok(unsafe { Guard::new(handle) })
}

pub fn delete_file(path: &str) -> Result<()> {
    let path = WString::from_str(path);
    match unsafe { DeleteFileW(path.as_ptr()) } {
        0 => Err(WinError::last("DeleteFileW")),
        _ => Ok(()),
    }
}

/// Directory for temporary files, with a trailing backslash.
pub fn temp_path() -> Result<String> {
    let mut buf = WString::new_alloc_buf(crate::co::MAX_PATH + 1);
    loop {
        let len = unsafe { GetTempPathW(buf.buf_len() as u32, buf.as_mut_ptr()) } as usize;
        if len == 0 {
            return Err(WinError::last("GetTempPathW"));
        }
        // A too-small buffer makes the call return the required size.
        if len < buf.buf_len() {
            return Ok(buf.to_string_lossy());
        }
        buf.resize(len + 1);
    }
}

impl HANDLE {
    /// Reads into `buf`. Returns the bytes read, zero at end of file.
    pub fn ReadFile(self, buf: &mut [u8]) -> Result<usize> {
        let mut read = 0;
        let len = buf.len().min(u32::MAX as usize) as u32;
        match unsafe { ReadFile(self.ptr(), buf.as_mut_ptr(), len, &mut read, core::ptr::null_mut()) } {
            0 => Err(WinError::last("ReadFile")),
            _ => Ok(read as usize),
        }
    }

    /// Writes from `buf`. Returns the bytes written.
    pub fn WriteFile(self, buf: &[u8]) -> Result<usize> {
        let mut written = 0;
        let len = buf.len().min(u32::MAX as usize) as u32;
        match unsafe { WriteFile(self.ptr(), buf.as_ptr(), len, &mut written, core::ptr::null_mut()) } {
            0 => Err(WinError::last("WriteFile")),
            _ => Ok(written as usize),
        }
    }

    /// Writes all of `buf`, looping over partial writes.
    pub fn write_all(self, mut buf: &[u8]) -> Result<()> {
        while !buf.is_empty() {
            let written = self.WriteFile(buf)?;
            if written == 0 {
                return Err(WinError::Msg("WriteFile wrote zero bytes"));
            }
            buf = &buf[written..];
        }
        Ok(())
    }

    pub fn GetFileSizeEx(self) -> Result<u64> {
        let mut size = 0i64;
        match unsafe { GetFileSizeEx(self.ptr(), &mut size) } {
            0 => Err(WinError::last("GetFileSizeEx")),
            _ => Ok(size as u64),
        }
    }

    /// Moves the file pointer. Returns the new absolute position.
    pub fn SetFilePointerEx(self, offset: i64, from: SeekFrom) -> Result<u64> {
        let mut pos = 0i64;
        match unsafe { SetFilePointerEx(self.ptr(), offset, &mut pos, from as u32) } {
            0 => Err(WinError::last("SetFilePointerEx")),
            _ => Ok(pos as u64),
        }
    }
}
