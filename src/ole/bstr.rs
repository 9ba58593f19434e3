//! Owned `BSTR` strings.

use alloc::string::String;
use core::fmt;
use core::ops::Deref;

use windows_sys::Win32::Foundation::{SysAllocStringLen, SysFreeString, SysStringLen};

use crate::co::E_OUTOFMEMORY;
use crate::error::{Result, WinError};

/// A length-prefixed OLE string, freed with `SysFreeString` on drop.
///
/// A null `BSTR` is a valid empty string, so empty values never allocate.
#[repr(transparent)]
pub struct Bstr(*const u16);

impl Bstr {
    /// The null (empty) `BSTR`.
    #[inline]
    pub const fn new() -> Self {
        Self(core::ptr::null())
    }

    /// Allocates a `BSTR` holding the given UTF-16 units.
    pub fn try_from_wide(value: &[u16]) -> Result<Self> {
        if value.is_empty() {
            return Ok(Self::new());
        }
        let len = u32::try_from(value.len()).map_err(|_| WinError::Msg("string too long for a BSTR"))?;
        let raw = unsafe { SysAllocStringLen(value.as_ptr(), len) };
        if raw.is_null() {
            return Err(WinError::Com("SysAllocStringLen", E_OUTOFMEMORY));
        }
        Ok(Self(raw))
    }

    /// Like [`Bstr::try_from_wide`], falling back to the empty string when
    /// the allocation fails.
    pub fn from_wide(value: &[u16]) -> Self {
        Self::try_from_wide(value).unwrap_or_else(|err| {
            log::warn!("BSTR of {} units: {err}", value.len());
            Self::new()
        })
    }

    /// Allocates a `BSTR` from UTF-8 text.
    pub fn try_from_str(value: &str) -> Result<Self> {
        let wide: alloc::vec::Vec<u16> = value.encode_utf16().collect();
        Self::try_from_wide(&wide)
    }

    /// Takes ownership of a `BSTR` returned by a COM method.
    ///
    /// # Safety
    ///
    /// `raw` must be null or a `BSTR` the caller owns.
    #[inline]
    pub unsafe fn from_raw(raw: *const u16) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// Borrows the pointer for an `[in]` parameter.
    #[inline]
    pub fn as_ptr(&self) -> *const u16 {
        self.0
    }

    /// Releases ownership; the caller must free the result with `SysFreeString`.
    #[inline]
    pub fn into_raw(self) -> *const u16 {
        let raw = self.0;
        core::mem::forget(self);
        raw
    }

    /// Length in UTF-16 units, read from the prefix.
    pub fn len(&self) -> usize {
        if self.0.is_null() {
            0
        } else {
            unsafe { SysStringLen(self.0) as usize }
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decodes the string, replacing invalid surrogates.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(self)
    }
}

impl Deref for Bstr {
    type Target = [u16];

    fn deref(&self) -> &[u16] {
        match self.len() {
            0 => &[],
            len => unsafe { core::slice::from_raw_parts(self.0, len) },
        }
    }
}

impl Clone for Bstr {
    fn clone(&self) -> Self {
        Self::from_wide(self)
    }
}

impl Default for Bstr {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Bstr {
    fn drop(&mut self) {
        if !self.0.is_null() {
            unsafe { SysFreeString(self.0) };
        }
    }
}

impl fmt::Debug for Bstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bstr({:?})", self.to_string_lossy())
    }
}

impl fmt::Display for Bstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl From<&str> for Bstr {
    fn from(value: &str) -> Self {
        let wide: alloc::vec::Vec<u16> = value.encode_utf16().collect();
        Self::from_wide(&wide)
    }
}

impl From<&String> for Bstr {
    fn from(value: &String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<String> for Bstr {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}
