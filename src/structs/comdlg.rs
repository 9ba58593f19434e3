//! Common dialog structures. `commdlg.h` packs them to 1 byte on 32-bit x86.

use super::COLORREF;
use crate::handles::{HINSTANCE, HWND};

/// Hook procedure for the common dialogs (`LPOFNHOOKPROC`, `LPCCHOOKPROC`).
pub type CDHOOKPROC = Option<unsafe extern "system" fn(HWND, u32, usize, isize) -> usize>;

/// [`OPENFILENAMEW`](https://learn.microsoft.com/en-us/windows/win32/api/commdlg/ns-commdlg-openfilenamew) struct.
#[cfg_attr(target_arch = "x86", repr(C, packed(1)))]
#[cfg_attr(not(target_arch = "x86"), repr(C))]
#[derive(Clone, Copy)]
pub struct OPENFILENAMEW {
    pub lStructSize: u32,
    pub hwndOwner: HWND,
    pub hInstance: HINSTANCE,
    pub lpstrFilter: *const u16,
    pub lpstrCustomFilter: *mut u16,
    pub nMaxCustFilter: u32,
    pub nFilterIndex: u32,
    pub lpstrFile: *mut u16,
    pub nMaxFile: u32,
    pub lpstrFileTitle: *mut u16,
    pub nMaxFileTitle: u32,
    pub lpstrInitialDir: *const u16,
    pub lpstrTitle: *const u16,
    pub Flags: u32,
    pub nFileOffset: u16,
    pub nFileExtension: u16,
    pub lpstrDefExt: *const u16,
    pub lCustData: isize,
    pub lpfnHook: CDHOOKPROC,
    pub lpTemplateName: *const u16,
    pub pvReserved: *mut core::ffi::c_void,
    pub dwReserved: u32,
    pub FlagsEx: u32,
}

impl OPENFILENAMEW {
    /// Zeroed struct with `lStructSize` set.
    pub fn new() -> Self {
        Self {
            lStructSize: size_of::<Self>() as u32,
            ..Default::default()
        }
    }
}

/// [`CHOOSECOLORW`](https://learn.microsoft.com/en-us/windows/win32/api/commdlg/ns-commdlg-choosecolorw-r1) struct.
#[cfg_attr(target_arch = "x86", repr(C, packed(1)))]
#[cfg_attr(not(target_arch = "x86"), repr(C))]
#[derive(Clone, Copy)]
pub struct CHOOSECOLORW {
    pub lStructSize: u32,
    pub hwndOwner: HWND,
    pub hInstance: HWND,
    pub rgbResult: COLORREF,
    pub lpCustColors: *mut COLORREF,
    pub Flags: u32,
    pub lCustData: isize,
    pub lpfnHook: CDHOOKPROC,
    pub lpTemplateName: *const u16,
}

impl CHOOSECOLORW {
    /// Zeroed struct with `lStructSize` set.
    pub fn new() -> Self {
        Self {
            lStructSize: size_of::<Self>() as u32,
            ..Default::default()
        }
    }
}

zeroed_default!(OPENFILENAMEW, CHOOSECOLORW);

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::offset_of;
    use windows_sys::Win32::UI::Controls::Dialogs as sys;

    #[test]
    fn test_layout_matches_sdk() {
        assert_eq!(size_of::<OPENFILENAMEW>(), size_of::<sys::OPENFILENAMEW>());
        assert_eq!(offset_of!(OPENFILENAMEW, Flags), offset_of!(sys::OPENFILENAMEW, Flags));
        assert_eq!(offset_of!(OPENFILENAMEW, FlagsEx), offset_of!(sys::OPENFILENAMEW, FlagsEx));
        assert_eq!(size_of::<CHOOSECOLORW>(), size_of::<sys::CHOOSECOLORW>());
        assert_eq!(offset_of!(CHOOSECOLORW, lpCustColors), offset_of!(sys::CHOOSECOLORW, lpCustColors));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_sizes_64bit() {
        assert_eq!(size_of::<OPENFILENAMEW>(), 152);
        assert_eq!(size_of::<CHOOSECOLORW>(), 72);
    }

    #[test]
    fn test_struct_size_initialized() {
        let ofn = OPENFILENAMEW::new();
        let size = ofn.lStructSize;
        assert_eq!(size as usize, size_of::<sys::OPENFILENAMEW>());
    }
}
