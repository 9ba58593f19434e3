//! Shell structures used by the taskbar and file dialog interfaces.

use crate::handles::HICON;
use crate::string::WString;

/// [`THUMBBUTTON`](https://learn.microsoft.com/en-us/windows/win32/api/shobjidl_core/ns-shobjidl_core-thumbbutton) struct.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct THUMBBUTTON {
    pub dwMask: u32,
    pub iId: u32,
    pub iBitmap: u32,
    pub hIcon: HICON,
    pub szTip: [u16; 260],
    pub dwFlags: u32,
}

impl THUMBBUTTON {
    /// Copies `tip` into `szTip`, truncating to fit the null terminator.
    pub fn set_tip(&mut self, tip: &str) {
        self.szTip = [0; 260];
        for (dst, src) in self.szTip.iter_mut().take(259).zip(tip.encode_utf16()) {
            *dst = src;
        }
    }

    pub fn tip(&self) -> alloc::string::String {
        WString::from_wide(&self.szTip).to_string_lossy()
    }
}

/// [`COMDLG_FILTERSPEC`](https://learn.microsoft.com/en-us/windows/win32/api/shtypes/ns-shtypes-comdlg_filterspec) struct.
///
/// Both strings are borrowed; the caller keeps them alive for the call.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct COMDLG_FILTERSPEC {
    pub pszName: *const u16,
    pub pszSpec: *const u16,
}

zeroed_default!(THUMBBUTTON, COMDLG_FILTERSPEC);
