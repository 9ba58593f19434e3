use windows_sys::Win32::UI::WindowsAndMessaging::{
    DestroyIcon, GetSystemMetrics, LoadCursorW, LoadIconW, MessageBoxW,
};

use crate::co::{DlgId, IdcCursor, IdiIcon, MessageBoxStyle, SystemMetric};
use crate::error::{Result, WinError};
use crate::handles::{HCURSOR, HICON, HINSTANCE, HWND, make_int_resource};
use crate::string::WString;

/// Shows a modal message box and returns the button that closed it.
pub fn message_box(owner: HWND, text: &str, caption: &str, style: MessageBoxStyle) -> Result<DlgId> {
    let text = WString::from_str(text);
    let caption = WString::from_str(caption);
    let ret = unsafe { MessageBoxW(owner.ptr(), text.as_ptr(), caption.as_ptr(), style.bits()) };
    if ret == 0 {
        return Err(WinError::last("MessageBoxW"));
    }
    DlgId::from_raw(ret).ok_or(WinError::Msg("MessageBoxW returned an unknown button id"))
}

/// Loads a predefined system cursor. Shared cursors are never destroyed.
pub fn load_cursor(cursor: IdcCursor) -> Result<HCURSOR> {
    let hcursor = unsafe { LoadCursorW(core::ptr::null_mut(), make_int_resource(cursor as u16)) };
    if hcursor.is_null() {
        return Err(WinError::last("LoadCursorW"));
    }
    Ok(HCURSOR::from_ptr(hcursor))
}

/// Loads a predefined system icon. Shared icons are never destroyed.
pub fn load_icon(icon: IdiIcon) -> Result<HICON> {
    let hicon = unsafe { LoadIconW(core::ptr::null_mut(), make_int_resource(icon as u16)) };
    if hicon.is_null() {
        return Err(WinError::last("LoadIconW"));
    }
    Ok(HICON::from_ptr(hicon))
}

/// Loads an icon resource of `module` by ordinal.
pub fn load_icon_resource(module: HINSTANCE, id: u16) -> Result<HICON> {
    let hicon = unsafe { LoadIconW(module.ptr(), make_int_resource(id)) };
    if hicon.is_null() {
        return Err(WinError::last("LoadIconW"));
    }
    Ok(HICON::from_ptr(hicon))
}

/// Reads a system metric; zero for unknown indexes.
pub fn system_metrics(index: SystemMetric) -> i32 {
    unsafe { GetSystemMetrics(index as i32) }
}

impl HICON {
    /// Destroys an icon created by the application. Shared icons from
    /// [`load_icon`] must not be destroyed.
    pub fn DestroyIcon(self) -> Result<()> {
        match unsafe { DestroyIcon(self.ptr()) } {
            0 => Err(WinError::last("DestroyIcon")),
            _ => Ok(()),
        }
    }
}
