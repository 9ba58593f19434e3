use core::ffi::c_void;

use super::{POINT, RECT};
use crate::handles::{HBITMAP, HBRUSH, HCURSOR, HDC, HICON, HINSTANCE, HMENU, HWND};

/// Window procedure signature (`WNDPROC`).
pub type WNDPROC = Option<unsafe extern "system" fn(HWND, u32, usize, isize) -> isize>;

/// [`MSG`](https://learn.microsoft.com/en-us/windows/win32/api/winuser/ns-winuser-msg) struct.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct MSG {
    pub hwnd: HWND,
    pub message: u32,
    pub wParam: usize,
    pub lParam: isize,
    pub time: u32,
    pub pt: POINT,
}

/// [`WNDCLASSEXW`](https://learn.microsoft.com/en-us/windows/win32/api/winuser/ns-winuser-wndclassexw) struct.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct WNDCLASSEXW {
    pub cbSize: u32,
    pub style: u32,
    pub lpfnWndProc: WNDPROC,
    pub cbClsExtra: i32,
    pub cbWndExtra: i32,
    pub hInstance: HINSTANCE,
    pub hIcon: HICON,
    pub hCursor: HCURSOR,
    pub hbrBackground: HBRUSH,
    pub lpszMenuName: *const u16,
    pub lpszClassName: *const u16,
    pub hIconSm: HICON,
}

impl WNDCLASSEXW {
    /// Zeroed struct with `cbSize` set.
    pub fn new() -> Self {
        Self {
            cbSize: size_of::<Self>() as u32,
            ..Default::default()
        }
    }
}

/// [`MENUITEMINFOW`](https://learn.microsoft.com/en-us/windows/win32/api/winuser/ns-winuser-menuiteminfow) struct.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct MENUITEMINFOW {
    pub cbSize: u32,
    pub fMask: u32,
    pub fType: u32,
    pub fState: u32,
    pub wID: u32,
    pub hSubMenu: HMENU,
    pub hbmpChecked: HBITMAP,
    pub hbmpUnchecked: HBITMAP,
    pub dwItemData: usize,
    pub dwTypeData: *mut u16,
    pub cch: u32,
    pub hbmpItem: HBITMAP,
}

impl MENUITEMINFOW {
    /// Zeroed struct with `cbSize` set.
    pub fn new() -> Self {
        Self {
            cbSize: size_of::<Self>() as u32,
            ..Default::default()
        }
    }
}

/// [`ACCEL`](https://learn.microsoft.com/en-us/windows/win32/api/winuser/ns-winuser-accel) struct.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ACCEL {
    pub fVirt: u8,
    pub key: u16,
    pub cmd: u16,
}

/// [`CREATESTRUCTW`](https://learn.microsoft.com/en-us/windows/win32/api/winuser/ns-winuser-createstructw) struct.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct CREATESTRUCTW {
    pub lpCreateParams: *mut c_void,
    pub hInstance: HINSTANCE,
    pub hMenu: HMENU,
    pub hwndParent: HWND,
    pub cy: i32,
    pub cx: i32,
    pub y: i32,
    pub x: i32,
    pub style: i32,
    pub lpszName: *const u16,
    pub lpszClass: *const u16,
    pub dwExStyle: u32,
}

/// [`PAINTSTRUCT`](https://learn.microsoft.com/en-us/windows/win32/api/winuser/ns-winuser-paintstruct) struct.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct PAINTSTRUCT {
    pub hdc: HDC,
    pub fErase: i32,
    pub rcPaint: RECT,
    pub fRestore: i32,
    pub fIncUpdate: i32,
    pub rgbReserved: [u8; 32],
}

/// [`MINMAXINFO`](https://learn.microsoft.com/en-us/windows/win32/api/winuser/ns-winuser-minmaxinfo) struct.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct MINMAXINFO {
    pub ptReserved: POINT,
    pub ptMaxSize: POINT,
    pub ptMaxPosition: POINT,
    pub ptMinTrackSize: POINT,
    pub ptMaxTrackSize: POINT,
}

/// [`KBDLLHOOKSTRUCT`](https://learn.microsoft.com/en-us/windows/win32/api/winuser/ns-winuser-kbdllhookstruct) struct.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct KBDLLHOOKSTRUCT {
    pub vkCode: u32,
    pub scanCode: u32,
    pub flags: u32,
    pub time: u32,
    pub dwExtraInfo: usize,
}

/// [`MSLLHOOKSTRUCT`](https://learn.microsoft.com/en-us/windows/win32/api/winuser/ns-winuser-msllhookstruct) struct.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct MSLLHOOKSTRUCT {
    pub pt: POINT,
    pub mouseData: u32,
    pub flags: u32,
    pub time: u32,
    pub dwExtraInfo: usize,
}

/// [`CWPSTRUCT`](https://learn.microsoft.com/en-us/windows/win32/api/winuser/ns-winuser-cwpstruct) struct.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct CWPSTRUCT {
    pub lParam: isize,
    pub wParam: usize,
    pub message: u32,
    pub hwnd: HWND,
}

zeroed_default!(WNDCLASSEXW, MENUITEMINFOW, CREATESTRUCTW);

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::{align_of, offset_of};
    use windows_sys::Win32::UI::WindowsAndMessaging as sys;

    #[test]
    fn test_layout_matches_sdk() {
        assert_eq!(size_of::<MSG>(), size_of::<sys::MSG>());
        assert_eq!(offset_of!(MSG, time), offset_of!(sys::MSG, time));
        assert_eq!(offset_of!(MSG, pt), offset_of!(sys::MSG, pt));

        assert_eq!(size_of::<WNDCLASSEXW>(), size_of::<sys::WNDCLASSEXW>());
        assert_eq!(offset_of!(WNDCLASSEXW, lpfnWndProc), offset_of!(sys::WNDCLASSEXW, lpfnWndProc));
        assert_eq!(offset_of!(WNDCLASSEXW, hIconSm), offset_of!(sys::WNDCLASSEXW, hIconSm));

        assert_eq!(size_of::<MENUITEMINFOW>(), size_of::<sys::MENUITEMINFOW>());
        assert_eq!(offset_of!(MENUITEMINFOW, dwTypeData), offset_of!(sys::MENUITEMINFOW, dwTypeData));
        assert_eq!(offset_of!(MENUITEMINFOW, hbmpItem), offset_of!(sys::MENUITEMINFOW, hbmpItem));

        assert_eq!(size_of::<ACCEL>(), size_of::<sys::ACCEL>());
        assert_eq!(size_of::<ACCEL>(), 6);
        assert_eq!(align_of::<ACCEL>(), 2);

        assert_eq!(size_of::<CREATESTRUCTW>(), size_of::<sys::CREATESTRUCTW>());
        assert_eq!(offset_of!(CREATESTRUCTW, dwExStyle), offset_of!(sys::CREATESTRUCTW, dwExStyle));

        assert_eq!(size_of::<MINMAXINFO>(), size_of::<sys::MINMAXINFO>());
        assert_eq!(size_of::<KBDLLHOOKSTRUCT>(), size_of::<sys::KBDLLHOOKSTRUCT>());
        assert_eq!(offset_of!(KBDLLHOOKSTRUCT, dwExtraInfo), offset_of!(sys::KBDLLHOOKSTRUCT, dwExtraInfo));
        assert_eq!(size_of::<MSLLHOOKSTRUCT>(), size_of::<sys::MSLLHOOKSTRUCT>());
        assert_eq!(size_of::<CWPSTRUCT>(), size_of::<sys::CWPSTRUCT>());
        assert_eq!(offset_of!(CWPSTRUCT, hwnd), offset_of!(sys::CWPSTRUCT, hwnd));
    }

    #[test]
    fn test_paintstruct_layout() {
        use windows_sys::Win32::Graphics::Gdi::PAINTSTRUCT as SysPaint;
        assert_eq!(size_of::<PAINTSTRUCT>(), size_of::<SysPaint>());
        assert_eq!(offset_of!(PAINTSTRUCT, rgbReserved), offset_of!(SysPaint, rgbReserved));
    }

    #[test]
    fn test_cb_size_initialized() {
        assert_eq!(WNDCLASSEXW::new().cbSize as usize, size_of::<sys::WNDCLASSEXW>());
        assert_eq!(MENUITEMINFOW::new().cbSize as usize, size_of::<sys::MENUITEMINFOW>());
        assert!(WNDCLASSEXW::new().lpfnWndProc.is_none());
    }
}
