use alloc::string::String;
use alloc::vec::Vec;
use core::ffi::c_void;

use windows_sys::Win32::Graphics::Gdi::{
    BeginPaint, ClientToScreen, GetDC, InvalidateRect, ScreenToClient, UpdateWindow,
};
use windows_sys::Win32::UI::Input::KeyboardAndMouse::{EnableWindow, GetFocus, IsWindowEnabled, SetFocus};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DestroyWindow, EnumChildWindows, EnumWindows, FindWindowExW, FindWindowW, GetClassNameW,
    GetClientRect, GetDlgItem,
    GetForegroundWindow, GetParent, GetWindowRect, GetWindowTextLengthW, GetWindowTextW,
    GetWindowThreadProcessId, IsWindow, IsWindowVisible, MoveWindow, SetForegroundWindow, SetParent,
    SetWindowPos, SetWindowTextW, ShowWindow,
};

use crate::callbacks::{self, WndMsg};
use crate::co::{CW_USEDEFAULT, SetWindowPosFlags, ShowCmd, WindowStyle, WindowStyleEx};
use crate::error::{Result, SysError, WinError};
use crate::guard::{DcGuard, Guard, PaintGuard, Painting, WindowDc};
use crate::handles::{HINSTANCE, HMENU, HWND};
use crate::kernel32::module_handle;
use crate::string::WString;
use crate::structs::{PAINTSTRUCT, POINT, RECT};

use super::checked_zero;

/// Arguments of `CreateWindowExW`.
#[derive(Debug, Clone)]
pub struct WindowParams<'a> {
    pub class_name: &'a str,
    pub title: &'a str,
    pub style: WindowStyle,
    pub ex_style: WindowStyleEx,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub parent: HWND,
    /// Menu for top-level windows, control id for child windows.
    pub menu: HMENU,
    pub instance: Option<HINSTANCE>,
}

impl<'a> WindowParams<'a> {
    /// Overlapped window of default position and size.
    pub fn new(class_name: &'a str, title: &'a str) -> Self {
        Self {
            class_name,
            title,
            style: WindowStyle::OVERLAPPEDWINDOW,
            ex_style: WindowStyleEx::empty(),
            x: CW_USEDEFAULT,
            y: CW_USEDEFAULT,
            width: CW_USEDEFAULT,
            height: CW_USEDEFAULT,
            parent: HWND::NULL,
            menu: HMENU::NULL,
            instance: None,
        }
    }

    /// Child control with the given id.
    pub fn child(class_name: &'a str, title: &'a str, parent: HWND, id: u16) -> Self {
        Self {
            style: WindowStyle::CHILD | WindowStyle::VISIBLE,
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            parent,
            menu: HMENU::from_ptr(core::ptr::without_provenance_mut(id as usize)),
            ..Self::new(class_name, title)
        }
    }
}

/// Creates a window of a class registered with [`super::WindowClass`],
/// binding `handler` as its window procedure.
///
/// The closure receives every message from `WM_NCCREATE` on and is dropped
/// after `WM_NCDESTROY`.
pub fn create_window<F>(params: &WindowParams, handler: F) -> Result<HWND>
where
    F: Fn(&WndMsg) -> Option<isize> + Send + Sync + 'static,
{
    let token = callbacks::register_window(handler);
    match create_window_ex(params, token.as_create_param()) {
        Ok(hwnd) => {
            // A class not served by the trampoline never consumes the token.
            token.discard();
            Ok(hwnd)
        }
        Err(err) => {
            token.discard();
            Err(err)
        }
    }
}

/// Calls `CreateWindowExW` with a raw `lpParam`, for any window class.
pub fn create_window_ex(params: &WindowParams, param: *mut c_void) -> Result<HWND> {
    let class = WString::from_str(params.class_name);
    let title = WString::from_str(params.title);
    let instance = match params.instance {
        Some(instance) => instance,
        None => module_handle(None)?,
    };

    let hwnd = unsafe {
        CreateWindowExW(
            params.ex_style.bits(),
            class.as_ptr(),
            title.as_ptr(),
            params.style.bits(),
            params.x,
            params.y,
            params.width,
            params.height,
            params.parent.ptr(),
            params.menu.ptr(),
            instance.ptr(),
            param,
        )
    };
    if hwnd.is_null() {
        return Err(WinError::last("CreateWindowExW"));
    }

    let hwnd = HWND::from_ptr(hwnd);
    log::debug!("created window {hwnd:?} of class {:?}", params.class_name);
    Ok(hwnd)
}

/// Finds a top-level window by class name, title, or both.
pub fn find_window(class_name: Option<&str>, title: Option<&str>) -> Option<HWND> {
    let class = class_name.map(WString::from_str);
    let title = title.map(WString::from_str);
    let hwnd = unsafe { FindWindowW(opt_wide(&class), opt_wide(&title)) };
    HWND::from_ptr(hwnd).as_opt()
}

/// Finds a child of `parent` following `after` in Z order.
pub fn find_window_ex(parent: HWND, after: HWND, class_name: Option<&str>, title: Option<&str>) -> Option<HWND> {
    let class = class_name.map(WString::from_str);
    let title = title.map(WString::from_str);
    let hwnd = unsafe { FindWindowExW(parent.ptr(), after.ptr(), opt_wide(&class), opt_wide(&title)) };
    HWND::from_ptr(hwnd).as_opt()
}

/// Returns the foreground window, if any.
pub fn foreground_window() -> Option<HWND> {
    HWND::from_ptr(unsafe { GetForegroundWindow() }).as_opt()
}

/// Returns the window with keyboard focus on the calling thread, if any.
pub fn focused_window() -> Option<HWND> {
    HWND::from_ptr(unsafe { GetFocus() }).as_opt()
}

/// Calls `callback` for each top-level window until it returns false.
pub fn enum_windows<F>(mut callback: F) -> Result<()>
where
    F: FnMut(HWND) -> bool,
{
    SysError::SUCCESS.set_last();
    let lparam = &mut callback as *mut F as isize;
    if unsafe { EnumWindows(Some(callbacks::enum_windows_proc::<F>), lparam) } == 0 {
        // Stopping early also returns zero, with no error set.
        let err = SysError::last();
        if err != SysError::SUCCESS {
            return Err(WinError::Win32("EnumWindows", err));
        }
    }
    Ok(())
}

/// Collects the top-level windows.
pub fn top_level_windows() -> Result<Vec<HWND>> {
    let mut windows = Vec::new();
    enum_windows(|hwnd| {
        windows.push(hwnd);
        true
    })?;
    Ok(windows)
}

fn opt_wide(value: &Option<WString>) -> *const u16 {
    value.as_ref().map_or(core::ptr::null(), |v| v.as_ptr())
}

impl HWND {
    pub fn DestroyWindow(self) -> Result<()> {
        match unsafe { DestroyWindow(self.ptr()) } {
            0 => Err(WinError::last("DestroyWindow")),
            _ => Ok(()),
        }
    }

    /// Returns true if the window was previously visible.
    pub fn ShowWindow(self, cmd: ShowCmd) -> bool {
        unsafe { ShowWindow(self.ptr(), cmd as i32) != 0 }
    }

    pub fn UpdateWindow(self) -> Result<()> {
        match unsafe { UpdateWindow(self.ptr()) } {
            0 => Err(WinError::Msg("UpdateWindow failed")),
            _ => Ok(()),
        }
    }

    pub fn IsWindow(self) -> bool {
        unsafe { IsWindow(self.ptr()) != 0 }
    }

    pub fn IsWindowVisible(self) -> bool {
        unsafe { IsWindowVisible(self.ptr()) != 0 }
    }

    pub fn IsWindowEnabled(self) -> bool {
        unsafe { IsWindowEnabled(self.ptr()) != 0 }
    }

    /// Returns true if the window was previously disabled.
    pub fn EnableWindow(self, enable: bool) -> bool {
        unsafe { EnableWindow(self.ptr(), enable as i32) != 0 }
    }

    /// Returns the window that previously had focus.
    pub fn SetFocus(self) -> Result<Option<HWND>> {
        let prev = checked_zero("SetFocus", || unsafe { SetFocus(self.ptr()) as usize })?;
        Ok(HWND::from_ptr(core::ptr::without_provenance_mut(prev)).as_opt())
    }

    /// Returns false if the system refused to change the foreground window.
    pub fn SetForegroundWindow(self) -> bool {
        unsafe { SetForegroundWindow(self.ptr()) != 0 }
    }

    pub fn GetWindowTextLength(self) -> Result<usize> {
        checked_zero("GetWindowTextLengthW", || unsafe { GetWindowTextLengthW(self.ptr()) }).map(|len| len as usize)
    }

    pub fn GetWindowText(self) -> Result<String> {
        let len = self.GetWindowTextLength()?;
        if len == 0 {
            return Ok(String::new());
        }

        let mut buf = WString::new_alloc_buf(len + 1);
        let copied = checked_zero("GetWindowTextW", || unsafe {
            GetWindowTextW(self.ptr(), buf.as_mut_ptr(), buf.buf_len() as i32)
        })?;
        buf.resize(copied as usize + 1);
        Ok(buf.to_string_lossy())
    }

    pub fn SetWindowText(self, text: &str) -> Result<()> {
        let text = WString::from_str(text);
        match unsafe { SetWindowTextW(self.ptr(), text.as_ptr()) } {
            0 => Err(WinError::last("SetWindowTextW")),
            _ => Ok(()),
        }
    }

    pub fn GetClassName(self) -> Result<String> {
        // Class names are limited to 256 characters.
        let mut buf = WString::new_alloc_buf(257);
        match unsafe { GetClassNameW(self.ptr(), buf.as_mut_ptr(), buf.buf_len() as i32) } {
            0 => Err(WinError::last("GetClassNameW")),
            _ => Ok(buf.to_string_lossy()),
        }
    }

    /// Window bounds in screen coordinates.
    pub fn GetWindowRect(self) -> Result<RECT> {
        let mut rc = RECT::default();
        match unsafe { GetWindowRect(self.ptr(), (&mut rc as *mut RECT).cast()) } {
            0 => Err(WinError::last("GetWindowRect")),
            _ => Ok(rc),
        }
    }

    /// Client area in client coordinates; `left` and `top` are zero.
    pub fn GetClientRect(self) -> Result<RECT> {
        let mut rc = RECT::default();
        match unsafe { GetClientRect(self.ptr(), (&mut rc as *mut RECT).cast()) } {
            0 => Err(WinError::last("GetClientRect")),
            _ => Ok(rc),
        }
    }

    pub fn SetWindowPos(
        self,
        insert_after: HWND,
        x: i32,
        y: i32,
        cx: i32,
        cy: i32,
        flags: SetWindowPosFlags,
    ) -> Result<()> {
        match unsafe { SetWindowPos(self.ptr(), insert_after.ptr(), x, y, cx, cy, flags.bits()) } {
            0 => Err(WinError::last("SetWindowPos")),
            _ => Ok(()),
        }
    }

    pub fn MoveWindow(self, x: i32, y: i32, width: i32, height: i32, repaint: bool) -> Result<()> {
        match unsafe { MoveWindow(self.ptr(), x, y, width, height, repaint as i32) } {
            0 => Err(WinError::last("MoveWindow")),
            _ => Ok(()),
        }
    }

    /// Parent or owner window; `None` for a top-level unowned window.
    pub fn GetParent(self) -> Result<Option<HWND>> {
        let parent = checked_zero("GetParent", || unsafe { GetParent(self.ptr()) as usize })?;
        Ok(HWND::from_ptr(core::ptr::without_provenance_mut(parent)).as_opt())
    }

    /// Returns the previous parent.
    pub fn SetParent(self, parent: HWND) -> Result<HWND> {
        let prev = unsafe { SetParent(self.ptr(), parent.ptr()) };
        if prev.is_null() {
            return Err(WinError::last("SetParent"));
        }
        Ok(HWND::from_ptr(prev))
    }

    pub fn GetDlgItem(self, id: i32) -> Result<HWND> {
        let item = unsafe { GetDlgItem(self.ptr(), id) };
        if item.is_null() {
            return Err(WinError::last("GetDlgItem"));
        }
        Ok(HWND::from_ptr(item))
    }

    /// Returns `(thread id, process id)` of the creating thread.
    pub fn GetWindowThreadProcessId(self) -> Result<(u32, u32)> {
        let mut pid = 0;
        match unsafe { GetWindowThreadProcessId(self.ptr(), &mut pid) } {
            0 => Err(WinError::last("GetWindowThreadProcessId")),
            tid => Ok((tid, pid)),
        }
    }

    pub fn ClientToScreen(self, pt: POINT) -> Result<POINT> {
        let mut pt = pt;
        match unsafe { ClientToScreen(self.ptr(), (&mut pt as *mut POINT).cast()) } {
            0 => Err(WinError::Msg("ClientToScreen failed")),
            _ => Ok(pt),
        }
    }

    pub fn ScreenToClient(self, pt: POINT) -> Result<POINT> {
        let mut pt = pt;
        match unsafe { ScreenToClient(self.ptr(), (&mut pt as *mut POINT).cast()) } {
            0 => Err(WinError::Msg("ScreenToClient failed")),
            _ => Ok(pt),
        }
    }

    /// Adds `rect`, or the whole client area for `None`, to the update region.
    pub fn InvalidateRect(self, rect: Option<&RECT>, erase: bool) -> Result<()> {
        let rect = rect.map_or(core::ptr::null(), |rc| rc as *const RECT);
        match unsafe { InvalidateRect(self.ptr(), rect.cast(), erase as i32) } {
            0 => Err(WinError::Msg("InvalidateRect failed")),
            _ => Ok(()),
        }
    }

    /// Calls `callback` for each descendant window until it returns false.
    pub fn EnumChildWindows<F>(self, mut callback: F)
    where
        F: FnMut(HWND) -> bool,
    {
        let lparam = &mut callback as *mut F as isize;
        // The return value is not used.
        unsafe { EnumChildWindows(self.ptr(), Some(callbacks::enum_windows_proc::<F>), lparam) };
    }

    /// Collects the descendant windows.
    pub fn child_windows(self) -> Vec<HWND> {
        let mut children = Vec::new();
        self.EnumChildWindows(|hwnd| {
            children.push(hwnd);
            true
        });
        children
    }

    /// Retrieves the client area DC, released when the guard drops.
    pub fn GetDC(self) -> Result<DcGuard> {
        let hdc = unsafe { GetDC(self.ptr()) };
        if hdc.is_null() {
            return Err(WinError::Msg("GetDC failed"));
        }
        Ok(unsafe { Guard::new(WindowDc { hwnd: self, hdc: crate::handles::HDC::from_ptr(hdc) }) })
    }

    /// Starts painting in response to `WM_PAINT`; `EndPaint` runs when the
    /// guard drops.
    pub fn BeginPaint(self) -> Result<PaintGuard> {
        let mut ps = PAINTSTRUCT::default();
        let hdc = unsafe { BeginPaint(self.ptr(), (&mut ps as *mut PAINTSTRUCT).cast()) };
        if hdc.is_null() {
            return Err(WinError::Msg("BeginPaint failed"));
        }
        Ok(unsafe { Guard::new(Painting { hwnd: self, ps }) })
    }
}
