use windows_sys::Win32::UI::WindowsAndMessaging::{RegisterClassExW, UnregisterClassW};

use crate::callbacks::window_proc;
use crate::co::ClassStyle;
use crate::error::{Result, WinError};
use crate::handles::{HBRUSH, HCURSOR, HICON, HINSTANCE};
use crate::kernel32::module_handle;
use crate::string::WString;
use crate::structs::WNDCLASSEXW;

/// Registration data for a window class served by [`window_proc`].
#[derive(Debug, Clone)]
pub struct WindowClass<'a> {
    pub name: &'a str,
    pub style: ClassStyle,
    pub icon: HICON,
    pub icon_small: HICON,
    pub cursor: HCURSOR,
    pub background: HBRUSH,
    pub menu_name: Option<&'a str>,
    /// Module owning the class; `None` for the current executable.
    pub instance: Option<HINSTANCE>,
}

impl<'a> WindowClass<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            style: ClassStyle::HREDRAW | ClassStyle::VREDRAW,
            icon: HICON::NULL,
            icon_small: HICON::NULL,
            cursor: HCURSOR::NULL,
            background: HBRUSH::NULL,
            menu_name: None,
            instance: None,
        }
    }

    /// Registers the class. Returns the class atom.
    pub fn register(&self) -> Result<u16> {
        let name = WString::from_str(self.name);
        let menu = self.menu_name.map(WString::from_str);
        let instance = match self.instance {
            Some(instance) => instance,
            None => module_handle(None)?,
        };

        let wc = WNDCLASSEXW {
            style: self.style.bits(),
            lpfnWndProc: Some(window_proc),
            hInstance: instance,
            hIcon: self.icon,
            hIconSm: self.icon_small,
            hCursor: self.cursor,
            hbrBackground: self.background,
            lpszMenuName: menu.as_ref().map_or(core::ptr::null(), |m| m.as_ptr()),
            lpszClassName: name.as_ptr(),
            ..WNDCLASSEXW::new()
        };
        register_class_ex(&wc)
    }
}

/// Registers a class from a raw `WNDCLASSEXW`. Returns the class atom.
pub fn register_class_ex(wc: &WNDCLASSEXW) -> Result<u16> {
    let atom = unsafe { RegisterClassExW((wc as *const WNDCLASSEXW).cast()) };
    if atom == 0 {
        return Err(WinError::last("RegisterClassExW"));
    }
    log::trace!("RegisterClassExW -> atom {atom:#x}");
    Ok(atom)
}

/// Unregisters a class by name.
pub fn unregister_class(name: &str, instance: Option<HINSTANCE>) -> Result<()> {
    let name = WString::from_str(name);
    let instance = match instance {
        Some(instance) => instance,
        None => module_handle(None)?,
    };
    match unsafe { UnregisterClassW(name.as_ptr(), instance.ptr()) } {
        0 => Err(WinError::last("UnregisterClassW")),
        _ => Ok(()),
    }
}
