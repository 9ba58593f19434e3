//! Opaque handle types.
//!
//! A handle is a pointer-sized value naming an object owned by the system.
//! Holding one does not keep the object alive; see [`crate::guard`] for the
//! owning counterparts that call the matching destroy function.

use core::ffi::c_void;

handle! {
    /// Handle to a window.
    HWND
}

handle! {
    /// Handle to a menu.
    HMENU
}

handle! {
    /// Handle to a device context.
    HDC
}

handle! {
    /// Handle to a module instance. Same value as `HMODULE`.
    HINSTANCE
}

handle! {
    /// Handle to an accelerator table.
    HACCEL
}

handle! {
    /// Handle to an icon.
    HICON
}

handle! {
    /// Handle to a cursor.
    HCURSOR
}

handle! {
    /// Handle to a GDI brush.
    HBRUSH
}

handle! {
    /// Handle to a GDI pen.
    HPEN
}

handle! {
    /// Handle to a GDI font.
    HFONT
}

handle! {
    /// Handle to a GDI bitmap.
    HBITMAP
}

handle! {
    /// Handle to a GDI region.
    HRGN
}

handle! {
    /// Generic GDI object handle.
    HGDIOBJ
}

handle! {
    /// Handle to an installed hook procedure.
    HHOOK
}

handle! {
    /// Handle to a display monitor.
    HMONITOR
}

handle! {
    /// Handle to an image list.
    HIMAGELIST
}

handle! {
    /// Generic kernel object handle.
    HANDLE
}

/// `HMODULE` is the same value as `HINSTANCE`.
pub type HMODULE = HINSTANCE;

impl HANDLE {
    /// `INVALID_HANDLE_VALUE`, returned by `CreateFile` and friends on failure.
    pub const INVALID: Self = Self(core::ptr::without_provenance_mut(usize::MAX));

    /// Returns true if the handle is null or `INVALID_HANDLE_VALUE`.
    #[inline]
    pub fn is_invalid(self) -> bool {
        self.0.is_null() || self == Self::INVALID
    }
}

impl HWND {
    /// `HWND_DESKTOP`, also the parent of top-level windows.
    pub const DESKTOP: Self = Self::NULL;

    /// `HWND_TOP` insertion point for `SetWindowPos`.
    pub const TOP: Self = Self::NULL;

    /// `HWND_BOTTOM` insertion point for `SetWindowPos`.
    pub const BOTTOM: Self = Self(core::ptr::without_provenance_mut(1));

    /// `HWND_TOPMOST` insertion point for `SetWindowPos`.
    pub const TOPMOST: Self = Self(core::ptr::without_provenance_mut(usize::MAX));

    /// `HWND_NOTOPMOST` insertion point for `SetWindowPos`.
    pub const NOTOPMOST: Self = Self(core::ptr::without_provenance_mut(usize::MAX - 1));

    /// `HWND_MESSAGE`, parent of message-only windows.
    pub const MESSAGE: Self = Self(core::ptr::without_provenance_mut(usize::MAX - 2));
}

/// Handles to GDI objects that can be selected into a device context and
/// destroyed with `DeleteObject`.
pub trait GdiObject: Copy {
    /// Reinterprets the handle as `HGDIOBJ`.
    fn as_gdi(self) -> HGDIOBJ;

    /// Reinterprets a `HGDIOBJ` as this handle type.
    fn from_gdi(obj: HGDIOBJ) -> Self;
}

macro_rules! gdi_object {
    ($($name:ident),*) => {
        $(
            impl GdiObject for $name {
                #[inline]
                fn as_gdi(self) -> HGDIOBJ {
                    HGDIOBJ(self.0)
                }

                #[inline]
                fn from_gdi(obj: HGDIOBJ) -> Self {
                    Self(obj.0)
                }
            }
        )*
    };
}

gdi_object!(HBRUSH, HPEN, HFONT, HBITMAP, HRGN, HGDIOBJ);

/// Creates a resource identifier from an ordinal (`MAKEINTRESOURCE`).
#[inline]
pub const fn make_int_resource(id: u16) -> *const u16 {
    core::ptr::without_provenance(id as usize)
}

/// Reinterprets a raw pointer as a resource identifier if it is an ordinal.
#[inline]
pub fn is_int_resource(ptr: *const c_void) -> bool {
    (ptr as usize) >> 16 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn test_null_handles() {
        assert!(HWND::NULL.is_null());
        assert!(HWND::default().is_null());
        assert_eq!(HMENU::NULL.as_opt(), None);
        let hwnd = HWND::from_ptr(0x1234 as *mut c_void);
        assert_eq!(hwnd.as_opt(), Some(hwnd));
        assert_eq!(hwnd.ptr() as usize, 0x1234);
    }

    #[test]
    fn test_invalid_handle() {
        assert!(HANDLE::INVALID.is_invalid());
        assert!(HANDLE::NULL.is_invalid());
        assert!(!HANDLE::INVALID.is_null());
        assert_eq!(HANDLE::INVALID.ptr() as isize, -1);
        assert!(!HANDLE::from_ptr(0x40 as *mut c_void).is_invalid());
    }

    #[test]
    fn test_insert_after_sentinels() {
        assert_eq!(HWND::TOPMOST.ptr() as isize, -1);
        assert_eq!(HWND::NOTOPMOST.ptr() as isize, -2);
        assert_eq!(HWND::MESSAGE.ptr() as isize, -3);
        assert_eq!(HWND::BOTTOM.ptr() as isize, 1);
    }

    #[test]
    fn test_gdi_conversion() {
        let brush = HBRUSH::from_ptr(0x88 as *mut c_void);
        let obj = brush.as_gdi();
        assert_eq!(obj.ptr(), brush.ptr());
        assert_eq!(HBRUSH::from_gdi(obj), brush);
    }

    #[test]
    fn test_handle_layout() {
        assert_eq!(size_of::<HWND>(), size_of::<usize>());
        assert_eq!(size_of::<Option<HWND>>(), 2 * size_of::<usize>());
        assert_eq!(format!("{:?}", HWND::from_ptr(0x10 as *mut c_void)), "HWND(0x10)");
    }

    #[test]
    fn test_int_resource() {
        let ptr = make_int_resource(32512);
        assert_eq!(ptr as usize, 32512);
        assert!(is_int_resource(ptr.cast()));
    }
}
