//! Owning guards pairing each "create X" with its "destroy X".
//!
//! A [`Guard`] holds one resource and releases it exactly once when dropped.
//! [`Guard::leak`] hands the raw resource back without releasing it, and
//! [`Guard::close`] releases it early and reports failure.

use core::ops::Deref;

use windows_sys::Win32::Foundation::{CloseHandle, FreeLibrary};
use windows_sys::Win32::Graphics::Gdi::{DeleteDC, DeleteObject, EndPaint, ReleaseDC, RestoreDC, SelectObject};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    DestroyAcceleratorTable, DestroyIcon, DestroyMenu, DestroyWindow, KillTimer, UnhookWindowsHookEx,
};

use crate::co::HookId;
use crate::error::{Result, WinError};
use crate::handles::*;
use crate::structs::PAINTSTRUCT;

/// A resource with a matching release function.
pub trait Release: Copy {
    /// Name of the release function, for errors and logs.
    const API: &'static str;

    /// Calls the release function. Returns false on failure.
    ///
    /// # Safety
    ///
    /// The resource must be live and owned by the caller.
    unsafe fn release(self) -> bool;
}

/// Owns a resource and releases it on drop.
#[must_use = "dropping the guard releases the resource immediately"]
pub struct Guard<R: Release> {
    res: R,
}

impl<R: Release> Guard<R> {
    /// Takes ownership of `res`.
    ///
    /// # Safety
    ///
    /// `res` must be live, and nothing else may release it.
    #[inline]
    pub unsafe fn new(res: R) -> Self {
        Self { res }
    }

    /// Gives up ownership without releasing.
    pub fn leak(self) -> R {
        let this = core::mem::ManuallyDrop::new(self);
        this.res
    }

    /// Releases the resource now.
    pub fn close(self) -> Result<()> {
        let res = self.leak();
        if unsafe { res.release() } {
            Ok(())
        } else {
            Err(WinError::last(R::API))
        }
    }
}

impl<R: Release> Deref for Guard<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.res
    }
}

impl<R: Release + core::fmt::Debug> core::fmt::Debug for Guard<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Guard").field(&self.res).finish()
    }
}

impl<R: Release> Drop for Guard<R> {
    fn drop(&mut self) {
        if !unsafe { self.res.release() } {
            log::debug!("{} failed: {}", R::API, crate::error::SysError::last());
        }
    }
}

macro_rules! release_handle {
    ($($ty:ty => $api:ident),* $(,)?) => {
        $(
            impl Release for $ty {
                const API: &'static str = stringify!($api);

                unsafe fn release(self) -> bool {
                    unsafe { $api(self.ptr()) != 0 }
                }
            }
        )*
    };
}

release_handle! {
    HMENU => DestroyMenu,
    HACCEL => DestroyAcceleratorTable,
    HICON => DestroyIcon,
    HWND => DestroyWindow,
    HINSTANCE => FreeLibrary,
}

impl Release for HANDLE {
    const API: &'static str = "CloseHandle";

    unsafe fn release(self) -> bool {
        self.is_invalid() || unsafe { CloseHandle(self.ptr()) != 0 }
    }
}

macro_rules! release_gdi {
    ($($ty:ty),*) => {
        $(
            impl Release for $ty {
                const API: &'static str = "DeleteObject";

                unsafe fn release(self) -> bool {
                    unsafe { DeleteObject(self.ptr()) != 0 }
                }
            }
        )*
    };
}

release_gdi!(HBRUSH, HPEN, HFONT, HBITMAP, HRGN, HGDIOBJ);

/// A window DC from `GetDC`, released with `ReleaseDC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDc {
    pub hwnd: HWND,
    pub hdc: HDC,
}

impl Release for WindowDc {
    const API: &'static str = "ReleaseDC";

    unsafe fn release(self) -> bool {
        unsafe { ReleaseDC(self.hwnd.ptr(), self.hdc.ptr()) == 1 }
    }
}

/// A memory DC from `CreateCompatibleDC`, released with `DeleteDC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryDc(pub HDC);

impl Release for MemoryDc {
    const API: &'static str = "DeleteDC";

    unsafe fn release(self) -> bool {
        unsafe { DeleteDC(self.0.ptr()) != 0 }
    }
}

/// A `BeginPaint` session, closed with `EndPaint`.
#[derive(Debug, Clone, Copy)]
pub struct Painting {
    pub hwnd: HWND,
    pub ps: PAINTSTRUCT,
}

impl Release for Painting {
    const API: &'static str = "EndPaint";

    unsafe fn release(self) -> bool {
        unsafe { EndPaint(self.hwnd.ptr(), (&self.ps as *const PAINTSTRUCT).cast()) != 0 }
    }
}

/// An object selected into a DC; dropping selects the previous one back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub hdc: HDC,
    pub prev: HGDIOBJ,
}

impl Release for Selection {
    const API: &'static str = "SelectObject";

    unsafe fn release(self) -> bool {
        !unsafe { SelectObject(self.hdc.ptr(), self.prev.ptr()) }.is_null()
    }
}

/// A DC state pushed by `SaveDC`, popped with `RestoreDC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedDc {
    pub hdc: HDC,
    pub id: i32,
}

impl Release for SavedDc {
    const API: &'static str = "RestoreDC";

    unsafe fn release(self) -> bool {
        unsafe { RestoreDC(self.hdc.ptr(), self.id) != 0 }
    }
}

/// A hook installed by [`crate::user32::set_windows_hook`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstalledHook {
    pub id: HookId,
    pub hhook: HHOOK,
}

impl Release for InstalledHook {
    const API: &'static str = "UnhookWindowsHookEx";

    unsafe fn release(self) -> bool {
        let ok = unsafe { UnhookWindowsHookEx(self.hhook.ptr()) != 0 };
        crate::callbacks::release_hook(self.id);
        log::trace!("hook {:?} removed", self.id);
        ok
    }
}

/// A timer started by [`crate::user32::set_timer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveTimer {
    pub hwnd: HWND,
    pub id: usize,
    /// Handler binding this guard owns.
    pub generation: usize,
}

impl Release for ActiveTimer {
    const API: &'static str = "KillTimer";

    unsafe fn release(self) -> bool {
        // A newer set_timer on the same id owns the timer now.
        if !crate::callbacks::unbind_timer(self.hwnd, self.id, self.generation) {
            log::trace!("timer {} of {:?} was replaced", self.id, self.hwnd);
            return true;
        }
        unsafe { KillTimer(self.hwnd.ptr(), self.id) != 0 }
    }
}

pub type MenuGuard = Guard<HMENU>;
pub type AccelGuard = Guard<HACCEL>;
pub type IconGuard = Guard<HICON>;
pub type WindowGuard = Guard<HWND>;
pub type LibraryGuard = Guard<HINSTANCE>;
pub type HandleGuard = Guard<HANDLE>;
pub type GdiGuard<T> = Guard<T>;
pub type DcGuard = Guard<WindowDc>;
pub type MemDcGuard = Guard<MemoryDc>;
pub type PaintGuard = Guard<Painting>;
pub type SelectGuard = Guard<Selection>;
pub type SavedDcGuard = Guard<SavedDc>;
pub type HookGuard = Guard<InstalledHook>;
pub type TimerGuard = Guard<ActiveTimer>;

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU32, Ordering};

    static RELEASED: AtomicU32 = AtomicU32::new(0);

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Counted(u32, bool);

    impl Release for Counted {
        const API: &'static str = "Counted";

        unsafe fn release(self) -> bool {
            RELEASED.fetch_add(self.0, Ordering::SeqCst);
            self.1
        }
    }

    #[test]
    fn test_guard_lifecycle() {
        // Each case uses a distinct weight so the shared counter identifies it.
        let before = RELEASED.load(Ordering::SeqCst);
        {
            let guard = unsafe { Guard::new(Counted(1, true)) };
            assert_eq!(guard.0, 1);
        }
        assert_eq!(RELEASED.load(Ordering::SeqCst) - before, 1);

        let guard = unsafe { Guard::new(Counted(10, true)) };
        assert_eq!(guard.leak(), Counted(10, true));
        assert_eq!(RELEASED.load(Ordering::SeqCst) - before, 1);

        let guard = unsafe { Guard::new(Counted(100, true)) };
        assert!(guard.close().is_ok());
        assert_eq!(RELEASED.load(Ordering::SeqCst) - before, 101);
    }

    #[cfg(windows)]
    #[test]
    fn test_close_reports_failure() {
        let guard = unsafe { Guard::new(Counted(0, false)) };
        assert!(matches!(guard.close(), Err(WinError::Win32("Counted", _))));
    }

    #[cfg(windows)]
    #[test]
    fn test_replaced_timer_guard_is_inert() {
        use alloc::sync::Arc;

        let hwnd = HWND::from_ptr(core::ptr::without_provenance_mut(0xC200));
        let old = crate::callbacks::bind_timer(hwnd, 5, Arc::new(|_, _| {}));
        let new = crate::callbacks::bind_timer(hwnd, 5, Arc::new(|_, _| {}));

        let stale = unsafe { Guard::new(ActiveTimer { hwnd, id: 5, generation: old }) };
        assert!(stale.close().is_ok());
        assert!(crate::callbacks::unbind_timer(hwnd, 5, new));
    }

    #[test]
    fn test_invalid_handle_is_not_closed() {
        assert!(unsafe { HANDLE::INVALID.release() });
        assert!(unsafe { HANDLE::NULL.release() });
    }
}
