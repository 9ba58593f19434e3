use alloc::sync::Arc;

use windows_sys::Win32::UI::WindowsAndMessaging::{CallNextHookEx, SetWindowsHookExW};

use crate::callbacks::{self, HookHandler};
use crate::co::HookId;
use crate::error::{Result, WinError};
use crate::guard::{Guard, HookGuard, InstalledHook};
use crate::handles::{HHOOK, HINSTANCE};
use crate::kernel32::{current_thread_id, module_handle};

/// Installs a hook of type `id` served by `handler`.
///
/// The closure sees events with `code >= 0` and returns `Some(result)` to
/// swallow the event or `None` to pass it on. Low-level keyboard and mouse
/// hooks are global; every other type hooks the calling thread. Only one
/// hook per type may be installed through this crate at a time.
pub fn set_windows_hook<F>(id: HookId, handler: F) -> Result<HookGuard>
where
    F: Fn(i32, usize, isize) -> Option<isize> + Send + Sync + 'static,
{
    let handler: Arc<HookHandler> = Arc::new(handler);
    if !callbacks::reserve_hook(id, handler) {
        return Err(WinError::CallbackBusy("SetWindowsHookExW"));
    }

    let global = matches!(id, HookId::KeyboardLl | HookId::MouseLl);
    let thread_id = if global { 0 } else { current_thread_id() };
    let hmod = match hook_module(thread_id, || module_handle(None)) {
        Ok(hmod) => hmod,
        Err(err) => {
            callbacks::release_hook(id);
            return Err(err);
        }
    };

    let hhook = unsafe { SetWindowsHookExW(id as i32, Some(callbacks::hook_trampoline(id)), hmod.ptr(), thread_id) };
    if hhook.is_null() {
        let err = WinError::last("SetWindowsHookExW");
        callbacks::release_hook(id);
        return Err(err);
    }

    let hhook = HHOOK::from_ptr(hhook);
    callbacks::set_hook_handle(id, hhook);
    log::debug!("hook {id:?} installed as {hhook:?}");
    Ok(unsafe { Guard::new(InstalledHook { id, hhook }) })
}

/// Module handle for `SetWindowsHookExW`: the executable for global hooks,
/// null when the hook is bound to a thread of this process.
fn hook_module(thread_id: u32, module: impl FnOnce() -> Result<HINSTANCE>) -> Result<HINSTANCE> {
    if thread_id != 0 {
        return Ok(HINSTANCE::NULL);
    }
    module()
}

/// Passes a hook event to the next hook in the chain.
pub fn call_next_hook(hhook: HHOOK, code: i32, wparam: usize, lparam: isize) -> isize {
    unsafe { CallNextHookEx(hhook.ptr(), code, wparam, lparam) }
}


#[cfg(all(test, windows, feature = "integration-tests"))]
mod tests {
    use super::*;

    #[test]
    fn test_hook_type_is_exclusive() -> Result<()> {
        let first = set_windows_hook(HookId::GetMessage, |_, _, _| None)?;
        assert!(matches!(
            set_windows_hook(HookId::GetMessage, |_, _, _| None),
            Err(WinError::CallbackBusy(_))
        ));
        first.close()?;

        let again = set_windows_hook(HookId::GetMessage, |_, _, _| None)?;
        drop(again);
        assert_eq!(callbacks::release_hook(HookId::GetMessage), None);
        Ok(())
    }
}
