use alloc::sync::Arc;

use windows_sys::Win32::UI::WindowsAndMessaging::SetTimer;

use crate::callbacks::{self, TimerHandler};
use crate::error::{Result, WinError};
use crate::guard::{ActiveTimer, Guard, TimerGuard};
use crate::handles::HWND;

/// Starts a timer calling `handler` every `elapse_ms` milliseconds.
///
/// The closure runs from the message loop of the calling thread. Starting a
/// timer with an id already in use on `hwnd` replaces it; dropping the
/// replaced guard then leaves the new timer running.
pub fn set_timer<F>(hwnd: HWND, id: usize, elapse_ms: u32, handler: F) -> Result<TimerGuard>
where
    F: Fn(HWND, usize) + Send + Sync + 'static,
{
    let handler: Arc<TimerHandler> = Arc::new(handler);
    if hwnd.is_null() {
        // Thread timers get their id from the system, so bind after creation.
        let id = unsafe { SetTimer(core::ptr::null_mut(), 0, elapse_ms, Some(callbacks::timer_proc)) };
        if id == 0 {
            return Err(WinError::last("SetTimer"));
        }
        let generation = callbacks::bind_timer(hwnd, id, handler);
        return Ok(unsafe { Guard::new(ActiveTimer { hwnd, id, generation }) });
    }

    let generation = callbacks::bind_timer(hwnd, id, handler);
    if unsafe { SetTimer(hwnd.ptr(), id, elapse_ms, Some(callbacks::timer_proc)) } == 0 {
        let err = WinError::last("SetTimer");
        callbacks::unbind_timer(hwnd, id, generation);
        return Err(err);
    }
    log::trace!("timer {id} of {hwnd:?} set to {elapse_ms} ms");
    Ok(unsafe { Guard::new(ActiveTimer { hwnd, id, generation }) })
}

#[cfg(all(test, windows, feature = "integration-tests"))]
mod tests {
    use super::*;
    use crate::co::{PM_REMOVE, WM_TIMER};
    use crate::user32::{dispatch_message, peek_message};
    use core::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_thread_timer_fires() -> Result<()> {
        static FIRED: AtomicU32 = AtomicU32::new(0);
        let timer = set_timer(HWND::NULL, 0, 1, |_, _| {
            FIRED.fetch_add(1, Ordering::SeqCst);
        })?;

        let start = crate::kernel32::tick_count();
        while FIRED.load(Ordering::SeqCst) == 0 && crate::kernel32::tick_count() - start < 2000 {
            if let Some(msg) = peek_message(HWND::NULL, WM_TIMER, WM_TIMER, PM_REMOVE) {
                dispatch_message(&msg);
            }
            crate::kernel32::sleep(1);
        }
        assert!(FIRED.load(Ordering::SeqCst) > 0);
        timer.close()
    }
}
