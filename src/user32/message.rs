use windows_sys::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, IsDialogMessageW, PeekMessageW, PostMessageW, PostQuitMessage,
    PostThreadMessageW, SendMessageW, TranslateAcceleratorW, TranslateMessage,
};

use crate::error::{Result, WinError};
use crate::handles::{HACCEL, HWND};
use crate::structs::MSG;

/// Sends a message and waits for the window procedure to process it.
pub fn send_message(hwnd: HWND, msg: u32, wparam: usize, lparam: isize) -> isize {
    unsafe { SendMessageW(hwnd.ptr(), msg, wparam, lparam) }
}

/// Places a message in the queue of the window's thread.
pub fn post_message(hwnd: HWND, msg: u32, wparam: usize, lparam: isize) -> Result<()> {
    match unsafe { PostMessageW(hwnd.ptr(), msg, wparam, lparam) } {
        0 => Err(WinError::last("PostMessageW")),
        _ => Ok(()),
    }
}

pub fn post_thread_message(thread_id: u32, msg: u32, wparam: usize, lparam: isize) -> Result<()> {
    match unsafe { PostThreadMessageW(thread_id, msg, wparam, lparam) } {
        0 => Err(WinError::last("PostThreadMessageW")),
        _ => Ok(()),
    }
}

/// Posts `WM_QUIT` to the calling thread's queue.
pub fn post_quit_message(exit_code: i32) {
    unsafe { PostQuitMessage(exit_code) }
}

/// Waits for a message. Returns `None` once `WM_QUIT` is retrieved.
pub fn get_message(hwnd: HWND, min: u32, max: u32) -> Result<Option<MSG>> {
    let mut msg = MSG::default();
    match unsafe { GetMessageW((&mut msg as *mut MSG).cast(), hwnd.ptr(), min, max) } {
        -1 => Err(WinError::last("GetMessageW")),
        0 => Ok(None),
        _ => Ok(Some(msg)),
    }
}

/// Polls for a message without waiting. `remove` takes `PM_*` flags.
pub fn peek_message(hwnd: HWND, min: u32, max: u32, remove: u32) -> Option<MSG> {
    let mut msg = MSG::default();
    match unsafe { PeekMessageW((&mut msg as *mut MSG).cast(), hwnd.ptr(), min, max, remove) } {
        0 => None,
        _ => Some(msg),
    }
}

/// Posts `WM_CHAR` for virtual-key messages. Returns true if it did.
pub fn translate_message(msg: &MSG) -> bool {
    unsafe { TranslateMessage((msg as *const MSG).cast()) != 0 }
}

/// Delivers a message to its window procedure and returns its result.
pub fn dispatch_message(msg: &MSG) -> isize {
    unsafe { DispatchMessageW((msg as *const MSG).cast()) }
}

/// Returns true if `msg` matched an accelerator and was turned into
/// `WM_COMMAND`; the message must then not be dispatched.
pub fn translate_accelerator(hwnd: HWND, accel: HACCEL, msg: &MSG) -> bool {
    unsafe { TranslateAcceleratorW(hwnd.ptr(), accel.ptr(), (msg as *const MSG).cast()) != 0 }
}

/// Returns true if `msg` was processed as dialog navigation.
pub fn is_dialog_message(dialog: HWND, msg: &MSG) -> bool {
    unsafe { IsDialogMessageW(dialog.ptr(), (msg as *const MSG).cast()) != 0 }
}

/// Runs the thread's message loop until `WM_QUIT`. Returns its exit code.
///
/// Messages are first offered to the accelerator table of `accel` for its
/// target window, then to `dialog` for keyboard navigation.
pub fn run_message_loop(accel: Option<(HWND, HACCEL)>, dialog: Option<HWND>) -> Result<i32> {
    let mut msg = MSG::default();
    loop {
        match unsafe { GetMessageW((&mut msg as *mut MSG).cast(), core::ptr::null_mut(), 0, 0) } {
            -1 => return Err(WinError::last("GetMessageW")),
            0 => break,
            _ => {}
        }

        if let Some((target, table)) = accel {
            if translate_accelerator(target, table, &msg) {
                continue;
            }
        }
        if let Some(dialog) = dialog {
            if is_dialog_message(dialog, &msg) {
                continue;
            }
        }
        translate_message(&msg);
        dispatch_message(&msg);
    }

    // WM_QUIT carries the exit code in wParam.
    log::trace!("message loop finished with code {}", msg.wParam as i32);
    Ok(msg.wParam as i32)
}
