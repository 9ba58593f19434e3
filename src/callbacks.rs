//! Process-wide registry binding native callbacks to Rust closures.
//!
//! The OS only carries pointer-sized context through its callbacks, so every
//! callback kind gets an `extern "system"` trampoline that looks up the closure
//! registered under an opaque key:
//!
//! * window procedures: a token passed as `lpCreateParams`, rebound to the
//!   `HWND` at `WM_NCCREATE` and dropped at `WM_NCDESTROY`;
//! * timers: the `(HWND, id)` pair, dropped by `KillTimer`;
//! * hooks: the hook type, one trampoline instance per type;
//! * synchronous enumerations: the address of the caller's closure, passed
//!   as `LPARAM` and only valid for the duration of the call.
//!
//! Lookups clone the closure's `Arc` and release the lock before calling it,
//! so a closure may re-enter the registry, for example by sending a message
//! to another window of this crate. A closure that panics aborts the process,
//! since unwinding cannot cross an `extern "system"` frame.

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use core::ffi::c_void;
use core::sync::atomic::{AtomicUsize, Ordering};

use spin::Mutex;
use windows_sys::Win32::UI::WindowsAndMessaging::{CallNextHookEx, DefWindowProcW};

use crate::co::{HookId, WM_NCCREATE, WM_NCDESTROY};
use crate::handles::{HHOOK, HWND};
use crate::structs::CREATESTRUCTW;

/// A message delivered to a window procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WndMsg {
    pub hwnd: HWND,
    pub msg: u32,
    pub wparam: usize,
    pub lparam: isize,
}

impl WndMsg {
    /// Forwards the message to `DefWindowProcW`.
    pub fn default_proc(&self) -> isize {
        unsafe { DefWindowProcW(self.hwnd.ptr(), self.msg, self.wparam, self.lparam) }
    }
}

/// Window procedure closure. `None` falls through to `DefWindowProcW`.
pub type WndHandler = dyn Fn(&WndMsg) -> Option<isize> + Send + Sync;

/// Timer closure, called with the window and timer id.
pub type TimerHandler = dyn Fn(HWND, usize) + Send + Sync;

/// Hook closure, called with `(code, wParam, lParam)` for `code >= 0`.
/// `None` passes the event on with `CallNextHookEx`.
pub type HookHandler = dyn Fn(i32, usize, isize) -> Option<isize> + Send + Sync;

/// A lock-protected map from native keys to callback values.
pub(crate) struct Registry<K, V> {
    map: Mutex<BTreeMap<K, V>>,
}

impl<K: Ord + Copy, V: Clone> Registry<K, V> {
    pub const fn new() -> Self {
        Self {
            map: Mutex::new(BTreeMap::new()),
        }
    }

    /// Inserts unless the key is taken. Returns false if it was.
    pub fn try_insert(&self, key: K, value: V) -> bool {
        let mut map = self.map.lock();
        if map.contains_key(&key) {
            return false;
        }
        map.insert(key, value);
        true
    }

    pub fn replace(&self, key: K, value: V) -> Option<V> {
        self.map.lock().insert(key, value)
    }

    pub fn get(&self, key: K) -> Option<V> {
        self.map.lock().get(&key).cloned()
    }

    pub fn remove(&self, key: K) -> Option<V> {
        self.map.lock().remove(&key)
    }

    /// Removes the entry only if `matches` accepts its current value.
    pub fn remove_if(&self, key: K, matches: impl FnOnce(&V) -> bool) -> Option<V> {
        let mut map = self.map.lock();
        if map.get(&key).is_some_and(matches) {
            map.remove(&key)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.map.lock().len()
    }
}

// ---- window procedures ----

static NEXT_TOKEN: AtomicUsize = AtomicUsize::new(1);
static PENDING: Registry<usize, Arc<WndHandler>> = Registry::new();
static WINDOWS: Registry<usize, Arc<WndHandler>> = Registry::new();

/// Registration of a window procedure closure not yet bound to a window.
///
/// Pass [`WndToken::as_create_param`] as `lpCreateParams` of a window whose
/// class uses [`window_proc`]; the closure is bound at `WM_NCCREATE`.
#[derive(Debug, PartialEq, Eq)]
pub struct WndToken(usize);

impl WndToken {
    pub fn as_create_param(&self) -> *mut c_void {
        core::ptr::without_provenance_mut(self.0)
    }

    /// Drops the registration if no window consumed it.
    pub fn discard(self) {
        if PENDING.remove(self.0).is_some() {
            log::trace!("window handler token {} discarded", self.0);
        }
    }
}

/// Registers a window procedure closure and returns its token.
pub fn register_window<F>(handler: F) -> WndToken
where
    F: Fn(&WndMsg) -> Option<isize> + Send + Sync + 'static,
{
    let token = NEXT_TOKEN.fetch_add(1, Ordering::Relaxed);
    PENDING.replace(token, Arc::new(handler));
    log::trace!("window handler token {token} registered");
    WndToken(token)
}

/// Binds a closure to an existing window of a class using [`window_proc`],
/// replacing any closure already bound.
pub fn bind_window<F>(hwnd: HWND, handler: F)
where
    F: Fn(&WndMsg) -> Option<isize> + Send + Sync + 'static,
{
    WINDOWS.replace(hwnd.ptr() as usize, Arc::new(handler));
}

/// Returns true if a closure is bound to `hwnd`.
pub fn is_window_bound(hwnd: HWND) -> bool {
    WINDOWS.get(hwnd.ptr() as usize).is_some()
}

fn bind_pending(hwnd: HWND, token: usize) -> bool {
    match PENDING.remove(token) {
        Some(handler) => {
            WINDOWS.replace(hwnd.ptr() as usize, handler);
            log::trace!("window handler token {token} bound to {hwnd:?}");
            true
        }
        None => false,
    }
}

/// Window procedure trampoline for classes registered by this crate.
pub unsafe extern "system" fn window_proc(hwnd: HWND, msg: u32, wparam: usize, lparam: isize) -> isize {
    let key = hwnd.ptr() as usize;
    if msg == WM_NCCREATE && lparam != 0 {
        let cs = unsafe { &*(lparam as *const CREATESTRUCTW) };
        bind_pending(hwnd, cs.lpCreateParams as usize);
    }

    let message = WndMsg { hwnd, msg, wparam, lparam };
    let result = WINDOWS.get(key).and_then(|handler| handler(&message));

    if msg == WM_NCDESTROY && WINDOWS.remove(key).is_some() {
        log::trace!("window handler of {hwnd:?} released");
    }

    result.unwrap_or_else(|| message.default_proc())
}

// ---- timers ----

static NEXT_TIMER_GEN: AtomicUsize = AtomicUsize::new(1);
static TIMERS: Registry<(usize, usize), (usize, Arc<TimerHandler>)> = Registry::new();

/// Binds `handler` to the timer, returning the generation of this binding.
pub(crate) fn bind_timer(hwnd: HWND, id: usize, handler: Arc<TimerHandler>) -> usize {
    let generation = NEXT_TIMER_GEN.fetch_add(1, Ordering::Relaxed);
    if TIMERS.replace((hwnd.ptr() as usize, id), (generation, handler)).is_some() {
        log::trace!("timer {id} of {hwnd:?} rebound");
    }
    generation
}

/// Unbinds the timer if it is still on binding `generation`.
pub(crate) fn unbind_timer(hwnd: HWND, id: usize, generation: usize) -> bool {
    TIMERS
        .remove_if((hwnd.ptr() as usize, id), |(current, _)| *current == generation)
        .is_some()
}

/// `TIMERPROC` trampoline.
pub(crate) unsafe extern "system" fn timer_proc(hwnd: *mut c_void, _msg: u32, id: usize, _time: u32) {
    let hwnd = HWND::from_ptr(hwnd);
    match TIMERS.get((hwnd.ptr() as usize, id)) {
        Some((_, handler)) => handler(hwnd, id),
        None => log::warn!("timer {id} of {hwnd:?} fired with no handler"),
    }
}

// ---- hooks ----

#[derive(Clone)]
pub(crate) struct HookSlot {
    pub hhook: HHOOK,
    pub handler: Arc<HookHandler>,
}

static HOOKS: Registry<i32, HookSlot> = Registry::new();

/// Claims the slot of `id`. Fails if a hook of that type is installed.
pub(crate) fn reserve_hook(id: HookId, handler: Arc<HookHandler>) -> bool {
    HOOKS.try_insert(id as i32, HookSlot { hhook: HHOOK::NULL, handler })
}

pub(crate) fn set_hook_handle(id: HookId, hhook: HHOOK) {
    if let Some(mut slot) = HOOKS.get(id as i32) {
        slot.hhook = hhook;
        HOOKS.replace(id as i32, slot);
    }
}

pub(crate) fn release_hook(id: HookId) -> Option<HHOOK> {
    HOOKS.remove(id as i32).map(|slot| slot.hhook)
}

/// `HOOKPROC` trampoline, one instance per hook type.
unsafe extern "system" fn hook_proc<const ID: i32>(code: i32, wparam: usize, lparam: isize) -> isize {
    let slot = HOOKS.get(ID);
    if code >= 0 {
        match &slot {
            Some(slot) => {
                if let Some(result) = (slot.handler)(code, wparam, lparam) {
                    return result;
                }
            }
            None => log::warn!("hook {ID} called with no handler"),
        }
    }

    let hhook = slot.map_or(HHOOK::NULL, |slot| slot.hhook);
    unsafe { CallNextHookEx(hhook.ptr(), code, wparam, lparam) }
}

pub(crate) type HookProc = unsafe extern "system" fn(i32, usize, isize) -> isize;

/// Returns the trampoline instance serving hook type `id`.
pub(crate) fn hook_trampoline(id: HookId) -> HookProc {
    match id {
        HookId::MsgFilter => hook_proc::<{ HookId::MsgFilter as i32 }>,
        HookId::Keyboard => hook_proc::<{ HookId::Keyboard as i32 }>,
        HookId::GetMessage => hook_proc::<{ HookId::GetMessage as i32 }>,
        HookId::CallWndProc => hook_proc::<{ HookId::CallWndProc as i32 }>,
        HookId::Cbt => hook_proc::<{ HookId::Cbt as i32 }>,
        HookId::Mouse => hook_proc::<{ HookId::Mouse as i32 }>,
        HookId::CallWndProcRet => hook_proc::<{ HookId::CallWndProcRet as i32 }>,
        HookId::KeyboardLl => hook_proc::<{ HookId::KeyboardLl as i32 }>,
        HookId::MouseLl => hook_proc::<{ HookId::MouseLl as i32 }>,
    }
}

// ---- synchronous enumerations ----

/// `WNDENUMPROC` trampoline; `lparam` is the address of an `F`.
pub(crate) unsafe extern "system" fn enum_windows_proc<F>(hwnd: *mut c_void, lparam: isize) -> i32
where
    F: FnMut(HWND) -> bool,
{
    let callback = unsafe { &mut *(lparam as *mut F) };
    callback(HWND::from_ptr(hwnd)) as i32
}

/// Number of live registrations, as `(pending windows, windows, timers, hooks)`.
pub fn registered() -> (usize, usize, usize, usize) {
    (PENDING.len(), WINDOWS.len(), TIMERS.len(), HOOKS.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::co::WM_USER;
    use core::sync::atomic::AtomicU32;

    fn fake_hwnd(value: usize) -> HWND {
        HWND::from_ptr(core::ptr::without_provenance_mut(value))
    }

    #[test]
    fn test_registry_basics() {
        let reg: Registry<u32, Arc<u32>> = Registry::new();
        assert!(reg.try_insert(1, Arc::new(10)));
        assert!(!reg.try_insert(1, Arc::new(11)));
        assert_eq!(reg.get(1).as_deref(), Some(&10));
        assert_eq!(reg.replace(1, Arc::new(12)).as_deref(), Some(&10));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.remove(1).as_deref(), Some(&12));
        assert!(reg.get(1).is_none());
    }

    #[test]
    fn test_window_token_binding() {
        let hits = Arc::new(AtomicU32::new(0));
        let counter = hits.clone();
        let token = register_window(move |msg| {
            counter.fetch_add(1, Ordering::SeqCst);
            (msg.msg == WM_USER + 1).then_some(77)
        });

        let hwnd = fake_hwnd(0xA000);
        let param = token.as_create_param() as usize;
        assert!(bind_pending(hwnd, param));
        assert!(!bind_pending(hwnd, param));
        assert!(is_window_bound(hwnd));

        let result = WINDOWS
            .get(hwnd.ptr() as usize)
            .and_then(|h| h(&WndMsg { hwnd, msg: WM_USER + 1, wparam: 0, lparam: 0 }));
        assert_eq!(result, Some(77));
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        assert!(WINDOWS.remove(hwnd.ptr() as usize).is_some());
        assert!(!is_window_bound(hwnd));
        assert_eq!(Arc::strong_count(&hits), 1);
    }

    #[test]
    fn test_discarded_token_drops_closure() {
        let marker = Arc::new(());
        let held = marker.clone();
        let token = register_window(move |_| {
            let _ = &held;
            None
        });
        assert_eq!(Arc::strong_count(&marker), 2);
        token.discard();
        assert_eq!(Arc::strong_count(&marker), 1);
    }

    #[test]
    fn test_handler_can_reenter_registry() {
        let hwnd = fake_hwnd(0xB000);
        let other = fake_hwnd(0xB100);
        bind_window(other, |_| Some(5));
        bind_window(hwnd, move |_| {
            // Nested lookup while the outer handler runs.
            WINDOWS.get(other.ptr() as usize).and_then(|h| h(&WndMsg { hwnd: other, msg: 0, wparam: 0, lparam: 0 }))
        });

        let outer = WINDOWS.get(hwnd.ptr() as usize);
        let result = outer.and_then(|h| h(&WndMsg { hwnd, msg: 0, wparam: 0, lparam: 0 }));
        assert_eq!(result, Some(5));

        WINDOWS.remove(hwnd.ptr() as usize);
        WINDOWS.remove(other.ptr() as usize);
    }

    #[test]
    fn test_timer_dispatch() {
        let fired = Arc::new(AtomicU32::new(0));
        let counter = fired.clone();
        let hwnd = fake_hwnd(0xC000);
        let generation = bind_timer(hwnd, 7, Arc::new(move |_, id| {
            counter.fetch_add(id as u32, Ordering::SeqCst);
        }));

        unsafe { timer_proc(hwnd.ptr(), 0x113, 7, 0) };
        unsafe { timer_proc(hwnd.ptr(), 0x113, 8, 0) };
        assert_eq!(fired.load(Ordering::SeqCst), 7);

        assert!(unbind_timer(hwnd, 7, generation));
        assert!(!unbind_timer(hwnd, 7, generation));
    }

    #[test]
    fn test_stale_timer_binding_keeps_replacement() {
        let fired = Arc::new(AtomicU32::new(0));
        let hwnd = fake_hwnd(0xC100);
        let old = bind_timer(hwnd, 3, Arc::new(|_, _| {}));
        let counter = fired.clone();
        let new = bind_timer(hwnd, 3, Arc::new(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        assert_ne!(old, new);

        assert!(!unbind_timer(hwnd, 3, old));
        unsafe { timer_proc(hwnd.ptr(), 0x113, 3, 0) };
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        assert!(unbind_timer(hwnd, 3, new));
    }

    #[test]
    fn test_hook_slot_is_exclusive() {
        let handler: Arc<HookHandler> = Arc::new(|_, _, _| Some(1));
        assert!(reserve_hook(HookId::CallWndProcRet, handler.clone()));
        assert!(!reserve_hook(HookId::CallWndProcRet, handler));

        let hhook = HHOOK::from_ptr(core::ptr::without_provenance_mut(0x99));
        set_hook_handle(HookId::CallWndProcRet, hhook);
        assert_eq!(release_hook(HookId::CallWndProcRet), Some(hhook));
        assert_eq!(release_hook(HookId::CallWndProcRet), None);
    }

    #[test]
    fn test_handled_hook_skips_next() {
        let handler: Arc<HookHandler> = Arc::new(|code, w, _| Some(code as isize + w as isize));
        assert!(reserve_hook(HookId::MsgFilter, handler));
        let proc = hook_trampoline(HookId::MsgFilter);
        assert_eq!(unsafe { proc(2, 40, 0) }, 42);
        release_hook(HookId::MsgFilter);
    }

    #[test]
    fn test_enum_trampoline() {
        unsafe fn call<F: FnMut(HWND) -> bool>(f: &mut F, hwnd: usize) -> i32 {
            unsafe { enum_windows_proc::<F>(core::ptr::without_provenance_mut(hwnd), f as *mut F as isize) }
        }

        let mut seen = alloc::vec::Vec::new();
        let mut callback = |hwnd: HWND| {
            seen.push(hwnd.ptr() as usize);
            seen.len() < 2
        };
        unsafe {
            assert_eq!(call(&mut callback, 0x10), 1);
            assert_eq!(call(&mut callback, 0x20), 0);
        }
        assert_eq!(seen, [0x10, 0x20]);
    }
}
