//! COM runtime plumbing: apartment initialization, object creation and the
//! helpers every interface wrapper dispatches through.

use alloc::{string::String, vec::Vec};
use core::ffi::c_void;

use windows::core::{GUID, HRESULT, IUnknown, Interface};
use windows_sys::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoTaskMemFree, CoUninitialize,
};

use crate::co::{ClsCtx, CoInit, RPC_E_CHANGED_MODE, S_FALSE};
use crate::error::{Result, WinError};

mod releaser;
pub use releaser::*;

#[cfg(test)]
pub(crate) mod fake;

/// Converts an HRESULT into `Ok(())` or `WinError::Com`.
#[inline]
pub fn hr_ok(hr: HRESULT, api: &'static str) -> Result<()> {
    if hr.is_ok() {
        Ok(())
    } else {
        Err(WinError::Com(api, hr.0))
    }
}

/// Takes ownership of an interface pointer written to an out-parameter.
///
/// # Safety
///
/// `raw` must be null or an owned reference to an object implementing `T`.
#[inline]
pub unsafe fn from_out<T: Interface>(raw: *mut c_void, api: &'static str) -> Result<T> {
    if raw.is_null() {
        Err(WinError::NullPointer(api))
    } else {
        Ok(unsafe { T::from_raw(raw) })
    }
}

/// Takes ownership of a batch of pointers returned by an enumerator's `Next`.
///
/// Any null fails the batch, and the non-null pointers are released.
///
/// # Safety
///
/// Every pointer must be null or an owned reference to an object
/// implementing `T`.
pub unsafe fn take_batch<T: Interface>(raw: Vec<*mut c_void>, api: &'static str) -> Result<Vec<T>> {
    let items: Vec<Option<T>> = raw
        .into_iter()
        .map(|ptr| (!ptr.is_null()).then(|| unsafe { T::from_raw(ptr) }))
        .collect();
    if items.iter().any(Option::is_none) {
        return Err(WinError::NullPointer(api));
    }
    Ok(items.into_iter().flatten().collect())
}

/// Adds a reference to an interface pointer the caller does not own.
///
/// # Safety
///
/// `raw` must be null or a live pointer to an object implementing `T`.
pub unsafe fn clone_raw<T: Interface + Clone>(raw: *mut c_void) -> Option<T> {
    if raw.is_null() {
        return None;
    }
    let borrowed = core::mem::ManuallyDrop::new(unsafe { T::from_raw(raw) });
    Some(T::clone(&borrowed))
}

/// Calls `QueryInterface` for `T`.
pub fn cast<T: Interface>(obj: &impl Interface) -> Result<T> {
    obj.cast::<T>()
        .map_err(|err| WinError::Com("QueryInterface", err.code().0))
}

/// Initializes COM on the calling thread.
///
/// Returns a guard that uninitializes COM on drop. Calling this again on a
/// thread that already joined the same apartment kind succeeds.
pub fn initialize(model: CoInit) -> Result<ComGuard> {
    let hr = unsafe { CoInitializeEx(core::ptr::null(), model.bits() as _) };
    if hr == RPC_E_CHANGED_MODE {
        log::debug!("CoInitializeEx: apartment already set with a different model");
        return Err(WinError::Com("CoInitializeEx", hr));
    }

    hr_ok(HRESULT(hr), "CoInitializeEx")?;
    log::trace!(
        "CoInitializeEx({model:?}) -> {}",
        if hr == S_FALSE { "already initialized" } else { "ok" }
    );
    Ok(ComGuard(()))
}

/// Balances one successful [`initialize`] call.
pub fn uninitialize() {
    unsafe { CoUninitialize() };
    log::trace!("CoUninitialize");
}

/// Calls `CoUninitialize` when dropped.
#[must_use = "dropping the guard uninitializes COM immediately"]
pub struct ComGuard(());

impl ComGuard {
    /// Keeps COM initialized for the rest of the thread's life.
    pub fn leak(self) {
        core::mem::forget(self);
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        uninitialize();
    }
}

/// Creates an instance of the class `clsid` and asks for interface `T`.
pub fn create_instance<T: Interface>(clsid: &GUID, ctx: ClsCtx) -> Result<T> {
    let mut raw = core::ptr::null_mut();
    let hr = unsafe {
        CoCreateInstance(
            (clsid as *const GUID).cast(),
            core::ptr::null_mut(),
            ctx.bits(),
            (&T::IID as *const GUID).cast(),
            &mut raw,
        )
    };

    hr_ok(HRESULT(hr), "CoCreateInstance")?;
    log::trace!("CoCreateInstance({clsid:?}) -> {raw:p}");
    unsafe { from_out(raw, "CoCreateInstance") }
}

/// Reinterprets any interface wrapper as its `IUnknown`, without a
/// `QueryInterface` round trip.
#[inline]
pub fn into_unknown<T: Interface>(obj: T) -> IUnknown {
    unsafe { IUnknown::from_raw(obj.into_raw()) }
}

/// A string allocated by COM with `CoTaskMemAlloc`, freed on drop.
pub struct CoTaskMemString(*mut u16);

impl CoTaskMemString {
    /// Takes ownership of a COM-allocated string.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a null-terminated string from `CoTaskMemAlloc`.
    #[inline]
    pub unsafe fn from_raw(ptr: *mut u16) -> Self {
        Self(ptr)
    }

    /// Returns true if COM returned no string.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    #[inline]
    pub fn as_ptr(&self) -> *const u16 {
        self.0
    }

    /// Copies the string into a Rust `String`.
    pub fn to_string_lossy(&self) -> String {
        unsafe { crate::string::from_wide_ptr(self.0) }
    }
}

impl Drop for CoTaskMemString {
    fn drop(&mut self) {
        if !self.0.is_null() {
            unsafe { CoTaskMemFree(self.0 as *const c_void) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::co::{E_FAIL, E_NOINTERFACE};

    #[test]
    fn test_hr_ok() {
        assert!(hr_ok(HRESULT(0), "Run").is_ok());
        assert!(hr_ok(HRESULT(S_FALSE), "Run").is_ok());
        match hr_ok(HRESULT(E_FAIL), "Run") {
            Err(WinError::Com("Run", hr)) => assert_eq!(hr, E_FAIL),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_from_out_null() {
        let res = unsafe { from_out::<IUnknown>(core::ptr::null_mut(), "GetFolder") };
        assert!(matches!(res, Err(WinError::NullPointer("GetFolder"))));
    }

    #[test]
    fn test_from_out_takes_reference() -> Result<()> {
        let (raw, fake) = fake::FakeCom::unknown();
        let obj: IUnknown = unsafe { from_out(raw, "QueryInterface")? };
        assert_eq!(fake.refs(), 1);
        let copy = obj.clone();
        assert_eq!(fake.refs(), 2);
        drop(copy);
        drop(obj);
        assert_eq!(fake.refs(), 0);
        Ok(())
    }

    #[test]
    fn test_cast_failure_maps_hresult() {
        let (raw, _) = fake::FakeCom::refusing();
        let obj = unsafe { IUnknown::from_raw(raw) };
        match cast::<crate::ole::IDispatch>(&obj) {
            Err(WinError::Com("QueryInterface", hr)) => assert_eq!(hr, E_NOINTERFACE),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[cfg(all(windows, feature = "integration-tests"))]
    #[test]
    fn test_initialize_twice() -> Result<()> {
        let first = initialize(CoInit::APARTMENTTHREADED)?;
        let second = initialize(CoInit::APARTMENTTHREADED)?;
        drop(second);
        drop(first);
        Ok(())
    }

    #[cfg(all(windows, feature = "integration-tests"))]
    #[test]
    fn test_create_unregistered_class() -> Result<()> {
        let _com = initialize(CoInit::MULTITHREADED)?;
        let clsid = crate::guid::parse_guid("{00000000-0000-0000-0000-0000DEADBEEF}")?;
        let res = create_instance::<IUnknown>(&clsid, ClsCtx::INPROC_SERVER);
        assert_eq!(res.err().and_then(|e| e.hresult()), Some(crate::co::REGDB_E_CLASSNOTREG));
        Ok(())
    }
}
