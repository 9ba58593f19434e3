//! In-process fake COM objects for exercising the dispatch shim.
//!
//! A fake is a leaked heap block whose first field is the vtable pointer,
//! followed by a reference count and the test's own state. Vtable slots are
//! plain `extern "system"` functions written by each test module.

use alloc::boxed::Box;
use core::ffi::c_void;
use core::sync::atomic::{AtomicU32, Ordering};

use windows::core::{GUID, HRESULT, IUnknown, IUnknown_Vtbl, Interface};
use windows_sys::Win32::System::Variant::VARIANT;

use crate::co::{E_NOINTERFACE, E_NOTIMPL};
use crate::ole::IDispatch_Vtbl;
use crate::structs::{DISPPARAMS, EXCEPINFO};

#[repr(C)]
pub(crate) struct FakeCom<S = ()> {
    vtbl: *const c_void,
    refs: AtomicU32,
    accept_any: bool,
    pub state: S,
}

impl<S: 'static> FakeCom<S> {
    /// Leaks a new object with one reference and returns its raw pointer.
    pub fn create<V: 'static>(vtbl: V, state: S) -> (*mut c_void, &'static Self) {
        Self::build(vtbl, state, true)
    }

    fn build<V: 'static>(vtbl: V, state: S, accept_any: bool) -> (*mut c_void, &'static Self) {
        let vtbl: &'static V = Box::leak(Box::new(vtbl));
        let obj: &'static Self = Box::leak(Box::new(Self {
            vtbl: (vtbl as *const V).cast(),
            refs: AtomicU32::new(1),
            accept_any,
            state,
        }));
        ((obj as *const Self).cast_mut().cast(), obj)
    }

    /// Recovers the object from the `this` pointer a slot receives.
    ///
    /// # Safety
    ///
    /// `this` must come from [`FakeCom::create`] with the same `S`.
    pub unsafe fn from_this(this: *mut c_void) -> &'static Self {
        unsafe { &*(this as *const Self) }
    }

    pub fn refs(&self) -> u32 {
        self.refs.load(Ordering::SeqCst)
    }
}

impl FakeCom<()> {
    /// Bare `IUnknown` answering every `QueryInterface`.
    pub fn unknown() -> (*mut c_void, &'static Self) {
        Self::create(unknown_vtbl(), ())
    }

    /// Bare `IUnknown` answering only `IUnknown` itself.
    pub fn refusing() -> (*mut c_void, &'static Self) {
        Self::build(unknown_vtbl(), (), false)
    }
}

/// `IUnknown` slots shared by every fake.
pub(crate) fn unknown_vtbl() -> IUnknown_Vtbl {
    IUnknown_Vtbl {
        QueryInterface: query_interface,
        AddRef: add_ref,
        Release: release,
    }
}

/// `IDispatch` slots for fakes of dual interfaces. Late binding is never
/// exercised through them, so every slot answers `E_NOTIMPL`.
pub(crate) fn dispatch_vtbl() -> IDispatch_Vtbl {
    unsafe extern "system" fn type_info_count(_: *mut c_void, _: *mut u32) -> HRESULT {
        HRESULT(E_NOTIMPL)
    }
    unsafe extern "system" fn type_info(_: *mut c_void, _: u32, _: u32, _: *mut *mut c_void) -> HRESULT {
        HRESULT(E_NOTIMPL)
    }
    unsafe extern "system" fn ids_of_names(
        _: *mut c_void,
        _: *const GUID,
        _: *const *const u16,
        _: u32,
        _: u32,
        _: *mut i32,
    ) -> HRESULT {
        HRESULT(E_NOTIMPL)
    }
    unsafe extern "system" fn invoke(
        _: *mut c_void,
        _: i32,
        _: *const GUID,
        _: u32,
        _: u16,
        _: *mut DISPPARAMS,
        _: *mut VARIANT,
        _: *mut EXCEPINFO,
        _: *mut u32,
    ) -> HRESULT {
        HRESULT(E_NOTIMPL)
    }

    IDispatch_Vtbl {
        base__: unknown_vtbl(),
        GetTypeInfoCount: type_info_count,
        GetTypeInfo: type_info,
        GetIDsOfNames: ids_of_names,
        Invoke: invoke,
    }
}

/// Wraps a fake's raw pointer as interface `T`.
pub(crate) fn wrap<T: Interface>(raw: *mut c_void) -> T {
    unsafe { T::from_raw(raw) }
}

unsafe extern "system" fn query_interface(
    this: *mut c_void,
    iid: *const GUID,
    out: *mut *mut c_void,
) -> HRESULT {
    let obj = unsafe { FakeCom::<()>::from_this(this) };
    let iid = unsafe { *iid };
    unsafe {
        if obj.accept_any || iid == IUnknown::IID {
            add_ref(this);
            *out = this;
            HRESULT(0)
        } else {
            *out = core::ptr::null_mut();
            HRESULT(E_NOINTERFACE)
        }
    }
}

unsafe extern "system" fn add_ref(this: *mut c_void) -> u32 {
    let obj = unsafe { FakeCom::<()>::from_this(this) };
    obj.refs.fetch_add(1, Ordering::SeqCst) + 1
}

unsafe extern "system" fn release(this: *mut c_void) -> u32 {
    let obj = unsafe { FakeCom::<()>::from_this(this) };
    obj.refs.fetch_sub(1, Ordering::SeqCst) - 1
}
