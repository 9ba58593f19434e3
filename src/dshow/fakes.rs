//! Fake filters, pins and enumerators for the DirectShow tests.

use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::ffi::c_void;

use windows::core::{GUID, HRESULT, IUnknown, Interface};

use crate::co::{E_FAIL, E_NOTIMPL, S_FALSE, VFW_E_NOT_CONNECTED};
use crate::com::clone_raw;
use crate::com::fake::{self, FakeCom};
use crate::ole::IEnumUnknown_Vtbl;
use crate::structs::{AM_MEDIA_TYPE, FILTER_INFO, PIN_INFO};

use super::{
    IBaseFilter, IBaseFilter_Vtbl, IEnumPins, IMediaFilter_Vtbl, IPersist_Vtbl, IPin, IPin_Vtbl,
};

pub const FAKE_CLSID: GUID = GUID::from_u128(0x0f0f0f0f_0000_1111_2222_333344445555);

fn copy_name(dst: &mut [u16; 128], name: &str) {
    for (d, s) in dst.iter_mut().take(127).zip(name.encode_utf16()) {
        *d = s;
    }
}

// Pins.

pub struct Pin {
    pub name: &'static str,
    pub dir: i32,
    pub peer: RefCell<Option<IUnknown>>,
    pub owner: Cell<*mut c_void>,
}

fn pin(this: *mut c_void) -> &'static Pin {
    &unsafe { FakeCom::<Pin>::from_this(this) }.state
}

unsafe extern "system" fn connect(this: *mut c_void, receiver: *mut c_void, _: *const AM_MEDIA_TYPE) -> HRESULT {
    let this_pin = pin(this);
    if this_pin.peer.borrow().is_some() {
        return HRESULT(E_FAIL);
    }
    *this_pin.peer.borrow_mut() = unsafe { clone_raw(receiver) };
    *pin(receiver).peer.borrow_mut() = unsafe { clone_raw(this) };
    HRESULT(0)
}

unsafe extern "system" fn disconnect(this: *mut c_void) -> HRESULT {
    match pin(this).peer.borrow_mut().take() {
        Some(_) => HRESULT(0),
        None => HRESULT(S_FALSE),
    }
}

unsafe extern "system" fn connected_to(this: *mut c_void, out: *mut *mut c_void) -> HRESULT {
    match pin(this).peer.borrow().as_ref() {
        Some(peer) => {
            unsafe { *out = peer.clone().into_raw() };
            HRESULT(0)
        }
        None => {
            unsafe { *out = core::ptr::null_mut() };
            HRESULT(VFW_E_NOT_CONNECTED)
        }
    }
}

unsafe extern "system" fn query_pin_info(this: *mut c_void, info: *mut PIN_INFO) -> HRESULT {
    let state = pin(this);
    let info = unsafe { &mut *info };
    info.dir = state.dir;
    copy_name(&mut info.achName, state.name);
    info.pFilter = unsafe { clone_raw::<IUnknown>(state.owner.get()) }.map_or(core::ptr::null_mut(), IUnknown::into_raw);
    HRESULT(0)
}

unsafe extern "system" fn query_direction(this: *mut c_void, dir: *mut i32) -> HRESULT {
    unsafe { *dir = pin(this).dir };
    HRESULT(0)
}

unsafe extern "system" fn query_id(_: *mut c_void, id: *mut *mut u16) -> HRESULT {
    unsafe { *id = core::ptr::null_mut() };
    HRESULT(0)
}

pub fn fake_pin(name: &'static str, dir: i32) -> (IPin, &'static FakeCom<Pin>) {
    let vtbl = IPin_Vtbl {
        base__: fake::unknown_vtbl(),
        Connect: connect,
        ReceiveConnection: core::ptr::null(),
        Disconnect: disconnect,
        ConnectedTo: connected_to,
        ConnectionMediaType: core::ptr::null(),
        QueryPinInfo: query_pin_info,
        QueryDirection: query_direction,
        QueryId: query_id,
        QueryAccept: core::ptr::null(),
        EnumMediaTypes: core::ptr::null(),
        QueryInternalConnections: core::ptr::null(),
        EndOfStream: core::ptr::null(),
        BeginFlush: core::ptr::null(),
        EndFlush: core::ptr::null(),
        NewSegment: core::ptr::null(),
    };
    let state = Pin { name, dir, peer: RefCell::new(None), owner: Cell::new(core::ptr::null_mut()) };
    let (raw, obj) = FakeCom::create(vtbl, state);
    (fake::wrap(raw), obj)
}

// Enumerators.

pub struct Items {
    pub items: Vec<IUnknown>,
    pub pos: Cell<usize>,
}

fn items(this: *mut c_void) -> &'static Items {
    &unsafe { FakeCom::<Items>::from_this(this) }.state
}

unsafe extern "system" fn next(this: *mut c_void, count: u32, out: *mut *mut c_void, fetched: *mut u32) -> HRESULT {
    let state = items(this);
    let start = state.pos.get();
    let batch: Vec<_> = state.items.iter().skip(start).take(count as usize).collect();
    for (i, item) in batch.iter().enumerate() {
        unsafe { *out.add(i) = (*item).clone().into_raw() };
    }
    state.pos.set(start + batch.len());
    if !fetched.is_null() {
        unsafe { *fetched = batch.len() as u32 };
    }
    HRESULT(if batch.len() == count as usize { 0 } else { S_FALSE })
}

unsafe extern "system" fn skip(this: *mut c_void, count: u32) -> HRESULT {
    let state = items(this);
    let pos = state.pos.get() + count as usize;
    state.pos.set(pos.min(state.items.len()));
    HRESULT(if pos <= state.items.len() { 0 } else { S_FALSE })
}

unsafe extern "system" fn reset(this: *mut c_void) -> HRESULT {
    items(this).pos.set(0);
    HRESULT(0)
}

unsafe extern "system" fn clone(_: *mut c_void, out: *mut *mut c_void) -> HRESULT {
    unsafe { *out = core::ptr::null_mut() };
    HRESULT(E_NOTIMPL)
}

/// Enumerator over `items`, usable as any enumerator with the
/// `IEnumUnknown` layout.
pub fn fake_enum<T: Interface>(items: Vec<IUnknown>) -> (T, &'static FakeCom<Items>) {
    let vtbl = IEnumUnknown_Vtbl {
        base__: fake::unknown_vtbl(),
        Next: next,
        Skip: skip,
        Reset: reset,
        Clone: clone,
    };
    let (raw, obj) = FakeCom::create(vtbl, Items { items, pos: Cell::new(0) });
    (fake::wrap(raw), obj)
}

// Filters.

pub struct Filter {
    pub name: &'static str,
    pub state: Cell<i32>,
    pub pins: Vec<IPin>,
}

fn filter(this: *mut c_void) -> &'static Filter {
    &unsafe { FakeCom::<Filter>::from_this(this) }.state
}

unsafe extern "system" fn class_id(_: *mut c_void, clsid: *mut GUID) -> HRESULT {
    unsafe { *clsid = FAKE_CLSID };
    HRESULT(0)
}

unsafe extern "system" fn stop(this: *mut c_void) -> HRESULT {
    filter(this).state.set(0);
    HRESULT(0)
}

unsafe extern "system" fn pause(this: *mut c_void) -> HRESULT {
    filter(this).state.set(1);
    HRESULT(0)
}

unsafe extern "system" fn run(this: *mut c_void, _: i64) -> HRESULT {
    filter(this).state.set(2);
    HRESULT(0)
}

unsafe extern "system" fn get_state(this: *mut c_void, _: u32, state: *mut i32) -> HRESULT {
    unsafe { *state = filter(this).state.get() };
    HRESULT(0)
}

unsafe extern "system" fn enum_pins(this: *mut c_void, out: *mut *mut c_void) -> HRESULT {
    let pins = filter(this).pins.iter().map(|p| crate::com::into_unknown(p.clone())).collect();
    let (pins, _) = fake_enum::<IEnumPins>(pins);
    unsafe { *out = pins.into_raw() };
    HRESULT(0)
}

unsafe extern "system" fn find_pin(this: *mut c_void, id: *const u16, out: *mut *mut c_void) -> HRESULT {
    let id = unsafe { crate::string::from_wide_ptr(id) };
    let found = filter(this)
        .pins
        .iter()
        .find(|p| unsafe { FakeCom::<Pin>::from_this(p.as_raw()) }.state.name == id);
    match found {
        Some(p) => {
            unsafe { *out = p.clone().into_raw() };
            HRESULT(0)
        }
        None => {
            unsafe { *out = core::ptr::null_mut() };
            HRESULT(crate::co::VFW_E_NOT_FOUND)
        }
    }
}

unsafe extern "system" fn query_filter_info(this: *mut c_void, info: *mut FILTER_INFO) -> HRESULT {
    let info = unsafe { &mut *info };
    copy_name(&mut info.achName, filter(this).name);
    info.pGraph = core::ptr::null_mut();
    HRESULT(0)
}

/// Filter owning the given pins; each pin reports the filter as its owner.
pub fn fake_filter(name: &'static str, pins: Vec<IPin>) -> (IBaseFilter, &'static FakeCom<Filter>) {
    let vtbl = IBaseFilter_Vtbl {
        base__: IMediaFilter_Vtbl {
            base__: IPersist_Vtbl { base__: fake::unknown_vtbl(), GetClassID: class_id },
            Stop: stop,
            Pause: pause,
            Run: run,
            GetState: get_state,
            SetSyncSource: core::ptr::null(),
            GetSyncSource: core::ptr::null(),
        },
        EnumPins: enum_pins,
        FindPin: find_pin,
        QueryFilterInfo: query_filter_info,
        JoinFilterGraph: core::ptr::null(),
        QueryVendorInfo: core::ptr::null(),
    };
    let (raw, obj) = FakeCom::create(vtbl, Filter { name, state: Cell::new(0), pins });
    for p in &obj.state.pins {
        unsafe { FakeCom::<Pin>::from_this(p.as_raw()) }.state.owner.set(raw);
    }
    (fake::wrap(raw), obj)
}
