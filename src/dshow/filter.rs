use alloc::{string::String, vec::Vec};
use core::ffi::c_void;

use windows::core::{GUID, HRESULT, IUnknown, IUnknown_Vtbl, Interface};

use crate::co::{FilterState, PinDirection, S_FALSE, StateProgress, VFW_E_NOT_CONNECTED};
use crate::com::{CoTaskMemString, from_out, hr_ok, take_batch};
use crate::error::{Result, WinError};
use crate::ole::IEnumUnknown_Vtbl;
use crate::string::WString;
use crate::structs::{AM_MEDIA_TYPE, FILTER_INFO, PIN_INFO};

use super::IFilterGraph;

com_interface! {
    /// [`IPersist`](https://learn.microsoft.com/en-us/windows/win32/api/objidl/nn-objidl-ipersist)
    /// COM interface.
    IPersist: IUnknown,
    vtable: IPersist_Vtbl,
    iid: 0x0000010c_0000_0000_c000_000000000046,
}

com_interface! {
    /// [`IMediaFilter`](https://learn.microsoft.com/en-us/windows/win32/api/strmif/nn-strmif-imediafilter)
    /// COM interface: state control of a single filter.
    IMediaFilter: IPersist,
    vtable: IMediaFilter_Vtbl,
    iid: 0x56a86899_0ad4_11ce_b03a_0020af0ba770,
}

com_interface! {
    /// [`IBaseFilter`](https://learn.microsoft.com/en-us/windows/win32/api/strmif/nn-strmif-ibasefilter)
    /// COM interface, implemented by every DirectShow filter.
    IBaseFilter: IMediaFilter,
    vtable: IBaseFilter_Vtbl,
    iid: 0x56a86895_0ad4_11ce_b03a_0020af0ba770,
}

com_interface! {
    /// [`IPin`](https://learn.microsoft.com/en-us/windows/win32/api/strmif/nn-strmif-ipin)
    /// COM interface.
    IPin: IUnknown,
    vtable: IPin_Vtbl,
    iid: 0x56a86891_0ad4_11ce_b03a_0020af0ba770,
}

/// Declares an enumerator whose vtable has the `IEnumUnknown` shape.
macro_rules! typed_enum {
    ($(#[$meta:meta])* $name:ident => $item:ty, iid: $iid:literal) => {
        com_interface! {
            $(#[$meta])*
            $name: IUnknown,
            vtable: IEnumUnknown_Vtbl,
            iid: $iid,
        }

        impl $name {
            /// Fetches up to `count` items. A short batch means the end was reached.
            pub fn Next(&self, count: u32) -> Result<Vec<$item>> {
                let mut raw: Vec<*mut c_void> = alloc::vec![core::ptr::null_mut(); count as usize];
                let mut fetched = 0;
                hr_ok(vcall!(self, Next(count, raw.as_mut_ptr(), &mut fetched)), concat!(stringify!($name), "::Next"))?;

                raw.truncate(fetched.min(count) as usize);
                unsafe { take_batch(raw, concat!(stringify!($name), "::Next")) }
            }

            /// Skips `count` items. Returns false if fewer remained.
            pub fn Skip(&self, count: u32) -> Result<bool> {
                let hr = vcall!(self, Skip(count));
                hr_ok(hr, concat!(stringify!($name), "::Skip"))?;
                Ok(hr.0 != S_FALSE)
            }

            pub fn Reset(&self) -> Result<()> {
                hr_ok(vcall!(self, Reset()), concat!(stringify!($name), "::Reset"))
            }

            pub fn Clone(&self) -> Result<$name> {
                let mut raw = core::ptr::null_mut();
                hr_ok(vcall!(self, Clone(&mut raw)), concat!(stringify!($name), "::Clone"))?;
                unsafe { from_out(raw, concat!(stringify!($name), "::Clone")) }
            }

            /// Drains the enumerator from its current position.
            pub fn collect_all(&self) -> Result<Vec<$item>> {
                let mut items = Vec::new();
                loop {
                    let batch = self.Next(8)?;
                    let done = batch.len() < 8;
                    items.extend(batch);
                    if done {
                        return Ok(items);
                    }
                }
            }
        }
    };
}

typed_enum! {
    /// [`IEnumPins`](https://learn.microsoft.com/en-us/windows/win32/api/strmif/nn-strmif-ienumpins)
    /// COM interface.
    IEnumPins => IPin, iid: 0x56a86892_0ad4_11ce_b03a_0020af0ba770
}

typed_enum! {
    /// [`IEnumFilters`](https://learn.microsoft.com/en-us/windows/win32/api/strmif/nn-strmif-ienumfilters)
    /// COM interface.
    IEnumFilters => IBaseFilter, iid: 0x56a86893_0ad4_11ce_b03a_0020af0ba770
}

/// Decoded `PIN_INFO`.
#[derive(Debug, Clone)]
pub struct PinInfo {
    /// The filter owning the pin.
    pub filter: Option<IBaseFilter>,
    pub direction: PinDirection,
    pub name: String,
}

/// Decoded `FILTER_INFO`.
#[derive(Debug, Clone)]
pub struct FilterInfo {
    pub name: String,
    /// The graph the filter belongs to, if any.
    pub graph: Option<IFilterGraph>,
}

impl IPersist {
    pub fn GetClassID(&self) -> Result<GUID> {
        let mut clsid = GUID::zeroed();
        hr_ok(vcall!(self, GetClassID(&mut clsid)), "GetClassID")?;
        Ok(clsid)
    }
}

impl IMediaFilter {
    pub fn Stop(&self) -> Result<()> {
        hr_ok(vcall!(self, Stop()), "IMediaFilter::Stop")
    }

    pub fn Pause(&self) -> Result<()> {
        hr_ok(vcall!(self, Pause()), "IMediaFilter::Pause")
    }

    /// Runs with `start` as the stream time offset, in 100 ns units.
    pub fn Run(&self, start: i64) -> Result<()> {
        hr_ok(vcall!(self, Run(start)), "IMediaFilter::Run")
    }

    /// Waits up to `timeout_ms` for a pending transition to finish.
    pub fn GetState(&self, timeout_ms: u32) -> Result<(FilterState, StateProgress)> {
        let mut state = 0;
        let hr = vcall!(self, GetState(timeout_ms, &mut state));
        hr_ok(hr, "IMediaFilter::GetState")?;
        let state = FilterState::from_raw(state).ok_or(WinError::Msg("IMediaFilter::GetState: unknown state"))?;
        Ok((state, StateProgress::from_hr(hr.0)))
    }
}

impl IBaseFilter {
    iface_getter! {
        EnumPins => EnumPins -> IEnumPins
    }

    /// Finds a pin by its identifier, as returned by [`IPin::QueryId`].
    pub fn FindPin(&self, id: &str) -> Result<IPin> {
        let id = WString::from_str(id);
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, FindPin(id.as_ptr(), &mut raw)), "FindPin")?;
        unsafe { from_out(raw, "FindPin") }
    }

    pub fn QueryFilterInfo(&self) -> Result<FilterInfo> {
        let mut info = FILTER_INFO::default();
        hr_ok(vcall!(self, QueryFilterInfo(&mut info)), "QueryFilterInfo")?;
        // Take the graph reference first so it is released on every path.
        let graph = (!info.pGraph.is_null()).then(|| unsafe { IFilterGraph::from_raw(info.pGraph) });
        Ok(FilterInfo {
            name: WString::from_wide(&info.achName).to_string_lossy(),
            graph,
        })
    }

    /// Every pin of the filter.
    pub fn pins(&self) -> Result<Vec<IPin>> {
        self.EnumPins()?.collect_all()
    }

    /// First pin with direction `dir` that is not connected yet.
    pub fn find_unconnected_pin(&self, dir: PinDirection) -> Result<Option<IPin>> {
        for pin in self.pins()? {
            if pin.QueryDirection()? == dir && pin.ConnectedTo()?.is_none() {
                return Ok(Some(pin));
            }
        }
        Ok(None)
    }
}

impl IPin {
    /// Connects this output pin to `receiver`, optionally constrained to
    /// `media_type`.
    pub fn Connect(&self, receiver: &IPin, media_type: Option<&AM_MEDIA_TYPE>) -> Result<()> {
        let mt = media_type.map_or(core::ptr::null(), |mt| mt as *const AM_MEDIA_TYPE);
        hr_ok(vcall!(self, Connect(receiver.as_raw(), mt)), "IPin::Connect")
    }

    /// Breaks the connection. Returns false if the pin was not connected.
    pub fn Disconnect(&self) -> Result<bool> {
        let hr = vcall!(self, Disconnect());
        hr_ok(hr, "IPin::Disconnect")?;
        Ok(hr.0 != S_FALSE)
    }

    /// The pin at the other end of the connection, `None` if unconnected.
    pub fn ConnectedTo(&self) -> Result<Option<IPin>> {
        let mut raw = core::ptr::null_mut();
        match vcall!(self, ConnectedTo(&mut raw)) {
            HRESULT(VFW_E_NOT_CONNECTED) => Ok(None),
            hr => {
                hr_ok(hr, "ConnectedTo")?;
                unsafe { from_out(raw, "ConnectedTo") }.map(Some)
            }
        }
    }

    pub fn QueryPinInfo(&self) -> Result<PinInfo> {
        let mut info = PIN_INFO::default();
        hr_ok(vcall!(self, QueryPinInfo(&mut info)), "QueryPinInfo")?;
        let filter = (!info.pFilter.is_null()).then(|| unsafe { IBaseFilter::from_raw(info.pFilter) });
        Ok(PinInfo {
            filter,
            direction: PinDirection::from_raw(info.dir).ok_or(WinError::Msg("QueryPinInfo: unknown direction"))?,
            name: WString::from_wide(&info.achName).to_string_lossy(),
        })
    }

    pub fn QueryDirection(&self) -> Result<PinDirection> {
        let mut dir = 0;
        hr_ok(vcall!(self, QueryDirection(&mut dir)), "QueryDirection")?;
        PinDirection::from_raw(dir).ok_or(WinError::Msg("QueryDirection: unknown direction"))
    }

    /// The pin identifier, stable across instances of the filter.
    pub fn QueryId(&self) -> Result<String> {
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, QueryId(&mut raw)), "QueryId")?;
        let id = unsafe { CoTaskMemString::from_raw(raw) };
        if id.is_null() {
            return Err(WinError::NullPointer("QueryId"));
        }
        Ok(id.to_string_lossy())
    }
}

#[repr(C)]
pub struct IPersist_Vtbl {
    pub base__: IUnknown_Vtbl,
    pub GetClassID: unsafe extern "system" fn(this: *mut c_void, clsid: *mut GUID) -> HRESULT,
}

#[repr(C)]
pub struct IMediaFilter_Vtbl {
    pub base__: IPersist_Vtbl,
    pub Stop: unsafe extern "system" fn(this: *mut c_void) -> HRESULT,
    pub Pause: unsafe extern "system" fn(this: *mut c_void) -> HRESULT,
    pub Run: unsafe extern "system" fn(this: *mut c_void, start: i64) -> HRESULT,
    pub GetState: unsafe extern "system" fn(this: *mut c_void, timeout: u32, state: *mut i32) -> HRESULT,
    pub SetSyncSource: *const c_void,
    pub GetSyncSource: *const c_void,
}

#[repr(C)]
pub struct IBaseFilter_Vtbl {
    pub base__: IMediaFilter_Vtbl,
    pub EnumPins: unsafe extern "system" fn(this: *mut c_void, pins: *mut *mut c_void) -> HRESULT,
    pub FindPin: unsafe extern "system" fn(this: *mut c_void, id: *const u16, pin: *mut *mut c_void) -> HRESULT,
    pub QueryFilterInfo: unsafe extern "system" fn(this: *mut c_void, info: *mut FILTER_INFO) -> HRESULT,
    pub JoinFilterGraph: *const c_void,
    pub QueryVendorInfo: *const c_void,
}

#[repr(C)]
pub struct IPin_Vtbl {
    pub base__: IUnknown_Vtbl,
    pub Connect:
        unsafe extern "system" fn(this: *mut c_void, receiver: *mut c_void, mt: *const AM_MEDIA_TYPE) -> HRESULT,
    pub ReceiveConnection: *const c_void,
    pub Disconnect: unsafe extern "system" fn(this: *mut c_void) -> HRESULT,
    pub ConnectedTo: unsafe extern "system" fn(this: *mut c_void, pin: *mut *mut c_void) -> HRESULT,
    pub ConnectionMediaType: *const c_void,
    pub QueryPinInfo: unsafe extern "system" fn(this: *mut c_void, info: *mut PIN_INFO) -> HRESULT,
    pub QueryDirection: unsafe extern "system" fn(this: *mut c_void, dir: *mut i32) -> HRESULT,
    pub QueryId: unsafe extern "system" fn(this: *mut c_void, id: *mut *mut u16) -> HRESULT,
    pub QueryAccept: *const c_void,
    pub EnumMediaTypes: *const c_void,
    pub QueryInternalConnections: *const c_void,
    pub EndOfStream: *const c_void,
    pub BeginFlush: *const c_void,
    pub EndFlush: *const c_void,
    pub NewSegment: *const c_void,
}
