use alloc::vec::Vec;
use core::ffi::c_void;

use windows::core::{GUID, HRESULT, IUnknown, IUnknown_Vtbl, Interface};

use crate::co::{ClsCtx, S_FALSE, VFW_E_NOT_FOUND};
use crate::com::{create_instance, from_out, hr_ok};
use crate::error::Result;
use crate::string::WString;
use crate::structs::AM_MEDIA_TYPE;

use super::{IBaseFilter, IEnumFilters, IPin};

/// `CLSID_FilterGraph`, the Filter Graph Manager.
pub const CLSID_FILTER_GRAPH: GUID = GUID::from_u128(0xe436ebb3_524f_11ce_9f53_0020af0ba770);

com_interface! {
    /// [`IFilterGraph`](https://learn.microsoft.com/en-us/windows/win32/api/strmif/nn-strmif-ifiltergraph)
    /// COM interface.
    IFilterGraph: IUnknown,
    vtable: IFilterGraph_Vtbl,
    iid: 0x56a8689f_0ad4_11ce_b03a_0020af0ba770,
}

com_interface! {
    /// [`IGraphBuilder`](https://learn.microsoft.com/en-us/windows/win32/api/strmif/nn-strmif-igraphbuilder)
    /// COM interface: the Filter Graph Manager with intelligent connect.
    ///
    /// Query it for `IMediaControl`, `IMediaEvent`, `IMediaSeeking` and
    /// `IBasicAudio` to drive playback.
    IGraphBuilder: IFilterGraph,
    vtable: IGraphBuilder_Vtbl,
    iid: 0x56a868a9_0ad4_11ce_b03a_0020af0ba770,
}

impl IFilterGraph {
    /// Adds `filter` under `name`. A name already in use gets a suffix.
    pub fn AddFilter(&self, filter: &IBaseFilter, name: &str) -> Result<()> {
        let name = WString::from_str(name);
        hr_ok(vcall!(self, AddFilter(filter.as_raw(), name.as_ptr())), "AddFilter")
    }

    iface_setter! {
        /// Removes a filter, disconnecting its pins first.
        RemoveFilter => RemoveFilter(IBaseFilter)
    }

    iface_getter! {
        EnumFilters => EnumFilters -> IEnumFilters
    }

    /// Finds a filter by the name it was added under.
    pub fn FindFilterByName(&self, name: &str) -> Result<Option<IBaseFilter>> {
        let name = WString::from_str(name);
        let mut raw = core::ptr::null_mut();
        match vcall!(self, FindFilterByName(name.as_ptr(), &mut raw)) {
            HRESULT(VFW_E_NOT_FOUND) => Ok(None),
            hr => {
                hr_ok(hr, "FindFilterByName")?;
                unsafe { from_out(raw, "FindFilterByName") }.map(Some)
            }
        }
    }

    /// Connects two pins without inserting intermediate filters.
    pub fn ConnectDirect(&self, output: &IPin, input: &IPin, media_type: Option<&AM_MEDIA_TYPE>) -> Result<()> {
        let mt = media_type.map_or(core::ptr::null(), |mt| mt as *const AM_MEDIA_TYPE);
        hr_ok(vcall!(self, ConnectDirect(output.as_raw(), input.as_raw(), mt)), "ConnectDirect")
    }

    iface_setter! {
        Reconnect => Reconnect(IPin)
    }

    iface_setter! {
        /// Disconnects one end of a connection; call it for both pins.
        Disconnect => Disconnect(IPin)
    }

    pub fn SetDefaultSyncSource(&self) -> Result<()> {
        hr_ok(vcall!(self, SetDefaultSyncSource()), "SetDefaultSyncSource")
    }

    /// Every filter in the graph.
    pub fn filters(&self) -> Result<Vec<IBaseFilter>> {
        self.EnumFilters()?.collect_all()
    }
}

impl IGraphBuilder {
    /// Creates an empty Filter Graph Manager.
    pub fn create() -> Result<Self> {
        let graph: Self = create_instance(&CLSID_FILTER_GRAPH, ClsCtx::INPROC_SERVER)?;
        log::trace!("created filter graph {:p}", graph.as_raw());
        Ok(graph)
    }

    /// Connects two pins, adding intermediate filters as needed.
    pub fn Connect(&self, output: &IPin, input: &IPin) -> Result<()> {
        hr_ok(vcall!(self, Connect(output.as_raw(), input.as_raw())), "IGraphBuilder::Connect")
    }

    iface_setter! {
        /// Builds the rest of the graph downstream of an output pin.
        Render => Render(IPin)
    }

    /// Builds a playback graph for a file or URL.
    pub fn RenderFile(&self, file: &str) -> Result<()> {
        let file = WString::from_str(file);
        hr_ok(vcall!(self, RenderFile(file.as_ptr(), core::ptr::null())), "IGraphBuilder::RenderFile")
    }

    /// Adds a source filter for `file` and returns it.
    pub fn AddSourceFilter(&self, file: &str, name: &str) -> Result<IBaseFilter> {
        let file = WString::from_str(file);
        let name = WString::from_str(name);
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, AddSourceFilter(file.as_ptr(), name.as_ptr(), &mut raw)), "AddSourceFilter")?;
        unsafe { from_out(raw, "AddSourceFilter") }
    }

    /// Asks a graph build running on another thread to stop.
    pub fn Abort(&self) -> Result<()> {
        hr_ok(vcall!(self, Abort()), "Abort")
    }

    /// False once [`Self::Abort`] has been called.
    pub fn ShouldOperationContinue(&self) -> Result<bool> {
        let hr = vcall!(self, ShouldOperationContinue());
        hr_ok(hr, "ShouldOperationContinue")?;
        Ok(hr.0 != S_FALSE)
    }
}

#[repr(C)]
pub struct IFilterGraph_Vtbl {
    pub base__: IUnknown_Vtbl,
    pub AddFilter: unsafe extern "system" fn(this: *mut c_void, filter: *mut c_void, name: *const u16) -> HRESULT,
    pub RemoveFilter: unsafe extern "system" fn(this: *mut c_void, filter: *mut c_void) -> HRESULT,
    pub EnumFilters: unsafe extern "system" fn(this: *mut c_void, filters: *mut *mut c_void) -> HRESULT,
    pub FindFilterByName:
        unsafe extern "system" fn(this: *mut c_void, name: *const u16, filter: *mut *mut c_void) -> HRESULT,
    pub ConnectDirect: unsafe extern "system" fn(
        this: *mut c_void,
        output: *mut c_void,
        input: *mut c_void,
        mt: *const AM_MEDIA_TYPE,
    ) -> HRESULT,
    pub Reconnect: unsafe extern "system" fn(this: *mut c_void, pin: *mut c_void) -> HRESULT,
    pub Disconnect: unsafe extern "system" fn(this: *mut c_void, pin: *mut c_void) -> HRESULT,
    pub SetDefaultSyncSource: unsafe extern "system" fn(this: *mut c_void) -> HRESULT,
}

#[repr(C)]
pub struct IGraphBuilder_Vtbl {
    pub base__: IFilterGraph_Vtbl,
    pub Connect: unsafe extern "system" fn(this: *mut c_void, output: *mut c_void, input: *mut c_void) -> HRESULT,
    pub Render: unsafe extern "system" fn(this: *mut c_void, output: *mut c_void) -> HRESULT,
    pub RenderFile:
        unsafe extern "system" fn(this: *mut c_void, file: *const u16, playlist: *const u16) -> HRESULT,
    pub AddSourceFilter: unsafe extern "system" fn(
        this: *mut c_void,
        file: *const u16,
        name: *const u16,
        filter: *mut *mut c_void,
    ) -> HRESULT,
    pub SetLogFile: *const c_void,
    pub Abort: unsafe extern "system" fn(this: *mut c_void) -> HRESULT,
    pub ShouldOperationContinue: unsafe extern "system" fn(this: *mut c_void) -> HRESULT,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::co::{E_FAIL, PinDirection, VFW_E_CANNOT_CONNECT};
    use crate::com::fake::{self, FakeCom};
    use crate::dshow::IEnumFilters;
    use crate::dshow::fakes::{fake_enum, fake_filter, fake_pin};
    use crate::error::WinError;
    use alloc::string::String;
    use core::cell::{Cell, RefCell};
    use core::mem::offset_of;

    const SLOT: usize = size_of::<usize>();

    #[test]
    fn test_vtable_slots() {
        assert_eq!(offset_of!(IFilterGraph_Vtbl, AddFilter), 3 * SLOT);
        assert_eq!(offset_of!(IFilterGraph_Vtbl, SetDefaultSyncSource), 10 * SLOT);
        assert_eq!(offset_of!(IGraphBuilder_Vtbl, Connect), 11 * SLOT);
        assert_eq!(offset_of!(IGraphBuilder_Vtbl, RenderFile), 13 * SLOT);
        assert_eq!(offset_of!(IGraphBuilder_Vtbl, ShouldOperationContinue), 17 * SLOT);
    }

    #[derive(Default)]
    struct Graph {
        filters: RefCell<Vec<(String, IUnknown)>>,
        rendered: RefCell<Vec<String>>,
        aborted: Cell<bool>,
    }

    fn graph(this: *mut c_void) -> &'static Graph {
        &unsafe { FakeCom::<Graph>::from_this(this) }.state
    }

    unsafe extern "system" fn add_filter(this: *mut c_void, filter: *mut c_void, name: *const u16) -> HRESULT {
        let name = unsafe { crate::string::from_wide_ptr(name) };
        let filter = unsafe { crate::com::clone_raw(filter) };
        graph(this).filters.borrow_mut().extend(filter.map(|f| (name, f)));
        HRESULT(0)
    }
    unsafe extern "system" fn remove_filter(this: *mut c_void, filter: *mut c_void) -> HRESULT {
        let mut filters = graph(this).filters.borrow_mut();
        let before = filters.len();
        filters.retain(|(_, f)| f.as_raw() != filter);
        HRESULT(if filters.len() < before { 0 } else { E_FAIL })
    }
    unsafe extern "system" fn enum_filters(this: *mut c_void, out: *mut *mut c_void) -> HRESULT {
        let items = graph(this).filters.borrow().iter().map(|(_, f)| f.clone()).collect();
        let (filters, _) = fake_enum::<IEnumFilters>(items);
        unsafe { *out = filters.into_raw() };
        HRESULT(0)
    }
    unsafe extern "system" fn find_by_name(this: *mut c_void, name: *const u16, out: *mut *mut c_void) -> HRESULT {
        let name = unsafe { crate::string::from_wide_ptr(name) };
        let filters = graph(this).filters.borrow();
        match filters.iter().find(|(n, _)| *n == name) {
            Some((_, f)) => {
                unsafe { *out = f.clone().into_raw() };
                HRESULT(0)
            }
            None => HRESULT(VFW_E_NOT_FOUND),
        }
    }
    unsafe extern "system" fn connect_direct(
        _: *mut c_void,
        output: *mut c_void,
        input: *mut c_void,
        mt: *const AM_MEDIA_TYPE,
    ) -> HRESULT {
        let output: core::mem::ManuallyDrop<IPin> = core::mem::ManuallyDrop::new(fake::wrap(output));
        let input: core::mem::ManuallyDrop<IPin> = core::mem::ManuallyDrop::new(fake::wrap(input));
        match output.Connect(&input, unsafe { mt.as_ref() }) {
            Ok(()) => HRESULT(0),
            Err(_) => HRESULT(E_FAIL),
        }
    }
    unsafe extern "system" fn pin_op(_: *mut c_void, _: *mut c_void) -> HRESULT {
        HRESULT(0)
    }
    unsafe extern "system" fn no_op(_: *mut c_void) -> HRESULT {
        HRESULT(0)
    }
    unsafe extern "system" fn connect(_: *mut c_void, _: *mut c_void, _: *mut c_void) -> HRESULT {
        HRESULT(VFW_E_CANNOT_CONNECT)
    }
    unsafe extern "system" fn render_file(this: *mut c_void, file: *const u16, playlist: *const u16) -> HRESULT {
        assert!(playlist.is_null());
        graph(this).rendered.borrow_mut().push(unsafe { crate::string::from_wide_ptr(file) });
        HRESULT(0)
    }
    unsafe extern "system" fn add_source(
        this: *mut c_void,
        _: *const u16,
        name: *const u16,
        out: *mut *mut c_void,
    ) -> HRESULT {
        let (source, _) = fake_filter("Source", alloc::vec![fake_pin("Output", PinDirection::Output as i32).0]);
        unsafe { add_filter(this, source.as_raw(), name) };
        unsafe { *out = source.into_raw() };
        HRESULT(0)
    }
    unsafe extern "system" fn abort(this: *mut c_void) -> HRESULT {
        graph(this).aborted.set(true);
        HRESULT(0)
    }
    unsafe extern "system" fn should_continue(this: *mut c_void) -> HRESULT {
        HRESULT(if graph(this).aborted.get() { S_FALSE } else { 0 })
    }

    fn fake_graph() -> (IGraphBuilder, &'static FakeCom<Graph>) {
        let vtbl = IGraphBuilder_Vtbl {
            base__: IFilterGraph_Vtbl {
                base__: fake::unknown_vtbl(),
                AddFilter: add_filter,
                RemoveFilter: remove_filter,
                EnumFilters: enum_filters,
                FindFilterByName: find_by_name,
                ConnectDirect: connect_direct,
                Reconnect: pin_op,
                Disconnect: pin_op,
                SetDefaultSyncSource: no_op,
            },
            Connect: connect,
            Render: pin_op,
            RenderFile: render_file,
            AddSourceFilter: add_source,
            SetLogFile: core::ptr::null(),
            Abort: abort,
            ShouldOperationContinue: should_continue,
        };
        let (raw, obj) = FakeCom::create(vtbl, Graph::default());
        (fake::wrap(raw), obj)
    }

    #[test]
    fn test_add_find_remove() -> Result<()> {
        let (graph, _) = fake_graph();
        let (decoder, _) = fake_filter("Decoder", Vec::new());
        let (renderer, _) = fake_filter("Renderer", Vec::new());

        graph.AddFilter(&decoder, "Video Decoder")?;
        graph.AddFilter(&renderer, "Video Renderer")?;
        assert_eq!(graph.filters()?.len(), 2);
        assert_eq!(graph.FindFilterByName("Video Renderer")?, Some(renderer.clone()));
        assert_eq!(graph.FindFilterByName("Audio Renderer")?, None);

        graph.RemoveFilter(&renderer)?;
        assert_eq!(graph.filters()?, [decoder]);
        assert!(matches!(graph.RemoveFilter(&renderer), Err(WinError::Com("RemoveFilter", E_FAIL))));
        Ok(())
    }

    #[test]
    fn test_source_and_connect() -> Result<()> {
        let (graph, obj) = fake_graph();
        let source = graph.AddSourceFilter("C:\\media\\clip.avi", "Source")?;
        assert_eq!(graph.FindFilterByName("Source")?, Some(source.clone()));

        let output = source.FindPin("Output")?;
        let (sink, _) = fake_pin("Input", PinDirection::Input as i32);
        assert!(matches!(
            graph.Connect(&output, &sink),
            Err(WinError::Com("IGraphBuilder::Connect", VFW_E_CANNOT_CONNECT))
        ));
        graph.ConnectDirect(&output, &sink, None)?;
        assert_eq!(sink.ConnectedTo()?, Some(output));

        graph.RenderFile("C:\\media\\song.mp3")?;
        assert_eq!(*obj.state.rendered.borrow(), ["C:\\media\\song.mp3"]);
        Ok(())
    }

    #[test]
    fn test_abort() -> Result<()> {
        let (graph, _) = fake_graph();
        assert!(graph.ShouldOperationContinue()?);
        graph.Abort()?;
        assert!(!graph.ShouldOperationContinue()?);
        Ok(())
    }
}
