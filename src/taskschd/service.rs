use core::ffi::c_void;

use windows::core::{GUID, HRESULT};
use windows_sys::Win32::System::Variant::VARIANT;

use crate::co::{ClsCtx, TASK_ENUM_HIDDEN};
use crate::com::{create_instance, from_out, hr_ok};
use crate::error::Result;
use crate::ole::{Bstr, IDispatch, IDispatch_Vtbl, OwnedVariant};

use super::{IRunningTaskCollection, ITaskDefinition, ITaskFolder};

/// `CLSID_TaskScheduler`.
pub const CLSID_TASK_SCHEDULER: GUID = GUID::from_u128(0x0f87369f_a4e5_4cfc_bd3e_73e6154572dd);

com_interface! {
    /// [`ITaskService`](https://learn.microsoft.com/en-us/windows/win32/api/taskschd/nn-taskschd-itaskservice)
    /// COM interface: a connection to the Task Scheduler service.
    ITaskService: IDispatch,
    vtable: ITaskService_Vtbl,
    iid: 0x2faba4c7_4da9_4013_9697_20cc3fd40f85,
}

/// An optional string argument, passed as `VT_EMPTY` when absent.
fn opt_variant(value: Option<&str>) -> OwnedVariant {
    value.map_or_else(OwnedVariant::empty, OwnedVariant::from)
}

impl ITaskService {
    /// Creates the service object. It must be connected before use.
    pub fn create() -> Result<Self> {
        create_instance(&CLSID_TASK_SCHEDULER, ClsCtx::INPROC_SERVER)
    }

    /// Connects to `server`, or to the local machine for `None`, with the
    /// given credentials or those of the current token.
    pub fn Connect(
        &self,
        server: Option<&str>,
        user: Option<&str>,
        domain: Option<&str>,
        password: Option<&str>,
    ) -> Result<()> {
        let args = [server, user, domain, password].map(opt_variant);
        let hr = vcall!(
            self,
            Connect(*args[0].as_raw(), *args[1].as_raw(), *args[2].as_raw(), *args[3].as_raw())
        );
        hr_ok(hr, "ITaskService::Connect")?;
        log::debug!("connected to task scheduler on {}", server.unwrap_or("local machine"));
        Ok(())
    }

    /// Connects to the local scheduler as the current user.
    pub fn connect_local(&self) -> Result<()> {
        self.Connect(None, None, None, None)
    }

    /// Opens a folder by path; `\` is the root.
    pub fn GetFolder(&self, path: &str) -> Result<ITaskFolder> {
        let path = Bstr::from(path);
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, GetFolder(path.as_ptr(), &mut raw)), "ITaskService::GetFolder")?;
        unsafe { from_out(raw, "ITaskService::GetFolder") }
    }

    /// Instances running on the connected machine.
    pub fn GetRunningTasks(&self, include_hidden: bool) -> Result<IRunningTaskCollection> {
        let flags = if include_hidden { TASK_ENUM_HIDDEN } else { 0 };
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, GetRunningTasks(flags, &mut raw)), "GetRunningTasks")?;
        unsafe { from_out(raw, "GetRunningTasks") }
    }

    /// Returns an empty definition to fill in and register.
    pub fn NewTask(&self) -> Result<ITaskDefinition> {
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, NewTask(0, &mut raw)), "NewTask")?;
        unsafe { from_out(raw, "NewTask") }
    }

    /// Whether `Connect` has succeeded.
    pub fn get_Connected(&self) -> Result<bool> {
        let mut connected: i16 = 0;
        hr_ok(vcall!(self, get_Connected(&mut connected)), "get_Connected")?;
        Ok(connected != 0)
    }

    bstr_getter! { get_TargetServer => get_TargetServer }
    bstr_getter! { get_ConnectedUser => get_ConnectedUser }
    bstr_getter! { get_ConnectedDomain => get_ConnectedDomain }

    value_getter! {
        /// Highest scheduler version supported by the server, major in the
        /// high word: `0x00010002` is version 1.2.
        get_HighestVersion => get_HighestVersion -> u32
    }
}

#[repr(C)]
pub struct ITaskService_Vtbl {
    pub base__: IDispatch_Vtbl,
    pub GetFolder: unsafe extern "system" fn(this: *mut c_void, path: *const u16, folder: *mut *mut c_void) -> HRESULT,
    pub GetRunningTasks: unsafe extern "system" fn(this: *mut c_void, flags: i32, tasks: *mut *mut c_void) -> HRESULT,
    pub NewTask: unsafe extern "system" fn(this: *mut c_void, flags: u32, definition: *mut *mut c_void) -> HRESULT,
    pub Connect: unsafe extern "system" fn(
        this: *mut c_void,
        server: VARIANT,
        user: VARIANT,
        domain: VARIANT,
        password: VARIANT,
    ) -> HRESULT,
    pub get_Connected: unsafe extern "system" fn(this: *mut c_void, connected: *mut i16) -> HRESULT,
    pub get_TargetServer: unsafe extern "system" fn(this: *mut c_void, server: *mut *const u16) -> HRESULT,
    pub get_ConnectedUser: unsafe extern "system" fn(this: *mut c_void, user: *mut *const u16) -> HRESULT,
    pub get_ConnectedDomain: unsafe extern "system" fn(this: *mut c_void, domain: *mut *const u16) -> HRESULT,
    pub get_HighestVersion: unsafe extern "system" fn(this: *mut c_void, version: *mut u32) -> HRESULT,
}
