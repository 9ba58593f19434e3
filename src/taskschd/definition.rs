use core::ffi::c_void;

use windows::core::HRESULT;
use windows_sys::Win32::System::Variant::VARIANT;

use crate::co::{InstancesPolicy, TaskCompatibility};
use crate::com::hr_ok;
use crate::error::Result;
use crate::ole::{IDispatch, IDispatch_Vtbl};

use super::{IActionCollection, ITriggerCollection, decode};

com_interface! {
    /// [`ITaskDefinition`](https://learn.microsoft.com/en-us/windows/win32/api/taskschd/nn-taskschd-itaskdefinition)
    /// COM interface: everything a task is made of, before or after
    /// registration.
    ITaskDefinition: IDispatch,
    vtable: ITaskDefinition_Vtbl,
    iid: 0xf5bc8fc5_536d_4f77_b852_fbc1356fdeb6,
}

com_interface! {
    /// [`IRegistrationInfo`](https://learn.microsoft.com/en-us/windows/win32/api/taskschd/nn-taskschd-iregistrationinfo)
    /// COM interface.
    IRegistrationInfo: IDispatch,
    vtable: IRegistrationInfo_Vtbl,
    iid: 0x416d8b73_cb41_4ea1_805c_9be9a5ac4a74,
}

com_interface! {
    /// [`ITaskSettings`](https://learn.microsoft.com/en-us/windows/win32/api/taskschd/nn-taskschd-itasksettings)
    /// COM interface.
    ITaskSettings: IDispatch,
    vtable: ITaskSettings_Vtbl,
    iid: 0x8fd4711d_2d02_4c8c_87e3_eff699de127e,
}

impl ITaskDefinition {
    iface_getter! { get_RegistrationInfo => get_RegistrationInfo -> IRegistrationInfo }
    iface_setter! { put_RegistrationInfo => put_RegistrationInfo(IRegistrationInfo) }
    iface_getter! { get_Triggers => get_Triggers -> ITriggerCollection }
    iface_setter! { put_Triggers => put_Triggers(ITriggerCollection) }
    iface_getter! { get_Settings => get_Settings -> ITaskSettings }
    iface_setter! { put_Settings => put_Settings(ITaskSettings) }
    iface_getter! { get_Actions => get_Actions -> IActionCollection }
    iface_setter! { put_Actions => put_Actions(IActionCollection) }

    bstr_getter! {
        /// Free-form data stored with the task for its handlers.
        get_Data => get_Data
    }
    bstr_setter! { put_Data => put_Data }

    bstr_getter! {
        /// The whole definition as Task Scheduler XML.
        get_XmlText => get_XmlText
    }
    bstr_setter! {
        /// Replaces the whole definition with parsed XML.
        put_XmlText => put_XmlText
    }
}

impl IRegistrationInfo {
    bstr_getter! { get_Description => get_Description }
    bstr_setter! { put_Description => put_Description }
    bstr_getter! { get_Author => get_Author }
    bstr_setter! { put_Author => put_Author }
    bstr_getter! { get_Version => get_Version }
    bstr_setter! { put_Version => put_Version }

    bstr_getter! {
        /// Registration date in `YYYY-MM-DDTHH:MM:SS` form.
        get_Date => get_Date
    }
    bstr_setter! { put_Date => put_Date }

    bstr_getter! { get_Documentation => get_Documentation }
    bstr_setter! { put_Documentation => put_Documentation }
    bstr_getter! { get_XmlText => get_XmlText }
    bstr_setter! { put_XmlText => put_XmlText }
    bstr_getter! { get_URI => get_URI }
    bstr_setter! { put_URI => put_URI }
    bstr_getter! { get_Source => get_Source }
    bstr_setter! { put_Source => put_Source }
}

impl ITaskSettings {
    bool_property!(get_AllowDemandStart => get_AllowDemandStart, put_AllowDemandStart => put_AllowDemandStart);

    bstr_getter! {
        /// Delay between restart attempts as an ISO 8601 duration, such as `PT5M`.
        get_RestartInterval => get_RestartInterval
    }
    bstr_setter! { put_RestartInterval => put_RestartInterval }

    value_getter! { get_RestartCount => get_RestartCount -> i32 }
    value_setter! { put_RestartCount => put_RestartCount(i32) }

    pub fn get_MultipleInstances(&self) -> Result<InstancesPolicy> {
        let mut policy = 0;
        hr_ok(vcall!(self, get_MultipleInstances(&mut policy)), "get_MultipleInstances")?;
        decode(policy, InstancesPolicy::from_raw, "get_MultipleInstances")
    }

    pub fn put_MultipleInstances(&self, policy: InstancesPolicy) -> Result<()> {
        hr_ok(vcall!(self, put_MultipleInstances(policy as i32)), "put_MultipleInstances")
    }

    bool_property!(
        get_StopIfGoingOnBatteries => get_StopIfGoingOnBatteries,
        put_StopIfGoingOnBatteries => put_StopIfGoingOnBatteries
    );
    bool_property!(
        get_DisallowStartIfOnBatteries => get_DisallowStartIfOnBatteries,
        put_DisallowStartIfOnBatteries => put_DisallowStartIfOnBatteries
    );
    bool_property!(get_AllowHardTerminate => get_AllowHardTerminate, put_AllowHardTerminate => put_AllowHardTerminate);
    bool_property!(get_StartWhenAvailable => get_StartWhenAvailable, put_StartWhenAvailable => put_StartWhenAvailable);

    bstr_getter! { get_XmlText => get_XmlText }
    bstr_setter! { put_XmlText => put_XmlText }

    bool_property!(
        get_RunOnlyIfNetworkAvailable => get_RunOnlyIfNetworkAvailable,
        put_RunOnlyIfNetworkAvailable => put_RunOnlyIfNetworkAvailable
    );

    bstr_getter! {
        /// Longest allowed run as an ISO 8601 duration; `PT0S` means unlimited.
        get_ExecutionTimeLimit => get_ExecutionTimeLimit
    }
    bstr_setter! { put_ExecutionTimeLimit => put_ExecutionTimeLimit }

    bool_property!(get_Enabled => get_Enabled, put_Enabled => put_Enabled);

    bstr_getter! { get_DeleteExpiredTaskAfter => get_DeleteExpiredTaskAfter }
    bstr_setter! { put_DeleteExpiredTaskAfter => put_DeleteExpiredTaskAfter }

    value_getter! {
        /// 0 (highest) to 10 (lowest); new tasks get 7.
        get_Priority => get_Priority -> i32
    }

    /// Sets the priority, 0 (highest) to 10 (lowest).
    pub fn put_Priority(&self, priority: i32) -> Result<()> {
        if !(0..=10).contains(&priority) {
            return Err(crate::error::WinError::Msg("task priority must be between 0 and 10"));
        }
        hr_ok(vcall!(self, put_Priority(priority)), "put_Priority")
    }

    pub fn get_Compatibility(&self) -> Result<TaskCompatibility> {
        let mut level = 0;
        hr_ok(vcall!(self, get_Compatibility(&mut level)), "get_Compatibility")?;
        decode(level, TaskCompatibility::from_raw, "get_Compatibility")
    }

    pub fn put_Compatibility(&self, level: TaskCompatibility) -> Result<()> {
        hr_ok(vcall!(self, put_Compatibility(level as i32)), "put_Compatibility")
    }

    bool_property!(get_Hidden => get_Hidden, put_Hidden => put_Hidden);
    bool_property!(get_RunOnlyIfIdle => get_RunOnlyIfIdle, put_RunOnlyIfIdle => put_RunOnlyIfIdle);
    bool_property!(get_WakeToRun => get_WakeToRun, put_WakeToRun => put_WakeToRun);
}

type GetObject = unsafe extern "system" fn(this: *mut c_void, value: *mut *mut c_void) -> HRESULT;
type PutObject = unsafe extern "system" fn(this: *mut c_void, value: *mut c_void) -> HRESULT;
type GetBstr = unsafe extern "system" fn(this: *mut c_void, value: *mut *const u16) -> HRESULT;
type PutBstr = unsafe extern "system" fn(this: *mut c_void, value: *const u16) -> HRESULT;
type GetBool = unsafe extern "system" fn(this: *mut c_void, value: *mut i16) -> HRESULT;
type PutBool = unsafe extern "system" fn(this: *mut c_void, value: i16) -> HRESULT;
type GetLong = unsafe extern "system" fn(this: *mut c_void, value: *mut i32) -> HRESULT;
type PutLong = unsafe extern "system" fn(this: *mut c_void, value: i32) -> HRESULT;

#[repr(C)]
pub struct ITaskDefinition_Vtbl {
    pub base__: IDispatch_Vtbl,
    pub get_RegistrationInfo: GetObject,
    pub put_RegistrationInfo: PutObject,
    pub get_Triggers: GetObject,
    pub put_Triggers: PutObject,
    pub get_Settings: GetObject,
    pub put_Settings: PutObject,
    pub get_Data: GetBstr,
    pub put_Data: PutBstr,
    pub get_Principal: *const c_void,
    pub put_Principal: *const c_void,
    pub get_Actions: GetObject,
    pub put_Actions: PutObject,
    pub get_XmlText: GetBstr,
    pub put_XmlText: PutBstr,
}

#[repr(C)]
pub struct IRegistrationInfo_Vtbl {
    pub base__: IDispatch_Vtbl,
    pub get_Description: GetBstr,
    pub put_Description: PutBstr,
    pub get_Author: GetBstr,
    pub put_Author: PutBstr,
    pub get_Version: GetBstr,
    pub put_Version: PutBstr,
    pub get_Date: GetBstr,
    pub put_Date: PutBstr,
    pub get_Documentation: GetBstr,
    pub put_Documentation: PutBstr,
    pub get_XmlText: GetBstr,
    pub put_XmlText: PutBstr,
    pub get_URI: GetBstr,
    pub put_URI: PutBstr,
    pub get_SecurityDescriptor: unsafe extern "system" fn(this: *mut c_void, sddl: *mut VARIANT) -> HRESULT,
    pub put_SecurityDescriptor: unsafe extern "system" fn(this: *mut c_void, sddl: VARIANT) -> HRESULT,
    pub get_Source: GetBstr,
    pub put_Source: PutBstr,
}

#[repr(C)]
pub struct ITaskSettings_Vtbl {
    pub base__: IDispatch_Vtbl,
    pub get_AllowDemandStart: GetBool,
    pub put_AllowDemandStart: PutBool,
    pub get_RestartInterval: GetBstr,
    pub put_RestartInterval: PutBstr,
    pub get_RestartCount: GetLong,
    pub put_RestartCount: PutLong,
    pub get_MultipleInstances: GetLong,
    pub put_MultipleInstances: PutLong,
    pub get_StopIfGoingOnBatteries: GetBool,
    pub put_StopIfGoingOnBatteries: PutBool,
    pub get_DisallowStartIfOnBatteries: GetBool,
    pub put_DisallowStartIfOnBatteries: PutBool,
    pub get_AllowHardTerminate: GetBool,
    pub put_AllowHardTerminate: PutBool,
    pub get_StartWhenAvailable: GetBool,
    pub put_StartWhenAvailable: PutBool,
    pub get_XmlText: GetBstr,
    pub put_XmlText: PutBstr,
    pub get_RunOnlyIfNetworkAvailable: GetBool,
    pub put_RunOnlyIfNetworkAvailable: PutBool,
    pub get_ExecutionTimeLimit: GetBstr,
    pub put_ExecutionTimeLimit: PutBstr,
    pub get_Enabled: GetBool,
    pub put_Enabled: PutBool,
    pub get_DeleteExpiredTaskAfter: GetBstr,
    pub put_DeleteExpiredTaskAfter: PutBstr,
    pub get_Priority: GetLong,
    pub put_Priority: PutLong,
    pub get_Compatibility: GetLong,
    pub put_Compatibility: PutLong,
    pub get_Hidden: GetBool,
    pub put_Hidden: PutBool,
    pub get_IdleSettings: *const c_void,
    pub put_IdleSettings: *const c_void,
    pub get_RunOnlyIfIdle: GetBool,
    pub put_RunOnlyIfIdle: PutBool,
    pub get_WakeToRun: GetBool,
    pub put_WakeToRun: PutBool,
    pub get_NetworkSettings: *const c_void,
    pub put_NetworkSettings: *const c_void,
}
