use core::ffi::c_void;

use windows::core::{HRESULT, Interface};
use windows_sys::Win32::System::Variant::VARIANT;

use crate::co::{SCHED_E_NOT_FOUND, TASK_ENUM_HIDDEN, TaskCreation, TaskLogonType};
use crate::com::{from_out, hr_ok};
use crate::error::{Result, WinError};
use crate::ole::{Bstr, IDispatch, IDispatch_Vtbl, OwnedVariant};

use super::{IRegisteredTask, IRegisteredTaskCollection, ITaskDefinition};

com_interface! {
    /// [`ITaskFolder`](https://learn.microsoft.com/en-us/windows/win32/api/taskschd/nn-taskschd-itaskfolder)
    /// COM interface: a folder of registered tasks.
    ITaskFolder: IDispatch,
    vtable: ITaskFolder_Vtbl,
    iid: 0x8cfac062_a080_4c15_9a88_aa7c2af80dfc,
}

variant_collection! {
    /// [`ITaskFolderCollection`](https://learn.microsoft.com/en-us/windows/win32/api/taskschd/nn-taskschd-itaskfoldercollection)
    /// COM interface.
    ITaskFolderCollection => ITaskFolder,
    vtable: ITaskFolderCollection_Vtbl,
    iid: 0x79184a66_8664_423f_97f1_637356a5d812,
}

/// Maps the scheduler's "not found" error to `None`.
fn not_found_as_none<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(WinError::Com(_, SCHED_E_NOT_FOUND)) => Ok(None),
        Err(err) => Err(err),
    }
}

impl ITaskFolder {
    bstr_getter! { get_Name => get_Name }

    bstr_getter! {
        /// Full path from the root, such as `\Microsoft\Windows`.
        get_Path => get_Path
    }

    /// Opens a folder by path, relative to this one or absolute.
    pub fn GetFolder(&self, path: &str) -> Result<ITaskFolder> {
        let path = Bstr::from(path);
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, GetFolder(path.as_ptr(), &mut raw)), "GetFolder")?;
        unsafe { from_out(raw, "GetFolder") }
    }

    /// Like `GetFolder`, with a missing folder as `None`.
    pub fn find_folder(&self, path: &str) -> Result<Option<ITaskFolder>> {
        not_found_as_none(self.GetFolder(path))
    }

    /// Direct sub-folders.
    pub fn GetFolders(&self) -> Result<ITaskFolderCollection> {
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, GetFolders(0, &mut raw)), "GetFolders")?;
        unsafe { from_out(raw, "GetFolders") }
    }

    /// Creates a sub-folder, with an optional SDDL security descriptor.
    pub fn CreateFolder(&self, name: &str, sddl: Option<&str>) -> Result<ITaskFolder> {
        let name = Bstr::from(name);
        let sddl = sddl.map_or_else(OwnedVariant::empty, OwnedVariant::from);
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, CreateFolder(name.as_ptr(), *sddl.as_raw(), &mut raw)), "CreateFolder")?;
        unsafe { from_out(raw, "CreateFolder") }
    }

    /// Deletes an empty sub-folder.
    pub fn DeleteFolder(&self, name: &str) -> Result<()> {
        let name = Bstr::from(name);
        hr_ok(vcall!(self, DeleteFolder(name.as_ptr(), 0)), "DeleteFolder")
    }

    pub fn GetTask(&self, path: &str) -> Result<IRegisteredTask> {
        let path = Bstr::from(path);
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, GetTask(path.as_ptr(), &mut raw)), "GetTask")?;
        unsafe { from_out(raw, "GetTask") }
    }

    /// Like `GetTask`, with a missing task as `None`.
    pub fn find_task(&self, path: &str) -> Result<Option<IRegisteredTask>> {
        not_found_as_none(self.GetTask(path))
    }

    /// Tasks registered directly in this folder.
    pub fn GetTasks(&self, include_hidden: bool) -> Result<IRegisteredTaskCollection> {
        let flags = if include_hidden { TASK_ENUM_HIDDEN } else { 0 };
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, GetTasks(flags, &mut raw)), "GetTasks")?;
        unsafe { from_out(raw, "GetTasks") }
    }

    pub fn DeleteTask(&self, name: &str) -> Result<()> {
        let name = Bstr::from(name);
        hr_ok(vcall!(self, DeleteTask(name.as_ptr(), 0)), "DeleteTask")
    }

    /// Registers a task from its XML form, running under the current user.
    pub fn RegisterTask(
        &self,
        path: &str,
        xml: &str,
        flags: TaskCreation,
        logon: TaskLogonType,
    ) -> Result<IRegisteredTask> {
        let (path, xml) = (Bstr::from(path), Bstr::from(xml));
        let empty = OwnedVariant::empty();
        let mut raw = core::ptr::null_mut();
        let hr = vcall!(
            self,
            RegisterTask(
                path.as_ptr(),
                xml.as_ptr(),
                flags.bits() as i32,
                *empty.as_raw(),
                *empty.as_raw(),
                logon as i32,
                *empty.as_raw(),
                &mut raw,
            )
        );
        hr_ok(hr, "RegisterTask")?;
        unsafe { from_out(raw, "RegisterTask") }
    }

    /// Registers `definition` under `path`, running under the current user.
    pub fn RegisterTaskDefinition(
        &self,
        path: &str,
        definition: &ITaskDefinition,
        flags: TaskCreation,
        logon: TaskLogonType,
    ) -> Result<IRegisteredTask> {
        self.register_definition(path, definition, flags, None, None, logon)
    }

    /// Registers `definition` under `path` for another account. `password`
    /// is needed for `Password` and `InteractiveTokenOrPassword` logons.
    pub fn RegisterTaskDefinitionAs(
        &self,
        path: &str,
        definition: &ITaskDefinition,
        flags: TaskCreation,
        user: &str,
        password: Option<&str>,
        logon: TaskLogonType,
    ) -> Result<IRegisteredTask> {
        self.register_definition(path, definition, flags, Some(user), password, logon)
    }

    fn register_definition(
        &self,
        path: &str,
        definition: &ITaskDefinition,
        flags: TaskCreation,
        user: Option<&str>,
        password: Option<&str>,
        logon: TaskLogonType,
    ) -> Result<IRegisteredTask> {
        let path = Bstr::from(path);
        let user = user.map_or_else(OwnedVariant::empty, OwnedVariant::from);
        let password = password.map_or_else(OwnedVariant::empty, OwnedVariant::from);
        let sddl = OwnedVariant::empty();
        let mut raw = core::ptr::null_mut();
        let hr = vcall!(
            self,
            RegisterTaskDefinition(
                path.as_ptr(),
                definition.as_raw(),
                flags.bits() as i32,
                *user.as_raw(),
                *password.as_raw(),
                logon as i32,
                *sddl.as_raw(),
                &mut raw,
            )
        );
        hr_ok(hr, "RegisterTaskDefinition")?;
        log::debug!("registered task {}", path.to_string_lossy());
        unsafe { from_out(raw, "RegisterTaskDefinition") }
    }
}

#[repr(C)]
pub struct ITaskFolder_Vtbl {
    pub base__: IDispatch_Vtbl,
    pub get_Name: unsafe extern "system" fn(this: *mut c_void, name: *mut *const u16) -> HRESULT,
    pub get_Path: unsafe extern "system" fn(this: *mut c_void, path: *mut *const u16) -> HRESULT,
    pub GetFolder: unsafe extern "system" fn(this: *mut c_void, path: *const u16, folder: *mut *mut c_void) -> HRESULT,
    pub GetFolders: unsafe extern "system" fn(this: *mut c_void, flags: i32, folders: *mut *mut c_void) -> HRESULT,
    pub CreateFolder: unsafe extern "system" fn(
        this: *mut c_void,
        name: *const u16,
        sddl: VARIANT,
        folder: *mut *mut c_void,
    ) -> HRESULT,
    pub DeleteFolder: unsafe extern "system" fn(this: *mut c_void, name: *const u16, flags: i32) -> HRESULT,
    pub GetTask: unsafe extern "system" fn(this: *mut c_void, path: *const u16, task: *mut *mut c_void) -> HRESULT,
    pub GetTasks: unsafe extern "system" fn(this: *mut c_void, flags: i32, tasks: *mut *mut c_void) -> HRESULT,
    pub DeleteTask: unsafe extern "system" fn(this: *mut c_void, name: *const u16, flags: i32) -> HRESULT,
    pub RegisterTask: unsafe extern "system" fn(
        this: *mut c_void,
        path: *const u16,
        xml: *const u16,
        flags: i32,
        user: VARIANT,
        password: VARIANT,
        logon: i32,
        sddl: VARIANT,
        task: *mut *mut c_void,
    ) -> HRESULT,
    pub RegisterTaskDefinition: unsafe extern "system" fn(
        this: *mut c_void,
        path: *const u16,
        definition: *mut c_void,
        flags: i32,
        user: VARIANT,
        password: VARIANT,
        logon: i32,
        sddl: VARIANT,
        task: *mut *mut c_void,
    ) -> HRESULT,
    pub GetSecurityDescriptor: *const c_void,
    pub SetSecurityDescriptor: *const c_void,
}
