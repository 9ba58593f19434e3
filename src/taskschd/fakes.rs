//! Fake folders, tasks and collections for the Task Scheduler tests.

use alloc::{format, string::String, vec::Vec};
use core::cell::{Cell, RefCell};
use core::ffi::c_void;
use core::mem::ManuallyDrop;

use windows::core::{HRESULT, IUnknown, Interface};
use windows_sys::Win32::System::Variant::VARIANT;

use crate::co::{E_INVALIDARG, E_NOTIMPL, SCHED_E_NOT_FOUND};
use crate::com::fake::{self, FakeCom};
use crate::com::into_unknown;
use crate::ole::{Bstr, OwnedVariant};
use crate::string::from_wide_ptr;

use super::{
    IRegisteredTask, IRegisteredTask_Vtbl, IRunningTask, IRunningTask_Vtbl, ITaskFolder, ITaskFolder_Vtbl,
    ITaskFolderCollection_Vtbl,
};

unsafe fn put_bstr(out: *mut *const u16, value: &str) -> HRESULT {
    unsafe { *out = Bstr::from(value).into_raw() };
    HRESULT(0)
}

unsafe fn put_object(out: *mut *mut c_void, obj: Option<&IUnknown>, missing: i32) -> HRESULT {
    match obj {
        Some(obj) => {
            unsafe { *out = obj.clone().into_raw() };
            HRESULT(0)
        }
        None => {
            unsafe { *out = core::ptr::null_mut() };
            HRESULT(missing)
        }
    }
}

/// Reads a `VARIANT` the caller still owns.
fn peek(var: VARIANT) -> ManuallyDrop<OwnedVariant> {
    ManuallyDrop::new(unsafe { OwnedVariant::from_raw(var) })
}

// Collections.

struct Collection {
    items: Vec<(String, IUnknown)>,
}

unsafe extern "system" fn collection_count(this: *mut c_void, count: *mut i32) -> HRESULT {
    let state = &unsafe { FakeCom::<Collection>::from_this(this) }.state;
    unsafe { *count = state.items.len() as i32 };
    HRESULT(0)
}

unsafe extern "system" fn collection_item(this: *mut c_void, index: VARIANT, out: *mut *mut c_void) -> HRESULT {
    let state = &unsafe { FakeCom::<Collection>::from_this(this) }.state;
    let index = peek(index);
    let found = match (index.get_i32(), index.get_string()) {
        (Some(i), _) if i >= 1 => state.items.get(i as usize - 1),
        (_, Some(name)) => state.items.iter().find(|(n, _)| *n == name),
        _ => None,
    };
    unsafe { put_object(out, found.map(|(_, obj)| obj), E_INVALIDARG) }
}

/// Any of the `VARIANT`-indexed collections; they share one layout.
pub fn fake_collection<T: Interface>(items: Vec<(String, IUnknown)>) -> T {
    let vtbl = ITaskFolderCollection_Vtbl {
        base__: fake::dispatch_vtbl(),
        get_Count: collection_count,
        get_Item: collection_item,
        get__NewEnum: core::ptr::null(),
    };
    let (raw, _) = FakeCom::create(vtbl, Collection { items });
    fake::wrap(raw)
}

// Running instances.

pub struct RunningFake {
    pub name: String,
    pub running: Cell<bool>,
}

fn running(this: *mut c_void) -> &'static RunningFake {
    &unsafe { FakeCom::<RunningFake>::from_this(this) }.state
}

unsafe extern "system" fn running_name(this: *mut c_void, out: *mut *const u16) -> HRESULT {
    unsafe { put_bstr(out, &running(this).name) }
}

unsafe extern "system" fn running_guid(_: *mut c_void, out: *mut *const u16) -> HRESULT {
    unsafe { put_bstr(out, "{6F6D1E20-7C8A-4B4E-9C1D-2A3B4C5D6E7F}") }
}

unsafe extern "system" fn running_path(this: *mut c_void, out: *mut *const u16) -> HRESULT {
    unsafe { put_bstr(out, &format!("\\{}", running(this).name)) }
}

unsafe extern "system" fn running_state(this: *mut c_void, out: *mut i32) -> HRESULT {
    unsafe { *out = if running(this).running.get() { 4 } else { 3 } };
    HRESULT(0)
}

unsafe extern "system" fn running_action(_: *mut c_void, out: *mut *const u16) -> HRESULT {
    unsafe { put_bstr(out, "cmd.exe") }
}

unsafe extern "system" fn running_stop(this: *mut c_void) -> HRESULT {
    running(this).running.set(false);
    HRESULT(0)
}

unsafe extern "system" fn running_refresh(_: *mut c_void) -> HRESULT {
    HRESULT(0)
}

unsafe extern "system" fn running_pid(_: *mut c_void, out: *mut u32) -> HRESULT {
    unsafe { *out = 4242 };
    HRESULT(0)
}

fn fake_running(name: &str) -> IRunningTask {
    let vtbl = IRunningTask_Vtbl {
        base__: fake::dispatch_vtbl(),
        get_Name: running_name,
        get_InstanceGuid: running_guid,
        get_Path: running_path,
        get_State: running_state,
        get_CurrentAction: running_action,
        Stop: running_stop,
        Refresh: running_refresh,
        get_EnginePID: running_pid,
    };
    let state = RunningFake { name: name.into(), running: Cell::new(true) };
    let (raw, _) = FakeCom::create(vtbl, state);
    fake::wrap(raw)
}

// Registered tasks.

/// Each run is recorded as `(params vt, flags, session, user)`.
pub struct TaskFake {
    pub name: String,
    pub enabled: Cell<bool>,
    pub runs: RefCell<Vec<(u16, i32, i32, String)>>,
}

fn task(this: *mut c_void) -> &'static TaskFake {
    &unsafe { FakeCom::<TaskFake>::from_this(this) }.state
}

/// State behind a task made by [`fake_task`].
pub fn task_state(obj: &IRegisteredTask) -> &'static TaskFake {
    task(obj.as_raw())
}

unsafe extern "system" fn task_name(this: *mut c_void, out: *mut *const u16) -> HRESULT {
    unsafe { put_bstr(out, &task(this).name) }
}

unsafe extern "system" fn task_path(this: *mut c_void, out: *mut *const u16) -> HRESULT {
    unsafe { put_bstr(out, &format!("\\{}", task(this).name)) }
}

unsafe extern "system" fn task_state_slot(this: *mut c_void, out: *mut i32) -> HRESULT {
    unsafe { *out = if task(this).enabled.get() { 3 } else { 1 } };
    HRESULT(0)
}

unsafe extern "system" fn task_enabled(this: *mut c_void, out: *mut i16) -> HRESULT {
    unsafe { *out = if task(this).enabled.get() { -1 } else { 0 } };
    HRESULT(0)
}

unsafe extern "system" fn task_set_enabled(this: *mut c_void, value: i16) -> HRESULT {
    task(this).enabled.set(value != 0);
    HRESULT(0)
}

unsafe extern "system" fn task_run(this: *mut c_void, params: VARIANT, out: *mut *mut c_void) -> HRESULT {
    let state = task(this);
    state.runs.borrow_mut().push((peek(params).vt(), 0, 0, String::new()));
    unsafe { *out = fake_running(&state.name).into_raw() };
    HRESULT(0)
}

unsafe extern "system" fn task_run_ex(
    this: *mut c_void,
    params: VARIANT,
    flags: i32,
    session: i32,
    user: *const u16,
    out: *mut *mut c_void,
) -> HRESULT {
    let state = task(this);
    let user = unsafe { from_wide_ptr(user) };
    state.runs.borrow_mut().push((peek(params).vt(), flags, session, user));
    unsafe { *out = fake_running(&state.name).into_raw() };
    HRESULT(0)
}

unsafe extern "system" fn task_instances(_: *mut c_void, _: i32, out: *mut *mut c_void) -> HRESULT {
    unsafe { put_object(out, None, E_NOTIMPL) }
}

unsafe extern "system" fn task_zero_date(_: *mut c_void, out: *mut f64) -> HRESULT {
    unsafe { *out = 0.0 };
    HRESULT(0)
}

unsafe extern "system" fn task_next_date(_: *mut c_void, out: *mut f64) -> HRESULT {
    unsafe { *out = 47_000.5 };
    HRESULT(0)
}

unsafe extern "system" fn task_last_result(_: *mut c_void, out: *mut i32) -> HRESULT {
    // SCHED_S_TASK_HAS_NOT_RUN
    unsafe { *out = 0x41303 };
    HRESULT(0)
}

unsafe extern "system" fn task_missed(_: *mut c_void, out: *mut i32) -> HRESULT {
    unsafe { *out = 0 };
    HRESULT(0)
}

unsafe extern "system" fn task_definition(_: *mut c_void, out: *mut *mut c_void) -> HRESULT {
    unsafe { put_object(out, None, E_NOTIMPL) }
}

unsafe extern "system" fn task_xml(this: *mut c_void, out: *mut *const u16) -> HRESULT {
    unsafe { put_bstr(out, &format!("<Task><!-- {} --></Task>", task(this).name)) }
}

unsafe extern "system" fn task_stop(_: *mut c_void, _: i32) -> HRESULT {
    HRESULT(0)
}

pub fn fake_task(name: &str) -> IRegisteredTask {
    let vtbl = IRegisteredTask_Vtbl {
        base__: fake::dispatch_vtbl(),
        get_Name: task_name,
        get_Path: task_path,
        get_State: task_state_slot,
        get_Enabled: task_enabled,
        put_Enabled: task_set_enabled,
        Run: task_run,
        RunEx: task_run_ex,
        GetInstances: task_instances,
        get_LastRunTime: task_zero_date,
        get_LastTaskResult: task_last_result,
        get_NumberOfMissedRuns: task_missed,
        get_NextRunTime: task_next_date,
        get_Definition: task_definition,
        get_Xml: task_xml,
        GetSecurityDescriptor: core::ptr::null(),
        SetSecurityDescriptor: core::ptr::null(),
        Stop: task_stop,
        GetRunTimes: core::ptr::null(),
    };
    let state = TaskFake { name: name.into(), enabled: Cell::new(true), runs: RefCell::new(Vec::new()) };
    let (raw, _) = FakeCom::create(vtbl, state);
    fake::wrap(raw)
}

// Folders.

/// Each registration is recorded as `(path, flags, logon, user)`.
pub type Registration = (String, i32, i32, String);

pub struct FolderFake {
    path: String,
    folders: Vec<(String, IUnknown)>,
    tasks: Vec<(String, IUnknown)>,
    pub registered: RefCell<Vec<Registration>>,
}

fn folder(this: *mut c_void) -> &'static FolderFake {
    &unsafe { FakeCom::<FolderFake>::from_this(this) }.state
}

fn leaf_name(path: &str) -> &str {
    match path {
        "\\" => path,
        _ => path.rsplit('\\').next().unwrap_or(path),
    }
}

fn lookup<'a>(items: &'a [(String, IUnknown)], name: *const u16) -> Option<&'a IUnknown> {
    let name = unsafe { from_wide_ptr(name) };
    items.iter().find(|(n, _)| *n == name).map(|(_, obj)| obj)
}

unsafe extern "system" fn folder_name(this: *mut c_void, out: *mut *const u16) -> HRESULT {
    unsafe { put_bstr(out, leaf_name(&folder(this).path)) }
}

unsafe extern "system" fn folder_path(this: *mut c_void, out: *mut *const u16) -> HRESULT {
    unsafe { put_bstr(out, &folder(this).path) }
}

unsafe extern "system" fn folder_get_folder(this: *mut c_void, name: *const u16, out: *mut *mut c_void) -> HRESULT {
    unsafe { put_object(out, lookup(&folder(this).folders, name), SCHED_E_NOT_FOUND) }
}

unsafe extern "system" fn folder_get_folders(this: *mut c_void, _: i32, out: *mut *mut c_void) -> HRESULT {
    let collection: IUnknown = fake_collection(folder(this).folders.clone());
    unsafe { *out = collection.into_raw() };
    HRESULT(0)
}

unsafe extern "system" fn folder_create(_: *mut c_void, _: *const u16, _: VARIANT, out: *mut *mut c_void) -> HRESULT {
    unsafe { put_object(out, None, E_NOTIMPL) }
}

unsafe extern "system" fn folder_delete(_: *mut c_void, _: *const u16, _: i32) -> HRESULT {
    HRESULT(E_NOTIMPL)
}

unsafe extern "system" fn folder_get_task(this: *mut c_void, name: *const u16, out: *mut *mut c_void) -> HRESULT {
    unsafe { put_object(out, lookup(&folder(this).tasks, name), SCHED_E_NOT_FOUND) }
}

unsafe extern "system" fn folder_get_tasks(this: *mut c_void, _: i32, out: *mut *mut c_void) -> HRESULT {
    let collection: IUnknown = fake_collection(folder(this).tasks.clone());
    unsafe { *out = collection.into_raw() };
    HRESULT(0)
}

unsafe extern "system" fn folder_register(
    _: *mut c_void,
    _: *const u16,
    _: *const u16,
    _: i32,
    _: VARIANT,
    _: VARIANT,
    _: i32,
    _: VARIANT,
    out: *mut *mut c_void,
) -> HRESULT {
    unsafe { put_object(out, None, E_NOTIMPL) }
}

unsafe extern "system" fn folder_register_definition(
    this: *mut c_void,
    path: *const u16,
    definition: *mut c_void,
    flags: i32,
    user: VARIANT,
    _: VARIANT,
    logon: i32,
    _: VARIANT,
    out: *mut *mut c_void,
) -> HRESULT {
    if definition.is_null() {
        return unsafe { put_object(out, None, E_INVALIDARG) };
    }
    let path = unsafe { from_wide_ptr(path) };
    let user = peek(user).get_string().unwrap_or_default();
    let task = into_unknown(fake_task(leaf_name(&path)));
    folder(this).registered.borrow_mut().push((path, flags, logon, user));
    unsafe { put_object(out, Some(&task), 0) }
}

pub fn folder_state(obj: &ITaskFolder) -> &'static FolderFake {
    folder(obj.as_raw())
}

pub fn fake_folder(path: &str, folders: Vec<ITaskFolder>, tasks: Vec<IRegisteredTask>) -> ITaskFolder {
    let folders = folders
        .into_iter()
        .map(|f| (leaf_name(&folder(f.as_raw()).path).into(), into_unknown(f)))
        .collect();
    let tasks = tasks
        .into_iter()
        .map(|t| (task_state(&t).name.clone(), into_unknown(t)))
        .collect();

    let vtbl = ITaskFolder_Vtbl {
        base__: fake::dispatch_vtbl(),
        get_Name: folder_name,
        get_Path: folder_path,
        GetFolder: folder_get_folder,
        GetFolders: folder_get_folders,
        CreateFolder: folder_create,
        DeleteFolder: folder_delete,
        GetTask: folder_get_task,
        GetTasks: folder_get_tasks,
        DeleteTask: folder_delete,
        RegisterTask: folder_register,
        RegisterTaskDefinition: folder_register_definition,
        GetSecurityDescriptor: core::ptr::null(),
        SetSecurityDescriptor: core::ptr::null(),
    };
    let (raw, _) = FakeCom::create(vtbl, FolderFake { path: path.into(), folders, tasks, registered: RefCell::new(Vec::new()) });
    fake::wrap(raw)
}
