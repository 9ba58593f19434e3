use core::ffi::c_void;

use windows::core::{GUID, HRESULT};
use windows_sys::Win32::System::Variant::VARIANT;

use crate::co::{TASK_ENUM_HIDDEN, TASK_RUN_NO_FLAGS, TaskState};
use crate::com::{from_out, hr_ok};
use crate::error::Result;
use crate::guid::parse_guid;
use crate::ole::{Bstr, IDispatch, IDispatch_Vtbl, OwnedVariant, SafeArray};

use super::ITaskDefinition;

com_interface! {
    /// [`IRegisteredTask`](https://learn.microsoft.com/en-us/windows/win32/api/taskschd/nn-taskschd-iregisteredtask)
    /// COM interface.
    IRegisteredTask: IDispatch,
    vtable: IRegisteredTask_Vtbl,
    iid: 0x9c86f320_dee3_4dd1_b972_a303f26b061e,
}

com_interface! {
    /// [`IRunningTask`](https://learn.microsoft.com/en-us/windows/win32/api/taskschd/nn-taskschd-irunningtask)
    /// COM interface: one executing instance of a registered task.
    IRunningTask: IDispatch,
    vtable: IRunningTask_Vtbl,
    iid: 0x653758fb_7b9a_4f1e_a471_beeb8e9b834e,
}

variant_collection! {
    /// [`IRegisteredTaskCollection`](https://learn.microsoft.com/en-us/windows/win32/api/taskschd/nn-taskschd-iregisteredtaskcollection)
    /// COM interface.
    IRegisteredTaskCollection => IRegisteredTask,
    vtable: IRegisteredTaskCollection_Vtbl,
    iid: 0x86627eb4_42a7_41e4_a4d9_ac33a72f2d52,
}

variant_collection! {
    /// [`IRunningTaskCollection`](https://learn.microsoft.com/en-us/windows/win32/api/taskschd/nn-taskschd-irunningtaskcollection)
    /// COM interface.
    IRunningTaskCollection => IRunningTask,
    vtable: IRunningTaskCollection_Vtbl,
    iid: 0x6a67614b_6828_4fec_aa54_6d52e8f1f2db,
}

/// Task parameters: empty, a single string, or an array of strings
/// substituted for `$(Arg0)`, `$(Arg1)`, ...
fn run_params(args: &[&str]) -> Result<OwnedVariant> {
    Ok(match args {
        [] => OwnedVariant::empty(),
        [one] => OwnedVariant::from(*one),
        many => SafeArray::from_strings(many)?.into(),
    })
}

impl IRegisteredTask {
    bstr_getter! { get_Name => get_Name }
    bstr_getter! { get_Path => get_Path }

    pub fn get_State(&self) -> Result<TaskState> {
        let mut state = 0;
        hr_ok(vcall!(self, get_State(&mut state)), "IRegisteredTask::get_State")?;
        Ok(TaskState::from_raw(state))
    }

    bool_property!(get_Enabled => get_Enabled, put_Enabled => put_Enabled);

    /// Starts the task now, passing `args` to its actions.
    pub fn Run(&self, args: &[&str]) -> Result<IRunningTask> {
        let params = run_params(args)?;
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, Run(*params.as_raw(), &mut raw)), "Run")?;
        unsafe { from_out(raw, "Run") }
    }

    /// Starts the task with `TASK_RUN_*` flags, in terminal session
    /// `session` (0 for the default) or as `user`.
    pub fn RunEx(&self, args: &[&str], flags: i32, session: i32, user: Option<&str>) -> Result<IRunningTask> {
        let params = run_params(args)?;
        let user = user.map_or_else(Bstr::new, Bstr::from);
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, RunEx(*params.as_raw(), flags, session, user.as_ptr(), &mut raw)), "RunEx")?;
        unsafe { from_out(raw, "RunEx") }
    }

    /// Starts the task without arguments, honoring its conditions.
    pub fn run_now(&self) -> Result<IRunningTask> {
        self.RunEx(&[], TASK_RUN_NO_FLAGS, 0, None)
    }

    /// Currently running instances of this task.
    pub fn GetInstances(&self, include_hidden: bool) -> Result<IRunningTaskCollection> {
        let flags = if include_hidden { TASK_ENUM_HIDDEN } else { 0 };
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, GetInstances(flags, &mut raw)), "GetInstances")?;
        unsafe { from_out(raw, "GetInstances") }
    }

    value_getter! {
        /// OLE Automation date of the last run; zero if it never ran.
        get_LastRunTime => get_LastRunTime -> f64
    }

    value_getter! {
        /// Exit code or HRESULT of the last run.
        get_LastTaskResult => get_LastTaskResult -> i32
    }

    value_getter! { get_NumberOfMissedRuns => get_NumberOfMissedRuns -> i32 }

    value_getter! {
        /// OLE Automation date of the next scheduled run; zero if none.
        get_NextRunTime => get_NextRunTime -> f64
    }

    iface_getter! {
        /// A copy of the definition; changes take effect once registered again.
        get_Definition => get_Definition -> ITaskDefinition
    }

    bstr_getter! { get_Xml => get_Xml }

    /// Stops every running instance.
    pub fn Stop(&self) -> Result<()> {
        hr_ok(vcall!(self, Stop(0)), "IRegisteredTask::Stop")
    }
}

impl IRunningTask {
    bstr_getter! { get_Name => get_Name }
    bstr_getter! { get_InstanceGuid => get_InstanceGuid }
    bstr_getter! { get_Path => get_Path }

    /// The instance GUID, parsed.
    pub fn instance_guid(&self) -> Result<GUID> {
        parse_guid(&self.get_InstanceGuid()?)
    }

    pub fn get_State(&self) -> Result<TaskState> {
        let mut state = 0;
        hr_ok(vcall!(self, get_State(&mut state)), "IRunningTask::get_State")?;
        Ok(TaskState::from_raw(state))
    }

    bstr_getter! {
        /// Name of the action being executed.
        get_CurrentAction => get_CurrentAction
    }

    pub fn Stop(&self) -> Result<()> {
        hr_ok(vcall!(self, Stop()), "IRunningTask::Stop")
    }

    /// Reloads the cached state and current action.
    pub fn Refresh(&self) -> Result<()> {
        hr_ok(vcall!(self, Refresh()), "Refresh")
    }

    value_getter! {
        /// Process id of the scheduler engine hosting the instance.
        get_EnginePID => get_EnginePID -> u32
    }
}

#[repr(C)]
pub struct IRegisteredTask_Vtbl {
    pub base__: IDispatch_Vtbl,
    pub get_Name: unsafe extern "system" fn(this: *mut c_void, name: *mut *const u16) -> HRESULT,
    pub get_Path: unsafe extern "system" fn(this: *mut c_void, path: *mut *const u16) -> HRESULT,
    pub get_State: unsafe extern "system" fn(this: *mut c_void, state: *mut i32) -> HRESULT,
    pub get_Enabled: unsafe extern "system" fn(this: *mut c_void, enabled: *mut i16) -> HRESULT,
    pub put_Enabled: unsafe extern "system" fn(this: *mut c_void, enabled: i16) -> HRESULT,
    pub Run: unsafe extern "system" fn(this: *mut c_void, params: VARIANT, running: *mut *mut c_void) -> HRESULT,
    pub RunEx: unsafe extern "system" fn(
        this: *mut c_void,
        params: VARIANT,
        flags: i32,
        session: i32,
        user: *const u16,
        running: *mut *mut c_void,
    ) -> HRESULT,
    pub GetInstances: unsafe extern "system" fn(this: *mut c_void, flags: i32, tasks: *mut *mut c_void) -> HRESULT,
    pub get_LastRunTime: unsafe extern "system" fn(this: *mut c_void, date: *mut f64) -> HRESULT,
    pub get_LastTaskResult: unsafe extern "system" fn(this: *mut c_void, result: *mut i32) -> HRESULT,
    pub get_NumberOfMissedRuns: unsafe extern "system" fn(this: *mut c_void, count: *mut i32) -> HRESULT,
    pub get_NextRunTime: unsafe extern "system" fn(this: *mut c_void, date: *mut f64) -> HRESULT,
    pub get_Definition: unsafe extern "system" fn(this: *mut c_void, definition: *mut *mut c_void) -> HRESULT,
    pub get_Xml: unsafe extern "system" fn(this: *mut c_void, xml: *mut *const u16) -> HRESULT,
    pub GetSecurityDescriptor: *const c_void,
    pub SetSecurityDescriptor: *const c_void,
    pub Stop: unsafe extern "system" fn(this: *mut c_void, flags: i32) -> HRESULT,
    pub GetRunTimes: *const c_void,
}

#[repr(C)]
pub struct IRunningTask_Vtbl {
    pub base__: IDispatch_Vtbl,
    pub get_Name: unsafe extern "system" fn(this: *mut c_void, name: *mut *const u16) -> HRESULT,
    pub get_InstanceGuid: unsafe extern "system" fn(this: *mut c_void, guid: *mut *const u16) -> HRESULT,
    pub get_Path: unsafe extern "system" fn(this: *mut c_void, path: *mut *const u16) -> HRESULT,
    pub get_State: unsafe extern "system" fn(this: *mut c_void, state: *mut i32) -> HRESULT,
    pub get_CurrentAction: unsafe extern "system" fn(this: *mut c_void, action: *mut *const u16) -> HRESULT,
    pub Stop: unsafe extern "system" fn(this: *mut c_void) -> HRESULT,
    pub Refresh: unsafe extern "system" fn(this: *mut c_void) -> HRESULT,
    pub get_EnginePID: unsafe extern "system" fn(this: *mut c_void, pid: *mut u32) -> HRESULT,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::offset_of;

    const SLOT: usize = size_of::<usize>();

    #[test]
    fn test_vtable_slots() {
        assert_eq!(offset_of!(IRegisteredTask_Vtbl, get_State), 9 * SLOT);
        assert_eq!(offset_of!(IRegisteredTask_Vtbl, Run), 12 * SLOT);
        assert_eq!(offset_of!(IRegisteredTask_Vtbl, get_NextRunTime), 18 * SLOT);
        assert_eq!(offset_of!(IRegisteredTask_Vtbl, Stop), 23 * SLOT);
        assert_eq!(size_of::<IRegisteredTask_Vtbl>(), 25 * SLOT);
        assert_eq!(offset_of!(IRunningTask_Vtbl, get_State), 10 * SLOT);
        assert_eq!(offset_of!(IRunningTask_Vtbl, get_EnginePID), 14 * SLOT);
    }

    #[cfg(windows)]
    mod fake_task {
        use super::*;
        use crate::co::{TASK_RUN_IGNORE_CONSTRAINTS, VT_ARRAY, VT_BSTR, VT_EMPTY};
        use crate::taskschd::fakes::{fake_task, task_state};
        use alloc::{string::String, vec::Vec};

        #[test]
        fn test_properties() -> Result<()> {
            let task = fake_task("backup");
            assert_eq!(task.get_Name()?, "backup");
            assert_eq!(task.get_Path()?, "\\backup");
            assert_eq!(task.get_State()?, TaskState::Ready);
            assert_eq!(task.get_LastTaskResult()?, 0x41303);
            assert_eq!(task.get_NextRunTime()?, 47_000.5);
            assert_eq!(task.get_NumberOfMissedRuns()?, 0);

            assert!(task.get_Enabled()?);
            task.put_Enabled(false)?;
            assert!(!task.get_Enabled()?);
            assert_eq!(task.get_State()?, TaskState::Disabled);
            Ok(())
        }

        #[test]
        fn test_run_parameters() -> Result<()> {
            let task = fake_task("report");
            let state = task_state(&task);

            task.Run(&[])?;
            task.Run(&["--quick"])?;
            let running = task.Run(&["a", "b"])?;
            assert_eq!(running.get_Name()?, "report");
            task.RunEx(&[], TASK_RUN_IGNORE_CONSTRAINTS, 2, Some("bob"))?;
            task.run_now()?;

            let runs: Vec<_> = state.runs.borrow().clone();
            assert_eq!(runs[0], (VT_EMPTY, 0, 0, String::new()));
            assert_eq!(runs[1], (VT_BSTR, 0, 0, String::new()));
            assert_eq!(runs[2], (VT_ARRAY | VT_BSTR, 0, 0, String::new()));
            assert_eq!(runs[3], (VT_EMPTY, TASK_RUN_IGNORE_CONSTRAINTS, 2, String::from("bob")));
            assert_eq!(runs[4], (VT_EMPTY, TASK_RUN_NO_FLAGS, 0, String::new()));
            Ok(())
        }

        #[test]
        fn test_running_instance() -> Result<()> {
            let task = fake_task("sync");
            let running = task.run_now()?;
            assert_eq!(running.get_State()?, TaskState::Running);
            assert_eq!(
                running.instance_guid()?,
                GUID::from_u128(0x6f6d1e20_7c8a_4b4e_9c1d_2a3b4c5d6e7f)
            );
            assert_eq!(running.get_CurrentAction()?, "cmd.exe");
            assert_eq!(running.get_EnginePID()?, 4242);

            running.Stop()?;
            running.Refresh()?;
            assert_eq!(running.get_State()?, TaskState::Ready);
            Ok(())
        }
    }
}
