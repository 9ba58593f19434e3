//! Task Scheduler 2.0: connecting to the scheduler service, browsing
//! folders, and registering, running and inspecting tasks.
//!
//! Every interface here is dual: the wrappers call the vtable slots
//! directly and never go through `IDispatch::Invoke`. Collections are
//! indexed from one.
//!
//! ```ignore
//! use winabi::co::{ActionType, CoInit, TaskCreation, TaskLogonType, TriggerType};
//! use winabi::com::initialize;
//! use winabi::taskschd::ITaskService;
//!
//! let _com = initialize(CoInit::APARTMENTTHREADED)?;
//! let service = ITaskService::create()?;
//! service.connect_local()?;
//!
//! let task = service.NewTask()?;
//! task.get_RegistrationInfo()?.put_Author("winabi")?;
//! task.get_Triggers()?.Create(TriggerType::Logon)?;
//! task.get_Actions()?.create_exec("C:\\Windows\\notepad.exe", "")?;
//!
//! let root = service.GetFolder("\\")?;
//! root.RegisterTaskDefinition("Notepad at logon", &task, TaskCreation::CREATE_OR_UPDATE, TaskLogonType::InteractiveToken)?;
//! ```

/// Declares a collection interface whose `get_Item` takes a `VARIANT`
/// holding either a one-based position or a name.
macro_rules! variant_collection {
    (
        $(#[$meta:meta])*
        $name:ident => $item:ty,
        vtable: $vtbl:ident,
        iid: $iid:literal $(,)?
    ) => {
        com_interface! {
            $(#[$meta])*
            $name: $crate::ole::IDispatch,
            vtable: $vtbl,
            iid: $iid,
        }

        impl $name {
            value_getter! { get_Count => get_Count -> i32 }

            /// Looks an item up by one-based position or by name.
            pub fn get_Item(&self, index: impl Into<$crate::ole::OwnedVariant>) -> $crate::error::Result<$item> {
                let index = index.into();
                let mut raw = ::core::ptr::null_mut();
                let hr = vcall!(self, get_Item(*index.as_raw(), &mut raw));
                $crate::com::hr_ok(hr, concat!(stringify!($name), "::get_Item"))?;
                unsafe { $crate::com::from_out(raw, concat!(stringify!($name), "::get_Item")) }
            }

            /// Collects every item in order.
            pub fn items(&self) -> $crate::error::Result<::alloc::vec::Vec<$item>> {
                (1..=self.get_Count()?).map(|i| self.get_Item(i)).collect()
            }
        }

        #[repr(C)]
        pub struct $vtbl {
            pub base__: $crate::ole::IDispatch_Vtbl,
            pub get_Count:
                unsafe extern "system" fn(this: *mut ::core::ffi::c_void, count: *mut i32) -> ::windows::core::HRESULT,
            pub get_Item: unsafe extern "system" fn(
                this: *mut ::core::ffi::c_void,
                index: ::windows_sys::Win32::System::Variant::VARIANT,
                item: *mut *mut ::core::ffi::c_void,
            ) -> ::windows::core::HRESULT,
            pub get__NewEnum: *const ::core::ffi::c_void,
        }
    };
}

mod action;
mod definition;
mod folder;
mod service;
mod task;
mod trigger;

#[cfg(all(test, windows))]
mod fakes;

pub use action::*;
pub use definition::*;
pub use folder::*;
pub use service::*;
pub use task::*;
pub use trigger::*;

/// Decodes an enumeration property, failing on values this crate does not
/// know.
fn decode<T>(raw: i32, from_raw: fn(i32) -> Option<T>, api: &'static str) -> crate::error::Result<T> {
    from_raw(raw).ok_or_else(|| {
        log::debug!("{api}: unknown value {raw}");
        crate::error::WinError::Msg("property returned an unknown enumeration value")
    })
}

#[cfg(all(test, windows, feature = "integration-tests"))]
mod integration {
    use super::*;
    use crate::co::{ActionType, CoInit, SCHED_E_NOT_FOUND, TaskCreation, TaskLogonType, TaskState, TriggerType};
    use crate::com::initialize;
    use crate::error::{Result, WinError};

    const FOLDER: &str = "winabi-tests";

    #[test]
    fn test_register_run_and_delete() -> Result<()> {
        let _com = initialize(CoInit::APARTMENTTHREADED)?;
        let service = ITaskService::create()?;
        service.connect_local()?;
        assert!(service.get_Connected()?);
        assert!(service.get_HighestVersion()? >= 0x0001_0002);

        let root = service.GetFolder("\\")?;
        let folder = match root.find_folder(FOLDER)? {
            Some(folder) => folder,
            None => root.CreateFolder(FOLDER, None)?,
        };
        assert_eq!(folder.get_Path()?, "\\winabi-tests");

        let task = service.NewTask()?;
        task.get_RegistrationInfo()?.put_Description("winabi integration test")?;
        let settings = task.get_Settings()?;
        settings.put_Enabled(false)?;
        settings.put_StartWhenAvailable(true)?;
        let trigger = task.get_Triggers()?.Create(TriggerType::Time)?;
        trigger.put_StartBoundary("2030-01-01T00:00:00")?;
        let exec = task.get_Actions()?.create_exec("cmd.exe", "/c exit 0")?;
        assert_eq!(exec.get_Type()?, ActionType::Exec);

        let registered = folder.RegisterTaskDefinition(
            "disabled",
            &task,
            TaskCreation::CREATE_OR_UPDATE,
            TaskLogonType::InteractiveToken,
        )?;
        assert_eq!(registered.get_Name()?, "disabled");
        assert_eq!(registered.get_State()?, TaskState::Disabled);
        assert!(!registered.get_Enabled()?);
        assert!(registered.get_Xml()?.contains("winabi integration test"));

        let names = folder
            .GetTasks(true)?
            .items()?
            .iter()
            .map(|t| t.get_Name())
            .collect::<Result<alloc::vec::Vec<_>>>()?;
        assert!(names.iter().any(|n| n == "disabled"));

        folder.DeleteTask("disabled")?;
        assert!(matches!(
            folder.GetTask("disabled"),
            Err(WinError::Com("GetTask", SCHED_E_NOT_FOUND))
        ));
        root.DeleteFolder(FOLDER)?;
        Ok(())
    }
}
