use core::ffi::c_void;

use windows::core::HRESULT;
use windows_sys::Win32::System::Variant::VARIANT;

use crate::co::ActionType;
use crate::com::{cast, from_out, hr_ok};
use crate::error::Result;
use crate::ole::{IDispatch, IDispatch_Vtbl, OwnedVariant};

use super::decode;

com_interface! {
    /// [`IActionCollection`](https://learn.microsoft.com/en-us/windows/win32/api/taskschd/nn-taskschd-iactioncollection)
    /// COM interface. Actions run in collection order.
    IActionCollection: IDispatch,
    vtable: IActionCollection_Vtbl,
    iid: 0x02820e19_7b98_4ed2_b2e8_fdccceff619b,
}

com_interface! {
    /// [`IAction`](https://learn.microsoft.com/en-us/windows/win32/api/taskschd/nn-taskschd-iaction)
    /// COM interface.
    IAction: IDispatch,
    vtable: IAction_Vtbl,
    iid: 0xbae54997_48b1_4cbe_9965_d6be263ebea4,
}

com_interface! {
    /// [`IExecAction`](https://learn.microsoft.com/en-us/windows/win32/api/taskschd/nn-taskschd-iexecaction)
    /// COM interface: starts a program.
    IExecAction: IAction,
    vtable: IExecAction_Vtbl,
    iid: 0x4c3d624d_fd6b_49a3_b9b7_09cb3cd3f047,
}

impl IActionCollection {
    value_getter! { get_Count => get_Count -> i32 }

    /// Returns the action at a one-based position.
    pub fn get_Item(&self, index: i32) -> Result<IAction> {
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, get_Item(index, &mut raw)), "IActionCollection::get_Item")?;
        unsafe { from_out(raw, "IActionCollection::get_Item") }
    }

    pub fn items(&self) -> Result<alloc::vec::Vec<IAction>> {
        (1..=self.get_Count()?).map(|i| self.get_Item(i)).collect()
    }

    bstr_getter! { get_XmlText => get_XmlText }
    bstr_setter! { put_XmlText => put_XmlText }

    pub fn Create(&self, kind: ActionType) -> Result<IAction> {
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, Create(kind as i32, &mut raw)), "IActionCollection::Create")?;
        unsafe { from_out(raw, "IActionCollection::Create") }
    }

    /// Removes an action by one-based position or by id.
    pub fn Remove(&self, index: impl Into<OwnedVariant>) -> Result<()> {
        let index = index.into();
        hr_ok(vcall!(self, Remove(*index.as_raw())), "IActionCollection::Remove")
    }

    pub fn Clear(&self) -> Result<()> {
        hr_ok(vcall!(self, Clear()), "IActionCollection::Clear")
    }

    bstr_getter! {
        /// Principal id the actions run under.
        get_Context => get_Context
    }
    bstr_setter! { put_Context => put_Context }

    /// Appends an action that starts `path`, passing `args` when non-empty.
    pub fn create_exec(&self, path: &str, args: &str) -> Result<IExecAction> {
        let exec: IExecAction = cast(&self.Create(ActionType::Exec)?)?;
        exec.put_Path(path)?;
        if !args.is_empty() {
            exec.put_Arguments(args)?;
        }
        Ok(exec)
    }
}

impl IAction {
    bstr_getter! { get_Id => get_Id }
    bstr_setter! { put_Id => put_Id }

    pub fn get_Type(&self) -> Result<ActionType> {
        let mut kind = 0;
        hr_ok(vcall!(self, get_Type(&mut kind)), "IAction::get_Type")?;
        decode(kind, ActionType::from_raw, "IAction::get_Type")
    }
}

impl IExecAction {
    bstr_getter! { get_Path => get_Path }
    bstr_setter! { put_Path => put_Path }
    bstr_getter! { get_Arguments => get_Arguments }
    bstr_setter! { put_Arguments => put_Arguments }
    bstr_getter! { get_WorkingDirectory => get_WorkingDirectory }
    bstr_setter! { put_WorkingDirectory => put_WorkingDirectory }
}

type GetBstr = unsafe extern "system" fn(this: *mut c_void, value: *mut *const u16) -> HRESULT;
type PutBstr = unsafe extern "system" fn(this: *mut c_void, value: *const u16) -> HRESULT;

#[repr(C)]
pub struct IActionCollection_Vtbl {
    pub base__: IDispatch_Vtbl,
    pub get_Count: unsafe extern "system" fn(this: *mut c_void, count: *mut i32) -> HRESULT,
    pub get_Item: unsafe extern "system" fn(this: *mut c_void, index: i32, action: *mut *mut c_void) -> HRESULT,
    pub get__NewEnum: *const c_void,
    pub get_XmlText: GetBstr,
    pub put_XmlText: PutBstr,
    pub Create: unsafe extern "system" fn(this: *mut c_void, kind: i32, action: *mut *mut c_void) -> HRESULT,
    pub Remove: unsafe extern "system" fn(this: *mut c_void, index: VARIANT) -> HRESULT,
    pub Clear: unsafe extern "system" fn(this: *mut c_void) -> HRESULT,
    pub get_Context: GetBstr,
    pub put_Context: PutBstr,
}

#[repr(C)]
pub struct IAction_Vtbl {
    pub base__: IDispatch_Vtbl,
    pub get_Id: GetBstr,
    pub put_Id: PutBstr,
    pub get_Type: unsafe extern "system" fn(this: *mut c_void, kind: *mut i32) -> HRESULT,
}

#[repr(C)]
pub struct IExecAction_Vtbl {
    pub base__: IAction_Vtbl,
    pub get_Path: GetBstr,
    pub put_Path: PutBstr,
    pub get_Arguments: GetBstr,
    pub put_Arguments: PutBstr,
    pub get_WorkingDirectory: GetBstr,
    pub put_WorkingDirectory: PutBstr,
}
