use core::ffi::c_void;

use windows::core::HRESULT;
use windows_sys::Win32::System::Variant::VARIANT;

use crate::co::TriggerType;
use crate::com::{from_out, hr_ok};
use crate::error::{Result, WinError};
use crate::ole::{IDispatch, IDispatch_Vtbl, OwnedVariant};

use super::decode;

com_interface! {
    /// [`ITriggerCollection`](https://learn.microsoft.com/en-us/windows/win32/api/taskschd/nn-taskschd-itriggercollection)
    /// COM interface.
    ITriggerCollection: IDispatch,
    vtable: ITriggerCollection_Vtbl,
    iid: 0x85df5081_1b24_4f32_878a_d9d14df4cb77,
}

com_interface! {
    /// [`ITrigger`](https://learn.microsoft.com/en-us/windows/win32/api/taskschd/nn-taskschd-itrigger)
    /// COM interface, the part shared by every trigger kind.
    ///
    /// Boundaries are `YYYY-MM-DDTHH:MM:SS` strings, optionally followed by
    /// a UTC offset; limits and delays are ISO 8601 durations such as
    /// `PT30M`.
    ITrigger: IDispatch,
    vtable: ITrigger_Vtbl,
    iid: 0x09941815_ea89_4b5b_89e0_2a773801fac3,
}

com_interface! {
    /// [`ITimeTrigger`](https://learn.microsoft.com/en-us/windows/win32/api/taskschd/nn-taskschd-itimetrigger)
    /// COM interface.
    ITimeTrigger: ITrigger,
    vtable: ITimeTrigger_Vtbl,
    iid: 0xb45747e0_eba7_4276_9f29_85c5bb300006,
}

com_interface! {
    /// [`IDailyTrigger`](https://learn.microsoft.com/en-us/windows/win32/api/taskschd/nn-taskschd-idailytrigger)
    /// COM interface.
    IDailyTrigger: ITrigger,
    vtable: IDailyTrigger_Vtbl,
    iid: 0x126c5cd8_b288_41d5_8dbf_e491446adc5c,
}

impl ITriggerCollection {
    value_getter! { get_Count => get_Count -> i32 }

    /// Returns the trigger at a one-based position.
    pub fn get_Item(&self, index: i32) -> Result<ITrigger> {
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, get_Item(index, &mut raw)), "ITriggerCollection::get_Item")?;
        unsafe { from_out(raw, "ITriggerCollection::get_Item") }
    }

    pub fn items(&self) -> Result<alloc::vec::Vec<ITrigger>> {
        (1..=self.get_Count()?).map(|i| self.get_Item(i)).collect()
    }

    /// Appends a new trigger of the given kind; cast the result to the
    /// kind's own interface to reach its extra properties.
    pub fn Create(&self, kind: TriggerType) -> Result<ITrigger> {
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, Create(kind as i32, &mut raw)), "ITriggerCollection::Create")?;
        unsafe { from_out(raw, "ITriggerCollection::Create") }
    }

    /// Removes a trigger by one-based position or by id.
    pub fn Remove(&self, index: impl Into<OwnedVariant>) -> Result<()> {
        let index = index.into();
        hr_ok(vcall!(self, Remove(*index.as_raw())), "ITriggerCollection::Remove")
    }

    pub fn Clear(&self) -> Result<()> {
        hr_ok(vcall!(self, Clear()), "ITriggerCollection::Clear")
    }
}

impl ITrigger {
    pub fn get_Type(&self) -> Result<TriggerType> {
        let mut kind = 0;
        hr_ok(vcall!(self, get_Type(&mut kind)), "ITrigger::get_Type")?;
        decode(kind, TriggerType::from_raw, "ITrigger::get_Type")
    }

    bstr_getter! { get_Id => get_Id }
    bstr_setter! { put_Id => put_Id }
    bstr_getter! { get_ExecutionTimeLimit => get_ExecutionTimeLimit }
    bstr_setter! { put_ExecutionTimeLimit => put_ExecutionTimeLimit }
    bstr_getter! { get_StartBoundary => get_StartBoundary }
    bstr_setter! { put_StartBoundary => put_StartBoundary }
    bstr_getter! { get_EndBoundary => get_EndBoundary }
    bstr_setter! { put_EndBoundary => put_EndBoundary }
    bool_property!(get_Enabled => get_Enabled, put_Enabled => put_Enabled);
}

impl ITimeTrigger {
    bstr_getter! {
        /// Upper bound of the random delay added to the start time.
        get_RandomDelay => get_RandomDelay
    }
    bstr_setter! { put_RandomDelay => put_RandomDelay }
}

impl IDailyTrigger {
    value_getter! { get_DaysInterval => get_DaysInterval -> i16 }

    /// Runs the task every `days` days; zero is rejected by the service.
    pub fn put_DaysInterval(&self, days: i16) -> Result<()> {
        if days <= 0 {
            return Err(WinError::Msg("daily trigger interval must be positive"));
        }
        hr_ok(vcall!(self, put_DaysInterval(days)), "put_DaysInterval")
    }

    bstr_getter! { get_RandomDelay => get_RandomDelay }
    bstr_setter! { put_RandomDelay => put_RandomDelay }
}

type GetBstr = unsafe extern "system" fn(this: *mut c_void, value: *mut *const u16) -> HRESULT;
type PutBstr = unsafe extern "system" fn(this: *mut c_void, value: *const u16) -> HRESULT;

#[repr(C)]
pub struct ITriggerCollection_Vtbl {
    pub base__: IDispatch_Vtbl,
    pub get_Count: unsafe extern "system" fn(this: *mut c_void, count: *mut i32) -> HRESULT,
    pub get_Item: unsafe extern "system" fn(this: *mut c_void, index: i32, trigger: *mut *mut c_void) -> HRESULT,
    pub get__NewEnum: *const c_void,
    pub Create: unsafe extern "system" fn(this: *mut c_void, kind: i32, trigger: *mut *mut c_void) -> HRESULT,
    pub Remove: unsafe extern "system" fn(this: *mut c_void, index: VARIANT) -> HRESULT,
    pub Clear: unsafe extern "system" fn(this: *mut c_void) -> HRESULT,
}

#[repr(C)]
pub struct ITrigger_Vtbl {
    pub base__: IDispatch_Vtbl,
    pub get_Type: unsafe extern "system" fn(this: *mut c_void, kind: *mut i32) -> HRESULT,
    pub get_Id: GetBstr,
    pub put_Id: PutBstr,
    pub get_Repetition: *const c_void,
    pub put_Repetition: *const c_void,
    pub get_ExecutionTimeLimit: GetBstr,
    pub put_ExecutionTimeLimit: PutBstr,
    pub get_StartBoundary: GetBstr,
    pub put_StartBoundary: PutBstr,
    pub get_EndBoundary: GetBstr,
    pub put_EndBoundary: PutBstr,
    pub get_Enabled: unsafe extern "system" fn(this: *mut c_void, enabled: *mut i16) -> HRESULT,
    pub put_Enabled: unsafe extern "system" fn(this: *mut c_void, enabled: i16) -> HRESULT,
}

#[repr(C)]
pub struct ITimeTrigger_Vtbl {
    pub base__: ITrigger_Vtbl,
    pub get_RandomDelay: GetBstr,
    pub put_RandomDelay: PutBstr,
}

#[repr(C)]
pub struct IDailyTrigger_Vtbl {
    pub base__: ITrigger_Vtbl,
    pub get_DaysInterval: unsafe extern "system" fn(this: *mut c_void, days: *mut i16) -> HRESULT,
    pub put_DaysInterval: unsafe extern "system" fn(this: *mut c_void, days: i16) -> HRESULT,
    pub get_RandomDelay: GetBstr,
    pub put_RandomDelay: PutBstr,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::co::{E_INVALIDARG, E_NOTIMPL};
    use crate::com::fake::{self, FakeCom};
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};
    use core::mem::offset_of;
    use windows::core::{IUnknown, Interface};

    const SLOT: usize = size_of::<usize>();

    #[test]
    fn test_vtable_slots() {
        assert_eq!(offset_of!(ITriggerCollection_Vtbl, Create), 10 * SLOT);
        assert_eq!(offset_of!(ITriggerCollection_Vtbl, Clear), 12 * SLOT);
        assert_eq!(offset_of!(ITrigger_Vtbl, get_StartBoundary), 14 * SLOT);
        assert_eq!(offset_of!(ITrigger_Vtbl, put_Enabled), 19 * SLOT);
        assert_eq!(offset_of!(ITimeTrigger_Vtbl, get_RandomDelay), 20 * SLOT);
        assert_eq!(offset_of!(IDailyTrigger_Vtbl, put_DaysInterval), 21 * SLOT);
        assert_eq!(offset_of!(IDailyTrigger_Vtbl, put_RandomDelay), 23 * SLOT);
    }

    /// A trigger that only knows its kind and whether it is enabled.
    struct Trigger {
        kind: Cell<i32>,
        enabled: Cell<i16>,
    }

    unsafe extern "system" fn get_type(this: *mut c_void, out: *mut i32) -> HRESULT {
        unsafe { *out = FakeCom::<Trigger>::from_this(this).state.kind.get() };
        HRESULT(0)
    }

    unsafe extern "system" fn get_enabled(this: *mut c_void, out: *mut i16) -> HRESULT {
        unsafe { *out = FakeCom::<Trigger>::from_this(this).state.enabled.get() };
        HRESULT(0)
    }

    unsafe extern "system" fn put_enabled(this: *mut c_void, value: i16) -> HRESULT {
        unsafe { FakeCom::<Trigger>::from_this(this) }.state.enabled.set(value);
        HRESULT(0)
    }

    unsafe extern "system" fn no_bstr(_: *mut c_void, _: *mut *const u16) -> HRESULT {
        HRESULT(E_NOTIMPL)
    }

    unsafe extern "system" fn no_put_bstr(_: *mut c_void, _: *const u16) -> HRESULT {
        HRESULT(E_NOTIMPL)
    }

    fn trigger_vtbl() -> ITrigger_Vtbl {
        ITrigger_Vtbl {
            base__: fake::dispatch_vtbl(),
            get_Type: get_type,
            get_Id: no_bstr,
            put_Id: no_put_bstr,
            get_Repetition: core::ptr::null(),
            put_Repetition: core::ptr::null(),
            get_ExecutionTimeLimit: no_bstr,
            put_ExecutionTimeLimit: no_put_bstr,
            get_StartBoundary: no_bstr,
            put_StartBoundary: no_put_bstr,
            get_EndBoundary: no_bstr,
            put_EndBoundary: no_put_bstr,
            get_Enabled: get_enabled,
            put_Enabled: put_enabled,
        }
    }

    fn fake_trigger(kind: i32) -> IUnknown {
        let state = Trigger { kind: Cell::new(kind), enabled: Cell::new(-1) };
        let (raw, _) = FakeCom::create(trigger_vtbl(), state);
        fake::wrap(raw)
    }

    /// Collection fake: `Create` appends, `Clear` empties.
    #[derive(Default)]
    struct Triggers {
        items: RefCell<Vec<IUnknown>>,
    }

    fn triggers(this: *mut c_void) -> &'static Triggers {
        &unsafe { FakeCom::<Triggers>::from_this(this) }.state
    }

    unsafe extern "system" fn count(this: *mut c_void, out: *mut i32) -> HRESULT {
        unsafe { *out = triggers(this).items.borrow().len() as i32 };
        HRESULT(0)
    }

    unsafe extern "system" fn item(this: *mut c_void, index: i32, out: *mut *mut c_void) -> HRESULT {
        let items = triggers(this).items.borrow();
        match usize::try_from(index - 1).ok().and_then(|i| items.get(i)) {
            Some(found) => {
                unsafe { *out = found.clone().into_raw() };
                HRESULT(0)
            }
            None => HRESULT(E_INVALIDARG),
        }
    }

    unsafe extern "system" fn create(this: *mut c_void, kind: i32, out: *mut *mut c_void) -> HRESULT {
        let trigger = fake_trigger(kind);
        unsafe { *out = trigger.clone().into_raw() };
        triggers(this).items.borrow_mut().push(trigger);
        HRESULT(0)
    }

    unsafe extern "system" fn remove(_: *mut c_void, _: VARIANT) -> HRESULT {
        HRESULT(E_NOTIMPL)
    }

    unsafe extern "system" fn clear(this: *mut c_void) -> HRESULT {
        triggers(this).items.borrow_mut().clear();
        HRESULT(0)
    }

    fn fake_collection() -> ITriggerCollection {
        let vtbl = ITriggerCollection_Vtbl {
            base__: fake::dispatch_vtbl(),
            get_Count: count,
            get_Item: item,
            get__NewEnum: core::ptr::null(),
            Create: create,
            Remove: remove,
            Clear: clear,
        };
        let (raw, _) = FakeCom::create(vtbl, Triggers::default());
        fake::wrap(raw)
    }

    #[test]
    fn test_create_appends_in_order() -> Result<()> {
        let triggers = fake_collection();
        let daily = triggers.Create(TriggerType::Daily)?;
        triggers.Create(TriggerType::Logon)?;

        assert_eq!(daily.get_Type()?, TriggerType::Daily);
        let kinds = triggers
            .items()?
            .iter()
            .map(ITrigger::get_Type)
            .collect::<Result<Vec<_>>>()?;
        assert_eq!(kinds, [TriggerType::Daily, TriggerType::Logon]);

        assert!(matches!(
            triggers.get_Item(3),
            Err(WinError::Com("ITriggerCollection::get_Item", E_INVALIDARG))
        ));

        triggers.Clear()?;
        assert_eq!(triggers.get_Count()?, 0);
        Ok(())
    }

    #[test]
    fn test_enabled_and_unknown_kind() -> Result<()> {
        let triggers = fake_collection();
        let trigger = triggers.Create(TriggerType::Boot)?;
        assert!(trigger.get_Enabled()?);
        trigger.put_Enabled(false)?;
        assert!(!trigger.get_Enabled()?);

        let odd = triggers.Create(TriggerType::Boot)?;
        unsafe { FakeCom::<Trigger>::from_this(odd.as_raw()) }.state.kind.set(77);
        assert!(matches!(odd.get_Type(), Err(WinError::Msg(_))));
        Ok(())
    }
}
