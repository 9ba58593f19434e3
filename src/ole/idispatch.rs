use alloc::vec::Vec;
use core::ffi::c_void;

use windows::core::{GUID, HRESULT, IUnknown, IUnknown_Vtbl};
use windows_sys::Win32::System::Variant::VARIANT;

use super::variant::slice_ptr;
use super::{Bstr, OwnedVariant};
use crate::co::{DISP_E_EXCEPTION, DISPID_PROPERTYPUT, DispatchFlags, LOCALE_USER_DEFAULT};
use crate::com::hr_ok;
use crate::error::{ComException, Result, WinError};
use crate::string::WString;
use crate::structs::{DISPPARAMS, EXCEPINFO};

com_interface! {
    /// [`IDispatch`](https://learn.microsoft.com/en-us/windows/win32/api/oaidl/nn-oaidl-idispatch)
    /// COM interface, the late-bound automation entry point.
    IDispatch: IUnknown,
    vtable: IDispatch_Vtbl,
    iid: 0x00020400_0000_0000_c000_000000000046,
}

impl IDispatch {
    /// Number of type information interfaces the object provides (0 or 1).
    pub fn GetTypeInfoCount(&self) -> Result<u32> {
        let mut count = 0;
        hr_ok(vcall!(self, GetTypeInfoCount(&mut count)), "GetTypeInfoCount")?;
        Ok(count)
    }

    /// Maps a single member name to its DISPID.
    pub fn GetIDsOfNames(&self, name: &str) -> Result<i32> {
        let name = WString::from_str(name);
        let names = [name.as_ptr()];
        let mut dispid = 0;
        hr_ok(
            vcall!(
                self,
                GetIDsOfNames(
                    &GUID::zeroed(),
                    names.as_ptr(),
                    1,
                    LOCALE_USER_DEFAULT,
                    &mut dispid
                )
            ),
            "GetIDsOfNames",
        )?;
        Ok(dispid)
    }

    /// Raw `Invoke`. `args` must already be in reverse order; `named` lists
    /// the DISPIDs of the leading named arguments.
    pub fn Invoke(
        &self,
        dispid: i32,
        flags: DispatchFlags,
        args: &mut [OwnedVariant],
        named: &mut [i32],
    ) -> Result<OwnedVariant> {
        let mut params = DISPPARAMS {
            rgvarg: if args.is_empty() { core::ptr::null_mut() } else { slice_ptr(args) },
            rgdispidNamedArgs: if named.is_empty() { core::ptr::null_mut() } else { named.as_mut_ptr() },
            cArgs: args.len() as u32,
            cNamedArgs: named.len() as u32,
        };
        let mut result = OwnedVariant::empty();
        let mut excep = EXCEPINFO::default();
        let mut arg_err = 0;

        let hr = vcall!(
            self,
            Invoke(
                dispid,
                &GUID::zeroed(),
                LOCALE_USER_DEFAULT,
                flags.bits(),
                &mut params,
                result.as_mut_ptr(),
                &mut excep,
                &mut arg_err
            )
        );

        if hr.0 == DISP_E_EXCEPTION {
            let ex = unsafe { take_exception(&mut excep) };
            log::debug!("Invoke({dispid}) raised {ex}");
            return Err(WinError::Exception(ex));
        }
        hr_ok(hr, "Invoke")?;
        Ok(result)
    }

    /// Looks up `name` and invokes it with `args` given in natural order.
    pub fn invoke(&self, name: &str, flags: DispatchFlags, args: &[OwnedVariant]) -> Result<OwnedVariant> {
        let dispid = self.GetIDsOfNames(name)?;
        let mut reversed: Vec<OwnedVariant> = args.iter().rev().cloned().collect();
        self.Invoke(dispid, flags, &mut reversed, &mut [])
    }

    /// Calls a method.
    pub fn call_method(&self, name: &str, args: &[OwnedVariant]) -> Result<OwnedVariant> {
        self.invoke(name, DispatchFlags::METHOD, args)
    }

    /// Reads a property.
    pub fn get_property(&self, name: &str) -> Result<OwnedVariant> {
        self.invoke(name, DispatchFlags::PROPERTYGET, &[])
    }

    /// Reads an indexed property, such as a collection's `Item`.
    pub fn get_property_at(&self, name: &str, index: OwnedVariant) -> Result<OwnedVariant> {
        self.invoke(name, DispatchFlags::PROPERTYGET | DispatchFlags::METHOD, &[index])
    }

    /// Writes a property. The value travels as the `DISPID_PROPERTYPUT` named argument.
    pub fn put_property(&self, name: &str, value: OwnedVariant) -> Result<()> {
        let dispid = self.GetIDsOfNames(name)?;
        let mut args = [value];
        self.Invoke(dispid, DispatchFlags::PROPERTYPUT, &mut args, &mut [DISPID_PROPERTYPUT])?;
        Ok(())
    }
}

/// Runs the deferred fill-in, then moves the payload out and frees its strings.
unsafe fn take_exception(excep: &mut EXCEPINFO) -> ComException {
    if let Some(fill) = excep.pfnDeferredFillIn.take() {
        unsafe { fill(excep) };
    }

    let take = |raw: &mut *const u16| {
        let bstr = unsafe { Bstr::from_raw(core::mem::replace(raw, core::ptr::null())) };
        bstr.to_string_lossy()
    };

    ComException {
        code: excep.wCode,
        scode: excep.scode,
        origin: take(&mut excep.bstrSource),
        description: take(&mut excep.bstrDescription),
        help_file: take(&mut excep.bstrHelpFile),
        help_context: excep.dwHelpContext,
    }
}

#[repr(C)]
pub struct IDispatch_Vtbl {
    pub base__: IUnknown_Vtbl,
    pub GetTypeInfoCount: unsafe extern "system" fn(this: *mut c_void, pctinfo: *mut u32) -> HRESULT,
    pub GetTypeInfo: unsafe extern "system" fn(
        this: *mut c_void,
        itinfo: u32,
        lcid: u32,
        pptinfo: *mut *mut c_void,
    ) -> HRESULT,
    pub GetIDsOfNames: unsafe extern "system" fn(
        this: *mut c_void,
        riid: *const GUID,
        rgsznames: *const *const u16,
        cnames: u32,
        lcid: u32,
        rgdispid: *mut i32,
    ) -> HRESULT,
    pub Invoke: unsafe extern "system" fn(
        this: *mut c_void,
        dispidmember: i32,
        riid: *const GUID,
        lcid: u32,
        wflags: u16,
        pdispparams: *mut DISPPARAMS,
        pvarresult: *mut VARIANT,
        pexcepinfo: *mut EXCEPINFO,
        puargerr: *mut u32,
    ) -> HRESULT,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::co::{DISP_E_UNKNOWNNAME, VT_I4};
    use crate::com::fake::{self, FakeCom};
    use core::mem::offset_of;

    #[test]
    fn test_vtable_slots() {
        let ptr = size_of::<usize>();
        assert_eq!(offset_of!(IDispatch_Vtbl, GetTypeInfoCount), 3 * ptr);
        assert_eq!(offset_of!(IDispatch_Vtbl, GetTypeInfo), 4 * ptr);
        assert_eq!(offset_of!(IDispatch_Vtbl, GetIDsOfNames), 5 * ptr);
        assert_eq!(offset_of!(IDispatch_Vtbl, Invoke), 6 * ptr);
    }

    unsafe extern "system" fn type_info_count(_this: *mut c_void, count: *mut u32) -> HRESULT {
        unsafe { *count = 1 };
        HRESULT(0)
    }

    unsafe extern "system" fn type_info(_: *mut c_void, _: u32, _: u32, _: *mut *mut c_void) -> HRESULT {
        HRESULT(crate::co::E_NOTIMPL)
    }

    unsafe extern "system" fn ids_of_names(
        _this: *mut c_void,
        _riid: *const GUID,
        names: *const *const u16,
        count: u32,
        _lcid: u32,
        ids: *mut i32,
    ) -> HRESULT {
        assert_eq!(count, 1);
        let name = unsafe { crate::string::from_wide_ptr(*names) };
        let id = match name.as_str() {
            "Sub" => 1,
            "Fail" => 2,
            "Value" => 3,
            _ => return HRESULT(DISP_E_UNKNOWNNAME),
        };
        unsafe { *ids = id };
        HRESULT(0)
    }

    // Sub(a, b) returns a - b; Fail raises code 42; Value stores a property put.
    unsafe extern "system" fn invoke(
        this: *mut c_void,
        dispid: i32,
        _riid: *const GUID,
        _lcid: u32,
        flags: u16,
        params: *mut DISPPARAMS,
        result: *mut VARIANT,
        excep: *mut EXCEPINFO,
        _arg_err: *mut u32,
    ) -> HRESULT {
        let obj = unsafe { FakeCom::<core::cell::Cell<i32>>::from_this(this) };
        let params = unsafe { &*params };
        let arg = |i: usize| unsafe {
            let var = &*params.rgvarg.add(i);
            assert_eq!(var.Anonymous.Anonymous.vt, VT_I4);
            var.Anonymous.Anonymous.Anonymous.lVal
        };

        match dispid {
            1 => unsafe {
                assert_eq!(params.cArgs, 2);
                let value = arg(1) - arg(0);
                (*result).Anonymous.Anonymous.vt = VT_I4;
                (*result).Anonymous.Anonymous.Anonymous.lVal = value;
                HRESULT(0)
            },
            2 => unsafe {
                (*excep).wCode = 42;
                HRESULT(DISP_E_EXCEPTION)
            },
            3 => unsafe {
                assert_eq!(flags, DispatchFlags::PROPERTYPUT.bits());
                assert_eq!(params.cNamedArgs, 1);
                assert_eq!(*params.rgdispidNamedArgs, DISPID_PROPERTYPUT);
                obj.state.set(arg(0));
                HRESULT(0)
            },
            _ => HRESULT(crate::co::E_FAIL),
        }
    }

    fn fake_dispatch() -> (IDispatch, &'static FakeCom<core::cell::Cell<i32>>) {
        let vtbl = IDispatch_Vtbl {
            base__: fake::unknown_vtbl(),
            GetTypeInfoCount: type_info_count,
            GetTypeInfo: type_info,
            GetIDsOfNames: ids_of_names,
            Invoke: invoke,
        };
        let (raw, obj) = FakeCom::create(vtbl, core::cell::Cell::new(0));
        (fake::wrap(raw), obj)
    }

    #[cfg(windows)]
    #[test]
    fn test_arguments_are_reversed() -> Result<()> {
        let (disp, _) = fake_dispatch();
        assert_eq!(disp.GetTypeInfoCount()?, 1);
        let result = disp.call_method("Sub", &[OwnedVariant::from(10), OwnedVariant::from(3)])?;
        assert_eq!(result.get_i32(), Some(7));
        Ok(())
    }

    #[test]
    fn test_unknown_name() {
        let (disp, _) = fake_dispatch();
        match disp.GetIDsOfNames("Missing") {
            Err(WinError::Com("GetIDsOfNames", hr)) => assert_eq!(hr, DISP_E_UNKNOWNNAME),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[cfg(windows)]
    #[test]
    fn test_exception_payload() {
        let (disp, _) = fake_dispatch();
        match disp.call_method("Fail", &[]) {
            Err(WinError::Exception(ex)) => {
                assert_eq!(ex.code, 42);
                assert!(ex.description.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[cfg(windows)]
    #[test]
    fn test_property_put_uses_named_arg() -> Result<()> {
        let (disp, obj) = fake_dispatch();
        disp.put_property("Value", OwnedVariant::from(99))?;
        assert_eq!(obj.state.get(), 99);
        Ok(())
    }
}
