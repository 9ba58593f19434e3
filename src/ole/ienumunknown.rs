use alloc::vec::Vec;
use core::ffi::c_void;

use windows::core::{HRESULT, IUnknown, IUnknown_Vtbl};

use crate::co::S_FALSE;
use crate::com::{from_out, hr_ok, take_batch};
use crate::error::Result;

com_interface! {
    /// [`IEnumUnknown`](https://learn.microsoft.com/en-us/windows/win32/api/objidl/nn-objidl-ienumunknown)
    /// COM interface.
    IEnumUnknown: IUnknown,
    vtable: IEnumUnknown_Vtbl,
    iid: 0x00000100_0000_0000_c000_000000000046,
}

impl IEnumUnknown {
    /// Fetches up to `count` objects. A short batch means the end was reached.
    ///
    /// A null among the fetched pointers fails the whole batch; the other
    /// objects are released.
    pub fn Next(&self, count: u32) -> Result<Vec<IUnknown>> {
        let mut raw: Vec<*mut c_void> = alloc::vec![core::ptr::null_mut(); count as usize];
        let mut fetched = 0;
        let hr = vcall!(self, Next(count, raw.as_mut_ptr(), &mut fetched));
        hr_ok(hr, "IEnumUnknown::Next")?;

        raw.truncate(fetched.min(count) as usize);
        unsafe { take_batch(raw, "IEnumUnknown::Next") }
    }

    /// Skips `count` objects. Returns false if fewer remained.
    pub fn Skip(&self, count: u32) -> Result<bool> {
        let hr = vcall!(self, Skip(count));
        hr_ok(hr, "IEnumUnknown::Skip")?;
        Ok(hr.0 != S_FALSE)
    }

    pub fn Reset(&self) -> Result<()> {
        hr_ok(vcall!(self, Reset()), "IEnumUnknown::Reset")
    }

    /// Creates an independent enumerator at the same position.
    pub fn Clone(&self) -> Result<IEnumUnknown> {
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, Clone(&mut raw)), "IEnumUnknown::Clone")?;
        unsafe { from_out(raw, "IEnumUnknown::Clone") }
    }

    /// Drains the enumerator from its current position.
    pub fn collect_all(&self) -> Result<Vec<IUnknown>> {
        let mut items = Vec::new();
        loop {
            let batch = self.Next(16)?;
            let done = batch.len() < 16;
            items.extend(batch);
            if done {
                return Ok(items);
            }
        }
    }
}

#[repr(C)]
pub struct IEnumUnknown_Vtbl {
    pub base__: IUnknown_Vtbl,
    pub Next: unsafe extern "system" fn(
        this: *mut c_void,
        celt: u32,
        rgelt: *mut *mut c_void,
        pceltFetched: *mut u32,
    ) -> HRESULT,
    pub Skip: unsafe extern "system" fn(this: *mut c_void, celt: u32) -> HRESULT,
    pub Reset: unsafe extern "system" fn(this: *mut c_void) -> HRESULT,
    pub Clone: unsafe extern "system" fn(this: *mut c_void, ppenum: *mut *mut c_void) -> HRESULT,
}
