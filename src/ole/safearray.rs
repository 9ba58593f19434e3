//! Owned one-dimensional `SAFEARRAY`s.

use alloc::string::String;
use alloc::vec::Vec;
use core::ffi::c_void;
use core::ptr::NonNull;

use windows::core::HRESULT;
use windows_sys::Win32::System::Com::SAFEARRAY;
use windows_sys::Win32::System::Ole::{
    SafeArrayAccessData, SafeArrayCreateVector, SafeArrayDestroy, SafeArrayGetElement,
    SafeArrayGetLBound, SafeArrayGetUBound, SafeArrayGetVartype, SafeArrayPutElement,
    SafeArrayUnaccessData,
};

use super::{Bstr, OwnedVariant};
use crate::co::{VT_BSTR, VT_UI1, VT_VARIANT};
use crate::com::hr_ok;
use crate::error::{Result, WinError};

/// A `SAFEARRAY` destroyed with `SafeArrayDestroy` on drop.
pub struct SafeArray(NonNull<SAFEARRAY>);

impl SafeArray {
    /// Takes ownership of an array pointer, `None` if null.
    #[inline]
    pub fn from_ptr(ptr: *mut SAFEARRAY) -> Option<Self> {
        NonNull::new(ptr).map(Self)
    }

    /// Creates a zero-based vector of `len` elements of type `vt`.
    pub fn vector(vt: u16, len: u32) -> Result<Self> {
        let raw = unsafe { SafeArrayCreateVector(vt, 0, len) };
        Self::from_ptr(raw).ok_or(WinError::NullPointer("SafeArrayCreateVector"))
    }

    /// Creates a `VT_UI1` vector holding a copy of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let array = Self::vector(VT_UI1, data.len() as u32)?;
        {
            let mut lock = unsafe { SafeArrayAccessor::<u8>::new(&array)? };
            lock.as_mut_slice().copy_from_slice(data);
        }
        Ok(array)
    }

    /// Creates a `VT_VARIANT` vector; each element is copied into the array.
    pub fn from_variants(items: &[OwnedVariant]) -> Result<Self> {
        let array = Self::vector(VT_VARIANT, items.len() as u32)?;
        for (index, item) in items.iter().enumerate() {
            array.put(index as i32, item.as_raw() as *const _ as *const c_void)?;
        }
        Ok(array)
    }

    /// Creates a `VT_BSTR` vector.
    pub fn from_strings<S: AsRef<str>>(items: &[S]) -> Result<Self> {
        let array = Self::vector(VT_BSTR, items.len() as u32)?;
        for (index, item) in items.iter().enumerate() {
            let bstr = Bstr::from(item.as_ref());
            array.put(index as i32, bstr.as_ptr().cast())?;
        }
        Ok(array)
    }

    fn put(&self, index: i32, value: *const c_void) -> Result<()> {
        let hr = unsafe { SafeArrayPutElement(self.as_ptr(), &index, value) };
        hr_ok(HRESULT(hr), "SafeArrayPutElement")
    }

    #[inline]
    pub fn as_ptr(&self) -> *mut SAFEARRAY {
        self.0.as_ptr()
    }

    /// Releases ownership; the caller must destroy the array.
    #[inline]
    pub fn into_raw(self) -> *mut SAFEARRAY {
        let ptr = self.0.as_ptr();
        core::mem::forget(self);
        ptr
    }

    /// Element type, from `SafeArrayGetVartype`.
    pub fn vartype(&self) -> Result<u16> {
        let mut vt = 0;
        let hr = unsafe { SafeArrayGetVartype(self.as_ptr(), &mut vt) };
        hr_ok(HRESULT(hr), "SafeArrayGetVartype")?;
        Ok(vt)
    }

    /// Inclusive bounds of the first dimension.
    pub fn bounds(&self) -> Result<(i32, i32)> {
        let (mut lower, mut upper) = (0, 0);
        hr_ok(
            HRESULT(unsafe { SafeArrayGetLBound(self.as_ptr(), 1, &mut lower) }),
            "SafeArrayGetLBound",
        )?;
        hr_ok(
            HRESULT(unsafe { SafeArrayGetUBound(self.as_ptr(), 1, &mut upper) }),
            "SafeArrayGetUBound",
        )?;
        Ok((lower, upper))
    }

    /// Element count of the first dimension.
    pub fn len(&self) -> usize {
        unsafe { (*self.0.as_ptr()).rgsabound[0].cElements as usize }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies out element `index` of a `VT_VARIANT` array.
    pub fn get_variant(&self, index: i32) -> Result<OwnedVariant> {
        self.expect_type(VT_VARIANT)?;
        let mut out = OwnedVariant::empty();
        let hr = unsafe { SafeArrayGetElement(self.as_ptr(), &index, out.as_mut_ptr().cast()) };
        hr_ok(HRESULT(hr), "SafeArrayGetElement")?;
        Ok(out)
    }

    /// Copies a `VT_VARIANT` array into owned variants.
    pub fn to_variants(&self) -> Result<Vec<OwnedVariant>> {
        let (lower, upper) = self.bounds()?;
        (lower..=upper).map(|i| self.get_variant(i)).collect()
    }

    /// Copies a `VT_BSTR` array into strings.
    pub fn to_strings(&self) -> Result<Vec<String>> {
        self.expect_type(VT_BSTR)?;
        let lock = unsafe { SafeArrayAccessor::<*const u16>::new(self)? };
        Ok(lock
            .iter()
            .map(|&raw| core::mem::ManuallyDrop::new(unsafe { Bstr::from_raw(raw) }).to_string_lossy())
            .collect())
    }

    /// Copies a `VT_UI1` array into bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.expect_type(VT_UI1)?;
        let lock = unsafe { SafeArrayAccessor::<u8>::new(self)? };
        Ok(lock.as_slice().to_vec())
    }

    fn expect_type(&self, vt: u16) -> Result<()> {
        match self.vartype()? {
            found if found == vt => Ok(()),
            found => Err(WinError::VariantType(found)),
        }
    }
}

impl Drop for SafeArray {
    fn drop(&mut self) {
        unsafe { SafeArrayDestroy(self.0.as_ptr()) };
    }
}

impl core::fmt::Debug for SafeArray {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SafeArray")
            .field("ptr", &self.0)
            .field("len", &self.len())
            .finish()
    }
}

/// Locks an array's data with `SafeArrayAccessData` until dropped.
pub struct SafeArrayAccessor<'a, T> {
    array: &'a SafeArray,
    data: *mut T,
}

impl<'a, T> SafeArrayAccessor<'a, T> {
    /// Locks `array`.
    ///
    /// # Safety
    ///
    /// The elements must be of type `T`.
    pub unsafe fn new(array: &'a SafeArray) -> Result<Self> {
        let mut data = core::ptr::null_mut();
        let hr = unsafe { SafeArrayAccessData(array.as_ptr(), &mut data) };
        hr_ok(HRESULT(hr), "SafeArrayAccessData")?;
        Ok(Self {
            array,
            data: data.cast(),
        })
    }

    pub fn as_slice(&self) -> &[T] {
        match self.array.len() {
            0 => &[],
            len => unsafe { core::slice::from_raw_parts(self.data, len) },
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self.array.len() {
            0 => &mut [],
            len => unsafe { core::slice::from_raw_parts_mut(self.data, len) },
        }
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

impl<T> Drop for SafeArrayAccessor<'_, T> {
    fn drop(&mut self) {
        unsafe { SafeArrayUnaccessData(self.array.as_ptr()) };
    }
}
