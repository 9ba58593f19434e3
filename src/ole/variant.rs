//! Owned `VARIANT` values.

use alloc::string::String;
use core::ffi::c_void;

use windows::core::{HRESULT, IUnknown, Interface};
use windows_sys::Win32::System::Variant::{
    VARIANT, VariantChangeType, VariantClear, VariantCopy,
};

use super::{Bstr, IDispatch, SafeArray};
use crate::co::*;
use crate::com::{clone_raw, hr_ok};
use crate::error::{Result, WinError};

/// Converts a Rust `bool` into a `VARIANT_BOOL`.
#[inline]
pub const fn variant_bool(value: bool) -> i16 {
    if value { VARIANT_TRUE } else { VARIANT_FALSE }
}

/// A `VARIANT` that owns its payload and calls `VariantClear` on drop.
#[repr(transparent)]
pub struct OwnedVariant(VARIANT);

impl OwnedVariant {
    /// A `VT_EMPTY` variant.
    pub fn empty() -> Self {
        Self(unsafe { core::mem::zeroed() })
    }

    fn with_type(vt: u16) -> Self {
        let mut var = Self::empty();
        var.0.Anonymous.Anonymous.vt = vt;
        var
    }

    /// Takes ownership of a raw `VARIANT`.
    ///
    /// # Safety
    ///
    /// The payload must be valid for its `vt` and not owned elsewhere.
    #[inline]
    pub unsafe fn from_raw(var: VARIANT) -> Self {
        Self(var)
    }

    /// Releases ownership; the caller must clear the result.
    #[inline]
    pub fn into_raw(self) -> VARIANT {
        let var = unsafe { core::ptr::read(&self.0) };
        core::mem::forget(self);
        var
    }

    #[inline]
    pub fn as_raw(&self) -> &VARIANT {
        &self.0
    }

    /// Pointer for `[out]` parameters. Clear the variant first if it holds a value.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut VARIANT {
        &mut self.0
    }

    /// The `VT_*` type tag.
    #[inline]
    pub fn vt(&self) -> u16 {
        unsafe { self.0.Anonymous.Anonymous.vt }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vt() == VT_EMPTY
    }

    /// Returns the value if `VT_I4` or `VT_INT`.
    pub fn get_i32(&self) -> Option<i32> {
        match self.vt() {
            VT_I4 | VT_INT => Some(unsafe { self.0.Anonymous.Anonymous.Anonymous.lVal }),
            _ => None,
        }
    }

    /// Returns the value if `VT_UI4` or `VT_UINT`.
    pub fn get_u32(&self) -> Option<u32> {
        match self.vt() {
            VT_UI4 | VT_UINT => Some(unsafe { self.0.Anonymous.Anonymous.Anonymous.ulVal }),
            _ => None,
        }
    }

    /// Returns the value if `VT_I8`.
    pub fn get_i64(&self) -> Option<i64> {
        (self.vt() == VT_I8).then(|| unsafe { self.0.Anonymous.Anonymous.Anonymous.llVal })
    }

    /// Returns the value if `VT_R8` or `VT_DATE`.
    pub fn get_f64(&self) -> Option<f64> {
        match self.vt() {
            VT_R8 | VT_DATE => Some(unsafe { self.0.Anonymous.Anonymous.Anonymous.dblVal }),
            _ => None,
        }
    }

    /// Returns the value if `VT_BOOL`.
    pub fn get_bool(&self) -> Option<bool> {
        (self.vt() == VT_BOOL)
            .then(|| unsafe { self.0.Anonymous.Anonymous.Anonymous.boolVal } != VARIANT_FALSE)
    }

    /// Copies the string out if `VT_BSTR`.
    pub fn get_string(&self) -> Option<String> {
        if self.vt() != VT_BSTR {
            return None;
        }
        let raw = unsafe { self.0.Anonymous.Anonymous.Anonymous.bstrVal };
        let borrowed = core::mem::ManuallyDrop::new(unsafe { Bstr::from_raw(raw) });
        Some(borrowed.to_string_lossy())
    }

    /// Moves the string out if `VT_BSTR`, leaving the variant empty.
    pub fn take_bstr(&mut self) -> Option<Bstr> {
        if self.vt() != VT_BSTR {
            return None;
        }
        let raw = unsafe { self.0.Anonymous.Anonymous.Anonymous.bstrVal };
        self.0.Anonymous.Anonymous.Anonymous.bstrVal = core::ptr::null();
        self.0.Anonymous.Anonymous.vt = VT_EMPTY;
        Some(unsafe { Bstr::from_raw(raw) })
    }

    /// Returns a new reference to the object if `VT_UNKNOWN` or `VT_DISPATCH`.
    pub fn get_unknown(&self) -> Option<IUnknown> {
        let raw = match self.vt() {
            VT_UNKNOWN => unsafe { self.0.Anonymous.Anonymous.Anonymous.punkVal },
            VT_DISPATCH => unsafe { self.0.Anonymous.Anonymous.Anonymous.pdispVal },
            _ => return None,
        };
        unsafe { clone_raw(raw) }
    }

    /// Returns a new reference to the object if `VT_DISPATCH`.
    pub fn get_dispatch(&self) -> Option<IDispatch> {
        if self.vt() != VT_DISPATCH {
            return None;
        }
        let raw = unsafe { self.0.Anonymous.Anonymous.Anonymous.pdispVal };
        unsafe { clone_raw(raw) }
    }

    /// Returns the object as interface `T`, querying for it.
    pub fn get_interface<T: Interface>(&self) -> Result<T> {
        let unknown = self.get_unknown().ok_or(WinError::VariantType(self.vt()))?;
        crate::com::cast(&unknown)
    }

    /// Moves the array out if the variant holds `VT_ARRAY | vt`.
    pub fn take_array(&mut self) -> Option<SafeArray> {
        if self.vt() & VT_ARRAY == 0 || self.vt() & VT_BYREF != 0 {
            return None;
        }
        let raw = unsafe { self.0.Anonymous.Anonymous.Anonymous.parray };
        self.0.Anonymous.Anonymous.Anonymous.parray = core::ptr::null_mut();
        self.0.Anonymous.Anonymous.vt = VT_EMPTY;
        SafeArray::from_ptr(raw)
    }

    /// Converts to another type with `VariantChangeType`.
    pub fn coerce(&self, vt: u16) -> Result<Self> {
        let mut out = Self::empty();
        let hr = unsafe { VariantChangeType(&mut out.0, &self.0, 0, vt) };
        hr_ok(HRESULT(hr), "VariantChangeType")?;
        Ok(out)
    }

    /// Formats any coercible value as text.
    pub fn to_string_coerced(&self) -> Result<String> {
        if let Some(text) = self.get_string() {
            return Ok(text);
        }
        self.coerce(VT_BSTR)?
            .get_string()
            .ok_or(WinError::VariantType(self.vt()))
    }
}

impl OwnedVariant {
    /// Deep-copies the variant with `VariantCopy`.
    pub fn try_clone(&self) -> Result<Self> {
        let mut copy = Self::empty();
        let hr = unsafe { VariantCopy(&mut copy.0, &self.0) };
        hr_ok(HRESULT(hr), "VariantCopy")?;
        Ok(copy)
    }

    /// Wraps a safe array, tagging the variant with the array's element type.
    pub fn from_safe_array(value: SafeArray) -> Result<Self> {
        let vt = value.vartype()?;
        let mut var = Self::with_type(VT_ARRAY | vt);
        var.0.Anonymous.Anonymous.Anonymous.parray = value.into_raw();
        Ok(var)
    }
}

/// A failed copy yields `VT_EMPTY`; use [`OwnedVariant::try_clone`] to see
/// the error.
impl Clone for OwnedVariant {
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|err| {
            log::warn!("copying variant of type {:#x}: {err}", self.vt());
            Self::empty()
        })
    }
}

impl Default for OwnedVariant {
    fn default() -> Self {
        Self::empty()
    }
}

impl Drop for OwnedVariant {
    fn drop(&mut self) {
        unsafe { VariantClear(&mut self.0) };
    }
}

impl core::fmt::Debug for OwnedVariant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut s = f.debug_struct("OwnedVariant");
        s.field("vt", &self.vt());
        if let Some(v) = self.get_i32() {
            s.field("value", &v);
        } else if let Some(v) = self.get_bool() {
            s.field("value", &v);
        } else if let Some(v) = self.get_string() {
            s.field("value", &v);
        }
        s.finish()
    }
}

impl From<i32> for OwnedVariant {
    fn from(value: i32) -> Self {
        let mut var = Self::with_type(VT_I4);
        var.0.Anonymous.Anonymous.Anonymous.lVal = value;
        var
    }
}

impl From<u32> for OwnedVariant {
    fn from(value: u32) -> Self {
        let mut var = Self::with_type(VT_UI4);
        var.0.Anonymous.Anonymous.Anonymous.ulVal = value;
        var
    }
}

impl From<i64> for OwnedVariant {
    fn from(value: i64) -> Self {
        let mut var = Self::with_type(VT_I8);
        var.0.Anonymous.Anonymous.Anonymous.llVal = value;
        var
    }
}

impl From<f64> for OwnedVariant {
    fn from(value: f64) -> Self {
        let mut var = Self::with_type(VT_R8);
        var.0.Anonymous.Anonymous.Anonymous.dblVal = value;
        var
    }
}

impl From<bool> for OwnedVariant {
    fn from(value: bool) -> Self {
        let mut var = Self::with_type(VT_BOOL);
        var.0.Anonymous.Anonymous.Anonymous.boolVal = variant_bool(value);
        var
    }
}

impl From<Bstr> for OwnedVariant {
    fn from(value: Bstr) -> Self {
        let mut var = Self::with_type(VT_BSTR);
        var.0.Anonymous.Anonymous.Anonymous.bstrVal = value.into_raw();
        var
    }
}

impl From<&str> for OwnedVariant {
    fn from(value: &str) -> Self {
        Bstr::from(value).into()
    }
}

impl From<String> for OwnedVariant {
    fn from(value: String) -> Self {
        Bstr::from(value).into()
    }
}

impl From<IDispatch> for OwnedVariant {
    fn from(value: IDispatch) -> Self {
        let mut var = Self::with_type(VT_DISPATCH);
        var.0.Anonymous.Anonymous.Anonymous.pdispVal = value.into_raw();
        var
    }
}

impl From<IUnknown> for OwnedVariant {
    fn from(value: IUnknown) -> Self {
        let mut var = Self::with_type(VT_UNKNOWN);
        var.0.Anonymous.Anonymous.Anonymous.punkVal = value.into_raw();
        var
    }
}

impl From<SafeArray> for OwnedVariant {
    fn from(value: SafeArray) -> Self {
        let vt = value.vartype().unwrap_or_else(|err| {
            log::warn!("{err}, tagging array as VT_VARIANT");
            VT_VARIANT
        });
        let mut var = Self::with_type(VT_ARRAY | vt);
        var.0.Anonymous.Anonymous.Anonymous.parray = value.into_raw();
        var
    }
}

/// Raw pointer to the first variant of a slice, for `DISPPARAMS::rgvarg`.
pub(crate) fn slice_ptr(args: &mut [OwnedVariant]) -> *mut VARIANT {
    args.as_mut_ptr().cast::<VARIANT>()
}

/// Raw pointer for an optional `[in]` object argument.
pub(crate) fn opt_raw<T: Interface>(obj: Option<&T>) -> *mut c_void {
    obj.map_or(core::ptr::null_mut(), |obj| obj.as_raw())
}
