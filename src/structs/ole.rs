use core::ffi::c_void;

use windows::core::HRESULT;
use windows_sys::Win32::System::Variant::VARIANT;

/// [`DISPPARAMS`](https://learn.microsoft.com/en-us/windows/win32/api/oaidl/ns-oaidl-dispparams) struct.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct DISPPARAMS {
    pub rgvarg: *mut VARIANT,
    pub rgdispidNamedArgs: *mut i32,
    pub cArgs: u32,
    pub cNamedArgs: u32,
}

/// [`EXCEPINFO`](https://learn.microsoft.com/en-us/windows/win32/api/oaidl/ns-oaidl-excepinfo) struct.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct EXCEPINFO {
    pub wCode: u16,
    pub wReserved: u16,
    pub bstrSource: *const u16,
    pub bstrDescription: *const u16,
    pub bstrHelpFile: *const u16,
    pub dwHelpContext: u32,
    pub pvReserved: *mut c_void,
    pub pfnDeferredFillIn: Option<unsafe extern "system" fn(*mut EXCEPINFO) -> HRESULT>,
    pub scode: i32,
}

zeroed_default!(DISPPARAMS, EXCEPINFO);
