use bitflags::bitflags;

bitflags! {
    /// Concurrency model for `CoInitializeEx` (`COINIT_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CoInit: u32 {
        const MULTITHREADED = 0x0;
        const APARTMENTTHREADED = 0x2;
        const DISABLE_OLE1DDE = 0x4;
        const SPEED_OVER_MEMORY = 0x8;
    }
}

bitflags! {
    /// Server context for `CoCreateInstance` (`CLSCTX_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ClsCtx: u32 {
        const INPROC_SERVER = 0x1;
        const INPROC_HANDLER = 0x2;
        const LOCAL_SERVER = 0x4;
        const REMOTE_SERVER = 0x10;
        const ALL = 0x17;
    }
}

bitflags! {
    /// Invocation kind for `IDispatch::Invoke` (`DISPATCH_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DispatchFlags: u16 {
        const METHOD = 0x1;
        const PROPERTYGET = 0x2;
        const PROPERTYPUT = 0x4;
        const PROPERTYPUTREF = 0x8;
    }
}

/// Named argument id for the value of a property put.
pub const DISPID_PROPERTYPUT: i32 = -3;

/// Returned by `GetIDsOfNames` for names the object does not know.
pub const DISPID_UNKNOWN: i32 = -1;

/// Locale passed to `GetIDsOfNames` and `Invoke`.
pub const LOCALE_USER_DEFAULT: u32 = 0x0400;

/// VARIANT type tags (`VT_*`).
pub const VT_EMPTY: u16 = 0;
pub const VT_NULL: u16 = 1;
pub const VT_I2: u16 = 2;
pub const VT_I4: u16 = 3;
pub const VT_R4: u16 = 4;
pub const VT_R8: u16 = 5;
pub const VT_DATE: u16 = 7;
pub const VT_BSTR: u16 = 8;
pub const VT_DISPATCH: u16 = 9;
pub const VT_ERROR: u16 = 10;
pub const VT_BOOL: u16 = 11;
pub const VT_VARIANT: u16 = 12;
pub const VT_UNKNOWN: u16 = 13;
pub const VT_I1: u16 = 16;
pub const VT_UI1: u16 = 17;
pub const VT_UI2: u16 = 18;
pub const VT_UI4: u16 = 19;
pub const VT_I8: u16 = 20;
pub const VT_UI8: u16 = 21;
pub const VT_INT: u16 = 22;
pub const VT_UINT: u16 = 23;
pub const VT_ARRAY: u16 = 0x2000;
pub const VT_BYREF: u16 = 0x4000;

/// `VARIANT_BOOL` true and false.
pub const VARIANT_TRUE: i16 = -1;
pub const VARIANT_FALSE: i16 = 0;

/// HRESULT values the bindings test for.
pub const S_OK: i32 = 0;
pub const S_FALSE: i32 = 1;
pub const E_NOTIMPL: i32 = 0x8000_4001_u32 as i32;
pub const E_NOINTERFACE: i32 = 0x8000_4002_u32 as i32;
pub const E_POINTER: i32 = 0x8000_4003_u32 as i32;
pub const E_ABORT: i32 = 0x8000_4004_u32 as i32;
pub const E_FAIL: i32 = 0x8000_4005_u32 as i32;
pub const E_UNEXPECTED: i32 = 0x8000_FFFF_u32 as i32;
pub const E_ACCESSDENIED: i32 = 0x8007_0005_u32 as i32;
pub const E_OUTOFMEMORY: i32 = 0x8007_000E_u32 as i32;
pub const E_INVALIDARG: i32 = 0x8007_0057_u32 as i32;
pub const RPC_E_CHANGED_MODE: i32 = 0x8001_0106_u32 as i32;
pub const REGDB_E_CLASSNOTREG: i32 = 0x8004_0154_u32 as i32;
pub const DISP_E_UNKNOWNNAME: i32 = 0x8002_0006_u32 as i32;
pub const DISP_E_EXCEPTION: i32 = 0x8002_0009_u32 as i32;
pub const DISP_E_BADPARAMCOUNT: i32 = 0x8002_000E_u32 as i32;
pub const DISP_E_TYPEMISMATCH: i32 = 0x8002_0005_u32 as i32;
