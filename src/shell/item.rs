use alloc::{string::String, vec::Vec};
use core::ffi::c_void;

use windows::core::{GUID, HRESULT, IUnknown, IUnknown_Vtbl, Interface};
use windows_sys::Win32::UI::Shell::SHCreateItemFromParsingName;

use crate::co::{CompareHint, S_FALSE, ShellAttributes, Sigdn};
use crate::com::{CoTaskMemString, from_out, hr_ok};
use crate::error::{Result, WinError};
use crate::string::WString;

com_interface! {
    /// [`IShellItem`](https://learn.microsoft.com/en-us/windows/win32/api/shobjidl_core/nn-shobjidl_core-ishellitem)
    /// COM interface: a file, folder or virtual item of the shell namespace.
    IShellItem: IUnknown,
    vtable: IShellItem_Vtbl,
    iid: 0x43826d1e_e718_42ee_bc55_a1e261c37bfe,
}

com_interface! {
    /// [`IShellItemArray`](https://learn.microsoft.com/en-us/windows/win32/api/shobjidl_core/nn-shobjidl_core-ishellitemarray)
    /// COM interface.
    IShellItemArray: IUnknown,
    vtable: IShellItemArray_Vtbl,
    iid: 0xb63ea76d_1f85_456f_a19c_48159efa858b,
}

/// Creates a shell item from a path or parsing name, such as
/// `C:\Windows` or `::{20D04FE0-3AEA-1069-A2D8-08002B30309D}`.
pub fn create_item_from_parsing_name(name: &str) -> Result<IShellItem> {
    let name = WString::from_str(name);
    let mut raw = core::ptr::null_mut();
    let hr = unsafe {
        SHCreateItemFromParsingName(
            name.as_ptr(),
            core::ptr::null_mut(),
            (&IShellItem::IID as *const GUID).cast(),
            &mut raw,
        )
    };
    hr_ok(HRESULT(hr), "SHCreateItemFromParsingName")?;
    unsafe { from_out(raw, "SHCreateItemFromParsingName") }
}

impl IShellItem {
    /// Returns the name of the item in the requested form.
    pub fn GetDisplayName(&self, form: Sigdn) -> Result<String> {
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, GetDisplayName(form as i32, &mut raw)), "GetDisplayName")?;
        let name = unsafe { CoTaskMemString::from_raw(raw) };
        if name.is_null() {
            return Err(WinError::NullPointer("GetDisplayName"));
        }
        Ok(name.to_string_lossy())
    }

    /// Returns the attributes of `mask` that the item has.
    pub fn GetAttributes(&self, mask: ShellAttributes) -> Result<ShellAttributes> {
        let mut attrs = 0;
        let hr = vcall!(self, GetAttributes(mask.bits(), &mut attrs));
        // S_FALSE only means some bits of the mask are not set.
        hr_ok(hr, "GetAttributes")?;
        Ok(ShellAttributes::from_bits_retain(attrs & mask.bits()))
    }

    iface_getter! {
        /// The parent folder. Fails for the desktop, which has none.
        GetParent => GetParent -> IShellItem
    }

    /// Compares two items. Returns true if they are the same item under
    /// `hint`.
    pub fn Compare(&self, other: &IShellItem, hint: CompareHint) -> Result<bool> {
        let mut order = 0;
        let hr = vcall!(self, Compare(other.as_raw(), hint.bits(), &mut order));
        hr_ok(hr, "Compare")?;
        Ok(hr.0 != S_FALSE && order == 0)
    }
}

impl IShellItemArray {
    pub fn GetCount(&self) -> Result<u32> {
        let mut count = 0;
        hr_ok(vcall!(self, GetCount(&mut count)), "GetCount")?;
        Ok(count)
    }

    pub fn GetItemAt(&self, index: u32) -> Result<IShellItem> {
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, GetItemAt(index, &mut raw)), "GetItemAt")?;
        unsafe { from_out(raw, "GetItemAt") }
    }

    /// Collects every item of the array.
    pub fn items(&self) -> Result<Vec<IShellItem>> {
        (0..self.GetCount()?).map(|i| self.GetItemAt(i)).collect()
    }
}

#[repr(C)]
pub struct IShellItem_Vtbl {
    pub base__: IUnknown_Vtbl,
    pub BindToHandler: *const c_void,
    pub GetParent: unsafe extern "system" fn(this: *mut c_void, parent: *mut *mut c_void) -> HRESULT,
    pub GetDisplayName: unsafe extern "system" fn(this: *mut c_void, form: i32, name: *mut *mut u16) -> HRESULT,
    pub GetAttributes: unsafe extern "system" fn(this: *mut c_void, mask: u32, attrs: *mut u32) -> HRESULT,
    pub Compare:
        unsafe extern "system" fn(this: *mut c_void, other: *mut c_void, hint: u32, order: *mut i32) -> HRESULT,
}

#[repr(C)]
pub struct IShellItemArray_Vtbl {
    pub base__: IUnknown_Vtbl,
    pub BindToHandler: *const c_void,
    pub GetPropertyStore: *const c_void,
    pub GetPropertyDescriptionList: *const c_void,
    pub GetAttributes: *const c_void,
    pub GetCount: unsafe extern "system" fn(this: *mut c_void, count: *mut u32) -> HRESULT,
    pub GetItemAt: unsafe extern "system" fn(this: *mut c_void, index: u32, item: *mut *mut c_void) -> HRESULT,
    pub EnumItems: *const c_void,
}
