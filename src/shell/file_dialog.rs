use alloc::{string::String, vec::Vec};
use core::ffi::c_void;

use windows::core::{GUID, HRESULT, IUnknown, IUnknown_Vtbl, Interface};

use crate::co::{ClsCtx, FileOpenOptions, HRESULT_CANCELLED, PlacePosition, Sigdn};
use crate::com::{CoTaskMemString, create_instance, hr_ok};
use crate::error::{Result, WinError};
use crate::handles::HWND;
use crate::string::WString;
use crate::structs::COMDLG_FILTERSPEC;

use super::{IShellItem, IShellItemArray};

/// `CLSID_FileOpenDialog`.
pub const CLSID_FILE_OPEN_DIALOG: GUID = GUID::from_u128(0xdc1c5a9c_e88a_4dde_a5a1_60f82a20aef7);

/// `CLSID_FileSaveDialog`.
pub const CLSID_FILE_SAVE_DIALOG: GUID = GUID::from_u128(0xc0b4e2f3_ba21_4773_8dba_335ec946eb8b);

com_interface! {
    /// [`IModalWindow`](https://learn.microsoft.com/en-us/windows/win32/api/shobjidl_core/nn-shobjidl_core-imodalwindow)
    /// COM interface.
    IModalWindow: IUnknown,
    vtable: IModalWindow_Vtbl,
    iid: 0xb4db1657_70d7_485e_8e3e_6fcb5a5c1802,
}

com_interface! {
    /// [`IFileDialog`](https://learn.microsoft.com/en-us/windows/win32/api/shobjidl_core/nn-shobjidl_core-ifiledialog)
    /// COM interface, the part shared by the open and save dialogs.
    IFileDialog: IModalWindow,
    vtable: IFileDialog_Vtbl,
    iid: 0x42f85136_db7e_439c_85f1_e4075d135fc8,
}

com_interface! {
    /// [`IFileOpenDialog`](https://learn.microsoft.com/en-us/windows/win32/api/shobjidl_core/nn-shobjidl_core-ifileopendialog)
    /// COM interface.
    IFileOpenDialog: IFileDialog,
    vtable: IFileOpenDialog_Vtbl,
    iid: 0xd57c7288_d4ad_4768_be02_9d969532d960,
}

com_interface! {
    /// [`IFileSaveDialog`](https://learn.microsoft.com/en-us/windows/win32/api/shobjidl_core/nn-shobjidl_core-ifilesavedialog)
    /// COM interface.
    IFileSaveDialog: IFileDialog,
    vtable: IFileSaveDialog_Vtbl,
    iid: 0x84bccd23_5fde_4cdb_aea4_af64b83d78ab,
}

impl IModalWindow {
    /// Runs the dialog modally. Returns false if the user cancelled.
    pub fn Show(&self, owner: HWND) -> Result<bool> {
        match vcall!(self, Show(owner)) {
            HRESULT(HRESULT_CANCELLED) => Ok(false),
            hr => hr_ok(hr, "Show").map(|_| true),
        }
    }
}

impl IFileDialog {
    /// Sets the type filters as `(description, pattern)` pairs, such as
    /// `("Images", "*.png;*.jpg")`.
    pub fn SetFileTypes(&self, filters: &[(&str, &str)]) -> Result<()> {
        let strings: Vec<(WString, WString)> = filters
            .iter()
            .map(|(name, spec)| (WString::from_str(name), WString::from_str(spec)))
            .collect();
        let specs: Vec<COMDLG_FILTERSPEC> = strings
            .iter()
            .map(|(name, spec)| COMDLG_FILTERSPEC { pszName: name.as_ptr(), pszSpec: spec.as_ptr() })
            .collect();
        hr_ok(vcall!(self, SetFileTypes(specs.len() as u32, specs.as_ptr())), "SetFileTypes")
    }

    /// One-based index of the selected filter.
    pub fn SetFileTypeIndex(&self, index: u32) -> Result<()> {
        hr_ok(vcall!(self, SetFileTypeIndex(index)), "SetFileTypeIndex")
    }

    pub fn GetFileTypeIndex(&self) -> Result<u32> {
        let mut index = 0;
        hr_ok(vcall!(self, GetFileTypeIndex(&mut index)), "GetFileTypeIndex")?;
        Ok(index)
    }

    /// Replaces the options. Read the defaults with [`Self::GetOptions`] first
    /// to add to them.
    pub fn SetOptions(&self, options: FileOpenOptions) -> Result<()> {
        hr_ok(vcall!(self, SetOptions(options.bits())), "SetOptions")
    }

    pub fn GetOptions(&self) -> Result<FileOpenOptions> {
        let mut options = 0;
        hr_ok(vcall!(self, GetOptions(&mut options)), "GetOptions")?;
        Ok(FileOpenOptions::from_bits_retain(options))
    }

    iface_setter! {
        /// Folder used when there is no recently used one.
        SetDefaultFolder => SetDefaultFolder(IShellItem)
    }

    iface_setter! {
        /// Folder the dialog always opens in.
        SetFolder => SetFolder(IShellItem)
    }

    iface_getter! {
        GetFolder => GetFolder -> IShellItem
    }

    iface_getter! {
        GetCurrentSelection => GetCurrentSelection -> IShellItem
    }

    pub fn SetFileName(&self, name: &str) -> Result<()> {
        let name = WString::from_str(name);
        hr_ok(vcall!(self, SetFileName(name.as_ptr())), "SetFileName")
    }

    /// Text of the file name box. Empty if it holds none.
    pub fn GetFileName(&self) -> Result<String> {
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, GetFileName(&mut raw)), "GetFileName")?;
        Ok(unsafe { CoTaskMemString::from_raw(raw) }.to_string_lossy())
    }

    pub fn SetTitle(&self, title: &str) -> Result<()> {
        let title = WString::from_str(title);
        hr_ok(vcall!(self, SetTitle(title.as_ptr())), "SetTitle")
    }

    pub fn SetOkButtonLabel(&self, label: &str) -> Result<()> {
        let label = WString::from_str(label);
        hr_ok(vcall!(self, SetOkButtonLabel(label.as_ptr())), "SetOkButtonLabel")
    }

    pub fn SetFileNameLabel(&self, label: &str) -> Result<()> {
        let label = WString::from_str(label);
        hr_ok(vcall!(self, SetFileNameLabel(label.as_ptr())), "SetFileNameLabel")
    }

    iface_getter! {
        /// The chosen item, after [`IModalWindow::Show`] returned true.
        GetResult => GetResult -> IShellItem
    }

    /// Adds a folder to the navigation pane.
    pub fn AddPlace(&self, item: &IShellItem, position: PlacePosition) -> Result<()> {
        hr_ok(vcall!(self, AddPlace(item.as_raw(), position as i32)), "AddPlace")
    }

    /// Extension appended when the user types none, without the dot.
    pub fn SetDefaultExtension(&self, ext: &str) -> Result<()> {
        let ext = WString::from_str(ext);
        hr_ok(vcall!(self, SetDefaultExtension(ext.as_ptr())), "SetDefaultExtension")
    }

    /// Closes a dialog that is showing, making `Show` return `result`.
    pub fn Close(&self, result: HRESULT) -> Result<()> {
        hr_ok(vcall!(self, Close(result)), "Close")
    }

    /// Scopes the persisted state (last folder, size) to `guid`.
    pub fn SetClientGuid(&self, guid: &GUID) -> Result<()> {
        hr_ok(vcall!(self, SetClientGuid(guid)), "SetClientGuid")
    }

    pub fn ClearClientData(&self) -> Result<()> {
        hr_ok(vcall!(self, ClearClientData()), "ClearClientData")
    }

    /// File system path of the chosen item.
    pub fn result_path(&self) -> Result<String> {
        self.GetResult()?.GetDisplayName(Sigdn::FileSysPath)
    }
}

impl IFileOpenDialog {
    pub fn create() -> Result<Self> {
        create_instance(&CLSID_FILE_OPEN_DIALOG, ClsCtx::INPROC_SERVER)
    }

    iface_getter! {
        /// Every chosen item; use with `FileOpenOptions::ALLOWMULTISELECT`.
        GetResults => GetResults -> IShellItemArray
    }

    iface_getter! {
        GetSelectedItems => GetSelectedItems -> IShellItemArray
    }

    /// File system paths of every chosen item.
    pub fn result_paths(&self) -> Result<Vec<String>> {
        self.GetResults()?
            .items()?
            .iter()
            .map(|item| item.GetDisplayName(Sigdn::FileSysPath))
            .collect()
    }
}

impl IFileSaveDialog {
    pub fn create() -> Result<Self> {
        create_instance(&CLSID_FILE_SAVE_DIALOG, ClsCtx::INPROC_SERVER)
    }

    iface_setter! {
        /// Preselects an existing item, whose folder and name fill the dialog.
        SetSaveAsItem => SetSaveAsItem(IShellItem)
    }
}

/// Shows `dialog` and returns the chosen path, or `None` if cancelled.
pub fn show_for_path(dialog: &IFileDialog, owner: HWND) -> Result<Option<String>> {
    if !dialog.Show(owner)? {
        return Ok(None);
    }
    match dialog.result_path() {
        Ok(path) => Ok(Some(path)),
        Err(WinError::Com(_, HRESULT_CANCELLED)) => Ok(None),
        Err(err) => Err(err),
    }
}

#[repr(C)]
pub struct IModalWindow_Vtbl {
    pub base__: IUnknown_Vtbl,
    pub Show: unsafe extern "system" fn(this: *mut c_void, owner: HWND) -> HRESULT,
}

#[repr(C)]
pub struct IFileDialog_Vtbl {
    pub base__: IModalWindow_Vtbl,
    pub SetFileTypes:
        unsafe extern "system" fn(this: *mut c_void, count: u32, specs: *const COMDLG_FILTERSPEC) -> HRESULT,
    pub SetFileTypeIndex: unsafe extern "system" fn(this: *mut c_void, index: u32) -> HRESULT,
    pub GetFileTypeIndex: unsafe extern "system" fn(this: *mut c_void, index: *mut u32) -> HRESULT,
    pub Advise: *const c_void,
    pub Unadvise: *const c_void,
    pub SetOptions: unsafe extern "system" fn(this: *mut c_void, options: u32) -> HRESULT,
    pub GetOptions: unsafe extern "system" fn(this: *mut c_void, options: *mut u32) -> HRESULT,
    pub SetDefaultFolder: unsafe extern "system" fn(this: *mut c_void, item: *mut c_void) -> HRESULT,
    pub SetFolder: unsafe extern "system" fn(this: *mut c_void, item: *mut c_void) -> HRESULT,
    pub GetFolder: unsafe extern "system" fn(this: *mut c_void, item: *mut *mut c_void) -> HRESULT,
    pub GetCurrentSelection: unsafe extern "system" fn(this: *mut c_void, item: *mut *mut c_void) -> HRESULT,
    pub SetFileName: unsafe extern "system" fn(this: *mut c_void, name: *const u16) -> HRESULT,
    pub GetFileName: unsafe extern "system" fn(this: *mut c_void, name: *mut *mut u16) -> HRESULT,
    pub SetTitle: unsafe extern "system" fn(this: *mut c_void, title: *const u16) -> HRESULT,
    pub SetOkButtonLabel: unsafe extern "system" fn(this: *mut c_void, label: *const u16) -> HRESULT,
    pub SetFileNameLabel: unsafe extern "system" fn(this: *mut c_void, label: *const u16) -> HRESULT,
    pub GetResult: unsafe extern "system" fn(this: *mut c_void, item: *mut *mut c_void) -> HRESULT,
    pub AddPlace: unsafe extern "system" fn(this: *mut c_void, item: *mut c_void, position: i32) -> HRESULT,
    pub SetDefaultExtension: unsafe extern "system" fn(this: *mut c_void, ext: *const u16) -> HRESULT,
    pub Close: unsafe extern "system" fn(this: *mut c_void, result: HRESULT) -> HRESULT,
    pub SetClientGuid: unsafe extern "system" fn(this: *mut c_void, guid: *const GUID) -> HRESULT,
    pub ClearClientData: unsafe extern "system" fn(this: *mut c_void) -> HRESULT,
    pub SetFilter: *const c_void,
}

#[repr(C)]
pub struct IFileOpenDialog_Vtbl {
    pub base__: IFileDialog_Vtbl,
    pub GetResults: unsafe extern "system" fn(this: *mut c_void, items: *mut *mut c_void) -> HRESULT,
    pub GetSelectedItems: unsafe extern "system" fn(this: *mut c_void, items: *mut *mut c_void) -> HRESULT,
}

#[repr(C)]
pub struct IFileSaveDialog_Vtbl {
    pub base__: IFileDialog_Vtbl,
    pub SetSaveAsItem: unsafe extern "system" fn(this: *mut c_void, item: *mut c_void) -> HRESULT,
    pub SetProperties: *const c_void,
    pub SetCollectedProperties: *const c_void,
    pub GetProperties: *const c_void,
    pub ApplyProperties: *const c_void,
}


#[cfg(all(test, windows, feature = "integration-tests"))]
mod integration {
    use super::*;
    use crate::co::CoInit;

    #[test]
    fn test_configure_dialogs() -> Result<()> {
        let _com = crate::com::initialize(CoInit::APARTMENTTHREADED)?;

        let open = IFileOpenDialog::create()?;
        open.SetTitle("winabi")?;
        open.SetFileTypes(&[("Text", "*.txt"), ("All", "*.*")])?;
        open.SetFileTypeIndex(2)?;
        assert_eq!(open.GetFileTypeIndex()?, 2);
        let options = open.GetOptions()? | FileOpenOptions::ALLOWMULTISELECT;
        open.SetOptions(options)?;
        assert!(open.GetOptions()?.contains(FileOpenOptions::ALLOWMULTISELECT));

        let save = IFileSaveDialog::create()?;
        save.SetFileName("out.txt")?;
        save.SetDefaultExtension("txt")?;
        assert!(save.GetResult().is_err());
        Ok(())
    }
}
