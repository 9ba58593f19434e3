use core::ffi::c_void;

use windows::core::{GUID, HRESULT, IUnknown, IUnknown_Vtbl, Interface};

use crate::co::{ClsCtx, TabProperties, TaskbarProgress};
use crate::com::{cast, create_instance, hr_ok};
use crate::error::Result;
use crate::handles::{HICON, HIMAGELIST, HWND};
use crate::string::WString;
use crate::structs::{RECT, THUMBBUTTON};

/// `CLSID_TaskbarList`.
pub const CLSID_TASKBAR_LIST: GUID = GUID::from_u128(0x56fdf344_fd6d_11d0_958a_006097c9a090);

/// Most buttons a thumbnail toolbar accepts.
pub const MAX_THUMB_BUTTONS: usize = 7;

com_interface! {
    /// [`ITaskbarList`](https://learn.microsoft.com/en-us/windows/win32/api/shobjidl_core/nn-shobjidl_core-itaskbarlist)
    /// COM interface.
    ITaskbarList: IUnknown,
    vtable: ITaskbarList_Vtbl,
    iid: 0x56fdf342_fd6d_11d0_958a_006097c9a090,
}

com_interface! {
    /// `ITaskbarList2`: adds full-screen marking.
    ITaskbarList2: ITaskbarList,
    vtable: ITaskbarList2_Vtbl,
    iid: 0x602d4995_b13a_429b_a66e_1935e44f4317,
}

com_interface! {
    /// `ITaskbarList3`: progress bars, tabs, thumbnail toolbars and overlays.
    ITaskbarList3: ITaskbarList2,
    vtable: ITaskbarList3_Vtbl,
    iid: 0xea1afb91_9e28_4b86_90e9_9e9f8a5eefaf,
}

com_interface! {
    /// `ITaskbarList4`: per-tab thumbnail and peek properties.
    ITaskbarList4: ITaskbarList3,
    vtable: ITaskbarList4_Vtbl,
    iid: 0xc43dc798_95d1_4bea_9030_bb99e2983a1a,
}

impl ITaskbarList {
    /// Creates the taskbar object, calls `HrInit` and asks for the
    /// interface version `T`.
    pub fn create<T: Interface>() -> Result<T> {
        let list: ITaskbarList = create_instance(&CLSID_TASKBAR_LIST, ClsCtx::INPROC_SERVER)?;
        list.HrInit()?;
        cast(&list)
    }

    /// Must be called once before any other method.
    pub fn HrInit(&self) -> Result<()> {
        hr_ok(vcall!(self, HrInit()), "HrInit")
    }

    pub fn AddTab(&self, hwnd: HWND) -> Result<()> {
        hr_ok(vcall!(self, AddTab(hwnd)), "AddTab")
    }

    pub fn DeleteTab(&self, hwnd: HWND) -> Result<()> {
        hr_ok(vcall!(self, DeleteTab(hwnd)), "DeleteTab")
    }

    pub fn ActivateTab(&self, hwnd: HWND) -> Result<()> {
        hr_ok(vcall!(self, ActivateTab(hwnd)), "ActivateTab")
    }

    /// Marks the button active without activating the window.
    pub fn SetActiveAlt(&self, hwnd: HWND) -> Result<()> {
        hr_ok(vcall!(self, SetActiveAlt(hwnd)), "SetActiveAlt")
    }
}

impl ITaskbarList2 {
    pub fn MarkFullscreenWindow(&self, hwnd: HWND, fullscreen: bool) -> Result<()> {
        hr_ok(vcall!(self, MarkFullscreenWindow(hwnd, fullscreen as i32)), "MarkFullscreenWindow")
    }
}

impl ITaskbarList3 {
    /// Sets the progress bar to `completed` out of `total`.
    pub fn SetProgressValue(&self, hwnd: HWND, completed: u64, total: u64) -> Result<()> {
        hr_ok(vcall!(self, SetProgressValue(hwnd, completed, total)), "SetProgressValue")
    }

    pub fn SetProgressState(&self, hwnd: HWND, state: TaskbarProgress) -> Result<()> {
        hr_ok(vcall!(self, SetProgressState(hwnd, state as u32)), "SetProgressState")
    }

    /// Registers an MDI or tabbed child window as a taskbar tab of `mdi`.
    pub fn RegisterTab(&self, tab: HWND, mdi: HWND) -> Result<()> {
        hr_ok(vcall!(self, RegisterTab(tab, mdi)), "RegisterTab")
    }

    pub fn UnregisterTab(&self, tab: HWND) -> Result<()> {
        hr_ok(vcall!(self, UnregisterTab(tab)), "UnregisterTab")
    }

    /// Moves `tab` before `insert_before`; `HWND::NULL` moves it to the end.
    pub fn SetTabOrder(&self, tab: HWND, insert_before: HWND) -> Result<()> {
        hr_ok(vcall!(self, SetTabOrder(tab, insert_before)), "SetTabOrder")
    }

    pub fn SetTabActive(&self, tab: HWND, mdi: HWND) -> Result<()> {
        hr_ok(vcall!(self, SetTabActive(tab, mdi, 0)), "SetTabActive")
    }

    /// Adds the thumbnail toolbar. Buttons can be added once per window;
    /// change them afterwards with [`Self::ThumbBarUpdateButtons`].
    pub fn ThumbBarAddButtons(&self, hwnd: HWND, buttons: &[THUMBBUTTON]) -> Result<()> {
        let count = buttons.len().min(MAX_THUMB_BUTTONS) as u32;
        hr_ok(vcall!(self, ThumbBarAddButtons(hwnd, count, buttons.as_ptr())), "ThumbBarAddButtons")
    }

    pub fn ThumbBarUpdateButtons(&self, hwnd: HWND, buttons: &[THUMBBUTTON]) -> Result<()> {
        let count = buttons.len().min(MAX_THUMB_BUTTONS) as u32;
        hr_ok(vcall!(self, ThumbBarUpdateButtons(hwnd, count, buttons.as_ptr())), "ThumbBarUpdateButtons")
    }

    pub fn ThumbBarSetImageList(&self, hwnd: HWND, images: HIMAGELIST) -> Result<()> {
        hr_ok(vcall!(self, ThumbBarSetImageList(hwnd, images)), "ThumbBarSetImageList")
    }

    /// Shows `icon` over the taskbar button; `HICON::NULL` removes it.
    pub fn SetOverlayIcon(&self, hwnd: HWND, icon: HICON, description: &str) -> Result<()> {
        let description = WString::from_str(description);
        hr_ok(vcall!(self, SetOverlayIcon(hwnd, icon, description.as_ptr())), "SetOverlayIcon")
    }

    /// `None` restores the window title as tooltip.
    pub fn SetThumbnailTooltip(&self, hwnd: HWND, tip: Option<&str>) -> Result<()> {
        let tip = tip.map(WString::from_str);
        let ptr = tip.as_ref().map_or(core::ptr::null(), |t| t.as_ptr());
        hr_ok(vcall!(self, SetThumbnailTooltip(hwnd, ptr)), "SetThumbnailTooltip")
    }

    /// Limits the thumbnail to `clip` in client coordinates; `None` shows
    /// the whole window.
    pub fn SetThumbnailClip(&self, hwnd: HWND, clip: Option<&RECT>) -> Result<()> {
        let ptr = clip.map_or(core::ptr::null(), |rc| rc as *const RECT);
        hr_ok(vcall!(self, SetThumbnailClip(hwnd, ptr)), "SetThumbnailClip")
    }
}

impl ITaskbarList4 {
    pub fn SetTabProperties(&self, tab: HWND, props: TabProperties) -> Result<()> {
        hr_ok(vcall!(self, SetTabProperties(tab, props.bits())), "SetTabProperties")
    }
}

#[repr(C)]
pub struct ITaskbarList_Vtbl {
    pub base__: IUnknown_Vtbl,
    pub HrInit: unsafe extern "system" fn(this: *mut c_void) -> HRESULT,
    pub AddTab: unsafe extern "system" fn(this: *mut c_void, hwnd: HWND) -> HRESULT,
    pub DeleteTab: unsafe extern "system" fn(this: *mut c_void, hwnd: HWND) -> HRESULT,
    pub ActivateTab: unsafe extern "system" fn(this: *mut c_void, hwnd: HWND) -> HRESULT,
    pub SetActiveAlt: unsafe extern "system" fn(this: *mut c_void, hwnd: HWND) -> HRESULT,
}

#[repr(C)]
pub struct ITaskbarList2_Vtbl {
    pub base__: ITaskbarList_Vtbl,
    pub MarkFullscreenWindow: unsafe extern "system" fn(this: *mut c_void, hwnd: HWND, fullscreen: i32) -> HRESULT,
}

#[repr(C)]
pub struct ITaskbarList3_Vtbl {
    pub base__: ITaskbarList2_Vtbl,
    pub SetProgressValue: unsafe extern "system" fn(this: *mut c_void, hwnd: HWND, completed: u64, total: u64) -> HRESULT,
    pub SetProgressState: unsafe extern "system" fn(this: *mut c_void, hwnd: HWND, flags: u32) -> HRESULT,
    pub RegisterTab: unsafe extern "system" fn(this: *mut c_void, tab: HWND, mdi: HWND) -> HRESULT,
    pub UnregisterTab: unsafe extern "system" fn(this: *mut c_void, tab: HWND) -> HRESULT,
    pub SetTabOrder: unsafe extern "system" fn(this: *mut c_void, tab: HWND, insert_before: HWND) -> HRESULT,
    pub SetTabActive: unsafe extern "system" fn(this: *mut c_void, tab: HWND, mdi: HWND, reserved: u32) -> HRESULT,
    pub ThumbBarAddButtons:
        unsafe extern "system" fn(this: *mut c_void, hwnd: HWND, count: u32, buttons: *const THUMBBUTTON) -> HRESULT,
    pub ThumbBarUpdateButtons:
        unsafe extern "system" fn(this: *mut c_void, hwnd: HWND, count: u32, buttons: *const THUMBBUTTON) -> HRESULT,
    pub ThumbBarSetImageList: unsafe extern "system" fn(this: *mut c_void, hwnd: HWND, images: HIMAGELIST) -> HRESULT,
    pub SetOverlayIcon:
        unsafe extern "system" fn(this: *mut c_void, hwnd: HWND, icon: HICON, description: *const u16) -> HRESULT,
    pub SetThumbnailTooltip: unsafe extern "system" fn(this: *mut c_void, hwnd: HWND, tip: *const u16) -> HRESULT,
    pub SetThumbnailClip: unsafe extern "system" fn(this: *mut c_void, hwnd: HWND, clip: *const RECT) -> HRESULT,
}

#[repr(C)]
pub struct ITaskbarList4_Vtbl {
    pub base__: ITaskbarList3_Vtbl,
    pub SetTabProperties: unsafe extern "system" fn(this: *mut c_void, tab: HWND, flags: u32) -> HRESULT,
}


#[cfg(all(test, windows, feature = "integration-tests"))]
mod integration {
    use super::*;
    use crate::co::CoInit;

    #[test]
    fn test_create_taskbar() -> Result<()> {
        let _com = crate::com::initialize(CoInit::APARTMENTTHREADED)?;
        let taskbar: ITaskbarList3 = ITaskbarList::create()?;
        taskbar.SetProgressState(HWND::NULL, TaskbarProgress::NoProgress).ok();
        Ok(())
    }
}
