//! Enhanced Video Renderer display control, reached through Media
//! Foundation's service lookup.

use core::ffi::c_void;

use windows::core::{GUID, HRESULT, IUnknown, IUnknown_Vtbl, Interface};

use crate::co::{AspectRatioMode, ClsCtx, MR_VIDEO_RENDER_SERVICE};
use crate::com::{cast, create_instance, from_out, hr_ok};
use crate::error::Result;
use crate::handles::HWND;
use crate::structs::{COLORREF, MFVideoNormalizedRect, RECT, SIZE};

use super::IBaseFilter;

/// `CLSID_EnhancedVideoRenderer`.
pub const CLSID_ENHANCED_VIDEO_RENDERER: GUID = GUID::from_u128(0xfa10746c_9b63_4b6c_bc49_fc300ea5f256);

com_interface! {
    /// [`IMFGetService`](https://learn.microsoft.com/en-us/windows/win32/api/mfidl/nn-mfidl-imfgetservice)
    /// COM interface.
    IMFGetService: IUnknown,
    vtable: IMFGetService_Vtbl,
    iid: 0xfa993888_4383_415a_a930_dd472a8cf6f7,
}

com_interface! {
    /// [`IMFVideoDisplayControl`](https://learn.microsoft.com/en-us/windows/win32/api/evr/nn-evr-imfvideodisplaycontrol)
    /// COM interface.
    IMFVideoDisplayControl: IUnknown,
    vtable: IMFVideoDisplayControl_Vtbl,
    iid: 0xa490b1e4_ab84_4d31_a1b2_181e03b1077a,
}

impl IMFGetService {
    /// Asks the object for interface `T` of service `service`.
    pub fn GetService<T: Interface>(&self, service: &GUID) -> Result<T> {
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, GetService(service, &T::IID, &mut raw)), "GetService")?;
        unsafe { from_out(raw, "GetService") }
    }
}

/// Creates an EVR filter, to be added to a graph.
pub fn create_video_renderer() -> Result<IBaseFilter> {
    create_instance(&CLSID_ENHANCED_VIDEO_RENDERER, ClsCtx::INPROC_SERVER)
}

/// Display control of an EVR filter. Available once the filter's input
/// pin is connected.
pub fn display_control(evr: &IBaseFilter) -> Result<IMFVideoDisplayControl> {
    cast::<IMFGetService>(evr)?.GetService(&MR_VIDEO_RENDER_SERVICE)
}

impl IMFVideoDisplayControl {
    /// Returns the `(video, aspect_ratio)` sizes of the native stream.
    pub fn GetNativeVideoSize(&self) -> Result<(SIZE, SIZE)> {
        let (mut size, mut ratio) = (SIZE::default(), SIZE::default());
        hr_ok(vcall!(self, GetNativeVideoSize(&mut size, &mut ratio)), "GetNativeVideoSize")?;
        Ok((size, ratio))
    }

    /// Returns the `(min, max)` sizes the renderer can show without
    /// degrading quality.
    pub fn GetIdealVideoSize(&self) -> Result<(SIZE, SIZE)> {
        let (mut min, mut max) = (SIZE::default(), SIZE::default());
        hr_ok(vcall!(self, GetIdealVideoSize(&mut min, &mut max)), "GetIdealVideoSize")?;
        Ok((min, max))
    }

    /// Sets the source rectangle and the destination in client
    /// coordinates of the video window. `None` leaves a side unchanged.
    pub fn SetVideoPosition(&self, src: Option<&MFVideoNormalizedRect>, dest: Option<&RECT>) -> Result<()> {
        let src = src.map_or(core::ptr::null(), |r| r as *const MFVideoNormalizedRect);
        let dest = dest.map_or(core::ptr::null(), |r| r as *const RECT);
        hr_ok(vcall!(self, SetVideoPosition(src, dest)), "SetVideoPosition")
    }

    pub fn GetVideoPosition(&self) -> Result<(MFVideoNormalizedRect, RECT)> {
        let (mut src, mut dest) = (MFVideoNormalizedRect::default(), RECT::default());
        hr_ok(vcall!(self, GetVideoPosition(&mut src, &mut dest)), "GetVideoPosition")?;
        Ok((src, dest))
    }

    pub fn SetAspectRatioMode(&self, mode: AspectRatioMode) -> Result<()> {
        hr_ok(vcall!(self, SetAspectRatioMode(mode.bits())), "SetAspectRatioMode")
    }

    pub fn GetAspectRatioMode(&self) -> Result<AspectRatioMode> {
        let mut mode = 0;
        hr_ok(vcall!(self, GetAspectRatioMode(&mut mode)), "GetAspectRatioMode")?;
        Ok(AspectRatioMode::from_bits_retain(mode))
    }

    pub fn SetVideoWindow(&self, hwnd: HWND) -> Result<()> {
        hr_ok(vcall!(self, SetVideoWindow(hwnd)), "SetVideoWindow")
    }

    pub fn GetVideoWindow(&self) -> Result<HWND> {
        let mut hwnd = HWND::NULL;
        hr_ok(vcall!(self, GetVideoWindow(&mut hwnd)), "GetVideoWindow")?;
        Ok(hwnd)
    }

    /// Redraws the current frame; call it on `WM_PAINT`.
    pub fn RepaintVideo(&self) -> Result<()> {
        hr_ok(vcall!(self, RepaintVideo()), "RepaintVideo")
    }

    pub fn SetBorderColor(&self, color: COLORREF) -> Result<()> {
        hr_ok(vcall!(self, SetBorderColor(color)), "SetBorderColor")
    }

    pub fn GetBorderColor(&self) -> Result<COLORREF> {
        let mut color = COLORREF(0);
        hr_ok(vcall!(self, GetBorderColor(&mut color)), "GetBorderColor")?;
        Ok(color)
    }

    /// `MFVideoRenderPrefs` flags.
    pub fn SetRenderingPrefs(&self, prefs: u32) -> Result<()> {
        hr_ok(vcall!(self, SetRenderingPrefs(prefs)), "SetRenderingPrefs")
    }

    pub fn GetRenderingPrefs(&self) -> Result<u32> {
        let mut prefs = 0;
        hr_ok(vcall!(self, GetRenderingPrefs(&mut prefs)), "GetRenderingPrefs")?;
        Ok(prefs)
    }

    pub fn SetFullscreen(&self, fullscreen: bool) -> Result<()> {
        hr_ok(vcall!(self, SetFullscreen(fullscreen as i32)), "SetFullscreen")
    }

    pub fn GetFullscreen(&self) -> Result<bool> {
        let mut fullscreen = 0;
        hr_ok(vcall!(self, GetFullscreen(&mut fullscreen)), "GetFullscreen")?;
        Ok(fullscreen != 0)
    }
}

#[repr(C)]
pub struct IMFGetService_Vtbl {
    pub base__: IUnknown_Vtbl,
    pub GetService: unsafe extern "system" fn(
        this: *mut c_void,
        service: *const GUID,
        riid: *const GUID,
        out: *mut *mut c_void,
    ) -> HRESULT,
}

#[repr(C)]
pub struct IMFVideoDisplayControl_Vtbl {
    pub base__: IUnknown_Vtbl,
    pub GetNativeVideoSize: unsafe extern "system" fn(this: *mut c_void, size: *mut SIZE, ratio: *mut SIZE) -> HRESULT,
    pub GetIdealVideoSize: unsafe extern "system" fn(this: *mut c_void, min: *mut SIZE, max: *mut SIZE) -> HRESULT,
    pub SetVideoPosition: unsafe extern "system" fn(
        this: *mut c_void,
        src: *const MFVideoNormalizedRect,
        dest: *const RECT,
    ) -> HRESULT,
    pub GetVideoPosition:
        unsafe extern "system" fn(this: *mut c_void, src: *mut MFVideoNormalizedRect, dest: *mut RECT) -> HRESULT,
    pub SetAspectRatioMode: unsafe extern "system" fn(this: *mut c_void, mode: u32) -> HRESULT,
    pub GetAspectRatioMode: unsafe extern "system" fn(this: *mut c_void, mode: *mut u32) -> HRESULT,
    pub SetVideoWindow: unsafe extern "system" fn(this: *mut c_void, hwnd: HWND) -> HRESULT,
    pub GetVideoWindow: unsafe extern "system" fn(this: *mut c_void, hwnd: *mut HWND) -> HRESULT,
    pub RepaintVideo: unsafe extern "system" fn(this: *mut c_void) -> HRESULT,
    pub GetCurrentImage: *const c_void,
    pub SetBorderColor: unsafe extern "system" fn(this: *mut c_void, color: COLORREF) -> HRESULT,
    pub GetBorderColor: unsafe extern "system" fn(this: *mut c_void, color: *mut COLORREF) -> HRESULT,
    pub SetRenderingPrefs: unsafe extern "system" fn(this: *mut c_void, prefs: u32) -> HRESULT,
    pub GetRenderingPrefs: unsafe extern "system" fn(this: *mut c_void, prefs: *mut u32) -> HRESULT,
    pub SetFullscreen: unsafe extern "system" fn(this: *mut c_void, fullscreen: i32) -> HRESULT,
    pub GetFullscreen: unsafe extern "system" fn(this: *mut c_void, fullscreen: *mut i32) -> HRESULT,
}
