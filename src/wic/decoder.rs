use alloc::vec::Vec;
use core::ffi::c_void;

use windows::core::{GUID, HRESULT, IUnknown, IUnknown_Vtbl};

use crate::com::{from_out, hr_ok};
use crate::error::Result;

use super::{IWICBitmapFrameDecode, IWICBitmapSource};

com_interface! {
    /// [`IWICBitmapDecoder`](https://learn.microsoft.com/en-us/windows/win32/api/wincodec/nn-wincodec-iwicbitmapdecoder)
    /// COM interface: an opened image container with one or more frames.
    IWICBitmapDecoder: IUnknown,
    vtable: IWICBitmapDecoder_Vtbl,
    iid: 0x9edde9e7_8dee_47ea_99df_e6faf2ed44bf,
}

impl IWICBitmapDecoder {
    /// Returns one of the `container_format` GUIDs.
    pub fn GetContainerFormat(&self) -> Result<GUID> {
        let mut format = GUID::zeroed();
        hr_ok(vcall!(self, GetContainerFormat(&mut format)), "GetContainerFormat")?;
        Ok(format)
    }

    pub fn GetFrameCount(&self) -> Result<u32> {
        let mut count = 0;
        hr_ok(vcall!(self, GetFrameCount(&mut count)), "GetFrameCount")?;
        Ok(count)
    }

    /// Decodes frame `index`, zero-based.
    pub fn GetFrame(&self, index: u32) -> Result<IWICBitmapFrameDecode> {
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, GetFrame(index, &mut raw)), "GetFrame")?;
        unsafe { from_out(raw, "GetFrame") }
    }

    iface_getter! {
        /// Container-level preview image, if the format has one.
        GetPreview => GetPreview -> IWICBitmapSource
    }

    iface_getter! {
        /// Container-level thumbnail, if the format has one.
        GetThumbnail => GetThumbnail -> IWICBitmapSource
    }

    /// Decodes every frame in order.
    pub fn frames(&self) -> Result<Vec<IWICBitmapFrameDecode>> {
        (0..self.GetFrameCount()?).map(|i| self.GetFrame(i)).collect()
    }
}

#[repr(C)]
pub struct IWICBitmapDecoder_Vtbl {
    pub base__: IUnknown_Vtbl,
    pub QueryCapability: *const c_void,
    pub Initialize: *const c_void,
    pub GetContainerFormat: unsafe extern "system" fn(this: *mut c_void, format: *mut GUID) -> HRESULT,
    pub GetDecoderInfo: *const c_void,
    pub CopyPalette: *const c_void,
    pub GetMetadataQueryReader: *const c_void,
    pub GetPreview: unsafe extern "system" fn(this: *mut c_void, preview: *mut *mut c_void) -> HRESULT,
    pub GetColorContexts: *const c_void,
    pub GetThumbnail: unsafe extern "system" fn(this: *mut c_void, thumb: *mut *mut c_void) -> HRESULT,
    pub GetFrameCount: unsafe extern "system" fn(this: *mut c_void, count: *mut u32) -> HRESULT,
    pub GetFrame: unsafe extern "system" fn(this: *mut c_void, index: u32, frame: *mut *mut c_void) -> HRESULT,
}
