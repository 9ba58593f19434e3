use core::ffi::c_void;

use windows::core::{GUID, HRESULT, IUnknown, IUnknown_Vtbl};

use crate::co::{AlphaChannelOption, ClsCtx, DecodeOptions, DitherType, InterpolationMode, PaletteType, WIC_GENERIC_READ};
use crate::com::{create_instance, from_out, hr_ok};
use crate::error::{Result, WinError};
use crate::handles::HBITMAP;
use crate::string::WString;

use super::{IWICBitmap, IWICBitmapDecoder, IWICBitmapScaler, IWICBitmapSource, IWICFormatConverter};

/// `CLSID_WICImagingFactory`.
pub const CLSID_WIC_IMAGING_FACTORY: GUID = GUID::from_u128(0xcacaf262_9370_4615_a13b_9f5539da4c0a);

com_interface! {
    /// [`IWICImagingFactory`](https://learn.microsoft.com/en-us/windows/win32/api/wincodec/nn-wincodec-iwicimagingfactory)
    /// COM interface: the entry point creating every other WIC object.
    IWICImagingFactory: IUnknown,
    vtable: IWICImagingFactory_Vtbl,
    iid: 0xec5ec8a9_c395_4314_9c77_54d7a935ff70,
}

impl IWICImagingFactory {
    /// Creates the in-process factory. COM must be initialized.
    pub fn create() -> Result<Self> {
        let factory = create_instance(&CLSID_WIC_IMAGING_FACTORY, ClsCtx::INPROC_SERVER)?;
        log::trace!("WIC imaging factory created");
        Ok(factory)
    }

    /// Opens an image file for reading, letting WIC pick the decoder.
    pub fn CreateDecoderFromFilename(&self, path: &str, options: DecodeOptions) -> Result<IWICBitmapDecoder> {
        let path = WString::from_str(path);
        let mut raw = core::ptr::null_mut();
        let hr = vcall!(
            self,
            CreateDecoderFromFilename(path.as_ptr(), core::ptr::null(), WIC_GENERIC_READ, options as u32, &mut raw)
        );
        hr_ok(hr, "CreateDecoderFromFilename")?;
        unsafe { from_out(raw, "CreateDecoderFromFilename") }
    }

    /// Creates an uninitialized decoder for a container format.
    pub fn CreateDecoder(&self, container: &GUID) -> Result<IWICBitmapDecoder> {
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, CreateDecoder(container, core::ptr::null(), &mut raw)), "CreateDecoder")?;
        unsafe { from_out(raw, "CreateDecoder") }
    }

    iface_getter! {
        CreateFormatConverter => CreateFormatConverter -> IWICFormatConverter
    }

    iface_getter! {
        CreateBitmapScaler => CreateBitmapScaler -> IWICBitmapScaler
    }

    /// Copies `pixels`, rows `stride` bytes apart, into a new bitmap.
    pub fn CreateBitmapFromMemory(
        &self,
        width: u32,
        height: u32,
        format: &GUID,
        stride: u32,
        pixels: &[u8],
    ) -> Result<IWICBitmap> {
        let len = u32::try_from(pixels.len()).map_err(|_| WinError::Msg("bitmap buffer exceeds 4 GiB"))?;
        let mut raw = core::ptr::null_mut();
        let hr = vcall!(
            self,
            CreateBitmapFromMemory(width, height, format, stride, len, pixels.as_ptr(), &mut raw)
        );
        hr_ok(hr, "CreateBitmapFromMemory")?;
        unsafe { from_out(raw, "CreateBitmapFromMemory") }
    }

    /// Copies a GDI bitmap into a new WIC bitmap. Palette-based bitmaps
    /// are not supported, since no palette is passed.
    pub fn CreateBitmapFromHBITMAP(&self, hbmp: HBITMAP, alpha: AlphaChannelOption) -> Result<IWICBitmap> {
        let mut raw = core::ptr::null_mut();
        let hr = vcall!(
            self,
            CreateBitmapFromHBITMAP(hbmp.ptr(), core::ptr::null_mut(), alpha as u32, &mut raw)
        );
        hr_ok(hr, "CreateBitmapFromHBITMAP")?;
        unsafe { from_out(raw, "CreateBitmapFromHBITMAP") }
    }

    /// Wraps `source` in a converter to `format`, without dithering.
    pub fn convert(&self, source: &IWICBitmapSource, format: &GUID) -> Result<IWICFormatConverter> {
        let converter = self.CreateFormatConverter()?;
        converter.Initialize(source, format, DitherType::None, 0.0, PaletteType::MedianCut)?;
        Ok(converter)
    }

    /// Wraps `source` in a scaler to `width` by `height`.
    pub fn scale(
        &self,
        source: &IWICBitmapSource,
        width: u32,
        height: u32,
        mode: InterpolationMode,
    ) -> Result<IWICBitmapScaler> {
        let scaler = self.CreateBitmapScaler()?;
        scaler.Initialize(source, width, height, mode)?;
        Ok(scaler)
    }
}

#[repr(C)]
pub struct IWICImagingFactory_Vtbl {
    pub base__: IUnknown_Vtbl,
    pub CreateDecoderFromFilename: unsafe extern "system" fn(
        this: *mut c_void,
        path: *const u16,
        vendor: *const GUID,
        access: u32,
        options: u32,
        decoder: *mut *mut c_void,
    ) -> HRESULT,
    pub CreateDecoderFromStream: *const c_void,
    pub CreateDecoderFromFileHandle: *const c_void,
    pub CreateComponentInfo: *const c_void,
    pub CreateDecoder: unsafe extern "system" fn(
        this: *mut c_void,
        container: *const GUID,
        vendor: *const GUID,
        decoder: *mut *mut c_void,
    ) -> HRESULT,
    pub CreateEncoder: *const c_void,
    pub CreatePalette: *const c_void,
    pub CreateFormatConverter: unsafe extern "system" fn(this: *mut c_void, converter: *mut *mut c_void) -> HRESULT,
    pub CreateBitmapScaler: unsafe extern "system" fn(this: *mut c_void, scaler: *mut *mut c_void) -> HRESULT,
    pub CreateBitmapClipper: *const c_void,
    pub CreateBitmapFlipRotator: *const c_void,
    pub CreateStream: *const c_void,
    pub CreateColorContext: *const c_void,
    pub CreateColorTransformer: *const c_void,
    pub CreateBitmap: *const c_void,
    pub CreateBitmapFromSource: *const c_void,
    pub CreateBitmapFromSourceRect: *const c_void,
    pub CreateBitmapFromMemory: unsafe extern "system" fn(
        this: *mut c_void,
        width: u32,
        height: u32,
        format: *const GUID,
        stride: u32,
        size: u32,
        pixels: *const u8,
        bitmap: *mut *mut c_void,
    ) -> HRESULT,
    pub CreateBitmapFromHBITMAP: unsafe extern "system" fn(
        this: *mut c_void,
        hbmp: *mut c_void,
        palette: *mut c_void,
        alpha: u32,
        bitmap: *mut *mut c_void,
    ) -> HRESULT,
    pub CreateBitmapFromHICON: *const c_void,
    pub CreateComponentEnumerator: *const c_void,
    pub CreateFastMetadataEncoderFromDecoder: *const c_void,
    pub CreateFastMetadataEncoderFromFrameDecode: *const c_void,
    pub CreateQueryWriter: *const c_void,
    pub CreateQueryWriterFromReader: *const c_void,
}
