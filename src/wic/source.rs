use alloc::{vec, vec::Vec};
use core::ffi::c_void;

use windows::core::{GUID, HRESULT, IUnknown, IUnknown_Vtbl, Interface};

use crate::co::{DitherType, InterpolationMode, PaletteType};
use crate::com::{from_out, hr_ok};
use crate::error::{Result, WinError};
use crate::structs::WICRect;

com_interface! {
    /// [`IWICBitmapSource`](https://learn.microsoft.com/en-us/windows/win32/api/wincodec/nn-wincodec-iwicbitmapsource)
    /// COM interface: anything pixels can be read from.
    IWICBitmapSource: IUnknown,
    vtable: IWICBitmapSource_Vtbl,
    iid: 0x00000120_a8f2_4877_ba0a_fd2b6645fb94,
}

com_interface! {
    /// [`IWICBitmapFrameDecode`](https://learn.microsoft.com/en-us/windows/win32/api/wincodec/nn-wincodec-iwicbitmapframedecode)
    /// COM interface: one decoded frame of an image file.
    IWICBitmapFrameDecode: IWICBitmapSource,
    vtable: IWICBitmapFrameDecode_Vtbl,
    iid: 0x3b16811b_6a43_4ec9_a813_3d930c13b940,
}

com_interface! {
    /// [`IWICBitmap`](https://learn.microsoft.com/en-us/windows/win32/api/wincodec/nn-wincodec-iwicbitmap)
    /// COM interface: a bitmap held in memory.
    IWICBitmap: IWICBitmapSource,
    vtable: IWICBitmap_Vtbl,
    iid: 0x00000121_a8f2_4877_ba0a_fd2b6645fb94,
}

com_interface! {
    /// [`IWICFormatConverter`](https://learn.microsoft.com/en-us/windows/win32/api/wincodec/nn-wincodec-iwicformatconverter)
    /// COM interface.
    IWICFormatConverter: IWICBitmapSource,
    vtable: IWICFormatConverter_Vtbl,
    iid: 0x00000301_a8f2_4877_ba0a_fd2b6645fb94,
}

com_interface! {
    /// [`IWICBitmapScaler`](https://learn.microsoft.com/en-us/windows/win32/api/wincodec/nn-wincodec-iwicbitmapscaler)
    /// COM interface.
    IWICBitmapScaler: IWICBitmapSource,
    vtable: IWICBitmapScaler_Vtbl,
    iid: 0x00000302_a8f2_4877_ba0a_fd2b6645fb94,
}

impl IWICBitmapSource {
    /// Returns `(width, height)` in pixels.
    pub fn GetSize(&self) -> Result<(u32, u32)> {
        let (mut width, mut height) = (0, 0);
        hr_ok(vcall!(self, GetSize(&mut width, &mut height)), "GetSize")?;
        Ok((width, height))
    }

    /// Returns one of the `pixel_format` GUIDs.
    pub fn GetPixelFormat(&self) -> Result<GUID> {
        let mut format = GUID::zeroed();
        hr_ok(vcall!(self, GetPixelFormat(&mut format)), "GetPixelFormat")?;
        Ok(format)
    }

    /// Returns `(dpi_x, dpi_y)`.
    pub fn GetResolution(&self) -> Result<(f64, f64)> {
        let (mut dpi_x, mut dpi_y) = (0.0, 0.0);
        hr_ok(vcall!(self, GetResolution(&mut dpi_x, &mut dpi_y)), "GetResolution")?;
        Ok((dpi_x, dpi_y))
    }

    /// Copies the pixels of `rect`, or of the whole source, into `buf`,
    /// rows `stride` bytes apart.
    pub fn CopyPixels(&self, rect: Option<&WICRect>, stride: u32, buf: &mut [u8]) -> Result<()> {
        let rect = rect.map_or(core::ptr::null(), |rc| rc as *const WICRect);
        let len = u32::try_from(buf.len()).map_err(|_| WinError::Msg("CopyPixels buffer exceeds 4 GiB"))?;
        hr_ok(vcall!(self, CopyPixels(rect, stride, len, buf.as_mut_ptr())), "CopyPixels")
    }

    /// Copies the whole source into a packed buffer, `bytes_per_pixel`
    /// matching the current pixel format.
    pub fn copy_all_pixels(&self, bytes_per_pixel: u32) -> Result<Vec<u8>> {
        let (width, height) = self.GetSize()?;
        let stride = width
            .checked_mul(bytes_per_pixel)
            .ok_or(WinError::Msg("image row exceeds 4 GiB"))?;
        let total = (stride as usize)
            .checked_mul(height as usize)
            .ok_or(WinError::Msg("image exceeds address space"))?;

        let mut buf = vec![0u8; total];
        self.CopyPixels(None, stride, &mut buf)?;
        Ok(buf)
    }
}

impl IWICBitmap {
    /// Sets the resolution reported by `GetResolution`.
    pub fn SetResolution(&self, dpi_x: f64, dpi_y: f64) -> Result<()> {
        hr_ok(vcall!(self, SetResolution(dpi_x, dpi_y)), "SetResolution")
    }
}

impl IWICBitmapFrameDecode {
    /// The embedded thumbnail. Fails with `WINCODEC_ERR_CODECNOTHUMBNAIL`
    /// when the frame has none.
    pub fn GetThumbnail(&self) -> Result<IWICBitmapSource> {
        let mut raw = core::ptr::null_mut();
        hr_ok(vcall!(self, GetThumbnail(&mut raw)), "GetThumbnail")?;
        unsafe { from_out(raw, "GetThumbnail") }
    }
}

impl IWICFormatConverter {
    /// Sets up conversion of `source` into pixel format `dst`. No custom
    /// palette is passed, so `palette` must not be `Custom` for indexed
    /// targets.
    pub fn Initialize(
        &self,
        source: &IWICBitmapSource,
        dst: &GUID,
        dither: DitherType,
        alpha_threshold_percent: f64,
        palette: PaletteType,
    ) -> Result<()> {
        let hr = vcall!(
            self,
            Initialize(
                source.as_raw(),
                dst,
                dither as u32,
                core::ptr::null_mut(),
                alpha_threshold_percent,
                palette as u32,
            )
        );
        hr_ok(hr, "Initialize")
    }

    /// Whether this converter supports `src` to `dst`.
    pub fn CanConvert(&self, src: &GUID, dst: &GUID) -> Result<bool> {
        let mut can = 0;
        hr_ok(vcall!(self, CanConvert(src, dst, &mut can)), "CanConvert")?;
        Ok(can != 0)
    }
}

impl IWICBitmapScaler {
    /// Sets up resampling of `source` to `width` by `height`.
    pub fn Initialize(&self, source: &IWICBitmapSource, width: u32, height: u32, mode: InterpolationMode) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(WinError::Msg("scaler target size must be non-zero"));
        }
        hr_ok(vcall!(self, Initialize(source.as_raw(), width, height, mode as u32)), "Initialize")
    }
}

#[repr(C)]
pub struct IWICBitmapSource_Vtbl {
    pub base__: IUnknown_Vtbl,
    pub GetSize: unsafe extern "system" fn(this: *mut c_void, width: *mut u32, height: *mut u32) -> HRESULT,
    pub GetPixelFormat: unsafe extern "system" fn(this: *mut c_void, format: *mut GUID) -> HRESULT,
    pub GetResolution: unsafe extern "system" fn(this: *mut c_void, dpi_x: *mut f64, dpi_y: *mut f64) -> HRESULT,
    pub CopyPalette: *const c_void,
    pub CopyPixels: unsafe extern "system" fn(
        this: *mut c_void,
        rect: *const WICRect,
        stride: u32,
        size: u32,
        buf: *mut u8,
    ) -> HRESULT,
}

#[repr(C)]
pub struct IWICBitmapFrameDecode_Vtbl {
    pub base__: IWICBitmapSource_Vtbl,
    pub GetMetadataQueryReader: *const c_void,
    pub GetColorContexts: *const c_void,
    pub GetThumbnail: unsafe extern "system" fn(this: *mut c_void, thumb: *mut *mut c_void) -> HRESULT,
}

#[repr(C)]
pub struct IWICBitmap_Vtbl {
    pub base__: IWICBitmapSource_Vtbl,
    pub Lock: *const c_void,
    pub SetPalette: *const c_void,
    pub SetResolution: unsafe extern "system" fn(this: *mut c_void, dpi_x: f64, dpi_y: f64) -> HRESULT,
}

#[repr(C)]
pub struct IWICFormatConverter_Vtbl {
    pub base__: IWICBitmapSource_Vtbl,
    pub Initialize: unsafe extern "system" fn(
        this: *mut c_void,
        source: *mut c_void,
        dst: *const GUID,
        dither: u32,
        palette: *mut c_void,
        alpha_threshold: f64,
        palette_type: u32,
    ) -> HRESULT,
    pub CanConvert:
        unsafe extern "system" fn(this: *mut c_void, src: *const GUID, dst: *const GUID, can: *mut i32) -> HRESULT,
}

#[repr(C)]
pub struct IWICBitmapScaler_Vtbl {
    pub base__: IWICBitmapSource_Vtbl,
    pub Initialize: unsafe extern "system" fn(
        this: *mut c_void,
        source: *mut c_void,
        width: u32,
        height: u32,
        mode: u32,
    ) -> HRESULT,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::co::{E_INVALIDARG, pixel_format};
    use crate::com::fake::{self, FakeCom};
    use core::cell::Cell;
    use core::mem::offset_of;

    const SLOT: usize = size_of::<usize>();

    #[test]
    fn test_vtable_slots() {
        assert_eq!(offset_of!(IWICBitmapSource_Vtbl, GetSize), 3 * SLOT);
        assert_eq!(offset_of!(IWICBitmapSource_Vtbl, CopyPixels), 7 * SLOT);
        assert_eq!(offset_of!(IWICBitmapFrameDecode_Vtbl, GetThumbnail), 10 * SLOT);
        assert_eq!(offset_of!(IWICBitmap_Vtbl, SetResolution), 10 * SLOT);
        assert_eq!(offset_of!(IWICFormatConverter_Vtbl, Initialize), 8 * SLOT);
        assert_eq!(offset_of!(IWICFormatConverter_Vtbl, CanConvert), 9 * SLOT);
        assert_eq!(offset_of!(IWICBitmapScaler_Vtbl, Initialize), 8 * SLOT);
    }

    /// Fake 32 bpp BGRA image whose pixel at `(x, y)` is `[x, y, 0, 255]`.
    pub(crate) struct Image {
        pub width: u32,
        pub height: u32,
        pub copies: Cell<u32>,
    }

    fn image(this: *mut c_void) -> &'static Image {
        &unsafe { FakeCom::<Image>::from_this(this) }.state
    }

    unsafe extern "system" fn get_size(this: *mut c_void, w: *mut u32, h: *mut u32) -> HRESULT {
        let img = image(this);
        unsafe { (*w, *h) = (img.width, img.height) };
        HRESULT(0)
    }

    unsafe extern "system" fn get_format(_: *mut c_void, format: *mut GUID) -> HRESULT {
        unsafe { *format = pixel_format::BGRA_32BPP };
        HRESULT(0)
    }

    unsafe extern "system" fn get_resolution(_: *mut c_void, x: *mut f64, y: *mut f64) -> HRESULT {
        unsafe { (*x, *y) = (96.0, 72.0) };
        HRESULT(0)
    }

    unsafe extern "system" fn copy_pixels(
        this: *mut c_void,
        rect: *const WICRect,
        stride: u32,
        size: u32,
        buf: *mut u8,
    ) -> HRESULT {
        let img = image(this);
        let rc = match unsafe { rect.as_ref() } {
            Some(rc) => *rc,
            None => WICRect::new(0, 0, img.width as i32, img.height as i32),
        };
        let needed = stride as u64 * (rc.Height as u64 - 1) + rc.Width as u64 * 4;
        if rc.X + rc.Width > img.width as i32 || rc.Y + rc.Height > img.height as i32 || needed > size as u64 {
            return HRESULT(E_INVALIDARG);
        }

        let buf = unsafe { core::slice::from_raw_parts_mut(buf, size as usize) };
        for row in 0..rc.Height {
            for col in 0..rc.Width {
                let at = (row as u32 * stride + col as u32 * 4) as usize;
                buf[at..at + 4].copy_from_slice(&[(rc.X + col) as u8, (rc.Y + row) as u8, 0, 255]);
            }
        }
        img.copies.set(img.copies.get() + 1);
        HRESULT(0)
    }

    pub(crate) fn source_vtbl() -> IWICBitmapSource_Vtbl {
        IWICBitmapSource_Vtbl {
            base__: fake::unknown_vtbl(),
            GetSize: get_size,
            GetPixelFormat: get_format,
            GetResolution: get_resolution,
            CopyPalette: core::ptr::null(),
            CopyPixels: copy_pixels,
        }
    }

    pub(crate) fn fake_image(width: u32, height: u32) -> (IWICBitmapSource, &'static FakeCom<Image>) {
        let (raw, obj) = FakeCom::create(source_vtbl(), Image { width, height, copies: Cell::new(0) });
        (fake::wrap(raw), obj)
    }

    #[test]
    fn test_source_properties() -> Result<()> {
        let (img, _) = fake_image(3, 2);
        assert_eq!(img.GetSize()?, (3, 2));
        assert_eq!(img.GetPixelFormat()?, pixel_format::BGRA_32BPP);
        assert_eq!(img.GetResolution()?, (96.0, 72.0));
        Ok(())
    }

    #[test]
    fn test_copy_all_pixels_is_packed() -> Result<()> {
        let (img, obj) = fake_image(3, 2);
        let pixels = img.copy_all_pixels(4)?;
        assert_eq!(pixels.len(), 24);
        assert_eq!(pixels[..4], [0, 0, 0, 255]);
        // Second row, third pixel.
        assert_eq!(pixels[20..24], [2, 1, 0, 255]);
        assert_eq!(obj.state.copies.get(), 1);
        Ok(())
    }

    #[test]
    fn test_copy_sub_rectangle() -> Result<()> {
        let (img, _) = fake_image(4, 4);
        let mut buf = [0u8; 8];
        img.CopyPixels(Some(&WICRect::new(1, 2, 2, 1)), 8, &mut buf)?;
        assert_eq!(buf, [1, 2, 0, 255, 2, 2, 0, 255]);

        let mut short = [0u8; 4];
        let err = img.CopyPixels(Some(&WICRect::new(0, 0, 2, 1)), 8, &mut short).unwrap_err();
        assert!(matches!(err, WinError::Com("CopyPixels", E_INVALIDARG)));
        Ok(())
    }

    #[test]
    fn test_frame_derefs_to_source() -> Result<()> {
        let vtbl = IWICBitmapFrameDecode_Vtbl {
            base__: source_vtbl(),
            GetMetadataQueryReader: core::ptr::null(),
            GetColorContexts: core::ptr::null(),
            GetThumbnail: {
                unsafe extern "system" fn no_thumb(_: *mut c_void, out: *mut *mut c_void) -> HRESULT {
                    unsafe { *out = core::ptr::null_mut() };
                    HRESULT(crate::co::WINCODEC_ERR_CODECNOTHUMBNAIL)
                }
                no_thumb
            },
        };
        let (raw, _) = FakeCom::create(vtbl, Image { width: 5, height: 1, copies: Cell::new(0) });
        let frame: IWICBitmapFrameDecode = fake::wrap(raw);

        assert_eq!(frame.GetSize()?, (5, 1));
        assert!(matches!(
            frame.GetThumbnail(),
            Err(WinError::Com("GetThumbnail", crate::co::WINCODEC_ERR_CODECNOTHUMBNAIL))
        ));
        Ok(())
    }

    struct Scaler {
        target: Cell<(u32, u32, u32)>,
        source: Cell<*mut c_void>,
    }

    unsafe extern "system" fn scaler_init(this: *mut c_void, source: *mut c_void, w: u32, h: u32, mode: u32) -> HRESULT {
        let state = &unsafe { FakeCom::<Scaler>::from_this(this) }.state;
        state.target.set((w, h, mode));
        state.source.set(source);
        HRESULT(0)
    }

    #[test]
    fn test_scaler_forwards_arguments() -> Result<()> {
        let (img, _) = fake_image(8, 8);
        let vtbl = IWICBitmapScaler_Vtbl { base__: source_vtbl(), Initialize: scaler_init };
        let (raw, obj) = FakeCom::create(vtbl, Scaler { target: Cell::new((0, 0, 0)), source: Cell::new(core::ptr::null_mut()) });
        let scaler: IWICBitmapScaler = fake::wrap(raw);

        scaler.Initialize(&img, 4, 2, InterpolationMode::Fant)?;
        assert_eq!(obj.state.target.get(), (4, 2, InterpolationMode::Fant as u32));
        assert_eq!(obj.state.source.get(), img.as_raw());

        assert!(matches!(scaler.Initialize(&img, 0, 2, InterpolationMode::Linear), Err(WinError::Msg(_))));
        Ok(())
    }

    struct Converter {
        dst: Cell<GUID>,
        threshold: Cell<f64>,
    }

    unsafe extern "system" fn converter_init(
        this: *mut c_void,
        _: *mut c_void,
        dst: *const GUID,
        _: u32,
        palette: *mut c_void,
        threshold: f64,
        _: u32,
    ) -> HRESULT {
        if !palette.is_null() {
            return HRESULT(E_INVALIDARG);
        }
        let state = &unsafe { FakeCom::<Converter>::from_this(this) }.state;
        state.dst.set(unsafe { *dst });
        state.threshold.set(threshold);
        HRESULT(0)
    }

    unsafe extern "system" fn can_convert(_: *mut c_void, src: *const GUID, dst: *const GUID, can: *mut i32) -> HRESULT {
        let (src, dst) = unsafe { (*src, *dst) };
        unsafe { *can = (src == pixel_format::BGRA_32BPP && dst != pixel_format::DONT_CARE) as i32 };
        HRESULT(0)
    }

    #[test]
    fn test_converter() -> Result<()> {
        let (img, _) = fake_image(1, 1);
        let vtbl = IWICFormatConverter_Vtbl {
            base__: source_vtbl(),
            Initialize: converter_init,
            CanConvert: can_convert,
        };
        let (raw, obj) = FakeCom::create(vtbl, Converter { dst: Cell::new(GUID::zeroed()), threshold: Cell::new(0.0) });
        let converter: IWICFormatConverter = fake::wrap(raw);

        assert!(converter.CanConvert(&pixel_format::BGRA_32BPP, &pixel_format::GRAY_8BPP)?);
        assert!(!converter.CanConvert(&pixel_format::RGB_24BPP, &pixel_format::GRAY_8BPP)?);

        converter.Initialize(&img, &pixel_format::PBGRA_32BPP, DitherType::None, 0.0, PaletteType::MedianCut)?;
        assert_eq!(obj.state.dst.get(), pixel_format::PBGRA_32BPP);
        assert_eq!(obj.state.threshold.get(), 0.0);
        Ok(())
    }
}
