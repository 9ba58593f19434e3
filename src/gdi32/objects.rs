use core::ffi::c_void;

use windows_sys::Win32::Graphics::Gdi::{
    CreateCompatibleBitmap, CreateDIBSection, CreateFontIndirectW, CreatePen, CreateRectRgn, CreateSolidBrush,
    DeleteObject, GetObjectW, GetStockObject,
};

use crate::co::{DIB_RGB_COLORS, PenStyle, StockObject};
use crate::error::{Result, WinError};
use crate::guard::{GdiGuard, Guard};
use crate::handles::{GdiObject, HBITMAP, HBRUSH, HDC, HFONT, HGDIOBJ, HPEN, HRGN};
use crate::structs::{BITMAP, BITMAPINFO, COLORREF, LOGFONTW};

/// Returns a stock object. Stock objects are never deleted.
pub fn stock_object(which: StockObject) -> Result<HGDIOBJ> {
    let obj = unsafe { GetStockObject(which as _) };
    if obj.is_null() {
        return Err(WinError::Msg("GetStockObject failed"));
    }
    Ok(HGDIOBJ::from_ptr(obj))
}

pub fn create_solid_brush(color: COLORREF) -> Result<GdiGuard<HBRUSH>> {
    let hbr = unsafe { CreateSolidBrush(color.0) };
    if hbr.is_null() {
        return Err(WinError::Msg("CreateSolidBrush failed"));
    }
    Ok(unsafe { Guard::new(HBRUSH::from_ptr(hbr)) })
}

pub fn create_pen(style: PenStyle, width: i32, color: COLORREF) -> Result<GdiGuard<HPEN>> {
    let hpen = unsafe { CreatePen(style as _, width, color.0) };
    if hpen.is_null() {
        return Err(WinError::Msg("CreatePen failed"));
    }
    Ok(unsafe { Guard::new(HPEN::from_ptr(hpen)) })
}

pub fn create_font_indirect(lf: &LOGFONTW) -> Result<GdiGuard<HFONT>> {
    let hfont = unsafe { CreateFontIndirectW((lf as *const LOGFONTW).cast()) };
    if hfont.is_null() {
        return Err(WinError::Msg("CreateFontIndirectW failed"));
    }
    Ok(unsafe { Guard::new(HFONT::from_ptr(hfont)) })
}

/// Creates a device-dependent bitmap matching the format of `hdc`.
pub fn create_compatible_bitmap(hdc: HDC, width: i32, height: i32) -> Result<GdiGuard<HBITMAP>> {
    let hbmp = unsafe { CreateCompatibleBitmap(hdc.ptr(), width, height) };
    if hbmp.is_null() {
        return Err(WinError::Msg("CreateCompatibleBitmap failed"));
    }
    Ok(unsafe { Guard::new(HBITMAP::from_ptr(hbmp)) })
}

/// A DIB section together with the address of its pixel memory.
///
/// The pixel memory belongs to the bitmap and is freed when `bitmap` is
/// deleted.
#[derive(Debug)]
pub struct DibSection {
    pub bitmap: GdiGuard<HBITMAP>,
    pub bits: *mut c_void,
}

impl DibSection {
    /// Views the pixels as 32-bit values. Valid for 32 bpp DIBs only.
    ///
    /// # Safety
    ///
    /// The DIB must have been created with 32 bits per pixel and exactly
    /// `width * height` pixels, and GDI must not be drawing into it.
    pub unsafe fn pixels_mut(&mut self, width: usize, height: usize) -> &mut [u32] {
        unsafe { core::slice::from_raw_parts_mut(self.bits.cast(), width * height) }
    }
}

/// Creates a DIB section with RGB color usage.
pub fn create_dib_section(hdc: HDC, info: &BITMAPINFO) -> Result<DibSection> {
    let mut bits = core::ptr::null_mut();
    let hbmp = unsafe {
        CreateDIBSection(
            hdc.ptr(),
            (info as *const BITMAPINFO).cast(),
            DIB_RGB_COLORS,
            &mut bits,
            core::ptr::null_mut(),
            0,
        )
    };
    if hbmp.is_null() {
        return Err(WinError::last("CreateDIBSection"));
    }

    let bitmap = unsafe { Guard::new(HBITMAP::from_ptr(hbmp)) };
    if bits.is_null() {
        return Err(WinError::NullPointer("CreateDIBSection"));
    }
    Ok(DibSection { bitmap, bits })
}

pub fn create_rect_rgn(left: i32, top: i32, right: i32, bottom: i32) -> Result<GdiGuard<HRGN>> {
    let hrgn = unsafe { CreateRectRgn(left, top, right, bottom) };
    if hrgn.is_null() {
        return Err(WinError::Msg("CreateRectRgn failed"));
    }
    Ok(unsafe { Guard::new(HRGN::from_ptr(hrgn)) })
}

/// Deletes a GDI object not held by a guard.
pub fn delete_object<T: GdiObject>(obj: T) -> Result<()> {
    match unsafe { DeleteObject(obj.as_gdi().ptr()) } {
        0 => Err(WinError::Msg("DeleteObject failed")),
        _ => Ok(()),
    }
}

impl HBITMAP {
    /// Reads the bitmap header with `GetObjectW`.
    pub fn GetObject(self) -> Result<BITMAP> {
        let mut bmp = BITMAP::default();
        let size = size_of::<BITMAP>() as i32;
        match unsafe { GetObjectW(self.ptr(), size, (&mut bmp as *mut BITMAP).cast()) } {
            0 => Err(WinError::Msg("GetObjectW failed")),
            _ => Ok(bmp),
        }
    }
}

impl LOGFONTW {
    /// Font description with face name, height in logical units and weight.
    pub fn new(face: &str, height: i32, weight: i32) -> Self {
        let mut lf = Self {
            lfHeight: height,
            lfWeight: weight,
            lfCharSet: crate::co::DEFAULT_CHARSET,
            lfQuality: crate::co::CLEARTYPE_QUALITY,
            ..Default::default()
        };
        lf.set_face_name(face);
        lf
    }
}

#[cfg(all(test, windows))]
mod tests {
    use super::*;
    use crate::co::FW_BOLD;

    #[test]
    fn test_stock_objects_are_shared() -> Result<()> {
        let a = stock_object(StockObject::BlackBrush)?;
        let b = stock_object(StockObject::BlackBrush)?;
        assert_eq!(a, b);
        assert_ne!(a, stock_object(StockObject::WhitePen)?);
        Ok(())
    }

    #[test]
    fn test_object_lifecycle() -> Result<()> {
        let brush = create_solid_brush(COLORREF::rgb(10, 20, 30))?;
        let pen = create_pen(PenStyle::Dash, 1, COLORREF::rgb(0, 0, 0))?;
        let font = create_font_indirect(&LOGFONTW::new("Segoe UI", -12, FW_BOLD))?;
        let rgn = create_rect_rgn(0, 0, 10, 10)?;
        brush.close()?;
        pen.close()?;
        font.close()?;
        delete_object(rgn.leak())
    }

    #[test]
    fn test_dib_section_header() -> Result<()> {
        let mut dib = create_dib_section(HDC::NULL, &BITMAPINFO::top_down_32bpp(4, 3))?;
        let bmp = dib.bitmap.GetObject()?;
        assert_eq!((bmp.bmWidth, bmp.bmHeight, bmp.bmBitsPixel), (4, 3, 32));
        assert_eq!(bmp.bmWidthBytes, 16);

        let pixels = unsafe { dib.pixels_mut(4, 3) };
        pixels.fill(0x00FF_0000);
        assert_eq!(pixels.len(), 12);
        Ok(())
    }

    #[test]
    fn test_logfont_builder() {
        let lf = LOGFONTW::new("Consolas", -14, FW_BOLD);
        assert_eq!(lf.face_name(), "Consolas");
        assert_eq!(lf.lfWeight, 700);
        assert_eq!(lf.lfHeight, -14);
    }
}
