use windows_sys::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleDC, Ellipse, FillRect, GetDeviceCaps, GetPixel, GetTextExtentPoint32W, LineTo,
    MoveToEx, Rectangle, RestoreDC, SaveDC, SelectObject, SetBkColor, SetBkMode, SetPixel, SetTextColor,
    TextOutW,
};

use crate::co::{BkMode, DeviceCap, HGDI_ERROR, Rop};
use crate::error::{Result, WinError};
use crate::guard::{Guard, MemDcGuard, MemoryDc, SavedDc, SavedDcGuard, SelectGuard, Selection};
use crate::handles::{GdiObject, HBRUSH, HDC, HGDIOBJ};
use crate::structs::{COLORREF, POINT, RECT, SIZE};

/// Creates a memory DC compatible with `hdc`, or with the screen for
/// `HDC::NULL`. Deleted when the guard drops.
pub fn create_compatible_dc(hdc: HDC) -> Result<MemDcGuard> {
    let mem = unsafe { CreateCompatibleDC(hdc.ptr()) };
    if mem.is_null() {
        return Err(WinError::Msg("CreateCompatibleDC failed"));
    }
    Ok(unsafe { Guard::new(MemoryDc(HDC::from_ptr(mem))) })
}

fn bool_ok(ret: i32, api: &'static str) -> Result<()> {
    match ret {
        0 => Err(WinError::Msg(api)),
        _ => Ok(()),
    }
}

fn color_ok(ret: u32, api: &'static str) -> Result<COLORREF> {
    match COLORREF(ret) {
        COLORREF::INVALID => Err(WinError::Msg(api)),
        color => Ok(color),
    }
}

impl HDC {
    /// Selects `obj` into the DC. The previous object is selected back when
    /// the guard drops, so the guard must drop before `obj` is deleted.
    pub fn SelectObject<T: GdiObject>(self, obj: T) -> Result<SelectGuard> {
        let prev = unsafe { SelectObject(self.ptr(), obj.as_gdi().ptr()) };
        if prev.is_null() || prev as isize == HGDI_ERROR {
            return Err(WinError::Msg("SelectObject failed"));
        }
        Ok(unsafe { Guard::new(Selection { hdc: self, prev: HGDIOBJ::from_ptr(prev) }) })
    }

    /// Copies a block of pixels from `src` at `src_pt`.
    pub fn BitBlt(self, dest: RECT, src: HDC, src_pt: POINT, rop: Rop) -> Result<()> {
        let ret = unsafe {
            BitBlt(
                self.ptr(),
                dest.left,
                dest.top,
                dest.width(),
                dest.height(),
                src.ptr(),
                src_pt.x,
                src_pt.y,
                rop as u32,
            )
        };
        bool_ok(ret, "BitBlt failed")
    }

    /// Fills `rc`, right and bottom edges excluded.
    pub fn FillRect(self, rc: &RECT, brush: HBRUSH) -> Result<()> {
        let ret = unsafe { FillRect(self.ptr(), (rc as *const RECT).cast(), brush.ptr()) };
        bool_ok(ret, "FillRect failed")
    }

    /// Outlines with the current pen and fills with the current brush.
    pub fn Rectangle(self, rc: RECT) -> Result<()> {
        let ret = unsafe { Rectangle(self.ptr(), rc.left, rc.top, rc.right, rc.bottom) };
        bool_ok(ret, "Rectangle failed")
    }

    pub fn Ellipse(self, bounds: RECT) -> Result<()> {
        let ret = unsafe { Ellipse(self.ptr(), bounds.left, bounds.top, bounds.right, bounds.bottom) };
        bool_ok(ret, "Ellipse failed")
    }

    /// Moves the current position. Returns the previous one.
    pub fn MoveToEx(self, x: i32, y: i32) -> Result<POINT> {
        let mut prev = POINT::default();
        let ret = unsafe { MoveToEx(self.ptr(), x, y, (&mut prev as *mut POINT).cast()) };
        bool_ok(ret, "MoveToEx failed").map(|_| prev)
    }

    pub fn LineTo(self, x: i32, y: i32) -> Result<()> {
        bool_ok(unsafe { LineTo(self.ptr(), x, y) }, "LineTo failed")
    }

    pub fn TextOut(self, x: i32, y: i32, text: &str) -> Result<()> {
        let wide: alloc::vec::Vec<u16> = text.encode_utf16().collect();
        let ret = unsafe { TextOutW(self.ptr(), x, y, wide.as_ptr(), wide.len() as i32) };
        bool_ok(ret, "TextOutW failed")
    }

    /// Size of `text` drawn with the selected font.
    pub fn GetTextExtentPoint32(self, text: &str) -> Result<SIZE> {
        let wide: alloc::vec::Vec<u16> = text.encode_utf16().collect();
        let mut size = SIZE::default();
        let ret = unsafe {
            GetTextExtentPoint32W(self.ptr(), wide.as_ptr(), wide.len() as i32, (&mut size as *mut SIZE).cast())
        };
        bool_ok(ret, "GetTextExtentPoint32W failed").map(|_| size)
    }

    /// Returns the previous text color.
    pub fn SetTextColor(self, color: COLORREF) -> Result<COLORREF> {
        color_ok(unsafe { SetTextColor(self.ptr(), color.0) }, "SetTextColor failed")
    }

    /// Returns the previous background color.
    pub fn SetBkColor(self, color: COLORREF) -> Result<COLORREF> {
        color_ok(unsafe { SetBkColor(self.ptr(), color.0) }, "SetBkColor failed")
    }

    /// Returns the previous mode.
    pub fn SetBkMode(self, mode: BkMode) -> Result<BkMode> {
        match unsafe { SetBkMode(self.ptr(), mode as _) } {
            1 => Ok(BkMode::Transparent),
            2 => Ok(BkMode::Opaque),
            _ => Err(WinError::Msg("SetBkMode failed")),
        }
    }

    /// Color at `(x, y)`; fails outside the clipping region.
    pub fn GetPixel(self, x: i32, y: i32) -> Result<COLORREF> {
        color_ok(unsafe { GetPixel(self.ptr(), x, y) }, "GetPixel failed")
    }

    /// Returns the color actually set, the closest one the device supports.
    pub fn SetPixel(self, x: i32, y: i32, color: COLORREF) -> Result<COLORREF> {
        match unsafe { SetPixel(self.ptr(), x, y, color.0) } as i32 {
            -1 => Err(WinError::Msg("SetPixel failed")),
            set => Ok(COLORREF(set as u32)),
        }
    }

    /// Pushes the DC state; popped when the guard drops.
    pub fn SaveDC(self) -> Result<SavedDcGuard> {
        match unsafe { SaveDC(self.ptr()) } {
            0 => Err(WinError::Msg("SaveDC failed")),
            id => Ok(unsafe { Guard::new(SavedDc { hdc: self, id }) }),
        }
    }

    /// Pops to a saved state; negative ids are relative to the latest.
    pub fn RestoreDC(self, id: i32) -> Result<()> {
        bool_ok(unsafe { RestoreDC(self.ptr(), id) }, "RestoreDC failed")
    }

    pub fn GetDeviceCaps(self, index: DeviceCap) -> i32 {
        unsafe { GetDeviceCaps(self.ptr(), index as _) }
    }
}
