use core::fmt;

/// [`POINT`](https://learn.microsoft.com/en-us/windows/win32/api/windef/ns-windef-point) struct.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct POINT {
    pub x: i32,
    pub y: i32,
}

impl POINT {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Unpacks the coordinates of mouse messages (`GET_X_LPARAM`/`GET_Y_LPARAM`).
    pub const fn from_lparam(lparam: isize) -> Self {
        Self {
            x: (lparam & 0xFFFF) as u16 as i16 as i32,
            y: ((lparam >> 16) & 0xFFFF) as u16 as i16 as i32,
        }
    }

    /// Packs the coordinates into an `LPARAM` (`MAKELPARAM`).
    pub const fn to_lparam(self) -> isize {
        ((self.x as u16 as u32) | ((self.y as u16 as u32) << 16)) as i32 as isize
    }
}

/// [`SIZE`](https://learn.microsoft.com/en-us/windows/win32/api/windef/ns-windef-size) struct.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SIZE {
    pub cx: i32,
    pub cy: i32,
}

impl SIZE {
    pub const fn new(cx: i32, cy: i32) -> Self {
        Self { cx, cy }
    }
}

/// [`RECT`](https://learn.microsoft.com/en-us/windows/win32/api/windef/ns-windef-rect) struct.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RECT {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RECT {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    #[inline]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Same rule as `IsRectEmpty`: no area when right <= left or bottom <= top.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Same rule as `PtInRect`: left/top edges inclusive, right/bottom exclusive.
    pub const fn contains(&self, pt: POINT) -> bool {
        pt.x >= self.left && pt.x < self.right && pt.y >= self.top && pt.y < self.bottom
    }
}

/// [`COLORREF`](https://learn.microsoft.com/en-us/windows/win32/gdi/colorref) value, laid out as `0x00BBGGRR`.
#[repr(transparent)]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct COLORREF(pub u32);

impl COLORREF {
    /// `CLR_INVALID`, returned by color functions on failure.
    pub const INVALID: Self = Self(0xFFFF_FFFF);

    /// Same as the `RGB` macro.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(red as u32 | (green as u32) << 8 | (blue as u32) << 16)
    }

    pub const fn red(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    pub const fn blue(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }
}

impl fmt::Debug for COLORREF {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "COLORREF(#{:02x}{:02x}{:02x})", self.red(), self.green(), self.blue())
    }
}

/// [`SYSTEMTIME`](https://learn.microsoft.com/en-us/windows/win32/api/minwinbase/ns-minwinbase-systemtime) struct.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SYSTEMTIME {
    pub wYear: u16,
    pub wMonth: u16,
    pub wDayOfWeek: u16,
    pub wDay: u16,
    pub wHour: u16,
    pub wMinute: u16,
    pub wSecond: u16,
    pub wMilliseconds: u16,
}

/// [`FILETIME`](https://learn.microsoft.com/en-us/windows/win32/api/minwinbase/ns-minwinbase-filetime) struct.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FILETIME {
    pub dwLowDateTime: u32,
    pub dwHighDateTime: u32,
}

impl FILETIME {
    /// Splits 100-nanosecond intervals since 1601-01-01.
    pub const fn from_u64(value: u64) -> Self {
        Self {
            dwLowDateTime: value as u32,
            dwHighDateTime: (value >> 32) as u32,
        }
    }

    /// Joins the two halves into 100-nanosecond intervals since 1601-01-01.
    pub const fn to_u64(self) -> u64 {
        (self.dwHighDateTime as u64) << 32 | self.dwLowDateTime as u64
    }
}
