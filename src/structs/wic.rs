//! Windows Imaging Component structures.

/// [`WICRect`](https://learn.microsoft.com/en-us/windows/win32/api/wincodec/ns-wincodec-wicrect)
/// struct: a rectangle as origin and extent, unlike `RECT`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WICRect {
    pub X: i32,
    pub Y: i32,
    pub Width: i32,
    pub Height: i32,
}

impl WICRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { X: x, Y: y, Width: width, Height: height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::offset_of;
    use windows::Win32::Graphics::Imaging as sys;

    #[test]
    fn test_layout_matches_sdk() {
        assert_eq!(size_of::<WICRect>(), size_of::<sys::WICRect>());
        assert_eq!(offset_of!(WICRect, Width), offset_of!(sys::WICRect, Width));
        assert_eq!(offset_of!(WICRect, Height), offset_of!(sys::WICRect, Height));
    }
}
