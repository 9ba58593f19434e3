/// Raster operations for `BitBlt` (`SRCCOPY` and friends).
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rop {
    SrcCopy = 0x00CC_0020,
    SrcPaint = 0x00EE_0086,
    SrcAnd = 0x0088_00C6,
    SrcInvert = 0x0066_0046,
    SrcErase = 0x0044_0328,
    NotSrcCopy = 0x0033_0008,
    MergeCopy = 0x00C0_00CA,
    PatCopy = 0x00F0_0021,
    PatInvert = 0x005A_0049,
    DstInvert = 0x0055_0009,
    Blackness = 0x0000_0042,
    Whiteness = 0x00FF_0062,
}

/// Stock objects for `GetStockObject`.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockObject {
    WhiteBrush = 0,
    LtGrayBrush = 1,
    GrayBrush = 2,
    DkGrayBrush = 3,
    BlackBrush = 4,
    NullBrush = 5,
    WhitePen = 6,
    BlackPen = 7,
    NullPen = 8,
    OemFixedFont = 10,
    AnsiFixedFont = 11,
    AnsiVarFont = 12,
    SystemFont = 13,
    DeviceDefaultFont = 14,
    DefaultPalette = 15,
    SystemFixedFont = 16,
    DefaultGuiFont = 17,
    DcBrush = 18,
    DcPen = 19,
}

/// Pen styles for `CreatePen` (`PS_*`).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PenStyle {
    Solid = 0,
    Dash = 1,
    Dot = 2,
    DashDot = 3,
    DashDotDot = 4,
    Null = 5,
    InsideFrame = 6,
}

/// Background modes for `SetBkMode`.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BkMode {
    Transparent = 1,
    Opaque = 2,
}

/// `GetDeviceCaps` indexes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceCap {
    HorzRes = 8,
    VertRes = 10,
    BitsPixel = 12,
    Planes = 14,
    LogPixelsX = 88,
    LogPixelsY = 90,
    VRefresh = 116,
    DesktopVertRes = 117,
    DesktopHorzRes = 118,
}

/// `CreateDIBSection` color usage (`DIB_*`).
pub const DIB_RGB_COLORS: u32 = 0;
pub const DIB_PAL_COLORS: u32 = 1;

/// `BITMAPINFOHEADER::biCompression` values.
pub const BI_RGB: u32 = 0;
pub const BI_BITFIELDS: u32 = 3;

/// Font weights for `LOGFONTW::lfWeight` (`FW_*`).
pub const FW_DONTCARE: i32 = 0;
pub const FW_THIN: i32 = 100;
pub const FW_LIGHT: i32 = 300;
pub const FW_NORMAL: i32 = 400;
pub const FW_MEDIUM: i32 = 500;
pub const FW_SEMIBOLD: i32 = 600;
pub const FW_BOLD: i32 = 700;
pub const FW_HEAVY: i32 = 900;

/// `LOGFONTW::lfCharSet` values.
pub const DEFAULT_CHARSET: u8 = 1;
pub const ANSI_CHARSET: u8 = 0;

/// `LOGFONTW::lfQuality` values.
pub const CLEARTYPE_QUALITY: u8 = 5;
pub const ANTIALIASED_QUALITY: u8 = 4;

/// `GetPixel` failure value.
pub const CLR_INVALID: u32 = 0xFFFF_FFFF;

/// `SelectObject` failure value for regions.
pub const HGDI_ERROR: isize = -1;
