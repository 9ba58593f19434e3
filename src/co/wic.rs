use windows::core::GUID;

/// Decoder cache option for `CreateDecoderFromFilename`.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeOptions {
    CacheOnDemand = 0x0,
    CacheOnLoad = 0x1,
}

/// Dither type for `IWICFormatConverter::Initialize`.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DitherType {
    None = 0x0,
    Ordered4x4 = 0x1,
    Ordered8x8 = 0x2,
    Ordered16x16 = 0x3,
    Spiral4x4 = 0x4,
    Spiral8x8 = 0x5,
    DualSpiral4x4 = 0x6,
    DualSpiral8x8 = 0x7,
    ErrorDiffusion = 0x8,
}

/// Palette type for `IWICFormatConverter::Initialize`.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteType {
    Custom = 0x0,
    MedianCut = 0x1,
    FixedBW = 0x2,
    FixedWebPalette = 0x8,
    FixedGray256 = 0xC,
}

/// Interpolation mode for `IWICBitmapScaler::Initialize`.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterpolationMode {
    NearestNeighbor = 0x0,
    Linear = 0x1,
    Cubic = 0x2,
    Fant = 0x3,
    HighQualityCubic = 0x4,
}

/// Alpha handling for `CreateBitmapFromHBITMAP`.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlphaChannelOption {
    UseAlpha = 0x0,
    UsePremultipliedAlpha = 0x1,
    IgnoreAlpha = 0x2,
}

/// Pixel format GUIDs (`GUID_WICPixelFormat*`).
pub mod pixel_format {
    use super::GUID;

    pub const DONT_CARE: GUID = GUID::from_u128(0x6fddc324_4e03_4bfe_b185_3d77768dc900);
    pub const GRAY_8BPP: GUID = GUID::from_u128(0x6fddc324_4e03_4bfe_b185_3d77768dc908);
    pub const BGR_24BPP: GUID = GUID::from_u128(0x6fddc324_4e03_4bfe_b185_3d77768dc90c);
    pub const RGB_24BPP: GUID = GUID::from_u128(0x6fddc324_4e03_4bfe_b185_3d77768dc90d);
    pub const BGR_32BPP: GUID = GUID::from_u128(0x6fddc324_4e03_4bfe_b185_3d77768dc90e);
    pub const BGRA_32BPP: GUID = GUID::from_u128(0x6fddc324_4e03_4bfe_b185_3d77768dc90f);
    pub const PBGRA_32BPP: GUID = GUID::from_u128(0x6fddc324_4e03_4bfe_b185_3d77768dc910);
    pub const RGBA_32BPP: GUID = GUID::from_u128(0xf5c7ad2d_6a8d_43dd_a7a8_a29935261ae9);
}

/// Container format GUIDs (`GUID_ContainerFormat*`).
pub mod container_format {
    use super::GUID;

    pub const BMP: GUID = GUID::from_u128(0x0af1d87e_fcfe_4188_bdeb_a7906471cbe3);
    pub const PNG: GUID = GUID::from_u128(0x1b7cfaf4_713f_473c_bbcd_6137425faeaf);
    pub const ICO: GUID = GUID::from_u128(0xa3a860c4_338f_4c17_919a_fba4b5628f21);
    pub const JPEG: GUID = GUID::from_u128(0x19e4a5aa_5662_4fc5_a0c0_1758028e1057);
    pub const TIFF: GUID = GUID::from_u128(0x163bcc30_e2e9_4f0b_961d_a3e9fdb788a3);
    pub const GIF: GUID = GUID::from_u128(0x1f8a5601_7d4d_4cbd_9c82_1bc8d4eeb9a5);
}

/// `GENERIC_READ` access for `CreateDecoderFromFilename`.
pub const WIC_GENERIC_READ: u32 = 0x8000_0000;

/// The frame carries no embedded thumbnail.
pub const WINCODEC_ERR_CODECNOTHUMBNAIL: i32 = 0x8898_2F44_u32 as i32;
/// No decoder is registered for the file's container format.
pub const WINCODEC_ERR_COMPONENTNOTFOUND: i32 = 0x8898_2F50_u32 as i32;
/// Index past the last frame of a decoder.
pub const WINCODEC_ERR_FRAMEMISSING: i32 = 0x8898_2F62_u32 as i32;
/// The converter has no path between the two pixel formats.
pub const WINCODEC_ERR_UNSUPPORTEDPIXELFORMAT: i32 = 0x8898_2F80_u32 as i32;
