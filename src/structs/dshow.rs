//! DirectShow and Media Foundation structures.

use core::ffi::c_void;

use windows::core::GUID;

/// [`AM_MEDIA_TYPE`](https://learn.microsoft.com/en-us/windows/win32/api/strmif/ns-strmif-am_media_type) struct.
///
/// Used here only as an optional connection constraint; the format block is
/// borrowed and never freed by this crate.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct AM_MEDIA_TYPE {
    pub majortype: GUID,
    pub subtype: GUID,
    pub bFixedSizeSamples: i32,
    pub bTemporalCompression: i32,
    pub lSampleSize: u32,
    pub formattype: GUID,
    pub pUnk: *mut c_void,
    pub cbFormat: u32,
    pub pbFormat: *mut u8,
}

/// [`PIN_INFO`](https://learn.microsoft.com/en-us/windows/win32/api/strmif/ns-strmif-pin_info) struct.
///
/// `pFilter` holds a reference the receiver must release.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct PIN_INFO {
    pub pFilter: *mut c_void,
    pub dir: i32,
    pub achName: [u16; 128],
}

/// [`FILTER_INFO`](https://learn.microsoft.com/en-us/windows/win32/api/strmif/ns-strmif-filter_info) struct.
///
/// `pGraph` holds a reference the receiver must release, null when the
/// filter is not in a graph.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct FILTER_INFO {
    pub achName: [u16; 128],
    pub pGraph: *mut c_void,
}

/// [`MFVideoNormalizedRect`](https://learn.microsoft.com/en-us/windows/win32/api/evr/ns-evr-mfvideonormalizedrect)
/// struct: a source rectangle in the 0.0 to 1.0 range of the video frame.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MFVideoNormalizedRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl MFVideoNormalizedRect {
    /// The whole frame.
    pub const FULL: Self = Self { left: 0.0, top: 0.0, right: 1.0, bottom: 1.0 };
}

impl Default for MFVideoNormalizedRect {
    fn default() -> Self {
        Self::FULL
    }
}

zeroed_default!(AM_MEDIA_TYPE, PIN_INFO, FILTER_INFO);
