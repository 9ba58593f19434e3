use bitflags::bitflags;

/// Filter and graph state (`FILTER_STATE`).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterState {
    Stopped = 0,
    Paused = 1,
    Running = 2,
}

impl FilterState {
    pub fn from_raw(value: i32) -> Option<Self> {
        Some(match value {
            0 => Self::Stopped,
            1 => Self::Paused,
            2 => Self::Running,
            _ => return None,
        })
    }
}

/// How far a transition got when `GetState` returned, read from its success
/// code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateProgress {
    /// `S_OK`: the reported state is reached.
    Complete,
    /// `VFW_S_STATE_INTERMEDIATE`: still moving toward the reported state.
    Intermediate,
    /// `VFW_S_CANT_CUE`: paused, but a live source produces no data.
    CantCue,
}

impl StateProgress {
    pub fn from_hr(hr: i32) -> Self {
        match hr {
            VFW_S_STATE_INTERMEDIATE => Self::Intermediate,
            VFW_S_CANT_CUE => Self::CantCue,
            _ => Self::Complete,
        }
    }
}

/// Pin direction (`PIN_DIRECTION`).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinDirection {
    Input = 0,
    Output = 1,
}

impl PinDirection {
    pub fn from_raw(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Input),
            1 => Some(Self::Output),
            _ => None,
        }
    }
}

bitflags! {
    /// `IMediaSeeking` capabilities (`AM_SEEKING_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SeekingCaps: u32 {
        const CAN_SEEK_ABSOLUTE = 0x001;
        const CAN_SEEK_FORWARDS = 0x002;
        const CAN_SEEK_BACKWARDS = 0x004;
        const CAN_GET_CURRENT_POS = 0x008;
        const CAN_GET_STOP_POS = 0x010;
        const CAN_GET_DURATION = 0x020;
        const CAN_PLAY_BACKWARDS = 0x040;
        const CAN_DO_SEGMENTS = 0x080;
        const SOURCE = 0x100;
    }
}

bitflags! {
    /// `IMediaSeeking::SetPositions` flags (`AM_SEEKING_*` positioning).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SeekingFlags: u32 {
        const NO_POSITIONING = 0x00;
        const ABSOLUTE_POSITIONING = 0x01;
        const RELATIVE_POSITIONING = 0x02;
        const INCREMENTAL_POSITIONING = 0x03;
        const SEEK_TO_KEY_FRAME = 0x04;
        const RETURN_TIME = 0x08;
        const SEGMENT = 0x10;
        const NO_FLUSH = 0x20;
    }
}

bitflags! {
    /// `IMFVideoDisplayControl::SetAspectRatioMode` (`MFVideoARMode_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AspectRatioMode: u32 {
        const NONE = 0x0;
        const PRESERVE_PICTURE = 0x1;
        const PRESERVE_PIXEL = 0x2;
        const NONLINEAR_STRETCH = 0x4;
    }
}

/// Media event codes from `IMediaEvent::GetEvent` (`EC_*`).
pub const EC_COMPLETE: i32 = 0x01;
pub const EC_USERABORT: i32 = 0x02;
pub const EC_ERRORABORT: i32 = 0x03;
pub const EC_TIME: i32 = 0x04;
pub const EC_REPAINT: i32 = 0x05;
pub const EC_PAUSED: i32 = 0x0E;
pub const EC_CLOCK_CHANGED: i32 = 0x0D;

/// `IMediaControl::GetState` returned this instead of `S_OK` while transitioning.
pub const VFW_S_STATE_INTERMEDIATE: i32 = 0x0004_0237;

/// `IBasicAudio` volume range, in hundredths of a decibel.
pub const VOLUME_SILENCE: i32 = -10000;
pub const VOLUME_FULL: i32 = 0;

/// Time format GUIDs for `IMediaSeeking::SetTimeFormat`.
pub mod time_format {
    use windows::core::GUID;

    pub const NONE: GUID = GUID::from_u128(0x00000000_0000_0000_0000_000000000000);
    pub const FRAME: GUID = GUID::from_u128(0x7b785570_8c82_11cf_bc0c_00aa00ac74f6);
    pub const BYTE: GUID = GUID::from_u128(0x7b785571_8c82_11cf_bc0c_00aa00ac74f6);
    pub const SAMPLE: GUID = GUID::from_u128(0x7b785572_8c82_11cf_bc0c_00aa00ac74f6);
    pub const FIELD: GUID = GUID::from_u128(0x7b785573_8c82_11cf_bc0c_00aa00ac74f6);
    pub const MEDIA_TIME: GUID = GUID::from_u128(0x7b785574_8c82_11cf_bc0c_00aa00ac74f6);
}

/// Service GUID for the EVR video display control (`MR_VIDEO_RENDER_SERVICE`).
pub const MR_VIDEO_RENDER_SERVICE: windows::core::GUID =
    windows::core::GUID::from_u128(0x1092a86c_ab1a_459a_a336_831fbc4d11ff);

/// `IPin::ConnectedTo` on an unconnected pin.
pub const VFW_E_NOT_CONNECTED: i32 = 0x8004_0209_u32 as i32;

/// `IFilterGraph::FindFilterByName` found no filter of that name.
pub const VFW_E_NOT_FOUND: i32 = 0x8004_0216_u32 as i32;

/// `IGraphBuilder::Connect` found no intermediate filters to join the pins.
pub const VFW_E_CANNOT_CONNECT: i32 = 0x8004_0217_u32 as i32;

/// `IMediaControl::GetState` while a live source cannot cue data.
pub const VFW_S_CANT_CUE: i32 = 0x0004_0268;
