//! Playback control of a running graph.

use core::ffi::c_void;

use windows::core::{GUID, HRESULT, IUnknown, IUnknown_Vtbl};

use crate::co::{E_ABORT, FilterState, S_FALSE, SeekingCaps, SeekingFlags, StateProgress};
use crate::com::hr_ok;
use crate::error::{Result, WinError};
use crate::handles::HANDLE;
use crate::ole::{Bstr, IDispatch, IDispatch_Vtbl};

com_interface! {
    /// [`IMediaControl`](https://learn.microsoft.com/en-us/windows/win32/api/control/nn-control-imediacontrol)
    /// COM interface.
    IMediaControl: IDispatch,
    vtable: IMediaControl_Vtbl,
    iid: 0x56a868b1_0ad4_11ce_b03a_0020af0ba770,
}

com_interface! {
    /// [`IMediaEvent`](https://learn.microsoft.com/en-us/windows/win32/api/control/nn-control-imediaevent)
    /// COM interface.
    IMediaEvent: IDispatch,
    vtable: IMediaEvent_Vtbl,
    iid: 0x56a868b6_0ad4_11ce_b03a_0020af0ba770,
}

com_interface! {
    /// [`IBasicAudio`](https://learn.microsoft.com/en-us/windows/win32/api/control/nn-control-ibasicaudio)
    /// COM interface.
    IBasicAudio: IDispatch,
    vtable: IBasicAudio_Vtbl,
    iid: 0x56a868b3_0ad4_11ce_b03a_0020af0ba770,
}

com_interface! {
    /// [`IMediaSeeking`](https://learn.microsoft.com/en-us/windows/win32/api/strmif/nn-strmif-imediaseeking)
    /// COM interface. Positions are in the current time format, 100 ns
    /// units by default.
    IMediaSeeking: IUnknown,
    vtable: IMediaSeeking_Vtbl,
    iid: 0x36b73880_c2c8_11cf_8b46_00805f6cef60,
}

impl IMediaControl {
    /// Starts or resumes playback. The graph may still be transitioning
    /// when this returns.
    pub fn Run(&self) -> Result<()> {
        hr_ok(vcall!(self, Run()), "IMediaControl::Run")
    }

    pub fn Pause(&self) -> Result<()> {
        hr_ok(vcall!(self, Pause()), "IMediaControl::Pause")
    }

    pub fn Stop(&self) -> Result<()> {
        hr_ok(vcall!(self, Stop()), "IMediaControl::Stop")
    }

    /// Waits up to `timeout_ms` for a transition. Returns the state along
    /// with whether it was reached, is still pending, or cannot be cued.
    pub fn GetState(&self, timeout_ms: i32) -> Result<(FilterState, StateProgress)> {
        let mut state = 0;
        let hr = vcall!(self, GetState(timeout_ms, &mut state));
        hr_ok(hr, "IMediaControl::GetState")?;
        let state = FilterState::from_raw(state).ok_or(WinError::Msg("IMediaControl::GetState: unknown state"))?;
        Ok((state, StateProgress::from_hr(hr.0)))
    }

    pub fn RenderFile(&self, file: &str) -> Result<()> {
        let file = Bstr::from(file);
        hr_ok(vcall!(self, RenderFile(file.as_ptr())), "IMediaControl::RenderFile")
    }

    /// Pauses, waits for data to be cued, then stops.
    pub fn StopWhenReady(&self) -> Result<()> {
        hr_ok(vcall!(self, StopWhenReady()), "StopWhenReady")
    }
}

/// An event read from the graph's queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaEvent {
    /// `EC_*` code.
    pub code: i32,
    pub param1: isize,
    pub param2: isize,
}

impl IMediaEvent {
    /// Manual-reset event signaled while the queue is not empty. Owned by
    /// the graph; do not close it.
    pub fn GetEventHandle(&self) -> Result<HANDLE> {
        let mut handle = 0isize;
        hr_ok(vcall!(self, GetEventHandle(&mut handle)), "GetEventHandle")?;
        Ok(HANDLE::from_ptr(handle as *mut c_void))
    }

    /// Reads the next event, waiting up to `timeout_ms`. Returns `None` on
    /// timeout. The parameters must be passed to [`Self::FreeEventParams`].
    pub fn GetEvent(&self, timeout_ms: i32) -> Result<Option<MediaEvent>> {
        let mut event = MediaEvent { code: 0, param1: 0, param2: 0 };
        match vcall!(self, GetEvent(&mut event.code, &mut event.param1, &mut event.param2, timeout_ms)) {
            HRESULT(E_ABORT) => Ok(None),
            hr => hr_ok(hr, "GetEvent").map(|_| Some(event)),
        }
    }

    pub fn FreeEventParams(&self, event: MediaEvent) -> Result<()> {
        hr_ok(vcall!(self, FreeEventParams(event.code, event.param1, event.param2)), "FreeEventParams")
    }

    /// Reads the next event and frees its parameters, keeping the code and
    /// the parameter values. Pointer parameters are dangling afterwards.
    pub fn next_event(&self, timeout_ms: i32) -> Result<Option<MediaEvent>> {
        let Some(event) = self.GetEvent(timeout_ms)? else {
            return Ok(None);
        };
        self.FreeEventParams(event)?;
        Ok(Some(event))
    }

    /// Blocks until playback completes or `timeout_ms` elapses. Returns the
    /// completion event code, `None` on timeout.
    pub fn WaitForCompletion(&self, timeout_ms: i32) -> Result<Option<i32>> {
        let mut code = 0;
        match vcall!(self, WaitForCompletion(timeout_ms, &mut code)) {
            HRESULT(E_ABORT) => Ok(None),
            hr => hr_ok(hr, "WaitForCompletion").map(|_| Some(code)),
        }
    }

    /// Passes `code` to the application instead of handling it in the graph.
    pub fn CancelDefaultHandling(&self, code: i32) -> Result<()> {
        hr_ok(vcall!(self, CancelDefaultHandling(code)), "CancelDefaultHandling")
    }

    pub fn RestoreDefaultHandling(&self, code: i32) -> Result<()> {
        hr_ok(vcall!(self, RestoreDefaultHandling(code)), "RestoreDefaultHandling")
    }
}

impl IBasicAudio {
    /// Volume in hundredths of a decibel, from `VOLUME_SILENCE` to `VOLUME_FULL`.
    pub fn put_Volume(&self, volume: i32) -> Result<()> {
        hr_ok(vcall!(self, put_Volume(volume)), "put_Volume")
    }

    pub fn get_Volume(&self) -> Result<i32> {
        let mut volume = 0;
        hr_ok(vcall!(self, get_Volume(&mut volume)), "get_Volume")?;
        Ok(volume)
    }

    /// Balance from -10000 (left only) to 10000 (right only).
    pub fn put_Balance(&self, balance: i32) -> Result<()> {
        hr_ok(vcall!(self, put_Balance(balance)), "put_Balance")
    }

    pub fn get_Balance(&self) -> Result<i32> {
        let mut balance = 0;
        hr_ok(vcall!(self, get_Balance(&mut balance)), "get_Balance")?;
        Ok(balance)
    }
}

impl IMediaSeeking {
    pub fn GetCapabilities(&self) -> Result<SeekingCaps> {
        let mut caps = 0;
        hr_ok(vcall!(self, GetCapabilities(&mut caps)), "GetCapabilities")?;
        Ok(SeekingCaps::from_bits_retain(caps))
    }

    /// Returns the subset of `caps` the stream supports.
    pub fn CheckCapabilities(&self, caps: SeekingCaps) -> Result<SeekingCaps> {
        let mut bits = caps.bits();
        hr_ok(vcall!(self, CheckCapabilities(&mut bits)), "CheckCapabilities")?;
        Ok(SeekingCaps::from_bits_retain(bits))
    }

    pub fn IsFormatSupported(&self, format: &GUID) -> Result<bool> {
        let hr = vcall!(self, IsFormatSupported(format));
        hr_ok(hr, "IsFormatSupported")?;
        Ok(hr.0 != S_FALSE)
    }

    pub fn QueryPreferredFormat(&self) -> Result<GUID> {
        let mut format = GUID::zeroed();
        hr_ok(vcall!(self, QueryPreferredFormat(&mut format)), "QueryPreferredFormat")?;
        Ok(format)
    }

    pub fn GetTimeFormat(&self) -> Result<GUID> {
        let mut format = GUID::zeroed();
        hr_ok(vcall!(self, GetTimeFormat(&mut format)), "GetTimeFormat")?;
        Ok(format)
    }

    pub fn IsUsingTimeFormat(&self, format: &GUID) -> Result<bool> {
        let hr = vcall!(self, IsUsingTimeFormat(format));
        hr_ok(hr, "IsUsingTimeFormat")?;
        Ok(hr.0 != S_FALSE)
    }

    /// Sets one of the `co::time_format` GUIDs. The graph must be stopped.
    pub fn SetTimeFormat(&self, format: &GUID) -> Result<()> {
        hr_ok(vcall!(self, SetTimeFormat(format)), "SetTimeFormat")
    }

    pub fn GetDuration(&self) -> Result<i64> {
        let mut duration = 0;
        hr_ok(vcall!(self, GetDuration(&mut duration)), "GetDuration")?;
        Ok(duration)
    }

    pub fn GetStopPosition(&self) -> Result<i64> {
        let mut stop = 0;
        hr_ok(vcall!(self, GetStopPosition(&mut stop)), "GetStopPosition")?;
        Ok(stop)
    }

    pub fn GetCurrentPosition(&self) -> Result<i64> {
        let mut pos = 0;
        hr_ok(vcall!(self, GetCurrentPosition(&mut pos)), "GetCurrentPosition")?;
        Ok(pos)
    }

    /// Converts `source` from `source_format` to `target_format`.
    pub fn ConvertTimeFormat(&self, target_format: &GUID, source: i64, source_format: &GUID) -> Result<i64> {
        let mut target = 0;
        hr_ok(
            vcall!(self, ConvertTimeFormat(&mut target, target_format, source, source_format)),
            "ConvertTimeFormat",
        )?;
        Ok(target)
    }

    /// Sets the current and stop positions. Returns both positions as the
    /// filter reports them when `RETURN_TIME` is among the flags, otherwise
    /// the values passed in.
    pub fn SetPositions(
        &self,
        current: i64,
        current_flags: SeekingFlags,
        stop: i64,
        stop_flags: SeekingFlags,
    ) -> Result<(i64, i64)> {
        let (mut current, mut stop) = (current, stop);
        hr_ok(
            vcall!(self, SetPositions(&mut current, current_flags.bits(), &mut stop, stop_flags.bits())),
            "SetPositions",
        )?;
        Ok((current, stop))
    }

    /// Seeks to `pos` without moving the stop position.
    pub fn seek_to(&self, pos: i64) -> Result<()> {
        self.SetPositions(pos, SeekingFlags::ABSOLUTE_POSITIONING, 0, SeekingFlags::NO_POSITIONING)
            .map(|_| ())
    }

    /// Returns `(current, stop)`.
    pub fn GetPositions(&self) -> Result<(i64, i64)> {
        let (mut current, mut stop) = (0, 0);
        hr_ok(vcall!(self, GetPositions(&mut current, &mut stop)), "GetPositions")?;
        Ok((current, stop))
    }

    /// Returns the `(earliest, latest)` seekable positions.
    pub fn GetAvailable(&self) -> Result<(i64, i64)> {
        let (mut earliest, mut latest) = (0, 0);
        hr_ok(vcall!(self, GetAvailable(&mut earliest, &mut latest)), "GetAvailable")?;
        Ok((earliest, latest))
    }

    /// Playback rate; 1.0 is normal speed.
    pub fn SetRate(&self, rate: f64) -> Result<()> {
        hr_ok(vcall!(self, SetRate(rate)), "SetRate")
    }

    pub fn GetRate(&self) -> Result<f64> {
        let mut rate = 0.0;
        hr_ok(vcall!(self, GetRate(&mut rate)), "GetRate")?;
        Ok(rate)
    }

    pub fn GetPreroll(&self) -> Result<i64> {
        let mut preroll = 0;
        hr_ok(vcall!(self, GetPreroll(&mut preroll)), "GetPreroll")?;
        Ok(preroll)
    }
}

#[repr(C)]
pub struct IMediaControl_Vtbl {
    pub base__: IDispatch_Vtbl,
    pub Run: unsafe extern "system" fn(this: *mut c_void) -> HRESULT,
    pub Pause: unsafe extern "system" fn(this: *mut c_void) -> HRESULT,
    pub Stop: unsafe extern "system" fn(this: *mut c_void) -> HRESULT,
    pub GetState: unsafe extern "system" fn(this: *mut c_void, timeout: i32, state: *mut i32) -> HRESULT,
    pub RenderFile: unsafe extern "system" fn(this: *mut c_void, file: *const u16) -> HRESULT,
    pub AddSourceFilter: *const c_void,
    pub get_FilterCollection: *const c_void,
    pub get_RegFilterCollection: *const c_void,
    pub StopWhenReady: unsafe extern "system" fn(this: *mut c_void) -> HRESULT,
}

#[repr(C)]
pub struct IMediaEvent_Vtbl {
    pub base__: IDispatch_Vtbl,
    pub GetEventHandle: unsafe extern "system" fn(this: *mut c_void, handle: *mut isize) -> HRESULT,
    pub GetEvent: unsafe extern "system" fn(
        this: *mut c_void,
        code: *mut i32,
        param1: *mut isize,
        param2: *mut isize,
        timeout: i32,
    ) -> HRESULT,
    pub WaitForCompletion: unsafe extern "system" fn(this: *mut c_void, timeout: i32, code: *mut i32) -> HRESULT,
    pub CancelDefaultHandling: unsafe extern "system" fn(this: *mut c_void, code: i32) -> HRESULT,
    pub RestoreDefaultHandling: unsafe extern "system" fn(this: *mut c_void, code: i32) -> HRESULT,
    pub FreeEventParams:
        unsafe extern "system" fn(this: *mut c_void, code: i32, param1: isize, param2: isize) -> HRESULT,
}

#[repr(C)]
pub struct IBasicAudio_Vtbl {
    pub base__: IDispatch_Vtbl,
    pub put_Volume: unsafe extern "system" fn(this: *mut c_void, volume: i32) -> HRESULT,
    pub get_Volume: unsafe extern "system" fn(this: *mut c_void, volume: *mut i32) -> HRESULT,
    pub put_Balance: unsafe extern "system" fn(this: *mut c_void, balance: i32) -> HRESULT,
    pub get_Balance: unsafe extern "system" fn(this: *mut c_void, balance: *mut i32) -> HRESULT,
}

#[repr(C)]
pub struct IMediaSeeking_Vtbl {
    pub base__: IUnknown_Vtbl,
    pub GetCapabilities: unsafe extern "system" fn(this: *mut c_void, caps: *mut u32) -> HRESULT,
    pub CheckCapabilities: unsafe extern "system" fn(this: *mut c_void, caps: *mut u32) -> HRESULT,
    pub IsFormatSupported: unsafe extern "system" fn(this: *mut c_void, format: *const GUID) -> HRESULT,
    pub QueryPreferredFormat: unsafe extern "system" fn(this: *mut c_void, format: *mut GUID) -> HRESULT,
    pub GetTimeFormat: unsafe extern "system" fn(this: *mut c_void, format: *mut GUID) -> HRESULT,
    pub IsUsingTimeFormat: unsafe extern "system" fn(this: *mut c_void, format: *const GUID) -> HRESULT,
    pub SetTimeFormat: unsafe extern "system" fn(this: *mut c_void, format: *const GUID) -> HRESULT,
    pub GetDuration: unsafe extern "system" fn(this: *mut c_void, duration: *mut i64) -> HRESULT,
    pub GetStopPosition: unsafe extern "system" fn(this: *mut c_void, stop: *mut i64) -> HRESULT,
    pub GetCurrentPosition: unsafe extern "system" fn(this: *mut c_void, current: *mut i64) -> HRESULT,
    pub ConvertTimeFormat: unsafe extern "system" fn(
        this: *mut c_void,
        target: *mut i64,
        target_format: *const GUID,
        source: i64,
        source_format: *const GUID,
    ) -> HRESULT,
    pub SetPositions: unsafe extern "system" fn(
        this: *mut c_void,
        current: *mut i64,
        current_flags: u32,
        stop: *mut i64,
        stop_flags: u32,
    ) -> HRESULT,
    pub GetPositions: unsafe extern "system" fn(this: *mut c_void, current: *mut i64, stop: *mut i64) -> HRESULT,
    pub GetAvailable: unsafe extern "system" fn(this: *mut c_void, earliest: *mut i64, latest: *mut i64) -> HRESULT,
    pub SetRate: unsafe extern "system" fn(this: *mut c_void, rate: f64) -> HRESULT,
    pub GetRate: unsafe extern "system" fn(this: *mut c_void, rate: *mut f64) -> HRESULT,
    pub GetPreroll: unsafe extern "system" fn(this: *mut c_void, preroll: *mut i64) -> HRESULT,
}
