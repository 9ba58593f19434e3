//! Common dialogs: file open/save and color picker.
//!
//! Cancellation is not an error: the functions return `Ok(None)` when the
//! user dismisses the dialog, and `WinError::CommDlg` only when
//! `CommDlgExtendedError` reports a failure.

use alloc::{format, string::String, vec::Vec};

use windows_sys::Win32::UI::Controls::Dialogs::{
    ChooseColorW, CommDlgExtendedError, GetOpenFileNameW, GetSaveFileNameW,
};

use crate::co::{ChooseColorFlags, OpenFileFlags};
use crate::error::{CdErr, Result, WinError};
use crate::handles::HWND;
use crate::string::{WString, join_multi, parse_multi};
use crate::structs::{CHOOSECOLORW, COLORREF, OPENFILENAMEW};

/// File buffer length in characters for single-file dialogs.
const FILE_BUF_LEN: usize = 1024;

/// File buffer length for multi-select, room for a directory and several
/// hundred names.
const MULTI_BUF_LEN: usize = 32 * 1024;

/// Options of the open and save dialogs.
#[derive(Debug, Clone, Default)]
pub struct FileDialog<'a> {
    pub owner: HWND,
    pub title: Option<&'a str>,
    /// `(description, pattern)` pairs, such as `("Text", "*.txt;*.log")`.
    pub filters: &'a [(&'a str, &'a str)],
    /// One-based index of the initially selected filter.
    pub filter_index: u32,
    pub initial_dir: Option<&'a str>,
    pub file_name: Option<&'a str>,
    /// Extension appended when the user types none, without the dot.
    pub default_ext: Option<&'a str>,
    pub flags: OpenFileFlags,
}

/// Shows the open dialog for a single file.
pub fn get_open_file_name(opts: &FileDialog) -> Result<Option<String>> {
    let flags = opts.flags | OpenFileFlags::EXPLORER | OpenFileFlags::FILEMUSTEXIST;
    let flags = flags - OpenFileFlags::ALLOWMULTISELECT;
    Ok(run_file_dialog(opts, flags, Mode::Open)?.and_then(|buf| parse_multi(&buf).into_iter().next()))
}

/// Shows the open dialog allowing multiple selection. Returns full paths.
pub fn get_open_file_names(opts: &FileDialog) -> Result<Option<Vec<String>>> {
    let flags = opts.flags | OpenFileFlags::EXPLORER | OpenFileFlags::FILEMUSTEXIST | OpenFileFlags::ALLOWMULTISELECT;
    Ok(run_file_dialog(opts, flags, Mode::Open)?.map(|buf| split_multi_select(&buf)))
}

/// Shows the save dialog, prompting before overwriting.
pub fn get_save_file_name(opts: &FileDialog) -> Result<Option<String>> {
    let flags = (opts.flags | OpenFileFlags::EXPLORER | OpenFileFlags::OVERWRITEPROMPT) - OpenFileFlags::ALLOWMULTISELECT;
    Ok(run_file_dialog(opts, flags, Mode::Save)?.and_then(|buf| parse_multi(&buf).into_iter().next()))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Open,
    Save,
}

/// Runs the dialog and returns the raw result buffer.
fn run_file_dialog(opts: &FileDialog, flags: OpenFileFlags, mode: Mode) -> Result<Option<Vec<u16>>> {
    let filter = filter_string(opts.filters);
    let title = opts.title.map(WString::from_str);
    let initial_dir = opts.initial_dir.map(WString::from_str);
    let default_ext = opts.default_ext.map(WString::from_str);

    let buf_len = if flags.contains(OpenFileFlags::ALLOWMULTISELECT) { MULTI_BUF_LEN } else { FILE_BUF_LEN };
    let mut file = WString::new_alloc_buf(buf_len);
    if let Some(name) = opts.file_name {
        let name: Vec<u16> = name.encode_utf16().collect();
        let len = name.len().min(buf_len - 1);
        file = WString::from_wide(&name[..len]);
        file.resize(buf_len);
    }

    let api = match mode {
        Mode::Open => "GetOpenFileNameW",
        Mode::Save => "GetSaveFileNameW",
    };

    let mut ofn = OPENFILENAMEW {
        hwndOwner: opts.owner,
        lpstrFilter: if opts.filters.is_empty() { core::ptr::null() } else { filter.as_ptr() },
        nFilterIndex: opts.filter_index,
        lpstrFile: file.as_mut_ptr(),
        nMaxFile: file.buf_len() as u32,
        lpstrInitialDir: opt_ptr(&initial_dir),
        lpstrTitle: opt_ptr(&title),
        lpstrDefExt: opt_ptr(&default_ext),
        Flags: flags.bits(),
        ..OPENFILENAMEW::new()
    };

    let ok = unsafe {
        match mode {
            Mode::Open => GetOpenFileNameW((&mut ofn as *mut OPENFILENAMEW).cast()),
            Mode::Save => GetSaveFileNameW((&mut ofn as *mut OPENFILENAMEW).cast()),
        }
    };
    if ok != 0 {
        return Ok(Some(file.as_buf().to_vec()));
    }

    match CdErr(unsafe { CommDlgExtendedError() }) {
        CdErr(0) => Ok(None),
        err => {
            if err == CdErr::FNERR_BUFFERTOOSMALL {
                log::warn!("{api}: selection needs {:?} characters, buffer has {}", required_len(file.as_buf()), file.buf_len());
            }
            Err(WinError::CommDlg(api, err))
        }
    }
}

/// Length the dialog asked for after `FNERR_BUFFERTOOSMALL`. It is a single
/// `WORD` in the first character of the file buffer.
fn required_len(buf: &[u16]) -> Option<usize> {
    buf.first().copied().filter(|&n| n != 0).map(usize::from)
}

fn opt_ptr(value: &Option<WString>) -> *const u16 {
    value.as_ref().map_or(core::ptr::null(), |v| v.as_ptr())
}

/// Builds the double-null terminated filter list.
fn filter_string(filters: &[(&str, &str)]) -> WString {
    let flat: Vec<&str> = filters.iter().flat_map(|(name, pattern)| [*name, *pattern]).collect();
    join_multi(&flat)
}

/// Splits a multi-select result: a single full path, or a directory
/// followed by file names.
fn split_multi_select(buf: &[u16]) -> Vec<String> {
    let mut parts = parse_multi(buf);
    if parts.len() <= 1 {
        return parts;
    }

    let dir = parts.remove(0);
    let dir = dir.trim_end_matches('\\');
    parts.into_iter().map(|name| format!("{dir}\\{name}")).collect()
}

/// Shows the color picker. `custom` holds the 16 custom colors and is
/// updated with the user's edits.
pub fn choose_color(
    owner: HWND,
    initial: COLORREF,
    custom: &mut [COLORREF; 16],
    flags: ChooseColorFlags,
) -> Result<Option<COLORREF>> {
    let mut cc = CHOOSECOLORW {
        hwndOwner: owner,
        rgbResult: initial,
        lpCustColors: custom.as_mut_ptr(),
        Flags: (flags | ChooseColorFlags::RGBINIT).bits(),
        ..CHOOSECOLORW::new()
    };

    if unsafe { ChooseColorW((&mut cc as *mut CHOOSECOLORW).cast()) } != 0 {
        return Ok(Some(cc.rgbResult));
    }
    match CdErr(unsafe { CommDlgExtendedError() }) {
        CdErr(0) => Ok(None),
        err => Err(WinError::CommDlg("ChooseColorW", err)),
    }
}
