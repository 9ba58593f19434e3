//! UTF-16 string marshaling between Rust strings and the platform's wide strings.

use alloc::{string::String, vec, vec::Vec};
use core::fmt;

use windows::core::{PCWSTR, PWSTR};

/// Owned, null-terminated UTF-16 buffer.
///
/// Used both to pass strings into system calls and as an output buffer for
/// calls that fill a caller-allocated `LPWSTR`.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct WString(Vec<u16>);

impl WString {
    /// Creates an empty string holding only the terminating null.
    pub fn new() -> Self {
        Self(vec![0])
    }

    /// Encodes a Rust string, appending the terminating null.
    pub fn from_str(value: &str) -> Self {
        Self(value.encode_utf16().chain(Some(0)).collect())
    }

    /// Copies a UTF-16 slice, stopping at the first null if any.
    pub fn from_wide(value: &[u16]) -> Self {
        let end = value.iter().position(|&c| c == 0).unwrap_or(value.len());
        let mut buf = Vec::with_capacity(end + 1);
        buf.extend_from_slice(&value[..end]);
        buf.push(0);
        Self(buf)
    }

    /// Allocates a zeroed buffer of `len` characters, null included.
    pub fn new_alloc_buf(len: usize) -> Self {
        Self(vec![0; len.max(1)])
    }

    /// Copies a null-terminated wide string from a raw pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or point to a null-terminated UTF-16 string.
    pub unsafe fn from_ptr(ptr: *const u16) -> Self {
        if ptr.is_null() {
            return Self::new();
        }
        let len = unsafe { wide_len(ptr) };
        Self::from_wide(unsafe { core::slice::from_raw_parts(ptr, len) })
    }

    /// Returns a pointer suitable for `LPCWSTR` parameters.
    #[inline]
    pub fn as_ptr(&self) -> *const u16 {
        self.0.as_ptr()
    }

    /// Returns a mutable pointer suitable for `LPWSTR` output parameters.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut u16 {
        self.0.as_mut_ptr()
    }

    /// Returns the string as `PCWSTR`.
    #[inline]
    pub fn as_pcwstr(&self) -> PCWSTR {
        PCWSTR::from_raw(self.as_ptr())
    }

    /// Returns the buffer as `PWSTR`.
    #[inline]
    pub fn as_pwstr(&mut self) -> PWSTR {
        PWSTR::from_raw(self.as_mut_ptr())
    }

    /// Buffer capacity in characters, terminating null included.
    #[inline]
    pub fn buf_len(&self) -> usize {
        self.0.len()
    }

    /// Number of characters before the first null.
    pub fn str_len(&self) -> usize {
        self.0.iter().position(|&c| c == 0).unwrap_or(self.0.len())
    }

    /// Returns true if the string has no characters before the null.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.str_len() == 0
    }

    /// Returns the characters before the first null.
    pub fn as_slice(&self) -> &[u16] {
        &self.0[..self.str_len()]
    }

    /// Returns the whole buffer, including any embedded nulls.
    #[inline]
    pub fn as_buf(&self) -> &[u16] {
        &self.0
    }

    /// Resizes the buffer to `len` characters, zero-filling new space.
    pub fn resize(&mut self, len: usize) {
        self.0.resize(len.max(1), 0);
        if let Some(last) = self.0.last_mut() {
            *last = 0;
        }
    }

    /// Decodes the characters before the first null, replacing invalid UTF-16.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(self.as_slice())
    }

    /// Decodes the characters before the first null, failing on invalid UTF-16.
    pub fn to_string_checked(&self) -> Option<String> {
        String::from_utf16(self.as_slice()).ok()
    }
}

impl fmt::Debug for WString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

impl fmt::Display for WString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl From<&str> for WString {
    fn from(value: &str) -> Self {
        Self::from_str(value)
    }
}

impl From<String> for WString {
    fn from(value: String) -> Self {
        Self::from_str(&value)
    }
}

impl From<&String> for WString {
    fn from(value: &String) -> Self {
        Self::from_str(value)
    }
}

/// Converts Rust and raw wide strings into [`WString`].
pub trait WideString {
    /// Encodes into an owned null-terminated UTF-16 buffer.
    fn to_wstring(&self) -> WString;
}

impl WideString for &str {
    fn to_wstring(&self) -> WString {
        WString::from_str(self)
    }
}

impl WideString for String {
    fn to_wstring(&self) -> WString {
        WString::from_str(self)
    }
}

impl WideString for [u16] {
    fn to_wstring(&self) -> WString {
        WString::from_wide(self)
    }
}

/// Counts the characters of a null-terminated wide string.
///
/// # Safety
///
/// `ptr` must point to a null-terminated UTF-16 string.
pub unsafe fn wide_len(ptr: *const u16) -> usize {
    let mut len = 0;
    while unsafe { *ptr.add(len) } != 0 {
        len += 1;
    }
    len
}

/// Decodes a null-terminated wide string from a raw pointer.
///
/// # Safety
///
/// `ptr` must be null or point to a null-terminated UTF-16 string.
pub unsafe fn from_wide_ptr(ptr: *const u16) -> String {
    if ptr.is_null() {
        return String::new();
    }
    let len = unsafe { wide_len(ptr) };
    String::from_utf16_lossy(unsafe { core::slice::from_raw_parts(ptr, len) })
}

/// Parses a buffer of null-separated strings ending with a double null.
///
/// This is the format of `OPENFILENAME` filters and multi-select results.
pub fn parse_multi(buf: &[u16]) -> Vec<String> {
    buf.split(|&c| c == 0)
        .take_while(|s| !s.is_empty())
        .map(String::from_utf16_lossy)
        .collect()
}

/// Builds a buffer of null-separated strings ending with a double null.
pub fn join_multi<S: AsRef<str>>(items: &[S]) -> WString {
    let mut buf = Vec::new();
    for item in items {
        buf.extend(item.as_ref().encode_utf16());
        buf.push(0);
    }
    buf.push(0);
    if buf.len() == 1 {
        buf.push(0);
    }
    WString(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_round_trip() {
        for text in ["", "hello", "Ação", "日本語", "emoji 🎉 pair", "tab\tnew\nline"] {
            let wide = WString::from_str(text);
            assert_eq!(wide.buf_len(), text.encode_utf16().count() + 1);
            assert_eq!(*wide.as_buf().last().unwrap(), 0);
            assert_eq!(wide.to_string_lossy(), text);
            assert_eq!(wide.to_string_checked().as_deref(), Some(text));
        }
    }

    #[test]
    fn test_from_wide_stops_at_null() {
        let raw = [b'a' as u16, b'b' as u16, 0, b'c' as u16];
        let wide = WString::from_wide(&raw);
        assert_eq!(wide.to_string(), "ab");
        assert_eq!(wide.buf_len(), 3);
    }

    #[test]
    fn test_from_ptr() {
        let wide = WString::from_str("pointer");
        let copy = unsafe { WString::from_ptr(wide.as_ptr()) };
        assert_eq!(copy, wide);
        assert_eq!(unsafe { from_wide_ptr(wide.as_ptr()) }, "pointer");
        assert!(unsafe { WString::from_ptr(core::ptr::null()) }.is_empty());
    }

    #[test]
    fn test_alloc_buf() {
        let mut buf = WString::new_alloc_buf(16);
        assert_eq!(buf.buf_len(), 16);
        assert!(buf.is_empty());
        buf.resize(4);
        assert_eq!(buf.buf_len(), 4);
        assert_eq!(WString::new_alloc_buf(0).buf_len(), 1);
    }

    #[test]
    fn test_unpaired_surrogate() {
        let raw = [0xD800u16, b'x' as u16, 0];
        let wide = WString::from_wide(&raw);
        assert_eq!(wide.to_string_checked(), None);
        assert_eq!(wide.to_string_lossy(), "\u{FFFD}x");
    }

    #[test]
    fn test_multi_strings() {
        let joined = join_multi(&["Text files", "*.txt", "All files", "*.*"]);
        let buf = joined.as_buf();
        assert_eq!(&buf[buf.len() - 2..], &[0, 0]);
        assert_eq!(
            parse_multi(buf),
            ["Text files", "*.txt", "All files", "*.*"]
        );
        assert_eq!(join_multi::<&str>(&[]).as_buf(), &[0, 0]);
        assert!(parse_multi(&[0, 0]).is_empty());
    }
}
