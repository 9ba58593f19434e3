//! GUID parsing and formatting helpers.

use alloc::{format, string::String};
use windows::core::GUID;

use crate::error::{Result, WinError};

/// Parses a GUID in any of the textual forms `uuid` accepts, braces included.
pub fn parse_guid(text: &str) -> Result<GUID> {
    let trimmed = text.trim().trim_start_matches('{').trim_end_matches('}');
    uuid::Uuid::parse_str(trimmed)
        .map(|id| GUID::from_u128(id.as_u128()))
        .map_err(|_| WinError::InvalidGuid(text.into()))
}

/// Formats a GUID in registry form, `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}`.
pub fn format_guid(guid: &GUID) -> String {
    let id = uuid::Uuid::from_u128(guid.to_u128());
    format!("{{{}}}", id.hyphenated()).to_uppercase()
}
