//! Byte-exact mirrors of platform SDK structures.
//!
//! Field order, size and alignment follow the SDK headers; the layout tests
//! compare every mirror against the `windows-sys` definition.

/// Implements `Default` as the all-zero bit pattern, which every mirror
/// here accepts (null pointers, `None` callbacks, zero integers).
macro_rules! zeroed_default {
    ($($name:ty),* $(,)?) => {
        $(
            impl Default for $name {
                fn default() -> Self {
                    unsafe { core::mem::zeroed() }
                }
            }
        )*
    };
}

mod foundation;
mod gdi;
mod ole;
mod user;

#[cfg(feature = "comdlg")]
mod comdlg;

#[cfg(feature = "dshow")]
mod dshow;

#[cfg(feature = "shell")]
mod shell;

#[cfg(feature = "wic")]
mod wic;

pub use foundation::*;
pub use gdi::*;
pub use ole::*;
pub use user::*;

#[cfg(feature = "comdlg")]
pub use comdlg::*;

#[cfg(feature = "dshow")]
pub use dshow::*;

#[cfg(feature = "shell")]
pub use shell::*;

#[cfg(feature = "wic")]
pub use wic::*;
