#![no_std]
#![doc = include_str!("../README.md")]
#![allow(non_snake_case, non_camel_case_types)]
#![allow(
    clippy::not_unsafe_ptr_arg_deref,
    clippy::missing_transmute_annotations,
    clippy::too_many_arguments,
    clippy::upper_case_acronyms,
)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

pub mod callbacks;
pub mod co;
pub mod com;
pub mod error;
pub mod gdi32;
pub mod guard;
pub mod guid;
pub mod handles;
pub mod kernel32;
pub mod ole;
pub mod string;
pub mod structs;
pub mod user32;

#[cfg(feature = "comdlg")]
pub mod comdlg32;

#[cfg(feature = "dshow")]
pub mod dshow;

#[cfg(feature = "shell")]
pub mod shell;

#[cfg(feature = "taskschd")]
pub mod taskschd;

#[cfg(feature = "wic")]
pub mod wic;

pub use error::{Result, WinError};
pub use handles::*;
pub use string::WString;
