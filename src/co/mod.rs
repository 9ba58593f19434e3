//! Constants, grouped by subsystem.
//!
//! Flag sets are `bitflags` types; closed enumerations are Rust enums with the
//! platform value as discriminant; open sets such as window messages are
//! plain constants.

mod gdi;
mod kernel;
mod ole;
mod user;

#[cfg(feature = "comdlg")]
mod comdlg;

#[cfg(feature = "dshow")]
mod dshow;

#[cfg(feature = "shell")]
mod shell;

#[cfg(feature = "taskschd")]
mod taskschd;

#[cfg(feature = "wic")]
mod wic;

pub use gdi::*;
pub use kernel::*;
pub use ole::*;
pub use user::*;

#[cfg(feature = "comdlg")]
pub use comdlg::*;

#[cfg(feature = "dshow")]
pub use dshow::*;

#[cfg(feature = "shell")]
pub use shell::*;

#[cfg(feature = "taskschd")]
pub use taskschd::*;

#[cfg(feature = "wic")]
pub use wic::*;
