//! Shell COM interfaces: the taskbar button, shell items and the
//! Vista-style file dialogs.
//!
//! Every interface requires COM to be initialized on the calling thread;
//! the file dialogs and the taskbar need a single-threaded apartment.

mod file_dialog;
mod item;
mod taskbar;

pub use file_dialog::*;
pub use item::*;
pub use taskbar::*;
