//! OLE Automation: `IDispatch`, `IEnumUnknown` and the owned `BSTR`,
//! `VARIANT` and `SAFEARRAY` types that cross automation boundaries.

mod bstr;
mod idispatch;
mod ienumunknown;
mod safearray;
mod variant;

pub use bstr::*;
pub use idispatch::*;
pub use ienumunknown::*;
pub use safearray::*;
pub use variant::{OwnedVariant, variant_bool};

pub(crate) use variant::opt_raw;
