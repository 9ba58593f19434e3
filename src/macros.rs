//! Macros shared by every COM wrapper: interface declaration and vtable dispatch.

#![allow(unused_macros)]

/// Declares a COM interface wrapper.
///
/// The wrapper is a transparent newtype over `IUnknown`, so cloning calls
/// `AddRef` and dropping calls `Release`. `Deref` walks to the parent
/// interface, whose vtable is the leading prefix of this one.
macro_rules! com_interface {
    (
        $(#[$meta:meta])*
        $name:ident: $parent:ty,
        vtable: $vtbl:ident,
        iid: $iid:literal $(,)?
    ) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name(::windows::core::IUnknown);

        unsafe impl ::windows::core::Interface for $name {
            type Vtable = $vtbl;
            const IID: ::windows::core::GUID = ::windows::core::GUID::from_u128($iid);
        }

        impl ::core::ops::Deref for $name {
            type Target = $parent;

            fn deref(&self) -> &Self::Target {
                unsafe { ::core::mem::transmute(self) }
            }
        }
    };
}

/// Invokes a vtable slot on a COM wrapper, passing the object pointer first.
macro_rules! vcall {
    ($this:expr, $slot:ident($($arg:expr),* $(,)?)) => {
        unsafe {
            (::windows::core::Interface::vtable($this).$slot)(
                ::windows::core::Interface::as_raw($this),
                $($arg),*
            )
        }
    };
}

/// Generates a getter for a COM property returning a `BSTR`.
macro_rules! bstr_getter {
    ($(#[$meta:meta])* $fn_name:ident => $slot:ident) => {
        $(#[$meta])*
        pub fn $fn_name(&self) -> $crate::error::Result<::alloc::string::String> {
            let mut raw = ::core::ptr::null();
            $crate::com::hr_ok(vcall!(self, $slot(&mut raw)), stringify!($slot))?;
            Ok(unsafe { $crate::ole::Bstr::from_raw(raw) }.to_string_lossy())
        }
    };
}

/// Generates a setter for a COM property taking a `BSTR`.
macro_rules! bstr_setter {
    ($(#[$meta:meta])* $fn_name:ident => $slot:ident) => {
        $(#[$meta])*
        pub fn $fn_name(&self, value: &str) -> $crate::error::Result<()> {
            let value = $crate::ole::Bstr::from(value);
            $crate::com::hr_ok(vcall!(self, $slot(value.as_ptr())), stringify!($slot))
        }
    };
}

/// Generates a getter/setter pair for a `VARIANT_BOOL` COM property.
macro_rules! bool_property {
    ($get:ident => $get_slot:ident, $put:ident => $put_slot:ident) => {
        #[doc = concat!("Calls `", stringify!($get_slot), "`.")]
        pub fn $get(&self) -> $crate::error::Result<bool> {
            let mut value: i16 = 0;
            $crate::com::hr_ok(vcall!(self, $get_slot(&mut value)), stringify!($get_slot))?;
            Ok(value != 0)
        }

        #[doc = concat!("Calls `", stringify!($put_slot), "`.")]
        pub fn $put(&self, value: bool) -> $crate::error::Result<()> {
            $crate::com::hr_ok(
                vcall!(self, $put_slot($crate::ole::variant_bool(value))),
                stringify!($put_slot),
            )
        }
    };
}

/// Generates a getter for a plain-value COM property (`LONG`, `DATE`, ...).
macro_rules! value_getter {
    ($(#[$meta:meta])* $fn_name:ident => $slot:ident -> $ty:ty) => {
        $(#[$meta])*
        pub fn $fn_name(&self) -> $crate::error::Result<$ty> {
            let mut value = <$ty>::default();
            $crate::com::hr_ok(vcall!(self, $slot(&mut value)), stringify!($slot))?;
            Ok(value)
        }
    };
}

/// Generates a setter for a plain-value COM property.
macro_rules! value_setter {
    ($(#[$meta:meta])* $fn_name:ident => $slot:ident($ty:ty)) => {
        $(#[$meta])*
        pub fn $fn_name(&self, value: $ty) -> $crate::error::Result<()> {
            $crate::com::hr_ok(vcall!(self, $slot(value)), stringify!($slot))
        }
    };
}

/// Generates a getter returning an interface pointer out-parameter.
macro_rules! iface_getter {
    ($(#[$meta:meta])* $fn_name:ident => $slot:ident -> $ty:ty) => {
        $(#[$meta])*
        pub fn $fn_name(&self) -> $crate::error::Result<$ty> {
            let mut raw = ::core::ptr::null_mut();
            $crate::com::hr_ok(vcall!(self, $slot(&mut raw)), stringify!($slot))?;
            unsafe { $crate::com::from_out(raw, stringify!($slot)) }
        }
    };
}

/// Generates a setter taking an interface by reference.
macro_rules! iface_setter {
    ($(#[$meta:meta])* $fn_name:ident => $slot:ident($ty:ty)) => {
        $(#[$meta])*
        pub fn $fn_name(&self, value: &$ty) -> $crate::error::Result<()> {
            $crate::com::hr_ok(
                vcall!(self, $slot(::windows::core::Interface::as_raw(value))),
                stringify!($slot),
            )
        }
    };
}

/// Declares a pointer-sized handle newtype.
macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(*mut ::core::ffi::c_void);

        unsafe impl Send for $name {}
        unsafe impl Sync for $name {}

        impl $name {
            /// The null handle.
            pub const NULL: Self = Self(::core::ptr::null_mut());

            /// Wraps a raw handle value.
            #[inline]
            pub const fn from_ptr(raw: *mut ::core::ffi::c_void) -> Self {
                Self(raw)
            }

            /// Returns the raw handle value.
            #[inline]
            pub const fn ptr(self) -> *mut ::core::ffi::c_void {
                self.0
            }

            /// Returns true if the handle is null.
            #[inline]
            pub fn is_null(self) -> bool {
                self.0.is_null()
            }

            /// Returns `None` for a null handle.
            #[inline]
            pub fn as_opt(self) -> Option<Self> {
                if self.is_null() { None } else { Some(self) }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::NULL
            }
        }

        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}({:#x})", stringify!($name), self.0 as usize)
            }
        }
    };
}
