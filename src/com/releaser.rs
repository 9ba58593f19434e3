use alloc::vec::Vec;

use windows::core::{IUnknown, Interface};

/// Keeps COM objects alive until they are released together.
///
/// Objects are released in reverse order of insertion, either explicitly with
/// [`Releaser::release_all`] or when the releaser is dropped.
#[derive(Default)]
pub struct Releaser {
    objects: Vec<IUnknown>,
}

impl Releaser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `obj` and returns a new reference to it.
    pub fn add<T: Interface + Clone>(&mut self, obj: T) -> T {
        let copy = obj.clone();
        self.objects.push(super::into_unknown(obj));
        copy
    }

    /// Takes ownership of `obj` without handing a reference back.
    pub fn keep<T: Interface>(&mut self, obj: T) {
        self.objects.push(super::into_unknown(obj));
    }

    /// Number of objects held.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Releases every held object, last added first. Returns how many were released.
    pub fn release_all(&mut self) -> usize {
        let count = self.objects.len();
        while let Some(obj) = self.objects.pop() {
            drop(obj);
        }

        if count > 0 {
            log::trace!("Releaser: released {count} object(s)");
        }
        count
    }
}

impl Drop for Releaser {
    fn drop(&mut self) {
        self.release_all();
    }
}
