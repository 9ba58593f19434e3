use alloc::vec::Vec;

use windows_sys::Win32::UI::WindowsAndMessaging::{CopyAcceleratorTableW, CreateAcceleratorTableW};

use crate::co::AccelFlags;
use crate::error::{Result, WinError};
use crate::guard::{AccelGuard, Guard};
use crate::handles::HACCEL;
use crate::structs::ACCEL;

impl ACCEL {
    /// Accelerator posting `WM_COMMAND` with `cmd` when `key` is pressed.
    pub const fn new(flags: AccelFlags, key: u16, cmd: u16) -> Self {
        Self { fVirt: flags.bits(), key, cmd }
    }

    pub const fn flags(&self) -> AccelFlags {
        AccelFlags::from_bits_retain(self.fVirt)
    }
}

/// Creates an accelerator table, destroyed when the guard drops.
pub fn create_accelerator_table(entries: &[ACCEL]) -> Result<AccelGuard> {
    if entries.is_empty() {
        return Err(WinError::Msg("accelerator table needs at least one entry"));
    }

    let haccel = unsafe { CreateAcceleratorTableW(entries.as_ptr().cast(), entries.len() as i32) };
    if haccel.is_null() {
        return Err(WinError::last("CreateAcceleratorTableW"));
    }
    Ok(unsafe { Guard::new(HACCEL::from_ptr(haccel)) })
}

impl HACCEL {
    /// Copies the entries of the table.
    pub fn CopyAcceleratorTable(self) -> Result<Vec<ACCEL>> {
        let count = unsafe { CopyAcceleratorTableW(self.ptr(), core::ptr::null_mut(), 0) };
        if count <= 0 {
            return Err(WinError::last("CopyAcceleratorTableW"));
        }

        let mut entries = alloc::vec![ACCEL::default(); count as usize];
        let copied = unsafe { CopyAcceleratorTableW(self.ptr(), entries.as_mut_ptr().cast(), count) };
        entries.truncate(copied.max(0) as usize);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::co::{VK_F5, VK_RETURN};

    #[test]
    fn test_accel_entry() {
        let entry = ACCEL::new(AccelFlags::VIRTKEY | AccelFlags::CONTROL, VK_RETURN, 7);
        assert_eq!(entry.fVirt, 0x09);
        assert_eq!(entry.flags(), AccelFlags::VIRTKEY | AccelFlags::CONTROL);
        assert_eq!((entry.key, entry.cmd), (0x0D, 7));
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(matches!(create_accelerator_table(&[]), Err(WinError::Msg(_))));
    }

    #[cfg(all(windows, feature = "integration-tests"))]
    #[test]
    fn test_copy_table() -> Result<()> {
        let entries = [
            ACCEL::new(AccelFlags::VIRTKEY, VK_F5, 1),
            ACCEL::new(AccelFlags::VIRTKEY | AccelFlags::SHIFT, VK_RETURN, 2),
        ];
        let table = create_accelerator_table(&entries)?;
        let copy = table.CopyAcceleratorTable()?;
        assert_eq!(copy.len(), 2);
        assert_eq!(copy[0].cmd, 1);
        assert_eq!(copy[1].key, VK_RETURN);
        assert!(copy[1].flags().contains(AccelFlags::SHIFT));
        table.close()
    }
}
