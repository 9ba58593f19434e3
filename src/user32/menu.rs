use alloc::string::String;

use windows_sys::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CheckMenuItem, CreateMenu, CreatePopupMenu, DeleteMenu, DrawMenuBar, EnableMenuItem, GetMenu,
    GetMenuItemCount, GetMenuItemID, GetMenuItemInfoW, GetSubMenu, InsertMenuItemW, RemoveMenu, SetMenu,
    SetMenuItemInfoW, TrackPopupMenu,
};

use crate::co::{MenuFlags, MenuItemMask, MenuItemState, MenuItemType, TrackPopupFlags};
use crate::error::{Result, WinError};
use crate::guard::{Guard, MenuGuard};
use crate::handles::{HMENU, HWND};
use crate::string::WString;
use crate::structs::{MENUITEMINFOW, POINT};

/// Creates an empty menu bar.
pub fn create_menu() -> Result<MenuGuard> {
    let hmenu = unsafe { CreateMenu() };
    if hmenu.is_null() {
        return Err(WinError::last("CreateMenu"));
    }
    Ok(unsafe { Guard::new(HMENU::from_ptr(hmenu)) })
}

/// Creates an empty drop-down or context menu.
pub fn create_popup_menu() -> Result<MenuGuard> {
    let hmenu = unsafe { CreatePopupMenu() };
    if hmenu.is_null() {
        return Err(WinError::last("CreatePopupMenu"));
    }
    Ok(unsafe { Guard::new(HMENU::from_ptr(hmenu)) })
}

/// Builder for the `MENUITEMINFOW` passed to `InsertMenuItem` and
/// `SetMenuItemInfo`. Each setter adds its `MIIM_*` bit to the mask.
#[derive(Debug, Clone)]
pub struct MenuItemInfo {
    raw: MENUITEMINFOW,
    text: Option<WString>,
}

impl Default for MenuItemInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuItemInfo {
    pub fn new() -> Self {
        Self { raw: MENUITEMINFOW::new(), text: None }
    }

    fn mask(mut self, mask: MenuItemMask) -> Self {
        self.raw.fMask |= mask.bits();
        self
    }

    pub fn id(mut self, id: u32) -> Self {
        self.raw.wID = id;
        self.mask(MenuItemMask::ID)
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(WString::from_str(text));
        self.mask(MenuItemMask::STRING)
    }

    pub fn kind(mut self, kind: MenuItemType) -> Self {
        self.raw.fType = kind.bits();
        self.mask(MenuItemMask::FTYPE)
    }

    pub fn state(mut self, state: MenuItemState) -> Self {
        self.raw.fState = state.bits();
        self.mask(MenuItemMask::STATE)
    }

    pub fn submenu(mut self, submenu: HMENU) -> Self {
        self.raw.hSubMenu = submenu;
        self.mask(MenuItemMask::SUBMENU)
    }

    pub fn data(mut self, data: usize) -> Self {
        self.raw.dwItemData = data;
        self.mask(MenuItemMask::DATA)
    }

    /// Returns the struct with the text pointer bound to this builder.
    fn as_raw(&mut self) -> MENUITEMINFOW {
        if let Some(text) = self.text.as_mut() {
            self.raw.cch = text.str_len() as u32;
            self.raw.dwTypeData = text.as_mut_ptr();
        }
        self.raw
    }
}

/// Decoded menu item, as returned by [`HMENU::GetMenuItemInfo`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItem {
    pub id: u32,
    pub kind: MenuItemType,
    pub state: MenuItemState,
    pub submenu: HMENU,
    pub data: usize,
    pub text: String,
}

impl HMENU {
    /// Appends an item. `text` is `None` for separators.
    pub fn AppendMenu(self, flags: MenuFlags, id: usize, text: Option<&str>) -> Result<()> {
        let text = text.map(WString::from_str);
        let ptr = text.as_ref().map_or(core::ptr::null(), |t| t.as_ptr());
        match unsafe { AppendMenuW(self.ptr(), flags.bits(), id, ptr) } {
            0 => Err(WinError::last("AppendMenuW")),
            _ => Ok(()),
        }
    }

    /// Appends `submenu` as a drop-down. The submenu is destroyed with this
    /// menu, so pass a leaked guard.
    pub fn AppendSubMenu(self, text: &str, submenu: HMENU) -> Result<()> {
        self.AppendMenu(MenuFlags::POPUP | MenuFlags::STRING, submenu.ptr() as usize, Some(text))
    }

    pub fn AppendSeparator(self) -> Result<()> {
        self.AppendMenu(MenuFlags::SEPARATOR, 0, None)
    }

    pub fn InsertMenuItem(self, item: u32, by_position: bool, info: &mut MenuItemInfo) -> Result<()> {
        let raw = info.as_raw();
        match unsafe { InsertMenuItemW(self.ptr(), item, by_position as i32, (&raw as *const MENUITEMINFOW).cast()) } {
            0 => Err(WinError::last("InsertMenuItemW")),
            _ => Ok(()),
        }
    }

    pub fn SetMenuItemInfo(self, item: u32, by_position: bool, info: &mut MenuItemInfo) -> Result<()> {
        let raw = info.as_raw();
        match unsafe { SetMenuItemInfoW(self.ptr(), item, by_position as i32, (&raw as *const MENUITEMINFOW).cast()) } {
            0 => Err(WinError::last("SetMenuItemInfoW")),
            _ => Ok(()),
        }
    }

    /// Reads an item, text included.
    pub fn GetMenuItemInfo(self, item: u32, by_position: bool) -> Result<MenuItem> {
        let mask = MenuItemMask::ID
            | MenuItemMask::FTYPE
            | MenuItemMask::STATE
            | MenuItemMask::SUBMENU
            | MenuItemMask::DATA
            | MenuItemMask::STRING;
        let mut raw = MENUITEMINFOW { fMask: mask.bits(), ..MENUITEMINFOW::new() };

        // First pass with a null buffer reports the text length.
        self.get_item_raw(item, by_position, &mut raw)?;
        let mut text = WString::new_alloc_buf(raw.cch as usize + 1);
        if raw.cch > 0 {
            raw.dwTypeData = text.as_mut_ptr();
            raw.cch += 1;
            self.get_item_raw(item, by_position, &mut raw)?;
        }

        Ok(MenuItem {
            id: raw.wID,
            kind: MenuItemType::from_bits_retain(raw.fType),
            state: MenuItemState::from_bits_retain(raw.fState),
            submenu: raw.hSubMenu,
            data: raw.dwItemData,
            text: text.to_string_lossy(),
        })
    }

    fn get_item_raw(self, item: u32, by_position: bool, raw: &mut MENUITEMINFOW) -> Result<()> {
        match unsafe { GetMenuItemInfoW(self.ptr(), item, by_position as i32, (raw as *mut MENUITEMINFOW).cast()) } {
            0 => Err(WinError::last("GetMenuItemInfoW")),
            _ => Ok(()),
        }
    }

    pub fn GetMenuItemCount(self) -> Result<u32> {
        match unsafe { GetMenuItemCount(self.ptr()) } {
            -1 => Err(WinError::last("GetMenuItemCount")),
            count => Ok(count as u32),
        }
    }

    /// Command id at `pos`; `None` for submenus and invalid positions.
    pub fn GetMenuItemID(self, pos: i32) -> Option<u32> {
        match unsafe { GetMenuItemID(self.ptr(), pos) } {
            u32::MAX => None,
            id => Some(id),
        }
    }

    pub fn GetSubMenu(self, pos: i32) -> Option<HMENU> {
        HMENU::from_ptr(unsafe { GetSubMenu(self.ptr(), pos) }).as_opt()
    }

    /// Deletes an item, destroying its submenu if any.
    pub fn DeleteMenu(self, item: u32, flags: MenuFlags) -> Result<()> {
        match unsafe { DeleteMenu(self.ptr(), item, flags.bits()) } {
            0 => Err(WinError::last("DeleteMenu")),
            _ => Ok(()),
        }
    }

    /// Removes an item without destroying its submenu.
    pub fn RemoveMenu(self, item: u32, flags: MenuFlags) -> Result<()> {
        match unsafe { RemoveMenu(self.ptr(), item, flags.bits()) } {
            0 => Err(WinError::last("RemoveMenu")),
            _ => Ok(()),
        }
    }

    /// Returns the previous state (`MF_GRAYED`, `MF_DISABLED` bits).
    pub fn EnableMenuItem(self, item: u32, flags: MenuFlags) -> Result<MenuFlags> {
        match unsafe { EnableMenuItem(self.ptr(), item, flags.bits()) } {
            -1 => Err(WinError::Msg("EnableMenuItem: menu item does not exist")),
            prev => Ok(MenuFlags::from_bits_retain(prev as u32)),
        }
    }

    /// Returns true if the item was previously checked.
    pub fn CheckMenuItem(self, item: u32, flags: MenuFlags) -> Result<bool> {
        match unsafe { CheckMenuItem(self.ptr(), item, flags.bits()) } {
            u32::MAX => Err(WinError::Msg("CheckMenuItem: menu item does not exist")),
            prev => Ok(prev & MenuFlags::CHECKED.bits() != 0),
        }
    }

    /// Shows the menu at `pt` in screen coordinates.
    ///
    /// With `TPM_RETURNCMD` the chosen command id is returned, zero when the
    /// menu was dismissed; otherwise the command is posted to `owner` as
    /// `WM_COMMAND` and zero is returned.
    pub fn TrackPopupMenu(self, flags: TrackPopupFlags, pt: POINT, owner: HWND) -> Result<u32> {
        let ret = unsafe { TrackPopupMenu(self.ptr(), flags.bits(), pt.x, pt.y, 0, owner.ptr(), core::ptr::null()) };
        if flags.contains(TrackPopupFlags::RETURNCMD) {
            Ok(ret as u32)
        } else if ret == 0 {
            Err(WinError::last("TrackPopupMenu"))
        } else {
            Ok(0)
        }
    }
}

impl HWND {
    /// Assigns a menu bar; `HMENU::NULL` removes it. The old menu is not
    /// destroyed.
    pub fn SetMenu(self, hmenu: HMENU) -> Result<()> {
        match unsafe { SetMenu(self.ptr(), hmenu.ptr()) } {
            0 => Err(WinError::last("SetMenu")),
            _ => Ok(()),
        }
    }

    pub fn GetMenu(self) -> Option<HMENU> {
        HMENU::from_ptr(unsafe { GetMenu(self.ptr()) }).as_opt()
    }

    pub fn DrawMenuBar(self) -> Result<()> {
        match unsafe { DrawMenuBar(self.ptr()) } {
            0 => Err(WinError::last("DrawMenuBar")),
            _ => Ok(()),
        }
    }
}
