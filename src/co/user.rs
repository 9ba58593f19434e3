use bitflags::bitflags;

bitflags! {
    /// Window styles (`WS_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WindowStyle: u32 {
        const OVERLAPPED = 0x0000_0000;
        const POPUP = 0x8000_0000;
        const CHILD = 0x4000_0000;
        const MINIMIZE = 0x2000_0000;
        const VISIBLE = 0x1000_0000;
        const DISABLED = 0x0800_0000;
        const CLIPSIBLINGS = 0x0400_0000;
        const CLIPCHILDREN = 0x0200_0000;
        const MAXIMIZE = 0x0100_0000;
        const CAPTION = 0x00C0_0000;
        const BORDER = 0x0080_0000;
        const DLGFRAME = 0x0040_0000;
        const VSCROLL = 0x0020_0000;
        const HSCROLL = 0x0010_0000;
        const SYSMENU = 0x0008_0000;
        const THICKFRAME = 0x0004_0000;
        const GROUP = 0x0002_0000;
        const TABSTOP = 0x0001_0000;
        const MINIMIZEBOX = 0x0002_0000;
        const MAXIMIZEBOX = 0x0001_0000;
        const OVERLAPPEDWINDOW = 0x00CF_0000;
        const POPUPWINDOW = 0x8088_0000;
    }
}

bitflags! {
    /// Extended window styles (`WS_EX_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WindowStyleEx: u32 {
        const DLGMODALFRAME = 0x0000_0001;
        const NOPARENTNOTIFY = 0x0000_0004;
        const TOPMOST = 0x0000_0008;
        const ACCEPTFILES = 0x0000_0010;
        const TRANSPARENT = 0x0000_0020;
        const MDICHILD = 0x0000_0040;
        const TOOLWINDOW = 0x0000_0080;
        const WINDOWEDGE = 0x0000_0100;
        const CLIENTEDGE = 0x0000_0200;
        const CONTEXTHELP = 0x0000_0400;
        const RIGHT = 0x0000_1000;
        const RTLREADING = 0x0000_2000;
        const LEFTSCROLLBAR = 0x0000_4000;
        const CONTROLPARENT = 0x0001_0000;
        const STATICEDGE = 0x0002_0000;
        const APPWINDOW = 0x0004_0000;
        const OVERLAPPEDWINDOW = 0x0000_0300;
        const LAYERED = 0x0008_0000;
        const NOINHERITLAYOUT = 0x0010_0000;
        const LAYOUTRTL = 0x0040_0000;
        const COMPOSITED = 0x0200_0000;
        const NOACTIVATE = 0x0800_0000;
    }
}

bitflags! {
    /// Window class styles (`CS_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ClassStyle: u32 {
        const VREDRAW = 0x0001;
        const HREDRAW = 0x0002;
        const DBLCLKS = 0x0008;
        const OWNDC = 0x0020;
        const CLASSDC = 0x0040;
        const PARENTDC = 0x0080;
        const NOCLOSE = 0x0200;
        const SAVEBITS = 0x0800;
        const BYTEALIGNCLIENT = 0x1000;
        const BYTEALIGNWINDOW = 0x2000;
        const GLOBALCLASS = 0x4000;
        const DROPSHADOW = 0x0002_0000;
    }
}

/// `ShowWindow` commands (`SW_*`).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShowCmd {
    Hide = 0,
    ShowNormal = 1,
    ShowMinimized = 2,
    ShowMaximized = 3,
    ShowNoActivate = 4,
    Show = 5,
    Minimize = 6,
    ShowMinNoActive = 7,
    ShowNa = 8,
    Restore = 9,
    ShowDefault = 10,
    ForceMinimize = 11,
}

bitflags! {
    /// `SetWindowPos` flags (`SWP_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SetWindowPosFlags: u32 {
        const NOSIZE = 0x0001;
        const NOMOVE = 0x0002;
        const NOZORDER = 0x0004;
        const NOREDRAW = 0x0008;
        const NOACTIVATE = 0x0010;
        const FRAMECHANGED = 0x0020;
        const SHOWWINDOW = 0x0040;
        const HIDEWINDOW = 0x0080;
        const NOCOPYBITS = 0x0100;
        const NOOWNERZORDER = 0x0200;
        const NOSENDCHANGING = 0x0400;
        const DEFERERASE = 0x2000;
        const ASYNCWINDOWPOS = 0x4000;
    }
}

bitflags! {
    /// Menu item flags for `AppendMenu`, `DeleteMenu`, `EnableMenuItem` (`MF_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MenuFlags: u32 {
        const STRING = 0x0000;
        const BYCOMMAND = 0x0000;
        const ENABLED = 0x0000;
        const UNCHECKED = 0x0000;
        const GRAYED = 0x0001;
        const DISABLED = 0x0002;
        const BITMAP = 0x0004;
        const CHECKED = 0x0008;
        const POPUP = 0x0010;
        const MENUBARBREAK = 0x0020;
        const MENUBREAK = 0x0040;
        const OWNERDRAW = 0x0100;
        const BYPOSITION = 0x0400;
        const SEPARATOR = 0x0800;
        const DEFAULT = 0x1000;
        const RIGHTJUSTIFY = 0x4000;
    }
}

bitflags! {
    /// `MENUITEMINFO::fMask` flags (`MIIM_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MenuItemMask: u32 {
        const STATE = 0x0001;
        const ID = 0x0002;
        const SUBMENU = 0x0004;
        const CHECKMARKS = 0x0008;
        const TYPE = 0x0010;
        const DATA = 0x0020;
        const STRING = 0x0040;
        const BITMAP = 0x0080;
        const FTYPE = 0x0100;
    }
}

bitflags! {
    /// `MENUITEMINFO::fType` flags (`MFT_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MenuItemType: u32 {
        const STRING = 0x0000;
        const BITMAP = 0x0004;
        const MENUBARBREAK = 0x0020;
        const MENUBREAK = 0x0040;
        const OWNERDRAW = 0x0100;
        const RADIOCHECK = 0x0200;
        const SEPARATOR = 0x0800;
        const RIGHTORDER = 0x2000;
        const RIGHTJUSTIFY = 0x4000;
    }
}

bitflags! {
    /// `MENUITEMINFO::fState` flags (`MFS_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MenuItemState: u32 {
        const ENABLED = 0x0000;
        const UNCHECKED = 0x0000;
        const UNHILITE = 0x0000;
        const GRAYED = 0x0003;
        const DISABLED = 0x0003;
        const CHECKED = 0x0008;
        const HILITE = 0x0080;
        const DEFAULT = 0x1000;
    }
}

bitflags! {
    /// `TrackPopupMenu` flags (`TPM_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TrackPopupFlags: u32 {
        const LEFTALIGN = 0x0000;
        const TOPALIGN = 0x0000;
        const LEFTBUTTON = 0x0000;
        const RIGHTBUTTON = 0x0002;
        const CENTERALIGN = 0x0004;
        const RIGHTALIGN = 0x0008;
        const VCENTERALIGN = 0x0010;
        const BOTTOMALIGN = 0x0020;
        const NONOTIFY = 0x0080;
        const RETURNCMD = 0x0100;
        const RECURSE = 0x0001;
        const NOANIMATION = 0x4000;
    }
}

bitflags! {
    /// `ACCEL::fVirt` flags (`F*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AccelFlags: u8 {
        const VIRTKEY = 0x01;
        const NOINVERT = 0x02;
        const SHIFT = 0x04;
        const CONTROL = 0x08;
        const ALT = 0x10;
    }
}

bitflags! {
    /// `MessageBox` styles (`MB_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MessageBoxStyle: u32 {
        const OK = 0x0000_0000;
        const OKCANCEL = 0x0000_0001;
        const ABORTRETRYIGNORE = 0x0000_0002;
        const YESNOCANCEL = 0x0000_0003;
        const YESNO = 0x0000_0004;
        const RETRYCANCEL = 0x0000_0005;
        const CANCELTRYCONTINUE = 0x0000_0006;
        const ICONERROR = 0x0000_0010;
        const ICONQUESTION = 0x0000_0020;
        const ICONWARNING = 0x0000_0030;
        const ICONINFORMATION = 0x0000_0040;
        const DEFBUTTON2 = 0x0000_0100;
        const DEFBUTTON3 = 0x0000_0200;
        const APPLMODAL = 0x0000_0000;
        const SYSTEMMODAL = 0x0000_1000;
        const TASKMODAL = 0x0000_2000;
        const SETFOREGROUND = 0x0001_0000;
        const TOPMOST = 0x0004_0000;
    }
}

/// Button pressed to close a message box (`ID*`).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DlgId {
    Ok = 1,
    Cancel = 2,
    Abort = 3,
    Retry = 4,
    Ignore = 5,
    Yes = 6,
    No = 7,
    TryAgain = 10,
    Continue = 11,
}

impl DlgId {
    pub fn from_raw(value: i32) -> Option<Self> {
        Some(match value {
            1 => Self::Ok,
            2 => Self::Cancel,
            3 => Self::Abort,
            4 => Self::Retry,
            5 => Self::Ignore,
            6 => Self::Yes,
            7 => Self::No,
            10 => Self::TryAgain,
            11 => Self::Continue,
            _ => return None,
        })
    }
}

/// `PeekMessage` removal flags (`PM_*`).
pub const PM_NOREMOVE: u32 = 0x0000;
pub const PM_REMOVE: u32 = 0x0001;
pub const PM_NOYIELD: u32 = 0x0002;

/// Window hook types (`WH_*`).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HookId {
    MsgFilter = -1,
    GetMessage = 3,
    CallWndProc = 4,
    Cbt = 5,
    Keyboard = 2,
    Mouse = 7,
    CallWndProcRet = 12,
    KeyboardLl = 13,
    MouseLl = 14,
}

/// `GetSystemMetrics` indexes (`SM_*`).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemMetric {
    CxScreen = 0,
    CyScreen = 1,
    CxVScroll = 2,
    CyHScroll = 3,
    CyCaption = 4,
    CxBorder = 5,
    CyBorder = 6,
    CxIcon = 11,
    CyIcon = 12,
    CxCursor = 13,
    CyCursor = 14,
    CyMenu = 15,
    CxMinTrack = 34,
    CyMinTrack = 35,
    CxSmIcon = 49,
    CySmIcon = 50,
    CMonitors = 80,
    CxVirtualScreen = 78,
    CyVirtualScreen = 79,
}

/// Predefined cursors for `LoadCursor` (`IDC_*`).
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdcCursor {
    Arrow = 32512,
    IBeam = 32513,
    Wait = 32514,
    Cross = 32515,
    UpArrow = 32516,
    SizeNwse = 32642,
    SizeNesw = 32643,
    SizeWe = 32644,
    SizeNs = 32645,
    SizeAll = 32646,
    No = 32648,
    Hand = 32649,
    AppStarting = 32650,
    Help = 32651,
}

/// Predefined icons for `LoadIcon` (`IDI_*`).
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdiIcon {
    Application = 32512,
    Error = 32513,
    Question = 32514,
    Warning = 32515,
    Information = 32516,
    WinLogo = 32517,
    Shield = 32518,
}

/// System colors for class backgrounds and `GetSysColor` (`COLOR_*`).
pub const COLOR_SCROLLBAR: i32 = 0;
pub const COLOR_BACKGROUND: i32 = 1;
pub const COLOR_WINDOW: i32 = 5;
pub const COLOR_WINDOWTEXT: i32 = 8;
pub const COLOR_BTNFACE: i32 = 15;
pub const COLOR_HIGHLIGHT: i32 = 13;

/// `CW_USEDEFAULT` for `CreateWindowEx` position and size.
pub const CW_USEDEFAULT: i32 = 0x8000_0000_u32 as i32;

/// Window messages (`WM_*`).
pub const WM_NULL: u32 = 0x0000;
pub const WM_CREATE: u32 = 0x0001;
pub const WM_DESTROY: u32 = 0x0002;
pub const WM_MOVE: u32 = 0x0003;
pub const WM_SIZE: u32 = 0x0005;
pub const WM_ACTIVATE: u32 = 0x0006;
pub const WM_SETFOCUS: u32 = 0x0007;
pub const WM_KILLFOCUS: u32 = 0x0008;
pub const WM_ENABLE: u32 = 0x000A;
pub const WM_SETTEXT: u32 = 0x000C;
pub const WM_GETTEXT: u32 = 0x000D;
pub const WM_GETTEXTLENGTH: u32 = 0x000E;
pub const WM_PAINT: u32 = 0x000F;
pub const WM_CLOSE: u32 = 0x0010;
pub const WM_QUIT: u32 = 0x0012;
pub const WM_ERASEBKGND: u32 = 0x0014;
pub const WM_SHOWWINDOW: u32 = 0x0018;
pub const WM_SETCURSOR: u32 = 0x0020;
pub const WM_GETMINMAXINFO: u32 = 0x0024;
pub const WM_SETFONT: u32 = 0x0030;
pub const WM_GETFONT: u32 = 0x0031;
pub const WM_NOTIFY: u32 = 0x004E;
pub const WM_NCCREATE: u32 = 0x0081;
pub const WM_NCDESTROY: u32 = 0x0082;
pub const WM_KEYDOWN: u32 = 0x0100;
pub const WM_KEYUP: u32 = 0x0101;
pub const WM_CHAR: u32 = 0x0102;
pub const WM_SYSKEYDOWN: u32 = 0x0104;
pub const WM_SYSKEYUP: u32 = 0x0105;
pub const WM_INITDIALOG: u32 = 0x0110;
pub const WM_COMMAND: u32 = 0x0111;
pub const WM_SYSCOMMAND: u32 = 0x0112;
pub const WM_TIMER: u32 = 0x0113;
pub const WM_INITMENUPOPUP: u32 = 0x0117;
pub const WM_MENUCOMMAND: u32 = 0x0126;
pub const WM_MOUSEMOVE: u32 = 0x0200;
pub const WM_LBUTTONDOWN: u32 = 0x0201;
pub const WM_LBUTTONUP: u32 = 0x0202;
pub const WM_LBUTTONDBLCLK: u32 = 0x0203;
pub const WM_RBUTTONDOWN: u32 = 0x0204;
pub const WM_RBUTTONUP: u32 = 0x0205;
pub const WM_MBUTTONDOWN: u32 = 0x0207;
pub const WM_MBUTTONUP: u32 = 0x0208;
pub const WM_MOUSEWHEEL: u32 = 0x020A;
pub const WM_CONTEXTMENU: u32 = 0x007B;
pub const WM_DROPFILES: u32 = 0x0233;
pub const WM_USER: u32 = 0x0400;
pub const WM_APP: u32 = 0x8000;

/// Virtual-key codes (`VK_*`).
pub const VK_BACK: u16 = 0x08;
pub const VK_TAB: u16 = 0x09;
pub const VK_RETURN: u16 = 0x0D;
pub const VK_SHIFT: u16 = 0x10;
pub const VK_CONTROL: u16 = 0x11;
pub const VK_MENU: u16 = 0x12;
pub const VK_ESCAPE: u16 = 0x1B;
pub const VK_SPACE: u16 = 0x20;
pub const VK_LEFT: u16 = 0x25;
pub const VK_UP: u16 = 0x26;
pub const VK_RIGHT: u16 = 0x27;
pub const VK_DOWN: u16 = 0x28;
pub const VK_DELETE: u16 = 0x2E;
pub const VK_F1: u16 = 0x70;
pub const VK_F5: u16 = 0x74;
pub const VK_F10: u16 = 0x79;
pub const VK_F12: u16 = 0x7B;

/// Hook codes passed to hook procedures (`HC_*`).
pub const HC_ACTION: i32 = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_styles() {
        let composed = WindowStyle::OVERLAPPED
            | WindowStyle::CAPTION
            | WindowStyle::SYSMENU
            | WindowStyle::THICKFRAME
            | WindowStyle::MINIMIZEBOX
            | WindowStyle::MAXIMIZEBOX;
        assert_eq!(composed, WindowStyle::OVERLAPPEDWINDOW);
        assert_eq!(
            WindowStyleEx::WINDOWEDGE | WindowStyleEx::CLIENTEDGE,
            WindowStyleEx::OVERLAPPEDWINDOW
        );
    }

    #[test]
    fn test_dlg_id() {
        assert_eq!(DlgId::from_raw(6), Some(DlgId::Yes));
        assert_eq!(DlgId::from_raw(0), None);
        assert_eq!(CW_USEDEFAULT, i32::MIN);
    }
}
