use bitflags::bitflags;

/// Taskbar progress state for `ITaskbarList3::SetProgressState` (`TBPF_*`).
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskbarProgress {
    NoProgress = 0x0,
    Indeterminate = 0x1,
    Normal = 0x2,
    Error = 0x4,
    Paused = 0x8,
}

bitflags! {
    /// `THUMBBUTTON::dwMask` (`THB_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ThumbButtonMask: u32 {
        const BITMAP = 0x1;
        const ICON = 0x2;
        const TOOLTIP = 0x4;
        const FLAGS = 0x8;
    }
}

bitflags! {
    /// `THUMBBUTTON::dwFlags` (`THBF_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ThumbButtonFlags: u32 {
        const ENABLED = 0x0;
        const DISABLED = 0x1;
        const DISMISSONCLICK = 0x2;
        const NOBACKGROUND = 0x4;
        const HIDDEN = 0x8;
        const NONINTERACTIVE = 0x10;
    }
}

bitflags! {
    /// `ITaskbarList4::SetTabProperties` flags (`STPF_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TabProperties: u32 {
        const NONE = 0x0;
        const USEAPPTHUMBNAILALWAYS = 0x1;
        const USEAPPTHUMBNAILWHENACTIVE = 0x2;
        const USEAPPPEEKALWAYS = 0x4;
        const USEAPPPEEKWHENACTIVE = 0x8;
    }
}

/// Display name forms for `IShellItem::GetDisplayName` (`SIGDN_*`).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sigdn {
    NormalDisplay = 0,
    ParentRelativeParsing = 0x8001_8001_u32 as i32,
    DesktopAbsoluteParsing = 0x8002_8000_u32 as i32,
    ParentRelativeEditing = 0x8003_1001_u32 as i32,
    DesktopAbsoluteEditing = 0x8004_c000_u32 as i32,
    FileSysPath = 0x8005_8000_u32 as i32,
    Url = 0x8006_8000_u32 as i32,
    ParentRelativeForAddressBar = 0x8007_c001_u32 as i32,
    ParentRelative = 0x8008_0001_u32 as i32,
    ParentRelativeForUi = 0x8009_4001_u32 as i32,
}

bitflags! {
    /// `IShellItem::Compare` hints (`SICHINT_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CompareHint: u32 {
        const DISPLAY = 0x0;
        const ALLFIELDS = 0x8000_0000;
        const CANONICAL = 0x1000_0000;
        const TEST_FILESYSPATH_IF_NOT_EQUAL = 0x2000_0000;
    }
}

bitflags! {
    /// `IFileDialog::SetOptions` (`FOS_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FileOpenOptions: u32 {
        const OVERWRITEPROMPT = 0x0000_0002;
        const STRICTFILETYPES = 0x0000_0004;
        const NOCHANGEDIR = 0x0000_0008;
        const PICKFOLDERS = 0x0000_0020;
        const FORCEFILESYSTEM = 0x0000_0040;
        const ALLNONSTORAGEITEMS = 0x0000_0080;
        const NOVALIDATE = 0x0000_0100;
        const ALLOWMULTISELECT = 0x0000_0200;
        const PATHMUSTEXIST = 0x0000_0800;
        const FILEMUSTEXIST = 0x0000_1000;
        const CREATEPROMPT = 0x0000_2000;
        const SHAREAWARE = 0x0000_4000;
        const NOREADONLYRETURN = 0x0000_8000;
        const NOTESTFILECREATE = 0x0001_0000;
        const HIDEMRUPLACES = 0x0002_0000;
        const HIDEPINNEDPLACES = 0x0004_0000;
        const NODEREFERENCELINKS = 0x0010_0000;
        const DONTADDTORECENT = 0x0200_0000;
        const FORCESHOWHIDDEN = 0x1000_0000;
        const DEFAULTNOMINIMODE = 0x2000_0000;
        const FORCEPREVIEWPANEON = 0x4000_0000;
    }
}

/// `IFileDialog::AddPlace` position (`FDAP_*`).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacePosition {
    Bottom = 0,
    Top = 1,
}

/// `HRESULT_FROM_WIN32(ERROR_CANCELLED)`, returned by `IModalWindow::Show` when the user cancels.
pub const HRESULT_CANCELLED: i32 = 0x8007_04C7_u32 as i32;

bitflags! {
    /// Shell item attributes (`SFGAO_*`), queried with `IShellItem::GetAttributes`.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ShellAttributes: u32 {
        const CANCOPY = 0x1;
        const CANMOVE = 0x2;
        const CANLINK = 0x4;
        const STORAGE = 0x8;
        const CANRENAME = 0x10;
        const CANDELETE = 0x20;
        const HASPROPSHEET = 0x40;
        const DROPTARGET = 0x100;
        const ENCRYPTED = 0x2000;
        const ISSLOW = 0x4000;
        const GHOSTED = 0x8000;
        const LINK = 0x1_0000;
        const SHARE = 0x2_0000;
        const READONLY = 0x4_0000;
        const HIDDEN = 0x8_0000;
        const FILESYSANCESTOR = 0x1000_0000;
        const FOLDER = 0x2000_0000;
        const FILESYSTEM = 0x4000_0000;
        const HASSUBFOLDER = 0x8000_0000;
        const STREAM = 0x40_0000;
    }
}
