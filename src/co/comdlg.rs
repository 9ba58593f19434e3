use bitflags::bitflags;

bitflags! {
    /// `OPENFILENAMEW::Flags` (`OFN_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct OpenFileFlags: u32 {
        const READONLY = 0x0000_0001;
        const OVERWRITEPROMPT = 0x0000_0002;
        const HIDEREADONLY = 0x0000_0004;
        const NOCHANGEDIR = 0x0000_0008;
        const SHOWHELP = 0x0000_0010;
        const ENABLEHOOK = 0x0000_0020;
        const NOVALIDATE = 0x0000_0100;
        const ALLOWMULTISELECT = 0x0000_0200;
        const EXTENSIONDIFFERENT = 0x0000_0400;
        const PATHMUSTEXIST = 0x0000_0800;
        const FILEMUSTEXIST = 0x0000_1000;
        const CREATEPROMPT = 0x0000_2000;
        const SHAREAWARE = 0x0000_4000;
        const NOREADONLYRETURN = 0x0000_8000;
        const NOTESTFILECREATE = 0x0001_0000;
        const NODEREFERENCELINKS = 0x0010_0000;
        const EXPLORER = 0x0008_0000;
        const DONTADDTORECENT = 0x0200_0000;
        const FORCESHOWHIDDEN = 0x1000_0000;
    }
}

bitflags! {
    /// `CHOOSECOLORW::Flags` (`CC_*`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ChooseColorFlags: u32 {
        const RGBINIT = 0x0000_0001;
        const FULLOPEN = 0x0000_0002;
        const PREVENTFULLOPEN = 0x0000_0004;
        const SHOWHELP = 0x0000_0008;
        const ENABLEHOOK = 0x0000_0010;
        const SOLIDCOLOR = 0x0000_0080;
        const ANYCOLOR = 0x0000_0100;
    }
}
