//! Windows Imaging Component: decoding image files, converting pixel
//! formats and scaling.
//!
//! ```ignore
//! use winabi::co::{CoInit, DecodeOptions, pixel_format};
//! use winabi::com::initialize;
//! use winabi::wic::IWICImagingFactory;
//!
//! let _com = initialize(CoInit::APARTMENTTHREADED)?;
//! let factory = IWICImagingFactory::create()?;
//! let decoder = factory.CreateDecoderFromFilename("C:\\images\\logo.png", DecodeOptions::CacheOnLoad)?;
//! let frame = decoder.GetFrame(0)?;
//! let bgra = factory.convert(&frame, &pixel_format::BGRA_32BPP)?;
//! let pixels = bgra.copy_all_pixels(4)?;
//! ```

mod decoder;
mod factory;
mod source;

pub use decoder::*;
pub use factory::*;
pub use source::*;

#[cfg(all(test, windows, feature = "integration-tests"))]
mod integration {
    use super::*;
    use crate::co::{AlphaChannelOption, CoInit, DecodeOptions, InterpolationMode, pixel_format};
    use crate::com::initialize;
    use crate::error::{Result, WinError};
    use crate::gdi32::create_dib_section;
    use crate::handles::HDC;
    use crate::structs::{BITMAPINFO, WICRect};

    #[test]
    fn test_memory_bitmap_pipeline() -> Result<()> {
        let _com = initialize(CoInit::APARTMENTTHREADED)?;
        let factory = IWICImagingFactory::create()?;

        // 2x2 BGR: blue, green / red, white.
        let pixels = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        let bitmap = factory.CreateBitmapFromMemory(2, 2, &pixel_format::BGR_24BPP, 6, &pixels)?;
        bitmap.SetResolution(144.0, 144.0)?;
        assert_eq!(bitmap.GetResolution()?, (144.0, 144.0));

        let bgra = factory.convert(&bitmap, &pixel_format::BGRA_32BPP)?;
        assert_eq!(bgra.GetPixelFormat()?, pixel_format::BGRA_32BPP);
        let out = bgra.copy_all_pixels(4)?;
        assert_eq!(out[8..12], [0, 0, 255, 255]);

        let mut one = [0u8; 4];
        bgra.CopyPixels(Some(&WICRect::new(1, 1, 1, 1)), 4, &mut one)?;
        assert_eq!(one, [255, 255, 255, 255]);

        let big = factory.scale(&bitmap, 8, 6, InterpolationMode::NearestNeighbor)?;
        assert_eq!(big.GetSize()?, (8, 6));

        let converter = factory.CreateFormatConverter()?;
        assert!(converter.CanConvert(&pixel_format::BGR_24BPP, &pixel_format::GRAY_8BPP)?);
        Ok(())
    }

    #[test]
    fn test_bitmap_from_hbitmap() -> Result<()> {
        let _com = initialize(CoInit::APARTMENTTHREADED)?;
        let factory = IWICImagingFactory::create()?;
        let dib = create_dib_section(HDC::NULL, &BITMAPINFO::top_down_32bpp(5, 3))?;

        let bitmap = factory.CreateBitmapFromHBITMAP(*dib.bitmap, AlphaChannelOption::IgnoreAlpha)?;
        assert_eq!(bitmap.GetSize()?, (5, 3));
        Ok(())
    }

    #[test]
    fn test_missing_file() -> Result<()> {
        let _com = initialize(CoInit::APARTMENTTHREADED)?;
        let factory = IWICImagingFactory::create()?;
        let result = factory.CreateDecoderFromFilename("Z:\\winabi\\missing.png", DecodeOptions::CacheOnDemand);
        assert!(matches!(result, Err(WinError::Com("CreateDecoderFromFilename", _))));
        Ok(())
    }
}
