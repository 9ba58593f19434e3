//! DirectShow filter graphs: building, playback control, seeking, events
//! and EVR video display.
//!
//! A typical player creates an [`IGraphBuilder`], renders a file into it,
//! then queries the graph for [`IMediaControl`] and [`IMediaEvent`]:
//!
//! ```ignore
//! use winabi::co::CoInit;
//! use winabi::com::{cast, initialize};
//! use winabi::dshow::{IGraphBuilder, IMediaControl, IMediaEvent};
//!
//! let _com = initialize(CoInit::APARTMENTTHREADED)?;
//! let graph = IGraphBuilder::create()?;
//! graph.RenderFile("C:\\media\\clip.wmv")?;
//!
//! let control: IMediaControl = cast(&graph)?;
//! let events: IMediaEvent = cast(&graph)?;
//! control.Run()?;
//! events.WaitForCompletion(-1)?;
//! ```

mod control;
mod evr;
mod filter;
mod graph;

#[cfg(test)]
mod fakes;

pub use control::*;
pub use evr::*;
pub use filter::*;
pub use graph::*;

#[cfg(all(test, windows, feature = "integration-tests"))]
mod integration {
    use super::*;
    use crate::co::{CoInit, PinDirection};
    use crate::com::{cast, initialize};
    use crate::error::Result;

    #[test]
    fn test_empty_graph() -> Result<()> {
        let _com = initialize(CoInit::APARTMENTTHREADED)?;
        let graph = IGraphBuilder::create()?;
        assert!(graph.filters()?.is_empty());

        let evr = create_video_renderer()?;
        graph.AddFilter(&evr, "EVR")?;
        assert_eq!(graph.FindFilterByName("EVR")?, Some(evr.clone()));
        assert_eq!(evr.QueryFilterInfo()?.name, "EVR");
        assert!(evr.find_unconnected_pin(PinDirection::Input)?.is_some());

        let control: IMediaControl = cast(&graph)?;
        control.Stop()?;
        let seeking: IMediaSeeking = cast(&graph)?;
        assert!(seeking.IsFormatSupported(&crate::co::time_format::MEDIA_TIME)?);

        graph.RemoveFilter(&evr)?;
        assert_eq!(graph.FindFilterByName("EVR")?, None);
        Ok(())
    }
}
