#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Frame Rendering
//!
//! Software rendering for classic-control environments.
//!
//! Environments describe what they want drawn as a [`Scene`]: a background
//! colour and a list of flat primitives in pixel coordinates with the y axis
//! pointing up. The scene can then be turned into
//!
//! -   an RGB image through [`rasterize`], which is what `rgb_array` render
//!     mode hands back to the caller, or
//! -   a block of text through [`TextCanvas`], which is what `human` render
//!     mode writes to the terminal.
//!
//! Frames can be persisted with a [`FrameRecorder`], which writes one PNG per
//! frame into a directory.

pub mod raster;
pub mod recorder;
pub mod scene;
pub mod text;

pub use raster::rasterize;
pub use recorder::FrameRecorder;
pub use scene::{Color, Scene, Shape};
pub use text::TextCanvas;

use image::RgbImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to encode frame: {0}")]
    Image(#[from] image::ImageError),
    #[error("frame i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A single rendered frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    /// Row-major RGB pixels.
    Rgb(RgbImage),
    /// Character grid, one line per row.
    Text(String),
}

impl Frame {
    /// Width and height of the frame in pixels or characters.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Frame::Rgb(img) => img.dimensions(),
            Frame::Text(text) => {
                let rows = text.lines().count();
                let cols = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
                (u32::try_from(cols).unwrap_or(u32::MAX), u32::try_from(rows).unwrap_or(u32::MAX))
            }
        }
    }
}
