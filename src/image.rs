//! Camera frames handed to the cat detector.
//!
//! The alarm core never looks inside a frame; it only forwards it to the
//! [`CatDetector`](crate::app::ports::CatDetector).  Decoding from a file
//! format happens outside this crate.

use crate::error::{Error, Result};

/// Bytes per pixel in a packed RGB frame.
pub const RGB_CHANNELS: usize = 3;

/// A packed 8-bit RGB frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Image {
    /// Wrap a packed RGB buffer.  `pixels.len()` must equal
    /// `width * height * 3` and neither dimension may be zero.
    pub fn rgb(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidArgument("image dimensions must be non-zero"));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(RGB_CHANNELS))
            .ok_or(Error::InvalidArgument("image dimensions overflow"))?;
        if pixels.len() != expected {
            return Err(Error::InvalidArgument(
                "pixel buffer length does not match dimensions",
            ));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// An all-black frame.
    pub fn blank(width: u32, height: u32) -> Result<Self> {
        let len = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(RGB_CHANNELS);
        Self::rgb(width, height, vec![0; len])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}
