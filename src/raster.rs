// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The finished image, before it goes to an encoder: row-major,
//! interleaved RGB, top row first.

use std::slice::ChunksMut;

use errors::RenderError;
use palette::Rgb;

/// Bytes per pixel.
pub const CHANNELS: usize = 3;

/// An owned RGB raster of exactly `width * height * 3` bytes.  The
/// size is fixed when the buffer is created.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl RasterBuffer {
    /// Allocates a black raster.  Running out of memory is reported,
    /// not aborted on.
    pub fn new(width: usize, height: usize) -> Result<RasterBuffer, RenderError> {
        let bytes = byte_len(width, height)?;
        let mut pixels: Vec<u8> = Vec::new();
        pixels
            .try_reserve_exact(bytes)
            .map_err(|cause| RenderError::Allocation { bytes, cause })?;
        pixels.resize(bytes, 0);
        Ok(RasterBuffer {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Never true for a buffer that was successfully created.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// The raw bytes, in the layout encoders expect.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Gives up the buffer.
    pub fn into_vec(self) -> Vec<u8> {
        self.pixels
    }

    /// Byte offset of the red channel of pixel (x, y), if it's inside
    /// the raster.
    pub fn offset(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y * self.width + x) * CHANNELS)
        } else {
            None
        }
    }

    /// The color of pixel (x, y).
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        self.offset(x, y)
            .map(|o| Rgb(self.pixels[o], self.pixels[o + 1], self.pixels[o + 2]))
    }

    /// Sets pixel (x, y).  Returns false, and changes nothing, if the
    /// pixel is outside the raster.
    pub fn put_pixel(&mut self, x: usize, y: usize, color: Rgb) -> bool {
        match self.offset(x, y) {
            Some(o) => {
                write_rgb(&mut self.pixels[o..o + CHANNELS], color);
                true
            }
            None => false,
        }
    }

    /// Splits the raster into disjoint horizontal bands of `rows` rows
    /// each; the last band may be shorter.
    pub(crate) fn bands_mut(&mut self, rows: usize) -> ChunksMut<u8> {
        let stride = self.width * CHANNELS;
        self.pixels.chunks_mut(rows.max(1) * stride)
    }
}

/// Writes one pixel into a three-byte slot.
#[inline]
pub(crate) fn write_rgb(slot: &mut [u8], color: Rgb) {
    slot[0] = color.0;
    slot[1] = color.1;
    slot[2] = color.2;
}

fn byte_len(width: usize, height: usize) -> Result<usize, RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(RenderError::InvalidDimensions { width, height })
}
