// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Hands a finished raster to the image crate.  Whatever the encoder
//! says goes straight back to the caller.

use image::jpeg::JPEGEncoder;
use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use raster::RasterBuffer;

/// The file formats we can write.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    /// Baseline JPEG.
    Jpeg,
    /// Binary PPM (P6).
    Pnm,
}

impl ImageFormat {
    /// Picks a format from a file name's extension.
    pub fn from_path(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "pnm" | "ppm" => Some(ImageFormat::Pnm),
            _ => None,
        }
    }
}

/// Encodes `raster` into `output`.  `quality` only matters for JPEG;
/// it runs from 0 to 100, and 0 is treated as the encoder's minimum
/// of 1.
pub fn encode<W: Write>(
    output: &mut W,
    raster: &RasterBuffer,
    format: ImageFormat,
    quality: u8,
) -> io::Result<()> {
    if quality > 100 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("JPEG quality must be between 0 and 100, got {}", quality),
        ));
    }
    let (width, height) = (raster.width() as u32, raster.height() as u32);
    match format {
        ImageFormat::Jpeg => {
            let mut encoder = JPEGEncoder::new_with_quality(output, quality.max(1));
            encoder.encode(raster.as_bytes(), width, height, ColorType::RGB(8))
        }
        ImageFormat::Pnm => {
            let mut encoder =
                PNMEncoder::new(output).with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
            encoder.encode(raster.as_bytes(), width, height, ColorType::RGB(8))
        }
    }
}

/// Writes `raster` to `path`, in the format its extension names.
pub fn write_image(path: &Path, raster: &RasterBuffer, quality: u8) -> io::Result<()> {
    let format = ImageFormat::from_path(path).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Don't know how to write {}; use .jpg or .pnm", path.display()),
        )
    })?;
    let mut output = BufWriter::new(File::create(path)?);
    encode(&mut output, raster, format, quality)?;
    output.flush()?;
    info!("wrote {}x{} {:?} to {}", raster.width(), raster.height(), format, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::Rgb;

    fn checkerboard() -> RasterBuffer {
        let mut raster = RasterBuffer::new(4, 2).unwrap();
        for y in 0..2 {
            for x in 0..4 {
                if (x + y) % 2 == 0 {
                    raster.put_pixel(x, y, Rgb(255, 128, 0));
                }
            }
        }
        raster
    }

    #[test]
    fn formats_follow_extensions() {
        assert_eq!(ImageFormat::from_path(Path::new("a.jpg")), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_path(Path::new("a.JPEG")), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_path(Path::new("a.ppm")), Some(ImageFormat::Pnm));
        assert_eq!(ImageFormat::from_path(Path::new("a.gif")), None);
        assert_eq!(ImageFormat::from_path(Path::new("noextension")), None);
    }

    #[test]
    fn pnm_is_a_header_and_the_raw_bytes() {
        let raster = checkerboard();
        let mut out: Vec<u8> = Vec::new();
        encode(&mut out, &raster, ImageFormat::Pnm, 100).unwrap();
        assert!(out.starts_with(b"P6"));
        assert!(out.ends_with(raster.as_bytes()));
    }

    #[test]
    fn jpeg_starts_with_a_start_of_image_marker() {
        let raster = checkerboard();
        let mut out: Vec<u8> = Vec::new();
        encode(&mut out, &raster, ImageFormat::Jpeg, 0).unwrap();
        assert_eq!(&out[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn quality_over_100_is_refused() {
        let mut out: Vec<u8> = Vec::new();
        let err = encode(&mut out, &checkerboard(), ImageFormat::Jpeg, 101).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
