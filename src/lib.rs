#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set takes a point on the complex plane and
//! repeatedly squares it, adding the original point back in each
//! time, measuring how quickly that number goes to infinity.  This
//! "velocity" is the number used to render the image; points with no
//! velocity at all, the ones that never go to infinity, are the set
//! itself, and make up the black heart of the picture.
//!
//! Rendering a frame is a straight pipeline, pixel by pixel: a
//! `PlaneMapper` turns the pixel into a complex point according to a
//! `Viewport`, an `Evaluator` counts how long that point's orbit takes
//! to escape, a `Palette` turns the count into a color, and the color
//! goes into a `RasterBuffer`.  The finished raster can then be handed
//! to `write_image`.
//!
//! ```no_run
//! extern crate mandelbrot;
//! extern crate num;
//!
//! use mandelbrot::{render, write_image, OptimizedEvaluator, Palette, RenderParams, Viewport};
//! use num::Complex;
//! use std::path::Path;
//!
//! let view = Viewport::new(Complex::new(-0.5, 0.0), 0.3).unwrap();
//! let params = RenderParams::new(800, 800, 200).unwrap();
//! let raster = render(&view, params, OptimizedEvaluator::default(), Palette::Smooth).unwrap();
//! write_image(Path::new("mandel.jpg"), &raster, 90).unwrap();
//! ```

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;

pub mod encode;
pub mod errors;
pub mod escape;
pub mod palette;
pub mod planes;
pub mod raster;
pub mod render;

pub use encode::{write_image, ImageFormat};
pub use errors::RenderError;
pub use escape::{BoundPolicy, Evaluator, Iterations, OptimizedEvaluator, ReferenceEvaluator};
pub use palette::{Palette, Rgb, BLACK};
pub use planes::{Pixel, PlaneMapper, ScalingPolicy, Viewport};
pub use raster::RasterBuffer;
pub use render::{render, RenderParams, Renderer};
