// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong before or during a render.  Encoder
//! failures are not here; they come back from the image crate as
//! plain `std::io::Error` and are handed to the caller untouched.

use std::collections::TryReserveError;

/// Caller mistakes (bad dimensions, bad zoom) and the two runtime
/// failures a render can actually hit: running out of memory for the
/// raster, and losing a worker thread.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// Either axis was zero, or the raster would not fit in memory's
    /// address space.
    #[fail(display = "Image dimensions must be positive, got {}x{}", width, height)]
    InvalidDimensions {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// Zoom was zero, negative, or not a finite number.
    #[fail(display = "Zoom must be a positive, finite number, got {}", _0)]
    InvalidZoom(f64),

    /// One of the center coordinates was NaN or infinite.
    #[fail(display = "The view center must be a finite point, got {},{}", _0, _1)]
    InvalidCenter(f64, f64),

    /// An iteration limit of zero can't say anything about any point.
    #[fail(display = "The iteration limit must be at least 1")]
    InvalidIterations,

    /// The threaded renderer was asked to run on no threads at all.
    #[fail(display = "The thread count must be at least 1")]
    InvalidThreadCount,

    /// The raster buffer could not be reserved.
    #[fail(display = "Could not allocate a raster of {} bytes", bytes)]
    Allocation {
        /// Size of the failed reservation.
        bytes: usize,
        /// What the allocator said.
        #[cause]
        cause: TryReserveError,
    },

    /// A render thread panicked; its band of the raster is garbage.
    #[fail(display = "A render worker panicked")]
    WorkerPanicked,
}
