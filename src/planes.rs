// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Viewport, which describes what part of the complex
//! plane we want to look at, and the PlaneMapper, which describes the
//! relationship between a rectangle on the integral plane with an
//! origin at 0,0 and that region of the complex plane.
use num::Complex;

use errors::RenderError;

/// Describes the x, y of a pixel on the integral plane.  Column
/// first, row second; row 0 is the top of the image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// How the zoom factor is turned into a distance-per-pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScalingPolicy {
    /// Each axis gets its own scale, `1 / (dimension * zoom)`.  A
    /// non-square image is stretched to fill the same span on both
    /// axes, so this is only used for the fixed reference window.
    IndependentAxes,
    /// One scale for both axes, anchored to the shorter one:
    /// `1 / (min(width, height) * zoom)`.  Pixels stay square, and
    /// zooming looks the same in every direction.
    ShorterAxis,
}

/// The point in the complex plane at the center of the image, how far
/// in we are, and how that zoom is spread across the axes.  A Viewport
/// is a value: changing the view produces a new Viewport.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    center: Complex<f64>,
    zoom: f64,
    policy: ScalingPolicy,
}

// The reference window: 2.3 units wide on each axis, with its
// top-left corner at (-1.2, -1.0).
const REFERENCE_SPAN: f64 = 2.3;
const REFERENCE_ORIGIN: (f64, f64) = (-1.2, -1.0);

impl Viewport {
    /// A view centered on `center`, at `zoom`, with square pixels.
    pub fn new(center: Complex<f64>, zoom: f64) -> Result<Viewport, RenderError> {
        if !center.re.is_finite() || !center.im.is_finite() {
            return Err(RenderError::InvalidCenter(center.re, center.im));
        }
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(RenderError::InvalidZoom(zoom));
        }
        Ok(Viewport {
            center,
            zoom,
            policy: ScalingPolicy::ShorterAxis,
        })
    }

    /// The fixed window of the reference renderer.  Each axis is
    /// stretched independently over the same 2.3-wide span, whatever
    /// the shape of the image.  There's no way to pan or zoom this
    /// one; use `with_view` to get a real view.
    pub fn reference() -> Viewport {
        let half = REFERENCE_SPAN / 2.0;
        Viewport {
            center: Complex::new(REFERENCE_ORIGIN.0 + half, REFERENCE_ORIGIN.1 + half),
            zoom: 1.0 / REFERENCE_SPAN,
            policy: ScalingPolicy::IndependentAxes,
        }
    }

    /// Returns a new Viewport looking at `center` with `zoom`.  The
    /// result always has square pixels, regardless of the policy of
    /// the viewport it was derived from.
    pub fn with_view(&self, center: Complex<f64>, zoom: f64) -> Result<Viewport, RenderError> {
        Viewport::new(center, zoom)
    }

    /// The point at the middle of the image.
    pub fn center(&self) -> Complex<f64> {
        self.center
    }

    /// The zoom factor.  At zoom 1 the shorter axis spans one unit.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Which scaling policy this view uses.
    pub fn policy(&self) -> ScalingPolicy {
        self.policy
    }
}

/// The whole set, with a little room to spare, on a square image.
impl Default for Viewport {
    fn default() -> Viewport {
        Viewport {
            center: Complex::new(-0.5, 0.0),
            zoom: 0.3,
            policy: ScalingPolicy::ShorterAxis,
        }
    }
}

/// Contains the definitions of two planes: an integral cartesian plane,
/// and the region of the complex plane a Viewport picks out for it.
/// Maps pixels from one to the other.  The scale factors are derived
/// here, once, from the viewport and the image size; a new size or a
/// new view means a new PlaneMapper.
#[derive(Debug)]
pub struct PlaneMapper {
    width: usize,
    height: usize,
    // The complex coordinate of pixel 0,0.
    origin: Complex<f64>,
    // Distance on the complex plane covered by one step along each axis.
    scale: (f64, f64),
}

impl PlaneMapper where {
    /// Constructor.  Takes the size of the integral plane and the view
    /// to map it onto.
    pub fn new(viewport: &Viewport, width: usize, height: usize) -> Result<PlaneMapper, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }

        let scale = match viewport.policy {
            ScalingPolicy::IndependentAxes => (
                1.0 / (width as f64 * viewport.zoom),
                1.0 / (height as f64 * viewport.zoom),
            ),
            ScalingPolicy::ShorterAxis => {
                let s = 1.0 / (width.min(height) as f64 * viewport.zoom);
                (s, s)
            }
        };

        let origin = Complex::new(
            viewport.center.re - 0.5 * scale.0 * width as f64,
            viewport.center.im - 0.5 * scale.1 * height as f64,
        );

        Ok(PlaneMapper {
            width,
            height,
            origin,
            scale,
        })
    }

    /// The total number of points in the integral grid.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false; a PlaneMapper can't be built over an empty grid.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width of the integral plane.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the integral plane.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The distance between horizontally and vertically adjacent
    /// pixels, as mapped onto the complex plane.
    pub fn scale(&self) -> (f64, f64) {
        self.scale
    }

    /// Given a pixel on the integral cartesian plane, return the point
    /// on the complex plane it samples.
    #[inline]
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            (pixel.0 as f64) * self.scale.0 + self.origin.re,
            (pixel.1 as f64) * self.scale.1 + self.origin.im,
        )
    }
}
