// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Frame renderer
//!
//! For every pixel of the output, map it to a point on the complex
//! plane, find out how quickly that point escapes, pick a color for
//! that speed, and write the color into the raster.  No pixel depends
//! on any other, so the threaded renderer just hands each thread its
//! own band of rows; the bands don't overlap, so nothing needs a lock.

use itertools::iproduct;
use std::time::Instant;

use errors::RenderError;
use escape::{Evaluator, Iterations};
use palette::Palette;
use planes::{Pixel, PlaneMapper, Viewport};
use raster::{write_rgb, RasterBuffer, CHANNELS};

/// The size of the image and the per-point iteration limit.  Fixed
/// for the duration of a render.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderParams {
    width: usize,
    height: usize,
    max_iterations: u32,
}

impl RenderParams {
    /// Both dimensions and the iteration limit must be at least 1.
    pub fn new(width: usize, height: usize, max_iterations: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        if max_iterations == 0 {
            return Err(RenderError::InvalidIterations);
        }
        Ok(RenderParams {
            width,
            height,
            max_iterations,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The iteration limit per point.
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}

/// Takes a view, the image parameters, an evaluator and a palette, and
/// renders Mandelbrot frames from them.  Once built, a Renderer never
/// changes; render it as often as you like and get the same bytes.
pub struct Renderer<E> {
    plane: PlaneMapper,
    params: RenderParams,
    evaluator: E,
    palette: Palette,
}

impl<E: Evaluator + Sync> Renderer<E> {
    /// Snapshots the viewport into a PlaneMapper sized for `params`.
    pub fn new(
        viewport: &Viewport,
        params: RenderParams,
        evaluator: E,
        palette: Palette,
    ) -> Result<Self, RenderError> {
        let plane = PlaneMapper::new(viewport, params.width, params.height)?;
        Ok(Renderer {
            plane,
            params,
            evaluator,
            palette,
        })
    }

    /// The pixel-to-plane mapping this renderer samples with.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// The image parameters.
    pub fn params(&self) -> RenderParams {
        self.params
    }

    /// The evaluator in use.
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Iterates the point under a single pixel.
    pub fn evaluate(&self, pixel: &Pixel) -> Iterations {
        let c = self.plane.pixel_to_point(pixel);
        self.evaluator.escape_iterations(c, self.params.max_iterations)
    }

    /// Renders a run of whole rows, starting at `first_row`, into
    /// `band`.  The band must be a multiple of one row long.
    fn render_band(&self, first_row: usize, band: &mut [u8]) {
        let width = self.params.width;
        let rows = band.len() / (width * CHANNELS);
        let max = self.params.max_iterations;
        for ((row, column), slot) in
            iproduct!(first_row..first_row + rows, 0..width).zip(band.chunks_mut(CHANNELS))
        {
            let c = self.plane.pixel_to_point(&Pixel(column, row));
            let iterations = self.evaluator.escape_iterations(c, max);
            write_rgb(slot, self.palette.colorize(iterations, max));
        }
    }

    /// The single-threaded renderer.
    pub fn render_single(&self) -> Result<RasterBuffer, RenderError> {
        let started = Instant::now();
        let mut raster = RasterBuffer::new(self.params.width, self.params.height)?;
        let height = self.params.height;
        if let Some(band) = raster.bands_mut(height).next() {
            self.render_band(0, band);
        }
        self.log_finished(started, 1);
        Ok(raster)
    }

    /// A multi-threaded version of the render function.  The raster
    /// is cut into one band of rows per thread; the output is
    /// identical to `render_single`.
    pub fn render(&self, threads: usize) -> Result<RasterBuffer, RenderError> {
        if threads == 0 {
            return Err(RenderError::InvalidThreadCount);
        }
        if threads == 1 {
            return self.render_single();
        }

        let started = Instant::now();
        let mut raster = RasterBuffer::new(self.params.width, self.params.height)?;
        let rows_per_band = (self.params.height + threads - 1) / threads;
        let row_bytes = self.params.width * CHANNELS;
        {
            let bands: Vec<&mut [u8]> = raster.bands_mut(rows_per_band).collect();
            crossbeam::scope(|spawner| {
                for (index, band) in bands.into_iter().enumerate() {
                    let first_row = index * rows_per_band;
                    spawner.spawn(move |_| {
                        debug!("rendering rows {}..{}", first_row, first_row + band.len() / row_bytes);
                        self.render_band(first_row, band);
                    });
                }
            })
            .map_err(|_| RenderError::WorkerPanicked)?;
        }
        self.log_finished(started, threads);
        Ok(raster)
    }

    fn log_finished(&self, started: Instant, threads: usize) {
        let elapsed = started.elapsed();
        info!(
            "{} evaluator rendered {}x{} ({} iterations) on {} thread(s) in {}.{:03}s",
            self.evaluator.name(),
            self.params.width,
            self.params.height,
            self.params.max_iterations,
            threads,
            elapsed.as_secs(),
            elapsed.subsec_millis()
        );
    }
}

/// Renders one frame, single-threaded.
pub fn render<E: Evaluator + Sync>(
    viewport: &Viewport,
    params: RenderParams,
    evaluator: E,
    palette: Palette,
) -> Result<RasterBuffer, RenderError> {
    Renderer::new(viewport, params, evaluator, palette)?.render_single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use escape::{OptimizedEvaluator, ReferenceEvaluator};
    use num::Complex;

    fn documented_view() -> Renderer<OptimizedEvaluator> {
        let params = RenderParams::new(800, 800, 200).unwrap();
        let viewport = Viewport::new(Complex::new(-0.5, 0.0), 0.3).unwrap();
        Renderer::new(&viewport, params, OptimizedEvaluator::default(), Palette::OptimizedShift).unwrap()
    }

    #[test]
    fn params_reject_degenerate_input() {
        assert!(RenderParams::new(0, 10, 100).is_err());
        assert!(RenderParams::new(10, 0, 100).is_err());
        assert!(RenderParams::new(10, 10, 0).is_err());
    }

    #[test]
    fn center_of_documented_view_is_inside() {
        let renderer = documented_view();
        assert_eq!(renderer.evaluate(&Pixel(400, 400)), Iterations::Bounded);
        assert_eq!(renderer.evaluate(&Pixel(400, 400)).count(200), 200);
    }

    #[test]
    fn corner_of_documented_view_escapes() {
        let renderer = documented_view();
        match renderer.evaluate(&Pixel(0, 0)) {
            Iterations::Escaped(n) => assert!(n < 200),
            Iterations::Bounded => panic!("corner should escape"),
        }
    }

    #[test]
    fn render_fills_every_pixel_in_order() {
        let params = RenderParams::new(9, 5, 50).unwrap();
        let viewport = Viewport::default();
        let renderer = Renderer::new(&viewport, params, ReferenceEvaluator::default(), Palette::Smooth).unwrap();
        let raster = renderer.render_single().unwrap();
        assert_eq!(raster.len(), 9 * 5 * 3);
        for y in 0..5 {
            for x in 0..9 {
                let expected = Palette::Smooth.colorize(renderer.evaluate(&Pixel(x, y)), 50);
                assert_eq!(raster.pixel(x, y), Some(expected));
            }
        }
    }

    #[test]
    fn threaded_render_matches_single() {
        let params = RenderParams::new(61, 37, 120).unwrap();
        let viewport = Viewport::new(Complex::new(-0.75, 0.1), 0.6).unwrap();
        let renderer = Renderer::new(&viewport, params, OptimizedEvaluator::default(), Palette::OptimizedShift).unwrap();
        let single = renderer.render_single().unwrap();
        for threads in 1..6 {
            assert_eq!(renderer.render(threads).unwrap(), single);
        }
        // More threads than rows.
        assert_eq!(renderer.render(64).unwrap(), single);
    }

    #[test]
    fn zero_threads_is_an_error() {
        let renderer = documented_view();
        match renderer.render(0) {
            Err(RenderError::InvalidThreadCount) => (),
            other => panic!("expected InvalidThreadCount, got {:?}", other.map(|r| r.len())),
        }
    }
}
