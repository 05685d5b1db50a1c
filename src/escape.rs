// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time test at the heart of the Mandelbrot set.  Take a
//! point c, start at z = 0, and repeatedly replace z with z² + c.  If
//! z ever gets further than 2 from the origin it will go to infinity,
//! and the number of steps it took to get there is the "velocity"
//! we color the pixel with.  If it hasn't left after some limit, we
//! give up and call the point a member of the set.
//!
//! There are two evaluators here.  The reference one is the textbook
//! version, built on `num::Complex` and a true magnitude (with its
//! square root) on every step.  The optimized one keeps the real and
//! imaginary parts in locals, squares each once per step, and uses
//! those squares both for the next z and for the escape test against
//! 4.  They agree on every point that isn't sitting right on the
//! escape circle.
//!
//! They also started life with different loop bounds: the reference
//! loop ran while the step count was `<=` the limit, the optimized one
//! while it was `<`.  That's kept as `BoundPolicy`, and each evaluator
//! takes one explicitly.

use num::Complex;

/// Squared escape radius.
pub const ESCAPE_NORM_SQR: f64 = 4.0;

/// Escape radius.
pub const ESCAPE_RADIUS: f64 = 2.0;

/// The outcome of iterating a single point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Iterations {
    /// The orbit left the escape radius.  The count is the number of
    /// iterates that stayed inside before that happened, so a point
    /// that's already far outside, such as 2+2i, escapes after 0.
    Escaped(u32),
    /// The orbit was still inside when the evaluator ran out of steps.
    Bounded,
}

impl Iterations {
    /// The iteration count in `[0, max_iterations]`; points that never
    /// escaped saturate at `max_iterations`.
    pub fn count(self, max_iterations: u32) -> u32 {
        match self {
            Iterations::Escaped(n) => n.min(max_iterations),
            Iterations::Bounded => max_iterations,
        }
    }

    /// True if the orbit never escaped.
    pub fn is_bounded(self) -> bool {
        self == Iterations::Bounded
    }
}

/// How many updates of z an iteration limit allows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoundPolicy {
    /// At most `max_iterations + 1` updates.  A point can come back as
    /// `Escaped(max_iterations)`.
    Inclusive,
    /// At most `max_iterations` updates.  Escape counts stay strictly
    /// below `max_iterations`.
    Exclusive,
}

impl BoundPolicy {
    /// The number of z ← z² + c updates allowed under this policy.
    #[inline]
    pub fn updates(self, max_iterations: u32) -> u64 {
        match self {
            BoundPolicy::Inclusive => u64::from(max_iterations) + 1,
            BoundPolicy::Exclusive => u64::from(max_iterations),
        }
    }
}

/// Anything that can decide whether a point escapes.  Renderers are
/// generic over this so the inner loop is monomorphized; there's no
/// dynamic dispatch per pixel.
pub trait Evaluator {
    /// Iterate `c` for at most the number of steps `max_iterations`
    /// allows under the evaluator's bound policy.
    fn escape_iterations(&self, c: Complex<f64>, max_iterations: u32) -> Iterations;

    /// A short name, used in logs and profiling output.
    fn name(&self) -> &'static str;
}

/// The textbook evaluator: complex arithmetic and a true magnitude.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ReferenceEvaluator {
    bound: BoundPolicy,
}

impl ReferenceEvaluator {
    /// An evaluator with an explicit loop bound.
    pub fn new(bound: BoundPolicy) -> Self {
        ReferenceEvaluator { bound }
    }

    /// The loop bound in use.
    pub fn bound(&self) -> BoundPolicy {
        self.bound
    }
}

/// The reference evaluator has always counted inclusively.
impl Default for ReferenceEvaluator {
    fn default() -> Self {
        ReferenceEvaluator::new(BoundPolicy::Inclusive)
    }
}

impl Evaluator for ReferenceEvaluator {
    fn escape_iterations(&self, c: Complex<f64>, max_iterations: u32) -> Iterations {
        let updates = self.bound.updates(max_iterations);
        let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
        let mut steps: u64 = 0;
        while z.norm() < ESCAPE_RADIUS && steps < updates {
            z = z * z + c;
            steps += 1;
        }
        if z.norm() < ESCAPE_RADIUS {
            Iterations::Bounded
        } else {
            // z₀ = 0 is always inside, so at least one step was taken.
            Iterations::Escaped((steps - 1) as u32)
        }
    }

    fn name(&self) -> &'static str {
        "reference"
    }
}

/// The fast evaluator: paired reals, each square computed once per
/// step, and no square root.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OptimizedEvaluator {
    bound: BoundPolicy,
}

impl OptimizedEvaluator {
    /// An evaluator with an explicit loop bound.
    pub fn new(bound: BoundPolicy) -> Self {
        OptimizedEvaluator { bound }
    }

    /// The loop bound in use.
    pub fn bound(&self) -> BoundPolicy {
        self.bound
    }
}

/// The optimized evaluator has always counted exclusively.
impl Default for OptimizedEvaluator {
    fn default() -> Self {
        OptimizedEvaluator::new(BoundPolicy::Exclusive)
    }
}

impl Evaluator for OptimizedEvaluator {
    #[inline]
    fn escape_iterations(&self, c: Complex<f64>, max_iterations: u32) -> Iterations {
        let (cx, cy) = (c.re, c.im);
        let (mut zx, mut zy) = (0.0_f64, 0.0_f64);
        // Squares of the current z, carried into the next update.
        let (mut zx2, mut zy2) = (0.0_f64, 0.0_f64);

        for i in 0..self.bound.updates(max_iterations) {
            zy = 2.0 * zx * zy + cy;
            zx = zx2 - zy2 + cx;
            zx2 = zx * zx;
            zy2 = zy * zy;
            if zx2 + zy2 >= ESCAPE_NORM_SQR {
                return Iterations::Escaped(i as u32);
            }
        }
        Iterations::Bounded
    }

    fn name(&self) -> &'static str {
        "optimized"
    }
}
