// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns iteration counts into colors.  The two shift palettes are
//! crude on purpose: they take a base intensity and copy it into the
//! red, green and blue channels shifted left by 0, 1 and 2 bits,
//! throwing away whatever overflows a byte.  That's where the banding
//! comes from.  They're kept so renders can be compared byte-for-byte
//! against older output.  The smooth palette is the one to look at.

use escape::Iterations;

/// An 8-bit RGB triple.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// The color of points that never escaped.
pub const BLACK: Rgb = Rgb(0, 0, 0);

/// A mapping from iteration counts to colors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Palette {
    /// Base intensity `(n << 8) / (max - 1)`, then channel shifts.
    ReferenceShift,
    /// Base intensity `n << 4`, then channel shifts.
    OptimizedShift,
    /// A Bernstein-polynomial gradient from black through blue and
    /// orange, indexed by `n / max`.
    Smooth,
}

impl Palette {
    /// Color for one point.  `Bounded`, an escape count of zero, and
    /// any count that reaches `max_iterations` all come out black
    /// under every palette.
    #[inline]
    pub fn colorize(self, iterations: Iterations, max_iterations: u32) -> Rgb {
        let n = match iterations {
            Iterations::Bounded => return BLACK,
            Iterations::Escaped(n) if n >= max_iterations => return BLACK,
            Iterations::Escaped(n) => u64::from(n),
        };
        match self {
            Palette::ReferenceShift => {
                let divisor = u64::from(max_iterations.saturating_sub(1).max(1));
                shifted((n << 8) / divisor)
            }
            Palette::OptimizedShift => shifted(n << 4),
            Palette::Smooth => smooth(n as f64 / f64::from(max_iterations)),
        }
    }
}

// Each channel keeps only the low byte of its shifted copy.
#[inline]
fn shifted(base: u64) -> Rgb {
    Rgb(base as u8, (base << 1) as u8, (base << 2) as u8)
}

fn smooth(t: f64) -> Rgb {
    let u = 1.0 - t;
    let channel = |v: f64| (v * 255.0).max(0.0).min(255.0) as u8;
    Rgb(
        channel(9.0 * u * t * t * t),
        channel(15.0 * u * u * t * t),
        channel(8.5 * u * u * u * t),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const PALETTES: [Palette; 3] = [Palette::ReferenceShift, Palette::OptimizedShift, Palette::Smooth];

    #[test]
    fn sentinels_are_black_everywhere() {
        for palette in PALETTES.iter() {
            assert_eq!(palette.colorize(Iterations::Bounded, 200), BLACK);
            assert_eq!(palette.colorize(Iterations::Escaped(0), 200), BLACK);
            assert_eq!(palette.colorize(Iterations::Escaped(200), 200), BLACK);
            assert_eq!(palette.colorize(Iterations::Escaped(201), 200), BLACK);
        }
    }

    #[test]
    fn optimized_shift_wraps_each_channel() {
        // base 16: 16, 32, 64.
        assert_eq!(Palette::OptimizedShift.colorize(Iterations::Escaped(1), 200), Rgb(16, 32, 64));
        // base 80: 80, 160, 320 -> 64.
        assert_eq!(Palette::OptimizedShift.colorize(Iterations::Escaped(5), 200), Rgb(80, 160, 64));
        // base 256 drops out of every channel.
        assert_eq!(Palette::OptimizedShift.colorize(Iterations::Escaped(16), 200), BLACK);
    }

    #[test]
    fn reference_shift_scales_by_limit() {
        // (10 << 8) / 99 = 25: 25, 50, 100.
        assert_eq!(Palette::ReferenceShift.colorize(Iterations::Escaped(10), 100), Rgb(25, 50, 100));
        // (50 << 8) / 99 = 129: 129, 258 -> 2, 516 -> 4.
        assert_eq!(Palette::ReferenceShift.colorize(Iterations::Escaped(50), 100), Rgb(129, 2, 4));
    }

    #[test]
    fn reference_shift_survives_a_limit_of_one() {
        assert_eq!(Palette::ReferenceShift.colorize(Iterations::Escaped(0), 1), BLACK);
        assert_eq!(Palette::ReferenceShift.colorize(Iterations::Bounded, 1), BLACK);
    }

    #[test]
    fn smooth_is_not_black_in_the_middle() {
        let c = Palette::Smooth.colorize(Iterations::Escaped(50), 100);
        assert_ne!(c, BLACK);
        assert_eq!(c, Rgb(143, 239, 135));
    }
}
