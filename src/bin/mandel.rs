// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate mandelbrot;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use mandelbrot::{
    BoundPolicy, Evaluator, OptimizedEvaluator, Palette, RasterBuffer, ReferenceEvaluator,
    RenderParams, Renderer, Viewport,
};
use num::Complex;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const CENTER: &str = "center";
const ZOOM: &str = "zoom";
const ITERATIONS: &str = "iterations";
const EVALUATOR: &str = "evaluator";
const BOUND: &str = "bound";
const PALETTE: &str = "palette";
const QUALITY: &str = "quality";
const THREADS: &str = "threads";
const REFERENCE_VIEW: &str = "reference-view";
const PROFILE: &str = "profile";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandel")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (.jpg or .pnm)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x800")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(CENTER)
                .required(false)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-0.5,0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse view center"))
                .help("Point of the complex plane at the center of the image"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("0.3")
                .validator(|s| match f64::from_str(&s) {
                    Ok(z) if z > 0.0 && z.is_finite() => Ok(()),
                    Ok(_) => Err("Zoom must be a positive number".to_string()),
                    Err(_) => Err("Could not parse zoom".to_string()),
                })
                .help("Zoom factor; at 1.0 the shorter side of the image spans one unit"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("200")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Maximum number of iterations per point"),
        )
        .arg(
            Arg::with_name(EVALUATOR)
                .required(false)
                .long(EVALUATOR)
                .short("e")
                .takes_value(true)
                .possible_values(&["reference", "optimized"])
                .default_value("optimized")
                .help("Escape-time evaluator"),
        )
        .arg(
            Arg::with_name(BOUND)
                .required(false)
                .long(BOUND)
                .short("b")
                .takes_value(true)
                .possible_values(&["inclusive", "exclusive"])
                .help("Iteration bound; defaults to the evaluator's own"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .required(false)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .possible_values(&["reference", "optimized", "smooth"])
                .help("Palette; defaults to the evaluator's own shift palette"),
        )
        .arg(
            Arg::with_name(QUALITY)
                .required(false)
                .long(QUALITY)
                .short("q")
                .takes_value(true)
                .default_value("100")
                .validator(move |s| {
                    validate_range(
                        &s,
                        0,
                        100,
                        "Could not parse JPEG quality",
                        "JPEG quality must be between 0 and 100",
                    )
                })
                .help("JPEG quality"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in renderer"),
        )
        .arg(
            Arg::with_name(REFERENCE_VIEW)
                .long(REFERENCE_VIEW)
                .help("Render the fixed reference window; ignores center and zoom"),
        )
        .arg(
            Arg::with_name(PROFILE)
                .long(PROFILE)
                .help("Print the render time"),
        )
        .get_matches()
}

fn bound(matches: &ArgMatches, native: BoundPolicy) -> BoundPolicy {
    match matches.value_of(BOUND) {
        Some("inclusive") => BoundPolicy::Inclusive,
        Some("exclusive") => BoundPolicy::Exclusive,
        _ => native,
    }
}

fn palette(matches: &ArgMatches, native: Palette) -> Palette {
    match matches.value_of(PALETTE) {
        Some("reference") => Palette::ReferenceShift,
        Some("optimized") => Palette::OptimizedShift,
        Some("smooth") => Palette::Smooth,
        _ => native,
    }
}

fn run<E: Evaluator + Sync>(
    viewport: &Viewport,
    params: RenderParams,
    evaluator: E,
    palette: Palette,
    threads: usize,
    profile: bool,
) -> Result<RasterBuffer, mandelbrot::RenderError> {
    let renderer = Renderer::new(viewport, params, evaluator, palette)?;
    let started = Instant::now();
    let raster = renderer.render(threads)?;
    if profile {
        let elapsed = started.elapsed();
        println!(
            "{}: {:.2}",
            renderer.evaluator().name(),
            elapsed.as_secs() as f64 + f64::from(elapsed.subsec_millis()) / 1000.0
        );
    }
    Ok(raster)
}

fn main() {
    env_logger::init();
    let matches = args();

    let image_size: (usize, usize) =
        parse_pair(matches.value_of(SIZE).unwrap(), 'x').expect("Error parsing image dimensions");
    let center =
        parse_complex(matches.value_of(CENTER).unwrap()).expect("Error parsing view center");
    let zoom = f64::from_str(matches.value_of(ZOOM).unwrap()).expect("Error parsing zoom");
    let iterations = u32::from_str(matches.value_of(ITERATIONS).unwrap())
        .expect("Could not parse iteration count.");
    let threads =
        usize::from_str(matches.value_of(THREADS).unwrap()).expect("Could not parse thread count.");
    let quality =
        u8::from_str(matches.value_of(QUALITY).unwrap()).expect("Could not parse JPEG quality.");
    let output = Path::new(matches.value_of(OUTPUT).unwrap());
    let profile = matches.is_present(PROFILE);

    let viewport = if matches.is_present(REFERENCE_VIEW) {
        Ok(Viewport::reference())
    } else {
        Viewport::new(center, zoom)
    };

    let rendered = RenderParams::new(image_size.0, image_size.1, iterations).and_then(|params| {
        let viewport = viewport?;
        debug!("rendering {:?} with {:?}", viewport, params);
        match matches.value_of(EVALUATOR) {
            Some("reference") => run(
                &viewport,
                params,
                ReferenceEvaluator::new(bound(&matches, BoundPolicy::Inclusive)),
                palette(&matches, Palette::ReferenceShift),
                threads,
                profile,
            ),
            _ => run(
                &viewport,
                params,
                OptimizedEvaluator::new(bound(&matches, BoundPolicy::Exclusive)),
                palette(&matches, Palette::OptimizedShift),
                threads,
                profile,
            ),
        }
    });

    match rendered {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(raster) => {
            if let Err(e) = mandelbrot::write_image(output, &raster, quality) {
                eprintln!("Could not write {}: {}", output.display(), e);
                std::process::exit(1);
            }
        }
    }
}
