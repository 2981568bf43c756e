// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use seamresize::mask::unprotected;
use seamresize::{energy_to_image, mask_from_image, mask_to_image, RgbWeights, SeamCarver};

use clap::{App, Arg, ArgMatches};
use failure::{bail, format_err, Error, ResultExt};
use image::Rgb;
use log::{info, LevelFilter};
use std::process;

fn parse_color(hex: &str) -> Result<Rgb<u8>, Error> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        bail!("{:?} is not an RRGGBB color", hex);
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|_| format_err!("{:?} is not an RRGGBB color", hex))
    };
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

// RUST_LOG is honoured unless -v says otherwise.
fn init_logging(verbosity: u64) {
    let mut builder = env_logger::Builder::from_default_env();
    let level = match verbosity {
        0 if std::env::var_os("RUST_LOG").is_some() => None,
        0 => Some(LevelFilter::Warn),
        1 => Some(LevelFilter::Info),
        2 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    };
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.init();
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let input = matches.value_of("input").unwrap_or_default();
    let output = matches.value_of("output").unwrap_or_default();

    let image = image::open(input)
        .with_context(|_| format!("cannot read {}", input))?
        .to_rgb8();
    let (width, height) = image.dimensions();

    let target_width = match matches.value_of("width") {
        Some(w) => w
            .parse::<u32>()
            .with_context(|_| format!("{:?} is not a width", w))?,
        None => width,
    };

    let weights = match matches.value_of("weights") {
        Some(w) => w.parse::<RgbWeights>()?,
        None => RgbWeights::default(),
    };

    let mask = match matches.value_of("mask") {
        Some(path) => mask_from_image(
            &image::open(path)
                .with_context(|_| format!("cannot read mask {}", path))?
                .to_luma8(),
        ),
        None => unprotected(width, height),
    };

    let mut carver = SeamCarver::new(image, target_width, weights, mask)?;

    if matches.is_present("energy") {
        energy_to_image(&carver.energy_map())
            .save(output)
            .with_context(|_| format!("cannot write {}", output))?;
        info!("wrote energy map to {}", output);
        return Ok(());
    }

    if let Some(color) = matches.value_of("show-seams") {
        carver
            .show_seams(parse_color(color)?)
            .save(output)
            .with_context(|_| format!("cannot write {}", output))?;
        info!("wrote {} seams to {}", carver.number_of_seams(), output);
        return Ok(());
    }

    carver
        .resize()
        .save(output)
        .with_context(|_| format!("cannot write {}", output))?;
    info!("wrote {}x{} image to {}", target_width, height, output);

    if let Some(path) = matches.value_of("mask-out") {
        mask_to_image(&carver.mask_after_seam_carving())
            .save(path)
            .with_context(|_| format!("cannot write mask {}", path))?;
    }
    Ok(())
}

fn main() {
    let matches = App::new("seamresize")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware width resizing by seam carving")
        .arg(
            Arg::with_name("input")
                .help("The image to resize")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the result; the format follows the extension")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("width")
                .short("w")
                .long("width")
                .takes_value(true)
                .help("Target width in pixels (default: unchanged)"),
        )
        .arg(
            Arg::with_name("mask")
                .short("m")
                .long("mask")
                .takes_value(true)
                .help("Protection mask; any non-black pixel is never removed"),
        )
        .arg(
            Arg::with_name("mask-out")
                .long("mask-out")
                .takes_value(true)
                .conflicts_with_all(&["energy", "show-seams"])
                .help("Write the mask, carved along with the image, here"),
        )
        .arg(
            Arg::with_name("weights")
                .long("weights")
                .takes_value(true)
                .value_name("R,G,B")
                .help("Channel weights for the greyscale projection (default: 1,1,1)"),
        )
        .arg(
            Arg::with_name("show-seams")
                .long("show-seams")
                .takes_value(true)
                .value_name("RRGGBB")
                .conflicts_with("energy")
                .help("Paint the seams a reduction would remove instead of resizing"),
        )
        .arg(
            Arg::with_name("energy")
                .long("energy")
                .help("Write the energy map instead of resizing"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("More logging; repeat for more"),
        )
        .get_matches();

    init_logging(matches.occurrences_of("verbose"));

    if let Err(err) = run(&matches) {
        eprintln!("seamresize: {}", err);
        for cause in err.iter_causes() {
            eprintln!("  caused by: {}", cause);
        }
        process::exit(1);
    }
}
