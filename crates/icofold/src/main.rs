//! icofold: unwrap an equirectangular panorama onto an icosahedral atlas.
//!
//! Decodes the input panorama, projects it onto the 20 faces of an
//! icosahedron inscribed in the unit sphere, unwraps the faces into the
//! standard icosahedral net, and writes the atlas image.
//!
//! # Usage
//!
//! ```text
//! icofold -i panorama.jpg -o out/atlas.png [-r 600] [-f 0]
//! ```

use std::path::PathBuf;

use clap::Parser;
use icofold_sampler::{IcoSampler, UnwrapConfig};

/// Unwrap an equirectangular panorama onto the faces of an icosahedron.
#[derive(Parser)]
#[command(name = "icofold", version)]
struct Args {
    /// Path to the input equirectangular image (PNG, JPEG, BMP, WebP).
    /// Must be twice as wide as it is tall.
    #[arg(short, long)]
    input: PathBuf,

    /// Output image path (PNG recommended). Missing parent directories
    /// are created.
    #[arg(short, long)]
    output: PathBuf,

    /// Pixel resolution of a single triangular face's base edge.
    #[arg(
        short = 'r',
        long,
        default_value_t = UnwrapConfig::DEFAULT_RESOLUTION,
        value_parser = clap::builder::RangedU64ValueParser::<u32>::new().range(1..),
    )]
    face_resolution: u32,

    /// Circular offset of face columns in the final image, in [-2, 2].
    #[arg(
        short = 'f',
        long,
        default_value_t = UnwrapConfig::DEFAULT_FACE_OFFSET,
        allow_negative_numbers = true,
    )]
    face_offset: i32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Reading panorama from {}", args.input.display());
    let panorama = image::open(&args.input)?.to_rgb8();

    eprintln!(
        "Unwrapping {}x{} panorama at face resolution {}...",
        panorama.width(),
        panorama.height(),
        args.face_resolution,
    );
    let sampler = IcoSampler::new(args.face_resolution)?;
    let atlas = sampler.unwrap(&panorama, args.face_offset)?;

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    eprintln!(
        "Saving {}x{} atlas to {}",
        atlas.width(),
        atlas.height(),
        args.output.display(),
    );
    atlas.save(&args.output)?;

    eprintln!("Done.");
    Ok(())
}
