/// Command line interface for `tomograph` executable
#[derive(clap::Parser, Debug, Clone)]
#[clap(name = "tomograph", about = "Simulate a CT scan of an image and reconstruct the image from it")]
pub(super) struct Cli {

    /// Raw image to scan: little-endian f32, row by row
    #[clap(short, long, requires = "dims", conflicts_with = "phantom")]
    pub input: Option<PathBuf>,

    /// Dimensions of the input image, as WIDTHxHEIGHT
    #[clap(long, value_parser = parse_dims)]
    pub dims: Option<Shape>,

    /// Scan a built-in phantom instead of an input file
    #[clap(short, long, value_enum, required_unless_present = "input")]
    pub phantom: Option<PhantomKind>,

    /// Side length of the phantom image, in pixels
    #[clap(short, long, default_value = "128")]
    pub size: usize,

    /// Rotation between projections, in degrees
    #[clap(short, long, default_value = "2")]
    pub rotate: i32,

    /// Angle of the first projection, in degrees
    #[clap(long, default_value = "0", allow_hyphen_values = true)]
    pub start: i32,

    /// Number of detectors
    #[clap(short, long, default_value = "181")]
    pub detectors: usize,

    /// Distance between the outermost detectors [default: image diagonal]
    #[clap(long)]
    pub span: Option<u32>,

    /// How samples are gathered along each ray
    #[clap(long, value_enum, default_value_t)]
    pub sampling: Sampling,

    /// Filter applied to the sinogram before backprojection
    #[clap(long, value_enum, default_value_t)]
    pub filter: FilterKind,

    /// Number of taps in the filter kernel (odd)
    #[clap(short, long, default_value_t = DEFAULT_KERNEL_SIZE)]
    pub kernel_size: usize,

    /// TOML file with scan parameters; overrides the corresponding flags
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum number of rayon threads [default: one per core]
    #[clap(short = 'j', long)]
    pub threads: Option<usize>,

    /// Directory where sinogram and reconstruction are written
    #[clap(short, long, default_value = "tomograph-out")]
    pub out_dir: PathBuf,

    /// Only report warnings and errors
    #[clap(short, long)]
    pub quiet: bool,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PhantomKind {
    SheppLogan,
    Disk,
    Point,
}

// ----- Imports ------------------------------------------------------------------------------------------
use std::path::PathBuf;

use tomograph::{
    FilterKind, Sampling, Shape,
    config::DEFAULT_KERNEL_SIZE,
    utils::parse_dims,
};
