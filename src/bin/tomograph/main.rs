mod cli;
mod progress;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();
    init_logging(args.quiet);

    let image = load_image(&args)?;
    let (config, projection) = scan_parameters(&args, image.dim())?;
    info!("Scanning {}x{} image: {} angles x {} detectors, span {}, {:?} sampling, {:?} filter",
          image.ncols(), image.nrows(),
          group_digits(config.num_angles()), group_digits(config.detector_count),
          config.max_detector_span, projection.sampling, projection.filter);

    // Make sure results can be written before starting the computation
    std::fs::create_dir_all(&args.out_dir)?;

    let pool = match args.threads {
        Some(n) => rayon::ThreadPoolBuilder::new().num_threads(n).build()?,
        None    => rayon::ThreadPoolBuilder::new().build()?,
    };
    let mut progress = Progress::new(config.num_angles(), args.quiet);
    let now = Instant::now();
    let ScanOutput { sinogram, image: reconstruction } = pool.install(|| {
        Ct::new(&image, config)?
            .with_projection(projection)
            .with_sink(&mut progress)
            .run()
    })?;
    progress.finish();
    info!("Scan and reconstruction took {} ms", group_digits(now.elapsed().as_millis()));

    let sinogram_path       = args.out_dir.join("sinogram.raw");
    let reconstruction_path = args.out_dir.join("reconstruction.raw");
    raw::write_image(&sinogram, &sinogram_path)?;
    raw::write_image(&reconstruction, &reconstruction_path)?;
    info!("Wrote {}x{} sinogram to {}", sinogram.ncols(), sinogram.nrows(), sinogram_path.display());
    info!("Wrote reconstruction to {}", reconstruction_path.display());

    println!("RMSE between image and reconstruction: {:.6}", fom::rmse(&image, &reconstruction)?);
    Ok(())
}

fn init_logging(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_image(args: &Cli) -> tomograph::Result<ImageData> {
    if let (Some(path), Some(shape)) = (&args.input, args.dims) {
        let image = raw::read_image(path, shape)?;
        info!("Read image from {}", path.display());
        return Ok(image)
    }
    let shape = (args.size, args.size);
    Ok(match args.phantom.unwrap_or(PhantomKind::SheppLogan) {
        PhantomKind::SheppLogan => phantom::shepp_logan(shape),
        PhantomKind::Point      => phantom::point(shape),
        PhantomKind::Disk       => {
            let radius = args.size as f64 / 4.0;
            phantom::disk(shape, Point::zero(), radius, 1.0)
        }
    })
}

/// Scan parameters from the configuration file if one was given, from the
/// individual flags otherwise
fn scan_parameters(args: &Cli, shape: Shape) -> tomograph::Result<(ScanConfig, Projection)> {
    if let Some(path) = &args.config {
        let file = read_config_file(path)?;
        info!("Read scan parameters from {}", path.display());
        return Ok((file.scan(), file.projection))
    }
    let span = args.span.unwrap_or_else(|| diagonal_span(shape));
    let config = ScanConfig::new(args.rotate, args.start, args.detectors, span);
    let projection = Projection {
        sampling   : args.sampling,
        filter     : args.filter,
        kernel_size: args.kernel_size,
    };
    config.validate()?;
    projection.validate()?;
    Ok((config, projection))
}

// ----- Imports ------------------------------------------------------------------------------------------
use std::error::Error;
use std::time::Instant;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tomograph::{
    Ct, ImageData, Point, Projection, ScanConfig, ScanOutput, Shape,
    config::read_config_file,
    fom,
    io::raw,
    phantom,
    utils::{diagonal_span, group_digits},
};

use cli::{Cli, PhantomKind};
use progress::Progress;
