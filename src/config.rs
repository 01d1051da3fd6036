//! Scan configuration, and the TOML file format from which it can be read.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::{Error, Result};

/// Half a turn: the sweep covered by one scan, in degrees
pub const SWEEP: i32 = 180;

/// Geometry and angular sampling of one scan.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {

    /// Rotation of the emitter/detector assembly between projections, in
    /// degrees. Must lie in the open interval (0, 180).
    pub rotate_angle: i32,

    /// Angle of the first projection, in degrees
    #[serde(default)]
    pub start_angle: i32,

    /// Number of detectors in the fan
    pub detector_count: usize,

    /// Distance in pixels between the two farthest detectors; also the
    /// diameter of the circle on which emitter and detectors move.
    pub max_detector_span: u32,
}

impl ScanConfig {

    pub fn new(rotate_angle: i32, start_angle: i32, detector_count: usize, max_detector_span: u32) -> Self {
        Self { rotate_angle, start_angle, detector_count, max_detector_span }
    }

    pub fn validate(&self) -> Result<()> {
        if self.rotate_angle <= 0 || self.rotate_angle >= SWEEP {
            return Err(Error::config(format!(
                "rotate angle must lie in (0, {SWEEP}), got {}", self.rotate_angle)))
        }
        if self.detector_count == 0 {
            return Err(Error::config("at least one detector is required"))
        }
        if self.max_detector_span == 0 {
            return Err(Error::config("farthest detector distance must be positive"))
        }
        Ok(())
    }

    /// Number of projections needed to cover half a turn: `ceil(180 / rotate_angle)`,
    /// or 0 if `rotate_angle` is not positive
    pub fn num_angles(&self) -> usize {
        if self.rotate_angle <= 0 { return 0 }
        let step = self.rotate_angle as usize;
        (SWEEP as usize + step - 1) / step
    }
}

/// How the samples along a single ray are gathered.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Sampling {
    /// Exact intersection lengths of the ray with every pixel it crosses
    #[default]
    Siddon,
    /// Discrete line walk: one pixel per step along the ray's major axis, unit weights
    Bresenham,
}

/// Convolution kernel applied to each sinogram row before backprojection.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    /// Plain, unfiltered backprojection
    None,
    /// Spatial-domain ramp filter
    #[default]
    RamLak,
    /// Ramp filter apodized with a sinc window
    SheppLogan,
}

pub const DEFAULT_KERNEL_SIZE: usize = 21;

/// Numerical policy shared by forward projection and backprojection.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Projection {
    #[serde(default)]
    pub sampling: Sampling,

    #[serde(default)]
    pub filter: FilterKind,

    /// Number of taps in the filter kernel. Must be odd.
    #[serde(default = "default_kernel_size")]
    pub kernel_size: usize,
}

fn default_kernel_size() -> usize { DEFAULT_KERNEL_SIZE }

impl Default for Projection {
    fn default() -> Self {
        Self {
            sampling: Sampling::default(),
            filter: FilterKind::default(),
            kernel_size: DEFAULT_KERNEL_SIZE,
        }
    }
}

impl Projection {
    pub fn validate(&self) -> Result<()> {
        if self.kernel_size % 2 == 0 {
            return Err(Error::config(format!(
                "filter kernel size must be odd, got {}", self.kernel_size)))
        }
        Ok(())
    }
}

/// Contents of a configuration file
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub rotate_angle: i32,

    #[serde(default)]
    pub start_angle: i32,

    pub detector_count: usize,

    pub max_detector_span: u32,

    #[serde(default)]
    pub projection: Projection,
}

impl FileConfig {
    pub fn scan(&self) -> ScanConfig {
        ScanConfig::new(self.rotate_angle, self.start_angle, self.detector_count, self.max_detector_span)
    }

    pub fn validate(&self) -> Result<()> {
        self.scan().validate()?;
        self.projection.validate()
    }
}

pub fn parse_config(input: &str) -> Result<FileConfig> {
    let config: FileConfig = toml::from_str(input)?;
    config.validate()?;
    Ok(config)
}

pub fn read_config_file(path: &Path) -> Result<FileConfig> {
    parse_config(&fs::read_to_string(path)?)
}
