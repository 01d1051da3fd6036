//! Simulated computed tomography: a fan of rays from a single emitter, swept
//! through half a turn around a 2D image, producing a sinogram by forward
//! projection and a reconstruction by filtered backprojection.

mod types;
pub use types::*;

mod error;
pub use error::{Error, Result};

pub mod config;
pub use config::{FilterKind, Projection, Sampling, ScanConfig};

pub mod ct;
pub use ct::{Ct, FrameSink, NoFrames, Phase, ScanOutput};

pub mod filter;
pub mod fom;
pub mod grid;
pub mod io;
pub mod phantom;
pub mod projector;
pub use projector::CancelToken;
pub mod ray;
pub mod scanner;
pub mod system_matrix;
pub mod utils;
