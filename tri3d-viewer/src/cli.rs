/// Command-line run modes
use std::path::{Path, PathBuf};

use nalgebra::Vector3;
use thiserror::Error;

/// What the viewer does, decided once from the argument shape
#[derive(Debug, Clone, PartialEq)]
pub enum RunMode {
    /// Render one frame rotated by `angle` degrees and write it to `path`
    SingleShot { angle: f32, path: PathBuf },
    /// Interactive loop rotating about Z
    InteractiveFixedAxis,
    /// Interactive loop rotating about `axis`
    InteractiveArbitraryAxis { axis: Vector3<f32> },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CliError {
    /// Historically a silent no-op; `main` still exits 0 for it.
    #[error("expected at most 3 arguments, got {0}")]
    TooManyArguments(usize),

    #[error("invalid angle: {0:?}")]
    InvalidAngle(String),
}

pub const USAGE: &str = "usage: tri3d [<mode> [<angle> [<file>]]]";

/// Parse the arguments that follow the program name.
///
/// `axis` and `default_output` come from the configuration.
pub fn parse_args<S: AsRef<str>>(
    args: &[S],
    axis: Vector3<f32>,
    default_output: &Path,
) -> Result<RunMode, CliError> {
    let angle = |raw: &str| {
        raw.trim()
            .parse::<f32>()
            .map_err(|_| CliError::InvalidAngle(raw.to_string()))
    };

    match args {
        [] => Ok(RunMode::InteractiveFixedAxis),
        [_] => Ok(RunMode::InteractiveArbitraryAxis { axis }),
        [_, raw] => Ok(RunMode::SingleShot {
            angle: angle(raw.as_ref())?,
            path: default_output.to_path_buf(),
        }),
        [_, raw, file] => {
            let file: &str = file.as_ref();
            Ok(RunMode::SingleShot {
                angle: angle(raw.as_ref())?,
                path: PathBuf::from(file),
            })
        }
        _ => Err(CliError::TooManyArguments(args.len())),
    }
}
