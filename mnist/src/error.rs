use std::{error::Error, fmt, io, path::PathBuf};

use mlp::{MlErr, initialization::RandErr};

pub type Result<T> = std::result::Result<T, RunErr>;

/// All errors that can occur while running the experiments.
#[derive(Debug)]
pub enum RunErr {
    Io(io::Error),
    Json(serde_json::Error),
    Ml(MlErr),
    Rand(RandErr),
    /// An IDX file couldn't be decoded.
    Idx { path: PathBuf, msg: String },
    /// Invalid configuration, caught before loading any data.
    InvalidConfig(String),
}

impl fmt::Display for RunErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Json(e) => write!(f, "json error: {e}"),
            Self::Ml(e) => write!(f, "{e}"),
            Self::Rand(e) => write!(f, "{e}"),
            Self::Idx { path, msg } => write!(f, "invalid idx file {}: {msg}", path.display()),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl Error for RunErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Ml(e) => Some(e),
            Self::Rand(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RunErr {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for RunErr {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<MlErr> for RunErr {
    fn from(e: MlErr) -> Self {
        Self::Ml(e)
    }
}

impl From<RandErr> for RunErr {
    fn from(e: RandErr) -> Self {
        Self::Rand(e)
    }
}

impl From<RunErr> for io::Error {
    fn from(e: RunErr) -> Self {
        match e {
            RunErr::Io(e) => e,
            e => io::Error::other(e),
        }
    }
}
