use thiserror::Error;

use super::Format;
use crate::model::structure::StructureError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse {format} data: {details} (at line ~{line})")]
    Parse {
        format: Format,
        line: usize,
        details: String,
    },

    #[error("the '{0}' format does not support trajectories")]
    UnsupportedTrajectoryFormat(Format),

    #[error("invalid trajectory: {0}")]
    Trajectory(#[from] StructureError),
}

impl Error {
    pub fn parse(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }
}
