//! Failure kinds surfaced to the caller, each with its own exit status.

use std::path::PathBuf;
use std::process::ExitCode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A requested category is not present on the host.
    #[error("counter category {0:?} does not exist")]
    ValidationError(String),

    /// Discovery takes exactly one category.
    #[error("discovery expects exactly one category, got {0}")]
    TooManyTargets(usize),

    #[error("counter category {0:?} is not multi-instance and cannot be discovered")]
    NotDiscoverable(String),

    #[error("counter category {category:?} has no instance {instance:?}")]
    UnknownInstance { category: String, instance: String },

    #[error("counter category {category:?} has unsupported type {kind:?}")]
    UnsupportedCategoryType { category: String, kind: String },

    #[error("write {target}: {source}")]
    WriteFailure {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialize {what}: {message}")]
    Encode { what: &'static str, message: String },

    #[error("load counter catalog {path}: {source:#}")]
    Source {
        path: PathBuf,
        source: anyhow::Error,
    },

    #[error("configuration: {0:#}")]
    Config(anyhow::Error),
}

impl Error {
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    pub fn exit_status(&self) -> u8 {
        match self {
            Error::ValidationError(_) => 1,
            Error::TooManyTargets(_) => 2,
            Error::NotDiscoverable(_) => 3,
            Error::UnsupportedCategoryType { .. } => 4,
            Error::WriteFailure { .. } => 5,
            Error::Source { .. } => 6,
            Error::Config(_) => 7,
            Error::Encode { .. } => 8,
            Error::UnknownInstance { .. } => 9,
        }
    }
}
