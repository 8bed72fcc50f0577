use std::path::PathBuf;

use symphonia::core::errors::Error as SymphoniaError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Configuration parse error: {0}")]
    Parse(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Paths(#[from] melodeon_paths::Error),
}

/// No se pudo recorrer el directorio raíz.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Library root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Library root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to read library root {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum TagError {
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),
}

/// El decodificador no pudo medir la duración.
#[derive(Error, Debug)]
pub enum DurationError {
    #[error("Error getting audio duration: ({code}) {}", path.display())]
    Decoder {
        code: &'static str,
        path: PathBuf,
        #[source]
        source: SymphoniaError,
    },

    #[error("Error getting audio duration: (io) {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error getting audio duration: (no-track) {}", path.display())]
    NoTrack { path: PathBuf },

    #[error("Duration task for {} did not complete", path.display())]
    Join { path: PathBuf },
}

impl DurationError {
    pub(crate) fn decoder(path: PathBuf, source: SymphoniaError) -> Self {
        let code = match &source {
            SymphoniaError::IoError(_) => "io",
            SymphoniaError::DecodeError(_) => "decode",
            SymphoniaError::SeekError(_) => "seek",
            SymphoniaError::Unsupported(_) => "unsupported",
            SymphoniaError::LimitError(_) => "limit",
            SymphoniaError::ResetRequired => "reset",
            #[allow(unreachable_patterns)]
            _ => "decoder",
        };
        DurationError::Decoder { code, path, source }
    }
}

#[derive(Error, Debug)]
pub enum CoverError {
    #[error(transparent)]
    Tags(#[from] TagError),

    #[error("Cover task did not complete")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
