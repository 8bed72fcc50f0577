//! Crate `melodeon_local_library`: escaneo de carpetas locales y lectura de metadatos.

pub mod error;
pub mod library_config;
pub mod manager;
pub mod parsing;
pub mod scanning;
pub mod traits;

#[cfg(test)]
mod test_support;

pub use error::{ConfigError, CoverError, DurationError, LibraryError, ScanError, TagError};
pub use library_config::{LibraryConfig, LibraryConfigBuilder, LibrarySettings};
pub use manager::LibraryManager;
pub use parsing::{LocalMetadata, LocalMetadataConfig};
pub use scanning::{LocalScanner, LocalScannerConfig, PathFilter};
