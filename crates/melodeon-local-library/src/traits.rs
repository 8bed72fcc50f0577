use std::path::{Path, PathBuf};

use melodeon_core::TrackRecord;

use crate::error::ScanError;

/// Descubre los ficheros reproducibles bajo una raíz.
#[async_trait::async_trait]
pub trait Scanner: Send + Sync {
    async fn scan(&self, root: &Path) -> Result<Vec<PathBuf>, ScanError>;
}

/// Resuelve los metadatos de cada ruta descubierta.
///
/// Nunca falla por fichero: una ruta ilegible produce un registro con valores por defecto.
#[async_trait::async_trait]
pub trait MetadataProcessor: Send + Sync {
    async fn process(&self, paths: Vec<PathBuf>) -> Vec<TrackRecord>;
}
