use std::{
    path::Path,
    sync::Arc,
    time::Instant,
};

use tracing::{Level, info, instrument};

use melodeon_core::{SortDirection, TrackRecord, sort_and_dedupe};

use crate::{
    error::LibraryError,
    library_config::LibraryConfig,
    parsing::{LocalMetadata, fetch_cover},
    scanning::LocalScanner,
    traits::{MetadataProcessor, Scanner},
};

/// Recorre una carpeta y construye la colección ordenada de pistas.
#[derive(Debug, Clone)]
pub struct LibraryManager<S = LocalScanner, M = LocalMetadata> {
    scanner: Arc<S>,
    metadata: Arc<M>,
    sort: SortDirection,
}

impl LibraryManager {
    pub fn new(config: LibraryConfig) -> Self {
        let scanner = LocalScanner::new(config.scanner);
        let metadata = LocalMetadata::new(config.metadata);

        Self::with_parts(scanner, metadata, config.library.sort)
    }

    /// Carga la configuración (fichero + entorno) y construye el gestor.
    pub fn load(config_path: Option<&Path>) -> Result<Self, LibraryError> {
        let config = LibraryConfig::load(config_path)?;
        Ok(Self::new(config))
    }
}

impl Default for LibraryManager {
    fn default() -> Self {
        Self::new(LibraryConfig::default())
    }
}

impl<S, M> LibraryManager<S, M>
where
    S: Scanner,
    M: MetadataProcessor,
{
    pub fn with_parts(scanner: S, metadata: M, sort: SortDirection) -> Self {
        Self {
            scanner: Arc::new(scanner),
            metadata: Arc::new(metadata),
            sort,
        }
    }

    pub fn sort(&self) -> SortDirection {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortDirection) {
        self.sort = sort;
    }

    /// Escanea `root` y devuelve un registro por fichero reproducible,
    /// ordenado por título.
    ///
    /// Solo falla si no se puede recorrer la raíz. Los ficheros ilegibles
    /// aparecen con sus valores por defecto.
    #[instrument(level = Level::INFO, skip(self), fields(root = %root.display()))]
    pub async fn scan_library(&self, root: &Path) -> Result<Vec<Arc<TrackRecord>>, LibraryError> {
        info!("Starting file scan...");
        let paths = self.scanner.scan(root).await?;
        info!(files = paths.len(), "Scan complete.");

        let start_time = Instant::now();
        let records = self.metadata.process(paths).await;
        info!(
            tracks = records.len(),
            "Metadata processing took {} ms",
            start_time.elapsed().as_millis()
        );

        let records = records.into_iter().map(Arc::new).collect();
        Ok(sort_and_dedupe(records, self.sort))
    }

    /// Portada embebida de `path` como URI `data:`; `None` si no hay o no se puede leer.
    pub async fn fetch_cover(&self, path: &Path) -> Option<String> {
        fetch_cover(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use crate::parsing::LocalMetadataConfig;
    use crate::test_support::{id3v2, mpeg_frames, text_frame};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    struct FixedScanner(Vec<PathBuf>);

    #[async_trait::async_trait]
    impl Scanner for FixedScanner {
        async fn scan(&self, _root: &Path) -> Result<Vec<PathBuf>, ScanError> {
            Ok(self.0.clone())
        }
    }

    fn tagged_mp3(title: &str, frames: usize) -> Vec<u8> {
        let mut bytes = id3v2(&[("TIT2", text_frame(title))]);
        bytes.extend(mpeg_frames(frames));
        bytes
    }

    #[tokio::test]
    async fn scans_resolves_and_sorts_a_folder() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(dir.path().join("a.mp3"), tagged_mp3("Song", 4797)).unwrap();
        fs::write(sub.join("track7.m4a"), b"not a real m4a").unwrap();
        fs::write(dir.path().join("cover.jpg"), b"jpg").unwrap();

        let records = LibraryManager::default().scan_library(dir.path()).await.unwrap();

        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Song", "Track7.m4a"]);

        assert_eq!(records[0].duration, "02:05");
        assert_eq!(records[0].artist, "Unknown artist");

        let broken = &records[1];
        assert!(broken.path.ends_with("sub/track7.m4a"));
        assert_eq!(broken.artist, "Unknown artist");
        assert_eq!(broken.album, "Unknown");
        assert_eq!(broken.duration, "00:00");
        assert!(broken.cover.is_empty());
        assert_eq!(broken.play_count, 0);
    }

    #[tokio::test]
    async fn descending_order_is_configurable() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("1.mp3"), tagged_mp3("Alpha", 20)).unwrap();
        fs::write(dir.path().join("2.mp3"), tagged_mp3("Beta", 20)).unwrap();

        let mut manager = LibraryManager::default();
        manager.set_sort(SortDirection::Desc);
        let records = manager.scan_library(dir.path()).await.unwrap();

        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Beta", "Alpha"]);
    }

    #[tokio::test]
    async fn empty_folder_gives_empty_collection() {
        let dir = tempdir().unwrap();
        let records = LibraryManager::default().scan_library(dir.path()).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn missing_root_is_an_error() {
        let dir = tempdir().unwrap();
        let err = LibraryManager::default()
            .scan_library(&dir.path().join("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, LibraryError::Scan(ScanError::RootNotFound(_))));
    }

    #[tokio::test]
    async fn same_path_twice_yields_two_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dup.mp3");
        fs::write(&path, tagged_mp3("Dup", 20)).unwrap();

        let manager = LibraryManager::with_parts(
            FixedScanner(vec![path.clone(), path.clone()]),
            LocalMetadata::new(LocalMetadataConfig::default()),
            SortDirection::Asc,
        );
        let records = manager.scan_library(dir.path()).await.unwrap();

        assert_eq!(records.len(), 2);
        assert!(!Arc::ptr_eq(&records[0], &records[1]));
        assert_eq!(records[0], records[1]);
    }

    #[tokio::test]
    async fn fetch_cover_of_empty_path_is_none() {
        assert_eq!(LibraryManager::default().fetch_cover(Path::new("")).await, None);
    }
}
