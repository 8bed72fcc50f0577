mod extensions;

use std::{
    ffi::OsStr,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_walkdir::{Filtering, WalkDir};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::{Level, debug, instrument, warn};

use crate::error::ScanError;
use crate::traits::Scanner;

pub use extensions::{DEFAULT_EXTENSIONS, PathFilter, is_playable};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LocalScannerConfig {
    /// Extensiones reproducibles, sin punto. Distingue mayúsculas.
    pub extensions: Vec<String>,
    /// Si es `false` se saltan ficheros y carpetas que empiezan por `.`.
    pub include_hidden: bool,
    /// Carpetas cuyo contenido no se recorre.
    pub exclude: Vec<PathBuf>,
}

impl Default for LocalScannerConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            include_hidden: true,
            exclude: vec![],
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocalScanner {
    pub config: LocalScannerConfig,
}

impl LocalScanner {
    pub fn new(config: LocalScannerConfig) -> Self {
        Self { config }
    }

    /// Recorre `root` recursivamente y devuelve las rutas reproducibles.
    ///
    /// Una raíz inexistente o ilegible es un error; los fallos en entradas
    /// concretas por debajo de la raíz se registran y se saltan.
    /// El orden de las rutas no está garantizado.
    #[instrument(level = Level::INFO, skip(self), fields(root = %root.display()))]
    pub async fn scan(&self, root: &Path) -> Result<Vec<PathBuf>, ScanError> {
        let root = check_root(root).await?;
        let filter = PathFilter::new(&self.config.extensions);
        let excluded = Arc::new(normalize_paths(self.config.exclude.clone()));
        let include_hidden = self.config.include_hidden;

        let mut walker = WalkDir::new(&root).filter(move |entry| {
            let excluded = excluded.clone();
            async move {
                let path = entry.path();
                if excluded.iter().any(|p| path.starts_with(p)) {
                    return Filtering::IgnoreDir;
                }
                if !include_hidden && is_hidden(&entry.file_name()) {
                    return Filtering::IgnoreDir;
                }
                Filtering::Continue
            }
        });

        let mut found = Vec::new();
        while let Some(next) = walker.next().await {
            match next {
                Ok(de) => {
                    let path = de.path();
                    if !filter.is_playable(&path) {
                        continue;
                    }
                    match de.file_type().await {
                        Ok(ft) if ft.is_symlink() => {
                            if symlink_to_file(&path).await {
                                found.push(path);
                            }
                        }
                        Ok(ft) if ft.is_dir() => {}
                        Ok(_) => found.push(path),
                        Err(e) => warn!(%e, path = %path.display(), "could not read entry type"),
                    }
                }
                Err(e) => warn!(?e, "walkdir error"),
            }
        }

        debug!(files = found.len(), "walk finished");
        Ok(found)
    }
}

#[async_trait::async_trait]
impl Scanner for LocalScanner {
    async fn scan(&self, root: &Path) -> Result<Vec<PathBuf>, ScanError> {
        LocalScanner::scan(self, root).await
    }
}

async fn check_root(root: &Path) -> Result<PathBuf, ScanError> {
    let io_err = |source: std::io::Error| match source.kind() {
        ErrorKind::NotFound => ScanError::RootNotFound(root.to_path_buf()),
        _ => ScanError::Io {
            path: root.to_path_buf(),
            source,
        },
    };

    let md = tokio::fs::metadata(root).await.map_err(io_err)?;
    if !md.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }
    // read_dir detecta la falta de permisos antes de empezar a recorrer
    tokio::fs::read_dir(root).await.map_err(io_err)?;

    let canonical = tokio::fs::canonicalize(root).await.map_err(io_err)?;
    Ok(dunce::simplified(&canonical).to_path_buf())
}

/// Los enlaces simbólicos no se recorren: solo cuentan si apuntan a un fichero.
async fn symlink_to_file(path: &Path) -> bool {
    match tokio::fs::metadata(path).await {
        Ok(md) if md.is_file() => true,
        Ok(_) => {
            debug!(path = %path.display(), "skipping symlink to a directory");
            false
        }
        Err(e) => {
            debug!(%e, path = %path.display(), "skipping broken symlink");
            false
        }
    }
}

fn normalize_paths(p: Vec<PathBuf>) -> Vec<PathBuf> {
    p.into_iter()
        .filter_map(|pb| dunce::canonicalize(&pb).ok())
        .collect()
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|n| n.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn names(paths: &[PathBuf]) -> Vec<String> {
        let mut names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn returns_only_playable_files_recursively() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("one.mp3"), b"x").unwrap();
        fs::write(dir.path().join("notes.pdf"), b"x").unwrap();
        fs::write(dir.path().join("LOUD.MP3"), b"x").unwrap();
        fs::write(nested.join("two.m4a"), b"x").unwrap();
        fs::create_dir_all(dir.path().join("album.mp3")).unwrap();

        let found = LocalScanner::new(LocalScannerConfig::default())
            .scan(dir.path())
            .await
            .unwrap();

        assert_eq!(names(&found), ["one.mp3", "two.m4a"]);
        assert!(found.iter().all(|p| p.is_absolute() && is_playable(p)));
    }

    #[tokio::test]
    async fn empty_directory_is_not_an_error() {
        let dir = tempdir().unwrap();
        let found = LocalScanner::new(LocalScannerConfig::default())
            .scan(dir.path())
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn missing_root_is_reported() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = LocalScanner::new(LocalScannerConfig::default())
            .scan(&missing)
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::RootNotFound(p) if p == missing));
    }

    #[tokio::test]
    async fn file_root_is_reported() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("song.mp3");
        fs::write(&file, b"x").unwrap();

        let err = LocalScanner::new(LocalScannerConfig::default())
            .scan(&file)
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory(_)));
    }

    #[tokio::test]
    async fn respects_include_hidden_false() {
        let dir = tempdir().unwrap();
        let hidden_dir = dir.path().join(".cache");
        fs::create_dir_all(&hidden_dir).unwrap();
        fs::write(hidden_dir.join("inside.mp3"), b"x").unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"x").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"x").unwrap();

        let all = LocalScanner::new(LocalScannerConfig::default())
            .scan(dir.path())
            .await
            .unwrap();
        assert_eq!(all.len(), 3);

        let config = LocalScannerConfig {
            include_hidden: false,
            ..LocalScannerConfig::default()
        };
        let visible = LocalScanner::new(config).scan(dir.path()).await.unwrap();
        assert_eq!(names(&visible), ["visible.mp3"]);
    }

    #[tokio::test]
    async fn respects_exclude() {
        let dir = tempdir().unwrap();
        let skip = dir.path().join("podcasts");
        fs::create_dir_all(&skip).unwrap();
        fs::write(skip.join("episode.mp3"), b"x").unwrap();
        fs::write(dir.path().join("keep.mp3"), b"x").unwrap();

        let config = LocalScannerConfig {
            exclude: vec![skip],
            ..LocalScannerConfig::default()
        };
        let found = LocalScanner::new(config).scan(dir.path()).await.unwrap();
        assert_eq!(names(&found), ["keep.mp3"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlinks_count_only_when_they_point_to_files() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let real = dir.path().join("real");
        fs::create_dir_all(&real).unwrap();
        fs::write(real.join("inner.mp3"), b"x").unwrap();
        fs::write(dir.path().join("song.mp3"), b"x").unwrap();

        symlink(dir.path().join("song.mp3"), dir.path().join("alias.mp3")).unwrap();
        symlink(&real, dir.path().join("linked.mp3")).unwrap();
        symlink(dir.path().join("gone.mp3"), dir.path().join("dangling.mp3")).unwrap();

        let found = LocalScanner::new(LocalScannerConfig::default())
            .scan(dir.path())
            .await
            .unwrap();
        assert_eq!(names(&found), ["alias.mp3", "inner.mp3", "song.mp3"]);
    }

    #[tokio::test]
    async fn configured_extensions_replace_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.flac"), b"x").unwrap();
        fs::write(dir.path().join("b.mp3"), b"x").unwrap();

        let config = LocalScannerConfig {
            extensions: vec!["flac".into()],
            ..LocalScannerConfig::default()
        };
        let found = LocalScanner::new(config).scan(dir.path()).await.unwrap();
        assert_eq!(names(&found), ["a.flac"]);
    }
}
