use std::ffi::OsStr;
use std::path::Path;

/// Extensiones reproducibles por defecto. La comparación distingue mayúsculas.
pub const DEFAULT_EXTENSIONS: &[&str] = &["mp3", "m4a"];

/// `true` si la extensión de `path` está en la lista por defecto.
pub fn is_playable(path: &Path) -> bool {
    extension_of(path).is_some_and(|ext| DEFAULT_EXTENSIONS.contains(&ext))
}

/// Texto tras el último `.` del nombre del fichero.
fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(OsStr::to_str)
}

/// Filtro de ficheros reproducibles construido desde la configuración.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFilter {
    extensions: Vec<String>,
}

impl PathFilter {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect();

        PathFilter { extensions }
    }

    pub fn is_playable(&self, path: &Path) -> bool {
        extension_of(path).is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        PathFilter::new(DEFAULT_EXTENSIONS)
    }
}
