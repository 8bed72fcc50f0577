use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::duration::UNKNOWN_DURATION;

/// Título usado cuando la ruta no tiene nombre de fichero utilizable.
pub const UNKNOWN_TITLE: &str = "Unknown";
pub const UNKNOWN_ARTIST: &str = "Unknown artist";
pub const UNKNOWN_ALBUM: &str = "Unknown";

/// Una pista de la biblioteca tal y como se entrega a la interfaz.
///
/// Se crea una vez por fichero descubierto y no se modifica después:
/// todos los campos tienen un valor por defecto, `path` siempre es la ruta real
/// y `duration` siempre es un reloj bien formado (`mm:ss` o `hh:mm:ss`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRecord {
    /// Ruta absoluta; clave única dentro de un escaneo.
    pub path: PathBuf,
    /// Nunca vacío. Por defecto, el nombre del fichero con la primera letra en mayúscula.
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: Option<String>,
    pub year: Option<u32>,
    pub duration: String,
    /// Imagen embebida como `data:` URI; vacía salvo que se pida.
    pub cover: String,
    pub play_count: u32,
}

impl TrackRecord {
    /// Registro base para `path`: valores por defecto y título derivado del nombre del fichero.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let title = default_title(&path);

        TrackRecord {
            path,
            title,
            artist: UNKNOWN_ARTIST.to_string(),
            album: UNKNOWN_ALBUM.to_string(),
            genre: None,
            year: None,
            duration: UNKNOWN_DURATION.to_string(),
            cover: String::new(),
            play_count: 0,
        }
    }

    /// Sobrescribe campo a campo con lo que trajeron las etiquetas.
    ///
    /// Un campo ausente en `tags` deja intacto el valor actual. `path` nunca se toca.
    pub fn apply_tags(&mut self, tags: TagInfo) {
        let TagInfo {
            title,
            artist,
            album,
            genre,
            year,
            duration,
        } = tags;

        if let Some(title) = title.filter(|t| !t.is_empty()) {
            self.title = title;
        }
        if let Some(artist) = artist {
            self.artist = artist;
        }
        if let Some(album) = album {
            self.album = album;
        }
        if genre.is_some() {
            self.genre = genre;
        }
        if year.is_some() {
            self.year = year;
        }
        if let Some(duration) = duration {
            self.duration = duration;
        }
    }

    pub fn has_known_duration(&self) -> bool {
        self.duration != UNKNOWN_DURATION
    }
}

/// Lo que el lector de etiquetas consiguió extraer de un fichero.
///
/// Cada campo es opcional: `None` significa "no estaba en el fichero".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagInfo {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub year: Option<u32>,
    /// Ya formateada como reloj.
    pub duration: Option<String>,
}

/// Pone en mayúscula el primer carácter si es una letra, dígito o `_` ASCII.
///
/// Cualquier otro primer carácter (acentos, símbolos, espacios) se deja igual.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => {
            let mut out = String::with_capacity(s.len());
            out.push(c.to_ascii_uppercase());
            out.push_str(chars.as_str());
            out
        }
        _ => s.to_string(),
    }
}

/// Nombre del fichero (con extensión) capitalizado.
pub fn default_title(path: &Path) -> String {
    path.file_name()
        .map(|name| capitalize_first(&name.to_string_lossy()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string())
}
