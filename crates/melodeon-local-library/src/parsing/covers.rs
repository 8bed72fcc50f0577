use std::path::Path;

use base64::{Engine, engine::general_purpose::STANDARD};
use lofty::file::TaggedFileExt;
use lofty::picture::{MimeType, Picture};
use lofty::probe::Probe;
use tokio::task::spawn_blocking;
use tracing::warn;

use crate::error::{CoverError, TagError};

/// Primera portada embebida de `path` como `data:image/<formato>;base64,...`.
///
/// Una ruta vacía devuelve `None` sin tocar el disco. Los fallos de lectura se
/// registran y también devuelven `None`.
pub async fn fetch_cover(path: &Path) -> Option<String> {
    if path.as_os_str().is_empty() {
        return None;
    }

    match try_fetch_cover(path).await {
        Ok(cover) => cover,
        Err(e) => {
            warn!(%e, path = %path.display(), "could not read cover art");
            None
        }
    }
}

async fn try_fetch_cover(path: &Path) -> Result<Option<String>, CoverError> {
    let owned = path.to_path_buf();
    let cover = spawn_blocking(move || read_cover(&owned)).await??;
    Ok(cover)
}

fn read_cover(path: &Path) -> Result<Option<String>, TagError> {
    let tagged = Probe::open(path)?.read()?;

    let picture = tagged
        .primary_tag()
        .and_then(|t| t.pictures().first())
        .or_else(|| tagged.tags().iter().find_map(|t| t.pictures().first()));

    Ok(picture.map(picture_to_data_uri))
}

fn picture_to_data_uri(pic: &Picture) -> String {
    data_uri(image_format(pic.mime_type()), pic.data())
}

pub fn data_uri(format: &str, data: &[u8]) -> String {
    format!("data:image/{format};base64,{}", STANDARD.encode(data))
}

/// Subtipo de imagen (`jpeg`, `png`, ...). Sin MIME declarado se asume `jpeg`.
fn image_format(mime: Option<&MimeType>) -> &str {
    mime.map(MimeType::as_str)
        .map(|m| m.strip_prefix("image/").unwrap_or(m))
        .filter(|m| !m.is_empty())
        .unwrap_or("jpeg")
}
