use std::borrow::Cow;
use std::path::Path;

use lofty::config::ParseOptions;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::Accessor;
use tracing::trace;

use melodeon_core::TagInfo;
use melodeon_core::format_duration_secs;
use melodeon_core::library::track::{capitalize_first, default_title};

use crate::error::TagError;

/// Lee etiquetas y duración del contenedor sin cargar las portadas.
///
/// El título siempre viene relleno: si la etiqueta no lo trae se usa el nombre
/// del fichero. Una duración de cero se considera ausente.
pub fn read_tags(path: &Path) -> Result<TagInfo, TagError> {
    trace!(path = %path.display(), "parsing tags");

    let tagged = Probe::open(path)?
        .options(ParseOptions::new().read_cover_art(false))
        .read()?;

    let duration = tagged.properties().duration();
    let mut info = TagInfo {
        duration: (!duration.is_zero()).then(|| format_duration_secs(duration)),
        ..TagInfo::default()
    };

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        info.title = tag
            .title()
            .map(|t| capitalize_first(&t))
            .filter(|t| !t.is_empty());
        info.artist = tag.artist().map(Cow::into_owned);
        info.album = tag.album().map(Cow::into_owned);
        info.genre = tag.genre().map(Cow::into_owned);
        info.year = tag.year();
    }

    if info.title.is_none() {
        info.title = Some(default_title(path));
    }

    Ok(info)
}
