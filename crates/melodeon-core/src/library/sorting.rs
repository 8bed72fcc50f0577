use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::track::TrackRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("Unknown sort direction: {other}")),
        }
    }
}

/// Ordena por título y elimina entradas repetidas.
///
/// La comparación es ordinal (byte a byte, distingue mayúsculas) y estable:
/// títulos iguales conservan el orden de entrada.
///
/// OJO: la deduplicación es por identidad (`Arc::ptr_eq`), no por contenido.
/// Solo desaparecen las referencias repetidas al *mismo* registro; dos
/// registros distintos con el mismo título o la misma ruta se conservan ambos.
pub fn sort_and_dedupe(mut records: Vec<Arc<TrackRecord>>, direction: SortDirection) -> Vec<Arc<TrackRecord>> {
    records.sort_by(|a, b| compare_titles(a, b, direction));

    let mut seen: HashSet<*const TrackRecord> = HashSet::with_capacity(records.len());
    records.retain(|record| seen.insert(Arc::as_ptr(record)));
    records
}

fn compare_titles(a: &TrackRecord, b: &TrackRecord, direction: SortDirection) -> Ordering {
    let ord = a.title.as_bytes().cmp(b.title.as_bytes());
    match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}
