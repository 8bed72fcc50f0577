mod covers;
mod duration;
mod tags;
mod uri;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::spawn_blocking;
use tracing::{Level, error, instrument, warn};

use melodeon_core::{TagInfo, TrackRecord, format_duration};

use crate::traits::MetadataProcessor;

pub use covers::{data_uri, fetch_cover};
pub use duration::{measure_duration, resolve_duration};
pub use tags::read_tags;
pub use uri::track_uri;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalMetadataConfig {
    /// Porcentaje de CPU a usar (0.0–100.0)
    pub cpu_percent: f32,
    /// Medir la duración con el decodificador cuando el contenedor no la trae.
    pub duration_fallback: bool,
}

impl Default for LocalMetadataConfig {
    fn default() -> Self {
        Self {
            cpu_percent: 50.0,
            duration_fallback: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocalMetadata {
    config: Arc<LocalMetadataConfig>,
}

impl LocalMetadata {
    pub fn new(config: LocalMetadataConfig) -> Self {
        LocalMetadata {
            config: config.into(),
        }
    }

    fn calc_max_threads(&self) -> usize {
        let max_threads = (num_cpus::get() as f32 * self.config.cpu_percent / 100.0).ceil() as usize;
        max_threads.clamp(1, 100)
    }

    /// Resuelve todas las rutas a la vez.
    ///
    /// Todas las tareas se lanzan antes de esperar a ninguna; el semáforo solo
    /// limita cuántas leen del disco al mismo tiempo. El resultado tiene una
    /// entrada por ruta, en el mismo orden.
    pub async fn process(&self, paths: Vec<PathBuf>) -> Vec<TrackRecord> {
        let sem = Arc::new(Semaphore::new(self.calc_max_threads()));

        let (paths, tasks): (Vec<_>, Vec<_>) = paths
            .into_iter()
            .map(|path| {
                let sem = sem.clone();
                let this = self.clone();
                let task_path = path.clone();

                let task = tokio::spawn(async move {
                    let _permit = sem.acquire_owned().await.ok();
                    this.resolve_track(&task_path).await
                });
                (path, task)
            })
            .unzip();

        paths
            .into_iter()
            .zip(join_all(tasks).await)
            .map(|(path, res)| match res {
                Ok(record) => record,
                Err(join_e) => {
                    error!(error = %join_e, path = %path.display(), "panic while resolving metadata");
                    TrackRecord::new(path)
                }
            })
            .collect()
    }

    /// Construye el registro de un fichero. Nunca falla.
    ///
    /// Si no se puede leer el fichero o sus etiquetas se devuelve el registro
    /// base (ruta real y valores por defecto). Si las etiquetas no traen
    /// duración se intenta medirla con el decodificador.
    #[instrument(level = Level::DEBUG, skip(self), fields(path = %path.display()))]
    pub async fn resolve_track(&self, path: &Path) -> TrackRecord {
        let mut record = TrackRecord::new(path);

        let tags = match read_file_tags(path).await {
            Ok(tags) => tags,
            Err(e) => {
                warn!("An error occurred while reading {} tags: {e:#}", path.display());
                return record;
            }
        };

        record.apply_tags(tags);

        if !record.has_known_duration() && self.config.duration_fallback {
            match resolve_duration(path).await {
                Ok(secs) => record.duration = format_duration(Some(secs)),
                Err(e) => warn!("An error occurred while getting {} duration: {e}", path.display()),
            }
        }

        record
    }
}

#[async_trait::async_trait]
impl MetadataProcessor for LocalMetadata {
    async fn process(&self, paths: Vec<PathBuf>) -> Vec<TrackRecord> {
        LocalMetadata::process(self, paths).await
    }
}

async fn read_file_tags(path: &Path) -> Result<TagInfo> {
    let owned = path.to_path_buf();
    let tags = spawn_blocking(move || read_tags(&owned))
        .await
        .context("tag reader task did not complete")?
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(tags)
}
