use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use melodeon_core::SortDirection;
use melodeon_paths::MelodeonPaths;

use crate::{error::ConfigError, parsing::LocalMetadataConfig, scanning::LocalScannerConfig};

/// Prefijo de las variables de entorno (`MELODEON__METADATA__CPU_PERCENT=25`).
pub const ENV_PREFIX: &str = "MELODEON";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Dirección del orden por título.
    pub sort: SortDirection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct LibraryConfig {
    pub scanner: LocalScannerConfig,
    pub metadata: LocalMetadataConfig,
    pub library: LibrarySettings,
}

impl LibraryConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_string_lossy().into_owned();
        let cfg = Config::builder()
            .add_source(File::new(&path, FileFormat::Toml))
            .build()
            .map_err(ConfigError::Parse)?;
        let lc = cfg.try_deserialize::<LibraryConfig>().map_err(ConfigError::Parse)?;
        lc.validate()?;
        Ok(lc)
    }

    /// Carga la configuración por capas: valores por defecto, fichero TOML
    /// opcional y variables de entorno `MELODEON__*`.
    ///
    /// Sin `path` se usa `settings.toml` de la carpeta de configuración del
    /// usuario. Si el fichero no existe se siguen usando los valores por defecto.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = path.map(Path::to_path_buf).or_else(Self::default_path);

        let mut builder = Config::builder();
        if let Some(file) = &file {
            debug!(file = %file.display(), "loading settings");
            builder = builder.add_source(File::new(&file.to_string_lossy(), FileFormat::Toml).required(false));
        }

        let cfg = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let lc = cfg.try_deserialize::<LibraryConfig>()?;
        lc.validate()?;
        Ok(lc)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let cpu = self.metadata.cpu_percent;
        if !(cpu > 0.0 && cpu <= 100.0) {
            return Err(ConfigError::Invalid(format!(
                "metadata.cpu_percent must be in (0, 100], got {cpu}"
            )));
        }
        if self.scanner.extensions.iter().all(|e| e.trim().trim_start_matches('.').is_empty()) {
            return Err(ConfigError::Invalid("scanner.extensions must not be empty".into()));
        }
        Ok(())
    }

    /// Prepara la carpeta de configuración y el fichero de ajustes.
    ///
    /// Si el fichero no existe se escribe con los valores por defecto; si
    /// existe se carga y se valida sin modificarlo.
    pub fn init(paths: &MelodeonPaths) -> Result<Self, ConfigError> {
        paths.ensure_structure()?;
        paths.validate_structure()?;

        if paths.settings_file.exists() {
            debug!(file = %paths.settings_file.display(), "settings already present");
            return Self::from_file(&paths.settings_file);
        }

        let cfg = Self::default();
        cfg.save(&paths.settings_file)?;
        info!(file = %paths.settings_file.display(), "default settings written");
        Ok(cfg)
    }

    /// Fichero de configuración por defecto, si el sistema tiene carpeta de usuario.
    pub fn default_path() -> Option<PathBuf> {
        melodeon_paths::PATHS.as_ref().map(|p| p.settings_file.clone())
    }
}
