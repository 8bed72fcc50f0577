use std::{env, path::PathBuf};

use directories::ProjectDirs;

use crate::{errors::Error, fs_utils};

/// Nombre de la ENV var para override de ruta base (modo “portable”)
pub const ENV_BASE_DIR: &str = "MELODEON_BASE_DIR";

/// Rutas de usuario que usa la biblioteca.
#[derive(Debug, Clone)]
pub struct MelodeonPaths {
    pub config_dir: PathBuf,
    pub settings_file: PathBuf,
}

impl MelodeonPaths {
    /// Calcula las rutas sin tocar el disco.
    pub fn resolve() -> Result<Self, Error> {
        let config_dir = if let Ok(base) = env::var(ENV_BASE_DIR) {
            PathBuf::from(base).join("config")
        } else {
            let proj = ProjectDirs::from("com", "Melodeon", "Melodeon").ok_or(Error::NoHome)?;
            proj.config_dir().to_path_buf()
        };

        Ok(MelodeonPaths {
            settings_file: config_dir.join("settings.toml"),
            config_dir,
        })
    }

    /// Calcula las rutas y crea la estructura de carpetas.
    pub fn new() -> Result<Self, Error> {
        let paths = Self::resolve()?;
        paths.ensure_structure()?;
        paths.validate_structure()?;
        Ok(paths)
    }

    pub fn ensure_structure(&self) -> Result<(), Error> {
        fs_utils::ensure_dir(&self.config_dir)
    }

    /// Valida que la carpeta de configuración existe Y es escribible.
    /// Si falta, la intenta crear.
    pub fn validate_structure(&self) -> Result<(), Error> {
        if !self.config_dir.exists() {
            fs_utils::ensure_dir(&self.config_dir)?;
        }
        fs_utils::check_writable(&self.config_dir)
    }
}
