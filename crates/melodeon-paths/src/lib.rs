//! Crate `melodeon_paths`: rutas de configuración de Melodeon

mod errors;
mod fs_utils;
mod paths;

pub use errors::Error;
pub use paths::{ENV_BASE_DIR, MelodeonPaths};

use once_cell::sync::Lazy;

/// Singleton global. `None` si el sistema no ofrece un directorio de usuario.
pub static PATHS: Lazy<Option<MelodeonPaths>> = Lazy::new(|| match MelodeonPaths::resolve() {
    Ok(paths) => Some(paths),
    Err(e) => {
        tracing::warn!(%e, "could not resolve Melodeon paths");
        None
    }
});
