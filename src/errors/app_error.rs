use std::path::PathBuf;

use gym_core::SessionError;
use gym_domain::DomainError;
use thiserror::Error;

use super::config_error::ConfigError;

/// Error de nivel aplicación: todo lo que puede impedir arrancar una sesión
/// desde la consola.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de configuración: {0}")]
    Config(#[from] ConfigError),
    #[error("No se pudo leer {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Documento inválido: {0}")]
    Domain(#[from] DomainError),
    #[error("Sesión: {0}")]
    Session(#[from] SessionError),
}
