use thiserror::Error;

/// Errores al leer la configuración del reproductor desde el entorno.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("variable de entorno no definida: {0}")]
    MissingVar(&'static str),
    #[error("valor inválido para {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}
