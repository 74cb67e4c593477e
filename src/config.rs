//! Configuración del reproductor de consola.
//! Carga variables de entorno (.env) una sola vez y resuelve las rutas de los
//! documentos JSON (rutina, catálogo, preferencias) que alimentan la sesión.
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dotenvy::dotenv;
use gym_domain::{InMemoryExerciseCatalog, Routine, Settings};
use once_cell::sync::Lazy;

use crate::errors::{AppError, ConfigError};

pub const ROUTINE_VAR: &str = "GYMFLOW_ROUTINE";
pub const CATALOG_VAR: &str = "GYMFLOW_CATALOG";
pub const SETTINGS_VAR: &str = "GYMFLOW_SETTINGS";
pub const AUTO_NEXT_VAR: &str = "GYMFLOW_AUTO_NEXT";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Forzar carga temprana de .env.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Documento de la rutina (obligatorio).
    pub routine_path: PathBuf,
    /// Catálogo de ejercicios; sin él todos los títulos caen al de respaldo.
    pub catalog_path: Option<PathBuf>,
    /// Preferencias; sin ellas se usan los defaults.
    pub settings_path: Option<PathBuf>,
    /// Fuerza el auto-avance por encima de lo que digan las preferencias.
    pub auto_next: Option<bool>,
}

/// Documentos ya leídos y listos para arrancar una sesión.
#[derive(Debug, Clone)]
pub struct Workout {
    pub routine: Routine,
    pub catalog: InMemoryExerciseCatalog,
    pub settings: Settings,
}

impl PlayerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        init_dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
        where F: Fn(&str) -> Option<String>
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let routine_path = non_empty(ROUTINE_VAR).map(PathBuf::from)
                                                 .ok_or(ConfigError::MissingVar(ROUTINE_VAR))?;
        let auto_next = match non_empty(AUTO_NEXT_VAR) {
            Some(raw) => Some(parse_flag(&raw).ok_or(ConfigError::InvalidVar { name: AUTO_NEXT_VAR,
                                                                                  value: raw })?),
            None => None,
        };

        Ok(Self { routine_path,
                  catalog_path: non_empty(CATALOG_VAR).map(PathBuf::from),
                  settings_path: non_empty(SETTINGS_VAR).map(PathBuf::from),
                  auto_next })
    }

    /// Lee y valida los documentos. El override de auto-avance se aplica
    /// sobre las preferencias cargadas.
    pub fn load(&self) -> Result<Workout, AppError> {
        let routine = Routine::from_json(&read(&self.routine_path)?)?;
        let catalog = match &self.catalog_path {
            Some(path) => InMemoryExerciseCatalog::from_json(&read(path)?)?,
            None => InMemoryExerciseCatalog::new(),
        };
        let mut settings = match &self.settings_path {
            Some(path) => Settings::from_json(&read(path)?)?,
            None => Settings::default(),
        };
        if let Some(auto_next) = self.auto_next {
            settings.auto_next = auto_next;
        }
        log::debug!("loaded routine {} ({} exercises in catalog)", routine.id, catalog.len());
        Ok(Workout { routine, catalog, settings })
    }
}

fn read(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| AppError::Io { path: path.to_path_buf(), source })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn routine_is_required() {
        assert_eq!(PlayerConfig::from_lookup(lookup(&[])), Err(ConfigError::MissingVar(ROUTINE_VAR)));
        assert_eq!(PlayerConfig::from_lookup(lookup(&[(ROUTINE_VAR, "  ")])),
                   Err(ConfigError::MissingVar(ROUTINE_VAR)));
    }

    #[test]
    fn optional_paths_and_flag() {
        let cfg = PlayerConfig::from_lookup(lookup(&[(ROUTINE_VAR, "r.json"),
                                                     (CATALOG_VAR, "c.json"),
                                                     (AUTO_NEXT_VAR, "On")])).unwrap();
        assert_eq!(cfg.routine_path, PathBuf::from("r.json"));
        assert_eq!(cfg.catalog_path, Some(PathBuf::from("c.json")));
        assert_eq!(cfg.settings_path, None);
        assert_eq!(cfg.auto_next, Some(true));
    }

    #[test]
    fn bad_flag_is_rejected() {
        let err = PlayerConfig::from_lookup(lookup(&[(ROUTINE_VAR, "r.json"), (AUTO_NEXT_VAR, "maybe")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidVar { name: AUTO_NEXT_VAR, value: "maybe".into() });
    }
}
