//! gymflow
//!
//! Librería del reproductor de rutinas:
//! - `config` resuelve desde el entorno qué rutina, catálogo y preferencias usar.
//! - `player` ancla una `WorkoutSession` al reloj real y la controla con comandos.
//! - `errors` agrupa los fallos de arranque.
//!
//! El motor de sesión vive en `gym-core`; el modelo de datos en `gym-domain`.

pub mod config;
pub mod errors;
pub mod player;

pub use config::{PlayerConfig, Workout};
pub use errors::{AppError, ConfigError};
pub use player::{PlayerCommand, SessionDriver, SessionOutcome};
