//! Errores específicos del core.
//!
//! Ninguno cruza la frontera de la máquina de estados hacia la UI salvo
//! `NotPlayable`, que se reporta antes de crear la sesión.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum SessionError {
    #[error("routine {routine_id} produces no steps (not playable)")] NotPlayable { routine_id: String },
}

/// Fallos de efectos laterales (audio / voz). Se capturan en el punto de
/// llamada, se registran y la sesión continúa.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum CueError {
    #[error("audio playback rejected: {0}")] PlaybackRejected(String),
    #[error("speech synthesis not supported")] SpeechUnavailable,
    #[error("speech failed: {0}")] SpeechFailed(String),
}
