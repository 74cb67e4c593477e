//! Tipos de evento de la sesión y estructura `SessionEvent`.
//!
//! Rol en la sesión:
//! - La máquina de estados emite eventos a un `SessionLog` append-only.
//! - Los eventos dejan trazado qué pasó (pasos visitados, objetivos
//!   alcanzados, avisos, fallos de audio/voz) sin exponer estado mutable.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CueError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEventKind {
    /// Primer evento de una sesión. Fija el plan (hash) y su tamaño.
    SessionStarted { routine_id: String, plan_hash: String, step_count: usize },
    /// La sesión pasó a mostrar el paso `step_index`.
    StepEntered { step_index: usize, step_type: String },
    /// El timer del paso alcanzó su duración objetivo (una vez por paso).
    TargetReached { step_index: usize, elapsed_seconds: u64 },
    /// Se disparó el sonido de fin de timer.
    SoundPlayed { step_index: usize, sound_id: String },
    /// Se anunció un punto de la cuenta atrás.
    VoiceCue { step_index: usize, text: String },
    /// Auto-avance programado para `due_ms` (reloj de la sesión).
    AutoAdvanceScheduled { step_index: usize, due_ms: u64 },
    /// Un efecto lateral falló; la sesión continúa.
    SideEffectFailed { step_index: usize, error: CueError },
    /// Se superó el último paso.
    SessionCompleted { total_seconds: u64 },
    /// El usuario salió antes de terminar.
    SessionAbandoned { step_index: usize, total_seconds: u64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEvent {
    pub seq: u64, // asignado por el log (orden append)
    pub session_id: Uuid,
    pub kind: SessionEventKind,
    pub ts: DateTime<Utc>, // metadato de pared, no participa en la lógica
}
