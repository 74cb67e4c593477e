//! gym-core: motor de sesión de entrenamiento.
//!
//! Aplana una rutina anidada (series → ejercicios → sets) en una lista lineal
//! de pasos y la recorre con una máquina de estados que coordina timers,
//! descansos, auto-avance y avisos de audio/voz.
pub mod constants;
pub mod cue;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod progress;
pub mod step;
pub mod timer;

pub use cue::{AudioOutput, CountdownCue, CuePlayer, SpeechSynthesizer};
pub use engine::{Advance, SessionBuilder, SessionStatus, SessionView, WorkoutSession};
pub use errors::{CueError, SessionError};
pub use event::{InMemorySessionLog, SessionEvent, SessionEventKind, SessionLog};
pub use progress::{compute_progress, Counter, ProgressTable, StepProgress};
pub use step::{generate_steps, ExerciseTarget, RepTarget, RestKind, Step, StepKind, StepPlan};
pub use timer::{MultiTimer, TimerSnapshot, TimerTick};
