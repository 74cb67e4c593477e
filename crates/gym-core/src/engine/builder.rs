//! Builder para `WorkoutSession`.
//!
//! Los colaboradores (audio, voz, registro de eventos) se fijan por tipo:
//! cada setter consume el builder y devuelve uno parametrizado con el nuevo
//! colaborador. Sin configurar, la sesión es muda y registra en memoria.
//!
//! ```ignore
//! let session = SessionBuilder::new(&routine)
//!     .settings(settings)
//!     .audio(my_output)
//!     .start()?;
//! ```
use gym_domain::{Routine, Settings};

use crate::cue::{AudioOutput, NoAudio, SilentSpeech, SpeechSynthesizer};
use crate::engine::WorkoutSession;
use crate::errors::SessionError;
use crate::event::{InMemorySessionLog, SessionLog};
use crate::step::{generate_steps, StepPlan};

pub struct SessionBuilder<O: AudioOutput, S: SpeechSynthesizer, L: SessionLog> {
    routine_id: String,
    plan: StepPlan,
    settings: Settings,
    audio: O,
    speech: S,
    log: L,
}

impl SessionBuilder<NoAudio, SilentSpeech, InMemorySessionLog> {
    /// Genera el plan de pasos de la rutina.
    pub fn new(routine: &Routine) -> Self {
        Self::from_plan(routine.id.clone(), generate_steps(routine))
    }

    /// Parte de un plan ya generado.
    pub fn from_plan(routine_id: impl Into<String>, plan: StepPlan) -> Self {
        Self { routine_id: routine_id.into(),
               plan,
               settings: Settings::default(),
               audio: NoAudio::default(),
               speech: SilentSpeech,
               log: InMemorySessionLog::default() }
    }
}

impl<O: AudioOutput, S: SpeechSynthesizer, L: SessionLog> SessionBuilder<O, S, L> {
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn audio<O2: AudioOutput>(self, audio: O2) -> SessionBuilder<O2, S, L> {
        SessionBuilder { routine_id: self.routine_id,
                         plan: self.plan,
                         settings: self.settings,
                         audio,
                         speech: self.speech,
                         log: self.log }
    }

    pub fn speech<S2: SpeechSynthesizer>(self, speech: S2) -> SessionBuilder<O, S2, L> {
        SessionBuilder { routine_id: self.routine_id,
                         plan: self.plan,
                         settings: self.settings,
                         audio: self.audio,
                         speech,
                         log: self.log }
    }

    pub fn log<L2: SessionLog>(self, log: L2) -> SessionBuilder<O, S, L2> {
        SessionBuilder { routine_id: self.routine_id,
                         plan: self.plan,
                         settings: self.settings,
                         audio: self.audio,
                         speech: self.speech,
                         log }
    }

    pub fn plan(&self) -> &StepPlan {
        &self.plan
    }

    /// Arranca la sesión en el paso 0. Falla si el plan está vacío.
    pub fn start(self) -> Result<WorkoutSession<O, S, L>, SessionError> {
        WorkoutSession::start_with(self.routine_id, self.plan, self.settings, self.audio, self.speech, self.log)
    }
}
