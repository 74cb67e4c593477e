//! Sesión de entrenamiento: cursor sobre el plan, timers por paso, detección
//! de objetivo, cuenta atrás por voz y auto-avance.
//!
//! Todo ocurre en una única línea temporal: la sesión se alimenta con avances
//! de reloj (`advance_to` / `advance_by`) y comandos discretos (`next`,
//! `previous`, `toggle_auto_next`). Un cambio de paso es una sola operación
//! (`enter_step`): reinicia/arranca los timers y limpia el estado del paso
//! antes de publicar el nuevo índice, por lo que ningún tick puede evaluar el
//! paso nuevo con timers del anterior.
use std::time::Duration;

use gym_domain::Settings;
use serde::Serialize;
use uuid::Uuid;

use crate::constants::{AUTO_ADVANCE_DELAY_MS, EXERCISE_TIMER, REST_TIMER, TOTAL_TIMER};
use crate::cue::{select_cue, select_voice, AnnouncedCues, AudioOutput, CuePlayer, PlaybackHandle, SpeechSynthesizer};
use crate::errors::{CueError, SessionError};
use crate::event::{SessionEvent, SessionEventKind, SessionLog};
use crate::progress::{remaining_exercise_steps, ProgressTable, StepProgress};
use crate::step::{Step, StepPlan};
use crate::timer::{MultiTimer, TimerSnapshot, TimerTick};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionStatus {
    Active,
    /// Se avanzó más allá del último paso.
    Completed,
    /// Se salió antes de terminar.
    Abandoned,
}

/// Resultado de `next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Nuevo paso actual.
    Moved(usize),
    /// Era el último paso: la sesión terminó y el control vuelve al host.
    Completed,
    /// La sesión ya no estaba activa; nada cambió.
    Inactive,
}

#[derive(Debug, Clone, Copy)]
struct PendingAdvance {
    step_index: usize,
    due_ms: u64,
}

/// Estado que vive sólo mientras dura un paso.
#[derive(Debug, Default)]
struct StepState {
    target_fired: bool,
    announced: AnnouncedCues,
}

pub struct WorkoutSession<O, S, L>
    where O: AudioOutput,
          S: SpeechSynthesizer,
          L: SessionLog
{
    session_id: Uuid,
    routine_id: String,
    plan: StepPlan,
    progress: ProgressTable,
    settings: Settings,
    auto_next: bool,
    timers: MultiTimer,
    cues: CuePlayer<O>,
    speech: S,
    log: L,
    current: usize,
    step_state: StepState,
    pending_advance: Option<PendingAdvance>,
    status: SessionStatus,
}

impl<O, S, L> WorkoutSession<O, S, L>
    where O: AudioOutput,
          S: SpeechSynthesizer,
          L: SessionLog
{
    pub(crate) fn start_with(routine_id: String,
                             plan: StepPlan,
                             settings: Settings,
                             audio: O,
                             speech: S,
                             log: L)
                             -> Result<Self, SessionError> {
        if plan.is_empty() {
            log::warn!("routine {routine_id} has no steps; refusing to start a session");
            return Err(SessionError::NotPlayable { routine_id });
        }

        let progress = ProgressTable::build(&plan);
        let mut session = Self { session_id: Uuid::new_v4(),
                                 routine_id,
                                 plan,
                                 progress,
                                 auto_next: settings.auto_next,
                                 settings,
                                 timers: MultiTimer::new(),
                                 cues: CuePlayer::new(audio),
                                 speech,
                                 log,
                                 current: 0,
                                 step_state: StepState::default(),
                                 pending_advance: None,
                                 status: SessionStatus::Active };

        log::info!("session {} started: routine {} ({} steps)",
                   session.session_id,
                   session.routine_id,
                   session.plan.len());
        session.record(SessionEventKind::SessionStarted { routine_id: session.routine_id.clone(),
                                                          plan_hash: session.plan.plan_hash().to_string(),
                                                          step_count: session.plan.len() });
        session.prepare_voice();
        session.timers.start(TOTAL_TIMER);
        session.enter_step(0);
        Ok(session)
    }

    /// Con la cuenta atrás activada, elige la voz una sola vez al arrancar.
    /// Un host sin síntesis queda registrado aquí y la cuenta atrás se omite
    /// en silencio durante el resto de la sesión.
    fn prepare_voice(&mut self) {
        if !self.settings.voice_countdown_enabled {
            return;
        }
        if !self.speech.is_supported() {
            log::warn!("voice countdown enabled but speech synthesis is unavailable; countdown disabled");
            self.record(SessionEventKind::SideEffectFailed { step_index: 0,
                                                             error: CueError::SpeechUnavailable });
            return;
        }

        let voices = self.speech.voices();
        let language = self.speech.language();
        let preferred = self.settings.voice_countdown_voice_uri.as_deref();
        match select_voice(&voices, language.as_deref(), preferred) {
            Some(voice) => {
                log::info!("voice countdown using {} ({})", voice.name, voice.lang);
                self.speech.use_voice(voice);
            }
            None => log::debug!("speech host exposes no voices; using its default"),
        }
    }

    fn record(&mut self, kind: SessionEventKind) {
        let _ = self.log.append_kind(self.session_id, kind);
    }

    /// Cambio de paso atómico: timers y estado por paso quedan listos antes
    /// de publicar el índice.
    fn enter_step(&mut self, index: usize) {
        let Some(step) = self.plan.get(index) else { return };
        let step_type = step.type_name();
        let is_rest = step.is_rest();
        let timed = step.is_timed_exercise();

        self.pending_advance = None;
        self.step_state = StepState::default();

        if is_rest {
            self.timers.pause(EXERCISE_TIMER);
            self.timers.reset(REST_TIMER);
            self.timers.start(REST_TIMER);
        } else {
            self.timers.pause(REST_TIMER);
            self.timers.reset(EXERCISE_TIMER);
            if timed {
                self.timers.start(EXERCISE_TIMER);
            }
        }

        self.current = index;
        log::debug!("session {}: step {index} ({step_type})", self.session_id);
        self.record(SessionEventKind::StepEntered { step_index: index,
                                                    step_type: step_type.to_string() });
    }

    /// Avanza un paso. En el último, termina la sesión.
    pub fn next(&mut self) -> Advance {
        if !self.is_active() {
            return Advance::Inactive;
        }
        let next = self.current + 1;
        if next < self.plan.len() {
            self.enter_step(next);
            Advance::Moved(next)
        } else {
            self.complete();
            Advance::Completed
        }
    }

    /// Retrocede un paso. `false` en el índice 0 o con la sesión terminada.
    pub fn previous(&mut self) -> bool {
        if !self.is_active() || self.current == 0 {
            return false;
        }
        self.enter_step(self.current - 1);
        true
    }

    /// Alterna el auto-avance local (no se persiste). Apagarlo cancela un
    /// auto-avance pendiente.
    pub fn toggle_auto_next(&mut self) -> bool {
        self.auto_next = !self.auto_next;
        if !self.auto_next {
            self.pending_advance = None;
        }
        self.auto_next
    }

    /// Salida anticipada: detiene todos los timers y el audio.
    pub fn finish(&mut self) {
        if !self.is_active() {
            return;
        }
        let total_seconds = self.timers.elapsed(TOTAL_TIMER);
        self.shutdown();
        self.status = SessionStatus::Abandoned;
        log::info!("session {} abandoned at step {}", self.session_id, self.current);
        self.record(SessionEventKind::SessionAbandoned { step_index: self.current,
                                                         total_seconds });
    }

    fn complete(&mut self) {
        let total_seconds = self.timers.elapsed(TOTAL_TIMER);
        self.shutdown();
        self.status = SessionStatus::Completed;
        log::info!("session {} completed in {total_seconds}s", self.session_id);
        self.record(SessionEventKind::SessionCompleted { total_seconds });
    }

    fn shutdown(&mut self) {
        self.pending_advance = None;
        self.timers.stop_all();
        self.cues.stop();
    }

    /// Avanza el reloj de la sesión `delta`.
    pub fn advance_by(&mut self, delta: Duration) {
        let delta_ms = u64::try_from(delta.as_millis()).unwrap_or(u64::MAX);
        self.advance_to(self.now_ms().saturating_add(delta_ms));
    }

    /// Avanza el reloj hasta `target_ms` procesando en orden cada tick y cada
    /// auto-avance vencido.
    pub fn advance_to(&mut self, target_ms: u64) {
        while let Some(due) = self.next_deadline().filter(|due| *due <= target_ms) {
            let ticks = self.timers.advance_to(due);
            self.on_ticks(&ticks);
            if let Some(pending) = self.pending_advance.filter(|p| p.due_ms <= due) {
                self.pending_advance = None;
                self.auto_advance(pending.step_index);
            }
            self.cues.collect_finished();
        }
        self.timers.advance_to(target_ms);
        self.cues.collect_finished();
    }

    fn on_ticks(&mut self, ticks: &[TimerTick]) {
        let Some(timer) = self.plan.get(self.current).and_then(Step::tracking_timer) else {
            return;
        };
        let Some(tick) = ticks.iter().rev().find(|t| t.name == timer) else {
            return;
        };
        let elapsed = tick.elapsed_seconds;
        self.voice_countdown(elapsed);
        self.check_target(elapsed);
    }

    /// Disparo "una vez por paso" al alcanzar la duración objetivo.
    fn check_target(&mut self, elapsed: u64) {
        if self.step_state.target_fired {
            return;
        }
        let Some(target) = self.plan.get(self.current).and_then(Step::target_duration) else {
            return;
        };
        if elapsed < u64::from(target) {
            return;
        }

        self.step_state.target_fired = true;
        let step_index = self.current;
        log::debug!("session {}: step {step_index} reached target {target}s", self.session_id);
        self.record(SessionEventKind::TargetReached { step_index,
                                                      elapsed_seconds: elapsed });

        if self.settings.timer_sound_enabled {
            self.play_timer_sound(step_index);
        }
        if self.auto_next {
            let due_ms = self.timers.now_ms() + AUTO_ADVANCE_DELAY_MS;
            self.pending_advance = Some(PendingAdvance { step_index, due_ms });
            self.record(SessionEventKind::AutoAdvanceScheduled { step_index, due_ms });
        }
    }

    fn play_timer_sound(&mut self, step_index: usize) {
        let sound_id = self.settings.timer_sound_id.clone();
        match self.cues.play_timer_sound(&sound_id, self.settings.custom_timer_sound.as_deref()) {
            Ok(_) => self.record(SessionEventKind::SoundPlayed { step_index, sound_id }),
            Err(error) => {
                log::error!("failed to play timer sound {sound_id}: {error}");
                self.record(SessionEventKind::SideEffectFailed { step_index, error });
            }
        }
    }

    fn voice_countdown(&mut self, elapsed: u64) {
        if !self.settings.voice_countdown_enabled || !self.speech.is_supported() {
            return;
        }
        let Some(target) = self.plan
                               .get(self.current)
                               .filter(|s| s.is_timed_exercise())
                               .and_then(Step::target_duration)
        else {
            return;
        };
        let remaining = i64::from(target) - i64::try_from(elapsed).unwrap_or(i64::MAX);
        let Some(cue) = select_cue(remaining) else { return };
        if !self.step_state.announced.claim(cue) {
            return;
        }

        let step_index = self.current;
        let text = cue.announcement();
        match self.speech.speak(&text) {
            Ok(()) => self.record(SessionEventKind::VoiceCue { step_index, text }),
            Err(error) => {
                log::warn!("voice countdown failed ({text}): {error}");
                self.record(SessionEventKind::SideEffectFailed { step_index, error });
            }
        }
    }

    fn auto_advance(&mut self, step_index: usize) {
        if step_index != self.current {
            return;
        }
        log::debug!("session {}: auto-advancing from step {step_index}", self.session_id);
        let _ = self.next();
    }

    /// Notificación del host: terminó la reproducción de un aviso.
    pub fn on_playback_ended(&mut self, handle: PlaybackHandle) {
        self.cues.on_playback_ended(handle);
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn routine_id(&self) -> &str {
        &self.routine_id
    }

    pub fn plan(&self) -> &StepPlan {
        &self.plan
    }

    pub fn steps(&self) -> &[Step] {
        self.plan.steps()
    }

    pub fn current_step_index(&self) -> usize {
        self.current
    }

    /// El plan nunca está vacío y el cursor siempre está en rango.
    pub fn current_step(&self) -> &Step {
        &self.plan.steps()[self.current]
    }

    pub fn is_resting(&self) -> bool {
        self.current_step().is_rest()
    }

    pub fn is_last_step(&self) -> bool {
        self.current + 1 == self.plan.len()
    }

    pub fn progress(&self) -> Option<StepProgress> {
        self.progress.get(self.current)
    }

    pub fn remaining_exercise_steps(&self) -> usize {
        remaining_exercise_steps(self.plan.steps(), self.current)
    }

    pub fn timer(&self, name: &str) -> Option<TimerSnapshot> {
        self.timers.snapshot(name)
    }

    pub fn timers(&self) -> Vec<TimerSnapshot> {
        self.timers.snapshots()
    }

    pub fn elapsed(&self, name: &str) -> u64 {
        self.timers.elapsed(name)
    }

    pub fn auto_next(&self) -> bool {
        self.auto_next
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    /// Reloj de la sesión (ms desde el inicio).
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Próximo instante en que la sesión tiene algo que hacer.
    pub fn next_deadline(&self) -> Option<u64> {
        if !self.is_active() {
            return None;
        }
        let pending = self.pending_advance.map(|p| p.due_ms);
        match (self.timers.next_due(), pending) {
            (Some(tick), Some(advance)) => Some(tick.min(advance)),
            (tick, advance) => tick.or(advance),
        }
    }

    /// `true` si hay un auto-avance programado.
    pub fn has_pending_advance(&self) -> bool {
        self.pending_advance.is_some()
    }

    pub fn events(&self) -> Vec<SessionEvent> {
        self.log.list(self.session_id)
    }

    pub fn cue_player(&self) -> &CuePlayer<O> {
        &self.cues
    }

    pub fn speech(&self) -> &S {
        &self.speech
    }
}

impl<O, S, L> Drop for WorkoutSession<O, S, L>
    where O: AudioOutput,
          S: SpeechSynthesizer,
          L: SessionLog
{
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SessionBuilder;
    use crate::step::generate_steps;
    use gym_domain::{Routine, RoutineExercise, Series, SeriesType, SetType, TrackingType, WorkoutSet};

    fn timed_routine(target: u32, rest_after_set: u32) -> Routine {
        let set = |id: &str| WorkoutSet { id: id.into(),
                                         set_type: SetType::Working,
                                         weight: None,
                                         reps: None,
                                         time: Some(target),
                                         completed: false };
        Routine { id: "plank".into(),
                  name: "Core".into(),
                  series: vec![Series { id: "s".into(),
                                        series_type: SeriesType::Standard,
                                        exercises: vec![RoutineExercise { id: "re".into(),
                                                                          exercise_id: "plank".into(),
                                                                          tracking_type: TrackingType::Time,
                                                                          sets: vec![set("a"), set("b")],
                                                                          rest_after_set }],
                                        rest_after_serie: 0 }] }
    }

    #[test]
    fn exercise_timer_only_runs_on_timed_steps() {
        let mut session = SessionBuilder::new(&timed_routine(20, 10)).start().unwrap();
        session.advance_by(Duration::from_secs(3));
        assert_eq!(session.elapsed(EXERCISE_TIMER), 3);
        assert_eq!(session.elapsed(TOTAL_TIMER), 3);

        assert_eq!(session.next(), Advance::Moved(1));
        assert!(session.is_resting());
        session.advance_by(Duration::from_secs(2));
        assert_eq!(session.elapsed(REST_TIMER), 2);
        // pausado, conserva el valor
        assert_eq!(session.elapsed(EXERCISE_TIMER), 3);
        assert!(!session.timer(EXERCISE_TIMER).unwrap().is_running);
    }

    #[test]
    fn entering_a_step_resets_its_timer_before_any_tick() {
        let mut session = SessionBuilder::new(&timed_routine(5, 0)).start().unwrap();
        session.advance_by(Duration::from_millis(4_900));
        assert_eq!(session.elapsed(EXERCISE_TIMER), 4);
        session.next();
        assert_eq!(session.elapsed(EXERCISE_TIMER), 0);
        // el primer tick del paso nuevo llega un segundo después de entrar
        session.advance_by(Duration::from_millis(999));
        assert_eq!(session.elapsed(EXERCISE_TIMER), 0);
        assert!(session.events().iter().all(|e| !matches!(e.kind, SessionEventKind::TargetReached { step_index: 1, .. })));
    }

    #[test]
    fn toggling_auto_next_off_cancels_pending_advance() {
        let plan = generate_steps(&timed_routine(2, 0));
        let settings = Settings { auto_next: true, ..Settings::default() };
        let mut session = SessionBuilder::from_plan("plank", plan).settings(settings).start().unwrap();
        session.advance_by(Duration::from_secs(2));
        assert!(session.has_pending_advance());
        assert!(!session.toggle_auto_next());
        session.advance_by(Duration::from_secs(5));
        assert_eq!(session.current_step_index(), 0);
    }

    #[test]
    fn finish_stops_everything() {
        let mut session = SessionBuilder::new(&timed_routine(30, 0)).start().unwrap();
        session.advance_by(Duration::from_secs(4));
        session.finish();
        assert_eq!(session.status(), SessionStatus::Abandoned);
        assert_eq!(session.next_deadline(), None);
        session.advance_by(Duration::from_secs(10));
        assert_eq!(session.elapsed(TOTAL_TIMER), 4);
        assert_eq!(session.next(), Advance::Inactive);
        assert!(!session.previous());
    }
}
