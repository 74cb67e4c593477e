//! Vista derivada de la sesión para la UI.
//!
//! `SessionView` es una foto: se recalcula entera tras cada cambio de la
//! sesión y no guarda referencias a ella.
use gym_domain::{ExerciseCatalog, Media};
use serde::Serialize;

use crate::constants::{EXERCISE_TIMER, FALLBACK_EXERCISE_TITLE, REST_TIMER, TOTAL_TIMER};
use crate::cue::{AudioOutput, SpeechSynthesizer};
use crate::engine::WorkoutSession;
use crate::event::SessionLog;
use crate::progress::StepProgress;
use crate::step::{RepTarget, Step};

/// Segundos como `m:ss`.
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub step: Step,
    /// 1-based.
    pub step_number: usize,
    pub total_steps: usize,
    pub title: String,
    pub media: Option<Media>,
    pub is_resting: bool,
    pub is_superset: bool,
    pub progress: Option<StepProgress>,
    pub set_label: Option<String>,
    pub remaining_label: String,
    pub action_label: &'static str,
    pub total_clock: String,
    /// Reloj del timer que sigue el paso (descanso o ejercicio).
    pub step_clock: String,
    pub target_clock: Option<String>,
    pub reps_label: Option<String>,
    pub auto_next: bool,
}

impl<O, S, L> WorkoutSession<O, S, L>
    where O: AudioOutput,
          S: SpeechSynthesizer,
          L: SessionLog
{
    /// Título del ejercicio del paso actual, o el de respaldo si el catálogo
    /// no lo conoce.
    pub fn current_title<C: ExerciseCatalog>(&self, catalog: &C) -> String {
        catalog.find_exercise_by_id(&self.current_step().exercise_id)
               .map(|e| e.title.clone())
               .unwrap_or_else(|| FALLBACK_EXERCISE_TITLE.to_string())
    }

    pub fn current_media<C: ExerciseCatalog>(&self, catalog: &C) -> Option<Media> {
        catalog.find_exercise_by_id(&self.current_step().exercise_id)
               .and_then(|e| e.media.first().cloned())
    }

    fn action_label(&self) -> &'static str {
        if self.is_last_step() {
            "Finish Workout"
        } else if self.is_resting() {
            "Skip Rest"
        } else {
            "Next Set"
        }
    }

    pub fn view<C: ExerciseCatalog>(&self, catalog: &C) -> SessionView {
        let step = self.current_step().clone();
        let progress = self.progress();
        let is_resting = step.is_rest();
        let timer = if is_resting { REST_TIMER } else { EXERCISE_TIMER };
        let exercise = step.exercise();

        let reps_label = exercise.and_then(|e| e.target_reps).map(|reps| match reps {
            RepTarget::Count(n) => n.to_string(),
            RepTarget::ToFailure => "Fail".to_string(),
        });

        SessionView { step_number: self.current_step_index() + 1,
                      total_steps: self.steps().len(),
                      title: self.current_title(catalog),
                      media: self.current_media(catalog),
                      is_resting,
                      is_superset: exercise.is_some_and(|e| e.is_superset),
                      set_label: progress.and_then(|p| p.set_label()),
                      progress,
                      remaining_label: format!("{} remaining", self.remaining_exercise_steps()),
                      action_label: self.action_label(),
                      total_clock: format_clock(self.elapsed(TOTAL_TIMER)),
                      step_clock: format_clock(self.elapsed(timer)),
                      target_clock: step.target_duration().map(|secs| format_clock(u64::from(secs))),
                      reps_label,
                      auto_next: self.auto_next(),
                      step }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(75), "1:15");
        assert_eq!(format_clock(600), "10:00");
    }
}
