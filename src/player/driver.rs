//! Driver en tiempo real de una `WorkoutSession`.
//!
//! La sesión sólo conoce su reloj virtual (ms desde el inicio). El driver lo
//! ancla a un `tokio::time::Instant` y duerme hasta el próximo deadline de la
//! sesión o hasta que llegue un comando, lo que ocurra antes.
use std::future;
use std::time::Duration;

use gym_core::constants::TOTAL_TIMER;
use gym_core::{AudioOutput, SessionEvent, SessionEventKind, SessionLog, SessionStatus, SpeechSynthesizer,
               WorkoutSession};
use serde::Serialize;
use tokio::sync::mpsc::Receiver;
use tokio::time::{sleep_until, Instant};
use uuid::Uuid;

/// Comandos del usuario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Next,
    Previous,
    ToggleAutoNext,
    Quit,
}

impl PlayerCommand {
    /// Interpreta una línea de la consola (`n`, `p`, `a`, `q` o la palabra
    /// completa). Una línea vacía equivale a `next`.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "n" | "next" => Some(Self::Next),
            "p" | "prev" | "previous" => Some(Self::Previous),
            "a" | "auto" => Some(Self::ToggleAutoNext),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Cómo terminó la sesión, para quien la lanzó.
#[derive(Debug, Clone, Serialize)]
pub struct SessionOutcome {
    pub session_id: Uuid,
    pub routine_id: String,
    pub status: SessionStatus,
    pub total_seconds: u64,
    pub last_step_index: usize,
    #[serde(skip)]
    pub events: Vec<SessionEvent>,
}

pub struct SessionDriver<O, S, L>
    where O: AudioOutput,
          S: SpeechSynthesizer,
          L: SessionLog
{
    session: WorkoutSession<O, S, L>,
    commands: Receiver<PlayerCommand>,
    origin: Instant,
}

impl<O, S, L> SessionDriver<O, S, L>
    where O: AudioOutput,
          S: SpeechSynthesizer,
          L: SessionLog
{
    /// Ancla el reloj de la sesión al instante actual.
    pub fn new(session: WorkoutSession<O, S, L>, commands: Receiver<PlayerCommand>) -> Self {
        let origin = Instant::now() - Duration::from_millis(session.now_ms());
        Self { session, commands, origin }
    }

    pub fn session(&self) -> &WorkoutSession<O, S, L> {
        &self.session
    }

    fn session_clock(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn apply(&mut self, command: PlayerCommand) {
        log::debug!("command {command:?} at step {}", self.session.current_step_index());
        match command {
            PlayerCommand::Next => {
                let _ = self.session.next();
            }
            PlayerCommand::Previous => {
                let _ = self.session.previous();
            }
            PlayerCommand::ToggleAutoNext => {
                let enabled = self.session.toggle_auto_next();
                log::info!("auto-next {}", if enabled { "on" } else { "off" });
            }
            PlayerCommand::Quit => self.session.finish(),
        }
    }

    /// Corre la sesión hasta que termina. `render` se invoca al arrancar y
    /// tras cada cambio (tick, auto-avance o comando). Si el canal de
    /// comandos se cierra, la sesión se abandona.
    pub async fn run<F>(mut self, mut render: F) -> SessionOutcome
        where F: FnMut(&WorkoutSession<O, S, L>)
    {
        render(&self.session);

        while self.session.is_active() {
            let deadline = self.session
                               .next_deadline()
                               .map(|ms| self.origin + Duration::from_millis(ms));

            tokio::select! {
                maybe_command = self.commands.recv() => {
                    // el comando se aplica sobre el estado "ahora"
                    let now = self.session_clock();
                    self.session.advance_to(now);
                    match maybe_command {
                        Some(command) => self.apply(command),
                        None => {
                            log::warn!("command channel closed; abandoning session");
                            self.session.finish();
                        }
                    }
                }
                _ = sleep_until_deadline(deadline) => {
                    let now = self.session_clock();
                    self.session.advance_to(now);
                }
            }
            render(&self.session);
        }

        self.outcome()
    }

    fn outcome(&self) -> SessionOutcome {
        let events = self.session.events();
        let total_seconds = events.iter()
                                  .rev()
                                  .find_map(|e| match &e.kind {
                                      SessionEventKind::SessionCompleted { total_seconds }
                                      | SessionEventKind::SessionAbandoned { total_seconds, .. } => {
                                          Some(*total_seconds)
                                      }
                                      _ => None,
                                  })
                                  .unwrap_or_else(|| self.session.elapsed(TOTAL_TIMER));
        SessionOutcome { session_id: self.session.session_id(),
                         routine_id: self.session.routine_id().to_string(),
                         status: self.session.status(),
                         total_seconds,
                         last_step_index: self.session.current_step_index(),
                         events }
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => future::pending().await,
    }
}
