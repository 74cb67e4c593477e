//! Constantes del motor de sesión.
//!
//! `ENGINE_VERSION` forma parte del hash del plan de pasos: cambiarla
//! invalida cualquier cache indexada por `plan_hash`.

/// Versión lógica del generador de pasos.
pub const ENGINE_VERSION: &str = "S1.0";

/// Periodo de cada tick de timer (milisegundos).
pub const TICK_MS: u64 = 1_000;

/// Espera entre el disparo del objetivo y el auto-avance. Suficiente para que
/// el sonido empiece a reproducirse, no para que termine.
pub const AUTO_ADVANCE_DELAY_MS: u64 = 500;

/// Timer de la sesión completa (nunca se pausa).
pub const TOTAL_TIMER: &str = "total";
/// Timer del ejercicio actual (sólo corre en pasos por tiempo).
pub const EXERCISE_TIMER: &str = "exercise";
/// Timer del descanso actual.
pub const REST_TIMER: &str = "rest";

/// Título mostrado cuando el catálogo no conoce el ejercicio.
pub const FALLBACK_EXERCISE_TITLE: &str = "Unknown Exercise";
