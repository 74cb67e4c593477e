//! Cuenta atrás por voz para ejercicios por tiempo.
//!
//! Reglas, dado `remaining = target - elapsed` en segundos enteros:
//! - `remaining <= 0`: nada.
//! - `remaining >= 60`: se anuncia cada minuto exacto (con ticks de un
//!   segundo "a medio segundo de un múltiplo de 60" equivale a divisible).
//! - `remaining < 60`: se anuncian los puntos 45, 30, 15, 10 y 5 cuando
//!   `remaining` coincide exactamente.
use std::collections::HashSet;

/// Puntos de control por debajo del minuto, en orden descendente.
pub const SECOND_CHECKPOINTS: [i64; 5] = [45, 30, 15, 10, 5];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountdownCue {
    Minutes(u32),
    Seconds(u32),
}

impl CountdownCue {
    /// Clave de dedup: segundos restantes que representa el aviso. Minutos y
    /// segundos comparten espacio pero no colisionan (60·m frente a < 60).
    pub fn dedup_key(&self) -> u32 {
        match self {
            CountdownCue::Minutes(m) => m * 60,
            CountdownCue::Seconds(s) => *s,
        }
    }

    pub fn announcement(&self) -> String {
        match self {
            CountdownCue::Minutes(1) => "1 minute".to_string(),
            CountdownCue::Minutes(m) => format!("{m} minutes"),
            CountdownCue::Seconds(s) => format!("{s} seconds"),
        }
    }
}

/// Aviso que corresponde a `remaining` segundos, si alguno.
pub fn select_cue(remaining: i64) -> Option<CountdownCue> {
    if remaining <= 0 {
        return None;
    }
    if remaining >= 60 {
        return (remaining % 60 == 0).then(|| CountdownCue::Minutes((remaining / 60) as u32));
    }
    SECOND_CHECKPOINTS.iter()
                      .find(|cp| **cp == remaining)
                      .map(|cp| CountdownCue::Seconds(*cp as u32))
}

/// Avisos ya emitidos en el paso actual. Se vacía al cambiar de paso.
#[derive(Debug, Default, Clone)]
pub struct AnnouncedCues {
    keys: HashSet<u32>,
}

impl AnnouncedCues {
    /// Marca el aviso como emitido; `false` si ya lo estaba.
    pub fn claim(&mut self, cue: CountdownCue) -> bool {
        self.keys.insert(cue.dedup_key())
    }
}
