use indexmap::IndexMap;
use serde::Serialize;

use crate::constants::TICK_MS;

/// Vista pública del estado de un timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub name: String,
    pub elapsed_seconds: u64,
    pub is_running: bool,
}

/// Un incremento aplicado a un timer en un instante del reloj virtual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerTick {
    pub name: String,
    pub at_ms: u64,
    pub elapsed_seconds: u64,
}

/// Intervalo repetitivo instalado para un timer.
#[derive(Debug, Clone, Copy)]
struct Interval {
    id: u64,
    next_due_ms: u64,
}

#[derive(Debug, Clone, Default)]
struct TimerEntry {
    elapsed: u64,
    running: bool,
    interval: Option<Interval>,
}

/// Mapa de timers con dueño único. Todo cambio pasa por esta API.
#[derive(Debug, Default)]
pub struct MultiTimer {
    now_ms: u64,
    timers: IndexMap<String, TimerEntry>,
    next_interval_id: u64,
}

impl MultiTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instante actual del reloj virtual (ms).
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Inicia o reanuda. El timer se crea en `{0, parado}` si no existe; el
    /// intervalo anterior se descarta antes de instalar uno nuevo, así que
    /// llamar dos veces no duplica ticks.
    pub fn start(&mut self, name: &str) {
        let id = self.next_interval_id;
        self.next_interval_id += 1;
        let due = self.now_ms + TICK_MS;
        let entry = self.timers.entry(name.to_string()).or_default();
        if let Some(stale) = entry.interval.take() {
            log::trace!("timer {name}: clearing stale interval {}", stale.id);
        }
        entry.interval = Some(Interval { id, next_due_ms: due });
    }

    /// Detiene el tick conservando el tiempo. No-op si no existe o no corre.
    pub fn pause(&mut self, name: &str) {
        if let Some(entry) = self.timers.get_mut(name) {
            if entry.interval.is_none() && !entry.running {
                return;
            }
            entry.interval = None;
            entry.running = false;
        }
    }

    /// Detiene y vuelve a cero.
    pub fn reset(&mut self, name: &str) {
        let entry = self.timers.entry(name.to_string()).or_default();
        entry.interval = None;
        entry.elapsed = 0;
        entry.running = false;
    }

    /// Detiene y elimina todo el estado del timer.
    pub fn remove(&mut self, name: &str) {
        self.timers.shift_remove(name);
    }

    /// Cancela todos los intervalos (fin de sesión). Los valores se conservan
    /// para poder leerlos después.
    pub fn stop_all(&mut self) {
        for entry in self.timers.values_mut() {
            entry.interval = None;
            entry.running = false;
        }
    }

    pub fn elapsed(&self, name: &str) -> u64 {
        self.timers.get(name).map(|e| e.elapsed).unwrap_or(0)
    }

    pub fn is_running(&self, name: &str) -> bool {
        self.timers.get(name).map(|e| e.running).unwrap_or(false)
    }

    pub fn snapshot(&self, name: &str) -> Option<TimerSnapshot> {
        self.timers.get(name).map(|e| TimerSnapshot { name: name.to_string(),
                                                       elapsed_seconds: e.elapsed,
                                                       is_running: e.running })
    }

    pub fn snapshots(&self) -> Vec<TimerSnapshot> {
        self.timers
            .iter()
            .map(|(name, e)| TimerSnapshot { name: name.clone(),
                                             elapsed_seconds: e.elapsed,
                                             is_running: e.running })
            .collect()
    }

    /// Número de intervalos instalados en este momento.
    pub fn active_intervals(&self) -> usize {
        self.timers.values().filter(|e| e.interval.is_some()).count()
    }

    /// Próximo instante en el que algún timer hará tick.
    pub fn next_due(&self) -> Option<u64> {
        self.timers.values().filter_map(|e| e.interval.map(|i| i.next_due_ms)).min()
    }

    /// Avanza el reloj hasta `now_ms` disparando, en orden temporal, cada tick
    /// vencido. Los ticks simultáneos se aplican en orden de creación del
    /// timer. Un reloj nunca retrocede.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<TimerTick> {
        let mut ticks = Vec::new();
        while let Some(due) = self.next_due().filter(|due| *due <= now_ms) {
            self.now_ms = due;
            for (name, entry) in self.timers.iter_mut() {
                let Some(interval) = entry.interval.as_mut() else { continue };
                if interval.next_due_ms != due {
                    continue;
                }
                interval.next_due_ms += TICK_MS;
                entry.elapsed += 1;
                entry.running = true;
                ticks.push(TimerTick { name: name.clone(),
                                       at_ms: due,
                                       elapsed_seconds: entry.elapsed });
            }
        }
        self.now_ms = self.now_ms.max(now_ms);
        ticks
    }
}
