//! Servicio de timers múltiples.
//!
//! Cronómetros independientes identificados por nombre, que avanzan un
//! segundo por tick. No usan timers de plataforma: un reloj virtual explícito
//! (`advance_to`) dispara los intervalos pendientes, lo que permite conducir
//! la sesión de forma determinista en tests y mapear el reloj a tiempo real
//! desde fuera.

mod multi;

pub use multi::{MultiTimer, TimerSnapshot, TimerTick};
