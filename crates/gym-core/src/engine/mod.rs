//! Máquina de estados de la sesión de entrenamiento.
//!
//! Provee la sesión (`WorkoutSession`), su builder y la vista derivada que
//! consume la UI.

pub mod builder;
pub mod session;
pub mod view;

pub use builder::SessionBuilder;
pub use session::{Advance, SessionStatus, WorkoutSession};
pub use view::{format_clock, SessionView};
