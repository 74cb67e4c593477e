//! Reproducción de una sesión en tiempo real: driver tokio y colaboradores
//! de consola.

pub mod console;
pub mod driver;

pub use console::{console_voices, locale_to_language, render_view, ConsoleAudio, ConsoleSpeech};
pub use driver::{PlayerCommand, SessionDriver, SessionOutcome};
