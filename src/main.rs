use gym_core::SessionBuilder;
use gym_domain::DomainError;
use gymflow::player::{render_view, ConsoleAudio, ConsoleSpeech};
use gymflow::{AppError, PlayerCommand, PlayerConfig, SessionDriver, Workout};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, Sender};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // RUST_LOG=debug para ver transiciones de paso
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("[gymflow] {e}");
            1
        }
    };
    // stdin sigue bloqueado en su hilo; salir sin esperarlo
    std::process::exit(code);
}

async fn run() -> Result<(), AppError> {
    let config = PlayerConfig::from_env()?;
    let Workout { routine, catalog, settings } = config.load()?;

    let session = SessionBuilder::new(&routine).settings(settings)
                                               .audio(ConsoleAudio::default())
                                               .speech(ConsoleSpeech::from_env())
                                               .start()?;
    println!("{}: {} steps", routine.name, session.steps().len());

    let (tx, rx) = mpsc::channel(16);
    spawn_input_task(tx);

    let mut last_step = None;
    let outcome = SessionDriver::new(session, rx).run(|session| {
                                                     let index = session.current_step_index();
                                                     if session.is_active() && last_step != Some(index) {
                                                         last_step = Some(index);
                                                         println!("\n{}", render_view(&session.view(&catalog)));
                                                     }
                                                 })
                                                 .await;

    let summary = serde_json::to_string_pretty(&outcome).map_err(DomainError::from)?;
    println!("\n{summary}");
    Ok(())
}

/// Lee comandos de stdin hasta EOF. Al cerrarse el canal la sesión se
/// abandona.
fn spawn_input_task(tx: Sender<PlayerCommand>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match PlayerCommand::parse(&line) {
                Some(command) => {
                    if tx.send(command).await.is_err() {
                        break;
                    }
                }
                None => eprintln!("unknown command: {}", line.trim()),
            }
        }
    });
}
