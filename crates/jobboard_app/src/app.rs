use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use board_logging::{board_error, board_info, board_warn};
use jobboard_core::{update, AppState, Msg};
use jobboard_engine::{EngineHandle, FileTokenStore, ReqwestJobApi, TokenStore};

use crate::config::AppConfig;
use crate::effects::EffectRunner;
use crate::ui::commands::{parse_command, Command, HELP};
use crate::ui::render::render;

const TICK_INTERVAL: Duration = Duration::from_millis(75);

/// Everything the main loop reacts to.
pub enum LoopEvent {
    Update(Msg),
    Login(String),
    Logout,
    Help,
    Quit,
}

pub fn run(config: &AppConfig, location_query: String) -> anyhow::Result<()> {
    let (loop_tx, loop_rx) = mpsc::channel::<LoopEvent>();

    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(config.token_path.clone()));
    let auth_tx = loop_tx.clone();
    let api = ReqwestJobApi::new(config.client_settings(), tokens.clone())
        .context("failed to build API client")?
        .with_auth_expired_handler(move || {
            board_info!("Redirecting to /login after rejected credentials");
            let _ = auth_tx.send(LoopEvent::Update(Msg::AuthExpired));
        });

    let (engine, engine_events) =
        EngineHandle::spawn(Arc::new(api)).context("failed to start request engine")?;
    let runner = EffectRunner::new(engine, engine_events, loop_tx.clone());

    spawn_input_reader(loop_tx.clone());
    spawn_ticker(loop_tx.clone());

    let _ = loop_tx.send(LoopEvent::Update(Msg::Mounted { location_query }));
    let _ = loop_tx.send(LoopEvent::Update(Msg::FeaturedRequested {
        country: config.country.clone(),
    }));

    let mut state = AppState::with_featured_limit(config.featured_limit);
    print_screen(&render(&state.view()));

    while let Ok(event) = loop_rx.recv() {
        let msg = match event {
            LoopEvent::Update(msg) => msg,
            LoopEvent::Login(token) => match tokens.save(&token) {
                Ok(()) => {
                    board_info!("Stored new bearer token");
                    Msg::SignedIn
                }
                Err(err) => {
                    board_error!("Failed to store token: {}", err);
                    println!("could not store token: {err}");
                    continue;
                }
            },
            LoopEvent::Logout => {
                if let Err(err) = tokens.clear() {
                    board_warn!("Failed to clear token: {}", err);
                }
                println!("signed out");
                continue;
            }
            LoopEvent::Help => {
                println!("{HELP}");
                continue;
            }
            LoopEvent::Quit => break,
        };

        let (next, effects) = update(std::mem::take(&mut state), msg);
        state = next;
        runner.run(effects);
        if state.consume_dirty() {
            print_screen(&render(&state.view()));
        }
    }

    board_info!("Main loop finished");
    Ok(())
}

fn print_screen(text: &str) {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "\n{text}");
    let _ = stdout.flush();
}

fn spawn_input_reader(loop_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let Some(command) = parse_command(&line) else {
                if !line.trim().is_empty() {
                    println!("unknown command, type `help`");
                }
                continue;
            };
            if loop_tx.send(command_event(command)).is_err() {
                return;
            }
        }
        let _ = loop_tx.send(LoopEvent::Quit);
    });
}

fn command_event(command: Command) -> LoopEvent {
    let now = Instant::now();
    let msg = match command {
        Command::Search(raw) => Msg::SearchInput { raw, at: now },
        Command::Tag(tag) => Msg::FilterToggled(tag),
        Command::Clear => Msg::ClearAllClicked,
        Command::More => Msg::LoadMoreClicked,
        Command::Retry => Msg::RetryClicked,
        Command::Job(id) => Msg::JobSelected { id },
        Command::Back => Msg::JobClosed,
        Command::Featured(country) => Msg::FeaturedRequested { country },
        Command::Next => Msg::CarouselNext(now),
        Command::Prev => Msg::CarouselPrev(now),
        Command::Login(token) => return LoopEvent::Login(token),
        Command::Logout => return LoopEvent::Logout,
        Command::Help => return LoopEvent::Help,
        Command::Quit => return LoopEvent::Quit,
    };
    LoopEvent::Update(msg)
}

// Drives the search debounce and the carousel.
fn spawn_ticker(loop_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        while loop_tx
            .send(LoopEvent::Update(Msg::Tick(Instant::now())))
            .is_ok()
        {
            thread::sleep(TICK_INTERVAL);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_map_to_messages() {
        assert!(matches!(
            command_event(Command::Tag("remote".to_string())),
            LoopEvent::Update(Msg::FilterToggled(tag)) if tag == "remote"
        ));
        assert!(matches!(
            command_event(Command::Search("rust".to_string())),
            LoopEvent::Update(Msg::SearchInput { raw, .. }) if raw == "rust"
        ));
        assert!(matches!(command_event(Command::Quit), LoopEvent::Quit));
        assert!(matches!(
            command_event(Command::Login("tok".to_string())),
            LoopEvent::Login(token) if token == "tok"
        ));
    }
}
