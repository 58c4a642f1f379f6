use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use board_logging::{board_debug, board_info};
use jobboard_core::{Effect, Msg};
use jobboard_engine::{EngineEvent, EngineHandle};

use crate::app::LoopEvent;

/// Executes core effects against the engine and feeds engine completions back
/// into the main loop as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        events: mpsc::Receiver<EngineEvent>,
        loop_tx: mpsc::Sender<LoopEvent>,
    ) -> Self {
        spawn_event_pump(events, loop_tx);
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage(ticket) => {
                    board_debug!(
                        "FetchPage request={} page={} query={:?}",
                        ticket.request_id,
                        ticket.page,
                        ticket.key
                    );
                    self.engine.fetch_page(ticket);
                }
                Effect::FetchDetail { id } => {
                    board_debug!("FetchDetail id={}", id);
                    self.engine.fetch_detail(id);
                }
                Effect::FetchFeatured { country, limit } => {
                    board_debug!("FetchFeatured country={:?} limit={}", country, limit);
                    self.engine.fetch_featured(country, limit);
                }
                Effect::MirrorLocation { query } => {
                    // The rendered header already shows it.
                    board_info!("Location replaced: /jobs?{}", query);
                }
            }
        }
    }
}

fn spawn_event_pump(events: mpsc::Receiver<EngineEvent>, loop_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        while let Ok(event) = events.recv() {
            let msg = match event {
                EngineEvent::PageLoaded { ticket, result } => Msg::PageLoaded { ticket, result },
                EngineEvent::DetailLoaded { id, result } => Msg::DetailLoaded { id, result },
                EngineEvent::FeaturedLoaded { result } => Msg::FeaturedLoaded {
                    result,
                    at: Instant::now(),
                },
            };
            if loop_tx.send(LoopEvent::Update(msg)).is_err() {
                break;
            }
        }
    });
}
