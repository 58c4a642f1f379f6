use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use board_logging::board_debug;
use jobboard_core::LoadTicket;

use crate::client::JobApi;
use crate::EngineEvent;

enum EngineCommand {
    FetchPage(LoadTicket),
    FetchDetail { id: String },
    FetchFeatured { country: Option<String>, limit: usize },
}

/// Runs API requests on a background tokio runtime. Commands never block the
/// caller; every completion comes back as one [`EngineEvent`], in whatever
/// order the requests finish.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn spawn(api: Arc<dyn JobApi>) -> io::Result<(Self, mpsc::Receiver<EngineEvent>)> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("jobboard-engine")
            .build()?;

        thread::Builder::new()
            .name("jobboard-engine-commands".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let api = api.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(api.as_ref(), command, event_tx).await;
                    });
                }
                board_debug!("Engine command channel closed");
            })?;

        Ok((Self { cmd_tx }, event_rx))
    }

    pub fn fetch_page(&self, ticket: LoadTicket) {
        let _ = self.cmd_tx.send(EngineCommand::FetchPage(ticket));
    }

    pub fn fetch_detail(&self, id: impl Into<String>) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::FetchDetail { id: id.into() });
    }

    pub fn fetch_featured(&self, country: Option<String>, limit: usize) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::FetchFeatured { country, limit });
    }
}

async fn handle_command(
    api: &dyn JobApi,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::FetchPage(ticket) => {
            let result = api.browse_jobs(&ticket.key, ticket.page).await;
            EngineEvent::PageLoaded { ticket, result }
        }
        EngineCommand::FetchDetail { id } => {
            let result = api.job_by_id(&id).await;
            EngineEvent::DetailLoaded { id, result }
        }
        EngineCommand::FetchFeatured { country, limit } => {
            let result = api.featured_jobs(country.as_deref(), limit).await;
            EngineEvent::FeaturedLoaded { result }
        }
    };
    let _ = event_tx.send(event);
}
