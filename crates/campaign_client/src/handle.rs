use std::sync::{mpsc, Arc};
use std::thread;

use dash_logging::dash_warn;

use crate::{ApiError, BackendApi, CampaignData, CampaignPayload, MarketData, RequestToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    CheckHealth,
    FetchMarketIntelligence,
    FetchPerformanceAnalytics,
    GenerateCampaign {
        request: RequestToken,
        payload: CampaignPayload,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Health(Result<(), ApiError>),
    Market(Result<MarketData, ApiError>),
    Analytics(Result<(), ApiError>),
    Campaign {
        request: RequestToken,
        result: Result<CampaignData, ApiError>,
    },
}

/// Runs backend calls on a private runtime thread. Commands go in over an
/// mpsc channel; completion events come back out the paired receiver, so
/// the UI loop never blocks on the network.
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
}

impl ClientHandle {
    pub fn new(api: Arc<dyn BackendApi>) -> (Self, mpsc::Receiver<ClientEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ClientCommand>();
        let (event_tx, event_rx) = mpsc::channel::<ClientEvent>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn send(&self, command: ClientCommand) {
        if self.cmd_tx.send(command).is_err() {
            dash_warn!("client worker is gone; dropping command");
        }
    }
}

async fn handle_command(
    api: &dyn BackendApi,
    command: ClientCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    let event = match command {
        ClientCommand::CheckHealth => ClientEvent::Health(api.health().await),
        ClientCommand::FetchMarketIntelligence => {
            ClientEvent::Market(api.market_intelligence().await)
        }
        ClientCommand::FetchPerformanceAnalytics => {
            ClientEvent::Analytics(api.performance_analytics().await)
        }
        ClientCommand::GenerateCampaign { request, payload } => {
            let result = api.generate_campaign(&payload).await;
            ClientEvent::Campaign { request, result }
        }
    };
    let _ = event_tx.send(event);
}
