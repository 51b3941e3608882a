//! Loopback simulation of one data node and several display nodes
//!
//! The data node reads the configured weather store and answers update
//! requests; each display node asks for an update when it connects and
//! applies whatever summary arrives.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use application::{
    DisplayStore, SendReport, SenderConfig, SyncReceiver, SyncSender, SyncTrigger, TransportPort,
    UpdateListener, UpdateRequester, WeatherStorePort,
};
use domain::{DisplayState, FaceEvent, PeerId};
use infrastructure::{LoopbackHub, TracingPresentation};
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info};

/// Extra time display nodes get beyond the readiness budget
const SETTLE_MARGIN: Duration = Duration::from_secs(1);

/// Simulation parameters
#[derive(Debug, Clone)]
pub struct SimulationOptions {
    /// Number of display nodes
    pub watches: usize,
    /// Indices of display nodes that cannot be reached
    pub unreachable: Vec<usize>,
    /// Keep the data node from ever connecting
    pub never_connect: bool,
    /// Display faces run in ambient mode
    pub ambient: bool,
}

impl SimulationOptions {
    fn face_events(&self) -> [FaceEvent; 2] {
        [
            FaceEvent::VisibilityChanged { visible: true },
            FaceEvent::AmbientChanged {
                ambient: self.ambient,
            },
        ]
    }
}

/// Final state of one display node
#[derive(Debug)]
pub struct DisplayReport {
    /// Display node id
    pub id: PeerId,
    /// Last applied display state
    pub state: Arc<DisplayState>,
    /// Asset the face draws for that state
    pub drawn: &'static str,
}

/// What the simulation observed
#[derive(Debug)]
pub struct SimulationOutcome {
    /// Report of the explicit data-changed run, if it sent anything
    pub report: Option<SendReport>,
    /// Final state of each display node, in node order
    pub displays: Vec<DisplayReport>,
}

/// Run the simulation to completion
pub async fn run(
    store: Arc<dyn WeatherStorePort>,
    sender_config: SenderConfig,
    options: &SimulationOptions,
) -> Result<SimulationOutcome> {
    let hub = LoopbackHub::new();
    let channel = sender_config.channel.clone();
    let readiness = sender_config.readiness;

    let phone_id = PeerId::new("phone")?;
    let (phone, phone_inbox) = hub.join(phone_id.clone())?;
    let phone: Arc<dyn TransportPort> = Arc::new(phone);
    let sender = SyncSender::new(store, Arc::clone(&phone), sender_config);
    UpdateListener::new(sender.clone()).spawn(phone_inbox);

    if options.never_connect {
        hub.block_connection(&phone_id, true);
    }
    phone.connect().await?;

    let mut displays = Vec::with_capacity(options.watches);
    for index in 0..options.watches {
        let id = PeerId::new(format!("watch-{index}"))?;
        let (transport, inbox) = hub.join(id.clone())?;
        let transport: Arc<dyn TransportPort> = Arc::new(transport);

        let presentation =
            TracingPresentation::for_node(id.as_str()).with_events(options.face_events());
        let receiver = SyncReceiver::new(
            channel.clone(),
            DisplayStore::new(),
            Arc::new(presentation.clone()),
        );
        let store = receiver.store().clone();
        receiver.spawn(inbox);

        UpdateRequester::new(Arc::clone(&transport), channel.clone(), readiness).spawn_on_connect();

        if options.unreachable.contains(&index) {
            hub.set_unreachable(&id, true);
        }
        transport.connect().await?;
        displays.push((id, store, presentation));
    }

    info!(
        watches = options.watches,
        connected = hub.connected_nodes().len(),
        "Loopback nodes started"
    );

    let report = sender
        .trigger(SyncTrigger::DataChanged)
        .await
        .context("sync run panicked")?;

    let deadline = Instant::now() + readiness.budget() + SETTLE_MARGIN;
    for (id, store, _) in &displays {
        let mut versions = store.subscribe();
        if timeout_at(deadline, versions.wait_for(|v| *v > 0))
            .await
            .is_err()
        {
            debug!(node = %id, "No summary applied before deadline");
        }
    }

    Ok(SimulationOutcome {
        report,
        displays: displays
            .into_iter()
            .map(|(id, store, presentation)| {
                let state = store.current();
                let drawn = presentation.drawn_asset(&state);
                DisplayReport { id, state, drawn }
            })
            .collect(),
    })
}
