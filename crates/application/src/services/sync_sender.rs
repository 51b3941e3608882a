//! Sync sender - Pushes today's weather summary to every connected peer
//!
//! A run waits for the transport, reads today's record, rounds it into a
//! summary, encodes it once and fans the same bytes out to each peer in a
//! snapshot of the connected set. Runs are fire-and-forget for whoever
//! triggers them: [`SyncSender::trigger`] spawns the run and returns at
//! once, and every failure is logged where it is detected.
//!
//! Runs may overlap. Two triggers in quick succession produce two
//! independent runs, each reading the store and sending on its own.

use std::fmt;
use std::sync::Arc;

use domain::{ChannelPath, PeerId, WeatherSummary, encode};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use super::fan_out::{PeerOutcome, fan_out};
use super::readiness::{ReadinessPolicy, wait_until_ready};
use crate::error::ApplicationError;
use crate::ports::{TransportPort, WeatherStorePort};

/// Sender settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderConfig {
    /// Location whose forecast is sent
    pub location: String,
    /// Channel path summaries are sent on
    pub channel: ChannelPath,
    /// Transport readiness gate
    pub readiness: ReadinessPolicy,
}

impl SenderConfig {
    /// Create settings for a location with the default channel and gate
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            channel: ChannelPath::default(),
            readiness: ReadinessPolicy::default(),
        }
    }

    /// Use a different channel path
    #[must_use]
    pub fn with_channel(mut self, channel: ChannelPath) -> Self {
        self.channel = channel;
        self
    }

    /// Use a different readiness gate
    #[must_use]
    pub const fn with_readiness(mut self, readiness: ReadinessPolicy) -> Self {
        self.readiness = readiness;
        self
    }
}

/// What caused a sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncTrigger {
    /// The local weather store changed
    DataChanged,
    /// A peer joined the transport session
    PeerConnected,
    /// A peer asked for a fresh summary
    UpdateRequested {
        /// Peer that asked
        from: PeerId,
    },
}

impl fmt::Display for SyncTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataChanged => write!(f, "data_changed"),
            Self::PeerConnected => write!(f, "peer_connected"),
            Self::UpdateRequested { from } => write!(f, "update_requested({from})"),
        }
    }
}

/// Outcome of one completed sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReport {
    /// Summary that was sent
    pub summary: WeatherSummary,
    /// Encoded payload, identical for every peer
    pub payload: Vec<u8>,
    /// One outcome per peer in the snapshot, in snapshot order
    pub outcomes: Vec<PeerOutcome>,
}

impl SendReport {
    /// Number of peers the payload reached
    #[must_use]
    pub fn delivered_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status.is_delivered())
            .count()
    }

    /// Number of peers the payload did not reach
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.delivered_count()
    }
}

/// Sync sender running on a data node
#[derive(Clone)]
pub struct SyncSender {
    store: Arc<dyn WeatherStorePort>,
    transport: Arc<dyn TransportPort>,
    config: Arc<SenderConfig>,
}

impl fmt::Debug for SyncSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncSender")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SyncSender {
    /// Create a new sender
    pub fn new(
        store: Arc<dyn WeatherStorePort>,
        transport: Arc<dyn TransportPort>,
        config: SenderConfig,
    ) -> Self {
        Self {
            store,
            transport,
            config: Arc::new(config),
        }
    }

    /// Sender settings
    #[must_use]
    pub fn config(&self) -> &SenderConfig {
        &self.config
    }

    /// Start a sync run in the background
    ///
    /// Never blocks and never fails. The handle resolves to the report, or
    /// `None` when the run ended without sending.
    pub fn trigger(&self, trigger: SyncTrigger) -> JoinHandle<Option<SendReport>> {
        let sender = self.clone();
        tokio::spawn(async move {
            match sender.run(trigger).await {
                Ok(report) => Some(report),
                Err(e) if e.is_expected() => {
                    debug!(error = %e, "Sync run ended without sending");
                    None
                },
                Err(e) => {
                    error!(error = %e, "Sync run failed");
                    None
                },
            }
        })
    }

    /// Perform one sync run and wait for every peer's outcome
    #[instrument(
        skip(self, trigger),
        fields(
            run_id = %Uuid::now_v7(),
            trigger = %trigger,
            location = %self.config.location
        )
    )]
    pub async fn run(&self, trigger: SyncTrigger) -> Result<SendReport, ApplicationError> {
        if let Err(e) = wait_until_ready(self.transport.as_ref(), &self.config.readiness).await {
            warn!(
                budget_ms = u64::try_from(self.config.readiness.budget().as_millis())
                    .unwrap_or(u64::MAX),
                "Transport not connected, nothing sent"
            );
            return Err(e);
        }

        let Some(record) = self.store.today(&self.config.location).await? else {
            info!("No weather data for today, nothing sent");
            return Err(ApplicationError::NoDataAvailable {
                location: self.config.location.clone(),
            });
        };

        let summary = WeatherSummary::from_record(&record)?;
        let payload = encode(&summary);
        let peers = self.transport.connected_peers().await?;

        debug!(
            peers = peers.len(),
            condition = %summary.condition_code,
            high = summary.high,
            low = summary.low,
            "Sending weather summary"
        );

        let outcomes = fan_out(
            self.transport.as_ref(),
            &peers,
            &self.config.channel,
            &payload,
        )
        .await;

        let report = SendReport {
            summary,
            payload,
            outcomes,
        };

        info!(
            delivered = report.delivered_count(),
            failed = report.failed_count(),
            "Sync run finished"
        );

        Ok(report)
    }
}
