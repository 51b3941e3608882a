//! Application services
//!
//! - `sync_sender`: pushes today's summary to every connected peer
//! - `sync_receiver`: applies inbound summaries to the display state
//! - `display_store`: atomically swapped current display state
//! - `update_request`: display-initiated refresh and the data-node listener
//! - `readiness`: bounded wait for the transport session
//! - `fan_out`: independent per-peer delivery

mod display_store;
mod fan_out;
mod readiness;
mod sync_receiver;
mod sync_sender;
mod update_request;

pub use display_store::DisplayStore;
pub use fan_out::{DeliveryStatus, PeerOutcome, fan_out};
pub use readiness::{ReadinessPolicy, wait_until_ready};
pub use sync_receiver::{ReceiveOutcome, SyncReceiver};
pub use sync_sender::{SendReport, SenderConfig, SyncSender, SyncTrigger};
pub use update_request::{UpdateListener, UpdateRequester};
