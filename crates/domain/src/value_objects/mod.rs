//! Value Objects - Immutable, identity-less domain primitives

mod channel_path;
mod condition_category;
mod condition_code;
mod connection_state;
mod peer_id;

pub use channel_path::ChannelPath;
pub use condition_category::{AssetPair, CATEGORY_RULES, CategoryRule, CodeMatch, ConditionCategory};
pub use condition_code::ConditionCode;
pub use connection_state::ConnectionState;
pub use peer_id::PeerId;
