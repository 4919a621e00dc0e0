//! The notification configuration reconciliation core.
//!
//! `models` holds the document shapes, `codec` the URI round trip, `validate`
//! the pre-save checks, `sync` the rule/destination reconciliation,
//! `default_rule` the reserved fallback rule's state machine, and `session`
//! the load/save assembly over a [`crate::store::ConfigStore`].

pub mod codec;
pub mod default_rule;
pub mod models;
pub mod session;
pub mod sync;
pub mod validate;

pub use default_rule::DefaultRule;
pub use models::{
    ChannelConfig, ChannelType, Destination, Document, RawDestination, RawDocument, Rule,
};
pub use session::{decode_document, encode_document, load, save, ConfigError};
pub use validate::ValidationErrors;
