//! Workplace side of the relay: the inbound envelope and graph name lookups.

pub mod graph;
pub mod types;

pub use graph::{GraphNameResolver, NameResolver};
pub use types::{
    Author, Change, Community, Entry, InboundEnvelope, NameLookupResult, Value, VERB_ADD,
};
