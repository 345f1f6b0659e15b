//! Callback payload processing.
//!
//! ## Processing Flow
//!
//! ```text
//! raw body → decode_envelope() → for each entry:
//!     resolve group + author names → format_message() → forward
//! ```
//!
//! Entries are relayed one at a time, in payload order. The first failure
//! stops the loop; entries already forwarded stay forwarded.

pub mod decoder;

use futures::future::try_join;
use tracing::info;

use crate::error::RelayError;
use crate::slack::{format_message, Forwarder};
use crate::workplace::{Entry, InboundEnvelope, NameResolver};

pub use decoder::{decode_envelope, ensure_body_present};

/// Relay every entry of an envelope. Returns the number of messages forwarded.
pub async fn relay_envelope(
    envelope: &InboundEnvelope,
    resolver: &dyn NameResolver,
    forwarder: &dyn Forwarder,
) -> Result<usize, RelayError> {
    info!(
        object = %envelope.object,
        entry_count = envelope.entry.len(),
        "envelope_relay_start"
    );

    for (index, entry) in envelope.entry.iter().enumerate() {
        relay_entry(entry, resolver, forwarder).await?;
        info!(entry_index = index, group_id = %entry.id, "entry_relayed");
    }

    info!(forwarded = envelope.entry.len(), "envelope_relay_complete");

    Ok(envelope.entry.len())
}

/// Resolve names for one entry, render it and forward it.
///
/// The group and author lookups are independent and run concurrently.
pub async fn relay_entry(
    entry: &Entry,
    resolver: &dyn NameResolver,
    forwarder: &dyn Forwarder,
) -> Result<(), RelayError> {
    let change = entry.first_change().ok_or_else(|| {
        RelayError::MalformedPayload(format!("entry {} has no changes", entry.id))
    })?;

    if entry.changes.len() > 1 {
        info!(
            group_id = %entry.id,
            ignored_changes = entry.changes.len() - 1,
            "entry_extra_changes_ignored"
        );
    }

    let (group_name, author_name) = try_join(
        resolver.resolve_name(&entry.id),
        resolver.resolve_name(&change.value.from.id),
    )
    .await?;

    let message = format_message(&change.value, &group_name, &author_name);

    forwarder.forward(&message).await
}
