//! Workplace group-posts webhook envelope.
//!
//! Nesting, outermost first:
//! - `InboundEnvelope`: one delivery, holding one `Entry` per group
//! - `Entry`: a group plus the changes made in it
//! - `Change` / `Value`: the post itself

use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;

/// Verb the provider sends for newly created posts.
pub const VERB_ADD: &str = "add";

/// Top-level webhook payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundEnvelope {
    pub entry: Vec<Entry>,
    /// Object type tag, `"group"` for group posts
    pub object: String,
}

/// Changes for a single group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Group id
    pub id: String,
    /// Unix epoch seconds
    pub time: i64,
    pub changes: Vec<Change>,
}

impl Entry {
    /// The change the relay reports on. Only the first one is ever used.
    pub fn first_change(&self) -> Option<&Change> {
        self.changes.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub value: Value,
    pub field: String,
}

/// The post carried by a change.
///
/// Optional fields are `Option<Option<_>>`: the outer `None` means the key
/// was absent, `Some(None)` means it was sent as `null`. Both survive a
/// decode/encode pass unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Value {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub created_time: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub community: Option<Option<Community>>,
    pub from: Author,
    /// Post body. Absent or null for attachment-only posts.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub message: Option<Option<String>>,
    pub permalink_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub post_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub target_type: Option<Option<String>>,
    #[serde(
        default,
        rename = "type",
        skip_serializing_if = "Option::is_none",
        with = "double_option"
    )]
    pub content_type: Option<Option<String>>,
    /// `"add"` for new posts, anything else (e.g. `"edit"`) for updates
    pub verb: String,
}

impl Value {
    pub fn is_new_post(&self) -> bool {
        self.verb == VERB_ADD
    }

    /// Post body, if one was sent and is not null.
    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().and_then(|m| m.as_deref())
    }

    pub fn community(&self) -> Option<&Community> {
        self.community.as_ref().and_then(|c| c.as_ref())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_ref().and_then(|t| t.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    pub id: String,
}

/// Post author (`from` on the wire). The name is never trusted; it is looked up again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub name: Option<Option<String>>,
}

/// Response body of a graph `?fields=name` lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameLookupResult {
    pub id: String,
    pub name: String,
}
