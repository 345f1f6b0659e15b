//! Slack message rendering.
//!
//! Each Workplace entry becomes one Block Kit message with up to three sections:
//!
//! ```text
//! [announcement + permalink]
//! [raw post body]           (omitted when the post has no body)
//! [Posted by: <author>]
//! ```

use serde::{Deserialize, Serialize};

use crate::workplace::Value;

/// Body POSTed to the incoming webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Fallback text shown in notifications
    pub text: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Section(Section),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<TextObject>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    Mrkdwn { text: String },
}

impl TextObject {
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        TextObject::Mrkdwn { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TextObject::Mrkdwn { text } => text,
        }
    }
}

impl Block {
    fn text(text: impl Into<String>) -> Self {
        Block::Section(Section {
            text: Some(TextObject::mrkdwn(text)),
            fields: None,
        })
    }

    fn fields(fields: Vec<TextObject>) -> Self {
        Block::Section(Section {
            text: None,
            fields: Some(fields),
        })
    }

    pub fn section(&self) -> &Section {
        match self {
            Block::Section(section) => section,
        }
    }
}

/// Render the Slack message for a post.
///
/// The caller picks which change to render. The post body is passed through
/// without escaping. Posts without a body (attachment-only, or `null`) get no
/// body section, since Slack rejects a section with empty text.
pub fn format_message(value: &Value, group_name: &str, author_name: &str) -> OutboundMessage {
    let announcement = if value.is_new_post() {
        format!("There is a new post in *{}*!", group_name)
    } else {
        format!("A post in *{}* was edited", group_name)
    };

    let mut blocks = vec![Block::text(format!(
        "{}\n*<{}|Go to post>*",
        announcement, value.permalink_url
    ))];

    if let Some(body) = value.message().filter(|m| !m.trim().is_empty()) {
        blocks.push(Block::text(body));
    }

    blocks.push(Block::fields(vec![TextObject::mrkdwn(format!(
        "*Posted by:* {}",
        author_name
    ))]));

    OutboundMessage {
        text: format!("New post in workplace group '{}'", group_name),
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workplace::Author;
    use serde_json::json;

    fn post(verb: &str, message: Option<&str>) -> Value {
        Value {
            created_time: None,
            community: None,
            from: Author {
                id: "A".to_string(),
                name: Some(Some("Stale".to_string())),
            },
            message: message.map(|m| Some(m.to_string())),
            permalink_url: "https://x/1".to_string(),
            post_id: None,
            target_type: None,
            content_type: None,
            verb: verb.to_string(),
        }
    }

    fn section_text(message: &OutboundMessage, index: usize) -> &str {
        message.blocks[index].section().text.as_ref().unwrap().as_str()
    }

    #[test]
    fn test_format_new_post() {
        let message = format_message(&post("add", Some("hello")), "Group G", "Author A");

        assert_eq!(message.text, "New post in workplace group 'Group G'");
        assert_eq!(message.blocks.len(), 3);
        assert_eq!(
            section_text(&message, 0),
            "There is a new post in *Group G*!\n*<https://x/1|Go to post>*"
        );
        assert_eq!(section_text(&message, 1), "hello");

        let fields = message.blocks[2].section().fields.as_ref().unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].as_str(), "*Posted by:* Author A");
    }

    #[test]
    fn test_format_edited_post() {
        let message = format_message(&post("edit", Some("hello")), "Group G", "Author A");

        assert!(section_text(&message, 0).starts_with("A post in *Group G* was edited"));
        assert_eq!(message.text, "New post in workplace group 'Group G'");
    }

    #[test]
    fn test_message_body_is_not_escaped() {
        let raw = "<b>*bold* & _it_ <https://evil|click>";
        let message = format_message(&post("add", Some(raw)), "G", "A");

        assert_eq!(section_text(&message, 1), raw);
    }

    #[test]
    fn test_post_without_body_has_no_body_section() {
        let mut null_body = post("add", None);
        null_body.message = Some(None);

        for value in [post("add", None), null_body, post("add", Some("")), post("add", Some("  "))] {
            let message = format_message(&value, "Group G", "Author A");

            assert_eq!(message.blocks.len(), 2);
            assert!(message
                .blocks
                .iter()
                .filter_map(|b| b.section().text.as_ref())
                .all(|t| !t.as_str().trim().is_empty()));
            assert_eq!(
                message.blocks[1].section().fields.as_ref().unwrap()[0].as_str(),
                "*Posted by:* Author A"
            );
        }
    }

    #[test]
    fn test_wire_format() {
        let message = format_message(&post("add", Some("hello")), "Group G", "Author A");

        let expected = json!({
            "text": "New post in workplace group 'Group G'",
            "blocks": [
                {
                    "type": "section",
                    "text": {
                        "type": "mrkdwn",
                        "text": "There is a new post in *Group G*!\n*<https://x/1|Go to post>*"
                    }
                },
                {
                    "type": "section",
                    "text": {"type": "mrkdwn", "text": "hello"}
                },
                {
                    "type": "section",
                    "fields": [{"type": "mrkdwn", "text": "*Posted by:* Author A"}]
                }
            ]
        });

        assert_eq!(serde_json::to_value(&message).unwrap(), expected);
    }
}
