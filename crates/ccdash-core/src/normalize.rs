//! Normalization of raw transcript records into [`Conversation`]s.
//!
//! Transcript lines come in several shapes. Each parsed line is first
//! classified into a [`MessageBody`] and only then flattened to text, so the
//! precedence between the shapes lives in one `match`.

use ccdash_types::{Conversation, ConversationKind, Message, ToolUsage};
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Body used when a record carries no recognizable message text.
pub const NO_CONTENT: &str = "No content available";

/// Where a record keeps its message text, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageBody<'a> {
    /// `"message": "hello"`
    PlainString(&'a str),
    /// `"message": {"content": ...}`
    ContentObject(&'a Value),
    /// `"message": {"text": ...}` without `content`
    TextObject(&'a Value),
    /// `"message"` is an object (or array) with neither field; holds the whole message.
    OtherObject(&'a Value),
    /// Top-level `"content"`.
    TopLevelContent(&'a Value),
    /// Top-level `"text"`.
    TopLevelText(&'a Value),
    Missing,
}

impl<'a> MessageBody<'a> {
    pub fn classify(record: &'a Value) -> Self {
        match record.get("message") {
            Some(Value::String(s)) => return Self::PlainString(s),
            Some(message @ Value::Object(fields)) => {
                if let Some(content) = truthy(fields.get("content")) {
                    return Self::ContentObject(content);
                }
                if let Some(text) = truthy(fields.get("text")) {
                    return Self::TextObject(text);
                }
                return Self::OtherObject(message);
            }
            Some(message @ Value::Array(_)) => return Self::OtherObject(message),
            _ => {}
        }

        if let Some(content) = truthy(record.get("content")) {
            Self::TopLevelContent(content)
        } else if let Some(text) = truthy(record.get("text")) {
            Self::TopLevelText(text)
        } else {
            Self::Missing
        }
    }

    /// Flatten the body to display text.
    pub fn into_text(self) -> String {
        match self {
            Self::PlainString(s) => s.to_string(),
            Self::ContentObject(value)
            | Self::TextObject(value)
            | Self::TopLevelContent(value)
            | Self::TopLevelText(value) => collapse_to_text(value),
            Self::OtherObject(message) => message.to_string(),
            Self::Missing => NO_CONTENT.to_string(),
        }
    }
}

/// Null, false, zero and the empty string count as absent.
fn truthy(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// Strings pass through; content block arrays keep only their text blocks.
fn collapse_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(blocks) => {
            let text_parts: Vec<&str> = blocks
                .iter()
                .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
                .filter_map(|block| block.get("text").and_then(Value::as_str))
                .collect();
            if text_parts.is_empty() {
                value.to_string()
            } else {
                text_parts.join("\n")
            }
        }
        other => other.to_string(),
    }
}

/// Parse an RFC 3339 string or an epoch-milliseconds number.
pub fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            Utc.timestamp_millis_opt(millis).single()
        }
        _ => None,
    }
}

fn id_from(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Record type mapped to a kind. Absent means `user`; unknown types such as
/// `summary` are treated as `system`.
fn kind_of(record: &Value) -> ConversationKind {
    match record.get("type").and_then(Value::as_str) {
        None => ConversationKind::User,
        Some(kind) => ConversationKind::from_known(kind).unwrap_or(ConversationKind::System),
    }
}

#[derive(Debug, Deserialize)]
struct ToolRecord {
    name: String,
    #[serde(default)]
    parameters: Map<String, Value>,
    #[serde(default)]
    result: Value,
    #[serde(default)]
    timestamp: Option<Value>,
}

fn tool_usages(record: &Value, timestamp: DateTime<Utc>) -> Option<Vec<ToolUsage>> {
    if let Some(Value::Array(tools)) = record.get("tools") {
        let usages = tools
            .iter()
            .filter_map(|tool| serde_json::from_value::<ToolRecord>(tool.clone()).ok())
            .map(|tool| ToolUsage {
                name: tool.name,
                parameters: tool.parameters,
                result: tool.result,
                timestamp: parse_timestamp(tool.timestamp.as_ref()).unwrap_or(timestamp),
            })
            .collect();
        return Some(usages);
    }

    let blocks = record
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(Value::as_array)?;

    let usages: Vec<ToolUsage> = blocks
        .iter()
        .filter(|block| block.get("type").and_then(Value::as_str) == Some("tool_use"))
        .filter_map(|block| {
            let name = block.get("name")?.as_str()?.to_string();
            let parameters = block
                .get("input")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();
            Some(ToolUsage {
                name,
                parameters,
                result: Value::Null,
                timestamp,
            })
        })
        .collect();

    (!usages.is_empty()).then_some(usages)
}

/// Build a conversation entry from one parsed transcript line.
///
/// `now` stands in for a missing or unparseable timestamp. A record without
/// `id` or `uuid` gets a fresh random id, flagged with `id_synthesized`.
pub fn normalize_record(record: &Value, session_id: &str, now: DateTime<Utc>) -> Conversation {
    let content = MessageBody::classify(record).into_text();
    let kind = kind_of(record);
    let role = record
        .get("message")
        .and_then(|m| m.get("role"))
        .and_then(Value::as_str)
        .and_then(ConversationKind::from_known)
        .unwrap_or(kind);
    let timestamp = parse_timestamp(record.get("timestamp")).unwrap_or(now);

    let (id, id_synthesized) = match id_from(record.get("id")).or_else(|| id_from(record.get("uuid"))) {
        Some(id) => (id, false),
        None => (Uuid::new_v4().to_string(), true),
    };

    Conversation {
        id,
        id_synthesized,
        parent_uuid: record
            .get("parentUuid")
            .and_then(Value::as_str)
            .map(str::to_string),
        session_id: session_id.to_string(),
        kind,
        message: Message { role, content },
        timestamp,
        tools: tool_usages(record, timestamp),
    }
}
