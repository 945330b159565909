// src/message.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of the POST sent to the answer service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

impl AskRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into() }
    }
}

/// Reply from the answer service. Only `answer` is required; the extras
/// are kept when they are strings and dropped otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
    #[serde(default, deserialize_with = "string_or_none")]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub references: Option<String>,
}

fn string_or_none<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(de)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

impl AnswerResponse {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            query: None,
            references: None,
        }
    }
}
