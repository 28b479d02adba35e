use serde::{Deserialize, Serialize};

/// Outgoing chat message
///
/// Serializes straight into the chat-completions wire shape,
/// e.g. `{"role":"user","content":"..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    /// User/Human message
    #[serde(rename = "user")]
    Human {
        content: String,
    },
}

impl Message {
    /// Create human message
    pub fn human(content: impl Into<String>) -> Self {
        Self::Human {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::Human { content } => content,
        }
    }

    /// Get role as string
    pub fn role(&self) -> &str {
        match self {
            Self::Human { .. } => "user",
        }
    }
}
