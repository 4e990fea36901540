//! OpenAI-compatible request/response fragments shared by the chat and
//! vision routes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Tool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: MessageContent,
}

/// Inbound request body for `/v1/chat/completions` and `/v1/vision/completions`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model hint from the caller; the router picks the actual candidate,
    /// but this is kept for request-logging and to allow callers to keep
    /// sending it unchanged from an OpenAI-shaped client.
    #[serde(default)]
    pub model: Option<String>,
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_content_deserializes_as_plain_string() {
        let json = r#"{"role":"user","content":"hello"}"#;
        let message: ChatMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(message.content, MessageContent::Text(ref s) if s == "hello"));
    }

    #[test]
    fn parts_content_deserializes_image_and_text() {
        let json = r#"{
            "role":"user",
            "content":[
                {"type":"text","text":"hi"},
                {"type":"image_url","image_url":{"url":"data:image/png;base64,AA=="}}
            ]
        }"#;
        let message: ChatMessage = serde_json::from_str(json).unwrap();
        match message.content {
            MessageContent::Parts(parts) => assert_eq!(parts.len(), 2),
            _ => panic!("expected parts content"),
        }
    }
}
