pub mod openai;

pub use openai::{ChatCompletionRequest, ChatMessage, ContentPart, ImageUrl, MessageContent, MessageRole};
