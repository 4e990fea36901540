//! Capability tag shared by the registry, selector, probes, and routes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A family of upstream operations that share a probe strategy and a
/// candidate pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Chat,
    Vision,
    ImageGeneration,
    ImageEdit,
    Audio,
}

impl Capability {
    /// All capabilities, in a stable order (used by summary/scheduler sweeps).
    pub const ALL: [Capability; 5] = [
        Capability::Chat,
        Capability::Vision,
        Capability::ImageGeneration,
        Capability::ImageEdit,
        Capability::Audio,
    ];

    /// Stable lowercase identifier, e.g. for config keys and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Chat => "chat",
            Capability::Vision => "vision",
            Capability::ImageGeneration => "image_generation",
            Capability::ImageEdit => "image_edit",
            Capability::Audio => "audio",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_contains_every_variant() {
        assert_eq!(Capability::ALL.len(), 5);
        assert!(Capability::ALL.contains(&Capability::Audio));
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Capability::Chat.to_string(), "chat");
        assert_eq!(Capability::ImageGeneration.as_str(), "image_generation");
    }
}
