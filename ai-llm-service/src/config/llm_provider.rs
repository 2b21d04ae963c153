use std::fmt;
use std::str::FromStr;

use crate::error_handler::ConfigError;

/// Backend used for text completion.
///
/// Selected at startup through `LLM_KIND` (`ollama` | `openai`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Local Ollama runtime (`/api/generate`).
    Ollama,
    /// OpenAI or any OpenAI-compatible server (`/v1/chat/completions`).
    OpenAI,
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::Ollama => f.write_str("Ollama"),
            LlmProvider::OpenAI => f.write_str("OpenAI"),
        }
    }
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(LlmProvider::Ollama),
            "openai" | "chatgpt" => Ok(LlmProvider::OpenAI),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds() {
        assert_eq!("Ollama".parse::<LlmProvider>(), Ok(LlmProvider::Ollama));
        assert_eq!(" openai ".parse::<LlmProvider>(), Ok(LlmProvider::OpenAI));
        assert_eq!("chatgpt".parse::<LlmProvider>(), Ok(LlmProvider::OpenAI));
    }

    #[test]
    fn rejects_unknown_kind() {
        assert_eq!(
            "claude".parse::<LlmProvider>(),
            Err(ConfigError::UnsupportedProvider("claude".into()))
        );
    }
}
