//! Known LLM providers and their default API base URLs

/// Provider choice offered by the connection form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderTemplate {
    OpenRouter,
    OpenAi,
    Anthropic,
    Google,
    DeepSeek,
    Groq,
    Custom,
}

impl ProviderTemplate {
    /// Get all provider options
    pub fn all() -> &'static [ProviderTemplate] {
        &[
            Self::OpenRouter,
            Self::OpenAi,
            Self::Anthropic,
            Self::Google,
            Self::DeepSeek,
            Self::Groq,
            Self::Custom,
        ]
    }

    /// Value stored in `Connection::provider`
    pub fn key(self) -> &'static str {
        match self {
            Self::OpenRouter => "openrouter",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
            Self::DeepSeek => "deepseek",
            Self::Groq => "groq",
            Self::Custom => "custom",
        }
    }

    /// Default base URL; empty for `custom`
    pub fn base_url(self) -> &'static str {
        match self {
            Self::OpenRouter => "https://openrouter.ai/api/v1",
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Anthropic => "https://api.anthropic.com/v1",
            Self::Google => "https://generativelanguage.googleapis.com",
            Self::DeepSeek => "https://api.deepseek.com",
            Self::Groq => "https://api.groq.com/openai/v1",
            Self::Custom => "",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.key() == key)
    }
}
