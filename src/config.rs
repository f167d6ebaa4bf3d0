/// Placeholder value shipped in sample `.env` files; treated as "no key".
const PLACEHOLDER_API_KEY: &str = "your_openai_api_key";

/// Whether the AI layer takes part in scoring.
///
/// Decided once from configuration and handed to the scoring components,
/// so a failed call never flips the process into rule-only mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiMode {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub openai_timeout_secs: u64,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            openai_model: "gpt-3.5-turbo".to_string(),
            openai_timeout_secs: 30,
            max_upload_bytes: 5 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .map(|key| key.trim().to_string())
                .filter(|key| is_real_api_key(key)),
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|raw| -> anyhow::Result<String> {
                    let parsed = url::Url::parse(&raw)
                        .map_err(|e| anyhow::anyhow!("OPENAI_BASE_URL is not a valid URL: {}", e))?;
                    if parsed.scheme() != "http" && parsed.scheme() != "https" {
                        anyhow::bail!("OPENAI_BASE_URL must start with http:// or https://");
                    }
                    Ok(raw.trim_end_matches('/').to_string())
                })
                .transpose()?
                .unwrap_or(defaults.openai_base_url),
            openai_model: std::env::var("OPENAI_MODEL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.openai_model),
            openai_timeout_secs: std::env::var("OPENAI_TIMEOUT_SECS")
                .ok()
                .map(|raw| -> anyhow::Result<u64> {
                    let secs: u64 = raw
                        .parse()
                        .map_err(|_| anyhow::anyhow!("OPENAI_TIMEOUT_SECS must be a number"))?;
                    if secs == 0 {
                        anyhow::bail!("OPENAI_TIMEOUT_SECS must be greater than zero");
                    }
                    Ok(secs)
                })
                .transpose()?
                .unwrap_or(defaults.openai_timeout_secs),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .ok()
                .map(|raw| {
                    raw.parse::<usize>()
                        .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_BYTES must be a number"))
                })
                .transpose()?
                .unwrap_or(defaults.max_upload_bytes),
        };

        // Never log the key itself
        tracing::debug!("OpenAI Base URL: {}", config.openai_base_url);
        tracing::debug!("OpenAI Model: {}", config.openai_model);
        tracing::debug!("OpenAI Timeout: {}s", config.openai_timeout_secs);
        tracing::debug!("Server Port: {}", config.port);
        if config.ai_mode() == AiMode::Disabled {
            tracing::warn!("OpenAI API key is not configured. AI scoring will be disabled.");
        }

        Ok(config)
    }

    pub fn ai_mode(&self) -> AiMode {
        match self.openai_api_key.as_deref() {
            Some(key) if is_real_api_key(key) => AiMode::Enabled,
            _ => AiMode::Disabled,
        }
    }
}

fn is_real_api_key(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && key != PLACEHOLDER_API_KEY
}
