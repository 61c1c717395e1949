//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tally_corrector::CorrectorConfig;
use tally_extractor::ExtractorConfig;

/// Environment variable overriding the OpenRouter API URL.
pub const ENV_API_URL: &str = "OPENROUTER_API_URL";

/// Environment variable overriding the OpenRouter model.
pub const ENV_MODEL: &str = "OPENROUTER_MODEL";

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// LLM provider settings
    #[serde(default)]
    pub provider: ProviderSettings,

    /// Windowing and parsing settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Correction loop settings
    #[serde(default)]
    pub corrector: CorrectorConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Which backend serves model calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenRouter chat completions
    OpenRouter,
    /// Local Ollama server
    Ollama,
}

/// Provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Backend kind
    #[serde(default = "default_kind")]
    pub kind: ProviderKind,

    /// Endpoint URL; the backend default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Model name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Request timeout; the backend default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Retries after a transient failure
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Correction history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        Ok(tally_dir()?.join("config.toml"))
    }

    /// Load configuration from `path`, or the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        let config = Self::from_toml(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML.
    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize configuration to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Merge command-line and environment overrides into the provider settings.
    ///
    /// Order: `kind` flag, then environment (for the resulting kind), then
    /// the `model` and `endpoint` flags. Switching kind discards the file's
    /// endpoint and model, which belong to the other backend.
    pub fn apply_overrides<F>(
        &mut self,
        kind: Option<ProviderKind>,
        model: Option<String>,
        endpoint: Option<String>,
        lookup: F,
    ) where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(kind) = kind {
            if kind != self.provider.kind {
                self.provider.endpoint = None;
                self.provider.model = None;
            }
            self.provider.kind = kind;
        }

        self.provider.apply_env(lookup);

        if let Some(model) = model {
            self.provider.model = Some(model);
        }
        if let Some(endpoint) = endpoint {
            self.provider.endpoint = Some(endpoint);
        }
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        self.extractor
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;

        if self.corrector.sentinel.trim().is_empty() {
            return Err(CliError::Config("corrector.sentinel must not be blank".into()));
        }
        Ok(())
    }
}

impl ProviderSettings {
    /// Apply OpenRouter environment overrides.
    ///
    /// Only applies when the provider is OpenRouter; `lookup` is usually
    /// `std::env::var(..).ok()`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.kind != ProviderKind::OpenRouter {
            return;
        }
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.endpoint = Some(url);
        }
        if let Some(model) = lookup(ENV_MODEL).filter(|v| !v.is_empty()) {
            self.model = Some(model);
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            endpoint: None,
            model: None,
            api_key_env: default_api_key_env(),
            timeout_secs: None,
            max_retries: default_max_retries(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: default_history_size(),
        }
    }
}

/// The `~/.tally` directory.
pub fn tally_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    Ok(home.join(".tally"))
}

fn default_kind() -> ProviderKind {
    ProviderKind::OpenRouter
}

fn default_api_key_env() -> String {
    "OPENROUTER_API_KEY".to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider.kind, ProviderKind::OpenRouter);
        assert_eq!(config.provider.api_key_env, "OPENROUTER_API_KEY");
        assert_eq!(config.extractor.chunk_size, 1000);
        assert_eq!(config.corrector.sentinel, "ok");
        assert!(config.settings.color);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = Config::from_toml(
            r#"
            [provider]
            kind = "ollama"
            model = "llama3"

            [extractor]
            chunk_size = 500
            "#,
        )
        .unwrap();

        assert_eq!(config.provider.kind, ProviderKind::Ollama);
        assert_eq!(config.provider.model.as_deref(), Some("llama3"));
        assert_eq!(config.provider.max_retries, 3);
        assert_eq!(config.extractor.chunk_size, 500);
        assert_eq!(config.extractor.chunk_overlap, 100);
        assert_eq!(config.settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.provider.timeout_secs = Some(30);
        config.corrector.max_edits = Some(5);

        let parsed = Config::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("none.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_rejects_invalid_windowing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[extractor]\nchunk_size = 50\nchunk_overlap = 50\n").unwrap();

        assert!(matches!(Config::load(Some(&path)), Err(CliError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.settings.color = false;

        fs::write(&path, config.to_toml().unwrap()).unwrap();
        assert_eq!(Config::load(Some(&path)).unwrap(), config);
    }

    #[test]
    fn test_env_overrides_openrouter() {
        let mut provider = ProviderSettings::default();
        provider.apply_env(|key| match key {
            ENV_API_URL => Some("http://proxy.local/v1/chat/completions".to_string()),
            ENV_MODEL => Some("openai/gpt-4o-mini".to_string()),
            _ => None,
        });

        assert_eq!(
            provider.endpoint.as_deref(),
            Some("http://proxy.local/v1/chat/completions")
        );
        assert_eq!(provider.model.as_deref(), Some("openai/gpt-4o-mini"));
    }

    fn openrouter_env(key: &str) -> Option<String> {
        match key {
            ENV_API_URL => Some("https://openrouter.ai/api/v1/chat/completions".to_string()),
            ENV_MODEL => Some("openai/gpt-4o-mini".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_ollama_flag_ignores_openrouter_env() {
        let mut config = Config::default();
        config.apply_overrides(Some(ProviderKind::Ollama), None, None, openrouter_env);

        assert_eq!(config.provider.kind, ProviderKind::Ollama);
        assert!(config.provider.endpoint.is_none());
        assert!(config.provider.model.is_none());
    }

    #[test]
    fn test_openrouter_flag_reads_env_over_ollama_file() {
        let mut config = Config::from_toml(
            "[provider]\nkind = \"ollama\"\nmodel = \"llama3\"\nendpoint = \"http://gpu-box:11434\"\n",
        )
        .unwrap();
        config.apply_overrides(Some(ProviderKind::OpenRouter), None, None, openrouter_env);

        assert_eq!(config.provider.kind, ProviderKind::OpenRouter);
        assert_eq!(config.provider.model.as_deref(), Some("openai/gpt-4o-mini"));
        assert_eq!(
            config.provider.endpoint.as_deref(),
            Some("https://openrouter.ai/api/v1/chat/completions")
        );
    }

    #[test]
    fn test_flags_override_env() {
        let mut config = Config::default();
        config.apply_overrides(
            None,
            Some("anthropic/claude-3-haiku".to_string()),
            Some("http://proxy.local/v1/chat/completions".to_string()),
            openrouter_env,
        );

        assert_eq!(config.provider.model.as_deref(), Some("anthropic/claude-3-haiku"));
        assert_eq!(
            config.provider.endpoint.as_deref(),
            Some("http://proxy.local/v1/chat/completions")
        );
    }

    #[test]
    fn test_same_kind_flag_keeps_file_settings() {
        let mut config =
            Config::from_toml("[provider]\nkind = \"ollama\"\nmodel = \"llama3\"\n").unwrap();
        config.apply_overrides(Some(ProviderKind::Ollama), None, None, |_| None);
        assert_eq!(config.provider.model.as_deref(), Some("llama3"));
    }

    #[test]
    fn test_env_ignored_for_ollama() {
        let mut provider = ProviderSettings {
            kind: ProviderKind::Ollama,
            ..Default::default()
        };
        provider.apply_env(|_| Some("ignored".to_string()));
        assert!(provider.endpoint.is_none());
        assert!(provider.model.is_none());
    }
}
